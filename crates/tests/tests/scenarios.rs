//! End-to-end call-site scenarios.
//!
//! Each test builds the call tree a type checker would build for a small
//! Kotlin expression and verifies the resulting schema and the facts read
//! from it.

use effect_schema::facts::{self, EqualityFact, TypeFact};
use effect_schema::{
    Clause, Computation, Constant, Effect, EffectSchema, Expr, FunctionCall, FunctionId, Functor,
    InvocationKind, Type,
};
use effect_schema_tests::{TestHarness, fixtures, local, param};

fn string() -> Type {
    Type::class("String")
}

/// `isNotNullish(v)` where the contract is `returns(true) implies (x is Any)`.
#[test]
fn test_type_check_on_plain_variable() {
    let harness = TestHarness::new();
    let x = param("isNotNullish", "x", Type::any().make_nullable());
    let function = effect_schema::FunctionDescriptor::builder("isNotNullish", Type::boolean())
        .parameter(x.clone())
        .contract(EffectSchema::new(vec![Clause::new(
            Expr::is(x, Type::any(), false),
            Effect::returns(Constant::True),
        )]))
        .build()
        .unwrap();

    let v = local("v", Type::any().make_nullable());
    let schema = harness.schema(&function, &[Computation::from(v.clone())]);
    assert_eq!(
        schema.clauses(),
        &[Clause::new(
            Expr::is(v, Type::any(), false),
            Effect::returns(Constant::True)
        )]
    );
}

/// `a == b` on two variables.
#[test]
fn test_equality_of_variables() {
    let harness = TestHarness::new();
    let a = local("a", Type::any().make_nullable());
    let b = local("b", Type::any().make_nullable());

    let eq = harness.operator(
        Functor::Equals { negated: false },
        &[Computation::from(a.clone()), Computation::from(b.clone())],
    );
    assert_eq!(
        eq.effects().clauses(),
        &[
            Clause::new(Expr::equal(a.clone(), b.clone(), false), Effect::returns(Constant::True)),
            Clause::new(Expr::equal(a, b, true), Effect::returns(Constant::False)),
        ]
    );
}

/// `f() && g()` where `f` only says when it is true and `g` only when false.
#[test]
fn test_and_with_one_sided_operands() {
    let harness = TestHarness::new();
    let x = local("x", Type::any().make_nullable());
    let c1 = Expr::is(x.clone(), string(), false);
    let c2 = Expr::is(x, Type::class("Int"), false);

    let only_true = Computation::FunctionCall(FunctionCall {
        function: FunctionId::from("f"),
        return_type: Type::boolean(),
        effects: EffectSchema::new(vec![Clause::new(c1.clone(), Effect::returns(Constant::True))]),
    });
    let only_false = Computation::FunctionCall(FunctionCall {
        function: FunctionId::from("g"),
        return_type: Type::boolean(),
        effects: EffectSchema::new(vec![Clause::new(c2, Effect::returns(Constant::False))]),
    });

    let and = harness.and(only_true, only_false);
    assert_eq!(
        and.effects().clauses(),
        &[Clause::new(c1, Effect::returns(Constant::True))]
    );
}

/// `if (!s.isNullOrEmpty() && isString(x)) { ... }`
#[test]
fn test_smart_cast_facts_in_then_branch() {
    let harness = TestHarness::new();
    let s = local("s", Type::class("CharSequence").make_nullable());
    let x = local("x", Type::any().make_nullable());

    let empty = harness.call(&fixtures::is_null_or_empty(), &[Computation::from(s.clone())]);
    let is_str = harness.call(&fixtures::is_string(), &[Computation::from(x.clone())]);
    let condition = harness.and(harness.not(empty), is_str);

    let then_branch = facts::collect(condition.effects(), Constant::True);
    assert_eq!(
        then_branch.types,
        vec![TypeFact {
            variable: x.clone(),
            ty: string(),
            negated: false,
        }]
    );
    assert_eq!(
        then_branch.equalities,
        vec![EqualityFact {
            left: s.clone().into(),
            right: Constant::Null.into(),
            negated: true,
        }]
    );
    assert!(then_branch.is_not_null(&s));
    assert!(then_branch.is_not_null(&x));

    // the else branch only knows that one of the two failed
    let else_branch = facts::collect(condition.effects(), Constant::False);
    assert!(else_branch.is_empty());
}

/// `if (isString(x) || isNotNull(y)) ... else ...`
#[test]
fn test_else_branch_of_disjunction() {
    let harness = TestHarness::new();
    let x = local("x", Type::any().make_nullable());
    let y = local("y", Type::any().make_nullable());

    let is_str = harness.call(&fixtures::is_string(), &[Computation::from(x.clone())]);
    let not_null = harness.call(&fixtures::is_not_null(), &[Computation::from(y.clone())]);
    let condition = harness.or(is_str, not_null);

    // `isNotNull` says nothing about its FALSE outcome; FALSE of `||` still
    // pins down `isString`
    let else_branch = facts::collect(condition.effects(), Constant::False);
    assert_eq!(
        else_branch.types,
        vec![TypeFact {
            variable: x,
            ty: string(),
            negated: true,
        }]
    );
    assert!(facts::collect(condition.effects(), Constant::True).is_empty());
}

/// `require(x != null)`: everything after the call may assume `x != null`.
#[test]
fn test_require_with_nested_condition() {
    let harness = TestHarness::new();
    let x = local("x", Type::any().make_nullable());

    let check = harness.operator(
        Functor::Equals { negated: true },
        &[Computation::from(x.clone()), Computation::from(Constant::Null)],
    );
    let schema = harness.schema(&fixtures::require(), &[check]);

    assert_eq!(
        schema.clauses(),
        &[Clause::new(
            Expr::equal(x.clone(), Constant::Null, true),
            Effect::returns(Constant::Wildcard)
        )]
    );
    let after = facts::collect(&schema, Constant::Wildcard);
    assert!(after.is_not_null(&x));
}

/// `require(isString(x))`
#[test]
fn test_require_with_nested_call() {
    let harness = TestHarness::new();
    let x = local("x", Type::any().make_nullable());

    let is_str = harness.call(&fixtures::is_string(), &[Computation::from(x.clone())]);
    let schema = harness.schema(&fixtures::require(), &[is_str]);
    assert_eq!(
        schema.clauses(),
        &[Clause::new(
            Expr::is(x.clone(), string(), false),
            Effect::returns(Constant::Wildcard)
        )]
    );
    assert_eq!(
        facts::collect(&schema, Constant::Wildcard)
            .types_of(&x)
            .collect::<Vec<_>>(),
        vec![&string()]
    );
}

/// `run { ... }` and `repeatUntil(done, { ... })`
#[test]
fn test_invocation_kinds_of_lambdas() {
    let harness = TestHarness::new();
    let lambda = local("lambda", Type::class("Function0"));
    let done = local("done", Type::boolean());

    let run = harness.schema(&fixtures::run(), &[Computation::from(lambda.clone())]);
    let kinds = facts::invocations(&run);
    assert_eq!(kinds.get(&lambda), Some(&InvocationKind::ExactlyOnce));
    assert!(kinds[&lambda].is_definitely_visited());

    let repeat = harness.schema(
        &fixtures::repeat_until(),
        &[Computation::from(done.clone()), Computation::from(lambda.clone())],
    );
    assert_eq!(
        repeat.clauses(),
        &[
            Clause::always(Effect::calls(lambda.clone(), InvocationKind::Unknown)),
            Clause::new(
                Expr::equal(done, Constant::True, false),
                Effect::calls(lambda.clone(), InvocationKind::AtMostOnce)
            ),
        ]
    );
    // the gated clause is not unconditional
    assert_eq!(
        facts::invocations(&repeat).get(&lambda),
        Some(&InvocationKind::Unknown)
    );
}

/// `run { }` nested in a boolean operator keeps its invocation clause.
#[test]
fn test_invocations_survive_operators() {
    let harness = TestHarness::new();
    let lambda = local("lambda", Type::class("Function0"));
    let x = local("x", Type::any().make_nullable());

    let run = harness.call(&fixtures::run(), &[Computation::from(lambda.clone())]);
    let is_str = harness.call(&fixtures::is_string(), &[Computation::from(x)]);
    let condition = harness.and(harness.not(run), is_str);

    assert_eq!(
        facts::invocations(condition.effects()).get(&lambda),
        Some(&InvocationKind::ExactlyOnce)
    );
}

/// `x is String` where `x` is statically a `String` already.
#[test]
fn test_statically_known_check_is_folded() {
    let harness = TestHarness::new();
    let x = local("x", string());

    let check = harness.operator(
        Functor::Is {
            ty: Type::class("CharSequence"),
            negated: false,
        },
        &[Computation::from(x)],
    );
    assert_eq!(
        check.effects().clauses(),
        &[Clause::always(Effect::returns(Constant::True))]
    );
}

/// `either(orNull(v), w)` where `orNull` only promises a non-null result.
#[test]
fn test_non_null_result_keeps_alternative_open() {
    let harness = TestHarness::new();

    // fun orNull(a: Any?): Any?, returns(NOT_NULL) implies (a != null)
    let a = param("orNull", "a", Type::any().make_nullable());
    let or_null = effect_schema::FunctionDescriptor::builder("orNull", Type::any().make_nullable())
        .parameter(a.clone())
        .contract(EffectSchema::new(vec![Clause::new(
            Expr::equal(a, Constant::Null, true),
            Effect::returns(Constant::NotNull),
        )]))
        .build()
        .unwrap();

    // fun either(x: Any?, y: Any?): Boolean,
    // returns(true) implies (x is String || y is Int)
    let x = param("either", "x", Type::any().make_nullable());
    let y = param("either", "y", Type::any().make_nullable());
    let either = effect_schema::FunctionDescriptor::builder("either", Type::boolean())
        .parameter(x.clone())
        .parameter(y.clone())
        .contract(EffectSchema::new(vec![Clause::new(
            Expr::or(
                Expr::is(x, string(), false),
                Expr::is(y, Type::class("Int"), false),
            ),
            Effect::returns(Constant::True),
        )]))
        .build()
        .unwrap();

    let v = local("v", Type::any().make_nullable());
    let w = local("w", Type::any().make_nullable());
    let inner = harness.call(&or_null, &[Computation::from(v.clone())]);
    let schema = harness.schema(&either, &[inner, Computation::from(w.clone())]);

    // the non-null result may well be a String, so nothing is known about `w`
    assert_eq!(
        schema.clauses(),
        &[Clause::new(
            Expr::or(
                Expr::and(
                    Expr::is(Constant::NotNull, string(), false),
                    Expr::equal(v, Constant::Null, true),
                ),
                Expr::is(w.clone(), Type::class("Int"), false),
            ),
            Effect::returns(Constant::True)
        )]
    );
    assert_eq!(
        facts::collect(&schema, Constant::True)
            .types_of(&w)
            .count(),
        0
    );
}
