//! Binding contracts to call arguments through the full pipeline.

use effect_schema::{
    Clause, Computation, Constant, Effect, EffectSchema, Error, Expr, FunctionDescriptor,
    FunctionId, InvocationKind, Type,
};
use effect_schema_tests::{TestHarness, fixtures, local, param};

#[test]
fn test_receivers_bind_before_value_parameters() {
    let harness = TestHarness::new();
    let s = local("s", Type::class("String").make_nullable());
    let block = local("block", Type::class("Function1"));

    let schema = harness.schema(
        &fixtures::also(),
        &[Computation::from(s), Computation::from(block.clone())],
    );
    assert_eq!(
        schema.clauses(),
        &[Clause::always(Effect::calls(block, InvocationKind::ExactlyOnce))]
    );
}

#[test]
fn test_dispatch_receiver_comes_first() {
    // class Box { fun isFull(other: Any?): Boolean }
    // returns(true) implies (other is String)
    let this = param("Box.isFull", "<this>", Type::class("Box"));
    let other = param("Box.isFull", "other", Type::any().make_nullable());
    let function = FunctionDescriptor::builder("Box.isFull", Type::boolean())
        .dispatch_receiver(this)
        .parameter(other.clone())
        .contract(EffectSchema::new(vec![Clause::new(
            Expr::is(other, Type::class("String"), false),
            Effect::returns(Constant::True),
        )]))
        .build()
        .unwrap();
    assert_eq!(function.to_string(), "isFull(other: Any?): Boolean");

    let harness = TestHarness::new();
    let receiver = local("box", Type::class("Box"));
    let arg = local("arg", Type::any().make_nullable());
    let schema = harness.schema(
        &function,
        &[Computation::from(receiver), Computation::from(arg.clone())],
    );
    assert_eq!(
        schema.clauses(),
        &[Clause::new(
            Expr::is(arg, Type::class("String"), false),
            Effect::returns(Constant::True)
        )]
    );
}

#[test]
fn test_wrong_argument_count_is_a_fault() {
    let harness = TestHarness::new();
    let err = harness
        .system()
        .call(&fixtures::is_string(), &[])
        .unwrap_err();
    assert_eq!(
        err,
        Error::ParameterMismatch {
            function: FunctionId::from("isString"),
            parameters: 1,
            arguments: 0,
        }
    );
}

#[test]
fn test_function_without_contracts_has_no_effects() {
    let harness = TestHarness::new();
    let plain = FunctionDescriptor::builder("println", Type::class("Unit"))
        .parameter(param("println", "message", Type::any().make_nullable()))
        .build()
        .unwrap();

    let call = harness.call(&plain, &[Computation::Unknown]);
    assert!(call.effects().is_empty());
    assert_eq!(call.ty(), Type::class("Unit"));
}

#[test]
fn test_lambda_must_be_a_plain_value() {
    let harness = TestHarness::new();
    let schema = harness.schema(&fixtures::run(), &[Computation::Unknown]);
    assert!(schema.is_empty());
}

#[test]
fn test_returned_parameter_binds_to_argument() {
    // fun <T> identity(x: T): T, returns(x) unconditionally
    let x = param("identity", "x", Type::any().make_nullable());
    let identity = FunctionDescriptor::builder("identity", Type::any().make_nullable())
        .parameter(x.clone())
        .contract(EffectSchema::new(vec![Clause::always(Effect::returns(x))]))
        .build()
        .unwrap();

    let harness = TestHarness::new();
    let v = local("v", Type::any().make_nullable());
    assert_eq!(
        harness
            .schema(&identity, &[Computation::from(v.clone())])
            .clauses(),
        &[Clause::always(Effect::returns(v))]
    );

    let nested = harness.call(&fixtures::is_string(), &[Computation::Unknown]);
    assert!(harness.schema(&identity, &[nested]).is_empty());
}

#[test]
fn test_effects_of_nested_arguments_survive() {
    // isNotNull(run { block() })
    let harness = TestHarness::new();
    let block = local("block", Type::class("Function0"));

    let run = harness.call(&fixtures::run(), &[Computation::from(block.clone())]);
    let schema = harness.schema(&fixtures::is_not_null(), &[run]);
    assert_eq!(
        schema.clauses(),
        &[Clause::always(Effect::calls(block, InvocationKind::ExactlyOnce))]
    );
}

#[test]
fn test_condition_over_nested_boolean_call() {
    // isNotNull(x) == true passed on as require(isNotNull(x))
    let harness = TestHarness::new();
    let x = local("x", Type::any().make_nullable());

    let not_null = harness.call(&fixtures::is_not_null(), &[Computation::from(x.clone())]);
    let schema = harness.schema(&fixtures::require(), &[not_null]);
    assert_eq!(
        schema.clauses(),
        &[Clause::new(
            Expr::equal(x, Constant::Null, true),
            Effect::returns(Constant::Wildcard)
        )]
    );
}

#[test]
fn test_constant_argument_folds_condition() {
    let harness = TestHarness::new();

    let always = harness.schema(&fixtures::require(), &[Computation::from(Constant::True)]);
    assert_eq!(
        always.clauses(),
        &[Clause::always(Effect::returns(Constant::Wildcard))]
    );

    let never = harness.schema(&fixtures::require(), &[Computation::from(Constant::False)]);
    assert!(never.is_empty());
}

#[test]
fn test_call_site_schemas_are_reduced_once() {
    let harness = TestHarness::new();
    let s = local("s", Type::class("String"));
    let x = local("x", Type::any().make_nullable());
    let lambda = local("lambda", Type::class("Function0"));

    let schemas = vec![
        harness.schema(&fixtures::is_string(), &[Computation::from(s.clone())]),
        harness.schema(&fixtures::is_string(), &[Computation::from(x)]),
        harness.schema(&fixtures::is_null_or_empty(), &[Computation::from(s)]),
        harness.schema(
            &fixtures::repeat_until(),
            &[Computation::from(Constant::False), Computation::from(lambda)],
        ),
    ];
    for schema in schemas {
        assert_eq!(harness.system().reduce(&schema), schema, "{}", schema);
    }
}

#[test]
fn test_string_argument_decides_is_string() {
    let harness = TestHarness::new();
    let s = local("s", Type::class("String"));

    let schema = harness.schema(&fixtures::is_string(), &[Computation::from(s)]);
    assert_eq!(
        schema.clauses(),
        &[Clause::always(Effect::returns(Constant::True))]
    );
}
