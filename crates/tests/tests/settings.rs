//! Settings loaded from host configuration, applied to whole pipelines.

use effect_schema::{
    Clause, Computation, Constant, Effect, EffectSystemSettings, Expr, InvocationKind, Type,
};
use effect_schema_tests::{TestHarness, fixtures, local};

fn load(json: &str) -> EffectSystemSettings {
    match serde_json::from_str(json) {
        Ok(settings) => settings,
        Err(e) => panic!("invalid settings {}: {}", json, e),
    }
}

#[test]
fn test_empty_object_is_default() {
    assert_eq!(load("{}"), EffectSystemSettings::default());
}

#[test]
fn test_settings_round_trip_in_camel_case() {
    let settings = EffectSystemSettings {
        calls_in_place_effects: false,
        ..Default::default()
    };
    let json = serde_json::to_value(settings).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "returnsEffects": true,
            "callsInPlaceEffects": false,
            "reduceSchemas": true,
        })
    );
}

#[test]
fn test_disabled_calls_in_place() {
    let harness = TestHarness::with_settings(load(r#"{ "callsInPlaceEffects": false }"#));
    assert!(!harness.system().settings().calls_in_place_effects);
    assert!(harness.system().settings().returns_effects);
    let done = local("done", Type::boolean());
    let lambda = local("lambda", Type::class("Function0"));

    let schema = harness.schema(
        &fixtures::repeat_until(),
        &[Computation::from(done), Computation::from(lambda)],
    );
    assert!(schema.is_empty());
}

#[test]
fn test_disabled_returns() {
    let harness = TestHarness::with_settings(load(r#"{ "returnsEffects": false }"#));
    let x = local("x", Type::any().make_nullable());
    let lambda = local("lambda", Type::class("Function0"));

    assert!(
        harness
            .schema(&fixtures::is_string(), &[Computation::from(x.clone())])
            .is_empty()
    );

    // operators are gated too, only the nested invocation survives
    let run = harness.call(&fixtures::run(), &[Computation::from(lambda.clone())]);
    let is_str = harness.call(&fixtures::is_string(), &[Computation::from(x)]);
    let condition = harness.and(run, is_str);
    assert_eq!(
        condition.effects().clauses(),
        &[Clause::always(Effect::calls(lambda, InvocationKind::ExactlyOnce))]
    );
}

#[test]
fn test_disabled_reduction_keeps_decidable_clauses() {
    let harness = TestHarness::with_settings(load(r#"{ "reduceSchemas": false }"#));
    let s = local("s", Type::class("String"));

    let schema = harness.schema(&fixtures::is_string(), &[Computation::from(s.clone())]);
    assert_eq!(
        schema.clauses(),
        &[
            Clause::new(
                Expr::is(s.clone(), Type::class("String"), false),
                Effect::returns(Constant::True)
            ),
            Clause::new(
                Expr::is(s, Type::class("String"), true),
                Effect::returns(Constant::False)
            ),
        ]
    );

    // the host can still fold on demand
    assert_eq!(
        harness.system().reduce(&schema).clauses(),
        &[Clause::always(Effect::returns(Constant::True))]
    );
}
