//! Integration tests for predicate.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use perfecto::{
    async_gate, nest, path, predicate, rules, validate, validator_fn, validators, Context,
    ValidationError,
};
use serde_json::{json, Value};

fn is_jedi(ctx: &Context) -> bool {
    ctx.object().get("isJedi").and_then(Value::as_bool) == Some(true)
}

#[tokio::test]
async fn test_validators_run_when_gate_opens() {
    let form = validators![predicate(
        is_jedi,
        validators![rules::present("Got no sword", path!["sword"])]
    )];

    let errors = validate(&form, &Context::new(json!({ "name": "Luke", "isJedi": true })))
        .await
        .unwrap();

    assert_eq!(errors, vec![ValidationError::new(path!["sword"], "Got no sword")]);
}

#[tokio::test]
async fn test_satisfied_validators_report_nothing() {
    let form = validators![predicate(
        is_jedi,
        validators![rules::present("Got no sword", path!["sword"])]
    )];

    let errors = validate(
        &form,
        &Context::new(json!({ "name": "Luke", "sword": "Lightsword", "isJedi": true })),
    )
    .await
    .unwrap();

    assert!(errors.is_empty());
}

#[tokio::test]
async fn test_closed_gate_never_invokes_validators() {
    let calls = Arc::new(AtomicUsize::new(0));
    let spy = {
        let calls = Arc::clone(&calls);
        validator_fn(move |_ctx: Context| {
            let calls = Arc::clone(&calls);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(vec![ValidationError::new(path!["spy"], "called")])
            }
        })
    };
    let form = validators![predicate(|_ctx: &Context| false, validators![spy])];

    let errors = validate(&form, &Context::new(json!({}))).await.unwrap();

    assert!(errors.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_open_gate_invokes_validators_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let spy = {
        let calls = Arc::clone(&calls);
        validator_fn(move |_ctx: Context| {
            let calls = Arc::clone(&calls);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(Vec::new())
            }
        })
    };
    let form = validators![predicate(|_ctx: &Context| true, validators![spy])];

    validate(&form, &Context::new(json!({}))).await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_gate_sees_current_context() {
    let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
    let gate = {
        let seen = Arc::clone(&seen);
        move |ctx: &Context| {
            seen.lock().unwrap().push(ctx.path().clone());
            ctx.value().and_then(|v| v.get("armed")).is_some()
        }
    };
    let form = validators![nest(
        path!["droid"],
        validators![predicate(
            gate,
            validators![rules::present("needs ammo", path!["ammo"])]
        )]
    )];

    let errors = validate(&form, &Context::new(json!({ "droid": { "armed": true } })))
        .await
        .unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![path!["droid"]]);
    assert_eq!(errors, vec![ValidationError::new(path!["droid", "ammo"], "needs ammo")]);
}

#[tokio::test]
async fn test_async_gate() {
    let registered = async_gate(|ctx: Context| async move {
        tokio::task::yield_now().await;
        Ok(ctx.object().get("registered") == Some(&json!(true)))
    });
    let form = validators![predicate(
        registered,
        validators![rules::present("is required", path!["licence"])]
    )];

    let unregistered = validate(&form, &Context::new(json!({}))).await.unwrap();
    assert!(unregistered.is_empty());

    let missing = validate(&form, &Context::new(json!({ "registered": true })))
        .await
        .unwrap();
    assert_eq!(missing.len(), 1);
}
