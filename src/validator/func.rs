//! Adapters turning closures into tests, gates and validators.
//!
//! Plain `Fn(Option<&Value>) -> bool` closures are tests and
//! `Fn(&Context) -> bool` closures are gates without any wrapping. The
//! adapters here cover the remaining shapes: fallible closures, and async
//! closures whose futures must own their inputs.

use std::future::Future;

use async_trait::async_trait;
use serde_json::Value;

use crate::context::Context;
use crate::error::{BoxError, Error, ValidationError};

use super::traits::{Gate, Test, Validator};

/// A test built from a fallible closure. See [`test_fn`].
pub struct TestFn<F>(F);

/// Adapts a synchronous closure that may fail.
///
/// The closure also receives the context, for tests that compare against
/// sibling values.
pub fn test_fn<F>(f: F) -> TestFn<F>
where
    F: Fn(Option<&Value>, &Context) -> Result<bool, BoxError> + Send + Sync,
{
    TestFn(f)
}

#[async_trait]
impl<F> Test for TestFn<F>
where
    F: Fn(Option<&Value>, &Context) -> Result<bool, BoxError> + Send + Sync,
{
    async fn test(
        &self,
        value: Option<&Value>,
        context: &Context,
        _message: &str,
    ) -> Result<bool, BoxError> {
        (self.0)(value, context)
    }
}

/// A test built from an async closure. See [`async_test`].
pub struct AsyncTest<F>(F);

/// Adapts an async closure, e.g. a uniqueness lookup against a remote store.
///
/// The closure receives owned copies of the value and the context so the
/// future it returns can outlive the call.
///
/// # Example
///
/// ```rust
/// use perfecto::{async_test, path, validate, validators, Context};
/// use serde_json::{json, Value};
///
/// let unique = async_test(|name: Option<Value>, _ctx: Context| async move {
///     // stands in for a database round trip
///     Ok(name != Some(json!("taken")))
/// });
/// let form = validators![perfecto::path(unique, "already taken", path!["login"])];
///
/// # futures::executor::block_on(async {
/// let errors = validate(&form, &Context::new(json!({ "login": "taken" }))).await.unwrap();
/// assert_eq!(errors.len(), 1);
/// # });
/// ```
pub fn async_test<F, Fut>(f: F) -> AsyncTest<F>
where
    F: Fn(Option<Value>, Context) -> Fut + Send + Sync,
    Fut: Future<Output = Result<bool, BoxError>> + Send + 'static,
{
    AsyncTest(f)
}

#[async_trait]
impl<F, Fut> Test for AsyncTest<F>
where
    F: Fn(Option<Value>, Context) -> Fut + Send + Sync,
    Fut: Future<Output = Result<bool, BoxError>> + Send + 'static,
{
    async fn test(
        &self,
        value: Option<&Value>,
        context: &Context,
        _message: &str,
    ) -> Result<bool, BoxError> {
        (self.0)(value.cloned(), context.clone()).await
    }
}

/// A gate built from an async closure. See [`async_gate`].
pub struct AsyncGate<F>(F);

/// Adapts an async, fallible closure into a [`Gate`].
pub fn async_gate<F, Fut>(f: F) -> AsyncGate<F>
where
    F: Fn(Context) -> Fut + Send + Sync,
    Fut: Future<Output = Result<bool, BoxError>> + Send + 'static,
{
    AsyncGate(f)
}

#[async_trait]
impl<F, Fut> Gate for AsyncGate<F>
where
    F: Fn(Context) -> Fut + Send + Sync,
    Fut: Future<Output = Result<bool, BoxError>> + Send + 'static,
{
    async fn allows(&self, context: &Context) -> Result<bool, BoxError> {
        (self.0)(context.clone()).await
    }
}

/// A validator built from an async closure. See [`validator_fn`].
pub struct FnValidator<F>(F);

/// Adapts an async closure producing errors directly.
///
/// Useful for cross-field rules that report at a path of their own choosing.
///
/// # Example
///
/// ```rust
/// use perfecto::{path, validate, validator_fn, validators, Context, ValidationError};
/// use serde_json::json;
///
/// let matching = validator_fn(|ctx: Context| async move {
///     let object = ctx.object();
///     if object["password"] == object["confirmation"] {
///         Ok(vec![])
///     } else {
///         Ok(vec![ValidationError::new(ctx.path().push_field("confirmation"), "does not match")])
///     }
/// });
///
/// # futures::executor::block_on(async {
/// let context = Context::new(json!({ "password": "a", "confirmation": "b" }));
/// let errors = validate(&validators![matching], &context).await.unwrap();
/// assert_eq!(errors[0].path, path!["confirmation"]);
/// # });
/// ```
pub fn validator_fn<F, Fut>(f: F) -> FnValidator<F>
where
    F: Fn(Context) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Vec<ValidationError>, Error>> + Send + 'static,
{
    FnValidator(f)
}

#[async_trait]
impl<F, Fut> Validator for FnValidator<F>
where
    F: Fn(Context) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Vec<ValidationError>, Error>> + Send + 'static,
{
    async fn run(&self, context: &Context) -> Result<Vec<ValidationError>, Error> {
        (self.0)(context.clone()).await
    }
}
