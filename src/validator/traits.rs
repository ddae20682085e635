//! Traits at the seams of the engine.
//!
//! - [`Validator`]: anything that turns a [`Context`] into a list of errors.
//! - [`Test`]: the leaf predicate a [`Check`](super::Check) lifts into a
//!   validator.
//! - [`Gate`]: the condition a [`Predicate`](super::Predicate) evaluates before
//!   running its validators.
//!
//! Plain closures implement `Test` and `Gate` directly; async and fallible
//! closures go through the adapters in [`func`](super::func).

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::context::Context;
use crate::error::{BoxError, Error, ValidationError};

/// A validator: an asynchronous function of a context resolving to the
/// validation errors found there.
///
/// An empty list means the context is valid. `Err` means the validator could
/// not run, which aborts the enclosing validation.
///
/// Validators only read the context's object; running the same validator twice
/// against the same object yields the same errors.
#[async_trait]
pub trait Validator: Send + Sync {
    /// Runs this validator against `context`.
    async fn run(&self, context: &Context) -> Result<Vec<ValidationError>, Error>;
}

/// A type-erased, owned validator.
pub type BoxValidator = Box<dyn Validator>;

/// An ordered list of validators run side by side.
pub type Validators = Vec<BoxValidator>;

#[async_trait]
impl<V: Validator + ?Sized> Validator for Box<V> {
    async fn run(&self, context: &Context) -> Result<Vec<ValidationError>, Error> {
        (**self).run(context).await
    }
}

#[async_trait]
impl<V: Validator + ?Sized> Validator for Arc<V> {
    async fn run(&self, context: &Context) -> Result<Vec<ValidationError>, Error> {
        (**self).run(context).await
    }
}

/// Conversions available on every validator.
pub trait ValidatorExt: Validator + Sized + 'static {
    /// Erases the concrete type so heterogeneous validators share a list.
    fn boxed(self) -> BoxValidator {
        Box::new(self)
    }
}

impl<V: Validator + 'static> ValidatorExt for V {}

/// The predicate behind a check.
///
/// `value` is the value at the context's path, `None` when the path does not
/// resolve. Returning `Ok(false)` fails the check with its message; `Err` is an
/// execution failure.
///
/// Any `Fn(Option<&Value>) -> bool` is a test:
///
/// ```rust
/// use perfecto::{check, validate, Context};
/// use serde_json::{json, Value};
///
/// fn is_jedi(person: Option<&Value>) -> bool {
///     person.and_then(|p| p.get("isJedi")).and_then(Value::as_bool) == Some(true)
/// }
///
/// # futures::executor::block_on(async {
/// let errors = validate(
///     &perfecto::validators![check(is_jedi, "Jedi he is not")],
///     &Context::new(json!({ "name": "Jabba" })),
/// )
/// .await
/// .unwrap();
///
/// assert_eq!(errors[0].message, "Jedi he is not");
/// # });
/// ```
#[async_trait]
pub trait Test: Send + Sync {
    /// Decides whether `value` passes.
    async fn test(
        &self,
        value: Option<&Value>,
        context: &Context,
        message: &str,
    ) -> Result<bool, BoxError>;
}

#[async_trait]
impl<F> Test for F
where
    F: Fn(Option<&Value>) -> bool + Send + Sync,
{
    async fn test(
        &self,
        value: Option<&Value>,
        _context: &Context,
        _message: &str,
    ) -> Result<bool, BoxError> {
        Ok(self(value))
    }
}

/// The condition guarding a [`Predicate`](super::Predicate).
///
/// Any `Fn(&Context) -> bool` is a gate.
#[async_trait]
pub trait Gate: Send + Sync {
    /// Decides whether the guarded validators should run against `context`.
    async fn allows(&self, context: &Context) -> Result<bool, BoxError>;
}

#[async_trait]
impl<F> Gate for F
where
    F: Fn(&Context) -> bool + Send + Sync,
{
    async fn allows(&self, context: &Context) -> Result<bool, BoxError> {
        Ok(self(context))
    }
}
