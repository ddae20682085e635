//! Leaf checks.
//!
//! A [`Check`] lifts a [`Test`] into a validator producing zero or one error.
//! [`path`] is the same check scoped to a nested location, so single-field
//! rules can be attached anywhere without the test knowing about nesting.

use async_trait::async_trait;

use crate::context::Context;
use crate::error::{Error, ValidationError};
use crate::path::FieldPath;

use super::traits::{Test, Validator};

/// A single test with the message reported when it fails.
pub struct Check<T> {
    test: T,
    message: String,
    sub_path: FieldPath,
}

impl<T: Test> Check<T> {
    /// Creates a check of the value at the context's own path.
    pub fn new(test: T, message: impl Into<String>) -> Self {
        Self {
            test,
            message: message.into(),
            sub_path: FieldPath::root(),
        }
    }

    /// Scopes this check to `sub_path` below the context's path.
    pub fn at(mut self, sub_path: impl Into<FieldPath>) -> Self {
        self.sub_path = self.sub_path.join(&sub_path.into());
        self
    }

    /// Returns the message reported on failure.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Runs the test and returns the error it produced, if any.
    ///
    /// The error's path is the absolute path of the tested value. A failing
    /// test is returned as [`Error::Test`] rather than as a validation error.
    pub async fn evaluate(&self, context: &Context) -> Result<Option<ValidationError>, Error> {
        let context = context.scoped(&self.sub_path);
        let passed = self
            .test
            .test(context.value(), &context, &self.message)
            .await
            .map_err(|source| {
                tracing::debug!(path = %context.path(), error = %source, "test failed to run");
                Error::Test {
                    path: context.path().clone(),
                    source,
                }
            })?;

        if passed {
            return Ok(None);
        }

        tracing::trace!(path = %context.path(), message = %self.message, "check failed");
        Ok(Some(ValidationError::new(
            context.path().clone(),
            self.message.clone(),
        )))
    }
}

#[async_trait]
impl<T: Test> Validator for Check<T> {
    async fn run(&self, context: &Context) -> Result<Vec<ValidationError>, Error> {
        Ok(self.evaluate(context).await?.into_iter().collect())
    }
}

/// Checks the value at the context's path with `test`.
///
/// # Example
///
/// ```rust
/// use perfecto::{check, Context, FieldPath};
/// use serde_json::{json, Value};
///
/// let is_string = check(|v: Option<&Value>| v.is_some_and(Value::is_string), "not a string");
///
/// # futures::executor::block_on(async {
/// let error = is_string.evaluate(&Context::new(json!(42))).await.unwrap().unwrap();
/// assert_eq!(error.path, FieldPath::root());
/// assert_eq!(error.message, "not a string");
/// # });
/// ```
pub fn check<T: Test>(test: T, message: impl Into<String>) -> Check<T> {
    Check::new(test, message)
}

/// Checks the value at `sub_path` below the context's path with `test`.
///
/// # Example
///
/// ```rust
/// use perfecto::{path, rules::Present, Context};
/// use serde_json::json;
///
/// let name_required = perfecto::path(Present, "is required", path!["name"]);
///
/// # futures::executor::block_on(async {
/// let error = name_required.evaluate(&Context::new(json!({}))).await.unwrap().unwrap();
/// assert_eq!(error.path, path!["name"]);
/// # });
/// ```
pub fn path<T: Test>(test: T, message: impl Into<String>, sub_path: impl Into<FieldPath>) -> Check<T> {
    Check::new(test, message).at(sub_path)
}
