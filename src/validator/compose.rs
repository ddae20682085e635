//! Structural validators: running many validators side by side, scoping a
//! whole subtree, and mapping over arrays.

use std::future::Future;

use async_trait::async_trait;
use futures::future::try_join_all;
use futures::{stream, StreamExt, TryStreamExt};
use serde_json::Value;

use crate::context::Context;
use crate::error::{Error, ValidationError, ValidationErrors};
use crate::path::{FieldPath, Segment};

use super::traits::{BoxValidator, Validator, Validators};
use crate::ValidationResult;

/// Drives `futures` concurrently and collects their outputs in input order.
///
/// Every future is started before any is awaited unless the context caps the
/// fan-out, in which case at most `limit` are in flight. The first failure
/// aborts the rest.
pub(crate) async fn fan_out<I, F, T>(context: &Context, futures: I) -> Result<Vec<T>, Error>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T, Error>>,
{
    match context.options().concurrency() {
        None => try_join_all(futures).await,
        Some(limit) => stream::iter(futures).buffered(limit).try_collect().await,
    }
}

/// Runs every validator against the same `context` and flattens their errors.
///
/// Validators run concurrently; the errors are ordered by validator position,
/// not by completion time. An execution failure in any validator fails the
/// whole call.
///
/// # Example
///
/// ```rust
/// use perfecto::{nest, path, rules, validate, validators, Context, ValidationError};
/// use serde_json::json;
///
/// let form = validators![
///     rules::present("is required", path!["name"]),
///     nest(path!["address"], validators![rules::present("is required", path!["city"])]),
/// ];
///
/// # futures::executor::block_on(async {
/// let errors = validate(&form, &Context::new(json!({ "name": "Luke" }))).await.unwrap();
///
/// assert_eq!(errors, vec![ValidationError::new(path!["address", "city"], "is required")]);
/// # });
/// ```
pub async fn validate(
    validators: &[BoxValidator],
    context: &Context,
) -> Result<Vec<ValidationError>, Error> {
    tracing::trace!(path = %context.path(), validators = validators.len(), "fanning out");
    let runs: Vec<_> = validators.iter().map(|v| v.run(context)).collect();
    let results = fan_out(context, runs).await?;
    Ok(results.into_iter().flatten().collect())
}

/// Runs [`validate`] and accumulates the outcome into a stillwater
/// `Validation`: `Success(())` when no error was found, otherwise `Failure`
/// with every error in order.
///
/// Execution failures stay in the outer `Result`.
///
/// # Example
///
/// ```rust
/// use perfecto::{path, rules, validate_all, validators, Context};
/// use serde_json::json;
///
/// let form = validators![rules::present("is required", path!["name"])];
///
/// # futures::executor::block_on(async {
/// let result = validate_all(&form, &Context::new(json!({}))).await.unwrap();
/// assert!(result.is_failure());
/// # });
/// ```
pub async fn validate_all(
    validators: &[BoxValidator],
    context: &Context,
) -> Result<ValidationResult<()>, Error> {
    let errors = validate(validators, context).await?;
    Ok(match ValidationErrors::from_errors(errors) {
        Some(errors) => stillwater::Validation::Failure(errors),
        None => stillwater::Validation::Success(()),
    })
}

/// Validators scoped to a sub-path of the context.
pub struct Nest {
    sub_path: FieldPath,
    validators: Validators,
}

impl Nest {
    /// Scopes `validators` to `sub_path`.
    pub fn new(sub_path: impl Into<FieldPath>, validators: Validators) -> Self {
        Self {
            sub_path: sub_path.into(),
            validators,
        }
    }
}

#[async_trait]
impl Validator for Nest {
    async fn run(&self, context: &Context) -> Result<Vec<ValidationError>, Error> {
        validate(&self.validators, &context.scoped(&self.sub_path)).await
    }
}

/// Runs `validators` against the value at `sub_path`, so every error they
/// report carries the full path from the root.
pub fn nest(sub_path: impl Into<FieldPath>, validators: Validators) -> Nest {
    Nest::new(sub_path, validators)
}

/// Validators applied to every element of an array.
pub struct Array {
    validators: Validators,
}

impl Array {
    /// Applies `validators` to each element of the array at the context's path.
    pub fn new(validators: Validators) -> Self {
        Self { validators }
    }

    async fn run_element(
        &self,
        context: &Context,
        index: usize,
    ) -> Result<Vec<ValidationError>, Error> {
        let element = context.scoped(&FieldPath::from(Segment::Index(index)));
        validate(&self.validators, &element).await
    }
}

#[async_trait]
impl Validator for Array {
    async fn run(&self, context: &Context) -> Result<Vec<ValidationError>, Error> {
        let len = match context.value() {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::Array(items)) => items.len(),
            Some(other) => {
                tracing::debug!(
                    path = %context.path(),
                    found = value_kind(other),
                    "array validator found no array, nothing to check"
                );
                return Ok(Vec::new());
            }
        };

        tracing::trace!(path = %context.path(), elements = len, "validating array elements");
        let elements: Vec<_> = (0..len)
            .map(|index| self.run_element(context, index))
            .collect();
        let results = fan_out(context, elements).await?;
        Ok(results.into_iter().flatten().collect())
    }
}

/// Runs `validators` against every element of the array at the context's
/// path, concatenating the errors in index order.
///
/// A missing or null array is valid: requiring the array is a separate check.
pub fn array(validators: Validators) -> Array {
    Array::new(validators)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
