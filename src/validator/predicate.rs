//! Conditional validation.

use async_trait::async_trait;

use crate::context::Context;
use crate::error::{Error, ValidationError};

use super::compose::validate;
use super::traits::{Gate, Validator, Validators};

/// Validators that only run when a gate allows them.
///
/// The gate sees the context exactly as the predicate received it; unlike
/// [`Nest`](super::Nest), a predicate never changes the path.
pub struct Predicate<G> {
    gate: G,
    validators: Validators,
}

impl<G: Gate> Predicate<G> {
    /// Guards `validators` behind `gate`.
    pub fn new(gate: G, validators: Validators) -> Self {
        Self { gate, validators }
    }
}

#[async_trait]
impl<G: Gate> Validator for Predicate<G> {
    async fn run(&self, context: &Context) -> Result<Vec<ValidationError>, Error> {
        let allowed = self.gate.allows(context).await.map_err(|source| Error::Gate {
            path: context.path().clone(),
            source,
        })?;

        if !allowed {
            tracing::trace!(
                path = %context.path(),
                skipped = self.validators.len(),
                "gate closed, skipping validators"
            );
            return Ok(Vec::new());
        }

        validate(&self.validators, context).await
    }
}

/// Runs `validators` against the current context only when `gate` allows it.
///
/// When the gate is closed none of the validators is invoked.
///
/// # Example
///
/// ```rust
/// use perfecto::{path, predicate, rules, validate, validators, Context};
/// use serde_json::{json, Value};
///
/// let is_jedi = |ctx: &Context| ctx.object()["isJedi"] == Value::Bool(true);
/// let jedi_rules = validators![predicate(is_jedi, validators![
///     rules::present("Got no sword", path!["sword"]),
/// ])];
///
/// # futures::executor::block_on(async {
/// let padawan = validate(&jedi_rules, &Context::new(json!({ "name": "Han" }))).await.unwrap();
/// assert!(padawan.is_empty());
///
/// let luke = validate(&jedi_rules, &Context::new(json!({ "isJedi": true }))).await.unwrap();
/// assert_eq!(luke[0].path, path!["sword"]);
/// # });
/// ```
pub fn predicate<G: Gate>(gate: G, validators: Validators) -> Predicate<G> {
    Predicate::new(gate, validators)
}
