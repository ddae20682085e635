//! Error types.
//!
//! Two kinds of errors live here and are never mixed:
//! - [`ValidationError`] / [`ValidationErrors`]: data-driven results, the
//!   engine's output.
//! - [`Error`] / [`FormError`]: execution failures of tests, gates and custom
//!   validators, which abort the enclosing validation.

mod execution;
mod validation_error;

pub use execution::{BoxError, Error, FormError};
pub use validation_error::{ValidationError, ValidationErrors};
