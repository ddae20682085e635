//! Execution failures raised while running validators.

use crate::form::FormErrors;
use crate::path::FieldPath;

/// Boxed error returned by host supplied tests, gates and validators.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A validator could not finish running.
///
/// Unlike [`ValidationError`](crate::ValidationError), this is not a statement
/// about the data: the whole validation call failed and produced no verdict.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A check's test function failed.
    #[error("test failed at {}: {source}", .path.describe())]
    Test {
        /// Path the check was looking at.
        path: FieldPath,
        #[source]
        source: BoxError,
    },

    /// A predicate's gate failed.
    #[error("gate failed at {}: {source}", .path.describe())]
    Gate {
        /// Path of the context the gate was evaluated against.
        path: FieldPath,
        #[source]
        source: BoxError,
    },

    /// A custom validator failed.
    #[error("validator failed at {}: {source}", .path.describe())]
    Validator {
        /// Path of the context the validator ran against.
        path: FieldPath,
        #[source]
        source: BoxError,
    },
}

impl Error {
    /// Wraps a failure of a custom validator running at `path`.
    pub fn validator(path: FieldPath, source: impl Into<BoxError>) -> Self {
        Error::Validator {
            path,
            source: source.into(),
        }
    }

    /// Returns the path at which the failure happened.
    pub fn path(&self) -> &FieldPath {
        match self {
            Error::Test { path, .. } | Error::Gate { path, .. } | Error::Validator { path, .. } => {
                path
            }
        }
    }
}

/// Outcome of [`validate_form`](crate::validate_form) when the form is not
/// accepted.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// Validation ran to completion and found errors.
    #[error("form is invalid: {} error message(s)", .0.message_count())]
    Invalid(FormErrors),

    /// Validation could not run to completion.
    #[error(transparent)]
    Execution(#[from] Error),
}

impl FormError {
    /// Returns the error tree if the form was rejected for invalid data.
    pub fn errors(&self) -> Option<&FormErrors> {
        match self {
            FormError::Invalid(errors) => Some(errors),
            FormError::Execution(_) => None,
        }
    }
}
