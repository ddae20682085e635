//! Validation error types.
//!
//! This module provides [`ValidationError`] for a single failed check and
//! [`ValidationErrors`] for a non-empty accumulation of them.

use std::fmt::{self, Display};

use stillwater::prelude::*;

use crate::path::FieldPath;

/// A single failed check: where it failed and the message it was declared with.
///
/// The message is opaque to the engine; it is whatever the validator
/// definition supplied.
///
/// # Example
///
/// ```rust
/// use perfecto::{path, ValidationError};
///
/// let error = ValidationError::new(path!["email"], "is required");
///
/// assert_eq!(error.to_string(), "email: is required");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidationError {
    /// Absolute path from the root object to the offending value.
    pub path: FieldPath,
    /// Message supplied by the failing validator.
    pub message: String,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(path: impl Into<FieldPath>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.describe(), self.message)
    }
}

impl std::error::Error for ValidationError {}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ValidationError>();
    assert_sync::<ValidationError>();
};

/// A non-empty collection of validation errors.
///
/// `ValidationErrors` wraps stillwater's `NonEmptyVec`, so a failed
/// [`ValidationResult`](crate::ValidationResult) always carries at least one
/// error. Collections from independent validations combine through
/// `Semigroup`:
///
/// ```rust
/// use perfecto::{path, ValidationError, ValidationErrors};
/// use stillwater::prelude::*;
///
/// let name = ValidationErrors::single(ValidationError::new(path!["name"], "required"));
/// let email = ValidationErrors::single(ValidationError::new(path!["email"], "invalid"));
///
/// assert_eq!(name.combine(email).len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors(NonEmptyVec<ValidationError>);

impl ValidationErrors {
    /// Creates a collection holding a single error.
    pub fn single(error: ValidationError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Collects errors in order, returning `None` when there are none.
    pub fn from_errors(errors: impl IntoIterator<Item = ValidationError>) -> Option<Self> {
        let mut errors = errors.into_iter();
        let first = errors.next()?;
        Some(errors.fold(Self::single(first), |acc, error| {
            acc.combine(Self::single(error))
        }))
    }

    /// Returns the number of errors in this collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false: the collection is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the contained errors.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// Returns all errors recorded at exactly `path`.
    pub fn at_path(&self, path: &FieldPath) -> Vec<&ValidationError> {
        self.0.iter().filter(|e| &e.path == path).collect()
    }

    /// Returns the first error in the collection.
    pub fn first(&self) -> &ValidationError {
        self.0.head()
    }

    /// Converts this collection into a `Vec<ValidationError>`.
    pub fn into_vec(self) -> Vec<ValidationError> {
        self.0.into_vec()
    }
}

impl Semigroup for ValidationErrors {
    fn combine(self, other: Self) -> Self {
        ValidationErrors(self.0.combine(other.0))
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} error(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = Box<dyn Iterator<Item = &'a ValidationError> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.0.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path;

    #[test]
    fn test_error_display() {
        let error = ValidationError::new(path!["pets", 0, "name"], "is required");
        assert_eq!(error.to_string(), "pets[0].name: is required");
    }

    #[test]
    fn test_error_display_root() {
        let error = ValidationError::new(FieldPath::root(), "Jedi he is not");
        assert_eq!(error.to_string(), "(root): Jedi he is not");
    }

    #[test]
    fn test_from_errors_keeps_order() {
        let errors = ValidationErrors::from_errors(vec![
            ValidationError::new(path![0], "first"),
            ValidationError::new(path![1], "second"),
            ValidationError::new(path![2], "third"),
        ])
        .unwrap();

        let messages: Vec<_> = errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second", "third"]);
        assert_eq!(errors.first().message, "first");
    }

    #[test]
    fn test_from_errors_empty_is_none() {
        assert!(ValidationErrors::from_errors(Vec::new()).is_none());
    }

    #[test]
    fn test_at_path() {
        let errors = ValidationErrors::from_errors(vec![
            ValidationError::new(path!["a"], "one"),
            ValidationError::new(path!["b"], "two"),
            ValidationError::new(path!["a"], "three"),
        ])
        .unwrap();

        assert_eq!(errors.at_path(&path!["a"]).len(), 2);
        assert_eq!(errors.at_path(&path!["b"]).len(), 1);
        assert!(errors.at_path(&path!["c"]).is_empty());
    }

    #[test]
    fn test_display_lists_every_error() {
        let errors = ValidationErrors::single(ValidationError::new(path!["name"], "required"))
            .combine(ValidationErrors::single(ValidationError::new(
                path!["email"],
                "invalid",
            )));
        let display = errors.to_string();

        assert!(display.contains("2 error(s)"));
        assert!(display.contains("1. name: required"));
        assert!(display.contains("2. email: invalid"));
    }

    #[test]
    fn test_semigroup_associativity() {
        let e1 = ValidationErrors::single(ValidationError::new(FieldPath::root(), "1"));
        let e2 = ValidationErrors::single(ValidationError::new(FieldPath::root(), "2"));
        let e3 = ValidationErrors::single(ValidationError::new(FieldPath::root(), "3"));

        let left = e1.clone().combine(e2.clone()).combine(e3.clone());
        let right = e1.combine(e2.combine(e3));

        assert_eq!(left, right);
    }
}
