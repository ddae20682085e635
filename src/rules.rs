//! Ready-made tests for common field rules.
//!
//! Every rule here implements [`Test`] and can be handed to
//! [`check`](crate::check) or [`path`](crate::path). Apart from [`NotPresent`],
//! rules fail on an absent value, so "required" is always expressed
//! explicitly with [`Present`].
//!
//! # Example
//!
//! ```rust
//! use perfecto::{path, rules, validate, validators, Context};
//! use serde_json::json;
//!
//! let signup = validators![
//!     rules::present("is required", path!["login"]),
//!     perfecto::path(rules::MinLen::new(8), "is too short", path!["password"]),
//!     perfecto::path(rules::Pattern::new(r"^\S+@\S+$").unwrap(), "is not an email", path!["email"]),
//! ];
//!
//! let context = Context::new(json!({ "login": "ben", "password": "hunter2", "email": "ben@" }));
//!
//! # futures::executor::block_on(async {
//! let errors = validate(&signup, &context).await.unwrap();
//! let messages: Vec<_> = errors.iter().map(|e| e.message.as_str()).collect();
//! assert_eq!(messages, vec!["is too short", "is not an email"]);
//! # });
//! ```

use async_trait::async_trait;
use regex::Regex;
use serde_json::Value;

use crate::context::Context;
use crate::error::BoxError;
use crate::path::FieldPath;
use crate::validator::{path, Check, Test};

/// Passes when a value exists and is neither null nor an empty string,
/// array or object.
#[derive(Debug, Clone, Copy, Default)]
pub struct Present;

impl Present {
    /// Returns true if `value` counts as present.
    pub fn holds(value: Option<&Value>) -> bool {
        match value {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(items)) => !items.is_empty(),
            Some(Value::Object(map)) => !map.is_empty(),
            Some(_) => true,
        }
    }
}

/// Passes when a value is absent, null, or empty. The inverse of [`Present`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NotPresent;

/// Passes when a value is truthy: not absent, null, `false`, zero, NaN or an
/// empty string. Arrays and objects are always truthy.
#[derive(Debug, Clone, Copy, Default)]
pub struct Truthy;

impl Truthy {
    /// Returns true if `value` is truthy.
    pub fn holds(value: Option<&Value>) -> bool {
        match value {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(_)) | Some(Value::Object(_)) => true,
        }
    }
}

/// Passes when a value is a string matching a regular expression.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    /// Compiles `pattern`.
    ///
    /// # Errors
    ///
    /// Returns the regex error if `pattern` is not a valid expression.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }

    /// Returns the source of the expression.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl From<Regex> for Pattern {
    fn from(regex: Regex) -> Self {
        Self { regex }
    }
}

/// Passes when a string has at least `min` characters, or an array at least
/// `min` items.
#[derive(Debug, Clone, Copy)]
pub struct MinLen {
    min: usize,
}

impl MinLen {
    /// Requires a length of at least `min`.
    pub fn new(min: usize) -> Self {
        Self { min }
    }
}

/// Passes when a string has at most `max` characters, or an array at most
/// `max` items.
#[derive(Debug, Clone, Copy)]
pub struct MaxLen {
    max: usize,
}

impl MaxLen {
    /// Allows a length of at most `max`.
    pub fn new(max: usize) -> Self {
        Self { max }
    }
}

/// Passes when a value is a number within inclusive bounds.
#[derive(Debug, Clone, Copy)]
pub struct Range {
    min: Option<f64>,
    max: Option<f64>,
}

impl Range {
    /// Requires `min <= value <= max`.
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Requires `value >= min`.
    pub fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    /// Requires `value <= max`.
    pub fn at_most(max: f64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    fn contains(&self, n: f64) -> bool {
        self.min.map_or(true, |min| n >= min) && self.max.map_or(true, |max| n <= max)
    }
}

fn length(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

/// Implements [`Test`] for a rule from a synchronous `holds` expression.
macro_rules! sync_rule {
    ($rule:ty, |$this:ident, $value:ident| $body:expr) => {
        #[async_trait]
        impl Test for $rule {
            async fn test(
                &self,
                $value: Option<&Value>,
                _context: &Context,
                _message: &str,
            ) -> Result<bool, BoxError> {
                let $this = self;
                Ok($body)
            }
        }
    };
}

sync_rule!(Present, |_this, value| Present::holds(value));
sync_rule!(NotPresent, |_this, value| !Present::holds(value));
sync_rule!(Truthy, |_this, value| Truthy::holds(value));
sync_rule!(Pattern, |this, value| value
    .and_then(Value::as_str)
    .is_some_and(|s| this.regex.is_match(s)));
sync_rule!(MinLen, |this, value| value
    .and_then(length)
    .is_some_and(|len| len >= this.min));
sync_rule!(MaxLen, |this, value| value
    .and_then(length)
    .is_some_and(|len| len <= this.max));
sync_rule!(Range, |this, value| value
    .and_then(Value::as_f64)
    .is_some_and(|n| this.contains(n)));

/// Requires the value at `sub_path` to be [`Present`].
pub fn present(message: impl Into<String>, sub_path: impl Into<FieldPath>) -> Check<Present> {
    path(Present, message, sub_path)
}

/// Requires the value at `sub_path` to be [`NotPresent`].
pub fn not_present(
    message: impl Into<String>,
    sub_path: impl Into<FieldPath>,
) -> Check<NotPresent> {
    path(NotPresent, message, sub_path)
}
