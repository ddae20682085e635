//! # Perfecto
//!
//! Asynchronous, composable validation of arbitrary nested data that gathers
//! every error together with the path where it occurred.
//!
//! ## Overview
//!
//! Validators are ordinary values assembled into a tree: single-field checks,
//! subtrees scoped to a nested object, element-wise array validation and
//! conditional groups. Running the tree against a [`Context`] fans out
//! concurrently and fans back in as one flat, ordered list of
//! [`ValidationError`]s. [`map_to_form_errors`] folds that list into a nested
//! tree shaped like the data, the form most form UIs expect.
//!
//! Validation errors are data. Failures of the validators themselves (a
//! lookup that errors, a gate that cannot decide) are [`Error`]s and abort the
//! call instead.
//!
//! ## Core Types
//!
//! - [`FieldPath`]: where a value lives inside the object (e.g., `users[0].email`)
//! - [`Context`]: the object under validation plus the current path
//! - [`Validator`]: anything that turns a context into validation errors
//! - [`ValidationError`]: a failed check with its path and message
//! - [`FormErrors`]: errors folded into a tree for presentation
//!
//! ## Example
//!
//! ```rust
//! use perfecto::{array, check, nest, path, rules, validate, validators, Context, ValidationError};
//! use serde_json::{json, Value};
//!
//! fn is_jedi(person: Option<&Value>) -> bool {
//!     person.and_then(|p| p.get("isJedi")).and_then(Value::as_bool) == Some(true)
//! }
//!
//! let council = validators![
//!     rules::present("is required", path!["name"]),
//!     nest(path!["members"], validators![array(validators![check(is_jedi, "Jedi he is not")])]),
//! ];
//!
//! let context = Context::new(json!({
//!     "name": "High Council",
//!     "members": [{ "name": "Yoda", "isJedi": true }, { "name": "Jabba" }]
//! }));
//!
//! # futures::executor::block_on(async {
//! let errors = validate(&council, &context).await.unwrap();
//! assert_eq!(errors, vec![ValidationError::new(path!["members", 1], "Jedi he is not")]);
//! # });
//! ```

pub mod context;
pub mod error;
pub mod form;
pub mod path;
pub mod rules;
pub mod validator;

pub use context::{Context, Options};
pub use error::{BoxError, Error, FormError, ValidationError, ValidationErrors};
pub use form::{map_to_form_errors, validate_form, validate_formik, FormErrors, MAX_LIST_INDEX};
pub use path::{FieldPath, Segment};
pub use validator::{
    array, async_gate, async_test, check, nest, path, predicate, test_fn, validate, validate_all,
    validator_fn, Array, BoxValidator, Check, Gate, Nest, Predicate, Test, Validator,
    ValidatorExt, Validators,
};

/// Type alias for accumulated validation outcomes.
pub type ValidationResult<T> = stillwater::Validation<T, ValidationErrors>;
