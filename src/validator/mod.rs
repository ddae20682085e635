//! The validator composition model.
//!
//! Validators are values built from a handful of combinators:
//!
//! - [`check`] / [`path`]: a single test, at the current or a nested path
//! - [`validate`]: run a list of validators side by side
//! - [`nest`]: scope a list of validators to a sub-path
//! - [`array`]: apply a list of validators to every array element
//! - [`predicate`]: run a list of validators only when a gate allows it
//!
//! Every combinator returns a type implementing [`Validator`], so trees of any
//! depth are assembled from ordinary values and run with a single call.
//!
//! # Example
//!
//! ```rust
//! use perfecto::{array, nest, path, rules, validate, validators, Context, ValidationError};
//! use serde_json::json;
//!
//! let order = validators![
//!     rules::present("is required", path!["customer"]),
//!     nest(path!["lines"], validators![array(validators![
//!         rules::present("is required", path!["sku"]),
//!     ])]),
//! ];
//!
//! let context = Context::new(json!({
//!     "customer": "Leia",
//!     "lines": [{ "sku": "X-1" }, { "qty": 2 }]
//! }));
//!
//! # futures::executor::block_on(async {
//! let errors = validate(&order, &context).await.unwrap();
//! assert_eq!(errors, vec![ValidationError::new(path!["lines", 1, "sku"], "is required")]);
//! # });
//! ```

mod check;
mod compose;
pub mod func;
mod predicate;
mod traits;

pub use check::{check, path, Check};
pub use compose::{array, nest, validate, validate_all, Array, Nest};
pub use func::{async_gate, async_test, test_fn, validator_fn};
pub use predicate::{predicate, Predicate};
pub use traits::{BoxValidator, Gate, Test, Validator, ValidatorExt, Validators};

/// Builds a [`Validators`] list, boxing each element.
///
/// ```rust
/// use perfecto::{check, validators, Validators};
/// use serde_json::Value;
///
/// let none: Validators = validators![];
/// let some = validators![
///     check(|v: Option<&Value>| v.is_some(), "missing"),
///     perfecto::array(validators![]),
/// ];
///
/// assert!(none.is_empty());
/// assert_eq!(some.len(), 2);
/// ```
#[macro_export]
macro_rules! validators {
    () => {
        ::std::vec::Vec::<$crate::BoxValidator>::new()
    };
    ($($validator:expr),+ $(,)?) => {
        ::std::vec![$($crate::ValidatorExt::boxed($validator)),+]
    };
}
