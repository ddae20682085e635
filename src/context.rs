//! Validation context threaded through every validator.
//!
//! This module provides the [`Context`] type: the root object under validation,
//! the path currently being looked at, and the engine options. Contexts are
//! immutable values; scoping produces a new context and leaves the original
//! untouched, which is what lets sibling validators run concurrently.

use std::sync::Arc;

use serde_json::Value;

use crate::path::FieldPath;

/// Engine options shared by every context derived from the same root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    concurrency: Option<usize>,
}

impl Options {
    /// Creates options with every sibling future polled at once.
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps the number of sibling validators (or array elements) in flight
    /// within a single fan-out. Zero is treated as one.
    pub fn with_concurrency(mut self, limit: usize) -> Self {
        self.concurrency = Some(limit.max(1));
        self
    }

    /// Returns the configured fan-out limit, `None` meaning unbounded.
    pub fn concurrency(&self) -> Option<usize> {
        self.concurrency
    }
}

/// The state a validator runs against.
///
/// Cloning a context is cheap: the object and the options are reference
/// counted, only the path is copied.
///
/// # Example
///
/// ```rust
/// use perfecto::{path, Context};
/// use serde_json::json;
///
/// let root = Context::new(json!({ "user": { "name": "Luke" } }));
/// let user = root.scoped(&path!["user"]);
///
/// assert_eq!(user.value(), Some(&json!({ "name": "Luke" })));
/// assert!(root.path().is_root());
/// ```
#[derive(Debug, Clone)]
pub struct Context {
    object: Arc<Value>,
    path: FieldPath,
    options: Arc<Options>,
}

impl Context {
    /// Creates a root context for `object` with default options.
    pub fn new(object: impl Into<Arc<Value>>) -> Self {
        Self {
            object: object.into(),
            path: FieldPath::root(),
            options: Arc::new(Options::default()),
        }
    }

    /// Creates a context pointing at `path` inside `object`.
    pub fn at(object: impl Into<Arc<Value>>, path: impl Into<FieldPath>) -> Self {
        Self {
            path: path.into(),
            ..Self::new(object)
        }
    }

    /// Replaces the engine options.
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Arc::new(options);
        self
    }

    /// Caps how many sibling futures a single fan-out keeps in flight.
    pub fn with_concurrency(self, limit: usize) -> Self {
        let options = (*self.options).clone().with_concurrency(limit);
        self.with_options(options)
    }

    /// Returns a new context whose path is this path followed by `sub_path`.
    pub fn scoped(&self, sub_path: &FieldPath) -> Self {
        Self {
            object: Arc::clone(&self.object),
            path: self.path.join(sub_path),
            options: Arc::clone(&self.options),
        }
    }

    /// Returns the root object under validation.
    pub fn object(&self) -> &Value {
        &self.object
    }

    /// Returns the absolute path this context points at.
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Returns the engine options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Returns the value at the current path, or `None` when the path does not
    /// resolve.
    pub fn value(&self) -> Option<&Value> {
        self.path.resolve(&self.object)
    }
}

impl From<Value> for Context {
    fn from(object: Value) -> Self {
        Self::new(object)
    }
}
