//! Folding validation errors into a nested tree for form UIs.
//!
//! Form libraries expect errors shaped like the data they describe: a mapping
//! of field names to messages, with nested mappings and lists following the
//! data's own structure. [`map_to_form_errors`] builds that tree from a flat
//! error list; [`validate_formik`] and [`validate_form`] run validation and
//! fold in one step.

use indexmap::IndexMap;
use serde_json::Value;

use crate::context::Context;
use crate::error::{Error, FormError, ValidationError};
use crate::path::{FieldPath, Segment};
use crate::validator::{validate, BoxValidator};

/// Indices at or above this bound are folded into mappings rather than lists,
/// so a sparse index never allocates a huge run of empty slots.
pub const MAX_LIST_INDEX: usize = 1024;

/// A tree of error messages shaped like the validated object.
///
/// The root is a mapping, unless an error was recorded at the root path
/// itself; a deeper error then turns it back into a mapping. Messages sit at
/// the leaves; field segments create mappings and index segments create lists.
/// An index of [`MAX_LIST_INDEX`] or more is stored under its decimal key in a
/// mapping instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormErrors {
    /// A list position with no error.
    Empty,
    /// The message recorded at this location.
    Message(String),
    /// Errors keyed by field name, in insertion order.
    Map(IndexMap<String, FormErrors>),
    /// Errors keyed by array index.
    List(Vec<FormErrors>),
}

impl FormErrors {
    /// Creates an empty tree.
    pub fn new() -> Self {
        FormErrors::Map(IndexMap::new())
    }

    /// Writes `message` at `path`, creating intermediate nodes as needed.
    ///
    /// A message already at `path` is replaced. A message sitting where a
    /// container is needed is replaced by that container.
    pub fn insert(&mut self, path: &FieldPath, message: impl Into<String>) {
        let node = match std::mem::replace(self, FormErrors::Empty) {
            FormErrors::Empty | FormErrors::Message(_) if !path.is_root() => FormErrors::new(),
            node => node,
        };
        *self = assoc(node, path.as_slice(), message.into());
    }

    /// Returns the message recorded at exactly `path`.
    pub fn get(&self, path: &FieldPath) -> Option<&str> {
        let node = path.segments().try_fold(self, |node, segment| match (node, segment) {
            (FormErrors::Map(map), segment) => map.get(&segment.to_string()),
            (FormErrors::List(items), Segment::Index(idx)) => items.get(*idx),
            _ => None,
        })?;
        match node {
            FormErrors::Message(message) => Some(message),
            _ => None,
        }
    }

    /// Returns the number of messages in the tree.
    pub fn message_count(&self) -> usize {
        match self {
            FormErrors::Empty => 0,
            FormErrors::Message(_) => 1,
            FormErrors::Map(map) => map.values().map(FormErrors::message_count).sum(),
            FormErrors::List(items) => items.iter().map(FormErrors::message_count).sum(),
        }
    }

    /// Returns true if the tree holds no message.
    pub fn is_empty(&self) -> bool {
        self.message_count() == 0
    }

    /// Renders the tree as JSON; list gaps become `null`.
    pub fn to_value(&self) -> Value {
        match self {
            FormErrors::Empty => Value::Null,
            FormErrors::Message(message) => Value::String(message.clone()),
            FormErrors::Map(map) => Value::Object(
                map.iter()
                    .map(|(key, node)| (key.clone(), node.to_value()))
                    .collect(),
            ),
            FormErrors::List(items) => Value::Array(items.iter().map(FormErrors::to_value).collect()),
        }
    }
}

impl Default for FormErrors {
    fn default() -> Self {
        Self::new()
    }
}

impl From<FormErrors> for Value {
    fn from(errors: FormErrors) -> Self {
        errors.to_value()
    }
}

impl<'a> FromIterator<&'a ValidationError> for FormErrors {
    fn from_iter<I: IntoIterator<Item = &'a ValidationError>>(iter: I) -> Self {
        iter.into_iter().fold(FormErrors::new(), |mut tree, error| {
            tree.insert(&error.path, error.message.clone());
            tree
        })
    }
}

fn assoc(node: FormErrors, path: &[Segment], message: String) -> FormErrors {
    let Some((head, rest)) = path.split_first() else {
        return FormErrors::Message(message);
    };

    match (node, head) {
        (FormErrors::List(mut items), Segment::Index(idx)) if *idx < MAX_LIST_INDEX => {
            if items.len() <= *idx {
                items.resize(idx + 1, FormErrors::Empty);
            }
            let child = std::mem::replace(&mut items[*idx], FormErrors::Empty);
            items[*idx] = assoc(child, rest, message);
            FormErrors::List(items)
        }
        (FormErrors::List(items), segment) => {
            // a named field or an index past the cap turns the list into a
            // mapping keyed by position
            let map = items
                .into_iter()
                .enumerate()
                .filter(|(_, node)| *node != FormErrors::Empty)
                .map(|(idx, node)| (idx.to_string(), node))
                .collect();
            assoc_key(map, segment.to_string(), rest, message)
        }
        (FormErrors::Map(map), segment) => assoc_key(map, segment.to_string(), rest, message),
        (FormErrors::Empty | FormErrors::Message(_), Segment::Index(idx))
            if *idx < MAX_LIST_INDEX =>
        {
            assoc(FormErrors::List(Vec::new()), path, message)
        }
        (FormErrors::Empty | FormErrors::Message(_), _) => {
            assoc(FormErrors::Map(IndexMap::new()), path, message)
        }
    }
}

fn assoc_key(
    mut map: IndexMap<String, FormErrors>,
    key: String,
    rest: &[Segment],
    message: String,
) -> FormErrors {
    let child = map
        .get_mut(&key)
        .map(|node| std::mem::replace(node, FormErrors::Empty))
        .unwrap_or(FormErrors::Empty);
    map.insert(key, assoc(child, rest, message));
    FormErrors::Map(map)
}

/// Folds a flat error list into a [`FormErrors`] tree.
///
/// When two errors share a path the later one wins.
///
/// # Example
///
/// ```rust
/// use perfecto::{map_to_form_errors, path, ValidationError};
/// use serde_json::json;
///
/// let errors = vec![ValidationError::new(path!["foo", 0, "foo2"], "bar")];
///
/// assert_eq!(map_to_form_errors(&errors).to_value(), json!({ "foo": [{ "foo2": "bar" }] }));
/// ```
pub fn map_to_form_errors<'a, I>(errors: I) -> FormErrors
where
    I: IntoIterator<Item = &'a ValidationError>,
{
    errors.into_iter().collect()
}

/// Validates and folds the errors into a tree, succeeding whatever the data.
///
/// A valid object yields an empty tree. Only execution failures are `Err`.
pub async fn validate_formik(
    validators: &[BoxValidator],
    context: &Context,
) -> Result<FormErrors, Error> {
    let errors = validate(validators, context).await?;
    Ok(map_to_form_errors(&errors))
}

/// Validates `object` and rejects it when any validation error is found.
///
/// A valid object resolves to an empty tree; an invalid one fails with
/// [`FormError::Invalid`] carrying the folded errors, so form code has a
/// single failure channel.
///
/// # Example
///
/// ```rust
/// use perfecto::{path, rules, validate_form, validators, FormError};
/// use serde_json::json;
///
/// let form = validators![rules::present("is required", path!["name"])];
///
/// # futures::executor::block_on(async {
/// let rejected = validate_form(&form, json!({})).await.unwrap_err();
/// assert_eq!(rejected.errors().unwrap().to_value(), json!({ "name": "is required" }));
///
/// let accepted = validate_form(&form, json!({ "name": "Luke" })).await.unwrap();
/// assert!(accepted.is_empty());
/// # });
/// ```
pub async fn validate_form(
    validators: &[BoxValidator],
    object: impl Into<Context>,
) -> Result<FormErrors, FormError> {
    let context = object.into();
    let tree = validate_formik(validators, &context).await?;
    if tree.is_empty() {
        Ok(tree)
    } else {
        tracing::debug!(messages = tree.message_count(), "form rejected");
        Err(FormError::Invalid(tree))
    }
}
