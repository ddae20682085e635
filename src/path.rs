//! Paths locating values inside the object under validation.
//!
//! A [`FieldPath`] is the sequence of property and index accessors leading from
//! the root object to the value a validator is looking at. Paths are values:
//! every extension returns a new path, so sibling validators can scope
//! themselves independently while sharing a parent.

use std::fmt::{self, Display};

use serde_json::Value;

/// A single accessor in a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// A property access on a mapping (e.g., `user`, `email`)
    Field(String),
    /// A position in a sequence (e.g., `[0]`)
    Index(usize),
}

impl Segment {
    /// Creates a new field segment.
    pub fn field(name: impl Into<String>) -> Self {
        Segment::Field(name.into())
    }

    /// Creates a new index segment.
    pub fn index(idx: usize) -> Self {
        Segment::Index(idx)
    }

    /// Returns the value this segment addresses inside `value`, if any.
    ///
    /// An index applied to anything but an array, or a field applied to
    /// anything but an object, addresses nothing.
    pub fn resolve<'v>(&self, value: &'v Value) -> Option<&'v Value> {
        match (self, value) {
            (Segment::Field(name), Value::Object(map)) => map.get(name),
            (Segment::Index(idx), Value::Array(items)) => items.get(*idx),
            _ => None,
        }
    }
}

impl From<&str> for Segment {
    fn from(name: &str) -> Self {
        Segment::Field(name.to_string())
    }
}

impl From<String> for Segment {
    fn from(name: String) -> Self {
        Segment::Field(name)
    }
}

impl From<usize> for Segment {
    fn from(idx: usize) -> Self {
        Segment::Index(idx)
    }
}

impl Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Field(name) => write!(f, "{}", name),
            Segment::Index(idx) => write!(f, "{}", idx),
        }
    }
}

/// A path from the root object to a nested value.
///
/// # Example
///
/// ```rust
/// use perfecto::{path, FieldPath};
///
/// let base = FieldPath::root().push_field("users");
/// let first = base.push_index(0).push_field("email");
///
/// assert_eq!(first.to_string(), "users[0].email");
/// assert_eq!(first, path!["users", 0, "email"]);
/// assert_eq!(base.to_string(), "users");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

impl FieldPath {
    /// Creates an empty path addressing the root object.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a path from a sequence of segments.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Segment>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns a new path with a field segment appended.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        self.push(Segment::field(name))
    }

    /// Returns a new path with an index segment appended.
    pub fn push_index(&self, index: usize) -> Self {
        self.push(Segment::index(index))
    }

    /// Returns a new path with `segment` appended.
    pub fn push(&self, segment: Segment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(segment);
        Self { segments }
    }

    /// Returns a new path made of this path followed by every segment of `tail`.
    ///
    /// Neither input is modified.
    pub fn join(&self, tail: &FieldPath) -> Self {
        if tail.is_root() {
            return self.clone();
        }
        let mut segments = Vec::with_capacity(self.segments.len() + tail.segments.len());
        segments.extend_from_slice(&self.segments);
        segments.extend_from_slice(&tail.segments);
        Self { segments }
    }

    /// Looks up the value this path addresses inside `root`.
    ///
    /// Never fails: any segment that does not resolve makes the whole lookup
    /// absent.
    pub fn resolve<'v>(&self, root: &'v Value) -> Option<&'v Value> {
        self.segments
            .iter()
            .try_fold(root, |value, segment| segment.resolve(value))
    }

    /// Returns true if this is the root path (no segments).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments in this path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    /// Returns the segments as a slice.
    pub fn as_slice(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the parent path, or None if this is root.
    pub fn parent(&self) -> Option<Self> {
        let (_, init) = self.segments.split_last()?;
        Some(Self {
            segments: init.to_vec(),
        })
    }

    /// Returns the last segment, or None if this is root.
    pub fn last(&self) -> Option<&Segment> {
        self.segments.last()
    }

    /// Renders the path for diagnostics, spelling out the root.
    pub fn describe(&self) -> String {
        if self.is_root() {
            "(root)".to_string()
        } else {
            self.to_string()
        }
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Field(name) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", name)?;
                }
                Segment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

impl From<Segment> for FieldPath {
    fn from(segment: Segment) -> Self {
        Self {
            segments: vec![segment],
        }
    }
}

impl From<Vec<Segment>> for FieldPath {
    fn from(segments: Vec<Segment>) -> Self {
        Self { segments }
    }
}

impl<S: Into<Segment>, const N: usize> From<[S; N]> for FieldPath {
    fn from(segments: [S; N]) -> Self {
        Self::new(segments)
    }
}

impl FromIterator<Segment> for FieldPath {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

/// Builds a [`FieldPath`] from a mix of field names and indices.
///
/// ```rust
/// use perfecto::{path, FieldPath};
///
/// assert_eq!(path![].to_string(), "");
/// assert_eq!(path!["foo", 0, "bar"].to_string(), "foo[0].bar");
/// ```
#[macro_export]
macro_rules! path {
    () => {
        $crate::FieldPath::root()
    };
    ($($segment:expr),+ $(,)?) => {
        $crate::FieldPath::from(::std::vec![$($crate::Segment::from($segment)),+])
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_root_path_is_empty() {
        let path = FieldPath::root();
        assert!(path.is_root());
        assert!(path.is_empty());
        assert_eq!(path.len(), 0);
        assert_eq!(path.to_string(), "");
        assert_eq!(path.describe(), "(root)");
    }

    #[test]
    fn test_complex_path_display() {
        let path = FieldPath::root()
            .push_field("users")
            .push_index(0)
            .push_field("email");
        assert_eq!(path.to_string(), "users[0].email");
        assert_eq!(FieldPath::root().push_index(3).to_string(), "[3]");
    }

    #[test]
    fn test_path_immutability() {
        let base = FieldPath::root().push_field("users");
        let path_a = base.push_index(0);
        let path_b = base.push_index(1);

        assert_eq!(base.to_string(), "users");
        assert_eq!(path_a.to_string(), "users[0]");
        assert_eq!(path_b.to_string(), "users[1]");
    }

    #[test]
    fn test_join_keeps_both_sides() {
        let head = path!["foo"];
        let tail = path![0, "bar"];
        let joined = head.join(&tail);

        assert_eq!(joined, path!["foo", 0, "bar"]);
        assert_eq!(head, path!["foo"]);
        assert_eq!(tail.len(), 2);
        assert_eq!(head.join(&FieldPath::root()), head);
        assert_eq!(FieldPath::root().join(&tail), tail);
    }

    #[test]
    fn test_macro_matches_builders() {
        assert_eq!(
            path!["a", 1, "b"],
            FieldPath::root().push_field("a").push_index(1).push_field("b")
        );
        assert_eq!(path![], FieldPath::root());
        assert_eq!(FieldPath::from(["x", "y"]), path!["x", "y"]);
        assert_eq!(
            FieldPath::from(vec![Segment::field("a"), Segment::index(1)]),
            path!["a", 1]
        );
    }

    #[test]
    fn test_parent_and_last() {
        let path = path!["users", 0, "email"];

        let parent = path.parent().unwrap();
        assert_eq!(parent.to_string(), "users[0]");
        assert_eq!(parent.last(), Some(&Segment::Index(0)));

        let root = parent.parent().unwrap().parent().unwrap();
        assert!(root.is_root());
        assert!(root.parent().is_none());
        assert_eq!(root.last(), None);
    }

    #[test]
    fn test_resolve_nested_values() {
        let object = json!({ "a": [{ "b": 1 }], "c": null });

        assert_eq!(path!["a", 0, "b"].resolve(&object), Some(&json!(1)));
        assert_eq!(path!["c"].resolve(&object), Some(&Value::Null));
        assert_eq!(FieldPath::root().resolve(&object), Some(&object));
    }

    #[test]
    fn test_resolve_never_fails() {
        let object = json!({ "a": [1, 2], "s": "text" });

        assert_eq!(path!["missing"].resolve(&object), None);
        assert_eq!(path!["a", 5].resolve(&object), None);
        assert_eq!(path!["a", "length"].resolve(&object), None);
        assert_eq!(path!["s", 0].resolve(&object), None);
        assert_eq!(path!["missing", "deeper", 0].resolve(&object), None);
        assert_eq!(path![0].resolve(&Value::Null), None);
    }
}
