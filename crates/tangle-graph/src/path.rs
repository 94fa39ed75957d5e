//! Node paths addressing values within an object graph
//!
//! Provides [`NodePath`] for hierarchical addressing of nodes during
//! traversal and inside serialized back-references.

use std::fmt::{self, Display, Formatter};

/// Key under which a structure is wrapped before either transform direction
/// runs; serialized reference paths always start with it.
pub const ROOT_KEY: &str = "#";

/// Path within an object graph
///
/// Ordered sequence of string keys from the synthetic document root.
/// Sequence elements are addressed by their decimal index. The empty path
/// denotes the root wrapper itself.
///
/// # Examples
/// - `["#", "orders", "0"]` → `#/orders/0`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NodePath(Vec<String>);

impl NodePath {
    /// Create new path from segments
    #[inline]
    #[must_use]
    pub fn new(segments: Vec<String>) -> Self {
        Self(segments)
    }

    /// Empty path (root wrapper)
    #[inline]
    #[must_use]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Get path segments
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Get number of segments
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if path is empty (root wrapper)
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get parent path (if not root)
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.0.is_empty() {
            None
        } else {
            Some(Self(self.0[..self.0.len() - 1].to_vec()))
        }
    }

    /// Get last segment (if not root)
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Append a segment, returning new path
    #[inline]
    #[must_use]
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.0.push(segment.into());
        next
    }

    /// Iterator over segments from root to leaf
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Display for NodePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

impl From<&str> for NodePath {
    /// Parse a `/`-joined path; the empty string is the root.
    ///
    /// Segments are arbitrary JSON keys, so no charset is enforced — which
    /// also means a data key containing `/` cannot round-trip through the
    /// text form.
    fn from(text: &str) -> Self {
        if text.is_empty() {
            return Self::root();
        }
        Self(text.split('/').map(str::to_owned).collect())
    }
}

impl From<Vec<String>> for NodePath {
    fn from(segments: Vec<String>) -> Self {
        Self(segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_new_and_segments() {
        let path = NodePath::new(vec!["#".to_string(), "a".to_string()]);
        assert_eq!(path.segments(), &["#", "a"]);
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn path_root() {
        let path = NodePath::root();
        assert!(path.is_empty());
        assert_eq!(path.len(), 0);
        assert!(path.parent().is_none());
        assert!(path.last().is_none());
    }

    #[test]
    fn path_parent() {
        let path = NodePath::from("#/a/b");
        let parent = path.parent().unwrap();
        assert_eq!(parent.segments(), &["#", "a"]);
    }

    #[test]
    fn path_last() {
        let path = NodePath::from("#/orders/0");
        assert_eq!(path.last(), Some("0"));
    }

    #[test]
    fn path_child() {
        let parent = NodePath::from("#");
        let child = parent.child("orders").child("0");
        assert_eq!(child.segments(), &["#", "orders", "0"]);
    }

    #[test]
    fn path_display_round_trip() {
        let path = NodePath::from("#/a/0/b");
        assert_eq!(path.to_string(), "#/a/0/b");
    }

    #[test]
    fn path_from_empty_text_is_root() {
        assert_eq!(NodePath::from(""), NodePath::root());
        assert_eq!(NodePath::root().to_string(), "");
    }

    #[test]
    fn path_iter() {
        let path = NodePath::from("#/x");
        let collected: Vec<_> = path.iter().collect();
        assert_eq!(collected, vec!["#", "x"]);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn display_parse_round_trip(
                segments in prop::collection::vec("[a-z0-9]{1,6}", 0..5)
            ) {
                let path = NodePath::new(segments);
                let reparsed = NodePath::from(path.to_string().as_str());
                prop_assert_eq!(reparsed, path);
            }
        }
    }
}
