//! Type registry mapping serialized tags to classes

use indexmap::IndexMap;
use std::sync::Arc;
use tangle_graph::ClassDef;

/// Registry of classes participating in typed serialization
///
/// Populated at composition time with one explicit [`register`] call per
/// type, then typically frozen behind an `Arc` and read by any number of
/// calls. All registration must complete before the first call that depends
/// on it — freezing the registry makes that ordering structural.
///
/// The class-side lookup is identity-based: a class carries a tag only when
/// that exact `ClassDef` allocation was registered. Registering one class
/// never confers a tag on another, however similar.
///
/// [`register`]: TypeRegistry::register
#[derive(Debug, Default, Clone)]
pub struct TypeRegistry {
    classes: IndexMap<String, Arc<ClassDef>>,
}

impl TypeRegistry {
    /// Create new empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            classes: IndexMap::new(),
        }
    }

    /// Register a class under a tag
    ///
    /// Re-registering a tag replaces the previous class.
    pub fn register(&mut self, tag: impl Into<String>, class: Arc<ClassDef>) {
        self.classes.insert(tag.into(), class);
    }

    /// Class registered under `tag`, if any
    #[inline]
    #[must_use]
    pub fn get(&self, tag: &str) -> Option<Arc<ClassDef>> {
        self.classes.get(tag).cloned()
    }

    /// Tag the exact class allocation was registered under, if any
    #[must_use]
    pub fn tag_of(&self, class: &Arc<ClassDef>) -> Option<&str> {
        self.classes
            .iter()
            .find(|(_, registered)| Arc::ptr_eq(registered, class))
            .map(|(tag, _)| tag.as_str())
    }

    /// Check if a tag is registered
    #[inline]
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.classes.contains_key(tag)
    }

    /// Number of registered classes
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// All registered tags, in registration order
    #[must_use]
    pub fn tags(&self) -> Vec<&str> {
        self.classes.keys().map(String::as_str).collect()
    }
}
