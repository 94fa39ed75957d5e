//! Dynamic graph values
//!
//! [`GraphValue`] is the caller-facing value model: JSON-compatible leaves
//! plus dates, with composite variants held behind shared handles so that
//! one node can be reached from many paths (aliasing) or from itself
//! (cycles). Cloning a `GraphValue` clones the handle, not the tree.

use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;
use serde_json::{Number, Value};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

/// Identity-bearing class descriptor for typed records
///
/// Two `ClassDef`s are the same class only when they are the same
/// allocation; the name is cosmetic. A registry entry refers to one specific
/// `Arc<ClassDef>`, so registering one class never confers a tag on another,
/// however similarly named.
#[derive(Debug)]
pub struct ClassDef {
    name: String,
}

impl ClassDef {
    /// Create a new class descriptor
    #[must_use]
    pub fn new(name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self { name: name.into() })
    }

    /// Class name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Typed record: a class handle plus insertion-ordered fields
#[derive(Debug, Clone)]
pub struct Instance {
    /// Class this record belongs to; compared by identity, never by name
    pub class: Arc<ClassDef>,
    /// Own fields in insertion order
    pub fields: IndexMap<String, GraphValue>,
}

impl Instance {
    /// Create a field-less instance of `class`
    #[inline]
    #[must_use]
    pub fn new(class: Arc<ClassDef>) -> Self {
        Self {
            class,
            fields: IndexMap::new(),
        }
    }
}

impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.class, &other.class) && self.fields == other.fields
    }
}

impl From<Instance> for GraphValue {
    fn from(instance: Instance) -> Self {
        Self::Instance(Rc::new(RefCell::new(instance)))
    }
}

/// A node in an object graph
///
/// Leaves are value-like; `Seq`, `Map` and `Instance` are shared handles
/// with interior mutability. Structural equality (`PartialEq`) is deep and
/// defined for acyclic graphs only; identity is [`GraphValue::ptr_eq`].
#[derive(Debug, Clone, PartialEq)]
pub enum GraphValue {
    /// Absent value
    Null,
    /// Boolean
    Bool(bool),
    /// JSON number
    Number(Number),
    /// Text
    String(String),
    /// Calendar instant with offset
    Date(DateTime<FixedOffset>),
    /// Ordered sequence, addressed by decimal index
    Seq(Rc<RefCell<Vec<GraphValue>>>),
    /// Record with insertion-ordered string keys
    Map(Rc<RefCell<IndexMap<String, GraphValue>>>),
    /// Typed record (see [`Instance`])
    Instance(Rc<RefCell<Instance>>),
}

impl GraphValue {
    /// New empty map
    #[must_use]
    pub fn map() -> Self {
        Self::Map(Rc::new(RefCell::new(IndexMap::new())))
    }

    /// New map from entries, preserving order
    #[must_use]
    pub fn map_of<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<GraphValue>,
    {
        Self::Map(Rc::new(RefCell::new(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )))
    }

    /// New empty sequence
    #[must_use]
    pub fn seq() -> Self {
        Self::Seq(Rc::new(RefCell::new(Vec::new())))
    }

    /// New sequence from items
    #[must_use]
    pub fn seq_of<V: Into<GraphValue>>(items: impl IntoIterator<Item = V>) -> Self {
        Self::Seq(Rc::new(RefCell::new(
            items.into_iter().map(Into::into).collect(),
        )))
    }

    /// New field-less instance of `class`
    #[must_use]
    pub fn instance(class: Arc<ClassDef>) -> Self {
        Instance::new(class).into()
    }

    /// Referential identity: same composite allocation
    ///
    /// Leaves are value-like and never identical.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Seq(a), Self::Seq(b)) => Rc::ptr_eq(a, b),
            (Self::Map(a), Self::Map(b)) => Rc::ptr_eq(a, b),
            (Self::Instance(a), Self::Instance(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Whether this node can have children
    #[inline]
    #[must_use]
    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Seq(_) | Self::Map(_) | Self::Instance(_))
    }

    /// Enumerable child keys in enumeration order; `None` for leaves
    ///
    /// Sequence keys are decimal indices. The snapshot is taken at call
    /// time; the live structure may change afterwards.
    #[must_use]
    pub fn keys(&self) -> Option<Vec<String>> {
        match self {
            Self::Seq(s) => Some((0..s.borrow().len()).map(|i| i.to_string()).collect()),
            Self::Map(m) => Some(m.borrow().keys().cloned().collect()),
            Self::Instance(i) => Some(i.borrow().fields.keys().cloned().collect()),
            _ => None,
        }
    }

    /// Child at `key`, if any
    #[must_use]
    pub fn get(&self, key: &str) -> Option<GraphValue> {
        match self {
            Self::Seq(s) => {
                let index: usize = key.parse().ok()?;
                s.borrow().get(index).cloned()
            }
            Self::Map(m) => m.borrow().get(key).cloned(),
            Self::Instance(i) => i.borrow().fields.get(key).cloned(),
            _ => None,
        }
    }

    /// Build a graph from parsed JSON
    ///
    /// Strings are taken verbatim — date recognition is a deserialization
    /// concern, not a data-model one.
    #[must_use]
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::seq_of(items.into_iter().map(Self::from_json)),
            Value::Object(entries) => {
                Self::map_of(entries.into_iter().map(|(k, v)| (k, Self::from_json(v))))
            }
        }
    }

    /// Render as JSON, dates in RFC 3339 text form
    ///
    /// Recursive over the tree: the graph must be acyclic. Serialization of
    /// graphs with shared or cyclic structure goes through the Provider,
    /// whose output trees are acyclic by construction.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) => Value::Number(n.clone()),
            Self::String(s) => Value::String(s.clone()),
            Self::Date(d) => Value::String(d.to_rfc3339()),
            Self::Seq(s) => Value::Array(s.borrow().iter().map(Self::to_json).collect()),
            Self::Map(m) => Value::Object(
                m.borrow()
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            Self::Instance(i) => Value::Object(
                i.borrow()
                    .fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for GraphValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for GraphValue {
    fn from(v: i32) -> Self {
        Self::Number(Number::from(v))
    }
}

impl From<i64> for GraphValue {
    fn from(v: i64) -> Self {
        Self::Number(Number::from(v))
    }
}

impl From<u64> for GraphValue {
    fn from(v: u64) -> Self {
        Self::Number(Number::from(v))
    }
}

impl From<f64> for GraphValue {
    /// Non-finite values have no JSON form and map to `Null`
    fn from(v: f64) -> Self {
        Number::from_f64(v).map_or(Self::Null, Self::Number)
    }
}

impl From<Number> for GraphValue {
    fn from(v: Number) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for GraphValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<String> for GraphValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<DateTime<FixedOffset>> for GraphValue {
    fn from(v: DateTime<FixedOffset>) -> Self {
        Self::Date(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn clone_shares_the_handle() {
        let map = GraphValue::map();
        let alias = map.clone();
        assert!(map.ptr_eq(&alias));

        if let GraphValue::Map(m) = &map {
            m.borrow_mut().insert("x".into(), 1i64.into());
        }
        assert_eq!(alias.get("x"), Some(GraphValue::from(1i64)));
    }

    #[test]
    fn equal_but_distinct_maps_are_not_identical() {
        let a = GraphValue::map_of([("x", 1i64)]);
        let b = GraphValue::map_of([("x", 1i64)]);
        assert_eq!(a, b);
        assert!(!a.ptr_eq(&b));
    }

    #[test]
    fn leaves_are_never_identical() {
        let a = GraphValue::from("x");
        assert!(!a.ptr_eq(&a.clone()));
    }

    #[test]
    fn keys_enumerate_in_order() {
        let map = GraphValue::map_of([("b", 1i64), ("a", 2i64)]);
        assert_eq!(map.keys(), Some(vec!["b".to_string(), "a".to_string()]));

        let seq = GraphValue::seq_of([1i64, 2, 3]);
        assert_eq!(
            seq.keys(),
            Some(vec!["0".to_string(), "1".to_string(), "2".to_string()])
        );

        assert_eq!(GraphValue::Null.keys(), None);
    }

    #[test]
    fn instance_keys_are_field_names() {
        let class = ClassDef::new("Person");
        let person = GraphValue::instance(class);
        if let GraphValue::Instance(i) = &person {
            i.borrow_mut().fields.insert("name".into(), "Ada".into());
        }
        assert_eq!(person.keys(), Some(vec!["name".to_string()]));
        assert_eq!(person.get("name"), Some(GraphValue::from("Ada")));
    }

    #[test]
    fn instance_equality_requires_same_class() {
        let a = Instance::new(ClassDef::new("Person"));
        let b = Instance::new(ClassDef::new("Person"));
        assert_ne!(a, b);

        let class = ClassDef::new("Person");
        assert_eq!(Instance::new(Arc::clone(&class)), Instance::new(class));
    }

    #[test]
    fn seq_get_parses_decimal_indices() {
        let seq = GraphValue::seq_of(["a", "b"]);
        assert_eq!(seq.get("1"), Some(GraphValue::from("b")));
        assert_eq!(seq.get("2"), None);
        assert_eq!(seq.get("one"), None);
    }

    #[test]
    fn json_round_trip_preserves_key_order() {
        let value = json!({"z": 1, "a": [true, null], "m": {"k": "v"}});
        let graph = GraphValue::from_json(value.clone());
        assert_eq!(graph.to_json(), value);
        assert_eq!(
            graph.keys(),
            Some(vec!["z".to_string(), "a".to_string(), "m".to_string()])
        );
    }

    #[test]
    fn date_renders_as_rfc3339() {
        let date = DateTime::parse_from_rfc3339("2020-05-01T12:30:00+02:00").unwrap();
        let graph = GraphValue::from(date);
        assert_eq!(graph.to_json(), json!("2020-05-01T12:30:00+02:00"));
    }

    #[test]
    fn non_finite_floats_become_null() {
        assert_eq!(GraphValue::from(f64::NAN), GraphValue::Null);
        assert_eq!(GraphValue::from(2.5), GraphValue::Number(Number::from_f64(2.5).unwrap()));
    }
}
