//! Path resolution over live graph values
//!
//! [`resolve`] follows a [`NodePath`] key by key; [`assign`] rewrites the
//! node a path points at. Both operate on the live structure, so a walk
//! that mutates mid-flight observes its own writes.

use crate::path::NodePath;
use crate::value::GraphValue;
use std::cmp::Ordering;

/// Errors from path navigation
#[derive(Debug, thiserror::Error)]
pub enum PathError {
    /// Assignment target must name at least one key
    #[error("cannot assign to the empty path")]
    EmptyPath,

    /// Key not present on the record at this point in the path
    #[error("unknown key '{key}' at '{at}'")]
    UnknownKey {
        /// Missing key
        key: String,
        /// Path of the record it was looked up on
        at: NodePath,
    },

    /// Sequence key is not a decimal index
    #[error("invalid sequence index '{key}' at '{at}'")]
    InvalidIndex {
        /// Offending key
        key: String,
        /// Path of the sequence
        at: NodePath,
    },

    /// Sequence index past the end
    #[error("index {index} out of bounds (len {len}) at '{at}'")]
    IndexOutOfBounds {
        /// Requested index
        index: usize,
        /// Sequence length at the time of access
        len: usize,
        /// Path of the sequence
        at: NodePath,
    },

    /// Path descends into a leaf
    #[error("value at '{at}' is not indexable")]
    NotIndexable {
        /// Path of the leaf
        at: NodePath,
    },
}

/// Resolve the value a path points at
///
/// Follows each key in order: maps and instances index by key, sequences by
/// decimal index. Returns a handle to the resolved node (composites stay
/// shared with the graph).
///
/// # Errors
/// Any missing key, bad or out-of-range index, or descent into a leaf is an
/// explicit [`PathError`] — never a silent null.
pub fn resolve(root: &GraphValue, path: &NodePath) -> Result<GraphValue, PathError> {
    let mut current = root.clone();
    for (depth, key) in path.iter().enumerate() {
        current = index(&current, key, || {
            NodePath::new(path.segments()[..depth].to_vec())
        })?;
    }
    Ok(current)
}

/// Assign `value` to the node a path points at
///
/// Resolves the parent of the final key, then sets that key: maps and
/// instances insert or replace; sequences replace in range and append at
/// exactly the current length.
///
/// # Errors
/// The empty path is invalid input ([`PathError::EmptyPath`]) — there is no
/// parent to write into. Parent resolution failures propagate.
pub fn assign(root: &GraphValue, path: &NodePath, value: GraphValue) -> Result<(), PathError> {
    let (Some(parent_path), Some(key)) = (path.parent(), path.last()) else {
        return Err(PathError::EmptyPath);
    };
    let parent = resolve(root, &parent_path)?;
    match &parent {
        GraphValue::Map(m) => {
            m.borrow_mut().insert(key.to_owned(), value);
            Ok(())
        }
        GraphValue::Instance(i) => {
            i.borrow_mut().fields.insert(key.to_owned(), value);
            Ok(())
        }
        GraphValue::Seq(s) => {
            let index: usize = key.parse().map_err(|_| PathError::InvalidIndex {
                key: key.to_owned(),
                at: parent_path.clone(),
            })?;
            let mut items = s.borrow_mut();
            match index.cmp(&items.len()) {
                Ordering::Less => {
                    items[index] = value;
                    Ok(())
                }
                Ordering::Equal => {
                    items.push(value);
                    Ok(())
                }
                Ordering::Greater => Err(PathError::IndexOutOfBounds {
                    index,
                    len: items.len(),
                    at: parent_path,
                }),
            }
        }
        _ => Err(PathError::NotIndexable { at: parent_path }),
    }
}

fn index(
    value: &GraphValue,
    key: &str,
    at: impl Fn() -> NodePath,
) -> Result<GraphValue, PathError> {
    match value {
        GraphValue::Map(m) => m.borrow().get(key).cloned().ok_or_else(|| {
            PathError::UnknownKey {
                key: key.to_owned(),
                at: at(),
            }
        }),
        GraphValue::Instance(i) => i.borrow().fields.get(key).cloned().ok_or_else(|| {
            PathError::UnknownKey {
                key: key.to_owned(),
                at: at(),
            }
        }),
        GraphValue::Seq(s) => {
            let index: usize = key.parse().map_err(|_| PathError::InvalidIndex {
                key: key.to_owned(),
                at: at(),
            })?;
            let items = s.borrow();
            items
                .get(index)
                .cloned()
                .ok_or_else(|| PathError::IndexOutOfBounds {
                    index,
                    len: items.len(),
                    at: at(),
                })
        }
        _ => Err(PathError::NotIndexable { at: at() }),
    }
}
