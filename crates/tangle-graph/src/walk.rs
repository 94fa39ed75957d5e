//! Breadth- and depth-first path traversal
//!
//! The walker hands the visitor a path, not a value: the node is re-resolved
//! from the root at visit time, so in-place rewrites at or below the current
//! path are visible to later steps. That is load-bearing for
//! deserialization, which mutates the very structure it is walking.
//!
//! The walker performs no cycle detection — each discovered path is visited
//! exactly once, and it is the visitor's job to cut branches (return `true`)
//! before a cyclic structure re-expands.

use crate::path::NodePath;
use crate::resolve::{resolve, PathError};
use crate::value::GraphValue;
use std::collections::VecDeque;

enum Order {
    Breadth,
    Depth,
}

/// Visit every path in `root` breadth-first
///
/// Starts at the empty path. The visitor returns `true` to stop navigation
/// for that branch; otherwise the node now at the path is re-resolved and
/// one child path per enumerable key is enqueued, in enumeration order.
///
/// # Errors
/// The first visitor error aborts the walk, as does a resolution failure on
/// a path the visitor left behind in an unnavigable state.
pub fn breadth<E>(
    root: &GraphValue,
    visit: impl FnMut(&NodePath) -> Result<bool, E>,
) -> Result<(), E>
where
    E: From<PathError>,
{
    walk(root, visit, &Order::Breadth)
}

/// Visit every path in `root` depth-first (pre-order)
///
/// Same contract as [`breadth`], except child paths are pushed to the front
/// of the queue one at a time — so children of one node are visited in
/// reverse enumeration order, matching the breadth variant's mirror image.
///
/// # Errors
/// See [`breadth`].
pub fn depth<E>(
    root: &GraphValue,
    visit: impl FnMut(&NodePath) -> Result<bool, E>,
) -> Result<(), E>
where
    E: From<PathError>,
{
    walk(root, visit, &Order::Depth)
}

fn walk<E>(
    root: &GraphValue,
    mut visit: impl FnMut(&NodePath) -> Result<bool, E>,
    order: &Order,
) -> Result<(), E>
where
    E: From<PathError>,
{
    let mut queue: VecDeque<NodePath> = VecDeque::from([NodePath::root()]);

    while let Some(path) = queue.pop_front() {
        if visit(&path)? {
            continue;
        }
        // Re-resolve: the visitor may have rewritten this node in place.
        let current = resolve(root, &path)?;
        let Some(keys) = current.keys() else { continue };
        for key in keys {
            match order {
                Order::Breadth => queue.push_back(path.child(key)),
                Order::Depth => queue.push_front(path.child(key)),
            }
        }
    }
    Ok(())
}
