//! Tangle Graph Model
//!
//! Dynamic object-graph values with path addressing and live traversal.
//!
//! # Core Concepts
//!
//! - [`GraphValue`]: shared-handle dynamic value — one node may be reached
//!   from many paths (aliasing) or from itself (cycles)
//! - [`ClassDef`] / [`Instance`]: identity-bearing typed records
//! - [`NodePath`]: ordered key sequence from the synthetic root `#`,
//!   `/`-joined in text form
//! - [`resolve`] / [`assign`]: path navigation over the live structure
//! - [`breadth`] / [`depth`]: path-driven traversal that re-resolves the
//!   node at every visit, so in-place rewrites are seen by later steps
//!
//! # Example
//!
//! ```rust,ignore
//! use tangle_graph::{GraphValue, NodePath, resolve};
//!
//! let order = GraphValue::map_of([("qty", 2i64)]);
//! let root = GraphValue::map_of([("order", order)]);
//!
//! let qty = resolve(&root, &NodePath::from("order/qty"))?;
//! assert_eq!(qty, GraphValue::from(2i64));
//! ```

#![warn(unreachable_pub)]

// Core modules
mod path;
mod resolve;
mod value;
mod walk;

// Re-exports
pub use path::{NodePath, ROOT_KEY};
pub use resolve::{assign, resolve, PathError};
pub use value::{ClassDef, GraphValue, Instance};
pub use walk::{breadth, depth};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
