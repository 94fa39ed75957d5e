//! Tangle Core
//!
//! Plugin-driven conversion between live object graphs and JSON text,
//! preserving what plain JSON cannot express: shared and cyclic references,
//! registered type identity, and date values.
//!
//! # Core Concepts
//!
//! - [`Plugin`]: map/unmap capability pair applied at every visited path
//! - [`ReferencePlugin`]: cycle breaking and alias preservation via
//!   referential identity (`$ref` markers)
//! - [`PopulatePlugin`]: shape-preserving output placeholders
//! - [`TypePlugin`]: type-tag dehydrate/rehydrate (`$type` markers)
//! - [`DatePlugin`]: date recognition on rehydrate
//! - [`TypeRegistry`]: tag ⇄ class lookups, populated at composition time
//! - [`Provider`]: binds the fixed-order chain to both transform directions
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tangle_core::{deserialize, serialize, TypeRegistry};
//! use tangle_graph::{ClassDef, GraphValue};
//!
//! let class = ClassDef::new("Person");
//! let mut registry = TypeRegistry::new();
//! registry.register("Person", Arc::clone(&class));
//! let registry = Arc::new(registry);
//!
//! let person = GraphValue::instance(class);
//! let text = serialize(&person, &registry)?;
//! let restored = deserialize(&text, &registry)?;
//! ```

#![warn(unreachable_pub)]

// Plugin implementations
mod date;
mod populate;
mod reference;
mod typed;

// Orchestration
mod error;
mod plugin;
mod provider;
mod registry;

// Re-exports
pub use date::DatePlugin;
pub use error::Error;
pub use plugin::Plugin;
pub use populate::PopulatePlugin;
pub use provider::{deserialize, serialize, Provider};
pub use reference::ReferencePlugin;
pub use registry::TypeRegistry;
pub use typed::TypePlugin;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
