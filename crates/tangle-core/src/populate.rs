//! Shape-preserving output placeholders

use crate::error::Error;
use crate::plugin::Plugin;
use crate::registry::TypeRegistry;
use std::sync::Arc;
use tangle_graph::{assign, resolve, GraphValue, NodePath};

/// Pre-shapes the output tree with placeholders the walk then fills
///
/// Every visited node gets a counterpart written into the output at the same
/// path: a fresh empty composite of the same shape (same class for typed
/// records), or the leaf value itself. Later descent fills the placeholder's
/// children one path at a time.
///
/// A property-less composite that carries no registered tag is reused by
/// handle instead of cloned — nothing will ever be written into it, so the
/// input stays unmutated. A tagged one must be cloned even when empty,
/// because the type plugin writes `$type` into whatever sits in the output.
pub struct PopulatePlugin {
    registry: Arc<TypeRegistry>,
}

impl PopulatePlugin {
    /// Create a plugin reading tags from `registry`
    #[must_use]
    pub fn new(registry: Arc<TypeRegistry>) -> Self {
        Self { registry }
    }
}

impl Plugin for PopulatePlugin {
    fn map(
        &mut self,
        input: &GraphValue,
        output: &GraphValue,
        path: &NodePath,
    ) -> Result<bool, Error> {
        if path.is_empty() {
            return Ok(false);
        }
        let instance = resolve(input, path)?;

        let placeholder = match &instance {
            GraphValue::Map(entries) => {
                if entries.borrow().is_empty() {
                    instance.clone()
                } else {
                    GraphValue::map()
                }
            }
            GraphValue::Seq(items) => {
                if items.borrow().is_empty() {
                    instance.clone()
                } else {
                    GraphValue::seq()
                }
            }
            GraphValue::Instance(record) => {
                let record = record.borrow();
                if record.fields.is_empty() && self.registry.tag_of(&record.class).is_none() {
                    instance.clone()
                } else {
                    GraphValue::instance(Arc::clone(&record.class))
                }
            }
            leaf => leaf.clone(),
        };

        assign(output, path, placeholder)?;
        Ok(false)
    }

    fn unmap(&mut self, _doc: &GraphValue, _path: &NodePath) -> Result<bool, Error> {
        Ok(false)
    }
}
