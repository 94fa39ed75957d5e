//! Type-tag dehydrate and rehydrate

use crate::error::Error;
use crate::plugin::Plugin;
use crate::registry::TypeRegistry;
use std::sync::Arc;
use tangle_graph::{assign, resolve, GraphValue, Instance, NodePath};

/// Key of the reserved type-tag property
const TYPE_KEY: &str = "$type";

/// Writes `$type` tags for registered classes and rebuilds their instances
///
/// Only an instance whose exact class allocation is registered gets a tag —
/// identity lookup, so registration of a related class does not rub off.
/// Rehydration is non-terminal: descent continues into the rebuilt
/// instance's fields, which is how markers nested under a typed node are
/// themselves rehydrated.
pub struct TypePlugin {
    registry: Arc<TypeRegistry>,
}

impl TypePlugin {
    /// Create a plugin backed by `registry`
    #[must_use]
    pub fn new(registry: Arc<TypeRegistry>) -> Self {
        Self { registry }
    }
}

impl Plugin for TypePlugin {
    fn map(
        &mut self,
        input: &GraphValue,
        output: &GraphValue,
        path: &NodePath,
    ) -> Result<bool, Error> {
        let instance = resolve(input, path)?;
        let GraphValue::Instance(record) = &instance else {
            return Ok(false);
        };
        let Some(tag) = self.registry.tag_of(&record.borrow().class).map(str::to_owned)
        else {
            return Ok(false);
        };
        assign(output, &path.child(TYPE_KEY), tag.into())?;
        Ok(false)
    }

    fn unmap(&mut self, doc: &GraphValue, path: &NodePath) -> Result<bool, Error> {
        let node = resolve(doc, path)?;
        let GraphValue::Map(map) = &node else {
            return Ok(false);
        };

        let tag = match map.borrow().get(TYPE_KEY) {
            Some(GraphValue::String(tag)) => tag.clone(),
            _ => return Ok(false),
        };
        let Some(class) = self.registry.get(&tag) else {
            return Err(Error::UnknownType(tag));
        };

        let mut rebuilt = Instance::new(class);
        for (key, value) in map.borrow().iter() {
            if key != TYPE_KEY {
                rebuilt.fields.insert(key.clone(), value.clone());
            }
        }
        assign(doc, path, rebuilt.into())?;
        Ok(false)
    }
}
