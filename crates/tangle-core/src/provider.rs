//! Orchestration of the fixed-order plugin chain

use crate::date::DatePlugin;
use crate::error::Error;
use crate::plugin::Plugin;
use crate::populate::PopulatePlugin;
use crate::reference::ReferencePlugin;
use crate::registry::TypeRegistry;
use crate::typed::TypePlugin;
use std::sync::Arc;
use tangle_graph::{breadth, resolve, GraphValue, NodePath, ROOT_KEY};

/// Binds the plugin chain to both transform directions
///
/// At every visited path the chain runs in fixed order
/// {Reference, Populate, Type, Date}, folding each plugin's handled flag:
/// once a plugin reports the path handled, later plugins are not consulted
/// there and the walker treats the path as terminal. The order is
/// load-bearing — Reference must intercept an already-seen instance before
/// Populate would re-expand it, or a cyclic graph would never terminate.
///
/// A fresh chain is built per call, so the reference plugin's sighting list
/// is scoped to one call and a shared `Provider` stays safe to use from
/// independent call sites.
#[derive(Debug, Clone)]
pub struct Provider {
    registry: Arc<TypeRegistry>,
}

impl Provider {
    /// Create a provider reading type registrations from `registry`
    #[inline]
    #[must_use]
    pub fn new(registry: Arc<TypeRegistry>) -> Self {
        Self { registry }
    }

    fn chain(&self) -> Vec<Box<dyn Plugin>> {
        vec![
            Box::new(ReferencePlugin::new()),
            Box::new(PopulatePlugin::new(Arc::clone(&self.registry))),
            Box::new(TypePlugin::new(Arc::clone(&self.registry))),
            Box::new(DatePlugin::new()),
        ]
    }

    /// Convert an object graph into JSON text
    ///
    /// The input is never mutated; plugins write into a parallel output
    /// tree that is encoded once the walk is done. Shared and cyclic
    /// structure comes out as `$ref` markers, registered types as `$type`
    /// tags, dates as RFC 3339 strings.
    ///
    /// # Errors
    /// Any plugin or encoding failure aborts the whole call.
    pub fn serialize(&self, graph: &GraphValue) -> Result<String, Error> {
        let mut chain = self.chain();
        let input = GraphValue::map_of([(ROOT_KEY, graph.clone())]);
        let output = GraphValue::map();
        let mut visited = 0usize;

        breadth(&input, |path: &NodePath| {
            visited += 1;
            let mut handled = false;
            for plugin in &mut chain {
                handled = handled || plugin.map(&input, &output, path)?;
            }
            Ok::<_, Error>(handled)
        })?;
        tracing::debug!(visited, "serialize walk complete");

        let document = resolve(&output, &NodePath::root().child(ROOT_KEY))?;
        Ok(serde_json::to_string(&document.to_json())?)
    }

    /// Convert JSON text back into an object graph
    ///
    /// The parsed structure is walked and rewritten in place: `$ref`
    /// markers become shared handles, `$type` maps become instances of the
    /// registered classes, date-shaped strings become dates.
    ///
    /// # Errors
    /// [`Error::Json`] on undecodable text; [`Error::MalformedReference`]
    /// and [`Error::UnknownType`] fail the call with no partial result.
    pub fn deserialize(&self, text: &str) -> Result<GraphValue, Error> {
        let parsed: serde_json::Value = serde_json::from_str(text)?;
        let doc = GraphValue::map_of([(ROOT_KEY, GraphValue::from_json(parsed))]);
        let mut chain = self.chain();
        let mut visited = 0usize;

        breadth(&doc, |path: &NodePath| {
            visited += 1;
            let mut handled = false;
            for plugin in &mut chain {
                handled = handled || plugin.unmap(&doc, path)?;
            }
            Ok::<_, Error>(handled)
        })?;
        tracing::debug!(visited, "deserialize walk complete");

        Ok(resolve(&doc, &NodePath::root().child(ROOT_KEY))?)
    }
}

/// Convert an object graph into JSON text with a one-off [`Provider`]
///
/// # Errors
/// See [`Provider::serialize`].
pub fn serialize(graph: &GraphValue, registry: &Arc<TypeRegistry>) -> Result<String, Error> {
    Provider::new(Arc::clone(registry)).serialize(graph)
}

/// Convert JSON text back into an object graph with a one-off [`Provider`]
///
/// # Errors
/// See [`Provider::deserialize`].
pub fn deserialize(text: &str, registry: &Arc<TypeRegistry>) -> Result<GraphValue, Error> {
    Provider::new(Arc::clone(registry)).deserialize(text)
}
