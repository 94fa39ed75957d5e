//! Plugin trait for the transform chain

use crate::error::Error;
use tangle_graph::{GraphValue, NodePath};

/// Transform capability applied at every visited path
///
/// `map` runs during serialization: read the node at `path` in the input
/// graph, optionally write into the parallel output tree. `unmap` runs
/// during deserialization: optionally rewrite the node at `path` in place.
///
/// Returning `true` reports the path handled: the walker treats it as
/// terminal (no descent) and the Provider stops consulting later plugins in
/// the chain at that path.
pub trait Plugin {
    /// Serialize-direction pass at one path
    ///
    /// # Errors
    /// A plugin failure aborts the entire call.
    fn map(
        &mut self,
        input: &GraphValue,
        output: &GraphValue,
        path: &NodePath,
    ) -> Result<bool, Error>;

    /// Deserialize-direction pass at one path, mutating `doc` in place
    ///
    /// # Errors
    /// A plugin failure aborts the entire call.
    fn unmap(&mut self, doc: &GraphValue, path: &NodePath) -> Result<bool, Error>;
}
