//! Error taxonomy for both transform directions

use tangle_graph::PathError;

/// Failure of a serialize or deserialize call
///
/// A failure raised while processing any single path aborts the entire
/// call — the caller never receives a partially transformed structure.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A `$ref` path does not name an existing node
    #[error("malformed reference '{path}'")]
    MalformedReference {
        /// Stored reference path, as found in the document
        path: String,
        /// Resolution failure
        #[source]
        source: PathError,
    },

    /// A `$type` tag has no registered class
    #[error("unknown type tag '{0}'")]
    UnknownType(String),

    /// The JSON text could not be decoded or encoded
    #[error("malformed JSON text")]
    Json(#[from] serde_json::Error),

    /// A path operation failed outside reference resolution
    #[error(transparent)]
    Path(#[from] PathError),
}
