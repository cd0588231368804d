//! Error types for lattice models.

use thiserror::Error;

/// Errors produced while building lattices and models.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ModelError {
    /// An interaction matrix must be square.
    #[error("Interaction matrix must be square, got {rows}x{cols}")]
    NonSquareMatrix {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },

    /// An edge references a node outside the lattice.
    #[error("Edge references node {node} but the lattice has {num_nodes} nodes")]
    NodeOutOfRange {
        /// The offending node.
        node: usize,
        /// Number of nodes.
        num_nodes: usize,
    },
}

/// Result type for model construction.
pub type ModelResult<T> = Result<T, ModelError>;
