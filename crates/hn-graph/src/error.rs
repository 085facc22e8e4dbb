//! Graph-specific error types.

use hn_core::{ElementId, HnError, NodeKey};

pub type GraphResult<T> = Result<T, GraphError>;

/// Graph construction and validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Two nodes share the same identifier.
    DuplicateNodeId { id: ElementId },

    /// Two edges share the same identifier.
    DuplicateEdgeId { id: ElementId },

    /// An edge endpoint refers to a node that doesn't exist.
    DanglingEndpoint {
        edge: ElementId,
        node: ElementId,
        end: &'static str,
    },

    /// An edge connects a node to itself.
    SelfLoop { edge: ElementId },

    /// Two nodes render to the same export key.
    ExportKeyCollision {
        key: NodeKey,
        first: ElementId,
        second: ElementId,
    },
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::DuplicateNodeId { id } => write!(f, "Duplicate node id {}", id),
            GraphError::DuplicateEdgeId { id } => write!(f, "Duplicate edge id {}", id),
            GraphError::DanglingEndpoint { edge, node, end } => {
                write!(f, "Edge {} {} refers to non-existent node {}", edge, end, node)
            }
            GraphError::SelfLoop { edge } => {
                write!(f, "Edge {} connects a node to itself", edge)
            }
            GraphError::ExportKeyCollision { key, first, second } => {
                write!(
                    f,
                    "Nodes {} and {} both export as node {}",
                    first, second, key
                )
            }
        }
    }
}

impl std::error::Error for GraphError {}

impl From<GraphError> for HnError {
    fn from(err: GraphError) -> Self {
        HnError::Invariant {
            what: err.to_string(),
        }
    }
}
