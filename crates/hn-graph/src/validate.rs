//! Caller-side graph validation.
//!
//! The INP exporter never calls this; applications run it before handing a
//! snapshot over so that dangling references and self-loops never reach it.

use std::collections::{HashMap, HashSet};

use hn_core::{ElementId, NodeKey};

use crate::error::GraphError;
use crate::graph::{Edge, Node};

/// Validate node/edge identity and references.
///
/// Checks run in order: unique node ids, unique edge ids, existing endpoints,
/// no self-loops, no export-key collisions. The first failure is returned.
pub fn validate_network(nodes: &[Node], edges: &[Edge]) -> Result<(), GraphError> {
    let mut node_ids: HashSet<&ElementId> = HashSet::new();
    for node in nodes {
        if !node_ids.insert(&node.id) {
            return Err(GraphError::DuplicateNodeId {
                id: node.id.clone(),
            });
        }
    }

    let mut edge_ids: HashSet<&ElementId> = HashSet::new();
    for edge in edges {
        if !edge_ids.insert(&edge.id) {
            return Err(GraphError::DuplicateEdgeId {
                id: edge.id.clone(),
            });
        }
    }

    for edge in edges {
        for (end, node) in [("source", &edge.source), ("target", &edge.target)] {
            if !node_ids.contains(node) {
                return Err(GraphError::DanglingEndpoint {
                    edge: edge.id.clone(),
                    node: node.clone(),
                    end,
                });
            }
        }
        if edge.source == edge.target {
            return Err(GraphError::SelfLoop {
                edge: edge.id.clone(),
            });
        }
    }

    let mut keys: HashMap<NodeKey, &ElementId> = HashMap::new();
    for node in nodes {
        let key = node.export_key();
        if let Some(first) = keys.get(&key) {
            return Err(GraphError::ExportKeyCollision {
                key,
                first: (*first).clone(),
                second: node.id.clone(),
            });
        }
        keys.insert(key, &node.id);
    }

    Ok(())
}
