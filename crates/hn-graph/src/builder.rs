//! Incremental network builder.

use hn_core::ElementId;

use crate::error::GraphResult;
use crate::graph::{Edge, EdgeData, Network, Node, NodeData, Position};
use crate::validate;

/// Builder for constructing a network incrementally.
///
/// Use `add_node` and `add_edge` to build up the network,
/// then call `build()` to validate and freeze it into a `Network`.
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl NetworkBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node and return its id.
    pub fn add_node(&mut self, id: impl Into<ElementId>, data: NodeData) -> ElementId {
        let node = Node::new(id, data);
        let id = node.id.clone();
        self.nodes.push(node);
        id
    }

    /// Add a node at a canvas position and return its id.
    pub fn add_node_at(
        &mut self,
        id: impl Into<ElementId>,
        position: Position,
        data: NodeData,
    ) -> ElementId {
        let id = self.add_node(id, data);
        if let Some(node) = self.nodes.last_mut() {
            node.position = position;
        }
        id
    }

    /// Add a directed edge from `source` to `target` and return its id.
    pub fn add_edge(
        &mut self,
        id: impl Into<ElementId>,
        source: ElementId,
        target: ElementId,
        data: EdgeData,
    ) -> ElementId {
        let edge = Edge::new(id, source, target, data);
        let id = edge.id.clone();
        self.edges.push(edge);
        id
    }

    /// Assign a node number after construction.
    pub fn set_node_number(&mut self, id: &ElementId, number: i64) {
        if let Some(node) = self.nodes.iter_mut().find(|n| &n.id == id) {
            node.data.node_number = Some(number);
        }
    }

    /// Build and validate the network.
    pub fn build(self) -> GraphResult<Network> {
        validate::validate_network(&self.nodes, &self.edges)?;
        Ok(Network {
            nodes: self.nodes,
            edges: self.edges,
        })
    }
}
