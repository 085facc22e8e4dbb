//! Adjacency index for traversal.
//!
//! Unlike `validate_network`, the index tolerates dangling references: an
//! edge whose source is unknown is simply not reachable, and an unknown
//! target resolves to its literal id.

use std::collections::HashMap;

use hn_core::{ElementId, NodeKey};

use crate::graph::{Edge, Node};

/// Node lookup plus outgoing edges per node, in input order.
#[derive(Debug, Clone)]
pub struct Adjacency<'a> {
    nodes: &'a [Node],
    edges: &'a [Edge],

    /// Node id -> position in `nodes`. First occurrence wins.
    node_by_id: HashMap<&'a str, usize>,

    /// Edge id -> position in `edges`. First occurrence wins.
    edge_by_id: HashMap<&'a str, usize>,

    /// Offsets for node->edge adjacency: node i's outgoing edges are in
    /// out_edges[out_offsets[i]..out_offsets[i+1]].
    out_offsets: Vec<usize>,

    /// Flat list of edge positions, grouped by source node, input order within a group.
    out_edges: Vec<usize>,
}

impl<'a> Adjacency<'a> {
    pub fn new(nodes: &'a [Node], edges: &'a [Edge]) -> Self {
        let mut node_by_id = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            node_by_id.entry(node.id.as_str()).or_insert(i);
        }
        let mut edge_by_id = HashMap::with_capacity(edges.len());
        for (i, edge) in edges.iter().enumerate() {
            edge_by_id.entry(edge.id.as_str()).or_insert(i);
        }

        // Group edges by source node
        let mut per_node: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
        for (i, edge) in edges.iter().enumerate() {
            if let Some(&src) = node_by_id.get(edge.source.as_str()) {
                per_node[src].push(i);
            }
        }

        let mut out_offsets = Vec::with_capacity(nodes.len() + 1);
        let mut out_edges = Vec::with_capacity(edges.len());
        out_offsets.push(0);
        for list in &per_node {
            out_edges.extend_from_slice(list);
            out_offsets.push(out_edges.len());
        }

        Self {
            nodes,
            edges,
            node_by_id,
            edge_by_id,
            out_offsets,
            out_edges,
        }
    }

    pub fn nodes(&self) -> &'a [Node] {
        self.nodes
    }

    pub fn edges(&self) -> &'a [Edge] {
        self.edges
    }

    pub fn node_index(&self, id: &ElementId) -> Option<usize> {
        self.node_by_id.get(id.as_str()).copied()
    }

    pub fn node(&self, id: &ElementId) -> Option<&'a Node> {
        self.node_index(id).map(|i| &self.nodes[i])
    }

    pub fn edge(&self, id: &ElementId) -> Option<&'a Edge> {
        self.edge_by_id.get(id.as_str()).map(|&i| &self.edges[i])
    }

    /// Outgoing edges of the node at `node_idx`, in input order.
    pub fn outgoing(&self, node_idx: usize) -> impl Iterator<Item = (usize, &'a Edge)> + '_ {
        let range = match (
            self.out_offsets.get(node_idx),
            self.out_offsets.get(node_idx + 1),
        ) {
            (Some(&start), Some(&end)) => start..end,
            _ => 0..0,
        };
        let edges = self.edges;
        self.out_edges[range].iter().map(move |&i| (i, &edges[i]))
    }

    pub fn out_degree(&self, node_idx: usize) -> usize {
        self.outgoing(node_idx).count()
    }

    /// Export key of the node `id`, or the id itself when no such node exists.
    pub fn key_of(&self, id: &ElementId) -> NodeKey {
        match self.node(id) {
            Some(node) => node.export_key(),
            None => NodeKey::from(id),
        }
    }
}
