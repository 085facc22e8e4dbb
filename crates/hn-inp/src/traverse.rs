//! Connectivity traversal.
//!
//! Depth-first walk from every reservoir, in input order, along outgoing
//! edges. Nodes and edges are visited at most once across all walks, which
//! breaks cycles and keeps shared downstream paths from being emitted twice.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use hn_core::NodeKey;
use hn_graph::{Adjacency, Edge, Node, NodeKind};
use tracing::{debug, warn};

/// One `ELEM <element> LINK <from> <to>` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    pub element: String,
    pub from: NodeKey,
    pub to: NodeKey,
}

/// A statement of the SYSTEM connectivity block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `ELEM <label> AT <key>`: an element hosted by a node.
    ElementAt { label: String, key: NodeKey },
    /// `JUNCTION AT <key>`, set off by blank lines.
    Junction { key: NodeKey },
    /// `ELEM <element> LINK <from> <to>`.
    Link(LinkRecord),
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::ElementAt { label, key } => write!(f, "ELEM {} AT {}", label, key),
            Statement::Junction { key } => write!(f, "\nJUNCTION AT {}\n", key),
            Statement::Link(link) => {
                write!(f, "ELEM {} LINK {} {}", link.element, link.from, link.to)
            }
        }
    }
}

/// Result of a traversal: ordered statements plus the special node keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Traversal {
    pub statements: Vec<Statement>,
    /// Keys of nodes hosting a reservoir, surge tank or flow boundary, and of junctions.
    pub special: BTreeSet<NodeKey>,
}

impl Traversal {
    /// Link statements in emission order.
    pub fn links(&self) -> impl Iterator<Item = &LinkRecord> {
        self.statements.iter().filter_map(|s| match s {
            Statement::Link(link) => Some(link),
            _ => None,
        })
    }

    /// Rendered connectivity lines, junction padding included.
    pub fn lines(&self) -> Vec<String> {
        self.statements
            .iter()
            .flat_map(|s| {
                s.to_string()
                    .split('\n')
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    fn element_at(&mut self, node: &Node) {
        let key = node.export_key();
        self.statements.push(Statement::ElementAt {
            label: node.label().to_string(),
            key: key.clone(),
        });
        self.special.insert(key);
    }
}

/// Walk the network and collect its connectivity statements.
///
/// After the walks, surge tanks and flow boundaries that no walk reached are
/// still emitted as `ELEM … AT …` so every such element appears exactly once.
pub fn traverse(nodes: &[Node], edges: &[Edge]) -> Traversal {
    let adjacency = Adjacency::new(nodes, edges);
    let mut walker = Walker {
        adjacency: &adjacency,
        visited_nodes: HashSet::new(),
        visited_edges: HashSet::new(),
        out: Traversal::default(),
    };

    for (idx, node) in nodes.iter().enumerate() {
        if matches!(node.kind(), NodeKind::Reservoir) {
            walker.walk(idx);
        }
    }

    for (idx, node) in nodes.iter().enumerate() {
        if walker.visited_nodes.contains(&idx) {
            continue;
        }
        if matches!(
            node.kind(),
            NodeKind::SurgeTank(_) | NodeKind::FlowBoundary(_)
        ) {
            debug!(node = %node.id, "element not reached from any reservoir");
            walker.out.element_at(node);
        }
    }

    let traversal = walker.out;
    debug!(
        statements = traversal.statements.len(),
        links = traversal.links().count(),
        special = traversal.special.len(),
        "connectivity traversal finished"
    );
    traversal
}

struct Walker<'g, 'a> {
    adjacency: &'g Adjacency<'a>,
    visited_nodes: HashSet<usize>,
    visited_edges: HashSet<usize>,
    out: Traversal,
}

impl<'g, 'a> Walker<'g, 'a> {
    /// Preorder DFS from `start` with an explicit stack of
    /// (node, next outgoing position) frames.
    fn walk(&mut self, start: usize) {
        let mut stack: Vec<(usize, usize)> = Vec::new();
        if self.enter(start) {
            stack.push((start, 0));
        }

        while let Some(frame) = stack.last_mut() {
            let (node_idx, pos) = *frame;
            let Some((edge_idx, edge)) = self.adjacency.outgoing(node_idx).nth(pos) else {
                stack.pop();
                continue;
            };
            frame.1 += 1;

            if !self.visited_edges.insert(edge_idx) {
                continue;
            }

            let from = self.adjacency.nodes()[node_idx].export_key();
            let to = self.adjacency.key_of(&edge.target);
            self.out.statements.push(Statement::Link(LinkRecord {
                element: edge.label().to_string(),
                from,
                to,
            }));

            match self.adjacency.node_index(&edge.target) {
                Some(target) => {
                    if self.enter(target) {
                        stack.push((target, 0));
                    }
                }
                None => warn!(edge = %edge.id, target = %edge.target, "edge target does not exist"),
            }
        }
    }

    /// Mark a node visited and emit its own statements. Returns false if it
    /// was already visited.
    fn enter(&mut self, node_idx: usize) -> bool {
        if !self.visited_nodes.insert(node_idx) {
            return false;
        }
        let node = &self.adjacency.nodes()[node_idx];

        if node.kind().hosts_element() {
            self.out.element_at(node);
        }

        if matches!(node.kind(), NodeKind::Junction) || self.adjacency.out_degree(node_idx) > 1 {
            let key = node.export_key();
            self.out.statements.push(Statement::Junction { key: key.clone() });
            self.out.special.insert(key);
        }
        true
    }
}
