//! Project snapshot schema.
//!
//! Field names follow the network editor's JSON shape:
//!
//! ```json
//! {
//!   "projectName": "Plant A",
//!   "nodes": [{ "id": "r1", "position": { "x": 0, "y": 0 },
//!               "data": { "type": "reservoir", "label": "R1", "elevation": 100 } }],
//!   "edges": [],
//!   "computationalParams": { "dtcomp": 0.01, "dtout": 0.1, "tmax": 500 },
//!   "outputRequests": []
//! }
//! ```

use hn_graph::{ComputationalParams, Edge, GraphResult, Network, Node, OutputRequest};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Empty when the snapshot carries no `projectName`.
    #[serde(rename = "projectName", default)]
    pub name: String,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
    #[serde(default)]
    pub computational_params: ComputationalParams,
    #[serde(default)]
    pub output_requests: Vec<OutputRequest>,
}

impl Project {
    /// Empty project with default computational parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: Vec::new(),
            edges: Vec::new(),
            computational_params: ComputationalParams::default(),
            output_requests: Vec::new(),
        }
    }

    /// Project seeded from imported elements, with default parameters and no
    /// output requests.
    pub fn seed(name: impl Into<String>, nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self {
            nodes,
            edges,
            ..Self::new(name)
        }
    }

    /// An edge with neither endpoint set, as produced by INP import. It stays
    /// in the project until re-wired but takes no part in the network.
    pub fn is_unwired(edge: &Edge) -> bool {
        edge.source.is_empty() && edge.target.is_empty()
    }

    pub fn wired_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(|e| !Self::is_unwired(e))
    }

    pub fn unwired_edge_count(&self) -> usize {
        self.edges.iter().filter(|e| Self::is_unwired(e)).count()
    }

    /// Validated network of all nodes and the wired edges.
    pub fn network(&self) -> GraphResult<Network> {
        Network::from_parts(self.nodes.clone(), self.wired_edges().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hn_graph::{ConduitProps, EdgeData, NodeData};

    #[test]
    fn editor_json_shape() {
        let json = r#"{
            "projectName": "Plant A",
            "nodes": [
                { "id": "r1", "position": { "x": 10, "y": 20 },
                  "data": { "type": "reservoir", "label": "R1", "elevation": 100, "nodeNumber": 1 } }
            ],
            "edges": [],
            "outputRequests": [
                { "elementType": "node", "elementId": "r1", "variables": ["Q", "HEAD"] }
            ]
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.name, "Plant A");
        assert_eq!(project.nodes[0].data.node_number, Some(1));
        assert_eq!(project.computational_params, ComputationalParams::default());
        assert_eq!(project.output_requests[0].category, "HISTORY");

        let back = serde_json::to_value(&project).unwrap();
        assert_eq!(back["projectName"], "Plant A");
        assert!(back.get("computationalParams").is_some());
    }

    #[test]
    fn project_name_is_optional() {
        let project: Project = serde_json::from_str(r#"{ "nodes": [] }"#).unwrap();
        assert!(project.name.is_empty());
    }

    #[test]
    fn unwired_edges_are_left_out_of_the_network() {
        let mut project = Project::seed(
            "seed",
            vec![Node::new("r1", NodeData::reservoir("R1", 100.0))],
            vec![Edge::new(
                "edge-C1",
                "",
                "",
                EdgeData::Conduit(ConduitProps::new("C1", 500.0, 2.0, 1200.0, 0.02)),
            )],
        );
        assert_eq!(project.unwired_edge_count(), 1);
        assert_eq!(project.network().unwrap().edges().len(), 0);

        project.nodes.push(Node::new("n2", NodeData::simple("N2", 90.0)));
        project.edges[0].source = "r1".into();
        project.edges[0].target = "n2".into();
        assert_eq!(project.unwired_edge_count(), 0);
        assert_eq!(project.network().unwrap().edges().len(), 1);
    }
}
