//! Integration tests for hn-graph.

use hn_core::NodeKey;
use hn_graph::{
    Adjacency, ConduitProps, DummyProps, EdgeData, GraphError, Network, NetworkBuilder, NodeData,
    NodeKind, Position,
};

fn conduit(label: &str) -> EdgeData {
    EdgeData::Conduit(ConduitProps::new(label, 100.0, 1.0, 1000.0, 0.01))
}

#[test]
fn build_minimal_network() {
    // R1 -> [C1] -> N2
    let mut builder = NetworkBuilder::new();
    let r1 = builder.add_node("r1", NodeData::reservoir("R1", 100.0).with_node_number(1));
    let n2 = builder.add_node_at("n2", Position::new(50.0, 200.0), NodeData::simple("", 90.0));
    let c1 = builder.add_edge("c1", r1.clone(), n2.clone(), conduit("C1"));

    let network = builder.build().unwrap();

    assert_eq!(network.nodes().len(), 2);
    assert_eq!(network.edges().len(), 1);

    let edge = network.edge(&c1).unwrap();
    assert_eq!(edge.source, r1);
    assert_eq!(edge.target, n2);
    assert_eq!(edge.label(), "C1");

    // empty label falls back to the id
    let node = network.node(&n2).unwrap();
    assert_eq!(node.label(), "n2");
    assert_eq!(node.position, Position::new(50.0, 200.0));
    assert_eq!(node.export_key(), NodeKey::from("n2"));
    assert_eq!(network.node(&r1).unwrap().export_key(), NodeKey::from("1"));
}

#[test]
fn chain_adjacency() {
    // N1 -> [C1] -> N2 -> [C2] -> N3, N2 -> [D1] -> N4
    let mut builder = NetworkBuilder::new();
    let n1 = builder.add_node("n1", NodeData::reservoir("R", 1.0));
    let n2 = builder.add_node("n2", NodeData::junction("J", 1.0));
    let n3 = builder.add_node("n3", NodeData::simple("A", 1.0));
    let n4 = builder.add_node("n4", NodeData::simple("B", 1.0));
    builder.add_edge("c1", n1, n2.clone(), conduit("C1"));
    builder.add_edge("c2", n2.clone(), n3, conduit("C2"));
    builder.add_edge("d1", n2, n4, EdgeData::Dummy(DummyProps::new("D1", 0.5)));
    let network = builder.build().unwrap();

    let adjacency = Adjacency::new(network.nodes(), network.edges());
    assert_eq!(adjacency.out_degree(0), 1);
    assert_eq!(adjacency.out_degree(1), 2);
    assert_eq!(adjacency.out_degree(2), 0);
    let labels: Vec<&str> = adjacency.outgoing(1).map(|(_, e)| e.label()).collect();
    assert_eq!(labels, vec!["C2", "D1"]);
}

#[test]
fn builder_rejects_dangling_endpoint() {
    let mut builder = NetworkBuilder::new();
    let a = builder.add_node("a", NodeData::simple("A", 1.0));
    builder.add_edge("e", a, "missing".into(), conduit("C1"));

    match builder.build() {
        Err(GraphError::DanglingEndpoint { edge, node, end }) => {
            assert_eq!(edge.as_str(), "e");
            assert_eq!(node.as_str(), "missing");
            assert_eq!(end, "target");
        }
        other => panic!("expected dangling endpoint, got {other:?}"),
    }
}

#[test]
fn builder_rejects_self_loop() {
    let mut builder = NetworkBuilder::new();
    let a = builder.add_node("a", NodeData::simple("A", 1.0));
    builder.add_edge("e", a.clone(), a, conduit("C1"));
    assert!(matches!(builder.build(), Err(GraphError::SelfLoop { .. })));
}

#[test]
fn node_numbers_must_not_collide() {
    let mut builder = NetworkBuilder::new();
    let a = builder.add_node("a", NodeData::simple("A", 1.0));
    builder.add_node("b", NodeData::simple("B", 1.0).with_node_number(7));
    builder.set_node_number(&a, 7);

    let err = builder.build().unwrap_err();
    assert_eq!(err.to_string(), "Nodes a and b both export as node 7");
}

#[test]
fn network_from_parts_roundtrip() {
    let mut builder = NetworkBuilder::new();
    let a = builder.add_node("a", NodeData::reservoir("R", 1.0));
    let b = builder.add_node("b", NodeData::simple("B", 1.0));
    builder.add_edge("e", a, b, conduit("C1"));
    let network = builder.build().unwrap();

    let (nodes, edges) = network.clone().into_parts();
    let rebuilt = Network::from_parts(nodes, edges).unwrap();
    assert_eq!(rebuilt, network);
    assert!(matches!(rebuilt.nodes()[0].kind(), NodeKind::Reservoir));
}

#[test]
fn editor_snapshot_deserializes() {
    let json = r#"{
        "id": "st1",
        "position": { "x": 120.5, "y": 40 },
        "data": {
            "type": "surgeTank",
            "label": "ST",
            "nodeNumber": 12,
            "topElevation": 130,
            "bottomElevation": 70,
            "diameter": 12,
            "celerity": 1000,
            "friction": 0.012
        }
    }"#;
    let node: hn_graph::Node = serde_json::from_str(json).unwrap();
    assert_eq!(node.export_key(), NodeKey::from("12"));
    match node.kind() {
        NodeKind::SurgeTank(st) => assert_eq!(st.top_elevation, 130.0),
        other => panic!("unexpected kind {other:?}"),
    }
}
