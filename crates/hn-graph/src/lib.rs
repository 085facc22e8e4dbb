//! hn-graph: graph model layer for hydronet.
//!
//! Provides:
//! - Node and edge types with per-variant property bags
//! - Auxiliary simulation entities (computational parameters, output requests)
//! - Incremental network builder with validation
//! - Adjacency index used by the INP exporter
//!
//! # Example
//!
//! ```
//! use hn_graph::{ConduitProps, EdgeData, NetworkBuilder, NodeData};
//!
//! let mut builder = NetworkBuilder::new();
//! let r1 = builder.add_node("r1", NodeData::reservoir("R1", 100.0));
//! let n2 = builder.add_node("n2", NodeData::simple("2", 90.0));
//! builder.add_edge(
//!     "e1",
//!     r1,
//!     n2,
//!     EdgeData::Conduit(ConduitProps::new("C1", 500.0, 2.0, 1200.0, 0.02)),
//! );
//! let network = builder.build().unwrap();
//!
//! assert_eq!(network.nodes().len(), 2);
//! assert_eq!(network.edges().len(), 1);
//! ```

pub mod builder;
pub mod error;
pub mod graph;
pub mod indexing;
pub mod simulation;
pub mod validate;

// Re-exports for ergonomics
pub use builder::NetworkBuilder;
pub use error::{GraphError, GraphResult};
pub use graph::{
    ConduitProps, DummyProps, Edge, EdgeData, FlowBoundaryProps, Network, Node, NodeData,
    NodeKind, Position, SchedulePoint, SurgeTankProps, VariableSection,
};
pub use indexing::Adjacency;
pub use simulation::{ComputationalParams, ElementType, OutputRequest};
pub use validate::validate_network;
