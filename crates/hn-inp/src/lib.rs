//! hn-inp: translation between the network graph and the legacy INP text format.
//!
//! Export runs in three stages over an immutable snapshot:
//! 1. [`traverse`] walks the network from every reservoir and records the
//!    connectivity statements plus the set of special node keys.
//! 2. [`select_nodes_to_declare`] decides which node keys need an explicit
//!    `NODE … ELEV …` declaration.
//! 3. [`generate`] renders every section of the file.
//!
//! [`parse`] goes the other way, best-effort and partial: it recovers
//! reservoirs and conduits but no topology.
//!
//! # Example
//!
//! ```
//! use hn_graph::{ComputationalParams, ConduitProps, EdgeData, NetworkBuilder, NodeData};
//! use hn_inp::{ExportInput, generate};
//!
//! let mut b = NetworkBuilder::new();
//! let r1 = b.add_node("r1", NodeData::reservoir("R1", 100.0).with_node_number(1));
//! let n2 = b.add_node("n2", NodeData::simple("2", 90.0).with_node_number(2));
//! b.add_edge("c1", r1, n2, EdgeData::Conduit(ConduitProps::new("C1", 500.0, 2.0, 1200.0, 0.02)));
//! let network = b.build().unwrap();
//!
//! let params = ComputationalParams::default();
//! let text = generate(&ExportInput::new(&network, &params, &[]));
//! assert!(text.contains("ELEM C1 LINK 1 2"));
//! ```

pub mod emit;
pub mod parse;
pub mod select;
pub mod traverse;

pub use emit::{DEFAULT_SCHEDULE, DEFAULT_TITLE, ExportInput, generate};
pub use parse::{InpFragment, parse};
pub use select::select_nodes_to_declare;
pub use traverse::{LinkRecord, Statement, Traversal, traverse};
