//! INP section rendering.
//!
//! The complete file is a pure function of the nodes, edges, computational
//! parameters and output requests handed in; nothing is read from ambient
//! state and no input is modified.

use std::collections::{BTreeSet, HashMap, HashSet};

use hn_core::NodeKey;
use hn_graph::{
    Adjacency, ComputationalParams, ConduitProps, DummyProps, Edge, EdgeData, ElementType,
    FlowBoundaryProps, Network, Node, NodeKind, OutputRequest, SurgeTankProps,
};
use tracing::debug;

use crate::select::select_nodes_to_declare;
use crate::traverse::{Traversal, traverse};

/// Banner title used when the caller has none.
pub const DEFAULT_TITLE: &str = "Project Name";

/// Schedule written for a flow boundary without schedule points.
pub const DEFAULT_SCHEDULE: &str = "T 0 Q 3000 T 20 Q 0 T 3000 Q 0";

/// Output request block written when no requests exist.
const DEFAULT_OUTPUT_REQUEST: [&str; 4] = ["HISTORY", " NODE 2 Q HEAD", " ELEM ST Q ELEV", " FINISH"];

/// Everything the exporter reads.
#[derive(Debug, Clone, Copy)]
pub struct ExportInput<'a> {
    pub nodes: &'a [Node],
    pub edges: &'a [Edge],
    pub params: &'a ComputationalParams,
    pub requests: &'a [OutputRequest],
    /// Text of the leading `c <title>` banner.
    pub title: &'a str,
}

impl<'a> ExportInput<'a> {
    pub fn new(
        network: &'a Network,
        params: &'a ComputationalParams,
        requests: &'a [OutputRequest],
    ) -> Self {
        Self {
            nodes: network.nodes(),
            edges: network.edges(),
            params,
            requests,
            title: DEFAULT_TITLE,
        }
    }

    pub fn with_title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }
}

/// Render the complete INP text.
pub fn generate(input: &ExportInput<'_>) -> String {
    let adjacency = Adjacency::new(input.nodes, input.edges);
    let traversal = traverse(input.nodes, input.edges);
    let links: Vec<_> = traversal.links().cloned().collect();
    let declared = select_nodes_to_declare(&links, &traversal.special);

    let mut w = InpWriter::default();
    write_system(&mut w, input.title, input.nodes, &traversal, &declared);
    write_elements(&mut w, input.nodes, input.edges);
    write_schedules(&mut w, input.nodes);
    write_output_requests(&mut w, &adjacency, input.requests);
    write_control(&mut w, input.params);

    debug!(
        nodes = input.nodes.len(),
        edges = input.edges.len(),
        declared = declared.len(),
        lines = w.lines.len(),
        "INP text generated"
    );
    w.finish()
}

/// Line buffer with the comment convention of the format.
#[derive(Debug, Default)]
struct InpWriter {
    lines: Vec<String>,
}

impl InpWriter {
    fn line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// `c <comment>` before an element block, when there is one.
    fn comment(&mut self, comment: Option<&str>) {
        if let Some(comment) = comment.filter(|c| !c.trim().is_empty()) {
            self.line(format!("c {comment}"));
        }
    }

    fn finish(self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}

fn write_system(
    w: &mut InpWriter,
    title: &str,
    nodes: &[Node],
    traversal: &Traversal,
    declared: &BTreeSet<NodeKey>,
) {
    w.line(format!("c {title}"));
    w.line("C  SYSTEM CONNECTIVITY");
    w.blank();
    w.line("SYSTEM");
    w.blank();
    for line in traversal.lines() {
        w.line(line);
    }
    w.blank();

    let mut by_key: HashMap<NodeKey, &Node> = HashMap::new();
    for node in nodes {
        by_key.entry(node.export_key()).or_insert(node);
    }
    for key in declared {
        if let Some(elevation) = by_key.get(key).and_then(|n| n.data.elevation) {
            w.line(format!("NODE {key} ELEV {elevation:.1}"));
        }
    }

    w.blank();
    w.line("FINISH");
    w.blank();
}

fn write_elements(w: &mut InpWriter, nodes: &[Node], edges: &[Edge]) {
    w.line("C ELEMENT PROPERTIES");
    w.blank();

    for node in nodes {
        if matches!(node.kind(), NodeKind::Reservoir) {
            write_reservoir(w, node);
        }
    }

    // Duplicate labels are exported once, first occurrence wins
    let mut exported: HashSet<&str> = HashSet::new();
    for edge in edges {
        if let EdgeData::Conduit(props) = &edge.data {
            if exported.insert(edge.label()) {
                write_conduit(w, edge.label(), props);
            }
        }
    }
    for edge in edges {
        if let EdgeData::Dummy(props) = &edge.data {
            if exported.insert(edge.label()) {
                write_dummy(w, edge.label(), props);
            }
        }
    }

    for node in nodes {
        if let NodeKind::SurgeTank(props) = node.kind() {
            write_surge_tank(w, node, props);
        }
    }
    for node in nodes {
        if let NodeKind::FlowBoundary(props) = node.kind() {
            write_flow_boundary(w, node, props);
        }
    }
}

fn write_reservoir(w: &mut InpWriter, node: &Node) {
    w.comment(node.data.comment.as_deref());
    w.line("RESERVOIR");
    w.line(format!(" ID {}", node.label()));
    if let Some(elevation) = node.data.elevation {
        w.line(format!(" ELEV {elevation}"));
    }
    w.line(" FINISH");
    w.blank();
}

fn write_conduit(w: &mut InpWriter, label: &str, c: &ConduitProps) {
    w.comment(c.comment.as_deref());
    w.line("CONDUIT");
    w.line(format!(" ID {label}"));
    if let Some(v) = &c.variable {
        w.line(" VARIABLE");
        w.line(format!("  DISTANCE {}", v.distance));
        w.line(format!("  AREA {}", v.area));
        w.line(format!("  D {}", v.d));
        w.line(format!("  A {}", v.a));
    }
    w.line(format!(" LENGTH {}", c.length));
    if c.variable.is_none() {
        w.line(format!(" DIAM {}", c.diameter));
    }
    w.line(format!(" CELERITY {}", c.celerity));
    w.line(format!(" FRICTION {}", c.friction));
    if c.cplus.is_some() || c.cminus.is_some() {
        w.line(" ADDEDLOSS");
        if let Some(cplus) = c.cplus {
            w.line(format!("  CPLUS {cplus:.2}"));
        }
        if let Some(cminus) = c.cminus {
            w.line(format!("  CMINUS {cminus:.2}"));
        }
    }
    if let Some(segments) = c.num_segments {
        w.line(format!(" NUMSEG {segments}"));
    }
    w.line(" FINISH");
    w.blank();
}

fn write_dummy(w: &mut InpWriter, label: &str, d: &DummyProps) {
    w.comment(d.comment.as_deref());
    w.line(format!("CONDUIT ID {label}"));
    w.line(" DUMMY");
    w.line(format!(" DIAMETER {}", d.diameter));
    w.line(" ADDEDLOSS");
    if let Some(cplus) = d.cplus {
        w.line(format!(" CPLUS {cplus}"));
    }
    if let Some(cminus) = d.cminus {
        w.line(format!(" CMINUS {cminus}"));
    }
    w.line("FINISH");
    w.blank();
}

fn write_surge_tank(w: &mut InpWriter, node: &Node, st: &SurgeTankProps) {
    w.comment(node.data.comment.as_deref());
    w.line("SURGETANK");
    w.line(format!(" ID {} SIMPLE", node.label()));
    w.line(format!(" ELTOP {}", st.top_elevation));
    w.line(format!(" ELBOTTOM {}", st.bottom_elevation));
    w.line(format!(" DIAM {}", st.diameter));
    w.line(format!(" CELERITY {}", st.celerity));
    w.line(format!(" FRICTION {}", st.friction));
    w.line("FINISH");
    w.blank();
}

fn write_flow_boundary(w: &mut InpWriter, node: &Node, fb: &FlowBoundaryProps) {
    w.comment(node.data.comment.as_deref());
    w.line(format!(
        "FLOWBC ID {} QSCHEDULE {} FINISH",
        node.label(),
        fb.schedule_number
    ));
}

fn write_schedules(w: &mut InpWriter, nodes: &[Node]) {
    w.blank();
    w.blank();
    w.line("SCHEDULE");
    for node in nodes {
        if let NodeKind::FlowBoundary(fb) = node.kind() {
            let points = if fb.schedule_points.is_empty() {
                DEFAULT_SCHEDULE.to_string()
            } else {
                fb.schedule_points
                    .iter()
                    .map(|p| format!("T {} Q {}", p.time, p.flow))
                    .collect::<Vec<_>>()
                    .join(" ")
            };
            w.line(format!(" QSCHEDULE {} {}", fb.schedule_number, points));
        }
    }
    w.blank();
    w.line("FINISH");
    w.blank();
    w.blank();
}

fn write_output_requests(w: &mut InpWriter, adjacency: &Adjacency<'_>, requests: &[OutputRequest]) {
    w.line("C OUTPUT REQUEST");
    w.blank();

    if requests.is_empty() {
        for line in DEFAULT_OUTPUT_REQUEST {
            w.line(line);
        }
    } else {
        // Group by category, first appearance first
        let mut groups: Vec<(&str, Vec<&OutputRequest>)> = Vec::new();
        for req in requests {
            match groups.iter_mut().find(|(cat, _)| *cat == req.category) {
                Some((_, members)) => members.push(req),
                None => groups.push((req.category.as_str(), vec![req])),
            }
        }

        for (category, members) in &groups {
            w.line(*category);
            for req in members {
                w.line(format!(" {}", request_line(adjacency, req)));
            }
            w.line(" FINISH");
        }

        if groups.len() > 1 {
            w.line("DISPLAY");
            w.line(" ALL");
            w.line(" FINISH");
        }
    }
    w.blank();
    w.blank();
}

/// `NODE <key> <vars…>` or `ELEM <label> <vars…>`. Surge tanks are
/// referenced as elements by label.
fn request_line(adjacency: &Adjacency<'_>, req: &OutputRequest) -> String {
    let target = match req.element_type {
        ElementType::Node => match adjacency.node(&req.element_id) {
            Some(node) if matches!(node.kind(), NodeKind::SurgeTank(_)) => {
                format!("ELEM {}", node.label())
            }
            Some(node) => format!("NODE {}", node.export_key()),
            None => format!("NODE {}", req.element_id),
        },
        ElementType::Edge => match adjacency.edge(&req.element_id) {
            Some(edge) => format!("ELEM {}", edge.label()),
            None => format!("ELEM {}", req.element_id),
        },
    };

    if req.variables.is_empty() {
        target
    } else {
        format!("{} {}", target, req.variables.join(" "))
    }
}

fn write_control(w: &mut InpWriter, params: &ComputationalParams) {
    w.line("C COMPUTATIONAL PARAMETERS");
    w.line("CONTROL");
    w.line(format!(
        " DTCOMP {} DTOUT {} TMAX {}",
        params.dtcomp, params.dtout, params.tmax
    ));
    w.line("FINISH");
    w.blank();
    w.line("C EXECUTION CONTROL");
    w.line("GO");
    w.line("GOODBYE");
}

#[cfg(test)]
mod tests {
    use super::*;
    use hn_graph::{NodeData, VariableSection};

    fn conduit_block(props: ConduitProps) -> Vec<String> {
        let mut w = InpWriter::default();
        write_conduit(&mut w, "C1", &props);
        w.lines
    }

    #[test]
    fn plain_conduit_block() {
        let lines = conduit_block(ConduitProps::new("C1", 500.0, 2.0, 1200.0, 0.02));
        assert_eq!(
            lines,
            vec![
                "CONDUIT",
                " ID C1",
                " LENGTH 500",
                " DIAM 2",
                " CELERITY 1200",
                " FRICTION 0.02",
                " FINISH",
                "",
            ]
        );
    }

    #[test]
    fn conduit_with_variable_section_and_losses() {
        let props = ConduitProps::new("C1", 500.0, 2.0, 1200.0, 0.02)
            .with_variable(VariableSection {
                distance: 100.0,
                area: 3.5,
                d: 2.1,
                a: 3.46,
            })
            .with_added_loss(Some(0.5), Some(1.0 / 3.0))
            .with_segments(4)
            .with_comment("penstock");
        let lines = conduit_block(props);
        assert_eq!(
            lines,
            vec![
                "c penstock",
                "CONDUIT",
                " ID C1",
                " VARIABLE",
                "  DISTANCE 100",
                "  AREA 3.5",
                "  D 2.1",
                "  A 3.46",
                " LENGTH 500",
                " CELERITY 1200",
                " FRICTION 0.02",
                " ADDEDLOSS",
                "  CPLUS 0.50",
                "  CMINUS 0.33",
                " NUMSEG 4",
                " FINISH",
                "",
            ]
        );
    }

    #[test]
    fn dummy_block() {
        let mut w = InpWriter::default();
        write_dummy(
            &mut w,
            "D1",
            &DummyProps::new("D1", 3.0).with_added_loss(Some(0.1), None),
        );
        assert_eq!(
            w.lines,
            vec!["CONDUIT ID D1", " DUMMY", " DIAMETER 3", " ADDEDLOSS", " CPLUS 0.1", "FINISH", ""]
        );
    }

    #[test]
    fn empty_comment_is_not_written() {
        let mut w = InpWriter::default();
        w.comment(Some("   "));
        w.comment(None);
        assert!(w.lines.is_empty());
    }

    #[test]
    fn comment_is_written_verbatim() {
        let mut w = InpWriter::default();
        w.comment(Some("  intake  works "));
        assert_eq!(w.lines, vec!["c   intake  works "]);
    }

    #[test]
    fn surge_tank_request_uses_label() {
        let nodes = vec![
            Node::new(
                "st",
                NodeData::surge_tank(
                    "ST1",
                    SurgeTankProps {
                        top_elevation: 1.0,
                        bottom_elevation: 0.0,
                        diameter: 1.0,
                        celerity: 1.0,
                        friction: 0.1,
                    },
                )
                .with_node_number(5),
            ),
            Node::new("n", NodeData::simple("N", 1.0).with_node_number(6)),
        ];
        let adjacency = Adjacency::new(&nodes, &[]);

        let st = OutputRequest::node("st", &["Q", "ELEV"]);
        assert_eq!(request_line(&adjacency, &st), "ELEM ST1 Q ELEV");

        let n = OutputRequest::node("n", &["HEAD"]);
        assert_eq!(request_line(&adjacency, &n), "NODE 6 HEAD");

        let missing = OutputRequest::edge("gone", &["Q"]);
        assert_eq!(request_line(&adjacency, &missing), "ELEM gone Q");
    }
}
