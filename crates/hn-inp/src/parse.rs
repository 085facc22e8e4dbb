//! Best-effort INP reader.
//!
//! Recovers reservoirs and conduits (regular and dummy) from INP text. The
//! result is a seed, not a round trip: edges come back with empty source and
//! target because LINK statements are not interpreted. Anything the reader
//! does not recognise is skipped silently.

use std::collections::HashMap;

use hn_core::{ElementId, Real, parse_real};
use hn_graph::{ConduitProps, DummyProps, Edge, EdgeData, Node, NodeData, Position, VariableSection};
use tracing::debug;

/// Nodes and edges recovered from INP text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InpFragment {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl InpFragment {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

/// Keywords that open a new block; a conduit body never runs past one.
const BLOCK_KEYWORDS: [&str; 10] = [
    "RESERVOIR",
    "CONDUIT",
    "SURGETANK",
    "FLOWBC",
    "SCHEDULE",
    "SYSTEM",
    "CONTROL",
    "HISTORY",
    "GO",
    "GOODBYE",
];

/// Parse INP text into a partial graph fragment.
///
/// Two passes: first every `NODE <key> ELEV <value>` line is collected into
/// an elevation lookup, then blocks are read sequentially.
pub fn parse(text: &str) -> InpFragment {
    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    let elevations = collect_elevations(&lines);

    let mut fragment = InpFragment::default();
    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        i += 1;
        if line.is_empty() || is_comment(line) {
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            ["RESERVOIR", ..] => {
                i = read_reservoir(&lines, i, &elevations, &mut fragment);
            }
            ["CONDUIT", "ID", label, rest @ ..] => {
                let label = label.to_string();
                let (body, next) = collect_body(&lines, i, rest);
                i = next;
                push_conduit(&mut fragment, label, &body);
            }
            ["CONDUIT"] => {
                let label = lines
                    .get(i)
                    .map(|l| l.split_whitespace().collect::<Vec<_>>());
                match label.as_deref() {
                    Some(["ID", label, rest @ ..]) => {
                        let label = label.to_string();
                        let (body, next) = collect_body(&lines, i + 1, rest);
                        i = next;
                        push_conduit(&mut fragment, label, &body);
                    }
                    _ => debug!(line = i, "CONDUIT block without ID line"),
                }
            }
            _ => {}
        }
    }

    debug!(
        nodes = fragment.nodes.len(),
        edges = fragment.edges.len(),
        "INP text parsed"
    );
    fragment
}

/// `c` or `C` as the first token marks a comment line.
fn is_comment(line: &str) -> bool {
    matches!(line.split_whitespace().next(), Some("c" | "C"))
}

fn collect_elevations(lines: &[&str]) -> HashMap<String, Real> {
    let mut elevations = HashMap::new();
    for line in lines {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if let ["NODE", key, "ELEV", value, ..] = tokens.as_slice() {
            if let Some(elevation) = parse_real(value) {
                elevations.insert(key.to_string(), elevation);
            }
        }
    }
    elevations
}

/// Read the `ID` and `ELEV` lines following `RESERVOIR`. Returns the index
/// of the first unconsumed line.
fn read_reservoir(
    lines: &[&str],
    mut i: usize,
    elevations: &HashMap<String, Real>,
    fragment: &mut InpFragment,
) -> usize {
    let label = match lines.get(i).and_then(|l| keyword_value(l, "ID")) {
        Some(label) => label.to_string(),
        None => {
            debug!(line = i, "RESERVOIR block without ID line");
            return i;
        }
    };
    i += 1;

    let mut elevation = None;
    if let Some(value) = lines.get(i).and_then(|l| keyword_value(l, "ELEV")) {
        elevation = parse_real(value);
        i += 1;
    }

    let ordinal = fragment.nodes.len();
    let node_number = label
        .parse::<i64>()
        .ok()
        .filter(|n| *n != 0)
        .unwrap_or(ordinal as i64 + 1);
    let elevation = elevation.or_else(|| elevations.get(&node_number.to_string()).copied());

    let mut data = NodeData::reservoir(label.clone(), 0.0).with_node_number(node_number);
    data.elevation = elevation;
    fragment.nodes.push(Node {
        id: ElementId::new(label),
        position: Position::new(50.0, 100.0 + 100.0 * ordinal as Real),
        data,
    });
    i
}

/// `ID R1` with keyword `ID` yields `R1`.
fn keyword_value<'l>(line: &'l str, keyword: &str) -> Option<&'l str> {
    let mut tokens = line.split_whitespace();
    match (tokens.next(), tokens.next()) {
        (Some(k), Some(v)) if k == keyword => Some(v),
        _ => None,
    }
}

/// Gather the tokens of a conduit body: the remainder of the header line
/// plus following lines up to and including `FINISH`. Stops early at a blank
/// line or at a line opening another block.
fn collect_body<'l>(lines: &[&'l str], mut i: usize, head: &[&'l str]) -> (Vec<&'l str>, usize) {
    let mut body: Vec<&'l str> = head.to_vec();
    if body.contains(&"FINISH") {
        return (body, i);
    }
    while let Some(line) = lines.get(i) {
        if line.is_empty() {
            break;
        }
        if is_comment(line) {
            i += 1;
            continue;
        }
        let first = line.split_whitespace().next().unwrap_or_default();
        if BLOCK_KEYWORDS.contains(&first) {
            break;
        }
        i += 1;
        body.extend(line.split_whitespace());
        if line.split_whitespace().any(|t| t == "FINISH") {
            break;
        }
    }
    (body, i)
}

/// Value following the first of `keys` found in `body`.
fn value_of(body: &[&str], keys: &[&str]) -> Option<Real> {
    let pos = body.iter().position(|t| keys.contains(t))?;
    body.get(pos + 1).and_then(|v| parse_real(v))
}

fn push_conduit(fragment: &mut InpFragment, label: String, body: &[&str]) {
    let id = ElementId::new(format!("edge-{label}"));
    let cplus = value_of(body, &["CPLUS"]);
    let cminus = value_of(body, &["CMINUS"]);

    let data = if body.contains(&"DUMMY") {
        let Some(diameter) = value_of(body, &["DIAMETER", "DIAM"]) else {
            debug!(%label, "dummy conduit without diameter");
            return;
        };
        EdgeData::Dummy(DummyProps::new(label, diameter).with_added_loss(cplus, cminus))
    } else {
        let variable = read_variable(body);
        let length = value_of(body, &["LENG", "LENGTH"]);
        let diameter = value_of(body, &["DIAM", "DIAMETER"]).or(variable.map(|v| v.d));
        let celerity = value_of(body, &["CELE", "CELERITY"]);
        let friction = value_of(body, &["FRIC", "FRICTION"]);
        let (Some(length), Some(diameter), Some(celerity), Some(friction)) =
            (length, diameter, celerity, friction)
        else {
            debug!(%label, "conduit without length, diameter, celerity or friction");
            return;
        };

        let mut props = ConduitProps::new(label, length, diameter, celerity, friction)
            .with_added_loss(cplus, cminus);
        props.variable = variable;
        props.num_segments = value_of(body, &["NUMSEG"]).map(|n| n as u32);
        EdgeData::Conduit(props)
    };

    fragment.edges.push(Edge {
        id,
        source: ElementId::default(),
        target: ElementId::default(),
        data,
    });
}

fn read_variable(body: &[&str]) -> Option<VariableSection> {
    if !body.contains(&"VARIABLE") {
        return None;
    }
    Some(VariableSection {
        distance: value_of(body, &["DISTANCE"])?,
        area: value_of(body, &["AREA"])?,
        d: value_of(body, &["D"])?,
        a: value_of(body, &["A"])?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hn_graph::NodeKind;

    #[test]
    fn comment_detection_is_by_token() {
        assert!(is_comment("c a comment"));
        assert!(is_comment("C  SYSTEM CONNECTIVITY"));
        assert!(is_comment("C"));
        assert!(!is_comment("CONDUIT ID C1"));
        assert!(!is_comment("cplus"));
    }

    #[test]
    fn reservoir_elevation_falls_back_to_node_lookup() {
        let text = "NODE 1 ELEV 4022.31\nRESERVOIR\n ID 1\n FINISH\n";
        let fragment = parse(text);
        assert_eq!(fragment.nodes.len(), 1);
        assert_eq!(fragment.nodes[0].data.elevation, Some(4022.31));
        assert_eq!(fragment.nodes[0].data.node_number, Some(1));
    }

    #[test]
    fn reservoir_numbering_and_layout() {
        let text = "RESERVOIR\n ID UP\n ELEV 10\n FINISH\n\nRESERVOIR\n ID DOWN\n ELEV 5\n FINISH\n";
        let fragment = parse(text);
        assert_eq!(fragment.nodes.len(), 2);
        assert_eq!(fragment.nodes[1].id.as_str(), "DOWN");
        assert_eq!(fragment.nodes[1].data.node_number, Some(2));
        assert_eq!(fragment.nodes[1].position, Position::new(50.0, 200.0));
        assert_eq!(fragment.nodes[1].kind(), &NodeKind::Reservoir);
    }

    #[test]
    fn single_line_conduit_with_added_loss_line() {
        let text = "CONDUIT ID C1 LENG 13405.51 DIAM 34.45 CELE 2852.51 FRIC 0.008\nADDEDLOSS CPLUS 0.5 CMINUS 0.7 NUMSEG 3 FINISH\n";
        let fragment = parse(text);
        assert_eq!(fragment.edges.len(), 1);
        match &fragment.edges[0].data {
            EdgeData::Conduit(c) => {
                assert_eq!(c.length, 13405.51);
                assert_eq!(c.cplus, Some(0.5));
                assert_eq!(c.cminus, Some(0.7));
                assert_eq!(c.num_segments, Some(3));
            }
            other => panic!("unexpected edge {other:?}"),
        }
    }

    #[test]
    fn dummy_block() {
        let text = "CONDUIT ID D1\n DUMMY\n DIAMETER 3.5\n ADDEDLOSS\n CPLUS 0.1\nFINISH\n";
        let fragment = parse(text);
        assert_eq!(fragment.edges.len(), 1);
        assert_eq!(fragment.edges[0].id.as_str(), "edge-D1");
        match &fragment.edges[0].data {
            EdgeData::Dummy(d) => {
                assert_eq!(d.label, "D1");
                assert_eq!(d.diameter, 3.5);
                assert_eq!(d.cplus, Some(0.1));
            }
            other => panic!("unexpected edge {other:?}"),
        }
    }

    #[test]
    fn multi_line_conduit_block() {
        let text = "CONDUIT\n ID C2\n LENGTH 200\n DIAM 1.5\n CELERITY 1100\n FRICTION 0.015\n FINISH\n";
        let fragment = parse(text);
        assert_eq!(fragment.edges.len(), 1);
        assert_eq!(fragment.edges[0].label(), "C2");
        assert!(fragment.edges[0].source.is_empty());
    }

    #[test]
    fn incomplete_conduit_is_skipped() {
        let fragment = parse("CONDUIT ID C1 LENG 10 FINISH\n");
        assert!(fragment.is_empty());
    }

    #[test]
    fn unknown_lines_are_ignored() {
        let fragment = parse("SURGETANK\n ID ST SIMPLE\nFINISH\nGARBAGE 1 2 3\n");
        assert!(fragment.is_empty());
    }
}
