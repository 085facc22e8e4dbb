//! Core graph data structures.
//!
//! The serialized shape follows the editor's snapshot format: every node and
//! edge carries a `data` bag whose `type` tag selects the variant.

use hn_core::{ElementId, NodeKey, Real};
use serde::{Deserialize, Serialize};

/// Canvas position. Layout only; the exporter ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: Real,
    pub y: Real,
}

impl Position {
    pub fn new(x: Real, y: Real) -> Self {
        Self { x, y }
    }
}

/// One (time, flow) pair of a flow boundary schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SchedulePoint {
    pub time: Real,
    pub flow: Real,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurgeTankProps {
    pub top_elevation: Real,
    pub bottom_elevation: Real,
    pub diameter: Real,
    pub celerity: Real,
    pub friction: Real,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowBoundaryProps {
    #[serde(default = "default_schedule_number")]
    pub schedule_number: u32,
    /// Empty means the exporter substitutes its default schedule.
    #[serde(default)]
    pub schedule_points: Vec<SchedulePoint>,
}

fn default_schedule_number() -> u32 {
    1
}

impl FlowBoundaryProps {
    pub fn new(schedule_number: u32) -> Self {
        Self {
            schedule_number,
            schedule_points: Vec::new(),
        }
    }

    pub fn with_point(mut self, time: Real, flow: Real) -> Self {
        self.schedule_points.push(SchedulePoint { time, flow });
        self
    }
}

/// Node variant tag plus the properties only that variant carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NodeKind {
    Reservoir,
    #[serde(rename = "node")]
    Simple,
    Junction,
    SurgeTank(SurgeTankProps),
    FlowBoundary(FlowBoundaryProps),
}

impl NodeKind {
    /// Short lowercase name, matching the serialized tag.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Reservoir => "reservoir",
            NodeKind::Simple => "node",
            NodeKind::Junction => "junction",
            NodeKind::SurgeTank(_) => "surgeTank",
            NodeKind::FlowBoundary(_) => "flowBoundary",
        }
    }

    /// Reservoirs, surge tanks and flow boundaries host an element at their node.
    pub fn hosts_element(&self) -> bool {
        matches!(
            self,
            NodeKind::Reservoir | NodeKind::SurgeTank(_) | NodeKind::FlowBoundary(_)
        )
    }
}

/// Property bag shared by every node variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_number: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<Real>,
    #[serde(flatten)]
    pub kind: NodeKind,
}

impl NodeData {
    fn with_kind(label: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            label: label.into(),
            comment: None,
            node_number: None,
            elevation: None,
            kind,
        }
    }

    pub fn reservoir(label: impl Into<String>, elevation: Real) -> Self {
        Self::with_kind(label, NodeKind::Reservoir).with_elevation(elevation)
    }

    pub fn simple(label: impl Into<String>, elevation: Real) -> Self {
        Self::with_kind(label, NodeKind::Simple).with_elevation(elevation)
    }

    pub fn junction(label: impl Into<String>, elevation: Real) -> Self {
        Self::with_kind(label, NodeKind::Junction).with_elevation(elevation)
    }

    pub fn surge_tank(label: impl Into<String>, props: SurgeTankProps) -> Self {
        Self::with_kind(label, NodeKind::SurgeTank(props))
    }

    pub fn flow_boundary(label: impl Into<String>, props: FlowBoundaryProps) -> Self {
        Self::with_kind(label, NodeKind::FlowBoundary(props))
    }

    pub fn with_elevation(mut self, elevation: Real) -> Self {
        self.elevation = Some(elevation);
        self
    }

    pub fn with_node_number(mut self, number: i64) -> Self {
        self.node_number = Some(number);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// A node of the hydraulic network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: ElementId,
    #[serde(default)]
    pub position: Position,
    pub data: NodeData,
}

impl Node {
    pub fn new(id: impl Into<ElementId>, data: NodeData) -> Self {
        Self {
            id: id.into(),
            position: Position::default(),
            data,
        }
    }

    pub fn kind(&self) -> &NodeKind {
        &self.data.kind
    }

    /// Key written into the INP file: the node number if set and non-zero,
    /// else the id.
    pub fn export_key(&self) -> NodeKey {
        match self.data.node_number {
            Some(number) if number != 0 => NodeKey::new(number.to_string()),
            _ => NodeKey::from(&self.id),
        }
    }

    /// Display label, falling back to the id when no label was given.
    pub fn label(&self) -> &str {
        if self.data.label.is_empty() {
            self.id.as_str()
        } else {
            &self.data.label
        }
    }
}

/// Optional cross-section change along a conduit.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VariableSection {
    pub distance: Real,
    pub area: Real,
    pub d: Real,
    pub a: Real,
}

/// Conduit properties. On the wire the variable section is a `variable`
/// flag with `distance`, `area`, `d` and `a` as flat siblings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ConduitRecord", into = "ConduitRecord")]
pub struct ConduitProps {
    pub label: String,
    pub length: Real,
    pub diameter: Real,
    pub celerity: Real,
    pub friction: Real,
    /// Unset means a single segment.
    pub num_segments: Option<u32>,
    pub cplus: Option<Real>,
    pub cminus: Option<Real>,
    pub variable: Option<VariableSection>,
    pub comment: Option<String>,
}

/// Flat serialized form of [`ConduitProps`]. Section fields are kept only
/// while the flag is set; a missing field under a set flag reads as zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConduitRecord {
    #[serde(default)]
    label: String,
    length: Real,
    diameter: Real,
    celerity: Real,
    friction: Real,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    num_segments: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cplus: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cminus: Option<Real>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    variable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    distance: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    area: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    d: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    a: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
}

impl From<ConduitRecord> for ConduitProps {
    fn from(r: ConduitRecord) -> Self {
        let variable = r.variable.then(|| VariableSection {
            distance: r.distance.unwrap_or_default(),
            area: r.area.unwrap_or_default(),
            d: r.d.unwrap_or_default(),
            a: r.a.unwrap_or_default(),
        });
        Self {
            label: r.label,
            length: r.length,
            diameter: r.diameter,
            celerity: r.celerity,
            friction: r.friction,
            num_segments: r.num_segments,
            cplus: r.cplus,
            cminus: r.cminus,
            variable,
            comment: r.comment,
        }
    }
}

impl From<ConduitProps> for ConduitRecord {
    fn from(c: ConduitProps) -> Self {
        let v = c.variable;
        Self {
            label: c.label,
            length: c.length,
            diameter: c.diameter,
            celerity: c.celerity,
            friction: c.friction,
            num_segments: c.num_segments,
            cplus: c.cplus,
            cminus: c.cminus,
            variable: v.is_some(),
            distance: v.map(|v| v.distance),
            area: v.map(|v| v.area),
            d: v.map(|v| v.d),
            a: v.map(|v| v.a),
            comment: c.comment,
        }
    }
}

impl ConduitProps {
    pub fn new(
        label: impl Into<String>,
        length: Real,
        diameter: Real,
        celerity: Real,
        friction: Real,
    ) -> Self {
        Self {
            label: label.into(),
            length,
            diameter,
            celerity,
            friction,
            num_segments: None,
            cplus: None,
            cminus: None,
            variable: None,
            comment: None,
        }
    }

    pub fn with_segments(mut self, segments: u32) -> Self {
        self.num_segments = Some(segments);
        self
    }

    pub fn with_added_loss(mut self, cplus: Option<Real>, cminus: Option<Real>) -> Self {
        self.cplus = cplus;
        self.cminus = cminus;
        self
    }

    pub fn with_variable(mut self, section: VariableSection) -> Self {
        self.variable = Some(section);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn segments(&self) -> u32 {
        self.num_segments.unwrap_or(1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DummyProps {
    #[serde(default)]
    pub label: String,
    pub diameter: Real,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cplus: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cminus: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl DummyProps {
    pub fn new(label: impl Into<String>, diameter: Real) -> Self {
        Self {
            label: label.into(),
            diameter,
            cplus: None,
            cminus: None,
            comment: None,
        }
    }

    pub fn with_added_loss(mut self, cplus: Option<Real>, cminus: Option<Real>) -> Self {
        self.cplus = cplus;
        self.cminus = cminus;
        self
    }
}

/// Edge variant tag plus its properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EdgeData {
    Conduit(ConduitProps),
    Dummy(DummyProps),
}

impl EdgeData {
    pub fn label(&self) -> &str {
        match self {
            EdgeData::Conduit(c) => &c.label,
            EdgeData::Dummy(d) => &d.label,
        }
    }

    pub fn comment(&self) -> Option<&str> {
        match self {
            EdgeData::Conduit(c) => c.comment.as_deref(),
            EdgeData::Dummy(d) => d.comment.as_deref(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EdgeData::Conduit(_) => "conduit",
            EdgeData::Dummy(_) => "dummy",
        }
    }
}

/// A directed edge: flow runs from `source` to `target`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: ElementId,
    pub source: ElementId,
    pub target: ElementId,
    pub data: EdgeData,
}

impl Edge {
    pub fn new(
        id: impl Into<ElementId>,
        source: impl Into<ElementId>,
        target: impl Into<ElementId>,
        data: EdgeData,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            data,
        }
    }

    /// Display label, falling back to the id when no label was given.
    pub fn label(&self) -> &str {
        let label = self.data.label();
        if label.is_empty() {
            self.id.as_str()
        } else {
            label
        }
    }
}

/// A validated network snapshot: nodes and edges in their input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Network {
    pub(crate) nodes: Vec<Node>,
    pub(crate) edges: Vec<Edge>,
}

impl Network {
    /// Validate `nodes` and `edges` and wrap them.
    pub fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> crate::GraphResult<Self> {
        crate::validate::validate_network(&nodes, &edges)?;
        Ok(Self { nodes, edges })
    }

    /// Return all nodes.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Return all edges.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Get a node by id.
    pub fn node(&self, id: &ElementId) -> Option<&Node> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    /// Get an edge by id.
    pub fn edge(&self, id: &ElementId) -> Option<&Edge> {
        self.edges.iter().find(|e| &e.id == id)
    }

    pub fn into_parts(self) -> (Vec<Node>, Vec<Edge>) {
        (self.nodes, self.edges)
    }
}
