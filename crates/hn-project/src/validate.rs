//! Project validation logic.

use std::collections::HashSet;

use hn_core::{ElementId, HnError, ensure_finite, ensure_positive};
use hn_graph::{EdgeData, ElementType, GraphError, Node, NodeKind, validate_network};

use crate::schema::Project;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Invalid value in {context}: {source}")]
    Numeric {
        context: String,
        #[source]
        source: HnError,
    },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: ElementId, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Validate a project before export or save.
///
/// Unwired edges (see [`Project::is_unwired`]) are exempt from the graph
/// checks but their numbers must still be finite.
pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    let wired: Vec<_> = project.wired_edges().cloned().collect();
    validate_network(&project.nodes, &wired)?;

    let params = &project.computational_params;
    for (value, what) in [
        (params.dtcomp, "dtcomp"),
        (params.dtout, "dtout"),
        (params.tmax, "tmax"),
    ] {
        ensure_positive(value, what).map_err(|source| ValidationError::Numeric {
            context: "computationalParams".to_string(),
            source,
        })?;
    }

    for node in &project.nodes {
        validate_node(node)?;
    }
    for edge in &project.edges {
        validate_edge_data(&edge.id, &edge.data)?;
    }

    let node_ids: HashSet<&ElementId> = project.nodes.iter().map(|n| &n.id).collect();
    let edge_ids: HashSet<&ElementId> = project.edges.iter().map(|e| &e.id).collect();
    for (i, request) in project.output_requests.iter().enumerate() {
        let known = match request.element_type {
            ElementType::Node => node_ids.contains(&request.element_id),
            ElementType::Edge => edge_ids.contains(&request.element_id),
        };
        if !known {
            return Err(ValidationError::MissingReference {
                id: request.element_id.clone(),
                context: format!("outputRequests[{i}]"),
            });
        }
        if request.category.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: format!("outputRequests[{i}].category"),
                value: format!("{:?}", request.category),
                reason: "must not be empty".to_string(),
            });
        }
    }

    Ok(())
}

fn numeric(id: &ElementId, values: &[(f64, &'static str)]) -> Result<(), ValidationError> {
    for &(value, what) in values {
        ensure_finite(value, what).map_err(|source| ValidationError::Numeric {
            context: id.to_string(),
            source,
        })?;
    }
    Ok(())
}

fn validate_node(node: &Node) -> Result<(), ValidationError> {
    if let Some(elevation) = node.data.elevation {
        numeric(&node.id, &[(elevation, "elevation")])?;
    }
    match node.kind() {
        NodeKind::SurgeTank(st) => numeric(
            &node.id,
            &[
                (st.top_elevation, "topElevation"),
                (st.bottom_elevation, "bottomElevation"),
                (st.diameter, "diameter"),
                (st.celerity, "celerity"),
                (st.friction, "friction"),
            ],
        ),
        NodeKind::FlowBoundary(fb) => {
            for point in &fb.schedule_points {
                numeric(&node.id, &[(point.time, "time"), (point.flow, "flow")])?;
            }
            Ok(())
        }
        NodeKind::Reservoir | NodeKind::Simple | NodeKind::Junction => Ok(()),
    }
}

fn validate_edge_data(id: &ElementId, data: &EdgeData) -> Result<(), ValidationError> {
    match data {
        EdgeData::Conduit(c) => {
            numeric(
                id,
                &[
                    (c.length, "length"),
                    (c.diameter, "diameter"),
                    (c.celerity, "celerity"),
                    (c.friction, "friction"),
                ],
            )?;
            if let Some(v) = &c.variable {
                numeric(
                    id,
                    &[(v.distance, "distance"), (v.area, "area"), (v.d, "d"), (v.a, "a")],
                )?;
            }
            added_loss(id, c.cplus, c.cminus)
        }
        EdgeData::Dummy(d) => {
            numeric(id, &[(d.diameter, "diameter")])?;
            added_loss(id, d.cplus, d.cminus)
        }
    }
}

fn added_loss(id: &ElementId, cplus: Option<f64>, cminus: Option<f64>) -> Result<(), ValidationError> {
    for (value, what) in [(cplus, "cplus"), (cminus, "cminus")] {
        if let Some(value) = value {
            numeric(id, &[(value, what)])?;
        }
    }
    Ok(())
}
