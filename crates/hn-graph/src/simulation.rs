//! Auxiliary entities owned by the surrounding application.
//!
//! The exporter reads them but never changes them.

use hn_core::{ElementId, Real};
use serde::{Deserialize, Serialize};

/// Time stepping for the CONTROL section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComputationalParams {
    /// Computation time step.
    pub dtcomp: Real,
    /// Output time step.
    pub dtout: Real,
    /// Maximum simulation time.
    pub tmax: Real,
}

impl Default for ComputationalParams {
    fn default() -> Self {
        Self {
            dtcomp: 0.01,
            dtout: 0.1,
            tmax: 500.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementType {
    Node,
    Edge,
}

/// A request for time-history output of some variables of one element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputRequest {
    pub element_type: ElementType,
    pub element_id: ElementId,
    /// Output section keyword, e.g. `HISTORY`.
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub variables: Vec<String>,
}

fn default_category() -> String {
    "HISTORY".to_string()
}

impl OutputRequest {
    pub fn node(id: impl Into<ElementId>, variables: &[&str]) -> Self {
        Self::new(ElementType::Node, id, variables)
    }

    pub fn edge(id: impl Into<ElementId>, variables: &[&str]) -> Self {
        Self::new(ElementType::Edge, id, variables)
    }

    fn new(element_type: ElementType, id: impl Into<ElementId>, variables: &[&str]) -> Self {
        Self {
            element_type,
            element_id: id.into(),
            category: default_category(),
            variables: variables.iter().map(|v| v.to_string()).collect(),
        }
    }

    pub fn in_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }
}
