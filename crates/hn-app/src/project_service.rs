//! Project loading, saving, validation, and introspection.

use std::collections::BTreeMap;
use std::path::Path;

use hn_project::{Project, ProjectError};
use tracing::{debug, info};

use crate::error::{AppError, AppResult};

/// On-disk encoding of a project file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectFormat {
    Json,
    Yaml,
}

impl ProjectFormat {
    /// `.json`, `.yaml` or `.yml`, case-insensitive.
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(ProjectFormat::Json),
            Some("yaml" | "yml") => Ok(ProjectFormat::Yaml),
            _ => Err(AppError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Element counts of a project, keyed by variant name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSummary {
    pub name: String,
    pub node_counts: BTreeMap<&'static str, usize>,
    pub edge_counts: BTreeMap<&'static str, usize>,
    /// Imported edges still waiting to be connected.
    pub unwired_edges: usize,
    pub output_requests: usize,
}

impl ProjectSummary {
    pub fn node_total(&self) -> usize {
        self.node_counts.values().sum()
    }

    pub fn edge_total(&self) -> usize {
        self.edge_counts.values().sum()
    }
}

/// Load and validate a project file. A project without a name is named
/// after the file stem.
pub fn load_project(path: &Path) -> AppResult<Project> {
    let format = ProjectFormat::from_path(path)?;
    let loaded = match format {
        ProjectFormat::Json => hn_project::load_json(path),
        ProjectFormat::Yaml => hn_project::load_yaml(path),
    };
    let mut project = loaded.map_err(|e| match e {
        ProjectError::Io(source) => AppError::ProjectFileRead {
            path: path.to_path_buf(),
            source,
        },
        other => AppError::from(other),
    })?;
    if project.name.is_empty() {
        if let Some(stem) = path.file_stem() {
            project.name = stem.to_string_lossy().into_owned();
        }
    }

    info!(
        path = %path.display(),
        nodes = project.nodes.len(),
        edges = project.edges.len(),
        "project loaded"
    );
    Ok(project)
}

/// Validate and save a project file.
pub fn save_project(path: &Path, project: &Project) -> AppResult<()> {
    let format = ProjectFormat::from_path(path)?;
    let saved = match format {
        ProjectFormat::Json => hn_project::save_json(path, project),
        ProjectFormat::Yaml => hn_project::save_yaml(path, project),
    };
    saved.map_err(|e| match e {
        ProjectError::Io(source) => AppError::ProjectFileWrite {
            path: path.to_path_buf(),
            source,
        },
        other => AppError::from(other),
    })?;

    debug!(path = %path.display(), "project saved");
    Ok(())
}

/// Validate project structure and values.
pub fn validate_project(project: &Project) -> AppResult<()> {
    hn_project::validate_project(project)?;
    Ok(())
}

pub fn summarize_project(project: &Project) -> ProjectSummary {
    let mut node_counts = BTreeMap::new();
    for node in &project.nodes {
        *node_counts.entry(node.kind().name()).or_insert(0) += 1;
    }
    let mut edge_counts = BTreeMap::new();
    for edge in &project.edges {
        *edge_counts.entry(edge.data.name()).or_insert(0) += 1;
    }

    ProjectSummary {
        name: project.name.clone(),
        node_counts,
        edge_counts,
        unwired_edges: project.unwired_edge_count(),
        output_requests: project.output_requests.len(),
    }
}
