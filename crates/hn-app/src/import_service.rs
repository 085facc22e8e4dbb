//! INP import.
//!
//! An imported file yields a project seed: reservoirs and conduits with their
//! properties, but edges without endpoints. The user re-wires them afterwards.

use std::path::Path;

use hn_project::Project;
use tracing::info;

use crate::error::{AppError, AppResult};

/// Read an INP file into a project seed named after the file stem.
pub fn import_inp(path: &Path) -> AppResult<Project> {
    let text = std::fs::read_to_string(path).map_err(|source| AppError::InpFileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    import_inp_text(&name, &text)
}

/// Parse INP text into a project seed with default computational parameters
/// and no output requests. Fails when no node could be recovered.
pub fn import_inp_text(name: &str, text: &str) -> AppResult<Project> {
    let fragment = hn_inp::parse(text);
    if fragment.nodes.is_empty() {
        return Err(AppError::EmptyImport {
            name: name.to_string(),
        });
    }

    info!(
        name,
        nodes = fragment.nodes.len(),
        edges = fragment.edges.len(),
        "INP imported"
    );
    Ok(Project::seed(name, fragment.nodes, fragment.edges))
}
