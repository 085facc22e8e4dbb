//! INP export.

use std::path::Path;

use hn_inp::{DEFAULT_TITLE, ExportInput, generate};
use hn_project::Project;
use tracing::{info, warn};

use crate::error::{AppError, AppResult};

/// Export settings not stored in the project.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Banner title; the project name when unset.
    pub title: Option<String>,
}

impl ExportOptions {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Validate a project and render its INP text.
///
/// Labels containing whitespace are exported as-is with a warning; the
/// format has no quoting. Unwired edges are left out.
pub fn render_inp(project: &Project, options: &ExportOptions) -> AppResult<String> {
    hn_project::validate_project(project)?;

    for label in project
        .nodes
        .iter()
        .map(|n| n.label())
        .chain(project.edges.iter().map(|e| e.label()))
    {
        if label.contains(char::is_whitespace) {
            warn!(label, "label contains whitespace and will not read back correctly");
        }
    }
    let unwired = project.unwired_edge_count();
    if unwired > 0 {
        warn!(unwired, "edges without endpoints are not exported");
    }

    let network = project.network()?;
    let title = match options.title.as_deref() {
        Some(title) => title,
        None if project.name.trim().is_empty() => DEFAULT_TITLE,
        None => project.name.as_str(),
    };

    let input = ExportInput::new(
        &network,
        &project.computational_params,
        &project.output_requests,
    )
    .with_title(title);
    Ok(generate(&input))
}

/// Render the project and write the INP file.
pub fn export_inp(project: &Project, path: &Path, options: &ExportOptions) -> AppResult<()> {
    let text = render_inp(project, options)?;
    std::fs::write(path, &text).map_err(|source| AppError::InpFileWrite {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        path = %path.display(),
        bytes = text.len(),
        "INP file written"
    );
    Ok(())
}

/// `<name>_<unix millis>.inp`, with the project name lowercased and every
/// non-alphanumeric character replaced by `_`.
pub fn default_inp_file_name(project: &Project) -> String {
    inp_file_name(&project.name, chrono::Utc::now().timestamp_millis())
}

fn inp_file_name(name: &str, millis: i64) -> String {
    let stem: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    let stem = if stem.is_empty() { "network" } else { stem.as_str() };
    format!("{stem}_{millis}.inp")
}
