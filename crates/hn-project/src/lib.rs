//! hn-project: project snapshot file format and validation.
//!
//! Both encodings carry the same document; loading and saving validate it.

pub mod schema;
pub mod validate;

use std::path::Path;

pub use schema::Project;
pub use validate::{ValidationError, validate_project};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn load_with(
    path: &Path,
    decode: impl FnOnce(&str) -> ProjectResult<Project>,
) -> ProjectResult<Project> {
    let content = std::fs::read_to_string(path)?;
    let project = decode(&content)?;
    validate_project(&project)?;
    Ok(project)
}

fn save_with(
    path: &Path,
    project: &Project,
    encode: impl FnOnce(&Project) -> ProjectResult<String>,
) -> ProjectResult<()> {
    validate_project(project)?;
    std::fs::write(path, encode(project)?)?;
    Ok(())
}

pub fn load_yaml(path: &Path) -> ProjectResult<Project> {
    load_with(path, |s| Ok(serde_yaml::from_str(s)?))
}

pub fn save_yaml(path: &Path, project: &Project) -> ProjectResult<()> {
    save_with(path, project, |p| Ok(serde_yaml::to_string(p)?))
}

pub fn load_json(path: &Path) -> ProjectResult<Project> {
    load_with(path, |s| Ok(serde_json::from_str(s)?))
}

pub fn save_json(path: &Path, project: &Project) -> ProjectResult<()> {
    save_with(path, project, |p| Ok(serde_json::to_string_pretty(p)?))
}
