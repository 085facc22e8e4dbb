//! Shared application service layer for hydronet.
//!
//! Frontends go through this crate for project management, INP export and
//! INP import instead of talking to the backend crates directly.

pub mod error;
pub mod export_service;
pub mod import_service;
pub mod project_service;

// Re-export key types for convenience
pub use error::{AppError, AppResult};
pub use export_service::{ExportOptions, default_inp_file_name, export_inp, render_inp};
pub use import_service::{import_inp, import_inp_text};
pub use project_service::{
    ProjectFormat, ProjectSummary, load_project, save_project, summarize_project,
    validate_project,
};
