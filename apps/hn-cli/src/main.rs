use clap::{Parser, Subcommand};
use hn_app::{AppResult, ExportOptions, export_service, import_service, project_service};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hn-cli")]
#[command(about = "HydroNet CLI - hydraulic network INP export and import", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate project file syntax and structure
    Validate {
        /// Path to the project JSON or YAML file
        project_path: PathBuf,
    },
    /// Print element counts of a project
    Summary {
        /// Path to the project JSON or YAML file
        project_path: PathBuf,
    },
    /// Generate the INP input file for a project
    Export {
        /// Path to the project JSON or YAML file
        project_path: PathBuf,
        /// Output INP path, `-` for stdout (defaults to <name>_<timestamp>.inp)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Banner title (defaults to the project name)
        #[arg(long)]
        title: Option<String>,
    },
    /// Seed a project from an existing INP file
    Import {
        /// Path to the INP file
        inp_path: PathBuf,
        /// Output project path (defaults to <stem>.json next to the INP file)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    debug!(command = ?cli.command, "hn-cli started");

    match cli.command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Summary { project_path } => cmd_summary(&project_path),
        Commands::Export {
            project_path,
            output,
            title,
        } => cmd_export(&project_path, output.as_deref(), title),
        Commands::Import { inp_path, output } => cmd_import(&inp_path, output.as_deref()),
    }
}

fn cmd_validate(project_path: &Path) -> AppResult<()> {
    println!("Validating project: {}", project_path.display());
    let project = project_service::load_project(project_path)?;
    project_service::validate_project(&project)?;
    println!("✓ Project is valid");
    Ok(())
}

fn cmd_summary(project_path: &Path) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let summary = project_service::summarize_project(&project);

    println!("Project: {}", summary.name);
    println!("  Nodes: {}", summary.node_total());
    for (kind, count) in &summary.node_counts {
        println!("    {kind}: {count}");
    }
    println!("  Edges: {}", summary.edge_total());
    for (kind, count) in &summary.edge_counts {
        println!("    {kind}: {count}");
    }
    if summary.unwired_edges > 0 {
        println!("  Unwired edges: {}", summary.unwired_edges);
    }
    println!("  Output requests: {}", summary.output_requests);
    Ok(())
}

fn cmd_export(project_path: &Path, output: Option<&Path>, title: Option<String>) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let options = ExportOptions { title };

    if output == Some(Path::new("-")) {
        let text = export_service::render_inp(&project, &options)?;
        io::stdout().write_all(text.as_bytes())?;
        return Ok(());
    }

    let path = match output {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(export_service::default_inp_file_name(&project)),
    };
    export_service::export_inp(&project, &path, &options)?;
    println!("✓ INP written: {}", path.display());
    Ok(())
}

fn cmd_import(inp_path: &Path, output: Option<&Path>) -> AppResult<()> {
    let project = import_service::import_inp(inp_path)?;

    let path = match output {
        Some(path) => path.to_path_buf(),
        None => inp_path.with_extension("json"),
    };
    project_service::save_project(&path, &project)?;

    println!(
        "✓ Imported {} nodes and {} edges into {}",
        project.nodes.len(),
        project.edges.len(),
        path.display()
    );
    let unwired = project.unwired_edge_count();
    if unwired > 0 {
        println!("  {unwired} edges have no endpoints; connect them before exporting");
    }
    Ok(())
}
