//! `import` and `export`: canonical JSON in, JSON / GraphML / shards out.

use std::path::PathBuf;

use clap::{Args, ValueEnum};

use org_graph_core::Config;
use org_graph_store::{
    export_to_path, graphml, import_from_path, shards, ImportOptions,
};

#[derive(Args)]
pub struct ImportArgs {
    /// Graph file to validate and ingest
    pub path: PathBuf,

    /// Reject unknown entity fields instead of routing them to `extra`
    #[arg(long)]
    pub strict: bool,

    /// Re-emit the ingested graph as canonical JSON
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub fn run_import(args: ImportArgs) -> anyhow::Result<()> {
    let mut options = ImportOptions::from(&Config::from_env());
    if args.strict {
        options.strict = true;
    }
    let engine = import_from_path(&args.path, &options)?;
    let stats = engine.statistics();
    println!(
        "Imported {} entities and {} relationships from {}",
        stats.total_entities,
        stats.total_relationships,
        args.path.display()
    );
    if let Some(output) = args.output {
        export_to_path(engine.as_ref(), &output)?;
        println!("Canonical JSON written to {}", output.display());
    }
    Ok(())
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ExportFormat {
    Json,
    Graphml,
    Shards,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Canonical JSON graph file to read
    pub path: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
    pub format: ExportFormat,

    /// Output file (json, graphml) or directory (shards)
    #[arg(long)]
    pub output: PathBuf,
}

pub fn run_export(args: ExportArgs) -> anyhow::Result<()> {
    let options = ImportOptions::from(&Config::from_env());
    let engine = import_from_path(&args.path, &options)?;
    match args.format {
        ExportFormat::Json => {
            export_to_path(engine.as_ref(), &args.output)?;
        }
        ExportFormat::Graphml => {
            let xml = graphml::export_graphml(engine.as_ref())?;
            if let Some(parent) = args.output.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(&args.output, xml)?;
        }
        ExportFormat::Shards => {
            shards::split(engine.as_ref(), &args.output)?;
        }
    }
    println!("Exported {} to {}", args.path.display(), args.output.display());
    Ok(())
}
