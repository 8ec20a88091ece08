//! org-graph CLI
//!
//! Thin adapters over the core pipeline:
//!
//! - `demo`: generate a small organisation and print its statistics
//! - `generate`: run the synthetic pipeline and write canonical JSON
//! - `inspect`: load a graph file and print statistics
//! - `import`: validate and ingest a graph file, re-emitting canonical JSON
//! - `export`: re-serialise a graph as JSON, GraphML, or per-type shards
//! - `serve`: run the ATP tool server on stdio
//! - `benchmark`: drive the pipeline at multiple scales and time each stage

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "org-graph")]
#[command(version)]
#[command(about = "Enterprise digital-twin graph: synthesis, analytics, and tool serving")]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a small demo organisation and print its statistics
    Demo,
    /// Run the synthetic pipeline and write a canonical graph file
    Generate(commands::generate::GenerateArgs),
    /// Load a graph file and print its statistics
    Inspect(commands::inspect::InspectArgs),
    /// Validate and ingest a graph file
    Import(commands::transfer::ImportArgs),
    /// Re-serialise a graph file to another format
    Export(commands::transfer::ExportArgs),
    /// Serve the ATP tool protocol on stdio
    Serve {
        /// Graph file to load before serving (overrides GRAPH_DEFAULT_PATH)
        #[arg(long)]
        graph: Option<PathBuf>,
    },
    /// Drive the pipeline at several scales and print a timing table
    Benchmark(commands::benchmark::BenchmarkArgs),
}

fn main() {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    org_graph_engine::factory::discover();

    let outcome = match cli.command {
        Commands::Demo => commands::demo::run(),
        Commands::Generate(args) => commands::generate::run(args),
        Commands::Inspect(args) => commands::inspect::run(args),
        Commands::Import(args) => commands::transfer::run_import(args),
        Commands::Export(args) => commands::transfer::run_export(args),
        Commands::Serve { graph } => commands::serve(graph),
        Commands::Benchmark(args) => commands::benchmark::run(args),
    };

    if let Err(error) = outcome {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}
