//! `inspect`: load a canonical graph file and print its statistics.

use std::path::PathBuf;

use clap::Args;

use org_graph_core::Config;
use org_graph_store::{import_from_path, ImportOptions};

#[derive(Args)]
pub struct InspectArgs {
    /// Canonical JSON graph file
    pub path: PathBuf,
}

pub fn run(args: InspectArgs) -> anyhow::Result<()> {
    let options = ImportOptions::from(&Config::from_env());
    let engine = import_from_path(&args.path, &options)?;
    let stats = engine.statistics();

    println!("{}", args.path.display());
    println!("  entities:       {}", stats.total_entities);
    println!("  relationships:  {}", stats.total_relationships);
    println!("  density:        {:.6}", stats.density);
    println!("  weakly connected: {}", stats.is_weakly_connected);
    println!();
    println!("Entities by type:");
    for (entity_type, count) in &stats.entity_type_counts {
        println!("  {entity_type:<22} {count}");
    }
    println!();
    println!("Relationships by type:");
    for (relationship_type, count) in &stats.relationship_type_counts {
        println!("  {relationship_type:<22} {count}");
    }
    Ok(())
}
