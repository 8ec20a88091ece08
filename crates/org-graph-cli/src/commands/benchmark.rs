//! `benchmark`: drive the full pipeline at several scales and report
//! per-stage wall-clock timings.

use std::time::Instant;

use clap::Args;

use org_graph_engine::{analytics, factory};
use org_graph_store::export_string;
use org_graph_synth::{profiles, Orchestrator};

#[derive(Args)]
pub struct BenchmarkArgs {
    /// Employee counts to benchmark, comma separated
    #[arg(long, default_value = "100,1000,5000", value_delimiter = ',')]
    pub scales: Vec<u32>,

    /// RNG seed shared across scales
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

pub fn run(args: BenchmarkArgs) -> anyhow::Result<()> {
    println!(
        "{:>9} {:>9} {:>9} {:>12} {:>12} {:>12} {:>9}",
        "employees", "entities", "edges", "generate_ms", "export_ms", "pagerank_ms", "quality"
    );
    for &employees in &args.scales {
        let profile = profiles::tech_company("Benchmark Corp", employees);
        let mut engine = factory::create("memory")?;

        let started = Instant::now();
        let outcome = Orchestrator::new(profile, args.seed).generate(engine.as_mut())?;
        let generate_ms = started.elapsed().as_millis();

        let started = Instant::now();
        let serialised = export_string(engine.as_ref())?;
        let export_ms = started.elapsed().as_millis();

        let started = Instant::now();
        let pagerank = analytics::pagerank(engine.as_ref());
        let pagerank_ms = started.elapsed().as_millis();
        debug_assert_eq!(pagerank.scores.len(), outcome.entity_count);

        println!(
            "{:>9} {:>9} {:>9} {:>12} {:>12} {:>12} {:>9.2}",
            employees,
            outcome.entity_count,
            outcome.relationship_count,
            generate_ms,
            export_ms,
            pagerank_ms,
            outcome.quality.overall_score,
        );
        drop(serialised);
    }
    Ok(())
}
