//! `demo`: generate a small organisation in memory and print what came out.

use org_graph_engine::KnowledgeGraph;
use org_graph_synth::{profiles, Orchestrator};

pub fn run() -> anyhow::Result<()> {
    let mut kg = KnowledgeGraph::with_backend("memory")?;
    let profile = profiles::tech_company("Demo Technologies", 250);
    let outcome = Orchestrator::new(profile, 42).generate(kg.engine_mut())?;

    let stats = kg.statistics();
    println!("Generated {} entities and {} relationships", stats.total_entities, stats.total_relationships);
    println!();
    println!("Entities by type:");
    for (entity_type, count) in &stats.entity_type_counts {
        println!("  {entity_type:<22} {count}");
    }
    println!();
    println!("{}", outcome.quality.summary());
    println!();
    println!("Recent mutations logged: {}", kg.recent_events(10).len());
    Ok(())
}
