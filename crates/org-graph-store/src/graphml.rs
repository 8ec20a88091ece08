//! One-way GraphML export for visualisation tools.
//!
//! NetworkX-compatible: node and edge attributes are declared as string
//! keys and every value is string-coerced. There is no GraphML importer.

use org_graph_core::error::CoreResult;
use org_graph_core::types::Direction;
use org_graph_engine::GraphEngine;

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Render the whole graph as a GraphML document.
pub fn export_graphml(engine: &dyn GraphEngine) -> CoreResult<String> {
    let mut out = String::with_capacity(16 * 1024);
    out.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    out.push('\n');
    out.push_str(r#"<graphml xmlns="http://graphml.graphdrawing.org/xmlns">"#);
    out.push('\n');
    out.push_str(r#"  <key id="d0" for="node" attr.name="name" attr.type="string"/>"#);
    out.push('\n');
    out.push_str(r#"  <key id="d1" for="node" attr.name="entity_type" attr.type="string"/>"#);
    out.push('\n');
    out.push_str(r#"  <key id="d2" for="edge" attr.name="relationship_type" attr.type="string"/>"#);
    out.push('\n');
    out.push_str(r#"  <key id="d3" for="edge" attr.name="weight" attr.type="string"/>"#);
    out.push('\n');
    out.push_str(r#"  <graph id="G" edgedefault="directed">"#);
    out.push('\n');

    let entities = engine.list_entities(None, None);
    for entity in &entities {
        out.push_str(&format!(
            "    <node id=\"{}\">\n      <data key=\"d0\">{}</data>\n      <data key=\"d1\">{}</data>\n    </node>\n",
            escape(&entity.id),
            escape(&entity.name),
            entity.entity_type()
        ));
    }
    for entity in &entities {
        for rel in engine.relationships(&entity.id, Direction::Out, None) {
            out.push_str(&format!(
                "    <edge id=\"{}\" source=\"{}\" target=\"{}\">\n      <data key=\"d2\">{}</data>\n      <data key=\"d3\">{}</data>\n    </edge>\n",
                escape(&rel.id),
                escape(&rel.source_id),
                escape(&rel.target_id),
                rel.relationship_type,
                rel.weight
            ));
        }
    }
    out.push_str("  </graph>\n</graphml>\n");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use org_graph_core::types::kinds::System;
    use org_graph_core::types::{Entity, EntityKind, Relationship, RelationshipType};
    use org_graph_engine::MemoryGraph;

    #[test]
    fn graphml_contains_nodes_edges_and_escaped_names() {
        let mut engine = MemoryGraph::new();
        let a = Entity::new("R&D <Platform>", EntityKind::System(System::default()));
        let b = Entity::new("Data Lake", EntityKind::System(System::default()));
        let (aid, bid) = (a.id.clone(), b.id.clone());
        engine.add_entities_bulk(vec![a, b]).unwrap();
        engine
            .add_relationship(
                Relationship::new(RelationshipType::DependsOn, &aid, &bid).with_weight(0.75),
            )
            .unwrap();

        let xml = export_graphml(&engine).unwrap();
        assert!(xml.contains("R&amp;D &lt;Platform&gt;"));
        assert!(xml.contains("depends_on"));
        assert!(xml.contains("0.75"));
        assert!(xml.contains("edgedefault=\"directed\""));
        assert_eq!(xml.matches("<node ").count(), 2);
        assert_eq!(xml.matches("<edge ").count(), 1);
    }
}
