//! Graph analytics implemented over the engine abstraction.
//!
//! Betweenness is Brandes' algorithm on the undirected projection, O(V·E);
//! callers are warned above ~1000 entities. PageRank is power iteration
//! with damping 0.85.

use std::collections::{BTreeMap, HashMap, VecDeque};

use serde::{Deserialize, Serialize};
use tracing::warn;

use org_graph_core::types::{Direction, EntityKind, EntityType, Severity};

use crate::engine::GraphEngine;

/// Entity count above which betweenness gets slow enough to warn about.
pub const BETWEENNESS_WARN_THRESHOLD: usize = 1000;

const PAGERANK_DAMPING: f64 = 0.85;
const PAGERANK_EPSILON: f64 = 1e-6;
const PAGERANK_MAX_ITERATIONS: usize = 100;

/// Undirected adjacency snapshot with dense indices, shared by the path
/// algorithms.
struct Adjacency {
    ids: Vec<String>,
    index: HashMap<String, usize>,
    neighbors: Vec<Vec<usize>>,
}

impl Adjacency {
    fn build(engine: &dyn GraphEngine) -> Self {
        let ids: Vec<String> = engine
            .list_entities(None, None)
            .into_iter()
            .map(|e| e.id)
            .collect();
        let index: HashMap<String, usize> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();
        let neighbors = ids
            .iter()
            .map(|id| {
                engine
                    .neighbors(id, Direction::Both, None, None)
                    .into_iter()
                    .filter_map(|n| index.get(&n.id).copied())
                    .collect()
            })
            .collect();
        Adjacency {
            ids,
            index,
            neighbors,
        }
    }
}

/// Brandes betweenness centrality over the undirected projection,
/// normalised the conventional way: `2 / ((n−1)(n−2))`.
pub fn betweenness_centrality(engine: &dyn GraphEngine) -> BTreeMap<String, f64> {
    let adj = Adjacency::build(engine);
    let n = adj.ids.len();
    if n > BETWEENNESS_WARN_THRESHOLD {
        warn!(
            entities = n,
            "betweenness centrality is O(V*E); expect seconds at this size"
        );
    }
    let mut centrality = vec![0.0f64; n];

    for source in 0..n {
        // Single-source shortest-path counting.
        let mut stack: Vec<usize> = Vec::with_capacity(n);
        let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut sigma = vec![0.0f64; n];
        let mut distance = vec![-1i64; n];
        sigma[source] = 1.0;
        distance[source] = 0;
        let mut queue = VecDeque::from([source]);
        while let Some(v) = queue.pop_front() {
            stack.push(v);
            for &w in &adj.neighbors[v] {
                if distance[w] < 0 {
                    distance[w] = distance[v] + 1;
                    queue.push_back(w);
                }
                if distance[w] == distance[v] + 1 {
                    sigma[w] += sigma[v];
                    predecessors[w].push(v);
                }
            }
        }
        // Dependency accumulation.
        let mut delta = vec![0.0f64; n];
        while let Some(w) = stack.pop() {
            for &v in &predecessors[w] {
                delta[v] += (sigma[v] / sigma[w]) * (1.0 + delta[w]);
            }
            if w != source {
                centrality[w] += delta[w];
            }
        }
    }

    // Each undirected pair was counted from both endpoints.
    let scale = if n > 2 {
        1.0 / ((n - 1) as f64 * (n - 2) as f64)
    } else {
        0.0
    };
    adj.ids
        .iter()
        .enumerate()
        .map(|(i, id)| (id.clone(), centrality[i] * scale))
        .collect()
}

/// Outcome of a PageRank run.
#[derive(Debug, Clone)]
pub struct PageRankResult {
    pub scores: BTreeMap<String, f64>,
    pub converged: bool,
    pub iterations: usize,
}

/// Power-iteration PageRank over the directed edge set. On failure to
/// converge within the iteration cap, the last iterate is returned with a
/// warning.
pub fn pagerank(engine: &dyn GraphEngine) -> PageRankResult {
    let entities = engine.list_entities(None, None);
    let n = entities.len();
    if n == 0 {
        return PageRankResult {
            scores: BTreeMap::new(),
            converged: true,
            iterations: 0,
        };
    }
    let index: HashMap<String, usize> = entities
        .iter()
        .enumerate()
        .map(|(i, e)| (e.id.clone(), i))
        .collect();
    // Directed out-edges; parallel edges each contribute a unit of weight,
    // matching the multigraph semantics.
    let mut out_edges: Vec<Vec<usize>> = vec![Vec::new(); n];
    for entity in &entities {
        for rel in engine.relationships(&entity.id, Direction::Out, None) {
            if let Some(&t) = index.get(&rel.target_id) {
                out_edges[index[&entity.id]].push(t);
            }
        }
    }

    let uniform = 1.0 / n as f64;
    let mut rank = vec![uniform; n];
    let mut iterations = 0;
    let mut converged = false;
    while iterations < PAGERANK_MAX_ITERATIONS {
        iterations += 1;
        let mut next = vec![(1.0 - PAGERANK_DAMPING) * uniform; n];
        let mut dangling_mass = 0.0;
        for (v, targets) in out_edges.iter().enumerate() {
            if targets.is_empty() {
                dangling_mass += rank[v];
                continue;
            }
            let share = PAGERANK_DAMPING * rank[v] / targets.len() as f64;
            for &t in targets {
                next[t] += share;
            }
        }
        let dangling_share = PAGERANK_DAMPING * dangling_mass * uniform;
        for value in next.iter_mut() {
            *value += dangling_share;
        }
        let diff: f64 = rank
            .iter()
            .zip(next.iter())
            .map(|(a, b)| (a - b).abs())
            .sum();
        rank = next;
        if diff < PAGERANK_EPSILON {
            converged = true;
            break;
        }
    }
    if !converged {
        warn!(
            iterations,
            "PageRank did not converge; returning last iterate"
        );
    }
    PageRankResult {
        scores: entities
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id.clone(), rank[i]))
            .collect(),
        converged,
        iterations,
    }
}

/// Per-entity risk score derived from graph topology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskScore {
    pub entity_id: String,
    pub entity_name: String,
    /// `10·v + 25·crit_v + 2·deg + 20·internet`, clamped to [0, 100].
    pub risk_score: f64,
    pub vulnerabilities: usize,
    pub critical_vulnerabilities: usize,
    pub degree: usize,
    pub internet_facing_connections: usize,
}

/// Score an entity by connected vulnerabilities, degree, and internet
/// exposure of neighbouring systems.
pub fn risk_score(engine: &dyn GraphEngine, entity_id: &str) -> Option<RiskScore> {
    let entity = engine.get_entity(entity_id)?;

    let vuln_neighbors = engine.neighbors(
        entity_id,
        Direction::Both,
        None,
        Some(EntityType::Vulnerability),
    );
    let vulnerabilities = vuln_neighbors.len();
    let critical_vulnerabilities = vuln_neighbors
        .iter()
        .filter(|v| match &v.kind {
            EntityKind::Vulnerability(vuln) => vuln.severity == Severity::Critical,
            _ => false,
        })
        .count();

    let degree = engine
        .relationships(entity_id, Direction::Both, None)
        .len();

    let internet_facing_connections = engine
        .neighbors(entity_id, Direction::Both, None, Some(EntityType::System))
        .iter()
        .filter(|s| match &s.kind {
            EntityKind::System(sys) => sys.is_internet_facing,
            _ => false,
        })
        .count();

    let raw = vulnerabilities as f64 * 10.0
        + critical_vulnerabilities as f64 * 25.0
        + degree as f64 * 2.0
        + internet_facing_connections as f64 * 20.0;

    Some(RiskScore {
        entity_id: entity.id,
        entity_name: entity.name,
        risk_score: (raw.clamp(0.0, 100.0) * 10.0).round() / 10.0,
        vulnerabilities,
        critical_vulnerabilities,
        degree,
        internet_facing_connections,
    })
}

/// Attack path between two entities: the shortest undirected path, or
/// `None` when no route exists.
pub fn attack_path(engine: &dyn GraphEngine, source_id: &str, target_id: &str) -> Option<Vec<String>> {
    engine.shortest_path(source_id, target_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryGraph;
    use org_graph_core::types::kinds::{System, Vulnerability};
    use org_graph_core::types::{Entity, EntityKind, Relationship, RelationshipType};

    fn star_graph() -> (MemoryGraph, String, Vec<String>) {
        // hub depends on three leaves: hub is the only path between leaves.
        let mut g = MemoryGraph::new();
        let hub = Entity::new("hub", EntityKind::System(System::default()));
        let hub_id = hub.id.clone();
        g.add_entity(hub).unwrap();
        let mut leaves = Vec::new();
        for name in ["a", "b", "c"] {
            let leaf = Entity::new(name, EntityKind::System(System::default()));
            let leaf_id = leaf.id.clone();
            g.add_entity(leaf).unwrap();
            g.add_relationship(Relationship::new(
                RelationshipType::DependsOn,
                &hub_id,
                &leaf_id,
            ))
            .unwrap();
            leaves.push(leaf_id);
        }
        (g, hub_id, leaves)
    }

    #[test]
    fn hub_dominates_betweenness() {
        let (g, hub_id, leaves) = star_graph();
        let scores = betweenness_centrality(&g);
        assert!(scores[&hub_id] > 0.99);
        for leaf in &leaves {
            assert!(scores[leaf] < 1e-9);
        }
    }

    #[test]
    fn pagerank_converges_and_sums_to_one() {
        let (g, _, _) = star_graph();
        let result = pagerank(&g);
        assert!(result.converged);
        let total: f64 = result.scores.values().sum();
        assert!((total - 1.0).abs() < 1e-6, "mass leaked: {total}");
    }

    #[test]
    fn pagerank_of_empty_graph_is_empty() {
        let g = MemoryGraph::new();
        let result = pagerank(&g);
        assert!(result.converged);
        assert!(result.scores.is_empty());
    }

    #[test]
    fn risk_score_counts_vulns_and_exposure() {
        let mut g = MemoryGraph::new();
        let target = Entity::new("CRM", EntityKind::System(System::default()));
        let target_id = target.id.clone();
        g.add_entity(target).unwrap();

        let vuln = Entity::new(
            "RCE",
            EntityKind::Vulnerability(Vulnerability {
                severity: Severity::Critical,
                ..Vulnerability::default()
            }),
        );
        let vuln_id = vuln.id.clone();
        g.add_entity(vuln).unwrap();
        g.add_relationship(Relationship::new(
            RelationshipType::Affects,
            &vuln_id,
            &target_id,
        ))
        .unwrap();

        let exposed = Entity::new(
            "Gateway",
            EntityKind::System(System {
                is_internet_facing: true,
                ..System::default()
            }),
        );
        let exposed_id = exposed.id.clone();
        g.add_entity(exposed).unwrap();
        g.add_relationship(Relationship::new(
            RelationshipType::DependsOn,
            &target_id,
            &exposed_id,
        ))
        .unwrap();

        let score = risk_score(&g, &target_id).unwrap();
        assert_eq!(score.vulnerabilities, 1);
        assert_eq!(score.critical_vulnerabilities, 1);
        assert_eq!(score.degree, 2);
        assert_eq!(score.internet_facing_connections, 1);
        // 10 + 25 + 4 + 20
        assert_eq!(score.risk_score, 59.0);
        assert!(risk_score(&g, "ghost").is_none());
    }

    #[test]
    fn risk_score_is_clamped_at_100() {
        let mut g = MemoryGraph::new();
        let target = Entity::new("Mainframe", EntityKind::System(System::default()));
        let target_id = target.id.clone();
        g.add_entity(target).unwrap();
        for i in 0..12 {
            let vuln = Entity::new(
                format!("V{i}"),
                EntityKind::Vulnerability(Vulnerability::default()),
            );
            let vid = vuln.id.clone();
            g.add_entity(vuln).unwrap();
            g.add_relationship(Relationship::new(
                RelationshipType::Affects,
                &vid,
                &target_id,
            ))
            .unwrap();
        }
        let score = risk_score(&g, &target_id).unwrap();
        assert_eq!(score.risk_score, 100.0);
    }
}
