//! Weighted-ratio fuzzy search over entity names.
//!
//! Combines plain, partial, token-sort, and token-set indel ratios into a
//! single [0, 100] score. Runs a linear scan over entity names; no index is
//! maintained. Candidates below score 50 are dropped; ties keep insertion
//! order.

use serde::{Deserialize, Serialize};

use org_graph_core::types::{Entity, EntityType};

use crate::engine::GraphEngine;

/// Minimum score a candidate must reach to be returned.
pub const SCORE_CUTOFF: f64 = 50.0;

/// An entity together with its match score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub entity: Entity,
    /// Weighted-ratio score in [0, 100], one decimal.
    pub score: f64,
}

/// Fuzzy search across entity names, optionally restricted to one kind.
/// Returns up to `limit` hits ordered by descending score.
pub fn search_entities(
    engine: &dyn GraphEngine,
    query: &str,
    entity_type: Option<EntityType>,
    limit: usize,
) -> Vec<SearchHit> {
    let candidates = engine.list_entities(entity_type, None);
    let mut hits: Vec<SearchHit> = candidates
        .into_iter()
        .filter_map(|entity| {
            let score = weighted_ratio(query, &entity.name);
            if score >= SCORE_CUTOFF {
                Some(SearchHit {
                    entity,
                    score: (score * 10.0).round() / 10.0,
                })
            } else {
                None
            }
        })
        .collect();
    // Stable sort: equal scores keep the engine's insertion order.
    hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    hits.truncate(limit);
    hits
}

/// Weighted combination of the four ratio variants, scored [0, 100].
pub fn weighted_ratio(a: &str, b: &str) -> f64 {
    let a = normalize(a);
    let b = normalize(b);
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let plain = ratio(&a, &b);
    let token_sort = 0.95 * ratio(&token_sorted(&a), &token_sorted(&b));
    let token_set = 0.95 * token_set_ratio(&a, &b);

    let (shorter, longer) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };
    let length_ratio = longer.len() as f64 / shorter.len().max(1) as f64;
    let partial = if length_ratio > 1.5 {
        0.9 * partial_ratio(shorter, longer)
    } else {
        0.0
    };

    plain.max(token_sort).max(token_set).max(partial)
}

fn normalize(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn token_sorted(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Indel similarity: `(|a| + |b| − distance) / (|a| + |b|) × 100`, where
/// distance counts insertions and deletions only.
fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    let lcs = lcs_length(&a, &b);
    let distance = total - 2 * lcs;
    ((total - distance) as f64 / total as f64) * 100.0
}

fn lcs_length(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let mut prev = vec![0usize; b.len() + 1];
    let mut current = vec![0usize; b.len() + 1];
    for ca in a {
        for (j, cb) in b.iter().enumerate() {
            current[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(current[j])
            };
        }
        std::mem::swap(&mut prev, &mut current);
    }
    prev[b.len()]
}

/// Best ratio of the shorter string against every window of its length in
/// the longer string.
fn partial_ratio(shorter: &str, longer: &str) -> f64 {
    let short_chars: Vec<char> = shorter.chars().collect();
    let long_chars: Vec<char> = longer.chars().collect();
    if short_chars.is_empty() {
        return 0.0;
    }
    if short_chars.len() >= long_chars.len() {
        return ratio(shorter, longer);
    }
    let window = short_chars.len();
    let shorter_owned: String = short_chars.iter().collect();
    let mut best: f64 = 0.0;
    for start in 0..=(long_chars.len() - window) {
        let slice: String = long_chars[start..start + window].iter().collect();
        best = best.max(ratio(&shorter_owned, &slice));
        if best >= 100.0 {
            break;
        }
    }
    best
}

/// Token-set ratio: compare the sorted token intersection against each
/// side's full sorted token list, take the best.
fn token_set_ratio(a: &str, b: &str) -> f64 {
    use std::collections::BTreeSet;
    let set_a: BTreeSet<&str> = a.split_whitespace().collect();
    let set_b: BTreeSet<&str> = b.split_whitespace().collect();
    let intersection: Vec<&str> = set_a.intersection(&set_b).copied().collect();
    let diff_a: Vec<&str> = set_a.difference(&set_b).copied().collect();
    let diff_b: Vec<&str> = set_b.difference(&set_a).copied().collect();

    let t0 = intersection.join(" ");
    let t1 = [t0.as_str(), &diff_a.join(" ")].join(" ").trim().to_string();
    let t2 = [t0.as_str(), &diff_b.join(" ")].join(" ").trim().to_string();

    ratio(&t0, &t1).max(ratio(&t0, &t2)).max(ratio(&t1, &t2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryGraph;
    use org_graph_core::types::kinds::{Person, System};
    use org_graph_core::types::EntityKind;

    #[test]
    fn identical_strings_score_100() {
        assert_eq!(weighted_ratio("Email Server", "Email Server"), 100.0);
    }

    #[test]
    fn token_order_is_forgiven() {
        let score = weighted_ratio("Server Email", "Email Server");
        assert!(score > 90.0, "got {score}");
    }

    #[test]
    fn substring_queries_match_via_partial_ratio() {
        let score = weighted_ratio("email", "Enterprise Email Server Cluster");
        assert!(score >= 80.0, "got {score}");
    }

    #[test]
    fn unrelated_strings_score_low() {
        let score = weighted_ratio("firewall", "Customer Portal");
        assert!(score < 50.0, "got {score}");
    }

    #[test]
    fn search_filters_by_kind_and_applies_cutoff() {
        let mut g = MemoryGraph::new();
        g.add_entity(Entity::new(
            "Email Server",
            EntityKind::System(System::default()),
        ))
        .unwrap();
        g.add_entity(Entity::new(
            "Email Gateway",
            EntityKind::System(System::default()),
        ))
        .unwrap();
        g.add_entity(Entity::new(
            "Emil Serrano",
            EntityKind::Person(Person::default()),
        ))
        .unwrap();

        let hits = search_entities(&g, "email server", Some(EntityType::System), 10);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].entity.name, "Email Server");
        assert!(hits[0].score > hits[1].score);

        let all = search_entities(&g, "zzzz", None, 10);
        assert!(all.is_empty());
    }

    #[test]
    fn limit_truncates_after_sorting() {
        let mut g = MemoryGraph::new();
        for name in ["Billing API", "Billing Portal", "Billing Database"] {
            g.add_entity(Entity::new(name, EntityKind::System(System::default())))
                .unwrap();
        }
        let hits = search_entities(&g, "billing", None, 2);
        assert_eq!(hits.len(), 2);
    }
}
