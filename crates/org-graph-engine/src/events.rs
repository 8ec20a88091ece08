//! Bounded mutation log for the graph facade.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use org_graph_core::types::now_ms;

/// Kinds of mutation recorded by the facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationType {
    Create,
    Update,
    Delete,
    Link,
    Unlink,
}

/// Immutable record of a single graph mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEvent {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub mutation_type: MutationType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship_id: Option<String>,
}

impl GraphEvent {
    pub fn entity(mutation_type: MutationType, entity_type: &str, entity_id: &str) -> Self {
        GraphEvent {
            id: Uuid::new_v4().to_string(),
            timestamp: now_ms(),
            mutation_type,
            entity_type: Some(entity_type.to_string()),
            entity_id: Some(entity_id.to_string()),
            relationship_id: None,
        }
    }

    pub fn relationship(mutation_type: MutationType, relationship_id: &str) -> Self {
        GraphEvent {
            id: Uuid::new_v4().to_string(),
            timestamp: now_ms(),
            mutation_type,
            entity_type: None,
            entity_id: None,
            relationship_id: Some(relationship_id.to_string()),
        }
    }
}

/// Ring buffer of recent mutations. Oldest events are dropped once the
/// capacity is reached, which bounds memory for long-lived servers.
#[derive(Debug)]
pub struct EventLog {
    events: std::collections::VecDeque<GraphEvent>,
    capacity: usize,
}

impl EventLog {
    pub const DEFAULT_CAPACITY: usize = 10_000;

    pub fn new(capacity: usize) -> Self {
        EventLog {
            events: std::collections::VecDeque::with_capacity(capacity.min(1024)),
            capacity: capacity.max(1),
        }
    }

    pub fn record(&mut self, event: GraphEvent) {
        if self.events.len() == self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Most recent events, newest last.
    pub fn recent(&self, count: usize) -> Vec<GraphEvent> {
        self.events
            .iter()
            .rev()
            .take(count)
            .rev()
            .cloned()
            .collect()
    }
}

impl Default for EventLog {
    fn default() -> Self {
        EventLog::new(EventLog::DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_buffer_drops_oldest_at_capacity() {
        let mut log = EventLog::new(3);
        for i in 0..5 {
            log.record(GraphEvent::entity(MutationType::Create, "person", &format!("p{i}")));
        }
        assert_eq!(log.len(), 3);
        let recent = log.recent(3);
        assert_eq!(recent[0].entity_id.as_deref(), Some("p2"));
        assert_eq!(recent[2].entity_id.as_deref(), Some("p4"));
    }

    #[test]
    fn recent_handles_short_logs() {
        let mut log = EventLog::default();
        log.record(GraphEvent::relationship(MutationType::Link, "r1"));
        assert_eq!(log.recent(10).len(), 1);
    }
}
