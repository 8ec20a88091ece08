//! The tool registry: every tool's name, read/write classification, and
//! REST mapping, in one table.
//!
//! The REST adapter is a thin external collaborator; carrying each tool's
//! method + path here means the mapping stays mechanical.

use serde::Serialize;

/// Maximum items accepted by `add_relationships_batch`.
pub const MAX_BATCH_SIZE: usize = 500;

/// Default page size for `list_entities`.
pub const DEFAULT_LIST_LIMIT: usize = 50;
/// Default depth for `get_blast_radius`.
pub const DEFAULT_BLAST_DEPTH: usize = 3;
/// Default result counts for the ranked read tools.
pub const DEFAULT_CENTRALITY_TOP_N: usize = 20;
pub const DEFAULT_MOST_CONNECTED_TOP_N: usize = 10;
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// One registered tool.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDef {
    pub name: &'static str,
    pub description: &'static str,
    pub read_only: bool,
    pub rest_method: &'static str,
    pub rest_path: &'static str,
}

/// The fixed tool registry. The first thirteen entries are the core tool
/// set; the final three are the entity write tools.
pub const TOOLS: &[ToolDef] = &[
    ToolDef {
        name: "load_graph",
        description: "Load a canonical JSON graph file into the server",
        read_only: true,
        rest_method: "POST",
        rest_path: "/load",
    },
    ToolDef {
        name: "get_statistics",
        description: "Entity/relationship counts by type, density, weak connectivity",
        read_only: true,
        rest_method: "GET",
        rest_path: "/statistics",
    },
    ToolDef {
        name: "list_entities",
        description: "List entities, optionally filtered by type",
        read_only: true,
        rest_method: "GET",
        rest_path: "/entities",
    },
    ToolDef {
        name: "get_entity",
        description: "Fetch one entity by id",
        read_only: true,
        rest_method: "GET",
        rest_path: "/entities/{id}",
    },
    ToolDef {
        name: "get_neighbors",
        description: "Entities directly connected to an entity, with the connecting edges",
        read_only: true,
        rest_method: "GET",
        rest_path: "/entities/{id}/neighbors",
    },
    ToolDef {
        name: "find_shortest_path",
        description: "Shortest path between two entities (undirected reachability)",
        read_only: true,
        rest_method: "GET",
        rest_path: "/path/{src}/{tgt}",
    },
    ToolDef {
        name: "get_blast_radius",
        description: "Entities reachable within N hops, grouped by depth",
        read_only: true,
        rest_method: "GET",
        rest_path: "/blast-radius/{id}",
    },
    ToolDef {
        name: "compute_centrality",
        description: "Degree, betweenness, or PageRank centrality ranking",
        read_only: true,
        rest_method: "GET",
        rest_path: "/centrality",
    },
    ToolDef {
        name: "find_most_connected",
        description: "Top entities by raw degree",
        read_only: true,
        rest_method: "GET",
        rest_path: "/most-connected",
    },
    ToolDef {
        name: "search_entities",
        description: "Fuzzy search across entity names",
        read_only: true,
        rest_method: "GET",
        rest_path: "/search",
    },
    ToolDef {
        name: "add_relationship_tool",
        description: "Add one validated relationship; persists on success",
        read_only: false,
        rest_method: "POST",
        rest_path: "/relationships",
    },
    ToolDef {
        name: "add_relationships_batch",
        description: "Add up to 500 relationships, all-or-nothing",
        read_only: false,
        rest_method: "POST",
        rest_path: "/relationships/batch",
    },
    ToolDef {
        name: "remove_relationship_tool",
        description: "Remove a relationship by id; persists on success",
        read_only: false,
        rest_method: "DELETE",
        rest_path: "/relationships/{id}",
    },
    ToolDef {
        name: "add_entity_tool",
        description: "Add one entity of a catalog kind; persists on success",
        read_only: false,
        rest_method: "POST",
        rest_path: "/entities",
    },
    ToolDef {
        name: "update_entity_tool",
        description: "Patch fields on an entity, copy-validate-write",
        read_only: false,
        rest_method: "PATCH",
        rest_path: "/entities/{id}",
    },
    ToolDef {
        name: "remove_entity_tool",
        description: "Remove an entity and cascade its relationships",
        read_only: false,
        rest_method: "DELETE",
        rest_path: "/entities/{id}",
    },
];

/// Look up a tool by name.
pub fn find_tool(name: &str) -> Option<&'static ToolDef> {
    TOOLS.iter().find(|tool| tool.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_has_thirteen_core_tools_plus_entity_writes() {
        assert_eq!(TOOLS.len(), 16);
        assert_eq!(TOOLS.iter().filter(|t| t.read_only).count(), 10);
        assert_eq!(TOOLS.iter().filter(|t| !t.read_only).count(), 6);
    }

    #[test]
    fn names_are_unique() {
        let mut names: Vec<&str> = TOOLS.iter().map(|t| t.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), TOOLS.len());
    }

    #[test]
    fn every_tool_maps_to_a_rest_route() {
        for tool in TOOLS {
            assert!(!tool.rest_path.is_empty(), "{} lacks a route", tool.name);
            assert!(
                matches!(tool.rest_method, "GET" | "POST" | "PATCH" | "DELETE"),
                "{} has method {}",
                tool.name,
                tool.rest_method
            );
        }
    }

    #[test]
    fn lookup_finds_known_tools_only() {
        assert!(find_tool("get_statistics").is_some());
        assert!(find_tool("drop_database").is_none());
    }
}
