//! Ambient configuration read from the environment.

use std::path::PathBuf;

use tracing::debug;

/// Environment variable naming the canonical graph file to load at startup.
pub const ENV_DEFAULT_PATH: &str = "GRAPH_DEFAULT_PATH";
/// Environment variable enabling strict import (unknown entity fields are
/// rejected at parse time).
pub const ENV_STRICT: &str = "GRAPH_STRICT";
/// Environment variable naming the engine backend for the factory.
pub const ENV_BACKEND: &str = "GRAPH_BACKEND";

/// Process configuration. Values come from the environment; a `Default`
/// instance is an in-memory backend with lax import and no default graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Canonical graph file loaded at startup, if any.
    pub default_graph_path: Option<PathBuf>,
    /// Reject unknown entity fields on import instead of routing them to
    /// the `extra` bag.
    pub strict_import: bool,
    /// Backend name resolved through the engine factory.
    pub backend: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_graph_path: None,
            strict_import: false,
            backend: "memory".to_string(),
        }
    }
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        let default_graph_path = std::env::var_os(ENV_DEFAULT_PATH).map(PathBuf::from);
        let strict_import = std::env::var(ENV_STRICT)
            .map(|v| is_truthy(&v))
            .unwrap_or(false);
        let backend = std::env::var(ENV_BACKEND).unwrap_or_else(|_| "memory".to_string());
        let config = Config {
            default_graph_path,
            strict_import,
            backend,
        };
        debug!(?config, "configuration resolved from environment");
        config
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_lax_memory_backend() {
        let c = Config::default();
        assert_eq!(c.backend, "memory");
        assert!(!c.strict_import);
        assert!(c.default_graph_path.is_none());
    }

    #[test]
    fn truthiness_accepts_common_spellings() {
        for v in ["1", "true", "TRUE", "yes", "on"] {
            assert!(is_truthy(v), "{v} should be truthy");
        }
        for v in ["0", "false", "no", "off", ""] {
            assert!(!is_truthy(v), "{v} should be falsy");
        }
    }
}
