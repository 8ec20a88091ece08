//! org-graph-core
//!
//! Domain model for the enterprise digital-twin graph platform.
//!
//! This crate defines:
//! - The closed entity catalog (30 tagged-variant kinds) and relationship
//!   catalog (57 types) with their shared domain/range schema table
//! - The risk scale and the fixed likelihood × impact matrix
//! - The industry scaling model (`scaled_range`, coefficient tables,
//!   size-tier multipliers, override merge)
//! - Error taxonomy and result alias used across the workspace
//! - Ambient configuration (`GRAPH_DEFAULT_PATH`, `GRAPH_STRICT`,
//!   `GRAPH_BACKEND`)
//!
//! # Example
//!
//! ```
//! use org_graph_core::types::{Entity, EntityKind, EntityType};
//! use org_graph_core::types::kinds::Person;
//!
//! let person = Entity::new("Ada Park", EntityKind::Person(Person::default()));
//! assert_eq!(person.entity_type(), EntityType::Person);
//! assert_eq!(person.version, 1);
//! ```

pub mod config;
pub mod error;
pub mod risk;
pub mod scaling;
pub mod schema;
pub mod types;
pub mod validation;

pub use config::Config;
pub use error::{BatchItemError, CoreError, CoreResult, ErrorKind};
pub use risk::{risk_level, RiskLevel, RISK_MATRIX};
pub use types::{
    Direction, Entity, EntityKind, EntityType, Relationship, RelationshipType, Severity,
};
