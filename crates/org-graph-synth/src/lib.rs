//! org-graph-synth
//!
//! Layered synthetic generation of an enterprise digital twin: profiles,
//! a seeded generation context, 30 generators run in twelve layers, the
//! relationship weaver with mirror-field denormalisation, and the quality
//! assessor.
//!
//! # Example
//!
//! ```
//! use org_graph_engine::MemoryGraph;
//! use org_graph_synth::{profiles, Orchestrator};
//!
//! let mut engine = MemoryGraph::new();
//! let outcome = Orchestrator::new(profiles::tech_company("Acme", 120), 42)
//!     .generate(&mut engine)
//!     .unwrap();
//! assert!(outcome.entity_count > 0);
//! ```

pub mod context;
pub mod generators;
pub mod orchestrator;
pub mod profiles;
pub mod quality;
pub mod templates;
pub mod weaver;

pub use context::GenerationContext;
pub use orchestrator::{GenerationOutcome, Orchestrator};
pub use profiles::{DepartmentSpec, NetworkSpec, OrgProfile};
pub use quality::{assess, QualityReport};
pub use weaver::{populate_mirror_fields, RelationshipWeaver};
