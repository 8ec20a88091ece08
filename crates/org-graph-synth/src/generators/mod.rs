//! Entity generators, one module per generation layer.
//!
//! Every generator is a stateless function `(count, &mut GenerationContext)
//! → Vec<Entity>`; the orchestrator runs them in the fixed layer order and
//! feeds results through the engine. Generators read earlier layers only
//! through the context pools.

pub mod capabilities;
pub mod compliance;
pub mod customers;
pub mod data;
pub mod facilities;
pub mod foundation;
pub mod initiatives;
pub mod organization;
pub mod people;
pub mod products;
pub mod technology;
pub mod vendors;
