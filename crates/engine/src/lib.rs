//! graphwire engine library.
//!
//! Assembles the object-graph mapping runtime over a Neo4j store.
//!
//! ## Structure
//!
//! - `assembly/` - Defaulting chain that turns overrides into an `Infrastructure`
//! - `mapping/` - Default mapping collaborators (context, persister, remover, ...)
//! - `infrastructure/` - Port traits and their adapters (Neo4j, clock, transactions)
//! - `app` - Application composition

pub mod app;
pub mod assembly;
pub mod infrastructure;
pub mod mapping;

/// Shared builders for unit tests.
#[cfg(test)]
mod test_fixtures;

pub use app::App;
pub use assembly::{
    assemble, AssemblyError, Infrastructure, InfrastructureConfig, InfrastructureCreationError,
    MappingInfrastructureFactory,
};
