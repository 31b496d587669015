//! Port traits for the mapping runtime's collaborators.
//!
//! Every capability the assembly layer wires together is reached through one
//! of these traits, so any of them can be overridden with a custom
//! implementation. Concrete collaborators whose shape is fixed (mapping
//! context, entity-state handler, persister, remover, query executor) live in
//! `crate::mapping` instead.

mod database;
mod error;
mod mapping;
mod services;
mod testing;
pub mod types;

// =============================================================================
// Graph Store Ports
// =============================================================================
pub use database::{GraphDatabase, GraphDatabaseService, QueryEngine};

// =============================================================================
// Mapping Ports
// =============================================================================
pub use mapping::{
    EntityInstantiator, EntityStateFactory, TypeRepresentationStrategy,
    TypeRepresentationStrategyFactory,
};

// =============================================================================
// Service Ports
// =============================================================================
pub use services::{ConversionService, IndexProvider, ResultConverter, TransactionManager, Validator};

pub use types::{
    ConstraintViolation, QueryResult, ResultTarget, ResultValue, TransactionInfo,
    TransactionStatus,
};

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use database::{MockGraphDatabase, MockGraphDatabaseService, MockQueryEngine};

#[cfg(test)]
pub use mapping::{
    MockEntityInstantiator, MockEntityStateFactory, MockTypeRepresentationStrategy,
    MockTypeRepresentationStrategyFactory,
};

#[cfg(test)]
pub use services::{
    MockConversionService, MockIndexProvider, MockResultConverter, MockTransactionManager,
    MockValidator,
};

#[cfg(test)]
pub use testing::MockClockPort;

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::ClockPort;

// =============================================================================
// Error Types
// =============================================================================
pub use error::{ConversionError, MappingError, RepoError, TransactionError};
