//! Infrastructure implementations.
//!
//! Contains port traits and the default implementations of the services the
//! mapping runtime depends on.

pub mod clock;
pub mod config;
pub mod conversion;
pub mod database;
pub mod neo4j;
pub mod ports;
pub mod transaction;
pub mod validation;
