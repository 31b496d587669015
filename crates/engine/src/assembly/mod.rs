//! Infrastructure assembly.
//!
//! An [`InfrastructureConfig`] records explicit overrides; [`assemble`]
//! resolves everything else through a fixed defaulting chain and returns an
//! immutable [`Infrastructure`]. [`MappingInfrastructureFactory`] wraps the
//! two for callers that want one shared instance.

mod assemble;
mod capability;
mod config;
mod error;
mod factory;
mod infrastructure;

pub use assemble::assemble;
pub use capability::{Capability, Resolution, Source, RESOLUTION_ORDER};
pub use config::{InfrastructureConfig, InfrastructureConfigBuilder};
pub use error::{AssemblyError, InfrastructureCreationError};
pub use factory::MappingInfrastructureFactory;
pub use infrastructure::Infrastructure;
