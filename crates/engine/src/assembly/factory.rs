//! Managed, assemble-once access to an infrastructure.

use std::sync::{Arc, Mutex};

use super::assemble::assemble;
use super::config::InfrastructureConfig;
use super::error::InfrastructureCreationError;
use super::infrastructure::Infrastructure;

/// Holds a configuration and the infrastructure assembled from it.
///
/// The first successful [`get_or_assemble`](Self::get_or_assemble) publishes
/// the infrastructure; later calls return the same `Arc`. A failed attempt
/// publishes nothing and can be retried.
pub struct MappingInfrastructureFactory {
    config: InfrastructureConfig,
    infrastructure: Mutex<Option<Arc<Infrastructure>>>,
}

impl MappingInfrastructureFactory {
    pub fn new(config: InfrastructureConfig) -> Self {
        Self {
            config,
            infrastructure: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &InfrastructureConfig {
        &self.config
    }

    pub fn get_or_assemble(&self) -> Result<Arc<Infrastructure>, InfrastructureCreationError> {
        let mut slot = self
            .infrastructure
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(infrastructure) = slot.as_ref() {
            return Ok(Arc::clone(infrastructure));
        }

        let infrastructure = Arc::new(assemble(&self.config)?);
        *slot = Some(Arc::clone(&infrastructure));
        Ok(infrastructure)
    }

    /// The published infrastructure, if assembly has succeeded.
    pub fn get(&self) -> Option<Arc<Infrastructure>> {
        self.infrastructure
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}
