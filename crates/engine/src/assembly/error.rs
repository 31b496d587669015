//! Assembly failures.

use graphwire_domain::{EntityKind, QueryType};

use crate::infrastructure::ports::{MappingError, RepoError};

/// The step of assembly that failed and why.
#[derive(Debug, thiserror::Error)]
pub enum AssemblyError {
    #[error("Neither a graph database nor a graph database service was configured")]
    MissingDatabase,

    #[error("No transaction manager was configured")]
    MissingTransactionManager,

    #[error("Default mapping context could not be built: {0}")]
    MappingContext(#[source] MappingError),

    #[error("No {kind} type representation strategy: {source}")]
    TypeRepresentation {
        kind: EntityKind,
        #[source]
        source: MappingError,
    },

    #[error("No {query_type} query engine: {source}")]
    QueryEngine {
        query_type: QueryType,
        #[source]
        source: RepoError,
    },
}

/// Raised by the one-shot and managed constructors when assembly fails. The
/// failing step is available through `source()`.
#[derive(Debug, thiserror::Error)]
#[error("Error creating infrastructure")]
pub struct InfrastructureCreationError {
    #[source]
    source: AssemblyError,
}

impl InfrastructureCreationError {
    pub fn assembly_error(&self) -> &AssemblyError {
        &self.source
    }

    pub fn into_assembly_error(self) -> AssemblyError {
        self.source
    }
}

impl From<AssemblyError> for InfrastructureCreationError {
    fn from(source: AssemblyError) -> Self {
        Self { source }
    }
}
