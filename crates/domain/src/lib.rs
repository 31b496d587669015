//! graphwire domain types.
//!
//! Pure data shared by the mapping runtime: identifiers, property values,
//! entity metadata, stored graph state and query rows. No I/O, no async.

pub mod error;
pub mod ids;
pub mod metadata;
pub mod query;
pub mod state;
pub mod value;

pub use error::DomainError;
pub use ids::{NodeId, RelationshipId, TransactionId};
pub use metadata::{EntityKind, EntityMetadata, IndexKind, PropertyMetadata};
pub use query::{QueryType, Row, RowValue, Statement};
pub use state::{EntityInstance, NodeState, PropertyContainer, RelationshipState};
pub use value::{Properties, PropertyValue, ValueKind};
