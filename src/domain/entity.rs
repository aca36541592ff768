//! Domain Layer - Core Entity Trait
//!
//! This trait defines the basic contract for all domain entities.
//! All entities must have a unique ID and be thread-safe.

use serde::{Deserialize, Serialize};

/// Core trait for all domain entities
pub trait Entity: Sized + Send + Sync + Clone {
    /// The type of the entity's unique identifier
    type Id: Copy + Eq + std::hash::Hash + Send + Sync;

    /// Returns the entity's unique identifier
    fn id(&self) -> Self::Id;
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DomainError {
    NotFound(String),
    InvalidInput(String),
    /// Remote fetch failed, returned non-2xx, or returned a body that is not the menu JSON
    Network(String),
    /// Local store could not be opened or its table created
    StorageInit(String),
    /// A write to the local store failed (nothing was kept)
    StorageWrite(String),
    /// A read or filtered scan of the local store failed
    StorageQuery(String),
    /// Stored profile blob is not valid profile JSON; recovered as "no profile"
    ProfileDecode(String),
    Internal(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::NotFound(msg) => write!(f, "Not found: {}", msg),
            DomainError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            DomainError::Network(msg) => write!(f, "Network error: {}", msg),
            DomainError::StorageInit(msg) => write!(f, "Storage unavailable: {}", msg),
            DomainError::StorageWrite(msg) => write!(f, "Storage write failed: {}", msg),
            DomainError::StorageQuery(msg) => write!(f, "Storage query failed: {}", msg),
            DomainError::ProfileDecode(msg) => write!(f, "Profile decode failed: {}", msg),
            DomainError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
