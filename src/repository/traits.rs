//! Repository Layer - Core Traits
//!
//! Defines the abstract interfaces for data access.
//! Implementations can use SQLite, files, in-memory fakes, etc.

use async_trait::async_trait;
use crate::domain::{Entity, MenuItem, DomainResult};

/// Core read-side repository trait
///
/// Generic over any Entity type.
/// All operations are async to support various backends.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Find entity by ID
    async fn find_by_id(&self, id: T::Id) -> DomainResult<Option<T>>;

    /// List all entities, ordered by ID ascending
    async fn list(&self) -> DomainResult<Vec<T>>;
}

/// Local menu cache
#[async_trait]
pub trait MenuRepository: Repository<MenuItem> {
    /// Ensure the backing table exists. Safe to call repeatedly.
    async fn initialize(&self) -> DomainResult<()>;

    /// Insert all items or none of them
    async fn bulk_insert(&self, items: &[MenuItem]) -> DomainResult<()>;

    /// Full scan ordered by ID ascending; empty when nothing is cached,
    /// including before `initialize`
    async fn read_all(&self) -> DomainResult<Vec<MenuItem>> {
        self.list().await
    }

    /// Items whose name contains `search_term` (case-insensitive), restricted
    /// to `categories` unless it is empty. Case folding covers ASCII letters
    /// only: "CRÈME" does not match "Crème".
    async fn query_filtered(
        &self,
        search_term: &str,
        categories: &[String],
    ) -> DomainResult<Vec<MenuItem>>;
}

/// Opaque key-value store of serialized blobs
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Stored value for `key`, `None` if it was never written
    async fn get(&self, key: &str) -> DomainResult<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> DomainResult<()>;

    /// Remove `key`; removing a missing key is not an error
    async fn remove(&self, key: &str) -> DomainResult<()>;
}
