//! Repository Layer
//!
//! Data access abstractions and implementations.

mod traits;
mod db;
mod menu_repo;
mod blob_store;


pub use traits::{Repository, MenuRepository, BlobStore};
pub use db::{init_db, DbState};
pub use menu_repo::SqliteMenuRepository;
pub use blob_store::FileBlobStore;
