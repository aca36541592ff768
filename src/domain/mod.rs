//! Domain Layer
//!
//! Menu entities, derived display structures and the error taxonomy.
//! This layer has NO external dependencies (except serde for serialization).

mod entity;
mod menu_item;
mod section;
mod filter;
mod profile;

pub use entity::{Entity, DomainError, DomainResult};
pub use menu_item::{MenuItem, MenuItemView, title_case};
pub use section::{organize, Section};
pub use filter::FilterState;
pub use profile::{Profile, PROFILE_KEY};
