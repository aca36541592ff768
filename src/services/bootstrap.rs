//! Bootstrap Sequencer
//!
//! Cold-start path of the home screen: make sure the cache table exists,
//! read the cache, backfill it from the remote menu only when it is empty,
//! then load the profile. Steps run strictly in order and are never retried.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::{DomainResult, MenuItem, Profile};
use crate::remote::{into_menu_items, MenuSource};
use crate::repository::MenuRepository;
use super::profile::ProfileStore;

/// Home screen lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BootstrapPhase {
    #[default]
    Uninitialized,
    Seeding,
    Ready,
    Failed,
}

/// What a successful bootstrap hands to the home screen
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapOutcome {
    /// Full menu, ordered by id
    pub items: Vec<MenuItem>,
    pub profile: Option<Profile>,
    /// True when the cache was empty and the remote menu was fetched
    pub fetched_remote: bool,
}

pub struct BootstrapSequencer {
    menu: Arc<dyn MenuRepository>,
    source: Arc<dyn MenuSource>,
    profiles: ProfileStore,
}

impl BootstrapSequencer {
    pub fn new(
        menu: Arc<dyn MenuRepository>,
        source: Arc<dyn MenuSource>,
        profiles: ProfileStore,
    ) -> Self {
        Self { menu, source, profiles }
    }

    pub async fn run(&self) -> DomainResult<BootstrapOutcome> {
        self.menu.initialize().await?;

        let cached = self.menu.read_all().await?;
        let fetched_remote = cached.is_empty();

        let items = if fetched_remote {
            log::info!("Menu cache empty, fetching remote menu");
            let items = into_menu_items(self.source.fetch_menu().await?);
            self.menu.bulk_insert(&items).await?;
            items
        } else {
            log::info!("Loaded {} menu items from cache", cached.len());
            cached
        };

        let profile = self.profiles.load().await;

        Ok(BootstrapOutcome {
            items,
            profile,
            fetched_remote,
        })
    }
}
