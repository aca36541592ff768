//! Profile Store
//!
//! Typed access to the profile blob. Reading is tolerant: a missing,
//! unreadable or malformed blob is "no profile", never an error.

use std::sync::Arc;

use crate::domain::{DomainError, DomainResult, Profile, PROFILE_KEY};
use crate::repository::BlobStore;

#[derive(Clone)]
pub struct ProfileStore {
    blobs: Arc<dyn BlobStore>,
}

impl ProfileStore {
    pub fn new(blobs: Arc<dyn BlobStore>) -> Self {
        Self { blobs }
    }

    pub async fn load(&self) -> Option<Profile> {
        match self.blobs.get(PROFILE_KEY).await {
            Ok(Some(raw)) => match decode_profile(&raw) {
                Ok(profile) => Some(profile),
                Err(e) => {
                    log::warn!("Ignoring stored profile: {}", e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                log::warn!("Could not read stored profile: {}", e);
                None
            }
        }
    }

    pub async fn save(&self, profile: &Profile) -> DomainResult<()> {
        let raw = serde_json::to_string(profile)
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        self.blobs.set(PROFILE_KEY, &raw).await
    }

    /// Forget the stored profile (log out)
    pub async fn clear(&self) -> DomainResult<()> {
        self.blobs.remove(PROFILE_KEY).await
    }
}

pub fn decode_profile(raw: &str) -> DomainResult<Profile> {
    serde_json::from_str(raw).map_err(|e| DomainError::ProfileDecode(e.to_string()))
}
