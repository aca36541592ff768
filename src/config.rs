//! App Configuration
//!
//! Loaded from an optional JSON file; every field has a default, so a
//! partial file only overrides what it names.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::{DomainError, DomainResult};

pub const DEFAULT_MENU_ENDPOINT: &str =
    "https://raw.githubusercontent.com/Meta-Mobile-Developer-PC/Working-With-Data-API/main/capstone.json";
pub const DEFAULT_IMAGE_BASE_URL: &str =
    "https://github.com/Meta-Mobile-Developer-PC/Working-With-Data-API/blob/main/images";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub menu_endpoint: String,
    pub image_base_url: String,
    /// Category keys in filter pill order
    pub categories: Vec<String>,
    /// Search quiescence window
    pub debounce_ms: u64,
    pub request_timeout_secs: u64,
    pub data_dir: PathBuf,
    pub db_file_name: String,
    pub log_dir: PathBuf,
    pub app_name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            menu_endpoint: DEFAULT_MENU_ENDPOINT.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            categories: vec!["starters".into(), "mains".into(), "desserts".into()],
            debounce_ms: 500,
            request_timeout_secs: 30,
            data_dir: PathBuf::from("data"),
            db_file_name: "little_lemon.db".to_string(),
            log_dir: PathBuf::from("data").join("logs"),
            app_name: "LittleLemon".to_string(),
        }
    }
}

impl AppConfig {
    /// Read config from `path`; a missing file yields the defaults
    pub fn load(path: &Path) -> DomainResult<Self> {
        match fs::read_to_string(path) {
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| {
                DomainError::InvalidInput(format!("Bad config {}: {}", path.display(), e))
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(DomainError::Internal(format!(
                "Failed to read config {}: {}",
                path.display(),
                e
            ))),
        }
    }

    /// Place all app files (database, blobs, logs) under `dir`
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self.log_dir = self.data_dir.join("logs");
        self
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Database file path, creating the data directory if needed
    pub fn db_path(&self) -> DomainResult<PathBuf> {
        fs::create_dir_all(&self.data_dir).map_err(|e| {
            DomainError::StorageInit(format!("Cannot create {}: {}", self.data_dir.display(), e))
        })?;
        Ok(self.data_dir.join(&self.db_file_name))
    }

    pub fn blob_dir(&self) -> PathBuf {
        self.data_dir.join("blobs")
    }
}
