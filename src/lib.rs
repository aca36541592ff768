//! Little Lemon Backend
//!
//! Layered architecture:
//! - domain: Menu entities, sections, filters, profile and errors
//! - repository: SQLite menu cache and key-value blob store
//! - remote: HTTP menu source
//! - services: Bootstrap, debounced search coordination, notifications
//! - config: App configuration

use std::sync::Arc;

pub mod config;
pub mod domain;
pub mod remote;
pub mod repository;
pub mod services;

pub use config::AppConfig;

use domain::DomainResult;
use remote::HttpMenuSource;
use repository::{init_db, DbState, FileBlobStore, MenuRepository, SqliteMenuRepository};
use services::{HomeController, HomeServices, Notifier, ProfileStore};

/// Application state shared across screens
pub struct AppState {
    pub db_state: DbState,
    pub config: AppConfig,
    menu: Arc<SqliteMenuRepository>,
    source: Arc<HttpMenuSource>,
    blobs: Arc<FileBlobStore>,
}

impl AppState {
    /// Open the database and build the collaborators described by `config`
    pub async fn open(config: AppConfig) -> DomainResult<Self> {
        let db_path = config.db_path()?;

        let db_state = match init_db(&db_path).await {
            Ok(state) => state,
            Err(e) => {
                let _ = rolling_logger::error(&format!("DB init failed: {}", e));
                return Err(e);
            }
        };
        log::info!("Database ready at {}", db_path.display());

        let menu = Arc::new(SqliteMenuRepository::new(db_state.connection()));
        let source = Arc::new(HttpMenuSource::new(
            config.menu_endpoint.clone(),
            config.request_timeout(),
        )?);
        let blobs = Arc::new(FileBlobStore::new(config.blob_dir()));

        Ok(Self {
            db_state,
            config,
            menu,
            source,
            blobs,
        })
    }

    pub fn menu(&self) -> Arc<dyn MenuRepository> {
        self.menu.clone()
    }

    pub fn profiles(&self) -> ProfileStore {
        ProfileStore::new(self.blobs.clone())
    }

    /// Start a home screen event loop; call `mount()` on it to bootstrap
    pub fn home_controller(&self, notifier: Arc<dyn Notifier>) -> HomeController {
        let services = HomeServices {
            menu: self.menu.clone(),
            source: self.source.clone(),
            blobs: self.blobs.clone(),
            notifier,
        };
        HomeController::spawn(services, self.config.categories.clone(), self.config.debounce())
    }
}

/// Route `log` output into the rolling log file under `config.log_dir`
pub fn init_logging(config: &AppConfig) -> Result<(), String> {
    rolling_logger::init_logger(config.log_dir.clone(), &config.app_name)
}
