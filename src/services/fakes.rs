//! Fakes for exercising the home pipeline without a network or a slow disk.

use async_trait::async_trait;
use serde_json::Number;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::domain::{DomainError, DomainResult, MenuItem};
use crate::remote::{MenuSource, RemoteMenuEntry, RemotePrice};
use crate::repository::{MenuRepository, Repository};

/// Menu source returning a fixed menu (or a fixed error) and counting calls
pub struct FakeMenuSource {
    pub entries: Vec<RemoteMenuEntry>,
    pub failure: Option<String>,
    pub fetch_calls: AtomicU64,
}

impl FakeMenuSource {
    pub fn with_entries(entries: Vec<RemoteMenuEntry>) -> Self {
        Self {
            entries,
            failure: None,
            fetch_calls: AtomicU64::new(0),
        }
    }

    /// Three dishes across two categories
    pub fn with_sample_menu() -> Self {
        Self::with_entries(vec![
            remote_entry("Greek Salad", "12.99", "starters"),
            remote_entry("Grilled Fish", "20", "mains"),
            remote_entry("Bruschetta", "7.99", "starters"),
        ])
    }

    pub fn failing(message: &str) -> Self {
        Self {
            entries: Vec::new(),
            failure: Some(message.to_string()),
            fetch_calls: AtomicU64::new(0),
        }
    }

    pub fn fetch_calls(&self) -> u64 {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MenuSource for FakeMenuSource {
    async fn fetch_menu(&self) -> DomainResult<Vec<RemoteMenuEntry>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(message) => Err(DomainError::Network(message.clone())),
            None => Ok(self.entries.clone()),
        }
    }
}

pub fn remote_entry(name: &str, price: &str, category: &str) -> RemoteMenuEntry {
    let price = price
        .parse::<Number>()
        .map(RemotePrice::Number)
        .unwrap_or_else(|_| RemotePrice::Text(price.to_string()));
    RemoteMenuEntry {
        name: name.to_string(),
        price,
        description: format!("{} from the kitchen", name),
        image: format!("{}.jpg", name.to_lowercase().replace(' ', "_")),
        category: category.to_string(),
    }
}

/// Wraps a real menu repository, delaying or failing filtered queries by
/// search term
pub struct SlowMenuRepository {
    inner: Arc<dyn MenuRepository>,
    delays: HashMap<String, Duration>,
    failing_terms: HashSet<String>,
    query_calls: AtomicU64,
}

impl SlowMenuRepository {
    pub fn new(inner: Arc<dyn MenuRepository>) -> Self {
        Self {
            inner,
            delays: HashMap::new(),
            failing_terms: HashSet::new(),
            query_calls: AtomicU64::new(0),
        }
    }

    pub fn with_delay(mut self, search_term: &str, delay: Duration) -> Self {
        self.delays.insert(search_term.to_string(), delay);
        self
    }

    pub fn failing_on(mut self, search_term: &str) -> Self {
        self.failing_terms.insert(search_term.to_string());
        self
    }

    pub fn query_calls(&self) -> u64 {
        self.query_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Repository<MenuItem> for SlowMenuRepository {
    async fn find_by_id(&self, id: u32) -> DomainResult<Option<MenuItem>> {
        self.inner.find_by_id(id).await
    }

    async fn list(&self) -> DomainResult<Vec<MenuItem>> {
        self.inner.list().await
    }
}

#[async_trait]
impl MenuRepository for SlowMenuRepository {
    async fn initialize(&self) -> DomainResult<()> {
        self.inner.initialize().await
    }

    async fn bulk_insert(&self, items: &[MenuItem]) -> DomainResult<()> {
        self.inner.bulk_insert(items).await
    }

    async fn query_filtered(
        &self,
        search_term: &str,
        categories: &[String],
    ) -> DomainResult<Vec<MenuItem>> {
        self.query_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(search_term) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing_terms.contains(search_term) {
            return Err(DomainError::StorageQuery(format!(
                "query for {:?} failed",
                search_term
            )));
        }
        self.inner.query_filtered(search_term, categories).await
    }
}
