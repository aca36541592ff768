//! Home Controller
//!
//! Runs the home screen state machine on a single tokio task. UI callbacks
//! become events on a channel; bootstrap, debounce and query completions are
//! posted back onto the same channel, so `HomeState::apply` only ever runs
//! on the event loop.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::remote::MenuSource;
use crate::repository::{BlobStore, MenuRepository};
use crate::services::bootstrap::BootstrapSequencer;
use crate::services::debounce::Debouncer;
use crate::services::notify::Notifier;
use crate::services::profile::ProfileStore;
use super::state::{Effect, HomeEvent, HomeState, QueryRequest};

/// Collaborators the home screen talks to
#[derive(Clone)]
pub struct HomeServices {
    pub menu: Arc<dyn MenuRepository>,
    pub source: Arc<dyn MenuSource>,
    pub blobs: Arc<dyn BlobStore>,
    pub notifier: Arc<dyn Notifier>,
}

/// Handle to a running home screen event loop. Dropping it stops the loop.
pub struct HomeController {
    events: mpsc::UnboundedSender<HomeEvent>,
    state: watch::Receiver<HomeState>,
    task: JoinHandle<()>,
}

impl HomeController {
    /// Start the event loop on the current tokio runtime
    pub fn spawn(services: HomeServices, categories: Vec<String>, debounce: Duration) -> Self {
        let (events, inbox) = mpsc::unbounded_channel();
        let initial = HomeState::new(categories);
        let (published, state) = watch::channel(initial.clone());

        let event_loop = EventLoop {
            state: initial,
            services,
            debouncer: Debouncer::new(debounce),
            events: events.clone(),
            published,
        };
        let task = tokio::spawn(event_loop.run(inbox));

        Self { events, state, task }
    }

    pub fn mount(&self) {
        self.send(HomeEvent::Mounted);
    }

    /// Text field changed to `text`
    pub fn type_text(&self, text: impl Into<String>) {
        self.send(HomeEvent::Keystroke(text.into()));
    }

    pub fn toggle_category(&self, index: usize) {
        self.send(HomeEvent::CategoryToggled(index));
    }

    /// Latest published state
    pub fn snapshot(&self) -> HomeState {
        self.state.borrow().clone()
    }

    /// Receiver notified after every processed event
    pub fn subscribe(&self) -> watch::Receiver<HomeState> {
        self.state.clone()
    }

    /// Wait until the published state satisfies `predicate`
    pub async fn wait_until<F>(&self, predicate: F) -> HomeState
    where
        F: FnMut(&HomeState) -> bool,
    {
        let mut rx = self.state.clone();
        let reached = rx.wait_for(predicate).await.map(|state| (*state).clone());
        reached.unwrap_or_else(|_| self.snapshot())
    }

    fn send(&self, event: HomeEvent) {
        if self.events.send(event).is_err() {
            log::warn!("Home event loop has stopped, dropping event");
        }
    }
}

impl Drop for HomeController {
    fn drop(&mut self) {
        self.task.abort();
    }
}

struct EventLoop {
    state: HomeState,
    services: HomeServices,
    debouncer: Debouncer,
    events: mpsc::UnboundedSender<HomeEvent>,
    published: watch::Sender<HomeState>,
}

impl EventLoop {
    async fn run(mut self, mut inbox: mpsc::UnboundedReceiver<HomeEvent>) {
        while let Some(event) = inbox.recv().await {
            for effect in self.state.apply(event) {
                self.execute(effect);
            }
            self.published.send_replace(self.state.clone());
        }
    }

    fn execute(&mut self, effect: Effect) {
        match effect {
            Effect::StartBootstrap => self.start_bootstrap(),
            Effect::ScheduleCommit(text) => {
                let events = self.events.clone();
                self.debouncer.schedule(text, move |term| {
                    let _ = events.send(HomeEvent::SearchCommitted(term));
                });
            }
            Effect::RunQuery(request) => self.run_query(request),
            Effect::Notify(message) => self.services.notifier.notify(&message),
        }
    }

    fn start_bootstrap(&self) {
        let sequencer = BootstrapSequencer::new(
            Arc::clone(&self.services.menu),
            Arc::clone(&self.services.source),
            ProfileStore::new(Arc::clone(&self.services.blobs)),
        );
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = sequencer.run().await;
            let _ = events.send(HomeEvent::BootstrapSettled(result));
        });
    }

    fn run_query(&self, request: QueryRequest) {
        log::debug!(
            "Query {}: term {:?}, categories {:?}",
            request.generation,
            request.search_term,
            request.categories
        );
        let menu = Arc::clone(&self.services.menu);
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = menu
                .query_filtered(&request.search_term, &request.categories)
                .await;
            let _ = events.send(HomeEvent::QuerySettled {
                generation: request.generation,
                result,
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{init_db, FileBlobStore, SqliteMenuRepository};
    use crate::services::bootstrap::BootstrapPhase;
    use crate::services::fakes::{remote_entry, FakeMenuSource, SlowMenuRepository};
    use crate::services::notify::RecordingNotifier;
    use std::path::PathBuf;
    use tokio::time::sleep;

    const DEBOUNCE: Duration = Duration::from_millis(500);

    struct Harness {
        controller: HomeController,
        menu: Arc<SlowMenuRepository>,
        notifier: Arc<RecordingNotifier>,
        _dir: tempfile::TempDir,
    }

    async fn harness(configure: impl FnOnce(SlowMenuRepository) -> SlowMenuRepository) -> Harness {
        let dir = tempfile::tempdir().unwrap();
        let db_state = init_db(&PathBuf::from(":memory:")).await.unwrap();
        let sqlite = Arc::new(SqliteMenuRepository::new(db_state.connection()));
        let menu = Arc::new(configure(SlowMenuRepository::new(sqlite)));
        let notifier = Arc::new(RecordingNotifier::new());
        let source = Arc::new(FakeMenuSource::with_entries(vec![
            remote_entry("Greek Salad", "12.99", "starters"),
            remote_entry("Pasta", "6.99", "mains"),
            remote_entry("Spanakopita", "5.5", "starters"),
            remote_entry("Lemon Dessert", "4.99", "desserts"),
        ]));

        let services = HomeServices {
            menu: menu.clone(),
            source,
            blobs: Arc::new(FileBlobStore::new(dir.path())),
            notifier: notifier.clone(),
        };
        let categories = vec!["starters".into(), "mains".into(), "desserts".into()];
        let controller = HomeController::spawn(services, categories, DEBOUNCE);

        controller.mount();
        controller
            .wait_until(|s| s.phase() == BootstrapPhase::Ready)
            .await;

        Harness {
            controller,
            menu,
            notifier,
            _dir: dir,
        }
    }

    fn item_names(state: &HomeState) -> Vec<String> {
        state
            .sections()
            .iter()
            .flat_map(|s| s.items.iter().map(|i| i.name.clone()))
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_burst_issues_one_query() {
        let h = harness(|repo| repo).await;

        for (i, text) in ["p", "pa", "pas", "past", "pasta"].into_iter().enumerate() {
            if i > 0 {
                sleep(Duration::from_millis(100)).await;
            }
            h.controller.type_text(text);
        }
        sleep(Duration::from_millis(50)).await;
        let typing = h.controller.snapshot();
        assert_eq!(typing.input_text(), "pasta");
        assert_eq!(typing.committed_term(), "");

        sleep(Duration::from_millis(600)).await;
        let state = h
            .controller
            .wait_until(|s| s.committed_term() == "pasta" && !s.is_query_pending())
            .await;

        assert_eq!(h.menu.query_calls(), 1);
        assert_eq!(item_names(&state), vec!["Pasta"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_toggle_queries_without_debounce() {
        let h = harness(|repo| repo).await;

        h.controller.toggle_category(2);
        let state = h
            .controller
            .wait_until(|s| s.latest_generation() == 1 && !s.is_query_pending())
            .await;

        assert_eq!(item_names(&state), vec!["Lemon Dessert"]);
        assert!(state.filter().is_active(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_stale_query_never_wins() {
        let h = harness(|repo| repo.with_delay("pa", Duration::from_secs(2))).await;

        h.controller.type_text("pa");
        sleep(Duration::from_millis(550)).await;
        assert_eq!(h.controller.snapshot().committed_term(), "pa");

        h.controller.type_text("pasta");
        sleep(Duration::from_millis(550)).await;
        let state = h
            .controller
            .wait_until(|s| s.committed_term() == "pasta" && !s.is_query_pending())
            .await;
        assert_eq!(item_names(&state), vec!["Pasta"]);

        // "pa" resolves here with Pasta and Spanakopita
        sleep(Duration::from_secs(3)).await;
        assert_eq!(h.menu.query_calls(), 2);
        assert_eq!(item_names(&h.controller.snapshot()), vec!["Pasta"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_query_keeps_sections_and_notifies() {
        let h = harness(|repo| repo.failing_on("zzz")).await;
        let before = h.controller.snapshot().sections().to_vec();

        h.controller.type_text("zzz");
        sleep(Duration::from_millis(600)).await;
        let state = h
            .controller
            .wait_until(|s| s.committed_term() == "zzz" && !s.is_query_pending())
            .await;

        assert_eq!(state.sections(), before.as_slice());
        assert_eq!(h.notifier.count(), 1);
    }

    #[tokio::test]
    async fn test_bootstrap_failure_notifies_once() {
        let dir = tempfile::tempdir().unwrap();
        let db_state = init_db(&PathBuf::from(":memory:")).await.unwrap();
        let notifier = Arc::new(RecordingNotifier::new());
        let services = HomeServices {
            menu: Arc::new(SqliteMenuRepository::new(db_state.connection())),
            source: Arc::new(FakeMenuSource::failing("no route to host")),
            blobs: Arc::new(FileBlobStore::new(dir.path())),
            notifier: notifier.clone(),
        };
        let controller = HomeController::spawn(services, vec!["mains".into()], DEBOUNCE);

        controller.mount();
        let state = controller
            .wait_until(|s| s.phase() == BootstrapPhase::Failed)
            .await;

        assert!(state.sections().is_empty());
        assert_eq!(notifier.messages(), vec!["Network error: no route to host".to_string()]);
    }
}
