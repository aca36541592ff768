//! Home Screen State
//!
//! Every input to the home screen is a [`HomeEvent`]; [`HomeState::apply`]
//! is the only place state changes, and it answers with the [`Effect`]s the
//! runtime must carry out. No I/O happens here.

use crate::domain::{organize, DomainResult, FilterState, MenuItem, Profile, Section};
use crate::services::bootstrap::{BootstrapOutcome, BootstrapPhase};

#[derive(Debug)]
pub enum HomeEvent {
    /// Screen mounted (or remounted after a failure)
    Mounted,
    BootstrapSettled(DomainResult<BootstrapOutcome>),
    /// Raw text field content after a keystroke
    Keystroke(String),
    /// Debounced search term after the quiescence window
    SearchCommitted(String),
    /// Category pill pressed
    CategoryToggled(usize),
    QuerySettled {
        generation: u64,
        result: DomainResult<Vec<MenuItem>>,
    },
}

/// One filtered scan of the menu cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    pub generation: u64,
    pub search_term: String,
    /// Empty means no category restriction
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    StartBootstrap,
    /// (Re)start the debounce window for this text
    ScheduleCommit(String),
    RunQuery(QueryRequest),
    /// Show a user-visible notification
    Notify(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct HomeState {
    phase: BootstrapPhase,
    input_text: String,
    committed_term: String,
    filter: FilterState,
    sections: Vec<Section>,
    profile: Option<Profile>,
    /// Generation of the newest query issued
    latest_generation: u64,
    /// Generation of the newest query whose result was accepted or reported
    settled_generation: u64,
    /// Newest query failed and has not been reissued
    query_failed: bool,
}

impl HomeState {
    pub fn new(categories: Vec<String>) -> Self {
        Self {
            phase: BootstrapPhase::Uninitialized,
            input_text: String::new(),
            committed_term: String::new(),
            filter: FilterState::new(categories),
            sections: Vec::new(),
            profile: None,
            latest_generation: 0,
            settled_generation: 0,
            query_failed: false,
        }
    }

    pub fn phase(&self) -> BootstrapPhase {
        self.phase
    }

    /// Text field content, updated on every keystroke
    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    /// Search term the displayed sections were (or are being) queried with
    pub fn committed_term(&self) -> &str {
        &self.committed_term
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn latest_generation(&self) -> u64 {
        self.latest_generation
    }

    /// True while the newest issued query has not settled
    pub fn is_query_pending(&self) -> bool {
        self.settled_generation < self.latest_generation
    }

    pub fn apply(&mut self, event: HomeEvent) -> Vec<Effect> {
        match event {
            HomeEvent::Mounted => self.on_mounted(),
            HomeEvent::BootstrapSettled(result) => self.on_bootstrap_settled(result),
            HomeEvent::Keystroke(text) => {
                self.input_text = text.clone();
                vec![Effect::ScheduleCommit(text)]
            }
            HomeEvent::SearchCommitted(term) => self.on_search_committed(term),
            HomeEvent::CategoryToggled(index) => self.on_category_toggled(index),
            HomeEvent::QuerySettled { generation, result } => {
                self.on_query_settled(generation, result)
            }
        }
    }

    fn on_mounted(&mut self) -> Vec<Effect> {
        match self.phase {
            BootstrapPhase::Uninitialized | BootstrapPhase::Failed => {
                self.phase = BootstrapPhase::Seeding;
                vec![Effect::StartBootstrap]
            }
            BootstrapPhase::Ready if self.query_failed => {
                log::info!("Remount after failed query, retrying");
                vec![self.issue_query()]
            }
            BootstrapPhase::Seeding | BootstrapPhase::Ready => {
                log::debug!("Ignoring mount while {:?}", self.phase);
                Vec::new()
            }
        }
    }

    fn on_bootstrap_settled(&mut self, result: DomainResult<BootstrapOutcome>) -> Vec<Effect> {
        if self.phase != BootstrapPhase::Seeding {
            log::warn!("Bootstrap settled while {:?}, ignoring", self.phase);
            return Vec::new();
        }

        match result {
            Ok(outcome) => {
                self.phase = BootstrapPhase::Ready;
                self.sections = organize(&outcome.items);
                self.profile = outcome.profile;
                log::info!(
                    "Home ready with {} items in {} sections",
                    outcome.items.len(),
                    self.sections.len()
                );

                // Input that arrived during seeding has not been queried yet
                if !self.committed_term.is_empty() || !self.filter.is_unrestricted() {
                    vec![self.issue_query()]
                } else {
                    Vec::new()
                }
            }
            Err(e) => {
                log::error!("Home bootstrap failed: {}", e);
                self.phase = BootstrapPhase::Failed;
                self.sections.clear();
                self.profile = None;
                vec![Effect::Notify(e.to_string())]
            }
        }
    }

    fn on_search_committed(&mut self, term: String) -> Vec<Effect> {
        let retry = self.phase == BootstrapPhase::Ready && self.query_failed;
        if term == self.committed_term && !retry {
            return Vec::new();
        }
        self.committed_term = term;

        if self.phase == BootstrapPhase::Ready {
            vec![self.issue_query()]
        } else {
            Vec::new()
        }
    }

    fn on_category_toggled(&mut self, index: usize) -> Vec<Effect> {
        if !self.filter.toggle(index) {
            log::warn!("Ignoring toggle of unknown category slot {}", index);
            return Vec::new();
        }

        if self.phase == BootstrapPhase::Ready {
            vec![self.issue_query()]
        } else {
            Vec::new()
        }
    }

    fn on_query_settled(
        &mut self,
        generation: u64,
        result: DomainResult<Vec<MenuItem>>,
    ) -> Vec<Effect> {
        if generation != self.latest_generation {
            log::debug!(
                "Dropping stale query result {} (latest {})",
                generation,
                self.latest_generation
            );
            return Vec::new();
        }
        self.settled_generation = generation;

        self.query_failed = result.is_err();

        match result {
            Ok(items) => {
                self.sections = organize(&items);
                Vec::new()
            }
            Err(e) => {
                log::error!("Menu query {} failed: {}", generation, e);
                vec![Effect::Notify(e.to_string())]
            }
        }
    }

    /// Query for the current term and filter together
    fn issue_query(&mut self) -> Effect {
        self.latest_generation += 1;
        self.query_failed = false;
        Effect::RunQuery(QueryRequest {
            generation: self.latest_generation,
            search_term: self.committed_term.clone(),
            categories: self.filter.selected_categories(),
        })
    }
}
