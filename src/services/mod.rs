//! Services Layer
//!
//! Orchestration on top of the repositories:
//! - bootstrap: cold-start cache fill
//! - home: search/filter coordination for the home screen
//! - debounce: cancelable trailing-edge timer
//! - profile: typed profile blob access
//! - notify: user-visible notifications

pub mod bootstrap;
pub mod debounce;
#[cfg(test)]
pub(crate) mod fakes;
pub mod home;
pub mod notify;
pub mod profile;

pub use bootstrap::{BootstrapOutcome, BootstrapPhase, BootstrapSequencer};
pub use debounce::Debouncer;
pub use home::{Effect, HomeController, HomeEvent, HomeServices, HomeState, QueryRequest};
pub use notify::{LogNotifier, Notifier, RecordingNotifier};
pub use profile::ProfileStore;
