//! Home Screen Query Coordinator
//!
//! - state: pure reducer over home screen events
//! - controller: tokio event loop executing the reducer's effects

mod state;
mod controller;

pub use state::{Effect, HomeEvent, HomeState, QueryRequest};
pub use controller::{HomeController, HomeServices};
