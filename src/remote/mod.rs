//! Remote Menu Source
//!
//! Fetches the published menu JSON. Single attempt, no retry.

mod menu_source;

pub use menu_source::{
    into_menu_items, HttpMenuSource, MenuResponse, MenuSource, RemoteMenuEntry, RemotePrice,
};
