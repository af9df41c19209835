//! Client-side search, filtering and rendering for the charity events API.
//!
//! [`search::SearchController`] owns the [`store::EventStore`] of every fetched
//! event and drives both search modes; [`render`] turns events into HTML.

pub mod api;
pub mod config;
pub mod debounce;
pub mod detail;
pub mod error;
pub mod models;
pub mod refresh;
pub mod render;
pub mod search;
pub mod store;

pub use api::{EventsApi, HttpEventsApi};
pub use config::ClientConfig;
pub use detail::EventPage;
pub use error::ClientError;
pub use refresh::StatsRefresher;
pub use search::{SearchController, SearchInputDriver, SearchMode};
pub use store::EventStore;
