//! HTTP surface: the page, its live clock stream and a health check.

mod routes;

pub use routes::{parse_viewport, routes, tick_events, AppState};
