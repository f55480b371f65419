//! Content Fetcher backed by the Cosmic headless CMS.

pub mod client;
pub mod config;
pub mod fetcher;
pub mod interface;

pub use client::CosmicClient;
pub use config::{ApiEnvironment, CosmicConfig};
pub use fetcher::{DesignFetcher, FetchError};
pub use interface::{ContentError, ContentSource, ObjectQuery, ObjectsPage};

#[cfg(test)]
pub(crate) mod tests;
