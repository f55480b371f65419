//! Cosmic bucket configuration.

use serde::{Deserialize, Serialize};

pub const PRODUCTION_API_URL: &str = "https://api.cosmicjs.com";
pub const STAGING_API_URL: &str = "https://api.cosmic-staging.com";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiEnvironment {
    #[default]
    Production,
    Staging,
}

impl ApiEnvironment {
    pub fn base_url(self) -> &'static str {
        match self {
            ApiEnvironment::Production => PRODUCTION_API_URL,
            ApiEnvironment::Staging => STAGING_API_URL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CosmicConfig {
    /// Bucket slug (direct value).
    pub bucket_slug: Option<String>,
    /// Or read the bucket slug from this environment variable.
    pub bucket_slug_env: Option<String>,
    /// Read key (direct value).
    pub read_key: Option<String>,
    /// Or read the key from this environment variable.
    pub read_key_env: Option<String>,
    pub api_environment: ApiEnvironment,
    /// Overrides the API host picked by `api_environment`.
    pub base_url: Option<String>,
    pub request_timeout_secs: u64,
}

impl Default for CosmicConfig {
    fn default() -> Self {
        Self {
            bucket_slug: None,
            bucket_slug_env: Some("COSMIC_BUCKET_SLUG".to_string()),
            read_key: None,
            read_key_env: Some("COSMIC_READ_KEY".to_string()),
            api_environment: ApiEnvironment::Production,
            base_url: None,
            request_timeout_secs: 30,
        }
    }
}

impl CosmicConfig {
    pub fn resolve_bucket_slug(&self) -> Option<String> {
        crate::config::resolve_secret(&self.bucket_slug, &self.bucket_slug_env)
    }

    pub fn resolve_read_key(&self) -> Option<String> {
        crate::config::resolve_secret(&self.read_key, &self.read_key_env)
    }

    pub fn api_base_url(&self) -> String {
        match self.base_url.as_deref() {
            Some(url) if !url.is_empty() => url.trim_end_matches('/').to_string(),
            _ => self.api_environment.base_url().to_string(),
        }
    }
}
