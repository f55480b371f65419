//! Cosmic REST client: `GET /v3/buckets/{slug}/objects`.

use super::config::CosmicConfig;
use super::interface::{ContentError, ContentSource, ObjectQuery, ObjectsPage};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

pub struct CosmicClient {
    client: Client,
    base_url: String,
    bucket_slug: String,
    read_key: Option<String>,
}

impl CosmicClient {
    /// Use a preconfigured HTTP client (timeouts, proxies).
    pub fn with_client(
        client: Client,
        base_url: &str,
        bucket_slug: &str,
        read_key: Option<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            bucket_slug: bucket_slug.to_string(),
            read_key,
        }
    }

    pub fn from_config(config: &CosmicConfig) -> Result<Self, ContentError> {
        let bucket_slug = config
            .resolve_bucket_slug()
            .ok_or_else(|| ContentError::Config("no bucket slug configured".to_string()))?;
        let read_key = config.resolve_read_key();
        if read_key.is_none() {
            tracing::warn!(bucket = %bucket_slug, "no read key configured, requests may be rejected");
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self::with_client(
            client,
            &config.api_base_url(),
            &bucket_slug,
            read_key,
        ))
    }

    pub fn bucket_slug(&self) -> &str {
        &self.bucket_slug
    }

    fn objects_url(&self) -> String {
        format!("{}/v3/buckets/{}/objects", self.base_url, self.bucket_slug)
    }
}

#[async_trait]
impl ContentSource for CosmicClient {
    async fn find_objects(&self, query: &ObjectQuery) -> Result<ObjectsPage, ContentError> {
        let filter = serde_json::json!({ "type": query.object_type }).to_string();
        let mut params: Vec<(&str, String)> = vec![
            ("query", filter),
            ("props", query.props.join(",")),
            ("depth", query.depth.to_string()),
        ];
        if let Some(key) = &self.read_key {
            params.push(("read_key", key.clone()));
        }

        tracing::debug!(object_type = %query.object_type, "querying cosmic objects");

        let res = self.client.get(self.objects_url()).query(&params).send().await?;

        let status = res.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ContentError::NotFound);
        }
        if !status.is_success() {
            let body = res
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ContentError::Status {
                status: status.as_u16(),
                body,
            });
        }

        res.json::<ObjectsPage>()
            .await
            .map_err(|e| ContentError::Decode(e.to_string()))
    }
}
