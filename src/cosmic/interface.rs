use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

// ── Error Types ────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// The repository holds no objects of the requested type.
    #[error("no objects found")]
    NotFound,
    #[error("content API returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid response: {0}")]
    Decode(String),
    #[error("config error: {0}")]
    Config(String),
}

impl ContentError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ContentError::NotFound)
    }
}

// ── Query ──────────────────────────────────────────────

pub const DEFAULT_PROPS: &[&str] = &["id", "title", "slug", "metadata"];

/// One object-type query with a bounded field projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectQuery {
    pub object_type: String,
    pub props: Vec<String>,
    /// How many levels of object references inside metadata to resolve.
    pub depth: u8,
}

impl ObjectQuery {
    pub fn for_type(object_type: &str) -> Self {
        Self {
            object_type: object_type.to_string(),
            props: DEFAULT_PROPS.iter().map(|p| p.to_string()).collect(),
            depth: 1,
        }
    }
}

/// `{ objects, total, limit, skip }` as returned by the objects endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ObjectsPage {
    #[serde(default)]
    pub objects: Vec<Value>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub skip: Option<u64>,
}

// ── Source Trait ───────────────────────────────────────

/// Read-only access to a content repository.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Run one object query. A repository with no matching objects reports
    /// [`ContentError::NotFound`] rather than an empty page.
    async fn find_objects(&self, query: &ObjectQuery) -> Result<ObjectsPage, ContentError>;
}
