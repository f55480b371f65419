use crate::cosmic::client::CosmicClient;
use crate::cosmic::interface::{ContentError, ContentSource, ObjectQuery, ObjectsPage};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_BUCKET: &str = "clock-bucket";
pub const TEST_READ_KEY: &str = "read-key-123";

pub const OBJECT_TYPES: [&str; 4] = [
    "design-themes",
    "time-displays",
    "layout-variations",
    "visual-effects",
];

// ── Fragment JSON builders ──────────────────────────────────

pub fn theme_json(slug: &str) -> Value {
    json!({
        "id": format!("theme-{}", slug),
        "slug": slug,
        "title": format!("Theme {}", slug),
        "metadata": {
            "color_palette": { "primary": "#112233", "text": "#fafafa" },
            "background_config": { "gradient": "linear-gradient(#123, #456)" }
        }
    })
}

pub fn display_json(slug: &str, format: &str) -> Value {
    json!({
        "id": format!("display-{}", slug),
        "slug": slug,
        "title": format!("Display {}", slug),
        "metadata": {
            "time_format": { "key": format, "value": format },
            "font_size_range": "8rem"
        }
    })
}

pub fn layout_json(slug: &str) -> Value {
    json!({
        "id": format!("layout-{}", slug),
        "slug": slug,
        "title": format!("Layout {}", slug),
        "metadata": {
            "position_config": { "position": "absolute", "top": "10%", "left": "10%" },
            "responsive_rules": { "mobile": { "top": "2%" } }
        }
    })
}

pub fn effect_json(slug: &str) -> Value {
    json!({
        "id": format!("effect-{}", slug),
        "slug": slug,
        "title": format!("Effect {}", slug),
        "metadata": {
            "animation_duration": "2s",
            "animation_config": { "keyframes": "from { opacity: 0 } to { opacity: 1 }" }
        }
    })
}

pub fn page_json(objects: Vec<Value>) -> Value {
    let total = objects.len();
    json!({ "objects": objects, "total": total, "limit": 1000, "skip": 0 })
}

// ── In-memory source ────────────────────────────────────────

pub enum Canned {
    Objects(Vec<Value>),
    NotFound,
    Status(u16),
}

/// A `ContentSource` that answers from canned responses keyed by object type.
pub struct StaticSource {
    responses: HashMap<String, Canned>,
    calls: AtomicUsize,
}

impl StaticSource {
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with(mut self, object_type: &str, canned: Canned) -> Self {
        self.responses.insert(object_type.to_string(), canned);
        self
    }

    /// One fragment of every kind.
    pub fn seeded() -> Self {
        Self::new()
            .with("design-themes", Canned::Objects(vec![theme_json("aurora")]))
            .with("time-displays", Canned::Objects(vec![display_json("mono", "24hour")]))
            .with("layout-variations", Canned::Objects(vec![layout_json("offset")]))
            .with("visual-effects", Canned::Objects(vec![effect_json("fade")]))
    }

    /// Every catalog reports "not found".
    pub fn empty() -> Self {
        OBJECT_TYPES
            .iter()
            .fold(Self::new(), |source, t| source.with(t, Canned::NotFound))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl ContentSource for StaticSource {
    async fn find_objects(&self, query: &ObjectQuery) -> Result<ObjectsPage, ContentError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        match self.responses.get(&query.object_type) {
            Some(Canned::Objects(objects)) => Ok(ObjectsPage {
                total: objects.len() as u64,
                objects: objects.clone(),
                limit: None,
                skip: None,
            }),
            Some(Canned::Status(status)) => Err(ContentError::Status {
                status: *status,
                body: "canned failure".to_string(),
            }),
            Some(Canned::NotFound) | None => Err(ContentError::NotFound),
        }
    }
}

// ── Mock server helpers ─────────────────────────────────────

/// A client pointed at the mock server. Skips the system proxy, which can
/// interfere with wiremock's localhost listener.
pub fn mock_client(server: &MockServer) -> CosmicClient {
    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    CosmicClient::with_client(
        http,
        &server.uri(),
        TEST_BUCKET,
        Some(TEST_READ_KEY.to_string()),
    )
}

fn objects_path() -> String {
    format!("/v3/buckets/{}/objects", TEST_BUCKET)
}

fn type_filter(object_type: &str) -> String {
    json!({ "type": object_type }).to_string()
}

pub async fn mount_objects(server: &MockServer, object_type: &str, objects: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path(objects_path()))
        .and(query_param("query", type_filter(object_type)))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(objects)))
        .mount(server)
        .await;
}

pub async fn mount_status(server: &MockServer, object_type: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(objects_path()))
        .and(query_param("query", type_filter(object_type)))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!({
            "status": status,
            "message": "No objects found for your query"
        })))
        .mount(server)
        .await;
}
