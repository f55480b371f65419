//! Process-wide configuration: HTTP bind address, Cosmic bucket and
//! presentation knobs, persisted as one JSON file.

use crate::config::load_json_config;
use crate::cosmic::CosmicConfig;
use crate::shell::TICK_PERIOD;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_PATH_ENV: &str = "TIMECANVAS_CONFIG";
const CONFIG_LABEL: &str = "app";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub cosmic: CosmicConfig,
    pub presentation: PresentationConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationConfig {
    /// Show the fragment titles overlay.
    pub dev_mode: bool,
    /// Or switch it on through this environment variable.
    pub dev_mode_env: Option<String>,
    pub tick_interval_ms: u64,
    /// How long a rendered page may take to open its clock stream.
    pub session_ttl_secs: u64,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            dev_mode: false,
            dev_mode_env: Some("TIMECANVAS_DEV".to_string()),
            tick_interval_ms: TICK_PERIOD.as_millis() as u64,
            session_ttl_secs: 300,
        }
    }
}

impl PresentationConfig {
    pub fn resolve_dev_mode(&self) -> bool {
        if self.dev_mode {
            return true;
        }
        self.dev_mode_env
            .as_ref()
            .and_then(|name| std::env::var(name).ok())
            .is_some_and(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
    }

    /// Zero would spin the ticker, so it is clamped to one millisecond.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }
}

impl AppConfig {
    /// `<config dir>/timecanvas/config.json`, or `./config.json` when the
    /// platform has no config dir.
    pub fn default_path() -> PathBuf {
        dirs_next::config_dir()
            .map(|dir| dir.join("timecanvas"))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config.json")
    }

    /// `TIMECANVAS_CONFIG` wins over the default location.
    pub fn config_path() -> PathBuf {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.is_empty() => PathBuf::from(path),
            _ => Self::default_path(),
        }
    }

    pub fn load(path: &Path) -> Self {
        load_json_config(path, CONFIG_LABEL)
    }

    /// Unparsable hosts fall back to loopback.
    pub fn socket_addr(&self) -> SocketAddr {
        let ip = self.server.host.parse::<IpAddr>().unwrap_or_else(|_| {
            tracing::warn!(host = %self.server.host, "invalid bind host, using 127.0.0.1");
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        });
        SocketAddr::new(ip, self.server.port)
    }
}
