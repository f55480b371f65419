//! Shared config utilities for loading JSON config files and resolving
//! secrets from fields or environment variables.

use serde::de::DeserializeOwned;
use std::path::Path;

/// Generic load for any Serde config type with a `Default` implementation.
/// Falls back to `T::default()` if the file is missing or unparsable.
pub fn load_json_config<T: DeserializeOwned + Default>(path: &Path, label: &str) -> T {
    match std::fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<T>(&content) {
            Ok(config) => {
                tracing::info!(label, path = %path.display(), "loaded config");
                config
            }
            Err(e) => {
                tracing::warn!(
                    label,
                    path = %path.display(),
                    error = %e,
                    "failed to parse config, using defaults"
                );
                T::default()
            }
        },
        Err(_) => {
            tracing::info!(label, path = %path.display(), "no config file, using defaults");
            T::default()
        }
    }
}

/// Resolve a secret: check the direct field first,
/// then fall back to reading the environment variable named in `env_var`.
pub fn resolve_secret(value: &Option<String>, env_var: &Option<String>) -> Option<String> {
    if let Some(ref v) = value {
        if !v.is_empty() {
            return Some(v.clone());
        }
    }
    if let Some(ref name) = env_var {
        if let Ok(v) = std::env::var(name) {
            if !v.is_empty() {
                return Some(v);
            }
        }
    }
    None
}
