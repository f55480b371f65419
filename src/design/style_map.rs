//! Style property maps as authored in CMS metadata and as produced by the
//! style synthesizer.
//!
//! Keys are kept exactly as authored (usually camelCase, e.g. `alignItems`)
//! and converted to CSS property names only when rendered.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Properties that take bare numbers; every other numeric value gets `px`.
const UNITLESS_PROPERTIES: &[&str] = &[
    "animationIterationCount",
    "aspectRatio",
    "columnCount",
    "flex",
    "flexGrow",
    "flexShrink",
    "fontWeight",
    "gridColumn",
    "gridRow",
    "lineHeight",
    "opacity",
    "order",
    "orphans",
    "scale",
    "widows",
    "zIndex",
    "zoom",
];

/// Ordered map of style property → rendered CSS value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StyleMap(BTreeMap<String, String>);

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an arbitrary JSON object. Strings are kept verbatim, numbers
    /// are rendered the way inline React styles render them, and `null`,
    /// arrays and nested objects are dropped.
    pub fn from_json(object: &serde_json::Map<String, Value>) -> Self {
        let mut map = Self::new();
        for (property, value) in object {
            if let Some(rendered) = css_value(property, value) {
                map.insert(property.clone(), rendered);
            }
        }
        map
    }

    pub fn insert(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.0.insert(property.into(), value.into());
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.0.get(property).map(String::as_str)
    }

    pub fn contains(&self, property: &str) -> bool {
        self.0.contains_key(property)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Overlay `other` on top of `self`; keys in `other` win.
    pub fn merge(&mut self, other: &StyleMap) {
        for (k, v) in &other.0 {
            self.0.insert(k.clone(), v.clone());
        }
    }

    /// Render as a `style` attribute body: `align-items: center; display: flex`.
    pub fn to_inline_css(&self) -> String {
        self.declarations(false).join("; ")
    }

    /// Render as declarations for a stylesheet rule, optionally `!important`.
    pub fn declarations(&self, important: bool) -> Vec<String> {
        let suffix = if important { " !important" } else { "" };
        self.0
            .iter()
            .map(|(k, v)| format!("{}: {}{}", css_property_name(k), v, suffix))
            .collect()
    }
}

impl<'de> Deserialize<'de> for StyleMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Anything that is not an object degrades to an empty map
        match Value::deserialize(deserializer)? {
            Value::Object(object) => Ok(StyleMap::from_json(&object)),
            _ => Ok(StyleMap::new()),
        }
    }
}

impl FromIterator<(String, String)> for StyleMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

fn css_value(property: &str, value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => {
            if n.as_f64() == Some(0.0) {
                Some("0".to_string())
            } else if UNITLESS_PROPERTIES.contains(&property) || property.starts_with("--") {
                Some(n.to_string())
            } else {
                Some(format!("{}px", n))
            }
        }
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// `alignItems` → `align-items`, `WebkitTransform` → `-webkit-transform`,
/// `msTransform` → `-ms-transform`. Custom properties and names that are
/// already kebab-case pass through unchanged.
pub fn css_property_name(property: &str) -> String {
    if property.starts_with("--") {
        return property.to_string();
    }
    let mut out = String::with_capacity(property.len() + 4);
    if property.starts_with("ms") && property[2..].starts_with(|c: char| c.is_ascii_uppercase()) {
        out.push('-');
    }
    for c in property.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
