//! Design fragment data model.
//!
//! Each fragment kind has a structured metadata record whose fields are all
//! optional; absent fields fall back to named defaults in the style
//! synthesizer rather than failing.

use super::style_map::StyleMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

// ── Fragment ───────────────────────────────────────────

/// Binds a metadata record to the Cosmic object type it is stored under.
pub trait FragmentKind: DeserializeOwned + Default + Clone + Send + Sync + 'static {
    /// Object type tag in the content repository, e.g. `design-themes`.
    const OBJECT_TYPE: &'static str;
    /// Human-readable catalog name used in logs and diagnostics.
    const LABEL: &'static str;
}

/// One authored unit of design data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "M: Deserialize<'de> + Default"))]
pub struct Fragment<M> {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: M,
}

impl<M: Default> Fragment<M> {
    /// A fragment with identity only and no metadata at all.
    pub fn bare(id: &str, slug: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            slug: slug.to_string(),
            title: title.to_string(),
            metadata: M::default(),
        }
    }
}

pub type DesignTheme = Fragment<ThemeMetadata>;
pub type TimeDisplay = Fragment<TimeDisplayMetadata>;
pub type LayoutVariation = Fragment<LayoutMetadata>;
pub type VisualEffect = Fragment<VisualEffectMetadata>;

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Render a JSON scalar as text. Anything else has no text form.
fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Text field that accepts any scalar (`"iterationCount": 3` reads as `"3"`)
/// and degrades arrays and objects to absent.
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(scalar_text(Value::deserialize(deserializer)?))
}

/// Nested record that degrades to absent when its shape is wrong.
fn lenient_record<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        value => Ok(serde_json::from_value(value)
            .map_err(|e| tracing::debug!(error = %e, "ignoring malformed metadata record"))
            .ok()),
    }
}

/// Treat empty strings like absent values, so `""` also picks up the fallback.
pub(crate) fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

// ── Select options ─────────────────────────────────────

/// A select-dropdown value: machine key plus human label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub key: String,
    pub value: String,
}

impl SelectOption {
    pub fn new(key: &str, value: &str) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

impl<'de> Deserialize<'de> for SelectOption {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Accepts `{ "key": .., "value": .. }` or a bare string key
        #[derive(Deserialize)]
        struct Raw {
            #[serde(default)]
            key: Option<Value>,
            #[serde(default)]
            value: Option<Value>,
        }

        let text = |v: Option<Value>| v.and_then(scalar_text).unwrap_or_default();

        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(SelectOption {
                key: s.clone(),
                value: s,
            }),
            Value::Number(n) => Ok(SelectOption {
                key: n.to_string(),
                value: n.to_string(),
            }),
            obj @ Value::Object(_) => {
                let raw: Raw = serde_json::from_value(obj).map_err(serde::de::Error::custom)?;
                Ok(SelectOption {
                    key: text(raw.key),
                    value: text(raw.value),
                })
            }
            _ => Ok(SelectOption::default()),
        }
    }
}

fn option_key(option: Option<&SelectOption>) -> Option<&str> {
    option.map(|o| o.key.as_str()).filter(|k| !k.is_empty())
}

/// Time format selector carried by a time-display fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeFormat {
    Hour12,
    Hour24,
    Minimal,
}

impl TimeFormat {
    pub const DEFAULT_KEY: &'static str = "12hour";

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "12hour" => Some(Self::Hour12),
            "24hour" => Some(Self::Hour24),
            "minimal" => Some(Self::Minimal),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Thin,
    Light,
    Regular,
    SemiBold,
    Bold,
    Black,
}

impl FontWeight {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "100" => Some(Self::Thin),
            "300" => Some(Self::Light),
            "400" => Some(Self::Regular),
            "600" => Some(Self::SemiBold),
            "700" => Some(Self::Bold),
            "900" => Some(Self::Black),
            _ => None,
        }
    }

    pub fn as_css(self) -> &'static str {
        match self {
            Self::Thin => "100",
            Self::Light => "300",
            Self::Regular => "400",
            Self::SemiBold => "600",
            Self::Bold => "700",
            Self::Black => "900",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlignment {
    Center,
    Left,
    Right,
}

impl TextAlignment {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "center" => Some(Self::Center),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            _ => None,
        }
    }

    pub fn as_css(self) -> &'static str {
        match self {
            Self::Center => "center",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

// ── Theme ──────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorPalette {
    #[serde(default, deserialize_with = "lenient_text")]
    pub primary: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub secondary: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub accent: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub background: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackgroundConfig {
    #[serde(default, deserialize_with = "lenient_text")]
    pub gradient: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub fallback: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeMetadata {
    #[serde(default, deserialize_with = "lenient_text")]
    pub theme_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub primary_font: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub secondary_font: Option<String>,
    #[serde(default, deserialize_with = "lenient_record")]
    pub color_palette: Option<ColorPalette>,
    #[serde(default)]
    pub background_style: Option<SelectOption>,
    #[serde(default, deserialize_with = "lenient_record")]
    pub background_config: Option<BackgroundConfig>,
    /// Free-form CSS declarations appended to `:root` verbatim.
    #[serde(default, deserialize_with = "lenient_text")]
    pub css_variables: Option<String>,
}

impl ThemeMetadata {
    pub fn gradient(&self) -> Option<&str> {
        self.background_config
            .as_ref()
            .and_then(|c| non_empty(c.gradient.as_ref()))
    }
}

impl FragmentKind for ThemeMetadata {
    const OBJECT_TYPE: &'static str = "design-themes";
    const LABEL: &'static str = "design themes";
}

// ── Time display ───────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeDisplayMetadata {
    #[serde(default, deserialize_with = "lenient_text")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub time_format: Option<SelectOption>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub font_size_range: Option<String>,
    #[serde(default)]
    pub font_weight: Option<SelectOption>,
    #[serde(default)]
    pub text_alignment: Option<SelectOption>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub letter_spacing: Option<String>,
}

impl TimeDisplayMetadata {
    /// Raw format selector, defaulting to `12hour` when none was authored.
    /// Unknown keys are passed through so the formatter can fall back.
    pub fn time_format_key(&self) -> &str {
        option_key(self.time_format.as_ref()).unwrap_or(TimeFormat::DEFAULT_KEY)
    }

    /// Unknown weights are dropped rather than emitted as invalid CSS.
    pub fn font_weight(&self) -> Option<FontWeight> {
        option_key(self.font_weight.as_ref()).and_then(FontWeight::from_key)
    }

    pub fn text_alignment(&self) -> Option<TextAlignment> {
        option_key(self.text_alignment.as_ref()).and_then(TextAlignment::from_key)
    }
}

impl FragmentKind for TimeDisplayMetadata {
    const OBJECT_TYPE: &'static str = "time-displays";
    const LABEL: &'static str = "time displays";
}

// ── Layout ─────────────────────────────────────────────

/// Style overrides keyed by breakpoint name, e.g. `mobile`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResponsiveRules(BTreeMap<String, StyleMap>);

impl ResponsiveRules {
    pub const MOBILE: &'static str = "mobile";

    pub fn get(&self, breakpoint: &str) -> Option<&StyleMap> {
        self.0.get(breakpoint)
    }

    pub fn mobile(&self) -> Option<&StyleMap> {
        self.get(Self::MOBILE).filter(|m| !m.is_empty())
    }
}

impl<'de> Deserialize<'de> for ResponsiveRules {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Object(object) => Ok(ResponsiveRules(
                object
                    .into_iter()
                    .filter_map(|(breakpoint, rules)| match rules {
                        Value::Object(o) => Some((breakpoint, StyleMap::from_json(&o))),
                        _ => None,
                    })
                    .collect(),
            )),
            _ => Ok(ResponsiveRules::default()),
        }
    }
}

impl FromIterator<(String, StyleMap)> for ResponsiveRules {
    fn from_iter<I: IntoIterator<Item = (String, StyleMap)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutMetadata {
    #[serde(default, deserialize_with = "lenient_text")]
    pub layout_name: Option<String>,
    #[serde(default)]
    pub positioning_type: Option<SelectOption>,
    #[serde(default)]
    pub position_config: Option<StyleMap>,
    #[serde(default)]
    pub container_styling: Option<StyleMap>,
    #[serde(default)]
    pub responsive_rules: Option<ResponsiveRules>,
}

impl LayoutMetadata {
    pub fn mobile_rules(&self) -> Option<&StyleMap> {
        self.responsive_rules.as_ref().and_then(ResponsiveRules::mobile)
    }
}

impl FragmentKind for LayoutMetadata {
    const OBJECT_TYPE: &'static str = "layout-variations";
    const LABEL: &'static str = "layout variations";
}

// ── Visual effect ──────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationConfig {
    /// Keyframe body, e.g. `0% { opacity: 0 } 100% { opacity: 1 }`.
    #[serde(default, deserialize_with = "lenient_text")]
    pub keyframes: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub timing_function: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub iteration_count: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub delay: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisualEffectMetadata {
    #[serde(default, deserialize_with = "lenient_text")]
    pub effect_name: Option<String>,
    #[serde(default)]
    pub animation_type: Option<SelectOption>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub animation_duration: Option<String>,
    #[serde(default, deserialize_with = "lenient_record")]
    pub animation_config: Option<AnimationConfig>,
    #[serde(default)]
    pub trigger_type: Option<SelectOption>,
}

impl VisualEffectMetadata {
    pub fn keyframes(&self) -> Option<&str> {
        self.animation_config
            .as_ref()
            .and_then(|c| non_empty(c.keyframes.as_ref()))
    }
}

impl FragmentKind for VisualEffectMetadata {
    const OBJECT_TYPE: &'static str = "visual-effects";
    const LABEL: &'static str = "visual effects";
}

// ── Catalogs & configuration ───────────────────────────

/// The four raw catalogs as fetched, read-only after the fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DesignData {
    pub themes: Vec<DesignTheme>,
    pub displays: Vec<TimeDisplay>,
    pub layouts: Vec<LayoutVariation>,
    pub effects: Vec<VisualEffect>,
}

impl DesignData {
    pub fn counts(&self) -> CatalogCounts {
        CatalogCounts {
            themes: self.themes.len(),
            displays: self.displays.len(),
            layouts: self.layouts.len(),
            effects: self.effects.len(),
        }
    }

    pub fn has_required_data(&self) -> bool {
        self.counts().all_present()
    }
}

/// Per-catalog sizes, shown on the setup-incomplete view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogCounts {
    pub themes: usize,
    pub displays: usize,
    pub layouts: usize,
    pub effects: usize,
}

impl CatalogCounts {
    pub fn all_present(&self) -> bool {
        self.themes > 0 && self.displays > 0 && self.layouts > 0 && self.effects > 0
    }
}

/// One fragment of each kind, chosen together for one render session.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignConfiguration {
    pub theme: DesignTheme,
    pub time_display: TimeDisplay,
    pub layout: LayoutVariation,
    pub visual_effect: VisualEffect,
}
