//! Style Synthesizer: turns a [`DesignConfiguration`] into a stylesheet
//! fragment and inline style maps.
//!
//! Every function is pure and tolerates fully sparse metadata: a missing
//! field either picks up a named fallback or omits its property.

use super::style_map::StyleMap;
use super::types::{non_empty, DesignConfiguration};

// ── Fallbacks ──────────────────────────────────────────

pub const FALLBACK_PRIMARY_COLOR: &str = "#000000";
pub const FALLBACK_SECONDARY_COLOR: &str = "#666666";
pub const FALLBACK_ACCENT_COLOR: &str = "#ff0000";
pub const FALLBACK_BACKGROUND_COLOR: &str = "#ffffff";
pub const FALLBACK_TEXT_COLOR: &str = "#333333";
pub const FALLBACK_PRIMARY_FONT: &str = "Inter, sans-serif";
pub const FALLBACK_SECONDARY_FONT: &str = "monospace";
/// Page background when a theme declares neither gradient nor palette.
pub const FALLBACK_PAGE_BACKGROUND: &str = "#f5f7fa";

pub const DEFAULT_TIMING_FUNCTION: &str = "ease";
pub const DEFAULT_ITERATION_COUNT: &str = "1";
pub const DEFAULT_ANIMATION_DELAY: &str = "0s";
/// Keeps the first/last keyframe values applied outside the active window.
pub const ANIMATION_FILL_MODE: &str = "both";

pub const MOBILE_BREAKPOINT_PX: u32 = 768;

const NEON_CYBER: &str = "neon-cyber";

/// Theme slugs with a dedicated container shadow token.
const THEME_SHADOWS: &[(&str, &str)] = &[
    ("bold-geometric", "var(--geometric-shadow)"),
    ("organic-flow", "var(--organic-shadow)"),
    ("minimal-zen", "var(--shadow-subtle)"),
];

// ── Viewport ───────────────────────────────────────────

/// Rendering surface width as reported by the client, if known.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: Option<u32>,
}

impl Viewport {
    pub fn with_width(width: u32) -> Self {
        Self { width: Some(width) }
    }

    /// Unknown widths are treated as wide.
    pub fn is_mobile(&self) -> bool {
        self.width.is_some_and(|w| w <= MOBILE_BREAKPOINT_PX)
    }
}

// ── Global stylesheet ──────────────────────────────────

/// Name of the keyframe animation for this configuration. `suffix` keeps
/// names distinct across reloads (typically a generation timestamp).
pub fn animation_name(config: &DesignConfiguration, suffix: &str) -> String {
    let slug: String = config
        .visual_effect
        .slug
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
        .collect();
    if suffix.is_empty() {
        format!("effect-{}", slug)
    } else {
        format!("effect-{}-{}", slug, suffix)
    }
}

/// Stylesheet fragment: root variables, keyframes, background overrides.
pub fn global_stylesheet(config: &DesignConfiguration, animation_suffix: &str) -> String {
    let theme = &config.theme.metadata;
    let palette = theme.color_palette.clone().unwrap_or_default();
    let mut css = String::new();

    css.push_str(":root {\n");
    let vars = [
        ("--primary-color", non_empty(palette.primary.as_ref()), FALLBACK_PRIMARY_COLOR),
        ("--secondary-color", non_empty(palette.secondary.as_ref()), FALLBACK_SECONDARY_COLOR),
        ("--accent-color", non_empty(palette.accent.as_ref()), FALLBACK_ACCENT_COLOR),
        ("--background-color", non_empty(palette.background.as_ref()), FALLBACK_BACKGROUND_COLOR),
        ("--text-color", non_empty(palette.text.as_ref()), FALLBACK_TEXT_COLOR),
        ("--primary-font", non_empty(theme.primary_font.as_ref()), FALLBACK_PRIMARY_FONT),
        ("--secondary-font", non_empty(theme.secondary_font.as_ref()), FALLBACK_SECONDARY_FONT),
    ];
    for (name, value, fallback) in vars {
        css.push_str(&format!("  {}: {};\n", name, value.unwrap_or(fallback)));
    }
    css.push_str("}\n");

    if let Some(custom) = non_empty(theme.css_variables.as_ref()) {
        css.push_str(&format!(":root {{\n  {}\n}}\n", custom.trim()));
    }

    if let Some(keyframes) = config.visual_effect.metadata.keyframes() {
        let name = animation_name(config, animation_suffix);
        css.push_str(&format!(
            "@keyframes {name} {{\n  {}\n}}\n.time-display {{\n  animation-name: {name} !important;\n}}\n",
            keyframes.trim()
        ));
    }

    if let Some(gradient) = theme.gradient() {
        css.push_str(&format!(
            ".dynamic-background {{\n  background: {} !important;\n  background-attachment: fixed;\n}}\n",
            gradient
        ));
    }

    if config.theme.slug == NEON_CYBER {
        css.push_str(concat!(
            ".dynamic-background {\n  position: relative;\n}\n",
            ".dynamic-background::before {\n",
            "  content: '';\n  position: absolute;\n  top: 0;\n  left: 0;\n  right: 0;\n  bottom: 0;\n",
            "  background: var(--scan-lines);\n  pointer-events: none;\n  opacity: 0.1;\n  z-index: 1;\n",
            "}\n",
            ".time-display {\n  position: relative;\n  z-index: 2;\n}\n",
        ));
    }

    // Re-applies the mobile override for clients that never reported a width
    if config.layout.metadata.position_config.is_some() {
        if let Some(mobile) = config.layout.metadata.mobile_rules() {
            css.push_str(&format!(
                "@media (max-width: {}px) {{\n  .time-position {{\n    {};\n  }}\n}}\n",
                MOBILE_BREAKPOINT_PX,
                mobile.declarations(true).join(";\n    ")
            ));
        }
    }

    css
}

// ── Inline style maps ──────────────────────────────────

/// Styles for the time text itself.
pub fn text_styles(config: &DesignConfiguration) -> StyleMap {
    let display = &config.time_display.metadata;
    let effect = &config.visual_effect.metadata;
    let mut styles = StyleMap::new();

    if let Some(size) = non_empty(display.font_size_range.as_ref()) {
        styles.insert("fontSize", size);
    }
    if let Some(weight) = display.font_weight() {
        styles.insert("fontWeight", weight.as_css());
    }
    if let Some(spacing) = non_empty(display.letter_spacing.as_ref()) {
        styles.insert("letterSpacing", spacing);
    }
    if let Some(align) = display.text_alignment() {
        styles.insert("textAlign", align.as_css());
    }

    styles.insert("color", "var(--text-color)");
    styles.insert("fontFamily", "var(--primary-font)");

    let duration = non_empty(effect.animation_duration.as_ref());
    if let (Some(duration), Some(animation)) = (duration, effect.animation_config.as_ref()) {
        styles.insert("animationDuration", duration);
        styles.insert(
            "animationTimingFunction",
            non_empty(animation.timing_function.as_ref()).unwrap_or(DEFAULT_TIMING_FUNCTION),
        );
        styles.insert(
            "animationIterationCount",
            non_empty(animation.iteration_count.as_ref()).unwrap_or(DEFAULT_ITERATION_COUNT),
        );
        styles.insert(
            "animationDelay",
            non_empty(animation.delay.as_ref()).unwrap_or(DEFAULT_ANIMATION_DELAY),
        );
        styles.insert("animationFillMode", ANIMATION_FILL_MODE);
    } else if effect.keyframes().is_some() {
        // Keyframes still get attached by the stylesheet
        styles.insert("animationFillMode", ANIMATION_FILL_MODE);
    }

    if config.theme.slug == NEON_CYBER {
        styles.insert("textShadow", "var(--neon-glow)");
    }

    styles
}

/// Full-viewport flex centering used when a layout has no position config.
pub fn centered_layout() -> StyleMap {
    let mut styles = StyleMap::new();
    styles.insert("display", "flex");
    styles.insert("alignItems", "center");
    styles.insert("justifyContent", "center");
    styles.insert("height", "100vh");
    styles.insert("width", "100vw");
    styles.insert("top", "0");
    styles.insert("left", "0");
    styles
}

/// Positioning styles for the container around the time text.
pub fn layout_styles(config: &DesignConfiguration, viewport: Viewport) -> StyleMap {
    let layout = &config.layout.metadata;
    let Some(position) = layout.position_config.as_ref() else {
        return centered_layout();
    };

    let mut styles = position.clone();
    if viewport.is_mobile() {
        if let Some(mobile) = layout.mobile_rules() {
            styles.merge(mobile);
        }
    }
    styles
}

/// Box styles shared by the time text container.
pub fn container_styles(config: &DesignConfiguration) -> StyleMap {
    let mut styles = config
        .layout
        .metadata
        .container_styling
        .clone()
        .unwrap_or_default();

    if let Some((_, shadow)) = THEME_SHADOWS
        .iter()
        .find(|(slug, _)| *slug == config.theme.slug)
    {
        styles.insert("boxShadow", *shadow);
    }

    styles.insert("transition", "var(--transition-smooth)");
    styles
}

/// Background for the full-viewport container.
pub fn background_style(config: &DesignConfiguration) -> StyleMap {
    let theme = &config.theme.metadata;
    let background = theme
        .gradient()
        .or_else(|| {
            theme
                .color_palette
                .as_ref()
                .and_then(|p| non_empty(p.background.as_ref()))
        })
        .unwrap_or(FALLBACK_PAGE_BACKGROUND);

    let mut styles = StyleMap::new();
    styles.insert("background", background);
    styles
}
