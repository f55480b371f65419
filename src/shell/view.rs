//! HTML rendering for each [`View`] of the presentation shell.

use super::state::{ClockView, View};
use crate::design::CatalogCounts;

pub const PAGE_TITLE: &str = "⏰ What Time Is It?";
pub const PAGE_DESCRIPTION: &str =
    "An award-winning time display that creates a unique visual experience every visit";
const PAGE_KEYWORDS: &str = "time, clock, design, award-winning, visual, dynamic";
const COSMIC_URL: &str = "https://www.cosmicjs.com";

/// Delay before a page whose clock stream failed reloads itself.
pub const RELOAD_DELAY_MS: u64 = 5000;

#[derive(Debug, Clone, Default)]
pub struct PageOptions {
    /// Show the diagnostic panel with the four fragment titles.
    pub dev_mode: bool,
    /// Where the page subscribes to its clock ticks. No live clock without it.
    pub clock_url: Option<String>,
}

/// Design tokens and classes every view relies on.
const BASE_CSS: &str = r#"
:root {
  --transition-smooth: all 0.6s cubic-bezier(0.4, 0, 0.2, 1);
  --shadow-subtle: 0 4px 24px rgba(0, 0, 0, 0.08);
  --geometric-shadow: 8px 8px 0 rgba(0, 0, 0, 0.85);
  --organic-shadow: 0 20px 60px rgba(34, 84, 61, 0.25);
  --neon-glow: 0 0 8px currentColor, 0 0 24px currentColor, 0 0 48px currentColor;
  --scan-lines: repeating-linear-gradient(0deg, rgba(255, 255, 255, 0.15) 0, rgba(255, 255, 255, 0.15) 1px, transparent 1px, transparent 3px);
}
*, *::before, *::after { box-sizing: border-box; }
html, body { margin: 0; padding: 0; min-height: 100vh; }
body { font-family: Inter, ui-sans-serif, system-ui, sans-serif; }
.dynamic-background { position: relative; min-height: 100vh; overflow: hidden; }
.time-position { position: absolute; }
.time-display { white-space: nowrap; font-variant-numeric: tabular-nums; }
.centered { min-height: 100vh; display: flex; align-items: center; justify-content: center; text-align: center; }
.placeholder { font-size: 2.25rem; }
.notice h1 { font-size: 2.25rem; font-weight: 700; margin: 0 0 1rem; }
.notice.setup { background: #f3f4f6; color: #1f2937; }
.notice.setup .lead { color: #4b5563; margin-bottom: 2rem; }
.notice.setup .hint { color: #6b7280; font-size: 0.875rem; }
.notice.setup .counts { color: #9ca3af; font-size: 0.75rem; margin-top: 1rem; }
.notice.error { background: #fef2f2; color: #991b1b; }
.notice.error .lead { color: #dc2626; margin-bottom: 1rem; }
.notice.error .hint { color: #ef4444; font-size: 0.875rem; }
.debug-panel { position: fixed; top: 1rem; left: 1rem; z-index: 20; padding: 0.5rem; border-radius: 0.25rem; background: rgba(0, 0, 0, 0.2); color: #fff; font: 0.75rem monospace; }
.site-footer { position: fixed; bottom: 1rem; left: 1rem; z-index: 10; padding: 0.5rem 1rem; border-radius: 0.5rem; background: rgba(0, 0, 0, 0.2); backdrop-filter: blur(4px); }
.site-footer p { margin: 0; color: rgba(255, 255, 255, 0.7); font: 0.875rem monospace; }
.site-footer a { color: rgba(255, 255, 255, 0.9); text-decoration: none; transition: color 0.2s; }
.site-footer a:hover { color: #fff; }
"#;

pub fn render_page(view: &View<'_>, options: &PageOptions) -> String {
    let (body, design_css) = match view {
        View::Placeholder => (render_placeholder(), None),
        View::SetupIncomplete(counts) => (render_setup(counts), None),
        View::Error => (render_error(), None),
        View::Clock(clock) => (
            render_clock(clock, options),
            Some(clock.ready.stylesheet.as_str()),
        ),
    };

    let mut html = String::with_capacity(4096);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str(&render_head());
    html.push_str(&format!("<style>{}</style>\n", style_safe(BASE_CSS)));
    if let Some(css) = design_css {
        html.push_str(&format!("<style id=\"design\">\n{}</style>\n", style_safe(css)));
    }
    html.push_str("</head>\n<body>\n");
    html.push_str(&body);
    html.push_str("</body>\n</html>\n");
    html
}

fn render_head() -> String {
    let title = escape_html(PAGE_TITLE);
    let description = escape_html(PAGE_DESCRIPTION);
    let mut head = String::new();
    head.push_str("<meta charset=\"utf-8\">\n");
    head.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    head.push_str(&format!("<title>{}</title>\n", title));
    head.push_str(&format!("<meta name=\"description\" content=\"{}\">\n", description));
    head.push_str(&format!("<meta name=\"keywords\" content=\"{}\">\n", PAGE_KEYWORDS));
    head.push_str("<meta name=\"author\" content=\"Built with Cosmic\">\n");
    head.push_str(&format!("<meta property=\"og:title\" content=\"{}\">\n", title));
    head.push_str(&format!("<meta property=\"og:description\" content=\"{}\">\n", description));
    head.push_str("<meta property=\"og:type\" content=\"website\">\n");
    head.push_str("<meta name=\"twitter:card\" content=\"summary_large_image\">\n");
    head.push_str(&format!("<meta name=\"twitter:title\" content=\"{}\">\n", title));
    head.push_str(&format!("<meta name=\"twitter:description\" content=\"{}\">\n", description));
    head
}

fn render_placeholder() -> String {
    "<div class=\"centered\"><div class=\"placeholder\">⏰</div></div>\n".to_string()
}

fn render_setup(counts: &CatalogCounts) -> String {
    format!(
        concat!(
            "<div class=\"centered notice setup\"><div>\n",
            "<h1>{title}</h1>\n",
            "<p class=\"lead\">Setting up your award-winning time display...</p>\n",
            "<p class=\"hint\">Please ensure your Cosmic bucket has design content.</p>\n",
            "<div class=\"counts\">\n",
            "<div>Themes: {themes}</div>\n",
            "<div>Displays: {displays}</div>\n",
            "<div>Layouts: {layouts}</div>\n",
            "<div>Effects: {effects}</div>\n",
            "</div>\n</div></div>\n",
        ),
        title = escape_html(PAGE_TITLE),
        themes = counts.themes,
        displays = counts.displays,
        layouts = counts.layouts,
        effects = counts.effects,
    )
}

fn render_error() -> String {
    format!(
        concat!(
            "<div class=\"centered notice error\"><div>\n",
            "<h1>{}</h1>\n",
            "<p class=\"lead\">Unable to load time display</p>\n",
            "<p class=\"hint\">Please check your Cosmic configuration.</p>\n",
            "</div></div>\n",
        ),
        escape_html(PAGE_TITLE)
    )
}

fn render_clock(clock: &ClockView<'_>, options: &PageOptions) -> String {
    let ready = clock.ready;
    let mut body = String::new();

    body.push_str(&format!(
        "<div class=\"dynamic-background\" style=\"{}\">\n",
        escape_html(&ready.background.to_inline_css())
    ));
    body.push_str(&format!(
        "<div class=\"time-position\" style=\"{}\">\n",
        escape_html(&ready.layout.to_inline_css())
    ));
    body.push_str(&format!(
        "<div class=\"time-display\" id=\"time-text\" style=\"{}\">{}</div>\n",
        escape_html(&ready.text.to_inline_css()),
        escape_html(&clock.time)
    ));
    body.push_str("</div>\n");

    if options.dev_mode {
        let config = &ready.config;
        body.push_str(&format!(
            concat!(
                "<div class=\"debug-panel\">\n",
                "<div>Theme: {}</div>\n",
                "<div>Display: {}</div>\n",
                "<div>Layout: {}</div>\n",
                "<div>Effect: {}</div>\n",
                "</div>\n",
            ),
            escape_html(&config.theme.title),
            escape_html(&config.time_display.title),
            escape_html(&config.layout.title),
            escape_html(&config.visual_effect.title),
        ));
    }
    body.push_str("</div>\n");

    body.push_str(&format!(
        concat!(
            "<footer class=\"site-footer\"><p>Powered by ",
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">Cosmic</a>",
            "</p></footer>\n",
        ),
        COSMIC_URL
    ));

    if let Some(url) = &options.clock_url {
        body.push_str(&format!("<script>{}</script>\n", clock_script(url)));
    }
    body
}

/// Subscribes `#time-text` to the clock stream. A broken stream reloads the
/// page, which mounts a fresh session.
fn clock_script(url: &str) -> String {
    // JSON string literals are valid JS string literals
    let url = serde_json::to_string(url).unwrap_or_else(|_| "\"\"".to_string());
    format!(
        concat!(
            "(function () {{\n",
            "  var el = document.getElementById('time-text');\n",
            "  if (!el || !window.EventSource) return;\n",
            "  var source = new EventSource({url});\n",
            "  source.addEventListener('tick', function (e) {{ el.textContent = e.data; }});\n",
            "  source.onerror = function () {{\n",
            "    source.close();\n",
            "    setTimeout(function () {{ window.location.reload(); }}, {delay});\n",
            "  }};\n",
            "}})();",
        ),
        url = url.replace("</", "<\\/"),
        delay = RELOAD_DELAY_MS,
    )
}

/// Authored CSS must not be able to close the `<style>` element early.
fn style_safe(css: &str) -> String {
    css.replace("</", "<\\/")
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
