//! Time Formatter: renders a wall-clock time for a format selector.

use super::types::TimeFormat;
use chrono::NaiveTime;

/// Format `time` according to `selector`.
///
/// `12hour` → `3:05:09 PM`, `24hour` → `15:05:09`, `minimal` → `15:05`.
/// Absent or unrecognized selectors fall back to the default time
/// representation instead of failing.
pub fn format_time(selector: Option<&str>, time: &NaiveTime) -> String {
    let pattern = match selector.and_then(TimeFormat::from_key) {
        Some(TimeFormat::Hour12) => "%-I:%M:%S %p",
        Some(TimeFormat::Hour24) => "%H:%M:%S",
        Some(TimeFormat::Minimal) => "%H:%M",
        None => "%X",
    };
    time.format(pattern).to_string()
}

/// Format the current local time.
pub fn format_now(selector: Option<&str>) -> String {
    format_time(selector, &chrono::Local::now().time())
}
