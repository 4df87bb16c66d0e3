/// Display formatting for counts and timestamps.
///
/// Timestamps are stored as `SystemTime`; conversion to local wall-clock
/// time happens only here, at the display boundary.
use chrono::{DateTime, Local};
use std::time::SystemTime;

/// Placeholder shown for a time range that has no files.
pub const NO_TIME: &str = "N/A";

/// Format a file count with thousand separators.
pub fn format_count(count: u64) -> String {
    if count < 1_000 {
        return count.to_string();
    }
    let s = count.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Local time of day, `HH:MM:SS`. Used in group labels.
pub fn format_clock(t: SystemTime) -> String {
    DateTime::<Local>::from(t).format("%H:%M:%S").to_string()
}

/// Local date and time, `YYYY-MM-DD HH:MM:SS`. Used for file rows and log lines.
pub fn format_timestamp(t: SystemTime) -> String {
    format_local(DateTime::<Local>::from(t))
}

pub fn format_local(t: DateTime<Local>) -> String {
    t.format("%Y-%m-%d %H:%M:%S").to_string()
}
