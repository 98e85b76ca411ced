// Output formatting: report rows, CSV files and terminal display.

pub mod csv;
pub mod report;
pub mod terminal;

pub use report::{build_report, ReportRow, DEFAULT_MIN_FREQUENCY};

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Counts chars rather than bytes, so multi-byte labels never split mid-character.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_chars).collect();
    format!("{truncated}...")
}
