// CSV report writer.
//
// Column names and the list rendering of "Matched Synonyms" follow the
// existing report format: a bracketed list of single-quoted labels such as
// `['OPC UA', 'OPC UA Server']`, carried as one CSV field. Fields are quoted
// only when they contain a comma, a quote or a line break; rows end in CRLF.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use tracing::info;

use super::report::ReportRow;

pub const HEADER: [&str; 3] = ["Frequency", "Technology Name", "Matched Synonyms"];

/// Write the report into `dir` under a timestamped name and return its path.
pub fn write_report(rows: &[ReportRow], dir: &Path, min_frequency: u64) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    let path = dir.join(report_file_name(min_frequency, Local::now()));
    write_report_to(rows, &path)?;
    Ok(path)
}

/// Write the report to an exact path.
pub fn write_report_to(rows: &[ReportRow], path: &Path) -> Result<()> {
    std::fs::write(path, render(rows))
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    info!(rows = rows.len(), path = %path.display(), "Wrote technology report");
    Ok(())
}

/// `analyzed_technology_{cutoff}_{timestamp}.csv`
pub fn report_file_name(min_frequency: u64, at: DateTime<Local>) -> String {
    format!(
        "analyzed_technology_{}_{}.csv",
        min_frequency,
        at.format("%Y-%m-%d_%H-%M-%S")
    )
}

/// Render the whole report, header included.
pub fn render(rows: &[ReportRow]) -> String {
    let mut out = String::new();
    push_record(&mut out, &HEADER.map(str::to_string));
    for row in rows {
        push_record(
            &mut out,
            &[
                row.frequency.to_string(),
                row.technology_name.clone(),
                list_literal(&row.matched_synonyms),
            ],
        );
    }
    out
}

fn push_record(out: &mut String, fields: &[String]) {
    let line: Vec<String> = fields.iter().map(|f| escape_field(f)).collect();
    out.push_str(&line.join(","));
    out.push_str("\r\n");
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// `['a', 'b']`
pub fn list_literal(items: &[String]) -> String {
    let quoted: Vec<String> = items.iter().map(|s| quote_literal(s)).collect();
    format!("[{}]", quoted.join(", "))
}

/// Single-quoted string literal; double quotes are used instead when the
/// text contains a single quote and no double quote. Control characters and
/// invisible separators are written as `\xNN`, `\uNNNN` or `\UNNNNNNNN`
/// escapes, the same as a Python list repr.
fn quote_literal(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if is_unprintable(c) => out.push_str(&hex_escape(c)),
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Characters a Python repr escapes: controls, format characters and every
/// separator except the plain space.
fn is_unprintable(c: char) -> bool {
    c.is_control()
        || matches!(
            c,
            '\u{a0}'
                | '\u{ad}'
                | '\u{1680}'
                | '\u{2000}'..='\u{200f}'
                | '\u{2028}'..='\u{202f}'
                | '\u{205f}'..='\u{2064}'
                | '\u{3000}'
                | '\u{feff}'
        )
}

fn hex_escape(c: char) -> String {
    match u32::from(c) {
        n @ 0..=0xff => format!("\\x{n:02x}"),
        n @ 0x100..=0xffff => format!("\\u{n:04x}"),
        n => format!("\\U{n:08x}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn row(frequency: u64, name: &str, synonyms: &[&str]) -> ReportRow {
        ReportRow {
            frequency,
            technology_name: name.to_string(),
            matched_synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_render_matches_report_format() {
        let rows = vec![
            row(16, "REST", &["REST", "RESTful"]),
            row(7, "MQTT", &["MQTT"]),
        ];
        assert_eq!(
            render(&rows),
            "Frequency,Technology Name,Matched Synonyms\r\n\
             16,REST,\"['REST', 'RESTful']\"\r\n\
             7,MQTT,['MQTT']\r\n"
        );
    }

    #[test]
    fn test_render_empty_report_is_header_only() {
        assert_eq!(render(&[]), "Frequency,Technology Name,Matched Synonyms\r\n");
    }

    #[test]
    fn test_list_literal_quoting() {
        assert_eq!(list_literal(&[]), "[]");
        assert_eq!(
            list_literal(&["Pub'Sub".to_string()]),
            "[\"Pub'Sub\"]"
        );
        assert_eq!(
            list_literal(&["a'b\"c".to_string()]),
            "['a\\'b\"c']"
        );
        assert_eq!(list_literal(&["C:\\x".to_string()]), "['C:\\\\x']");
    }

    #[test]
    fn test_list_literal_escapes_unprintable() {
        assert_eq!(list_literal(&["a\u{0}b".to_string()]), "['a\\x00b']");
        assert_eq!(list_literal(&["del\u{7f}".to_string()]), "['del\\x7f']");
        assert_eq!(list_literal(&["5\u{a0}G".to_string()]), "['5\\xa0G']");
        assert_eq!(list_literal(&["zw\u{200b}j".to_string()]), "['zw\\u200bj']");
        assert_eq!(list_literal(&["Übertragung".to_string()]), "['Übertragung']");
    }

    #[test]
    fn test_field_with_comma_and_quote_is_escaped() {
        let rows = vec![row(5, "TSN, 5G", &["TSN, 5G"])];
        let rendered = render(&rows);
        assert!(rendered.contains("5,\"TSN, 5G\",\"['TSN, 5G']\"\r\n"));
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_report_file_name() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(
            report_file_name(5, at),
            "analyzed_technology_5_2024-03-09_14-05-07.csv"
        );
    }

    #[test]
    fn test_write_report_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("nested/output");
        let path = write_report(&[row(6, "ROS", &["ROS"])], &out_dir, 5).unwrap();
        assert!(path.starts_with(&out_dir));
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.ends_with("6,ROS,['ROS']\r\n"));
    }
}
