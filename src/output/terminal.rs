// Colored terminal output for technology reports and cluster listings.

use colored::Colorize;

use crate::bibtex::BibEntry;
use crate::clustering::ClusterSet;

use super::report::ReportRow;
use super::truncate_chars;

/// Display the filtered technology report.
pub fn display_report(rows: &[ReportRow], min_frequency: u64) {
    if rows.is_empty() {
        println!("No technology reached a frequency of {min_frequency}.");
        return;
    }

    println!(
        "\n{}",
        format!(
            "=== Technologies (frequency >= {min_frequency}, {} rows) ===",
            rows.len()
        )
        .bold()
    );
    println!();

    println!(
        "  {:>5}  {:<32} {}",
        "Freq".dimmed(),
        "Technology".dimmed(),
        "Synonyms".dimmed(),
    );
    println!("  {}", "-".repeat(78).dimmed());

    for row in rows {
        let synonyms = row
            .matched_synonyms
            .iter()
            .filter(|s| **s != row.technology_name)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "  {:>5}  {:<32} {}",
            colorize_frequency(row.frequency),
            truncate_chars(&row.technology_name, 30),
            truncate_chars(&synonyms, 60).dimmed(),
        );
    }
    println!();
}

/// Display every cluster with its members and counts, in formation order.
pub fn display_clusters(clusters: &ClusterSet) {
    println!(
        "\n{}",
        format!(
            "=== {} clusters from {} labels ===",
            clusters.len(),
            clusters.member_count()
        )
        .bold()
    );

    for cluster in clusters {
        println!(
            "\n  {} {}",
            cluster.representative.bold(),
            format!("({})", cluster.aggregate_frequency()).dimmed()
        );
        for member in &cluster.members {
            println!("    {:>5}  {}", member.count, member.label);
        }
    }
    println!();
}

/// Display parsed bibliography entries, flagging those without an abstract.
pub fn display_entries(entries: &[BibEntry]) {
    println!(
        "\n{}",
        format!("=== {} bibliography entries ===", entries.len()).bold()
    );
    println!();

    for entry in entries {
        let marker = if entry.abstract_text().is_some() {
            "+".green()
        } else {
            "-".yellow()
        };
        println!(
            "  {} {:<24} {}",
            marker,
            truncate_chars(&entry.key, 22),
            truncate_chars(entry.title().unwrap_or("(untitled)"), 80).dimmed(),
        );
    }

    let missing = entries
        .iter()
        .filter(|e| e.abstract_text().is_none())
        .count();
    if missing > 0 {
        println!(
            "\n  {} {} entries have no abstract and will be skipped",
            "!".yellow(),
            missing
        );
    }
}

fn colorize_frequency(frequency: u64) -> colored::ColoredString {
    let text = frequency.to_string();
    match frequency {
        f if f >= 20 => text.green().bold(),
        f if f >= 10 => text.green(),
        _ => text.normal(),
    }
}
