//! Output formatting for grouping reports (text, JSON, CSV).

use crate::models::{GroupingReport, HighlightGroup, HighlightRecord};
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write the full report as pretty JSON.
pub fn write_json<W: Write>(report: &GroupingReport, writer: &mut W) -> Result<(), OutputError> {
    let json = serde_json::to_string_pretty(report)?;
    writer.write_all(json.as_bytes())?;
    Ok(())
}

/// Write the full report as pretty JSON to a file.
pub fn write_json_file(report: &GroupingReport, path: &Path) -> Result<(), OutputError> {
    let mut file = std::fs::File::create(path)?;
    write_json(report, &mut file)
}

/// Write groups as CSV, one row per member.
pub fn write_csv<W: Write>(groups: &[HighlightGroup], writer: &mut W) -> Result<(), OutputError> {
    writeln!(writer, "group,member,book,page,text")?;

    for (group_idx, group) in groups.iter().enumerate() {
        for (member_idx, record) in group.members.iter().enumerate() {
            // Book and text may contain commas and newlines; {:?} quotes
            // and escapes them.
            writeln!(
                writer,
                "{},{},{:?},{},{:?}",
                group_idx + 1,
                member_idx + 1,
                record.book,
                record.page.map(|p| p.to_string()).unwrap_or_default(),
                record.text,
            )?;
        }
    }

    Ok(())
}

/// Write groups as CSV to a file.
pub fn write_csv_file(groups: &[HighlightGroup], path: &Path) -> Result<(), OutputError> {
    let mut file = std::fs::File::create(path)?;
    write_csv(groups, &mut file)
}

/// Write groups as a human-readable text report.
pub fn write_text<W: Write>(groups: &[HighlightGroup], writer: &mut W) -> Result<(), OutputError> {
    for (idx, group) in groups.iter().enumerate() {
        if idx > 0 {
            writeln!(writer)?;
        }
        write!(writer, "{}", render_group(group, idx + 1))?;
    }
    Ok(())
}

/// Write the text report to a file.
pub fn write_text_file(groups: &[HighlightGroup], path: &Path) -> Result<(), OutputError> {
    let mut file = std::fs::File::create(path)?;
    write_text(groups, &mut file)
}

/// Render one group under a numbered heading, one line per member.
pub fn render_group(group: &HighlightGroup, number: usize) -> String {
    let mut out = format!("### Group {} - {} highlights\n", number, group.len());
    for record in &group.members {
        out.push_str(&format_member(record));
        out.push('\n');
    }
    out
}

/// Format one member line: `- [book - page N] text`.
fn format_member(record: &HighlightRecord) -> String {
    let page = match record.page {
        Some(p) => format!("page {}", p),
        None => "no page".to_string(),
    };
    // Multi-line highlights stay on one report line.
    let text = record.text.replace('\n', " ");
    format!("- [{} - {}] {}", record.book, page, text)
}

/// Print a summary of the run to stdout.
pub fn print_summary(report: &GroupingReport) {
    println!("\n=== Grouping Summary ===");
    println!("Version: {}", report.version);
    println!();
    println!("Parameters:");
    println!("  Min words: {}", report.parameters.min_words);
    println!("  Page tolerance: {}", report.parameters.page_tolerance);
    println!();
    println!("Results:");
    println!("  Records parsed: {}", report.summary.record_count);
    println!("  Groups formed: {}", report.summary.group_count);
    println!("  Records grouped: {}", report.summary.grouped_records);
}

/// Print the first `limit` groups to stdout.
pub fn print_groups(groups: &[HighlightGroup], limit: Option<usize>) {
    let to_print = match limit {
        Some(n) => &groups[..n.min(groups.len())],
        None => groups,
    };

    for (idx, group) in to_print.iter().enumerate() {
        println!("{}", render_group(group, idx + 1));
    }

    if let Some(n) = limit {
        if groups.len() > n {
            println!("... and {} more groups", groups.len() - n);
        }
    }
}
