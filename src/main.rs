//! Clippings Dedup CLI
//!
//! Parses an exported Kindle highlight file and groups near-duplicate or
//! overlapping highlights by textual containment and page proximity.

use clap::{Parser, Subcommand, ValueEnum};
use std::collections::BTreeMap;
use std::path::PathBuf;

mod group;
mod models;
mod output;
mod parse;

use group::group_by_containment;
use models::{GroupingParams, GroupingReport};
use output::{
    print_groups, print_summary, write_csv, write_csv_file, write_json, write_json_file,
    write_text, write_text_file,
};
use parse::{HighlightParser, PageMarker};

#[derive(Parser)]
#[command(name = "clippings-dedup")]
#[command(about = "Near-duplicate grouping for exported Kindle highlights")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Output format for grouping results
#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    /// Human-readable group listing
    Text,
    /// JSON report with parameters and summary
    Json,
    /// CSV file, one row per group member
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse an export file and group overlapping highlights
    Group {
        /// Path to the exported highlights file (plain text, UTF-8)
        input: PathBuf,

        /// Number of leading words used as the containment fingerprint
        #[arg(long, default_value = "4", value_parser = clap::value_parser!(u64).range(1..=10))]
        min_words: u64,

        /// Maximum page difference for two highlights to be co-located
        #[arg(long, default_value = "2")]
        page_tolerance: u32,

        /// Locale's word for "page" in the export's metadata lines
        #[arg(long, default_value = "página")]
        page_word: String,

        /// Full regex for the page marker (overrides --page-word; must
        /// contain a capture group for the digits)
        #[arg(long)]
        page_pattern: Option<String>,

        /// Output file path (stdout if omitted)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: text, json, or csv
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Print first N groups to console
        #[arg(long)]
        show_groups: Option<usize>,

        /// Suppress the summary
        #[arg(long)]
        quiet: bool,
    },

    /// Show record statistics for an export file
    Stats {
        /// Path to the exported highlights file
        input: PathBuf,

        /// Locale's word for "page" in the export's metadata lines
        #[arg(long, default_value = "página")]
        page_word: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Group {
            input,
            min_words,
            page_tolerance,
            page_word,
            page_pattern,
            output,
            format,
            show_groups,
            quiet,
        } => {
            let marker = match page_pattern {
                Some(pattern) => PageMarker::from_regex(&pattern)?,
                None => PageMarker::for_keyword(&page_word),
            };

            let content = std::fs::read_to_string(&input)?;
            let records = HighlightParser::new(marker).parse(&content);

            if records.is_empty() {
                // A reportable outcome, not a failure
                eprintln!("No highlights found in {}", input.display());
                return Ok(());
            }

            if !quiet {
                eprintln!("{} highlights loaded", records.len());
            }

            let params = GroupingParams {
                min_words: min_words as usize,
                page_tolerance,
            };
            let groups = group_by_containment(&records, &params);
            let report = GroupingReport::new(records.len(), params, groups);

            match (&output, format) {
                (Some(path), OutputFormat::Text) => write_text_file(&report.groups, path)?,
                (Some(path), OutputFormat::Json) => write_json_file(&report, path)?,
                (Some(path), OutputFormat::Csv) => write_csv_file(&report.groups, path)?,
                (None, OutputFormat::Text) => write_text(&report.groups, &mut std::io::stdout())?,
                (None, OutputFormat::Json) => write_json(&report, &mut std::io::stdout())?,
                (None, OutputFormat::Csv) => write_csv(&report.groups, &mut std::io::stdout())?,
            }

            if !quiet {
                print_summary(&report);
                if let Some(path) = &output {
                    eprintln!("\nOutput: {}", path.display());
                }
            }

            if let Some(limit) = show_groups {
                println!("\n=== Sample Groups ===");
                print_groups(&report.groups, Some(limit));
            }
        }

        Commands::Stats { input, page_word } => {
            let content = std::fs::read_to_string(&input)?;
            let records = HighlightParser::new(PageMarker::for_keyword(&page_word)).parse(&content);

            let mut per_book: BTreeMap<&str, usize> = BTreeMap::new();
            for record in &records {
                *per_book.entry(record.book.as_str()).or_default() += 1;
            }
            let unpaged = records.iter().filter(|r| r.page.is_none()).count();

            println!("=== Export Statistics ===");
            println!("Total highlights: {}", records.len());
            println!("Books: {}", per_book.len());
            println!("Highlights without page: {}", unpaged);
            println!();
            for (book, count) in &per_book {
                println!("  {}: {}", book, count);
            }
        }
    }

    Ok(())
}
