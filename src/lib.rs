//! Clippings Dedup Library
//!
//! Parses exported Kindle highlight files and groups near-duplicate or
//! overlapping highlights by textual containment and page proximity.
//!
//! # Example
//!
//! ```no_run
//! use clippings_dedup::prelude::*;
//!
//! let content = std::fs::read_to_string("My Clippings.txt").unwrap();
//!
//! // Parse the export into highlight records
//! let parser = HighlightParser::default();
//! let records = parser.parse(&content);
//!
//! // Group overlapping highlights
//! let params = GroupingParams::default();
//! let groups = group_by_containment(&records, &params);
//!
//! println!("Found {} groups among {} highlights", groups.len(), records.len());
//! ```

pub mod group;
pub mod models;
pub mod output;
pub mod parse;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::group::group_by_containment;
    pub use crate::models::{
        GroupingParams, GroupingReport, GroupingSummary, HighlightGroup, HighlightRecord,
    };
    pub use crate::output::{
        print_groups, print_summary, render_group, write_csv, write_csv_file, write_json,
        write_json_file, write_text, write_text_file, OutputError,
    };
    pub use crate::parse::{HighlightParser, PageMarker, ParseError, BLOCK_DELIMITER};
}

// Re-export commonly used types at the crate root
pub use group::group_by_containment;
pub use models::{GroupingParams, GroupingReport, HighlightGroup, HighlightRecord};
pub use parse::{HighlightParser, PageMarker};
