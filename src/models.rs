//! Data structures for the clippings deduplication pipeline.

use serde::{Deserialize, Serialize};

/// A single parsed highlight from a Kindle export file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightRecord {
    /// Title/author line exactly as it appears in the export.
    /// Opaque identifier, compared for exact equality.
    pub book: String,
    /// Page number from the metadata line, if a marker was recognized.
    pub page: Option<u32>,
    /// Highlight body, trimmed. Internal line breaks are preserved
    /// as single newlines.
    pub text: String,
}

impl HighlightRecord {
    pub fn new(book: impl Into<String>, page: Option<u32>, text: impl Into<String>) -> Self {
        HighlightRecord {
            book: book.into(),
            page,
            text: text.into(),
        }
    }

    /// Whitespace-tokenized words of the highlight body.
    pub fn words(&self) -> Vec<&str> {
        self.text.split_whitespace().collect()
    }
}

/// A cluster of overlapping highlights.
///
/// Members are in discovery order: the seed first, then every record it
/// captured during its scan. Final output always has at least two members.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighlightGroup {
    pub members: Vec<HighlightRecord>,
}

impl HighlightGroup {
    /// The record that started this group.
    pub fn seed(&self) -> &HighlightRecord {
        &self.members[0]
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Grouping parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupingParams {
    /// Number of leading words used as the containment fingerprint.
    /// Must be at least 1.
    pub min_words: usize,
    /// Maximum absolute page difference for two highlights to be
    /// considered co-located.
    pub page_tolerance: u32,
}

impl Default for GroupingParams {
    fn default() -> Self {
        Self {
            min_words: 4,
            page_tolerance: 2,
        }
    }
}

/// Full result of one grouping run over a parsed export file.
#[derive(Debug, Serialize)]
pub struct GroupingReport {
    pub version: String,
    pub parameters: GroupingParams,
    pub summary: GroupingSummary,
    pub groups: Vec<HighlightGroup>,
}

#[derive(Debug, Serialize)]
pub struct GroupingSummary {
    /// Total records parsed from the input file.
    pub record_count: usize,
    /// Groups of size >= 2 in the final output.
    pub group_count: usize,
    /// Records that ended up in some group.
    pub grouped_records: usize,
}

impl GroupingReport {
    pub fn new(
        record_count: usize,
        parameters: GroupingParams,
        groups: Vec<HighlightGroup>,
    ) -> Self {
        let grouped_records = groups.iter().map(|g| g.len()).sum();
        GroupingReport {
            version: env!("CARGO_PKG_VERSION").to_string(),
            parameters,
            summary: GroupingSummary {
                record_count,
                group_count: groups.len(),
                grouped_records,
            },
            groups,
        }
    }
}
