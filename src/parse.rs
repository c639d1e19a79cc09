//! Parser for raw Kindle highlight export files.
//!
//! An export is a sequence of blocks separated by a line of ten `=`
//! characters. Each block carries a book line, a metadata line with a
//! localized "page N" marker, a separator line, and the highlight body.

use crate::models::HighlightRecord;
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

/// Block separator used by the Kindle export format.
pub const BLOCK_DELIMITER: &str = "==========";

lazy_static! {
    static ref DEFAULT_PAGE_MARKER: Regex = Regex::new(r"página\s+(\d+)").unwrap();
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("invalid page marker pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("page marker pattern has no capture group for the page number")]
    MissingCaptureGroup,
}

/// Localized "page N" marker used to extract page numbers from the
/// metadata line of a block.
///
/// Exports use the device locale's word for "page", so the marker is
/// configurable rather than hardcoded. The default matches Portuguese
/// exports (`página 42`).
#[derive(Debug, Clone)]
pub struct PageMarker {
    pattern: Regex,
}

impl Default for PageMarker {
    fn default() -> Self {
        PageMarker {
            pattern: DEFAULT_PAGE_MARKER.clone(),
        }
    }
}

impl PageMarker {
    /// Build a marker from the locale's word for "page".
    ///
    /// The word is matched literally, followed by whitespace and one or
    /// more digits.
    pub fn for_keyword(word: &str) -> Self {
        let pattern = format!(r"{}\s+(\d+)", regex::escape(word));
        PageMarker {
            // Escaped literal + fixed suffix is always a valid pattern
            pattern: Regex::new(&pattern).expect("escaped keyword pattern"),
        }
    }

    /// Build a marker from a full regex. The pattern must contain a
    /// capture group matching the page number digits.
    pub fn from_regex(pattern: &str) -> Result<Self, ParseError> {
        let pattern = Regex::new(pattern)?;
        if pattern.captures_len() < 2 {
            return Err(ParseError::MissingCaptureGroup);
        }
        Ok(PageMarker { pattern })
    }

    /// Extract the page number from a metadata line, if present.
    pub fn extract(&self, line: &str) -> Option<u32> {
        self.pattern
            .captures(line)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }
}

/// Parser for one export file.
#[derive(Debug, Clone, Default)]
pub struct HighlightParser {
    marker: PageMarker,
}

impl HighlightParser {
    pub fn new(marker: PageMarker) -> Self {
        HighlightParser { marker }
    }

    /// Parse raw export content into highlight records, in block order.
    ///
    /// Malformed blocks (empty, or fewer than 3 lines) are silently
    /// skipped. A missing page marker leaves `page` absent. This never
    /// fails; zero records from non-empty content is a valid outcome the
    /// caller reports to the user.
    pub fn parse(&self, content: &str) -> Vec<HighlightRecord> {
        content
            .split(BLOCK_DELIMITER)
            .filter_map(|block| self.parse_block(block))
            .collect()
    }

    /// Parse a single block. Layout:
    ///
    /// ```text
    /// line 0: book title/author
    /// line 1: metadata ("... página 42 | ...")
    /// line 2: separator/date line, ignored
    /// line 3..: highlight text
    /// ```
    fn parse_block(&self, block: &str) -> Option<HighlightRecord> {
        let block = block.trim();
        if block.is_empty() {
            return None;
        }

        // Raw line count, empties included: the text starts at a fixed
        // line index, so blank lines inside the header must keep their slot.
        let lines: Vec<&str> = block.split('\n').collect();
        if lines.len() < 3 {
            return None;
        }

        let book = lines[0].trim().to_string();
        let page = self.marker.extract(lines[1]);
        let text = if lines.len() > 3 {
            lines[3..].join("\n").trim().to_string()
        } else {
            String::new()
        };

        Some(HighlightRecord { book, page, text })
    }
}
