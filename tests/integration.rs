//! Integration tests for clippings-dedup.
//!
//! These tests run synthetic export text through the full parse + group
//! pipeline.

use clippings_dedup::group::group_by_containment;
use clippings_dedup::models::{GroupingParams, GroupingReport};
use clippings_dedup::output::{write_csv, write_json, write_text};
use clippings_dedup::parse::{HighlightParser, PageMarker, BLOCK_DELIMITER};

/// Build one export block in the Kindle layout.
fn block(book: &str, meta: &str, text: &str) -> String {
    format!("{}\n{}\n\n{}", book, meta, text)
}

/// Join blocks with the export delimiter.
fn export(blocks: &[String]) -> String {
    blocks.join(&format!("\n{}\n", BLOCK_DELIMITER))
}

#[test]
fn test_full_pipeline_overlapping_highlights() {
    let content = export(&[
        block(
            "Dom Casmurro (Machado de Assis)",
            "- Seu destaque na página 72 | Adicionado em sexta-feira",
            "a vida é uma ópera e uma grande ópera",
        ),
        block(
            "Dom Casmurro (Machado de Assis)",
            "- Seu destaque na página 73 | Adicionado em sexta-feira",
            "a vida é uma ópera e uma grande ópera, o tenor e o barítono",
        ),
        block(
            "Outro Livro",
            "- Seu destaque na página 72 | Adicionado em sábado",
            "a vida é uma ópera e uma grande ópera",
        ),
    ]);

    let records = HighlightParser::default().parse(&content);
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].page, Some(72));

    let params = GroupingParams::default();
    let groups = group_by_containment(&records, &params);

    // Same book, pages 72/73, shared 4-word opening: one group of two.
    // The third record is from a different book and is dropped.
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 2);
    assert_eq!(groups[0].members[0].page, Some(72));
    assert_eq!(groups[0].members[1].page, Some(73));
    assert_eq!(groups[0].seed().book, "Dom Casmurro (Machado de Assis)");
}

#[test]
fn test_full_pipeline_no_overlap() {
    let content = export(&[
        block("Livro", "página 10", "primeiro destaque totalmente distinto"),
        block("Livro", "página 200", "segundo destaque sem nada em comum"),
    ]);

    let records = HighlightParser::default().parse(&content);
    assert_eq!(records.len(), 2);

    let groups = group_by_containment(&records, &GroupingParams::default());
    assert!(groups.is_empty(), "Disjoint highlights form no groups");
}

#[test]
fn test_malformed_blocks_are_skipped_in_order() {
    let content = export(&[
        block("Livro A", "página 1", "primeiro"),
        "lixo".to_string(),
        String::new(),
        block("Livro B", "página 2", "segundo"),
    ]);

    let records = HighlightParser::default().parse(&content);

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].book, "Livro A");
    assert_eq!(records[1].book, "Livro B");
}

#[test]
fn test_missing_page_marker_yields_ungroupable_record() {
    let content = export(&[
        block("Livro", "- Seu destaque | sem página", "mesmo texto compartilhado aqui"),
        block("Livro", "página 5", "mesmo texto compartilhado aqui"),
    ]);

    let records = HighlightParser::default().parse(&content);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].page, None);
    assert_eq!(records[1].page, Some(5));

    let groups = group_by_containment(&records, &GroupingParams::default());
    assert!(groups.is_empty(), "A record without a page never matches");
}

#[test]
fn test_english_locale_export() {
    let content = export(&[
        block(
            "The Idiot (Fyodor Dostoevsky)",
            "- Your Highlight on page 113 | Location 1720-1721",
            "beauty will save the world somehow",
        ),
        block(
            "The Idiot (Fyodor Dostoevsky)",
            "- Your Highlight on page 114 | Location 1722-1725",
            "beauty will save the world somehow, he said quietly",
        ),
    ]);

    let parser = HighlightParser::new(PageMarker::for_keyword("page"));
    let records = parser.parse(&content);
    assert_eq!(records[0].page, Some(113));
    assert_eq!(records[1].page, Some(114));

    let groups = group_by_containment(&records, &GroupingParams::default());
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 2);
}

#[test]
fn test_report_serialization_end_to_end() {
    let content = export(&[
        block("Livro", "página 8", "trecho repetido de novo aqui"),
        block("Livro", "página 9", "trecho repetido de novo aqui e mais"),
    ]);

    let records = HighlightParser::default().parse(&content);
    let params = GroupingParams::default();
    let groups = group_by_containment(&records, &params);
    let report = GroupingReport::new(records.len(), params, groups);

    assert_eq!(report.summary.record_count, 2);
    assert_eq!(report.summary.group_count, 1);
    assert_eq!(report.summary.grouped_records, 2);

    let mut json = Vec::new();
    write_json(&report, &mut json).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
    assert_eq!(value["summary"]["group_count"], 1);
    assert_eq!(value["groups"][0]["members"][0]["page"], 8);

    let mut csv = Vec::new();
    write_csv(&report.groups, &mut csv).unwrap();
    let csv = String::from_utf8(csv).unwrap();
    assert_eq!(csv.lines().count(), 3); // header + 2 members

    let mut text = Vec::new();
    write_text(&report.groups, &mut text).unwrap();
    let text = String::from_utf8(text).unwrap();
    assert!(text.contains("Group 1 - 2 highlights"));
    assert!(text.contains("- [Livro - page 8] trecho repetido de novo aqui"));
}

#[test]
fn test_min_words_controls_fingerprint_length() {
    // Texts share only their first three words.
    let content = export(&[
        block("Livro", "página 1", "um dois três quatro"),
        block("Livro", "página 1", "um dois três cinco"),
    ]);

    let records = HighlightParser::default().parse(&content);

    let strict = GroupingParams {
        min_words: 4,
        page_tolerance: 2,
    };
    assert!(group_by_containment(&records, &strict).is_empty());

    let loose = GroupingParams {
        min_words: 3,
        page_tolerance: 2,
    };
    assert_eq!(group_by_containment(&records, &loose).len(), 1);
}

#[test]
fn test_empty_export_is_reportable_not_fatal() {
    let records = HighlightParser::default().parse("\n==========\n   \n==========\n");
    assert!(records.is_empty());

    // Grouping an empty sequence is equally benign.
    let groups = group_by_containment(&records, &GroupingParams::default());
    assert!(groups.is_empty());
}
