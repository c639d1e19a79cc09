//! Greedy containment grouping of highlight records.
//!
//! Two highlights are considered overlapping when they come from the same
//! book, their pages lie within a tolerance window, and the leading words
//! of one occur as a substring of the other's full text. The leading-word
//! fingerprint targets the common case of a reader re-highlighting an
//! extended span: the opening words agree even when the tails diverge.
//!
//! The clustering is greedy: records are scanned in input order, each
//! unconsumed record seeds a group and captures every still-unconsumed
//! match in one pass. A record captured once is never re-examined, so
//! capture order decides ties; the relation is not transitive, and the
//! resulting partition is order-dependent by design.

use crate::models::{GroupingParams, HighlightGroup, HighlightRecord};

/// Partition records into groups of overlapping highlights.
///
/// Returns only groups with at least two members, in the order their
/// seeds were encountered. Never fails: records with absent pages or
/// fewer than `min_words` words simply match nothing.
pub fn group_by_containment(
    records: &[HighlightRecord],
    params: &GroupingParams,
) -> Vec<HighlightGroup> {
    // Index-keyed exclusion array keeps iteration order and indices
    // stable while records are consumed.
    let mut used = vec![false; records.len()];
    let mut groups: Vec<HighlightGroup> = Vec::new();

    for i in 0..records.len() {
        if used[i] {
            continue;
        }

        let mut members = vec![records[i].clone()];

        // Scan the entire sequence, not just indices after the seed:
        // an earlier record left behind by a previous group can still
        // be captured here.
        for j in 0..records.len() {
            if j == i || used[j] {
                continue;
            }
            if pair_matches(&records[i], &records[j], params) {
                members.push(records[j].clone());
                used[j] = true;
            }
        }

        used[i] = true;
        groups.push(HighlightGroup { members });
    }

    groups.retain(|g| g.len() > 1);
    groups
}

/// Containment test for one pair of records.
fn pair_matches(a: &HighlightRecord, b: &HighlightRecord, params: &GroupingParams) -> bool {
    if a.book != b.book {
        return false;
    }

    let (Some(page_a), Some(page_b)) = (a.page, b.page) else {
        return false;
    };
    if page_a.abs_diff(page_b) > params.page_tolerance {
        return false;
    }

    let words_a = a.words();
    let words_b = b.words();
    if words_a.len() < params.min_words || words_b.len() < params.min_words {
        return false;
    }

    let prefix_a = words_a[..params.min_words].join(" ");
    let prefix_b = words_b[..params.min_words].join(" ");

    // Either direction counts: whichever highlight is the superset, the
    // other's opening words appear somewhere inside it.
    a.text.contains(&prefix_b) || b.text.contains(&prefix_a)
}
