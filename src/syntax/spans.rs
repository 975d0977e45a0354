//! Normalized span collections for outline change tracking.
//!
//! The outline builder compares the previous and current region lists as
//! sets of byte spans. Spans are normalized (sorted, overlapping and
//! adjacent runs merged) before set operations.

use std::ops::Range;

/// Normalize a collection of byte spans: sort by start and merge spans that
/// overlap or touch.
pub fn normalize(spans: impl IntoIterator<Item = Range<usize>>) -> Vec<Range<usize>> {
    let mut spans: Vec<Range<usize>> = spans.into_iter().collect();
    spans.sort_by_key(|s| (s.start, s.end));

    let mut merged: Vec<Range<usize>> = Vec::with_capacity(spans.len());
    for span in spans {
        match merged.last_mut() {
            Some(last) if span.start <= last.end => last.end = last.end.max(span.end),
            _ => merged.push(span),
        }
    }
    merged
}

/// Compute `left \ right` over normalized span lists.
///
/// Both inputs must already be normalized; the result is normalized too.
pub fn difference(left: &[Range<usize>], right: &[Range<usize>]) -> Vec<Range<usize>> {
    let mut out = Vec::new();
    let mut first_candidate = 0;

    for l in left {
        let mut start = l.start;
        while first_candidate < right.len() && right[first_candidate].end <= start {
            first_candidate += 1;
        }

        let mut i = first_candidate;
        while i < right.len() && right[i].start < l.end {
            if right[i].start > start {
                out.push(start..right[i].start);
            }
            start = start.max(right[i].end);
            i += 1;
        }
        if start < l.end {
            out.push(start..l.end);
        }
    }
    out
}
