//! Section outline regions over an INI document snapshot.
//!
//! A region spans a section header through the last meaningful line before
//! the next header. Trailing blank lines are not folded, and neither is a
//! comment block sitting directly above the next header; a comment block
//! separated from the next header by a blank line still belongs to the
//! current section.

use std::ops::Range;

use crate::document::LineIndex;

use super::spans;
use super::token::SECTION_PATTERN;

/// A collapsible line range anchored at a section header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRegion {
    pub start_line: usize,
    pub end_line: usize,
    /// Intra-line offset where the fold starts; always 0 for sections.
    pub start_offset: usize,
    /// The matched header text, shown when the region is collapsed.
    pub label: String,
    pub collapsed: bool,
}

/// Rolling markers reset at the start of the document and at every section
/// header.
#[derive(Debug, Default)]
struct SectionTracker {
    last_comment: Option<usize>,
    last_comment_above_empty: Option<usize>,
    last_empty: Option<usize>,
    last_key_value: Option<usize>,
}

impl SectionTracker {
    /// The last line that still belongs to the open section's body: the
    /// later of the last key/value line and the last comment line sitting
    /// above the currently trailing blank run.
    fn body_end(&self) -> Option<usize> {
        self.last_key_value.max(self.last_comment_above_empty)
    }
}

fn close_region(mut region: SectionRegion, tracker: &SectionTracker) -> Option<SectionRegion> {
    // A comment can only count as body when a blank line was seen after it.
    debug_assert!(
        tracker.last_comment_above_empty.is_none() || tracker.last_empty.is_some(),
        "comment-above-empty marker without an empty line"
    );
    let end = tracker.body_end()?;
    if end <= region.start_line {
        return None;
    }
    region.end_line = end;
    Some(region)
}

/// Build the ordered list of section regions for a full snapshot.
///
/// Regions come out sorted by `start_line` and pairwise non-overlapping; a
/// section with no body before the next header (or end of document) yields
/// no region. A document with zero sections yields zero regions.
pub fn build_regions(index: &LineIndex) -> Vec<SectionRegion> {
    let mut regions = Vec::new();
    let mut open: Option<SectionRegion> = None;
    let mut tracker = SectionTracker::default();

    for line in index.lines() {
        let trimmed = line.text.trim();
        let header = SECTION_PATTERN.find(trimmed);

        if trimmed.starts_with(';') {
            tracker.last_comment = Some(line.number);
        } else if trimmed.is_empty() {
            tracker.last_empty = Some(line.number);
            tracker.last_comment_above_empty = tracker.last_comment;
        } else if header.is_none() {
            tracker.last_key_value = Some(line.number);
        }

        if let Some(m) = header {
            if let Some(region) = open.take().and_then(|r| close_region(r, &tracker)) {
                regions.push(region);
            }
            tracker = SectionTracker::default();
            open = Some(SectionRegion {
                start_line: line.number,
                end_line: line.number,
                start_offset: 0,
                label: m.as_str().to_string(),
                collapsed: false,
            });
        }
    }

    if let Some(region) = open.take().and_then(|r| close_region(r, &tracker)) {
        regions.push(region);
    }
    regions
}

fn region_span(region: &SectionRegion, index: &LineIndex) -> Range<usize> {
    let start = index.line_span(region.start_line).start + region.start_offset;
    let end = index.line_span(region.end_line).end;
    start..end
}

/// Compute the minimal byte span of the new snapshot whose outline changed
/// relative to the previous one.
///
/// Old regions are converted to spans against the old snapshot and clamped
/// to the new snapshot's length; the reported span is the extent of the
/// removed portion (`old \ new`) united with the extent of the new region
/// list. Returns `None` when the two span sets are identical, so rebuilding
/// an unchanged snapshot is a no-op.
pub fn changed_span(
    old_regions: &[SectionRegion],
    old_index: &LineIndex,
    new_regions: &[SectionRegion],
    new_index: &LineIndex,
) -> Option<Range<usize>> {
    let limit = new_index.source().len();
    let old_spans = spans::normalize(old_regions.iter().map(|r| {
        let span = region_span(r, old_index);
        span.start.min(limit)..span.end.min(limit)
    }));
    let new_spans = spans::normalize(new_regions.iter().map(|r| region_span(r, new_index)));

    let removed = spans::difference(&old_spans, &new_spans);
    let added = spans::difference(&new_spans, &old_spans);
    if removed.is_empty() && added.is_empty() {
        return None;
    }

    let mut start = usize::MAX;
    let mut end = 0;
    if let (Some(first), Some(last)) = (removed.first(), removed.last()) {
        start = first.start;
        end = last.end;
    }
    if let (Some(first), Some(last)) = (new_spans.first(), new_spans.last()) {
        start = start.min(first.start);
        end = end.max(last.end);
    }
    (start <= end).then_some(start..end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(source: &str) -> LineIndex {
        LineIndex::new(source.to_string())
    }

    fn lines(regions: &[SectionRegion]) -> Vec<(usize, usize)> {
        regions.iter().map(|r| (r.start_line, r.end_line)).collect()
    }

    #[test]
    fn no_sections_no_regions() {
        assert!(build_regions(&index("x=1\ny=2\n")).is_empty());
        assert!(build_regions(&index("")).is_empty());
    }

    #[test]
    fn single_section_with_body() {
        let regions = build_regions(&index("[core]\na=1\nb=2"));
        assert_eq!(lines(&regions), vec![(0, 2)]);
        assert_eq!(regions[0].label, "[core]");
        assert!(!regions[0].collapsed);
        assert_eq!(regions[0].start_offset, 0);
    }

    #[test]
    fn bodyless_section_is_discarded() {
        let regions = build_regions(&index("[empty]\n[full]\nx=1"));
        assert_eq!(lines(&regions), vec![(1, 2)]);
    }

    #[test]
    fn header_only_document_yields_nothing() {
        assert!(build_regions(&index("[only]")).is_empty());
    }

    #[test]
    fn trailing_blanks_and_lead_in_comment_excluded() {
        // The blank line and the comment directly above [B] belong to B's
        // lead-in, not to A's fold.
        let regions = build_regions(&index("[A]\nx=1\n\n; note\n[B]\ny=hello"));
        assert_eq!(lines(&regions), vec![(0, 1), (4, 5)]);
        assert_eq!(regions[0].label, "[A]");
        assert_eq!(regions[1].label, "[B]");
    }

    #[test]
    fn comment_block_above_blank_line_is_folded() {
        // The comment block is separated from [B] by a blank line, so it
        // still counts as body of [A].
        let regions = build_regions(&index("[A]\nx=1\n; tail\n\n[B]\ny=1"));
        assert_eq!(lines(&regions), vec![(0, 2), (4, 5)]);
    }

    #[test]
    fn regions_sorted_and_disjoint() {
        let regions = build_regions(&index(
            "[a1]\nx=1\n\n[a2]\ny=2\nz=3\n\n[a3]\nw=4\n",
        ));
        for pair in regions.windows(2) {
            assert!(pair[0].end_line < pair[1].start_line, "{regions:?}");
        }
    }

    #[test]
    fn rebuild_is_idempotent() {
        let idx = index("[A]\nx=1\n\n[B]\ny=2\n");
        let first = build_regions(&idx);
        let second = build_regions(&idx);
        assert_eq!(first, second);
        assert_eq!(changed_span(&first, &idx, &second, &idx), None);
    }

    #[test]
    fn changed_span_on_first_build_covers_new_regions() {
        let idx = index("[A]\nx=1");
        let regions = build_regions(&idx);
        let span = changed_span(&[], &idx, &regions, &idx);
        assert_eq!(span, Some(0..7));
    }

    #[test]
    fn changed_span_when_section_merges() {
        // Replacing the [B] header with a key/value line (same length) folds
        // everything into [A].
        let old_idx = index("[A]\nx=1\n[B]\ny=2");
        let old = build_regions(&old_idx);
        assert_eq!(lines(&old), vec![(0, 1), (2, 3)]);

        let new_idx = index("[A]\nx=1\nz=3\ny=2");
        let new = build_regions(&new_idx);
        assert_eq!(lines(&new), vec![(0, 3)]);

        let span = changed_span(&old, &old_idx, &new, &new_idx);
        assert_eq!(span, Some(0..15));
    }

    #[test]
    fn changed_span_clamps_old_regions_to_new_snapshot() {
        let old_idx = index("[A]\nx=1\n[B]\ny=2");
        let old = build_regions(&old_idx);

        let new_idx = index("[A]\nx=1\n;b\n;c");
        let new = build_regions(&new_idx);
        assert_eq!(lines(&new), vec![(0, 1)]);

        let span = changed_span(&old, &old_idx, &new, &new_idx);
        assert_eq!(span, Some(0..13));
    }
}
