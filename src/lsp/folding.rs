//! Folding ranges derived from the section outline.

use tower_lsp::lsp_types::{FoldingRange, FoldingRangeKind};

use crate::syntax::outline::SectionRegion;

/// Convert built outline regions to LSP folding ranges.
///
/// The collapsed text is the matched section header, so a folded region
/// still shows which section it hides.
pub fn folding_ranges(regions: &[SectionRegion]) -> Vec<FoldingRange> {
    regions
        .iter()
        .map(|region| FoldingRange {
            start_line: region.start_line as u32,
            start_character: Some(region.start_offset as u32),
            end_line: region.end_line as u32,
            end_character: None,
            kind: Some(FoldingRangeKind::Region),
            collapsed_text: Some(region.label.clone()),
        })
        .collect()
}
