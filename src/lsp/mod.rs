//! LSP protocol feature implementations.
//!
//! This module provides implementations for LSP features:
//! - Semantic tokens for INI syntax highlighting
//! - Folding ranges derived from the section outline

mod folding;
mod semantic_tokens;

pub use folding::folding_ranges;
pub use semantic_tokens::{display_category, legend, tokens_full, DisplayCategory};
