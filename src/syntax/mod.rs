//! Core INI syntax algorithms.
//!
//! This module provides:
//! - the per-line tokenizer used for syntax classification
//! - the section outline builder and its change-span diff

pub mod outline;
pub mod spans;
pub mod token;
