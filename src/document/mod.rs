//! Document state management and text utilities.
//!
//! This module provides:
//! - `LineIndex` and `Line` for line access and position conversion
//! - `DocumentState` and `DocumentStore` for document lifecycle management

mod state;
mod text;

pub use state::{is_ini_document, DocumentState, DocumentStore};
pub use text::{Line, LineIndex};
