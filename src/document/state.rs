//! Document state management for the INI LSP.

use std::ops::Range;
use std::sync::Arc;

use dashmap::DashMap;
use tower_lsp::lsp_types::Url;

use crate::settings::Settings;
use crate::syntax::outline::{build_regions, changed_span, SectionRegion};

use super::text::LineIndex;

/// State for a single document snapshot.
///
/// A new state is built for every content change; the outline is computed
/// once per snapshot, while tokens are recomputed on each request.
#[derive(Debug, Clone)]
pub struct DocumentState {
    /// Pre-computed line index for line access and position conversion.
    pub line_index: LineIndex,
    /// Section outline regions, sorted by start line.
    pub outline: Vec<SectionRegion>,
    /// Document version from the client.
    pub version: i32,
}

impl DocumentState {
    /// Create a new document state by indexing the source and building the
    /// section outline.
    pub fn new(source: String, version: i32) -> Self {
        let line_index = LineIndex::new(source);
        let outline = build_regions(&line_index);
        Self {
            line_index,
            outline,
            version,
        }
    }
}

/// Thread-safe storage for open documents.
///
/// Each document holds exactly one current snapshot; `open` replaces it
/// wholesale, so readers always observe a fully built state.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: DashMap<Url, Arc<DocumentState>>,
}

impl DocumentStore {
    /// Create a new empty document store.
    pub fn new() -> Self {
        Self {
            documents: DashMap::new(),
        }
    }

    /// Open or update a document with the given source text.
    ///
    /// Returns the new state together with the byte span whose outline
    /// changed relative to the superseded snapshot. `None` means the
    /// outline is unchanged and no notification is needed.
    pub fn open(
        &self,
        uri: Url,
        source: String,
        version: i32,
    ) -> (Arc<DocumentState>, Option<Range<usize>>) {
        let state = Arc::new(DocumentState::new(source, version));
        let previous = self.documents.insert(uri, Arc::clone(&state));

        let changed = match previous {
            Some(old) => changed_span(
                &old.outline,
                &old.line_index,
                &state.outline,
                &state.line_index,
            ),
            None => changed_span(&[], &state.line_index, &state.outline, &state.line_index),
        };
        (state, changed)
    }

    /// Close a document.
    pub fn close(&self, uri: &Url) {
        self.documents.remove(uri);
    }

    /// Get a document's current state.
    pub fn get(&self, uri: &Url) -> Option<Arc<DocumentState>> {
        self.documents.get(uri).map(|r| Arc::clone(&r))
    }
}

/// Check if a URI refers to a document this server handles.
///
/// `.ini` is always recognized; settings may add further extensions.
pub fn is_ini_document(uri: &Url, settings: &Settings) -> bool {
    match uri.path().rsplit_once('.') {
        Some((_, extension)) => settings.recognizes_extension(extension),
        None => false,
    }
}
