//! Settings infrastructure for inilsp.
//!
//! This module provides support for loading and parsing settings.toml files
//! to configure which file extensions are treated as INI documents.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Root settings structure loaded from settings.toml.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    /// Document recognition configuration.
    pub document: Option<DocumentSettings>,
}

/// Document recognition settings.
#[derive(Debug, Default, Deserialize)]
pub struct DocumentSettings {
    /// Additional file extensions recognized as INI, without the leading
    /// dot: `extensions = ["cfg", "conf"]`.
    pub extensions: Option<Vec<String>>,
}

impl Settings {
    /// Whether a file extension is recognized as INI.
    ///
    /// `.ini` is always recognized; settings only add further extensions.
    /// Comparison is ASCII case-insensitive.
    pub fn recognizes_extension(&self, extension: &str) -> bool {
        if extension.eq_ignore_ascii_case("ini") {
            return true;
        }
        self.document
            .as_ref()
            .and_then(|d| d.extensions.as_ref())
            .is_some_and(|exts| exts.iter().any(|e| e.eq_ignore_ascii_case(extension)))
    }
}

/// Load settings from a settings.toml file.
///
/// Returns default settings if the file doesn't exist or can't be parsed.
pub fn load_settings(path: &Path) -> Settings {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("Warning: failed to parse settings.toml: {}", e);
                Settings::default()
            }
        },
        Err(_) => Settings::default(),
    }
}

/// Discover settings.toml by searching up the directory tree, then direct
/// children.
///
/// Search order:
/// 1. Walk up from `start_dir` to filesystem root
/// 2. If not found, check immediate child directories of `start_dir`
///
/// Returns `(settings, settings_dir)` where `settings_dir` is the directory
/// containing the found settings.toml. If not found, returns
/// `(Settings::default(), start_dir)`.
pub fn discover_settings(start_dir: &Path) -> (Settings, PathBuf) {
    let mut current = Some(start_dir);
    while let Some(dir) = current {
        let candidate = dir.join("settings.toml");
        if candidate.is_file() {
            return (load_settings(&candidate), dir.to_path_buf());
        }
        current = dir.parent();
    }

    if let Ok(entries) = std::fs::read_dir(start_dir) {
        for entry in entries.flatten() {
            if entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false) {
                let candidate = entry.path().join("settings.toml");
                if candidate.is_file() {
                    return (load_settings(&candidate), entry.path());
                }
            }
        }
    }

    (Settings::default(), start_dir.to_path_buf())
}
