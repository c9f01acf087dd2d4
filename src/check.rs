//! One-shot file checking for the command line.

use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::CheckerSettings;
use crate::validation::{Checkers, Diagnostic, Language, validate_document};

/// Diagnostics for one file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub language: Language,
    pub diagnostics: Vec<Diagnostic>,
}

impl FileReport {
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == crate::validation::Severity::Error)
    }
}

/// Check a file, picking the checker from its extension
pub fn check_file(
    path: &Path,
    settings: &CheckerSettings,
    checkers: &Checkers,
) -> Result<FileReport> {
    let language = Language::from_path(&path.to_string_lossy())
        .ok_or_else(|| anyhow!("No checker for file: {}", path.display()))?;
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let diagnostics = if settings.is_enabled(language) {
        validate_document(&content, language, checkers).diagnostics
    } else {
        log::info!("{} checker disabled, skipping {}", language.name(), path.display());
        Vec::new()
    };

    Ok(FileReport {
        path: path.to_path_buf(),
        language,
        diagnostics,
    })
}
