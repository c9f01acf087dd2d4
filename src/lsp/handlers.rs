use serde_json::Value;
use tower_lsp::jsonrpc::{Error as LspError, Result as LspResult};
use tower_lsp::lsp_types::*;

use crate::frameworks;
use crate::lsp::backend::Backend;
use crate::lsp::document::DocumentState;
use crate::validation::{Severity, validate_document};

/// Command returning the framework catalog as JSON
pub const LIST_FRAMEWORKS_COMMAND: &str = "weblint.listFrameworks";

/// Trait for handling diagnostics
#[tower_lsp::async_trait]
pub trait HandleDiagnostics {
    async fn publish_diagnostics(&self, uri: Url);
    async fn republish_all(&self);
}

/// Trait for handling workspace commands
#[tower_lsp::async_trait]
pub trait HandleExecuteCommand {
    async fn handle_execute_command(&self, params: ExecuteCommandParams)
    -> LspResult<Option<Value>>;
}

#[tower_lsp::async_trait]
impl HandleDiagnostics for Backend {
    /// Publish the full diagnostic set for a document, replacing the previous one
    async fn publish_diagnostics(&self, uri: Url) {
        let docs = self.documents.lock().await;
        let doc_state = match docs.get(&uri) {
            Some(state) => state,
            None => return,
        };

        let settings = *self.settings.read().await;
        let diagnostics = match doc_state.language {
            Some(language) if settings.is_enabled(language) => {
                validate_document(&doc_state.content, language, &self.checkers)
                    .diagnostics
                    .into_iter()
                    .map(|d| create_lsp_diagnostic(doc_state, d))
                    .collect()
            }
            _ => Vec::new(),
        };

        log::debug!("Publishing {} diagnostics for {}", diagnostics.len(), uri);
        self.client.publish_diagnostics(uri, diagnostics, None).await;
    }

    /// Re-check every open document, e.g. after the settings changed
    async fn republish_all(&self) {
        let uris: Vec<Url> = self.documents.lock().await.keys().cloned().collect();
        for uri in uris {
            self.publish_diagnostics(uri).await;
        }
    }
}

#[tower_lsp::async_trait]
impl HandleExecuteCommand for Backend {
    async fn handle_execute_command(
        &self,
        params: ExecuteCommandParams,
    ) -> LspResult<Option<Value>> {
        match params.command.as_str() {
            LIST_FRAMEWORKS_COMMAND => {
                let catalog = serde_json::to_value(frameworks::catalog())
                    .map_err(|_| LspError::internal_error())?;
                Ok(Some(catalog))
            }
            other => Err(LspError::invalid_params(format!("Unknown command: {}", other))),
        }
    }
}

pub fn create_lsp_diagnostic(
    doc_state: &DocumentState,
    diagnostic: crate::validation::Diagnostic,
) -> tower_lsp::lsp_types::Diagnostic {
    let severity = match diagnostic.severity {
        Severity::Error => DiagnosticSeverity::ERROR,
        Severity::Warning => DiagnosticSeverity::WARNING,
    };

    tower_lsp::lsp_types::Diagnostic::new(
        Range::new(
            doc_state.position(diagnostic.start),
            doc_state.position(diagnostic.end),
        ),
        Some(severity),
        None,
        Some("weblint".to_string()),
        diagnostic.message,
        None,
        None,
    )
}
