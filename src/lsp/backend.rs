use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::{Mutex, RwLock};
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

use crate::config::{CheckerSettings, SettingsWatcher};
use crate::lsp::document::DocumentState;
use crate::lsp::handlers::{HandleDiagnostics, HandleExecuteCommand, LIST_FRAMEWORKS_COMMAND};
use crate::validation::{Checkers, Language};
use crate::Config;

/// The main LSP backend that holds state and implements the Language Server Protocol
#[derive(Clone)]
pub struct Backend {
    pub client: Client,
    pub checkers: Arc<Checkers>,
    pub settings: Arc<RwLock<CheckerSettings>>,
    pub documents: Arc<Mutex<HashMap<Url, DocumentState>>>,
    pub config: Config,
}

impl Backend {
    pub fn new(client: Client, config: Config, checkers: Arc<Checkers>) -> Self {
        let settings = Arc::new(RwLock::new(config.checkers));

        Self {
            client,
            checkers,
            settings,
            documents: Arc::new(Mutex::new(HashMap::new())),
            config,
        }
    }

    /// Reload settings whenever the settings file changes
    fn watch_settings(&self) {
        let Some(path) = self.config.settings_path.clone() else {
            return;
        };

        let mut watcher = match SettingsWatcher::new(path) {
            Ok(watcher) => watcher,
            Err(e) => {
                log::debug!("Not watching settings: {:#}", e);
                return;
            }
        };

        let backend = self.clone();
        tokio::spawn(async move {
            while let Some(change) = watcher.next_change().await {
                match change {
                    Ok(settings) => {
                        *backend.settings.write().await = settings;
                        backend
                            .client
                            .log_message(
                                MessageType::INFO,
                                format!("Reloaded settings from {}", watcher.path().display()),
                            )
                            .await;
                        backend.republish_all().await;
                    }
                    Err(e) => {
                        backend
                            .client
                            .log_message(MessageType::ERROR, format!("{:#}", e))
                            .await;
                    }
                }
            }
        });
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(
        &self,
        _: InitializeParams,
    ) -> tower_lsp::jsonrpc::Result<InitializeResult> {
        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                execute_command_provider: Some(ExecuteCommandOptions {
                    commands: vec![LIST_FRAMEWORKS_COMMAND.to_string()],
                    work_done_progress_options: Default::default(),
                }),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "weblint-ls".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "weblint-ls initialized")
            .await;
        self.watch_settings();
    }

    async fn shutdown(&self) -> tower_lsp::jsonrpc::Result<()> {
        Ok(())
    }

    async fn execute_command(
        &self,
        params: ExecuteCommandParams,
    ) -> tower_lsp::jsonrpc::Result<Option<Value>> {
        self.handle_execute_command(params).await
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri.clone();
        let language = Language::from_language_id(&params.text_document.language_id)
            .or_else(|| Language::from_path(uri.path()));

        let doc_state = DocumentState::new(params.text_document.text, language);

        let mut docs = self.documents.lock().await;
        docs.insert(uri.clone(), doc_state);
        drop(docs); // Release the lock before calling publish_diagnostics

        self.publish_diagnostics(uri).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri.clone();
        if let Some(change) = params.content_changes.into_iter().last() {
            let mut docs = self.documents.lock().await;
            let language = docs
                .get(&uri)
                .map_or_else(|| Language::from_path(uri.path()), |doc| doc.language);
            docs.insert(uri.clone(), DocumentState::new(change.text, language));
            drop(docs); // Release the lock before calling publish_diagnostics

            self.publish_diagnostics(uri).await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        self.documents.lock().await.remove(&uri);
        self.client.publish_diagnostics(uri, Vec::new(), None).await;
    }
}
