use anyhow::Result;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::io::{stdin, stdout};
use tower_lsp::{LspService, Server};

use crate::lsp::backend::Backend;
use crate::validation::Checkers;
use crate::Config;

/// Start the LSP server on stdio
pub async fn serve(config: Config) -> Result<()> {
    // If running under the integration test, exit after a short delay so the test can read stdout to EOF.
    if std::env::var("WEBLINT_LS_TEST_EXIT").as_deref() == Ok("1") {
        thread::spawn(|| {
            thread::sleep(Duration::from_secs(1));
            std::process::exit(0);
        });
    }

    log::info!(
        "Starting weblint-ls (javascript: {}, html: {}, css: {})",
        config.checkers.javascript,
        config.checkers.html,
        config.checkers.css
    );

    let checkers = Arc::new(Checkers::default());

    let (service, socket) =
        LspService::build(move |client| Backend::new(client, config, checkers)).finish();

    Server::new(stdin(), stdout(), socket).serve(service).await;

    Ok(())
}
