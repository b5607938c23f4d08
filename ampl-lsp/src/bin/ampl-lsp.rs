//! Stdio entry point for the AMPL language server.

use ampl_lsp::AmplLanguageServer;
use tower_lsp::{LspService, Server};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let config = ampl_config::load_defaults().unwrap_or_default();

    // Stdout carries the protocol; everything human-readable goes to stderr.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting ampl-lsp");

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();
    let (service, socket) = LspService::new(AmplLanguageServer::new);
    Server::new(stdin, stdout, socket).serve(service).await;
}
