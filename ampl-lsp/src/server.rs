//! Main language server implementation.

use std::collections::HashMap;
use std::sync::Arc;

use crate::features::completion::{completion_items, CompletionCandidate};
use crate::features::hover::hover_markdown;
use crate::features::navigation;
use ampl_analysis::{navigate, DocumentIndex};
use ampl_analysis::{Position as AnalysisPosition, Range as AnalysisRange};
use ampl_config::{AmplConfig, Loader, NotificationLevel};
use serde_json::Value;
use tokio::sync::RwLock;
use tower_lsp::async_trait;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::request::{
    GotoDeclarationParams, GotoDeclarationResponse, GotoImplementationParams,
    GotoImplementationResponse,
};
use tower_lsp::lsp_types::{
    CompletionItem, CompletionOptions, CompletionParams, CompletionResponse,
    DeclarationCapability, DidChangeConfigurationParams, DidChangeTextDocumentParams,
    DidCloseTextDocumentParams, DidOpenTextDocumentParams, GotoDefinitionParams,
    GotoDefinitionResponse, Hover, HoverContents, HoverParams, HoverProviderCapability,
    ImplementationProviderCapability, InitializeParams, InitializeResult, InitializedParams,
    Location, MarkupContent, MarkupKind, MessageType, OneOf, Position, Range, ReferenceParams,
    ServerCapabilities, ServerInfo, TextDocumentItem, TextDocumentSyncCapability,
    TextDocumentSyncKind, Url,
};
use tower_lsp::Client;

/// The slice of the protocol client the server actually uses. Tests swap in
/// a recording stub.
#[async_trait]
pub trait LspClient: Send + Sync + 'static {
    /// Write a message to the editor's output log.
    async fn log(&self, message: String);
    /// Surface a message as a UI notification.
    async fn show(&self, message: String);
    /// Drop any diagnostics previously published for `uri`.
    async fn clear_diagnostics(&self, uri: Url);
}

#[async_trait]
impl LspClient for Client {
    async fn log(&self, message: String) {
        self.log_message(MessageType::LOG, message).await;
    }

    async fn show(&self, message: String) {
        self.show_message(MessageType::INFO, message).await;
    }

    async fn clear_diagnostics(&self, uri: Url) {
        self.publish_diagnostics(uri, Vec::new(), None).await;
    }
}

/// Seam between the protocol shell and the analysis layer.
pub trait NavigationProvider: Send + Sync + 'static {
    fn definition(&self, index: &DocumentIndex, word: &str) -> Option<AnalysisRange>;
    fn declaration(&self, line: &str, line_number: usize, word: &str) -> Option<AnalysisRange>;
    fn implementation(&self, index: &DocumentIndex, word: &str) -> Option<AnalysisRange>;
    fn references(&self, index: &DocumentIndex, lines: &[String], word: &str)
        -> Vec<AnalysisRange>;
    fn hover(&self, index: &DocumentIndex, line: &str, word: &str) -> Option<String>;
    fn completions(&self, index: &DocumentIndex) -> Vec<CompletionCandidate>;
}

#[derive(Default)]
pub struct DefaultNavigationProvider;

impl DefaultNavigationProvider {
    pub fn new() -> Self {
        Self
    }
}

impl NavigationProvider for DefaultNavigationProvider {
    fn definition(&self, index: &DocumentIndex, word: &str) -> Option<AnalysisRange> {
        navigate::definition(index, word)
    }

    fn declaration(&self, line: &str, line_number: usize, word: &str) -> Option<AnalysisRange> {
        navigate::declaration(line, line_number, word)
    }

    fn implementation(&self, index: &DocumentIndex, word: &str) -> Option<AnalysisRange> {
        navigate::implementation(index, word)
    }

    fn references(
        &self,
        index: &DocumentIndex,
        lines: &[String],
        word: &str,
    ) -> Vec<AnalysisRange> {
        navigate::references(index, lines.iter().map(String::as_str), word)
    }

    fn hover(&self, index: &DocumentIndex, line: &str, word: &str) -> Option<String> {
        hover_markdown(index, line, word)
    }

    fn completions(&self, index: &DocumentIndex) -> Vec<CompletionCandidate> {
        completion_items(index)
    }
}

/// One open document: its symbol table and raw lines. Entries are replaced
/// wholesale on reparse, so a cloned handle always observes a fully-built
/// index.
#[derive(Clone)]
struct DocumentEntry {
    index: Arc<DocumentIndex>,
    lines: Arc<Vec<String>>,
}

#[derive(Default)]
struct DocumentStore {
    entries: RwLock<HashMap<Url, DocumentEntry>>,
}

impl DocumentStore {
    async fn upsert(&self, uri: Url, text: &str) -> DocumentEntry {
        let lines: Vec<String> = text.lines().map(str::to_owned).collect();
        let entry = DocumentEntry {
            index: Arc::new(DocumentIndex::scan(lines.iter().map(String::as_str))),
            lines: Arc::new(lines),
        };
        self.entries.write().await.insert(uri, entry.clone());
        entry
    }

    async fn get(&self, uri: &Url) -> Option<DocumentEntry> {
        self.entries.read().await.get(uri).cloned()
    }

    async fn remove(&self, uri: &Url) {
        self.entries.write().await.remove(uri);
    }
}

pub struct AmplLanguageServer<C = Client, P = DefaultNavigationProvider> {
    client: C,
    documents: DocumentStore,
    features: Arc<P>,
    config: RwLock<AmplConfig>,
}

impl AmplLanguageServer<Client, DefaultNavigationProvider> {
    pub fn new(client: Client) -> Self {
        Self::with_features(client, Arc::new(DefaultNavigationProvider::new()))
    }
}

impl<C, P> AmplLanguageServer<C, P>
where
    C: LspClient,
    P: NavigationProvider,
{
    pub fn with_features(client: C, features: Arc<P>) -> Self {
        Self {
            client,
            documents: DocumentStore::default(),
            features,
            config: RwLock::new(AmplConfig::default()),
        }
    }

    async fn reindex(&self, uri: Url, text: &str) {
        let entry = self.documents.upsert(uri.clone(), text).await;
        let count = entry.index.symbol_count();
        tracing::debug!(%uri, symbols = count, "indexed document");
        self.report(format!("{uri}: indexed {count} symbol(s)")).await;
    }

    async fn report(&self, message: String) {
        let level = self.config.read().await.server.show_notifications;
        self.client.log(message.clone()).await;
        if level == NotificationLevel::Always {
            self.client.show(message).await;
        }
    }

    async fn document(&self, uri: &Url) -> Option<DocumentEntry> {
        self.documents.get(uri).await
    }

    /// Document entry plus the word under the cursor, or nothing when the
    /// document is unindexed or the cursor misses every identifier.
    async fn cursor_word(&self, uri: &Url, position: Position) -> Option<(DocumentEntry, String)> {
        let entry = self.document(uri).await?;
        let word = navigation::word_at(
            &entry.lines,
            position.line as usize,
            position.character as usize,
        )?
        .to_string();
        Some((entry, word))
    }
}

fn to_lsp_position(position: &AnalysisPosition) -> Position {
    Position::new(position.line as u32, position.column as u32)
}

fn to_lsp_range(range: &AnalysisRange) -> Range {
    Range {
        start: to_lsp_position(&range.start),
        end: to_lsp_position(&range.end),
    }
}

fn to_completion_item(candidate: CompletionCandidate) -> CompletionItem {
    CompletionItem {
        label: candidate.label,
        detail: candidate.detail,
        kind: Some(candidate.kind),
        ..CompletionItem::default()
    }
}

/// Build the per-workspace configuration from editor-provided settings,
/// layered over the embedded defaults. Invalid settings fall back rather
/// than fail: configuration problems must never take the server down.
fn build_config(options: Option<&Value>) -> AmplConfig {
    let mut loader = Loader::new();
    if let Some(level) = options
        .and_then(|value| value.get("showNotifications"))
        .and_then(Value::as_str)
    {
        loader = match loader.set_override("server.show_notifications", level) {
            Ok(updated) => updated,
            Err(error) => {
                tracing::warn!(%error, "ignoring invalid showNotifications setting");
                Loader::new()
            }
        };
    }
    loader.build().unwrap_or_else(|error| {
        tracing::warn!(%error, "settings did not deserialize, using defaults");
        AmplConfig::default()
    })
}

#[async_trait]
impl<C, P> tower_lsp::LanguageServer for AmplLanguageServer<C, P>
where
    C: LspClient,
    P: NavigationProvider,
{
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        *self.config.write().await = build_config(params.initialization_options.as_ref());

        let capabilities = ServerCapabilities {
            text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::FULL)),
            definition_provider: Some(OneOf::Left(true)),
            declaration_provider: Some(DeclarationCapability::Simple(true)),
            implementation_provider: Some(ImplementationProviderCapability::Simple(true)),
            references_provider: Some(OneOf::Left(true)),
            hover_provider: Some(HoverProviderCapability::Simple(true)),
            completion_provider: Some(CompletionOptions {
                trigger_characters: Some(vec![".".to_string()]),
                ..CompletionOptions::default()
            }),
            ..ServerCapabilities::default()
        };

        Ok(InitializeResult {
            capabilities,
            server_info: Some(ServerInfo {
                name: "ampl-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {}

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        *self.config.write().await = build_config(Some(&params.settings));
        tracing::debug!("workspace configuration rebuilt");
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let TextDocumentItem { uri, text, .. } = params.text_document;
        self.reindex(uri, &text).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        // Full sync: the last change carries the complete document text.
        if let Some(change) = params.content_changes.into_iter().last() {
            self.reindex(params.text_document.uri, &change.text).await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        self.documents.remove(&uri).await;
        // Publishing empty diagnostics clears any stale entries for the file.
        self.client.clear_diagnostics(uri.clone()).await;
        tracing::debug!(%uri, "document closed");
    }

    async fn goto_definition(
        &self,
        params: GotoDefinitionParams,
    ) -> Result<Option<GotoDefinitionResponse>> {
        let position = params.text_document_position_params.position;
        let uri = params.text_document_position_params.text_document.uri;
        let Some((entry, word)) = self.cursor_word(&uri, position).await else {
            return Ok(None);
        };
        Ok(self
            .features
            .definition(&entry.index, &word)
            .map(|range| GotoDefinitionResponse::Scalar(Location::new(uri, to_lsp_range(&range)))))
    }

    async fn goto_declaration(
        &self,
        params: GotoDeclarationParams,
    ) -> Result<Option<GotoDeclarationResponse>> {
        let position = params.text_document_position_params.position;
        let uri = params.text_document_position_params.text_document.uri;
        let Some((entry, word)) = self.cursor_word(&uri, position).await else {
            return Ok(None);
        };
        let line_number = position.line as usize;
        let line = navigation::line_at(&entry.lines, line_number);
        Ok(self
            .features
            .declaration(line, line_number, &word)
            .map(|range| GotoDeclarationResponse::Scalar(Location::new(uri, to_lsp_range(&range)))))
    }

    async fn goto_implementation(
        &self,
        params: GotoImplementationParams,
    ) -> Result<Option<GotoImplementationResponse>> {
        let position = params.text_document_position_params.position;
        let uri = params.text_document_position_params.text_document.uri;
        let Some((entry, word)) = self.cursor_word(&uri, position).await else {
            return Ok(None);
        };
        Ok(self.features.implementation(&entry.index, &word).map(|range| {
            GotoImplementationResponse::Scalar(Location::new(uri, to_lsp_range(&range)))
        }))
    }

    async fn references(&self, params: ReferenceParams) -> Result<Option<Vec<Location>>> {
        let position = params.text_document_position.position;
        let uri = params.text_document_position.text_document.uri;
        let Some((entry, word)) = self.cursor_word(&uri, position).await else {
            return Ok(None);
        };
        let hits = self.features.references(&entry.index, &entry.lines, &word);
        if hits.is_empty() {
            return Ok(None);
        }
        Ok(Some(
            hits.iter()
                .map(|range| Location::new(uri.clone(), to_lsp_range(range)))
                .collect(),
        ))
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let position = params.text_document_position_params.position;
        let uri = params.text_document_position_params.text_document.uri;
        let Some((entry, word)) = self.cursor_word(&uri, position).await else {
            return Ok(None);
        };
        let line = navigation::line_at(&entry.lines, position.line as usize);
        Ok(self.features.hover(&entry.index, line, &word).map(|value| Hover {
            contents: HoverContents::Markup(MarkupContent {
                kind: MarkupKind::Markdown,
                value,
            }),
            range: None,
        }))
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let uri = params.text_document_position.text_document.uri;
        let Some(entry) = self.document(&uri).await else {
            return Ok(None);
        };
        let items: Vec<CompletionItem> = self
            .features
            .completions(&entry.index)
            .into_iter()
            .map(to_completion_item)
            .collect();
        if items.is_empty() {
            return Ok(None);
        }
        Ok(Some(CompletionResponse::Array(items)))
    }
}
