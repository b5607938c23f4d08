//! Language Server Protocol implementation for AMPL model files.
//!
//! The server is a thin tower-lsp shell around `ampl-analysis`: document
//! lifecycle notifications rebuild a per-URI symbol table, and navigation
//! requests resolve against that table plus the raw text.
//!
//! Architecture
//!
//!     LSP layer (tower-lsp):
//!         - JSON-RPC transport, capability negotiation, request routing
//!
//!     Server layer (`server`):
//!         - Implements the `LanguageServer` trait
//!         - Owns the document store: one index per open URI, replaced
//!           wholesale on every open/change, dropped on close
//!         - Translates between protocol positions and analysis ranges
//!         - Thin tests asserting the right things are called and returned
//!
//!     Feature layer (`features`):
//!         - Cursor-to-word plumbing, hover content, completion candidates
//!         - Stateless functions over `ampl-analysis` types, densely tested
//!
//! Supported requests: definition, declaration, implementation, references,
//! hover, and completion. Diagnostics are not produced; the server only
//! clears previously published diagnostics when a document closes.
//!
//! The binary (`ampl-lsp`) speaks the protocol on stdin/stdout and logs to
//! stderr via `tracing`.

pub mod features;
pub mod server;

pub use server::AmplLanguageServer;
