//! Symbol indexing and value classification for AMPL model files.
//!
//! AMPL models declare named entities with leading keywords (`var`, `param`,
//! `set`, `maximize`, `s.t.`, ...) and use `name: type` pairs for function
//! arguments. This crate recognizes those declarations with a fixed,
//! ordered pattern grammar, builds a per-document symbol table, and answers
//! the navigation queries an editor needs (definition, declaration,
//! implementation, references). Literal tokens are classified into a small
//! value-kind hierarchy with a guaranteed fallback.
//!
//! The crate is deliberately shallow: there is no AST, no scoping, and no
//! expression checking. Every operation is a bounded scan over in-memory
//! lines and every query is total — malformed cursors, unknown words, and
//! unclassifiable tokens all degrade to "no result" or a fallback kind,
//! never an error.
//!
//! Modules:
//! - [`grammar`] — the declaration and value-kind pattern tables (data, not code)
//! - [`value`] — literal classification into [`value::ValueKind`]
//! - [`index`] — per-document symbol table construction
//! - [`navigate`] — definition/declaration/implementation/reference queries
//! - [`range`] — line/column positions and spans

pub mod grammar;
pub mod index;
pub mod navigate;
pub mod range;
pub mod value;

pub use grammar::SymbolCategory;
pub use index::{DocumentIndex, SymbolEntry};
pub use range::{Position, Range};
pub use value::{classify, DeclaredType, DeclaredVariant, ValueKind};
