//! Navigation queries over a document's symbol table and raw text.
//!
//! All queries are read-only and total: an unknown word, an unindexed
//! document, or a cursor outside the text yields "no result", never an
//! error.

use crate::grammar::{self, SymbolCategory};
use crate::index::DocumentIndex;
use crate::range::Range;
use once_cell::sync::Lazy;
use regex::Regex;

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("word pattern"));

/// The identifier under the cursor, if any. A column at the very end of a
/// word still selects it, matching editor word-boundary behavior.
pub fn word_at_position(line: &str, column: usize) -> Option<&str> {
    WORD.find_iter(line)
        .find(|m| m.start() <= column && column <= m.end())
        .map(|m| m.as_str())
}

/// Where `word` is declared as a variable.
pub fn definition(index: &DocumentIndex, word: &str) -> Option<Range> {
    index.get(SymbolCategory::Variable, word).cloned()
}

/// Where `word` is declared as a function argument on the current line.
///
/// Arguments are not persisted in the symbol table; the current line is
/// re-scanned against the argument rule instead.
pub fn declaration(line: &str, line_number: usize, word: &str) -> Option<Range> {
    grammar::declaration_rule(SymbolCategory::Argument)
        .find_iter(line)
        .find(|m| m.name == word)
        .map(|m| Range::on_line(line_number, m.start, m.end))
}

/// Where `word` is declared as a function.
pub fn implementation(index: &DocumentIndex, word: &str) -> Option<Range> {
    index.get(SymbolCategory::Function, word).cloned()
}

/// Every whole-word occurrence of `word` in the document, in document
/// order — the declaration site included. Empty unless `word` is declared
/// in some category. This is a textual superset: comments and strings are
/// not excluded, and no scoping is applied.
pub fn references<'a, I>(index: &DocumentIndex, lines: I, word: &str) -> Vec<Range>
where
    I: IntoIterator<Item = &'a str>,
{
    if !index.contains_name(word) {
        return Vec::new();
    }
    let pattern = match Regex::new(&format!(r"\b{}\b", regex::escape(word))) {
        Ok(pattern) => pattern,
        Err(_) => return Vec::new(),
    };
    let mut hits = Vec::new();
    for (line_number, line) in lines.into_iter().enumerate() {
        for m in pattern.find_iter(line) {
            hits.push(Range::on_line(line_number, m.start(), m.end()));
        }
    }
    hits
}
