//! Completion candidates drawn from the document's symbol table.

use ampl_analysis::{DocumentIndex, SymbolCategory};
use lsp_types::CompletionItemKind;

/// A semantic completion candidate, translated into protocol items by the
/// server layer.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionCandidate {
    pub label: String,
    pub detail: Option<String>,
    pub kind: CompletionItemKind,
}

/// Every indexed name of the document, in stable label order.
pub fn completion_items(index: &DocumentIndex) -> Vec<CompletionCandidate> {
    let mut items: Vec<CompletionCandidate> = index
        .symbols()
        .map(|entry| CompletionCandidate {
            label: entry.name,
            detail: Some(entry.category.to_string()),
            kind: kind_for(entry.category),
        })
        .collect();
    items.sort_by(|a, b| (&a.label, a.detail.as_deref()).cmp(&(&b.label, b.detail.as_deref())));
    items
}

fn kind_for(category: SymbolCategory) -> CompletionItemKind {
    match category {
        SymbolCategory::Argument => CompletionItemKind::VALUE,
        SymbolCategory::Function => CompletionItemKind::FUNCTION,
        SymbolCategory::Type => CompletionItemKind::CLASS,
        SymbolCategory::Variable => CompletionItemKind::VARIABLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidates_cover_every_indexed_category() {
        let index = DocumentIndex::from_source(
            "var x;\nfunction demand(p: Products)\ntype Matrix(rows: Number)",
        );
        let items = completion_items(&index);

        let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();
        assert!(labels.contains(&"x"));
        assert!(labels.contains(&"demand"));
        assert!(labels.contains(&"Matrix"));

        let matrix = items.iter().find(|i| i.label == "Matrix").unwrap();
        assert_eq!(matrix.kind, CompletionItemKind::CLASS);
        assert_eq!(matrix.detail.as_deref(), Some("type"));
    }

    #[test]
    fn candidates_are_sorted_and_stable() {
        let index = DocumentIndex::from_source("var zebra;\nvar apple;");
        let items = completion_items(&index);
        let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["apple", "zebra"]);
    }

    #[test]
    fn empty_index_yields_no_candidates() {
        assert!(completion_items(&DocumentIndex::default()).is_empty());
    }
}
