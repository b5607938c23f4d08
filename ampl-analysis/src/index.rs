//! Per-document symbol table construction.
//!
//! A [`DocumentIndex`] is built in one pass over a document's lines and is
//! never mutated afterwards: re-indexing produces a fresh table that
//! replaces the previous one wholesale, so readers only ever observe a
//! fully-built index.

use crate::grammar::{self, SymbolCategory};
use crate::range::Range;
use std::collections::HashMap;

/// A declared name, its category, and where it was declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolEntry {
    pub name: String,
    pub category: SymbolCategory,
    pub range: Range,
}

/// Symbol table for one document: category → name → declaration range.
///
/// Names are unique per category. A name declared twice keeps the later
/// declaration (last-write-wins).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentIndex {
    entries: HashMap<SymbolCategory, HashMap<String, Range>>,
}

impl DocumentIndex {
    /// Scan lines against the indexed declaration rules. Lines that match
    /// no rule contribute nothing; that is not an error. A line may match
    /// several rules and is recorded under each matching category.
    pub fn scan<'a, I>(lines: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut entries: HashMap<SymbolCategory, HashMap<String, Range>> = HashMap::new();
        for (line_number, line) in lines.into_iter().enumerate() {
            for rule in grammar::declaration_rules() {
                if !rule.indexed {
                    continue;
                }
                if let Some(m) = rule.find(line) {
                    entries
                        .entry(rule.category)
                        .or_default()
                        .insert(m.name.to_string(), Range::on_line(line_number, m.start, m.end));
                }
            }
        }
        Self { entries }
    }

    /// Build an index from full document text.
    pub fn from_source(source: &str) -> Self {
        Self::scan(source.lines())
    }

    /// Declaration range of `name` in `category`, if declared.
    pub fn get(&self, category: SymbolCategory, name: &str) -> Option<&Range> {
        self.entries.get(&category)?.get(name)
    }

    /// Whether `name` is declared in any category.
    pub fn contains_name(&self, name: &str) -> bool {
        self.entries.values().any(|names| names.contains_key(name))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.values().all(HashMap::is_empty)
    }

    /// Number of indexed declarations across all categories.
    pub fn symbol_count(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    /// All entries, unordered.
    pub fn symbols(&self) -> impl Iterator<Item = SymbolEntry> + '_ {
        self.entries.iter().flat_map(|(category, names)| {
            names.iter().map(|(name, range)| SymbolEntry {
                name: name.clone(),
                category: *category,
                range: range.clone(),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::Range;

    #[test]
    fn var_declaration_is_indexed_with_name_extent() {
        let index = DocumentIndex::from_source("var x");
        assert_eq!(
            index.get(SymbolCategory::Variable, "x"),
            Some(&Range::on_line(0, 4, 5))
        );
    }

    #[test]
    fn function_declaration_is_indexed() {
        let index = DocumentIndex::from_source("function foo(");
        assert_eq!(
            index.get(SymbolCategory::Function, "foo"),
            Some(&Range::on_line(0, 9, 12))
        );
    }

    #[test]
    fn function_line_also_satisfies_the_variable_rule() {
        // `function` sits in the declaration keyword list, so a function
        // header indexes its name under both categories.
        let index = DocumentIndex::from_source("function foo(");
        assert!(index.get(SymbolCategory::Variable, "foo").is_some());
    }

    #[test]
    fn type_declaration_is_indexed() {
        let index = DocumentIndex::from_source("type Matrix(rows: Number)");
        assert_eq!(
            index.get(SymbolCategory::Type, "Matrix"),
            Some(&Range::on_line(0, 5, 11))
        );
    }

    #[test]
    fn arguments_are_not_persisted() {
        let index = DocumentIndex::from_source("function demand(p: Products)");
        assert_eq!(index.get(SymbolCategory::Argument, "p"), None);
        assert!(!index.contains_name("p"));
    }

    #[test]
    fn later_duplicate_declaration_wins() {
        let source = "var x\nparam cost;\n\n\n\nvar x";
        let index = DocumentIndex::from_source(source);
        assert_eq!(
            index.get(SymbolCategory::Variable, "x"),
            Some(&Range::on_line(5, 4, 5))
        );
        assert_eq!(index.symbol_count(), 2);
    }

    #[test]
    fn unmatched_lines_are_ignored() {
        let index = DocumentIndex::from_source("# a comment\n\nsum {p in Products};");
        assert!(index.is_empty());
    }

    #[test]
    fn reindexing_replaces_the_table() {
        let before = DocumentIndex::from_source("var x\nvar y");
        let after = DocumentIndex::from_source("var y");
        assert!(before.contains_name("x"));
        assert!(!after.contains_name("x"));
        assert!(after.contains_name("y"));
    }

    #[test]
    fn mixed_model_indexes_every_category() {
        let source = "\
set Products;
param cost;
var Make;
maximize TotalProfit: 0;
s.t. Capacity: 0;
function demand(p: Products)
type Matrix(rows: Number)";
        let index = DocumentIndex::from_source(source);
        for name in ["Products", "cost", "Make", "TotalProfit", "Capacity"] {
            assert!(
                index.get(SymbolCategory::Variable, name).is_some(),
                "missing variable {name}"
            );
        }
        assert!(index.get(SymbolCategory::Function, "demand").is_some());
        assert!(index.get(SymbolCategory::Type, "Matrix").is_some());
    }

    #[test]
    fn symbols_iterates_all_entries() {
        let index = DocumentIndex::from_source("var x\nset Products;");
        let mut names: Vec<String> = index.symbols().map(|s| s.name).collect();
        names.sort();
        assert_eq!(names, vec!["Products".to_string(), "x".to_string()]);
    }
}
