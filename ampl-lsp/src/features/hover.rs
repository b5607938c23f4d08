//! Hover content for the word under the cursor.
//!
//! Hover combines three pieces of assistance: which categories the word is
//! indexed under, the declared construct the current line introduces (sets,
//! objectives, constraints), and the word's value-kind classification.

use ampl_analysis::grammar::{self, SymbolCategory};
use ampl_analysis::value::{classify, declared_variant_for_keyword, DeclaredType};
use ampl_analysis::DocumentIndex;

/// Markdown hover content for `word` at a cursor on `line`.
pub fn hover_markdown(index: &DocumentIndex, line: &str, word: &str) -> Option<String> {
    if word.is_empty() {
        return None;
    }

    let mut sections = Vec::new();
    for category in SymbolCategory::ALL {
        if let Some(range) = index.get(category, word) {
            sections.push(format!(
                "**{word}** — {category} declared at {}",
                range.start
            ));
        }
    }
    if let Some(declared) = declared_type_on_line(line, word) {
        sections.push(format!("declares `{}`", declared.display_name()));
    }
    sections.push(format!("value kind: `{}`", classify(word).display_name()));

    Some(sections.join("\n\n"))
}

/// The declared construct `line` introduces, when its name is `word`.
///
/// A trailing `name: token` pair on the same line (constraint and objective
/// bodies) parameterizes the construct with the token's value kind.
fn declared_type_on_line(line: &str, word: &str) -> Option<DeclaredType> {
    let keyword = grammar::leading_declaration_keyword(line)?;
    let variant = declared_variant_for_keyword(keyword)?;
    let name = grammar::declaration_rule(SymbolCategory::Variable).find(line)?;
    if name.name != word {
        return None;
    }

    let mut declared = DeclaredType::new(word, variant);
    if let Some(arg) = grammar::declaration_rule(SymbolCategory::Argument)
        .find_iter(line)
        .find(|arg| arg.name == word)
    {
        if let Some(type_name) = arg.type_name {
            declared = declared.with_subtype(classify(type_name));
        }
    }
    Some(declared)
}
