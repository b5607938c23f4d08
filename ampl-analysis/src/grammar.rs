//! Declarative pattern grammar for AMPL declarations and literal tokens.
//!
//! The grammar is data, not code: an ordered table of rules, each pairing a
//! symbol category with a compiled regex and its capture names. Rules are
//! tried in declaration order, so precedence is a visible property of the
//! table rather than an artifact of type registration, and it can be tested
//! in isolation.
//!
//! Rule order:
//! 1. argument — `name: type` pair anywhere on a line
//! 2. function — line beginning `function <lowercase-led identifier>(`
//! 3. type — line beginning `type <Uppercase-led identifier>(`
//! 4. variable — line beginning with a declaration keyword plus an identifier

use crate::range::Range;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Bucket under which a declared name is indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolCategory {
    Argument,
    Function,
    Type,
    Variable,
}

impl SymbolCategory {
    pub const ALL: [SymbolCategory; 4] = [
        SymbolCategory::Argument,
        SymbolCategory::Function,
        SymbolCategory::Type,
        SymbolCategory::Variable,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SymbolCategory::Argument => "argument",
            SymbolCategory::Function => "function",
            SymbolCategory::Type => "type",
            SymbolCategory::Variable => "variable",
        }
    }
}

impl fmt::Display for SymbolCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keywords that introduce a named declaration at the start of a line.
pub const DECLARATION_KEYWORDS: &[&str] = &[
    "arc",
    "maximize",
    "minimize",
    "node",
    "param",
    "set",
    "function",
    "subj to",
    "s.t.",
    "subject to",
    "var",
];

/// Reserved logical keywords that can never name a declaration.
pub const RESERVED_LOGICAL_KEYWORDS: &[&str] = &["if", "and", "or"];

/// One recognizer rule: a category, a pattern with a named `name` capture
/// (and `type` for arguments), and its indexing policy.
pub struct DeclarationRule {
    pub category: SymbolCategory,
    /// Whether matches persist in the document symbol table. Argument
    /// declarations are resolved inline by declaration queries instead.
    pub indexed: bool,
    /// Captured names that invalidate a match. The regex crate has no
    /// lookahead, so the rejection set lives on the rule as data.
    pub rejected_names: &'static [&'static str],
    regex: Regex,
}

/// A single rule match: the captured name and its column extent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch<'t> {
    pub name: &'t str,
    pub start: usize,
    pub end: usize,
    pub type_name: Option<&'t str>,
}

impl DeclarationRule {
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// First match of this rule on a line, if any. Matches whose name is in
    /// the rule's rejection set are discarded.
    pub fn find<'t>(&self, line: &'t str) -> Option<RuleMatch<'t>> {
        self.find_iter(line).next()
    }

    /// All matches of this rule on a line, in column order.
    pub fn find_iter<'r, 't>(&'r self, line: &'t str) -> impl Iterator<Item = RuleMatch<'t>> + 'r
    where
        't: 'r,
    {
        self.regex.captures_iter(line).filter_map(move |caps| {
            let name = caps.name("name")?;
            if self.rejected_names.contains(&name.as_str()) {
                return None;
            }
            Some(RuleMatch {
                name: name.as_str(),
                start: name.start(),
                end: name.end(),
                type_name: caps.name("type").map(|m| m.as_str()),
            })
        })
    }

    /// Range of the first matching name on the given line.
    pub fn name_range(&self, line: &str, line_number: usize) -> Option<Range> {
        self.find(line)
            .map(|m| Range::on_line(line_number, m.start, m.end))
    }
}

static DECLARATION_RULES: Lazy<Vec<DeclarationRule>> = Lazy::new(|| {
    let keywords = DECLARATION_KEYWORDS
        .iter()
        .map(|kw| regex::escape(kw))
        .collect::<Vec<_>>()
        .join("|");
    vec![
        DeclarationRule {
            category: SymbolCategory::Argument,
            indexed: false,
            rejected_names: &[],
            regex: Regex::new(r"(?P<name>\w+): (?P<type>\w+)").expect("argument pattern"),
        },
        DeclarationRule {
            category: SymbolCategory::Function,
            indexed: true,
            rejected_names: &[],
            regex: Regex::new(r"^function (?P<name>[a-z]\w*)\(").expect("function pattern"),
        },
        DeclarationRule {
            category: SymbolCategory::Type,
            indexed: true,
            rejected_names: &[],
            regex: Regex::new(r"^type (?P<name>[A-Z]\w*)\(").expect("type pattern"),
        },
        DeclarationRule {
            category: SymbolCategory::Variable,
            indexed: true,
            rejected_names: RESERVED_LOGICAL_KEYWORDS,
            regex: Regex::new(&format!(r"^(?:{keywords})\s+(?P<name>[A-Za-z_]\w*)"))
                .expect("variable pattern"),
        },
    ]
});

/// The full rule table, in precedence order.
pub fn declaration_rules() -> &'static [DeclarationRule] {
    &DECLARATION_RULES
}

/// Lookup a single rule by its category.
pub fn declaration_rule(category: SymbolCategory) -> &'static DeclarationRule {
    DECLARATION_RULES
        .iter()
        .find(|rule| rule.category == category)
        .expect("every category owns one rule")
}

/// Tag for a value-kind recognizer. The classifier maps tags to
/// [`crate::value::ValueKind`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueRuleTag {
    Number,
    Symbolic,
}

/// One literal recognizer: a kind tag and a full-span pattern.
pub struct ValuePattern {
    pub tag: ValueRuleTag,
    regex: Regex,
}

impl ValuePattern {
    pub fn matches(&self, raw: &str) -> bool {
        self.regex.is_match(raw)
    }
}

static VALUE_PATTERNS: Lazy<Vec<ValuePattern>> = Lazy::new(|| {
    vec![
        ValuePattern {
            tag: ValueRuleTag::Number,
            regex: Regex::new(r"^[0-9]+(\.[0-9]+)?$").expect("number pattern"),
        },
        ValuePattern {
            tag: ValueRuleTag::Symbolic,
            regex: Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").expect("symbolic pattern"),
        },
    ]
});

/// Value-kind recognizers, in priority order (number before symbolic).
pub fn value_patterns() -> &'static [ValuePattern] {
    &VALUE_PATTERNS
}

/// The declaration keyword a line opens with, if any. Multi-word keywords
/// win over their prefixes, and the keyword must be followed by whitespace
/// so `setup` never reads as `set`.
pub fn leading_declaration_keyword(line: &str) -> Option<&'static str> {
    DECLARATION_KEYWORDS
        .iter()
        .copied()
        .filter(|kw| {
            line.starts_with(kw) && line[kw.len()..].chars().next().is_some_and(char::is_whitespace)
        })
        .max_by_key(|kw| kw.len())
}
