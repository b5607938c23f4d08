//! Classification of literal tokens into a small value-kind hierarchy.
//!
//! [`classify`] is total: every raw token maps to exactly one [`ValueKind`],
//! with [`ValueKind::Primitive`] as the explicit default arm for anything
//! the recognizers do not cover. Classification is pure and idempotent.

use crate::grammar::{self, ValueRuleTag};

/// The classification of a literal token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueKind {
    /// Whole-word numeric literal, with an optional decimal part.
    Number { raw: String },
    /// Identifier-shaped text.
    Symbolic { raw: String },
    /// Fallback when no more specific kind matches.
    Primitive { raw: String },
    /// A named, possibly parameterized declared construct.
    Declared(DeclaredType),
}

/// Flavor of a declared construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclaredVariant {
    Set,
    Objective,
    Constraint,
}

/// A declared construct such as `set Products` or `s.t. Capacity`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredType {
    pub raw: String,
    pub subtype: Option<Box<ValueKind>>,
    pub variant: DeclaredVariant,
}

impl DeclaredType {
    pub fn new(raw: impl Into<String>, variant: DeclaredVariant) -> Self {
        Self {
            raw: raw.into(),
            subtype: None,
            variant,
        }
    }

    pub fn with_subtype(mut self, subtype: ValueKind) -> Self {
        self.subtype = Some(Box::new(subtype));
        self
    }

    /// Presentation name for the variant. Sets are inherently collections,
    /// so they carry the `[]` suffix.
    pub fn display_name(&self) -> String {
        match self.variant {
            DeclaredVariant::Set => "set[]".to_string(),
            DeclaredVariant::Objective => "objective".to_string(),
            DeclaredVariant::Constraint => "constraint".to_string(),
        }
    }
}

impl ValueKind {
    /// The raw token this kind was attributed to.
    pub fn raw(&self) -> &str {
        match self {
            ValueKind::Number { raw }
            | ValueKind::Symbolic { raw }
            | ValueKind::Primitive { raw } => raw,
            ValueKind::Declared(declared) => &declared.raw,
        }
    }

    /// Presentation name. The base fallback kind displays as `Any`;
    /// concrete kinds display their kind name.
    pub fn display_name(&self) -> String {
        match self {
            ValueKind::Number { .. } => "number".to_string(),
            ValueKind::Symbolic { .. } => "symbolic".to_string(),
            ValueKind::Primitive { .. } => "Any".to_string(),
            ValueKind::Declared(declared) => declared.display_name(),
        }
    }
}

/// Classify a raw token against the value-kind recognizers in priority
/// order. Never fails: unclassifiable input is valid input whose
/// classification is [`ValueKind::Primitive`].
pub fn classify(raw: &str) -> ValueKind {
    for pattern in grammar::value_patterns() {
        if pattern.matches(raw) {
            return match pattern.tag {
                ValueRuleTag::Number => ValueKind::Number { raw: raw.to_string() },
                ValueRuleTag::Symbolic => ValueKind::Symbolic { raw: raw.to_string() },
            };
        }
    }
    ValueKind::Primitive { raw: raw.to_string() }
}

/// Map a declaration keyword to the declared-type variant it introduces.
/// Keywords that declare plain variables (`var`, `param`, ...) map to none.
pub fn declared_variant_for_keyword(keyword: &str) -> Option<DeclaredVariant> {
    match keyword {
        "set" => Some(DeclaredVariant::Set),
        "maximize" | "minimize" => Some(DeclaredVariant::Objective),
        "subj to" | "s.t." | "subject to" => Some(DeclaredVariant::Constraint),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("42", ValueKind::Number { raw: "42".into() })]
    #[case("42.5", ValueKind::Number { raw: "42.5".into() })]
    #[case("0.001", ValueKind::Number { raw: "0.001".into() })]
    #[case("foo_bar", ValueKind::Symbolic { raw: "foo_bar".into() })]
    #[case("_hidden", ValueKind::Symbolic { raw: "_hidden".into() })]
    #[case("x9", ValueKind::Symbolic { raw: "x9".into() })]
    #[case("!!!", ValueKind::Primitive { raw: "!!!".into() })]
    #[case("42.5.1", ValueKind::Primitive { raw: "42.5.1".into() })]
    #[case("", ValueKind::Primitive { raw: "".into() })]
    #[case("a b", ValueKind::Primitive { raw: "a b".into() })]
    fn classify_cases(#[case] raw: &str, #[case] expected: ValueKind) {
        assert_eq!(classify(raw), expected);
    }

    #[test]
    fn numbers_win_over_symbolic_ordering() {
        // A purely numeric token also fits no symbolic shape, but the table
        // order is still what guarantees the outcome.
        assert!(matches!(classify("123"), ValueKind::Number { .. }));
    }

    #[test]
    fn display_names() {
        assert_eq!(classify("42").display_name(), "number");
        assert_eq!(classify("foo").display_name(), "symbolic");
        assert_eq!(classify("??").display_name(), "Any");
        assert_eq!(
            ValueKind::Declared(DeclaredType::new("Products", DeclaredVariant::Set))
                .display_name(),
            "set[]"
        );
        assert_eq!(
            DeclaredType::new("TotalProfit", DeclaredVariant::Objective).display_name(),
            "objective"
        );
        assert_eq!(
            DeclaredType::new("Capacity", DeclaredVariant::Constraint).display_name(),
            "constraint"
        );
    }

    #[test]
    fn declared_subtype_is_preserved() {
        let declared = DeclaredType::new("Make", DeclaredVariant::Set)
            .with_subtype(classify("Products"));
        assert_eq!(
            declared.subtype.as_deref(),
            Some(&ValueKind::Symbolic { raw: "Products".into() })
        );
        assert_eq!(declared.raw, "Make");
    }

    #[test]
    fn keyword_variants() {
        assert_eq!(declared_variant_for_keyword("set"), Some(DeclaredVariant::Set));
        assert_eq!(
            declared_variant_for_keyword("maximize"),
            Some(DeclaredVariant::Objective)
        );
        assert_eq!(
            declared_variant_for_keyword("minimize"),
            Some(DeclaredVariant::Objective)
        );
        for kw in ["subj to", "s.t.", "subject to"] {
            assert_eq!(declared_variant_for_keyword(kw), Some(DeclaredVariant::Constraint));
        }
        assert_eq!(declared_variant_for_keyword("var"), None);
        assert_eq!(declared_variant_for_keyword("param"), None);
    }

    proptest! {
        // Classification is total and pure: any input yields exactly one
        // kind, twice over.
        #[test]
        fn classify_is_total_and_idempotent(raw in "\\PC*") {
            let first = classify(&raw);
            let second = classify(&raw);
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.raw(), raw.as_str());
        }

        #[test]
        fn numeric_tokens_classify_as_numbers(n in 0u64..1_000_000, d in proptest::option::of(0u64..1000)) {
            let raw = match d {
                Some(d) => format!("{n}.{d}"),
                None => n.to_string(),
            };
            prop_assert!(
                matches!(classify(&raw), ValueKind::Number { .. }),
                "expected ValueKind::Number for {:?}",
                raw
            );
        }
    }
}
