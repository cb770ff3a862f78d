//! Translation bundle consistency validation.
//!
//! Compares the non-comment leaf-key sets of the two locale bundles.
//! A key present in one bundle but not the other is an error; a leaf
//! whose value is empty (or the literal `TODO` placeholder) is a
//! warning. Divergence is detectable but tolerated at runtime — the
//! translator falls back or echoes the key — so this check runs at
//! build time via the `validate-translations` binary.

use crate::i18n::{LocaleMessages, MessageTree};
use std::collections::BTreeSet;

/// Leaf values treated as unfinished placeholders.
const PLACEHOLDER_VALUE: &str = "TODO";

/// Validation outcome: missing keys are errors, placeholder values
/// are warnings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    /// Keys that must be added before the bundles are consistent.
    pub errors: Vec<String>,

    /// Keys whose values need attention but do not break lookups.
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Whether any missing-key errors were found.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Whether any placeholder-value warnings were found.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Whether the bundles are fully consistent and complete.
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

/// Validator for locale bundle consistency.
pub struct TranslationValidator;

impl TranslationValidator {
    /// Validate the Arabic and English bundles against each other.
    pub fn validate(messages: &LocaleMessages) -> ValidationReport {
        let mut report = ValidationReport::default();

        let ar_keys: BTreeSet<String> = messages.ar.leaf_keys().into_iter().collect();
        let en_keys: BTreeSet<String> = messages.en.leaf_keys().into_iter().collect();

        for key in ar_keys.difference(&en_keys) {
            report.errors.push(format!("Missing in English: {}", key));
        }
        for key in en_keys.difference(&ar_keys) {
            report.errors.push(format!("Missing in Arabic: {}", key));
        }

        Self::check_placeholder_values(&messages.ar, "Arabic", &mut report);
        Self::check_placeholder_values(&messages.en, "English", &mut report);

        report
    }

    /// Flag empty and literal-placeholder leaf values.
    fn check_placeholder_values(tree: &MessageTree, label: &str, report: &mut ValidationReport) {
        for (key, value) in tree.leaves() {
            if value.trim().is_empty() || value == PLACEHOLDER_VALUE {
                report
                    .warnings
                    .push(format!("Empty or placeholder value in {}: {}", label, key));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(ar: &str, en: &str) -> LocaleMessages {
        LocaleMessages::from_bundles(ar, en).expect("bundles parse")
    }

    // ==================== Key Set Tests ====================

    #[test]
    fn test_matching_bundles_are_clean() {
        let report = TranslationValidator::validate(&messages(
            r#"{"nav": {"home": "الرئيسية", "about": "عن"}}"#,
            r#"{"nav": {"home": "Home", "about": "About"}}"#,
        ));
        assert!(report.is_clean());
    }

    #[test]
    fn test_key_missing_in_english_is_error() {
        let report = TranslationValidator::validate(&messages(
            r#"{"nav": {"home": "الرئيسية", "about": "عن"}}"#,
            r#"{"nav": {"home": "Home"}}"#,
        ));
        assert!(report.has_errors());
        assert_eq!(report.errors, vec!["Missing in English: nav.about"]);
    }

    #[test]
    fn test_key_missing_in_arabic_is_error() {
        let report = TranslationValidator::validate(&messages(
            r#"{}"#,
            r#"{"footer": {"contact": "Contact"}}"#,
        ));
        assert_eq!(report.errors, vec!["Missing in Arabic: footer.contact"]);
    }

    #[test]
    fn test_comment_keys_ignored() {
        let report = TranslationValidator::validate(&messages(
            r#"{"_comment": "notes", "nav": {"home": "الرئيسية"}}"#,
            r#"{"nav": {"home": "Home", "_todo": "reorder"}}"#,
        ));
        assert!(report.is_clean());
    }

    #[test]
    fn test_structural_divergence_reported_per_leaf() {
        // "nav" is a leaf on one side and a subtree on the other, so
        // the leaf paths differ in both directions.
        let report = TranslationValidator::validate(&messages(
            r#"{"nav": "التنقل"}"#,
            r#"{"nav": {"home": "Home"}}"#,
        ));
        assert_eq!(report.errors.len(), 2);
    }

    // ==================== Placeholder Value Tests ====================

    #[test]
    fn test_empty_value_is_warning_not_error() {
        let report = TranslationValidator::validate(&messages(
            r#"{"nav": {"home": ""}}"#,
            r#"{"nav": {"home": "Home"}}"#,
        ));
        assert!(!report.has_errors());
        assert!(report.has_warnings());
        assert_eq!(
            report.warnings,
            vec!["Empty or placeholder value in Arabic: nav.home"]
        );
    }

    #[test]
    fn test_todo_value_is_warning() {
        let report = TranslationValidator::validate(&messages(
            r#"{"nav": {"home": "الرئيسية"}}"#,
            r#"{"nav": {"home": "TODO"}}"#,
        ));
        assert_eq!(
            report.warnings,
            vec!["Empty or placeholder value in English: nav.home"]
        );
    }

    #[test]
    fn test_whitespace_only_value_is_warning() {
        let report = TranslationValidator::validate(&messages(
            r#"{"x": "   "}"#,
            r#"{"x": "value"}"#,
        ));
        assert!(report.has_warnings());
    }

    // ==================== Report Tests ====================

    #[test]
    fn test_report_accessors() {
        let mut report = ValidationReport::default();
        assert!(report.is_clean());
        report.warnings.push("w".to_string());
        assert!(!report.is_clean());
        assert!(!report.has_errors());
        report.errors.push("e".to_string());
        assert!(report.has_errors());
    }
}
