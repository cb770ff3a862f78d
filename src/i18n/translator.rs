//! Translator: dot-path key resolution with fallback-locale semantics.
//!
//! Resolution walks the active locale's tree first and retries the
//! fallback locale on a miss. A key absent from both trees comes back
//! verbatim, so callers always render *something*. Found values get
//! named `{placeholder}` interpolation and, when a `count` parameter is
//! supplied, `|`-separated plural variant selection.

use crate::i18n::{Locale, LocaleMessages};
use regex::Regex;
use std::sync::OnceLock;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

/// Resolves translation keys against per-locale message trees.
///
/// Translation is a pure function of (key, locale, fallback locale,
/// tree snapshot); the trees are replaced wholesale when a remote load
/// completes, never mutated in place.
pub struct Translator {
    messages: LocaleMessages,
    fallback: Locale,
}

impl Translator {
    /// Create a translator with the standard fallback locale.
    pub fn new(messages: LocaleMessages) -> Self {
        Self {
            messages,
            fallback: Locale::FALLBACK,
        }
    }

    /// Create a translator with an explicit fallback locale.
    pub fn with_fallback(messages: LocaleMessages, fallback: Locale) -> Self {
        Self { messages, fallback }
    }

    /// The current message trees.
    pub fn messages(&self) -> &LocaleMessages {
        &self.messages
    }

    /// Replace the message trees (e.g. after a remote load).
    pub fn set_messages(&mut self, messages: LocaleMessages) {
        self.messages = messages;
    }

    /// Resolve a key in the given locale, falling back on a miss.
    pub fn resolve(&self, locale: Locale, key: &str) -> Option<&str> {
        self.messages
            .tree(locale)
            .text(key)
            .or_else(|| self.messages.tree(self.fallback).text(key))
    }

    /// Translate a key, returning the key itself on a total miss.
    pub fn translate(&self, locale: Locale, key: &str) -> String {
        self.translate_with(locale, key, &[])
    }

    /// Translate a key with named placeholder interpolation.
    ///
    /// Params are `(name, value)` pairs substituted into
    /// `{name}`-style placeholders. A `count` param additionally
    /// selects a plural variant when the value is `|`-separated.
    /// No interpolation is attempted on a miss — the key comes back
    /// untouched.
    pub fn translate_with(&self, locale: Locale, key: &str, params: &[(&str, &str)]) -> String {
        let Some(value) = self.resolve(locale, key) else {
            return key.to_string();
        };

        let count = params
            .iter()
            .find(|(name, _)| *name == "count")
            .and_then(|(_, value)| value.parse::<i64>().ok());

        let value = match count {
            Some(count) => choose_plural_variant(value, count),
            None => value,
        };

        interpolate(value, params)
    }
}

/// Substitute `{name}` placeholders; unknown placeholders stay verbatim.
fn interpolate(template: &str, params: &[(&str, &str)]) -> String {
    if params.is_empty() || !template.contains('{') {
        return template.to_string();
    }

    let regex = PLACEHOLDER_REGEX
        .get_or_init(|| Regex::new(r"\{([A-Za-z0-9_]+)\}").expect("placeholder regex compiles"));

    regex
        .replace_all(template, |caps: &regex::Captures<'_>| {
            let name = &caps[1];
            params
                .iter()
                .find(|(param, _)| *param == name)
                .map(|(_, value)| (*value).to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Select a plural variant from a `|`-separated message value.
///
/// One variant applies always; two are `singular | plural`; three are
/// `zero | one | many`. Values without a `|` pass through unchanged.
fn choose_plural_variant(value: &str, count: i64) -> &str {
    if !value.contains('|') {
        return value;
    }
    let variants: Vec<&str> = value.split('|').map(str::trim).collect();
    let index = match variants.len() {
        2 => usize::from(count != 1),
        _ => match count {
            0 => 0,
            1 => 1,
            _ => 2.min(variants.len() - 1),
        },
    };
    variants[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translator() -> Translator {
        let messages = LocaleMessages::from_bundles(
            r#"{
                "nav": {"home": "الرئيسية"},
                "greeting": {"welcome": "أهلاً {name}"},
                "ar_only": "بالعربية فقط"
            }"#,
            r#"{
                "nav": {"home": "Home"},
                "greeting": {"welcome": "Welcome, {name}"},
                "en_only": "English only",
                "appointments": "no appointments | one appointment | {count} appointments"
            }"#,
        )
        .expect("bundles parse");
        Translator::new(messages)
    }

    // ==================== Resolution Tests ====================

    #[test]
    fn test_translate_active_locale() {
        let t = translator();
        assert_eq!(t.translate(Locale::Ar, "nav.home"), "الرئيسية");
        assert_eq!(t.translate(Locale::En, "nav.home"), "Home");
    }

    #[test]
    fn test_fallback_locale_on_miss() {
        let t = translator();
        // "en_only" is absent from the Arabic tree.
        assert_eq!(t.translate(Locale::Ar, "en_only"), "English only");
    }

    #[test]
    fn test_no_reverse_fallback() {
        // The fallback locale is English; an English miss does not
        // consult the Arabic tree.
        let t = translator();
        assert_eq!(t.translate(Locale::En, "ar_only"), "ar_only");
    }

    #[test]
    fn test_total_miss_returns_key() {
        let t = translator();
        assert_eq!(t.translate(Locale::Ar, "nope.nothing"), "nope.nothing");
        assert_eq!(t.translate(Locale::En, ""), "");
    }

    #[test]
    fn test_resolve_exposes_raw_value() {
        let t = translator();
        assert_eq!(t.resolve(Locale::En, "greeting.welcome"), Some("Welcome, {name}"));
        assert_eq!(t.resolve(Locale::En, "missing"), None);
    }

    // ==================== Interpolation Tests ====================

    #[test]
    fn test_named_interpolation() {
        let t = translator();
        assert_eq!(
            t.translate_with(Locale::En, "greeting.welcome", &[("name", "Ahmad")]),
            "Welcome, Ahmad"
        );
        assert_eq!(
            t.translate_with(Locale::Ar, "greeting.welcome", &[("name", "أحمد")]),
            "أهلاً أحمد"
        );
    }

    #[test]
    fn test_unknown_placeholder_left_verbatim() {
        let t = translator();
        assert_eq!(
            t.translate_with(Locale::En, "greeting.welcome", &[("other", "x")]),
            "Welcome, {name}"
        );
    }

    #[test]
    fn test_no_interpolation_on_miss() {
        let t = translator();
        assert_eq!(
            t.translate_with(Locale::En, "missing.{name}", &[("name", "x")]),
            "missing.{name}"
        );
    }

    // ==================== Pluralization Tests ====================

    #[test]
    fn test_plural_variants_by_count() {
        let t = translator();
        assert_eq!(
            t.translate_with(Locale::En, "appointments", &[("count", "0")]),
            "no appointments"
        );
        assert_eq!(
            t.translate_with(Locale::En, "appointments", &[("count", "1")]),
            "one appointment"
        );
        assert_eq!(
            t.translate_with(Locale::En, "appointments", &[("count", "7")]),
            "7 appointments"
        );
    }

    #[test]
    fn test_two_variant_plural() {
        assert_eq!(choose_plural_variant("item | items", 1), "item");
        assert_eq!(choose_plural_variant("item | items", 0), "items");
        assert_eq!(choose_plural_variant("item | items", 5), "items");
    }

    #[test]
    fn test_count_param_on_plain_value_just_interpolates() {
        let t = translator();
        assert_eq!(
            t.translate_with(Locale::En, "nav.home", &[("count", "3")]),
            "Home"
        );
    }

    // ==================== Snapshot Replacement Tests ====================

    #[test]
    fn test_set_messages_replaces_snapshot() {
        let mut t = translator();
        assert_eq!(t.translate(Locale::En, "nav.home"), "Home");

        let mut replacement = LocaleMessages::new();
        replacement.en.insert("nav.home", "Start");
        t.set_messages(replacement);

        assert_eq!(t.translate(Locale::En, "nav.home"), "Start");
        // Keys from the old snapshot are gone, not merged.
        assert_eq!(t.translate(Locale::En, "en_only"), "en_only");
    }
}
