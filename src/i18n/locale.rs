//! Locale type: the two recognized site locales and their metadata.
//!
//! The site is strictly bilingual: Arabic is the primary locale
//! (default, right-to-left, unprefixed URLs) and English is the
//! secondary locale (fallback for missing keys, left-to-right, `/en`
//! URL prefix). Anything else is rejected at parse time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reading direction of a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Left-to-right (English).
    Ltr,
    /// Right-to-left (Arabic).
    Rtl,
}

impl Direction {
    /// The value written to the document `dir` attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recognized locale.
///
/// `Ar` is the primary locale and `En` the secondary; exactly one is
/// active at any time (see [`super::LocaleStore`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Arabic — primary locale, right-to-left.
    Ar,
    /// English — secondary locale, left-to-right, fallback for misses.
    En,
}

impl Locale {
    /// The locale active before any preference is known.
    pub const DEFAULT: Locale = Locale::Ar;

    /// The locale consulted when a key misses in the active tree.
    pub const FALLBACK: Locale = Locale::En;

    /// Parse a locale code.
    ///
    /// Returns `None` for anything other than the two recognized codes;
    /// callers decide whether that is a silent no-op (the locale store)
    /// or an input error (the relay payloads).
    pub fn from_code(code: &str) -> Option<Locale> {
        match code {
            "ar" => Some(Locale::Ar),
            "en" => Some(Locale::En),
            _ => None,
        }
    }

    /// The ISO 639-1 code, as written to the document `lang` attribute.
    pub fn code(self) -> &'static str {
        match self {
            Locale::Ar => "ar",
            Locale::En => "en",
        }
    }

    /// Reading direction for this locale.
    pub fn direction(self) -> Direction {
        match self {
            Locale::Ar => Direction::Rtl,
            Locale::En => Direction::Ltr,
        }
    }

    /// Whether this locale reads right-to-left.
    pub fn is_rtl(self) -> bool {
        self.direction() == Direction::Rtl
    }

    /// The other recognized locale.
    pub fn other(self) -> Locale {
        match self {
            Locale::Ar => Locale::En,
            Locale::En => Locale::Ar,
        }
    }

    /// Open Graph locale tag for this locale.
    pub fn og_locale(self) -> &'static str {
        match self {
            Locale::Ar => "ar_LY",
            Locale::En => "en_US",
        }
    }

    /// The language name in its native form.
    pub fn native_name(self) -> &'static str {
        match self {
            Locale::Ar => "العربية",
            Locale::En => "English",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
