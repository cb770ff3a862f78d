//! Safe-translation helpers: fallback-on-miss and existence checks.
//!
//! These wrap the plain translator with a higher-confidence API. The
//! translator's own miss signal is the key echoed back verbatim, so
//! misses are detected by string identity. That heuristic is unsound
//! when a real translation legitimately equals its own key — accepted
//! for this domain, see [`I18n::has_key`].

use crate::i18n::I18n;
use tracing::{error, warn};

impl I18n {
    /// Translate with an explicit fallback for missing keys.
    ///
    /// Found keys behave exactly like [`I18n::t_with`]. On a miss, the
    /// supplied fallback is returned when present (with a diagnostic in
    /// dev mode). With no fallback, dev mode returns a visibly tagged
    /// `[MISSING: key]` marker while production degrades to the bare
    /// key — development surfaces defects loudly, production degrades
    /// gracefully.
    pub fn ts(&self, key: &str, fallback: Option<&str>, params: &[(&str, &str)]) -> String {
        let translation = self.t_with(key, params);
        if translation != key {
            return translation;
        }

        match fallback {
            Some(fallback) => {
                if self.dev_mode() {
                    warn!(
                        "Missing translation for key {:?}, using fallback {:?}",
                        key, fallback
                    );
                }
                fallback.to_string()
            }
            None => {
                if self.dev_mode() {
                    error!("Missing translation for key {:?} and no fallback provided", key);
                    format!("[MISSING: {}]", key)
                } else {
                    key.to_string()
                }
            }
        }
    }

    /// Whether a key resolves to a translation.
    ///
    /// True iff `t(key)` differs from `key`. Unsound when a
    /// translation's value happens to equal its own key; that value
    /// would be reported as missing.
    pub fn has_key(&self, key: &str) -> bool {
        self.t(key) != key
    }

    /// Translate with pluralization.
    ///
    /// Merges `count` into the interpolation params and delegates to
    /// [`I18n::ts`]; variant selection itself happens in the
    /// translator's message format.
    pub fn tp(&self, key: &str, count: i64, params: &[(&str, &str)]) -> String {
        let count_value = count.to_string();
        let mut merged: Vec<(&str, &str)> = params.to_vec();
        merged.push(("count", &count_value));
        self.ts(key, None, &merged)
    }
}
