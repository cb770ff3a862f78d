//! Locale store: single source of truth for the active locale.
//!
//! The store owns the active [`Locale`], reads the persisted preference
//! once at construction, writes it back on every successful change, and
//! notifies registered [`DocumentSink`]s so the host can mirror the
//! locale into the document `lang`/`dir` attributes. Notification is
//! synchronous within `set`: callers never observe a state where the
//! locale changed but the direction did not.
//!
//! Unrecognized locale codes are silently ignored — `set` returns
//! `false` and nothing changes. This matches the site's historical
//! behavior; the boolean return is the only surface through which a
//! caller can notice the rejection.

use crate::i18n::{Direction, Locale};
use std::collections::HashMap;
use tracing::debug;

/// Storage key under which the preferred locale code is persisted.
pub const PREFERRED_LOCALE_KEY: &str = "labas_preferred_locale";

/// A host-provided key-value slot for the persisted locale preference.
///
/// In the browser this is backed by local storage; native hosts and
/// tests use [`MemoryPreferences`].
pub trait PreferenceStore {
    /// Read the value stored under `key`, if any.
    fn read(&self, key: &str) -> Option<String>;

    /// Write `value` under `key`, overwriting any previous value.
    fn write(&mut self, key: &str, value: &str);
}

/// In-memory [`PreferenceStore`] implementation.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: HashMap<String, String>,
}

impl MemoryPreferences {
    /// Create an empty preference store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn read(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// Observer of locale changes, applied to the host document.
///
/// The core transition logic stays pure; hosts register a sink that
/// mutates the real document root (`lang` and `dir` attributes). Sinks
/// are invoked synchronously inside every successful locale change and
/// once at registration so they never start out stale.
pub trait DocumentSink {
    /// Mirror the given locale into the document attributes.
    fn apply(&mut self, lang: &str, dir: Direction);
}

/// Single source of truth for the active locale.
pub struct LocaleStore {
    active: Locale,
    prefs: Box<dyn PreferenceStore>,
    sinks: Vec<Box<dyn DocumentSink>>,
}

impl LocaleStore {
    /// Create a store, resolving the initial locale.
    ///
    /// The persisted preference wins if and only if it parses as one of
    /// the two recognized codes; otherwise the primary locale is
    /// active. Construction performs no writes and no sink
    /// notifications.
    pub fn new(prefs: Box<dyn PreferenceStore>) -> Self {
        let active = prefs
            .read(PREFERRED_LOCALE_KEY)
            .and_then(|code| Locale::from_code(&code))
            .unwrap_or(Locale::DEFAULT);

        Self {
            active,
            prefs,
            sinks: Vec::new(),
        }
    }

    /// Register a document sink and immediately sync it.
    pub fn attach_sink(&mut self, mut sink: Box<dyn DocumentSink>) {
        sink.apply(self.active.code(), self.active.direction());
        self.sinks.push(sink);
    }

    /// The currently active locale.
    pub fn get(&self) -> Locale {
        self.active
    }

    /// Set the active locale from a code string.
    ///
    /// Recognized codes become active, are persisted under
    /// [`PREFERRED_LOCALE_KEY`], and are pushed to every sink before
    /// this method returns. Unrecognized codes are a no-op and return
    /// `false`.
    pub fn set(&mut self, code: &str) -> bool {
        match Locale::from_code(code) {
            Some(locale) => {
                self.set_locale(locale);
                true
            }
            None => {
                debug!("Ignoring unrecognized locale code: {:?}", code);
                false
            }
        }
    }

    /// Set the active locale from an already-validated value.
    pub fn set_locale(&mut self, locale: Locale) {
        self.active = locale;
        self.prefs.write(PREFERRED_LOCALE_KEY, locale.code());
        for sink in &mut self.sinks {
            sink.apply(locale.code(), locale.direction());
        }
    }

    /// Switch to the other locale.
    pub fn toggle(&mut self) {
        self.set_locale(self.active.other());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records every (lang, dir) pair pushed to it.
    struct RecordingSink(Rc<RefCell<Vec<(String, &'static str)>>>);

    impl DocumentSink for RecordingSink {
        fn apply(&mut self, lang: &str, dir: Direction) {
            self.0.borrow_mut().push((lang.to_string(), dir.as_str()));
        }
    }

    fn store() -> LocaleStore {
        LocaleStore::new(Box::new(MemoryPreferences::new()))
    }

    // ==================== Initial State Tests ====================

    #[test]
    fn test_initial_locale_is_primary() {
        assert_eq!(store().get(), Locale::Ar);
    }

    #[test]
    fn test_persisted_preference_wins() {
        let mut prefs = MemoryPreferences::new();
        prefs.write(PREFERRED_LOCALE_KEY, "en");
        let store = LocaleStore::new(Box::new(prefs));
        assert_eq!(store.get(), Locale::En);
    }

    #[test]
    fn test_unrecognized_preference_falls_back_to_primary() {
        let mut prefs = MemoryPreferences::new();
        prefs.write(PREFERRED_LOCALE_KEY, "de");
        let store = LocaleStore::new(Box::new(prefs));
        assert_eq!(store.get(), Locale::Ar);
    }

    // ==================== Set / Toggle Tests ====================

    #[test]
    fn test_set_recognized_code() {
        let mut store = store();
        assert!(store.set("en"));
        assert_eq!(store.get(), Locale::En);
        assert!(store.set("ar"));
        assert_eq!(store.get(), Locale::Ar);
    }

    #[test]
    fn test_set_unrecognized_code_is_silent_noop() {
        let mut store = store();
        store.set("en");
        assert!(!store.set("fr"));
        assert!(!store.set(""));
        assert!(!store.set("EN"));
        assert_eq!(store.get(), Locale::En);
    }

    #[test]
    fn test_toggle_alternates() {
        let mut store = store();
        store.toggle();
        assert_eq!(store.get(), Locale::En);
        store.toggle();
        assert_eq!(store.get(), Locale::Ar);
    }

    // ==================== Persistence Tests ====================

    #[test]
    fn test_set_persists_preference() {
        let mut store = store();
        store.set("en");
        assert_eq!(
            store.prefs.read(PREFERRED_LOCALE_KEY),
            Some("en".to_string())
        );
        store.toggle();
        assert_eq!(
            store.prefs.read(PREFERRED_LOCALE_KEY),
            Some("ar".to_string())
        );
    }

    #[test]
    fn test_rejected_set_does_not_persist() {
        let mut store = store();
        store.set("nope");
        assert_eq!(store.prefs.read(PREFERRED_LOCALE_KEY), None);
    }

    // ==================== Document Sink Tests ====================

    #[test]
    fn test_sink_synced_at_registration() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut store = store();
        store.attach_sink(Box::new(RecordingSink(Rc::clone(&log))));
        assert_eq!(log.borrow().as_slice(), &[("ar".to_string(), "rtl")]);
    }

    #[test]
    fn test_sink_notified_on_every_change() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut store = store();
        store.attach_sink(Box::new(RecordingSink(Rc::clone(&log))));
        store.set("en");
        store.set("en");
        store.toggle();
        assert_eq!(
            log.borrow().as_slice(),
            &[
                ("ar".to_string(), "rtl"),
                ("en".to_string(), "ltr"),
                ("en".to_string(), "ltr"),
                ("ar".to_string(), "rtl"),
            ]
        );
    }

    #[test]
    fn test_sink_untouched_by_rejected_set() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut store = store();
        store.attach_sink(Box::new(RecordingSink(Rc::clone(&log))));
        store.set("xx");
        assert_eq!(log.borrow().len(), 1); // registration sync only
    }
}
