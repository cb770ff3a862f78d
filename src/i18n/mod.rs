//! Internationalization (i18n) module for the bilingual site core.
//!
//! This module owns everything language-related: the locale type, the
//! locale store (active locale + persisted preference + document
//! attribute sync), the message trees, the translator with fallback
//! resolution, the safe-translation wrapper, the remote translation
//! loader, and the bundle consistency validator.
//!
//! # Architecture
//!
//! - `locale`: the two recognized locales and their metadata
//! - `store`: single source of truth for the active locale
//! - `messages`: nested message trees and dot-path lookup
//! - `translator`: key resolution with fallback-locale semantics
//! - `safe`: fallback-on-miss and existence-check helpers
//! - `loader`: remote translation records reshaped into message trees
//! - `validator`: bundle consistency checking
//!
//! There is deliberately no process-wide singleton here: callers
//! construct one [`I18n`] context at startup and pass it to every
//! consumer.
//!
//! # Example
//!
//! ```rust,ignore
//! use labas_site::i18n::{I18n, LocaleMessages, MemoryPreferences};
//!
//! let messages = LocaleMessages::from_bundles(ar_json, en_json)?;
//! let mut i18n = I18n::new(messages, Box::new(MemoryPreferences::new()));
//! i18n.set_locale("en");
//! let title = i18n.t("hero.title");
//! ```

mod loader;
mod locale;
mod messages;
mod safe;
mod store;
mod translator;
mod validator;

pub use loader::TranslationLoader;
pub use locale::{Direction, Locale};
pub use messages::{LocaleMessages, MessageNode, MessageTree};
pub use store::{
    DocumentSink, LocaleStore, MemoryPreferences, PreferenceStore, PREFERRED_LOCALE_KEY,
};
pub use translator::Translator;
pub use validator::{TranslationValidator, ValidationReport};

/// The static locale bundles compiled into the binary.
pub fn bundled_messages() -> serde_json::Result<LocaleMessages> {
    LocaleMessages::from_bundles(
        include_str!("../../locales/ar.json"),
        include_str!("../../locales/en.json"),
    )
}

/// The i18n context: locale store + translator + diagnostics mode.
///
/// One of these is constructed at startup and handed (by reference) to
/// everything that reads locale state or translated strings. The safe
/// translation helpers (`ts`, `has_key`, `tp`) live in the `safe`
/// module as additional methods on this type.
pub struct I18n {
    store: LocaleStore,
    translator: Translator,
    dev_mode: bool,
}

impl I18n {
    /// Create a context from preloaded messages and a preference store.
    ///
    /// The persisted locale preference (if any, and if recognized) wins
    /// over the default locale. Diagnostics mode defaults to debug
    /// builds.
    pub fn new(messages: LocaleMessages, prefs: Box<dyn PreferenceStore>) -> Self {
        Self {
            store: LocaleStore::new(prefs),
            translator: Translator::new(messages),
            dev_mode: cfg!(debug_assertions),
        }
    }

    /// Override diagnostics mode (missing-key markers and logging).
    pub fn with_dev_mode(mut self, dev_mode: bool) -> Self {
        self.dev_mode = dev_mode;
        self
    }

    /// Whether missing translations are surfaced loudly.
    pub fn dev_mode(&self) -> bool {
        self.dev_mode
    }

    /// The currently active locale.
    pub fn locale(&self) -> Locale {
        self.store.get()
    }

    /// Access the locale store (to attach document sinks, etc.).
    pub fn store(&self) -> &LocaleStore {
        &self.store
    }

    /// Mutable access to the locale store.
    pub fn store_mut(&mut self) -> &mut LocaleStore {
        &mut self.store
    }

    /// Access the translator (e.g. to inspect loaded messages).
    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    /// Replace the message trees, e.g. after a remote load completes.
    pub fn set_messages(&mut self, messages: LocaleMessages) {
        self.translator.set_messages(messages);
    }

    /// Set the active locale from a code string.
    ///
    /// Returns `false` (and changes nothing) for unrecognized codes;
    /// see [`LocaleStore::set`] for the silent-ignore contract.
    pub fn set_locale(&mut self, code: &str) -> bool {
        self.store.set(code)
    }

    /// Switch to the other locale.
    pub fn toggle_locale(&mut self) {
        self.store.toggle();
    }

    /// Translate a key against the active locale.
    ///
    /// Returns the key itself when it resolves in neither the active
    /// nor the fallback tree.
    pub fn t(&self, key: &str) -> String {
        self.translator.translate(self.store.get(), key)
    }

    /// Translate a key with named placeholder interpolation.
    pub fn t_with(&self, key: &str, params: &[(&str, &str)]) -> String {
        self.translator
            .translate_with(self.store.get(), key, params)
    }
}
