//! Remote translation loader.
//!
//! Fetches the flat translation records from the content source and
//! reshapes them into the per-locale trees the translator consumes.
//! On a failed load, previously loaded trees are left untouched (or
//! stay empty before the first success), so the system keeps serving
//! whatever it last had — degrading to raw keys at worst.
//!
//! One load is expected to be in flight at a time by convention; the
//! loader does not deduplicate concurrent calls but exposes
//! [`TranslationLoader::is_loading`] so callers can avoid redundant
//! fetches.

use crate::i18n::{LocaleMessages, Translator};
use crate::sanity::{build_message_trees, SanityClient, SanityError};
use tracing::warn;

/// Loads and holds remotely-sourced message trees.
pub struct TranslationLoader {
    client: SanityClient,
    messages: LocaleMessages,
    loading: bool,
    last_error: Option<String>,
}

impl TranslationLoader {
    /// Create a loader with empty trees.
    pub fn new(client: SanityClient) -> Self {
        Self {
            client,
            messages: LocaleMessages::new(),
            loading: false,
            last_error: None,
        }
    }

    /// Whether a load is currently in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The error message of the most recent failed load, if the last
    /// load failed.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The most recently loaded trees (empty before the first
    /// successful load).
    pub fn messages(&self) -> &LocaleMessages {
        &self.messages
    }

    /// Fetch all translation records and rebuild the trees.
    ///
    /// On failure the previous trees are retained and the error is
    /// both returned and kept on [`TranslationLoader::last_error`].
    pub async fn load(&mut self) -> Result<(), SanityError> {
        self.loading = true;
        self.last_error = None;

        let result = self.client.fetch_translations().await;
        self.loading = false;

        match result {
            Ok(records) => {
                self.messages = build_message_trees(&records);
                Ok(())
            }
            Err(err) => {
                warn!("Translation load failed, keeping previous trees: {}", err);
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Push the loaded trees into a translator.
    pub fn apply_to(&self, translator: &mut Translator) {
        translator.set_messages(self.messages.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Locale;
    use wiremock::matchers::{method, query_param_contains};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn translations_body() -> serde_json::Value {
        serde_json::json!({
            "result": [
                {"key": "nav.about", "value": {"en": "About", "ar": "عن"}, "category": "nav"},
                {"key": "nav.home", "value": {"en": "Home", "ar": "الرئيسية"}, "category": "nav"}
            ]
        })
    }

    #[tokio::test]
    async fn test_load_populates_both_trees() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param_contains("query", "translation"))
            .respond_with(ResponseTemplate::new(200).set_body_json(translations_body()))
            .mount(&server)
            .await;

        let mut loader = TranslationLoader::new(SanityClient::with_query_url(&server.uri()));
        assert!(loader.messages().is_empty());

        loader.load().await.expect("load succeeds");

        assert!(!loader.is_loading());
        assert_eq!(loader.last_error(), None);
        assert_eq!(loader.messages().en.text("nav.about"), Some("About"));
        assert_eq!(loader.messages().ar.text("nav.home"), Some("الرئيسية"));
    }

    #[tokio::test]
    async fn test_failed_load_retains_previous_trees() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(translations_body()))
            .expect(1)
            .mount(&server)
            .await;

        let mut loader = TranslationLoader::new(SanityClient::with_query_url(&server.uri()));
        loader.load().await.expect("first load succeeds");
        drop(server); // the next fetch has nothing to talk to

        let result = loader.load().await;
        assert!(result.is_err());
        assert!(loader.last_error().is_some());
        // Previous good trees survive the failure.
        assert_eq!(loader.messages().en.text("nav.about"), Some("About"));
    }

    #[tokio::test]
    async fn test_failed_first_load_leaves_empty_trees() {
        let mut loader =
            TranslationLoader::new(SanityClient::with_query_url("http://127.0.0.1:1"));
        let result = loader.load().await;
        assert!(result.is_err());
        assert!(loader.messages().is_empty());
        assert!(!loader.is_loading());
    }

    #[tokio::test]
    async fn test_apply_to_feeds_translator() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(translations_body()))
            .mount(&server)
            .await;

        let mut loader = TranslationLoader::new(SanityClient::with_query_url(&server.uri()));
        loader.load().await.expect("load succeeds");

        let mut translator = Translator::new(LocaleMessages::new());
        assert_eq!(translator.translate(Locale::En, "nav.home"), "nav.home");
        loader.apply_to(&mut translator);
        assert_eq!(translator.translate(Locale::En, "nav.home"), "Home");
    }
}
