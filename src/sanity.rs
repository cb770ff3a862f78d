//! Sanity CMS content client.
//!
//! Read-only GROQ queries against the Sanity HTTP query API: documents
//! by type, a single document by type+slug, the site-settings
//! singleton, the navigation singleton by title, and the flat
//! translation-record list. Translation records are reshaped into the
//! nested [`LocaleMessages`] trees the translator consumes.
//!
//! There is no write path. Remote failures surface as [`SanityError`]
//! values, never as panics — callers degrade (previous data, raw keys)
//! instead of becoming inoperable.

use crate::i18n::LocaleMessages;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::info;

/// Default API version used when none is configured.
pub const DEFAULT_API_VERSION: &str = "2024-01-01";

/// Title of the site's main navigation singleton.
pub const DEFAULT_NAVIGATION_TITLE: &str = "Main Menu";

/// Errors from the content source.
#[derive(Debug, Error)]
pub enum SanityError {
    /// The request never produced a response (network, TLS, timeout).
    #[error("content request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("content API error ({status}): {body}")]
    Api {
        /// HTTP status returned by the API.
        status: StatusCode,
        /// Response body, for diagnostics only.
        body: String,
    },

    /// The response body did not match the expected shape.
    #[error("malformed content response: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A flat translation record as authored in the CMS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationRecord {
    /// Dot-path key, unique per record (e.g. `nav.about`).
    pub key: String,
    /// Per-locale values; either side may be absent.
    pub value: LocalizedValue,
    /// Authoring category tag (e.g. `nav`, `hero`).
    #[serde(default)]
    pub category: Option<String>,
}

/// The per-locale value pair of a translation record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LocalizedValue {
    /// English value.
    #[serde(default)]
    pub en: Option<String>,
    /// Arabic value.
    #[serde(default)]
    pub ar: Option<String>,
}

/// Envelope every query response arrives in.
#[derive(Debug, Deserialize)]
struct QueryResponse {
    result: Value,
}

/// Read-only client for the Sanity query API.
#[derive(Debug, Clone)]
pub struct SanityClient {
    http: reqwest::Client,
    query_url: String,
}

impl SanityClient {
    /// Create a client against the CDN-backed query endpoint.
    pub fn new(project_id: &str, dataset: &str, api_version: &str) -> Self {
        let query_url = format!(
            "https://{}.apicdn.sanity.io/v{}/data/query/{}",
            project_id, api_version, dataset
        );
        Self {
            http: reqwest::Client::new(),
            query_url,
        }
    }

    /// Create a client against an explicit query endpoint (tests).
    pub fn with_query_url(query_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            query_url: query_url.to_string(),
        }
    }

    /// Execute a GROQ query and unwrap the `result` envelope.
    async fn query(&self, groq: &str) -> Result<Value, SanityError> {
        let response = self
            .http
            .get(&self.query_url)
            .query(&[("query", groq)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SanityError::Api { status, body });
        }

        let body = response.text().await?;
        let envelope: QueryResponse = serde_json::from_str(&body)?;
        Ok(envelope.result)
    }

    /// Fetch all documents of a given type.
    pub async fn fetch_documents(&self, doc_type: &str) -> Result<Vec<Value>, SanityError> {
        let groq = format!(r#"*[_type == "{}"]"#, doc_type);
        let result = self.query(&groq).await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Fetch a single document by type and slug.
    pub async fn fetch_document_by_slug(
        &self,
        doc_type: &str,
        slug: &str,
    ) -> Result<Option<Value>, SanityError> {
        let groq = format!(
            r#"*[_type == "{}" && slug.current == "{}"][0]"#,
            doc_type, slug
        );
        let result = self.query(&groq).await?;
        Ok(non_null(result))
    }

    /// Fetch the site settings singleton.
    pub async fn fetch_site_settings(&self) -> Result<Option<Value>, SanityError> {
        let result = self.query(r#"*[_type == "siteSettings"][0]"#).await?;
        Ok(non_null(result))
    }

    /// Fetch a navigation singleton by title
    /// (usually [`DEFAULT_NAVIGATION_TITLE`]).
    pub async fn fetch_navigation(&self, title: &str) -> Result<Option<Value>, SanityError> {
        let groq = format!(r#"*[_type == "navigation" && title == "{}"][0]"#, title);
        let result = self.query(&groq).await?;
        Ok(non_null(result))
    }

    /// Fetch all translation records.
    pub async fn fetch_translations(&self) -> Result<Vec<TranslationRecord>, SanityError> {
        let result = self
            .query(r#"*[_type == "translation"] { key, value, category }"#)
            .await?;
        let records: Vec<TranslationRecord> = serde_json::from_value(result)?;
        info!("Fetched {} translation records", records.len());
        Ok(records)
    }
}

fn non_null(value: Value) -> Option<Value> {
    match value {
        Value::Null => None,
        other => Some(other),
    }
}

/// Fold flat translation records into one message tree per locale.
///
/// Each record's key is split on `.`; intermediate mapping nodes are
/// created as needed and the terminal segment receives the per-locale
/// value (empty string when that locale's value is absent). Records
/// that disagree structurally on a shared prefix resolve last-write-
/// wins, in record order.
pub fn build_message_trees(records: &[TranslationRecord]) -> LocaleMessages {
    let mut messages = LocaleMessages::new();
    for record in records {
        messages
            .en
            .insert(&record.key, record.value.en.clone().unwrap_or_default());
        messages
            .ar
            .insert(&record.key, record.value.ar.clone().unwrap_or_default());
    }
    messages
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(key: &str, en: Option<&str>, ar: Option<&str>) -> TranslationRecord {
        TranslationRecord {
            key: key.to_string(),
            value: LocalizedValue {
                en: en.map(String::from),
                ar: ar.map(String::from),
            },
            category: None,
        }
    }

    // ==================== Record Reshaping Tests ====================

    #[test]
    fn test_build_message_trees_nests_by_dot_path() {
        let records = vec![
            record("nav.about", Some("About"), Some("عن")),
            record("nav.home", Some("Home"), Some("الرئيسية")),
        ];
        let messages = build_message_trees(&records);
        assert_eq!(messages.en.text("nav.about"), Some("About"));
        assert_eq!(messages.en.text("nav.home"), Some("Home"));
        assert_eq!(messages.ar.text("nav.about"), Some("عن"));
        assert_eq!(messages.ar.text("nav.home"), Some("الرئيسية"));
    }

    #[test]
    fn test_build_message_trees_missing_locale_defaults_empty() {
        let records = vec![record("cta.label", Some("Start"), None)];
        let messages = build_message_trees(&records);
        assert_eq!(messages.en.text("cta.label"), Some("Start"));
        assert_eq!(messages.ar.text("cta.label"), Some(""));
    }

    #[test]
    fn test_build_message_trees_last_write_wins() {
        let records = vec![
            record("nav", Some("Navigation"), Some("التنقل")),
            record("nav.home", Some("Home"), Some("الرئيسية")),
        ];
        let messages = build_message_trees(&records);
        // The later record turned the "nav" leaf into a subtree.
        assert_eq!(messages.en.text("nav.home"), Some("Home"));
        assert_eq!(messages.en.text("nav"), None);
    }

    #[test]
    fn test_build_message_trees_empty_input() {
        assert!(build_message_trees(&[]).is_empty());
    }

    // ==================== Record Deserialization Tests ====================

    #[test]
    fn test_translation_record_deserialization() {
        let json = r#"{
            "key": "nav.about",
            "value": {"en": "About", "ar": "عن"},
            "category": "nav"
        }"#;
        let record: TranslationRecord = serde_json::from_str(json).expect("deserialize");
        assert_eq!(record.key, "nav.about");
        assert_eq!(record.value.en.as_deref(), Some("About"));
        assert_eq!(record.category.as_deref(), Some("nav"));
    }

    #[test]
    fn test_translation_record_partial_value() {
        let json = r#"{"key": "x", "value": {"en": "only english"}}"#;
        let record: TranslationRecord = serde_json::from_str(json).expect("deserialize");
        assert_eq!(record.value.ar, None);
        assert_eq!(record.category, None);
    }

    // ==================== Client Construction Tests ====================

    #[test]
    fn test_query_url_shape() {
        let client = SanityClient::new("abc123", "production", DEFAULT_API_VERSION);
        assert_eq!(
            client.query_url,
            "https://abc123.apicdn.sanity.io/v2024-01-01/data/query/production"
        );
    }
}
