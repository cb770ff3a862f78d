//! Relay error taxonomy.
//!
//! The variants keep the failure origin (client input, captcha
//! verdict, captcha service, mail provider) inspectable for logging
//! and tests, while the HTTP responses expose only a stable, generic
//! body — provider details never leak to the end user.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Everything that can go wrong while relaying a form submission.
#[derive(Debug, Error)]
pub enum RelayError {
    /// A required field was absent or empty.
    #[error("missing required fields")]
    MissingFields,

    /// The bot-check token was rejected by the verification service.
    #[error("captcha verification rejected")]
    CaptchaRejected,

    /// The verification service could not be reached or answered
    /// malformed.
    #[error("captcha verification request failed: {0}")]
    CaptchaService(#[source] reqwest::Error),

    /// The mail provider could not be reached.
    #[error("mail provider request failed: {0}")]
    ProviderRequest(#[source] reqwest::Error),

    /// The mail provider answered with a non-success status.
    #[error("mail provider error ({status}): {body}")]
    Provider {
        /// Status returned by the provider.
        status: StatusCode,
        /// Provider response body, for logs only.
        body: String,
    },
}

impl RelayError {
    /// HTTP status for this failure.
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MissingFields | RelayError::CaptchaRejected => StatusCode::BAD_REQUEST,
            RelayError::CaptchaService(_)
            | RelayError::ProviderRequest(_)
            | RelayError::Provider { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    /// The message exposed to the client.
    pub fn public_message(&self) -> &'static str {
        match self {
            RelayError::MissingFields => "Missing required fields",
            RelayError::CaptchaRejected => "Invalid captcha verification",
            RelayError::CaptchaService(_)
            | RelayError::ProviderRequest(_)
            | RelayError::Provider { .. } => "Failed to send message. Please try again later.",
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Relay failure: {}", self);
        } else {
            warn!("Rejected submission: {}", self);
        }

        let body = Json(json!({
            "success": false,
            "error": self.public_message(),
        }));
        (status, body).into_response()
    }
}
