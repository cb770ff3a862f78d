//! Cloudflare Turnstile token verification.

use crate::config::Config;
use crate::relay::RelayError;
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Serialize)]
struct VerifyRequest<'a> {
    secret: &'a str,
    response: &'a str,
}

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    success: bool,
    #[serde(default, rename = "error-codes")]
    error_codes: Vec<String>,
}

/// Verify a bot-check token against the configured endpoint.
///
/// A rejected token is a client error ([`RelayError::CaptchaRejected`]);
/// an unreachable or malformed verification service is a server-side
/// failure ([`RelayError::CaptchaService`]). Verification is never
/// retried — the form resubmits with a fresh token instead.
pub async fn verify_token(
    http: &reqwest::Client,
    config: &Config,
    token: &str,
) -> Result<(), RelayError> {
    let request = VerifyRequest {
        secret: &config.turnstile_secret_key,
        response: token,
    };

    let response = http
        .post(&config.turnstile_verify_url)
        .json(&request)
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(RelayError::CaptchaService)?;

    let verdict: VerifyResponse = response.json().await.map_err(RelayError::CaptchaService)?;

    if !verdict.success {
        warn!(
            "Turnstile verification failed: {:?}",
            verdict.error_codes
        );
        return Err(RelayError::CaptchaRejected);
    }

    Ok(())
}
