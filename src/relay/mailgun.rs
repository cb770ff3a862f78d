//! Mailgun message submission.

use crate::config::Config;
use crate::relay::RelayError;
use tracing::info;

/// A composed email ready for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// Sender, e.g. `Labas Contact Form <noreply@labas.ly>`.
    pub from: String,
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub text: String,
    /// Optional HTML body.
    pub html: Option<String>,
}

/// Submit a message through the Mailgun messages API.
///
/// Authenticates with HTTP basic auth (`api:<key>`) and posts the
/// form-encoded message to `/v3/<domain>/messages`. Any non-success
/// status is a provider failure; the body is kept on the error for
/// logging but never shown to the end user.
pub async fn send_message(
    http: &reqwest::Client,
    config: &Config,
    message: &EmailMessage,
) -> Result<(), RelayError> {
    let url = format!(
        "{}/v3/{}/messages",
        config.mailgun_base_url, config.mailgun_domain
    );

    let mut form: Vec<(&str, &str)> = vec![
        ("from", &message.from),
        ("to", &message.to),
        ("subject", &message.subject),
        ("text", &message.text),
    ];
    if let Some(html) = &message.html {
        form.push(("html", html));
    }

    let response = http
        .post(&url)
        .basic_auth("api", Some(&config.mailgun_api_key))
        .form(&form)
        .send()
        .await
        .map_err(RelayError::ProviderRequest)?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(RelayError::Provider { status, body });
    }

    info!("Email relayed to {}: {}", message.to, message.subject);
    Ok(())
}
