//! Contact form relay.

use crate::relay::mailgun::{self, EmailMessage};
use crate::relay::turnstile;
use crate::relay::{AppState, RelayError};
use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

/// Contact form payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactForm {
    /// Sender name (required).
    #[serde(default)]
    pub name: String,
    /// Sender email (required).
    #[serde(default)]
    pub email: String,
    /// Optional phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Optional inquiry category slug.
    #[serde(default)]
    pub subject: Option<String>,
    /// Message body (required).
    #[serde(default)]
    pub message: String,
    /// Bot-check token (required).
    #[serde(default)]
    pub token: String,
}

impl ContactForm {
    fn validate(&self) -> Result<(), RelayError> {
        let required = [&self.name, &self.email, &self.message, &self.token];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(RelayError::MissingFields);
        }
        Ok(())
    }
}

/// Display label for an inquiry category slug.
fn subject_label(slug: &str) -> &'static str {
    match slug {
        "general" => "General Inquiry",
        "support" => "Technical Support",
        "sales" => "Sales & Business",
        "partnership" => "Partnership",
        "other" => "Other",
        _ => "Contact Form",
    }
}

/// `POST /api/contact`: verify the token, compose the email, relay it.
pub async fn handle_contact(
    State(state): State<Arc<AppState>>,
    Json(form): Json<ContactForm>,
) -> Result<Json<Value>, RelayError> {
    form.validate()?;
    turnstile::verify_token(&state.http, &state.config, &form.token).await?;

    let message = compose_email(&form, &state.config.mail_from, &state.config.contact_recipient);
    mailgun::send_message(&state.http, &state.config, &message).await?;

    info!("Contact form relayed for {}", form.email);
    Ok(Json(json!({
        "success": true,
        "message": "Your message has been sent successfully.",
    })))
}

fn compose_email(form: &ContactForm, mail_from: &str, recipient: &str) -> EmailMessage {
    let category = form
        .subject
        .as_deref()
        .map(subject_label)
        .unwrap_or("Contact Form");
    let subject_display = form
        .subject
        .as_deref()
        .map(|slug| subject_label(slug).to_string())
        .unwrap_or_else(|| "Not provided".to_string());
    let phone = form.phone.as_deref().unwrap_or("Not provided");
    let submitted_at = Utc::now().to_rfc3339();

    let text = format!(
        "New Contact Form Submission\n\
        \n\
        Name: {name}\n\
        Email: {email}\n\
        Phone: {phone}\n\
        Subject: {subject}\n\
        \n\
        Message:\n\
        {message}\n\
        \n\
        ---\n\
        Submitted at: {submitted_at}",
        name = form.name,
        email = form.email,
        phone = phone,
        subject = subject_display,
        message = form.message,
        submitted_at = submitted_at,
    );

    let html = format!(
        "<h2>New Contact Form Submission</h2>\
        <p><strong>Name:</strong> {name}</p>\
        <p><strong>Email:</strong> <a href=\"mailto:{email}\">{email}</a></p>\
        <p><strong>Phone:</strong> {phone}</p>\
        <p><strong>Subject:</strong> {subject}</p>\
        <h3>Message</h3>\
        <p>{message}</p>\
        <hr><p><small>Submitted at: {submitted_at}</small></p>",
        name = form.name,
        email = form.email,
        phone = phone,
        subject = subject_display,
        message = form.message,
        submitted_at = submitted_at,
    );

    EmailMessage {
        from: format!("Labas Contact Form <{}>", mail_from),
        to: recipient.to_string(),
        subject: format!("[{}] New message from {}", category, form.name),
        text,
        html: Some(html),
    }
}
