//! KYC organization registration relay.

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

/// KYC registration payload.
///
/// Only the organization-information section is required; the
/// authorized-person and banking sections are optional and included in
/// the composed email with "Not provided" markers when absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KycForm {
    /// Organization name in Arabic script (required).
    #[serde(default)]
    pub organization_name_arabic: String,
    /// Organization name in Latin script (required).
    #[serde(default)]
    pub organization_name_english: String,
    /// Organization type slug (required).
    #[serde(default)]
    pub organization_type: String,
    /// Free-text type when `organization_type` is `other`.
    #[serde(default)]
    pub organization_type_other: Option<String>,
    /// Commercial registration number (required).
    #[serde(default)]
    pub commercial_registration_number: String,
    /// Tax identifier.
    #[serde(default)]
    pub tax_id: Option<String>,
    /// Registered address (required).
    #[serde(default)]
    pub address: String,
    /// Official contact email (required).
    #[serde(default)]
    pub official_email: String,
    /// Official contact phone (required).
    #[serde(default)]
    pub official_phone: String,
    /// Organization website.
    #[serde(default)]
    pub website: Option<String>,
    /// Authorized person full name.
    #[serde(default)]
    pub authorized_person_name: Option<String>,
    /// Authorized person position.
    #[serde(default)]
    pub authorized_person_position: Option<String>,
    /// Authorized person national ID or passport number.
    #[serde(default)]
    pub authorized_person_national_id: Option<String>,
    /// Authorized person phone.
    #[serde(default)]
    pub authorized_person_phone: Option<String>,
    /// Authorized person email.
    #[serde(default)]
    pub authorized_person_email: Option<String>,
    /// Bank name.
    #[serde(default)]
    pub bank_name: Option<String>,
    /// Account holder name.
    #[serde(default)]
    pub account_holder_name: Option<String>,
    /// IBAN.
    #[serde(default)]
    pub iban: Option<String>,
    /// Terms-and-conditions acceptance flag (must be true).
    #[serde(default)]
    pub terms_accepted: bool,
    /// Bot-check token (required).
    #[serde(default)]
    pub token: String,
}

impl KycForm {
    fn validate(&self) -> Result<(), RelayError> {
        let required = [
            &self.organization_name_arabic,
            &self.organization_name_english,
            &self.organization_type,
            &self.commercial_registration_number,
            &self.address,
            &self.official_email,
            &self.official_phone,
            &self.token,
        ];
        if required.iter().any(|field| field.trim().is_empty()) || !self.terms_accepted {
            return Err(RelayError::MissingFields);
        }
        Ok(())
    }

    /// Human-readable organization type: the free-text value for
    /// `other`, else the slug with its first letter upper-cased.
    fn organization_type_display(&self) -> String {
        if self.organization_type == "other" {
            return self
                .organization_type_other
                .clone()
                .unwrap_or_else(|| "Other".to_string());
        }
        let mut chars = self.organization_type.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    }
}

/// `POST /api/kyc`: verify the token, compose the registration email,
/// relay it.
pub async fn handle_kyc(
    State(state): State<Arc<AppState>>,
    Json(form): Json<KycForm>,
) -> Result<Json<Value>, RelayError> {
    form.validate()?;
    turnstile::verify_token(&state.http, &state.config, &form.token).await?;

    let message = compose_email(&form, &state.config.mail_from, &state.config.kyc_recipient);
    mailgun::send_message(&state.http, &state.config, &message).await?;

    info!(
        "KYC registration relayed for {}",
        form.organization_name_english
    );
    Ok(Json(json!({
        "success": true,
        "message": "Your registration has been submitted successfully.",
    })))
}

fn optional(value: &Option<String>) -> &str {
    match value.as_deref() {
        Some(value) if !value.trim().is_empty() => value,
        _ => "Not provided",
    }
}

fn compose_email(form: &KycForm, mail_from: &str, recipient: &str) -> EmailMessage {
    let type_display = form.organization_type_display();
    let submitted_at = Utc::now().to_rfc3339();

    let text = format!(
        "New KYC Registration Submission\n\
        \n\
        ORGANIZATION INFORMATION\n\
        ========================\n\
        Organization Name (Arabic): {name_ar}\n\
        Organization Name (English): {name_en}\n\
        Type: {org_type}\n\
        Commercial Registration Number: {registration}\n\
        Tax ID: {tax_id}\n\
        Address: {address}\n\
        Official Email: {email}\n\
        Official Phone: {phone}\n\
        Website: {website}\n\
        \n\
        AUTHORIZED PERSON DETAILS\n\
        =========================\n\
        Full Name: {person_name}\n\
        Position: {person_position}\n\
        National ID/Passport: {person_id}\n\
        Phone: {person_phone}\n\
        Email: {person_email}\n\
        \n\
        BANKING INFORMATION\n\
        ===================\n\
        Bank Name: {bank}\n\
        Account Holder: {holder}\n\
        IBAN: {iban}\n\
        \n\
        Terms Accepted: {terms}\n\
        \n\
        ---\n\
        Submitted at: {submitted_at}",
        name_ar = form.organization_name_arabic,
        name_en = form.organization_name_english,
        org_type = type_display,
        registration = form.commercial_registration_number,
        tax_id = optional(&form.tax_id),
        address = form.address,
        email = form.official_email,
        phone = form.official_phone,
        website = optional(&form.website),
        person_name = optional(&form.authorized_person_name),
        person_position = optional(&form.authorized_person_position),
        person_id = optional(&form.authorized_person_national_id),
        person_phone = optional(&form.authorized_person_phone),
        person_email = optional(&form.authorized_person_email),
        bank = optional(&form.bank_name),
        holder = optional(&form.account_holder_name),
        iban = optional(&form.iban),
        terms = if form.terms_accepted { "Yes" } else { "No" },
        submitted_at = submitted_at,
    );

    let html = format!(
        "<h2>New KYC Registration Submission</h2>\
        <h3>Organization Information</h3>\
        <p><strong>Name (Arabic):</strong> {name_ar}</p>\
        <p><strong>Name (English):</strong> {name_en}</p>\
        <p><strong>Type:</strong> {org_type}</p>\
        <p><strong>Commercial Registration Number:</strong> {registration}</p>\
        <p><strong>Tax ID:</strong> {tax_id}</p>\
        <p><strong>Address:</strong> {address}</p>\
        <p><strong>Official Email:</strong> <a href=\"mailto:{email}\">{email}</a></p>\
        <p><strong>Official Phone:</strong> {phone}</p>\
        <p><strong>Website:</strong> {website}</p>\
        <h3>Authorized Person</h3>\
        <p><strong>Full Name:</strong> {person_name}</p>\
        <p><strong>Position:</strong> {person_position}</p>\
        <h3>Banking</h3>\
        <p><strong>Bank Name:</strong> {bank}</p>\
        <p><strong>IBAN:</strong> {iban}</p>\
        <p><strong>Terms Accepted:</strong> {terms}</p>\
        <hr><p><small>Submitted at: {submitted_at}</small></p>",
        name_ar = form.organization_name_arabic,
        name_en = form.organization_name_english,
        org_type = type_display,
        registration = form.commercial_registration_number,
        tax_id = optional(&form.tax_id),
        address = form.address,
        email = form.official_email,
        phone = form.official_phone,
        website = optional(&form.website),
        person_name = optional(&form.authorized_person_name),
        person_position = optional(&form.authorized_person_position),
        bank = optional(&form.bank_name),
        iban = optional(&form.iban),
        terms = if form.terms_accepted { "Yes" } else { "No" },
        submitted_at = submitted_at,
    );

    EmailMessage {
        from: format!("Labas KYC Form <{}>", mail_from),
        to: recipient.to_string(),
        subject: format!(
            "[KYC Registration] New organization registration: {}",
            form.organization_name_english
        ),
        text,
        html: Some(html),
    }
}
