use crate::sanity::DEFAULT_API_VERSION;
use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub port: u16,
    pub frontend_origin: String,

    // Site
    pub base_url: String,

    // Sanity
    pub sanity_project_id: String,
    pub sanity_dataset: String,
    pub sanity_api_version: String,

    // Mailgun
    pub mailgun_api_key: String,
    pub mailgun_domain: String,
    pub mailgun_base_url: String,
    pub mail_from: String,
    pub contact_recipient: String,
    pub kyc_recipient: String,

    // Turnstile
    pub turnstile_secret_key: String,
    pub turnstile_verify_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Server
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3001),
            frontend_origin: std::env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),

            // Site
            base_url: std::env::var("BASE_URL")
                .unwrap_or_else(|_| "https://labas.ly".to_string()),

            // Sanity
            sanity_project_id: std::env::var("SANITY_PROJECT_ID")
                .context("SANITY_PROJECT_ID not set")?,
            sanity_dataset: std::env::var("SANITY_DATASET")
                .unwrap_or_else(|_| "production".to_string()),
            sanity_api_version: std::env::var("SANITY_API_VERSION")
                .unwrap_or_else(|_| DEFAULT_API_VERSION.to_string()),

            // Mailgun
            mailgun_api_key: std::env::var("MAILGUN_API_KEY")
                .context("MAILGUN_API_KEY not set")?,
            mailgun_domain: std::env::var("MAILGUN_DOMAIN")
                .context("MAILGUN_DOMAIN not set")?,
            mailgun_base_url: std::env::var("MAILGUN_BASE_URL")
                .unwrap_or_else(|_| "https://api.mailgun.net".to_string()),
            mail_from: std::env::var("MAIL_FROM")
                .unwrap_or_else(|_| "noreply@labas.ly".to_string()),
            contact_recipient: std::env::var("CONTACT_RECIPIENT")
                .unwrap_or_else(|_| "support@labas.ly".to_string()),
            kyc_recipient: std::env::var("KYC_RECIPIENT")
                .unwrap_or_else(|_| "info@labas.ly".to_string()),

            // Turnstile
            turnstile_secret_key: std::env::var("TURNSTILE_SECRET_KEY")
                .context("TURNSTILE_SECRET_KEY not set")?,
            turnstile_verify_url: std::env::var("TURNSTILE_VERIFY_URL").unwrap_or_else(|_| {
                "https://challenges.cloudflare.com/turnstile/v0/siteverify".to_string()
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for var in [
            "PORT",
            "FRONTEND_URL",
            "BASE_URL",
            "SANITY_PROJECT_ID",
            "SANITY_DATASET",
            "SANITY_API_VERSION",
            "MAILGUN_API_KEY",
            "MAILGUN_DOMAIN",
            "MAILGUN_BASE_URL",
            "MAIL_FROM",
            "CONTACT_RECIPIENT",
            "KYC_RECIPIENT",
            "TURNSTILE_SECRET_KEY",
            "TURNSTILE_VERIFY_URL",
        ] {
            std::env::remove_var(var);
        }
    }

    fn set_required() {
        std::env::set_var("SANITY_PROJECT_ID", "abc123");
        std::env::set_var("MAILGUN_API_KEY", "key-test");
        std::env::set_var("MAILGUN_DOMAIN", "mg.example.com");
        std::env::set_var("TURNSTILE_SECRET_KEY", "secret-test");
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        set_required();

        let config = Config::from_env().expect("config loads");
        assert_eq!(config.port, 3001);
        assert_eq!(config.base_url, "https://labas.ly");
        assert_eq!(config.sanity_dataset, "production");
        assert_eq!(config.mailgun_base_url, "https://api.mailgun.net");
        assert!(config
            .turnstile_verify_url
            .contains("challenges.cloudflare.com"));
    }

    #[test]
    #[serial]
    fn test_from_env_missing_required() {
        clear_env();
        let err = Config::from_env().expect_err("missing vars should fail");
        assert!(err.to_string().contains("not set"));
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        set_required();
        std::env::set_var("PORT", "8080");
        std::env::set_var("BASE_URL", "https://staging.labas.ly");
        std::env::set_var("CONTACT_RECIPIENT", "hello@example.com");

        let config = Config::from_env().expect("config loads");
        assert_eq!(config.port, 8080);
        assert_eq!(config.base_url, "https://staging.labas.ly");
        assert_eq!(config.contact_recipient, "hello@example.com");
        clear_env();
    }
}
