//! Form relay endpoints.
//!
//! Thin handlers that accept a validated form payload plus a bot-check
//! token, verify the token against Cloudflare Turnstile, compose an
//! email, and forward it to Mailgun. Each request is independent:
//! failures are fatal to that request only and are never retried
//! automatically.

mod contact;
mod error;
mod kyc;
mod mailgun;
mod turnstile;

pub use contact::ContactForm;
pub use error::RelayError;
pub use kyc::KycForm;
pub use mailgun::EmailMessage;

use crate::config::Config;
use anyhow::{Context, Result};
use axum::http::{header::CONTENT_TYPE, HeaderValue, Method};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared state for the relay handlers.
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Shared HTTP client for Turnstile and Mailgun calls.
    pub http: reqwest::Client,
}

impl AppState {
    /// Create state with a fresh HTTP client.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }
}

/// Build the API router: health check plus the two form relays.
pub fn router(state: Arc<AppState>) -> Result<Router> {
    let origin = HeaderValue::from_str(&state.config.frontend_origin)
        .context("FRONTEND_URL is not a valid header value")?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    Ok(Router::new()
        .route("/api/health", get(health))
        .route("/api/contact", post(contact::handle_contact))
        .route("/api/kyc", post(kyc::handle_kyc))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Liveness probe.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
