use anyhow::Result;
use labas_site::config::Config;
use labas_site::relay::{self, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("labas_site=info".parse()?),
        )
        .init();

    info!("Starting Labas site server");

    // Load configuration from environment
    let config = Config::from_env()?;
    let port = config.port;

    let state = Arc::new(AppState::new(config));
    let app = relay::router(state)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Listening on {}", addr);
    info!("Contact form endpoint: http://localhost:{}/api/contact", port);
    info!("KYC form endpoint: http://localhost:{}/api/kyc", port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
