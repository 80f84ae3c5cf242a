//! Ruster Guard API Server
//!
//! REST API for traffic-light token risk scans
//!
//! Usage:
//!   cargo run --bin ruster_guard_api
//!
//! Environment:
//!   PORT / RUSTER_PORT - Server port (default: 8080)
//!   RUSTER_HOST        - Server host (default: 0.0.0.0)
//!   RUST_LOG           - Log filter (default: info)
//!   plus everything read by `ScanConfig::from_env`

use ruster_guard::api::{create_router, handlers::AppState};
use ruster_guard::utils::constants::{APP_NAME, APP_VERSION};
use ruster_guard::{ScanConfig, TokenScanner};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    print_banner();

    let config = ScanConfig::from_env();
    info!(
        "⚙️ Honeypot API: {} (timeout {}ms), check deadline {}ms",
        config.honeypot_api_url,
        config.honeypot_timeout.as_millis(),
        config.check_deadline.as_millis()
    );

    let scanner = Arc::new(TokenScanner::from_config(config)?);
    let state = Arc::new(AppState::new(scanner));

    // Create router
    let app = create_router(state);

    // Hosting platforms set PORT, fall back to RUSTER_PORT for local dev
    let host = std::env::var("RUSTER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .or_else(|_| std::env::var("RUSTER_PORT"))
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("🚀 {} API starting on http://{}", APP_NAME, addr);
    info!("Endpoints:");
    info!("  POST /v1/scan    - Traffic-light token scan");
    info!("  GET  /v1/health  - Health check");
    info!("Press Ctrl+C for graceful shutdown");

    let listener = TcpListener::bind(addr).await?;

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("⚠️ Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("🛑 {} API shutdown complete", APP_NAME);

    Ok(())
}

fn print_banner() {
    println!(
        r#"
    ==============================================
       R U S T E R   G U A R D   v{}
       Traffic-light token risk scanner
    ==============================================
    "#,
        APP_VERSION
    );
}
