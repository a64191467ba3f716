//! Wind-Damage Assessor - API Server Binary
//!
//! This binary starts the HTTP API server for claim photo assessments.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin damage-assessor
//!
//! # Run with environment variables
//! ASSESSOR_PORT=9090 ASSESSOR_LABEL_DETECTOR_URL=http://vision:9000/detect-labels cargo run --bin damage-assessor
//! ```
//!
//! # Environment Variables
//!
//! * `ASSESSOR_HOST` - Server host (default: 0.0.0.0)
//! * `ASSESSOR_PORT` - Server port (default: 8080)
//! * `ASSESSOR_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `ASSESSOR_LABEL_DETECTOR_URL` - Label detection endpoint
//! * `ASSESSOR_LABEL_DETECTOR_TIMEOUT_SECS` - Label detection timeout (default: 30)
//! * `ASSESSOR_FETCH_TIMEOUT_SECS` - Per-image download timeout (default: 10)
//! * `ASSESSOR_MAX_WORKERS` - Concurrent image workers per request (default: 10)
//! * `ASSESSOR_MAX_LABELS` - Labels requested per image (default: 20)
//! * `ASSESSOR_MIN_CONFIDENCE` - Label confidence floor (default: 50)

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use domain_assessment::DamageAssessmentService;
use infra_vision::{HttpImageFetcher, HttpLabelDetector, LabelDetectorConfig};
use interface_api::{config::ApiConfig, create_router, AppState};

/// Main entry point for the API server.
///
/// Initializes logging, loads configuration, wires the HTTP adapters into
/// the assessment service, and starts the HTTP server.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration cannot be loaded from environment
/// - An HTTP client cannot be built
/// - Server fails to bind to the configured address
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("Failed to load configuration")?;

    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        label_detector = %config.label_detector_url,
        max_workers = config.max_workers,
        "Starting Wind-Damage Assessor API Server"
    );

    let state = build_state(&config)?;
    let app = create_router(state);

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .context("Invalid server address")?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Builds the adapters and the assessment service.
fn build_state(config: &ApiConfig) -> anyhow::Result<AppState> {
    let fetcher = Arc::new(
        HttpImageFetcher::new(config.fetch_timeout()).context("Failed to create image fetcher")?,
    );
    let detector = Arc::new(
        HttpLabelDetector::new(LabelDetectorConfig {
            endpoint: config.label_detector_url.clone(),
            timeout: config.label_detector_timeout(),
        })
        .context("Failed to create label detector client")?,
    );

    let service = DamageAssessmentService::new(
        fetcher,
        detector.clone(),
        config.assessment_settings(),
    );

    Ok(AppState::new(service, detector))
}

/// Initializes the tracing subscriber for structured logging.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// In-flight assessments finish before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
