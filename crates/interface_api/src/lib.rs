//! HTTP API Layer
//!
//! This crate exposes the wind-damage assessment pipeline over HTTP using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Assessment and health endpoints
//! - **Middleware**: Request logging, tracing, panic capture
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses with correlation ids
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let app = create_router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
    middleware as axum_middleware,
};
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use core_kernel::HealthCheckable;
use domain_assessment::DamageAssessmentService;
use crate::middleware::{panic_response, request_log_middleware};
use crate::handlers::{assessment, health};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: DamageAssessmentService,
    pub label_detector_health: Arc<dyn HealthCheckable>,
}

impl AppState {
    pub fn new(
        service: DamageAssessmentService,
        label_detector_health: Arc<dyn HealthCheckable>,
    ) -> Self {
        Self {
            service,
            label_detector_health,
        }
    }
}

/// Creates the main API router
///
/// # Arguments
///
/// * `state` - Assessment service and adapter health probes
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // Public routes
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Assessment routes
    let assessment_routes = Router::new()
        .route("/", post(assessment::assess_claim));

    let api_routes = Router::new()
        .nest("/assessments", assessment_routes)
        .layer(axum_middleware::from_fn(request_log_middleware));

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                )
                .layer(CatchPanicLayer::custom(panic_response)),
        )
        .with_state(state)
}
