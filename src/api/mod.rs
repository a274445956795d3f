//! REST API over the lighting and energy calculations.
//!
//! Read endpoints expose the loaded audit:
//! - `GET /lamps`: lamp catalogue plus the audit's custom lamps
//! - `GET /rooms`: per-room assessments
//! - `GET /analysis`: audit metrics and room type distribution
//!
//! Calculation endpoints take JSON bodies and return JSON results:
//! `POST /illumination`, `/consumption`, `/power-load`, `/compliance`,
//! `/efficiency`.

mod handlers;
mod types;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

pub use types::{
    AnalysisResponse, ComplianceRequest, EfficiencyRequest, ErrorResponse, IlluminationRequest,
    ScoreResponse,
};

use crate::analysis::{EnergyAnalysisMetrics, RoomAssessment, RoomTypeDistribution};
use crate::catalog::LampType;
use crate::config::AuditConfig;

/// Immutable application state shared across all request handlers.
///
/// Built once from a validated audit and wrapped in `Arc`; no locks are
/// needed since all data is read-only.
pub struct AppState {
    /// Audit the server was started with.
    pub config: AuditConfig,
    /// Lamp used when a request does not name one.
    pub lamp: LampType,
    pub assessments: Vec<RoomAssessment>,
    pub metrics: EnergyAnalysisMetrics,
    pub distribution: RoomTypeDistribution,
}

impl AppState {
    /// Assesses every room of `config` with `lamp`.
    pub fn new(config: AuditConfig, lamp: LampType) -> Self {
        let assessments = crate::analysis::assess_rooms(
            &config.rooms,
            &lamp,
            &config.fixture,
            &config.calculator(),
        );
        let metrics = EnergyAnalysisMetrics::from_assessments(&assessments);
        let distribution = RoomTypeDistribution::from_rooms(&config.rooms, &config.defaults);
        Self {
            config,
            lamp,
            assessments,
            metrics,
            distribution,
        }
    }
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/lamps", get(handlers::get_lamps))
        .route("/rooms", get(handlers::get_rooms))
        .route("/analysis", get(handlers::get_analysis))
        .route("/illumination", post(handlers::post_illumination))
        .route("/consumption", post(handlers::post_consumption))
        .route("/power-load", post(handlers::post_power_load))
        .route("/compliance", post(handlers::post_compliance))
        .route("/efficiency", post(handlers::post_efficiency))
        .with_state(state)
}

/// Binds to the given address and serves the API until the server stops.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("API server listening on http://{addr}");
    axum::serve(listener, app).await
}
