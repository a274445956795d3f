//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::AppState;
use super::types::{
    AnalysisResponse, ComplianceRequest, EfficiencyRequest, ErrorResponse, IlluminationRequest,
    ScoreResponse, fixture_from,
};
use crate::analysis::RoomAssessment;
use crate::calc::compliance::{FixtureSpec, calculate_compliance_from_sol};
use crate::calc::consumption::{
    ConsumptionOutcome, ConsumptionRequest, calculate_energy_consumption,
};
use crate::calc::efficiency::calculate_energy_efficiency;
use crate::calc::illumination::IlluminationResult;
use crate::calc::power_load::{PowerLoad, calculate_power_load};
use crate::catalog::{LampType, STANDARD_LAMPS};
use crate::room::{RoomDetail, ValidationError};

type Rejection = (StatusCode, Json<ErrorResponse>);
type ApiResult<T> = Result<Json<T>, Rejection>;

fn bad_request(error: impl Into<String>) -> Rejection {
    let error = error.into();
    tracing::warn!(%error, "rejected request");
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error }))
}

/// Rejects the request when `errors` is non-empty, prefixing each field.
fn check(prefix: &str, errors: Vec<ValidationError>) -> Result<(), Rejection> {
    if errors.is_empty() {
        return Ok(());
    }
    let msg = errors
        .iter()
        .map(|e| format!("invalid {prefix}{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");
    Err(bad_request(msg))
}

fn check_room(room: &RoomDetail) -> Result<(), Rejection> {
    check("", room.validate())
}

fn check_fixture(fixture: &FixtureSpec) -> Result<(), Rejection> {
    check("fixture_", fixture.validate())
}

fn check_hours(hours_per_day: Option<f64>) -> Result<(), Rejection> {
    match hours_per_day {
        Some(h) if !(h > 0.0 && h <= 24.0) => Err(bad_request(format!(
            "`hours_per_day` ({h}) must be in (0, 24]"
        ))),
        _ => Ok(()),
    }
}

fn check_area(area: f64) -> Result<(), Rejection> {
    if area.is_finite() && area > 0.0 {
        Ok(())
    } else {
        Err(bad_request(format!("`area` ({area}) must be a positive number")))
    }
}

fn check_lamp(lamp: &LampType) -> Result<(), Rejection> {
    if lamp.wattage > 0.0 && lamp.lumens > 0.0 {
        Ok(())
    } else {
        Err(bad_request(format!(
            "lamp \"{}\" must have positive wattage and lumens",
            lamp.id
        )))
    }
}

/// Returns the standard catalogue followed by the audit's custom lamps.
///
/// `GET /lamps` → 200 + `Vec<LampType>` JSON
pub async fn get_lamps(State(state): State<Arc<AppState>>) -> Json<Vec<LampType>> {
    Json(
        STANDARD_LAMPS
            .iter()
            .chain(state.config.lamps.iter())
            .cloned()
            .collect(),
    )
}

/// Returns the per-room assessments of the loaded audit.
///
/// `GET /rooms` → 200 + `Vec<RoomAssessment>` JSON
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomAssessment>> {
    Json(state.assessments.clone())
}

/// Returns audit metrics and room type distribution.
///
/// `GET /analysis` → 200 + `AnalysisResponse` JSON
pub async fn get_analysis(State(state): State<Arc<AppState>>) -> Response {
    Json(AnalysisResponse {
        lamp_id: &state.lamp.id,
        metrics: &state.metrics,
        distribution: &state.distribution,
    })
    .into_response()
}

/// Sizes the lighting for one room.
///
/// `POST /illumination` → 200 + `IlluminationResult` JSON, 400 on invalid
/// room or unknown lamp
pub async fn post_illumination(
    State(state): State<Arc<AppState>>,
    Json(req): Json<IlluminationRequest>,
) -> ApiResult<IlluminationResult> {
    check_room(&req.room)?;
    let lamp = match req.lamp_id.as_deref() {
        Some(id) => state
            .config
            .find_lamp(id)
            .map_err(|e| bad_request(e.to_string()))?,
        None => state.lamp.clone(),
    };

    Ok(Json(state.config.calculator().calculate(
        &req.room,
        &lamp,
        req.requirement.as_ref(),
    )))
}

/// Runs either consumption estimate, following the body shape.
///
/// Schedules outside a calendar and negative tariffs are rejected.
///
/// `POST /consumption` with `{area, room_type?, hours_per_day?}` → `{"rate": Wh}`;
/// with `{room, lamp, usage?}` → `{"fixture": ConsumptionResult}`
pub async fn post_consumption(
    Json(req): Json<ConsumptionRequest>,
) -> ApiResult<ConsumptionOutcome> {
    match &req {
        ConsumptionRequest::SimpleRate {
            area,
            hours_per_day,
            ..
        } => {
            check_area(*area)?;
            check_hours(*hours_per_day)?;
        }
        ConsumptionRequest::Fixture { room, lamp, usage } => {
            check_room(room)?;
            check_lamp(lamp)?;
            check("usage.", usage.validate())?;
        }
    }
    Ok(Json(calculate_energy_consumption(&req)))
}

/// Estimates connected load and circuits for a room.
///
/// `POST /power-load` → 200 + `PowerLoad` JSON
pub async fn post_power_load(Json(room): Json<RoomDetail>) -> ApiResult<PowerLoad> {
    check_room(&room)?;
    Ok(Json(calculate_power_load(&room)))
}

/// Quick-check compliance score.
///
/// `POST /compliance` → 200 + `{"score": 0..=120}`
pub async fn post_compliance(Json(req): Json<ComplianceRequest>) -> ApiResult<ScoreResponse> {
    check_area(req.area)?;
    let fixture = fixture_from(req.fixture_type.as_deref(), req.fixture_wattage);
    check_fixture(&fixture)?;
    Ok(Json(ScoreResponse {
        score: calculate_compliance_from_sol(
            &req.room_type,
            req.area,
            req.actual_fixtures,
            &fixture,
        ),
    }))
}

/// Energy efficiency score.
///
/// `POST /efficiency` → 200 + `{"score": n}`
pub async fn post_efficiency(Json(req): Json<EfficiencyRequest>) -> ApiResult<ScoreResponse> {
    check_area(req.area)?;
    let fixture = fixture_from(None, req.fixture_wattage);
    check_fixture(&fixture)?;
    Ok(Json(ScoreResponse {
        score: calculate_energy_efficiency(
            req.area,
            req.actual_fixtures,
            &fixture,
            req.room_type.as_deref(),
        ),
    }))
}
