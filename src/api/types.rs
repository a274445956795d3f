//! API request and response types.

use serde::{Deserialize, Serialize};

use crate::analysis::{EnergyAnalysisMetrics, RoomTypeDistribution};
use crate::calc::compliance::FixtureSpec;
use crate::room::{LightingRequirement, RoomDetail};

/// Body of `POST /illumination`.
#[derive(Debug, Deserialize)]
pub struct IlluminationRequest {
    pub room: RoomDetail,
    /// Catalogue lamp; the audit's lamp when omitted.
    #[serde(default)]
    pub lamp_id: Option<String>,
    /// Fallback target illuminance and power density limit.
    #[serde(default)]
    pub requirement: Option<LightingRequirement>,
}

/// Body of `POST /compliance`.
#[derive(Debug, Deserialize)]
pub struct ComplianceRequest {
    pub room_type: String,
    pub area: f64,
    pub actual_fixtures: u32,
    #[serde(default)]
    pub fixture_type: Option<String>,
    #[serde(default)]
    pub fixture_wattage: Option<f64>,
}

/// Body of `POST /efficiency`.
#[derive(Debug, Deserialize)]
pub struct EfficiencyRequest {
    pub area: f64,
    pub actual_fixtures: u32,
    #[serde(default)]
    pub fixture_wattage: Option<f64>,
    #[serde(default)]
    pub room_type: Option<String>,
}

/// Fixture description from optional request fields, defaulting each
/// missing one independently.
pub fn fixture_from(fixture_type: Option<&str>, fixture_wattage: Option<f64>) -> FixtureSpec {
    let default = FixtureSpec::default();
    FixtureSpec {
        fixture_type: fixture_type.map_or(default.fixture_type, str::to_string),
        wattage: fixture_wattage.unwrap_or(default.wattage),
    }
}

/// A single score.
#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub score: f64,
}

/// Response of `GET /analysis`.
#[derive(Debug, Serialize)]
pub struct AnalysisResponse<'a> {
    pub lamp_id: &'a str,
    pub metrics: &'a EnergyAnalysisMetrics,
    pub distribution: &'a RoomTypeDistribution,
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_fields_default_independently() {
        let f = fixture_from(None, Some(36.0));
        assert_eq!(f.fixture_type, "LED");
        assert_eq!(f.wattage, 36.0);

        let f = fixture_from(Some("compact"), None);
        assert_eq!(f.fixture_type, "compact");
        assert_eq!(f.wattage, 18.0);
    }

    #[test]
    fn illumination_request_accepts_bare_room() {
        let req: IlluminationRequest =
            serde_json::from_str(r#"{"room": {"area": 12.0}}"#).expect("request should parse");
        assert_eq!(req.room.area, Some(12.0));
        assert!(req.lamp_id.is_none());
        assert!(req.requirement.is_none());
    }
}
