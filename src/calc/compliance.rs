//! Illuminance compliance score against the room type's required level.
//!
//! This is a quick check with fixed utilization (0.5) and maintenance
//! (0.8) factors, independent of the full lumen-method sizing in
//! [`crate::calc::illumination`]. The two can disagree for the same room.

use serde::{Deserialize, Serialize};

use crate::room::ValidationError;
use crate::tables::{FIXTURE_LUMENS, REQUIRED_LUX};

/// Utilization factor assumed by the compliance check.
pub const COMPLIANCE_UTILIZATION: f64 = 0.5;
/// Maintenance factor assumed by the compliance check.
pub const COMPLIANCE_MAINTENANCE: f64 = 0.8;
/// Scores are capped at this percentage.
pub const MAX_COMPLIANCE_PCT: f64 = 120.0;

/// Fixture technology and rating as recorded during a walk-through survey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FixtureSpec {
    /// `"LED"`, `"fluorescent"`, `"compact"`, `"metal-halide"` or
    /// `"incandescent"`.
    pub fixture_type: String,
    /// Input power per fixture (W).
    pub wattage: f64,
}

impl Default for FixtureSpec {
    fn default() -> Self {
        Self {
            fixture_type: "LED".to_string(),
            wattage: 18.0,
        }
    }
}

impl FixtureSpec {
    pub fn new(fixture_type: &str, wattage: f64) -> Self {
        Self {
            fixture_type: fixture_type.to_string(),
            wattage,
        }
    }

    /// Nominal output per fixture for this technology (lm).
    pub fn lumens(&self) -> f64 {
        FIXTURE_LUMENS.lookup(Some(&self.fixture_type))
    }

    /// Rejects a non-positive or non-finite rating.
    pub fn validate(&self) -> Vec<ValidationError> {
        if self.wattage.is_finite() && self.wattage > 0.0 {
            Vec::new()
        } else {
            vec![ValidationError::new("wattage", "must be > 0")]
        }
    }
}

/// Average maintained illuminance under the compliance assumptions (lux).
pub fn estimated_lux(area: f64, actual_fixtures: u32, fixture: &FixtureSpec) -> f64 {
    fixture.lumens() * f64::from(actual_fixtures) * COMPLIANCE_UTILIZATION * COMPLIANCE_MAINTENANCE
        / area
}

/// Percentage of the room type's required illuminance that the installed
/// fixtures deliver, rounded and capped at [`MAX_COMPLIANCE_PCT`].
///
/// A zero area is not guarded; the non-finite ratio passes through.
pub fn calculate_compliance_from_sol(
    room_type: &str,
    area: f64,
    actual_fixtures: u32,
    fixture: &FixtureSpec,
) -> f64 {
    let required_lux = REQUIRED_LUX.lookup(Some(room_type));
    let actual_lux = estimated_lux(area, actual_fixtures, fixture);
    (actual_lux / required_lux * 100.0)
        .min(MAX_COMPLIANCE_PCT)
        .round()
}
