//! Energy consumption and running cost of a lighting installation.
//!
//! Two estimates are provided: a quick area-times-density rate for rooms
//! that have not been surveyed fixture by fixture, and an exact figure from
//! the installed fixtures and lamp rating. [`calculate_energy_consumption`]
//! dispatches between them for callers holding either request shape.

use serde::{Deserialize, Serialize};

use crate::catalog::LampType;
use crate::room::RoomDetail;
use crate::tables::CONSUMPTION_WATTS_PER_SQM;
use crate::usage::UsageProfile;

/// Hours per day assumed by the simple-rate estimate.
pub const DEFAULT_HOURS_PER_DAY: f64 = 10.0;

/// Energy use over the standard reporting periods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionResult {
    /// Energy per operating day (kWh).
    pub daily_consumption: f64,
    /// Energy per month (kWh).
    pub monthly_consumption: f64,
    /// Energy per year (kWh).
    pub annual_consumption: f64,
    /// Cost of the annual energy at the profile's rate.
    pub annual_cost: f64,
}

impl ConsumptionResult {
    /// No consumption and no cost.
    pub const ZERO: Self = Self {
        daily_consumption: 0.0,
        monthly_consumption: 0.0,
        annual_consumption: 0.0,
        annual_cost: 0.0,
    };

    /// Chains a connected load (W) through the usage profile:
    /// kW × hours/day → days/month → months/year → rate.
    pub fn from_wattage(total_wattage: f64, usage: &UsageProfile) -> Self {
        let daily_consumption = total_wattage / 1000.0 * usage.hours_per_day;
        let monthly_consumption = daily_consumption * usage.days_per_month;
        let annual_consumption = monthly_consumption * usage.months_per_year;

        Self {
            daily_consumption,
            monthly_consumption,
            annual_consumption,
            annual_cost: annual_consumption * usage.energy_rate,
        }
    }
}

/// Daily lighting energy from floor area and the room type's typical
/// power density: `area × W/m² × hours`.
///
/// Unknown or missing room types use the table default. The result is in
/// watt-hours per day.
pub fn estimate_consumption_by_simple_rate(
    area: f64,
    room_type: Option<&str>,
    hours_per_day: Option<f64>,
) -> f64 {
    let watts_per_sqm = CONSUMPTION_WATTS_PER_SQM.lookup(room_type);
    area * watts_per_sqm * hours_per_day.unwrap_or(DEFAULT_HOURS_PER_DAY)
}

/// Energy used by the fixtures installed in `room`.
///
/// A room with no recorded fixtures, or zero of them, consumes nothing.
pub fn calculate_fixture_consumption(
    room: &RoomDetail,
    lamp: &LampType,
    usage: &UsageProfile,
) -> ConsumptionResult {
    match room.actual_fixtures {
        None | Some(0) => ConsumptionResult::ZERO,
        Some(n) => ConsumptionResult::from_wattage(lamp.wattage * f64::from(n), usage),
    }
}

/// Either shape of consumption request.
///
/// Deserializes untagged: an object with a numeric `area` (and optionally
/// `room_type` / `hours_per_day`) is a simple-rate request, an object with
/// `room` and `lamp` is a fixture request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConsumptionRequest {
    SimpleRate {
        area: f64,
        #[serde(default)]
        room_type: Option<String>,
        #[serde(default)]
        hours_per_day: Option<f64>,
    },
    Fixture {
        room: RoomDetail,
        lamp: LampType,
        #[serde(default)]
        usage: UsageProfile,
    },
}

/// Result of [`calculate_energy_consumption`], matching the request shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsumptionOutcome {
    /// Watt-hours per day from the simple-rate estimate.
    Rate(f64),
    Fixture(ConsumptionResult),
}

/// Runs whichever estimate the request shape selects.
pub fn calculate_energy_consumption(request: &ConsumptionRequest) -> ConsumptionOutcome {
    match request {
        ConsumptionRequest::SimpleRate {
            area,
            room_type,
            hours_per_day,
        } => ConsumptionOutcome::Rate(estimate_consumption_by_simple_rate(
            *area,
            room_type.as_deref(),
            *hours_per_day,
        )),
        ConsumptionRequest::Fixture { room, lamp, usage } => {
            ConsumptionOutcome::Fixture(calculate_fixture_consumption(room, lamp, usage))
        }
    }
}
