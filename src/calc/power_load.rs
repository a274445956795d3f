//! Connected electrical load and branch circuit sizing.

use serde::{Deserialize, Serialize};

use crate::room::{RoomDefaults, RoomDetail};
use crate::tables::POWER_LOAD_DENSITY;

/// Branch circuit breaker rating (A).
pub const CIRCUIT_RATING_AMPS: f64 = 20.0;
/// Nominal supply voltage (V).
pub const SUPPLY_VOLTAGE: f64 = 220.0;
/// Fraction of a breaker rating usable for continuous load.
pub const CONTINUOUS_LOAD_FACTOR: f64 = 0.8;

/// Estimated electrical load of a room.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerLoad {
    /// Connected load (W).
    pub total_load: f64,
    /// Design load density for the room type (W/m²).
    pub load_per_square_meter: f64,
    /// Branch circuits needed at 80% of a 20 A, 220 V breaker.
    pub recommended_circuits: u32,
    /// Full-load current (A).
    pub max_amperage: f64,
}

/// Usable continuous load of one branch circuit (W).
pub fn max_load_per_circuit() -> f64 {
    CONTINUOUS_LOAD_FACTOR * CIRCUIT_RATING_AMPS * SUPPLY_VOLTAGE
}

/// Estimates the connected load of `room` from its type's design density.
///
/// Area falls back to the default dimensions when the room has none.
pub fn calculate_power_load(room: &RoomDetail) -> PowerLoad {
    power_load_for_area(
        RoomDefaults::default().area_of(room),
        room.room_type.as_deref(),
    )
}

/// Estimates the connected load of `area` square metres of `room_type`.
pub fn power_load_for_area(area: f64, room_type: Option<&str>) -> PowerLoad {
    let load_per_square_meter = POWER_LOAD_DENSITY.lookup(room_type);
    let total_load = load_per_square_meter * area;
    let circuits = (total_load / max_load_per_circuit()).ceil();

    PowerLoad {
        total_load,
        load_per_square_meter,
        recommended_circuits: if circuits.is_finite() && circuits > 0.0 {
            circuits as u32
        } else {
            0
        },
        max_amperage: total_load / SUPPLY_VOLTAGE,
    }
}
