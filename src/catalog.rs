//! Standard lamp catalogue.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// A lamp product callers choose from when sizing a lighting layout.
///
/// Catalogue entries are immutable reference data; see [`STANDARD_LAMPS`].
/// Custom lamps can be deserialized from audit files and API requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LampType {
    /// Stable identifier (e.g. `"led-18w"`).
    pub id: Cow<'static, str>,
    /// Display name.
    pub name: Cow<'static, str>,
    /// Rated input power (W).
    pub wattage: f64,
    /// Rated luminous flux (lm).
    pub lumens: f64,
    /// Luminous efficacy (lm/W).
    pub efficacy: f64,
    /// Rated service life (hours).
    pub life_hours: u32,
    /// Purchase price per lamp.
    pub cost_per_unit: f64,
}

/// The fixed catalogue of standard lamps.
pub static STANDARD_LAMPS: [LampType; 6] = [
    LampType {
        id: Cow::Borrowed("led-18w"),
        name: Cow::Borrowed("LED Tube 18W"),
        wattage: 18.0,
        lumens: 1800.0,
        efficacy: 100.0,
        life_hours: 25_000,
        cost_per_unit: 250.0,
    },
    LampType {
        id: Cow::Borrowed("led-9w"),
        name: Cow::Borrowed("LED Bulb 9W"),
        wattage: 9.0,
        lumens: 806.0,
        efficacy: 89.6,
        life_hours: 15_000,
        cost_per_unit: 120.0,
    },
    LampType {
        id: Cow::Borrowed("t8-36w"),
        name: Cow::Borrowed("Fluorescent T8 36W"),
        wattage: 36.0,
        lumens: 2850.0,
        efficacy: 79.2,
        life_hours: 15_000,
        cost_per_unit: 180.0,
    },
    LampType {
        id: Cow::Borrowed("cfl-23w"),
        name: Cow::Borrowed("Compact Fluorescent 23W"),
        wattage: 23.0,
        lumens: 1500.0,
        efficacy: 65.2,
        life_hours: 8_000,
        cost_per_unit: 150.0,
    },
    LampType {
        id: Cow::Borrowed("mh-150w"),
        name: Cow::Borrowed("Metal Halide 150W"),
        wattage: 150.0,
        lumens: 12_000.0,
        efficacy: 80.0,
        life_hours: 10_000,
        cost_per_unit: 1500.0,
    },
    LampType {
        id: Cow::Borrowed("inc-60w"),
        name: Cow::Borrowed("Incandescent 60W"),
        wattage: 60.0,
        lumens: 800.0,
        efficacy: 13.3,
        life_hours: 1_000,
        cost_per_unit: 45.0,
    },
];

/// Identifier of the lamp used when an audit does not name one.
pub const DEFAULT_LAMP_ID: &str = "led-18w";

/// Looks up a catalogue lamp by identifier.
pub fn find_lamp(id: &str) -> Option<&'static LampType> {
    STANDARD_LAMPS.iter().find(|lamp| lamp.id == id)
}

/// Comma-separated list of catalogue identifiers, for error messages.
pub fn lamp_ids() -> String {
    STANDARD_LAMPS
        .iter()
        .map(|lamp| lamp.id.as_ref())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_has_six_unique_entries() {
        let mut ids: Vec<&str> = STANDARD_LAMPS.iter().map(|l| l.id.as_ref()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 6);
    }

    #[test]
    fn led_18w_matches_reference_values() {
        let lamp = find_lamp("led-18w").expect("led-18w should exist");
        assert_eq!(lamp.wattage, 18.0);
        assert_eq!(lamp.lumens, 1800.0);
    }

    #[test]
    fn efficacy_is_consistent_with_rating() {
        for lamp in &STANDARD_LAMPS {
            let derived = lamp.lumens / lamp.wattage;
            assert!(
                (derived - lamp.efficacy).abs() < 0.1,
                "{}: {derived} vs {}",
                lamp.id,
                lamp.efficacy
            );
        }
    }

    #[test]
    fn unknown_lamp_is_none() {
        assert!(find_lamp("halogen-42w").is_none());
        assert!(find_lamp(DEFAULT_LAMP_ID).is_some());
    }
}
