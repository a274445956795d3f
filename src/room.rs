//! Room input records and default substitution.

use serde::{Deserialize, Serialize};

use crate::tables::normalize_key;

/// Surface reflectances of a room (fractions, 0.0-1.0).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Reflectance {
    pub ceiling: Option<f64>,
    pub walls: Option<f64>,
    pub floor: Option<f64>,
}

/// A surveyed room as captured by the audit.
///
/// Every measurement is optional. Missing values are substituted from
/// [`RoomDefaults`] at calculation time rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoomDetail {
    /// Free-form label (e.g. `"2F Accounting"`).
    pub name: Option<String>,
    /// Room length (m).
    pub length: Option<f64>,
    /// Room width (m).
    pub width: Option<f64>,
    /// Luminaire mounting height above the work plane (m).
    pub height: Option<f64>,
    /// Floor area (m²). Takes precedence over `length * width`.
    pub area: Option<f64>,
    /// Room type key, e.g. `"office"` or `"kitchen"`.
    pub room_type: Option<String>,
    /// Target maintained illuminance (lux).
    pub required_lux: Option<f64>,
    /// Ceiling, wall and floor reflectances; missing ones use the defaults.
    pub reflectance: Reflectance,
    /// Maintenance factor (0.0-1.0).
    pub maintenance_factor: Option<f64>,
    /// Number of fixtures currently installed.
    pub actual_fixtures: Option<u32>,
    /// Surveyor remarks, carried through unchanged.
    pub notes: Option<String>,
}

impl RoomDetail {
    /// Creates a rectangular room with `area = length * width`.
    pub fn rectangular(room_type: &str, length: f64, width: f64) -> Self {
        Self {
            length: Some(length),
            width: Some(width),
            area: Some(length * width),
            room_type: Some(room_type.to_string()),
            ..Self::default()
        }
    }

    /// Sets the installed fixture count.
    pub fn with_fixtures(mut self, actual_fixtures: u32) -> Self {
        self.actual_fixtures = Some(actual_fixtures);
        self
    }

    /// Sets the target illuminance.
    pub fn with_required_lux(mut self, lux: f64) -> Self {
        self.required_lux = Some(lux);
        self
    }

    /// Display label: the name when set, otherwise the room type.
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .or(self.room_type.as_deref())
            .unwrap_or("room")
    }

    /// Canonical room type key, if one was given.
    pub fn room_type_key(&self) -> Option<String> {
        self.room_type.as_deref().map(normalize_key)
    }

    /// Whether the supplied `area` agrees with `length * width`.
    ///
    /// Returns `None` unless all three values are present.
    pub fn area_matches_dimensions(&self, tolerance: f64) -> Option<bool> {
        match (self.length, self.width, self.area) {
            (Some(l), Some(w), Some(a)) => Some((l * w - a).abs() <= tolerance),
            _ => None,
        }
    }

    /// Checks the supplied measurements and returns every problem found.
    ///
    /// Calculations themselves never reject input; callers at the edges
    /// (CLI, API) use this to refuse degenerate rooms such as zero area.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        for (field, value) in [
            ("length", self.length),
            ("width", self.width),
            ("height", self.height),
            ("area", self.area),
            ("required_lux", self.required_lux),
        ] {
            if let Some(v) = value {
                if !(v.is_finite() && v > 0.0) {
                    errors.push(ValidationError::new(field, "must be a positive number"));
                }
            }
        }

        for (field, value) in [
            ("reflectance.ceiling", self.reflectance.ceiling),
            ("reflectance.walls", self.reflectance.walls),
            ("reflectance.floor", self.reflectance.floor),
        ] {
            if let Some(v) = value {
                if !(0.0..=1.0).contains(&v) {
                    errors.push(ValidationError::new(field, "must be in [0.0, 1.0]"));
                }
            }
        }

        if let Some(mf) = self.maintenance_factor {
            if !(mf > 0.0 && mf <= 1.0) {
                errors.push(ValidationError::new(
                    "maintenance_factor",
                    "must be in (0.0, 1.0]",
                ));
            }
        }

        errors
    }
}

/// A rejected room measurement.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid {field}: {message}")]
pub struct ValidationError {
    /// Field path (e.g. `"reflectance.walls"`).
    pub field: String,
    pub message: String,
}

impl ValidationError {
    /// Error for `field` with a constraint `message`.
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Fallback values substituted for missing room measurements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoomDefaults {
    /// Length (m).
    pub length: f64,
    /// Width (m).
    pub width: f64,
    /// Mounting height (m).
    pub height: f64,
    /// Target illuminance when neither room nor requirement gives one (lux).
    pub required_lux: f64,
    /// Ceiling reflectance (0.0-1.0).
    pub reflectance_ceiling: f64,
    /// Wall reflectance (0.0-1.0).
    pub reflectance_walls: f64,
    /// Floor reflectance (0.0-1.0).
    pub reflectance_floor: f64,
    /// Light loss factor (0.0-1.0).
    pub maintenance_factor: f64,
}

impl Default for RoomDefaults {
    fn default() -> Self {
        Self {
            length: 4.0,
            width: 3.0,
            height: 3.0,
            required_lux: 300.0,
            reflectance_ceiling: 0.7,
            reflectance_walls: 0.5,
            reflectance_floor: 0.2,
            maintenance_factor: 0.8,
        }
    }
}

impl RoomDefaults {
    /// Fills every missing measurement of `room`.
    ///
    /// Target illuminance comes from the room, then `requirement`, then
    /// [`RoomDefaults::required_lux`].
    pub fn resolve(
        &self,
        room: &RoomDetail,
        requirement: Option<&LightingRequirement>,
    ) -> ResolvedRoom {
        let length = room.length.unwrap_or(self.length);
        let width = room.width.unwrap_or(self.width);
        let area = room.area.unwrap_or(length * width);

        if room.length.is_none() || room.width.is_none() || room.height.is_none() {
            tracing::debug!(room = room.label(), "substituting default room dimensions");
        }

        ResolvedRoom {
            length,
            width,
            height: room.height.unwrap_or(self.height),
            area,
            required_lux: room
                .required_lux
                .or(requirement.map(|r| r.required_lux))
                .unwrap_or(self.required_lux),
            reflectance_ceiling: room.reflectance.ceiling.unwrap_or(self.reflectance_ceiling),
            reflectance_walls: room.reflectance.walls.unwrap_or(self.reflectance_walls),
            reflectance_floor: room.reflectance.floor.unwrap_or(self.reflectance_floor),
            maintenance_factor: room.maintenance_factor.unwrap_or(self.maintenance_factor),
            actual_fixtures: room.actual_fixtures,
        }
    }

    /// Floor area of `room`, falling back to default dimensions.
    pub fn area_of(&self, room: &RoomDetail) -> f64 {
        room.area.unwrap_or_else(|| {
            room.length.unwrap_or(self.length) * room.width.unwrap_or(self.width)
        })
    }
}

/// A room with every measurement filled in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedRoom {
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub area: f64,
    pub required_lux: f64,
    pub reflectance_ceiling: f64,
    pub reflectance_walls: f64,
    pub reflectance_floor: f64,
    pub maintenance_factor: f64,
    /// Installed fixtures; stays optional so callers can tell "not surveyed"
    /// from "none installed".
    pub actual_fixtures: Option<u32>,
}

/// Lighting design target for a room type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightingRequirement {
    pub room_type: String,
    /// Maintained illuminance (lux).
    pub required_lux: f64,
    /// Lighting power density limit (W/m²).
    pub max_power_density: f64,
}

/// Design targets per room type: `(key, lux, max W/m²)`.
const LIGHTING_REQUIREMENTS: &[(&str, f64, f64)] = &[
    ("office", 500.0, 10.0),
    ("conference-room", 500.0, 12.0),
    ("classroom", 500.0, 12.0),
    ("corridor", 100.0, 5.0),
    ("lobby", 200.0, 8.0),
    ("restroom", 150.0, 8.0),
    ("kitchen", 500.0, 12.0),
    ("storage", 150.0, 4.0),
    ("warehouse", 200.0, 6.0),
    ("laboratory", 750.0, 15.0),
    ("library", 500.0, 11.0),
    ("retail", 750.0, 14.0),
];

/// Returns the standard lighting requirement for a room type, if listed.
pub fn standard_requirement(room_type: &str) -> Option<LightingRequirement> {
    let key = normalize_key(room_type);
    LIGHTING_REQUIREMENTS
        .iter()
        .find(|(k, _, _)| *k == key)
        .map(|&(k, lux, density)| LightingRequirement {
            room_type: k.to_string(),
            required_lux: lux,
            max_power_density: density,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_room_resolves_to_defaults() {
        let resolved = RoomDefaults::default().resolve(&RoomDetail::default(), None);
        assert_eq!(resolved.length, 4.0);
        assert_eq!(resolved.width, 3.0);
        assert_eq!(resolved.height, 3.0);
        assert_eq!(resolved.area, 12.0);
        assert_eq!(resolved.required_lux, 300.0);
        assert_eq!(resolved.reflectance_ceiling, 0.7);
        assert_eq!(resolved.reflectance_walls, 0.5);
        assert_eq!(resolved.reflectance_floor, 0.2);
        assert_eq!(resolved.maintenance_factor, 0.8);
        assert_eq!(resolved.actual_fixtures, None);
    }

    #[test]
    fn explicit_area_wins_over_dimensions() {
        let room = RoomDetail {
            length: Some(5.0),
            width: Some(4.0),
            area: Some(18.0),
            ..RoomDetail::default()
        };
        let resolved = RoomDefaults::default().resolve(&room, None);
        assert_eq!(resolved.area, 18.0);
        assert_eq!(room.area_matches_dimensions(1e-9), Some(false));
    }

    #[test]
    fn required_lux_precedence() {
        let requirement = standard_requirement("office");
        let defaults = RoomDefaults::default();

        let room = RoomDetail::default();
        assert_eq!(
            defaults.resolve(&room, requirement.as_ref()).required_lux,
            500.0
        );

        let room = RoomDetail::default().with_required_lux(750.0);
        assert_eq!(
            defaults.resolve(&room, requirement.as_ref()).required_lux,
            750.0
        );
    }

    #[test]
    fn rectangular_area_round_trips() {
        let room = RoomDetail::rectangular("office", 10.0, 8.0);
        assert_eq!(room.area, Some(80.0));
        assert_eq!(room.area_matches_dimensions(1e-9), Some(true));
    }

    #[test]
    fn validation_reports_each_bad_field() {
        let room = RoomDetail {
            area: Some(0.0),
            height: Some(-1.0),
            reflectance: Reflectance {
                walls: Some(1.5),
                ..Reflectance::default()
            },
            maintenance_factor: Some(0.0),
            ..RoomDetail::default()
        };
        let errors = room.validate();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["height", "area", "reflectance.walls", "maintenance_factor"]
        );
    }

    #[test]
    fn default_room_is_valid() {
        assert!(RoomDetail::default().validate().is_empty());
        assert!(
            RoomDetail::rectangular("kitchen", 5.0, 4.0)
                .validate()
                .is_empty()
        );
    }

    #[test]
    fn standard_requirement_lookup() {
        let req = standard_requirement("Laboratory");
        assert_eq!(req.as_ref().map(|r| r.required_lux), Some(750.0));
        assert!(standard_requirement("observatory").is_none());
    }
}
