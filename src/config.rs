//! TOML-based audit configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::calc::compliance::FixtureSpec;
use crate::calc::illumination::IlluminationCalculator;
use crate::catalog::{DEFAULT_LAMP_ID, LampType, find_lamp, lamp_ids};
use crate::error::Error;
use crate::room::{Reflectance, RoomDefaults, RoomDetail};
use crate::usage::UsageProfile;

/// A building audit: the rooms surveyed and the assumptions used to
/// evaluate them.
///
/// All sections are optional and fall back to the standard assumptions.
/// Load from TOML with [`AuditConfig::from_toml_file`] or pick a built-in
/// audit with [`AuditConfig::from_preset`].
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// Lamp identifier used to size every room.
    #[serde(default = "default_lamp_id")]
    pub lamp: String,
    /// Additional lamps beyond the standard catalogue.
    #[serde(default)]
    pub lamps: Vec<LampType>,
    /// Operating schedule and tariff.
    #[serde(default)]
    pub usage: UsageProfile,
    /// Fallbacks for missing room measurements.
    #[serde(default)]
    pub defaults: RoomDefaults,
    /// Surveyed fixture technology for compliance and efficiency scoring.
    #[serde(default)]
    pub fixture: FixtureSpec,
    /// Surveyed rooms.
    #[serde(default)]
    pub rooms: Vec<RoomDetail>,
}

fn default_lamp_id() -> String {
    DEFAULT_LAMP_ID.to_string()
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            lamp: default_lamp_id(),
            lamps: Vec::new(),
            usage: UsageProfile::default(),
            defaults: RoomDefaults::default(),
            fixture: FixtureSpec::default(),
            rooms: Vec::new(),
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"usage.hours_per_day"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl AuditConfig {
    /// A small office floor surveyed with LED tubes.
    pub fn sample_office() -> Self {
        let room = |name: &str, room_type: &str, length: f64, width: f64, fixtures: u32| {
            RoomDetail {
                name: Some(name.to_string()),
                height: Some(2.7),
                actual_fixtures: Some(fixtures),
                ..RoomDetail::rectangular(room_type, length, width)
            }
        };

        Self {
            rooms: vec![
                room("Open Office", "office", 12.0, 9.0, 24),
                room("Manager Office", "office", 5.0, 4.0, 6),
                room("Conference", "conference-room", 8.0, 6.0, 10),
                room("Pantry", "kitchen", 5.0, 4.0, 4),
                room("Hallway", "corridor", 20.0, 2.0, 6),
                room("Restroom", "restroom", 4.0, 3.0, 2),
                room("Storage", "storage", 4.0, 3.0, 1),
            ],
            ..Self::default()
        }
    }

    /// A school wing lit with fluorescent T8 tubes and longer operating days.
    pub fn school_wing() -> Self {
        let classroom = |name: &str, fixtures: u32| RoomDetail {
            name: Some(name.to_string()),
            height: Some(3.0),
            reflectance: Reflectance {
                ceiling: Some(0.8),
                walls: Some(0.5),
                floor: Some(0.2),
            },
            actual_fixtures: Some(fixtures),
            ..RoomDetail::rectangular("classroom", 9.0, 7.0)
        };

        Self {
            lamp: "t8-36w".to_string(),
            usage: UsageProfile {
                hours_per_day: 12.0,
                days_per_month: 20.0,
                months_per_year: 10.0,
                ..UsageProfile::default()
            },
            fixture: FixtureSpec::new("fluorescent", 36.0),
            rooms: vec![
                classroom("Room 101", 12),
                classroom("Room 102", 12),
                classroom("Room 103", 8),
                RoomDetail {
                    name: Some("Library".to_string()),
                    height: Some(3.5),
                    actual_fixtures: Some(20),
                    ..RoomDetail::rectangular("library", 15.0, 10.0)
                },
                RoomDetail {
                    name: Some("Science Lab".to_string()),
                    maintenance_factor: Some(0.7),
                    actual_fixtures: Some(14),
                    ..RoomDetail::rectangular("laboratory", 10.0, 8.0)
                },
                RoomDetail {
                    name: Some("Corridor".to_string()),
                    actual_fixtures: Some(8),
                    ..RoomDetail::rectangular("corridor", 30.0, 3.0)
                },
            ],
            ..Self::default()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["sample_office", "school_wing"];

    /// Loads an audit from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "sample_office" => Ok(Self::sample_office()),
            "school_wing" => Ok(Self::school_wing()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses an audit from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("audit", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses an audit from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Resolves [`AuditConfig::lamp`] against the custom lamps, then the
    /// standard catalogue.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownLamp`] when no lamp has that identifier.
    pub fn lamp_type(&self) -> Result<LampType, Error> {
        self.find_lamp(&self.lamp)
    }

    /// Looks `id` up among the custom lamps, then the standard catalogue.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownLamp`] when no lamp has that identifier.
    pub fn find_lamp(&self, id: &str) -> Result<LampType, Error> {
        self.lamps
            .iter()
            .find(|l| l.id == id)
            .or_else(|| find_lamp(id))
            .cloned()
            .ok_or_else(|| Error::UnknownLamp {
                id: id.to_string(),
                available: self.available_lamp_ids(),
            })
    }

    fn available_lamp_ids(&self) -> String {
        let mut ids = lamp_ids();
        for lamp in &self.lamps {
            ids.push_str(", ");
            ids.push_str(&lamp.id);
        }
        ids
    }

    /// Calculator carrying this audit's defaults and usage profile.
    pub fn calculator(&self) -> IlluminationCalculator {
        IlluminationCalculator::new(self.defaults, self.usage)
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Err(e) = self.lamp_type() {
            errors.push(ConfigError::new("lamp", e.to_string()));
        }
        for (i, lamp) in self.lamps.iter().enumerate() {
            if !(lamp.wattage > 0.0) {
                errors.push(ConfigError::new(format!("lamps[{i}].wattage"), "must be > 0"));
            }
            if !(lamp.lumens > 0.0) {
                errors.push(ConfigError::new(format!("lamps[{i}].lumens"), "must be > 0"));
            }
        }

        errors.extend(
            self.usage
                .validate()
                .into_iter()
                .map(|e| ConfigError::new(format!("usage.{}", e.field), e.message)),
        );

        let d = &self.defaults;
        for (field, value) in [
            ("defaults.length", d.length),
            ("defaults.width", d.width),
            ("defaults.height", d.height),
            ("defaults.required_lux", d.required_lux),
        ] {
            if !(value > 0.0) {
                errors.push(ConfigError::new(field, "must be > 0"));
            }
        }
        for (field, value) in [
            ("defaults.reflectance_ceiling", d.reflectance_ceiling),
            ("defaults.reflectance_walls", d.reflectance_walls),
            ("defaults.reflectance_floor", d.reflectance_floor),
        ] {
            if !(0.0..=1.0).contains(&value) {
                errors.push(ConfigError::new(field, "must be in [0.0, 1.0]"));
            }
        }
        if !(d.maintenance_factor > 0.0 && d.maintenance_factor <= 1.0) {
            errors.push(ConfigError::new(
                "defaults.maintenance_factor",
                "must be in (0.0, 1.0]",
            ));
        }

        errors.extend(
            self.fixture
                .validate()
                .into_iter()
                .map(|e| ConfigError::new(format!("fixture.{}", e.field), e.message)),
        );

        for (i, room) in self.rooms.iter().enumerate() {
            errors.extend(
                room.validate()
                    .into_iter()
                    .map(|e| ConfigError::new(format!("rooms[{i}].{}", e.field), e.message)),
            );
        }

        errors
    }

    /// Validates and converts the error list into a single [`Error`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] listing every failed field.
    pub fn ensure_valid(&self) -> Result<(), Error> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::Invalid(errors))
        }
    }
}
