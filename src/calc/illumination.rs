//! Lumen-method lighting design for a single room.

use serde::Serialize;

use super::consumption::ConsumptionResult;
use crate::catalog::LampType;
use crate::room::{LightingRequirement, ResolvedRoom, RoomDefaults, RoomDetail};
use crate::usage::UsageProfile;

/// Lower bound of the adjusted utilization factor.
pub const MIN_UTILIZATION_FACTOR: f64 = 0.3;
/// Upper bound of the adjusted utilization factor.
pub const MAX_UTILIZATION_FACTOR: f64 = 0.9;

/// Fixture grid for an evenly lit rectangular room.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FixtureLayout {
    /// Rows of fixtures along the room length.
    pub along_length: u32,
    /// Fixtures per row along the room width.
    pub along_width: u32,
    /// Centre-to-centre spacing along the length (m).
    pub spacing_length: f64,
    /// Centre-to-centre spacing along the width (m).
    pub spacing_width: f64,
}

/// Everything derived for one room and lamp choice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IlluminationResult {
    /// Room cavity ratio.
    pub room_cavity_ratio: f64,
    /// Utilization factor after reflectance adjustment.
    pub utilization_factor: f64,
    /// Light loss factor (the maintenance factor).
    pub light_loss_factor: f64,
    /// Target illuminance used for sizing (lux).
    pub required_lux: f64,
    /// Luminous flux needed at the lamps (lm).
    pub total_lumens_required: f64,
    /// Fixtures needed to reach `required_lux`.
    pub required_fixtures: u32,
    /// Fixtures installed, or `required_fixtures` when not surveyed.
    pub actual_fixtures: u32,
    pub layout: FixtureLayout,
    /// Connected lighting load (W).
    pub total_wattage: f64,
    pub daily_consumption: f64,
    pub monthly_consumption: f64,
    pub annual_consumption: f64,
    pub annual_cost: f64,
    /// Lamp purchase cost for the installed count.
    pub initial_investment: f64,
    /// Maintained average illuminance with `actual_fixtures` (lux).
    pub average_illuminance: f64,
    /// Lighting power density (W/m²).
    pub power_density: f64,
    /// Whether `average_illuminance` reaches `required_lux`.
    pub meets_requirement: bool,
    /// Whether `power_density` stays under the requirement's limit, when
    /// a requirement was given.
    pub within_power_density_limit: Option<bool>,
}

/// Room cavity ratio, `5 × h × perimeter / area`.
pub fn room_cavity_ratio(length: f64, width: f64, height: f64, area: f64) -> f64 {
    let perimeter = 2.0 * (length + width);
    5.0 * height * perimeter / area
}

/// Utilization factor for a room cavity ratio before reflectance adjustment.
pub fn base_utilization_factor(rcr: f64) -> f64 {
    match rcr {
        r if r < 1.0 => 0.85,
        r if r < 2.0 => 0.75,
        r if r < 3.0 => 0.65,
        r if r < 4.0 => 0.55,
        r if r < 5.0 => 0.50,
        r if r < 6.0 => 0.45,
        r if r < 7.0 => 0.40,
        r if r < 8.0 => 0.35,
        _ => 0.30,
    }
}

/// Utilization factor adjusted for surface reflectances and clamped to
/// [`MIN_UTILIZATION_FACTOR`]..=[`MAX_UTILIZATION_FACTOR`].
///
/// The reference reflectances are 0.7 / 0.5 / 0.2 (ceiling / walls / floor);
/// lighter surfaces raise the factor, darker ones lower it.
pub fn utilization_factor(rcr: f64, ceiling: f64, walls: f64, floor: f64) -> f64 {
    let adjustment = (ceiling - 0.7) * 0.2 + (walls - 0.5) * 0.3 + (floor - 0.2) * 0.1;
    (base_utilization_factor(rcr) + adjustment)
        .clamp(MIN_UTILIZATION_FACTOR, MAX_UTILIZATION_FACTOR)
}

/// Lays `fixtures` out on a grid proportional to the room's aspect ratio.
pub fn fixture_layout(fixtures: u32, length: f64, width: f64) -> FixtureLayout {
    let n = f64::from(fixtures);
    let along_length = ceil_count((n * length / width).sqrt()).max(1);
    let along_width = ceil_count(n / f64::from(along_length)).max(1);

    FixtureLayout {
        along_length,
        along_width,
        spacing_length: length / (f64::from(along_length) + 1.0),
        spacing_width: width / (f64::from(along_width) + 1.0),
    }
}

/// Rounds up to a fixture count. Non-finite and negative values map to 0.
fn ceil_count(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        // saturating float-to-int cast
        value.ceil() as u32
    } else {
        0
    }
}

/// Lumen-method calculator with injectable defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IlluminationCalculator {
    pub defaults: RoomDefaults,
    pub usage: UsageProfile,
}

impl IlluminationCalculator {
    pub fn new(defaults: RoomDefaults, usage: UsageProfile) -> Self {
        Self { defaults, usage }
    }

    /// Sizes the lighting for `room` with `lamp`.
    ///
    /// Missing room measurements are filled from [`Self::defaults`]. The
    /// target illuminance comes from the room, then `requirement`, then the
    /// default. Degenerate geometry (zero area) is not rejected here; the
    /// non-finite values flow through to the result.
    pub fn calculate(
        &self,
        room: &RoomDetail,
        lamp: &LampType,
        requirement: Option<&LightingRequirement>,
    ) -> IlluminationResult {
        let resolved = self.defaults.resolve(room, requirement);
        let result = self.calculate_resolved(&resolved, lamp, requirement);
        tracing::debug!(
            room = room.label(),
            lamp = %lamp.id,
            required = result.required_fixtures,
            actual = result.actual_fixtures,
            lux = result.average_illuminance,
            "illumination calculated"
        );
        result
    }

    /// Same as [`Self::calculate`] for a room whose defaults are already filled.
    pub fn calculate_resolved(
        &self,
        room: &ResolvedRoom,
        lamp: &LampType,
        requirement: Option<&LightingRequirement>,
    ) -> IlluminationResult {
        let rcr = room_cavity_ratio(room.length, room.width, room.height, room.area);
        let uf = utilization_factor(
            rcr,
            room.reflectance_ceiling,
            room.reflectance_walls,
            room.reflectance_floor,
        );
        let llf = room.maintenance_factor;

        let total_lumens_required = room.required_lux * room.area / (uf * llf);
        let required_fixtures = ceil_count(total_lumens_required / lamp.lumens);
        let actual_fixtures = room.actual_fixtures.unwrap_or(required_fixtures);
        let installed = f64::from(actual_fixtures);

        let layout = fixture_layout(required_fixtures, room.length, room.width);

        let total_wattage = lamp.wattage * installed;
        let consumption = if actual_fixtures == 0 {
            ConsumptionResult::ZERO
        } else {
            ConsumptionResult::from_wattage(total_wattage, &self.usage)
        };

        let average_illuminance = installed * lamp.lumens * uf * llf / room.area;
        let power_density = total_wattage / room.area;

        IlluminationResult {
            room_cavity_ratio: rcr,
            utilization_factor: uf,
            light_loss_factor: llf,
            required_lux: room.required_lux,
            total_lumens_required,
            required_fixtures,
            actual_fixtures,
            layout,
            total_wattage,
            daily_consumption: consumption.daily_consumption,
            monthly_consumption: consumption.monthly_consumption,
            annual_consumption: consumption.annual_consumption,
            annual_cost: consumption.annual_cost,
            initial_investment: lamp.cost_per_unit * installed,
            average_illuminance,
            power_density,
            meets_requirement: average_illuminance >= room.required_lux,
            within_power_density_limit: requirement.map(|r| power_density <= r.max_power_density),
        }
    }
}

/// Sizes the lighting for `room` with the standard defaults and usage profile.
pub fn calculate_illumination(
    room: &RoomDetail,
    lamp: &LampType,
    requirement: Option<&LightingRequirement>,
) -> IlluminationResult {
    IlluminationCalculator::default().calculate(room, lamp, requirement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::find_lamp;
    use crate::room::{Reflectance, standard_requirement};

    fn led_18w() -> LampType {
        find_lamp("led-18w").cloned().expect("catalogue lamp")
    }

    fn office_10x8() -> RoomDetail {
        RoomDetail {
            height: Some(3.0),
            ..RoomDetail::rectangular("office", 10.0, 8.0).with_required_lux(500.0)
        }
    }

    #[test]
    fn rcr_for_reference_office() {
        // perimeter 36, 5 * 3 * 36 / 80 = 6.75
        let rcr = room_cavity_ratio(10.0, 8.0, 3.0, 80.0);
        assert!((rcr - 6.75).abs() < 1e-12);
    }

    #[test]
    fn utilization_buckets() {
        let cases = [
            (0.5, 0.85),
            (1.0, 0.75),
            (2.5, 0.65),
            (3.9, 0.55),
            (4.0, 0.50),
            (5.5, 0.45),
            (6.75, 0.40),
            (7.99, 0.35),
            (8.0, 0.30),
            (25.0, 0.30),
        ];
        for (rcr, expected) in cases {
            assert_eq!(base_utilization_factor(rcr), expected, "rcr={rcr}");
        }
    }

    #[test]
    fn utilization_adjusts_for_reflectance_and_clamps() {
        // reference reflectances leave the bucket value unchanged
        assert!((utilization_factor(6.75, 0.7, 0.5, 0.2) - 0.40).abs() < 1e-12);
        // bright surfaces: 0.85 + 0.06 + 0.15 + 0.08 clamps to 0.9
        assert_eq!(utilization_factor(0.5, 1.0, 1.0, 1.0), MAX_UTILIZATION_FACTOR);
        // dark surfaces: 0.30 - 0.14 - 0.15 - 0.02 clamps to 0.3
        assert_eq!(utilization_factor(9.0, 0.0, 0.0, 0.0), MIN_UTILIZATION_FACTOR);
    }

    #[test]
    fn reference_office_requires_seventy_tubes() {
        // lumens = 500 * 80 / (0.40 * 0.8) = 125000 → ceil(125000 / 1800) = 70
        let result = calculate_illumination(&office_10x8(), &led_18w(), None);
        assert!((result.utilization_factor - 0.40).abs() < 1e-12);
        assert_eq!(result.light_loss_factor, 0.8);
        assert!((result.total_lumens_required - 125_000.0).abs() < 1e-6);
        assert_eq!(result.required_fixtures, 70);
        assert_eq!(result.actual_fixtures, 70);
        assert!(result.meets_requirement);
    }

    #[test]
    fn installed_fixtures_drive_output_and_cost() {
        let room = office_10x8().with_fixtures(8);
        let result = calculate_illumination(&room, &led_18w(), None);

        assert_eq!(result.required_fixtures, 70);
        assert_eq!(result.actual_fixtures, 8);
        assert_eq!(result.total_wattage, 144.0);
        assert!((result.annual_consumption - 380.16).abs() < 1e-9);
        assert!((result.annual_cost - 3706.56).abs() < 1e-6);
        assert_eq!(result.initial_investment, 2000.0);
        // 8 * 1800 * 0.40 * 0.8 / 80 = 57.6 lux
        assert!((result.average_illuminance - 57.6).abs() < 1e-9);
        assert!((result.power_density - 1.8).abs() < 1e-12);
        assert!(!result.meets_requirement);
    }

    #[test]
    fn zero_fixtures_short_circuits_consumption() {
        let room = office_10x8().with_fixtures(0);
        let result = calculate_illumination(&room, &led_18w(), None);
        assert_eq!(result.total_wattage, 0.0);
        assert_eq!(result.daily_consumption, 0.0);
        assert_eq!(result.annual_cost, 0.0);
        assert_eq!(result.average_illuminance, 0.0);
    }

    #[test]
    fn layout_follows_aspect_ratio() {
        // sqrt(70 * 10 / 8) = 9.35 → 10 rows, ceil(70 / 10) = 7 per row
        let layout = fixture_layout(70, 10.0, 8.0);
        assert_eq!(layout.along_length, 10);
        assert_eq!(layout.along_width, 7);
        assert!((layout.spacing_length - 10.0 / 11.0).abs() < 1e-12);
        assert!((layout.spacing_width - 1.0).abs() < 1e-12);
    }

    #[test]
    fn layout_never_collapses_below_one() {
        let layout = fixture_layout(0, 4.0, 3.0);
        assert_eq!(layout.along_length, 1);
        assert_eq!(layout.along_width, 1);
        assert_eq!(layout.spacing_length, 2.0);
        assert_eq!(layout.spacing_width, 1.5);
    }

    #[test]
    fn extreme_aspect_ratio_saturates_rows() {
        let layout = fixture_layout(4, 1.0, 1e-20);
        assert_eq!(layout.along_length, u32::MAX);
        assert_eq!(layout.along_width, 1);
        assert!(layout.spacing_length.is_finite() && layout.spacing_length > 0.0);
        assert_eq!(layout.spacing_width, 1e-20 / 2.0);

        // area given separately from a sliver of dimensions still validates
        let room = RoomDetail {
            length: Some(1.0),
            width: Some(1e-20),
            area: Some(10.0),
            height: Some(3.0),
            ..RoomDetail::default()
        };
        assert!(room.validate().is_empty());
        let result = calculate_illumination(&room, &led_18w(), None);
        assert_eq!(result.layout.along_length, u32::MAX);
        assert!(result.layout.spacing_length.is_finite());
    }

    #[test]
    fn requirement_supplies_lux_and_density_limit() {
        let room = RoomDetail::rectangular("office", 10.0, 8.0).with_fixtures(8);
        let requirement = standard_requirement("office");
        let result = calculate_illumination(&room, &led_18w(), requirement.as_ref());
        assert_eq!(result.required_lux, 500.0);
        assert_eq!(result.within_power_density_limit, Some(true));

        let without = calculate_illumination(&room, &led_18w(), None);
        assert_eq!(without.required_lux, 300.0);
        assert_eq!(without.within_power_density_limit, None);
    }

    #[test]
    fn darker_room_needs_more_fixtures() {
        let bright = office_10x8();
        let dark = RoomDetail {
            reflectance: Reflectance {
                ceiling: Some(0.3),
                walls: Some(0.1),
                floor: Some(0.1),
            },
            ..office_10x8()
        };
        let lamp = led_18w();
        let a = calculate_illumination(&bright, &lamp, None);
        let b = calculate_illumination(&dark, &lamp, None);
        assert!(b.required_fixtures > a.required_fixtures);
    }

    #[test]
    fn zero_area_propagates_non_finite_values() {
        let room = RoomDetail {
            area: Some(0.0),
            ..RoomDetail::rectangular("office", 10.0, 8.0)
        };
        let result = calculate_illumination(&room, &led_18w(), None);
        assert!(!result.room_cavity_ratio.is_finite());
        assert!(result.power_density.is_nan());
        assert!(result.average_illuminance.is_nan());
    }
}
