//! Per-room assessments and audit-wide rollups.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::calc::compliance::{FixtureSpec, calculate_compliance_from_sol};
use crate::calc::efficiency::calculate_energy_efficiency;
use crate::calc::illumination::{IlluminationCalculator, IlluminationResult};
use crate::calc::power_load::{PowerLoad, power_load_for_area};
use crate::catalog::LampType;
use crate::room::{RoomDefaults, RoomDetail, standard_requirement};

/// Label used for rooms surveyed without a type.
pub const UNSPECIFIED_ROOM_TYPE: &str = "unspecified";

/// Compliance percentage at which a room counts as compliant.
pub const COMPLIANT_THRESHOLD_PCT: f64 = 100.0;

/// Every figure the audit reports for one room.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomAssessment {
    /// Room name, or its type when unnamed.
    pub label: String,
    /// Canonical room type key.
    pub room_type: String,
    /// Floor area used for all figures (m²).
    pub area: f64,
    pub illumination: IlluminationResult,
    pub power_load: PowerLoad,
    /// Quick-check compliance score (0-120).
    pub compliance_pct: f64,
    /// Energy efficiency score (100 = at or under the reference density).
    pub efficiency_score: f64,
}

impl RoomAssessment {
    /// Whether the quick-check compliance score reaches 100%.
    pub fn is_compliant(&self) -> bool {
        self.compliance_pct >= COMPLIANT_THRESHOLD_PCT
    }
}

impl fmt::Display for RoomAssessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let il = &self.illumination;
        write!(
            f,
            "{:<20} {:<16} {:>7.1} m² | fixtures {:>3}/{:<3} | {:>6.1} lx (req {:>4.0}) | \
             {:>7.1} W {:>5.2} W/m² | {:>8.2} kWh/yr {:>10.2}/yr | load {:>7.0} W x{} | \
             compliance {:>3.0}% efficiency {:>3.0}",
            self.label,
            self.room_type,
            self.area,
            il.actual_fixtures,
            il.required_fixtures,
            il.average_illuminance,
            il.required_lux,
            il.total_wattage,
            il.power_density,
            il.annual_consumption,
            il.annual_cost,
            self.power_load.total_load,
            self.power_load.recommended_circuits,
            self.compliance_pct,
            self.efficiency_score,
        )
    }
}

/// Runs every calculation for one room.
///
/// The room type's standard requirement, when listed, supplies the target
/// illuminance for rooms that do not state one. Compliance and efficiency
/// are scored on the installed fixture count, or the required count for
/// rooms surveyed without one.
pub fn assess_room(
    room: &RoomDetail,
    lamp: &LampType,
    fixture: &FixtureSpec,
    calculator: &IlluminationCalculator,
) -> RoomAssessment {
    let room_type = room.room_type_key();
    let requirement = room_type.as_deref().and_then(standard_requirement);
    let illumination = calculator.calculate(room, lamp, requirement.as_ref());
    let area = calculator.defaults.area_of(room);
    let fixtures = illumination.actual_fixtures;

    let compliance_pct = calculate_compliance_from_sol(
        room_type.as_deref().unwrap_or(UNSPECIFIED_ROOM_TYPE),
        area,
        fixtures,
        fixture,
    );
    let efficiency_score =
        calculate_energy_efficiency(area, fixtures, fixture, room_type.as_deref());
    let power_load = power_load_for_area(area, room_type.as_deref());

    tracing::debug!(
        room = room.label(),
        compliance = compliance_pct,
        efficiency = efficiency_score,
        "room assessed"
    );

    RoomAssessment {
        label: room.label().to_string(),
        room_type: room_type.unwrap_or_else(|| UNSPECIFIED_ROOM_TYPE.to_string()),
        area,
        illumination,
        power_load,
        compliance_pct,
        efficiency_score,
    }
}

/// Assesses every room with the same lamp, fixture description and
/// calculator.
pub fn assess_rooms(
    rooms: &[RoomDetail],
    lamp: &LampType,
    fixture: &FixtureSpec,
    calculator: &IlluminationCalculator,
) -> Vec<RoomAssessment> {
    rooms
        .iter()
        .map(|room| assess_room(room, lamp, fixture, calculator))
        .collect()
}

/// Audit-wide totals derived from the per-room assessments.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EnergyAnalysisMetrics {
    pub room_count: usize,
    /// Total floor area (m²).
    pub total_area: f64,
    /// Installed fixtures across all rooms.
    pub total_actual_fixtures: u64,
    /// Fixtures the lumen method calls for across all rooms.
    pub total_required_fixtures: u64,
    /// Connected lighting load (W).
    pub total_wattage: f64,
    pub daily_consumption: f64,
    pub monthly_consumption: f64,
    pub annual_consumption: f64,
    pub annual_cost: f64,
    pub initial_investment: f64,
    /// Building lighting power density, total W over total m².
    pub power_density: f64,
    pub average_compliance_pct: f64,
    pub average_efficiency_score: f64,
    /// Rooms scoring at least 100% compliance.
    pub compliant_rooms: usize,
    /// Connected electrical load of all rooms (W).
    pub total_connected_load: f64,
    pub total_circuits: u64,
}

impl EnergyAnalysisMetrics {
    /// Sums and averages the assessments. Empty input gives all zeros.
    pub fn from_assessments(assessments: &[RoomAssessment]) -> Self {
        if assessments.is_empty() {
            return Self::default();
        }

        let mut m = assessments.iter().fold(Self::default(), |mut m, a| {
            let il = &a.illumination;
            m.room_count += 1;
            m.total_area += a.area;
            m.total_actual_fixtures += u64::from(il.actual_fixtures);
            m.total_required_fixtures += u64::from(il.required_fixtures);
            m.total_wattage += il.total_wattage;
            m.daily_consumption += il.daily_consumption;
            m.monthly_consumption += il.monthly_consumption;
            m.annual_consumption += il.annual_consumption;
            m.annual_cost += il.annual_cost;
            m.initial_investment += il.initial_investment;
            m.average_compliance_pct += a.compliance_pct;
            m.average_efficiency_score += a.efficiency_score;
            if a.is_compliant() {
                m.compliant_rooms += 1;
            }
            m.total_connected_load += a.power_load.total_load;
            m.total_circuits += u64::from(a.power_load.recommended_circuits);
            m
        });

        let n = m.room_count as f64;
        m.average_compliance_pct /= n;
        m.average_efficiency_score /= n;
        m.power_density = if m.total_area > 0.0 {
            m.total_wattage / m.total_area
        } else {
            0.0
        };
        m
    }
}

impl fmt::Display for EnergyAnalysisMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Energy Analysis ---")?;
        writeln!(f, "Rooms:                 {}", self.room_count)?;
        writeln!(f, "Total area:            {:.1} m²", self.total_area)?;
        writeln!(
            f,
            "Fixtures:              {} installed / {} required",
            self.total_actual_fixtures, self.total_required_fixtures
        )?;
        writeln!(
            f,
            "Lighting load:         {:.1} W ({:.2} W/m²)",
            self.total_wattage, self.power_density
        )?;
        writeln!(
            f,
            "Consumption:           {:.2} kWh/day, {:.2} kWh/month, {:.2} kWh/year",
            self.daily_consumption, self.monthly_consumption, self.annual_consumption
        )?;
        writeln!(f, "Annual cost:           {:.2}", self.annual_cost)?;
        writeln!(f, "Initial investment:    {:.2}", self.initial_investment)?;
        writeln!(
            f,
            "Average compliance:    {:.1}% ({} of {} rooms compliant)",
            self.average_compliance_pct, self.compliant_rooms, self.room_count
        )?;
        writeln!(f, "Average efficiency:    {:.1}", self.average_efficiency_score)?;
        write!(
            f,
            "Connected load:        {:.0} W on {} circuits",
            self.total_connected_load, self.total_circuits
        )
    }
}

/// Share of the audited floor area taken by one room type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomTypeShare {
    pub room_type: String,
    pub count: usize,
    /// Floor area of rooms of this type (m²).
    pub total_area: f64,
    /// Percentage of the audited floor area.
    pub area_share_pct: f64,
}

/// Breakdown of an audit by room type, sorted by type key.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RoomTypeDistribution {
    pub shares: Vec<RoomTypeShare>,
}

impl RoomTypeDistribution {
    /// Groups `rooms` by canonical room type. Missing areas fall back to
    /// the default dimensions.
    pub fn from_rooms(rooms: &[RoomDetail], defaults: &RoomDefaults) -> Self {
        let mut groups: BTreeMap<String, (usize, f64)> = BTreeMap::new();
        for room in rooms {
            let key = room
                .room_type_key()
                .unwrap_or_else(|| UNSPECIFIED_ROOM_TYPE.to_string());
            let entry = groups.entry(key).or_default();
            entry.0 += 1;
            entry.1 += defaults.area_of(room);
        }

        let total_area: f64 = groups.values().map(|&(_, area)| area).sum();
        let shares = groups
            .into_iter()
            .map(|(room_type, (count, area))| RoomTypeShare {
                room_type,
                count,
                total_area: area,
                area_share_pct: if total_area > 0.0 {
                    100.0 * area / total_area
                } else {
                    0.0
                },
            })
            .collect();

        Self { shares }
    }

    /// Share for one room type, if present.
    pub fn get(&self, room_type: &str) -> Option<&RoomTypeShare> {
        self.shares.iter().find(|s| s.room_type == room_type)
    }
}

impl fmt::Display for RoomTypeDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "--- Room Types ---")?;
        for s in &self.shares {
            write!(
                f,
                "\n{:<16} {:>3} rooms {:>8.1} m² {:>5.1}%",
                s.room_type, s.count, s.total_area, s.area_share_pct
            )?;
        }
        Ok(())
    }
}
