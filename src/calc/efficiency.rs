//! Energy efficiency score of an installed lighting load.

use super::compliance::FixtureSpec;
use crate::tables::EFFICIENCY_REFERENCE_WATTS_PER_SQM;

/// Score awarded at or below the reference power density.
pub const FULL_EFFICIENCY_SCORE: f64 = 100.0;

/// Installed lighting power density (W/m²).
pub fn installed_watts_per_sqm(area: f64, actual_fixtures: u32, fixture: &FixtureSpec) -> f64 {
    f64::from(actual_fixtures) * fixture.wattage / area
}

/// Scores installed lighting power density against the room type's
/// reference.
///
/// At or below the reference the score is 100; above it the score falls
/// in inverse proportion, `100 / (actual / reference)`, rounded to the
/// nearest integer. Densities less than 0.5% over the reference therefore
/// still round to 100. There is no lower bound.
pub fn calculate_energy_efficiency(
    area: f64,
    actual_fixtures: u32,
    fixture: &FixtureSpec,
    room_type: Option<&str>,
) -> f64 {
    let watts_per_sqm = installed_watts_per_sqm(area, actual_fixtures, fixture);
    let reference = EFFICIENCY_REFERENCE_WATTS_PER_SQM.lookup(room_type);

    if watts_per_sqm <= reference {
        FULL_EFFICIENCY_SCORE
    } else {
        (FULL_EFFICIENCY_SCORE / (watts_per_sqm / reference)).round()
    }
}
