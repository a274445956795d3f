//! Stateless lighting and energy calculations.

/// Quick-check illuminance compliance score.
pub mod compliance;
/// Fixture-based and simple-rate energy consumption.
pub mod consumption;
/// Installed power density score against the room type's reference.
pub mod efficiency;
/// Lumen-method sizing: cavity ratio, utilization, fixture count and layout.
pub mod illumination;
/// Connected load and branch circuit sizing.
pub mod power_load;

pub use compliance::{FixtureSpec, calculate_compliance_from_sol};
pub use consumption::{
    ConsumptionOutcome, ConsumptionRequest, ConsumptionResult, calculate_energy_consumption,
    calculate_fixture_consumption, estimate_consumption_by_simple_rate,
};
pub use efficiency::calculate_energy_efficiency;
pub use illumination::{
    FixtureLayout, IlluminationCalculator, IlluminationResult, calculate_illumination,
};
pub use power_load::{PowerLoad, calculate_power_load};
