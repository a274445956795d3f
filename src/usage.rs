//! Operating schedule and tariff assumptions.

use serde::{Deserialize, Serialize};

use crate::room::ValidationError;

/// How long fixtures run and what energy costs.
///
/// # Examples
///
/// ```
/// use lumen_audit::usage::UsageProfile;
///
/// let usage = UsageProfile::default();
/// assert_eq!(usage.hours_per_day, 10.0);
/// assert_eq!(usage.annual_hours(), 10.0 * 22.0 * 12.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UsageProfile {
    /// Operating hours per day.
    pub hours_per_day: f64,
    /// Operating days per month.
    pub days_per_month: f64,
    /// Operating months per year.
    pub months_per_year: f64,
    /// Energy price per kWh.
    pub energy_rate: f64,
}

impl Default for UsageProfile {
    fn default() -> Self {
        Self {
            hours_per_day: 10.0,
            days_per_month: 22.0,
            months_per_year: 12.0,
            energy_rate: 9.75,
        }
    }
}

impl UsageProfile {
    /// Operating hours per year.
    pub fn annual_hours(&self) -> f64 {
        self.hours_per_day * self.days_per_month * self.months_per_year
    }

    /// Checks the schedule fits a calendar and the rate is not negative.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if !(self.hours_per_day > 0.0 && self.hours_per_day <= 24.0) {
            errors.push(ValidationError::new("hours_per_day", "must be in (0, 24]"));
        }
        if !(self.days_per_month > 0.0 && self.days_per_month <= 31.0) {
            errors.push(ValidationError::new("days_per_month", "must be in (0, 31]"));
        }
        if !(self.months_per_year > 0.0 && self.months_per_year <= 12.0) {
            errors.push(ValidationError::new("months_per_year", "must be in (0, 12]"));
        }
        if !(self.energy_rate >= 0.0) {
            errors.push(ValidationError::new("energy_rate", "must be >= 0"));
        }
        errors
    }
}
