//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use lumen_audit::calc::compliance::FixtureSpec;
use lumen_audit::catalog::{LampType, find_lamp};
use lumen_audit::room::RoomDetail;
use lumen_audit::usage::UsageProfile;

/// Catalogue LED tube (18 W, 1800 lm).
pub fn led_18w() -> LampType {
    find_lamp("led-18w").cloned().expect("led-18w is catalogued")
}

/// Reference office: 10 × 8 m, 500 lux, eight installed fixtures.
pub fn office_10x8() -> RoomDetail {
    RoomDetail::rectangular("office", 10.0, 8.0)
        .with_required_lux(500.0)
        .with_fixtures(8)
}

/// Kitchen known only by its area.
pub fn kitchen_20sqm() -> RoomDetail {
    RoomDetail {
        room_type: Some("kitchen".to_string()),
        area: Some(20.0),
        ..RoomDetail::default()
    }
}

/// Default survey fixture (LED, 18 W).
pub fn led_fixture() -> FixtureSpec {
    FixtureSpec::default()
}

/// Default operating profile (10 h/day, 22 days/month, 12 months, 9.75/kWh).
pub fn default_usage() -> UsageProfile {
    UsageProfile::default()
}

/// Asserts `actual` is within `tol` of `expected`.
pub fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {expected} ± {tol}, got {actual}"
    );
}
