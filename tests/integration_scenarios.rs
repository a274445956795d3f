//! End-to-end calculations for reference rooms.

mod common;

use lumen_audit::analysis::{EnergyAnalysisMetrics, assess_rooms};
use lumen_audit::calc::compliance::calculate_compliance_from_sol;
use lumen_audit::calc::consumption::{
    ConsumptionOutcome, ConsumptionRequest, calculate_energy_consumption,
    calculate_fixture_consumption,
};
use lumen_audit::calc::efficiency::calculate_energy_efficiency;
use lumen_audit::calc::illumination::{IlluminationCalculator, calculate_illumination};
use lumen_audit::calc::power_load::{calculate_power_load, max_load_per_circuit};
use lumen_audit::config::AuditConfig;
use lumen_audit::room::standard_requirement;

use common::assert_close;

#[test]
fn office_consumption_over_a_year() {
    let result = calculate_fixture_consumption(
        &common::office_10x8(),
        &common::led_18w(),
        &common::default_usage(),
    );

    assert_close(result.daily_consumption, 1.44, 1e-9);
    assert_close(result.monthly_consumption, 31.68, 1e-9);
    assert_close(result.annual_consumption, 380.16, 1e-9);
    assert_close(result.annual_cost, 3706.56, 1e-6);
}

#[test]
fn office_efficiency_under_reference() {
    let score = calculate_energy_efficiency(80.0, 8, &common::led_fixture(), Some("office"));
    assert_eq!(score, 100.0);
}

#[test]
fn office_compliance_quick_check() {
    let score = calculate_compliance_from_sol("office", 80.0, 8, &common::led_fixture());
    assert_eq!(score, 13.0);
}

#[test]
fn kitchen_power_load() {
    let load = calculate_power_load(&common::kitchen_20sqm());

    assert_eq!(load.load_per_square_meter, 30.0);
    assert_eq!(load.total_load, 600.0);
    assert_eq!(max_load_per_circuit(), 3520.0);
    assert_eq!(load.recommended_circuits, 1);
    assert_close(load.max_amperage, 600.0 / 220.0, 1e-12);
}

#[test]
fn lumen_method_and_fixture_consumption_agree() {
    let room = common::office_10x8();
    let lamp = common::led_18w();
    let illumination = calculate_illumination(&room, &lamp, None);
    let consumption = calculate_fixture_consumption(&room, &lamp, &common::default_usage());

    assert_eq!(illumination.actual_fixtures, 8);
    assert_close(illumination.annual_consumption, consumption.annual_consumption, 1e-9);
    assert_close(illumination.annual_cost, consumption.annual_cost, 1e-9);
}

#[test]
fn standard_requirement_flags_power_density() {
    let requirement = standard_requirement("office").expect("office is listed");
    let room = common::office_10x8();
    let result =
        IlluminationCalculator::default().calculate(&room, &common::led_18w(), Some(&requirement));

    assert_eq!(result.required_lux, 500.0);
    assert_eq!(result.within_power_density_limit, Some(true));
}

#[test]
fn dispatcher_accepts_both_shapes_from_json_like_toml() {
    let simple: ConsumptionRequest =
        toml::from_str("area = 20.0\nroom_type = \"kitchen\"").expect("simple-rate request");
    assert_eq!(
        calculate_energy_consumption(&simple),
        ConsumptionOutcome::Rate(2400.0)
    );

    let fixture = ConsumptionRequest::Fixture {
        room: common::office_10x8(),
        lamp: common::led_18w(),
        usage: common::default_usage(),
    };
    match calculate_energy_consumption(&fixture) {
        ConsumptionOutcome::Fixture(r) => assert_close(r.annual_consumption, 380.16, 1e-9),
        other => panic!("expected fixture outcome, got {other:?}"),
    }
}

#[test]
fn presets_produce_distinct_audits() {
    let office = AuditConfig::sample_office();
    let school = AuditConfig::school_wing();

    let metrics = |cfg: &AuditConfig| {
        let lamp = cfg.lamp_type().expect("preset lamp");
        let assessments = assess_rooms(&cfg.rooms, &lamp, &cfg.fixture, &cfg.calculator());
        EnergyAnalysisMetrics::from_assessments(&assessments)
    };

    let m_office = metrics(&office);
    let m_school = metrics(&school);

    assert_eq!(m_office.room_count, office.rooms.len());
    assert_eq!(m_school.room_count, school.rooms.len());
    assert!(m_office.total_area > 0.0);
    assert!(m_school.total_area > m_office.total_area);
    assert!(m_school.total_wattage > 0.0);
    assert!(
        (m_office.power_density - m_school.power_density).abs() > 0.1,
        "expected presets to differ: office={:.3}, school={:.3}",
        m_office.power_density,
        m_school.power_density
    );
}
