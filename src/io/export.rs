//! CSV export for per-room assessments.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::analysis::RoomAssessment;

/// Column header for the assessment CSV export.
const HEADER: &str = "room,room_type,area_m2,required_lux,average_lux,\
                      required_fixtures,actual_fixtures,total_wattage_w,\
                      annual_kwh,annual_cost,power_density_w_m2,total_load_w,\
                      circuits,compliance_pct,efficiency_score";

/// Exports room assessments to a CSV file at the given path.
///
/// Writes a header row followed by one data row per room. Produces
/// deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(assessments: &[RoomAssessment], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(assessments, buf)
}

/// Writes room assessments as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(assessments: &[RoomAssessment], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for a in assessments {
        let il = &a.illumination;
        wtr.write_record(&[
            a.label.clone(),
            a.room_type.clone(),
            format!("{:.2}", a.area),
            format!("{:.1}", il.required_lux),
            format!("{:.2}", il.average_illuminance),
            il.required_fixtures.to_string(),
            il.actual_fixtures.to_string(),
            format!("{:.1}", il.total_wattage),
            format!("{:.2}", il.annual_consumption),
            format!("{:.2}", il.annual_cost),
            format!("{:.3}", il.power_density),
            format!("{:.1}", a.power_load.total_load),
            a.power_load.recommended_circuits.to_string(),
            format!("{:.0}", a.compliance_pct),
            format!("{:.0}", a.efficiency_score),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
