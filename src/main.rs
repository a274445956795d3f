//! Lighting audit entry point: CLI wiring and config-driven room assessment.

use std::env;
use std::path::Path;
use std::process;

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use lumen_audit::analysis::{EnergyAnalysisMetrics, RoomTypeDistribution, assess_rooms};
use lumen_audit::config::AuditConfig;
use lumen_audit::io::export::export_csv;

/// Parsed CLI arguments.
struct CliArgs {
    audit_path: Option<String>,
    preset: Option<String>,
    lamp_override: Option<String>,
    csv_out: Option<String>,
    #[cfg(feature = "api")]
    serve: bool,
    #[cfg(feature = "api")]
    port: u16,
}

fn print_help() {
    eprintln!("lumen-audit — Lighting design and energy audit for building rooms");
    eprintln!();
    eprintln!("Usage: lumen-audit [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --audit <path>           Load rooms and assumptions from a TOML file");
    eprintln!(
        "  --preset <name>          Use a built-in audit ({})",
        AuditConfig::PRESETS.join(", ")
    );
    eprintln!("  --lamp <id>              Size every room with this lamp");
    eprintln!("  --csv-out <path>         Export per-room assessments to CSV");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                  Start REST API server after the audit");
        eprintln!("  --port <u16>             API server port (default: 3000)");
    }
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --audit or --preset is given, the sample_office preset is used.");
    eprintln!("Log verbosity follows RUST_LOG (default: info).");
}

/// Returns the value following flag `args[*i]`, advancing `i`, or exits.
fn flag_value(args: &[String], i: &mut usize, what: &str) -> String {
    *i += 1;
    match args.get(*i) {
        Some(v) => v.clone(),
        None => {
            eprintln!("error: {} requires {what}", args[*i - 1]);
            process::exit(1);
        }
    }
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = env::args().collect();
    let mut cli = CliArgs {
        audit_path: None,
        preset: None,
        lamp_override: None,
        csv_out: None,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: 3000,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--audit" => cli.audit_path = Some(flag_value(&args, &mut i, "a path argument")),
            "--preset" => cli.preset = Some(flag_value(&args, &mut i, "a name argument")),
            "--lamp" => cli.lamp_override = Some(flag_value(&args, &mut i, "a lamp id")),
            "--csv-out" => cli.csv_out = Some(flag_value(&args, &mut i, "a path argument")),
            #[cfg(feature = "api")]
            "--serve" => {
                cli.serve = true;
            }
            #[cfg(feature = "api")]
            "--port" => {
                let value = flag_value(&args, &mut i, "a u16 argument");
                if let Ok(p) = value.parse::<u16>() {
                    cli.port = p;
                } else {
                    eprintln!("error: --port value \"{value}\" is not a valid u16");
                    process::exit(1);
                }
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    if cli.audit_path.is_some() && cli.preset.is_some() {
        eprintln!("error: --audit and --preset are mutually exclusive; choose one source");
        process::exit(1);
    }

    cli
}

fn init_logging() {
    let level = env::var("RUST_LOG")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(Level::INFO);
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = parse_args();
    init_logging();

    // --audit takes priority, then --preset, then the sample office
    let loaded = if let Some(ref path) = cli.audit_path {
        AuditConfig::from_toml_file(Path::new(path))
    } else if let Some(ref name) = cli.preset {
        AuditConfig::from_preset(name)
    } else {
        Ok(AuditConfig::sample_office())
    };
    let mut audit = match loaded {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    if let Some(lamp) = cli.lamp_override {
        audit.lamp = lamp;
    }

    let errors = audit.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let lamp = match audit.lamp_type() {
        Ok(lamp) => lamp,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };
    tracing::info!(lamp = %lamp.id, rooms = audit.rooms.len(), "running audit");

    let assessments = assess_rooms(&audit.rooms, &lamp, &audit.fixture, &audit.calculator());
    let metrics = EnergyAnalysisMetrics::from_assessments(&assessments);
    let distribution = RoomTypeDistribution::from_rooms(&audit.rooms, &audit.defaults);

    for a in &assessments {
        println!("{a}");
    }
    println!("\n{metrics}");
    println!("\n{distribution}");

    if let Some(ref path) = cli.csv_out {
        if let Err(e) = export_csv(&assessments, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        tracing::info!(path = %path, "assessments written");
    }

    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(lumen_audit::api::AppState::new(audit, lamp));
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        if let Err(e) = rt.block_on(lumen_audit::api::serve(state, addr)) {
            eprintln!("error: API server failed: {e}");
            process::exit(1);
        }
    }
}
