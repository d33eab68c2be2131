use altitool::api::{CsvFormatter, JsonFormatter, LogLevel, OutputFormat, TextFormatter, UpdateFormatter};
use altitool::processing::{FixLogReader, TrackingSession};
use altitool::utils::config::ConfigResult;
use altitool::utils::{logging, ConfigurationManager};
use altitool::validation::{FixValidator, ValidationConfig};
use clap::Parser;
use log::{info, warn};
use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "altitool")]
#[command(about = "Replay a recorded fix log on the Swiss grid and report distance, ascent and descent", long_about = None)]
struct Args {
    /// CSV fix log to replay
    #[arg(value_name = "FIX_LOG", required_unless_present = "set_tracking")]
    fix_log: Option<PathBuf>,

    /// Configuration file (defaults are used when it does not exist)
    #[arg(long, default_value = "altitool.json")]
    config: PathBuf,

    /// Output format (text, json, csv)
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Drop fixes with a horizontal accuracy worse than this (meters)
    #[arg(long, value_name = "METERS")]
    max_accuracy: Option<f32>,

    /// Pretty-print JSON output
    #[arg(long, default_value_t = false)]
    pretty: bool,

    /// Print only the final totals
    #[arg(long, default_value_t = false)]
    summary_only: bool,

    /// Log level (none, error, warn, info, debug)
    #[arg(long)]
    log_level: Option<LogLevel>,

    /// Show fix times in UTC instead of local time
    #[arg(long, default_value_t = false)]
    utc: bool,

    /// Persist the tracking flag (on/off) and exit
    #[arg(long, value_name = "on|off", value_parser = parse_switch)]
    set_tracking: Option<bool>,
}

fn parse_switch(value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "1" => Ok(true),
        "off" | "false" | "0" => Ok(false),
        other => Err(format!("expected on or off, got '{}'", other)),
    }
}

/// Load the configuration file and apply the transient command line overrides
fn load_config(args: &Args) -> ConfigResult<ConfigurationManager> {
    let mut manager = ConfigurationManager::from_file_or_default(&args.config)?;
    if let Some(level) = args.log_level {
        manager.set_log_level(level);
    }
    if let Some(limit) = args.max_accuracy {
        manager.set_max_accuracy(Some(limit))?;
    }
    if let Some(format) = args.format {
        manager.set_output_format(format);
    }
    Ok(manager)
}

fn run<W: Write>(args: &Args, manager: &ConfigurationManager, out: &mut W) -> Result<(), Box<dyn Error>> {
    if let Some(enabled) = args.set_tracking {
        // Only the flag is written back; command line overrides stay transient
        let mut stored = ConfigurationManager::from_file_or_default(&args.config)?;
        let was_enabled = stored.set_tracking_enabled(enabled);
        stored.save()?;
        writeln!(
            out,
            "Tracking {} (was {})",
            if enabled { "enabled" } else { "disabled" },
            if was_enabled { "enabled" } else { "disabled" }
        )?;
        return Ok(());
    }

    let config = manager.get_config();
    if !config.tracking_enabled {
        writeln!(
            out,
            "Tracking is disabled; enable it with --set-tracking on (config: {})",
            args.config.display()
        )?;
        return Ok(());
    }

    let fix_log = match &args.fix_log {
        Some(path) => path,
        None => return Err("no fix log given".into()),
    };

    let validator = FixValidator::with_config(ValidationConfig {
        max_accuracy_m: config.max_accuracy_m,
        warn_outside_calibration: config.warn_outside_calibration,
    });
    let formatter = UpdateFormatter::new()
        .with_precision(config.precision)
        .with_local_time(!args.utc);
    let text = TextFormatter::new();
    let json = if args.pretty { JsonFormatter::pretty() } else { JsonFormatter::new() };
    let csv = CsvFormatter::new();

    let mut session = TrackingSession::new();
    session.start();

    if !args.summary_only && config.output_format == OutputFormat::Csv && csv.include_header {
        writeln!(out, "{}", csv.header())?;
    }

    let mut reader = FixLogReader::from_path(fix_log)?;
    let mut skipped = 0u32;
    for record in reader.records() {
        let fix = match record {
            Ok(fix) => fix,
            Err(e) => {
                warn!("{}", e);
                skipped += 1;
                continue;
            }
        };

        match validator.validate(&fix) {
            Ok(outcome) => {
                for warning in &outcome.warnings {
                    warn!("Fix at {} ms: {}", fix.timestamp_ms, warning);
                }
            }
            Err(e) => {
                warn!("Skipping fix at {} ms: {}", fix.timestamp_ms, e);
                skipped += 1;
                continue;
            }
        }

        let update = match session.update(fix) {
            Some(update) => update,
            None => {
                skipped += 1;
                continue;
            }
        };

        if args.summary_only {
            continue;
        }

        let formatted = formatter.format(&update);
        match config.output_format {
            OutputFormat::Text => writeln!(out, "{}", text.format_text(&formatted))?,
            OutputFormat::Json => writeln!(out, "{}", json.format_json(&formatted)?)?,
            OutputFormat::Csv => writeln!(out, "{}", csv.format_csv(&formatted)?)?,
        }
    }

    let totals = session.totals();
    info!("Replayed {} fixes from {}, skipped {}", session.fix_count(), fix_log.display(), skipped);

    match config.output_format {
        OutputFormat::Json => writeln!(out, "{}", json.format_summary(&totals)?)?,
        OutputFormat::Csv if !args.summary_only => {}
        _ => writeln!(out, "{}", text.format_summary(&totals, session.fix_count()))?,
    }

    session.stop();
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let manager = load_config(&args)?;
    logging::init(manager.get_config().log_level)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&args, &manager, &mut out)
}
