//! Session command - interactive journey log
//!
//! Reads one command per line from stdin. The journey log lives as long as
//! the process; nothing is persisted.

use super::lookup_message;
use crate::OutputFormat;
use anyhow::{Context, Result};
use footprint_cli::output::{format_count, format_kg, render_table, Status};
use footprint_cli::progress::{self, colored_gauge, GAUGE_WIDTH};
use footprint_core::config::ConfigSchema;
use footprint_emissions::{Dashboard, EmissionEstimator, EstimateError, JourneyLog, VehicleType};
use owo_colors::OwoColorize;
use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;

const HELP: &str = "\
Commands:
  add <origin> ; <destination> [; <mode>]   Add a journey (mode defaults to car)
  list                                      Show all journeys
  summary                                   Show the total and progress
  map [PATH]                                Export markers as GeoJSON
  clear                                     Clear all data
  help                                      Show this help
  quit                                      Leave the session";

/// One line of session input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Submit a journey
    Add {
        origin: String,
        destination: String,
        mode: String,
    },
    /// Print the journey table
    List,
    /// Print the metric and progress
    Summary,
    /// Print or write the GeoJSON markers
    Map(Option<PathBuf>),
    /// Reset the log
    Clear,
    /// Print the command list
    Help,
    /// End the session
    Quit,
    /// Blank line or comment
    Nothing,
}

/// Parse one line of input
pub fn parse_command(line: &str) -> Result<SessionCommand, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(SessionCommand::Nothing);
    }

    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    match word.to_lowercase().as_str() {
        "add" => {
            let parts: Vec<&str> = rest.split(';').map(str::trim).collect();
            match parts.as_slice() {
                [origin, destination] => Ok(SessionCommand::Add {
                    origin: (*origin).to_string(),
                    destination: (*destination).to_string(),
                    mode: "car".to_string(),
                }),
                [origin, destination, mode] => Ok(SessionCommand::Add {
                    origin: (*origin).to_string(),
                    destination: (*destination).to_string(),
                    mode: (*mode).to_string(),
                }),
                _ => Err("usage: add <origin> ; <destination> [; <mode>]".to_string()),
            }
        }
        "list" | "ls" => Ok(SessionCommand::List),
        "summary" | "total" => Ok(SessionCommand::Summary),
        "map" => Ok(SessionCommand::Map((!rest.is_empty()).then(|| PathBuf::from(rest)))),
        "clear" => Ok(SessionCommand::Clear),
        "help" | "?" => Ok(SessionCommand::Help),
        "quit" | "exit" | "q" => Ok(SessionCommand::Quit),
        other => Err(format!("Unknown command '{other}'. Type 'help' for a list.")),
    }
}

/// Run the interactive session on stdin
pub async fn run(schema: &ConfigSchema, format: OutputFormat) -> Result<()> {
    let estimator = EmissionEstimator::from_config(schema)?;
    let dashboard = Dashboard::from_config(&schema.dashboard);
    let mut log = JourneyLog::new();

    let stdin = std::io::stdin();
    let interactive = stdin.is_terminal();
    if interactive {
        Status::header("Rojo Footprint");
        println!("Distance policy: {}. Type 'help' for commands.", estimator.policy().name());
        tracing::info!(session_id = footprint_telemetry::session_id(), "Session started");
    }

    let mut lines = stdin.lock().lines();
    loop {
        if interactive {
            print!("{} ", ">".cyan());
            std::io::stdout().flush()?;
        }
        let Some(line) = lines.next() else { break };
        let line = line.context("Failed to read from stdin")?;

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                Status::warning(&message);
                continue;
            }
        };

        match command {
            SessionCommand::Add { origin, destination, mode } => {
                add(&estimator, &dashboard, &mut log, &origin, &destination, &mode, format).await;
            }
            SessionCommand::List => list(&dashboard, &log, format)?,
            SessionCommand::Summary => summary(&dashboard, &log, format)?,
            SessionCommand::Map(path) => map(&dashboard, &log, path)?,
            SessionCommand::Clear => {
                log.clear();
                Status::success("Cleared all data");
            }
            SessionCommand::Help => println!("{HELP}"),
            SessionCommand::Quit => break,
            SessionCommand::Nothing => {}
        }
    }

    Ok(())
}

async fn add(
    estimator: &EmissionEstimator,
    dashboard: &Dashboard,
    log: &mut JourneyLog,
    origin: &str,
    destination: &str,
    mode: &str,
    format: OutputFormat,
) {
    let vehicle = match mode.parse::<VehicleType>() {
        Ok(vehicle) => vehicle,
        Err(e) => {
            Status::warning(&e.to_string());
            return;
        }
    };

    let spinner = lookup_message(estimator, origin, destination)
        .filter(|_| !format.is_json())
        .map(|msg| progress::spinner(&msg));
    let result = log.submit(estimator, origin, destination, vehicle).await;
    if let Some(pb) = &spinner {
        pb.finish_and_clear();
    }

    match result {
        Ok(entry) => {
            let message = format!(
                "Added journey from {} to {} ({} km, {})",
                entry.origin(),
                entry.destination(),
                entry.distance_km(),
                format_kg(entry.co2_kg())
            );
            Status::success(&message);
            println!(
                "  Total: {}  {}",
                dashboard.metric(log).label.bold(),
                colored_gauge(dashboard.progress(log), GAUGE_WIDTH)
            );
        }
        Err(e) => Status::warning(&warning_text(&e)),
    }
}

/// Warning line for a discarded submission
fn warning_text(err: &EstimateError) -> String {
    if err.is_transient() {
        format!("{err} (the journey was not added; try again shortly)")
    } else {
        err.to_string()
    }
}

fn list(dashboard: &Dashboard, log: &JourneyLog, format: OutputFormat) -> Result<()> {
    let rows = dashboard.rows(log);
    if format.is_json() {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }
    if rows.is_empty() {
        Status::info("No journeys yet");
        return Ok(());
    }

    let cells: Vec<Vec<String>> = rows
        .into_iter()
        .map(|row| {
            vec![
                row.origin,
                row.destination,
                row.vehicle.to_string(),
                row.distance_km.to_string(),
                format!("{:.2}", row.co2_kg),
                row.date,
            ]
        })
        .collect();
    println!(
        "{}",
        render_table(&["Origin", "Destination", "Mode", "km", "CO2 kg", "Date"], &cells)
    );
    Ok(())
}

fn summary(dashboard: &Dashboard, log: &JourneyLog, format: OutputFormat) -> Result<()> {
    if format.is_json() {
        println!("{}", serde_json::to_string_pretty(&dashboard.snapshot(log))?);
        return Ok(());
    }

    println!(
        "Total CO2 emissions: {} over {}",
        dashboard.metric(log).label.bold(),
        format_count(log.len(), "journey", "journeys")
    );
    println!("{}", colored_gauge(dashboard.progress(log), GAUGE_WIDTH));
    println!(
        "  {}",
        format!(
            "ceiling {} t, session {} since {}",
            dashboard.progress_ceiling_tonnes(),
            footprint_telemetry::session_id(),
            footprint_telemetry::session_started_at().format("%H:%M")
        )
        .dimmed()
    );
    Ok(())
}

fn map(dashboard: &Dashboard, log: &JourneyLog, path: Option<PathBuf>) -> Result<()> {
    let geojson = serde_json::to_string_pretty(&dashboard.geojson(log))?;
    match path {
        None => println!("{geojson}"),
        Some(path) => {
            std::fs::write(&path, geojson)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            let markers = dashboard.markers(log).len();
            Status::success(&format!(
                "Wrote {} to {}",
                format_count(markers, "marker", "markers"),
                path.display()
            ));
        }
    }
    Ok(())
}
