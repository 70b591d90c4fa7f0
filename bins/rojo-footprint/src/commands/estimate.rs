//! Estimate command - one journey, printed

use super::lookup_message;
use crate::OutputFormat;
use anyhow::Result;
use footprint_cli::output::{format_duration, format_kg};
use footprint_cli::progress;
use footprint_core::config::ConfigSchema;
use footprint_emissions::{format_tonnes, EmissionEstimator, EstimateError, JourneyEntry, VehicleType};
use footprint_telemetry::Timer;
use owo_colors::OwoColorize;

/// Run a single estimate
pub async fn run(
    schema: &ConfigSchema,
    origin: &str,
    destination: &str,
    mode: &str,
    format: OutputFormat,
) -> Result<()> {
    let vehicle: VehicleType = mode.parse()?;
    let estimator = EmissionEstimator::from_config(schema)?;

    let spinner = lookup_message(&estimator, origin, destination)
        .filter(|_| !format.is_json())
        .map(|msg| progress::spinner(&msg));
    let timer = Timer::start("estimate");

    let entry = match estimator.estimate(origin, destination, vehicle).await {
        Ok(entry) => entry,
        Err(e) => {
            if let Some(pb) = &spinner {
                progress::finish_error(pb, failure_label(&e));
            }
            return Err(e.into());
        }
    };

    let elapsed = timer.stop();
    if let Some(pb) = &spinner {
        progress::finish_success(pb, &format!("Resolved in {}", format_duration(elapsed)));
    }

    if format.is_json() {
        println!("{}", serde_json::to_string_pretty(&entry)?);
    } else {
        print_entry(&entry);
    }

    Ok(())
}

/// Spinner label for a failed estimate
fn failure_label(err: &EstimateError) -> &'static str {
    match err {
        EstimateError::Validation { .. } => "Invalid input",
        EstimateError::LocationNotFound { .. } => "Location not found",
        EstimateError::Lookup(_) => "Lookup failed",
    }
}

fn print_entry(entry: &JourneyEntry) {
    println!(
        "{} → {} by {}",
        entry.origin().bold(),
        entry.destination().bold(),
        entry.vehicle()
    );
    let placeholder = entry.route().is_some_and(|r| r.placeholder);
    println!(
        "  Distance: {} km{}",
        entry.distance_km(),
        if placeholder { " (synthetic)" } else { "" }
    );
    println!(
        "  CO2:      {} ({})",
        format_kg(entry.co2_kg()).green(),
        format_tonnes(entry.co2_kg() / 1000.0)
    );
}
