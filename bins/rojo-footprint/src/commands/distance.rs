//! Distance command - great-circle distance between two places

use super::lookup_message;
use crate::OutputFormat;
use anyhow::Result;
use footprint_cli::progress;
use footprint_core::config::ConfigSchema;
use footprint_emissions::{EmissionEstimator, Route};
use serde::Serialize;

#[derive(Serialize)]
struct DistanceOutput<'a> {
    origin: &'a str,
    destination: &'a str,
    distance_km: u32,
    policy: &'static str,
    route: Route,
}

/// Resolve both places and print the distance between them
pub async fn run(schema: &ConfigSchema, origin: &str, destination: &str, format: OutputFormat) -> Result<()> {
    let estimator = EmissionEstimator::from_config(schema)?;

    let spinner = lookup_message(&estimator, origin, destination)
        .filter(|_| !format.is_json())
        .map(|msg| progress::spinner(&msg));
    let resolved = estimator.resolve_distance(origin, destination).await;
    if let Some(pb) = &spinner {
        pb.finish_and_clear();
    }
    let (distance_km, route) = resolved?;

    if format.is_json() {
        let output = DistanceOutput {
            origin: origin.trim(),
            destination: destination.trim(),
            distance_km,
            policy: estimator.policy().name(),
            route,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!(
            "{} → {}: {distance_km} km{}",
            origin.trim(),
            destination.trim(),
            if route.placeholder { " (synthetic)" } else { "" }
        );
        if !route.placeholder {
            println!("  from {} to {}", route.origin, route.destination);
        }
    }

    Ok(())
}
