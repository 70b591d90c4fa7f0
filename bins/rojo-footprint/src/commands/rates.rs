//! Rates command - emission rate table

use crate::OutputFormat;
use anyhow::Result;
use footprint_cli::output::{render_table, Status};
use footprint_emissions::EMISSION_RATES;

/// Print every transport mode with its rate and marker colour
pub fn run(format: OutputFormat) -> Result<()> {
    if format.is_json() {
        let rates: Vec<_> = EMISSION_RATES
            .iter()
            .map(|(vehicle, rate)| {
                serde_json::json!({
                    "vehicle": vehicle,
                    "grams_per_km": rate,
                    "color": vehicle.marker_color(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rates)?);
        return Ok(());
    }

    Status::header("Emission rates");
    let rows: Vec<Vec<String>> = EMISSION_RATES
        .iter()
        .map(|(vehicle, rate)| {
            vec![
                vehicle.to_string(),
                rate.to_string(),
                vehicle.marker_color().to_string(),
            ]
        })
        .collect();
    println!("{}", render_table(&["Mode", "g CO2/km", "Marker"], &rows));

    Ok(())
}
