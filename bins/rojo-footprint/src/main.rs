//! Rojo Footprint - journey CO2 estimator
//!
//! Log journeys between places and watch their estimated CO2 footprint add up.

use clap::{Parser, Subcommand, ValueEnum};
use footprint_cli::output::Status;
use footprint_core::config::{Config, ConfigSchema, DistancePolicyKind, GeocoderProvider};
use footprint_core::error::exit_codes;
use footprint_core::ErrorCode;
use footprint_emissions::EstimateError;
use footprint_telemetry::TelemetryConfig;
use std::process::ExitCode;

mod commands;

use commands::{distance, estimate, rates, session};

/// Estimate and track the CO2 footprint of your journeys
#[derive(Parser)]
#[command(name = "rojo-footprint")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file (default: ./rojo-footprint.toml if present)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Use random distances instead of geocoding
    #[arg(long, global = true)]
    synthetic: bool,

    /// Use the built-in gazetteer instead of Nominatim
    #[arg(long, global = true)]
    offline: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Emit log events as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate distance and CO2 for one journey
    Estimate {
        /// Where the journey starts
        origin: String,

        /// Where the journey ends
        destination: String,

        /// Transport mode (car, bus, train, plane, bicycle, walk)
        #[arg(short, long, default_value = "car")]
        mode: String,
    },

    /// Show the distance between two places
    Distance {
        /// First place
        origin: String,

        /// Second place
        destination: String,
    },

    /// List emission rates and map colours per transport mode
    Rates,

    /// Interactive session: add journeys and watch the total grow
    Session,
}

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON documents
    Json,
}

impl OutputFormat {
    /// Returns true for JSON output
    pub fn is_json(self) -> bool {
        self == Self::Json
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let telemetry = TelemetryConfig::for_verbosity(cli.verbose).with_json(cli.log_json);
    if let Err(e) = footprint_telemetry::init_with_config(telemetry) {
        eprintln!("warning: {e}");
    }

    let schema = match load_schema(&cli) {
        Ok(schema) => schema,
        Err(e) => {
            report(&e, cli.format);
            return ExitCode::from(exit_codes::CONFIG_ERROR);
        }
    };

    let result = match cli.command {
        Commands::Estimate { origin, destination, mode } => {
            estimate::run(&schema, &origin, &destination, &mode, cli.format).await
        }
        Commands::Distance { origin, destination } => {
            distance::run(&schema, &origin, &destination, cli.format).await
        }
        Commands::Rates => rates::run(cli.format),
        Commands::Session => session::run(&schema, cli.format).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = exit_code_for(&e);
            if let Some(estimate) = e.downcast_ref::<EstimateError>() {
                report(&estimate.to_error(), cli.format);
            } else if let Some(core) = e.downcast_ref::<footprint_core::Error>() {
                report(core, cli.format);
            } else if cli.format.is_json() {
                report(&footprint_core::Error::new(ErrorCode::Internal, format!("{e:#}")), cli.format);
            } else {
                Status::error(&format!("{e:#}"));
            }
            ExitCode::from(code)
        }
    }
}

/// Print a coded error on stderr, as a JSON report in JSON mode
fn report(err: &footprint_core::Error, format: OutputFormat) {
    if !format.is_json() {
        Status::report(err);
        return;
    }
    match serde_json::to_string_pretty(&err.to_report()) {
        Ok(json) => eprintln!("{json}"),
        Err(_) => Status::report(err),
    }
}

/// Load configuration and apply the command-line switches on top
fn load_schema(cli: &Cli) -> footprint_core::Result<ConfigSchema> {
    let config = Config::load(cli.config.as_deref())?;
    let mut schema = config.schema;

    if let Some(path) = &config.path {
        tracing::info!(path = %path, "Loaded configuration");
    }
    if cli.synthetic {
        schema.estimator.policy = DistancePolicyKind::Synthetic;
    }
    if cli.offline {
        schema.geocoder.provider = GeocoderProvider::Static;
    }

    Ok(schema)
}

fn exit_code_for(err: &anyhow::Error) -> u8 {
    if let Some(e) = err.downcast_ref::<EstimateError>() {
        return e.exit_code();
    }
    if let Some(e) = err.downcast_ref::<footprint_core::Error>() {
        return match e.code.category() {
            "Configuration" => exit_codes::CONFIG_ERROR,
            "Validation" => exit_codes::VALIDATION_ERROR,
            _ if e.code == ErrorCode::LocationNotFound => exit_codes::LOCATION_NOT_FOUND,
            "Geocoding" => exit_codes::LOOKUP_ERROR,
            _ => exit_codes::FAILURE,
        };
    }
    exit_codes::FAILURE
}
