//! Configuration file loading

use super::schema::{ConfigSchema, DistancePolicyKind};
use crate::error::{Error, Result, ResultExt};
use std::path::Path;

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "rojo-footprint.toml";

/// Configuration wrapper
#[derive(Debug, Clone)]
pub struct Config {
    /// Parsed and validated settings
    pub schema: ConfigSchema,
    /// File the settings came from, if any
    pub path: Option<String>,
}

impl Config {
    /// Load configuration from a file path or use defaults
    ///
    /// An explicit `path` must exist. Without one, the standard locations are
    /// searched and defaults are used when nothing is found. Environment
    /// overrides are applied last, then the result is validated.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = match path {
            Some(p) if !Path::new(p).exists() => return Err(Error::config_not_found(p)),
            Some(p) => Some(p.to_string()),
            None => find_config_file(),
        };

        let mut schema = if let Some(ref p) = config_path {
            load_config_file(p)?
        } else {
            ConfigSchema::default()
        };

        apply_overrides(&mut schema, |key| std::env::var(key).ok())?;
        schema.validate()?;

        Ok(Self {
            schema,
            path: config_path,
        })
    }

    /// Parse configuration from TOML text, without environment overrides
    pub fn from_toml(content: &str) -> Result<Self> {
        let schema: ConfigSchema = toml::from_str(content)?;
        schema.validate()?;
        Ok(Self { schema, path: None })
    }

    /// Load with defaults only (no file)
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            schema: ConfigSchema::default(),
            path: None,
        }
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<String> {
    let candidates = [
        CONFIG_FILE_NAME,
        ".rojo-footprint.toml",
        ".config/rojo-footprint.toml",
    ];

    candidates
        .into_iter()
        .find(|candidate| Path::new(candidate).exists())
        .map(String::from)
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &str) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path)
        .map_err(Error::from)
        .context(format!("Failed to read config file {path}"))?;

    toml::from_str(&content)
        .map_err(Error::from)
        .context(format!("Failed to parse config file {path}"))
}

/// Apply `FOOTPRINT_*` overrides supplied by `lookup`
fn apply_overrides<F>(schema: &mut ConfigSchema, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(policy) = lookup("FOOTPRINT_POLICY") {
        schema.estimator.policy = policy.parse::<DistancePolicyKind>()?;
    }

    if let Some(url) = lookup("FOOTPRINT_NOMINATIM_URL") {
        schema.geocoder.base_url = url;
    }

    if let Some(agent) = lookup("FOOTPRINT_USER_AGENT") {
        schema.geocoder.user_agent = agent;
    }

    if let Some(timeout) = lookup("FOOTPRINT_TIMEOUT_SECS") {
        schema.geocoder.timeout_secs = timeout.trim().parse().map_err(|_| {
            Error::config_invalid(format!("FOOTPRINT_TIMEOUT_SECS is not a number: {timeout}"))
        })?;
    }

    Ok(())
}
