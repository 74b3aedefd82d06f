use crate::app_config::{AppConfig, DetectorConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<f64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("GUIDEWATCH_ENV", "development"));
    let log_level = or_default("GUIDEWATCH_LOG_LEVEL", "info");
    let data_dir = PathBuf::from(or_default("GUIDEWATCH_DATA_DIR", "./data"));
    let sources_path = PathBuf::from(or_default(
        "GUIDEWATCH_SOURCES_PATH",
        "./config/sources.yaml",
    ));

    let threshold = parse_f64("GUIDEWATCH_DIFF_THRESHOLD", "0.05")?;
    let detector = DetectorConfig::new(threshold).map_err(|e| ConfigError::InvalidEnvVar {
        var: "GUIDEWATCH_DIFF_THRESHOLD".to_string(),
        reason: e.to_string(),
    })?;

    Ok(AppConfig {
        env,
        log_level,
        data_dir,
        sources_path,
        detector,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
