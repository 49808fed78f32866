use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env
/// vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse or validate.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse or validate.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup
/// function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let env = parse_environment(&or_default("SMARTCART_ENV", "development"));
    let log_level = or_default("SMARTCART_LOG_LEVEL", "info");
    let chains_path = PathBuf::from(or_default("SMARTCART_CHAINS_PATH", "./config/chains.yaml"));

    let raw_rate = or_default("SMARTCART_MAX_REJECTION_RATE", "0.25");
    let max_rejection_rate =
        raw_rate
            .parse::<f64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: "SMARTCART_MAX_REJECTION_RATE".to_string(),
                reason: e.to_string(),
            })?;
    if !(0.0..=1.0).contains(&max_rejection_rate) {
        return Err(ConfigError::InvalidEnvVar {
            var: "SMARTCART_MAX_REJECTION_RATE".to_string(),
            reason: format!("{max_rejection_rate} is outside 0.0..=1.0"),
        });
    }

    Ok(AppConfig {
        env,
        log_level,
        chains_path,
        max_rejection_rate,
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
