//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::RecordsConfig;
use crate::domain::errors::RecordsError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into RecordsConfig
/// 4. Applies environment variable overrides (MEDRECORDS_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns `RecordsError::Configuration` if the file is missing or unreadable,
/// a referenced environment variable is unset, the TOML is invalid, or
/// validation fails
///
/// # Examples
///
/// ```no_run
/// use medrecords::config::loader::load_config;
///
/// let config = load_config("medrecords.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<RecordsConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(RecordsError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        RecordsError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: RecordsConfig = toml::from_str(&contents)?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        RecordsError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    tracing::debug!(
        config_path = %path.display(),
        patients_path = %config.sources.patients_path,
        labs_path = %config.sources.labs_path,
        "Configuration loaded"
    );

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied through untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| RecordsError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(RecordsError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using MEDRECORDS_* prefix
///
/// Environment variables follow the pattern: MEDRECORDS_<SECTION>_<KEY>,
/// for example MEDRECORDS_SOURCES_LABS_PATH or MEDRECORDS_LOGGING_LEVEL.
fn apply_env_overrides(config: &mut RecordsConfig) {
    // Source overrides
    if let Ok(val) = std::env::var("MEDRECORDS_SOURCES_PATIENTS_PATH") {
        config.sources.patients_path = val;
    }
    if let Ok(val) = std::env::var("MEDRECORDS_SOURCES_LABS_PATH") {
        config.sources.labs_path = val;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("MEDRECORDS_LOGGING_LEVEL") {
        config.logging.level = val;
    }
    if let Ok(val) = std::env::var("MEDRECORDS_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("MEDRECORDS_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("MEDRECORDS_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }
}
