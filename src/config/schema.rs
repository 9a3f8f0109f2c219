//! Configuration schema types
//!
//! This module defines the configuration structure for medrecords.

use serde::{Deserialize, Serialize};

/// Main medrecords configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordsConfig {
    /// Source file locations
    pub sources: SourcesConfig,

    /// Column names in the source headers
    #[serde(default)]
    pub columns: ColumnsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl RecordsConfig {
    /// Configuration for two source files with default columns and logging
    pub fn from_paths(patients_path: impl Into<String>, labs_path: impl Into<String>) -> Self {
        Self {
            sources: SourcesConfig {
                patients_path: patients_path.into(),
                labs_path: labs_path.into(),
            },
            columns: ColumnsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.sources.validate()?;
        self.columns.patients.validate()?;
        self.columns.labs.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Source file locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Tab-delimited patient demographics file
    pub patients_path: String,

    /// Tab-delimited lab results file
    pub labs_path: String,
}

impl SourcesConfig {
    fn validate(&self) -> Result<(), String> {
        if self.patients_path.trim().is_empty() {
            return Err("sources.patients_path cannot be empty".to_string());
        }
        if self.labs_path.trim().is_empty() {
            return Err("sources.labs_path cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Column names for both sources
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnsConfig {
    /// Patient source columns
    #[serde(default)]
    pub patients: PatientColumns,

    /// Lab source columns
    #[serde(default)]
    pub labs: LabColumns,
}

/// Header names of the required patient columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientColumns {
    /// Unique patient identifier
    #[serde(default = "default_patient_id_column")]
    pub id: String,

    #[serde(default = "default_gender_column")]
    pub gender: String,

    #[serde(default = "default_date_of_birth_column")]
    pub date_of_birth: String,

    #[serde(default = "default_race_column")]
    pub race: String,
}

impl PatientColumns {
    /// Required columns in declaration order
    pub fn required(&self) -> [&str; 4] {
        [
            self.id.as_str(),
            self.gender.as_str(),
            self.date_of_birth.as_str(),
            self.race.as_str(),
        ]
    }

    fn validate(&self) -> Result<(), String> {
        validate_column_names("columns.patients", &self.required())
    }
}

impl Default for PatientColumns {
    fn default() -> Self {
        Self {
            id: default_patient_id_column(),
            gender: default_gender_column(),
            date_of_birth: default_date_of_birth_column(),
            race: default_race_column(),
        }
    }
}

/// Header names of the required lab columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabColumns {
    /// Foreign key into the patient source
    #[serde(default = "default_patient_id_column")]
    pub patient_id: String,

    #[serde(default = "default_admission_id_column")]
    pub admission_id: String,

    #[serde(default = "default_lab_name_column")]
    pub name: String,

    #[serde(default = "default_lab_value_column")]
    pub value: String,

    #[serde(default = "default_lab_units_column")]
    pub units: String,

    #[serde(default = "default_lab_timestamp_column")]
    pub timestamp: String,
}

impl LabColumns {
    /// Required columns in declaration order
    pub fn required(&self) -> [&str; 6] {
        [
            self.patient_id.as_str(),
            self.admission_id.as_str(),
            self.name.as_str(),
            self.value.as_str(),
            self.units.as_str(),
            self.timestamp.as_str(),
        ]
    }

    fn validate(&self) -> Result<(), String> {
        validate_column_names("columns.labs", &self.required())
    }
}

impl Default for LabColumns {
    fn default() -> Self {
        Self {
            patient_id: default_patient_id_column(),
            admission_id: default_admission_id_column(),
            name: default_lab_name_column(),
            value: default_lab_value_column(),
            units: default_lab_units_column(),
            timestamp: default_lab_timestamp_column(),
        }
    }
}

fn validate_column_names(section: &str, names: &[&str]) -> Result<(), String> {
    for (i, name) in names.iter().enumerate() {
        if name.trim().is_empty() {
            return Err(format!("{section}: column names cannot be empty"));
        }
        if name.contains('\t') {
            return Err(format!("{section}: column '{name}' contains a tab"));
        }
        if names[..i].contains(name) {
            return Err(format!("{section}: column '{name}' is listed twice"));
        }
    }
    Ok(())
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Write JSON logs to rolling files
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Rotation policy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.level.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid logging.level '{}'. Must be one of: {}",
                self.level,
                valid_levels.join(", ")
            ));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path is required when local_enabled = true".to_string());
        }
        Ok(())
    }
}

// Default value functions
fn default_patient_id_column() -> String {
    "PatientID".to_string()
}

fn default_gender_column() -> String {
    "PatientGender".to_string()
}

fn default_date_of_birth_column() -> String {
    "PatientDateOfBirth".to_string()
}

fn default_race_column() -> String {
    "PatientRace".to_string()
}

fn default_admission_id_column() -> String {
    "AdmissionID".to_string()
}

fn default_lab_name_column() -> String {
    "LabName".to_string()
}

fn default_lab_value_column() -> String {
    "LabValue".to_string()
}

fn default_lab_units_column() -> String {
    "LabUnits".to_string()
}

fn default_lab_timestamp_column() -> String {
    "LabDateTime".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
