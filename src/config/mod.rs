//! Configuration management for medrecords.
//!
//! This module provides TOML-based configuration loading, parsing, and
//! validation.
//!
//! # Overview
//!
//! Configuration files support:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `MEDRECORDS_*` environment overrides
//! - Default column names matching the standard patient and lab exports
//!
//! # Configuration Structure
//!
//! - [`SourcesConfig`] - Patient and lab file locations
//! - [`ColumnsConfig`] - Header names of the required columns
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! [sources]
//! patients_path = "${DATA_DIR}/PatientCorePopulatedTable.txt"
//! labs_path = "${DATA_DIR}/LabsCorePopulatedTable.txt"
//!
//! [columns.patients]
//! id = "PatientID"
//! date_of_birth = "PatientDateOfBirth"
//!
//! [logging]
//! level = "debug"
//! ```
//!
//! Only `[sources]` is required; every column name has a default.

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ColumnsConfig, LabColumns, LoggingConfig, PatientColumns, RecordsConfig, SourcesConfig,
};
