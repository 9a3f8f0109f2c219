//! Integration tests for configuration loading and validation
//!
//! Note: Tests that modify environment variables should be run with --test-threads=1
//! to avoid interference between tests.

use medrecords::config::load_config;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("MEDRECORDS_SOURCES_PATIENTS_PATH");
    std::env::remove_var("MEDRECORDS_SOURCES_LABS_PATH");
    std::env::remove_var("MEDRECORDS_LOGGING_LEVEL");
    std::env::remove_var("MEDRECORDS_LOGGING_LOCAL_ENABLED");
    std::env::remove_var("TEST_MEDRECORDS_DATA_DIR");
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(contents.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[sources]
patients_path = "/data/PatientCorePopulatedTable.txt"
labs_path = "/data/LabsCorePopulatedTable.txt"

[columns.patients]
id = "SubjectID"
gender = "Sex"
date_of_birth = "BirthDate"
race = "Race"

[columns.labs]
patient_id = "SubjectID"
admission_id = "VisitID"
name = "TestName"
value = "TestValue"
units = "TestUnits"
timestamp = "TakenAt"

[logging]
level = "debug"
local_enabled = true
local_path = "/tmp/medrecords"
local_rotation = "hourly"
"#,
    );

    let config = load_config(temp_file.path()).unwrap();

    assert_eq!(config.sources.patients_path, "/data/PatientCorePopulatedTable.txt");
    assert_eq!(config.columns.patients.id, "SubjectID");
    assert_eq!(config.columns.labs.timestamp, "TakenAt");
    assert_eq!(config.logging.level, "debug");
    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_load_minimal_config_with_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[sources]
patients_path = "patients.txt"
labs_path = "labs.txt"
"#,
    );

    let config = load_config(temp_file.path()).unwrap();

    assert_eq!(config.columns.patients.id, "PatientID");
    assert_eq!(config.columns.patients.date_of_birth, "PatientDateOfBirth");
    assert_eq!(config.columns.labs.value, "LabValue");
    assert_eq!(config.columns.labs.timestamp, "LabDateTime");
    assert_eq!(config.logging.level, "info");
    assert!(!config.logging.local_enabled);
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_MEDRECORDS_DATA_DIR", "/srv/emr");

    let temp_file = write_config(
        r#"
# patients_path = "${UNSET_IN_COMMENT}"
[sources]
patients_path = "${TEST_MEDRECORDS_DATA_DIR}/patients.txt"
labs_path = "${TEST_MEDRECORDS_DATA_DIR}/labs.txt"
"#,
    );

    let config = load_config(temp_file.path()).unwrap();

    assert_eq!(config.sources.patients_path, "/srv/emr/patients.txt");
    assert_eq!(config.sources.labs_path, "/srv/emr/labs.txt");

    cleanup_env_vars();
}

#[test]
fn test_missing_env_var_is_an_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[sources]
patients_path = "${TEST_MEDRECORDS_DATA_DIR}/patients.txt"
labs_path = "labs.txt"
"#,
    );

    let err = load_config(temp_file.path()).unwrap_err();
    assert!(err.to_string().contains("TEST_MEDRECORDS_DATA_DIR"));
}

#[test]
fn test_env_var_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("MEDRECORDS_SOURCES_LABS_PATH", "/override/labs.txt");
    std::env::set_var("MEDRECORDS_LOGGING_LEVEL", "trace");

    let temp_file = write_config(
        r#"
[sources]
patients_path = "patients.txt"
labs_path = "labs.txt"
"#,
    );

    let config = load_config(temp_file.path()).unwrap();

    assert_eq!(config.sources.patients_path, "patients.txt");
    assert_eq!(config.sources.labs_path, "/override/labs.txt");
    assert_eq!(config.logging.level, "trace");

    cleanup_env_vars();
}

#[test]
fn test_invalid_config_validation() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[sources]
patients_path = "patients.txt"
labs_path = "labs.txt"

[columns.labs]
value = "LabName"
"#,
    );

    let result = load_config(temp_file.path());
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("Configuration validation failed"));
}

#[test]
fn test_missing_config_file() {
    let err = load_config("/nonexistent/medrecords.toml").unwrap_err();
    assert!(err.to_string().contains("not found"));
}
