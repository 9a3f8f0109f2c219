//! Unparsed patient and lab rows
//!
//! [`RawRecords`] keeps both sources as loaded (patient rows keyed by ID and
//! lab rows grouped by patient) and parses a patient only when it is queried.
//! Loading fails on structural problems; field parse errors surface at query
//! time instead.

use crate::config::{ColumnsConfig, RecordsConfig};
use crate::core::aggregate::{lab_from_row, patient_from_row};
use crate::core::load::{KeyedRows, LabIndex, Row, Table};
use crate::core::query::PatientStore;
use crate::domain::{PatientRecord, RecordsError, Result};
use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;

/// Patient rows keyed by ID plus lab rows grouped by patient
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecords {
    patients: KeyedRows,
    labs_source: String,
    labs: HashMap<String, Vec<Row>>,
    columns: ColumnsConfig,
}

impl RawRecords {
    /// Loads both sources named in the configuration
    ///
    /// # Errors
    ///
    /// `MissingResource`, `MalformedRow`, `MissingColumn` or
    /// `DuplicateIdentifier`
    pub fn load(config: &RecordsConfig) -> Result<Self> {
        let columns = config.columns.clone();

        let patients = Table::read(&config.sources.patients_path)?.key_by(&columns.patients.id)?;
        patients.require_columns(&columns.patients.required())?;

        let labs_table = Table::read(&config.sources.labs_path)?;
        labs_table.require_columns(&columns.labs.required())?;
        let labs = LabIndex::build(&labs_table, &columns.labs.patient_id)?.to_owned_groups();

        tracing::info!(
            patients = patients.len(),
            lab_rows = labs_table.len(),
            "Raw records loaded"
        );

        Ok(Self {
            patients,
            labs_source: labs_table.source().to_string(),
            labs,
            columns,
        })
    }

    /// Loads two sources with the default column names
    ///
    /// # Errors
    ///
    /// Same as [`RawRecords::load`]
    pub fn load_from_paths(
        patients_path: impl AsRef<Path>,
        labs_path: impl AsRef<Path>,
    ) -> Result<Self> {
        Self::load(&RecordsConfig::from_paths(
            patients_path.as_ref().display().to_string(),
            labs_path.as_ref().display().to_string(),
        ))
    }

    /// Patient rows keyed by ID
    pub fn patients(&self) -> &KeyedRows {
        &self.patients
    }

    /// Lab rows of a patient in source order; empty if none
    pub fn labs_for(&self, patient_id: &str) -> &[Row] {
        self.labs
            .get(patient_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

impl PatientStore for RawRecords {
    fn patient(&self, patient_id: &str) -> Result<Cow<'_, PatientRecord>> {
        let row = self
            .patients
            .get(patient_id)
            .ok_or_else(|| RecordsError::NotFound(patient_id.to_string()))?;

        let labs = self
            .labs_for(patient_id)
            .iter()
            .map(|lab_row| lab_from_row(lab_row, &self.labs_source, &self.columns.labs))
            .collect::<Result<Vec<_>>>()?;

        patient_from_row(row, self.patients.source(), &self.columns.patients, labs).map(Cow::Owned)
    }

    fn contains(&self, patient_id: &str) -> bool {
        self.patients.contains(patient_id)
    }
}
