//! Patient aggregate construction
//!
//! The aggregate joins every patient row with that patient's lab rows and
//! parses both into typed records. Construction fails on the first row that
//! does not parse, including lab rows for patients missing from the patient
//! source. Those rows are otherwise skipped and reported in the
//! [`LoadSummary`].
//!
//! # Example
//!
//! ```rust,no_run
//! use medrecords::config::RecordsConfig;
//! use medrecords::core::PatientAggregate;
//!
//! # fn example() -> medrecords::domain::Result<()> {
//! let config = RecordsConfig::from_paths("patients.txt", "labs.txt");
//! let (aggregate, summary) = PatientAggregate::load_with_summary(&config)?;
//!
//! println!("{} patients, {} lab rows", summary.patients, summary.lab_rows);
//! if let Some(patient) = aggregate.get("1") {
//!     println!("age {}", patient.age());
//! }
//! # Ok(())
//! # }
//! ```

mod rows;
pub mod summary;

pub(crate) use rows::{lab_from_row, patient_from_row};
pub use summary::LoadSummary;

use crate::config::{ColumnsConfig, RecordsConfig};
use crate::core::load::{KeyedRows, LabIndex, Table};
use crate::domain::{PatientRecord, Result};
use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

/// Every patient with demographics and labs, keyed by patient ID
///
/// Read-only once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatientAggregate {
    patients: HashMap<String, PatientRecord>,
}

impl PatientAggregate {
    /// Builds the aggregate from loaded patient rows and the lab index
    ///
    /// # Errors
    ///
    /// - `MissingColumn` if either source lacks a required column
    /// - `Parse` for a malformed identifier, timestamp or lab value
    pub fn build(
        patients: &KeyedRows,
        labs: &LabIndex<'_>,
        columns: &ColumnsConfig,
    ) -> Result<Self> {
        patients.require_columns(&columns.patients.required())?;
        labs.require_columns(&columns.labs.required())?;

        // orphan labs stay out of the aggregate but must still parse
        for orphan in labs.patient_ids().filter(|id| !patients.contains(id)) {
            for lab_row in labs.labs_for(orphan) {
                lab_from_row(lab_row, labs.source(), &columns.labs)?;
            }
        }

        let mut records = HashMap::with_capacity(patients.len());
        for (id, row) in patients.iter() {
            let lab_records = labs
                .labs_for(id)
                .iter()
                .map(|lab_row| lab_from_row(lab_row, labs.source(), &columns.labs))
                .collect::<Result<Vec<_>>>()?;

            let record = patient_from_row(row, patients.source(), &columns.patients, lab_records)?;
            records.insert(id.to_string(), record);
        }

        tracing::debug!(patients = records.len(), "Patient aggregate built");

        Ok(Self { patients: records })
    }

    /// Loads both sources named in the configuration and builds the aggregate
    ///
    /// # Errors
    ///
    /// Any loading or construction error
    pub fn load(config: &RecordsConfig) -> Result<Self> {
        Self::load_with_summary(config).map(|(aggregate, _)| aggregate)
    }

    /// Like [`PatientAggregate::load`], also returning the load summary
    ///
    /// # Errors
    ///
    /// Any loading or construction error
    pub fn load_with_summary(config: &RecordsConfig) -> Result<(Self, LoadSummary)> {
        let start = Instant::now();
        tracing::info!(
            patients_path = %config.sources.patients_path,
            labs_path = %config.sources.labs_path,
            "Loading records"
        );

        let patients =
            Table::read(&config.sources.patients_path)?.key_by(&config.columns.patients.id)?;
        let labs = Table::read(&config.sources.labs_path)?;
        labs.require_columns(&config.columns.labs.required())?;
        let index = LabIndex::build(&labs, &config.columns.labs.patient_id)?;

        let aggregate = Self::build(&patients, &index, &config.columns)?;
        let summary = LoadSummary::collect(&patients, &labs, &index).with_duration(start.elapsed());
        summary.log();

        Ok((aggregate, summary))
    }

    /// Loads two sources with the default column names
    ///
    /// # Errors
    ///
    /// Any loading or construction error
    pub fn load_from_paths(
        patients_path: impl AsRef<Path>,
        labs_path: impl AsRef<Path>,
    ) -> Result<Self> {
        let config = RecordsConfig::from_paths(
            patients_path.as_ref().display().to_string(),
            labs_path.as_ref().display().to_string(),
        );
        Self::load(&config)
    }

    /// Patient by ID
    pub fn get(&self, patient_id: &str) -> Option<&PatientRecord> {
        self.patients.get(patient_id)
    }

    /// Returns true if the patient is present
    pub fn contains(&self, patient_id: &str) -> bool {
        self.patients.contains_key(patient_id)
    }

    /// Iterates over all patients in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &PatientRecord> {
        self.patients.values()
    }

    /// Number of patients
    pub fn len(&self) -> usize {
        self.patients.len()
    }

    /// Returns true if there are no patients
    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }
}

impl FromIterator<PatientRecord> for PatientAggregate {
    fn from_iter<I: IntoIterator<Item = PatientRecord>>(iter: I) -> Self {
        Self {
            patients: iter
                .into_iter()
                .map(|patient| (patient.id.as_str().to_string(), patient))
                .collect(),
        }
    }
}
