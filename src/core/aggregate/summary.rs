//! Load summary and reporting

use crate::core::load::{KeyedRows, LabIndex, Table};
use std::time::Duration;

/// Counts describing one load of the patient and lab sources
#[derive(Debug, Clone, PartialEq)]
pub struct LoadSummary {
    /// Patient rows loaded
    pub patients: usize,

    /// Lab rows read
    pub lab_rows: usize,

    /// Patients with no lab rows
    pub patients_without_labs: usize,

    /// Lab rows whose patient ID is absent from the patient source
    pub orphan_lab_rows: usize,

    /// Distinct patient IDs referenced only by the lab source, sorted
    pub orphan_patient_ids: Vec<String>,

    /// Wall time spent loading
    pub duration: Duration,
}

impl LoadSummary {
    /// Collects counts from the loaded sources
    pub fn collect(patients: &KeyedRows, labs: &Table, index: &LabIndex<'_>) -> Self {
        let patients_without_labs = patients
            .iter()
            .filter(|(id, _)| !index.contains(id))
            .count();

        let mut orphan_patient_ids: Vec<String> = index
            .patient_ids()
            .filter(|id| !patients.contains(id))
            .map(str::to_string)
            .collect();
        orphan_patient_ids.sort();

        let orphan_lab_rows = orphan_patient_ids
            .iter()
            .map(|id| index.labs_for(id).len())
            .sum();

        Self {
            patients: patients.len(),
            lab_rows: labs.len(),
            patients_without_labs,
            orphan_lab_rows,
            orphan_patient_ids,
            duration: Duration::ZERO,
        }
    }

    /// Sets the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Returns true if every lab row belongs to a known patient
    pub fn is_consistent(&self) -> bool {
        self.orphan_lab_rows == 0
    }

    /// Emits the summary as a structured log event
    pub fn log(&self) {
        tracing::info!(
            patients = self.patients,
            lab_rows = self.lab_rows,
            patients_without_labs = self.patients_without_labs,
            orphan_lab_rows = self.orphan_lab_rows,
            duration_ms = self.duration.as_millis() as u64,
            "Records loaded"
        );
        if !self.is_consistent() {
            tracing::warn!(
                orphan_lab_rows = self.orphan_lab_rows,
                orphan_patients = ?self.orphan_patient_ids,
                "Lab rows reference unknown patients and were skipped"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn table(text: &str) -> Table {
        Table::from_reader("test", Cursor::new(text.as_bytes().to_vec())).unwrap()
    }

    #[test]
    fn test_collect_counts() {
        let patients = table("PatientID\n1\n2\n3\n").key_by("PatientID").unwrap();
        let labs = table("PatientID\tLabName\n1\tA\n1\tB\n9\tC\n8\tD\n9\tE\n");
        let index = LabIndex::build(&labs, "PatientID").unwrap();

        let summary = LoadSummary::collect(&patients, &labs, &index)
            .with_duration(Duration::from_millis(5));

        assert_eq!(summary.patients, 3);
        assert_eq!(summary.lab_rows, 5);
        assert_eq!(summary.patients_without_labs, 2);
        assert_eq!(summary.orphan_lab_rows, 3);
        assert_eq!(summary.orphan_patient_ids, vec!["8".to_string(), "9".to_string()]);
        assert_eq!(summary.duration, Duration::from_millis(5));
        assert!(!summary.is_consistent());
    }

    #[test]
    fn test_consistent_sources() {
        let patients = table("PatientID\n1\n").key_by("PatientID").unwrap();
        let labs = table("PatientID\tLabName\n1\tA\n");
        let index = LabIndex::build(&labs, "PatientID").unwrap();

        let summary = LoadSummary::collect(&patients, &labs, &index);
        assert!(summary.is_consistent());
        assert_eq!(summary.patients_without_labs, 0);
    }
}
