//! Lab rows grouped by patient
//!
//! The index borrows rows from a lab [`Table`]; it never owns them. A patient
//! with no lab rows simply has no entry.

use super::table::{require_columns, Row, Table};
use crate::domain::Result;
use std::collections::HashMap;

/// Patient identifier to that patient's lab rows, in source order
#[derive(Debug, Clone)]
pub struct LabIndex<'a> {
    source: &'a str,
    columns: &'a [String],
    groups: HashMap<&'a str, Vec<&'a Row>>,
}

impl<'a> LabIndex<'a> {
    /// Groups the rows of `labs` by the value of `patient_id_column`
    ///
    /// # Errors
    ///
    /// Returns `MissingColumn` if `patient_id_column` is not in the header
    pub fn build(labs: &'a Table, patient_id_column: &str) -> Result<Self> {
        labs.require_columns(&[patient_id_column])?;

        let mut groups: HashMap<&'a str, Vec<&'a Row>> = HashMap::new();
        for row in labs.rows() {
            groups
                .entry(row.value(patient_id_column))
                .or_default()
                .push(row);
        }

        tracing::debug!(
            path = %labs.source(),
            lab_rows = labs.len(),
            patients = groups.len(),
            "Lab index built"
        );

        Ok(Self {
            source: labs.source(),
            columns: labs.columns(),
            groups,
        })
    }

    /// Lab rows for a patient; empty if the patient has none
    pub fn labs_for(&self, patient_id: &str) -> &[&'a Row] {
        self.groups
            .get(patient_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns true if the patient has at least one lab row
    pub fn contains(&self, patient_id: &str) -> bool {
        self.groups.contains_key(patient_id)
    }

    /// Patient identifiers with lab rows, in no particular order
    pub fn patient_ids(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.groups.keys().copied()
    }

    /// Number of distinct patients with labs
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true if there are no lab rows at all
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Header columns of the indexed lab table
    pub fn columns(&self) -> &'a [String] {
        self.columns
    }

    /// Name of the input the lab rows were read from
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Checks that every named column is in the lab header
    ///
    /// # Errors
    ///
    /// Returns `MissingColumn` for the first absent column
    pub fn require_columns(&self, required: &[&str]) -> Result<()> {
        require_columns(self.source, self.columns, required)
    }

    /// Clones the grouped rows into an owned map
    pub fn to_owned_groups(&self) -> HashMap<String, Vec<Row>> {
        self.groups
            .iter()
            .map(|(id, rows)| {
                (
                    id.to_string(),
                    rows.iter().map(|row| (*row).clone()).collect(),
                )
            })
            .collect()
    }
}
