//! Conversion of raw rows into typed records

use crate::config::{LabColumns, PatientColumns};
use crate::core::load::Row;
use crate::domain::{LabRecord, ParseError, PatientRecord, RecordsError, Result};

/// Parses one lab row
pub(crate) fn lab_from_row(row: &Row, source: &str, columns: &LabColumns) -> Result<LabRecord> {
    LabRecord::parse(
        row.value(&columns.patient_id),
        row.value(&columns.admission_id),
        row.value(&columns.name),
        row.value(&columns.value),
        row.value(&columns.units),
        row.value(&columns.timestamp),
    )
    .map(|lab| lab.with_attributes(row.extra_fields(&columns.required())))
    .map_err(|e| row_error(e, row, source))
}

/// Parses one patient row and attaches its labs
pub(crate) fn patient_from_row(
    row: &Row,
    source: &str,
    columns: &PatientColumns,
    labs: Vec<LabRecord>,
) -> Result<PatientRecord> {
    let build = || -> std::result::Result<PatientRecord, ParseError> {
        PatientRecord::builder()
            .id(row.value(&columns.id))?
            .gender(row.value(&columns.gender))
            .date_of_birth(row.value(&columns.date_of_birth))?
            .race(row.value(&columns.race))
            .attributes(row.extra_fields(&columns.required()))
            .labs(labs)
            .build()
    };
    build().map_err(|e| row_error(e, row, source))
}

fn row_error(err: ParseError, row: &Row, source: &str) -> RecordsError {
    tracing::error!(
        path = %source,
        line = row.line(),
        error = %err,
        "Failed to parse row"
    );
    RecordsError::Parse(err)
}
