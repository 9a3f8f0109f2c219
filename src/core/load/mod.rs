//! Record loading
//!
//! - [`table`] - Tab-delimited file reading into [`Table`] and [`KeyedRows`]
//! - [`index`] - Grouping lab rows by patient ([`LabIndex`])

pub mod index;
pub mod table;

pub use index::LabIndex;
pub use table::{KeyedRows, Row, Table, DELIMITER};

use crate::domain::Result;
use std::path::Path;

/// Reads a source and keys every row by `key_column`
///
/// This is the record loader entry point: one entry per data row, with every
/// column value kept verbatim.
///
/// # Errors
///
/// `MissingResource`, `MalformedRow`, `DuplicateColumn`, `MissingColumn` or
/// `DuplicateIdentifier`; no partial result is returned
///
/// # Examples
///
/// ```no_run
/// use medrecords::core::load::load_keyed;
///
/// # fn example() -> medrecords::domain::Result<()> {
/// let patients = load_keyed("PatientCorePopulatedTable.txt", "PatientID")?;
/// if let Some(row) = patients.get("1") {
///     println!("{}", row.value("PatientGender"));
/// }
/// # Ok(())
/// # }
/// ```
pub fn load_keyed(path: impl AsRef<Path>, key_column: &str) -> Result<KeyedRows> {
    Table::read(path)?.key_by(key_column)
}
