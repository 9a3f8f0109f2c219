//! Tab-delimited table reading
//!
//! A source is a header line followed by data lines, all split on `\t` with
//! no quoting or escaping. A leading UTF-8 byte-order mark is dropped before
//! the header is parsed.

use crate::domain::{RecordsError, Result};
use csv::{Reader, ReaderBuilder, StringRecord};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::io::Read;
use std::path::Path;

/// Field delimiter for every source
pub const DELIMITER: u8 = b'\t';

/// One data row: column name to raw string value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    line: usize,
    fields: BTreeMap<String, String>,
}

impl Row {
    /// Creates a row from its 1-based source line and fields
    pub fn new(line: usize, fields: BTreeMap<String, String>) -> Self {
        Self { line, fields }
    }

    /// 1-based line number in the source file (the header is line 1)
    pub fn line(&self) -> usize {
        self.line
    }

    /// Value of a column, if the column exists
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Value of a column already validated against the header
    ///
    /// Returns an empty string for an unknown column.
    pub fn value(&self, column: &str) -> &str {
        self.get(column).unwrap_or_default()
    }

    /// All fields of the row
    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    /// Fields whose column is not in `known`
    pub fn extra_fields(&self, known: &[&str]) -> BTreeMap<String, String> {
        self.fields
            .iter()
            .filter(|(column, _)| !known.contains(&column.as_str()))
            .map(|(column, value)| (column.clone(), value.clone()))
            .collect()
    }
}

/// A fully read source: header columns and data rows in file order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    source: String,
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Reads a tab-delimited file
    ///
    /// The file handle is dropped when this returns, on success or failure.
    ///
    /// # Errors
    ///
    /// - `MissingResource` if the file cannot be opened or read (including
    ///   invalid UTF-8)
    /// - `DuplicateColumn` if the header repeats a column name
    /// - `MalformedRow` if a data row has fewer fields than the header
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = path.display().to_string();

        let reader = reader_builder()
            .from_path(path)
            .map_err(|e| unreadable(&source, e))?;

        let table = Self::from_csv(source, reader)?;

        tracing::debug!(
            path = %table.source,
            columns = table.columns.len(),
            rows = table.rows.len(),
            "Source table read"
        );

        Ok(table)
    }

    /// Reads a table from any reader
    ///
    /// `source` names the input in errors and logs.
    ///
    /// # Errors
    ///
    /// Same as [`Table::read`]
    pub fn from_reader<R: Read>(source: impl Into<String>, reader: R) -> Result<Self> {
        Self::from_csv(source.into(), reader_builder().from_reader(reader))
    }

    fn from_csv<R: Read>(source: String, mut reader: Reader<R>) -> Result<Self> {
        let columns: Vec<String> = reader
            .headers()
            .map_err(|e| unreadable(&source, e))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut seen = HashSet::with_capacity(columns.len());
        if let Some(repeated) = columns.iter().find(|column| !seen.insert(column.as_str())) {
            return Err(RecordsError::DuplicateColumn {
                path: source,
                column: repeated.clone(),
            });
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| unreadable(&source, e))?;
            let line_number = record
                .position()
                .map_or(0, |position| position.line() as usize);

            // trailing blank lines are common in exports
            if is_blank(&record) {
                continue;
            }

            if record.len() < columns.len() {
                return Err(RecordsError::MalformedRow {
                    path: source,
                    line: line_number,
                    expected: columns.len(),
                    found: record.len(),
                });
            }
            if record.len() > columns.len() {
                tracing::trace!(
                    path = %source,
                    line = line_number,
                    extra = record.len() - columns.len(),
                    "Ignoring fields beyond the header"
                );
            }

            let fields = columns
                .iter()
                .zip(record.iter())
                .map(|(column, value)| (column.clone(), value.to_string()))
                .collect();
            rows.push(Row::new(line_number, fields));
        }

        Ok(Self {
            source,
            columns,
            rows,
        })
    }

    /// Name of the input this table was read from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Header columns in file order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Data rows in file order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Checks that every named column is in the header
    ///
    /// # Errors
    ///
    /// Returns `MissingColumn` for the first absent column
    pub fn require_columns(&self, required: &[&str]) -> Result<()> {
        require_columns(&self.source, &self.columns, required)
    }

    /// Keys every row by the value of `key_column`
    ///
    /// # Errors
    ///
    /// - `MissingColumn` if `key_column` is not in the header
    /// - `DuplicateIdentifier` if two rows share a key
    pub fn key_by(self, key_column: &str) -> Result<KeyedRows> {
        self.require_columns(&[key_column])?;

        let mut rows = HashMap::with_capacity(self.rows.len());
        for row in self.rows {
            let key = row.value(key_column).to_string();
            if rows.contains_key(&key) {
                return Err(RecordsError::DuplicateIdentifier {
                    path: self.source,
                    id: key,
                });
            }
            rows.insert(key, row);
        }

        Ok(KeyedRows {
            source: self.source,
            columns: self.columns,
            key_column: key_column.to_string(),
            rows,
        })
    }
}

/// Rows of a source keyed by their identifying column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyedRows {
    source: String,
    columns: Vec<String>,
    key_column: String,
    rows: HashMap<String, Row>,
}

impl KeyedRows {
    /// Row for an identifier
    pub fn get(&self, key: &str) -> Option<&Row> {
        self.rows.get(key)
    }

    /// Returns true if the identifier is present
    pub fn contains(&self, key: &str) -> bool {
        self.rows.contains_key(key)
    }

    /// Iterates over `(identifier, row)` pairs in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Row)> {
        self.rows.iter().map(|(key, row)| (key.as_str(), row))
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if there are no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Name of the input these rows were read from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Header columns in file order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The identifying column
    pub fn key_column(&self) -> &str {
        &self.key_column
    }

    /// Checks that every named column is in the header
    ///
    /// # Errors
    ///
    /// Returns `MissingColumn` for the first absent column
    pub fn require_columns(&self, required: &[&str]) -> Result<()> {
        require_columns(&self.source, &self.columns, required)
    }
}

pub(crate) fn require_columns(source: &str, columns: &[String], required: &[&str]) -> Result<()> {
    match required
        .iter()
        .find(|name| !columns.iter().any(|column| column == *name))
    {
        Some(missing) => Err(RecordsError::MissingColumn {
            path: source.to_string(),
            column: missing.to_string(),
        }),
        None => Ok(()),
    }
}

fn reader_builder() -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder
        .delimiter(DELIMITER)
        .quoting(false)
        .has_headers(true)
        .flexible(true);
    builder
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|field| field.trim().is_empty())
}

fn unreadable(source: &str, err: csv::Error) -> RecordsError {
    RecordsError::MissingResource {
        path: source.to_string(),
        reason: err.to_string(),
    }
}
