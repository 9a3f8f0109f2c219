//! Laboratory result domain model

use super::errors::ParseError;
use super::ids::{AdmissionId, PatientId};
use super::timestamp::parse_timestamp;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Threshold comparison used by the "is sick" predicate
///
/// The operator set is closed to `>`, `<` and `=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Comparison {
    /// Lab value strictly greater than the threshold
    GreaterThan,
    /// Lab value strictly less than the threshold
    LessThan,
    /// Lab value exactly equal to the threshold
    Equal,
}

impl Comparison {
    /// Parses an operator symbol
    ///
    /// Returns `None` for anything outside `>`, `<`, `=`. Callers in the query
    /// layer treat `None` as "no lab matches" rather than as an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use medrecords::domain::lab::Comparison;
    ///
    /// assert_eq!(Comparison::parse(">"), Some(Comparison::GreaterThan));
    /// assert_eq!(Comparison::parse(">="), None);
    /// ```
    pub fn parse(symbol: &str) -> Option<Self> {
        match symbol {
            ">" => Some(Self::GreaterThan),
            "<" => Some(Self::LessThan),
            "=" => Some(Self::Equal),
            _ => None,
        }
    }

    /// Operator symbol as written in queries
    pub fn symbol(self) -> &'static str {
        match self {
            Self::GreaterThan => ">",
            Self::LessThan => "<",
            Self::Equal => "=",
        }
    }

    /// Applies the comparison as `value <op> threshold`
    pub fn holds(self, value: f64, threshold: f64) -> bool {
        match self {
            Self::GreaterThan => value > threshold,
            Self::LessThan => value < threshold,
            Self::Equal => value == threshold,
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Parses a lab value string into a float
///
/// # Errors
///
/// Returns `ParseError::LabValue` for non-numeric input
pub fn parse_lab_value(value: &str) -> Result<f64, ParseError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| ParseError::LabValue {
            value: value.to_string(),
        })
}

/// A single laboratory measurement
///
/// Created once from one lab source row and never modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabRecord {
    /// Patient the measurement belongs to
    pub patient_id: PatientId,

    /// Admission during which the sample was taken
    pub admission_id: AdmissionId,

    /// Lab name, e.g. `METABOLIC: ALBUMIN`
    pub name: String,

    /// Measured value
    pub value: f64,

    /// Units of the value, e.g. `g/dL`
    pub units: String,

    /// When the measurement was recorded
    pub timestamp: NaiveDateTime,

    /// Columns outside the fixed lab schema, kept verbatim
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl LabRecord {
    /// Builds a lab record from its source field strings
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` for blank identifiers, a non-numeric value, or a
    /// timestamp outside the fixed source format
    ///
    /// # Examples
    ///
    /// ```
    /// use medrecords::domain::lab::LabRecord;
    ///
    /// let lab = LabRecord::parse(
    ///     "1", "1", "METABOLIC: ALBUMIN", "4.0", "g/dL", "2019-01-01 00:00:00.000",
    /// ).unwrap();
    /// assert_eq!(lab.value, 4.0);
    /// ```
    pub fn parse(
        patient_id: &str,
        admission_id: &str,
        name: &str,
        value: &str,
        units: &str,
        timestamp: &str,
    ) -> Result<Self, ParseError> {
        Ok(Self {
            patient_id: PatientId::new(patient_id)?,
            admission_id: AdmissionId::new(admission_id)?,
            name: name.to_string(),
            value: parse_lab_value(value)?,
            units: units.to_string(),
            timestamp: parse_timestamp(timestamp)?,
            attributes: BTreeMap::new(),
        })
    }

    /// Attaches pass-through columns
    pub fn with_attributes(mut self, attributes: BTreeMap<String, String>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Returns true if this lab has the given name and its value satisfies
    /// the comparison against the threshold
    pub fn satisfies(&self, lab_name: &str, comparison: Comparison, threshold: f64) -> bool {
        self.name == lab_name && comparison.holds(self.value, threshold)
    }
}
