//! Patient domain model
//!
//! A [`PatientRecord`] joins one demographic row with every lab that refers
//! to the patient. Age values are derived on demand and never stored.

use super::errors::ParseError;
use super::ids::PatientId;
use super::lab::{Comparison, LabRecord};
use super::timestamp::{coarse_years_between, now, parse_timestamp};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sentinel reported as the first-admission age of a patient with no labs
pub const NO_ADMISSION_AGE: i64 = -1;

/// A patient with demographics and their lab history
///
/// # Examples
///
/// ```
/// use medrecords::domain::{LabRecord, PatientRecord};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let lab = LabRecord::parse(
///     "1", "1", "METABOLIC: ALBUMIN", "4.0", "g/dL", "2019-01-01 00:00:00.000",
/// )?;
/// let patient = PatientRecord::parse("1", "Male", "1947-12-28 02:45:40.547", "Unknown", vec![lab])?;
///
/// assert_eq!(patient.age_at_first_admission(), Some(71));
/// assert!(patient.is_sick("METABOLIC: ALBUMIN", ">", 3.0));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Unique patient identifier
    pub id: PatientId,

    /// Gender as recorded in the source
    pub gender: String,

    /// Date and time of birth
    pub date_of_birth: NaiveDateTime,

    /// Race as recorded in the source
    pub race: String,

    /// Columns outside the fixed patient schema, kept verbatim
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,

    /// Labs for this patient in source order
    pub labs: Vec<LabRecord>,
}

impl PatientRecord {
    /// Builds a patient from its source field strings and lab sequence
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` for a blank identifier or a malformed date of birth
    pub fn parse(
        id: &str,
        gender: &str,
        date_of_birth: &str,
        race: &str,
        labs: Vec<LabRecord>,
    ) -> Result<Self, ParseError> {
        PatientRecordBuilder::new()
            .id(id)?
            .gender(gender)
            .date_of_birth(date_of_birth)?
            .race(race)
            .labs(labs)
            .build()
    }

    /// Returns a builder for constructing a patient
    pub fn builder() -> PatientRecordBuilder {
        PatientRecordBuilder::default()
    }

    /// Coarse age relative to the current local time
    pub fn age(&self) -> i64 {
        self.age_at(now())
    }

    /// Coarse age at an explicit point in time
    pub fn age_at(&self, at: NaiveDateTime) -> i64 {
        coarse_years_between(self.date_of_birth, at)
    }

    /// Timestamp of the chronologically earliest lab, if any
    pub fn first_lab_time(&self) -> Option<NaiveDateTime> {
        self.labs.iter().map(|lab| lab.timestamp).min()
    }

    /// Coarse age at the earliest lab, or `None` if the patient has no labs
    pub fn age_at_first_admission(&self) -> Option<i64> {
        self.first_lab_time().map(|first| self.age_at(first))
    }

    /// Returns true if any lab named `lab_name` satisfies `operator` against
    /// `threshold`
    ///
    /// An operator other than `>`, `<` or `=` never matches, so the result
    /// is `false` rather than an error.
    pub fn is_sick(&self, lab_name: &str, operator: &str, threshold: f64) -> bool {
        match Comparison::parse(operator) {
            Some(comparison) => self.is_sick_by(lab_name, comparison, threshold),
            None => false,
        }
    }

    /// Typed form of [`PatientRecord::is_sick`]
    pub fn is_sick_by(&self, lab_name: &str, comparison: Comparison, threshold: f64) -> bool {
        self.labs
            .iter()
            .any(|lab| lab.satisfies(lab_name, comparison, threshold))
    }
}

/// Builder for constructing [`PatientRecord`] instances
#[derive(Debug, Default)]
pub struct PatientRecordBuilder {
    id: Option<PatientId>,
    gender: Option<String>,
    date_of_birth: Option<NaiveDateTime>,
    race: Option<String>,
    attributes: BTreeMap<String, String>,
    labs: Vec<LabRecord>,
}

impl PatientRecordBuilder {
    /// Creates a new PatientRecordBuilder
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the patient ID from a string
    pub fn id(mut self, id: impl Into<String>) -> Result<Self, ParseError> {
        self.id = Some(PatientId::new(id)?);
        Ok(self)
    }

    /// Sets the gender
    pub fn gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    /// Parses and sets the date of birth
    pub fn date_of_birth(mut self, date_of_birth: &str) -> Result<Self, ParseError> {
        self.date_of_birth = Some(parse_timestamp(date_of_birth)?);
        Ok(self)
    }

    /// Sets the race
    pub fn race(mut self, race: impl Into<String>) -> Self {
        self.race = Some(race.into());
        self
    }

    /// Sets the pass-through attributes
    pub fn attributes(mut self, attributes: BTreeMap<String, String>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Sets the lab sequence
    pub fn labs(mut self, labs: Vec<LabRecord>) -> Self {
        self.labs = labs;
        self
    }

    /// Builds the patient
    ///
    /// # Errors
    ///
    /// Returns an error if the ID or date of birth was not set. Gender and
    /// race default to empty strings.
    pub fn build(self) -> Result<PatientRecord, ParseError> {
        let id = self
            .id
            .ok_or_else(|| ParseError::Identifier("patient ID is required".to_string()))?;
        let date_of_birth = self.date_of_birth.ok_or_else(|| ParseError::Timestamp {
            value: String::new(),
            reason: "date of birth is required".to_string(),
        })?;

        Ok(PatientRecord {
            id,
            gender: self.gender.unwrap_or_default(),
            date_of_birth,
            race: self.race.unwrap_or_default(),
            attributes: self.attributes,
            labs: self.labs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lab(name: &str, value: &str, timestamp: &str) -> LabRecord {
        LabRecord::parse("1", "1", name, value, "g/dL", timestamp).unwrap()
    }

    fn patient_with(labs: Vec<LabRecord>) -> PatientRecord {
        PatientRecord::parse("1", "Male", "1993-12-21 17:45:40.547", "Asian", labs).unwrap()
    }

    #[test]
    fn test_patient_fields() {
        let patient = patient_with(vec![lab(
            "METABOLIC: ALBUMIN",
            "4.0",
            "2019-01-01 00:00:00.000",
        )]);
        assert_eq!(patient.id.as_str(), "1");
        assert_eq!(patient.gender, "Male");
        assert_eq!(
            patient.date_of_birth,
            parse_timestamp("1993-12-21 17:45:40.547").unwrap()
        );
        assert_eq!(patient.race, "Asian");
        assert_eq!(patient.labs.len(), 1);
        assert_eq!(patient.labs[0].value, 4.0);
    }

    #[test]
    fn test_age_at_fixed_time() {
        let patient = PatientRecord::parse("2", "Female", "1990-01-01 00:00:00.000", "White", vec![])
            .unwrap();
        let now = parse_timestamp("2023-01-01 00:00:00.000").unwrap();
        assert_eq!(patient.age_at(now), 33);
    }

    #[test]
    fn test_age_uses_wall_clock() {
        let patient = patient_with(vec![]);
        assert!(patient.age() >= 29);
    }

    #[test]
    fn test_age_at_first_admission_uses_earliest_lab() {
        let patient = patient_with(vec![
            lab("CBC: WBC", "5.0", "2021-06-01 00:00:00.000"),
            lab("METABOLIC: ALBUMIN", "4.0", "2019-01-01 00:00:00.000"),
        ]);
        assert_eq!(
            patient.first_lab_time(),
            Some(parse_timestamp("2019-01-01 00:00:00.000").unwrap())
        );
        assert_eq!(patient.age_at_first_admission(), Some(25));
    }

    #[test]
    fn test_age_at_first_admission_without_labs() {
        let patient = patient_with(vec![]);
        assert_eq!(patient.age_at_first_admission(), None);
        assert_eq!(patient.first_lab_time(), None);
    }

    #[test]
    fn test_is_sick() {
        let patient = patient_with(vec![
            lab("METABOLIC: ALBUMIN", "4.0", "2019-01-01 00:00:00.000"),
            lab("METABOLIC: ALBUMIN", "2.5", "2019-02-01 00:00:00.000"),
        ]);
        assert!(patient.is_sick("METABOLIC: ALBUMIN", ">", 3.0));
        assert!(!patient.is_sick("METABOLIC: ALBUMIN", ">", 4.1));
        assert!(patient.is_sick("METABOLIC: ALBUMIN", "<", 3.0));
        assert!(patient.is_sick("METABOLIC: ALBUMIN", "=", 2.5));
        assert!(!patient.is_sick("CBC: WBC", ">", 0.0));
    }

    #[test]
    fn test_is_sick_unrecognized_operator_is_false() {
        // Questionable but kept: unknown operators are not errors.
        let patient = patient_with(vec![lab(
            "METABOLIC: ALBUMIN",
            "4.0",
            "2019-01-01 00:00:00.000",
        )]);
        assert!(!patient.is_sick("METABOLIC: ALBUMIN", ">=", 3.0));
        assert!(!patient.is_sick("METABOLIC: ALBUMIN", "!=", 3.0));
    }

    #[test]
    fn test_builder_requires_id_and_dob() {
        assert!(matches!(
            PatientRecord::builder().build(),
            Err(ParseError::Identifier(_))
        ));
        assert!(matches!(
            PatientRecord::builder().id("1").unwrap().build(),
            Err(ParseError::Timestamp { .. })
        ));
    }

    #[test]
    fn test_builder_with_attributes() {
        let mut attributes = BTreeMap::new();
        attributes.insert("PatientLanguage".to_string(), "Icelandic".to_string());

        let patient = PatientRecord::builder()
            .id("1")
            .unwrap()
            .date_of_birth("1947-12-28 02:45:40.547")
            .unwrap()
            .attributes(attributes)
            .build()
            .unwrap();

        assert_eq!(patient.gender, "");
        assert_eq!(
            patient.attributes.get("PatientLanguage").map(String::as_str),
            Some("Icelandic")
        );
    }

    #[test]
    fn test_bad_date_of_birth() {
        let err = PatientRecord::parse("1", "Male", "1993/12/21", "Asian", vec![]).unwrap_err();
        assert!(matches!(err, ParseError::Timestamp { .. }));
    }
}
