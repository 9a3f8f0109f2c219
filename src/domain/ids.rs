//! Domain identifier types with validation
//!
//! Newtype wrappers keep patient and admission identifiers from being mixed
//! up. Both are opaque strings taken verbatim from the source files.

use super::errors::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Patient identifier newtype wrapper
///
/// # Examples
///
/// ```
/// use medrecords::domain::ids::PatientId;
/// use std::str::FromStr;
///
/// let id = PatientId::from_str("1A8791E3-A61C-455A-8DEE-763EB90C9B2C").unwrap();
/// assert_eq!(id.as_str(), "1A8791E3-A61C-455A-8DEE-763EB90C9B2C");
/// assert!(PatientId::new("  ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PatientId(String);

impl PatientId {
    /// Creates a new PatientId
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Identifier` if the identifier is blank
    pub fn new(id: impl Into<String>) -> Result<Self, ParseError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ParseError::Identifier(
                "patient ID cannot be empty".to_string(),
            ));
        }
        Ok(Self(id))
    }

    /// Returns the patient ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PatientId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for PatientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Admission identifier newtype wrapper
///
/// Admission IDs are only unique within a patient, so no cross-patient
/// meaning should be read into equal values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AdmissionId(String);

impl AdmissionId {
    /// Creates a new AdmissionId
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Identifier` if the identifier is blank
    pub fn new(id: impl Into<String>) -> Result<Self, ParseError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ParseError::Identifier(
                "admission ID cannot be empty".to_string(),
            ));
        }
        Ok(Self(id))
    }

    /// Returns the admission ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AdmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AdmissionId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for AdmissionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patient_id_valid() {
        let id = PatientId::new("1").unwrap();
        assert_eq!(id.as_str(), "1");
        assert_eq!(id.to_string(), "1");
        assert_eq!(id.into_inner(), "1".to_string());
    }

    #[test]
    fn test_patient_id_empty() {
        assert!(PatientId::new("").is_err());
        assert!(PatientId::new("   ").is_err());
    }

    #[test]
    fn test_patient_id_kept_verbatim() {
        let id = PatientId::from_str(" 7 ").unwrap();
        assert_eq!(id.as_str(), " 7 ");
    }

    #[test]
    fn test_admission_id() {
        let id = AdmissionId::from_str("3").unwrap();
        assert_eq!(id.as_ref(), "3");
        assert!(matches!(
            AdmissionId::new(""),
            Err(ParseError::Identifier(_))
        ));
    }
}
