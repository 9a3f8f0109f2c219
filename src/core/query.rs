//! Per-patient queries
//!
//! Queries run against any [`PatientStore`]: the parsed
//! [`PatientAggregate`](crate::core::PatientAggregate) or the unparsed
//! [`RawRecords`](crate::core::RawRecords).
//!
//! Unknown patients are handled asymmetrically. [`age`] and
//! [`age_at_first_admission`] report `NotFound`, while [`is_sick`] answers
//! `false` just as it does for a patient with no matching labs.

use crate::core::aggregate::PatientAggregate;
use crate::domain::timestamp::now;
use crate::domain::{Comparison, PatientRecord, RecordsError, Result, NO_ADMISSION_AGE};
use chrono::NaiveDateTime;
use std::borrow::Cow;

/// Read access to patients by identifier
pub trait PatientStore {
    /// Looks up a patient with their labs
    ///
    /// # Errors
    ///
    /// Returns `RecordsError::NotFound` for an unknown identifier. Stores that
    /// parse lazily may also return a parse error.
    fn patient(&self, patient_id: &str) -> Result<Cow<'_, PatientRecord>>;

    /// Returns true if the identifier is known
    fn contains(&self, patient_id: &str) -> bool;
}

impl PatientStore for PatientAggregate {
    fn patient(&self, patient_id: &str) -> Result<Cow<'_, PatientRecord>> {
        self.get(patient_id)
            .map(Cow::Borrowed)
            .ok_or_else(|| RecordsError::NotFound(patient_id.to_string()))
    }

    fn contains(&self, patient_id: &str) -> bool {
        PatientAggregate::contains(self, patient_id)
    }
}

/// Coarse age of a patient relative to the local wall clock
///
/// # Errors
///
/// `NotFound` for an unknown patient
///
/// # Examples
///
/// ```no_run
/// use medrecords::core::{query, PatientAggregate};
///
/// # fn example() -> medrecords::domain::Result<()> {
/// let aggregate = PatientAggregate::load_from_paths("patients.txt", "labs.txt")?;
/// println!("{}", query::age(&aggregate, "1")?);
/// # Ok(())
/// # }
/// ```
pub fn age<S: PatientStore + ?Sized>(store: &S, patient_id: &str) -> Result<i64> {
    age_at(store, patient_id, now())
}

/// Coarse age of a patient at an explicit point in time
///
/// # Errors
///
/// `NotFound` for an unknown patient
pub fn age_at<S: PatientStore + ?Sized>(
    store: &S,
    patient_id: &str,
    at: NaiveDateTime,
) -> Result<i64> {
    Ok(store.patient(patient_id)?.age_at(at))
}

/// Coarse age at the patient's earliest lab
///
/// Returns [`NO_ADMISSION_AGE`] (`-1`) for a patient without labs.
///
/// # Errors
///
/// `NotFound` for an unknown patient
pub fn age_at_first_admission<S: PatientStore + ?Sized>(
    store: &S,
    patient_id: &str,
) -> Result<i64> {
    Ok(store
        .patient(patient_id)?
        .age_at_first_admission()
        .unwrap_or(NO_ADMISSION_AGE))
}

/// Returns true if any lab named `lab_name` satisfies `operator` against
/// `threshold`
///
/// `operator` is one of `>`, `<`, `=`. Anything else yields `false`, as do an
/// unknown patient and a patient without labs.
pub fn is_sick<S: PatientStore + ?Sized>(
    store: &S,
    patient_id: &str,
    lab_name: &str,
    operator: &str,
    threshold: f64,
) -> bool {
    let Some(comparison) = Comparison::parse(operator) else {
        tracing::debug!(operator, "Unrecognized comparison operator");
        return false;
    };
    is_sick_by(store, patient_id, lab_name, comparison, threshold)
}

/// Typed form of [`is_sick`]
pub fn is_sick_by<S: PatientStore + ?Sized>(
    store: &S,
    patient_id: &str,
    lab_name: &str,
    comparison: Comparison,
    threshold: f64,
) -> bool {
    match store.patient(patient_id) {
        Ok(patient) => patient.is_sick_by(lab_name, comparison, threshold),
        Err(RecordsError::NotFound(_)) => false,
        Err(e) => {
            tracing::warn!(patient_id, error = %e, "Patient records could not be read");
            false
        }
    }
}
