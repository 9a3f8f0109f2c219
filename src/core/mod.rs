//! Core loading and query logic for medrecords.
//!
//! # Modules
//!
//! - [`load`] - Reading tab-delimited sources and indexing labs by patient
//! - [`aggregate`] - Joining patients with their labs into typed records
//! - [`raw`] - Queryable unparsed rows
//! - [`query`] - Age and threshold queries over any [`PatientStore`]
//!
//! # Pipeline
//!
//! 1. **Load**: read the patient source keyed by patient ID, and the lab source
//! 2. **Index**: group lab rows by patient ID, keeping source order
//! 3. **Aggregate**: parse each patient and their labs into a [`PatientRecord`](crate::domain::PatientRecord)
//! 4. **Query**: answer age and "is sick" questions
//!
//! # Example
//!
//! ```rust,no_run
//! use medrecords::core::{query, PatientAggregate};
//!
//! # fn example() -> medrecords::domain::Result<()> {
//! let aggregate = PatientAggregate::load_from_paths("patients.txt", "labs.txt")?;
//!
//! let age = query::age(&aggregate, "1")?;
//! let first = query::age_at_first_admission(&aggregate, "1")?;
//! let low_albumin = query::is_sick(&aggregate, "1", "METABOLIC: ALBUMIN", "<", 3.5);
//! println!("{age} {first} {low_albumin}");
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod load;
pub mod query;
pub mod raw;

pub use aggregate::{LoadSummary, PatientAggregate};
pub use load::{load_keyed, KeyedRows, LabIndex, Row, Table};
pub use query::PatientStore;
pub use raw::RawRecords;
