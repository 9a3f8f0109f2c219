//! Domain models and types for medrecords.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`PatientId`], [`AdmissionId`])
//! - **Domain models** ([`PatientRecord`], [`LabRecord`], [`Comparison`])
//! - **Timestamp handling** ([`timestamp`]) for the fixed source format and
//!   the coarse day-count age formula
//! - **Error types** ([`RecordsError`], [`ParseError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible pipeline operations return [`Result<T>`](Result), carrying a [`RecordsError`]:
//!
//! ```rust,no_run
//! use medrecords::domain::Result;
//! use medrecords::core::PatientAggregate;
//!
//! fn example() -> Result<()> {
//!     let aggregate = PatientAggregate::load_from_paths("patients.txt", "labs.txt")?;
//!     println!("{} patients", aggregate.len());
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod ids;
pub mod lab;
pub mod patient;
pub mod result;
pub mod timestamp;

// Re-export commonly used types for convenience
pub use errors::{ParseError, RecordsError};
pub use ids::{AdmissionId, PatientId};
pub use lab::{Comparison, LabRecord};
pub use patient::{PatientRecord, PatientRecordBuilder, NO_ADMISSION_AGE};
pub use result::Result;
