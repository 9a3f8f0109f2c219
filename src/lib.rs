// medrecords - Patient demographics and lab results loader
// Copyright (c) 2025 Medrecords Contributors
// Licensed under the MIT License

//! # medrecords - Patient demographics and lab results
//!
//! medrecords loads two tab-delimited exports, one row per patient and one row
//! per lab measurement, joins them by patient ID and answers per-patient
//! questions about age and lab thresholds.
//!
//! ## Overview
//!
//! This library provides:
//! - **Loading** tab-delimited sources keyed by their identifying column
//! - **Indexing** lab rows by patient without copying them
//! - **Aggregating** patients and labs into typed records
//! - **Querying** coarse age, age at first admission and "is sick" thresholds
//!
//! ## Architecture
//!
//! - [`core`] - Loading, indexing, aggregation and queries
//! - [`domain`] - Patient and lab records, identifiers and errors
//! - [`config`] - Source paths, column names and logging settings
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use medrecords::config::load_config;
//! use medrecords::core::{query, PatientAggregate};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("medrecords.toml")?;
//!     let aggregate = PatientAggregate::load(&config)?;
//!
//!     println!("age: {}", query::age(&aggregate, "1")?);
//!     println!(
//!         "low albumin: {}",
//!         query::is_sick(&aggregate, "1", "METABOLIC: ALBUMIN", "<", 3.5)
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Age
//!
//! Ages are whole elapsed days divided by 365, truncated. A patient without
//! any lab has no first admission, reported as [`domain::NO_ADMISSION_AGE`].
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`domain::Result`], carrying a
//! [`domain::RecordsError`]:
//!
//! ```rust,no_run
//! use medrecords::core::PatientAggregate;
//! use medrecords::domain::RecordsError;
//!
//! match PatientAggregate::load_from_paths("patients.txt", "labs.txt") {
//!     Ok(aggregate) => println!("{} patients", aggregate.len()),
//!     Err(RecordsError::MissingResource { path, .. }) => eprintln!("cannot open {path}"),
//!     Err(e) => eprintln!("load failed: {e}"),
//! }
//! ```

pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
