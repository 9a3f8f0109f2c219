//! Logging and observability
//!
//! The library emits `tracing` events with structured fields (source path,
//! row counts, patient identifiers, elapsed time). Applications embedding it
//! can install their own subscriber or call [`init_logging`] for a console
//! layer plus optional rolling JSON files.
//!
//! # Example
//!
//! ```no_run
//! use medrecords::logging::init_logging;
//! use medrecords::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging(&config.level, &config).expect("Failed to initialize logging");
//!
//! tracing::info!(patients = 100, "Records loaded");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};
