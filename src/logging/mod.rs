//! Logging and observability
//!
//! Structured logging built on `tracing` with console output for development
//! and optional JSON file logging with rotation.
//!
//! # Example
//!
//! ```no_run
//! use signpack::logging::init_logging;
//! use signpack::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};
