// SignPack - Signed Document Export Tool
// Copyright (c) 2025 SignPack Contributors
// Licensed under the MIT License

//! # SignPack - Signed Document Export
//!
//! SignPack is a CLI tool and library for browsing the documents held by an
//! electronic-signature service and exporting a selection of them as
//! size-capped ZIP archives.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Listing** vaults and documents from the signing service
//! - **Filtering** by vault, status, name substring, and signature date range
//! - **Sorting** deterministically by signature date or name
//! - **Exporting** selected documents as one or more ZIP archive parts, each
//!   kept under a configurable size budget
//!
//! ## Architecture
//!
//! SignPack follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (catalog view pipeline, archive export)
//! - [`adapters`] - External integrations (signing-service vendors)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use signpack::config::load_config;
//! use signpack::core::export::ExportCoordinator;
//! use signpack::domain::{FilterSpec, Selection, SortSpec};
//! use tokio::sync::watch;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("signpack.toml")?;
//!
//!     let (_tx, shutdown_rx) = watch::channel(false);
//!     let coordinator = ExportCoordinator::new(&config, shutdown_rx)?;
//!
//!     // Build the filtered, ordered view
//!     let view = coordinator
//!         .list_documents(None, &FilterSpec::default(), &SortSpec::default())
//!         .await?;
//!
//!     // Export everything in the view
//!     let selection = Selection::new(view.iter().map(|r| r.id.clone()).collect::<Vec<_>>())?;
//!     let outcome = coordinator
//!         .execute_export(None, &FilterSpec::default(), &SortSpec::default(), &selection)
//!         .await?;
//!
//!     println!("Produced {} archive part(s)", outcome.report.part_count());
//!     Ok(())
//! }
//! ```
//!
//! ## Deterministic packing
//!
//! The view order is the packing order. Documents are placed into the current
//! archive part until the next one would push it past the configured size
//! budget, then a new part starts. A document that alone exceeds the budget
//! gets a part of its own. Fetches run with bounded concurrency, but
//! completion order never changes which part a document lands in.
//!
//! ## Error Handling
//!
//! SignPack uses the [`domain::SignPackError`] type for all errors:
//!
//! ```rust,no_run
//! use signpack::domain::SignPackError;
//!
//! fn example() -> Result<(), SignPackError> {
//!     // Errors are automatically converted using the ? operator
//!     let config = signpack::config::load_config("signpack.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! SignPack uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!("Starting export");
//! warn!(document_id = "doc-1", "Document skipped");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
