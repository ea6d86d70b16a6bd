//! Archive export
//!
//! - [`bundle`] - ZIP bundle writing, entry naming, and size accounting
//! - [`batcher`] - first-fit-sequential packing under the size budget
//! - [`report`] - export session summary
//! - [`coordinator`] - orchestrates fetch, pack, and report

pub mod batcher;
pub mod bundle;
pub mod coordinator;
pub mod report;

pub use batcher::{BatchOutcome, BundleBatcher};
pub use bundle::{bundle_file_name, ArchivePart, BundleWriter};
pub use coordinator::{ExportCoordinator, ExportOutcome};
pub use report::{ArchivePartSummary, ExportReport, FetchFailure};
