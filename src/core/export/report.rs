//! Export session reporting
//!
//! The report is the authoritative record of what an export produced: which
//! parts were written, which documents were skipped and why, and whether the
//! session was interrupted before completion.

use crate::domain::DocumentId;
use serde::Serialize;
use std::time::Duration;

/// A document that could not be fetched during an export
#[derive(Debug, Clone, Serialize)]
pub struct FetchFailure {
    pub document_id: DocumentId,
    pub reason: String,
    /// True when a retry of the same export might succeed
    pub transient: bool,
}

/// Summary of one finished archive part
#[derive(Debug, Clone, Serialize)]
pub struct ArchivePartSummary {
    pub index: usize,
    pub file_name: String,
    pub size_bytes: u64,
    pub document_ids: Vec<DocumentId>,
    pub oversized: bool,
}

/// Summary of an export session
#[derive(Debug, Clone, Serialize)]
pub struct ExportReport {
    pub parts: Vec<ArchivePartSummary>,
    /// Documents packed across all parts
    pub included: usize,
    pub failures: Vec<FetchFailure>,
    pub total_bytes: u64,
    #[serde(with = "duration_secs")]
    pub duration: Duration,
    /// True when shutdown was requested before the export finished
    pub interrupted: bool,
}

mod duration_secs {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(d.as_secs_f64())
    }
}

impl ExportReport {
    pub fn new() -> Self {
        Self {
            parts: Vec::new(),
            included: 0,
            failures: Vec::new(),
            total_bytes: 0,
            duration: Duration::ZERO,
            interrupted: false,
        }
    }

    pub fn add_part(&mut self, summary: ArchivePartSummary) {
        self.total_bytes += summary.size_bytes;
        self.included += summary.document_ids.len();
        self.parts.push(summary);
    }

    pub fn add_failure(&mut self, failure: FetchFailure) {
        self.failures.push(failure);
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// True when every selected document was packed and nothing interrupted
    /// the session
    pub fn is_successful(&self) -> bool {
        self.failures.is_empty() && !self.interrupted
    }

    /// Log a one-line summary plus one line per skipped document
    pub fn log_summary(&self) {
        tracing::info!(
            parts = self.part_count(),
            documents = self.included,
            skipped = self.failures.len(),
            total_bytes = self.total_bytes,
            duration_secs = self.duration.as_secs_f64(),
            interrupted = self.interrupted,
            "Export session finished"
        );

        for failure in &self.failures {
            tracing::warn!(
                document_id = failure.document_id.as_str(),
                transient = failure.transient,
                reason = %failure.reason,
                "Document skipped"
            );
        }
    }
}

impl Default for ExportReport {
    fn default() -> Self {
        Self::new()
    }
}
