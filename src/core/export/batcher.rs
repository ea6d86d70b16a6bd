//! Archive batching
//!
//! Packs fetched documents into size-capped bundles with a single forward
//! pass: a document goes into the current bundle if it fits, otherwise the
//! bundle is sealed and a new one starts. A document whose estimated cost
//! alone exceeds the budget is sealed into its own oversized part rather
//! than dropped.

use crate::domain::{DocumentRecord, Result, SignServiceError};

use super::bundle::{entry_cost, ArchivePart, BundleWriter};
use super::report::FetchFailure;

/// Result of packing an export's documents
#[derive(Debug)]
pub struct BatchOutcome {
    /// Finished archive parts, in order
    pub parts: Vec<ArchivePart>,
    /// Documents whose content could not be fetched
    pub failures: Vec<FetchFailure>,
    /// Number of documents packed across all parts
    pub included: usize,
}

/// First-fit-sequential bundle packer
pub struct BundleBatcher {
    budget_bytes: u64,
    current: BundleWriter,
    parts: Vec<ArchivePart>,
    failures: Vec<FetchFailure>,
    included: usize,
}

impl BundleBatcher {
    pub fn new(budget_bytes: u64) -> Self {
        Self {
            budget_bytes,
            current: BundleWriter::new(),
            parts: Vec::new(),
            failures: Vec::new(),
            included: 0,
        }
    }

    /// Record a document whose fetch failed
    ///
    /// The failure is reported but never interrupts packing of the
    /// remaining documents.
    pub fn push_failure(&mut self, record: &DocumentRecord, error: &SignServiceError) {
        tracing::warn!(
            document_id = record.id.as_str(),
            error = %error,
            "Skipping document after failed fetch"
        );
        self.failures.push(FetchFailure {
            document_id: record.id.clone(),
            reason: error.to_string(),
            transient: error.is_transient(),
        });
    }

    /// Pack a fetched document into the current or a new bundle
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::SignPackError::Export`] if archive writing
    /// fails.
    pub fn push_document(&mut self, record: &DocumentRecord, content: &[u8]) -> Result<()> {
        let entry_name = record.archive_entry_name();
        let cost = entry_cost(&entry_name, content.len() as u64);

        if cost > self.budget_bytes {
            // Oversized document: seal whatever is open, then give it a
            // part of its own.
            self.seal_current(false)?;

            tracing::warn!(
                document_id = record.id.as_str(),
                content_bytes = content.len(),
                budget_bytes = self.budget_bytes,
                "Document exceeds bundle budget, emitting oversized part"
            );

            let mut writer = BundleWriter::new();
            writer.add_document(&record.id, &entry_name, content)?;
            std::mem::swap(&mut self.current, &mut writer);
            self.seal_current(true)?;
            self.included += 1;
            return Ok(());
        }

        if !self.current.is_empty() && self.current.estimated_bytes() + cost > self.budget_bytes {
            self.seal_current(false)?;
        }

        self.current.add_document(&record.id, &entry_name, content)?;
        self.included += 1;
        Ok(())
    }

    fn seal_current(&mut self, oversized: bool) -> Result<()> {
        if self.current.is_empty() {
            return Ok(());
        }

        let writer = std::mem::take(&mut self.current);
        let index = self.parts.len() + 1;
        let part = writer.finish(index, oversized)?;

        tracing::debug!(
            part_index = part.index,
            size_bytes = part.size_bytes,
            documents = part.document_ids.len(),
            oversized = part.oversized,
            "Sealed archive part"
        );

        self.parts.push(part);
        Ok(())
    }

    /// Seal any open bundle and return the packing outcome
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::SignPackError::Export`] if the final bundle
    /// cannot be finished.
    pub fn finish(mut self) -> Result<BatchOutcome> {
        self.seal_current(false)?;

        Ok(BatchOutcome {
            parts: self.parts,
            failures: self.failures,
            included: self.included,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::DocumentId;
    use crate::domain::DocumentStatus;

    const MB: u64 = 1024 * 1024;

    fn record(id: &str) -> DocumentRecord {
        DocumentRecord {
            id: DocumentId::new(id).unwrap(),
            display_name: id.to_uppercase(),
            original_name: format!("{id}.pdf"),
            signed_at: None,
            status: DocumentStatus::Finalized,
            vault_id: None,
            vault_name: None,
        }
    }

    fn part_ids(part: &ArchivePart) -> Vec<&str> {
        part.document_ids.iter().map(|id| id.as_str()).collect()
    }

    #[test]
    fn test_splits_when_budget_would_be_exceeded() {
        // 40 + 70 + 10 MB against a 100 MB budget packs as [40], [70, 10].
        let mut batcher = BundleBatcher::new(100 * MB);
        batcher
            .push_document(&record("a"), &vec![0u8; (40 * MB) as usize])
            .unwrap();
        batcher
            .push_document(&record("b"), &vec![0u8; (70 * MB) as usize])
            .unwrap();
        batcher
            .push_document(&record("c"), &vec![0u8; (10 * MB) as usize])
            .unwrap();

        let outcome = batcher.finish().unwrap();
        assert_eq!(outcome.parts.len(), 2);
        assert_eq!(part_ids(&outcome.parts[0]), vec!["a"]);
        assert_eq!(part_ids(&outcome.parts[1]), vec!["b", "c"]);
        assert_eq!(outcome.included, 3);
        assert!(outcome.parts.iter().all(|p| p.size_bytes <= 100 * MB));
    }

    #[test]
    fn test_oversized_document_gets_singleton_part() {
        let mut batcher = BundleBatcher::new(10 * MB);
        batcher
            .push_document(&record("a"), &vec![0u8; MB as usize])
            .unwrap();
        batcher
            .push_document(&record("big"), &vec![0u8; (25 * MB) as usize])
            .unwrap();
        batcher
            .push_document(&record("b"), &vec![0u8; MB as usize])
            .unwrap();

        let outcome = batcher.finish().unwrap();
        assert_eq!(outcome.parts.len(), 3);
        assert_eq!(part_ids(&outcome.parts[0]), vec!["a"]);
        assert_eq!(part_ids(&outcome.parts[1]), vec!["big"]);
        assert!(outcome.parts[1].oversized);
        assert_eq!(part_ids(&outcome.parts[2]), vec!["b"]);
        assert!(!outcome.parts[2].oversized);
    }

    #[test]
    fn test_failures_do_not_open_parts() {
        let mut batcher = BundleBatcher::new(10 * MB);
        batcher.push_failure(
            &record("gone"),
            &SignServiceError::DocumentNotFound("gone".into()),
        );
        batcher
            .push_document(&record("a"), &vec![0u8; MB as usize])
            .unwrap();
        batcher.push_failure(&record("slow"), &SignServiceError::Timeout("30s".into()));

        let outcome = batcher.finish().unwrap();
        assert_eq!(outcome.parts.len(), 1);
        assert_eq!(outcome.included, 1);
        assert_eq!(outcome.failures.len(), 2);
        assert!(!outcome.failures[0].transient);
        assert!(outcome.failures[1].transient);
    }

    #[test]
    fn test_all_failures_yield_no_parts() {
        let mut batcher = BundleBatcher::new(10 * MB);
        batcher.push_failure(&record("a"), &SignServiceError::Timeout("30s".into()));
        batcher.push_failure(
            &record("b"),
            &SignServiceError::ConnectionFailed("down".into()),
        );

        let outcome = batcher.finish().unwrap();
        assert!(outcome.parts.is_empty());
        assert_eq!(outcome.included, 0);
        assert_eq!(outcome.failures.len(), 2);
    }

    #[test]
    fn test_exact_fit_stays_in_one_part() {
        let mut batcher = BundleBatcher::new(100 * MB);
        for id in ["a", "b", "c"] {
            batcher
                .push_document(&record(id), &vec![0u8; (30 * MB) as usize])
                .unwrap();
        }

        let outcome = batcher.finish().unwrap();
        assert_eq!(outcome.parts.len(), 1);
        assert_eq!(part_ids(&outcome.parts[0]), vec!["a", "b", "c"]);
    }
}
