//! Export orchestration
//!
//! Drives a full export session: validate inputs, snapshot the catalog,
//! build the view, resolve the selection, fetch content with bounded
//! concurrency, pack bundles, and assemble the report. Validation failures
//! surface before any per-document fetch is attempted, and a shutdown signal
//! abandons the session without delivering partial archives.

use crate::adapters::signservice::{SignServiceClient, SignServiceVendor};
use crate::config::{ExportConfig, SignPackConfig};
use crate::domain::{
    DocumentRecord, FilterSpec, Result, Selection, SignPackError, SortSpec, Vault, VaultId,
};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;

use super::batcher::BundleBatcher;
use super::bundle::{bundle_file_name, ArchivePart};
use super::report::{ArchivePartSummary, ExportReport};
use crate::core::catalog::{build_view, resolve_selection};

/// Result of a completed export session
#[derive(Debug)]
pub struct ExportOutcome {
    /// Finished archives, ready to be written out
    pub bundles: Vec<ArchivePart>,
    /// File name assigned to each bundle, parallel to `bundles`
    pub file_names: Vec<String>,
    pub report: ExportReport,
}

/// Orchestrates catalog access and archive export
pub struct ExportCoordinator {
    vendor: Arc<dyn SignServiceVendor>,
    export_config: ExportConfig,
    fetch_concurrency: usize,
    shutdown: watch::Receiver<bool>,
}

impl ExportCoordinator {
    /// Create a coordinator from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configured vendor is unsupported or cannot
    /// be initialized.
    pub fn new(config: &SignPackConfig, shutdown: watch::Receiver<bool>) -> Result<Self> {
        let client = SignServiceClient::new(config.service.clone())?;
        Ok(Self {
            vendor: client.vendor().clone(),
            export_config: config.export.clone(),
            fetch_concurrency: config.service.fetch_concurrency.max(1),
            shutdown,
        })
    }

    /// Create a coordinator over an existing vendor (used by tests and
    /// embedders)
    pub fn with_vendor(
        vendor: Arc<dyn SignServiceVendor>,
        export_config: ExportConfig,
        fetch_concurrency: usize,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            vendor,
            export_config,
            fetch_concurrency: fetch_concurrency.max(1),
            shutdown,
        }
    }

    /// List the vaults visible to the configured credentials
    pub async fn list_vaults(&self) -> Result<Vec<Vault>> {
        self.vendor.list_vaults().await
    }

    /// Fetch the catalog and build the filtered, ordered view
    ///
    /// # Errors
    ///
    /// Validation errors surface before the catalog is fetched.
    pub async fn list_documents(
        &self,
        vault: Option<&VaultId>,
        filter: &FilterSpec,
        sort: &SortSpec,
    ) -> Result<Vec<DocumentRecord>> {
        filter.validate()?;

        let catalog = self.vendor.list_documents(vault).await?;
        tracing::debug!(catalog_size = catalog.len(), "Fetched catalog snapshot");

        Ok(build_view(&catalog, filter, sort)?)
    }

    /// Run a full export session
    ///
    /// The selection is resolved against the view built from `filter` and
    /// `sort`; resolved documents are fetched with bounded concurrency and
    /// packed in view order.
    ///
    /// # Errors
    ///
    /// - Validation errors ([`SignPackError::Validation`]) before any fetch
    /// - [`SignPackError::AllFetchesFailed`] when every fetch failed
    /// - [`SignPackError::Export`] on archive assembly failures
    pub async fn execute_export(
        &self,
        vault: Option<&VaultId>,
        filter: &FilterSpec,
        sort: &SortSpec,
        selection: &Selection,
    ) -> Result<ExportOutcome> {
        let started = Instant::now();

        filter.validate()?;
        let catalog = self.vendor.list_documents(vault).await?;
        let view = build_view(&catalog, filter, sort)?;
        let selected = resolve_selection(&view, selection)?;

        tracing::info!(
            selected = selected.len(),
            view_size = view.len(),
            budget_bytes = self.export_config.bundle_max_bytes,
            "Starting export session"
        );

        let mut batcher = BundleBatcher::new(self.export_config.bundle_max_bytes);
        let attempted = selected.len();
        let mut interrupted = false;

        // buffered() preserves input order, so results arrive in view order
        // even though up to fetch_concurrency fetches run at once.
        let mut fetches = stream::iter(selected.into_iter().map(|record| {
            let vendor = Arc::clone(&self.vendor);
            async move {
                let result = vendor.fetch_document(&record.id).await;
                (record, result)
            }
        }))
        .buffered(self.fetch_concurrency);

        while let Some((record, result)) = fetches.next().await {
            if *self.shutdown.borrow() {
                tracing::warn!("Shutdown requested, abandoning export session");
                interrupted = true;
                break;
            }

            match result {
                Ok(content) => batcher.push_document(&record, &content)?,
                Err(e) => batcher.push_failure(&record, &e),
            }
        }
        drop(fetches);

        if interrupted {
            let mut report = ExportReport::new().with_duration(started.elapsed());
            report.interrupted = true;
            report.log_summary();
            return Ok(ExportOutcome {
                bundles: Vec::new(),
                file_names: Vec::new(),
                report,
            });
        }

        let outcome = batcher.finish()?;

        if outcome.included == 0 && !outcome.failures.is_empty() {
            return Err(SignPackError::AllFetchesFailed { attempted });
        }

        let total = outcome.parts.len();
        let file_names: Vec<String> = outcome
            .parts
            .iter()
            .map(|part| bundle_file_name(&self.export_config.bundle_prefix, part.index, total))
            .collect();

        let mut report = ExportReport::new();
        for (part, file_name) in outcome.parts.iter().zip(&file_names) {
            report.add_part(ArchivePartSummary {
                index: part.index,
                file_name: file_name.clone(),
                size_bytes: part.size_bytes,
                document_ids: part.document_ids.clone(),
                oversized: part.oversized,
            });
        }
        for failure in outcome.failures {
            report.add_failure(failure);
        }
        let report = report.with_duration(started.elapsed());
        report.log_summary();

        Ok(ExportOutcome {
            bundles: outcome.parts,
            file_names,
            report,
        })
    }
}
