//! Export command implementation
//!
//! This module implements the `export` command for fetching selected signed
//! documents and writing them out as size-capped ZIP archives.

use crate::config::load_config;
use crate::core::export::ExportCoordinator;
use crate::domain::{DocumentId, Selection, SignPackError};
use clap::Args;
use std::path::Path;
use tokio::sync::watch;

use super::{resolve_vault_scope, FilterArgs, SortArgs};

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Export every document in the filtered view
    #[arg(long, conflicts_with = "id")]
    pub all: bool,

    /// Document id(s) to export (comma-separated); must be in the view
    #[arg(long, value_name = "IDS")]
    pub id: Option<String>,

    /// Override the output directory
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Override the archive file name prefix
    #[arg(long)]
    pub prefix: Option<String>,

    /// Override the bundle size budget in bytes
    #[arg(long, value_name = "BYTES")]
    pub max_bundle_bytes: Option<u64>,

    #[command(flatten)]
    pub filter: FilterArgs,

    #[command(flatten)]
    pub sort: SortArgs,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let mut config = load_config(config_path)?;

        // Apply CLI overrides
        if let Some(dir) = &self.output_dir {
            tracing::info!(output_dir = %dir, "Overriding output directory from CLI");
            config.export.output_dir = dir.clone();
        }
        if let Some(prefix) = &self.prefix {
            tracing::info!(prefix = %prefix, "Overriding bundle prefix from CLI");
            config.export.bundle_prefix = prefix.clone();
        }
        if let Some(max) = self.max_bundle_bytes {
            tracing::info!(max_bundle_bytes = max, "Overriding bundle budget from CLI");
            config.export.bundle_max_bytes = max;
        }

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2); // Configuration error exit code
        }

        if !self.all && self.id.is_none() {
            eprintln!("Nothing selected. Use --all or --id <IDS>");
            return Ok(2);
        }

        let filter = match self.filter.to_filter_spec() {
            Ok(f) => f,
            Err(e) => {
                eprintln!("{e}");
                return Ok(2);
            }
        };
        let sort = match self.sort.to_sort_spec() {
            Ok(s) => s,
            Err(e) => {
                eprintln!("{e}");
                return Ok(2);
            }
        };

        let coordinator = match ExportCoordinator::new(&config, shutdown_signal) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create export coordinator");
                eprintln!("Failed to initialize export: {e}");
                return Ok(4); // Connection error exit code
            }
        };

        let scope = resolve_vault_scope(&coordinator, self.filter.vault.as_deref()).await?;

        // Build the view first so --all selects exactly what list shows
        // with the same flags.
        let view = match coordinator.list_documents(scope.as_ref(), &filter, &sort).await {
            Ok(v) => v,
            Err(e) => {
                tracing::error!(error = %e, "Failed to build document view");
                eprintln!("Failed to build document view: {e}");
                return Ok(4);
            }
        };

        let ids: Vec<DocumentId> = if self.all {
            view.iter().map(|r| r.id.clone()).collect()
        } else {
            match self.parse_ids() {
                Ok(ids) => ids,
                Err(e) => {
                    eprintln!("{e}");
                    return Ok(2);
                }
            }
        };

        let selection = match Selection::new(ids) {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Invalid selection");
                eprintln!("Invalid selection: {e}");
                return Ok(2);
            }
        };

        // Confirmation prompt (unless --yes)
        if !self.yes {
            println!("Export Configuration:");
            println!("  Documents selected: {}", selection.len());
            println!("  Bundle budget: {} bytes", config.export.bundle_max_bytes);
            println!("  Output directory: {}", config.export.output_dir);
            println!();
            print!("Proceed with export? [y/N]: ");
            use std::io::{self, Write};
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;

            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Export cancelled.");
                return Ok(0);
            }
        }

        tracing::info!("Executing export");
        println!("🚀 Starting export...");
        println!();

        let outcome = match coordinator
            .execute_export(scope.as_ref(), &filter, &sort, &selection)
            .await
        {
            Ok(o) => o,
            Err(SignPackError::Validation(e)) => {
                eprintln!("Export rejected: {e}");
                return Ok(2);
            }
            Err(e @ SignPackError::AllFetchesFailed { .. }) => {
                tracing::error!(error = %e, "Export produced no archive");
                eprintln!("Export failed: {e}");
                return Ok(1);
            }
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("Export failed: {e}");
                return Ok(5); // Fatal error exit code
            }
        };

        // Write the finished bundles to the output directory
        let out_dir = Path::new(&config.export.output_dir);
        std::fs::create_dir_all(out_dir)?;
        for (part, file_name) in outcome.bundles.iter().zip(&outcome.file_names) {
            let path = out_dir.join(file_name);
            std::fs::write(&path, &part.data)?;
            tracing::info!(
                path = %path.display(),
                size_bytes = part.size_bytes,
                "Wrote archive part"
            );
        }

        let report = &outcome.report;

        // Display summary
        println!();
        println!("📊 Export Summary:");
        println!("  Archive parts: {}", report.part_count());
        println!("  Documents included: {}", report.included);
        println!("  Documents skipped: {}", report.failures.len());
        println!("  Total bytes: {}", report.total_bytes);
        println!("  Duration: {:.2}s", report.duration.as_secs_f64());
        println!();

        for part in &report.parts {
            let marker = if part.oversized { " (oversized)" } else { "" };
            println!(
                "  {} - {} document(s), {} bytes{}",
                part.file_name,
                part.document_ids.len(),
                part.size_bytes,
                marker
            );
        }

        if !report.failures.is_empty() {
            println!();
            println!("⚠️  Skipped documents:");
            for failure in &report.failures {
                let hint = if failure.transient {
                    " (retry may succeed)"
                } else {
                    ""
                };
                println!(
                    "  - {}: {}{}",
                    failure.document_id.as_str(),
                    failure.reason,
                    hint
                );
            }
        }
        println!();

        // Determine exit code
        let exit_code = if report.interrupted {
            println!("⚠️  Export interrupted. No archives were written.");
            tracing::info!("Export interrupted by user signal");
            130 // SIGINT exit code (standard Unix convention)
        } else if report.is_successful() {
            println!("✅ Export completed successfully!");
            0
        } else {
            println!("⚠️  Export completed with skipped documents");
            1 // Partial success
        };

        Ok(exit_code)
    }

    fn parse_ids(&self) -> anyhow::Result<Vec<DocumentId>> {
        let raw = self.id.as_deref().unwrap_or_default();
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                DocumentId::new(s).map_err(|e| anyhow::anyhow!("Invalid document id '{s}': {e}"))
            })
            .collect()
    }
}
