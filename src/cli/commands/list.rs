//! List command implementation
//!
//! This module implements the `list` command for showing the filtered,
//! ordered document view (or the vault listing) without exporting anything.

use crate::config::load_config;
use crate::core::export::ExportCoordinator;
use clap::Args;
use tokio::sync::watch;

use super::{resolve_vault_scope, FilterArgs, SortArgs};

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// List vaults instead of documents
    #[arg(long)]
    pub vaults: bool,

    #[command(flatten)]
    pub filter: FilterArgs,

    #[command(flatten)]
    pub sort: SortArgs,
}

impl ListArgs {
    /// Execute the list command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting list command");

        let config = load_config(config_path)?;
        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2); // Configuration error exit code
        }

        // The list command never exports, so a shutdown channel that is
        // never signalled is enough.
        let (_tx, shutdown_rx) = watch::channel(false);
        let coordinator = match ExportCoordinator::new(&config, shutdown_rx) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create service client");
                eprintln!("Failed to initialize service client: {e}");
                return Ok(4); // Connection error exit code
            }
        };

        if self.vaults {
            return self.list_vaults(&coordinator).await;
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

        let scope = resolve_vault_scope(&coordinator, self.filter.vault.as_deref()).await?;
        let view = match coordinator.list_documents(scope.as_ref(), &filter, &sort).await {
            Ok(v) => v,
            Err(e) => {
                tracing::error!(error = %e, "Failed to list documents");
                eprintln!("Failed to list documents: {e}");
                return Ok(4);
            }
        };

        if view.is_empty() {
            println!("No documents match the given filters.");
            return Ok(0);
        }

        println!("{} document(s):", view.len());
        println!();
        for record in &view {
            let signed = record
                .signed_at
                .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".to_string());
            let vault = record.vault_name.as_deref().unwrap_or("-");
            println!(
                "  {}  {:16}  {:10}  {}",
                record.id.as_str(),
                signed,
                record.status,
                record.display_name
            );
            if vault != "-" {
                println!("      vault: {vault}");
            }
        }
        println!();

        Ok(0)
    }

    async fn list_vaults(&self, coordinator: &ExportCoordinator) -> anyhow::Result<i32> {
        let vaults = match coordinator.list_vaults().await {
            Ok(v) => v,
            Err(e) => {
                tracing::error!(error = %e, "Failed to list vaults");
                eprintln!("Failed to list vaults: {e}");
                return Ok(4);
            }
        };

        if vaults.is_empty() {
            println!("No vaults visible to the configured credentials.");
            return Ok(0);
        }

        println!("{} vault(s):", vaults.len());
        println!();
        for vault in &vaults {
            println!("  {}  {}", vault.id.as_str(), vault.name);
        }
        println!();

        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_args_defaults() {
        let args = ListArgs {
            vaults: false,
            filter: FilterArgs::default(),
            sort: SortArgs {
                sort: "signed-at".to_string(),
                direction: "desc".to_string(),
            },
        };

        assert!(!args.vaults);
        assert!(args.filter.vault.is_none());
    }
}
