//! CLI command implementations
//!
//! This module contains all CLI command implementations plus the filter and
//! sort arguments shared between `list` and `export`.

pub mod export;
pub mod init;
pub mod list;
pub mod validate;

use crate::domain::{
    DateRange, DocumentStatus, FilterSpec, SortDirection, SortField, SortSpec, VaultId,
};
use chrono::NaiveDate;
use clap::Args;

/// Filter arguments shared between `list` and `export`
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Restrict to one vault (id or name)
    #[arg(long)]
    pub vault: Option<String>,

    /// Case- and accent-insensitive name substring
    #[arg(long)]
    pub name: Option<String>,

    /// Status filter (finalized, pending, canceled); defaults to finalized
    #[arg(long)]
    pub status: Option<String>,

    /// Earliest signature date, inclusive (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub signed_from: Option<String>,

    /// Latest signature date, inclusive (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub signed_to: Option<String>,
}

/// Sort arguments shared between `list` and `export`
#[derive(Args, Debug, Default)]
pub struct SortArgs {
    /// Sort field (signed-at or name)
    #[arg(long, default_value = "signed-at")]
    pub sort: String,

    /// Sort direction (asc or desc)
    #[arg(long, default_value = "desc")]
    pub direction: String,
}

fn parse_date(value: &str, flag: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| anyhow::anyhow!("Invalid {flag} date '{value}': {e} (expected YYYY-MM-DD)"))
}

impl FilterArgs {
    /// Build the filter specification from the CLI flags
    ///
    /// # Errors
    ///
    /// Returns an error for unparseable dates. Range validation (start after
    /// end) happens in the core pipeline.
    pub fn to_filter_spec(&self) -> anyhow::Result<FilterSpec> {
        let start = self
            .signed_from
            .as_deref()
            .map(|v| parse_date(v, "--signed-from"))
            .transpose()?;
        let end = self
            .signed_to
            .as_deref()
            .map(|v| parse_date(v, "--signed-to"))
            .transpose()?;

        Ok(FilterSpec {
            name_contains: self.name.clone(),
            status: self.status.as_deref().map(DocumentStatus::from_service_label),
            vault: self.vault.clone(),
            signed: DateRange { start, end },
        })
    }
}

/// Resolve the `--vault` flag against the service's vault listing
///
/// Matches the flag against vault ids exactly and against vault names
/// case- and accent-insensitively. Returns `None` when the flag is unset or
/// matches nothing, in which case the filter predicate still applies against
/// the unscoped catalog.
pub async fn resolve_vault_scope(
    coordinator: &crate::core::export::ExportCoordinator,
    flag: Option<&str>,
) -> anyhow::Result<Option<VaultId>> {
    let Some(flag) = flag else {
        return Ok(None);
    };

    let vaults = coordinator.list_vaults().await?;
    let folded = deunicode::deunicode(flag).to_lowercase();

    Ok(vaults
        .iter()
        .find(|v| v.id.as_str() == flag || deunicode::deunicode(&v.name).to_lowercase() == folded)
        .map(|v| v.id.clone()))
}

impl SortArgs {
    /// Build the sort specification from the CLI flags
    ///
    /// # Errors
    ///
    /// Returns an error for unknown field or direction names.
    pub fn to_sort_spec(&self) -> anyhow::Result<SortSpec> {
        let field = match self.sort.to_lowercase().as_str() {
            "signed-at" | "signed_at" | "date" => SortField::SignedAt,
            "name" => SortField::Name,
            other => anyhow::bail!("Invalid --sort '{other}'. Use 'signed-at' or 'name'"),
        };

        let direction = match self.direction.to_lowercase().as_str() {
            "asc" | "ascending" => SortDirection::Ascending,
            "desc" | "descending" => SortDirection::Descending,
            other => anyhow::bail!("Invalid --direction '{other}'. Use 'asc' or 'desc'"),
        };

        Ok(SortSpec { field, direction })
    }
}
