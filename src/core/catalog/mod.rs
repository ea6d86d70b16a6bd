//! Catalog view pipeline
//!
//! Pure functions from a catalog snapshot to the ordered view the user sees
//! and exports from. No I/O happens here; the same inputs always produce the
//! same view, which is what makes archive packing reproducible run-to-run.

pub mod filter;
pub mod selection;
pub mod sort;

pub use filter::apply_filter;
pub use selection::resolve_selection;
pub use sort::apply_sort;

use crate::domain::errors::ValidationError;
use crate::domain::{DocumentRecord, FilterSpec, SortSpec};

/// Build the ordered view for a catalog snapshot
///
/// Validates the filter, applies every predicate, then sorts with the
/// identifier tiebreak. An empty result is a valid view, not an error.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidDateRange`] for an inverted date range,
/// before the catalog is touched.
pub fn build_view(
    catalog: &[DocumentRecord],
    filter: &FilterSpec,
    sort: &SortSpec,
) -> Result<Vec<DocumentRecord>, ValidationError> {
    let mut view = apply_filter(catalog, filter)?;
    apply_sort(&mut view, sort);
    Ok(view)
}
