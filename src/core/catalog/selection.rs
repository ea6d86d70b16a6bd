//! Selection resolution
//!
//! Maps a user selection onto the current view. Resolution is all-or-nothing:
//! one identifier outside the view fails the whole selection, and no remote
//! call happens afterwards.

use crate::domain::errors::ValidationError;
use crate::domain::{DocumentRecord, Selection};
use std::collections::HashSet;

/// Resolve a selection against an ordered view
///
/// The resolved records come back in view order regardless of the order the
/// identifiers were supplied in, which keeps archive packing deterministic.
///
/// # Errors
///
/// Returns [`ValidationError::DocumentNotInView`] naming the first selected
/// identifier that is not part of the view.
pub fn resolve_selection(
    view: &[DocumentRecord],
    selection: &Selection,
) -> Result<Vec<DocumentRecord>, ValidationError> {
    let view_ids: HashSet<&str> = view.iter().map(|r| r.id.as_str()).collect();

    for id in selection.ids() {
        if !view_ids.contains(id.as_str()) {
            return Err(ValidationError::DocumentNotInView(id.clone()));
        }
    }

    Ok(view
        .iter()
        .filter(|record| selection.contains(&record.id))
        .cloned()
        .collect())
}
