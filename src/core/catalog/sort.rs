//! Catalog ordering
//!
//! Sorting defines the view order, and the view order is what the archive
//! batcher packs in. Ties always break on the document identifier ascending,
//! so two runs over the same snapshot produce the same sequence of parts.

use crate::domain::{DocumentRecord, SortDirection, SortField, SortSpec};
use deunicode::deunicode;
use std::cmp::Ordering;

fn fold(s: &str) -> String {
    deunicode(s).to_lowercase()
}

/// Sort a view in place according to the sort specification
///
/// Records without a signature timestamp sort after timestamped records in
/// both directions when ordering by signature date.
pub fn apply_sort(records: &mut [DocumentRecord], spec: &SortSpec) {
    records.sort_by(|a, b| {
        let primary = match spec.field {
            SortField::SignedAt => match (a.signed_at, b.signed_at) {
                (Some(at_a), Some(at_b)) => directed(at_a.cmp(&at_b), spec.direction),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            SortField::Name => directed(
                fold(&a.display_name).cmp(&fold(&b.display_name)),
                spec.direction,
            ),
        };

        primary.then_with(|| a.id.cmp(&b.id))
    });
}

fn directed(ordering: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}
