//! Case-insensitive search over catalogue records.
//!
//! Mirrors the behaviour of the list pages: a term matches when the
//! lower-cased title or grouping label contains the lower-cased term. An
//! empty term matches everything, and filtering preserves source order.

use crate::domain::record::CatalogueRecord;

/// True when `record` should stay visible for `term`.
///
/// Both sides are lower-cased with Unicode-aware mappings, so `TEMPLE`,
/// `temple` and `Temple` are interchangeable, as are accented forms like
/// `Über` and `über`.
#[must_use]
pub fn matches(record: &impl CatalogueRecord, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    record.title().to_lowercase().contains(&needle)
        || record.category().to_lowercase().contains(&needle)
}

/// Filter `records` down to those matching `term`, preserving order.
///
/// # Examples
///
/// ```
/// use client::domain::record::{Activity, RecordId};
/// use client::domain::search;
///
/// let surfing = Activity {
///     id: RecordId::from(1_u64),
///     title: "Surfing".to_owned(),
///     category: "Water Sports".to_owned(),
///     description: String::new(),
///     image: String::new(),
/// };
/// let kept = search::filter(&[surfing.clone()], "water");
/// assert_eq!(kept, vec![surfing]);
/// ```
#[must_use]
pub fn filter<R: CatalogueRecord>(records: &[R], term: &str) -> Vec<R> {
    records
        .iter()
        .filter(|record| matches(*record, term))
        .cloned()
        .collect()
}
