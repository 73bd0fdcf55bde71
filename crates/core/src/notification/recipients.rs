//! Pure recipient-set computation.
//!
//! Routing collects candidate user ids from role lists (and sometimes the
//! requester), then finalizes the set here: malformed ids are dropped, an
//! excluded actor is removed, and duplicates collapse while preserving
//! first-seen order.

use std::collections::HashSet;

use procura_shared::is_valid_record_id;

/// Finalizes a candidate recipient list into a deliverable one.
///
/// - drops ids failing the record-id validity guard
/// - drops `exclude` (the actor who triggered the event), when given
/// - deduplicates, keeping the first occurrence's position
#[must_use]
pub fn deliverable_recipients<I>(candidates: I, exclude: Option<&str>) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|id| is_valid_record_id(id))
        .filter(|id| exclude != Some(id.as_str()))
        .filter(|id| seen.insert(id.clone()))
        .collect()
}
