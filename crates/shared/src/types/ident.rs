//! Record-identifier validity guard.

/// Minimum length of a plausible backend record identifier.
///
/// The backend assigns opaque identifiers well above this length; anything
/// shorter is a malformed reference (a placeholder, a truncated value, or a
/// legacy "0" sentinel) and must never be used as a notification recipient.
const MIN_RECORD_ID_LEN: usize = 6;

/// Returns true if `id` looks like a real backend record identifier.
///
/// Rejects the empty string, the literal `"0"` sentinel, and anything
/// shorter than [`MIN_RECORD_ID_LEN`] characters. This is a defensive guard
/// against malformed references, not a schema-enforced constraint.
#[must_use]
pub fn is_valid_record_id(id: &str) -> bool {
    !id.is_empty() && id != "0" && id.len() >= MIN_RECORD_ID_LEN
}
