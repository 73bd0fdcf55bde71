//! Property-based tests for recipient-set computation.

use proptest::prelude::*;
use std::collections::HashSet;

use procura_shared::is_valid_record_id;

use super::recipients::deliverable_recipients;

fn candidate_id() -> impl Strategy<Value = String> {
    prop_oneof![
        // Plausible backend ids
        "[a-z0-9]{15}",
        // Malformed references the guard must drop
        Just(String::new()),
        Just("0".to_string()),
        "[a-z0-9]{1,5}",
    ]
}

proptest! {
    /// The finalized set never contains the excluded actor, duplicates,
    /// or malformed ids.
    #[test]
    fn prop_finalized_set_is_clean(
        candidates in prop::collection::vec(candidate_id(), 0..20),
        exclude in candidate_id(),
    ) {
        let recipients = deliverable_recipients(candidates.clone(), Some(&exclude));

        let unique: HashSet<&String> = recipients.iter().collect();
        prop_assert_eq!(unique.len(), recipients.len());
        prop_assert!(!recipients.iter().any(|id| *id == exclude));
        prop_assert!(recipients.iter().all(|id| is_valid_record_id(id)));
    }

    /// Every finalized recipient came from the candidate list.
    #[test]
    fn prop_no_invented_recipients(
        candidates in prop::collection::vec(candidate_id(), 0..20),
    ) {
        let recipients = deliverable_recipients(candidates.clone(), None);
        prop_assert!(recipients.iter().all(|id| candidates.contains(id)));
    }
}
