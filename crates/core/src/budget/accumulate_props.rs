//! Property-based tests for withdrawal accumulation.

use proptest::prelude::*;
use rust_decimal::Decimal;
use serde_json::json;

use procura_store::records::{PrItemRecord, ProjectItemRecord, PurchaseRequestRecord};

use super::accumulate::{WithdrawalLedger, compute_stats};

fn pr() -> PurchaseRequestRecord {
    PurchaseRequestRecord::from_value(&json!({
        "id": "pr0000000000001",
        "pr_number": "PR-1"
    }))
}

fn item(planned_ref: &str, quantity: i64, unit_price: i64) -> PrItemRecord {
    PrItemRecord::from_value(&json!({
        "id": "it0000000000001",
        "pr": "pr0000000000001",
        "project_item": planned_ref,
        "quantity": quantity,
        "unit_price": unit_price
    }))
}

fn planned(id: &str) -> ProjectItemRecord {
    ProjectItemRecord::from_value(&json!({
        "id": id,
        "project": "pj0000000000001",
        "name": "item",
        "quantity": "0",
        "unit_price": "0",
        "total_price": "100000"
    }))
}

proptest! {
    /// The displayed withdrawn total is always reconstructible from the
    /// displayed detail breakdown, and the quantity sum matches the
    /// recorded items.
    #[test]
    fn prop_totals_reconstructible_from_details(
        lines in prop::collection::vec((1i64..1000, 1i64..1000), 0..20),
    ) {
        let mut ledger = WithdrawalLedger::new();
        for (quantity, unit_price) in &lines {
            ledger.record_regular(&pr(), &item("pi1", *quantity, *unit_price));
        }
        let (planned_items, _, total_reserve) = ledger.into_parts(vec![planned("pi1")]);
        let p = &planned_items[0];

        let expected_quantity: Decimal =
            lines.iter().map(|(q, _)| Decimal::from(*q)).sum();
        let expected_total: Decimal = lines
            .iter()
            .map(|(q, u)| Decimal::from(*q) * Decimal::from(*u))
            .sum();

        prop_assert_eq!(p.withdrawn_quantity, expected_quantity);
        prop_assert_eq!(p.withdrawn_total(), expected_total);

        let stats = compute_stats(&planned_items, total_reserve);
        prop_assert_eq!(stats.total_withdrawn, expected_total);
        prop_assert_eq!(stats.remaining, stats.total_planned - stats.total_withdrawn);
    }

    /// Reserve accumulation never leaks into planned-item withdrawals.
    #[test]
    fn prop_reserve_isolated_from_withdrawals(
        reserves in prop::collection::vec((1i64..1000, 1i64..1000), 0..20),
    ) {
        let mut ledger = WithdrawalLedger::new();
        for (quantity, unit_price) in &reserves {
            ledger.record_reserve(&pr(), &item("pi1", *quantity, *unit_price));
        }
        let (planned_items, reserve_items, total_reserve) =
            ledger.into_parts(vec![planned("pi1")]);

        prop_assert_eq!(planned_items[0].withdrawn_quantity, Decimal::ZERO);
        prop_assert!(planned_items[0].withdrawals.is_empty());
        prop_assert_eq!(reserve_items.len(), reserves.len());

        let expected: Decimal = reserves
            .iter()
            .map(|(q, u)| Decimal::from(*q) * Decimal::from(*u))
            .sum();
        prop_assert_eq!(total_reserve, expected);
    }
}
