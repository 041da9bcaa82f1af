//! Payout lookup tests.

use reelsim_core::{
    error::SimError,
    paytable::{PayoutTable, PayoutWarning},
};
use std::collections::HashMap;

fn table() -> PayoutTable {
    PayoutTable::from_pairs([("A", vec![0, 0, 50, 100, 250]), ("WW", vec![0, 0, 20])]).unwrap()
}

#[test]
fn lookup_indexes_by_match_count() {
    let table = table();
    let mut warnings = Vec::new();
    assert_eq!(table.payout_for("A", 3, &mut warnings), 50);
    assert_eq!(table.payout_for("A", 5, &mut warnings), 250);
    assert_eq!(table.payout_for("A", 1, &mut warnings), 0);
    assert!(warnings.is_empty(), "in-range lookups must not warn");
}

#[test]
fn unknown_symbol_pays_zero_with_warning() {
    let mut warnings = Vec::new();
    assert_eq!(table().payout_for("Z", 3, &mut warnings), 0);
    assert_eq!(warnings, vec![PayoutWarning::UnknownSymbol { symbol: "Z".into() }]);
}

#[test]
fn out_of_range_counts_pay_zero_with_warning() {
    let table = table();
    let mut warnings = Vec::new();
    assert_eq!(table.payout_for("A", 0, &mut warnings), 0);
    assert_eq!(table.payout_for("WW", 4, &mut warnings), 0);
    assert_eq!(
        warnings,
        vec![
            PayoutWarning::MatchCountOutOfRange { symbol: "A".into(), count: 0, max: 5 },
            PayoutWarning::MatchCountOutOfRange { symbol: "WW".into(), count: 4, max: 3 },
        ]
    );
}

#[test]
fn strict_lookup_reports_the_reason() {
    let table = table();
    assert_eq!(table.lookup("A", 4), Ok(100));
    assert!(matches!(table.lookup("B", 3), Err(PayoutWarning::UnknownSymbol { .. })));
}

#[test]
fn empty_table_is_rejected() {
    let err = PayoutTable::new(HashMap::new()).unwrap_err();
    assert!(matches!(err, SimError::EmptyPayoutTable));
}

#[test]
fn warnings_serialize_with_a_kind_tag() {
    let warning = PayoutWarning::MatchCountOutOfRange { symbol: "A".into(), count: 9, max: 5 };
    let json = serde_json::to_value(&warning).unwrap();
    assert_eq!(json["kind"], "match_count_out_of_range");
    assert_eq!(json["count"], 9);
}
