//! Three-way comparison and equality

use super::helpers::*;
use crate::{Handle, NodeRef, Value, ValueError};
use std::cmp::Ordering;
use tally_types::Amount;

#[test]
fn test_integer_equals_plain_amount() {
    for n in [-3i64, 1, 250] {
        assert_eq!(Value::from(n), Value::from(Amount::from(n)));
        assert_ne!(Value::from(n), Value::from(Amount::from(n + 1)));
    }
}

#[test]
fn test_plain_number_compares_with_any_commodity() {
    assert_eq!(Value::from(5).compare(&value("$5")), Ok(Ordering::Equal));
    assert_eq!(Value::from(4).compare(&value("5 EUR")), Ok(Ordering::Less));
}

#[test]
fn test_amount_ordering() {
    assert!(value("$5") < value("$7.50"));
    assert!(value("$-1") < Value::from(0));
    assert!(matches!(
        value("$5").compare(&value("5 EUR")),
        Err(ValueError::Incomparable { .. })
    ));
}

#[test]
fn test_balance_ordering_by_sign_of_difference() {
    let small = balance_value(&["$5", "3 EUR"]);
    let large = balance_value(&["$6", "4 EUR"]);
    let mixed = balance_value(&["$4", "9 EUR"]);

    assert_eq!(small.compare(&small.clone()), Ok(Ordering::Equal));
    assert!(small < large);
    assert!(large > small);
    assert!(Value::from(0) < small);

    assert!(small.compare(&mixed).is_err());
    assert!(!(small < mixed) && !(small > mixed) && small != mixed);
}

#[test]
fn test_amount_against_balance() {
    let total = balance_value(&["$5", "3 EUR"]);
    assert!(value("$6").compare(&total).is_err());
    assert_eq!(value("$1").compare(&total), Ok(Ordering::Less));
    assert_eq!(
        value("$5").compare(&(&total - &value("3 EUR")).unwrap()),
        Ok(Ordering::Equal)
    );
}

#[test]
fn test_booleans_compare_as_integers() {
    assert_eq!(Value::from(true), Value::from(1));
    assert!(Value::from(false) < Value::from(true));
    assert!(Value::from(true) < Value::from(2));
}

#[test]
fn test_datetime_only_with_datetime() {
    let earlier = Value::from(moment("2024-01-01"));
    let later = Value::from(moment("2024-06-01 12:00:00"));
    assert!(earlier < later);
    assert!(earlier.compare(&Value::from(0)).is_err());
    assert!(Value::from(0).compare(&earlier).is_err());
}

#[test]
fn test_strings_compare_lexicographically() {
    assert!(Value::string("Assets") < Value::string("Expenses"));
    assert_eq!(Value::string("x"), Value::string("x"));
    assert!(Value::string("1").compare(&Value::from(1)).is_err());
}

#[test]
fn test_sequences_compare_element_wise() {
    let seq = |items: &[i64]| Value::from(items.iter().map(|n| Value::from(*n)).collect::<Vec<_>>());
    assert!(seq(&[1, 2]) < seq(&[1, 3]));
    assert!(seq(&[1, 2]) < seq(&[1, 2, 0]));
    assert_eq!(seq(&[1, 2]), seq(&[1, 2]));
    assert_eq!(seq(&[]).compare(&seq(&[])), Ok(Ordering::Equal));

    let strings = Value::from(vec![Value::string("a")]);
    assert!(seq(&[1]).compare(&strings).is_err());
    assert!(seq(&[1]).compare(&Value::from(1)).is_err());
}

#[test]
fn test_handles_compare_by_identity() {
    assert_eq!(Value::from(NodeRef(3)), Value::from(NodeRef(3)));
    assert_ne!(Value::from(NodeRef(3)), Value::from(NodeRef(4)));
    assert_eq!(Value::from(Handle(1)), Value::from(Handle(1)));
    assert!(Value::from(NodeRef(1)).compare(&Value::from(Handle(1))).is_err());
}

#[test]
fn test_try_eq_reports_incomparable() {
    assert_eq!(value("$5").try_eq(&value("$5.00")), Ok(true));
    assert!(value("$5").try_eq(&value("5 EUR")).is_err());
    assert!(value("$5") != value("5 EUR"));
}
