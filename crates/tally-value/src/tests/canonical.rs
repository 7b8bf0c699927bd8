//! Canonical form on every install path

use super::helpers::*;
use crate::{Value, ValueType};
use tally_types::{Amount, Balance, BalancePair};

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_zero_amount_is_integer() {
    let zero = Value::from(amount("$0.00"));
    assert_eq!(zero.value_type(), ValueType::Integer);
    assert_eq!(zero.as_integer(), Ok(0));
}

#[test]
fn test_empty_balance_is_integer() {
    let empty = Value::from(Balance::new());
    assert_eq!(empty.value_type(), ValueType::Integer);
}

#[test]
fn test_single_commodity_balance_is_amount() {
    let single = balance_value(&["$5", "$3"]);
    assert_eq!(single.value_type(), ValueType::Amount);
    assert_eq!(single.as_amount(), Ok(&amount("$8")));
}

#[test]
fn test_multi_commodity_balance_stays() {
    let multi = balance_value(&["$5", "3 EUR"]);
    assert_eq!(multi.value_type(), ValueType::Balance);
    assert_eq!(multi.as_balance().map(Balance::len), Ok(2));
}

#[test]
fn test_balance_pair_without_cost_collapses() {
    let pair = BalancePair::from(balance(&["$5", "3 EUR"]));
    assert_eq!(Value::from(pair).value_type(), ValueType::Balance);

    let pair = BalancePair::from(amount("$5"));
    assert_eq!(Value::from(pair).value_type(), ValueType::Amount);

    let pair = BalancePair::from(Amount::from(0i64));
    assert_eq!(Value::from(pair).value_type(), ValueType::Integer);
}

#[test]
fn test_balance_pair_with_zero_cost_collapses() {
    let pair = BalancePair::with_cost(balance(&["10 AAPL"]), Balance::new());
    assert_eq!(Value::from(pair), value("10 AAPL"));

    let mut holding = Value::default();
    holding
        .add_amount(&amount("10 AAPL"), Some(&amount("$0")))
        .unwrap();
    assert_eq!(holding.value_type(), ValueType::Amount);
    assert_eq!(holding, value("10 AAPL"));
}

#[test]
fn test_balance_pair_with_cost_stays() {
    let pair = BalancePair::with_cost(balance(&["10 AAPL"]), balance(&["$500"]));
    assert_eq!(Value::from(pair).value_type(), ValueType::BalancePair);
}

// ============================================================================
// Arithmetic results
// ============================================================================

#[test]
fn test_cancelling_amounts_give_integer_zero() {
    let result = (value("5 USD") - value("5 USD")).unwrap();
    assert_eq!(result.value_type(), ValueType::Integer);
    assert_eq!(result.as_integer(), Ok(0));
}

#[test]
fn test_balance_collapses_after_subtraction() {
    let mut total = balance_value(&["$5", "3 EUR"]);
    total.in_place_sub(&value("3 EUR")).unwrap();
    assert_eq!(total.value_type(), ValueType::Amount);
    assert_eq!(total, value("$5"));

    total.in_place_sub(&value("$5")).unwrap();
    assert_eq!(total.value_type(), ValueType::Integer);
}

#[test]
fn test_scaling_by_zero_gives_integer_zero() {
    let total = (balance_value(&["$5", "3 EUR"]) * Value::from(0)).unwrap();
    assert_eq!(total.value_type(), ValueType::Integer);
}

// ============================================================================
// Casts and simplify
// ============================================================================

#[test]
fn test_widening_casts_are_observed_canonical() {
    let widened = Value::from(7).cast(ValueType::Balance).unwrap();
    assert_eq!(widened.value_type(), ValueType::Amount);

    let zero = Value::from(0).cast(ValueType::Amount).unwrap();
    assert_eq!(zero.value_type(), ValueType::Integer);
}

#[test]
fn test_simplify_is_idempotent() {
    let mut multi = balance_value(&["$5", "3 EUR"]);
    let before = multi.clone();
    multi.simplify();
    multi.simplify();
    assert_eq!(multi.value_type(), ValueType::Balance);
    assert_eq!(multi, before);
}

// ============================================================================
// Deserialization
// ============================================================================

#[cfg(feature = "serde")]
#[test]
fn test_deserialize_canonicalizes() {
    let dollars = serde_json::to_value(value("$5")).unwrap();
    let entry = dollars["Amount"].clone();
    let single = serde_json::json!({ "Balance": [entry] });

    let restored: Value = serde_json::from_value(single).unwrap();
    assert_eq!(restored.value_type(), ValueType::Amount);
    assert_eq!(restored, value("$5"));
}

#[cfg(feature = "serde")]
#[test]
fn test_serde_round_trip_keeps_balance() {
    let multi = balance_value(&["$5", "3 EUR"]);
    let json = serde_json::to_string(&multi).unwrap();
    let restored: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.value_type(), ValueType::Balance);
    assert_eq!(restored, multi);
}
