//! Mixed-type arithmetic and the promotion lattice

use super::helpers::*;
use crate::{Value, ValueError, ValueType};
use tally_types::AmountError;

// ============================================================================
// Addition and subtraction
// ============================================================================

#[test]
fn test_amount_plus_balance() {
    let sum = (value("5 USD") + balance_value(&["5 USD", "3 EUR"])).unwrap();
    assert_eq!(sum.value_type(), ValueType::Balance);
    assert_eq!(sum, balance_value(&["10 USD", "3 EUR"]));
}

#[test]
fn test_different_commodities_form_a_balance() {
    let sum = (value("$5") + value("3 EUR")).unwrap();
    assert_eq!(sum.value_type(), ValueType::Balance);
    assert_eq!(sum.as_balance().unwrap().len(), 2);
}

#[test]
fn test_integer_promotes_to_amount() {
    let sum = (Value::from(2) + value("$2.50")).unwrap();
    assert_eq!(sum.value_type(), ValueType::Amount);
    assert_eq!(sum.to_string(), "$4.50");

    let mut total = Value::from(2);
    total.in_place_add(&value("$2.50")).unwrap();
    assert_eq!(total, value("$4.50"));

    let sum = (Value::from(0) + value("$2.50")).unwrap();
    assert_eq!(sum.value_type(), ValueType::Amount);
    assert_eq!(sum.to_string(), "$2.50");
}

#[test]
fn test_integer_minus_equal_amount_is_zero() {
    assert_eq!(Value::from(5), value("$5"));
    let difference = (Value::from(5) - value("$5")).unwrap();
    assert_eq!(difference.value_type(), ValueType::Integer);
    assert_eq!(difference.as_integer(), Ok(0));

    let change = (value("$5") - Value::from(2)).unwrap();
    assert_eq!(change, value("$3"));
}

#[test]
fn test_same_commodity_amounts_stay_amounts() {
    let sum = (value("$10") + value("$2.50")).unwrap();
    assert_eq!(sum.value_type(), ValueType::Amount);
    assert_eq!(sum.to_string(), "$12.50");
}

#[test]
fn test_integer_overflow_is_reported() {
    let result = Value::from(i64::MAX) + Value::from(1);
    assert_eq!(result, Err(ValueError::Overflow("addition")));

    let result = Value::from(i64::MIN) - Value::from(1);
    assert_eq!(result, Err(ValueError::Overflow("subtraction")));
}

#[test]
fn test_string_concatenation() {
    let joined = (Value::string("Assets:") + Value::string("Cash")).unwrap();
    assert_eq!(joined.as_str(), Ok("Assets:Cash"));

    let err = (Value::string("a") - Value::string("b")).unwrap_err();
    assert_eq!(
        err,
        ValueError::UnsupportedOperation {
            op: "subtract",
            left: "a string",
            right: "a string",
        }
    );
    assert!((Value::string("a") + Value::from(1)).is_err());
}

#[test]
fn test_datetime_shifts_by_seconds() {
    let start = Value::from(moment("2024-01-01"));
    let later = (&start + &Value::from(90)).unwrap();
    assert_eq!(later.to_string(), "2024/01/01 00:01:30");

    let commuted = (Value::from(90) + start.clone()).unwrap();
    assert_eq!(commuted, later);

    let earlier = (start.clone() - Value::from(86_400)).unwrap();
    assert_eq!(earlier.as_datetime(), Ok(moment("2023-12-31")));
}

#[test]
fn test_datetime_rejects_other_arithmetic() {
    let start = Value::from(moment("2024-01-01"));
    assert!((start.clone() + start.clone()).is_err());
    assert!((Value::from(1) - start.clone()).is_err());
    assert!((start.clone() * Value::from(2)).is_err());
    assert!((start + value("$1")).is_err());
}

#[test]
fn test_handles_and_sequences_have_no_arithmetic() {
    let seq = Value::from(vec![Value::from(1)]);
    assert!((seq.clone() + Value::from(1)).is_err());
    assert!((seq.clone() + seq).is_err());
    assert!((Value::from(crate::NodeRef(1)) + Value::from(1)).is_err());
    assert!((Value::from(crate::Handle(1)) * Value::from(1)).is_err());
}

// ============================================================================
// Multiplication and division
// ============================================================================

#[test]
fn test_scalars_scale_balances_from_either_side() {
    let total = balance_value(&["$5", "3 EUR"]);
    let expected = balance_value(&["$10", "6 EUR"]);
    assert_eq!((&total * &Value::from(2)).unwrap(), expected);
    assert_eq!((&Value::from(2) * &total).unwrap(), expected);
}

#[test]
fn test_commoditized_factor_on_multi_commodity_balance() {
    let total = balance_value(&["$5", "3 EUR"]);
    let err = (total * value("$2")).unwrap_err();
    assert_eq!(
        err,
        ValueError::Amount(AmountError::MultiCommodityScale { op: "multiply" })
    );
}

#[test]
fn test_balance_times_balance_is_unsupported() {
    let total = balance_value(&["$5", "3 EUR"]);
    let err = (&total * &total).unwrap_err();
    assert_eq!(
        err,
        ValueError::UnsupportedOperation {
            op: "multiply",
            left: "a balance",
            right: "a balance",
        }
    );
}

#[test]
fn test_nothing_divides_by_a_balance() {
    let total = balance_value(&["$5", "3 EUR"]);
    assert!((Value::from(10) / total.clone()).is_err());
    assert!((value("$10") / total).is_err());
}

#[test]
fn test_integer_division_truncates() {
    assert_eq!((Value::from(7) / Value::from(2)).unwrap().as_integer(), Ok(3));
    assert_eq!((Value::from(-7) / Value::from(2)).unwrap().as_integer(), Ok(-3));
}

#[test]
fn test_divide_by_zero() {
    assert_eq!(Value::from(7) / Value::from(0), Err(ValueError::DivideByZero));
    assert_eq!(value("$7") / Value::from(0), Err(ValueError::DivideByZero));
    assert_eq!(
        balance_value(&["$5", "3 EUR"]) / Value::from(0),
        Err(ValueError::DivideByZero)
    );
}

#[test]
fn test_amount_division_keeps_commodity() {
    let share = (value("$10.00") / Value::from(4)).unwrap();
    assert_eq!(share.to_string(), "$2.50");
}

// ============================================================================
// In-place operators
// ============================================================================

#[test]
fn test_in_place_accumulation() {
    let mut total = Value::default();
    for text in ["$5", "3 EUR", "$-5"] {
        total.in_place_add(&value(text)).unwrap();
    }
    assert_eq!(total, value("3 EUR"));

    total.in_place_mul(&Value::from(3)).unwrap();
    total.in_place_div(&Value::from(9)).unwrap();
    assert_eq!(total, value("1 EUR"));
}

#[test]
fn test_failed_operation_leaves_receiver_untouched() {
    let mut text = Value::string("keep");
    assert!(text.in_place_add(&Value::from(1)).is_err());
    assert_eq!(text.as_str(), Ok("keep"));

    let mut count = Value::from(i64::MAX);
    assert!(count.in_place_mul(&Value::from(2)).is_err());
    assert_eq!(count.as_integer(), Ok(i64::MAX));
}

#[test]
fn test_add_amount_with_cost_forms_a_pair() {
    let mut holding = Value::default();
    holding
        .add_amount(&amount("10 AAPL"), Some(&amount("$500")))
        .unwrap();
    assert_eq!(holding.value_type(), ValueType::BalancePair);
    assert_eq!(holding.cost().unwrap(), value("$500"));

    holding
        .add_amount(&amount("5 AAPL"), Some(&amount("$300")))
        .unwrap();
    let pair = holding.as_balance_pair().unwrap();
    assert_eq!(pair.quantity(), &balance(&["15 AAPL"]));
    assert_eq!(holding.cost().unwrap(), value("$800"));
}

#[test]
fn test_add_amount_without_cost_is_plain_addition() {
    let mut total = value("$5");
    total.add_amount(&amount("$2"), None).unwrap();
    assert_eq!(total, value("$7"));

    let mut text = Value::string("x");
    assert!(text.add_amount(&amount("$2"), Some(&amount("$1"))).is_err());
}

// ============================================================================
// Unary operations
// ============================================================================

#[test]
fn test_negation() {
    assert_eq!(Value::from(true).negated().unwrap().as_boolean(), Ok(false));
    assert_eq!((-Value::from(5)).unwrap().as_integer(), Ok(-5));
    assert_eq!((-value("$5")).unwrap(), value("$-5"));
    assert_eq!(
        (-balance_value(&["$5", "3 EUR"])).unwrap(),
        balance_value(&["$-5", "-3 EUR"])
    );
    assert_eq!(Value::from(i64::MIN).negated(), Err(ValueError::Overflow("negation")));
}

#[test]
fn test_negation_undefined() {
    for operand in [
        Value::from(moment("2024-01-01")),
        Value::string("x"),
        Value::sequence(),
        Value::from(crate::NodeRef(0)),
        Value::from(crate::Handle(0)),
    ] {
        assert!(matches!(
            operand.negated(),
            Err(ValueError::UnsupportedUnary { op: "negate", .. })
        ));
    }
}

#[test]
fn test_abs() {
    assert_eq!(Value::from(-4).abs().unwrap().as_integer(), Ok(4));
    assert_eq!(Value::from(true).abs().unwrap().as_boolean(), Ok(true));
    assert_eq!(value("$-5").abs().unwrap(), value("$5"));
    assert!(Value::string("x").abs().is_err());
}

#[test]
fn test_zero_tests() {
    assert_eq!(Value::from(false).is_realzero(), Ok(true));
    assert_eq!(Value::from(true).is_realzero(), Ok(false));
    assert_eq!(Value::from(0).is_realzero(), Ok(true));
    assert!(Value::string("").is_realzero().is_err());
    assert!(Value::sequence().is_zero().is_err());

    let tiny = (value("$0.01") / Value::from(10)).unwrap();
    assert_eq!(tiny.is_realzero(), Ok(false));
    assert_eq!(tiny.is_zero(), Ok(true));
}
