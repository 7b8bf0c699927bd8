//! Helper functions and common imports for the value tests.

use crate::Value;
use tally_types::{parse_moment, Amount, Balance, Moment};

/// Parse an amount literal
pub fn amount(text: &str) -> Amount {
    text.parse().unwrap()
}

/// Parse an amount literal straight into a value
pub fn value(text: &str) -> Value {
    text.parse().unwrap()
}

pub fn balance(items: &[&str]) -> Balance {
    let amounts: Vec<Amount> = items.iter().map(|text| amount(text)).collect();
    Balance::try_from(amounts).unwrap()
}

pub fn balance_value(items: &[&str]) -> Value {
    Value::from(balance(items))
}

pub fn moment(text: &str) -> Moment {
    parse_moment(text).unwrap()
}

/// Render through `Value::print`
pub fn printed(value: &Value, first_width: usize, latter_width: Option<usize>) -> String {
    let mut out = Vec::new();
    value.print(&mut out, first_width, latter_width).unwrap();
    String::from_utf8(out).unwrap()
}
