//! The polymorphic value type

use crate::error::ValueError;
use crate::repr::Repr;
use std::fmt;
use std::str::FromStr;
use tally_types::{Amount, Balance, BalancePair, Moment, NaiveDate};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Reference to a node of an externally owned document.
///
/// Values never dereference it; it only carries identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeRef(pub usize);

/// Opaque reference into a caller-owned table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Handle(pub usize);

/// The variant a [`Value`] currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Boolean,
    Integer,
    Datetime,
    Amount,
    Balance,
    BalancePair,
    String,
    XmlNode,
    Pointer,
    Sequence,
}

impl ValueType {
    /// Name used in error messages ("an amount", "a balance pair").
    pub fn label(self) -> &'static str {
        match self {
            ValueType::Boolean => "a boolean",
            ValueType::Integer => "an integer",
            ValueType::Datetime => "a date/time",
            ValueType::Amount => "an amount",
            ValueType::Balance => "a balance",
            ValueType::BalancePair => "a balance pair",
            ValueType::String => "a string",
            ValueType::XmlNode => "an xml node",
            ValueType::Pointer => "a pointer",
            ValueType::Sequence => "a sequence",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A runtime value of the expression evaluator.
///
/// Holds exactly one variant, always in canonical form. The default value is
/// integer `0`. Cloning is deep; [`Value::take`] moves the contents out and
/// leaves integer `0` behind.
#[derive(Debug, Clone, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "Repr", into = "Repr")
)]
pub struct Value {
    repr: Repr,
}

impl Value {
    /// Install `repr` through the canonicalizer.
    pub(crate) fn from_repr(repr: Repr) -> Value {
        Value {
            repr: repr.canonical(),
        }
    }

    pub(crate) fn repr(&self) -> &Repr {
        &self.repr
    }

    pub(crate) fn install(&mut self, repr: Repr) {
        self.repr = repr.canonical();
    }

    /// A string value.
    pub fn string(text: impl Into<String>) -> Value {
        Value {
            repr: Repr::String(text.into()),
        }
    }

    /// An empty sequence.
    pub fn sequence() -> Value {
        Value {
            repr: Repr::Sequence(Vec::new()),
        }
    }

    /// Build a value from source text: with `literal` the text is kept as a
    /// string, otherwise it is parsed as an amount.
    pub fn from_text(text: &str, literal: bool) -> Result<Value, ValueError> {
        if literal {
            Ok(Value::string(text))
        } else {
            text.parse()
        }
    }

    pub fn value_type(&self) -> ValueType {
        self.repr.value_type()
    }

    pub fn is_type(&self, ty: ValueType) -> bool {
        self.value_type() == ty
    }

    pub(crate) fn wrong_type(&self, expected: ValueType) -> ValueError {
        ValueError::WrongType {
            expected: expected.label(),
            got: self.value_type().label(),
        }
    }

    pub fn as_boolean(&self) -> Result<bool, ValueError> {
        match &self.repr {
            Repr::Boolean(b) => Ok(*b),
            _ => Err(self.wrong_type(ValueType::Boolean)),
        }
    }

    pub fn as_integer(&self) -> Result<i64, ValueError> {
        match &self.repr {
            Repr::Integer(n) => Ok(*n),
            _ => Err(self.wrong_type(ValueType::Integer)),
        }
    }

    pub fn as_datetime(&self) -> Result<Moment, ValueError> {
        match &self.repr {
            Repr::Datetime(moment) => Ok(*moment),
            _ => Err(self.wrong_type(ValueType::Datetime)),
        }
    }

    pub fn as_amount(&self) -> Result<&Amount, ValueError> {
        match &self.repr {
            Repr::Amount(amount) => Ok(amount),
            _ => Err(self.wrong_type(ValueType::Amount)),
        }
    }

    pub fn as_balance(&self) -> Result<&Balance, ValueError> {
        match &self.repr {
            Repr::Balance(balance) => Ok(balance),
            _ => Err(self.wrong_type(ValueType::Balance)),
        }
    }

    pub fn as_balance_pair(&self) -> Result<&BalancePair, ValueError> {
        match &self.repr {
            Repr::BalancePair(pair) => Ok(pair),
            _ => Err(self.wrong_type(ValueType::BalancePair)),
        }
    }

    pub fn as_str(&self) -> Result<&str, ValueError> {
        match &self.repr {
            Repr::String(text) => Ok(text),
            _ => Err(self.wrong_type(ValueType::String)),
        }
    }

    pub fn as_string_mut(&mut self) -> Result<&mut String, ValueError> {
        let mismatch = self.wrong_type(ValueType::String);
        match &mut self.repr {
            Repr::String(text) => Ok(text),
            _ => Err(mismatch),
        }
    }

    pub fn as_xml_node(&self) -> Result<NodeRef, ValueError> {
        match &self.repr {
            Repr::XmlNode(node) => Ok(*node),
            _ => Err(self.wrong_type(ValueType::XmlNode)),
        }
    }

    pub fn as_pointer(&self) -> Result<Handle, ValueError> {
        match &self.repr {
            Repr::Pointer(handle) => Ok(*handle),
            _ => Err(self.wrong_type(ValueType::Pointer)),
        }
    }

    pub fn as_sequence(&self) -> Result<&[Value], ValueError> {
        match &self.repr {
            Repr::Sequence(items) => Ok(items),
            _ => Err(self.wrong_type(ValueType::Sequence)),
        }
    }

    pub fn as_sequence_mut(&mut self) -> Result<&mut Vec<Value>, ValueError> {
        let mismatch = self.wrong_type(ValueType::Sequence);
        match &mut self.repr {
            Repr::Sequence(items) => Ok(items),
            _ => Err(mismatch),
        }
    }

    /// Move the contents out, leaving integer `0`.
    pub fn take(&mut self) -> Value {
        std::mem::take(self)
    }

    /// Replace the contents with a copy of `other`.
    pub fn set(&mut self, other: &Value) {
        let same_handle = match (&self.repr, &other.repr) {
            (Repr::XmlNode(a), Repr::XmlNode(b)) => a == b,
            (Repr::Pointer(a), Repr::Pointer(b)) => a == b,
            _ => false,
        };
        if !same_handle {
            self.repr = other.repr.clone();
        }
    }

    /// Back to integer `0`.
    pub fn reset(&mut self) {
        self.repr = Repr::default();
    }

    pub fn set_string(&mut self, text: impl Into<String>) {
        self.repr = Repr::String(text.into());
    }

    /// Re-run canonicalization. A no-op for values built through this API.
    pub fn simplify(&mut self) {
        let repr = std::mem::take(&mut self.repr);
        self.install(repr);
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value {
            repr: Repr::Boolean(value),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value {
            repr: Repr::Integer(value),
        }
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::from(i64::from(value))
    }
}

/// Unsigned quantities may exceed `i64`, so they become amounts.
impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::from(Amount::from(value))
    }
}

impl From<Moment> for Value {
    fn from(moment: Moment) -> Self {
        Value {
            repr: Repr::Datetime(moment),
        }
    }
}

/// A date is its midnight.
impl From<NaiveDate> for Value {
    fn from(date: NaiveDate) -> Self {
        Value::from(Moment::from(date))
    }
}

impl From<Amount> for Value {
    fn from(amount: Amount) -> Self {
        Value::from_repr(Repr::Amount(amount))
    }
}

impl From<Balance> for Value {
    fn from(balance: Balance) -> Self {
        Value::from_repr(Repr::Balance(balance))
    }
}

impl From<BalancePair> for Value {
    fn from(pair: BalancePair) -> Self {
        Value::from_repr(Repr::BalancePair(pair))
    }
}

impl From<NodeRef> for Value {
    fn from(node: NodeRef) -> Self {
        Value {
            repr: Repr::XmlNode(node),
        }
    }
}

impl From<Handle> for Value {
    fn from(handle: Handle) -> Self {
        Value {
            repr: Repr::Pointer(handle),
        }
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value {
            repr: Repr::Sequence(items),
        }
    }
}

impl From<Repr> for Value {
    fn from(repr: Repr) -> Self {
        Value::from_repr(repr)
    }
}

impl From<Value> for Repr {
    fn from(value: Value) -> Self {
        value.repr
    }
}

impl TryFrom<f64> for Value {
    type Error = ValueError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Ok(Value::from(Amount::from_f64(value)?))
    }
}

/// Parses an amount literal such as `$10.00` or `5 EUR {$1.10}`.
impl FromStr for Value {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount: Amount = s.parse()?;
        Ok(Value::from(amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_integer_zero() {
        let value = Value::default();
        assert_eq!(value.value_type(), ValueType::Integer);
        assert_eq!(value.as_integer(), Ok(0));
    }

    #[test]
    fn test_accessor_mismatch_is_an_error() {
        let value = Value::from(true);
        assert_eq!(
            value.as_integer(),
            Err(ValueError::WrongType {
                expected: "an integer",
                got: "a boolean",
            })
        );
        assert!(value.as_amount().is_err());
        assert_eq!(value.as_boolean(), Ok(true));
    }

    #[test]
    fn test_from_text() {
        let literal = Value::from_text("$10", true).unwrap();
        assert_eq!(literal.as_str(), Ok("$10"));

        let parsed = Value::from_text("$10", false).unwrap();
        assert_eq!(parsed.value_type(), ValueType::Amount);

        assert!(Value::from_text("$", false).is_err());
    }

    #[test]
    fn test_unsigned_becomes_amount() {
        let value = Value::from(u64::MAX);
        assert_eq!(value.value_type(), ValueType::Amount);
        assert_eq!(Value::from(0u64).value_type(), ValueType::Integer);
    }

    #[test]
    fn test_labels() {
        assert_eq!(ValueType::BalancePair.label(), "a balance pair");
        assert_eq!(ValueType::XmlNode.to_string(), "an xml node");
    }
}
