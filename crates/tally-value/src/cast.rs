//! Conversions between variants

use crate::error::ValueError;
use crate::ops::Numeric;
use crate::repr::Repr;
use crate::value::{Value, ValueType};
use tally_types::{
    format_moment, from_timestamp, parse_moment, timestamp, Amount, Balance, BalancePair, Moment,
};

impl Value {
    /// Convert to `target`. The result is canonical, so a widening cast of a
    /// simple value (integer to balance, say) may come back in its narrower form.
    pub fn cast(&self, target: ValueType) -> Result<Value, ValueError> {
        if self.value_type() == target {
            return Ok(self.clone());
        }
        let repr = match target {
            ValueType::Boolean => Repr::Boolean(self.to_bool()),
            ValueType::Integer => Repr::Integer(self.to_integer()?),
            ValueType::Datetime => Repr::Datetime(self.to_datetime()?),
            ValueType::Amount => Repr::Amount(self.to_amount()?),
            ValueType::Balance => Repr::Balance(self.to_balance()?),
            ValueType::BalancePair => match self.repr() {
                Repr::String(text) => {
                    Repr::BalancePair(BalancePair::from(self.parse_amount(text, target)?))
                }
                repr => Repr::BalancePair(
                    Numeric::of(repr)
                        .ok_or_else(|| self.bad_cast(target, "not a numeric value"))?
                        .into_balance_pair(),
                ),
            },
            ValueType::String => Repr::String(self.to_text()?),
            ValueType::Sequence => Repr::Sequence(vec![self.clone()]),
            ValueType::XmlNode | ValueType::Pointer => {
                return Err(self.bad_cast(target, "handles are only created by their owner"))
            }
        };
        Ok(Value::from_repr(repr))
    }

    pub fn in_place_cast(&mut self, target: ValueType) -> Result<(), ValueError> {
        *self = self.cast(target)?;
        Ok(())
    }

    /// Truthiness: non-zero numbers, non-empty strings, sequences with a true
    /// element. Dates and handles are always true.
    pub fn to_bool(&self) -> bool {
        match self.repr() {
            Repr::Boolean(b) => *b,
            Repr::Integer(n) => *n != 0,
            Repr::Datetime(_) => true,
            Repr::Amount(amount) => !amount.is_zero(),
            Repr::Balance(balance) => !balance.is_zero(),
            Repr::BalancePair(pair) => !pair.is_zero(),
            Repr::String(text) => !text.is_empty(),
            Repr::XmlNode(_) | Repr::Pointer(_) => true,
            Repr::Sequence(items) => items.iter().any(Value::to_bool),
        }
    }

    fn bad_cast(&self, to: ValueType, reason: impl Into<String>) -> ValueError {
        ValueError::BadCast {
            from: self.value_type().label(),
            to: to.label(),
            reason: reason.into(),
        }
    }

    fn parse_amount(&self, text: &str, to: ValueType) -> Result<Amount, ValueError> {
        text.parse::<Amount>()
            .map_err(|err| self.bad_cast(to, err.to_string()))
    }

    fn to_integer(&self) -> Result<i64, ValueError> {
        let to = ValueType::Integer;
        match self.repr() {
            Repr::Boolean(b) => Ok(i64::from(*b)),
            Repr::Integer(n) => Ok(*n),
            Repr::Datetime(moment) => Ok(timestamp(moment)),
            Repr::Amount(amount) => amount
                .to_i64()
                .ok_or_else(|| self.bad_cast(to, "quantity out of range")),
            Repr::BalancePair(pair) => match pair.quantity().single_amount() {
                Some(amount) => amount
                    .to_i64()
                    .ok_or_else(|| self.bad_cast(to, "quantity out of range")),
                None if pair.quantity().is_empty() => Ok(0),
                None => Err(self.bad_cast(to, "holds several commodities")),
            },
            Repr::Balance(_) => Err(self.bad_cast(to, "holds several commodities")),
            Repr::String(text) => text
                .trim()
                .parse()
                .map_err(|_| self.bad_cast(to, format!("'{}' is not an integer", text))),
            _ => Err(self.bad_cast(to, "no integer form")),
        }
    }

    fn to_datetime(&self) -> Result<Moment, ValueError> {
        let to = ValueType::Datetime;
        match self.repr() {
            Repr::Datetime(moment) => Ok(*moment),
            Repr::Integer(seconds) => {
                from_timestamp(*seconds).ok_or_else(|| self.bad_cast(to, "timestamp out of range"))
            }
            Repr::String(text) => {
                parse_moment(text).map_err(|err| self.bad_cast(to, err.to_string()))
            }
            _ => Err(self.bad_cast(to, "no date/time form")),
        }
    }

    fn to_amount(&self) -> Result<Amount, ValueError> {
        let to = ValueType::Amount;
        match self.repr() {
            Repr::Boolean(b) => Ok(Amount::from(i64::from(*b))),
            Repr::Integer(n) => Ok(Amount::from(*n)),
            Repr::Amount(amount) => Ok(amount.clone()),
            Repr::Balance(_) => Err(self.bad_cast(to, "holds several commodities")),
            Repr::BalancePair(pair) => match pair.quantity().single_amount() {
                Some(amount) => Ok(amount.clone()),
                None if pair.quantity().is_empty() => Ok(Amount::from(0i64)),
                None => Err(self.bad_cast(to, "holds several commodities")),
            },
            Repr::String(text) => self.parse_amount(text, to),
            _ => Err(self.bad_cast(to, "not a numeric value")),
        }
    }

    fn to_balance(&self) -> Result<Balance, ValueError> {
        let to = ValueType::Balance;
        match self.repr() {
            Repr::BalancePair(pair) => Ok(pair.quantity().clone()),
            Repr::String(text) => Ok(Balance::from(self.parse_amount(text, to)?)),
            repr => Numeric::of(repr)
                .and_then(Numeric::into_balance)
                .ok_or_else(|| self.bad_cast(to, "not a numeric value")),
        }
    }

    fn to_text(&self) -> Result<String, ValueError> {
        match self.repr() {
            Repr::Datetime(moment) => Ok(format_moment(moment)),
            Repr::XmlNode(_) | Repr::Pointer(_) | Repr::Sequence(_) => {
                Err(self.bad_cast(ValueType::String, "no textual form"))
            }
            _ => Ok(self.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widening_cast_comes_back_canonical() {
        let five = Value::from(5);
        let balance = five.cast(ValueType::Balance).unwrap();
        assert_eq!(balance.value_type(), ValueType::Amount);
        assert_eq!(balance, five);
    }

    #[test]
    fn test_string_round_trip() {
        let text = Value::string(" 42 ");
        assert_eq!(text.cast(ValueType::Integer).unwrap().as_integer(), Ok(42));
        assert!(Value::string("forty").cast(ValueType::Integer).is_err());
    }

    #[test]
    fn test_handles_do_not_cast() {
        let node = Value::from(crate::NodeRef(3));
        assert!(node.cast(ValueType::String).is_err());
        assert!(Value::from(1).cast(ValueType::Pointer).is_err());
        assert!(node.to_bool());
    }
}
