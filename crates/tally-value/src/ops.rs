//! Arithmetic and the promotion lattice

use crate::error::ValueError;
use crate::repr::Repr;
use crate::value::{Value, ValueType};
use std::ops::{Add, Div, Mul, Neg, Sub};
use tally_types::{add_seconds, Amount, Balance, BalancePair, Moment};
use tracing::trace;

/// An operand lifted onto the numeric lattice
/// `Integer < Amount < Balance < BalancePair`. Booleans enter as `0`/`1`.
#[derive(Debug, Clone)]
pub(crate) enum Numeric {
    Integer(i64),
    Amount(Amount),
    Balance(Balance),
    BalancePair(BalancePair),
}

impl Numeric {
    pub(crate) fn of(repr: &Repr) -> Option<Numeric> {
        match repr {
            Repr::Boolean(b) => Some(Numeric::Integer(i64::from(*b))),
            Repr::Integer(n) => Some(Numeric::Integer(*n)),
            Repr::Amount(amount) => Some(Numeric::Amount(amount.clone())),
            Repr::Balance(balance) => Some(Numeric::Balance(balance.clone())),
            Repr::BalancePair(pair) => Some(Numeric::BalancePair(pair.clone())),
            _ => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Numeric::Integer(_) => 0,
            Numeric::Amount(_) => 1,
            Numeric::Balance(_) => 2,
            Numeric::BalancePair(_) => 3,
        }
    }

    fn label(&self) -> &'static str {
        let ty = match self {
            Numeric::Integer(_) => ValueType::Integer,
            Numeric::Amount(_) => ValueType::Amount,
            Numeric::Balance(_) => ValueType::Balance,
            Numeric::BalancePair(_) => ValueType::BalancePair,
        };
        ty.label()
    }

    /// One step up the lattice.
    fn widen(self) -> Numeric {
        match self {
            Numeric::Integer(n) => Numeric::Amount(Amount::from(n)),
            Numeric::Amount(amount) => Numeric::Balance(Balance::from(amount)),
            Numeric::Balance(balance) => Numeric::BalancePair(BalancePair::from(balance)),
            pair @ Numeric::BalancePair(_) => pair,
        }
    }

    fn widen_to(mut self, rank: u8) -> Numeric {
        while self.rank() < rank {
            self = self.widen();
        }
        self
    }

    /// Lift both operands to the wider of their two ranks.
    pub(crate) fn promote(left: Numeric, right: Numeric) -> (Numeric, Numeric) {
        let rank = left.rank().max(right.rank());
        if left.rank() != right.rank() {
            trace!(left = left.label(), right = right.label(), "promoting operands");
        }
        (left.widen_to(rank), right.widen_to(rank))
    }

    pub(crate) fn into_amount(self) -> Option<Amount> {
        match self {
            Numeric::Integer(n) => Some(Amount::from(n)),
            Numeric::Amount(amount) => Some(amount),
            _ => None,
        }
    }

    pub(crate) fn into_balance(self) -> Option<Balance> {
        match self.widen_to(2) {
            Numeric::Balance(balance) => Some(balance),
            _ => None,
        }
    }

    pub(crate) fn into_balance_pair(self) -> BalancePair {
        match self {
            Numeric::Integer(n) => BalancePair::from(Amount::from(n)),
            Numeric::Amount(amount) => BalancePair::from(amount),
            Numeric::Balance(balance) => BalancePair::from(balance),
            Numeric::BalancePair(pair) => pair,
        }
    }
}

/// Binary and unary arithmetic over values
pub(crate) struct ValueOperations;

impl ValueOperations {
    fn unsupported(op: &'static str, left: &Value, right: &Value) -> ValueError {
        ValueError::UnsupportedOperation {
            op,
            left: left.value_type().label(),
            right: right.value_type().label(),
        }
    }

    fn unsupported_unary(op: &'static str, operand: &Value) -> ValueError {
        ValueError::UnsupportedUnary {
            op,
            operand: operand.value_type().label(),
        }
    }

    fn numeric_operands(
        op: &'static str,
        left: &Value,
        right: &Value,
    ) -> Result<(Numeric, Numeric), ValueError> {
        match (Numeric::of(left.repr()), Numeric::of(right.repr())) {
            (Some(a), Some(b)) => Ok((a, b)),
            _ => Err(Self::unsupported(op, left, right)),
        }
    }

    fn shift(moment: &Moment, seconds: i64) -> Result<Value, ValueError> {
        add_seconds(moment, seconds)
            .map(Value::from)
            .ok_or(ValueError::Overflow("date arithmetic"))
    }

    /// Plain numbers join the other side's commodity; differing commodities
    /// form a balance.
    fn add_amounts(a: Amount, b: Amount) -> Result<Repr, ValueError> {
        let a = a.adopting(&b);
        let b = b.adopting(&a);
        if a.same_kind(&b) {
            return Ok(Repr::Amount(a.checked_add(&b)?));
        }
        trace!(left = %a, right = %b, "commodities differ, forming a balance");
        let mut balance = Balance::from(a);
        balance.add_amount(&b)?;
        Ok(Repr::Balance(balance))
    }

    fn sub_amounts(a: Amount, b: Amount) -> Result<Repr, ValueError> {
        let a = a.adopting(&b);
        let b = b.adopting(&a);
        if a.same_kind(&b) {
            return Ok(Repr::Amount(a.checked_sub(&b)?));
        }
        trace!(left = %a, right = %b, "commodities differ, forming a balance");
        let mut balance = Balance::from(a);
        balance.sub_amount(&b)?;
        Ok(Repr::Balance(balance))
    }

    pub(crate) fn add_values(left: &Value, right: &Value) -> Result<Value, ValueError> {
        match (left.repr(), right.repr()) {
            (Repr::String(a), Repr::String(b)) => return Ok(Value::string(format!("{}{}", a, b))),
            (Repr::Datetime(moment), Repr::Integer(seconds))
            | (Repr::Integer(seconds), Repr::Datetime(moment)) => {
                return Self::shift(moment, *seconds)
            }
            _ => {}
        }

        let (a, b) = Self::numeric_operands("add", left, right)?;
        let sum = match Numeric::promote(a, b) {
            (Numeric::Integer(a), Numeric::Integer(b)) => {
                Repr::Integer(a.checked_add(b).ok_or(ValueError::Overflow("addition"))?)
            }
            (Numeric::Amount(a), Numeric::Amount(b)) => Self::add_amounts(a, b)?,
            (Numeric::Balance(mut a), Numeric::Balance(b)) => {
                a.add_balance(&b)?;
                Repr::Balance(a)
            }
            (Numeric::BalancePair(mut a), Numeric::BalancePair(b)) => {
                a.add_pair(&b)?;
                Repr::BalancePair(a)
            }
            _ => return Err(Self::unsupported("add", left, right)),
        };
        Ok(Value::from_repr(sum))
    }

    pub(crate) fn sub_values(left: &Value, right: &Value) -> Result<Value, ValueError> {
        if let (Repr::Datetime(moment), Repr::Integer(seconds)) = (left.repr(), right.repr()) {
            let seconds = seconds
                .checked_neg()
                .ok_or(ValueError::Overflow("date arithmetic"))?;
            return Self::shift(moment, seconds);
        }

        let (a, b) = Self::numeric_operands("subtract", left, right)?;
        let difference = match Numeric::promote(a, b) {
            (Numeric::Integer(a), Numeric::Integer(b)) => {
                Repr::Integer(a.checked_sub(b).ok_or(ValueError::Overflow("subtraction"))?)
            }
            (Numeric::Amount(a), Numeric::Amount(b)) => Self::sub_amounts(a, b)?,
            (Numeric::Balance(mut a), Numeric::Balance(b)) => {
                a.sub_balance(&b)?;
                Repr::Balance(a)
            }
            (Numeric::BalancePair(mut a), Numeric::BalancePair(b)) => {
                a.sub_pair(&b)?;
                Repr::BalancePair(a)
            }
            _ => return Err(Self::unsupported("subtract", left, right)),
        };
        Ok(Value::from_repr(difference))
    }

    /// Scalars multiply each other and scale balances from either side.
    pub(crate) fn mul_values(left: &Value, right: &Value) -> Result<Value, ValueError> {
        let (a, b) = Self::numeric_operands("multiply", left, right)?;
        let product = match (a, b) {
            (Numeric::Integer(a), Numeric::Integer(b)) => {
                Repr::Integer(a.checked_mul(b).ok_or(ValueError::Overflow("multiplication"))?)
            }
            (Numeric::BalancePair(pair), other) | (other, Numeric::BalancePair(pair)) => {
                let factor = other
                    .into_amount()
                    .ok_or_else(|| Self::unsupported("multiply", left, right))?;
                Repr::BalancePair(pair.mul_amount(&factor)?)
            }
            (Numeric::Balance(balance), other) | (other, Numeric::Balance(balance)) => {
                let factor = other
                    .into_amount()
                    .ok_or_else(|| Self::unsupported("multiply", left, right))?;
                Repr::Balance(balance.mul_amount(&factor)?)
            }
            (a, b) => match (a.into_amount(), b.into_amount()) {
                (Some(a), Some(b)) => Repr::Amount(a.checked_mul(&b)?),
                _ => return Err(Self::unsupported("multiply", left, right)),
            },
        };
        Ok(Value::from_repr(product))
    }

    /// Integer division truncates. Nothing can be divided by a balance.
    pub(crate) fn div_values(left: &Value, right: &Value) -> Result<Value, ValueError> {
        let (a, b) = Self::numeric_operands("divide", left, right)?;
        let quotient = match (a, b) {
            (Numeric::Integer(_), Numeric::Integer(0)) => return Err(ValueError::DivideByZero),
            (Numeric::Integer(a), Numeric::Integer(b)) => {
                Repr::Integer(a.checked_div(b).ok_or(ValueError::Overflow("division"))?)
            }
            (Numeric::BalancePair(pair), divisor) => {
                let divisor = divisor
                    .into_amount()
                    .ok_or_else(|| Self::unsupported("divide", left, right))?;
                Repr::BalancePair(pair.div_amount(&divisor)?)
            }
            (Numeric::Balance(balance), divisor) => {
                let divisor = divisor
                    .into_amount()
                    .ok_or_else(|| Self::unsupported("divide", left, right))?;
                Repr::Balance(balance.div_amount(&divisor)?)
            }
            (a, b) => match (a.into_amount(), b.into_amount()) {
                (Some(a), Some(b)) => Repr::Amount(a.checked_div(&b)?),
                _ => return Err(Self::unsupported("divide", left, right)),
            },
        };
        Ok(Value::from_repr(quotient))
    }

    /// Booleans negate logically.
    pub(crate) fn neg_value(value: &Value) -> Result<Value, ValueError> {
        let negated = match value.repr() {
            Repr::Boolean(b) => Repr::Boolean(!b),
            Repr::Integer(n) => Repr::Integer(n.checked_neg().ok_or(ValueError::Overflow("negation"))?),
            Repr::Amount(amount) => Repr::Amount(amount.negated()),
            Repr::Balance(balance) => Repr::Balance(balance.negated()),
            Repr::BalancePair(pair) => Repr::BalancePair(pair.negated()),
            _ => return Err(Self::unsupported_unary("negate", value)),
        };
        Ok(Value::from_repr(negated))
    }

    pub(crate) fn abs_value(value: &Value) -> Result<Value, ValueError> {
        let abs = match value.repr() {
            Repr::Boolean(b) => Repr::Boolean(*b),
            Repr::Integer(n) => Repr::Integer(n.checked_abs().ok_or(ValueError::Overflow("absolute value"))?),
            Repr::Amount(amount) => Repr::Amount(amount.abs()),
            Repr::Balance(balance) => Repr::Balance(balance.abs()),
            Repr::BalancePair(pair) => Repr::BalancePair(pair.abs()),
            _ => return Err(Self::unsupported_unary("take the absolute value of", value)),
        };
        Ok(Value::from_repr(abs))
    }

    pub(crate) fn is_realzero(value: &Value) -> Result<bool, ValueError> {
        match value.repr() {
            Repr::Boolean(b) => Ok(!b),
            Repr::Integer(n) => Ok(*n == 0),
            Repr::Amount(amount) => Ok(amount.is_realzero()),
            Repr::Balance(balance) => Ok(balance.is_realzero()),
            Repr::BalancePair(pair) => Ok(pair.is_realzero()),
            _ => Err(Self::unsupported_unary("test for zero", value)),
        }
    }

    pub(crate) fn is_zero(value: &Value) -> Result<bool, ValueError> {
        match value.repr() {
            Repr::Amount(amount) => Ok(amount.is_zero()),
            Repr::Balance(balance) => Ok(balance.is_zero()),
            Repr::BalancePair(pair) => Ok(pair.is_zero()),
            _ => Self::is_realzero(value),
        }
    }
}

impl Value {
    /// `self += other`. On error `self` is left unchanged.
    pub fn in_place_add(&mut self, other: &Value) -> Result<(), ValueError> {
        *self = ValueOperations::add_values(self, other)?;
        Ok(())
    }

    pub fn in_place_sub(&mut self, other: &Value) -> Result<(), ValueError> {
        *self = ValueOperations::sub_values(self, other)?;
        Ok(())
    }

    pub fn in_place_mul(&mut self, other: &Value) -> Result<(), ValueError> {
        *self = ValueOperations::mul_values(self, other)?;
        Ok(())
    }

    pub fn in_place_div(&mut self, other: &Value) -> Result<(), ValueError> {
        *self = ValueOperations::div_values(self, other)?;
        Ok(())
    }

    pub fn negated(&self) -> Result<Value, ValueError> {
        ValueOperations::neg_value(self)
    }

    pub fn in_place_negate(&mut self) -> Result<(), ValueError> {
        *self = ValueOperations::neg_value(self)?;
        Ok(())
    }

    pub fn abs(&self) -> Result<Value, ValueError> {
        ValueOperations::abs_value(self)
    }

    /// Exactly zero. Defined for booleans (`false`) and the numeric variants.
    pub fn is_realzero(&self) -> Result<bool, ValueError> {
        ValueOperations::is_realzero(self)
    }

    /// Zero once rounded to display precision.
    pub fn is_zero(&self) -> Result<bool, ValueError> {
        ValueOperations::is_zero(self)
    }

    /// Add `amount`, optionally acquired at total `cost`. Supplying a cost turns
    /// the receiver into a balance pair.
    pub fn add_amount(&mut self, amount: &Amount, cost: Option<&Amount>) -> Result<(), ValueError> {
        let Some(cost) = cost else {
            return self.in_place_add(&Value::from(amount.clone()));
        };
        let mut pair = Numeric::of(self.repr())
            .ok_or_else(|| ValueError::UnsupportedOperation {
                op: "add",
                left: self.value_type().label(),
                right: ValueType::Amount.label(),
            })?
            .into_balance_pair();
        pair.add_amount(amount, Some(cost))?;
        self.install(Repr::BalancePair(pair));
        Ok(())
    }
}

macro_rules! binary_operator {
    ($trait:ident, $method:ident, $op:path) => {
        impl $trait<&Value> for &Value {
            type Output = Result<Value, ValueError>;

            fn $method(self, rhs: &Value) -> Self::Output {
                $op(self, rhs)
            }
        }

        impl $trait for Value {
            type Output = Result<Value, ValueError>;

            fn $method(self, rhs: Value) -> Self::Output {
                $op(&self, &rhs)
            }
        }
    };
}

binary_operator!(Add, add, ValueOperations::add_values);
binary_operator!(Sub, sub, ValueOperations::sub_values);
binary_operator!(Mul, mul, ValueOperations::mul_values);
binary_operator!(Div, div, ValueOperations::div_values);

impl Neg for &Value {
    type Output = Result<Value, ValueError>;

    fn neg(self) -> Self::Output {
        ValueOperations::neg_value(self)
    }
}

impl Neg for Value {
    type Output = Result<Value, ValueError>;

    fn neg(self) -> Self::Output {
        ValueOperations::neg_value(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_promotion_ranks() {
        let (a, b) = Numeric::promote(Numeric::Integer(3), Numeric::Amount("$2".parse().unwrap()));
        assert!(matches!(a, Numeric::Amount(_)));
        assert!(matches!(b, Numeric::Amount(_)));

        let pair = Numeric::Integer(3).widen_to(3);
        assert!(matches!(pair, Numeric::BalancePair(_)));
    }

    #[test]
    fn test_booleans_are_zero_and_one() {
        let sum = ValueOperations::add_values(&Value::from(true), &Value::from(true)).unwrap();
        assert_eq!(sum.as_integer(), Ok(2));
    }
}
