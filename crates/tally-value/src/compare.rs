//! Three-way comparison

use crate::error::ValueError;
use crate::ops::Numeric;
use crate::repr::Repr;
use crate::value::Value;
use std::cmp::Ordering;
use tally_types::AmountError;

impl Value {
    /// Order two values.
    ///
    /// Numeric variants (booleans included) are promoted to a common variant
    /// first. Dates, strings, sequences and handles only compare with their
    /// own variant.
    pub fn compare(&self, other: &Value) -> Result<Ordering, ValueError> {
        match (self.repr(), other.repr()) {
            (Repr::Datetime(a), Repr::Datetime(b)) => return Ok(a.cmp(b)),
            (Repr::String(a), Repr::String(b)) => return Ok(a.cmp(b)),
            (Repr::XmlNode(a), Repr::XmlNode(b)) => return Ok(a.cmp(b)),
            (Repr::Pointer(a), Repr::Pointer(b)) => return Ok(a.cmp(b)),
            (Repr::Sequence(a), Repr::Sequence(b)) => return compare_sequences(a, b),
            _ => {}
        }

        let (Some(a), Some(b)) = (Numeric::of(self.repr()), Numeric::of(other.repr())) else {
            return Err(self.incomparable(other));
        };
        let ordering = match Numeric::promote(a, b) {
            (Numeric::Integer(a), Numeric::Integer(b)) => Ok(a.cmp(&b)),
            (Numeric::Amount(a), Numeric::Amount(b)) => a.compare(&b),
            (Numeric::Balance(a), Numeric::Balance(b)) => a.compare(&b),
            (Numeric::BalancePair(a), Numeric::BalancePair(b)) => a.compare(&b),
            _ => return Err(self.incomparable(other)),
        };
        ordering.map_err(|err| match err {
            AmountError::CommodityMismatch { left, right, .. } => {
                ValueError::Incomparable { left, right }
            }
            other => ValueError::from(other),
        })
    }

    /// Equality that reports incomparable operands instead of answering `false`.
    pub fn try_eq(&self, other: &Value) -> Result<bool, ValueError> {
        Ok(self.compare(other)? == Ordering::Equal)
    }

    fn incomparable(&self, other: &Value) -> ValueError {
        ValueError::Incomparable {
            left: self.value_type().label().to_string(),
            right: other.value_type().label().to_string(),
        }
    }
}

fn compare_sequences(a: &[Value], b: &[Value]) -> Result<Ordering, ValueError> {
    for (x, y) in a.iter().zip(b) {
        match x.compare(y)? {
            Ordering::Equal => continue,
            unequal => return Ok(unequal),
        }
    }
    Ok(a.len().cmp(&b.len()))
}

/// Values that cannot be compared are unequal.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        matches!(self.compare(other), Ok(Ordering::Equal))
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(other).ok()
    }
}
