//! Error types for value operations

use tally_types::{format_moment, AmountError, Moment};
use thiserror::Error;

/// Failures raised by [`Value`](crate::Value) operations.
///
/// Variant names in messages use [`ValueType::label`](crate::ValueType::label),
/// e.g. "cannot multiply a balance and a balance".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// Accessor or operation used on the wrong variant
    #[error("expected {expected}, found {got}")]
    WrongType {
        expected: &'static str,
        got: &'static str,
    },

    /// Binary arithmetic on a pair of variants with no defined meaning
    #[error("cannot {op} {left} and {right}")]
    UnsupportedOperation {
        op: &'static str,
        left: &'static str,
        right: &'static str,
    },

    /// Unary operation undefined for the variant
    #[error("cannot {op} {operand}")]
    UnsupportedUnary {
        op: &'static str,
        operand: &'static str,
    },

    /// The two values have no ordering
    #[error("cannot compare {left} with {right}")]
    Incomparable { left: String, right: String },

    /// A cast the source value cannot satisfy
    #[error("cannot convert {from} to {to}: {reason}")]
    BadCast {
        from: &'static str,
        to: &'static str,
        reason: String,
    },

    /// Market valuation needed a price that is not on record
    #[error("no price for '{commodity}' at {}", format_moment(.moment))]
    MissingPrice { commodity: String, moment: Moment },

    #[error("index {index} out of range for a sequence of {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Integer or decimal arithmetic left the representable range
    #[error("overflow in {0}")]
    Overflow(&'static str),

    #[error("divide by zero")]
    DivideByZero,

    /// Any other failure of the amount types (parse errors, commodity mismatches)
    #[error(transparent)]
    Amount(AmountError),
}

impl From<AmountError> for ValueError {
    fn from(err: AmountError) -> Self {
        match err {
            AmountError::DivideByZero => ValueError::DivideByZero,
            AmountError::Overflow(op) => ValueError::Overflow(op),
            AmountError::MissingPrice { commodity, moment } => {
                ValueError::MissingPrice { commodity, moment }
            }
            AmountError::Incomparable { left, right } => ValueError::Incomparable { left, right },
            other => ValueError::Amount(other),
        }
    }
}
