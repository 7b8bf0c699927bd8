//! Error types for amount, balance and price operations

use crate::moment::Moment;
use thiserror::Error;

/// Failures raised by the monetary types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    /// Text could not be read as an amount
    #[error("cannot parse amount '{input}': {reason}")]
    Parse { input: String, reason: String },

    /// Text could not be read as a date or date/time
    #[error("cannot parse date '{0}'")]
    InvalidDate(String),

    /// Floating point input with no exact decimal form (NaN, infinities, out of range)
    #[error("cannot represent {0} as an amount")]
    InvalidFloat(String),

    /// Two amounts must share a commodity for this operation
    #[error("cannot {op} amounts with different commodities: '{left}' and '{right}'")]
    CommodityMismatch {
        op: &'static str,
        left: String,
        right: String,
    },

    /// Decimal arithmetic exceeded the representable range
    #[error("amount overflow in {0}")]
    Overflow(&'static str),

    /// Division by an amount whose quantity is zero
    #[error("divide by zero")]
    DivideByZero,

    /// A commoditized amount cannot scale a balance holding several commodities
    #[error("cannot {op} a multi-commodity balance by a commoditized amount")]
    MultiCommodityScale { op: &'static str },

    /// The difference between two balances has components of both signs
    #[error("cannot order balances '{left}' and '{right}'")]
    Incomparable { left: String, right: String },

    /// No historical price is known for a commodity
    #[error("no price for commodity '{commodity}' at {moment}")]
    MissingPrice { commodity: String, moment: Moment },
}
