//! Variant storage and the canonicalizer

use crate::value::{Handle, NodeRef, Value, ValueType};
use tally_types::{Amount, Balance, BalancePair, Moment};
use tracing::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The active variant of a [`Value`].
///
/// Only reachable through `Value`, whose constructors run [`Repr::canonical`]
/// before storing anything.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Repr {
    Boolean(bool),
    Integer(i64),
    Datetime(Moment),
    Amount(Amount),
    Balance(Balance),
    BalancePair(BalancePair),
    String(String),
    XmlNode(NodeRef),
    Pointer(Handle),
    Sequence(Vec<Value>),
}

impl Default for Repr {
    fn default() -> Self {
        Repr::Integer(0)
    }
}

impl Repr {
    pub fn value_type(&self) -> ValueType {
        match self {
            Repr::Boolean(_) => ValueType::Boolean,
            Repr::Integer(_) => ValueType::Integer,
            Repr::Datetime(_) => ValueType::Datetime,
            Repr::Amount(_) => ValueType::Amount,
            Repr::Balance(_) => ValueType::Balance,
            Repr::BalancePair(_) => ValueType::BalancePair,
            Repr::String(_) => ValueType::String,
            Repr::XmlNode(_) => ValueType::XmlNode,
            Repr::Pointer(_) => ValueType::Pointer,
            Repr::Sequence(_) => ValueType::Sequence,
        }
    }

    /// Collapse degenerate aggregates to their simplest variant.
    ///
    /// - a zero amount becomes integer `0`
    /// - an empty balance becomes integer `0`, a single-commodity one its amount
    /// - a zero balance pair becomes integer `0`, one without a non-zero cost
    ///   its balance
    pub fn canonical(self) -> Repr {
        match self {
            Repr::Amount(amount) if amount.is_realzero() => {
                trace!("zero amount stored as integer");
                Repr::Integer(0)
            }
            Repr::Balance(balance) if balance.len() <= 1 => match balance.into_iter().next() {
                Some(amount) => {
                    trace!(%amount, "single-commodity balance stored as amount");
                    Repr::Amount(amount).canonical()
                }
                None => {
                    trace!("empty balance stored as integer");
                    Repr::Integer(0)
                }
            },
            Repr::BalancePair(pair) if pair.is_realzero() => {
                trace!("zero balance pair stored as integer");
                Repr::Integer(0)
            }
            Repr::BalancePair(pair) if pair.cost().map_or(true, Balance::is_realzero) => {
                trace!("balance pair without cost stored as balance");
                let (quantity, _) = pair.into_parts();
                Repr::Balance(quantity).canonical()
            }
            other => other,
        }
    }
}
