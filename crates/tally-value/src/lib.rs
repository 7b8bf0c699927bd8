//! Tally Value
//!
//! The runtime scalar of the tally expression evaluator. A [`Value`] holds
//! exactly one of ten variants (boolean, integer, date/time, amount, balance,
//! balance pair, string, xml node handle, pointer handle, sequence) and
//! supports mixed-type arithmetic by promoting along
//! `Integer < Amount < Balance < BalancePair`.
//!
//! # Canonical form
//!
//! Every value is kept in its simplest representation: a zero amount is
//! stored as integer `0`, a balance with a single commodity as that amount, a
//! balance pair without cost as its balance. This happens on every install
//! path (construction, assignment, arithmetic, casts, deserialization), so
//! callers can match on [`Value::value_type`] without normalizing first.
//!
//! # Modules
//!
//! - `value`: the value type, constructors, accessors and lifecycle helpers
//! - `ops`: arithmetic and the promotion lattice
//! - `compare`: three-way comparison and equality
//! - `cast`: conversions between variants and truthiness
//! - `annotations`: lot annotations, rounding and market valuation
//! - `sequence`: sequence access
//! - `print`: `Display` and column printing
//! - `error`: the [`ValueError`] type

pub mod annotations;
pub mod cast;
pub mod compare;
pub mod error;
pub mod ops;
pub mod print;
pub mod sequence;
pub mod value;

mod repr;

// Re-export main types
pub use error::ValueError;
pub use print::PrintWidths;
pub use value::{Handle, NodeRef, Value, ValueType};

// Collaborator types callers need alongside Value
pub use tally_types::{Amount, Balance, BalancePair, KeepDetails, Moment, PriceDb, PriceHistory};

#[cfg(test)]
mod tests;
