//! Tally Types
//!
//! Monetary building blocks consumed by the `tally-value` scalar:
//!
//! - [`Commodity`] - a currency or unit symbol with its display style
//! - [`Annotation`] - lot details (acquisition price, date, tag) attached to an amount
//! - [`Amount`] - an exact decimal quantity of one (possibly annotated) commodity
//! - [`Balance`] - a sum of amounts in several commodities
//! - [`BalancePair`] - a balance together with the cost paid for it
//! - [`PriceHistory`] / [`PriceDb`] - historical prices used for market valuation
//!
//! All arithmetic is checked and reports failures through [`AmountError`].

pub mod amount;
pub mod annotation;
pub mod balance;
pub mod balance_pair;
pub mod commodity;
pub mod error;
pub mod moment;
pub mod price;

// Re-exports
pub use amount::Amount;
pub use annotation::{Annotation, KeepDetails, Price};
pub use balance::Balance;
pub use balance_pair::BalancePair;
pub use commodity::Commodity;
pub use error::AmountError;
pub use moment::{
    add_seconds, format_moment, from_timestamp, now, parse_date, parse_moment, timestamp, Moment,
};
pub use price::{PriceDb, PriceHistory};

// Re-export commonly used external types
pub use chrono::NaiveDate;
pub use rust_decimal::Decimal;
