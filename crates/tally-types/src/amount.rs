//! Exact decimal quantities of a single commodity

use crate::annotation::{Annotation, KeepDetails, Price};
use crate::commodity::Commodity;
use crate::error::AmountError;
use crate::moment::{format_moment, Moment};
use crate::price::PriceHistory;
use chrono::NaiveDate;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod parse;

/// Upper bound on `smaller` hops followed by [`Amount::reduced`].
const MAX_REDUCTIONS: usize = 16;

/// A quantity of one commodity, optionally annotated with lot details.
///
/// Quantities are exact (`rust_decimal`); the commodity's precision only
/// governs display and [`Amount::rounded`].
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Amount {
    quantity: Decimal,
    commodity: Commodity,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Annotation::is_empty"))]
    annotation: Annotation,
    #[cfg_attr(feature = "serde", serde(default))]
    keep_precision: bool,
}

impl Amount {
    /// Create an amount; the commodity learns the quantity's scale as display precision.
    pub fn new(quantity: Decimal, mut commodity: Commodity) -> Self {
        if !commodity.is_null() {
            commodity.observe_precision(quantity.scale());
        }
        Amount {
            quantity,
            commodity,
            annotation: Annotation::default(),
            keep_precision: false,
        }
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotation = annotation;
        self
    }

    /// Convert a float; NaN and infinities are rejected.
    pub fn from_f64(value: f64) -> Result<Self, AmountError> {
        Decimal::from_f64(value)
            .map(Amount::from)
            .ok_or_else(|| AmountError::InvalidFloat(value.to_string()))
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    /// The quantity truncated toward zero, if it fits.
    pub fn to_i64(&self) -> Option<i64> {
        self.quantity.trunc().to_i64()
    }

    pub fn commodity(&self) -> &Commodity {
        &self.commodity
    }

    pub fn annotation(&self) -> &Annotation {
        &self.annotation
    }

    pub fn has_commodity(&self) -> bool {
        !self.commodity.is_null()
    }

    pub fn has_annotation(&self) -> bool {
        !self.annotation.is_empty()
    }

    pub fn keeps_precision(&self) -> bool {
        self.keep_precision
    }

    /// True when both amounts can be added without forming a balance.
    pub fn same_kind(&self, other: &Amount) -> bool {
        self.commodity == other.commodity && self.annotation == other.annotation
    }

    /// A plain number meeting a commoditized amount takes on its commodity
    /// and annotation. Anything else is returned unchanged.
    pub fn adopting(self, other: &Amount) -> Amount {
        if self.has_commodity() || self.has_annotation() {
            return self;
        }
        Amount {
            commodity: other.commodity.clone(),
            annotation: other.annotation.clone(),
            ..self
        }
    }

    fn with_quantity(&self, quantity: Decimal) -> Amount {
        Amount {
            quantity,
            ..self.clone()
        }
    }

    fn require_same_kind(&self, other: &Amount, op: &'static str) -> Result<(), AmountError> {
        if self.same_kind(other) {
            Ok(())
        } else {
            Err(AmountError::CommodityMismatch {
                op,
                left: self.to_string(),
                right: other.to_string(),
            })
        }
    }

    pub fn checked_add(&self, other: &Amount) -> Result<Amount, AmountError> {
        self.require_same_kind(other, "add")?;
        let quantity = self
            .quantity
            .checked_add(other.quantity)
            .ok_or(AmountError::Overflow("addition"))?;
        let mut sum = self.with_quantity(quantity);
        sum.commodity.merge_style(&other.commodity);
        sum.keep_precision |= other.keep_precision;
        Ok(sum)
    }

    pub fn checked_sub(&self, other: &Amount) -> Result<Amount, AmountError> {
        self.require_same_kind(other, "subtract")?;
        let quantity = self
            .quantity
            .checked_sub(other.quantity)
            .ok_or(AmountError::Overflow("subtraction"))?;
        let mut difference = self.with_quantity(quantity);
        difference.commodity.merge_style(&other.commodity);
        difference.keep_precision |= other.keep_precision;
        Ok(difference)
    }

    /// Multiply quantities. The result takes the commodity of whichever side has one,
    /// preferring the left.
    pub fn checked_mul(&self, other: &Amount) -> Result<Amount, AmountError> {
        let quantity = self
            .quantity
            .checked_mul(other.quantity)
            .ok_or(AmountError::Overflow("multiplication"))?;
        Ok(self.scaled(other, quantity))
    }

    pub fn checked_div(&self, other: &Amount) -> Result<Amount, AmountError> {
        if other.quantity.is_zero() {
            return Err(AmountError::DivideByZero);
        }
        let quantity = self
            .quantity
            .checked_div(other.quantity)
            .ok_or(AmountError::Overflow("division"))?;
        Ok(self.scaled(other, quantity))
    }

    fn scaled(&self, other: &Amount, quantity: Decimal) -> Amount {
        if self.has_commodity() || !other.has_commodity() {
            self.with_quantity(quantity)
        } else {
            other.with_quantity(quantity)
        }
    }

    pub fn negated(&self) -> Amount {
        self.with_quantity(-self.quantity)
    }

    pub fn abs(&self) -> Amount {
        self.with_quantity(self.quantity.abs())
    }

    /// Exactly zero, regardless of display precision.
    pub fn is_realzero(&self) -> bool {
        self.quantity.is_zero()
    }

    /// Zero once rounded to the commodity's display precision.
    pub fn is_zero(&self) -> bool {
        if !self.has_commodity() || self.keep_precision {
            return self.is_realzero();
        }
        self.round_quantity(self.commodity.precision()).is_zero()
    }

    pub fn sign(&self) -> Ordering {
        self.quantity.cmp(&Decimal::ZERO)
    }

    /// Order two amounts. Plain numbers compare with anything; two commoditized
    /// amounts must share their commodity.
    pub fn compare(&self, other: &Amount) -> Result<Ordering, AmountError> {
        if self.has_commodity() && other.has_commodity() && self.commodity != other.commodity {
            return Err(AmountError::CommodityMismatch {
                op: "compare",
                left: self.to_string(),
                right: other.to_string(),
            });
        }
        Ok(self.quantity.cmp(&other.quantity))
    }

    fn round_quantity(&self, precision: u32) -> Decimal {
        self.quantity
            .round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Round to the commodity's display precision.
    pub fn rounded(&self) -> Amount {
        if !self.has_commodity() {
            return self.clone();
        }
        Amount {
            quantity: self.round_quantity(self.commodity.precision()),
            keep_precision: false,
            ..self.clone()
        }
    }

    /// Display with full internal precision from now on.
    pub fn unrounded(&self) -> Amount {
        Amount {
            keep_precision: true,
            ..self.clone()
        }
    }

    /// Express the amount in the smallest unit reachable through the commodity's
    /// `smaller` conversions (`2 h` becomes `7200 s`).
    pub fn reduced(&self) -> Result<Amount, AmountError> {
        let mut current = self.clone();
        for _ in 0..MAX_REDUCTIONS {
            let Some(smaller) = current.commodity.smaller().cloned() else {
                break;
            };
            let quantity = current
                .quantity
                .checked_mul(smaller.quantity)
                .ok_or(AmountError::Overflow("reduction"))?;
            current = Amount {
                quantity,
                commodity: smaller.commodity,
                annotation: current.annotation,
                keep_precision: current.keep_precision,
            };
        }
        Ok(current)
    }

    pub fn strip_annotations(&self, keep: &KeepDetails) -> Amount {
        Amount {
            annotation: self.annotation.strip(keep),
            ..self.clone()
        }
    }

    /// Annotated per-unit price, if any.
    pub fn price(&self) -> Option<Amount> {
        self.annotation.price.as_ref().map(Price::to_amount)
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.annotation.date
    }

    pub fn tag(&self) -> Option<&str> {
        self.annotation.tag.as_deref()
    }

    /// Market value at `moment`. Plain numbers are their own value.
    pub fn value(&self, moment: Moment, prices: &dyn PriceHistory) -> Result<Amount, AmountError> {
        if !self.has_commodity() {
            return Ok(self.clone());
        }
        let Some(price) = prices.price(&self.commodity, moment) else {
            if prices.quotes_in(&self.commodity) {
                return Ok(self.strip_annotations(&KeepDetails::default()));
            }
            debug!(
                commodity = self.commodity.symbol(),
                moment = %format_moment(&moment),
                "no price available"
            );
            return Err(AmountError::MissingPrice {
                commodity: self.commodity.symbol().to_string(),
                moment,
            });
        };
        let quantity = self
            .quantity
            .checked_mul(price.quantity)
            .ok_or(AmountError::Overflow("valuation"))?;
        Ok(Amount {
            quantity,
            commodity: price.commodity,
            annotation: Annotation::default(),
            keep_precision: false,
        })
    }

    fn display_quantity(&self) -> Decimal {
        if !self.has_commodity() {
            return self.quantity;
        }
        let precision = if self.keep_precision {
            self.commodity.precision().max(self.quantity.scale())
        } else {
            self.commodity.precision()
        };
        let mut quantity = self.round_quantity(precision);
        quantity.rescale(precision);
        quantity
    }
}

impl PartialEq for Amount {
    fn eq(&self, other: &Self) -> bool {
        self.quantity == other.quantity
            && self.commodity == other.commodity
            && self.annotation == other.annotation
    }
}

impl Eq for Amount {}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Amount::from(Decimal::from(value))
    }
}

impl From<i32> for Amount {
    fn from(value: i32) -> Self {
        Amount::from(i64::from(value))
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Amount::from(Decimal::from(value))
    }
}

impl From<Decimal> for Amount {
    fn from(quantity: Decimal) -> Self {
        Amount::new(quantity, Commodity::null())
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse::parse_amount(s)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quantity = self.display_quantity();
        if !self.has_commodity() {
            write!(f, "{}", quantity)?;
        } else if self.commodity.is_prefix() {
            write!(f, "{}{}", self.commodity, quantity)?;
        } else {
            write!(f, "{} {}", quantity, self.commodity)?;
        }
        write!(f, "{}", self.annotation)
    }
}
