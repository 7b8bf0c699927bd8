//! Lot annotations: acquisition price, date and tag

use crate::amount::Amount;
use crate::commodity::Commodity;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Per-unit acquisition price of an annotated amount.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Price {
    quantity: Decimal,
    commodity: Commodity,
}

impl Price {
    pub fn new(quantity: Decimal, commodity: Commodity) -> Self {
        Price {
            quantity,
            commodity,
        }
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    pub fn commodity(&self) -> &Commodity {
        &self.commodity
    }

    pub fn to_amount(&self) -> Amount {
        Amount::new(self.quantity, self.commodity.clone())
    }
}

impl From<&Amount> for Price {
    fn from(amount: &Amount) -> Self {
        Price::new(amount.quantity(), amount.commodity().clone())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_amount())
    }
}

/// Metadata distinguishing one lot of a commodity from another.
///
/// Amounts whose annotations differ are kept apart inside a balance.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Annotation {
    pub price: Option<Price>,
    pub date: Option<NaiveDate>,
    pub tag: Option<String>,
}

impl Annotation {
    pub fn is_empty(&self) -> bool {
        self.price.is_none() && self.date.is_none() && self.tag.is_none()
    }

    /// Drop every detail `keep` does not ask for.
    pub fn strip(&self, keep: &KeepDetails) -> Annotation {
        Annotation {
            price: self.price.clone().filter(|_| keep.price),
            date: self.date.filter(|_| keep.date),
            tag: self.tag.clone().filter(|_| keep.tag),
        }
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(price) = &self.price {
            write!(f, " {{{}}}", price)?;
        }
        if let Some(date) = &self.date {
            write!(f, " [{}]", date.format("%Y/%m/%d"))?;
        }
        if let Some(tag) = &self.tag {
            write!(f, " ({})", tag)?;
        }
        Ok(())
    }
}

/// Which annotation details survive `strip_annotations`.
///
/// The default keeps nothing, which is what reports want when lots should be
/// merged back into their plain commodity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeepDetails {
    pub price: bool,
    pub date: bool,
    pub tag: bool,
}

impl KeepDetails {
    pub fn all() -> Self {
        KeepDetails {
            price: true,
            date: true,
            tag: true,
        }
    }

    pub fn keeps_anything(&self) -> bool {
        self.price || self.date || self.tag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lot() -> Annotation {
        Annotation {
            price: Some(Price::new(Decimal::new(5025, 2), Commodity::prefixed("$"))),
            date: NaiveDate::from_ymd_opt(2024, 1, 15),
            tag: Some("lot1".to_string()),
        }
    }

    #[test]
    fn test_strip_keeps_requested_details() {
        let keep_date = KeepDetails {
            date: true,
            ..KeepDetails::default()
        };
        let stripped = lot().strip(&keep_date);
        assert!(stripped.price.is_none());
        assert_eq!(stripped.date, NaiveDate::from_ymd_opt(2024, 1, 15));
        assert!(stripped.tag.is_none());

        assert!(lot().strip(&KeepDetails::default()).is_empty());
        assert_eq!(lot().strip(&KeepDetails::all()), lot());
    }

    #[test]
    fn test_display() {
        assert_eq!(lot().to_string(), " {$50.25} [2024/01/15] (lot1)");
        assert_eq!(Annotation::default().to_string(), "");
    }
}
