//! Commodity symbols and their display style

use crate::amount::Amount;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Characters that end a bare (unquoted) commodity symbol.
pub(crate) const SYMBOL_DELIMITERS: &str = "-.,{}[]()@;\"+*/=<>!&|";

/// A currency or unit identifier.
///
/// Identity is the symbol alone: two commodities with the same symbol are the
/// same commodity even if they were read with different display precisions.
/// The null commodity (empty symbol) is what plain numbers carry.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Commodity {
    symbol: String,
    precision: u32,
    prefix: bool,
    smaller: Option<Box<Amount>>,
}

impl Commodity {
    /// The commodity of plain numbers.
    pub fn null() -> Self {
        Self::default()
    }

    /// A commodity written after its quantity (`10 EUR`).
    pub fn new(symbol: impl Into<String>) -> Self {
        Commodity {
            symbol: symbol.into(),
            ..Self::default()
        }
    }

    /// A commodity written before its quantity (`$10`).
    pub fn prefixed(symbol: impl Into<String>) -> Self {
        Commodity {
            symbol: symbol.into(),
            prefix: true,
            ..Self::default()
        }
    }

    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    /// Declare how one unit of this commodity is expressed in a smaller one,
    /// e.g. `h` with `60 m`. Used by [`Amount::reduced`].
    pub fn with_smaller(mut self, smaller: Amount) -> Self {
        self.smaller = Some(Box::new(smaller));
        self
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn is_null(&self) -> bool {
        self.symbol.is_empty()
    }

    /// Number of decimal places used when displaying or rounding.
    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub fn is_prefix(&self) -> bool {
        self.prefix
    }

    pub fn smaller(&self) -> Option<&Amount> {
        self.smaller.as_deref()
    }

    /// Widen the display precision to at least `precision`.
    pub(crate) fn observe_precision(&mut self, precision: u32) {
        self.precision = self.precision.max(precision);
    }

    /// Fold in the style learned by another occurrence of the same symbol.
    pub(crate) fn merge_style(&mut self, other: &Commodity) {
        self.observe_precision(other.precision);
        if self.smaller.is_none() {
            self.smaller = other.smaller.clone();
        }
    }

    fn needs_quotes(&self) -> bool {
        self.symbol.chars().any(|c| {
            c.is_whitespace() || c.is_ascii_digit() || SYMBOL_DELIMITERS.contains(c)
        })
    }
}

impl PartialEq for Commodity {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol
    }
}

impl Eq for Commodity {}

impl PartialOrd for Commodity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Commodity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.symbol.cmp(&other.symbol)
    }
}

impl Hash for Commodity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.symbol.hash(state);
    }
}

impl fmt::Display for Commodity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.needs_quotes() {
            write!(f, "\"{}\"", self.symbol)
        } else {
            write!(f, "{}", self.symbol)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_the_symbol() {
        let narrow = Commodity::new("EUR");
        let wide = Commodity::new("EUR").with_precision(4);
        assert_eq!(narrow, wide);
        assert_ne!(Commodity::new("EUR"), Commodity::new("USD"));
        assert!(Commodity::null() < Commodity::new("AAPL"));
    }

    #[test]
    fn test_merge_style_keeps_widest_precision() {
        let mut usd = Commodity::prefixed("$").with_precision(2);
        usd.merge_style(&Commodity::prefixed("$").with_precision(4));
        assert_eq!(usd.precision(), 4);
        usd.merge_style(&Commodity::prefixed("$").with_precision(1));
        assert_eq!(usd.precision(), 4);
    }

    #[test]
    fn test_display_quotes_awkward_symbols() {
        assert_eq!(Commodity::new("AAPL").to_string(), "AAPL");
        assert_eq!(Commodity::new("VANGUARD 500").to_string(), "\"VANGUARD 500\"");
        assert!(Commodity::null().is_null());
    }
}
