//! Historical prices used to value amounts at a moment in time

use crate::amount::Amount;
use crate::commodity::Commodity;
use crate::moment::Moment;
use std::collections::{BTreeMap, HashMap};
use tracing::trace;

/// Source of historical commodity prices.
///
/// Implemented by the price database and by anything a caller wants to plug in
/// (a journal's `P` directives, a quote service cache).
pub trait PriceHistory {
    /// Per-unit price of `commodity` in effect at `moment`, if one is known.
    fn price(&self, commodity: &Commodity, moment: Moment) -> Option<Amount>;

    /// Whether some price is quoted in `commodity`. Such a commodity is already
    /// in valuation terms and needs no price of its own.
    fn quotes_in(&self, _commodity: &Commodity) -> bool {
        false
    }
}

impl<T: PriceHistory + ?Sized> PriceHistory for &T {
    fn price(&self, commodity: &Commodity, moment: Moment) -> Option<Amount> {
        (**self).price(commodity, moment)
    }

    fn quotes_in(&self, commodity: &Commodity) -> bool {
        (**self).quotes_in(commodity)
    }
}

/// In-memory price history: the latest quote at or before a moment wins.
#[derive(Debug, Clone, Default)]
pub struct PriceDb {
    prices: HashMap<String, BTreeMap<Moment, Amount>>,
}

impl PriceDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that one unit of `symbol` was worth `price` at `moment`.
    pub fn add(&mut self, symbol: impl Into<String>, moment: Moment, price: Amount) {
        let symbol = symbol.into();
        trace!(%symbol, %price, "recording price");
        self.prices.entry(symbol).or_default().insert(moment, price);
    }

    /// Number of recorded quotes across all commodities.
    pub fn len(&self) -> usize {
        self.prices.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PriceHistory for PriceDb {
    fn price(&self, commodity: &Commodity, moment: Moment) -> Option<Amount> {
        self.prices
            .get(commodity.symbol())?
            .range(..=moment)
            .next_back()
            .map(|(_, price)| price.clone())
    }

    fn quotes_in(&self, commodity: &Commodity) -> bool {
        self.prices
            .values()
            .flat_map(BTreeMap::values)
            .any(|price| price.commodity() == commodity)
    }
}
