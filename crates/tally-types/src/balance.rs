//! Multi-commodity sums of amounts

use crate::amount::Amount;
use crate::annotation::{Annotation, KeepDetails};
use crate::commodity::Commodity;
use crate::error::AmountError;
use crate::moment::Moment;
use crate::price::PriceHistory;
use std::cmp::Ordering;
use std::collections::btree_map::{self, BTreeMap, Entry};
use std::fmt;
use std::io;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Map key of a balance entry: lots of one commodity with different
/// annotations are separate entries.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct AmountKey {
    commodity: Commodity,
    annotation: Annotation,
}

impl AmountKey {
    fn of(amount: &Amount) -> Self {
        AmountKey {
            commodity: amount.commodity().clone(),
            annotation: amount.annotation().clone(),
        }
    }
}

/// A sum of amounts, one entry per (commodity, annotation).
///
/// Entries that cancel out are removed, so an empty balance is exactly zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "Vec<Amount>", into = "Vec<Amount>")
)]
pub struct Balance {
    amounts: BTreeMap<AmountKey, Amount>,
}

impl Balance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    /// Amounts in commodity order.
    pub fn iter(&self) -> impl Iterator<Item = &Amount> + '_ {
        self.amounts.values()
    }

    /// The amount held in `commodity` (unannotated lots only).
    pub fn amount(&self, commodity: &Commodity) -> Option<&Amount> {
        self.amounts.get(&AmountKey {
            commodity: commodity.clone(),
            annotation: Annotation::default(),
        })
    }

    /// The only amount, when the balance holds exactly one commodity.
    pub fn single_amount(&self) -> Option<&Amount> {
        match self.amounts.len() {
            1 => self.amounts.values().next(),
            _ => None,
        }
    }

    pub fn is_realzero(&self) -> bool {
        self.amounts.is_empty()
    }

    pub fn is_zero(&self) -> bool {
        self.amounts.values().all(Amount::is_zero)
    }

    pub fn add_amount(&mut self, amount: &Amount) -> Result<(), AmountError> {
        if amount.is_realzero() {
            return Ok(());
        }
        match self.amounts.entry(AmountKey::of(amount)) {
            Entry::Vacant(slot) => {
                slot.insert(amount.clone());
            }
            Entry::Occupied(mut slot) => {
                let sum = slot.get().checked_add(amount)?;
                if sum.is_realzero() {
                    slot.remove();
                } else {
                    slot.insert(sum);
                }
            }
        }
        Ok(())
    }

    pub fn sub_amount(&mut self, amount: &Amount) -> Result<(), AmountError> {
        self.add_amount(&amount.negated())
    }

    pub fn add_balance(&mut self, other: &Balance) -> Result<(), AmountError> {
        other.iter().try_for_each(|amount| self.add_amount(amount))
    }

    pub fn sub_balance(&mut self, other: &Balance) -> Result<(), AmountError> {
        other.iter().try_for_each(|amount| self.sub_amount(amount))
    }

    fn scale(
        &self,
        by: &Amount,
        op: &'static str,
        apply: impl Fn(&Amount, &Amount) -> Result<Amount, AmountError>,
    ) -> Result<Balance, AmountError> {
        if by.has_commodity() && self.len() > 1 {
            return Err(AmountError::MultiCommodityScale { op });
        }
        Balance::try_collect(self.iter().map(|amount| apply(amount, by)))
    }

    fn try_collect<I>(amounts: I) -> Result<Balance, AmountError>
    where
        I: IntoIterator<Item = Result<Amount, AmountError>>,
    {
        let mut balance = Balance::new();
        for amount in amounts {
            balance.add_amount(&amount?)?;
        }
        Ok(balance)
    }

    /// Scale every entry. A commoditized factor only applies to a single-commodity balance.
    pub fn mul_amount(&self, by: &Amount) -> Result<Balance, AmountError> {
        self.scale(by, "multiply", Amount::checked_mul)
    }

    pub fn div_amount(&self, by: &Amount) -> Result<Balance, AmountError> {
        if by.is_realzero() {
            return Err(AmountError::DivideByZero);
        }
        self.scale(by, "divide", Amount::checked_div)
    }

    pub fn negated(&self) -> Balance {
        self.map_entries(Amount::negated)
    }

    pub fn abs(&self) -> Balance {
        self.map_entries(Amount::abs)
    }

    pub fn rounded(&self) -> Balance {
        self.map_entries(Amount::rounded)
    }

    pub fn unrounded(&self) -> Balance {
        self.map_entries(Amount::unrounded)
    }

    /// Apply a per-entry mapping that keeps each entry's key.
    fn map_entries(&self, f: impl Fn(&Amount) -> Amount) -> Balance {
        let amounts = self
            .amounts
            .iter()
            .map(|(key, amount)| (key.clone(), f(amount)))
            .filter(|(_, amount)| !amount.is_realzero())
            .collect();
        Balance { amounts }
    }

    /// Entries that strip down to the same lot are merged.
    pub fn strip_annotations(&self, keep: &KeepDetails) -> Result<Balance, AmountError> {
        Balance::try_collect(self.iter().map(|amount| Ok(amount.strip_annotations(keep))))
    }

    /// Entries that reduce to the same unit are merged.
    pub fn reduced(&self) -> Result<Balance, AmountError> {
        Balance::try_collect(self.iter().map(Amount::reduced))
    }

    /// Market value of every entry at `moment`.
    pub fn value(&self, moment: Moment, prices: &dyn PriceHistory) -> Result<Balance, AmountError> {
        Balance::try_collect(self.iter().map(|amount| amount.value(moment, prices)))
    }

    /// Order by the sign of the difference. A difference with both positive and
    /// negative entries has no order.
    pub fn compare(&self, other: &Balance) -> Result<Ordering, AmountError> {
        let mut difference = self.clone();
        difference.sub_balance(other)?;
        if difference.is_empty() {
            return Ok(Ordering::Equal);
        }
        if difference.iter().all(|a| a.sign() == Ordering::Greater) {
            Ok(Ordering::Greater)
        } else if difference.iter().all(|a| a.sign() == Ordering::Less) {
            Ok(Ordering::Less)
        } else {
            Err(AmountError::Incomparable {
                left: self.to_string(),
                right: other.to_string(),
            })
        }
    }

    /// Write one amount per line, right-aligned: the first line in `first_width`
    /// columns and the rest in `latter_width` (defaulting to `first_width`).
    pub fn print(
        &self,
        out: &mut dyn io::Write,
        first_width: usize,
        latter_width: Option<usize>,
    ) -> io::Result<()> {
        if self.is_empty() {
            return write!(out, "{:>width$}", 0, width = first_width);
        }
        let latter_width = latter_width.unwrap_or(first_width);
        for (index, amount) in self.iter().enumerate() {
            if index == 0 {
                write!(out, "{:>width$}", amount.to_string(), width = first_width)?;
            } else {
                writeln!(out)?;
                write!(out, "{:>width$}", amount.to_string(), width = latter_width)?;
            }
        }
        Ok(())
    }
}

impl From<Amount> for Balance {
    fn from(amount: Amount) -> Self {
        let mut balance = Balance::new();
        if !amount.is_realzero() {
            balance.amounts.insert(AmountKey::of(&amount), amount);
        }
        balance
    }
}

impl TryFrom<Vec<Amount>> for Balance {
    type Error = AmountError;

    /// Sum the amounts.
    fn try_from(amounts: Vec<Amount>) -> Result<Self, Self::Error> {
        Balance::try_collect(amounts.into_iter().map(Ok))
    }
}

impl From<Balance> for Vec<Amount> {
    fn from(balance: Balance) -> Self {
        balance.into_iter().collect()
    }
}

impl IntoIterator for Balance {
    type Item = Amount;
    type IntoIter = btree_map::IntoValues<AmountKey, Amount>;

    fn into_iter(self) -> Self::IntoIter {
        self.amounts.into_values()
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "0");
        }
        for (index, amount) in self.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", amount)?;
        }
        Ok(())
    }
}
