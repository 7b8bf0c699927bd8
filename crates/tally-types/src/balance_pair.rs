//! Balances that remember what was paid for them

use crate::amount::Amount;
use crate::annotation::KeepDetails;
use crate::balance::Balance;
use crate::error::AmountError;
use crate::moment::Moment;
use crate::price::PriceHistory;
use std::cmp::Ordering;
use std::fmt;
use std::io;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A balance (the quantity held) together with its cost basis.
///
/// Without a cost the pair behaves exactly like its quantity. Once either side
/// of an addition carries a cost, the side that lacks one contributes its
/// quantity as cost.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BalancePair {
    quantity: Balance,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    cost: Option<Balance>,
}

impl BalancePair {
    pub fn new(quantity: Balance, cost: Option<Balance>) -> Self {
        BalancePair { quantity, cost }
    }

    pub fn with_cost(quantity: Balance, cost: Balance) -> Self {
        BalancePair::new(quantity, Some(cost))
    }

    pub fn quantity(&self) -> &Balance {
        &self.quantity
    }

    pub fn cost(&self) -> Option<&Balance> {
        self.cost.as_ref()
    }

    pub fn has_cost(&self) -> bool {
        self.cost.is_some()
    }

    /// The cost basis, or the quantity itself when none was recorded.
    pub fn cost_or_quantity(&self) -> &Balance {
        self.cost.as_ref().unwrap_or(&self.quantity)
    }

    pub fn into_parts(self) -> (Balance, Option<Balance>) {
        (self.quantity, self.cost)
    }

    pub fn is_realzero(&self) -> bool {
        self.quantity.is_realzero() && self.cost.as_ref().map_or(true, Balance::is_realzero)
    }

    pub fn is_zero(&self) -> bool {
        self.quantity.is_zero() && self.cost.as_ref().map_or(true, Balance::is_zero)
    }

    pub fn add_pair(&mut self, other: &BalancePair) -> Result<(), AmountError> {
        if self.cost.is_some() || other.cost.is_some() {
            let mut cost = self.cost_or_quantity().clone();
            cost.add_balance(other.cost_or_quantity())?;
            self.cost = Some(cost);
        }
        self.quantity.add_balance(&other.quantity)
    }

    pub fn sub_pair(&mut self, other: &BalancePair) -> Result<(), AmountError> {
        self.add_pair(&other.negated())
    }

    /// Add `amount`, optionally acquired at total `cost`.
    pub fn add_amount(&mut self, amount: &Amount, cost: Option<&Amount>) -> Result<(), AmountError> {
        if let Some(cost) = cost {
            let mut basis = self.cost_or_quantity().clone();
            basis.add_amount(cost)?;
            self.cost = Some(basis);
        } else if let Some(basis) = self.cost.as_mut() {
            basis.add_amount(amount)?;
        }
        self.quantity.add_amount(amount)
    }

    pub fn add_balance(&mut self, balance: &Balance) -> Result<(), AmountError> {
        if let Some(cost) = self.cost.as_mut() {
            cost.add_balance(balance)?;
        }
        self.quantity.add_balance(balance)
    }

    pub fn sub_balance(&mut self, balance: &Balance) -> Result<(), AmountError> {
        self.add_balance(&balance.negated())
    }

    fn try_map(
        &self,
        f: impl Fn(&Balance) -> Result<Balance, AmountError>,
    ) -> Result<BalancePair, AmountError> {
        Ok(BalancePair {
            quantity: f(&self.quantity)?,
            cost: self.cost.as_ref().map(&f).transpose()?,
        })
    }

    fn map(&self, f: impl Fn(&Balance) -> Balance) -> BalancePair {
        BalancePair {
            quantity: f(&self.quantity),
            cost: self.cost.as_ref().map(f),
        }
    }

    pub fn mul_amount(&self, by: &Amount) -> Result<BalancePair, AmountError> {
        self.try_map(|balance| balance.mul_amount(by))
    }

    pub fn div_amount(&self, by: &Amount) -> Result<BalancePair, AmountError> {
        self.try_map(|balance| balance.div_amount(by))
    }

    pub fn negated(&self) -> BalancePair {
        self.map(Balance::negated)
    }

    pub fn abs(&self) -> BalancePair {
        self.map(Balance::abs)
    }

    pub fn rounded(&self) -> BalancePair {
        self.map(Balance::rounded)
    }

    pub fn unrounded(&self) -> BalancePair {
        self.map(Balance::unrounded)
    }

    pub fn reduced(&self) -> Result<BalancePair, AmountError> {
        self.try_map(Balance::reduced)
    }

    pub fn strip_annotations(&self, keep: &KeepDetails) -> Result<BalancePair, AmountError> {
        self.try_map(|balance| balance.strip_annotations(keep))
    }

    /// Market value of the quantity; the cost basis is historical and left out.
    pub fn value(&self, moment: Moment, prices: &dyn PriceHistory) -> Result<Balance, AmountError> {
        self.quantity.value(moment, prices)
    }

    pub fn compare(&self, other: &BalancePair) -> Result<Ordering, AmountError> {
        self.quantity.compare(&other.quantity)
    }

    pub fn print(
        &self,
        out: &mut dyn io::Write,
        first_width: usize,
        latter_width: Option<usize>,
    ) -> io::Result<()> {
        self.quantity.print(out, first_width, latter_width)
    }
}

impl From<Balance> for BalancePair {
    fn from(quantity: Balance) -> Self {
        BalancePair::new(quantity, None)
    }
}

impl From<Amount> for BalancePair {
    fn from(amount: Amount) -> Self {
        BalancePair::from(Balance::from(amount))
    }
}

impl fmt::Display for BalancePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.quantity)
    }
}
