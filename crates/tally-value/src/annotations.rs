//! Lot annotations, rounding and market valuation

use crate::error::ValueError;
use crate::repr::Repr;
use crate::value::Value;
use tally_types::{now, Amount, Balance, KeepDetails, Moment, PriceHistory};

impl Value {
    fn unsupported_unary(&self, op: &'static str) -> ValueError {
        ValueError::UnsupportedUnary {
            op,
            operand: self.value_type().label(),
        }
    }

    /// Drop the annotation details `keep` does not ask for. Lots that become
    /// identical merge. Non-monetary values are returned unchanged.
    pub fn strip_annotations(&self, keep: &KeepDetails) -> Result<Value, ValueError> {
        let repr = match self.repr() {
            Repr::Amount(amount) => Repr::Amount(amount.strip_annotations(keep)),
            Repr::Balance(balance) => Repr::Balance(balance.strip_annotations(keep)?),
            Repr::BalancePair(pair) => Repr::BalancePair(pair.strip_annotations(keep)?),
            Repr::Sequence(items) => Repr::Sequence(
                items
                    .iter()
                    .map(|item| item.strip_annotations(keep))
                    .collect::<Result<_, _>>()?,
            ),
            _ => return Ok(self.clone()),
        };
        Ok(Value::from_repr(repr))
    }

    /// What was paid: the cost basis of a balance pair, the value itself for
    /// the other numeric variants.
    pub fn cost(&self) -> Result<Value, ValueError> {
        match self.repr() {
            Repr::BalancePair(pair) => Ok(Value::from(pair.cost_or_quantity().clone())),
            Repr::Boolean(_) | Repr::Integer(_) | Repr::Amount(_) | Repr::Balance(_) => {
                Ok(self.clone())
            }
            _ => Err(self.unsupported_unary("take the cost of")),
        }
    }

    /// Project one annotation detail. An amount yields its own detail; a
    /// balance yields a sequence of the details of its lots that have one.
    fn annotation_detail(
        &self,
        op: &'static str,
        detail: impl Fn(&Amount) -> Option<Value>,
    ) -> Result<Option<Value>, ValueError> {
        let from_balance = |balance: &Balance| {
            let details: Vec<Value> = balance.iter().filter_map(&detail).collect();
            (!details.is_empty()).then(|| Value::from(details))
        };
        match self.repr() {
            Repr::Amount(amount) => Ok(detail(amount)),
            Repr::Balance(balance) => Ok(from_balance(balance)),
            Repr::BalancePair(pair) => Ok(from_balance(pair.quantity())),
            Repr::Boolean(_) | Repr::Integer(_) => Ok(None),
            _ => Err(self.unsupported_unary(op)),
        }
    }

    /// Per-unit acquisition price recorded on the lot.
    pub fn annotated_price(&self) -> Result<Option<Value>, ValueError> {
        self.annotation_detail("read the price of", |amount| amount.price().map(Value::from))
    }

    /// Acquisition date recorded on the lot, as a date/time at midnight.
    pub fn annotated_date(&self) -> Result<Option<Value>, ValueError> {
        self.annotation_detail("read the date of", |amount| amount.date().map(Value::from))
    }

    pub fn annotated_tag(&self) -> Result<Option<Value>, ValueError> {
        self.annotation_detail("read the tag of", |amount| amount.tag().map(Value::string))
    }

    /// Market value at `moment` (now when `None`), using `prices`.
    ///
    /// Integers and booleans are already values. Fails with
    /// [`ValueError::MissingPrice`] if any commodity has no price on record.
    pub fn value(
        &self,
        moment: Option<Moment>,
        prices: &dyn PriceHistory,
    ) -> Result<Value, ValueError> {
        let moment = moment.unwrap_or_else(now);
        let repr = match self.repr() {
            Repr::Boolean(_) | Repr::Integer(_) => return Ok(self.clone()),
            Repr::Amount(amount) => Repr::Amount(amount.value(moment, prices)?),
            Repr::Balance(balance) => Repr::Balance(balance.value(moment, prices)?),
            Repr::BalancePair(pair) => Repr::Balance(pair.value(moment, prices)?),
            _ => return Err(self.unsupported_unary("value")),
        };
        Ok(Value::from_repr(repr))
    }

    /// Round to display precision.
    pub fn round(&self) -> Result<Value, ValueError> {
        let repr = match self.repr() {
            Repr::Boolean(_) | Repr::Integer(_) => return Ok(self.clone()),
            Repr::Amount(amount) => Repr::Amount(amount.rounded()),
            Repr::Balance(balance) => Repr::Balance(balance.rounded()),
            Repr::BalancePair(pair) => Repr::BalancePair(pair.rounded()),
            _ => return Err(self.unsupported_unary("round")),
        };
        Ok(Value::from_repr(repr))
    }

    pub fn in_place_round(&mut self) -> Result<(), ValueError> {
        *self = self.round()?;
        Ok(())
    }

    /// Display with full internal precision.
    pub fn unround(&self) -> Result<Value, ValueError> {
        let repr = match self.repr() {
            Repr::Boolean(_) | Repr::Integer(_) => return Ok(self.clone()),
            Repr::Amount(amount) => Repr::Amount(amount.unrounded()),
            Repr::Balance(balance) => Repr::Balance(balance.unrounded()),
            Repr::BalancePair(pair) => Repr::BalancePair(pair.unrounded()),
            _ => return Err(self.unsupported_unary("unround")),
        };
        Ok(Value::from_repr(repr))
    }

    pub fn in_place_unround(&mut self) -> Result<(), ValueError> {
        *self = self.unround()?;
        Ok(())
    }

    /// Express amounts in their smallest units (`2 h` as `7200 s`). Other
    /// variants are unchanged.
    pub fn reduce(&self) -> Result<Value, ValueError> {
        let repr = match self.repr() {
            Repr::Amount(amount) => Repr::Amount(amount.reduced()?),
            Repr::Balance(balance) => Repr::Balance(balance.reduced()?),
            Repr::BalancePair(pair) => Repr::BalancePair(pair.reduced()?),
            _ => return Ok(self.clone()),
        };
        Ok(Value::from_repr(repr))
    }

    pub fn in_place_reduce(&mut self) -> Result<(), ValueError> {
        *self = self.reduce()?;
        Ok(())
    }
}
