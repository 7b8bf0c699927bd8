//! Textual output

use crate::repr::Repr;
use crate::value::Value;
use std::fmt;
use std::io;
use tally_types::format_moment;

/// Column layout for [`Value::print`].
///
/// `first` is the width of the first line; balances spill their remaining
/// commodities onto further lines of width `latter` (default: `first`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrintWidths {
    pub first: usize,
    pub latter: Option<usize>,
}

impl PrintWidths {
    pub fn new(first: usize, latter: Option<usize>) -> Self {
        PrintWidths { first, latter }
    }
}

impl Value {
    /// Write the value for tabular output. Strings are left-justified, every
    /// other variant right-justified; balances print one commodity per line.
    pub fn print(
        &self,
        out: &mut dyn io::Write,
        first_width: usize,
        latter_width: Option<usize>,
    ) -> io::Result<()> {
        match self.repr() {
            Repr::Balance(balance) => balance.print(out, first_width, latter_width),
            Repr::BalancePair(pair) => pair.print(out, first_width, latter_width),
            Repr::String(text) => write!(out, "{:<width$}", text, width = first_width),
            Repr::Sequence(items) => {
                write!(out, "(")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        write!(out, ", ")?;
                    }
                    item.print(out, first_width, latter_width)?;
                }
                write!(out, ")")
            }
            _ => write!(out, "{:>width$}", self.to_string(), width = first_width),
        }
    }

    pub fn print_with(&self, out: &mut dyn io::Write, widths: &PrintWidths) -> io::Result<()> {
        self.print(out, widths.first, widths.latter)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.repr() {
            Repr::Boolean(b) => write!(f, "{}", b),
            Repr::Integer(n) => write!(f, "{}", n),
            Repr::Datetime(moment) => write!(f, "{}", format_moment(moment)),
            Repr::Amount(amount) => write!(f, "{}", amount),
            Repr::Balance(balance) => write!(f, "{}", balance),
            Repr::BalancePair(pair) => write!(f, "{}", pair),
            Repr::String(text) => write!(f, "{}", text),
            Repr::XmlNode(node) => write!(f, "<node #{}>", node.0),
            Repr::Pointer(handle) => write!(f, "<pointer #{}>", handle.0),
            Repr::Sequence(items) => {
                write!(f, "(")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
        }
    }
}
