//! Textual amount literals: `$1,000.50`, `-10 EUR`, `10 AAPL {$50} [2024-01-15] (lot1)`

use super::Amount;
use crate::annotation::{Annotation, Price};
use crate::commodity::{Commodity, SYMBOL_DELIMITERS};
use crate::error::AmountError;
use crate::moment::parse_date;
use rust_decimal::Decimal;
use std::str::FromStr;

pub(super) fn parse_amount(input: &str) -> Result<Amount, AmountError> {
    let mut parser = Parser { input, rest: input };
    let amount = parser.amount()?;
    parser.skip_whitespace();
    if !parser.rest.is_empty() {
        return Err(parser.error(format!("unexpected '{}'", parser.rest)));
    }
    Ok(amount)
}

struct Parser<'a> {
    input: &'a str,
    rest: &'a str,
}

impl<'a> Parser<'a> {
    fn error(&self, reason: impl Into<String>) -> AmountError {
        AmountError::Parse {
            input: self.input.to_string(),
            reason: reason.into(),
        }
    }

    fn skip_whitespace(&mut self) {
        self.rest = self.rest.trim_start();
    }

    fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    fn eat(&mut self, c: char) -> bool {
        match self.rest.strip_prefix(c) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }

    fn starts_number(&self) -> bool {
        let mut chars = self.rest.chars();
        match chars.next() {
            Some(c) if c.is_ascii_digit() => true,
            Some('.') => chars.next().is_some_and(|c| c.is_ascii_digit()),
            _ => false,
        }
    }

    fn amount(&mut self) -> Result<Amount, AmountError> {
        self.skip_whitespace();
        let mut negative = self.eat('-');
        self.skip_whitespace();

        let (digits, precision, commodity) = if self.starts_number() {
            let (digits, precision) = self.number()?;
            self.skip_whitespace();
            let commodity = self.symbol()?.map(Commodity::new).unwrap_or_default();
            (digits, precision, commodity)
        } else {
            let symbol = self
                .symbol()?
                .ok_or_else(|| self.error("expected a quantity or commodity"))?;
            self.skip_whitespace();
            if self.eat('-') {
                negative = !negative;
            }
            self.skip_whitespace();
            if !self.starts_number() {
                return Err(self.error("expected a quantity"));
            }
            let (digits, precision) = self.number()?;
            (digits, precision, Commodity::prefixed(symbol))
        };

        let mut quantity = Decimal::from_str(&digits).map_err(|e| self.error(e.to_string()))?;
        if negative {
            quantity = -quantity;
        }
        let annotation = self.annotation()?;
        Ok(Amount::new(quantity, commodity.with_precision(precision)).with_annotation(annotation))
    }

    /// Digits with optional thousands separators; returns the digits and the
    /// number of places after the decimal point.
    fn number(&mut self) -> Result<(String, u32), AmountError> {
        let source = self.rest;
        let end = source
            .find(|c: char| !(c.is_ascii_digit() || c == ',' || c == '.'))
            .unwrap_or(source.len());
        let (text, rest) = source.split_at(end);
        self.rest = rest;

        let digits: String = text.chars().filter(|c| *c != ',').collect();
        let precision = match digits.split_once('.') {
            Some((_, fraction)) if fraction.contains('.') => {
                return Err(self.error(format!("malformed number '{}'", text)))
            }
            Some((_, fraction)) => fraction.len() as u32,
            None => 0,
        };
        Ok((digits, precision))
    }

    fn symbol(&mut self) -> Result<Option<String>, AmountError> {
        if self.eat('"') {
            let source = self.rest;
            let end = source
                .find('"')
                .ok_or_else(|| self.error("unterminated quoted commodity"))?;
            self.rest = &source[end + 1..];
            return Ok(Some(source[..end].to_string()));
        }
        let source = self.rest;
        let end = source
            .find(|c: char| c.is_whitespace() || c.is_ascii_digit() || SYMBOL_DELIMITERS.contains(c))
            .unwrap_or(source.len());
        if end == 0 {
            return Ok(None);
        }
        let (symbol, rest) = source.split_at(end);
        self.rest = rest;
        Ok(Some(symbol.to_string()))
    }

    fn delimited(&mut self, close: char) -> Result<&'a str, AmountError> {
        let source = self.rest;
        let end = source
            .find(close)
            .ok_or_else(|| self.error(format!("missing '{}'", close)))?;
        self.rest = &source[end + close.len_utf8()..];
        Ok(&source[..end])
    }

    fn annotation(&mut self) -> Result<Annotation, AmountError> {
        let mut annotation = Annotation::default();
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('{') if annotation.price.is_none() => {
                    self.eat('{');
                    let price = parse_amount(self.delimited('}')?)?;
                    annotation.price = Some(Price::from(&price));
                }
                Some('[') if annotation.date.is_none() => {
                    self.eat('[');
                    annotation.date = Some(parse_date(self.delimited(']')?)?);
                }
                Some('(') if annotation.tag.is_none() => {
                    self.eat('(');
                    annotation.tag = Some(self.delimited(')')?.trim().to_string());
                }
                _ => return Ok(annotation),
            }
        }
    }
}
