//! Quantities with a symbol, used for voting power and supply.
//!
//! Amounts are fixed-point integers in the smallest unit of their symbol to avoid
//! floating-point drift. Arithmetic between different symbols is refused.

use crate::error::ContentError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A token symbol: ticker code plus the number of decimal places.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Symbol {
    pub code: String,
    pub precision: u8,
}

impl Symbol {
    pub fn new(code: impl Into<String>, precision: u8) -> Self {
        Self {
            code: code.into(),
            precision,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.precision, self.code)
    }
}

/// An amount of a given symbol, stored as raw units.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Asset {
    amount: i64,
    symbol: Symbol,
}

impl Asset {
    pub fn new(amount: i64, symbol: Symbol) -> Self {
        Self { amount, symbol }
    }

    pub fn zero(symbol: Symbol) -> Self {
        Self::new(0, symbol)
    }

    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }

    fn same_symbol(&self, other: &Self) -> Result<(), ContentError> {
        if self.symbol == other.symbol {
            Ok(())
        } else {
            Err(ContentError::SymbolMismatch {
                left: self.symbol.to_string(),
                right: other.symbol.to_string(),
            })
        }
    }

    /// Add two assets of the same symbol.
    pub fn checked_add(&self, other: &Self) -> Result<Self, ContentError> {
        self.same_symbol(other)?;
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or(ContentError::Overflow)?;
        Ok(Self::new(amount, self.symbol.clone()))
    }

    /// Scale by a basis-point factor (10_000 = 1.0), rounding toward zero.
    pub fn scale_bps(&self, bps: u32) -> Self {
        let scaled = (self.amount as i128 * bps as i128) / 10_000;
        let amount = scaled.clamp(i64::MIN as i128, i64::MAX as i128) as i64;
        Self::new(amount, self.symbol.clone())
    }

    /// Compare two assets of the same symbol.
    pub fn cmp_amount(&self, other: &Self) -> Result<std::cmp::Ordering, ContentError> {
        self.same_symbol(other)?;
        Ok(self.amount.cmp(&other.amount))
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = self.symbol.precision as u32;
        if precision == 0 {
            return write!(f, "{} {}", self.amount, self.symbol.code);
        }
        let Some(unit) = 10i128.checked_pow(precision) else {
            return write!(f, "{}e-{} {}", self.amount, precision, self.symbol.code);
        };
        let raw = self.amount as i128;
        let sign = if raw < 0 { "-" } else { "" };
        let abs = raw.abs();
        write!(
            f,
            "{}{}.{:0width$} {}",
            sign,
            abs / unit,
            abs % unit,
            self.symbol.code,
            width = precision as usize
        )
    }
}
