//! Leaf semantic values: accounts, currencies, amounts, and positions.
//!
//! These are the types the reference [`crate::builder::Builder`] implementation
//! ([`crate::default_builder::DefaultBuilder`]) constructs from lexer text
//! slices. A different host could implement the same trait against its own
//! representations; the lexer and parser never depend on these concrete
//! types directly.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::intern::InternedStr;

/// A ledger account name, e.g. `Assets:Bank:Checking`.
///
/// Interned: the five-way fan-out of account prefixes (`Assets`,
/// `Liabilities`, `Equity`, `Income`, `Expenses`) means the same account
/// string recurs on every posting that touches it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Account(InternedStr);

impl Account {
    /// Wrap an already-validated account string.
    #[must_use]
    pub fn new(s: impl Into<InternedStr>) -> Self {
        Self(s.into())
    }

    /// Borrow the account as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialEq<str> for Account {
    fn eq(&self, other: &str) -> bool {
        self.0.as_str() == other
    }
}

/// A currency or commodity code, e.g. `USD`, `AAPL`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Currency(InternedStr);

impl Currency {
    /// Wrap an already-validated currency string.
    #[must_use]
    pub fn new(s: impl Into<InternedStr>) -> Self {
        Self(s.into())
    }

    /// Borrow the currency as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialEq<str> for Currency {
    fn eq(&self, other: &str) -> bool {
        self.0.as_str() == other
    }
}

/// A number paired with a currency, e.g. `100.00 USD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    /// The decimal quantity, preserving the lexeme's scale.
    pub number: Decimal,
    /// The currency code.
    pub currency: Currency,
}

impl Amount {
    /// Create a new amount.
    #[must_use]
    pub const fn new(number: Decimal, currency: Currency) -> Self {
        Self { number, currency }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.number, self.currency)
    }
}

/// Lot/cost/date information in braces, e.g. `{2 USD}` or `{2 USD / 2024-01-01}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotCostDate {
    /// The cost amount.
    pub amount: Amount,
    /// An optional acquisition date.
    pub date: Option<chrono::NaiveDate>,
}

impl LotCostDate {
    /// Create a new lot/cost/date without a date.
    #[must_use]
    pub const fn new(amount: Amount) -> Self {
        Self { amount, date: None }
    }

    /// Attach an acquisition date.
    #[must_use]
    pub const fn with_date(mut self, date: chrono::NaiveDate) -> Self {
        self.date = Some(date);
        self
    }
}

impl fmt::Display for LotCostDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}", self.amount)?;
        if let Some(date) = self.date {
            write!(f, " / {date}")?;
        }
        write!(f, "}}")
    }
}

/// An amount plus optional lot/cost/date information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// The position's amount.
    pub amount: Amount,
    /// Optional cost/lot information.
    pub lot: Option<LotCostDate>,
}

impl Position {
    /// Create a position with no lot/cost information.
    #[must_use]
    pub const fn new(amount: Amount) -> Self {
        Self { amount, lot: None }
    }

    /// Attach lot/cost/date information.
    #[must_use]
    pub fn with_lot(mut self, lot: LotCostDate) -> Self {
        self.lot = Some(lot);
        self
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.amount)?;
        if let Some(lot) = &self.lot {
            write!(f, " {lot}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn amount_display() {
        let a = Amount::new(dec!(100.00), Currency::new("USD"));
        assert_eq!(format!("{a}"), "100.00 USD");
    }

    #[test]
    fn lot_cost_date_display_without_date() {
        let lot = LotCostDate::new(Amount::new(dec!(2), Currency::new("USD")));
        assert_eq!(format!("{lot}"), "{2 USD}");
    }

    #[test]
    fn lot_cost_date_display_with_date() {
        let lot = LotCostDate::new(Amount::new(dec!(2), Currency::new("USD")))
            .with_date(chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(format!("{lot}"), "{2 USD / 2024-01-01}");
    }

    #[test]
    fn account_compares_to_str() {
        let a = Account::new("Assets:Cash");
        assert_eq!(a.as_str(), "Assets:Cash");
    }
}
