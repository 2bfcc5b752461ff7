//! Directive records: the top-level declarations a ledger file is made of.
//!
//! Each variant here corresponds to one keyword in the grammar (`txn`,
//! `open`, `close`, `pad`, `check`, `price`, `event`, `note`, `document`)
//! plus the bare-flag transaction form. Every variant carries a
//! [`SourceLoc`] so diagnostics and downstream tooling can point back at
//! the exact line a directive came from.

use std::fmt;

use crate::location::SourceLoc;
use crate::value::{Account, Amount, Currency, Position};

/// A metadata-free string attached to a posting or directive: a tag or link.
pub type Tag = String;

/// See [`Tag`].
pub type Link = String;

/// One leg of a transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Posting {
    /// Account this leg debits or credits.
    pub account: Account,
    /// Amount and optional cost/lot, absent for an elided (balancing) posting.
    pub position: Option<Position>,
    /// `@` or `@@` price annotation.
    pub price: Option<Amount>,
    /// `true` when the price annotation was `@@` (total price) rather than
    /// `@` (per-unit price).
    pub price_is_total: bool,
    /// Optional per-posting flag (e.g. `!` to flag a leg as needing review).
    pub flag: Option<char>,
    /// Where this posting appears in the source.
    pub loc: SourceLoc,
}

impl fmt::Display for Posting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(flag) = self.flag {
            write!(f, "{flag} ")?;
        }
        write!(f, "{}", self.account)?;
        if let Some(position) = &self.position {
            write!(f, "  {position}")?;
        }
        if let Some(price) = &self.price {
            let at = if self.price_is_total { "@@" } else { "@" };
            write!(f, " {at} {price}")?;
        }
        Ok(())
    }
}

/// A `txn` (or bare-flag) directive: the core double-entry record.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// The directive date.
    pub date: chrono::NaiveDate,
    /// Status flag: `*` (cleared), `!` (pending), or another character
    /// accepted by the grammar's `FLAG` token.
    pub flag: char,
    /// Optional payee string, present when the narration is preceded by a
    /// second quoted string (`"Payee" "Narration"`).
    pub payee: Option<String>,
    /// The transaction's narration/description.
    pub narration: String,
    /// Tags attached directly to this transaction, plus any still-pushed
    /// tags from enclosing `pushtag` directives.
    pub tags: Vec<Tag>,
    /// Links attached to this transaction.
    pub links: Vec<Link>,
    /// This transaction's postings.
    pub postings: Vec<Posting>,
    /// Source location, widened to cover the last posting line.
    pub loc: SourceLoc,
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date, self.flag)?;
        if let Some(payee) = &self.payee {
            write!(f, " \"{payee}\"")?;
        }
        write!(f, " \"{}\"", self.narration)?;
        for tag in &self.tags {
            write!(f, " #{tag}")?;
        }
        for link in &self.links {
            write!(f, " ^{link}")?;
        }
        Ok(())
    }
}

/// An `open` directive: declares an account and the currencies it may hold.
#[derive(Debug, Clone, PartialEq)]
pub struct Open {
    /// Directive date.
    pub date: chrono::NaiveDate,
    /// Account being opened.
    pub account: Account,
    /// Currency constraint list; empty means unconstrained.
    pub currencies: Vec<Currency>,
    /// Source location.
    pub loc: SourceLoc,
}

/// A `close` directive: declares that an account accepts no further postings.
#[derive(Debug, Clone, PartialEq)]
pub struct Close {
    /// Directive date.
    pub date: chrono::NaiveDate,
    /// Account being closed.
    pub account: Account,
    /// Source location.
    pub loc: SourceLoc,
}

/// A `pad` directive: inserts a balancing transaction between two accounts.
#[derive(Debug, Clone, PartialEq)]
pub struct Pad {
    /// Directive date.
    pub date: chrono::NaiveDate,
    /// Account to pad.
    pub account: Account,
    /// Account the padding amount is drawn from.
    pub source_account: Account,
    /// Source location.
    pub loc: SourceLoc,
}

/// A `check`/`balance` directive: asserts an account's balance at a date.
#[derive(Debug, Clone, PartialEq)]
pub struct Check {
    /// Directive date.
    pub date: chrono::NaiveDate,
    /// Account whose balance is being asserted.
    pub account: Account,
    /// Expected amount.
    pub amount: Amount,
    /// Source location.
    pub loc: SourceLoc,
}

/// A `price` directive: records a commodity's price on a date.
#[derive(Debug, Clone, PartialEq)]
pub struct Price {
    /// Directive date.
    pub date: chrono::NaiveDate,
    /// The currency being priced.
    pub currency: Currency,
    /// Its price, in another currency.
    pub amount: Amount,
    /// Source location.
    pub loc: SourceLoc,
}

/// An `event` directive: records a key/value fact as of a date.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Directive date.
    pub date: chrono::NaiveDate,
    /// Event type name.
    pub name: String,
    /// Event value.
    pub value: String,
    /// Source location.
    pub loc: SourceLoc,
}

/// A `note` directive: attaches a free-form note to an account at a date.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    /// Directive date.
    pub date: chrono::NaiveDate,
    /// Account the note is about.
    pub account: Account,
    /// The note's text.
    pub comment: String,
    /// Source location.
    pub loc: SourceLoc,
}

/// A `document` directive: links an external file to an account at a date.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Directive date.
    pub date: chrono::NaiveDate,
    /// Account the document is about.
    pub account: Account,
    /// Filename, taken verbatim from the grammar's STRING token; not
    /// validated against the filesystem.
    pub filename: String,
    /// Source location.
    pub loc: SourceLoc,
}

/// Any one top-level directive record.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    /// See [`Transaction`].
    Transaction(Transaction),
    /// See [`Open`].
    Open(Open),
    /// See [`Close`].
    Close(Close),
    /// See [`Pad`].
    Pad(Pad),
    /// See [`Check`].
    Check(Check),
    /// See [`Price`].
    Price(Price),
    /// See [`Event`].
    Event(Event),
    /// See [`Note`].
    Note(Note),
    /// See [`Document`].
    Document(Document),
}

impl Directive {
    /// The location this directive was built from.
    #[must_use]
    pub const fn loc(&self) -> &SourceLoc {
        match self {
            Self::Transaction(d) => &d.loc,
            Self::Open(d) => &d.loc,
            Self::Close(d) => &d.loc,
            Self::Pad(d) => &d.loc,
            Self::Check(d) => &d.loc,
            Self::Price(d) => &d.loc,
            Self::Event(d) => &d.loc,
            Self::Note(d) => &d.loc,
            Self::Document(d) => &d.loc,
        }
    }

    /// The date every directive carries.
    #[must_use]
    pub const fn date(&self) -> chrono::NaiveDate {
        match self {
            Self::Transaction(d) => d.date,
            Self::Open(d) => d.date,
            Self::Close(d) => d.date,
            Self::Pad(d) => d.date,
            Self::Check(d) => d.date,
            Self::Price(d) => d.date,
            Self::Event(d) => d.date,
            Self::Note(d) => d.date,
            Self::Document(d) => d.date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn loc() -> SourceLoc {
        SourceLoc::point("ledger.bean", 1, 1)
    }

    #[test]
    fn directive_date_reaches_through_every_variant() {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let open = Directive::Open(Open {
            date,
            account: Account::new("Assets:Cash"),
            currencies: vec![],
            loc: loc(),
        });
        assert_eq!(open.date(), date);
    }

    #[test]
    fn posting_display_with_price() {
        let posting = Posting {
            account: Account::new("Assets:Cash"),
            position: Some(Position::new(Amount::new(dec!(10), Currency::new("USD")))),
            price: Some(Amount::new(dec!(1.1), Currency::new("EUR"))),
            price_is_total: false,
            flag: None,
            loc: loc(),
        };
        assert_eq!(format!("{posting}"), "Assets:Cash  10 USD @ 1.1 EUR");
    }

    #[test]
    fn transaction_display_includes_tags_and_links() {
        let txn = Transaction {
            date: chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            flag: '*',
            payee: Some("Store".to_string()),
            narration: "Groceries".to_string(),
            tags: vec!["food".to_string()],
            links: vec!["receipt-1".to_string()],
            postings: vec![],
            loc: loc(),
        };
        assert_eq!(
            format!("{txn}"),
            "2024-03-01 * \"Store\" \"Groceries\" #food ^receipt-1"
        );
    }
}
