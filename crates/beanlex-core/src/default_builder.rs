//! The reference [`Builder`] implementation, producing the concrete AST
//! defined in [`crate::value`] and [`crate::directive`].

use rust_decimal::Decimal;

use crate::builder::Builder;
use crate::directive::{
    Check, Close, Directive, Document, Event, Note, Open, Pad, Posting, Price, Transaction,
};
use crate::location::SourceLoc;
use crate::value::{Account, Amount, Currency, LotCostDate, Position};

/// An error recorded by [`DefaultBuilder::error`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderError {
    /// Human-readable message.
    pub message: String,
    /// Where it occurred.
    pub loc: SourceLoc,
}

/// A file-level `option "name" "value"` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionEntry {
    /// Option name.
    pub name: String,
    /// Option value.
    pub value: String,
}

/// The stock [`Builder`]: builds [`Directive`] values, tracks the
/// `pushtag`/`poptag` stack, collects `option` entries, and records errors
/// instead of failing the parse outright.
///
/// A transaction's final tag set is its own written tags plus every tag
/// currently on the stack, deduplicated.
#[derive(Debug, Default)]
pub struct DefaultBuilder {
    tag_stack: Vec<String>,
    options: Vec<OptionEntry>,
    errors: Vec<BuilderError>,
    result: Option<Vec<Directive>>,
}

impl DefaultBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Errors recorded over the course of the parse.
    #[must_use]
    pub fn errors(&self) -> &[BuilderError] {
        &self.errors
    }

    /// Options recorded over the course of the parse.
    #[must_use]
    pub fn options(&self) -> &[OptionEntry] {
        &self.options
    }

    /// The final declaration list, if [`Builder::store_result`] was called.
    #[must_use]
    pub fn into_result(self) -> Option<Vec<Directive>> {
        self.result
    }
}

impl Builder for DefaultBuilder {
    type Date = chrono::NaiveDate;
    type Account = Account;
    type Currency = Currency;
    type Str = String;
    type Number = Decimal;
    type Tag = String;
    type Link = String;
    type Amount = Amount;
    type Position = Position;
    type LotCostDate = LotCostDate;
    type Posting = Posting;
    type Directive = Directive;
    type TagList = Vec<String>;
    type LinkList = Vec<String>;
    type PostingList = Vec<Posting>;
    type CurrencyList = Vec<Currency>;
    type DeclarationList = Vec<Directive>;

    fn date(&mut self, text: &str, loc: &SourceLoc) -> Self::Date {
        let normalized = text.replace('/', "-");
        normalized.parse().unwrap_or_else(|_| {
            self.error(&format!("invalid date literal {text:?}"), loc);
            chrono::NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()
        })
    }

    fn account(&mut self, text: &str, _loc: &SourceLoc) -> Self::Account {
        Account::new(text)
    }

    fn currency(&mut self, text: &str, _loc: &SourceLoc) -> Self::Currency {
        Currency::new(text)
    }

    fn string(&mut self, text: &str, _loc: &SourceLoc) -> Self::Str {
        text.to_string()
    }

    fn number(&mut self, text: &str, loc: &SourceLoc) -> Self::Number {
        let cleaned: String = text.chars().filter(|c| *c != ',').collect();
        cleaned.parse().unwrap_or_else(|_| {
            self.error(&format!("invalid number literal {text:?}"), loc);
            Decimal::ZERO
        })
    }

    fn tag(&mut self, text: &str, _loc: &SourceLoc) -> Self::Tag {
        text.to_string()
    }

    fn link(&mut self, text: &str, _loc: &SourceLoc) -> Self::Link {
        text.to_string()
    }

    fn tags_list_empty(&mut self) -> Self::TagList {
        Vec::new()
    }

    fn tags_list_append(&mut self, mut list: Self::TagList, tag: Self::Tag) -> Self::TagList {
        list.push(tag);
        list
    }

    fn links_list_empty(&mut self) -> Self::LinkList {
        Vec::new()
    }

    fn links_list_append(&mut self, mut list: Self::LinkList, link: Self::Link) -> Self::LinkList {
        list.push(link);
        list
    }

    fn posting_list_empty(&mut self) -> Self::PostingList {
        Vec::new()
    }

    fn posting_list_append(
        &mut self,
        mut list: Self::PostingList,
        posting: Self::Posting,
    ) -> Self::PostingList {
        list.push(posting);
        list
    }

    fn currency_list_empty(&mut self) -> Self::CurrencyList {
        Vec::new()
    }

    fn currency_list_append(
        &mut self,
        mut list: Self::CurrencyList,
        currency: Self::Currency,
    ) -> Self::CurrencyList {
        list.push(currency);
        list
    }

    fn declarations_empty(&mut self) -> Self::DeclarationList {
        Vec::new()
    }

    fn declarations_append(
        &mut self,
        mut list: Self::DeclarationList,
        directive: Self::Directive,
    ) -> Self::DeclarationList {
        list.push(directive);
        list
    }

    fn amount(&mut self, number: Self::Number, currency: Self::Currency) -> Self::Amount {
        Amount::new(number, currency)
    }

    fn position(&mut self, amount: Self::Amount, lot: Option<Self::LotCostDate>) -> Self::Position {
        match lot {
            Some(lot) => Position::new(amount).with_lot(lot),
            None => Position::new(amount),
        }
    }

    fn lot_cost_date(
        &mut self,
        amount: Self::Amount,
        date: Option<Self::Date>,
    ) -> Self::LotCostDate {
        match date {
            Some(date) => LotCostDate::new(amount).with_date(date),
            None => LotCostDate::new(amount),
        }
    }

    fn posting(
        &mut self,
        flag: Option<char>,
        account: Self::Account,
        position: Option<Self::Position>,
        price: Option<Self::Amount>,
        price_is_total: bool,
        loc: &SourceLoc,
    ) -> Self::Posting {
        Posting {
            account,
            position,
            price,
            price_is_total,
            flag,
            loc: loc.clone(),
        }
    }

    fn transaction(
        &mut self,
        date: Self::Date,
        flag: char,
        payee: Option<Self::Str>,
        narration: Self::Str,
        tags: Self::TagList,
        links: Self::LinkList,
        postings: Self::PostingList,
        loc: &SourceLoc,
    ) -> Self::Directive {
        let mut all_tags = tags;
        for pushed in &self.tag_stack {
            if !all_tags.contains(pushed) {
                all_tags.push(pushed.clone());
            }
        }
        let loc = postings
            .iter()
            .fold(loc.clone(), |acc, p| acc.merge(&p.loc));
        Directive::Transaction(Transaction {
            date,
            flag,
            payee,
            narration,
            tags: all_tags,
            links,
            postings,
            loc,
        })
    }

    fn open(
        &mut self,
        date: Self::Date,
        account: Self::Account,
        currencies: Self::CurrencyList,
        loc: &SourceLoc,
    ) -> Self::Directive {
        Directive::Open(Open {
            date,
            account,
            currencies,
            loc: loc.clone(),
        })
    }

    fn close(&mut self, date: Self::Date, account: Self::Account, loc: &SourceLoc) -> Self::Directive {
        Directive::Close(Close {
            date,
            account,
            loc: loc.clone(),
        })
    }

    fn pad(
        &mut self,
        date: Self::Date,
        account: Self::Account,
        source_account: Self::Account,
        loc: &SourceLoc,
    ) -> Self::Directive {
        Directive::Pad(Pad {
            date,
            account,
            source_account,
            loc: loc.clone(),
        })
    }

    fn check(
        &mut self,
        date: Self::Date,
        account: Self::Account,
        amount: Self::Amount,
        loc: &SourceLoc,
    ) -> Self::Directive {
        Directive::Check(Check {
            date,
            account,
            amount,
            loc: loc.clone(),
        })
    }

    fn price(
        &mut self,
        date: Self::Date,
        currency: Self::Currency,
        amount: Self::Amount,
        loc: &SourceLoc,
    ) -> Self::Directive {
        Directive::Price(Price {
            date,
            currency,
            amount,
            loc: loc.clone(),
        })
    }

    fn event(
        &mut self,
        date: Self::Date,
        name: Self::Str,
        value: Self::Str,
        loc: &SourceLoc,
    ) -> Self::Directive {
        Directive::Event(Event {
            date,
            name,
            value,
            loc: loc.clone(),
        })
    }

    fn note(
        &mut self,
        date: Self::Date,
        account: Self::Account,
        comment: Self::Str,
        loc: &SourceLoc,
    ) -> Self::Directive {
        Directive::Note(Note {
            date,
            account,
            comment,
            loc: loc.clone(),
        })
    }

    fn document(
        &mut self,
        date: Self::Date,
        account: Self::Account,
        filename: Self::Str,
        loc: &SourceLoc,
    ) -> Self::Directive {
        Directive::Document(Document {
            date,
            account,
            filename,
            loc: loc.clone(),
        })
    }

    fn pushtag(&mut self, tag: Self::Tag, _loc: &SourceLoc) {
        self.tag_stack.push(tag);
    }

    fn poptag(&mut self, tag: Self::Tag, loc: &SourceLoc) {
        match self.tag_stack.iter().rposition(|t| *t == tag) {
            Some(idx) => {
                self.tag_stack.remove(idx);
            }
            None => self.error(&format!("poptag of unpushed tag #{tag}"), loc),
        }
    }

    fn option(&mut self, name: Self::Str, value: Self::Str, _loc: &SourceLoc) {
        self.options.push(OptionEntry { name, value });
    }

    fn error(&mut self, message: &str, loc: &SourceLoc) {
        self.errors.push(BuilderError {
            message: message.to_string(),
            loc: loc.clone(),
        });
    }

    fn store_result(&mut self, declarations: Self::DeclarationList) {
        self.result = Some(declarations);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc() -> SourceLoc {
        SourceLoc::point("ledger.bean", 1, 1)
    }

    #[test]
    fn pushed_tags_merge_into_transaction() {
        let mut b = DefaultBuilder::new();
        b.pushtag("trip".to_string(), &loc());
        let date = b.date("2024-01-01", &loc());
        let narration = b.string("Lunch", &loc());
        let tags = b.tags_list_empty();
        let links = b.links_list_empty();
        let postings = b.posting_list_empty();
        let directive = b.transaction(date, '*', None, narration, tags, links, postings, &loc());
        match directive {
            Directive::Transaction(t) => assert_eq!(t.tags, vec!["trip".to_string()]),
            other => panic!("expected transaction, got {other:?}"),
        }
    }

    #[test]
    fn poptag_without_push_records_error() {
        let mut b = DefaultBuilder::new();
        b.poptag("unknown".to_string(), &loc());
        assert_eq!(b.errors().len(), 1);
    }

    #[test]
    fn invalid_number_literal_records_error_and_zero() {
        let mut b = DefaultBuilder::new();
        let n = b.number("12x", &loc());
        assert_eq!(n, Decimal::ZERO);
        assert_eq!(b.errors().len(), 1);
    }

    #[test]
    fn date_accepts_slash_separator() {
        let mut b = DefaultBuilder::new();
        let d = b.date("2024/03/01", &loc());
        assert_eq!(d, chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn store_result_roundtrips() {
        let mut b = DefaultBuilder::new();
        let list = b.declarations_empty();
        b.store_result(list);
        assert_eq!(b.into_result(), Some(Vec::new()));
    }
}
