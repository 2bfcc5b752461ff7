//! The grammar driver.
//!
//! A hand-written walk over the token stream rather than a combinator
//! pipeline: the grammar in the data model is already stated as an
//! explicit shift/reduce table with one recovery production, and the
//! driver needs to be generic over an arbitrary [`Builder::Directive`]
//! associated type at every reduction. A combinator `Parser` type doesn't
//! compose cleanly against an associated-type-parameterized return value,
//! so this follows the productions directly instead, one method per
//! nonterminal, threading `&mut B` through each.
//!
//! Only one token of lookahead is ever needed (`peek`), matching the data
//! model's statement that no buffering beyond that is required.

use std::iter::Peekable;
use std::sync::Arc;

use beanlex_core::{location::SourceLoc, Builder};

use crate::error::ParseError;
use crate::lexer::Lexer;
use crate::token::Token;

/// Drives a [`Builder`] through one source file's worth of tokens.
pub struct Parser<'p, 'src, B: Builder> {
    tokens: Peekable<Lexer<'src>>,
    builder: &'p mut B,
    errors: Vec<ParseError>,
    last_loc: SourceLoc,
}

impl<'p, 'src, B: Builder> Parser<'p, 'src, B> {
    /// Create a driver over `source`, reporting locations under `filename`
    /// and shifted by `first_line_offset`.
    pub fn new(
        source: &'src str,
        filename: impl Into<Arc<str>>,
        first_line_offset: u32,
        builder: &'p mut B,
    ) -> Self {
        let filename = filename.into();
        let last_loc = SourceLoc::point(filename.clone(), 1, 1);
        Self {
            tokens: Lexer::new(source, filename, first_line_offset).peekable(),
            builder,
            errors: Vec::new(),
            last_loc,
        }
    }

    /// Run the driver to completion. Always calls `store_result` on the
    /// builder exactly once, even if syntax errors were encountered along
    /// the way; returns every diagnostic collected, in source order.
    pub fn run(mut self) -> Vec<ParseError> {
        let mut declarations = self.builder.declarations_empty();
        loop {
            let Some((tok, loc)) = self.tokens.peek().cloned() else {
                break;
            };
            match tok {
                Token::Eol | Token::Skipped => {
                    self.bump();
                }
                Token::Comment => {
                    self.bump();
                    self.expect_eol();
                }
                Token::Indent => {
                    self.bump();
                    if matches!(self.peek_kind(), Some(Token::Comment)) {
                        self.bump();
                    }
                    if matches!(self.peek_kind(), Some(Token::Eol)) {
                        self.bump();
                    }
                }
                Token::Pushtag => self.parse_pushtag(),
                Token::Poptag => self.parse_poptag(),
                Token::Option => self.parse_option(),
                Token::Date(text) => {
                    self.bump();
                    if let Some(directive) = self.parse_entry(text, &loc) {
                        declarations = self.builder.declarations_append(declarations, directive);
                    }
                }
                other => {
                    self.error(format!("unexpected {other}"), &loc);
                    self.bump();
                    self.resync();
                }
            }
        }
        self.builder.store_result(declarations);
        self.errors
    }

    // -- token stream helpers --------------------------------------------

    fn peek_kind(&mut self) -> Option<Token<'src>> {
        self.tokens.peek().map(|(t, _)| *t)
    }

    fn bump(&mut self) -> Option<(Token<'src>, SourceLoc)> {
        let next = self.tokens.next();
        if let Some((_, loc)) = &next {
            self.last_loc = loc.clone();
        }
        next
    }

    fn error(&mut self, message: impl Into<String>, loc: &SourceLoc) {
        let message = message.into();
        self.builder.error(&message, loc);
        self.errors.push(ParseError::syntax(message, loc.clone()));
    }

    /// Discard tokens until one that can begin (or trivially complete) a
    /// declaration is next, per the grammar's sole recovery production.
    fn resync(&mut self) {
        while let Some(tok) = self.peek_kind() {
            if tok.starts_declaration() {
                return;
            }
            self.bump();
        }
    }

    fn expect_eol(&mut self) {
        if matches!(self.peek_kind(), Some(Token::Comment)) {
            self.bump();
        }
        match self.peek_kind() {
            Some(Token::Eol) => {
                self.bump();
            }
            None => {}
            Some(_) => {
                let loc = self.tokens.peek().expect("just matched Some").1.clone();
                self.error("expected end of line", &loc);
                self.resync();
            }
        }
    }

    fn expect_account(&mut self, context: &str) -> Option<B::Account> {
        match self.tokens.peek().cloned() {
            Some((Token::Account(text), loc)) => {
                self.bump();
                Some(self.builder.account(text, &loc))
            }
            Some((found, loc)) => {
                self.error(format!("expected ACCOUNT in {context}, found {found}"), &loc);
                self.resync();
                None
            }
            None => {
                let loc = self.last_loc.clone();
                self.error(format!("expected ACCOUNT in {context}, found end of input"), &loc);
                None
            }
        }
    }

    fn expect_currency(&mut self, context: &str) -> Option<B::Currency> {
        match self.tokens.peek().cloned() {
            Some((Token::Currency(text), loc)) => {
                self.bump();
                Some(self.builder.currency(text, &loc))
            }
            Some((found, loc)) => {
                self.error(format!("expected CURRENCY in {context}, found {found}"), &loc);
                self.resync();
                None
            }
            None => {
                let loc = self.last_loc.clone();
                self.error(format!("expected CURRENCY in {context}, found end of input"), &loc);
                None
            }
        }
    }

    fn expect_string(&mut self, context: &str) -> Option<B::Str> {
        match self.tokens.peek().cloned() {
            Some((Token::Str(text), loc)) => {
                self.bump();
                Some(self.builder.string(text, &loc))
            }
            Some((found, loc)) => {
                self.error(format!("expected STRING in {context}, found {found}"), &loc);
                self.resync();
                None
            }
            None => {
                let loc = self.last_loc.clone();
                self.error(format!("expected STRING in {context}, found end of input"), &loc);
                None
            }
        }
    }

    // -- grammar productions ----------------------------------------------

    fn parse_entry(&mut self, date_text: &str, date_loc: &SourceLoc) -> Option<B::Directive> {
        let date = self.builder.date(date_text, date_loc);
        match self.peek_kind() {
            Some(Token::Txn) => {
                self.bump();
                self.parse_transaction(date, '*', date_loc)
            }
            Some(Token::Flag(c)) => {
                self.bump();
                self.parse_transaction(date, c, date_loc)
            }
            Some(Token::Open) => {
                self.bump();
                self.parse_open(date, date_loc)
            }
            Some(Token::Close) => {
                self.bump();
                self.parse_close(date, date_loc)
            }
            Some(Token::Pad) => {
                self.bump();
                self.parse_pad(date, date_loc)
            }
            Some(Token::Check) => {
                self.bump();
                self.parse_check(date, date_loc)
            }
            Some(Token::Price) => {
                self.bump();
                self.parse_price(date, date_loc)
            }
            Some(Token::Event) => {
                self.bump();
                self.parse_event(date, date_loc)
            }
            Some(Token::Note) => {
                self.bump();
                self.parse_note(date, date_loc)
            }
            Some(Token::Document) => {
                self.bump();
                self.parse_document(date, date_loc)
            }
            Some(other) => {
                let loc = self.tokens.peek().expect("just matched Some").1.clone();
                self.error(format!("unexpected {other} after date"), &loc);
                self.bump();
                self.resync();
                None
            }
            None => {
                self.error("unexpected end of input after date", date_loc);
                None
            }
        }
    }

    #[allow(clippy::too_many_lines)]
    fn parse_transaction(
        &mut self,
        date: B::Date,
        flag: char,
        start_loc: &SourceLoc,
    ) -> Option<B::Directive> {
        let first = self.expect_string("transaction")?;
        let (payee, narration) = if matches!(self.peek_kind(), Some(Token::Pipe)) {
            self.bump();
            let second = self.expect_string("transaction narration")?;
            (Some(first), second)
        } else {
            (None, first)
        };

        let mut tags = self.builder.tags_list_empty();
        while let Some((Token::Tag(text), loc)) = self.tokens.peek().cloned() {
            self.bump();
            let tag = self.builder.tag(text, &loc);
            tags = self.builder.tags_list_append(tags, tag);
        }

        let mut links = self.builder.links_list_empty();
        while let Some((Token::Link(text), loc)) = self.tokens.peek().cloned() {
            self.bump();
            let link = self.builder.link(text, &loc);
            links = self.builder.links_list_append(links, link);
        }

        self.expect_eol();

        let mut postings = self.builder.posting_list_empty();
        while let Some((Token::Indent, indent_loc)) = self.tokens.peek().cloned() {
            self.bump();
            if let Some(posting) = self.parse_posting(&indent_loc) {
                postings = self.builder.posting_list_append(postings, posting);
            }
        }

        Some(self.builder.transaction(
            date, flag, payee, narration, tags, links, postings, start_loc,
        ))
    }

    fn parse_posting(&mut self, loc: &SourceLoc) -> Option<B::Posting> {
        let flag = match self.peek_kind() {
            Some(Token::Flag(c)) => {
                self.bump();
                Some(c)
            }
            _ => None,
        };

        let account = self.expect_account("posting")?;

        let position = match self.peek_kind() {
            Some(Token::Number(_)) => Some(self.parse_position()?),
            _ => None,
        };

        let (price, price_is_total) = if position.is_some() {
            match self.peek_kind() {
                Some(Token::At) => {
                    self.bump();
                    (Some(self.parse_amount()?), false)
                }
                Some(Token::AtAt) => {
                    self.bump();
                    (Some(self.parse_amount()?), true)
                }
                _ => (None, false),
            }
        } else {
            (None, false)
        };

        self.expect_eol();
        Some(
            self.builder
                .posting(flag, account, position, price, price_is_total, loc),
        )
    }

    fn parse_amount(&mut self) -> Option<B::Amount> {
        let (text, loc) = match self.tokens.peek().cloned() {
            Some((Token::Number(text), loc)) => {
                self.bump();
                (text, loc)
            }
            Some((found, loc)) => {
                self.error(format!("expected NUMBER, found {found}"), &loc);
                self.resync();
                return None;
            }
            None => {
                let loc = self.last_loc.clone();
                self.error("expected NUMBER, found end of input", &loc);
                return None;
            }
        };
        let number = self.builder.number(text, &loc);
        let currency = self.expect_currency("amount")?;
        Some(self.builder.amount(number, currency))
    }

    fn parse_position(&mut self) -> Option<B::Position> {
        let amount = self.parse_amount()?;
        let lot = if matches!(self.peek_kind(), Some(Token::LCurl)) {
            Some(self.parse_lot_cost_date()?)
        } else {
            None
        };
        Some(self.builder.position(amount, lot))
    }

    fn parse_lot_cost_date(&mut self) -> Option<B::LotCostDate> {
        let (_, open_loc) = self.bump().expect("caller matched LCurl");
        let amount = self.parse_amount()?;
        let date = if matches!(self.peek_kind(), Some(Token::Slash)) {
            self.bump();
            match self.tokens.peek().cloned() {
                Some((Token::Date(text), loc)) => {
                    self.bump();
                    Some(self.builder.date(text, &loc))
                }
                _ => {
                    self.error("expected DATE after '/' in lot annotation", &open_loc);
                    None
                }
            }
        } else {
            None
        };
        match self.peek_kind() {
            Some(Token::RCurl) => {
                self.bump();
            }
            _ => {
                self.error("expected '}' to close lot annotation", &open_loc);
                self.resync();
                return None;
            }
        }
        Some(self.builder.lot_cost_date(amount, date))
    }

    fn parse_open(&mut self, date: B::Date, start_loc: &SourceLoc) -> Option<B::Directive> {
        let account = self.expect_account("open")?;
        let mut currencies = self.builder.currency_list_empty();
        if let Some((Token::Currency(text), loc)) = self.tokens.peek().cloned() {
            self.bump();
            let currency = self.builder.currency(text, &loc);
            currencies = self.builder.currency_list_append(currencies, currency);
            while matches!(self.peek_kind(), Some(Token::Comma)) {
                self.bump();
                match self.tokens.peek().cloned() {
                    Some((Token::Currency(text2), loc2)) => {
                        self.bump();
                        let c2 = self.builder.currency(text2, &loc2);
                        currencies = self.builder.currency_list_append(currencies, c2);
                    }
                    _ => {
                        self.error("expected CURRENCY after ',' in open", start_loc);
                        self.resync();
                        break;
                    }
                }
            }
        }
        self.expect_eol();
        Some(self.builder.open(date, account, currencies, start_loc))
    }

    fn parse_close(&mut self, date: B::Date, start_loc: &SourceLoc) -> Option<B::Directive> {
        let account = self.expect_account("close")?;
        self.expect_eol();
        Some(self.builder.close(date, account, start_loc))
    }

    fn parse_pad(&mut self, date: B::Date, start_loc: &SourceLoc) -> Option<B::Directive> {
        let account = self.expect_account("pad")?;
        let source_account = self.expect_account("pad source")?;
        self.expect_eol();
        Some(self.builder.pad(date, account, source_account, start_loc))
    }

    fn parse_check(&mut self, date: B::Date, start_loc: &SourceLoc) -> Option<B::Directive> {
        let account = self.expect_account("check")?;
        let amount = self.parse_amount()?;
        self.expect_eol();
        Some(self.builder.check(date, account, amount, start_loc))
    }

    fn parse_price(&mut self, date: B::Date, start_loc: &SourceLoc) -> Option<B::Directive> {
        let currency = self.expect_currency("price")?;
        let amount = self.parse_amount()?;
        self.expect_eol();
        Some(self.builder.price(date, currency, amount, start_loc))
    }

    fn parse_event(&mut self, date: B::Date, start_loc: &SourceLoc) -> Option<B::Directive> {
        let name = self.expect_string("event")?;
        let value = self.expect_string("event")?;
        self.expect_eol();
        Some(self.builder.event(date, name, value, start_loc))
    }

    fn parse_note(&mut self, date: B::Date, start_loc: &SourceLoc) -> Option<B::Directive> {
        let account = self.expect_account("note")?;
        let comment = self.expect_string("note")?;
        self.expect_eol();
        Some(self.builder.note(date, account, comment, start_loc))
    }

    fn parse_document(&mut self, date: B::Date, start_loc: &SourceLoc) -> Option<B::Directive> {
        let account = self.expect_account("document")?;
        let filename = self.expect_string("document")?;
        self.expect_eol();
        Some(self.builder.document(date, account, filename, start_loc))
    }

    fn parse_pushtag(&mut self) {
        let (_, loc) = self.bump().expect("caller matched Pushtag");
        match self.tokens.peek().cloned() {
            Some((Token::Tag(text), tag_loc)) => {
                self.bump();
                let tag = self.builder.tag(text, &tag_loc);
                self.expect_eol();
                self.builder.pushtag(tag, &loc);
            }
            _ => {
                self.error("expected TAG after pushtag", &loc);
                self.resync();
            }
        }
    }

    fn parse_poptag(&mut self) {
        let (_, loc) = self.bump().expect("caller matched Poptag");
        match self.tokens.peek().cloned() {
            Some((Token::Tag(text), tag_loc)) => {
                self.bump();
                let tag = self.builder.tag(text, &tag_loc);
                self.expect_eol();
                self.builder.poptag(tag, &loc);
            }
            _ => {
                self.error("expected TAG after poptag", &loc);
                self.resync();
            }
        }
    }

    fn parse_option(&mut self) {
        let (_, loc) = self.bump().expect("caller matched Option");
        let Some(name) = self.expect_string("option") else {
            return;
        };
        let Some(value) = self.expect_string("option") else {
            return;
        };
        self.expect_eol();
        self.builder.option(name, value, &loc);
    }
}
