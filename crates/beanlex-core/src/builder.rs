//! The builder contract: the seam between lexer/parser and the values they
//! construct.
//!
//! Neither the lexer nor the parser knows about [`crate::value`] or
//! [`crate::directive`] directly. Instead both are generic over a `Builder`
//! implementation, which is handed raw lexeme text and source locations and
//! decides how to turn them into values. [`crate::default_builder::DefaultBuilder`]
//! is the reference implementation, producing the concrete AST in this
//! crate; a host embedding the parser for another purpose (an incremental
//! editor, a streaming importer) can supply its own.

use crate::location::SourceLoc;

/// Constructs semantic values and directive records from parser callbacks.
///
/// Every method takes the raw pieces the grammar has already recognized
/// (lexeme text, already-built sub-values, a [`SourceLoc`]) and returns a
/// `Self::*` associated type. The parser never inspects what comes back; it
/// only threads it through to the next production.
pub trait Builder {
    /// A parsed calendar date.
    type Date;
    /// An account name.
    type Account;
    /// A currency or commodity code.
    type Currency;
    /// A quoted string value (payee, narration, note, event name/value,
    /// document filename).
    type Str;
    /// A decimal number.
    type Number;
    /// A single tag, sans its leading `#`.
    type Tag;
    /// A single link, sans its leading `^`.
    type Link;
    /// A number/currency pair.
    type Amount;
    /// An amount plus optional lot/cost/date.
    type Position;
    /// The `{amount / date}` lot annotation.
    type LotCostDate;
    /// One posting line.
    type Posting;
    /// Any one directive record.
    type Directive;
    /// An accumulated list of tags.
    type TagList;
    /// An accumulated list of links.
    type LinkList;
    /// An accumulated list of postings.
    type PostingList;
    /// An accumulated list of currencies.
    type CurrencyList;
    /// An accumulated list of directives: the file's final result.
    type DeclarationList;

    // -- leaf value constructors --------------------------------------

    /// Build a date from a `YYYY-MM-DD`/`YYYY/MM/DD` lexeme.
    fn date(&mut self, text: &str, loc: &SourceLoc) -> Self::Date;
    /// Build an account from an `ACCOUNT` lexeme.
    fn account(&mut self, text: &str, loc: &SourceLoc) -> Self::Account;
    /// Build a currency from a `CURRENCY` lexeme.
    fn currency(&mut self, text: &str, loc: &SourceLoc) -> Self::Currency;
    /// Build a string from a `STRING` lexeme's already-unescaped content.
    fn string(&mut self, text: &str, loc: &SourceLoc) -> Self::Str;
    /// Build a number from a `NUMBER` lexeme.
    fn number(&mut self, text: &str, loc: &SourceLoc) -> Self::Number;
    /// Build a tag from a `TAG` lexeme's content (no leading `#`).
    fn tag(&mut self, text: &str, loc: &SourceLoc) -> Self::Tag;
    /// Build a link from a `LINK` lexeme's content (no leading `^`).
    fn link(&mut self, text: &str, loc: &SourceLoc) -> Self::Link;

    // -- list accumulators -----------------------------------------------

    /// Start a new, empty tag list.
    fn tags_list_empty(&mut self) -> Self::TagList;
    /// Append a tag to a tag list.
    fn tags_list_append(&mut self, list: Self::TagList, tag: Self::Tag) -> Self::TagList;
    /// Start a new, empty link list.
    fn links_list_empty(&mut self) -> Self::LinkList;
    /// Append a link to a link list.
    fn links_list_append(&mut self, list: Self::LinkList, link: Self::Link) -> Self::LinkList;
    /// Start a new, empty posting list.
    fn posting_list_empty(&mut self) -> Self::PostingList;
    /// Append a posting to a posting list.
    fn posting_list_append(
        &mut self,
        list: Self::PostingList,
        posting: Self::Posting,
    ) -> Self::PostingList;
    /// Start a new, empty currency list.
    fn currency_list_empty(&mut self) -> Self::CurrencyList;
    /// Append a currency to a currency list.
    fn currency_list_append(
        &mut self,
        list: Self::CurrencyList,
        currency: Self::Currency,
    ) -> Self::CurrencyList;
    /// Start a new, empty declaration list.
    fn declarations_empty(&mut self) -> Self::DeclarationList;
    /// Append a directive to the declaration list.
    fn declarations_append(
        &mut self,
        list: Self::DeclarationList,
        directive: Self::Directive,
    ) -> Self::DeclarationList;

    // -- aggregate constructors ------------------------------------------

    /// Build an amount from a number and currency.
    fn amount(&mut self, number: Self::Number, currency: Self::Currency) -> Self::Amount;
    /// Build a position from an amount and optional lot/cost/date.
    fn position(&mut self, amount: Self::Amount, lot: Option<Self::LotCostDate>) -> Self::Position;
    /// Build a `{amount}` or `{amount / date}` lot annotation.
    fn lot_cost_date(&mut self, amount: Self::Amount, date: Option<Self::Date>) -> Self::LotCostDate;
    /// Build one posting.
    #[allow(clippy::too_many_arguments)]
    fn posting(
        &mut self,
        flag: Option<char>,
        account: Self::Account,
        position: Option<Self::Position>,
        price: Option<Self::Amount>,
        price_is_total: bool,
        loc: &SourceLoc,
    ) -> Self::Posting;

    // -- directive constructors --------------------------------------------

    /// Build a transaction directive. `tags`/`links` are the ones written
    /// directly on the header line; the builder is responsible for merging
    /// in any currently pushed tags (see [`Builder::pushtag`]).
    #[allow(clippy::too_many_arguments)]
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
    ) -> Self::Directive;
    /// Build an `open` directive.
    fn open(
        &mut self,
        date: Self::Date,
        account: Self::Account,
        currencies: Self::CurrencyList,
        loc: &SourceLoc,
    ) -> Self::Directive;
    /// Build a `close` directive.
    fn close(&mut self, date: Self::Date, account: Self::Account, loc: &SourceLoc) -> Self::Directive;
    /// Build a `pad` directive.
    fn pad(
        &mut self,
        date: Self::Date,
        account: Self::Account,
        source_account: Self::Account,
        loc: &SourceLoc,
    ) -> Self::Directive;
    /// Build a `check`/`balance` directive.
    fn check(
        &mut self,
        date: Self::Date,
        account: Self::Account,
        amount: Self::Amount,
        loc: &SourceLoc,
    ) -> Self::Directive;
    /// Build a `price` directive.
    fn price(
        &mut self,
        date: Self::Date,
        currency: Self::Currency,
        amount: Self::Amount,
        loc: &SourceLoc,
    ) -> Self::Directive;
    /// Build an `event` directive.
    fn event(
        &mut self,
        date: Self::Date,
        name: Self::Str,
        value: Self::Str,
        loc: &SourceLoc,
    ) -> Self::Directive;
    /// Build a `note` directive.
    fn note(
        &mut self,
        date: Self::Date,
        account: Self::Account,
        comment: Self::Str,
        loc: &SourceLoc,
    ) -> Self::Directive;
    /// Build a `document` directive.
    fn document(
        &mut self,
        date: Self::Date,
        account: Self::Account,
        filename: Self::Str,
        loc: &SourceLoc,
    ) -> Self::Directive;

    // -- side-effecting hooks ----------------------------------------------

    /// `pushtag #name`: push a tag onto the builder's stack so it is
    /// implicitly added to every transaction built until popped.
    fn pushtag(&mut self, tag: Self::Tag, loc: &SourceLoc);
    /// `poptag #name`: pop a previously pushed tag.
    fn poptag(&mut self, tag: Self::Tag, loc: &SourceLoc);
    /// `option "name" "value"`: record a file-level option.
    fn option(&mut self, name: Self::Str, value: Self::Str, loc: &SourceLoc);
    /// Report a parse or recovery error at a location.
    fn error(&mut self, message: &str, loc: &SourceLoc);
    /// Store the final, fully reduced declaration list as the parse result.
    fn store_result(&mut self, declarations: Self::DeclarationList);
}
