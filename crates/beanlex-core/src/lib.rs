//! Core data model and builder contract for a plain-text double-entry
//! ledger parser.
//!
//! This crate has no knowledge of lexing or grammar; it defines the
//! semantic values a lexer/parser pair produces ([`value`], [`directive`]),
//! the trait seam through which they are produced ([`builder`]), and one
//! concrete implementation of that seam ([`default_builder`]).

#![warn(missing_docs)]

pub mod builder;
pub mod default_builder;
pub mod directive;
pub mod intern;
pub mod location;
pub mod value;

pub use builder::Builder;
pub use default_builder::{BuilderError, DefaultBuilder, OptionEntry};
pub use directive::{
    Check, Close, Directive, Document, Event, Link, Note, Open, Pad, Posting, Price, Tag,
    Transaction,
};
pub use intern::InternedStr;
pub use location::{Position, SourceLoc};
pub use value::{Account, Amount, Currency, LotCostDate};
