//! Lexer and LALR-style grammar driver for a plain-text double-entry ledger
//! format.
//!
//! This crate knows nothing about the concrete AST it builds: both
//! [`Lexer`] and [`Parser`] are generic over (or callback into) a
//! [`beanlex_core::Builder`] implementation. Handing it
//! [`beanlex_core::DefaultBuilder`] gets you the reference
//! [`beanlex_core::directive::Directive`] tree; a caller embedding the
//! parser for another purpose can supply its own builder instead.
//!
//! ```
//! use beanlex_core::DefaultBuilder;
//! use beanlex_parser::parse;
//!
//! let source = "2024-01-15 * \"Coffee Shop\" \"Morning coffee\"\n  Expenses:Food:Coffee  5.00 USD\n  Assets:Cash\n";
//! let mut builder = DefaultBuilder::new();
//! let errors = parse(source, "ledger.bean", 0, &mut builder);
//! assert!(errors.is_empty());
//! assert_eq!(builder.into_result().unwrap().len(), 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod lexer;
mod parser;
mod token;

pub use error::{ParseError, ParseErrorKind};
pub use lexer::Lexer;
pub use parser::Parser;
pub use token::Token;

use beanlex_core::Builder;

/// Parse `source` into a declaration list, driving `builder` and reporting
/// locations under `filename` shifted by `first_line_offset`.
///
/// Returns every [`ParseError`] encountered; the parser never fails fatally,
/// so a non-empty return does not mean `builder` went unused. `builder`'s
/// `store_result` is always called exactly once before this returns.
pub fn parse<B: Builder>(
    source: &str,
    filename: impl Into<std::sync::Arc<str>>,
    first_line_offset: u32,
    builder: &mut B,
) -> Vec<ParseError> {
    Parser::new(source, filename, first_line_offset, builder).run()
}
