//! Parse-time diagnostics.
//!
//! Mirrors the reference pack's `ParseError`: a manual `Display`/`Error`
//! impl rather than a `thiserror` derive, kept that way on purpose so the
//! message text stays under this crate's direct control (the grammar's
//! error-recovery production produces the message, not a derive macro).

use std::fmt;

use beanlex_core::location::SourceLoc;

/// What went wrong at a particular location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The lexer emitted an `ERROR` token for an unrecognized byte.
    UnrecognizedByte {
        /// The offending byte, as text.
        text: String,
    },
    /// The parser could not shift or reduce given the current token.
    UnexpectedToken {
        /// A description of the token that was found.
        found: String,
        /// What the parser would have accepted instead, if known.
        expected: Option<String>,
    },
    /// End of input was reached mid-construct (e.g. an unterminated
    /// transaction with no postings and no trailing EOL).
    UnexpectedEof {
        /// What the parser was in the middle of building.
        context: String,
    },
    /// A grammar-production-specific message, used by the recursive-descent
    /// driver for cases that don't fit the two kinds above (a missing
    /// required field inside a directive, an unclosed lot annotation).
    Syntax(String),
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnrecognizedByte { text } => {
                write!(f, "unrecognized byte {text:?}")
            }
            Self::UnexpectedToken { found, expected: Some(expected) } => {
                write!(f, "unexpected {found}, expected {expected}")
            }
            Self::UnexpectedToken { found, expected: None } => {
                write!(f, "unexpected {found}")
            }
            Self::UnexpectedEof { context } => {
                write!(f, "unexpected end of input while parsing {context}")
            }
            Self::Syntax(message) => write!(f, "{message}"),
        }
    }
}

/// A single parse-time diagnostic, attributable to one source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// What went wrong.
    pub kind: ParseErrorKind,
    /// Where it happened.
    pub loc: SourceLoc,
}

impl ParseError {
    /// Build a diagnostic for an unrecognized byte.
    #[must_use]
    pub fn unrecognized_byte(text: impl Into<String>, loc: SourceLoc) -> Self {
        Self {
            kind: ParseErrorKind::UnrecognizedByte { text: text.into() },
            loc,
        }
    }

    /// Build a diagnostic for a token the parser could not consume.
    #[must_use]
    pub fn unexpected_token(
        found: impl Into<String>,
        expected: Option<String>,
        loc: SourceLoc,
    ) -> Self {
        Self {
            kind: ParseErrorKind::UnexpectedToken {
                found: found.into(),
                expected,
            },
            loc,
        }
    }

    /// Build a diagnostic for premature end of input.
    #[must_use]
    pub fn unexpected_eof(context: impl Into<String>, loc: SourceLoc) -> Self {
        Self {
            kind: ParseErrorKind::UnexpectedEof {
                context: context.into(),
            },
            loc,
        }
    }

    /// Build a diagnostic carrying an already-rendered message.
    #[must_use]
    pub fn syntax(message: impl Into<String>, loc: SourceLoc) -> Self {
        Self {
            kind: ParseErrorKind::Syntax(message.into()),
            loc,
        }
    }

    /// A short machine-stable code for this error's kind, useful for
    /// grouping diagnostics in tests or reports.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self.kind {
            ParseErrorKind::UnrecognizedByte { .. } => "E_LEX_BYTE",
            ParseErrorKind::UnexpectedToken { .. } => "E_SYNTAX",
            ParseErrorKind::UnexpectedEof { .. } => "E_EOF",
            ParseErrorKind::Syntax(_) => "E_SYNTAX",
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.loc, self.kind)
    }
}

impl std::error::Error for ParseError {}
