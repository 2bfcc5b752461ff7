//! Token kinds produced by the lexer.
//!
//! This is the public vocabulary the parser consumes. It is deliberately
//! flat text-slice payloads rather than builder-constructed values: the
//! parser is the component generic over [`beanlex_core::Builder`], so it is
//! the parser, not the lexer, that turns a `Token::Date("2024-01-01")` into
//! a `Builder::Date` at the point it is shifted. See [`crate::lexer`] for
//! how these are produced.

use std::fmt;

/// One lexical token, borrowing its text from the source it was scanned
/// from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token<'src> {
    /// End of a logical line.
    Eol,
    /// Leading whitespace followed by further content on the same line.
    Indent,
    /// A content line the lexer chose to discard (blank, comment-only, or
    /// a heading line).
    Skipped,
    /// A `;`-introduced remainder-of-line comment.
    Comment,
    /// `|`
    Pipe,
    /// `@@`
    AtAt,
    /// `@`
    At,
    /// `{`
    LCurl,
    /// `}`
    RCurl,
    /// `=`
    Equal,
    /// `,`
    Comma,
    /// `/`
    Slash,
    /// One of `* ! & # ? %`, when not the first token on its line.
    Flag(char),
    /// `txn`
    Txn,
    /// `check`
    Check,
    /// `open`
    Open,
    /// `close`
    Close,
    /// `pad`
    Pad,
    /// `event`
    Event,
    /// `price`
    Price,
    /// `note`
    Note,
    /// `document`
    Document,
    /// `pushtag`
    Pushtag,
    /// `poptag`
    Poptag,
    /// `option`
    Option,
    /// `YYYY[-/]MM[-/]DD`, lexeme handed verbatim to the builder.
    Date(&'src str),
    /// An account path, lexeme handed verbatim to the builder.
    Account(&'src str),
    /// A currency/commodity code, lexeme handed verbatim to the builder.
    Currency(&'src str),
    /// A quoted string's inner content, quotes already stripped.
    Str(&'src str),
    /// A numeric literal, lexeme handed verbatim to the builder.
    Number(&'src str),
    /// A tag's content, leading `#` already stripped.
    Tag(&'src str),
    /// A link's content, leading `^` already stripped.
    Link(&'src str),
    /// Any byte the scanning rules don't otherwise recognize.
    Error(&'src str),
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eol => write!(f, "EOL"),
            Self::Indent => write!(f, "INDENT"),
            Self::Skipped => write!(f, "SKIPPED"),
            Self::Comment => write!(f, "COMMENT"),
            Self::Pipe => write!(f, "|"),
            Self::AtAt => write!(f, "@@"),
            Self::At => write!(f, "@"),
            Self::LCurl => write!(f, "{{"),
            Self::RCurl => write!(f, "}}"),
            Self::Equal => write!(f, "="),
            Self::Comma => write!(f, ","),
            Self::Slash => write!(f, "/"),
            Self::Flag(c) => write!(f, "FLAG({c})"),
            Self::Txn => write!(f, "txn"),
            Self::Check => write!(f, "check"),
            Self::Open => write!(f, "open"),
            Self::Close => write!(f, "close"),
            Self::Pad => write!(f, "pad"),
            Self::Event => write!(f, "event"),
            Self::Price => write!(f, "price"),
            Self::Note => write!(f, "note"),
            Self::Document => write!(f, "document"),
            Self::Pushtag => write!(f, "pushtag"),
            Self::Poptag => write!(f, "poptag"),
            Self::Option => write!(f, "option"),
            Self::Date(s) => write!(f, "DATE({s})"),
            Self::Account(s) => write!(f, "ACCOUNT({s})"),
            Self::Currency(s) => write!(f, "CURRENCY({s})"),
            Self::Str(s) => write!(f, "STRING({s:?})"),
            Self::Number(s) => write!(f, "NUMBER({s})"),
            Self::Tag(s) => write!(f, "TAG({s})"),
            Self::Link(s) => write!(f, "LINK({s})"),
            Self::Error(s) => write!(f, "ERROR({s:?})"),
        }
    }
}

impl Token<'_> {
    /// Whether this token kind always begins a new declaration, i.e. it is
    /// one of the tokens resynchronization may stop on.
    #[must_use]
    pub const fn starts_declaration(&self) -> bool {
        matches!(
            self,
            Self::Date(_)
                | Self::Pushtag
                | Self::Poptag
                | Self::Option
                | Self::Skipped
                | Self::Indent
                | Self::Eol
                | Self::Comment
        )
    }
}
