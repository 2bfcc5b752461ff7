//! The byte-oriented scanner: turns source text into `(Token, SourceLoc)`
//! pairs, disambiguating indentation, headings, and flags by tracking how
//! many tokens have been emitted on the current line.
//!
//! Built on `logos` the way [the teacher's dormant token scanner][1] was,
//! but extended to carry mutable per-line state through `logos`'s `extras`
//! mechanism, since the contextual rules in the ledger grammar (unlike a
//! typical language lexer) depend on scanner position within the line, not
//! just the matched text.
//!
//! [1]: https://github.com (grounded on `logos_lexer.rs` in the reference pack)

use std::sync::Arc;

use beanlex_core::location::{Position, SourceLoc};
use logos::{FilterResult, Logos};

use crate::token::Token;

/// Mutable scanning state threaded through every token match.
///
/// `line_tokens` is the invariant from the data model: it equals the
/// number of tokens already emitted for the current line, and is reset to
/// zero immediately after an `EOL`.
#[derive(Debug, Clone)]
pub struct LexerState {
    line: u32,
    column: u32,
    line_tokens: u32,
    first_line_offset: u32,
    filename: Arc<str>,
    last_loc: Option<SourceLoc>,
}

impl Default for LexerState {
    fn default() -> Self {
        Self {
            line: 1,
            column: 1,
            line_tokens: 0,
            first_line_offset: 0,
            filename: Arc::from("<input>"),
            last_loc: None,
        }
    }
}

/// How a leading-whitespace run was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WsKind {
    Indent,
    Skipped,
}

/// How a `[*!&#?%]` character was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlagKind {
    Flag(char),
    Heading,
}

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(extras = LexerState)]
enum Raw<'src> {
    #[regex(r"[ \t\r]+", ws_callback)]
    Whitespace(WsKind),

    #[token("\n", eol_callback)]
    Eol,

    #[regex(r";[^\n]*", plain_callback)]
    Comment,

    #[regex(r"[*!&#?%]", flag_callback)]
    FlagOrHeading(FlagKind),

    #[token("|", plain_callback)]
    Pipe,
    #[token("@@", plain_callback)]
    AtAt,
    #[token("@", plain_callback)]
    At,
    #[token("{", plain_callback)]
    LCurl,
    #[token("}", plain_callback)]
    RCurl,
    #[token("=", plain_callback)]
    Equal,
    #[token(",", plain_callback)]
    Comma,

    #[token("txn", plain_callback, priority = 10)]
    Txn,
    #[token("check", plain_callback, priority = 10)]
    Check,
    #[token("open", plain_callback, priority = 10)]
    Open,
    #[token("close", plain_callback, priority = 10)]
    Close,
    #[token("pad", plain_callback, priority = 10)]
    Pad,
    #[token("event", plain_callback, priority = 10)]
    Event,
    #[token("price", plain_callback, priority = 10)]
    Price,
    #[token("note", plain_callback, priority = 10)]
    Note,
    #[token("document", plain_callback, priority = 10)]
    Document,
    #[token("pushtag", plain_callback, priority = 10)]
    Pushtag,
    #[token("poptag", plain_callback, priority = 10)]
    Poptag,
    #[token("option", plain_callback, priority = 10)]
    Option,

    #[regex(r"[0-9]{4}[-/][0-9]{2}[-/][0-9]{2}", text_callback, priority = 8)]
    Date(&'src str),

    #[regex(
        r"(Assets|Liabilities|Equity|Income|Expenses)(:[A-Z][A-Za-z0-9-]+)+",
        text_callback,
        priority = 6
    )]
    Account(&'src str),

    #[regex(r"[A-Z][A-Z0-9'.]{1,10}", text_callback, priority = 4)]
    Currency(&'src str),

    #[regex(r#""[^"]*""#, string_callback)]
    Str(&'src str),

    #[regex(r"[-+]?[0-9.]+", text_callback, priority = 4)]
    Number(&'src str),

    #[regex(r"#[A-Za-z0-9\-_/.]+", sigil_callback, priority = 3)]
    Tag(&'src str),

    #[regex(r"\^[A-Za-z0-9\-_/.]+", sigil_callback, priority = 3)]
    Link(&'src str),

    /// Slash is only reachable outside a date lexeme (dates win on longer
    /// match / higher priority above).
    #[token("/", plain_callback)]
    Slash,

    #[regex(r".", error_callback, priority = 0)]
    Error(&'src str),
}

/// Advance the shared counters for a match of `len` source characters and
/// return the location it covers. Called by every callback, including ones
/// whose match is ultimately discarded.
fn advance(lex: &mut logos::Lexer<Raw<'_>>, len: u32) -> SourceLoc {
    let line = lex.extras.line + lex.extras.first_line_offset;
    let col = lex.extras.column;
    lex.extras.line_tokens += 1;
    lex.extras.column += len;
    SourceLoc::range(
        lex.extras.filename.clone(),
        Position::new(line, col),
        Position::new(line, col + len.saturating_sub(1)),
    )
}

fn mark(lex: &mut logos::Lexer<Raw<'_>>) {
    let len = lex.slice().chars().count() as u32;
    let loc = advance(lex, len);
    lex.extras.last_loc = Some(loc);
}

fn plain_callback(lex: &mut logos::Lexer<Raw<'_>>) {
    mark(lex);
}

fn eol_callback(lex: &mut logos::Lexer<Raw<'_>>) {
    mark(lex);
    lex.extras.line += 1;
    lex.extras.column = 1;
    lex.extras.line_tokens = 0;
}

fn text_callback<'src>(lex: &mut logos::Lexer<'src, Raw<'src>>) -> &'src str {
    mark(lex);
    lex.slice()
}

fn string_callback<'src>(lex: &mut logos::Lexer<'src, Raw<'src>>) -> &'src str {
    mark(lex);
    let s = lex.slice();
    &s[1..s.len() - 1]
}

fn sigil_callback<'src>(lex: &mut logos::Lexer<'src, Raw<'src>>) -> &'src str {
    mark(lex);
    &lex.slice()[1..]
}

fn error_callback<'src>(lex: &mut logos::Lexer<'src, Raw<'src>>) -> &'src str {
    mark(lex);
    lex.slice()
}

fn ws_callback(lex: &mut logos::Lexer<Raw<'_>>) -> FilterResult<WsKind, ()> {
    let is_leading = lex.extras.line_tokens == 0;
    if is_leading {
        let len = lex.slice().chars().count() as u32;
        let next = lex.remainder().chars().next();
        let blank = matches!(next, None | Some('\n') | Some('\r') | Some('\0') | Some(';'));
        let loc = advance(lex, len);
        lex.extras.last_loc = Some(loc);
        FilterResult::Emit(if blank { WsKind::Skipped } else { WsKind::Indent })
    } else {
        let len = lex.slice().chars().count() as u32;
        advance(lex, len);
        FilterResult::Skip
    }
}

fn flag_callback(lex: &mut logos::Lexer<Raw<'_>>) -> FlagKind {
    let is_leading = lex.extras.line_tokens == 0;
    if is_leading {
        let rest = lex.remainder();
        let consume = rest.find('\n').unwrap_or(rest.len());
        lex.bump(consume);
        mark(lex);
        FlagKind::Heading
    } else {
        let ch = lex.slice().chars().next().expect("flag regex matches one char");
        mark(lex);
        FlagKind::Flag(ch)
    }
}

/// Scans a source string into `(Token, SourceLoc)` pairs on demand.
pub struct Lexer<'src> {
    inner: logos::Lexer<'src, Raw<'src>>,
}

impl<'src> Lexer<'src> {
    /// Start scanning `source`, attributing every location to `filename`
    /// and offsetting reported line numbers by `first_line_offset`.
    #[must_use]
    pub fn new(source: &'src str, filename: impl Into<Arc<str>>, first_line_offset: u32) -> Self {
        let mut inner = Raw::lexer(source);
        inner.extras.filename = filename.into();
        inner.extras.first_line_offset = first_line_offset;
        Self { inner }
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = (Token<'src>, SourceLoc);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let result = self.inner.next()?;
            let loc = self
                .inner
                .extras
                .last_loc
                .take()
                .expect("every emitted token records a location");
            let token = match result {
                Ok(Raw::Whitespace(WsKind::Indent)) => Token::Indent,
                Ok(Raw::Whitespace(WsKind::Skipped)) => Token::Skipped,
                Ok(Raw::Eol) => Token::Eol,
                Ok(Raw::Comment) => Token::Comment,
                Ok(Raw::FlagOrHeading(FlagKind::Flag(c))) => Token::Flag(c),
                Ok(Raw::FlagOrHeading(FlagKind::Heading)) => Token::Skipped,
                Ok(Raw::Pipe) => Token::Pipe,
                Ok(Raw::AtAt) => Token::AtAt,
                Ok(Raw::At) => Token::At,
                Ok(Raw::LCurl) => Token::LCurl,
                Ok(Raw::RCurl) => Token::RCurl,
                Ok(Raw::Equal) => Token::Equal,
                Ok(Raw::Comma) => Token::Comma,
                Ok(Raw::Slash) => Token::Slash,
                Ok(Raw::Txn) => Token::Txn,
                Ok(Raw::Check) => Token::Check,
                Ok(Raw::Open) => Token::Open,
                Ok(Raw::Close) => Token::Close,
                Ok(Raw::Pad) => Token::Pad,
                Ok(Raw::Event) => Token::Event,
                Ok(Raw::Price) => Token::Price,
                Ok(Raw::Note) => Token::Note,
                Ok(Raw::Document) => Token::Document,
                Ok(Raw::Pushtag) => Token::Pushtag,
                Ok(Raw::Poptag) => Token::Poptag,
                Ok(Raw::Option) => Token::Option,
                Ok(Raw::Date(s)) => Token::Date(s),
                Ok(Raw::Account(s)) => Token::Account(s),
                Ok(Raw::Currency(s)) => Token::Currency(s),
                Ok(Raw::Str(s)) => Token::Str(s),
                Ok(Raw::Number(s)) => Token::Number(s),
                Ok(Raw::Tag(s)) => Token::Tag(s),
                Ok(Raw::Link(s)) => Token::Link(s),
                Ok(Raw::Error(s)) => Token::Error(s),
                Err(()) => Token::Error(self.inner.slice()),
            };
            return Some((token, loc));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(src: &str) -> Vec<Token<'_>> {
        Lexer::new(src, "t.bean", 0).map(|(t, _)| t).collect()
    }

    #[test]
    fn leading_whitespace_before_comment_is_skipped() {
        assert_eq!(tokens("   ; hi\n"), vec![Token::Skipped, Token::Eol]);
    }

    #[test]
    fn leading_whitespace_before_content_is_indent() {
        let toks = tokens("  Assets:Cash\n");
        assert_eq!(toks[0], Token::Indent);
        assert_eq!(toks[1], Token::Account("Assets:Cash"));
    }

    #[test]
    fn heading_line_is_skipped() {
        assert_eq!(tokens("* Section\n"), vec![Token::Skipped, Token::Eol]);
    }

    #[test]
    fn flag_after_indent_is_flag_not_heading() {
        let toks = tokens("  ! Assets:Cash\n");
        assert_eq!(toks[0], Token::Indent);
        assert_eq!(toks[1], Token::Flag('!'));
    }

    #[test]
    fn lowercase_keyword_vs_uppercase_currency() {
        assert_eq!(tokens("open"), vec![Token::Open]);
        assert_eq!(tokens("USD"), vec![Token::Currency("USD")]);
    }

    #[test]
    fn date_accepts_mixed_separators() {
        assert_eq!(tokens("2024-01/02"), vec![Token::Date("2024-01/02")]);
    }

    #[test]
    fn line_tokens_reset_after_eol() {
        let mut lex = Lexer::new("open\n  x", "t.bean", 0);
        let _ = lex.next();
        let _ = lex.next();
        assert_eq!(lex.inner.extras.line_tokens, 0);
    }

    #[test]
    fn tag_and_link_strip_sigil() {
        assert_eq!(tokens("#trip"), vec![Token::Tag("trip")]);
        assert_eq!(tokens("^receipt-1"), vec![Token::Link("receipt-1")]);
    }

    #[test]
    fn string_strips_quotes_with_no_escapes() {
        assert_eq!(tokens(r#""hello""#), vec![Token::Str("hello")]);
    }

    #[test]
    fn unrecognized_byte_is_error() {
        assert_eq!(tokens("~"), vec![Token::Error("~")]);
    }

    #[test]
    fn first_line_offset_shifts_reported_line() {
        let mut lex = Lexer::new("open\n", "t.bean", 10);
        let (_, loc) = lex.next().unwrap();
        assert_eq!(loc.line(), 11);
    }
}
