//! Error reporting with beautiful diagnostics.
//!
//! Uses ariadne for pretty-printed error messages with source context, the
//! way `rustledger`'s `report.rs` does for `rustledger_parser::ParseError`.
//! `beanlex_parser::ParseError` carries a line/column [`beanlex_core::location::SourceLoc`]
//! rather than a byte span, so [`char_offset`] resolves it against the
//! source text before handing ariadne a range.

use ariadne::{ColorGenerator, Config, Label, Report, ReportKind, Source};
use beanlex_parser::ParseError;
use std::io::Write;
use std::path::Path;

/// Resolve a 1-based (line, column) pair to a 0-based char offset into
/// `source`. Out-of-range positions clamp to the end of the source.
fn char_offset(source: &str, line: u32, column: u32) -> usize {
    let mut offset = 0usize;
    let mut lines = source.split_inclusive('\n');
    for _ in 1..line {
        match lines.next() {
            Some(l) => offset += l.chars().count(),
            None => return source.chars().count(),
        }
    }
    let col_in_line = lines
        .next()
        .map(|l| l.chars().count())
        .unwrap_or(0)
        .min(column.saturating_sub(1) as usize);
    (offset + col_in_line).min(source.chars().count())
}

/// Report parse errors to the given writer. Mirrors
/// `rustledger::report::report_parse_errors` (one `Report` per error, a
/// fresh color per label) against this crate's own `ParseError` shape.
pub fn report_parse_errors<W: Write>(
    errors: &[ParseError],
    source_path: &Path,
    source: &str,
    writer: &mut W,
) -> std::io::Result<usize> {
    let path_str = source_path.display().to_string();
    let mut colors = ColorGenerator::new();
    let error_count = errors.len();

    for error in errors {
        let color = colors.next();
        let start = char_offset(source, error.loc.first.line, error.loc.first.column);
        let end = char_offset(source, error.loc.last.line, error.loc.last.column + 1).max(start + 1);

        Report::build(ReportKind::Error, &path_str, start)
            .with_code(error.code())
            .with_message(error.kind.to_string())
            .with_label(
                Label::new((&path_str, start..end))
                    .with_message(error.kind.to_string())
                    .with_color(color),
            )
            .with_config(Config::default().with_compact(false))
            .finish()
            .write((&path_str, Source::from(source)), &mut *writer)?;
    }

    Ok(error_count)
}

/// Print a summary of errors found, matching
/// `rustledger::report::print_summary`'s color scheme.
pub fn print_summary<W: Write>(errors: usize, writer: &mut W) -> std::io::Result<()> {
    if errors == 0 {
        writeln!(writer, "\x1b[32m\u{2713}\x1b[0m no errors found")?;
    } else {
        let error_text = if errors == 1 { "error" } else { "errors" };
        writeln!(writer, "\x1b[31m\u{2717}\x1b[0m {errors} {error_text}")?;
    }
    Ok(())
}
