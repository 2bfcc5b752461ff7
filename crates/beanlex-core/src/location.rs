//! Source location tracking.
//!
//! A [`SourceLoc`] pins a lexical extent to a 1-based line/column range within
//! a named source file, mirroring the location contract every emitted token
//! and constructed directive carries.

use std::fmt;
use std::sync::Arc;

/// A 1-based (line, column) position within a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// 1-based line number.
    pub line: u32,
    /// 1-based column number.
    pub column: u32,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A source location: a filename plus a first/last position range.
///
/// Every emitted token and every constructed directive carries one of these.
/// `first_line_offset` reinterpretation (for sources assembled by including
/// other files) is applied by the caller before a [`SourceLoc`] is built, so
/// that the line stored here is always the user-meaningful one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceLoc {
    /// The source file this location belongs to.
    pub filename: Arc<str>,
    /// Start of the lexical extent.
    pub first: Position,
    /// End of the lexical extent.
    pub last: Position,
}

impl SourceLoc {
    /// Create a location spanning a single point (first == last).
    #[must_use]
    pub fn point(filename: impl Into<Arc<str>>, line: u32, column: u32) -> Self {
        let pos = Position::new(line, column);
        Self {
            filename: filename.into(),
            first: pos,
            last: pos,
        }
    }

    /// Create a location spanning an explicit first/last pair.
    #[must_use]
    pub fn range(filename: impl Into<Arc<str>>, first: Position, last: Position) -> Self {
        Self {
            filename: filename.into(),
            first,
            last,
        }
    }

    /// The first line of this location's extent. This is the line every
    /// directive record reports, per the location reporting contract.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.first.line
    }

    /// Merge two locations in the same file into one spanning both.
    ///
    /// Used to widen a directive's location to cover its last posting line.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        let first = if (self.first.line, self.first.column) <= (other.first.line, other.first.column)
        {
            self.first
        } else {
            other.first
        };
        let last = if (self.last.line, self.last.column) >= (other.last.line, other.last.column) {
            self.last
        } else {
            other.last
        };
        Self {
            filename: self.filename.clone(),
            first,
            last,
        }
    }
}

impl fmt::Display for SourceLoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.first == self.last {
            write!(f, "{}:{}", self.filename, self.first)
        } else {
            write!(f, "{}:{}-{}", self.filename, self.first, self.last)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_has_equal_first_and_last() {
        let loc = SourceLoc::point("ledger.bean", 3, 1);
        assert_eq!(loc.first, loc.last);
        assert_eq!(loc.line(), 3);
    }

    #[test]
    fn merge_widens_to_cover_both() {
        let a = SourceLoc::point("ledger.bean", 5, 1);
        let b = SourceLoc::point("ledger.bean", 7, 12);
        let merged = a.merge(&b);
        assert_eq!(merged.first, Position::new(5, 1));
        assert_eq!(merged.last, Position::new(7, 12));
    }

    #[test]
    fn display_point_omits_range() {
        let loc = SourceLoc::point("a.bean", 1, 1);
        assert_eq!(format!("{loc}"), "a.bean:1:1");
    }
}
