//! Source positions for declarations and diagnostics.
//!
//! Unlike a byte-offset span, a `SourcePos` records the line/column
//! rectangle of a construct together with its file. Debug-info records
//! need the line, and nominal type identity (enums) compares whole
//! positions, so both ends are kept.

use std::cmp::Ordering;
use std::fmt;

use crate::Name;

/// A line/column range inside one source file.
///
/// Lines and columns are 1-based; the all-zero position is
/// [`SourcePos::DUMMY`] and is used for compiler-synthesized declarations.
///
/// Layout: 20 bytes (file name + four `u32` coordinates).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct SourcePos {
    /// Interned file name.
    pub file: Name,
    pub first_line: u32,
    pub first_column: u32,
    pub last_line: u32,
    pub last_column: u32,
}

impl SourcePos {
    /// Position for compiler-synthesized declarations.
    pub const DUMMY: SourcePos = SourcePos {
        file: Name::EMPTY,
        first_line: 0,
        first_column: 0,
        last_line: 0,
        last_column: 0,
    };

    /// Create a position covering `first_line:first_column` through
    /// `last_line:last_column`.
    #[inline]
    pub const fn new(
        file: Name,
        first_line: u32,
        first_column: u32,
        last_line: u32,
        last_column: u32,
    ) -> Self {
        SourcePos {
            file,
            first_line,
            first_column,
            last_line,
            last_column,
        }
    }

    /// Create a single-point position.
    #[inline]
    pub const fn point(file: Name, line: u32, column: u32) -> Self {
        Self::new(file, line, column, line, column)
    }

    /// Check if this is the synthesized dummy position.
    #[inline]
    pub fn is_dummy(&self) -> bool {
        *self == Self::DUMMY
    }

    /// Start of the range as `(line, column)`.
    #[inline]
    pub const fn start(&self) -> (u32, u32) {
        (self.first_line, self.first_column)
    }

    /// End of the range as `(line, column)`.
    #[inline]
    pub const fn end(&self) -> (u32, u32) {
        (self.last_line, self.last_column)
    }

    /// Smallest position covering both `self` and `other`.
    ///
    /// Positions in different files cannot be joined; `self` wins.
    #[must_use]
    pub fn union(self, other: SourcePos) -> SourcePos {
        if self.file != other.file {
            return self;
        }
        let (first_line, first_column) = match self.start().cmp(&other.start()) {
            Ordering::Greater => other.start(),
            _ => self.start(),
        };
        let (last_line, last_column) = match self.end().cmp(&other.end()) {
            Ordering::Less => other.end(),
            _ => self.end(),
        };
        SourcePos {
            file: self.file,
            first_line,
            first_column,
            last_line,
            last_column,
        }
    }
}

impl fmt::Debug for SourcePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}-{}:{}",
            self.file.raw(),
            self.first_line,
            self.first_column,
            self.last_line,
            self.last_column
        )
    }
}

impl fmt::Display for SourcePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.first_line, self.first_column)
    }
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::SourcePos;
    crate::static_assert_size!(SourcePos, 20);
}
