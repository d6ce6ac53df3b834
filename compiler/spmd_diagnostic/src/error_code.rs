//! Error codes for type-algebra diagnostics.

use std::fmt;

/// Error codes for all diagnostics produced by the type layer.
///
/// Format: E#### where the first digit indicates the category:
/// - E2xxx: type errors reported to the user
/// - E9xxx: internal compiler errors and queue bookkeeping
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// Implicit conversion between two types is not possible
    E2001,
    /// Vector lengths do not match
    E2002,
    /// Non-atomic type cannot become a vector
    E2003,
    /// Incompatible function types
    E2004,
    /// Incompatible pointer types
    E2005,
    /// Enum cannot convert to a non-atomic type
    E2006,
    /// Initializer list lengths are inconsistent
    E2007,
    /// Struct cannot be converted to SOA layout
    E2008,
    /// Type is too large to lay out
    E2009,
    /// Internal compiler error
    E9001,
    /// Too many errors
    E9002,
}

impl ErrorCode {
    /// Every code, in declaration order.
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2005,
        ErrorCode::E2006,
        ErrorCode::E2007,
        ErrorCode::E2008,
        ErrorCode::E2009,
        ErrorCode::E9001,
        ErrorCode::E9002,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E2008 => "E2008",
            ErrorCode::E2009 => "E2009",
            ErrorCode::E9001 => "E9001",
            ErrorCode::E9002 => "E9002",
        }
    }

    /// One-line description, used for `--explain`-style listings.
    pub fn summary(&self) -> &'static str {
        match self {
            ErrorCode::E2001 => "implicit conversion is not possible",
            ErrorCode::E2002 => "vector lengths differ",
            ErrorCode::E2003 => "non-atomic type used where a vector is required",
            ErrorCode::E2004 => "incompatible function types",
            ErrorCode::E2005 => "incompatible pointer types",
            ErrorCode::E2006 => "enum cannot convert to a non-atomic type",
            ErrorCode::E2007 => "inconsistent initializer list lengths",
            ErrorCode::E2008 => "struct cannot be laid out as struct-of-arrays",
            ErrorCode::E2009 => "type is too large to lay out",
            ErrorCode::E9001 => "internal compiler error",
            ErrorCode::E9002 => "too many errors",
        }
    }

    pub fn is_type_error(&self) -> bool {
        !self.is_internal_error()
    }

    pub fn is_internal_error(&self) -> bool {
        matches!(self, ErrorCode::E9001 | ErrorCode::E9002)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a code like `"E2001"`, ignoring case.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|code| code.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or(())
    }
}
