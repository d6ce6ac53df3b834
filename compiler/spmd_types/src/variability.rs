//! The variability lattice.
//!
//! Variability is the axis ordinary type systems lack: whether a value is
//! shared by every program instance in a gang (`uniform`), held once per
//! lane (`varying`), laid out lane-major in fixed-width chunks
//! (`soa<N>`), or not decided yet (`unbound`).

use std::fmt;

/// Variability qualifier attached to every type.
///
/// Two SOA variabilities are equal only when their widths match.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Variability {
    Uniform,
    Varying,
    /// Struct-of-arrays with the given (positive) width.
    Soa(u32),
    /// Not yet decided; must be resolved before mangling or lowering.
    Unbound,
}

impl Variability {
    #[inline]
    pub const fn is_uniform(self) -> bool {
        matches!(self, Variability::Uniform)
    }

    #[inline]
    pub const fn is_varying(self) -> bool {
        matches!(self, Variability::Varying)
    }

    #[inline]
    pub const fn is_soa(self) -> bool {
        matches!(self, Variability::Soa(_))
    }

    #[inline]
    pub const fn is_unbound(self) -> bool {
        matches!(self, Variability::Unbound)
    }

    #[inline]
    pub const fn is_bound(self) -> bool {
        !self.is_unbound()
    }

    /// SOA width, or 0 for every other variability.
    #[inline]
    pub const fn soa_width(self) -> u32 {
        match self {
            Variability::Soa(width) => width,
            _ => 0,
        }
    }

    /// Token used in mangled names. `None` for `Unbound`, which has no
    /// linkage form.
    pub fn mangle(self) -> Option<String> {
        match self {
            Variability::Uniform => Some("un".to_owned()),
            Variability::Varying => Some("vy".to_owned()),
            Variability::Soa(width) => Some(format!("soa<{width}>")),
            Variability::Unbound => None,
        }
    }
}

/// Source-level spelling: `uniform`, `varying`, `soa<8>`, `/*unbound*/`.
impl fmt::Display for Variability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variability::Uniform => f.write_str("uniform"),
            Variability::Varying => f.write_str("varying"),
            Variability::Soa(width) => write!(f, "soa<{width}>"),
            Variability::Unbound => f.write_str("/*unbound*/"),
        }
    }
}

#[cfg(test)]
mod tests;
