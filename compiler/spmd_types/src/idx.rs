//! Type handle.
//!
//! Every type lives in a [`Pool`](crate::Pool) and is referred to by a
//! 32-bit `Idx`. The pool hash-conses on construction, so two handles are
//! equal exactly when the types are structurally identical. Semantic
//! equality (which looks through lazily resolved struct members and can
//! ignore `const`) is [`Pool::equal`](crate::Pool::equal).
//!
//! The canonical non-const atomics sit at fixed indices so callers can name
//! them without a lookup.

use std::fmt;

use crate::{BasicKind, Variability};

/// A 32-bit index into the type pool.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Idx(u32);

impl Idx {
    // === Canonical atomics (indices 0-22) ===
    // Uniform and varying non-const forms of each non-void kind, laid out
    // pairwise in generality order.

    /// `void`.
    pub const VOID: Self = Self(0);
    pub const UNIFORM_BOOL: Self = Self(1);
    pub const VARYING_BOOL: Self = Self(2);
    pub const UNIFORM_INT8: Self = Self(3);
    pub const VARYING_INT8: Self = Self(4);
    pub const UNIFORM_UINT8: Self = Self(5);
    pub const VARYING_UINT8: Self = Self(6);
    pub const UNIFORM_INT16: Self = Self(7);
    pub const VARYING_INT16: Self = Self(8);
    pub const UNIFORM_UINT16: Self = Self(9);
    pub const VARYING_UINT16: Self = Self(10);
    pub const UNIFORM_INT32: Self = Self(11);
    pub const VARYING_INT32: Self = Self(12);
    pub const UNIFORM_UINT32: Self = Self(13);
    pub const VARYING_UINT32: Self = Self(14);
    pub const UNIFORM_FLOAT: Self = Self(15);
    pub const VARYING_FLOAT: Self = Self(16);
    pub const UNIFORM_INT64: Self = Self(17);
    pub const VARYING_INT64: Self = Self(18);
    pub const UNIFORM_UINT64: Self = Self(19);
    pub const VARYING_UINT64: Self = Self(20);
    pub const UNIFORM_DOUBLE: Self = Self(21);
    pub const VARYING_DOUBLE: Self = Self(22);

    /// `void * uniform`, the target of untyped pointer conversions.
    pub const UNIFORM_VOID_POINTER: Self = Self(23);

    /// Number of pre-interned types; also the first dynamic index.
    pub const PRIMITIVE_COUNT: u32 = 24;

    /// Index of the canonical atomic for `kind` at `variability`, if one
    /// is pre-interned.
    ///
    /// Only non-const uniform and varying forms (and `void`) have fixed
    /// slots; everything else is interned on demand.
    pub const fn canonical_atomic(kind: BasicKind, variability: Variability) -> Option<Self> {
        let slot = kind as u32;
        if slot == 0 {
            return Some(Self::VOID);
        }
        match variability {
            Variability::Uniform => Some(Self(2 * slot - 1)),
            Variability::Varying => Some(Self(2 * slot)),
            Variability::Soa(_) | Variability::Unbound => None,
        }
    }

    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Check if this is one of the pre-interned types.
    #[inline]
    pub const fn is_primitive(self) -> bool {
        self.0 < Self::PRIMITIVE_COUNT
    }

    #[inline]
    pub const fn is_void(self) -> bool {
        self.0 == Self::VOID.0
    }
}

impl fmt::Debug for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Idx({})", self.0)
    }
}
