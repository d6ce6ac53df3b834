//! Pre-computed type metadata flags.
//!
//! Computed once when a type is interned so that common questions ("is
//! anything in here still unbound?", "is this a basic type?") are O(1).

use bitflags::bitflags;

bitflags! {
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct TypeFlags: u32 {
        // === Presence flags (bits 0-7) ===
        // Propagate from eagerly owned children: array and vector elements,
        // reference targets, pointees, function return and parameters.
        // Struct members resolve lazily and do not contribute.

        /// Unbound variability somewhere in the type.
        const HAS_UNBOUND = 1 << 0;
        /// Varying variability somewhere in the type.
        const HAS_VARYING = 1 << 1;
        /// A slice pointer somewhere in the type.
        const HAS_SLICE = 1 << 2;

        // === Qualifier flags (bits 8-15) ===

        /// Top-level `const`.
        const IS_CONST = 1 << 8;

        // === Category flags (bits 16-23) ===

        const IS_ATOMIC = 1 << 16;
        const IS_ENUM = 1 << 17;
        const IS_POINTER = 1 << 18;
        const IS_ARRAY = 1 << 19;
        const IS_VECTOR = 1 << 20;
        const IS_STRUCT = 1 << 21;
        const IS_REFERENCE = 1 << 22;
        const IS_FUNCTION = 1 << 23;
    }
}

impl TypeFlags {
    /// Flags inherited by a parent from its eagerly owned children.
    pub const PROPAGATE_MASK: Self = Self::from_bits_truncate(
        Self::HAS_UNBOUND.bits() | Self::HAS_VARYING.bits() | Self::HAS_SLICE.bits(),
    );

    /// Atomic, enum and pointer types.
    pub const BASIC: Self = Self::from_bits_truncate(
        Self::IS_ATOMIC.bits() | Self::IS_ENUM.bits() | Self::IS_POINTER.bits(),
    );

    /// Children's contribution to a parent's flags.
    #[inline]
    pub fn propagated(self) -> Self {
        self & Self::PROPAGATE_MASK
    }

    /// True if no unbound variability is reachable outside struct members.
    #[inline]
    pub fn is_resolved(self) -> bool {
        !self.contains(Self::HAS_UNBOUND)
    }

    #[inline]
    pub fn is_basic(self) -> bool {
        self.intersects(Self::BASIC)
    }
}
