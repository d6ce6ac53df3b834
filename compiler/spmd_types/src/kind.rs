//! The eight type variants and their payloads.

use std::num::NonZeroU32;

use bitflags::bitflags;
use spmd_ir::{Name, SourcePos};

use crate::{BasicKind, Idx, Variability};

/// Structural description of an interned type.
///
/// Variability of `Array`, `Vector` and `Reference` is inherited from the
/// element or referent and therefore not stored. A `Function` is always
/// uniform.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeKind {
    Atomic {
        kind: BasicKind,
        variability: Variability,
        is_const: bool,
    },
    /// Enums are nominal: identity is the declaration position.
    Enum {
        name: Name,
        pos: SourcePos,
        enumerators: Box<[Enumerator]>,
        variability: Variability,
        is_const: bool,
    },
    Pointer {
        pointee: Idx,
        variability: Variability,
        is_const: bool,
        is_slice: bool,
        /// Slice whose offset may not change.
        is_frozen: bool,
    },
    /// `count == 0` is an unsized array.
    Array { elem: Idx, count: u32 },
    /// Short vector of an atomic element. `count > 0`.
    Vector { elem: Idx, count: u32 },
    /// Members with unbound variability take the struct's variability when
    /// read through [`Pool::struct_member_type`](crate::Pool::struct_member_type).
    Struct {
        name: Name,
        members: Box<[StructMember]>,
        variability: Variability,
        is_const: bool,
        pos: SourcePos,
    },
    Reference { target: Idx },
    Function(Box<FunctionSig>),
}

/// A named enum constant.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Enumerator {
    pub name: Name,
    pub value: u32,
}

impl Enumerator {
    pub fn new(name: Name, value: u32) -> Self {
        Enumerator { name, value }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct StructMember {
    /// Declared type, possibly with unbound variability.
    pub ty: Idx,
    pub name: Name,
    pub pos: SourcePos,
}

impl StructMember {
    pub fn new(ty: Idx, name: Name, pos: SourcePos) -> Self {
        StructMember { ty, name, pos }
    }
}

/// Compile-time constant used as a parameter default.
///
/// Floats are stored as bits so the value can take part in hashing.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ConstValue {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(u64),
}

impl ConstValue {
    pub fn float(value: f64) -> Self {
        ConstValue::Float(value.to_bits())
    }

    pub fn as_f64(self) -> Option<f64> {
        match self {
            ConstValue::Float(bits) => Some(f64::from_bits(bits)),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct FunctionParam {
    pub ty: Idx,
    /// `Name::EMPTY` for anonymous parameters.
    pub name: Name,
    pub default: Option<ConstValue>,
    pub pos: SourcePos,
}

impl FunctionParam {
    /// Anonymous parameter without a default.
    pub fn new(ty: Idx) -> Self {
        FunctionParam {
            ty,
            name: Name::EMPTY,
            default: None,
            pos: SourcePos::DUMMY,
        }
    }

    #[must_use]
    pub fn named(mut self, name: Name) -> Self {
        self.name = name;
        self
    }

    #[must_use]
    pub fn with_default(mut self, value: ConstValue) -> Self {
        self.default = Some(value);
        self
    }

    #[must_use]
    pub fn at(mut self, pos: SourcePos) -> Self {
        self.pos = pos;
        self
    }
}

bitflags! {
    /// Function qualifiers.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct FunctionFlags: u8 {
        /// Launched asynchronously; parameters are marshalled into a struct.
        const TASK = 1 << 0;
        const EXPORTED = 1 << 1;
        const EXTERN_C = 1 << 2;
        /// Safe to run with an all-off mask.
        const SAFE = 1 << 3;
    }
}

impl FunctionFlags {
    /// Qualifiers that take part in type equality. `SAFE` does not.
    pub const IDENTITY: Self = Self::from_bits_truncate(
        Self::TASK.bits() | Self::EXPORTED.bits() | Self::EXTERN_C.bits(),
    );
}

/// Signature of a function type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FunctionSig {
    pub ret: Idx,
    pub params: Box<[FunctionParam]>,
    pub flags: FunctionFlags,
    /// Explicit inlining cost, if the declaration gave one.
    pub cost_override: Option<NonZeroU32>,
}

impl FunctionSig {
    pub fn new(ret: Idx, params: impl Into<Box<[FunctionParam]>>) -> Self {
        FunctionSig {
            ret,
            params: params.into(),
            flags: FunctionFlags::empty(),
            cost_override: None,
        }
    }

    #[must_use]
    pub fn with_flags(mut self, flags: FunctionFlags) -> Self {
        self.flags |= flags;
        self
    }

    #[must_use]
    pub fn with_cost(mut self, cost: NonZeroU32) -> Self {
        self.cost_override = Some(cost);
        self
    }

    pub fn is_task(&self) -> bool {
        self.flags.contains(FunctionFlags::TASK)
    }
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{Idx, Variability};
    spmd_ir::static_assert_size!(Idx, 4);
    spmd_ir::static_assert_size!(Variability, 8);
}
