//! Read-only queries: variability, category predicates and accessors.

use spmd_ir::Name;

use crate::{
    Enumerator, FunctionParam, FunctionSig, Idx, Pool, StructMember, TypeError, TypeFlags,
    TypeKind, Variability,
};

impl Pool {
    // === Variability ===

    /// Variability of a type. Arrays, vectors and references report their
    /// element's; functions are always uniform.
    pub fn variability(&self, idx: Idx) -> Variability {
        match self.kind(idx) {
            TypeKind::Atomic { variability, .. }
            | TypeKind::Enum { variability, .. }
            | TypeKind::Pointer { variability, .. }
            | TypeKind::Struct { variability, .. } => *variability,
            TypeKind::Array { elem, .. } | TypeKind::Vector { elem, .. } => {
                self.variability(*elem)
            }
            TypeKind::Reference { target } => self.variability(*target),
            TypeKind::Function(_) => Variability::Uniform,
        }
    }

    pub fn is_uniform(&self, idx: Idx) -> bool {
        self.variability(idx).is_uniform()
    }

    pub fn is_varying(&self, idx: Idx) -> bool {
        self.variability(idx).is_varying()
    }

    pub fn is_soa(&self, idx: Idx) -> bool {
        self.variability(idx).is_soa()
    }

    pub fn has_unbound_variability(&self, idx: Idx) -> bool {
        self.variability(idx).is_unbound()
    }

    /// SOA width of the type, or 0 if it is not SOA.
    pub fn soa_width(&self, idx: Idx) -> u32 {
        self.variability(idx).soa_width()
    }

    /// True when no unbound variability remains outside struct members,
    /// which resolve on access.
    #[inline]
    pub fn is_fully_resolved(&self, idx: Idx) -> bool {
        self.flags(idx).is_resolved()
    }

    // === Category predicates ===

    pub fn is_bool(&self, idx: Idx) -> bool {
        match self.kind(idx) {
            TypeKind::Atomic { kind, .. } => kind.is_bool(),
            TypeKind::Vector { elem, .. } => self.is_bool(*elem),
            TypeKind::Reference { target } => self.is_bool(*target),
            _ => false,
        }
    }

    /// Integer types. Enums count as (unsigned) integers.
    pub fn is_int(&self, idx: Idx) -> bool {
        match self.kind(idx) {
            TypeKind::Atomic { kind, .. } => kind.is_int(),
            TypeKind::Enum { .. } => true,
            TypeKind::Vector { elem, .. } => self.is_int(*elem),
            TypeKind::Reference { target } => self.is_int(*target),
            _ => false,
        }
    }

    pub fn is_unsigned(&self, idx: Idx) -> bool {
        match self.kind(idx) {
            TypeKind::Atomic { kind, .. } => kind.is_unsigned(),
            TypeKind::Enum { .. } => true,
            TypeKind::Vector { elem, .. } => self.is_unsigned(*elem),
            TypeKind::Reference { target } => self.is_unsigned(*target),
            _ => false,
        }
    }

    pub fn is_float(&self, idx: Idx) -> bool {
        match self.kind(idx) {
            TypeKind::Atomic { kind, .. } => kind.is_float(),
            TypeKind::Vector { elem, .. } => self.is_float(*elem),
            TypeKind::Reference { target } => self.is_float(*target),
            _ => false,
        }
    }

    /// Top-level const. Arrays, vectors and references report their
    /// element's; functions and `void` are never const.
    #[inline]
    pub fn is_const(&self, idx: Idx) -> bool {
        self.flags(idx).contains(TypeFlags::IS_CONST)
    }

    #[inline]
    pub fn is_function(&self, idx: Idx) -> bool {
        self.flags(idx).contains(TypeFlags::IS_FUNCTION)
    }

    /// Atomic, enum and pointer types.
    #[inline]
    pub fn is_basic_type(&self, idx: Idx) -> bool {
        self.flags(idx).is_basic()
    }

    /// A non-slice pointer to `void`, of any variability or constness.
    pub fn is_void_pointer(&self, idx: Idx) -> bool {
        matches!(
            self.kind(idx),
            TypeKind::Pointer {
                pointee,
                is_slice: false,
                is_frozen: false,
                ..
            } if pointee.is_void()
        )
    }

    // === Structure ===

    /// Innermost "element" type: the pointee of a pointer, the innermost
    /// non-array element of an array, the element of a vector. Atomics,
    /// enums and structs are their own base.
    pub fn base_type(&self, idx: Idx) -> Result<Idx, TypeError> {
        match self.kind(idx) {
            TypeKind::Atomic { .. } | TypeKind::Enum { .. } | TypeKind::Struct { .. } => Ok(idx),
            TypeKind::Pointer { pointee, .. } => Ok(*pointee),
            TypeKind::Array { elem, .. } => {
                let mut current = *elem;
                while let TypeKind::Array { elem, .. } = self.kind(current) {
                    current = *elem;
                }
                Ok(current)
            }
            TypeKind::Vector { elem, .. } => Ok(*elem),
            TypeKind::Reference { target } => self.base_type(*target),
            TypeKind::Function(_) => Err(TypeError::internal(
                "base_type",
                idx,
                "function types have no base type",
            )),
        }
    }

    /// Referent of a reference; every other type is its own target.
    pub fn reference_target(&self, idx: Idx) -> Idx {
        match self.kind(idx) {
            TypeKind::Reference { target } => *target,
            _ => idx,
        }
    }

    /// Element count of an array (0 if unsized) or vector.
    pub fn element_count(&self, idx: Idx) -> Option<u32> {
        match self.kind(idx) {
            TypeKind::Array { count, .. } | TypeKind::Vector { count, .. } => Some(*count),
            _ => None,
        }
    }

    pub fn array_element_type(&self, idx: Idx) -> Option<Idx> {
        match self.kind(idx) {
            TypeKind::Array { elem, .. } => Some(*elem),
            _ => None,
        }
    }

    pub fn vector_element_type(&self, idx: Idx) -> Option<Idx> {
        match self.kind(idx) {
            TypeKind::Vector { elem, .. } => Some(*elem),
            _ => None,
        }
    }

    /// Product of all nested array dimensions; 0 for non-arrays.
    ///
    /// Fails with [`TypeError::TooLarge`] when the product overflows `u64`.
    pub fn array_total_element_count(&self, idx: Idx) -> Result<u64, TypeError> {
        match self.kind(idx) {
            TypeKind::Array { elem, count } => match self.kind(*elem) {
                TypeKind::Array { .. } => u64::from(*count)
                    .checked_mul(self.array_total_element_count(*elem)?)
                    .ok_or(TypeError::TooLarge { ty: idx }),
                _ => Ok(u64::from(*count)),
            },
            _ => Ok(0),
        }
    }

    // === Struct accessors ===

    pub fn struct_name(&self, idx: Idx) -> Option<Name> {
        match self.kind(idx) {
            TypeKind::Struct { name, .. } => Some(*name),
            _ => None,
        }
    }

    /// Declared members, with their unresolved types.
    pub fn struct_members(&self, idx: Idx) -> &[StructMember] {
        match self.kind(idx) {
            TypeKind::Struct { members, .. } => members,
            _ => &[],
        }
    }

    pub fn struct_member_count(&self, idx: Idx) -> usize {
        self.struct_members(idx).len()
    }

    pub fn struct_member_index(&self, idx: Idx, name: Name) -> Option<usize> {
        self.struct_members(idx).iter().position(|m| m.name == name)
    }

    // === Enum accessors ===

    pub fn enumerators(&self, idx: Idx) -> &[Enumerator] {
        match self.kind(idx) {
            TypeKind::Enum { enumerators, .. } => enumerators,
            _ => &[],
        }
    }

    // === Function accessors ===

    pub fn function_sig(&self, idx: Idx) -> Option<&FunctionSig> {
        match self.kind(idx) {
            TypeKind::Function(sig) => Some(sig),
            _ => None,
        }
    }

    pub fn function_return_type(&self, idx: Idx) -> Option<Idx> {
        self.function_sig(idx).map(|sig| sig.ret)
    }

    pub fn function_param(&self, idx: Idx, i: usize) -> Option<&FunctionParam> {
        self.function_sig(idx).and_then(|sig| sig.params.get(i))
    }
}
