//! Type constructors.

use spmd_ir::{Name, SourcePos};

use crate::{
    BasicKind, Enumerator, FunctionSig, Idx, Pool, StructMember, TypeError, TypeKind, Variability,
};

impl Pool {
    // === Atomics ===

    /// Non-const atomic. `void` ignores `variability`.
    pub fn atomic(&mut self, kind: BasicKind, variability: Variability) -> Idx {
        if let Some(idx) = Idx::canonical_atomic(kind, variability) {
            return idx;
        }
        self.intern(TypeKind::Atomic {
            kind,
            variability,
            is_const: false,
        })
    }

    /// Const atomic. `void` is never const.
    pub fn const_atomic(&mut self, kind: BasicKind, variability: Variability) -> Idx {
        if kind == BasicKind::Void {
            return Idx::VOID;
        }
        self.intern(TypeKind::Atomic {
            kind,
            variability,
            is_const: true,
        })
    }

    // === Nominal types ===

    /// Declare an enum. New enums start with unbound variability.
    pub fn enum_type(
        &mut self,
        name: Name,
        pos: SourcePos,
        enumerators: impl Into<Box<[Enumerator]>>,
    ) -> Idx {
        self.intern(TypeKind::Enum {
            name,
            pos,
            enumerators: enumerators.into(),
            variability: Variability::Unbound,
            is_const: false,
        })
    }

    /// Declare a struct with the given top-level variability.
    pub fn struct_type(
        &mut self,
        name: Name,
        members: impl Into<Box<[StructMember]>>,
        variability: Variability,
        pos: SourcePos,
    ) -> Idx {
        self.intern(TypeKind::Struct {
            name,
            members: members.into(),
            variability,
            is_const: false,
            pos,
        })
    }

    // === Pointers and references ===

    /// Non-const, non-slice pointer.
    pub fn pointer(&mut self, pointee: Idx, variability: Variability) -> Idx {
        self.intern(TypeKind::Pointer {
            pointee,
            variability,
            is_const: false,
            is_slice: false,
            is_frozen: false,
        })
    }

    pub fn uniform_pointer(&mut self, pointee: Idx) -> Idx {
        self.pointer(pointee, Variability::Uniform)
    }

    pub fn varying_pointer(&mut self, pointee: Idx) -> Idx {
        self.pointer(pointee, Variability::Varying)
    }

    /// `void * uniform`.
    #[inline]
    pub fn void_pointer(&self) -> Idx {
        Idx::UNIFORM_VOID_POINTER
    }

    pub fn reference(&mut self, target: Idx) -> Idx {
        self.intern(TypeKind::Reference { target })
    }

    // === Sequences ===

    /// Array of `count` elements; `count == 0` declares an unsized array.
    pub fn array(&mut self, elem: Idx, count: u32) -> Result<Idx, TypeError> {
        if elem.is_void() {
            return Err(TypeError::internal("array", elem, "array of void"));
        }
        Ok(self.intern(TypeKind::Array { elem, count }))
    }

    /// Short vector of `count > 0` atomic elements.
    pub fn vector(&mut self, elem: Idx, count: u32) -> Result<Idx, TypeError> {
        if count == 0 {
            return Err(TypeError::internal("vector", elem, "zero-length vector"));
        }
        let is_atomic = matches!(
            self.kind(elem),
            TypeKind::Atomic { kind, .. } if *kind != BasicKind::Void
        );
        if !is_atomic {
            return Err(TypeError::internal(
                "vector",
                elem,
                "vector element must be a non-void atomic type",
            ));
        }
        Ok(self.intern(TypeKind::Vector { elem, count }))
    }

    // === Functions ===

    pub fn function(&mut self, sig: FunctionSig) -> Idx {
        self.intern(TypeKind::Function(Box::new(sig)))
    }
}

#[cfg(test)]
mod tests;
