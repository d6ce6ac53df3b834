//! Derivation operators.
//!
//! Each operator returns a type that differs from its input in exactly one
//! respect (variability, constness, signedness, slice-ness, or array size).
//! Derivations of `void` return `void`. Function types only support
//! [`Pool::resolve_unbound`]; every other derivation on them is a contract
//! violation.

use spmd_ir::{Name, SourcePos};

use crate::stack::ensure_sufficient_stack;
use crate::{Idx, Pool, StructMember, TypeError, TypeKind, Variability};

impl Pool {
    // === Variability ===

    pub fn as_uniform(&mut self, idx: Idx) -> Result<Idx, TypeError> {
        self.with_variability(idx, Variability::Uniform, "as_uniform")
    }

    pub fn as_varying(&mut self, idx: Idx) -> Result<Idx, TypeError> {
        self.with_variability(idx, Variability::Varying, "as_varying")
    }

    pub fn as_unbound(&mut self, idx: Idx) -> Result<Idx, TypeError> {
        self.with_variability(idx, Variability::Unbound, "as_unbound")
    }

    /// SOA form of width `width`.
    ///
    /// Converting a struct runs the SOA feasibility check first; on failure
    /// every offending member is reported and no type is interned.
    pub fn as_soa(&mut self, idx: Idx, width: u32) -> Result<Idx, TypeError> {
        if width == 0 {
            return Err(TypeError::internal("as_soa", idx, "SOA width must be positive"));
        }
        self.with_variability(idx, Variability::Soa(width), "as_soa")
    }

    /// Arrays, vectors and references recurse into their element; atomics,
    /// enums, pointers and structs change only their own variability.
    fn with_variability(
        &mut self,
        idx: Idx,
        variability: Variability,
        op: &'static str,
    ) -> Result<Idx, TypeError> {
        if idx.is_void() || (!self.is_function(idx) && self.variability(idx) == variability) {
            return Ok(idx);
        }
        ensure_sufficient_stack(|| match *self.kind(idx) {
            TypeKind::Struct { .. } => {
                if variability.is_soa() {
                    self.check_soa(idx)?;
                }
                Ok(self.replace_own_variability(idx, variability))
            }
            TypeKind::Atomic { .. } | TypeKind::Enum { .. } | TypeKind::Pointer { .. } => {
                Ok(self.replace_own_variability(idx, variability))
            }
            TypeKind::Array { elem, count } => {
                let elem = self.with_variability(elem, variability, op)?;
                Ok(self.intern(TypeKind::Array { elem, count }))
            }
            TypeKind::Vector { elem, count } => {
                let elem = self.with_variability(elem, variability, op)?;
                Ok(self.intern(TypeKind::Vector { elem, count }))
            }
            TypeKind::Reference { target } => {
                let target = self.with_variability(target, variability, op)?;
                Ok(self.intern(TypeKind::Reference { target }))
            }
            TypeKind::Function(_) => Err(TypeError::internal(
                op,
                idx,
                "function types have no variability",
            )),
        })
    }

    fn replace_own_variability(&mut self, idx: Idx, new: Variability) -> Idx {
        let mut kind = self.kind(idx).clone();
        match &mut kind {
            TypeKind::Atomic { variability, .. }
            | TypeKind::Enum { variability, .. }
            | TypeKind::Pointer { variability, .. }
            | TypeKind::Struct { variability, .. } => *variability = new,
            _ => return idx,
        }
        self.intern(kind)
    }

    /// Replace unbound variability with `variability`.
    ///
    /// Pointees are resolved as uniform whatever `variability` is, and only
    /// an unbound pointer takes `variability` itself. Struct members stay
    /// unbound: they resolve against the struct's variability on access.
    pub fn resolve_unbound(
        &mut self,
        idx: Idx,
        variability: Variability,
    ) -> Result<Idx, TypeError> {
        if variability.is_unbound() {
            return Err(TypeError::internal(
                "resolve_unbound",
                idx,
                "cannot resolve to unbound variability",
            ));
        }
        if self.is_fully_resolved(idx) {
            return Ok(idx);
        }
        ensure_sufficient_stack(|| match self.kind(idx) {
            TypeKind::Atomic { .. } | TypeKind::Enum { .. } | TypeKind::Struct { .. } => {
                if self.has_unbound_variability(idx) {
                    Ok(self.replace_own_variability(idx, variability))
                } else {
                    Ok(idx)
                }
            }
            &TypeKind::Pointer {
                pointee,
                variability: own,
                is_const,
                is_slice,
                is_frozen,
            } => {
                let pointee = self.resolve_unbound(pointee, Variability::Uniform)?;
                let own = if own.is_unbound() { variability } else { own };
                Ok(self.intern(TypeKind::Pointer {
                    pointee,
                    variability: own,
                    is_const,
                    is_slice,
                    is_frozen,
                }))
            }
            &TypeKind::Array { elem, count } => {
                let elem = self.resolve_unbound(elem, variability)?;
                Ok(self.intern(TypeKind::Array { elem, count }))
            }
            &TypeKind::Vector { elem, count } => {
                let elem = self.resolve_unbound(elem, variability)?;
                Ok(self.intern(TypeKind::Vector { elem, count }))
            }
            &TypeKind::Reference { target } => {
                let target = self.resolve_unbound(target, variability)?;
                Ok(self.intern(TypeKind::Reference { target }))
            }
            TypeKind::Function(sig) => {
                let mut sig = sig.clone();
                sig.ret = self.resolve_unbound(sig.ret, variability)?;
                for param in sig.params.iter_mut() {
                    param.ty = self.resolve_unbound(param.ty, variability)?;
                }
                Ok(self.intern(TypeKind::Function(sig)))
            }
        })
    }

    // === Constness ===

    pub fn as_const(&mut self, idx: Idx) -> Result<Idx, TypeError> {
        self.with_const(idx, true, "as_const")
    }

    pub fn as_non_const(&mut self, idx: Idx) -> Result<Idx, TypeError> {
        self.with_const(idx, false, "as_non_const")
    }

    fn with_const(&mut self, idx: Idx, is_const: bool, op: &'static str) -> Result<Idx, TypeError> {
        if self.is_function(idx) {
            return Err(TypeError::internal(op, idx, "function types cannot be const"));
        }
        if idx.is_void() || self.is_const(idx) == is_const {
            return Ok(idx);
        }
        ensure_sufficient_stack(|| match *self.kind(idx) {
            TypeKind::Array { elem, count } => {
                let elem = self.with_const(elem, is_const, op)?;
                Ok(self.intern(TypeKind::Array { elem, count }))
            }
            TypeKind::Vector { elem, count } => {
                let elem = self.with_const(elem, is_const, op)?;
                Ok(self.intern(TypeKind::Vector { elem, count }))
            }
            TypeKind::Reference { target } => {
                let target = self.with_const(target, is_const, op)?;
                Ok(self.intern(TypeKind::Reference { target }))
            }
            _ => {
                let mut kind = self.kind(idx).clone();
                if let TypeKind::Atomic { is_const: c, .. }
                | TypeKind::Enum { is_const: c, .. }
                | TypeKind::Pointer { is_const: c, .. }
                | TypeKind::Struct { is_const: c, .. } = &mut kind
                {
                    *c = is_const;
                }
                Ok(self.intern(kind))
            }
        })
    }

    // === Signedness ===

    /// Unsigned counterpart of an integer atomic (or array of them).
    /// Unsigned types map to themselves; `None` when there is no
    /// counterpart.
    pub fn as_unsigned(&mut self, idx: Idx) -> Option<Idx> {
        match *self.kind(idx) {
            TypeKind::Atomic {
                kind,
                variability,
                is_const,
            } => {
                let kind = kind.to_unsigned()?;
                Some(self.intern(TypeKind::Atomic {
                    kind,
                    variability,
                    is_const,
                }))
            }
            TypeKind::Array { elem, count } => {
                let elem = self.as_unsigned(elem)?;
                Some(self.intern(TypeKind::Array { elem, count }))
            }
            _ => None,
        }
    }

    // === Slices ===

    pub fn as_slice(&mut self, idx: Idx) -> Result<Idx, TypeError> {
        self.with_slice(idx, "as_slice", |slice, _| *slice = true)
    }

    /// Drops both the slice and frozen flags.
    pub fn as_non_slice(&mut self, idx: Idx) -> Result<Idx, TypeError> {
        self.with_slice(idx, "as_non_slice", |slice, frozen| {
            *slice = false;
            *frozen = false;
        })
    }

    pub fn as_frozen_slice(&mut self, idx: Idx) -> Result<Idx, TypeError> {
        self.with_slice(idx, "as_frozen_slice", |slice, frozen| {
            *slice = true;
            *frozen = true;
        })
    }

    fn with_slice(
        &mut self,
        idx: Idx,
        op: &'static str,
        update: impl FnOnce(&mut bool, &mut bool),
    ) -> Result<Idx, TypeError> {
        let mut kind = self.kind(idx).clone();
        let TypeKind::Pointer {
            is_slice,
            is_frozen,
            ..
        } = &mut kind
        else {
            return Err(TypeError::internal(op, idx, "not a pointer type"));
        };
        update(is_slice, is_frozen);
        Ok(self.intern(kind))
    }

    /// The `{ptr, offset}` aggregate a slice pointer lowers to.
    ///
    /// `ptr` is the non-slice form of the pointer; `offset` is an `int32`
    /// with the pointer's variability. The aggregate itself is uniform and
    /// as const as the pointer.
    pub fn slice_struct_type(&mut self, idx: Idx) -> Result<Idx, TypeError> {
        let (variability, is_const) = match self.kind(idx) {
            TypeKind::Pointer {
                variability,
                is_const,
                is_slice: true,
                ..
            } => (*variability, *is_const),
            _ => {
                return Err(TypeError::internal(
                    "slice_struct_type",
                    idx,
                    "not a slice pointer",
                ))
            }
        };
        let offset = match variability {
            Variability::Uniform => Idx::UNIFORM_INT32,
            Variability::Varying => Idx::VARYING_INT32,
            Variability::Soa(_) | Variability::Unbound => {
                return Err(TypeError::internal(
                    "slice_struct_type",
                    idx,
                    "slice pointers must be uniform or varying",
                ))
            }
        };
        let ptr = self.as_non_slice(idx)?;
        let interner = self.interner();
        let members = [
            StructMember::new(ptr, interner.intern("ptr"), SourcePos::DUMMY),
            StructMember::new(offset, interner.intern("offset"), SourcePos::DUMMY),
        ];
        let name = interner.intern("__ptr_slice_tmp");
        Ok(self.intern(TypeKind::Struct {
            name,
            members: Box::new(members),
            variability: Variability::Uniform,
            is_const,
            pos: SourcePos::DUMMY,
        }))
    }

    // === Arrays ===

    /// Give an unsized array its element count.
    pub fn sized_array(&mut self, idx: Idx, count: u32) -> Result<Idx, TypeError> {
        match *self.kind(idx) {
            TypeKind::Array { elem, count: 0 } => Ok(self.intern(TypeKind::Array { elem, count })),
            _ => Err(TypeError::internal(
                "sized_array",
                idx,
                "only unsized arrays can be sized",
            )),
        }
    }

    // === Struct members ===

    /// Type of member `i` as seen through the struct: unbound member
    /// variability resolves to the struct's, and members of a const struct
    /// are const.
    pub fn struct_member_type(&mut self, idx: Idx, i: usize) -> Result<Idx, TypeError> {
        let (member, variability, is_const) = match self.kind(idx) {
            TypeKind::Struct {
                members,
                variability,
                is_const,
                ..
            } => match members.get(i) {
                Some(member) => (member.ty, *variability, *is_const),
                None => {
                    return Err(TypeError::internal(
                        "struct_member_type",
                        idx,
                        "member index out of range",
                    ))
                }
            },
            _ => {
                return Err(TypeError::internal(
                    "struct_member_type",
                    idx,
                    "not a struct type",
                ))
            }
        };
        if variability.is_unbound() {
            return Err(TypeError::internal(
                "struct_member_type",
                idx,
                "struct variability must be resolved before member access",
            ));
        }
        let ty = self.resolve_unbound(member, variability)?;
        if is_const {
            self.as_const(ty)
        } else {
            Ok(ty)
        }
    }

    /// Resolved type of the member called `name`, if there is one.
    pub fn struct_member_by_name(&mut self, idx: Idx, name: Name) -> Result<Option<Idx>, TypeError> {
        match self.struct_member_index(idx, name) {
            Some(i) => self.struct_member_type(idx, i).map(Some),
            None => Ok(None),
        }
    }

    /// Resolved types of every member, in declaration order.
    pub fn struct_member_types(&mut self, idx: Idx) -> Result<Vec<Idx>, TypeError> {
        (0..self.struct_member_count(idx))
            .map(|i| self.struct_member_type(idx, i))
            .collect()
    }
}
