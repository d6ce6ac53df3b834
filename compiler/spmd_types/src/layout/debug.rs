//! Debug-information descriptors.

use spmd_ir::Name;

use super::LayoutEngine;
use crate::stack::ensure_sufficient_stack;
use crate::{BasicKind, Enumerator, Idx, TypeError, TypeKind, Variability};

/// Enclosing scope of a named descriptor (compile unit, function, ...).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct DebugScope(pub Name);

/// DWARF-style base type encoding.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Encoding {
    Boolean,
    Signed,
    Unsigned,
    Float,
}

impl Encoding {
    fn of(kind: BasicKind) -> Self {
        if kind.is_bool() {
            Encoding::Boolean
        } else if kind.is_float() {
            Encoding::Float
        } else if kind.is_unsigned() {
            Encoding::Unsigned
        } else {
            Encoding::Signed
        }
    }
}

/// A struct member with its placement.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct DebugMember {
    pub name: Name,
    pub file: Name,
    pub line: u32,
    pub ty: DebugType,
    pub size_bits: u64,
    pub align_bits: u64,
    pub offset_bits: u64,
}

/// Debug descriptor of a type. Sizes and alignments are in bits.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum DebugType {
    Void,
    Basic {
        name: &'static str,
        size_bits: u64,
        align_bits: u64,
        encoding: Encoding,
    },
    /// Register vector: varying values and short vectors.
    Vector {
        elem: Box<DebugType>,
        count: u32,
        size_bits: u64,
        align_bits: u64,
    },
    /// `count == 0` marks an unsized array.
    Array {
        elem: Box<DebugType>,
        count: u32,
        size_bits: u64,
        align_bits: u64,
    },
    Pointer {
        pointee: Box<DebugType>,
        size_bits: u64,
    },
    Reference {
        target: Box<DebugType>,
        size_bits: u64,
    },
    /// 32-bit enumeration.
    Enumeration {
        scope: DebugScope,
        name: Name,
        file: Name,
        line: u32,
        enumerators: Vec<Enumerator>,
    },
    Struct {
        scope: DebugScope,
        name: Name,
        file: Name,
        line: u32,
        members: Vec<DebugMember>,
        size_bits: u64,
        align_bits: u64,
    },
    Subroutine {
        ret: Box<DebugType>,
        params: Vec<DebugType>,
    },
}

impl DebugType {
    pub fn size_bits(&self) -> u64 {
        match self {
            DebugType::Void | DebugType::Subroutine { .. } => 0,
            DebugType::Enumeration { .. } => 32,
            DebugType::Basic { size_bits, .. }
            | DebugType::Vector { size_bits, .. }
            | DebugType::Array { size_bits, .. }
            | DebugType::Pointer { size_bits, .. }
            | DebugType::Reference { size_bits, .. }
            | DebugType::Struct { size_bits, .. } => *size_bits,
        }
    }

    /// Pointers and references align to their own size.
    pub fn align_bits(&self) -> u64 {
        match self {
            DebugType::Void | DebugType::Subroutine { .. } => 0,
            DebugType::Enumeration { .. } => 32,
            DebugType::Basic { align_bits, .. }
            | DebugType::Vector { align_bits, .. }
            | DebugType::Array { align_bits, .. }
            | DebugType::Struct { align_bits, .. } => *align_bits,
            DebugType::Pointer { size_bits, .. } | DebugType::Reference { size_bits, .. } => {
                *size_bits
            }
        }
    }

    fn array(idx: Idx, elem: DebugType, count: u32) -> Result<Self, TypeError> {
        Ok(DebugType::Array {
            size_bits: scaled(idx, elem.size_bits(), count)?,
            align_bits: elem.align_bits(),
            elem: Box::new(elem),
            count,
        })
    }

    /// One element per program instance.
    fn lanes(idx: Idx, elem: DebugType, lanes: u32) -> Result<Self, TypeError> {
        Ok(DebugType::Vector {
            size_bits: scaled(idx, elem.size_bits(), lanes)?,
            align_bits: scaled(idx, elem.align_bits(), lanes)?,
            elem: Box::new(elem),
            count: lanes,
        })
    }
}

/// `bits * count`, or [`TypeError::TooLarge`] if the product overflows.
fn scaled(idx: Idx, bits: u64, count: u32) -> Result<u64, TypeError> {
    bits.checked_mul(u64::from(count))
        .ok_or(TypeError::TooLarge { ty: idx })
}

impl LayoutEngine<'_> {
    /// Debug descriptor of a fully resolved type within `scope`.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn debug_type(&mut self, idx: Idx, scope: DebugScope) -> Result<DebugType, TypeError> {
        self.require_resolved("debug_type", idx)?;
        self.describe(idx, scope)
    }

    fn describe(&mut self, idx: Idx, scope: DebugScope) -> Result<DebugType, TypeError> {
        ensure_sufficient_stack(|| self.describe_kind(idx, scope))
    }

    fn describe_kind(&mut self, idx: Idx, scope: DebugScope) -> Result<DebugType, TypeError> {
        let lanes = self.target.vector_width();
        let pointer_bits = u64::from(self.target.pointer_bits());
        match *self.pool.kind(idx) {
            TypeKind::Atomic { kind, .. } if kind == BasicKind::Void => Ok(DebugType::Void),
            TypeKind::Atomic {
                kind, variability, ..
            } => {
                // bool occupies a full 32-bit slot in memory.
                let bits = if kind.is_bool() { 32 } else { u64::from(kind.bits()) };
                let basic = DebugType::Basic {
                    name: kind.debug_name(),
                    size_bits: bits,
                    align_bits: bits,
                    encoding: Encoding::of(kind),
                };
                self.by_variability(idx, variability, basic)
            }
            TypeKind::Enum {
                name,
                pos,
                variability,
                ..
            } => {
                let enumeration = DebugType::Enumeration {
                    scope,
                    name,
                    file: pos.file,
                    line: pos.start().0,
                    enumerators: self.pool.enumerators(idx).to_vec(),
                };
                self.by_variability(idx, variability, enumeration)
            }
            TypeKind::Pointer {
                pointee,
                variability,
                is_slice,
                ..
            } => {
                if is_slice {
                    let aggregate = self.pool.slice_struct_type(idx)?;
                    return self.describe(aggregate, scope);
                }
                match variability {
                    Variability::Uniform => Ok(DebugType::Pointer {
                        pointee: Box::new(self.describe(pointee, scope)?),
                        size_bits: pointer_bits,
                    }),
                    // An array of pointers, one per program instance.
                    Variability::Varying => {
                        let pointer = DebugType::Pointer {
                            pointee: Box::new(self.describe(pointee, scope)?),
                            size_bits: pointer_bits,
                        };
                        DebugType::array(idx, pointer, lanes)
                    }
                    Variability::Soa(width) => self.describe_soa(idx, width, scope),
                    Variability::Unbound => Err(unbound(idx)),
                }
            }
            TypeKind::Array { elem, count } => {
                DebugType::array(idx, self.describe(elem, scope)?, count)
            }
            TypeKind::Vector { elem, count } => {
                let elem_ty = self.describe(elem, scope)?;
                match self.pool.variability(elem) {
                    Variability::Soa(_) => DebugType::array(idx, elem_ty, count),
                    Variability::Uniform => Ok(DebugType::Vector {
                        size_bits: scaled(idx, elem_ty.size_bits(), count)?,
                        align_bits: 32 * u64::from(self.target.native_vector_width()),
                        elem: Box::new(elem_ty),
                        count,
                    }),
                    Variability::Varying => Ok(DebugType::Vector {
                        size_bits: scaled(idx, elem_ty.size_bits(), count)?,
                        align_bits: elem_ty.align_bits(),
                        elem: Box::new(elem_ty),
                        count,
                    }),
                    Variability::Unbound => Err(unbound(idx)),
                }
            }
            TypeKind::Struct { name, pos, .. } => self.describe_struct(idx, name, pos, scope),
            TypeKind::Reference { target } => Ok(DebugType::Reference {
                target: Box::new(self.describe(target, scope)?),
                size_bits: pointer_bits,
            }),
            TypeKind::Function(_) => {
                let Some(sig) = self.pool.function_sig(idx).cloned() else {
                    return Err(TypeError::internal("debug_type", idx, "not a function type"));
                };
                let ret = self.describe(sig.ret, scope)?;
                let params = sig
                    .params
                    .iter()
                    .map(|param| self.describe(param.ty, scope))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(DebugType::Subroutine {
                    ret: Box::new(ret),
                    params,
                })
            }
        }
    }

    /// Wrap the uniform descriptor of an atomic or enum for its variability.
    fn by_variability(
        &self,
        idx: Idx,
        variability: Variability,
        uniform: DebugType,
    ) -> Result<DebugType, TypeError> {
        match variability {
            Variability::Uniform => Ok(uniform),
            Variability::Varying => DebugType::lanes(idx, uniform, self.target.vector_width()),
            Variability::Soa(width) => DebugType::array(idx, uniform, width),
            Variability::Unbound => Err(unbound(idx)),
        }
    }

    fn describe_soa(&mut self, idx: Idx, width: u32, scope: DebugScope) -> Result<DebugType, TypeError> {
        let uniform = self.pool.as_uniform(idx)?;
        DebugType::array(idx, self.describe(uniform, scope)?, width)
    }

    /// Sequential C layout: each member starts at the next multiple of its
    /// own alignment, and the total size rounds up to the largest member
    /// alignment.
    fn describe_struct(
        &mut self,
        idx: Idx,
        name: Name,
        pos: spmd_ir::SourcePos,
        scope: DebugScope,
    ) -> Result<DebugType, TypeError> {
        let member_types = self.pool.struct_member_types(idx)?;
        let declared = self.pool.struct_members(idx).to_vec();

        let mut members = Vec::with_capacity(member_types.len());
        let mut offset = 0_u64;
        let mut align = 0_u64;
        for (ty, decl) in member_types.into_iter().zip(declared) {
            let ty = self.describe(ty, scope)?;
            let member_align = ty.align_bits();
            let member_size = ty.size_bits();
            align = align.max(member_align);
            if member_align > 0 {
                offset = offset
                    .checked_next_multiple_of(member_align)
                    .ok_or(TypeError::TooLarge { ty: idx })?;
            }
            members.push(DebugMember {
                name: decl.name,
                file: decl.pos.file,
                line: decl.pos.start().0,
                ty,
                size_bits: member_size,
                align_bits: member_align,
                offset_bits: offset,
            });
            offset = offset
                .checked_add(member_size)
                .ok_or(TypeError::TooLarge { ty: idx })?;
        }
        if align > 0 {
            offset = offset
                .checked_next_multiple_of(align)
                .ok_or(TypeError::TooLarge { ty: idx })?;
        }

        Ok(DebugType::Struct {
            scope,
            name,
            file: pos.file,
            line: pos.start().0,
            members,
            size_bits: offset,
            align_bits: align,
        })
    }
}

#[cold]
fn unbound(idx: Idx) -> TypeError {
    TypeError::internal(
        "debug_type",
        idx,
        "unbound variability must be resolved before lowering",
    )
}

#[cfg(test)]
mod tests;
