//! Machine-level representation of types.

use std::fmt;

use super::LayoutEngine;
use crate::stack::ensure_sufficient_stack;
use crate::{BasicKind, Idx, TypeError, TypeKind, Variability};

/// Representation handed to code generation.
///
/// Integers carry only their width; signedness lives in the operations.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum MachineType {
    Void,
    Int(u32),
    Float,
    Double,
    /// SIMD vector.
    Vector { elem: Box<MachineType>, lanes: u32 },
    /// In-memory array; `len == 0` for unsized arrays.
    Array { elem: Box<MachineType>, len: u32 },
    Struct(Vec<MachineType>),
    Pointer(Box<MachineType>),
    /// Untyped pointer (`void *`).
    VoidPointer,
    Function(Box<MachineFunction>),
}

impl MachineType {
    pub fn vector(elem: MachineType, lanes: u32) -> Self {
        MachineType::Vector {
            elem: Box::new(elem),
            lanes,
        }
    }

    pub fn array(elem: MachineType, len: u32) -> Self {
        MachineType::Array {
            elem: Box::new(elem),
            len,
        }
    }

    pub fn pointer(pointee: MachineType) -> Self {
        MachineType::Pointer(Box::new(pointee))
    }

    fn scalar(kind: BasicKind) -> Self {
        match kind {
            BasicKind::Void => MachineType::Void,
            BasicKind::Float => MachineType::Float,
            BasicKind::Double => MachineType::Double,
            _ => MachineType::Int(kind.bits()),
        }
    }
}

/// A lowered function signature.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct MachineFunction {
    pub ret: MachineType,
    pub params: Vec<MachineType>,
}

/// LLVM-style spelling: `i32`, `<4 x float>`, `[8 x i8]`, `{ i32, i64* }`.
impl fmt::Display for MachineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MachineType::Void => f.write_str("void"),
            MachineType::Int(bits) => write!(f, "i{bits}"),
            MachineType::Float => f.write_str("float"),
            MachineType::Double => f.write_str("double"),
            MachineType::Vector { elem, lanes } => write!(f, "<{lanes} x {elem}>"),
            MachineType::Array { elem, len } => write!(f, "[{len} x {elem}]"),
            MachineType::Struct(members) => {
                if members.is_empty() {
                    return f.write_str("{}");
                }
                f.write_str("{ ")?;
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{member}")?;
                }
                f.write_str(" }")
            }
            MachineType::Pointer(pointee) => write!(f, "{pointee}*"),
            MachineType::VoidPointer => f.write_str("i8*"),
            MachineType::Function(func) => write!(f, "{func}"),
        }
    }
}

impl fmt::Display for MachineFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (", self.ret)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{param}")?;
        }
        f.write_str(")")
    }
}

impl LayoutEngine<'_> {
    /// Machine representation of a fully resolved, non-function type.
    ///
    /// Function types lower through [`LayoutEngine::function_type`], which
    /// needs to know whether the mask parameter is wanted.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn machine_type(&mut self, idx: Idx) -> Result<MachineType, TypeError> {
        self.require_resolved("machine_type", idx)?;
        self.lower(idx)
    }

    /// Lowered signature of function type `idx`.
    ///
    /// With `include_mask` the execution mask is appended as a final
    /// parameter. Task functions always take the mask, and their
    /// parameters are marshalled into a struct passed by pointer next to
    /// thread index, thread count, task index and task count.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn function_type(
        &mut self,
        idx: Idx,
        include_mask: bool,
    ) -> Result<MachineFunction, TypeError> {
        self.require_resolved("function_type", idx)?;
        let Some(sig) = self.pool.function_sig(idx).cloned() else {
            return Err(TypeError::internal("function_type", idx, "not a function type"));
        };
        if sig.is_task() && !include_mask {
            return Err(TypeError::internal(
                "function_type",
                idx,
                "task functions always take the execution mask",
            ));
        }

        let mut params = Vec::with_capacity(sig.params.len() + 1);
        for param in sig.params.iter() {
            if param.ty.is_void() {
                return Err(TypeError::internal(
                    "function_type",
                    idx,
                    "void parameter in function signature",
                ));
            }
            params.push(self.lower(param.ty)?);
        }
        if include_mask {
            params.push(self.mask_type());
        }

        let params = if sig.is_task() {
            vec![
                MachineType::pointer(MachineType::Struct(params)),
                MachineType::Int(32), // thread index
                MachineType::Int(32), // thread count
                MachineType::Int(32), // task index
                MachineType::Int(32), // task count
            ]
        } else {
            params
        };
        Ok(MachineFunction {
            ret: self.lower(sig.ret)?,
            params,
        })
    }

    /// One mask element per program instance.
    pub fn mask_type(&self) -> MachineType {
        MachineType::vector(
            MachineType::Int(self.target.mask_bits()),
            self.target.vector_width(),
        )
    }

    fn lower(&mut self, idx: Idx) -> Result<MachineType, TypeError> {
        ensure_sufficient_stack(|| self.lower_kind(idx))
    }

    fn lower_kind(&mut self, idx: Idx) -> Result<MachineType, TypeError> {
        let lanes = self.target.vector_width();
        match *self.pool.kind(idx) {
            TypeKind::Atomic { kind, .. } if kind == BasicKind::Void => Ok(MachineType::Void),
            TypeKind::Atomic {
                kind, variability, ..
            } => match variability {
                Variability::Uniform => Ok(MachineType::scalar(kind)),
                Variability::Varying if kind.is_bool() => Ok(self.mask_type()),
                Variability::Varying => Ok(MachineType::vector(MachineType::scalar(kind), lanes)),
                Variability::Soa(width) => self.lower_soa(idx, width),
                Variability::Unbound => Err(unbound(idx)),
            },
            TypeKind::Enum { variability, .. } => match variability {
                Variability::Uniform => Ok(MachineType::Int(32)),
                Variability::Varying => Ok(MachineType::vector(MachineType::Int(32), lanes)),
                Variability::Soa(width) => Ok(MachineType::array(MachineType::Int(32), width)),
                Variability::Unbound => Err(unbound(idx)),
            },
            TypeKind::Pointer {
                pointee,
                variability,
                is_slice,
                ..
            } => {
                if is_slice {
                    let aggregate = self.pool.slice_struct_type(idx)?;
                    return self.lower(aggregate);
                }
                match variability {
                    Variability::Uniform if self.pool.is_function(pointee) => {
                        let func = self.function_type(pointee, true)?;
                        Ok(MachineType::pointer(MachineType::Function(Box::new(func))))
                    }
                    Variability::Uniform if pointee.is_void() => Ok(MachineType::VoidPointer),
                    Variability::Uniform => Ok(MachineType::pointer(self.lower(pointee)?)),
                    // Varying pointers are vectors of addresses.
                    Variability::Varying => Ok(MachineType::vector(
                        MachineType::Int(self.target.pointer_bits()),
                        lanes,
                    )),
                    Variability::Soa(width) => self.lower_soa(idx, width),
                    Variability::Unbound => Err(unbound(idx)),
                }
            }
            TypeKind::Array { elem, count } => Ok(MachineType::array(self.lower(elem)?, count)),
            TypeKind::Vector { elem, count } => {
                let lowered = self.lower(elem)?;
                match *self.pool.kind(elem) {
                    // Uniform short vectors fill whole native registers.
                    TypeKind::Atomic {
                        kind,
                        variability: Variability::Uniform,
                        ..
                    } => {
                        let native = self.target.native_lanes(kind.bits());
                        let padded = count
                            .div_ceil(native)
                            .checked_mul(native)
                            .ok_or(TypeError::TooLarge { ty: idx })?;
                        Ok(MachineType::vector(lowered, padded))
                    }
                    TypeKind::Atomic {
                        variability: Variability::Varying | Variability::Soa(_),
                        ..
                    } => Ok(MachineType::array(lowered, count)),
                    _ => Err(unbound(idx)),
                }
            }
            TypeKind::Struct { .. } => {
                let members = self.pool.struct_member_types(idx)?;
                let lowered = members
                    .into_iter()
                    .map(|member| self.lower(member))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(MachineType::Struct(lowered))
            }
            TypeKind::Reference { target } => Ok(MachineType::pointer(self.lower(target)?)),
            TypeKind::Function(_) => Err(TypeError::internal(
                "machine_type",
                idx,
                "function types lower through function_type",
            )),
        }
    }

    /// `soa<N>` values are arrays of `N` uniform elements.
    fn lower_soa(&mut self, idx: Idx, width: u32) -> Result<MachineType, TypeError> {
        let uniform = self.pool.as_uniform(idx)?;
        Ok(MachineType::array(self.lower(uniform)?, width))
    }
}

#[cold]
fn unbound(idx: Idx) -> TypeError {
    TypeError::internal(
        "machine_type",
        idx,
        "unbound variability must be resolved before lowering",
    )
}
