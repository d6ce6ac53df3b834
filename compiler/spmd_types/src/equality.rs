//! Structural type equality.
//!
//! Interning already makes identical constructions share an `Idx`, so the
//! identity check answers most queries. The structural walk is still
//! needed for two things interning cannot see: struct members, which
//! compare in their resolved form, and const-insensitive comparison.

use crate::stack::ensure_sufficient_stack;
use crate::{FunctionFlags, Idx, Pool, TypeError, TypeKind};

impl Pool {
    /// Structural equality, const included.
    pub fn equal(&mut self, a: Idx, b: Idx) -> bool {
        self.types_equal(a, b, false)
    }

    /// Structural equality with `const` stripped at every level.
    pub fn equal_ignoring_const(&mut self, a: Idx, b: Idx) -> bool {
        self.types_equal(a, b, true)
    }

    fn types_equal(&mut self, a: Idx, b: Idx, ignore_const: bool) -> bool {
        match self.check_equal(a, b, ignore_const) {
            Ok(equal) => equal,
            // Only reachable for malformed input; the violation is already logged.
            Err(err) => {
                tracing::debug!(%err, ?a, ?b, "treating types as unequal");
                false
            }
        }
    }

    fn check_equal(&mut self, a: Idx, b: Idx, ignore_const: bool) -> Result<bool, TypeError> {
        if a == b {
            return Ok(true);
        }
        let (a, b) = if ignore_const {
            (self.strip_const(a)?, self.strip_const(b)?)
        } else if self.is_const(a) != self.is_const(b) {
            return Ok(false);
        } else {
            (a, b)
        };
        if a == b {
            return Ok(true);
        }

        ensure_sufficient_stack(|| match (self.kind(a), self.kind(b)) {
            (
                TypeKind::Atomic {
                    kind: ka,
                    variability: va,
                    ..
                },
                TypeKind::Atomic {
                    kind: kb,
                    variability: vb,
                    ..
                },
            ) => Ok(ka == kb && va == vb),
            // Enums are nominal: the declaration site is the identity.
            (
                TypeKind::Enum {
                    pos: pa,
                    variability: va,
                    ..
                },
                TypeKind::Enum {
                    pos: pb,
                    variability: vb,
                    ..
                },
            ) => Ok(pa == pb && va == vb),
            (
                &TypeKind::Array {
                    elem: ea,
                    count: ca,
                },
                &TypeKind::Array {
                    elem: eb,
                    count: cb,
                },
            )
            | (
                &TypeKind::Vector {
                    elem: ea,
                    count: ca,
                },
                &TypeKind::Vector {
                    elem: eb,
                    count: cb,
                },
            ) => Ok(ca == cb && self.check_equal(ea, eb, ignore_const)?),
            (
                TypeKind::Struct {
                    name: na,
                    members: ma,
                    variability: va,
                    ..
                },
                TypeKind::Struct {
                    name: nb,
                    members: mb,
                    variability: vb,
                    ..
                },
            ) => {
                if na != nb || va != vb || ma.len() != mb.len() {
                    return Ok(false);
                }
                let count = ma.len();
                let resolved = va.is_bound();
                for i in 0..count {
                    let (ta, tb) = if resolved {
                        (self.struct_member_type(a, i)?, self.struct_member_type(b, i)?)
                    } else {
                        (self.struct_members(a)[i].ty, self.struct_members(b)[i].ty)
                    };
                    if !self.check_equal(ta, tb, ignore_const)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            (
                &TypeKind::Pointer {
                    pointee: pa,
                    variability: va,
                    is_slice: sa,
                    is_frozen: fa,
                    ..
                },
                &TypeKind::Pointer {
                    pointee: pb,
                    variability: vb,
                    is_slice: sb,
                    is_frozen: fb,
                    ..
                },
            ) => Ok(va == vb && sa == sb && fa == fb && self.check_equal(pa, pb, ignore_const)?),
            (&TypeKind::Reference { target: ta }, &TypeKind::Reference { target: tb }) => {
                self.check_equal(ta, tb, ignore_const)
            }
            (TypeKind::Function(fa), TypeKind::Function(fb)) => {
                // Parameter names, defaults and cost are not part of the type.
                if fa.flags & FunctionFlags::IDENTITY != fb.flags & FunctionFlags::IDENTITY
                    || fa.params.len() != fb.params.len()
                {
                    return Ok(false);
                }
                let (fa, fb) = (fa.clone(), fb.clone());
                if !self.check_equal(fa.ret, fb.ret, ignore_const)? {
                    return Ok(false);
                }
                for (pa, pb) in fa.params.iter().zip(fb.params.iter()) {
                    if !self.check_equal(pa.ty, pb.ty, ignore_const)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            _ => Ok(false),
        })
    }

    /// Function types have no const form and compare as they are.
    fn strip_const(&mut self, idx: Idx) -> Result<Idx, TypeError> {
        if self.is_function(idx) {
            Ok(idx)
        } else {
            self.as_non_const(idx)
        }
    }
}

#[cfg(test)]
mod tests;
