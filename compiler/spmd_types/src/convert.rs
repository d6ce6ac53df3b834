//! Implicit conversion: the common type of a binary operation's operands.

use std::cmp::Ordering;

use spmd_ir::SourcePos;

use crate::stack::ensure_sufficient_stack;
use crate::{Idx, Pool, TypeError, TypeKind};

/// Context for [`Pool::more_general_type`].
#[derive(Clone, Debug)]
pub struct Conversion {
    /// Where the conversion happens; every error points here.
    pub pos: SourcePos,
    /// What the conversion is for, e.g. `"binary +"`. Appears in messages.
    pub reason: String,
    /// Promote both operands to varying even if neither is.
    pub force_varying: bool,
    /// When non-zero, both operands are promoted to vectors of this length.
    pub vector_width: u32,
}

impl Conversion {
    pub fn new(pos: SourcePos, reason: impl Into<String>) -> Self {
        Conversion {
            pos,
            reason: reason.into(),
            force_varying: false,
            vector_width: 0,
        }
    }

    #[must_use]
    pub fn forcing_varying(mut self) -> Self {
        self.force_varying = true;
        self
    }

    #[must_use]
    pub fn with_vector_width(mut self, width: u32) -> Self {
        self.vector_width = width;
        self
    }
}

impl Pool {
    /// The type both `a` and `b` implicitly convert to.
    ///
    /// Operands are first promoted to varying (if either is varying or the
    /// conversion forces it) and to vectors (if a width is requested).
    /// Const-only differences resolve to the non-const type; a `void *`
    /// yields to any other pointer; vectors unify element-wise; two enums
    /// meet at `unsigned int32`; an enum yields to an atomic; between two
    /// atomics the later basic kind wins.
    #[tracing::instrument(level = "trace", skip_all, fields(reason = %conv.reason))]
    pub fn more_general_type(
        &mut self,
        a: Idx,
        b: Idx,
        conv: &Conversion,
    ) -> Result<Idx, TypeError> {
        let result = self.unify_operands(a, b, conv, conv.vector_width);
        if let Err(err) = &result {
            tracing::trace!(%err, "no common type");
        }
        result
    }

    fn unify_operands(
        &mut self,
        mut a: Idx,
        mut b: Idx,
        conv: &Conversion,
        vector_width: u32,
    ) -> Result<Idx, TypeError> {
        let has_function = self.is_function(a) || self.is_function(b);
        if !has_function && (conv.force_varying || self.is_varying(a) || self.is_varying(b)) {
            a = self.as_varying(a)?;
            b = self.as_varying(b)?;
        }

        if vector_width > 0 {
            a = self.vector_convert(a, conv, vector_width)?;
            b = self.vector_convert(b, conv, vector_width)?;
        }

        if self.equal(a, b) {
            return Ok(a);
        }

        if has_function {
            return Err(TypeError::IncompatibleFunctions {
                pos: conv.pos,
                reason: conv.reason.clone(),
                left: a,
                right: b,
            });
        }

        if self.equal_ignoring_const(a, b) {
            return self.as_non_const(a);
        }

        if matches!(self.kind(a), TypeKind::Pointer { .. })
            && matches!(self.kind(b), TypeKind::Pointer { .. })
        {
            return if self.is_void_pointer(a) {
                Ok(b)
            } else if self.is_void_pointer(b) {
                Ok(a)
            } else {
                Err(TypeError::IncompatiblePointers {
                    pos: conv.pos,
                    left: a,
                    right: b,
                })
            };
        }

        // Vector operands unify element-wise and are rebuilt at their length.
        match (self.vector_parts(a), self.vector_parts(b)) {
            (Some((elem_a, count_a)), Some((elem_b, count_b))) => {
                if count_a != count_b {
                    return Err(TypeError::IncompatibleVectors {
                        pos: conv.pos,
                        reason: conv.reason.clone(),
                        left: a,
                        right: b,
                    });
                }
                let elem = ensure_sufficient_stack(|| self.unify_operands(elem_a, elem_b, conv, 0))?;
                return self.rewrap_vector(elem, count_a);
            }
            (Some((elem_a, count)), None) => {
                let elem = ensure_sufficient_stack(|| self.unify_operands(elem_a, b, conv, 0))?;
                return self.rewrap_vector(elem, count);
            }
            (None, Some((elem_b, count))) => {
                let elem = ensure_sufficient_stack(|| self.unify_operands(a, elem_b, conv, 0))?;
                return self.rewrap_vector(elem, count);
            }
            (None, None) => {}
        }

        let target_a = self.reference_target(a);
        let target_b = self.reference_target(b);
        let is_enum = |pool: &Pool, idx: Idx| matches!(pool.kind(idx), TypeKind::Enum { .. });
        let is_atomic = |pool: &Pool, idx: Idx| matches!(pool.kind(idx), TypeKind::Atomic { .. });

        match (is_enum(self, target_a), is_enum(self, target_b)) {
            // Distinct enums meet at uint32. Varying promotion above makes
            // their variabilities agree.
            (true, true) => {
                return Ok(if self.is_varying(target_a) {
                    Idx::VARYING_UINT32
                } else {
                    Idx::UNIFORM_UINT32
                });
            }
            (true, false) => {
                return if is_atomic(self, target_b) {
                    Ok(target_b)
                } else {
                    Err(enum_to_non_atomic(a, b, conv))
                };
            }
            (false, true) => {
                return if is_atomic(self, target_a) {
                    Ok(target_a)
                } else {
                    Err(enum_to_non_atomic(b, a, conv))
                };
            }
            (false, false) => {}
        }

        match (self.kind(target_a), self.kind(target_b)) {
            (&TypeKind::Atomic { kind: kind_a, .. }, &TypeKind::Atomic { kind: kind_b, .. }) => {
                match kind_a.cmp(&kind_b) {
                    Ordering::Greater => Ok(target_a),
                    Ordering::Less => Ok(target_b),
                    // Same kind reached through a reference: only const can differ.
                    Ordering::Equal => self.as_non_const(target_a),
                }
            }
            _ => Err(TypeError::NoConversion {
                pos: conv.pos,
                reason: conv.reason.clone(),
                from: a,
                to: b,
            }),
        }
    }

    /// Promote an operand to a vector of `width` elements.
    fn vector_convert(&mut self, idx: Idx, conv: &Conversion, width: u32) -> Result<Idx, TypeError> {
        match *self.kind(idx) {
            TypeKind::Vector { count, .. } if count == width => Ok(idx),
            TypeKind::Vector { .. } => Err(TypeError::VectorLengthMismatch {
                pos: conv.pos,
                reason: conv.reason.clone(),
                ty: idx,
                expected: width,
            }),
            TypeKind::Atomic { .. } => self.vector(idx, width),
            _ => Err(TypeError::NotVectorizable {
                pos: conv.pos,
                reason: conv.reason.clone(),
                ty: idx,
            }),
        }
    }

    fn vector_parts(&self, idx: Idx) -> Option<(Idx, u32)> {
        match *self.kind(idx) {
            TypeKind::Vector { elem, count } => Some((elem, count)),
            _ => None,
        }
    }

    fn rewrap_vector(&mut self, elem: Idx, count: u32) -> Result<Idx, TypeError> {
        if !matches!(self.kind(elem), TypeKind::Atomic { .. }) {
            return Err(TypeError::internal(
                "more_general_type",
                elem,
                "unified vector element is not atomic",
            ));
        }
        self.vector(elem, count)
    }
}

#[cold]
fn enum_to_non_atomic(enum_ty: Idx, other: Idx, conv: &Conversion) -> TypeError {
    TypeError::EnumToNonAtomic {
        pos: conv.pos,
        reason: conv.reason.clone(),
        enum_ty,
        other,
    }
}
