//! Type errors and diagnostics.
//!
//! Two kinds of failure come out of the type layer:
//! - user errors (incompatible conversions, bad initializers, SOA
//!   violations) that become [`Diagnostic`]s at the caller's position;
//! - contract violations, where a caller asked for something no
//!   well-formed program can produce (the varying C declaration of a
//!   type, a derivation of a function type). These are internal compiler
//!   errors, fatal unless an earlier user error explains them.

use std::fmt;

use spmd_diagnostic::{Diagnostic, DiagnosticQueue, ErrorCode, ErrorGuaranteed};
use spmd_ir::{Name, SourcePos};

use crate::{Idx, Pool, Variability};

/// Why a struct member blocks SOA conversion.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum SoaViolationKind {
    /// Member has explicit variability; SOA members must be unbound.
    BoundVariability(Variability),
    /// References cannot be laid out lane-major.
    Reference,
}

/// A single struct member that cannot be converted to SOA.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct SoaViolation {
    pub pos: SourcePos,
    pub member: Name,
    pub ty: Idx,
    pub kind: SoaViolationKind,
}

/// An operation was applied to a type it is not defined for.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct ContractViolation {
    pub op: &'static str,
    pub ty: Idx,
    pub message: &'static str,
}

impl fmt::Display for ContractViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({:?})", self.op, self.message, self.ty)
    }
}

/// Failure of a type-algebra operation.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum TypeError {
    /// Vector conversion to a different length.
    VectorLengthMismatch {
        pos: SourcePos,
        reason: String,
        ty: Idx,
        expected: u32,
    },
    /// Only atomic types widen to vectors.
    NotVectorizable {
        pos: SourcePos,
        reason: String,
        ty: Idx,
    },
    /// Function types only convert to identical function types.
    IncompatibleFunctions {
        pos: SourcePos,
        reason: String,
        left: Idx,
        right: Idx,
    },
    /// Two vector types of different lengths.
    IncompatibleVectors {
        pos: SourcePos,
        reason: String,
        left: Idx,
        right: Idx,
    },
    /// Pointers to different types, neither of them `void *`.
    IncompatiblePointers {
        pos: SourcePos,
        left: Idx,
        right: Idx,
    },
    EnumToNonAtomic {
        pos: SourcePos,
        reason: String,
        enum_ty: Idx,
        other: Idx,
    },
    /// No common type exists.
    NoConversion {
        pos: SourcePos,
        reason: String,
        from: Idx,
        to: Idx,
    },
    /// Nested initializer lists of different lengths for an unsized
    /// dimension.
    InconsistentInitializer { pos: SourcePos },
    /// Every member that blocks SOA conversion, in declaration order
    /// (nested structs are visited depth-first).
    SoaConversion { violations: Vec<SoaViolation> },
    /// Size or element count of `ty` overflows the layout arithmetic.
    TooLarge { ty: Idx },
    Internal(ContractViolation),
}

impl TypeError {
    /// Build an internal error for an operation misapplied to `ty`.
    #[cold]
    pub fn internal(op: &'static str, ty: Idx, message: &'static str) -> Self {
        tracing::error!(op, ?ty, detail = message, "type contract violation");
        TypeError::Internal(ContractViolation { op, ty, message })
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, TypeError::Internal(_))
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            TypeError::NoConversion { .. } => ErrorCode::E2001,
            TypeError::VectorLengthMismatch { .. } | TypeError::IncompatibleVectors { .. } => {
                ErrorCode::E2002
            }
            TypeError::NotVectorizable { .. } => ErrorCode::E2003,
            TypeError::IncompatibleFunctions { .. } => ErrorCode::E2004,
            TypeError::IncompatiblePointers { .. } => ErrorCode::E2005,
            TypeError::EnumToNonAtomic { .. } => ErrorCode::E2006,
            TypeError::InconsistentInitializer { .. } => ErrorCode::E2007,
            TypeError::SoaConversion { .. } => ErrorCode::E2008,
            TypeError::TooLarge { .. } => ErrorCode::E2009,
            TypeError::Internal(_) => ErrorCode::E9001,
        }
    }

    /// Render as diagnostics. SOA failures produce one per violation.
    pub fn to_diagnostics(&self, pool: &Pool) -> Vec<Diagnostic> {
        let ty = |idx: Idx| pool.format_type(idx);
        let diag = match self {
            TypeError::VectorLengthMismatch {
                pos,
                reason,
                ty: from,
                expected,
            } => Diagnostic::error(self.code())
                .with_message(format!(
                    "can't convert between differently sized vector types \"{}\" -> \"{expected}\" for {reason}",
                    ty(*from),
                ))
                .with_label(*pos, format!("expected {expected} elements")),
            TypeError::NotVectorizable { pos, reason, ty: from } => {
                Diagnostic::error(self.code())
                    .with_message(format!(
                        "can't convert non-atomic type \"{}\" to vector type for {reason}",
                        ty(*from),
                    ))
                    .with_label(*pos, "not an atomic type")
            }
            TypeError::IncompatibleFunctions {
                pos,
                reason,
                left,
                right,
            } => Diagnostic::error(self.code())
                .with_message(format!(
                    "incompatible function types \"{}\" and \"{}\" in {reason}",
                    ty(*left),
                    ty(*right),
                ))
                .with_label(*pos, "function types must match exactly"),
            TypeError::IncompatibleVectors {
                pos,
                reason,
                left,
                right,
            } => Diagnostic::error(self.code())
                .with_message(format!(
                    "implicit conversion between differently sized vector types (\"{}\", \"{}\") for {reason} is not possible",
                    ty(*left),
                    ty(*right),
                ))
                .with_label(*pos, "vector lengths differ"),
            TypeError::IncompatiblePointers { pos, left, right } => {
                Diagnostic::error(self.code())
                    .with_message(format!(
                        "conversion between incompatible pointer types \"{}\" and \"{}\" isn't possible",
                        ty(*left),
                        ty(*right),
                    ))
                    .with_label(*pos, "incompatible pointers")
                    .with_note("only conversions to and from `void *` are implicit")
            }
            TypeError::EnumToNonAtomic {
                pos,
                reason,
                enum_ty,
                other,
            } => Diagnostic::error(self.code())
                .with_message(format!(
                    "implicit conversion from enum type \"{}\" to non-atomic type \"{}\" for {reason} not possible",
                    ty(*enum_ty),
                    ty(*other),
                ))
                .with_label(*pos, "enum used here"),
            TypeError::NoConversion {
                pos,
                reason,
                from,
                to,
            } => Diagnostic::error(self.code())
                .with_message(format!(
                    "implicit conversion between types \"{}\" and \"{}\" for {reason} not possible",
                    ty(*from),
                    ty(*to),
                ))
                .with_label(*pos, "no common type"),
            TypeError::InconsistentInitializer { pos } => Diagnostic::error(self.code())
                .with_message("inconsistent initializer expression list lengths")
                .with_label(*pos, "lists for an unsized dimension must have equal length"),
            TypeError::SoaConversion { violations } => {
                return violations
                    .iter()
                    .map(|v| soa_diagnostic(pool, v))
                    .collect();
            }
            TypeError::TooLarge { ty: too_large } => Diagnostic::error(self.code())
                .with_message(format!("type \"{}\" is too large to lay out", ty(*too_large))),
            TypeError::Internal(violation) => Diagnostic::error(self.code())
                .with_message(format!("internal compiler error: {violation}")),
        };
        vec![diag]
    }

    /// Report into `queue`.
    ///
    /// User errors are emitted as diagnostics. An internal error that
    /// follows an earlier reported error is treated as fallout and dropped;
    /// without one it is a compiler bug and aborts.
    ///
    /// # Panics
    /// Panics on an internal error when `queue` holds no prior errors.
    pub fn report(self, pool: &Pool, queue: &mut DiagnosticQueue) -> ErrorGuaranteed {
        if let TypeError::Internal(violation) = &self {
            if let Some(prior) = queue.has_errors() {
                tracing::debug!(%violation, "suppressing internal error after earlier errors");
                return prior;
            }
            internal_compiler_error(violation);
        }
        let mut guarantee = None;
        for diag in self.to_diagnostics(pool) {
            guarantee = Some(queue.emit_error(diag));
        }
        match guarantee {
            Some(g) => g,
            // An empty SOA violation list is never constructed.
            None => internal_compiler_error(&ContractViolation {
                op: "report",
                ty: Idx::VOID,
                message: "type error produced no diagnostics",
            }),
        }
    }
}

fn soa_diagnostic(pool: &Pool, violation: &SoaViolation) -> Diagnostic {
    let member = pool.interner().lookup(violation.member);
    let ty = pool.format_type(violation.ty);
    let detail = match violation.kind {
        SoaViolationKind::BoundVariability(variability) => {
            format!("has {variability} variability; members of SOA structs must be unbound")
        }
        SoaViolationKind::Reference => "is a reference".to_owned(),
    };
    Diagnostic::error(ErrorCode::E2008)
        .with_message(format!(
            "unable to convert member \"{member}\" of type \"{ty}\" to SOA layout"
        ))
        .with_label(violation.pos, format!("\"{member}\" {detail}"))
}

#[cold]
#[track_caller]
fn internal_compiler_error(violation: &ContractViolation) -> ! {
    panic!("internal compiler error: {violation}")
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeError::VectorLengthMismatch {
                reason, expected, ..
            } => write!(f, "vector length mismatch (expected {expected}) for {reason}"),
            TypeError::NotVectorizable { reason, .. } => {
                write!(f, "non-atomic type cannot become a vector for {reason}")
            }
            TypeError::IncompatibleFunctions { reason, .. } => {
                write!(f, "incompatible function types in {reason}")
            }
            TypeError::IncompatibleVectors { reason, .. } => {
                write!(f, "differently sized vector types for {reason}")
            }
            TypeError::IncompatiblePointers { .. } => f.write_str("incompatible pointer types"),
            TypeError::EnumToNonAtomic { reason, .. } => {
                write!(f, "enum cannot convert to a non-atomic type for {reason}")
            }
            TypeError::NoConversion { reason, .. } => {
                write!(f, "no implicit conversion for {reason}")
            }
            TypeError::InconsistentInitializer { .. } => {
                f.write_str("inconsistent initializer expression list lengths")
            }
            TypeError::SoaConversion { violations } => {
                write!(f, "{} member(s) block SOA conversion", violations.len())
            }
            TypeError::TooLarge { .. } => f.write_str("type is too large to lay out"),
            TypeError::Internal(violation) => write!(f, "internal compiler error: {violation}"),
        }
    }
}

impl std::error::Error for TypeError {}

#[cfg(test)]
mod tests;
