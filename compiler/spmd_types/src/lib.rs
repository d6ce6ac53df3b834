//! Type algebra for an SPMD compiler front end.
//!
//! Every type carries a *variability*: `uniform` values are shared by all
//! program instances of a gang, `varying` values hold one element per
//! instance, `soa<N>` values are laid out lane-major in chunks of `N`, and
//! `unbound` means not decided yet.
//!
//! # Overview
//!
//! - [`Pool`] interns types and hands out [`Idx`] handles. Constructors,
//!   queries and derivation operators (`as_uniform`, `as_const`,
//!   `resolve_unbound`, ...) are methods on the pool.
//! - [`Pool::equal`] and [`Pool::equal_ignoring_const`] compare types
//!   structurally; [`Pool::mangle`] produces overload keys.
//! - [`Pool::more_general_type`] finds the common type of two operands.
//! - [`Pool::size_unsized_arrays`] sizes `T[]` from an initializer shape.
//! - [`Pool::check_soa`] validates struct-of-arrays conversion.
//! - [`layout::LayoutEngine`] lowers resolved types to machine and debug
//!   representations for a [`layout::Target`].
//!
//! Fallible operations return [`TypeError`]. User-facing variants become
//! diagnostics; [`TypeError::Internal`] marks a caller contract violation.

mod basic;
mod c_decl;
mod convert;
mod derive;
mod equality;
mod error;
mod flags;
mod idx;
mod initializer;
mod kind;
pub mod layout;
mod mangle;
mod pool;
mod soa;
mod stack;
mod variability;

pub use basic::BasicKind;
pub use convert::Conversion;
pub use error::{ContractViolation, SoaViolation, SoaViolationKind, TypeError};
pub use flags::TypeFlags;
pub use idx::Idx;
pub use initializer::InitShape;
pub use kind::{
    ConstValue, Enumerator, FunctionFlags, FunctionParam, FunctionSig, StructMember, TypeKind,
};
pub use pool::Pool;
pub use variability::Variability;
