//! Shared vocabulary for the SPMD compiler front end.
//!
//! This crate holds the small, plain-data types that every other phase
//! threads through its results:
//! - [`SourcePos`] for declaration sites and diagnostics
//! - [`Name`] for interned identifiers
//! - [`StringInterner`] / [`SharedInterner`] for producing and resolving names
//!
//! All types here are `Copy` or cheaply cloneable and implement
//! `Eq + Hash` so they can live inside interned type keys.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod interner;
mod name;
mod pos;

pub use interner::{InternError, SharedInterner, StringInterner, StringLookup};
pub use name::Name;
pub use pos::SourcePos;
