//! Layout and lowering.
//!
//! A [`LayoutEngine`] pairs a pool with a [`Target`] and lowers resolved
//! types to two forms:
//! - [`MachineType`]: the representation code generation works with;
//! - [`DebugType`]: a debug-information descriptor with sizes, alignments
//!   and member offsets in bits.
//!
//! Both lowerings are keyed by variability. Uniform values lower to scalars,
//! varying values to one element per program instance, and `soa<N>` values
//! to arrays of `N` uniform elements. Types with unbound variability cannot
//! be lowered.

mod debug;
mod machine;
mod target;

pub use debug::{DebugMember, DebugScope, DebugType, Encoding};
pub use machine::{MachineFunction, MachineType};
pub use target::{Target, TargetError};

use crate::{Idx, Pool, TypeError};

/// Lowers types of one pool for one target.
pub struct LayoutEngine<'a> {
    pool: &'a mut Pool,
    target: &'a Target,
}

impl<'a> LayoutEngine<'a> {
    /// Lowering may intern derived types (uniform forms of SOA elements,
    /// resolved struct members, slice aggregates), hence the mutable pool.
    pub fn new(pool: &'a mut Pool, target: &'a Target) -> Self {
        LayoutEngine { pool, target }
    }

    pub fn pool(&self) -> &Pool {
        self.pool
    }

    pub fn target(&self) -> &Target {
        self.target
    }

    fn require_resolved(&self, op: &'static str, idx: Idx) -> Result<(), TypeError> {
        if self.pool.is_fully_resolved(idx) {
            Ok(())
        } else {
            Err(TypeError::internal(
                op,
                idx,
                "unbound variability must be resolved before lowering",
            ))
        }
    }
}
