//! The type pool: hash-consed storage for every type in a compilation.
//!
//! Types are immutable once interned. Constructors and derivation
//! operators either return an existing handle or intern a new entry;
//! nothing is ever mutated or freed, matching the single-shot lifetime of
//! a compilation unit.

mod construct;
mod format;
mod query;

use rustc_hash::FxHashMap;
use spmd_ir::{SharedInterner, StringInterner};

use crate::{BasicKind, Idx, TypeFlags, TypeKind, Variability};

/// Interned type storage.
pub struct Pool {
    items: Vec<TypeKind>,
    flags: Vec<TypeFlags>,
    dedup: FxHashMap<TypeKind, Idx>,
    interner: SharedInterner,
}

impl Pool {
    /// Create a pool with its own interner.
    pub fn new() -> Self {
        Self::with_interner(SharedInterner::new())
    }

    /// Create a pool that resolves names through `interner`.
    pub fn with_interner(interner: SharedInterner) -> Self {
        let mut pool = Pool {
            items: Vec::with_capacity(256),
            flags: Vec::with_capacity(256),
            dedup: FxHashMap::default(),
            interner,
        };
        pool.intern_primitives();
        pool
    }

    /// Fill the fixed slots in the order `Idx` expects.
    fn intern_primitives(&mut self) {
        self.intern(TypeKind::Atomic {
            kind: BasicKind::Void,
            variability: Variability::Uniform,
            is_const: false,
        });
        for kind in BasicKind::NON_VOID {
            for variability in [Variability::Uniform, Variability::Varying] {
                self.intern(TypeKind::Atomic {
                    kind,
                    variability,
                    is_const: false,
                });
            }
        }
        let void_ptr = self.intern(TypeKind::Pointer {
            pointee: Idx::VOID,
            variability: Variability::Uniform,
            is_const: false,
            is_slice: false,
            is_frozen: false,
        });
        debug_assert_eq!(void_ptr, Idx::UNIFORM_VOID_POINTER);
        debug_assert_eq!(self.items.len(), Idx::PRIMITIVE_COUNT as usize);
    }

    /// Intern a type, returning the existing handle for identical entries.
    pub(crate) fn intern(&mut self, kind: TypeKind) -> Idx {
        if let Some(&idx) = self.dedup.get(&kind) {
            return idx;
        }
        let flags = self.compute_flags(&kind);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "the pool never holds more than u32::MAX types"
        )]
        let idx = Idx::from_raw(self.items.len() as u32);
        self.items.push(kind.clone());
        self.flags.push(flags);
        self.dedup.insert(kind, idx);
        idx
    }

    fn compute_flags(&self, kind: &TypeKind) -> TypeFlags {
        fn own(variability: Variability, is_const: bool) -> TypeFlags {
            let mut flags = TypeFlags::empty();
            if variability.is_unbound() {
                flags |= TypeFlags::HAS_UNBOUND;
            }
            if variability.is_varying() {
                flags |= TypeFlags::HAS_VARYING;
            }
            if is_const {
                flags |= TypeFlags::IS_CONST;
            }
            flags
        }

        match kind {
            TypeKind::Atomic {
                kind,
                variability,
                is_const,
            } => {
                let flags = TypeFlags::IS_ATOMIC;
                if *kind == BasicKind::Void {
                    flags
                } else {
                    flags | own(*variability, *is_const)
                }
            }
            TypeKind::Enum {
                variability,
                is_const,
                ..
            } => TypeFlags::IS_ENUM | own(*variability, *is_const),
            TypeKind::Pointer {
                pointee,
                variability,
                is_const,
                is_slice,
                ..
            } => {
                let mut flags = TypeFlags::IS_POINTER
                    | own(*variability, *is_const)
                    | self.flags(*pointee).propagated();
                if *is_slice {
                    flags |= TypeFlags::HAS_SLICE;
                }
                flags
            }
            // Const-ness of arrays, vectors and references is the element's.
            TypeKind::Array { elem, .. } => {
                let elem = self.flags(*elem);
                TypeFlags::IS_ARRAY | elem.propagated() | (elem & TypeFlags::IS_CONST)
            }
            TypeKind::Vector { elem, .. } => {
                let elem = self.flags(*elem);
                TypeFlags::IS_VECTOR | elem.propagated() | (elem & TypeFlags::IS_CONST)
            }
            TypeKind::Reference { target } => {
                let target = self.flags(*target);
                TypeFlags::IS_REFERENCE | target.propagated() | (target & TypeFlags::IS_CONST)
            }
            TypeKind::Struct {
                variability,
                is_const,
                ..
            } => TypeFlags::IS_STRUCT | own(*variability, *is_const),
            TypeKind::Function(sig) => {
                let mut flags = TypeFlags::IS_FUNCTION | self.flags(sig.ret).propagated();
                for param in sig.params.iter() {
                    flags |= self.flags(param.ty).propagated();
                }
                flags
            }
        }
    }

    /// Structural description of a type.
    ///
    /// # Panics
    /// Panics if `idx` did not come from this pool.
    #[inline]
    pub fn kind(&self, idx: Idx) -> &TypeKind {
        &self.items[idx.raw() as usize]
    }

    #[inline]
    pub fn flags(&self, idx: Idx) -> TypeFlags {
        self.flags[idx.raw() as usize]
    }

    /// Number of interned types, including the pre-interned ones.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false: the pre-interned types are present from creation.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    /// A clone of the shared interner handle.
    pub fn shared_interner(&self) -> SharedInterner {
        self.interner.clone()
    }
}

impl Default for Pool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
