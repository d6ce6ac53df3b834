//! Sharded string interner for identifiers and file names.
//!
//! Interning is O(1) amortized and safe to call from several threads; each
//! shard has its own lock so unrelated names rarely contend.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::Name;

/// Names that the type layer synthesizes itself. Interning them up front
/// keeps their `Name`s stable across interner instances.
const PRE_INTERNED: &[&str] = &["__ptr_slice_tmp", "ptr", "offset", "__mask"];

/// Error when interning a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternError {
    /// Shard ran out of local indices.
    ShardOverflow { shard_idx: usize, count: usize },
}

impl std::fmt::Display for InternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InternError::ShardOverflow { shard_idx, count } => write!(
                f,
                "interner shard {shard_idx} is full: {count} strings, limit is {}",
                Name::MAX_LOCAL
            ),
        }
    }
}

impl std::error::Error for InternError {}

#[derive(Default)]
struct Shard {
    map: FxHashMap<&'static str, u32>,
    strings: Vec<&'static str>,
}

impl Shard {
    fn get(&self, s: &str) -> Option<u32> {
        self.map.get(s).copied()
    }

    /// Append a string the shard has not seen. Strings are leaked so that
    /// lookups can hand out `'static` slices without holding the lock.
    fn push(&mut self, shard_idx: usize, s: Box<str>) -> Result<u32, InternError> {
        let count = self.strings.len();
        let local = u32::try_from(count)
            .ok()
            .filter(|&local| local <= Name::MAX_LOCAL)
            .ok_or(InternError::ShardOverflow { shard_idx, count })?;
        let leaked: &'static str = Box::leak(s);
        self.strings.push(leaked);
        self.map.insert(leaked, local);
        Ok(local)
    }
}

/// Sharded string interner.
///
/// The empty string is always [`Name::EMPTY`].
pub struct StringInterner {
    shards: [RwLock<Shard>; Name::NUM_SHARDS],
    total: AtomicUsize,
}

impl StringInterner {
    pub fn new() -> Self {
        let interner = StringInterner {
            shards: std::array::from_fn(|_| RwLock::new(Shard::default())),
            total: AtomicUsize::new(0),
        };
        // Shard 0 slot 0 must hold "" so that Name::EMPTY resolves.
        {
            let mut shard0 = interner.shards[0].write();
            let empty: &'static str = "";
            shard0.strings.push(empty);
            shard0.map.insert(empty, 0);
        }
        interner.total.store(1, Ordering::Relaxed);
        for s in PRE_INTERNED {
            interner.intern(s);
        }
        interner
    }

    #[inline]
    fn shard_for(s: &str) -> usize {
        if s.is_empty() {
            return 0;
        }
        let hash = s
            .bytes()
            .take(8)
            .fold(0u32, |h, b| h.wrapping_mul(31).wrapping_add(u32::from(b)));
        hash as usize % Name::NUM_SHARDS
    }

    /// Intern a string, reporting shard exhaustion as an error.
    pub fn try_intern(&self, s: &str) -> Result<Name, InternError> {
        let shard_idx = Self::shard_for(s);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "shard_idx is bounded by NUM_SHARDS (16)"
        )]
        let shard_u32 = shard_idx as u32;
        let shard = &self.shards[shard_idx];

        if let Some(local) = shard.read().get(s) {
            return Ok(Name::new(shard_u32, local));
        }

        let mut guard = shard.write();
        // Another thread may have won the race between the two locks.
        if let Some(local) = guard.get(s) {
            return Ok(Name::new(shard_u32, local));
        }
        let local = guard.push(shard_idx, Box::from(s))?;
        self.total.fetch_add(1, Ordering::Relaxed);
        Ok(Name::new(shard_u32, local))
    }

    /// Intern a string.
    ///
    /// # Panics
    /// Panics if a shard exceeds capacity. Use [`try_intern`](Self::try_intern)
    /// to handle that case.
    #[inline]
    pub fn intern(&self, s: &str) -> Name {
        self.try_intern(s).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Resolve a name to its string.
    pub fn lookup(&self, name: Name) -> &'static str {
        let guard = self.shards[name.shard()].read();
        guard.strings.get(name.local()).copied().unwrap_or("")
    }

    /// Number of distinct strings, including the empty string.
    pub fn len(&self) -> usize {
        self.total.load(Ordering::Relaxed)
    }

    /// True when only the built-in strings are present.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1 + PRE_INTERNED.len()
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// Anything that can turn a [`Name`] back into text.
///
/// Formatting code in higher crates takes `&impl StringLookup` so it does
/// not care whether it was handed a bare interner or a shared one.
pub trait StringLookup {
    fn lookup(&self, name: Name) -> &str;
}

impl StringLookup for StringInterner {
    fn lookup(&self, name: Name) -> &str {
        StringInterner::lookup(self, name)
    }
}

impl StringLookup for SharedInterner {
    fn lookup(&self, name: Name) -> &str {
        self.0.lookup(name)
    }
}

/// Reference-counted interner shared between the type pool and whoever
/// builds declarations into it.
#[derive(Clone)]
pub struct SharedInterner(Arc<StringInterner>);

impl SharedInterner {
    pub fn new() -> Self {
        SharedInterner(Arc::new(StringInterner::new()))
    }
}

impl Default for SharedInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Deref for SharedInterner {
    type Target = StringInterner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
