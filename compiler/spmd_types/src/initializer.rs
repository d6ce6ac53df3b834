//! Sizing unsized array dimensions from a brace initializer.
//!
//! `int32 x[][] = { {1, 2}, {3, 4}, {5, 6} }` declares `int32[3][2]`: each
//! unsized dimension takes the length of the initializer list at its
//! nesting level, as in C.

use spmd_ir::SourcePos;

use crate::stack::ensure_sufficient_stack;
use crate::{Idx, Pool, TypeError, TypeKind};

/// Shape of an initializer expression, as far as array sizing cares.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InitShape {
    /// A single (non-list) expression.
    Expr { pos: SourcePos },
    /// A brace-enclosed list.
    List { elems: Vec<InitShape>, pos: SourcePos },
    /// An element that failed to parse; already reported, skipped here.
    Missing,
}

impl InitShape {
    pub fn expr(pos: SourcePos) -> Self {
        InitShape::Expr { pos }
    }

    pub fn list(elems: Vec<InitShape>, pos: SourcePos) -> Self {
        InitShape::List { elems, pos }
    }

    pub fn pos(&self) -> SourcePos {
        match self {
            InitShape::Expr { pos } | InitShape::List { pos, .. } => *pos,
            InitShape::Missing => SourcePos::DUMMY,
        }
    }

    /// Elements of a list; `None` for anything else.
    pub fn elems(&self) -> Option<&[InitShape]> {
        match self {
            InitShape::List { elems, .. } => Some(elems),
            _ => None,
        }
    }
}

impl Pool {
    /// Size every unsized dimension of array type `idx` that `init`
    /// determines. Non-array types and non-list initializers leave the type
    /// unchanged.
    ///
    /// When the next dimension is unsized too, every sibling sublist must
    /// have the same length; otherwise the sizing fails with
    /// [`TypeError::InconsistentInitializer`] spanning the first sublist and
    /// the offending one.
    #[tracing::instrument(level = "debug", skip_all, fields(ty = ?idx))]
    pub fn size_unsized_arrays(&mut self, idx: Idx, init: &InitShape) -> Result<Idx, TypeError> {
        ensure_sufficient_stack(|| self.size_dimension(idx, init))
    }

    fn size_dimension(&mut self, idx: Idx, init: &InitShape) -> Result<Idx, TypeError> {
        let TypeKind::Array { elem, count } = *self.kind(idx) else {
            return Ok(idx);
        };
        let Some(elems) = init.elems() else {
            return Ok(idx);
        };
        let Some(first) = elems.first() else {
            return Ok(idx);
        };

        let count = if count == 0 {
            u32::try_from(elems.len()).map_err(|_| {
                TypeError::internal(
                    "size_unsized_arrays",
                    idx,
                    "initializer list longer than u32::MAX elements",
                )
            })?
        } else {
            count
        };

        // Without a nested list there is nothing more to size.
        let Some(next) = first.elems() else {
            return Ok(self.intern(TypeKind::Array { elem, count }));
        };

        if matches!(self.kind(elem), TypeKind::Array { count: 0, .. }) {
            for sibling in &elems[1..] {
                match sibling {
                    InitShape::Missing => {}
                    InitShape::List { elems, .. } if elems.len() == next.len() => {}
                    _ => {
                        return Err(TypeError::InconsistentInitializer {
                            pos: first.pos().union(sibling.pos()),
                        });
                    }
                }
            }
        }

        let elem = ensure_sufficient_stack(|| self.size_dimension(elem, first))?;
        Ok(self.intern(TypeKind::Array { elem, count }))
    }
}
