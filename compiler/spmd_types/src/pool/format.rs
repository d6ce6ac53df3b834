//! Source-level type spelling for diagnostics and debugging output.

#![allow(clippy::format_push_string)] // Debug formatting prioritizes clarity over allocation

use smallvec::SmallVec;

use crate::stack::ensure_sufficient_stack;
use crate::{Idx, Pool, TypeKind};

impl Pool {
    /// Format a type the way a programmer would write it.
    ///
    /// ```text
    /// const varying int32
    /// uniform float * varying
    /// uniform int8[4][]
    /// varying struct Point &
    /// ```
    pub fn format_type(&self, idx: Idx) -> String {
        let mut buf = String::new();
        self.format_type_into(idx, &mut buf);
        buf
    }

    /// Format a type into an existing string buffer.
    pub fn format_type_into(&self, idx: Idx, buf: &mut String) {
        ensure_sufficient_stack(|| self.format_kind(idx, buf));
    }

    fn format_kind(&self, idx: Idx, buf: &mut String) {
        match self.kind(idx) {
            TypeKind::Atomic {
                kind,
                variability,
                is_const,
            } => {
                if idx.is_void() {
                    buf.push_str("void");
                    return;
                }
                if *is_const {
                    buf.push_str("const ");
                }
                buf.push_str(&format!("{variability} {}", kind.source_name()));
            }
            TypeKind::Enum {
                name,
                variability,
                is_const,
                ..
            } => {
                if *is_const {
                    buf.push_str("const ");
                }
                buf.push_str(&format!("{variability} enum "));
                self.push_name(*name, buf);
            }
            TypeKind::Pointer {
                pointee,
                variability,
                is_const,
                is_slice,
                is_frozen,
            } => {
                self.format_type_into(*pointee, buf);
                buf.push_str(" * ");
                if *is_const {
                    buf.push_str("const ");
                }
                if *is_slice {
                    buf.push_str("slice ");
                }
                if *is_frozen {
                    buf.push_str("/*frozen*/ ");
                }
                buf.push_str(&variability.to_string());
            }
            TypeKind::Array { .. } => {
                // Dimensions print outermost first after the innermost element.
                let mut dims: SmallVec<[u32; 4]> = SmallVec::new();
                let mut current = idx;
                while let TypeKind::Array { elem, count } = self.kind(current) {
                    dims.push(*count);
                    current = *elem;
                }
                self.format_type_into(current, buf);
                for count in dims {
                    if count == 0 {
                        buf.push_str("[]");
                    } else {
                        buf.push_str(&format!("[{count}]"));
                    }
                }
            }
            TypeKind::Vector { elem, count } => {
                self.format_type_into(*elem, buf);
                buf.push_str(&format!("<{count}>"));
            }
            TypeKind::Struct {
                name,
                variability,
                is_const,
                ..
            } => {
                if *is_const {
                    buf.push_str("const ");
                }
                buf.push_str(&format!("{variability} struct "));
                self.push_name(*name, buf);
            }
            TypeKind::Reference { target } => {
                self.format_type_into(*target, buf);
                buf.push_str(" &");
            }
            TypeKind::Function(sig) => {
                if sig.is_task() {
                    buf.push_str("task ");
                }
                if sig.flags.contains(crate::FunctionFlags::SAFE) {
                    buf.push_str("/*safe*/ ");
                }
                if let Some(cost) = sig.cost_override {
                    buf.push_str(&format!("/*cost={cost}*/ "));
                }
                self.format_type_into(sig.ret, buf);
                buf.push('(');
                for (i, param) in sig.params.iter().enumerate() {
                    if i > 0 {
                        buf.push_str(", ");
                    }
                    self.format_type_into(param.ty, buf);
                }
                buf.push(')');
            }
        }
    }

    fn push_name(&self, name: spmd_ir::Name, buf: &mut String) {
        if name.is_empty() {
            buf.push_str("(anonymous)");
        } else {
            buf.push_str(self.interner().lookup(name));
        }
    }
}
