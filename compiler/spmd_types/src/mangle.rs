//! Name mangling.
//!
//! The mangled form of a fully resolved type is an ASCII key used to tell
//! overloads apart at link time. It is injective on resolved types except
//! for functions, whose key covers only the parameter list:
//!
//! ```text
//! const varying int32           Cvyi
//! uniform float * varying       vy<unf>
//! uniform int8[4][]             unt[][4]      (outermost dimension last)
//! varying struct P { int32 x }  s[vyP]<vyi>
//! void(uniform int32, uniform double &)  ___uniREFund
//! ```

#![allow(clippy::format_push_string)]

use crate::stack::ensure_sufficient_stack;
use crate::{Idx, Pool, TypeError, TypeKind, Variability};

impl Pool {
    /// Mangled name of `idx`. Unbound variability anywhere in the type is a
    /// contract violation.
    pub fn mangle(&mut self, idx: Idx) -> Result<String, TypeError> {
        let mut buf = String::new();
        self.mangle_into(idx, &mut buf)?;
        Ok(buf)
    }

    fn mangle_into(&mut self, idx: Idx, buf: &mut String) -> Result<(), TypeError> {
        ensure_sufficient_stack(|| match *self.kind(idx) {
            TypeKind::Atomic {
                kind,
                variability,
                is_const,
            } => {
                if is_const {
                    buf.push('C');
                }
                push_variability(idx, variability, buf)?;
                buf.push(kind.mangle_code());
                Ok(())
            }
            TypeKind::Enum {
                name,
                pos,
                variability,
                is_const,
                ..
            } => {
                if is_const {
                    buf.push('C');
                }
                push_variability(idx, variability, buf)?;
                let (line, column) = pos.start();
                buf.push_str(&format!(
                    "enum[{}_{line}_{column}]",
                    self.interner().lookup(name)
                ));
                Ok(())
            }
            TypeKind::Pointer {
                pointee,
                variability,
                is_const,
                is_slice,
                is_frozen,
            } => {
                if is_const {
                    buf.push('C');
                }
                push_variability(idx, variability, buf)?;
                buf.push('<');
                if is_slice || is_frozen {
                    buf.push('-');
                    if is_slice {
                        buf.push('s');
                    }
                    if is_frozen {
                        buf.push('f');
                    }
                    buf.push('-');
                }
                self.mangle_into(pointee, buf)?;
                buf.push('>');
                Ok(())
            }
            TypeKind::Array { elem, count } => {
                self.mangle_into(elem, buf)?;
                if count == 0 {
                    buf.push_str("[]");
                } else {
                    buf.push_str(&format!("[{count}]"));
                }
                Ok(())
            }
            TypeKind::Vector { elem, count } => {
                self.mangle_into(elem, buf)?;
                buf.push_str(&format!("<{count}>"));
                Ok(())
            }
            TypeKind::Struct {
                name,
                variability,
                is_const,
                ..
            } => {
                buf.push_str("s[");
                if is_const {
                    buf.push_str("_c_");
                }
                push_variability(idx, variability, buf)?;
                buf.push_str(self.interner().lookup(name));
                buf.push_str("]<");
                for member in self.struct_member_types(idx)? {
                    self.mangle_into(member, buf)?;
                }
                buf.push('>');
                Ok(())
            }
            TypeKind::Reference { target } => {
                buf.push_str("REF");
                self.mangle_into(target, buf)
            }
            TypeKind::Function(_) => {
                buf.push_str("___");
                let params: Vec<Idx> = self
                    .function_sig(idx)
                    .map(|sig| sig.params.iter().map(|p| p.ty).collect())
                    .unwrap_or_default();
                for param in params {
                    self.mangle_into(param, buf)?;
                }
                Ok(())
            }
        })
    }
}

fn push_variability(idx: Idx, variability: Variability, buf: &mut String) -> Result<(), TypeError> {
    match variability.mangle() {
        Some(token) => {
            buf.push_str(&token);
            Ok(())
        }
        None => Err(TypeError::internal(
            "mangle",
            idx,
            "unbound variability has no mangled form",
        )),
    }
}
