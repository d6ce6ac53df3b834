//! C declarations for generated headers.
//!
//! Only types that have a C layout can be declared: uniform and SOA
//! values, non-slice pointers, and aggregates of them. Asking for the C
//! form of a varying value is a contract violation.

use crate::stack::ensure_sufficient_stack;
use crate::{Idx, Pool, TypeError, TypeKind, Variability};

/// Names starting with `__` are compiler-internal and never printed.
fn should_print_name(name: &str) -> bool {
    !name.is_empty() && !name.starts_with("__")
}

fn push_name(decl: &mut String, name: &str) {
    if should_print_name(name) {
        decl.push(' ');
        decl.push_str(name);
    }
}

fn push_soa_suffix(decl: &mut String, variability: Variability) {
    if let Variability::Soa(width) = variability {
        decl.push_str(&format!("[{width}]"));
    }
}

impl Pool {
    /// C declaration of a variable called `name` with type `idx`.
    ///
    /// `name` may be empty to get an abstract declarator.
    pub fn c_declaration(&mut self, idx: Idx, name: &str) -> Result<String, TypeError> {
        ensure_sufficient_stack(|| self.c_declaration_inner(idx, name))
    }

    fn c_declaration_inner(&mut self, idx: Idx, name: &str) -> Result<String, TypeError> {
        match *self.kind(idx) {
            TypeKind::Atomic {
                kind,
                variability,
                is_const,
            } => {
                require_c_variability(idx, variability)?;
                let mut decl = String::new();
                if is_const {
                    decl.push_str("const ");
                }
                decl.push_str(kind.c_name());
                push_name(&mut decl, name);
                push_soa_suffix(&mut decl, variability);
                Ok(decl)
            }
            TypeKind::Enum {
                name: enum_name,
                variability,
                is_const,
                ..
            } => {
                require_c_variability(idx, variability)?;
                let mut decl = String::new();
                if is_const {
                    decl.push_str("const ");
                }
                decl.push_str("enum");
                if !enum_name.is_empty() {
                    decl.push(' ');
                    decl.push_str(self.interner().lookup(enum_name));
                }
                push_name(&mut decl, name);
                push_soa_suffix(&mut decl, variability);
                Ok(decl)
            }
            TypeKind::Pointer {
                pointee,
                variability,
                is_const,
                is_slice,
                ..
            } => {
                if is_slice {
                    return Err(TypeError::internal(
                        "c_declaration",
                        idx,
                        "slice pointers have no C declaration",
                    ));
                }
                require_c_variability(idx, variability)?;
                let mut decl = self.c_declaration(pointee, "")?;
                decl.push_str(" *");
                if is_const {
                    decl.push_str(" const");
                }
                push_name(&mut decl, name);
                push_soa_suffix(&mut decl, variability);
                Ok(decl)
            }
            TypeKind::Array { .. } => {
                let base = self.base_type(idx)?;
                let soa_width = self.soa_width(base);
                let base = self.as_uniform(base)?;
                let mut decl = self.c_declaration(base, name)?;
                let mut current = idx;
                while let TypeKind::Array { elem, count } = *self.kind(current) {
                    if count == 0 {
                        decl.push_str("[]");
                    } else {
                        decl.push_str(&format!("[{count}]"));
                    }
                    current = elem;
                }
                if soa_width > 0 {
                    decl.push_str(&format!("[{soa_width}]"));
                }
                Ok(decl)
            }
            // `float4  v`: the element's C name with the length appended.
            TypeKind::Vector { elem, count } => {
                let mut decl = self.c_declaration(elem, "")?;
                decl.push_str(&format!("{count}  {name}"));
                Ok(decl)
            }
            TypeKind::Struct {
                name: struct_name,
                variability,
                is_const,
                ..
            } => {
                if variability.is_varying() {
                    return Err(TypeError::internal(
                        "c_declaration",
                        idx,
                        "varying structs have no C declaration",
                    ));
                }
                let mut decl = String::new();
                if is_const {
                    decl.push_str("const ");
                }
                decl.push_str("struct ");
                decl.push_str(self.interner().lookup(struct_name));
                // Must match the name under which SOA struct layouts are emitted.
                if let Variability::Soa(width) = variability {
                    decl.push_str(&format!("_SOA{width}"));
                }
                push_name(&mut decl, name);
                Ok(decl)
            }
            TypeKind::Reference { target } => match *self.kind(target) {
                // Unsized arrays by reference become element pointers.
                TypeKind::Array { elem, count: 0 } => {
                    let elem = self.as_non_const(elem)?;
                    let mut decl = self.c_declaration(elem, "")?;
                    decl.push_str(" *");
                    if should_print_name(name) {
                        decl.push_str(name);
                    }
                    Ok(decl)
                }
                // C passes arrays by reference already.
                TypeKind::Array { .. } => self.c_declaration(target, name),
                _ => {
                    let mut decl = self.c_declaration(target, "")?;
                    decl.push_str(" *");
                    if should_print_name(name) {
                        decl.push_str(name);
                    }
                    Ok(decl)
                }
            },
            TypeKind::Function(_) => self.function_c_declaration(idx, name),
        }
    }

    /// `ret name(params)`. Pointer-to-array parameters print as unsized
    /// arrays (`float foo[][4]`); unnamed parameters print their source
    /// spelling.
    fn function_c_declaration(&mut self, idx: Idx, name: &str) -> Result<String, TypeError> {
        let Some(sig) = self.function_sig(idx).cloned() else {
            return Err(TypeError::internal(
                "c_declaration",
                idx,
                "not a function type",
            ));
        };
        let mut decl = self.c_declaration(sig.ret, "")?;
        decl.push(' ');
        decl.push_str(name);
        decl.push('(');
        for (i, param) in sig.params.iter().enumerate() {
            if i > 0 {
                decl.push_str(", ");
            }
            let mut ty = param.ty;
            if let TypeKind::Pointer { pointee, .. } = *self.kind(ty) {
                if matches!(self.kind(pointee), TypeKind::Array { .. }) {
                    ty = self.array(pointee, 0)?;
                }
            }
            if param.name.is_empty() {
                decl.push_str(&self.format_type(ty));
            } else {
                let param_name = self.interner().lookup(param.name);
                decl.push_str(&self.c_declaration(ty, param_name)?);
            }
        }
        decl.push(')');
        Ok(decl)
    }
}

fn require_c_variability(idx: Idx, variability: Variability) -> Result<(), TypeError> {
    match variability {
        Variability::Uniform | Variability::Soa(_) => Ok(()),
        Variability::Varying | Variability::Unbound => Err(TypeError::internal(
            "c_declaration",
            idx,
            "only uniform and SOA types have a C declaration",
        )),
    }
}
