//! SOA feasibility.
//!
//! A struct can be laid out as struct-of-arrays only if every member can
//! be split lane-wise. Nested structs are checked recursively; any other
//! member must still have unbound variability and must not be a
//! reference. The whole struct is scanned so that one pass reports every
//! offending member.

use crate::{Idx, Pool, SoaViolation, SoaViolationKind, TypeError, TypeKind};

impl Pool {
    /// Check that struct `idx` can be converted to SOA layout.
    #[tracing::instrument(level = "debug", skip_all, fields(ty = ?idx))]
    pub fn check_soa(&self, idx: Idx) -> Result<(), TypeError> {
        let mut violations = Vec::new();
        self.collect_soa_violations(idx, &mut violations);
        if violations.is_empty() {
            Ok(())
        } else {
            tracing::debug!(count = violations.len(), "struct cannot be converted to SOA");
            Err(TypeError::SoaConversion { violations })
        }
    }

    fn collect_soa_violations(&self, idx: Idx, out: &mut Vec<SoaViolation>) {
        crate::stack::ensure_sufficient_stack(|| {
            for member in self.struct_members(idx) {
                let kind = match self.kind(member.ty) {
                    TypeKind::Struct { .. } => {
                        self.collect_soa_violations(member.ty, out);
                        continue;
                    }
                    _ if !self.has_unbound_variability(member.ty) => {
                        SoaViolationKind::BoundVariability(self.variability(member.ty))
                    }
                    TypeKind::Reference { .. } => SoaViolationKind::Reference,
                    _ => continue,
                };
                out.push(SoaViolation {
                    pos: member.pos,
                    member: member.name,
                    ty: member.ty,
                    kind,
                });
            }
        });
    }
}
