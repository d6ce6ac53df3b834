use pretty_assertions::assert_eq;

use crate::{BasicKind, Idx, Pool, TypeFlags, TypeKind, Variability};

#[test]
fn primitives_sit_at_their_fixed_slots() {
    let pool = Pool::new();
    assert_eq!(pool.len(), Idx::PRIMITIVE_COUNT as usize);
    assert!(!pool.is_empty());

    for kind in BasicKind::NON_VOID {
        for variability in [Variability::Uniform, Variability::Varying] {
            let Some(idx) = Idx::canonical_atomic(kind, variability) else {
                panic!("{kind:?} {variability:?} has no fixed slot");
            };
            assert_eq!(
                pool.kind(idx),
                &TypeKind::Atomic {
                    kind,
                    variability,
                    is_const: false,
                }
            );
        }
    }
    assert!(matches!(
        pool.kind(Idx::UNIFORM_VOID_POINTER),
        TypeKind::Pointer { pointee, variability: Variability::Uniform, .. } if pointee.is_void()
    ));
}

#[test]
fn identical_constructions_share_a_handle() {
    let mut pool = Pool::new();
    let a = pool.varying_pointer(Idx::UNIFORM_INT8);
    let before = pool.len();
    let b = pool.varying_pointer(Idx::UNIFORM_INT8);
    assert_eq!(a, b);
    assert_eq!(pool.len(), before);
}

#[test]
fn void_carries_no_variability_flags() {
    let pool = Pool::new();
    let flags = pool.flags(Idx::VOID);
    assert!(flags.contains(TypeFlags::IS_ATOMIC));
    assert!(!flags.intersects(TypeFlags::PROPAGATE_MASK | TypeFlags::IS_CONST));
}

#[test]
fn varying_element_marks_containers() {
    let mut pool = Pool::new();
    let ptr = pool.uniform_pointer(Idx::VARYING_FLOAT);
    assert!(pool.flags(ptr).contains(TypeFlags::HAS_VARYING));
    let reference = pool.reference(ptr);
    assert!(pool.flags(reference).contains(TypeFlags::HAS_VARYING));
    assert!(pool.flags(reference).contains(TypeFlags::IS_REFERENCE));
    assert!(!pool.flags(Idx::UNIFORM_FLOAT).contains(TypeFlags::HAS_VARYING));
}

#[test]
fn shared_interner_resolves_pool_names() {
    let pool = Pool::new();
    let name = pool.interner().intern("Point");
    let shared = pool.shared_interner();
    assert_eq!(shared.lookup(name), "Point");
}
