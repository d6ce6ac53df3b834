#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use pretty_assertions::assert_eq;
use spmd_ir::{Name, SourcePos};

use crate::{
    BasicKind, Enumerator, FunctionFlags, FunctionParam, FunctionSig, Idx, Pool, StructMember,
    TypeError, TypeFlags, TypeKind, Variability,
};

#[test]
fn canonical_atomics_need_no_interning() {
    let mut pool = Pool::new();
    let before = pool.len();
    assert_eq!(
        pool.atomic(BasicKind::Float, Variability::Varying),
        Idx::VARYING_FLOAT
    );
    assert_eq!(pool.atomic(BasicKind::Void, Variability::Varying), Idx::VOID);
    assert_eq!(pool.len(), before);
}

#[test]
fn soa_atomic_is_interned_once() {
    let mut pool = Pool::new();
    let a = pool.atomic(BasicKind::Int16, Variability::Soa(4));
    let b = pool.atomic(BasicKind::Int16, Variability::Soa(4));
    let c = pool.atomic(BasicKind::Int16, Variability::Soa(8));
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn const_void_is_void() {
    let mut pool = Pool::new();
    assert_eq!(pool.const_atomic(BasicKind::Void, Variability::Uniform), Idx::VOID);
    let c = pool.const_atomic(BasicKind::Int32, Variability::Uniform);
    assert!(pool.flags(c).contains(TypeFlags::IS_CONST));
}

#[test]
fn array_of_void_is_rejected() {
    let mut pool = Pool::new();
    assert!(matches!(
        pool.array(Idx::VOID, 4),
        Err(TypeError::Internal(_))
    ));
}

#[test]
fn vector_requires_atomic_element() {
    let mut pool = Pool::new();
    let ok = pool.vector(Idx::UNIFORM_FLOAT, 4);
    assert!(ok.is_ok());
    assert!(pool.vector(Idx::UNIFORM_FLOAT, 0).is_err());
    let ptr = pool.uniform_pointer(Idx::UNIFORM_FLOAT);
    assert!(pool.vector(ptr, 4).is_err());
    assert!(pool.vector(Idx::VOID, 4).is_err());
}

#[test]
fn enum_starts_unbound() {
    let mut pool = Pool::new();
    let name = pool.interner().intern("Color");
    let red = pool.interner().intern("RED");
    let e = pool.enum_type(
        name,
        SourcePos::point(Name::EMPTY, 3, 6),
        vec![Enumerator::new(red, 0)],
    );
    assert_eq!(pool.variability(e), Variability::Unbound);
    assert!(pool.flags(e).contains(TypeFlags::HAS_UNBOUND));
}

#[test]
fn flags_propagate_through_eager_children() {
    let mut pool = Pool::new();
    let unbound = pool.atomic(BasicKind::Int32, Variability::Unbound);
    let arr = pool.array(unbound, 3).unwrap();
    let ptr = pool.uniform_pointer(arr);
    assert!(pool.flags(ptr).contains(TypeFlags::HAS_UNBOUND));

    let name = pool.interner().intern("S");
    let member = pool.interner().intern("x");
    let s = pool.struct_type(
        name,
        vec![StructMember::new(unbound, member, SourcePos::DUMMY)],
        Variability::Uniform,
        SourcePos::DUMMY,
    );
    // members resolve lazily and do not count
    assert!(pool.is_fully_resolved(s));
}

#[test]
fn function_flags_and_params_round_trip() {
    let mut pool = Pool::new();
    let x = pool.interner().intern("x");
    let sig = FunctionSig::new(Idx::VOID, vec![FunctionParam::new(Idx::VARYING_FLOAT).named(x)])
        .with_flags(FunctionFlags::TASK);
    let f = pool.function(sig);
    match pool.kind(f) {
        TypeKind::Function(sig) => {
            assert!(sig.is_task());
            assert_eq!(sig.params[0].name, x);
        }
        other => panic!("expected function, got {other:?}"),
    }
    assert!(pool.flags(f).contains(TypeFlags::HAS_VARYING));
}
