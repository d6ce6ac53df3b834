#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use spmd_ir::{Name, SourcePos};

use crate::{
    BasicKind, FunctionFlags, FunctionParam, FunctionSig, Idx, Pool, StructMember, Variability,
};

#[test]
fn identical_handles_are_equal() {
    let mut pool = Pool::new();
    assert!(pool.equal(Idx::VARYING_FLOAT, Idx::VARYING_FLOAT));
    assert!(!pool.equal(Idx::VARYING_FLOAT, Idx::UNIFORM_FLOAT));
    assert!(!pool.equal(Idx::UNIFORM_INT32, Idx::UNIFORM_UINT32));
}

#[test]
fn const_matters_unless_ignored() {
    let mut pool = Pool::new();
    let c = pool.const_atomic(BasicKind::Int32, Variability::Uniform);
    assert!(!pool.equal(c, Idx::UNIFORM_INT32));
    assert!(pool.equal_ignoring_const(c, Idx::UNIFORM_INT32));

    let p = pool.uniform_pointer(c);
    let q = pool.uniform_pointer(Idx::UNIFORM_INT32);
    assert!(!pool.equal(p, q));
    assert!(pool.equal_ignoring_const(p, q));
}

#[test]
fn struct_members_compare_resolved() {
    let mut pool = Pool::new();
    let interner = pool.shared_interner();
    let name = interner.intern("S");
    let x = interner.intern("x");
    let unbound = pool.atomic(BasicKind::Int32, Variability::Unbound);
    let declared_unbound = pool.struct_type(
        name,
        vec![StructMember::new(unbound, x, SourcePos::DUMMY)],
        Variability::Uniform,
        SourcePos::DUMMY,
    );
    let declared_uniform = pool.struct_type(
        name,
        vec![StructMember::new(Idx::UNIFORM_INT32, x, SourcePos::DUMMY)],
        Variability::Uniform,
        SourcePos::DUMMY,
    );
    assert_ne!(declared_unbound, declared_uniform);
    assert!(pool.equal(declared_unbound, declared_uniform));

    let varying = pool.as_varying(declared_unbound).unwrap();
    assert!(!pool.equal(varying, declared_uniform));
}

#[test]
fn structs_with_different_names_differ() {
    let mut pool = Pool::new();
    let interner = pool.shared_interner();
    let a = pool.struct_type(interner.intern("A"), vec![], Variability::Uniform, SourcePos::DUMMY);
    let b = pool.struct_type(interner.intern("B"), vec![], Variability::Uniform, SourcePos::DUMMY);
    assert!(!pool.equal(a, b));
}

#[test]
fn enums_are_identified_by_declaration() {
    let mut pool = Pool::new();
    let name = pool.interner().intern("E");
    let first = pool.enum_type(name, SourcePos::point(Name::EMPTY, 1, 1), vec![]);
    let second = pool.enum_type(name, SourcePos::point(Name::EMPTY, 9, 1), vec![]);
    assert!(!pool.equal(first, second));
    let first_uniform = pool.as_uniform(first).unwrap();
    assert!(!pool.equal(first, first_uniform));
}

#[test]
fn arrays_compare_counts_and_elements() {
    let mut pool = Pool::new();
    let a4 = pool.array(Idx::UNIFORM_FLOAT, 4).unwrap();
    let a5 = pool.array(Idx::UNIFORM_FLOAT, 5).unwrap();
    let v4 = pool.vector(Idx::UNIFORM_FLOAT, 4).unwrap();
    assert!(!pool.equal(a4, a5));
    assert!(!pool.equal(a4, v4));

    let c = pool.const_atomic(BasicKind::Float, Variability::Uniform);
    let ca4 = pool.array(c, 4).unwrap();
    assert!(!pool.equal(a4, ca4));
    assert!(pool.equal_ignoring_const(a4, ca4));
}

#[test]
fn pointer_slice_flags_matter() {
    let mut pool = Pool::new();
    let p = pool.varying_pointer(Idx::UNIFORM_INT32);
    let s = pool.as_slice(p).unwrap();
    let f = pool.as_frozen_slice(p).unwrap();
    assert!(!pool.equal(p, s));
    assert!(!pool.equal(s, f));
    assert!(!pool.equal_ignoring_const(s, f));
}

#[test]
fn references_compare_targets() {
    let mut pool = Pool::new();
    let a = pool.reference(Idx::UNIFORM_INT8);
    let b = pool.reference(Idx::UNIFORM_UINT8);
    assert!(!pool.equal(a, b));
    assert!(!pool.equal(a, Idx::UNIFORM_INT8));
}

#[test]
fn function_identity_ignores_names_and_safety() {
    let mut pool = Pool::new();
    let x = pool.interner().intern("x");
    let plain = pool.function(FunctionSig::new(
        Idx::VOID,
        vec![FunctionParam::new(Idx::UNIFORM_FLOAT)],
    ));
    let named_safe = pool.function(
        FunctionSig::new(Idx::VOID, vec![FunctionParam::new(Idx::UNIFORM_FLOAT).named(x)])
            .with_flags(FunctionFlags::SAFE),
    );
    let task = pool.function(
        FunctionSig::new(Idx::VOID, vec![FunctionParam::new(Idx::UNIFORM_FLOAT)])
            .with_flags(FunctionFlags::TASK),
    );
    let two_params = pool.function(FunctionSig::new(
        Idx::VOID,
        vec![
            FunctionParam::new(Idx::UNIFORM_FLOAT),
            FunctionParam::new(Idx::UNIFORM_FLOAT),
        ],
    ));
    assert!(pool.equal(plain, named_safe));
    assert!(!pool.equal(plain, task));
    assert!(!pool.equal(plain, two_params));
}

#[test]
fn function_params_compare_ignoring_const() {
    let mut pool = Pool::new();
    let c = pool.const_atomic(BasicKind::Int32, Variability::Uniform);
    let f = pool.function(FunctionSig::new(Idx::VOID, vec![FunctionParam::new(c)]));
    let g = pool.function(FunctionSig::new(
        Idx::VOID,
        vec![FunctionParam::new(Idx::UNIFORM_INT32)],
    ));
    assert!(!pool.equal(f, g));
    assert!(pool.equal_ignoring_const(f, g));
}
