#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use pretty_assertions::assert_eq;
use spmd_ir::{Name, SourcePos};

use crate::layout::{DebugScope, DebugType, Encoding, LayoutEngine, Target};
use crate::{
    BasicKind, Enumerator, FunctionParam, FunctionSig, Idx, Pool, StructMember, TypeError,
    Variability,
};

const SCOPE: DebugScope = DebugScope(Name::EMPTY);

fn describe(pool: &mut Pool, idx: Idx) -> DebugType {
    LayoutEngine::new(pool, &Target::sse4())
        .debug_type(idx, SCOPE)
        .unwrap()
}

fn basic(name: &'static str, bits: u64, encoding: Encoding) -> DebugType {
    DebugType::Basic {
        name,
        size_bits: bits,
        align_bits: bits,
        encoding,
    }
}

#[test]
fn uniform_atomics() {
    let mut pool = Pool::new();
    assert_eq!(
        describe(&mut pool, Idx::UNIFORM_INT32),
        basic("int32", 32, Encoding::Signed)
    );
    assert_eq!(
        describe(&mut pool, Idx::UNIFORM_UINT16),
        basic("uint16", 16, Encoding::Unsigned)
    );
    assert_eq!(
        describe(&mut pool, Idx::UNIFORM_DOUBLE),
        basic("double", 64, Encoding::Float)
    );
    assert_eq!(
        describe(&mut pool, Idx::UNIFORM_BOOL),
        basic("bool", 32, Encoding::Boolean)
    );
    assert_eq!(describe(&mut pool, Idx::VOID), DebugType::Void);
}

#[test]
fn varying_atomics_are_lane_vectors() {
    let mut pool = Pool::new();
    let ty = describe(&mut pool, Idx::VARYING_FLOAT);
    assert_eq!(
        ty,
        DebugType::Vector {
            elem: Box::new(basic("float", 32, Encoding::Float)),
            count: 4,
            size_bits: 128,
            align_bits: 128,
        }
    );
}

#[test]
fn soa_atomics_are_arrays() {
    let mut pool = Pool::new();
    let soa = pool.atomic(BasicKind::Double, Variability::Soa(4));
    let ty = describe(&mut pool, soa);
    assert!(matches!(ty, DebugType::Array { count: 4, .. }));
    assert_eq!(ty.size_bits(), 256);
    assert_eq!(ty.align_bits(), 64);
}

#[test]
fn pointers_align_to_pointer_size() {
    let mut pool = Pool::new();
    let up = pool.uniform_pointer(Idx::UNIFORM_INT8);
    let ty = describe(&mut pool, up);
    assert!(matches!(ty, DebugType::Pointer { size_bits: 64, .. }));
    assert_eq!(ty.align_bits(), 64);

    let vp = pool.varying_pointer(Idx::UNIFORM_INT8);
    let ty = describe(&mut pool, vp);
    assert!(matches!(ty, DebugType::Array { count: 4, .. }));
    assert_eq!(ty.size_bits(), 256);

    let small = Target::sse4().with_32bit_pointers();
    let ty = LayoutEngine::new(&mut pool, &small)
        .debug_type(up, SCOPE)
        .unwrap();
    assert_eq!(ty.size_bits(), 32);
}

#[test]
fn slice_pointers_describe_their_aggregate() {
    let mut pool = Pool::new();
    let up = pool.uniform_pointer(Idx::UNIFORM_FLOAT);
    let slice = pool.as_slice(up).unwrap();
    let ty = describe(&mut pool, slice);
    let DebugType::Struct { members, size_bits, .. } = ty else {
        panic!("expected a struct descriptor");
    };
    assert_eq!(members.len(), 2);
    assert_eq!(members[1].offset_bits, 64);
    assert_eq!(size_bits, 128);
}

#[test]
fn struct_members_are_padded_to_their_alignment() {
    let mut pool = Pool::new();
    let interner = pool.shared_interner();
    let file = interner.intern("layout.ispc");
    let member = |ty, name: &str, line| {
        StructMember::new(ty, interner.intern(name), SourcePos::point(file, line, 5))
    };
    let s = pool.struct_type(
        interner.intern("Padded"),
        vec![
            member(Idx::UNIFORM_INT8, "a", 2),
            member(Idx::UNIFORM_INT32, "b", 3),
            member(Idx::UNIFORM_INT8, "c", 4),
        ],
        Variability::Uniform,
        SourcePos::point(file, 1, 1),
    );

    let ty = describe(&mut pool, s);
    let DebugType::Struct {
        members,
        size_bits,
        align_bits,
        file: struct_file,
        line,
        ..
    } = ty
    else {
        panic!("expected a struct descriptor");
    };
    let offsets: Vec<u64> = members.iter().map(|m| m.offset_bits).collect();
    assert_eq!(offsets, vec![0, 32, 64]);
    assert_eq!(size_bits, 96);
    assert_eq!(align_bits, 32);
    assert_eq!(struct_file, file);
    assert_eq!(line, 1);
    assert_eq!(members[1].line, 3);
    assert_eq!(members[1].name, interner.intern("b"));
}

#[test]
fn varying_struct_members_are_lane_vectors() {
    let mut pool = Pool::new();
    let unbound = pool.atomic(BasicKind::Int32, Variability::Unbound);
    let interner = pool.shared_interner();
    let s = pool.struct_type(
        interner.intern("V"),
        vec![StructMember::new(unbound, interner.intern("x"), SourcePos::DUMMY)],
        Variability::Varying,
        SourcePos::DUMMY,
    );
    let ty = describe(&mut pool, s);
    assert_eq!(ty.size_bits(), 128);
    assert_eq!(ty.align_bits(), 128);
}

#[test]
fn short_vectors() {
    let mut pool = Pool::new();
    let f3 = pool.vector(Idx::UNIFORM_FLOAT, 3).unwrap();
    let ty = describe(&mut pool, f3);
    assert_eq!(ty.size_bits(), 96);
    assert_eq!(ty.align_bits(), 128);

    let vf3 = pool.vector(Idx::VARYING_FLOAT, 3).unwrap();
    let ty = describe(&mut pool, vf3);
    assert!(matches!(ty, DebugType::Vector { count: 3, .. }));
    assert_eq!(ty.size_bits(), 384);
}

#[test]
fn arrays_multiply_element_size() {
    let mut pool = Pool::new();
    let inner = pool.array(Idx::UNIFORM_INT16, 3).unwrap();
    let outer = pool.array(inner, 2).unwrap();
    let ty = describe(&mut pool, outer);
    assert_eq!(ty.size_bits(), 96);
    assert_eq!(ty.align_bits(), 16);
}

#[test]
fn oversized_arrays_fail_to_describe() {
    let mut pool = Pool::new();
    let inner = pool.array(Idx::UNIFORM_DOUBLE, u32::MAX).unwrap();
    assert_eq!(
        describe(&mut pool, inner).size_bits(),
        64 * u64::from(u32::MAX)
    );

    let outer = pool.array(inner, u32::MAX).unwrap();
    let target = Target::sse4();
    let mut engine = LayoutEngine::new(&mut pool, &target);
    assert_eq!(
        engine.debug_type(outer, SCOPE),
        Err(TypeError::TooLarge { ty: outer })
    );
}

#[test]
fn struct_size_overflow_fails_to_describe() {
    let mut pool = Pool::new();
    let interner = pool.shared_interner();
    let double = pool.atomic(BasicKind::Double, Variability::Unbound);
    let row = pool.array(double, u32::MAX).unwrap();
    // Each member alone fits in u64; their sum does not.
    let block = pool.array(row, 1 << 26).unwrap();
    let s = pool.struct_type(
        interner.intern("Huge"),
        vec![
            StructMember::new(block, interner.intern("a"), SourcePos::DUMMY),
            StructMember::new(block, interner.intern("b"), SourcePos::DUMMY),
        ],
        Variability::Uniform,
        SourcePos::DUMMY,
    );
    let target = Target::sse4();
    let mut engine = LayoutEngine::new(&mut pool, &target);
    assert_eq!(
        engine.debug_type(s, SCOPE),
        Err(TypeError::TooLarge { ty: s })
    );
}

#[test]
fn enums() {
    let mut pool = Pool::new();
    let interner = pool.shared_interner();
    let red = Enumerator::new(interner.intern("RED"), 0);
    let e = pool.enum_type(
        interner.intern("Color"),
        SourcePos::point(Name::EMPTY, 8, 1),
        vec![red],
    );
    let ue = pool.as_uniform(e).unwrap();
    let ty = describe(&mut pool, ue);
    match &ty {
        DebugType::Enumeration {
            line, enumerators, ..
        } => {
            assert_eq!(*line, 8);
            assert_eq!(enumerators, &vec![red]);
        }
        other => panic!("expected enumeration, got {other:?}"),
    }
    assert_eq!(ty.size_bits(), 32);

    let ve = pool.as_varying(e).unwrap();
    assert_eq!(describe(&mut pool, ve).size_bits(), 128);
}

#[test]
fn references_and_functions() {
    let mut pool = Pool::new();
    let r = pool.reference(Idx::UNIFORM_FLOAT);
    assert!(matches!(
        describe(&mut pool, r),
        DebugType::Reference { size_bits: 64, .. }
    ));

    let f = pool.function(FunctionSig::new(
        Idx::UNIFORM_INT32,
        vec![FunctionParam::new(Idx::VARYING_FLOAT)],
    ));
    let DebugType::Subroutine { ret, params } = describe(&mut pool, f) else {
        panic!("expected subroutine");
    };
    assert_eq!(*ret, basic("int32", 32, Encoding::Signed));
    assert_eq!(params.len(), 1);
}

#[test]
fn unbound_types_have_no_descriptor() {
    let mut pool = Pool::new();
    let unbound = pool.atomic(BasicKind::Int8, Variability::Unbound);
    let target = Target::sse4();
    let mut engine = LayoutEngine::new(&mut pool, &target);
    assert!(engine.debug_type(unbound, SCOPE).unwrap_err().is_internal());
}
