use pretty_assertions::assert_eq;
use spmd_diagnostic::{DiagnosticQueue, ErrorCode};
use spmd_ir::{Name, SourcePos};

use crate::{
    BasicKind, ContractViolation, Idx, Pool, SoaViolation, SoaViolationKind, TypeError,
    Variability,
};

fn pos(line: u32, column: u32) -> SourcePos {
    SourcePos::point(Name::EMPTY, line, column)
}

#[test]
fn codes_by_variant() {
    let no_conversion = TypeError::NoConversion {
        pos: pos(1, 1),
        reason: "binary +".to_owned(),
        from: Idx::UNIFORM_INT32,
        to: Idx::UNIFORM_VOID_POINTER,
    };
    assert_eq!(no_conversion.code(), ErrorCode::E2001);
    assert_eq!(
        TypeError::InconsistentInitializer { pos: pos(1, 1) }.code(),
        ErrorCode::E2007
    );
    let internal = TypeError::internal("mangle", Idx::VOID, "test");
    assert_eq!(internal.code(), ErrorCode::E9001);
    assert!(internal.is_internal());
    assert!(!no_conversion.is_internal());
}

#[test]
fn conversion_message_names_both_types() {
    let pool = Pool::new();
    let err = TypeError::NoConversion {
        pos: pos(4, 2),
        reason: "assignment".to_owned(),
        from: Idx::VARYING_FLOAT,
        to: Idx::UNIFORM_VOID_POINTER,
    };
    let diags = err.to_diagnostics(&pool);
    assert_eq!(diags.len(), 1);
    assert_eq!(
        diags[0].message,
        "implicit conversion between types \"varying float\" and \"void * uniform\" for assignment not possible"
    );
    assert_eq!(diags[0].primary_pos(), Some(pos(4, 2)));
}

#[test]
fn oversized_type_reports_without_position() {
    let pool = Pool::new();
    let err = TypeError::TooLarge {
        ty: Idx::UNIFORM_DOUBLE,
    };
    assert_eq!(err.code(), ErrorCode::E2009);
    assert!(!err.is_internal());
    let diags = err.to_diagnostics(&pool);
    assert_eq!(diags.len(), 1);
    assert_eq!(
        diags[0].message,
        "type \"uniform double\" is too large to lay out"
    );
    assert_eq!(diags[0].primary_pos(), None);
}

#[test]
fn soa_failure_yields_one_diagnostic_per_member() {
    let pool = Pool::new();
    let a = pool.interner().intern("a");
    let b = pool.interner().intern("b");
    let err = TypeError::SoaConversion {
        violations: vec![
            SoaViolation {
                pos: pos(2, 3),
                member: a,
                ty: Idx::UNIFORM_INT32,
                kind: SoaViolationKind::BoundVariability(Variability::Uniform),
            },
            SoaViolation {
                pos: pos(3, 3),
                member: b,
                ty: Idx::VARYING_FLOAT,
                kind: SoaViolationKind::Reference,
            },
        ],
    };
    let diags = err.to_diagnostics(&pool);
    assert_eq!(diags.len(), 2);
    assert!(diags.iter().all(|d| d.code == ErrorCode::E2008));
    assert_eq!(
        diags[0].message,
        "unable to convert member \"a\" of type \"uniform int32\" to SOA layout"
    );
    assert_eq!(diags[1].primary_pos(), Some(pos(3, 3)));
}

#[test]
fn report_emits_user_errors() {
    let pool = Pool::new();
    let mut queue = DiagnosticQueue::new();
    let err = TypeError::IncompatiblePointers {
        pos: pos(1, 1),
        left: Idx::UNIFORM_VOID_POINTER,
        right: Idx::UNIFORM_VOID_POINTER,
    };
    let _guarantee = err.report(&pool, &mut queue);
    assert_eq!(queue.error_count(), 1);
    let diags = queue.flush();
    assert_eq!(diags[0].code, ErrorCode::E2005);
    assert_eq!(diags[0].notes.len(), 1);
}

#[test]
fn internal_error_after_user_error_is_suppressed() {
    let pool = Pool::new();
    let mut queue = DiagnosticQueue::new();
    let _ = TypeError::InconsistentInitializer { pos: pos(1, 1) }.report(&pool, &mut queue);
    let _ = TypeError::internal("c_declaration", Idx::VARYING_INT32, "varying")
        .report(&pool, &mut queue);
    assert_eq!(queue.error_count(), 1);
}

#[test]
fn internal_error_after_flushed_user_error_is_suppressed() {
    let mut pool = Pool::new();
    let mut queue = DiagnosticQueue::new();
    let user = TypeError::NoConversion {
        pos: pos(3, 1),
        reason: "assignment".to_owned(),
        from: Idx::UNIFORM_FLOAT,
        to: Idx::UNIFORM_VOID_POINTER,
    };
    let _ = user.report(&pool, &mut queue);
    assert_eq!(queue.flush().len(), 1);

    let unbound = pool.atomic(BasicKind::Int32, Variability::Unbound);
    let Err(err) = pool.mangle(unbound) else {
        panic!("unbound types have no mangled name");
    };
    assert!(err.is_internal());
    let _ = err.report(&pool, &mut queue);
    assert_eq!(queue.flush().len(), 0);
}

#[test]
#[should_panic(expected = "internal compiler error")]
fn internal_error_without_prior_errors_panics() {
    let pool = Pool::new();
    let mut queue = DiagnosticQueue::new();
    let _ = TypeError::internal("mangle", Idx::VOID, "unbound").report(&pool, &mut queue);
}

#[test]
fn display_of_contract_violation() {
    let violation = ContractViolation {
        op: "as_soa",
        ty: Idx::UNIFORM_FLOAT,
        message: "SOA width must be positive",
    };
    assert_eq!(
        violation.to_string(),
        "as_soa: SOA width must be positive (Idx(15))"
    );
    assert_eq!(
        TypeError::Internal(violation).to_string(),
        "internal compiler error: as_soa: SOA width must be positive (Idx(15))"
    );
}
