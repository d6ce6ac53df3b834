use super::*;

#[test]
fn soa_equality_includes_width() {
    assert_eq!(Variability::Soa(4), Variability::Soa(4));
    assert_ne!(Variability::Soa(4), Variability::Soa(8));
    assert_ne!(Variability::Soa(4), Variability::Varying);
}

#[test]
fn display_forms() {
    assert_eq!(Variability::Uniform.to_string(), "uniform");
    assert_eq!(Variability::Varying.to_string(), "varying");
    assert_eq!(Variability::Soa(8).to_string(), "soa<8>");
    assert_eq!(Variability::Unbound.to_string(), "/*unbound*/");
}

#[test]
fn mangle_forms() {
    assert_eq!(Variability::Uniform.mangle().as_deref(), Some("un"));
    assert_eq!(Variability::Varying.mangle().as_deref(), Some("vy"));
    assert_eq!(Variability::Soa(16).mangle().as_deref(), Some("soa<16>"));
    assert_eq!(Variability::Unbound.mangle(), None);
}

#[test]
fn predicates() {
    assert!(Variability::Soa(2).is_soa());
    assert_eq!(Variability::Soa(2).soa_width(), 2);
    assert_eq!(Variability::Varying.soa_width(), 0);
    assert!(Variability::Unbound.is_unbound());
    assert!(Variability::Uniform.is_bound());
}
