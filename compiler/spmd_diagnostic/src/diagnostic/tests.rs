use pretty_assertions::assert_eq;
use spmd_ir::Name;

use super::*;

fn pos(line: u32, col: u32) -> SourcePos {
    SourcePos::point(Name::EMPTY, line, col)
}

#[test]
fn builder_collects_labels_and_notes() {
    let diag = Diagnostic::error(ErrorCode::E2008)
        .with_message("illegal SOA conversion")
        .with_label(pos(4, 2), "member is uniform")
        .with_secondary_label(pos(1, 1), "struct declared here")
        .with_note("only unbound members can be split");

    assert!(diag.is_error());
    assert_eq!(diag.labels.len(), 2);
    assert_eq!(diag.primary_pos(), Some(pos(4, 2)));
    assert_eq!(diag.notes, vec!["only unbound members can be split".to_string()]);
}

#[test]
fn primary_pos_skips_secondary_labels() {
    let diag = Diagnostic::warning(ErrorCode::E2001)
        .with_secondary_label(pos(1, 1), "context")
        .with_label(pos(2, 3), "here");
    assert!(!diag.is_error());
    assert_eq!(diag.primary_pos(), Some(pos(2, 3)));
}

#[test]
fn display_includes_position_and_code() {
    let diag = Diagnostic::error(ErrorCode::E2007)
        .with_message("inconsistent lengths")
        .with_label(pos(12, 4), "here")
        .with_note("all sublists must match");
    assert_eq!(
        diag.to_string(),
        "12:4: error[E2007]: inconsistent lengths\n  = note: all sublists must match"
    );
}

#[test]
fn display_without_label() {
    let diag = Diagnostic::error(ErrorCode::E9001).with_message("boom");
    assert_eq!(diag.to_string(), "error[E9001]: boom");
}
