use pretty_assertions::assert_eq;
use spmd_ir::Name;

use super::*;

fn err_at(line: u32, msg: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E2001)
        .with_message(msg)
        .with_label(SourcePos::point(Name::EMPTY, line, 1), "here")
}

#[test]
fn empty_queue_has_no_errors() {
    let queue = DiagnosticQueue::new();
    assert!(queue.has_errors().is_none());
    assert_eq!(queue.error_count(), 0);
}

#[test]
fn emit_error_counts() {
    let mut queue = DiagnosticQueue::new();
    let _ = queue.emit_error(err_at(1, "a"));
    assert_eq!(queue.error_count(), 1);
    assert!(queue.has_errors().is_some());
}

#[test]
fn warnings_do_not_count_as_errors() {
    let mut queue = DiagnosticQueue::new();
    assert!(queue.add(Diagnostic::warning(ErrorCode::E2001).with_message("w")));
    assert!(queue.has_errors().is_none());
    assert_eq!(queue.peek().count(), 1);
}

#[test]
fn flush_sorts_by_position_and_resets() {
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig::unlimited());
    let _ = queue.emit_error(err_at(9, "late"));
    let _ = queue.emit_error(err_at(2, "early"));
    let _ = queue.emit_error(err_at(5, "middle"));

    let messages: Vec<String> = queue.flush().into_iter().map(|d| d.message).collect();
    assert_eq!(messages, vec!["early", "middle", "late"]);
    assert_eq!(queue.error_count(), 0);
    assert_eq!(queue.peek().count(), 0);
}

#[test]
fn flush_keeps_reported_errors_on_record() {
    let mut queue = DiagnosticQueue::new();
    let _ = queue.emit_error(err_at(1, "a"));
    let _ = queue.flush();
    assert!(queue.has_errors().is_some());
    assert_eq!(queue.total_errors(), 1);

    let _ = queue.emit_error(err_at(2, "b"));
    assert_eq!(queue.error_count(), 1);
    assert_eq!(queue.total_errors(), 2);
}

#[test]
fn flush_resets_the_error_limit() {
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig {
        error_limit: 1,
        deduplicate: false,
    });
    let _ = queue.emit_error(err_at(1, "a"));
    assert!(queue.limit_reached());
    let _ = queue.flush();
    assert!(!queue.limit_reached());
    assert!(queue.add(err_at(2, "b")));
}

#[test]
fn identical_errors_are_deduplicated() {
    let mut queue = DiagnosticQueue::new();
    assert!(queue.add(err_at(3, "same")));
    assert!(!queue.add(err_at(3, "same")));
    assert!(queue.add(err_at(4, "same")));
    assert_eq!(queue.peek().count(), 2);
    assert_eq!(queue.error_count(), 3);
}

#[test]
fn unlimited_keeps_duplicates() {
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig::unlimited());
    assert!(queue.add(err_at(3, "same")));
    assert!(queue.add(err_at(3, "same")));
    assert_eq!(queue.peek().count(), 2);
}

#[test]
fn error_limit_adds_single_overflow_note() {
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig {
        error_limit: 2,
        deduplicate: false,
    });
    for line in 1..=5 {
        let _ = queue.emit_error(err_at(line, "e"));
    }
    assert!(queue.limit_reached());
    let flushed = queue.flush();
    assert_eq!(flushed.len(), 3);
    assert_eq!(flushed.iter().filter(|d| d.is_error()).count(), 2);
    assert_eq!(flushed[2].code, ErrorCode::E9002);
}
