//! Diagnostic queue: collects, limits, deduplicates and sorts diagnostics.
//!
//! The queue replaces a process-wide error counter. Internal-invariant
//! handling asks [`DiagnosticQueue::has_errors`] whether an earlier user
//! error was reported before deciding between degrading and aborting.

use spmd_ir::SourcePos;

use crate::{Diagnostic, ErrorCode, ErrorGuaranteed};

/// Configuration for diagnostic processing.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticConfig {
    /// Maximum number of errors kept (0 = unlimited).
    pub error_limit: usize,
    /// Drop an error identical in code, message and position to one
    /// already queued.
    pub deduplicate: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig {
            error_limit: 20,
            deduplicate: true,
        }
    }
}

impl DiagnosticConfig {
    /// No limits and no dedup (for testing).
    pub fn unlimited() -> Self {
        DiagnosticConfig {
            error_limit: 0,
            deduplicate: false,
        }
    }
}

/// Queue for collecting diagnostics during a pass.
///
/// ```text
/// let mut queue = DiagnosticQueue::new();
/// let guarantee = queue.emit_error(diagnostic);
/// let sorted = queue.flush();
/// ```
#[derive(Clone, Debug, Default)]
pub struct DiagnosticQueue {
    diagnostics: Vec<Diagnostic>,
    /// Errors accepted since the last flush, including ones dropped by
    /// dedup. Drives the error limit.
    error_count: usize,
    /// Errors accepted over the queue's lifetime. Never reset.
    total_errors: usize,
    /// Set once the limit has been hit and the overflow note queued.
    overflowed: bool,
    config: DiagnosticConfig,
}

impl DiagnosticQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DiagnosticConfig) -> Self {
        DiagnosticQueue {
            config,
            ..Self::default()
        }
    }

    /// Add a diagnostic. Returns `false` if it was filtered out.
    pub fn add(&mut self, diag: Diagnostic) -> bool {
        let is_error = diag.is_error();
        if is_error && self.limit_reached() {
            if !self.overflowed {
                self.overflowed = true;
                let pos = diag.primary_pos().unwrap_or(SourcePos::DUMMY);
                self.diagnostics
                    .push(too_many_errors(self.config.error_limit, pos));
            }
            self.count_error();
            return false;
        }
        if self.config.deduplicate && self.diagnostics.contains(&diag) {
            if is_error {
                self.count_error();
            }
            return false;
        }
        if is_error {
            self.count_error();
        }
        self.diagnostics.push(diag);
        true
    }

    /// Emit an error and get proof that it was emitted.
    ///
    /// The guarantee is valid even if the queue filtered the diagnostic:
    /// an identical or over-limit error has still been reported.
    pub fn emit_error(&mut self, diag: Diagnostic) -> ErrorGuaranteed {
        debug_assert!(diag.is_error(), "emit_error called with a non-error");
        self.add(diag);
        ErrorGuaranteed::new()
    }

    fn count_error(&mut self) {
        self.error_count += 1;
        self.total_errors += 1;
    }

    pub fn limit_reached(&self) -> bool {
        self.config.error_limit > 0 && self.error_count >= self.config.error_limit
    }

    /// Errors reported since the last flush.
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Errors reported over the queue's lifetime, flushed ones included.
    pub fn total_errors(&self) -> usize {
        self.total_errors
    }

    /// `Some` if at least one error has ever been reported through this
    /// queue. Flushing does not clear it.
    pub fn has_errors(&self) -> Option<ErrorGuaranteed> {
        ErrorGuaranteed::from_error_count(self.total_errors)
    }

    /// Take all diagnostics, ordered by source position.
    ///
    /// The sort is stable, so diagnostics at the same position keep their
    /// emission order. Resets the per-batch error count and limit; the
    /// lifetime count behind [`DiagnosticQueue::has_errors`] survives.
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        let mut out = std::mem::take(&mut self.diagnostics);
        out.sort_by_key(|d| {
            let pos = d.primary_pos().unwrap_or(SourcePos::DUMMY);
            (pos.file, pos.start())
        });
        self.error_count = 0;
        self.overflowed = false;
        out
    }

    /// Diagnostics in emission order, without clearing.
    pub fn peek(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }
}

#[cold]
fn too_many_errors(limit: usize, pos: SourcePos) -> Diagnostic {
    Diagnostic::warning(ErrorCode::E9002)
        .with_message(format!("further errors suppressed after {limit} errors"))
        .with_label(pos, "error limit reached here")
}

#[cfg(test)]
mod tests;
