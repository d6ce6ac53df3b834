//! Diagnostic sink for semantic errors.
//!
//! Type-level operations never print or count errors globally. They return
//! `Result`s; callers turn user-facing failures into [`Diagnostic`]s and
//! push them into a [`DiagnosticQueue`], receiving an [`ErrorGuaranteed`]
//! as proof that something was reported.
//!
//! ```text
//! let guarantee = queue.emit_error(diagnostic);
//! // later, an internal invariant failure can check whether it is fallout
//! if let Some(prior) = queue.has_errors() { return Err(prior) }
//! ```

mod diagnostic;
mod error_code;
mod guarantee;
pub mod queue;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
pub use guarantee::ErrorGuaranteed;
pub use queue::{DiagnosticConfig, DiagnosticQueue};
