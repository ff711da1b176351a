//! Translation of resolver reports into compiler diagnostics
//!
//! Two conventions meet here:
//!
//! | resolver (`ReportSeverity`) | compiler (`Severity`) |
//! |-----------------------------|-----------------------|
//! | `Info`                      | `Info`                |
//! | `Warning`                   | `Warning`             |
//! | `Error`                     | `Error`               |
//!
//! Resolver lines are 1-indexed, compiler lines are 0-indexed. Columns are
//! passed through unchanged.

use scriptdef_core::{Diagnostic, Position, Severity};
use scriptdef_resolver::{EditorPosition, EditorReport, ReportSeverity};

/// Severity correspondence, matched by name rather than declaration order
pub const SEVERITY_TABLE: [(ReportSeverity, Severity); 3] = [
    (ReportSeverity::Info, Severity::Info),
    (ReportSeverity::Warning, Severity::Warning),
    (ReportSeverity::Error, Severity::Error),
];

/// Compiler severity for a resolver severity
pub fn severity_of(severity: ReportSeverity) -> Severity {
    match severity {
        ReportSeverity::Info => Severity::Info,
        ReportSeverity::Warning => Severity::Warning,
        ReportSeverity::Error => Severity::Error,
    }
}

/// Compiler position for a resolver position
///
/// Line 0 should never come from a resolver; it maps to 0 rather than underflowing.
pub fn position_of(position: EditorPosition) -> Position {
    Position::new(position.line.saturating_sub(1), position.column)
}

/// Build the compiler diagnostic for one resolver report
pub fn script_diagnostic_of(
    script_name: Option<&str>,
    message: impl Into<String>,
    severity: ReportSeverity,
    position: Option<EditorPosition>,
) -> Diagnostic {
    let mut diagnostic = Diagnostic::new(severity_of(severity), message);
    if let Some(name) = script_name {
        diagnostic = diagnostic.with_script(name);
    }
    if let Some(position) = position {
        diagnostic = diagnostic.with_position(position_of(position));
    }
    diagnostic
}

/// Translate a resolver report
pub fn translate_report(script_name: Option<&str>, report: EditorReport) -> Diagnostic {
    script_diagnostic_of(script_name, report.message, report.severity, report.position)
}
