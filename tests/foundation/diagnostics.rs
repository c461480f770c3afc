//! Integration tests for diagnostics
//!
//! Tests the diagnostic sink, stable code strings, and record display.

use weft_foundation::{Diagnostic, DiagnosticCode, DiagnosticSink, Severity, Span};

// =============================================================================
// Sink accumulation
// =============================================================================

#[test]
fn sink_preserves_emission_order() {
    let mut sink = DiagnosticSink::new();
    sink.error(
        DiagnosticCode::MissingBuildMethod,
        "component must declare a build method",
        Span::at_start(),
    );
    sink.warn(
        DiagnosticCode::SuspiciousPropertyFlow,
        "property 'count': assigning a value to a two-way binding",
        Span::new(10, 15, 2, 3),
    );
    sink.note("lowering component 'Home'", Span::at_start());

    let records = sink.records();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].severity, Severity::Error);
    assert_eq!(records[1].severity, Severity::Warn);
    assert_eq!(records[2].severity, Severity::Note);
}

#[test]
fn notes_carry_no_code() {
    let mut sink = DiagnosticSink::new();
    sink.note("processing imports", Span::at_start());
    assert_eq!(sink.records()[0].code, None);
}

#[test]
fn has_errors_ignores_warnings() {
    let mut sink = DiagnosticSink::new();
    sink.warn(
        DiagnosticCode::PrivatePropertyInit,
        "property 'secret' is private",
        Span::at_start(),
    );
    assert!(!sink.has_errors());

    sink.error(
        DiagnosticCode::IllegalPropertyFlow,
        "property 'x': cannot be assigned",
        Span::at_start(),
    );
    assert!(sink.has_errors());
}

#[test]
fn with_code_filters_to_one_family() {
    let mut sink = DiagnosticSink::new();
    sink.error(DiagnosticCode::UnknownProperty, "no property 'a'", Span::at_start());
    sink.error(DiagnosticCode::UnknownProperty, "no property 'b'", Span::at_start());
    sink.error(
        DiagnosticCode::MandatoryPropertyMissing,
        "property 'c' is mandatory to specify",
        Span::at_start(),
    );

    assert_eq!(sink.with_code(DiagnosticCode::UnknownProperty).count(), 2);
    assert_eq!(
        sink.with_code(DiagnosticCode::MandatoryPropertyMissing).count(),
        1
    );
}

#[test]
fn drain_takes_and_empties() {
    let mut sink = DiagnosticSink::new();
    sink.note("one", Span::at_start());
    sink.note("two", Span::at_start());

    let drained = sink.drain();
    assert_eq!(drained.len(), 2);
    assert!(sink.is_empty());
    assert_eq!(sink.len(), 0);
}

#[test]
fn clear_resets_between_runs() {
    let mut sink = DiagnosticSink::new();
    sink.error(
        DiagnosticCode::DuplicateBuildMethod,
        "duplicate build",
        Span::at_start(),
    );
    sink.clear();
    assert!(sink.is_empty());
    assert!(!sink.has_errors());
}

// =============================================================================
// Code strings
// =============================================================================

#[test]
fn structural_codes_are_1xxx() {
    assert_eq!(DiagnosticCode::DuplicateBuildMethod.code(), "E1001");
    assert_eq!(DiagnosticCode::MissingBuildMethod.code(), "E1002");
    assert_eq!(DiagnosticCode::InvalidComponentStatement.code(), "E1003");
    assert_eq!(DiagnosticCode::MalformedAttribute.code(), "E1004");
    assert_eq!(DiagnosticCode::StateStylesNotObject.code(), "E1005");
    assert_eq!(DiagnosticCode::MalformedForEach.code(), "E1006");
    assert_eq!(DiagnosticCode::MalformedRoot.code(), "E1007");
}

#[test]
fn decorator_codes_are_2xxx() {
    assert_eq!(DiagnosticCode::MultipleReactiveDecorators.code(), "E2001");
    assert_eq!(DiagnosticCode::MissingDefaultValue.code(), "E2002");
    assert_eq!(DiagnosticCode::ForbiddenDefaultValue.code(), "E2003");
    assert_eq!(DiagnosticCode::ForbiddenStateType.code(), "E2004");
    assert_eq!(DiagnosticCode::WatchUnknownMethod.code(), "E2005");
    assert_eq!(DiagnosticCode::WatchWithoutDecorator.code(), "E2006");
}

#[test]
fn flow_codes_are_3xxx_and_resolution_4xxx() {
    assert_eq!(DiagnosticCode::MandatoryPropertyMissing.code(), "E3001");
    assert_eq!(DiagnosticCode::ForbiddenToSpecify.code(), "E3002");
    assert_eq!(DiagnosticCode::PrivatePropertyInit.code(), "W3003");
    assert_eq!(DiagnosticCode::SuspiciousPropertyFlow.code(), "W3004");
    assert_eq!(DiagnosticCode::IllegalPropertyFlow.code(), "E3005");
    assert_eq!(DiagnosticCode::UnknownProperty.code(), "E3006");
    assert_eq!(DiagnosticCode::UnresolvedModule.code(), "E4001");
}

// =============================================================================
// Display
// =============================================================================

#[test]
fn diagnostic_display_includes_code_and_position() {
    let diag = Diagnostic {
        severity: Severity::Error,
        code: Some(DiagnosticCode::IllegalPropertyFlow),
        message: "property 'value': cannot be assigned".to_string(),
        span: Span::new(12, 20, 4, 9),
    };
    let text = format!("{diag}");
    assert!(text.starts_with("error[E3005]"));
    assert!(text.contains("cannot be assigned"));
    assert!(text.contains("4:9"));
}

#[test]
fn severity_display() {
    assert_eq!(format!("{}", Severity::Note), "note");
    assert_eq!(format!("{}", Severity::Warn), "warning");
    assert_eq!(format!("{}", Severity::Error), "error");
}

#[test]
fn severity_ordering_puts_errors_last() {
    assert!(Severity::Note < Severity::Warn);
    assert!(Severity::Warn < Severity::Error);
}
