//! Diagnostic records and the append-only diagnostic sink.
//!
//! Lowering never aborts a file for a user-code problem. Every problem is
//! appended to a [`DiagnosticSink`] with a source span and processing
//! continues, so one pass surfaces every independent problem in a file.

use std::fmt;

use crate::span::Span;

// =============================================================================
// Severity
// =============================================================================

/// Severity of a diagnostic record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Severity {
    /// Informational note (suppressed in preview/accelerated mode).
    Note,
    /// Suspicious but not provably wrong.
    Warn,
    /// A hard violation of the component or decorator contract.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Note => write!(f, "note"),
            Self::Warn => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

// =============================================================================
// DiagnosticCode
// =============================================================================

/// Stable diagnostic codes for tooling and documentation cross-reference.
///
/// Structural codes are `1xxx`, decorator-contract codes are `2xxx`,
/// cross-component property-flow codes are `3xxx`, and resolution codes
/// are `4xxx`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DiagnosticCode {
    /// A component declared more than one `build` method.
    DuplicateBuildMethod,
    /// A component declared no `build` method.
    MissingBuildMethod,
    /// A statement in a build method is not valid component syntax.
    InvalidComponentStatement,
    /// A bare property access where an attribute call was expected.
    MalformedAttribute,
    /// `stateStyles` was given a non-object-literal argument.
    StateStylesNotObject,
    /// A `ForEach`/`LazyForEach` call with malformed arguments.
    MalformedForEach,
    /// The root of a build method is not a legal container.
    MalformedRoot,
    /// More than one primary reactive decorator on a field.
    MultipleReactiveDecorators,
    /// A decorator kind that requires a default value had none.
    MissingDefaultValue,
    /// A decorator kind that forbids a default value had one.
    ForbiddenDefaultValue,
    /// A field type on the denylist carried a reactive decorator.
    ForbiddenStateType,
    /// `@Watch` referenced a method that does not exist on the struct.
    WatchUnknownMethod,
    /// `@Watch` was the only decorator on a field.
    WatchWithoutDecorator,
    /// A mandatory (Link/ObjectLink) property was not supplied.
    MandatoryPropertyMissing,
    /// A store-resolved property was supplied directly by a parent.
    ForbiddenToSpecify,
    /// A private field was initialized from a parent.
    PrivatePropertyInit,
    /// A suspicious but tolerated parent-to-child property flow.
    SuspiciousPropertyFlow,
    /// An illegal parent-to-child property flow.
    IllegalPropertyFlow,
    /// An initializer entry that matches no declared property.
    UnknownProperty,
    /// A mandatory module reference failed to resolve.
    UnresolvedModule,
}

impl DiagnosticCode {
    /// Returns the stable code string for this diagnostic.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::DuplicateBuildMethod => "E1001",
            Self::MissingBuildMethod => "E1002",
            Self::InvalidComponentStatement => "E1003",
            Self::MalformedAttribute => "E1004",
            Self::StateStylesNotObject => "E1005",
            Self::MalformedForEach => "E1006",
            Self::MalformedRoot => "E1007",
            Self::MultipleReactiveDecorators => "E2001",
            Self::MissingDefaultValue => "E2002",
            Self::ForbiddenDefaultValue => "E2003",
            Self::ForbiddenStateType => "E2004",
            Self::WatchUnknownMethod => "E2005",
            Self::WatchWithoutDecorator => "E2006",
            Self::MandatoryPropertyMissing => "E3001",
            Self::ForbiddenToSpecify => "E3002",
            Self::PrivatePropertyInit => "W3003",
            Self::SuspiciousPropertyFlow => "W3004",
            Self::IllegalPropertyFlow => "E3005",
            Self::UnknownProperty => "E3006",
            Self::UnresolvedModule => "E4001",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// =============================================================================
// Diagnostic
// =============================================================================

/// One user-facing problem located in the original source.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Diagnostic {
    /// Severity of this record.
    pub severity: Severity,
    /// Stable code, when the problem belongs to a cataloged family.
    pub code: Option<DiagnosticCode>,
    /// Human-readable message.
    pub message: String,
    /// Location in the original source file.
    pub span: Span,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{code}]")?;
        }
        write!(
            f,
            ": {} at {}:{}",
            self.message, self.span.line, self.span.column
        )
    }
}

// =============================================================================
// DiagnosticSink
// =============================================================================

/// Append-only accumulator for diagnostics produced by one pass.
///
/// The sink is owned by the compilation context and drained by the
/// external driver after `lower_source_file` returns.
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    records: Vec<Diagnostic>,
}

impl DiagnosticSink {
    /// Creates a new empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an error with a stable code.
    pub fn error(&mut self, code: DiagnosticCode, message: impl Into<String>, span: Span) {
        self.records.push(Diagnostic {
            severity: Severity::Error,
            code: Some(code),
            message: message.into(),
            span,
        });
    }

    /// Appends a warning with a stable code.
    pub fn warn(&mut self, code: DiagnosticCode, message: impl Into<String>, span: Span) {
        self.records.push(Diagnostic {
            severity: Severity::Warn,
            code: Some(code),
            message: message.into(),
            span,
        });
    }

    /// Appends an informational note without a code.
    pub fn note(&mut self, message: impl Into<String>, span: Span) {
        self.records.push(Diagnostic {
            severity: Severity::Note,
            code: None,
            message: message.into(),
            span,
        });
    }

    /// Returns true if any record is an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.records
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Returns the accumulated records.
    #[must_use]
    pub fn records(&self) -> &[Diagnostic] {
        &self.records
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no records have been appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns records matching a specific code.
    pub fn with_code(&self, code: DiagnosticCode) -> impl Iterator<Item = &Diagnostic> {
        self.records.iter().filter(move |d| d.code == Some(code))
    }

    /// Takes the accumulated records, leaving the sink empty.
    pub fn drain(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.records)
    }

    /// Clears the sink between independent compilation runs.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

// =============================================================================
// Tests
// =============================================================================
