//! External collaborator interfaces.
//!
//! The host compiler front end owns parsing and type binding. The
//! lowering pass consumes two narrow views of it:
//! - [`TypeOracle`] - classifies a written type as simple or object,
//!   which selects between the two parallel reactive wrapper families
//! - [`ModuleResolver`] - maps an import specifier to an already-parsed
//!   source file, or silently fails for opaque third-party modules

use weft_syntax::ast::{SourceFile, TypeAnnotation};

// =============================================================================
// Type classification
// =============================================================================

/// Classification of a field's static type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeClass {
    /// string / number / boolean / enum: tracked by the simple wrapper.
    Simple,
    /// Anything else: needs deep-observation object wrapping.
    Object,
}

/// Type-query interface supplied by the host compiler.
///
/// Queried synchronously; assumed available once the containing program
/// has finished type binding.
pub trait TypeOracle {
    /// Classifies a type annotation as simple or object.
    fn classify(&self, ty: &TypeAnnotation) -> TypeClass;

    /// Returns true if the type is on the reactive-decorator denylist
    /// (types that cannot carry `@State` and friends).
    fn is_forbidden_reactive(&self, ty: &TypeAnnotation) -> bool {
        matches!(ty.name.as_str(), "Function" | "Promise" | "any" | "void")
    }
}

/// Default oracle classifying by built-in type names.
///
/// Sufficient when no binder-backed oracle is wired in (tests, preview).
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultOracle;

impl TypeOracle for DefaultOracle {
    fn classify(&self, ty: &TypeAnnotation) -> TypeClass {
        match ty.name.as_str() {
            "string" | "number" | "boolean" => TypeClass::Simple,
            name if name.starts_with("enum ") => TypeClass::Simple,
            _ => TypeClass::Object,
        }
    }
}

// =============================================================================
// Module resolution
// =============================================================================

/// Import resolution interface supplied by the external driver.
///
/// Returns the parsed source for a module specifier, or `None` when the
/// module is unresolved or opaque. `None` is not an error: the scan pass
/// simply skips such modules ("no such export" semantics).
pub trait ModuleResolver {
    /// Resolves a module specifier to its parsed source file.
    fn resolve(&self, specifier: &str) -> Option<&SourceFile>;
}

/// A resolver that resolves nothing (single-file compilation).
#[derive(Clone, Copy, Debug, Default)]
pub struct NoModules;

impl ModuleResolver for NoModules {
    fn resolve(&self, _specifier: &str) -> Option<&SourceFile> {
        None
    }
}

/// A resolver backed by a fixed specifier-to-file table.
#[derive(Debug, Default)]
pub struct TableResolver {
    entries: Vec<(String, SourceFile)>,
}

impl TableResolver {
    /// Creates an empty resolver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a parsed file under a specifier.
    pub fn insert(&mut self, specifier: impl Into<String>, file: SourceFile) {
        self.entries.push((specifier.into(), file));
    }
}

impl ModuleResolver for TableResolver {
    fn resolve(&self, specifier: &str) -> Option<&SourceFile> {
        self.entries
            .iter()
            .find(|(s, _)| s == specifier)
            .map(|(_, f)| f)
    }
}

// =============================================================================
// Tests
// =============================================================================
