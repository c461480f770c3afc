//! Collection scan pre-pass.
//!
//! Populates the decorator collections, component collection, and
//! builder tables by a one-time walk over every struct and function
//! declaration reachable from the entry file. Imports are traversed
//! synchronously and recursively before any component-body lowering
//! reads the tables; unresolved modules are skipped silently.

use std::collections::HashSet;

use weft_syntax::ast::{FieldDecl, FunctionDecl, SourceFile, StructDecl};

use crate::context::CompilationContext;
use crate::decorator::DecoratorKind;

/// Scans a file and everything it imports into the context tables.
pub fn scan_file(ctx: &mut CompilationContext<'_>, file: &SourceFile, resolver: &dyn super::ModuleResolver) {
    let mut visited = HashSet::new();
    scan_into(ctx, file, resolver, &mut visited);
}

fn scan_into(
    ctx: &mut CompilationContext<'_>,
    file: &SourceFile,
    resolver: &dyn super::ModuleResolver,
    visited: &mut HashSet<String>,
) {
    if !visited.insert(file.path.clone()) {
        // Already scanned (diamond import or cycle); nothing new to add.
        return;
    }

    // Imports first so cross-file components are known before this
    // file's own declarations shadow anything.
    for import in file.imports() {
        if let Some(imported) = resolver.resolve(&import.specifier) {
            scan_into(ctx, imported, resolver, visited);
        }
    }

    for decl in file.structs() {
        scan_struct(ctx, decl);
    }
    for decl in file.functions() {
        scan_function(ctx, decl);
    }
}

/// Records one struct declaration into the tables.
pub fn scan_struct(ctx: &mut CompilationContext<'_>, decl: &StructDecl) {
    let name = decl.name.name.clone();
    ctx.components.custom_components.insert(name.clone());

    if decl.has_decorator("Entry") && ctx.components.entry_component.is_none() {
        ctx.components.entry_component = Some(name.clone());
    }
    if decl.has_decorator("CustomDialog") {
        ctx.components.dialog_components.insert(name.clone());
    }

    for field in &decl.fields {
        scan_field(ctx, &name, field);
    }

    for method in &decl.methods {
        if method.decorators.iter().any(|d| d.name == "Builder") {
            ctx.builders.record_method(&name, &method.name.name);
        }
        if method.decorators.iter().any(|d| d.name == "Styles") {
            ctx.builders.record_style_method(&name, method.clone());
        }
    }
}

fn scan_field(ctx: &mut CompilationContext<'_>, component: &str, field: &FieldDecl) {
    if field.is_private {
        ctx.collections.record_private(component, &field.name.name);
    }
    let kind = field
        .decorators
        .iter()
        .find_map(|d| DecoratorKind::from_name(&d.name))
        .unwrap_or(DecoratorKind::Regular);

    // Provide/Consume may alias their published key. The alias entry is
    // recorded first so it wins; the field-name entry is added only when
    // distinct.
    if matches!(kind, DecoratorKind::Provide | DecoratorKind::Consume) {
        let alias = field
            .decorator(kind.name())
            .and_then(weft_syntax::ast::Decorator::string_arg);
        if let Some(alias) = alias {
            ctx.collections.record(component, alias, kind);
            if alias != field.name.name {
                ctx.collections.record(component, &field.name.name, kind);
            }
            return;
        }
    }

    ctx.collections.record(component, &field.name.name, kind);
}

fn scan_function(ctx: &mut CompilationContext<'_>, decl: &FunctionDecl) {
    if decl.has_decorator("Builder") {
        ctx.builders.record_builder(decl.clone());
    }
    if decl.has_decorator("Styles") {
        ctx.builders.record_style(decl.clone());
    }
    if let Some(extend) = decl.decorator("Extend") {
        // @Extend(Text) names its target element as the argument.
        let target = extend
            .args
            .first()
            .and_then(weft_syntax::ast::Expr::as_ident)
            .unwrap_or_default()
            .to_string();
        ctx.builders.record_extend(target, decl.clone());
    }
}

// =============================================================================
// Tests
// =============================================================================
