//! Top-level per-file orchestration.
//!
//! One pass per source file: scan the collection tables (following
//! imports), lower every struct through the class/member lowering,
//! lower global builder functions, register the entry component, and
//! hand back the lowered file together with the accumulated
//! diagnostics.

use weft_foundation::{Diagnostic, LowerConfig, Severity};
use weft_syntax::ast::{FunctionDecl, Item, SourceFile};
use weft_syntax::make;

use crate::context::CompilationContext;
use crate::oracle::{ModuleResolver, TypeOracle};
use crate::{scan, statement, struct_lower};

/// The result of lowering one source file.
#[derive(Debug)]
pub struct LoweredFile {
    /// The lowered file: structs replaced by runtime classes.
    pub file: SourceFile,
    /// Everything the pass reported, in emission order.
    pub diagnostics: Vec<Diagnostic>,
}

impl LoweredFile {
    /// Returns true if any diagnostic is an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }
}

/// Lowers one source file.
///
/// This is the single entry point the external driver calls. A fresh
/// context is constructed per call, so independent runs never observe
/// each other's tables; watch-mode drivers reusing a context go through
/// [`CompilationContext::reset`] instead.
pub fn lower_source_file(
    file: &SourceFile,
    resolver: &dyn ModuleResolver,
    oracle: &dyn TypeOracle,
    config: LowerConfig,
) -> LoweredFile {
    let mut ctx = CompilationContext::new(config, oracle);
    scan::scan_file(&mut ctx, file, resolver);

    let mut items = Vec::with_capacity(file.items.len() + 1);
    for item in &file.items {
        match item {
            Item::Struct(decl) => {
                items.push(Item::Class(struct_lower::lower_struct(&mut ctx, decl)));
            }
            Item::Function(decl) => {
                if decl.has_decorator("Styles") || decl.has_decorator("Extend") {
                    // Spliced into attribute chains at compile time.
                    continue;
                }
                if decl.has_decorator("Builder") {
                    items.push(Item::Function(lower_builder_function(&mut ctx, decl)));
                } else {
                    items.push(item.clone());
                }
            }
            _ => items.push(item.clone()),
        }
    }

    if let Some(entry) = ctx.components.entry_component.clone() {
        items.push(Item::Stmt(make::expr_stmt(make::call(
            make::ident("loadDocument"),
            vec![entry_instance(&ctx, &entry)],
        ))));
    }

    let mut diagnostics = ctx.sink.drain();
    if ctx.config.preview {
        diagnostics.retain(|d| d.severity != Severity::Note);
    }

    LoweredFile {
        file: SourceFile::new(file.path.clone(), items),
        diagnostics,
    }
}

/// A global builder function keeps its signature, gains the implicit
/// parent-context parameter, and has its body lowered as a UI block.
fn lower_builder_function(ctx: &mut CompilationContext<'_>, decl: &FunctionDecl) -> FunctionDecl {
    let mut body = Vec::new();
    statement::lower_block(ctx, &decl.body, None, &mut body);

    let mut params = decl.params.clone();
    params.push(make::id("parent"));

    FunctionDecl {
        name: decl.name.clone(),
        decorators: vec![],
        params,
        body,
        span: decl.span,
    }
}

/// The `new` expression registering the entry component, matching the
/// constructor signature of the selected emission mode.
fn entry_instance(ctx: &CompilationContext<'_>, entry: &str) -> weft_syntax::ast::Expr {
    if ctx.config.partial_update {
        make::new_expr(
            entry,
            vec![make::ident("undefined"), make::object(vec![])],
        )
    } else {
        make::new_expr(
            entry,
            vec![
                make::str_lit("1"),
                make::ident("undefined"),
                make::object(vec![]),
            ],
        )
    }
}

// =============================================================================
// Tests
// =============================================================================
