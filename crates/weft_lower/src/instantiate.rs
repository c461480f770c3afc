//! Custom component instantiation.
//!
//! Validates a parent's property-initializer object against the child's
//! decorator collections, rewrites link-reference entries into backing
//! accessor expressions, and emits either an idempotent find-or-create
//! pattern (full rebuild) or an update-by-element-id registration
//! (partial update).

use weft_foundation::DiagnosticCode;
use weft_syntax::ast::{BinOp, CallExpr, Expr, IfStmt, ObjectProp, Stmt};
use weft_syntax::make;

use crate::binder::{self, ChainLink};
use crate::context::CompilationContext;
use crate::decorator::{flow_verdict, DecoratorKind, FlowVerdict};
use crate::statement;

/// Reference prefix a parent writes to pass a field by reference.
const REF_SIGIL: char = '$';
/// Prefix of the lowered backing field holding the reactive wrapper.
const BACKING_PREFIX: &str = "__";

/// One validated initializer entry.
struct InitEntry {
    key: String,
    /// Value with link references rewritten to backing accessors.
    value: Expr,
    /// Value exactly as the parent wrote it.
    raw_value: Expr,
    child_kind: Option<DecoratorKind>,
}

/// Lowers one custom-component instantiation statement.
pub fn lower_custom_component(
    ctx: &mut CompilationContext<'_>,
    name: &str,
    root: &CallExpr,
    links: &[ChainLink<'_>],
    out: &mut Vec<Stmt>,
) {
    let entries = validate_initializer(ctx, name, root);

    let mut component = Vec::new();
    if ctx.config.partial_update {
        emit_partial(ctx, name, &entries, &mut component);
    } else {
        emit_full(ctx, name, &entries, &mut component);
    }

    // Chained attributes wrap the custom component in a synthetic
    // common receiver, but only when at least one attribute applies.
    let mut attrs = Vec::new();
    binder::bind_attributes(ctx, "CommonComponent", links, &mut attrs);
    if attrs.is_empty() {
        out.append(&mut component);
    } else {
        out.push(make::expr_stmt(make::method_call(
            "CommonComponent",
            "create",
            vec![],
        )));
        out.append(&mut component);
        out.append(&mut attrs);
        out.push(make::expr_stmt(make::method_call(
            "CommonComponent",
            "pop",
            vec![],
        )));
    }
}

// =============================================================================
// Initializer validation
// =============================================================================

fn validate_initializer(
    ctx: &mut CompilationContext<'_>,
    name: &str,
    root: &CallExpr,
) -> Vec<InitEntry> {
    let props: &[ObjectProp] = match root.args.first() {
        Some(Expr::Object(lit)) => &lit.props,
        None => &[],
        Some(other) => {
            ctx.sink.error(
                DiagnosticCode::InvalidComponentStatement,
                format!("'{name}' initializer must be an object literal"),
                other.span(),
            );
            &[]
        }
    };

    let mut entries = Vec::with_capacity(props.len());
    for prop in props {
        let key = prop.key.name.clone();
        let child_kind = ctx.collections.kind_of(name, &key);

        match child_kind {
            None => {
                ctx.sink.error(
                    DiagnosticCode::UnknownProperty,
                    format!("'{key}' matches no declared property of '{name}'"),
                    prop.span,
                );
            }
            Some(kind) if kind.forbidden_from_parent() => {
                ctx.sink.error(
                    DiagnosticCode::ForbiddenToSpecify,
                    format!(
                        "'{key}' is a {} property and is forbidden to specify here",
                        kind.name()
                    ),
                    prop.span,
                );
            }
            Some(kind) => {
                if ctx.collections.is_private(name, &key) {
                    ctx.sink.warn(
                        DiagnosticCode::PrivatePropertyInit,
                        format!("'{key}' is private to '{name}'"),
                        prop.span,
                    );
                }

                let (parent_kind, by_reference) = classify_source(ctx, &prop.value);
                match flow_verdict(parent_kind, kind, by_reference) {
                    FlowVerdict::Allowed => {}
                    FlowVerdict::Suspicious(reason) => {
                        ctx.sink.warn(
                            DiagnosticCode::SuspiciousPropertyFlow,
                            format!("property '{key}': {reason}"),
                            prop.span,
                        );
                    }
                    FlowVerdict::Illegal(reason) => {
                        ctx.sink.error(
                            DiagnosticCode::IllegalPropertyFlow,
                            format!("property '{key}': {reason}"),
                            prop.span,
                        );
                    }
                }
            }
        }

        entries.push(InitEntry {
            key,
            value: rewrite_reference(&prop.value),
            raw_value: prop.value.clone(),
            child_kind,
        });
    }

    // Mandatory properties the parent failed to supply.
    for kind in [DecoratorKind::Link, DecoratorKind::ObjectLink] {
        for prop in ctx.collections.props_of_kind(name, kind) {
            if !entries.iter().any(|e| e.key == prop) {
                let prop = prop.to_string();
                ctx.sink.error(
                    DiagnosticCode::MandatoryPropertyMissing,
                    format!(
                        "'{prop}' is a {} property of '{name}' and is mandatory to specify",
                        kind.name()
                    ),
                    root.span,
                );
            }
        }
    }

    entries
}

/// Classifies the parent side of one initializer entry: the decorator
/// kind of the referenced field, if the value reads a field of the
/// enclosing component, and whether the reference sigil was written.
fn classify_source(
    ctx: &CompilationContext<'_>,
    value: &Expr,
) -> (Option<DecoratorKind>, bool) {
    let Some(field) = value.as_this_member() else {
        return (None, false);
    };
    let (field, by_reference) = match field.strip_prefix(REF_SIGIL) {
        Some(stripped) => (stripped, true),
        None => (field, false),
    };
    let kind = ctx
        .components
        .current_struct()
        .and_then(|current| ctx.collections.kind_of(current, field));
    (kind, by_reference)
}

/// Rewrites `this.$field` into the backing accessor `this.__field` so
/// the child receives the reactive wrapper itself and writes propagate
/// back to the parent.
fn rewrite_reference(value: &Expr) -> Expr {
    if let Some(field) = value.as_this_member() {
        if let Some(stripped) = field.strip_prefix(REF_SIGIL) {
            return make::this_member(format!("{BACKING_PREFIX}{stripped}"));
        }
    }
    value.clone()
}

fn init_object(entries: &[InitEntry]) -> Expr {
    make::object(
        entries
            .iter()
            .map(|e| (e.key.as_str(), e.value.clone()))
            .collect(),
    )
}

/// The refresh object for re-renders: value-copy entries only, with the
/// values as originally written. Reference-passed links stay wired from
/// the first render.
fn refresh_object(entries: &[InitEntry]) -> Expr {
    make::object(
        entries
            .iter()
            .filter(|e| {
                !matches!(
                    e.child_kind,
                    None | Some(
                        DecoratorKind::Link
                            | DecoratorKind::ObjectLink
                            | DecoratorKind::BuilderParam
                    )
                )
            })
            .map(|e| (e.key.as_str(), e.raw_value.clone()))
            .collect(),
    )
}

// =============================================================================
// Emission
// =============================================================================

/// Full-rebuild mode: look up the child created on a previous rebuild
/// by its synthetic id; construct it only if absent, otherwise refresh
/// its value parameters and re-attach it.
fn emit_full(
    ctx: &mut CompilationContext<'_>,
    name: &str,
    entries: &[InitEntry],
    out: &mut Vec<Stmt>,
) {
    let id = ctx.ids.next_id();
    let child_var = format!("earlierCreatedChild_{id}");
    let id_lit = make::str_lit(id.to_string());

    out.push(make::let_decl(
        child_var.clone(),
        make::this_call("findChildById", vec![id_lit.clone()]),
    ));

    let construct = make::expr_stmt(make::method_call(
        "View",
        "create",
        vec![make::new_expr(
            name,
            vec![id_lit, make::this(), init_object(entries)],
        )],
    ));
    let refresh = vec![
        make::expr_stmt(make::call(
            make::member(make::ident(child_var.clone()), "updateWithValueParams"),
            vec![refresh_object(entries)],
        )),
        make::expr_stmt(make::method_call(
            "View",
            "create",
            vec![make::ident(child_var.clone())],
        )),
    ];

    out.push(Stmt::If(IfStmt {
        cond: make::binary(
            BinOp::Eq,
            make::ident(child_var),
            make::ident("undefined"),
        ),
        then_branch: vec![construct],
        else_branch: Some(weft_syntax::ast::ElseArm::Else(
            refresh,
            weft_foundation::Span::default(),
        )),
        span: weft_foundation::Span::default(),
    }));
}

/// Partial-update mode: register the creation site by element id.
/// First render constructs the child; re-renders push only the one-way
/// state vars down by id.
fn emit_partial(
    ctx: &mut CompilationContext<'_>,
    name: &str,
    entries: &[InitEntry],
    out: &mut Vec<Stmt>,
) {
    ctx.ids.next_id();

    let construct = make::expr_stmt(make::method_call(
        "ViewPU",
        "create",
        vec![make::new_expr(
            name,
            vec![
                make::this(),
                init_object(entries),
                make::ident("undefined"),
                make::ident("elmtId"),
            ],
        )],
    ));
    let refresh = make::expr_stmt(make::this_call(
        "updateStateVarsOfChildByElmtId",
        vec![make::ident("elmtId"), refresh_object(entries)],
    ));

    let site = vec![Stmt::If(IfStmt {
        cond: make::ident("isInitialRender"),
        then_branch: vec![construct],
        else_branch: Some(weft_syntax::ast::ElseArm::Else(
            vec![refresh],
            weft_foundation::Span::default(),
        )),
        span: weft_foundation::Span::default(),
    })];

    out.push(statement::observe_component_creation(site));
}

// =============================================================================
// Tests
// =============================================================================
