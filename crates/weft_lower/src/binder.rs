//! Attribute chain binding.
//!
//! A component statement is a chain of calls hanging off the component
//! invocation: `Text('hi').fontSize(20).onClick(handler)`. The binder
//! walks the chain from the outermost call inward, collecting one link
//! per `.attr(args)` hop, then emits one attribute-set call per link in
//! reverse collection order so the call closest to the component root
//! lands first, right after creation.

use weft_foundation::{DiagnosticCode, Span};
use weft_syntax::ast::{CallExpr, Expr, ObjectLit, Stmt};
use weft_syntax::make;

use crate::context::CompilationContext;
use crate::gesture::{self, GesturePriority};

// =============================================================================
// Chain splitting
// =============================================================================

/// One `.attr(args)` hop of an attribute chain.
#[derive(Clone, Debug)]
pub struct ChainLink<'a> {
    /// The attribute name.
    pub name: &'a str,
    /// The call arguments.
    pub args: &'a [Expr],
    /// Span of the link for diagnostics.
    pub span: Span,
}

/// Result of splitting a statement expression into root and links.
#[derive(Debug)]
pub enum ChainSplit<'a> {
    /// A well-formed chain: the root invocation plus links collected
    /// outermost-first.
    Chain {
        /// The innermost call (the component invocation itself).
        root: &'a CallExpr,
        /// Attribute links, outermost first.
        links: Vec<ChainLink<'a>>,
    },
    /// The chain ends in a property access with no call.
    BareMember(Span),
    /// The expression is not a call chain at all.
    NotAChain,
}

/// Splits a chained call expression into its root invocation and its
/// attribute links.
///
/// The root is the innermost call: one whose callee is a plain
/// identifier, or a method on `this` (builder-method invocations).
#[must_use]
pub fn split_chain(expr: &Expr) -> ChainSplit<'_> {
    let mut links = Vec::new();
    let mut cursor = expr;
    loop {
        match cursor {
            Expr::Call(call) => match call.callee.as_ref() {
                Expr::Ident(_) => {
                    return ChainSplit::Chain { root: call, links };
                }
                Expr::Member(member) => {
                    if matches!(member.object.as_ref(), Expr::This(_)) {
                        return ChainSplit::Chain { root: call, links };
                    }
                    links.push(ChainLink {
                        name: &member.property.name,
                        args: &call.args,
                        span: call.span,
                    });
                    cursor = &member.object;
                }
                _ => return ChainSplit::NotAChain,
            },
            Expr::Member(member) => return ChainSplit::BareMember(member.span),
            _ => return ChainSplit::NotAChain,
        }
    }
}

// =============================================================================
// Binding
// =============================================================================

/// Emits one attribute-set call per link, reversed back into source
/// order, with the special-case handling each attribute family needs.
pub fn bind_attributes(
    ctx: &mut CompilationContext<'_>,
    component: &str,
    links: &[ChainLink<'_>],
    out: &mut Vec<Stmt>,
) {
    let mut animations_seen = 0u32;
    for link in links.iter().rev() {
        if let Some(priority) = GesturePriority::from_attr(link.name) {
            if let Some(arg) = link.args.first() {
                gesture::lower_gesture_attr(ctx, priority, arg, out);
            } else {
                ctx.sink.error(
                    DiagnosticCode::MalformedAttribute,
                    format!("'{}' requires a gesture argument", link.name),
                    link.span,
                );
            }
            continue;
        }

        match link.name {
            "animation" => {
                // Reset between chained animations so earlier animation
                // state does not leak into the next application.
                if animations_seen > 0 {
                    out.push(make::expr_stmt(make::method_call(
                        component,
                        "animation",
                        vec![make::null()],
                    )));
                }
                animations_seen += 1;
                emit_plain_attr(ctx, component, link, out);
            }
            "stateStyles" => bind_state_styles(ctx, component, link, out),
            name if is_style_reference(ctx, component, name) => {
                splice_style_block(ctx, component, name, link.span, out);
            }
            _ => emit_plain_attr(ctx, component, link, out),
        }
    }
}

/// Returns true if the link name refers to a declared `@Styles` or
/// `@Extend` block rather than a direct runtime attribute.
fn is_style_reference(ctx: &CompilationContext<'_>, component: &str, name: &str) -> bool {
    if ctx.builders.style(name).is_some() {
        return true;
    }
    if let Some(extend) = ctx.builders.extend(name) {
        return extend.target == component;
    }
    if let Some(current) = ctx.components.current_struct() {
        return ctx.builders.is_style_method(current, name);
    }
    false
}

/// Splices the pre-lowered statements of a named style block in place
/// of a direct attribute call.
fn splice_style_block(
    ctx: &mut CompilationContext<'_>,
    component: &str,
    name: &str,
    span: Span,
    out: &mut Vec<Stmt>,
) {
    let body = ctx
        .builders
        .style(name)
        .map(|decl| decl.body.clone())
        .or_else(|| ctx.builders.extend(name).map(|e| e.decl.body.clone()))
        .or_else(|| {
            ctx.components
                .current_struct()
                .and_then(|current| ctx.builders.style_method(current, name))
                .map(|method| method.body.clone())
        });

    let Some(body) = body else {
        return;
    };

    for stmt in &body {
        let Some(expr) = stmt.as_expr() else {
            ctx.sink.error(
                DiagnosticCode::MalformedAttribute,
                format!("style block '{name}' may only contain attribute calls"),
                span,
            );
            continue;
        };
        match split_chain(expr) {
            ChainSplit::Chain { root, links } => {
                // The root call is itself the block's first attribute;
                // the links hang off it outward.
                let Some(attr) = root.callee.as_ident() else {
                    ctx.sink.error(
                        DiagnosticCode::MalformedAttribute,
                        format!("style block '{name}' may only contain attribute calls"),
                        span,
                    );
                    continue;
                };
                let mut chain = links;
                chain.push(ChainLink {
                    name: attr,
                    args: &root.args,
                    span: root.span,
                });
                bind_attributes(ctx, component, &chain, out);
            }
            _ => ctx.sink.error(
                DiagnosticCode::MalformedAttribute,
                format!("style block '{name}' may only contain attribute calls"),
                span,
            ),
        }
    }
}

/// Lowers a `stateStyles` attribute: one visual-state marker plus the
/// state's attribute block per named state, then a marker reset.
fn bind_state_styles(
    ctx: &mut CompilationContext<'_>,
    component: &str,
    link: &ChainLink<'_>,
    out: &mut Vec<Stmt>,
) {
    let Some(Expr::Object(states)) = link.args.first() else {
        ctx.sink.error(
            DiagnosticCode::StateStylesNotObject,
            "stateStyles requires an object literal of visual states",
            link.span,
        );
        return;
    };

    for state in &states.props {
        out.push(make::expr_stmt(make::method_call(
            "ViewStackProcessor",
            "visualState",
            vec![make::str_lit(state.key.name.clone())],
        )));
        bind_state_block(ctx, component, &state.value, link.span, out);
    }
    out.push(make::expr_stmt(make::method_call(
        "ViewStackProcessor",
        "visualState",
        vec![],
    )));
}

/// Lowers one visual state's attribute block: either an inline object of
/// attribute values or a reference to a named style block.
fn bind_state_block(
    ctx: &mut CompilationContext<'_>,
    component: &str,
    value: &Expr,
    span: Span,
    out: &mut Vec<Stmt>,
) {
    match value {
        Expr::Object(ObjectLit { props, .. }) => {
            for prop in props {
                out.push(make::expr_stmt(make::method_call(
                    component,
                    prop.key.name.clone(),
                    vec![prop.value.clone()],
                )));
            }
        }
        Expr::Ident(ident) if is_style_reference(ctx, component, &ident.name) => {
            let name = ident.name.clone();
            splice_style_block(ctx, component, &name, span, out);
        }
        _ => ctx.sink.error(
            DiagnosticCode::StateStylesNotObject,
            "visual state must be an object literal or a named style block",
            span,
        ),
    }
}

/// Emits a direct `Component.attr(args)` call, rewriting two-way-bound
/// and builder-valued arguments.
fn emit_plain_attr(
    ctx: &mut CompilationContext<'_>,
    component: &str,
    link: &ChainLink<'_>,
    out: &mut Vec<Stmt>,
) {
    let args: Vec<Expr> = link.args.iter().map(|a| rewrite_arg(ctx, a)).collect();
    out.push(make::expr_stmt(make::method_call(
        component,
        link.name,
        args,
    )));
}

/// Rewrites a single attribute argument:
/// - `$$(expr)` becomes `{ value: expr, changeEvent: newValue => expr = newValue }`
///   so the runtime can propagate edits back to the bound field
/// - a builder reference becomes a zero-argument closure invoking it
fn rewrite_arg(ctx: &CompilationContext<'_>, arg: &Expr) -> Expr {
    match arg {
        Expr::TwoWayBind(inner, _) => {
            let value = inner.as_ref().clone();
            let change = make::arrow(
                vec!["newValue"],
                vec![make::assign_stmt(
                    inner.as_ref().clone(),
                    make::ident("newValue"),
                )],
            );
            make::object(vec![("value", value), ("changeEvent", change)])
        }
        Expr::Ident(ident) if ctx.builders.is_builder(&ident.name) => make::arrow(
            vec![],
            vec![make::expr_stmt(make::call(arg.clone(), vec![]))],
        ),
        Expr::Member(member) => {
            if let Some(field) = arg.as_this_member() {
                let is_builder_method = ctx
                    .components
                    .current_struct()
                    .is_some_and(|s| ctx.builders.is_builder_method(s, field));
                if is_builder_method {
                    return make::arrow(
                        vec![],
                        vec![make::expr_stmt(make::this_call(
                            member.property.name.clone(),
                            vec![],
                        ))],
                    );
                }
            }
            arg.clone()
        }
        _ => arg.clone(),
    }
}

// =============================================================================
// Tests
// =============================================================================
