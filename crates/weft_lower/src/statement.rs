//! Component-tree statement processing.
//!
//! The recursive block rewriter at the center of the pass: classifies
//! each statement of a build block and dispatches to the built-in
//! element, custom component, loop, conditional, or builder paths. Two
//! emission strategies are supported. Full-rebuild mode emits every
//! create/attribute/pop call directly in sequence. Partial-update mode
//! wraps each creation site in a registration closure taking an element
//! id and an is-initial-render flag, so later re-renders touch only the
//! nodes whose bound state changed.

use weft_foundation::{DiagnosticCode, Span};
use weft_syntax::ast::{CallExpr, ElseArm, Expr, IfStmt, Stmt, UnOp};
use weft_syntax::make;

use crate::binder::{self, ChainLink, ChainSplit};
use crate::context::CompilationContext;
use crate::instantiate;

// =============================================================================
// Block lowering
// =============================================================================

/// Lowers one block of UI-tree statements into imperative runtime calls.
///
/// `parent` names the enclosing built-in element, when there is one; it
/// drives child-type restrictions and the laziness decision for
/// `LazyForEach`.
pub fn lower_block(
    ctx: &mut CompilationContext<'_>,
    stmts: &[Stmt],
    parent: Option<&str>,
    out: &mut Vec<Stmt>,
) {
    let single_child = parent.is_some_and(|p| ctx.registry.is_single_child(p));
    let mut children_seen = 0u32;

    for stmt in stmts {
        let is_component = lower_statement(ctx, stmt, parent, out);
        if is_component {
            children_seen += 1;
            if single_child && children_seen > 1 {
                ctx.sink.error(
                    DiagnosticCode::InvalidComponentStatement,
                    format!(
                        "'{}' accepts a single child; extra children are not permitted",
                        parent.unwrap_or_default()
                    ),
                    stmt.span(),
                );
            }
        }
    }
}

/// Lowers one statement. Returns true if the statement produced a
/// component child (for single-child containers).
fn lower_statement(
    ctx: &mut CompilationContext<'_>,
    stmt: &Stmt,
    parent: Option<&str>,
    out: &mut Vec<Stmt>,
) -> bool {
    match stmt {
        Stmt::If(if_stmt) => {
            lower_if(ctx, if_stmt, parent, out);
            true
        }
        Stmt::Block(stmts, _) => {
            lower_block(ctx, stmts, parent, out);
            false
        }
        Stmt::Expr(expr) => lower_expr_statement(ctx, expr, parent, out),
        Stmt::VarDecl(_) | Stmt::Return(..) => {
            ctx.sink.error(
                DiagnosticCode::InvalidComponentStatement,
                "statement does not meet UI component syntax",
                stmt.span(),
            );
            false
        }
    }
}

fn lower_expr_statement(
    ctx: &mut CompilationContext<'_>,
    expr: &Expr,
    parent: Option<&str>,
    out: &mut Vec<Stmt>,
) -> bool {
    let (root, links) = match binder::split_chain(expr) {
        ChainSplit::Chain { root, links } => (root, links),
        ChainSplit::BareMember(span) => {
            ctx.sink.error(
                DiagnosticCode::MalformedAttribute,
                "attribute access must be a call",
                span,
            );
            return false;
        }
        ChainSplit::NotAChain => {
            ctx.sink.error(
                DiagnosticCode::InvalidComponentStatement,
                "statement does not meet UI component syntax",
                expr.span(),
            );
            return false;
        }
    };

    // A call rooted on this: a builder method or a builder-param field.
    if let Expr::Member(member) = root.callee.as_ref() {
        let method = member.property.name.clone();
        let current = ctx.components.current_struct().map(str::to_owned);
        if let Some(current) = current {
            if ctx.builders.is_builder_method(&current, &method) {
                lower_builder_invocation(ctx, make::this_member(&method), root, out);
                return true;
            }
            if ctx.collections.kind_of(&current, &method)
                == Some(crate::decorator::DecoratorKind::BuilderParam)
            {
                lower_builder_invocation(ctx, make::this_member(&method), root, out);
                return true;
            }
        }
        ctx.sink.error(
            DiagnosticCode::InvalidComponentStatement,
            format!("'{method}' is not a builder of this component"),
            root.span,
        );
        return false;
    }

    let Some(name) = root.callee.as_ident() else {
        ctx.sink.error(
            DiagnosticCode::InvalidComponentStatement,
            "statement does not meet UI component syntax",
            expr.span(),
        );
        return false;
    };
    let name = name.to_string();

    // Custom components shadow built-in elements of the same name.
    if ctx.components.is_custom(&name) {
        instantiate::lower_custom_component(ctx, &name, root, &links, out);
        return true;
    }
    if name == "ForEach" || name == "LazyForEach" {
        lower_foreach(ctx, name == "LazyForEach", root, parent, out);
        return true;
    }
    if ctx.registry.is_builtin(&name) {
        lower_element(ctx, &name, root, &links, parent, out);
        return true;
    }
    if ctx.builders.is_builder(&name) {
        lower_builder_invocation(ctx, make::ident(&name), root, out);
        return true;
    }
    if ctx.registry.is_universal_attr(&name) {
        // Belongs to the previous sibling's attribute chain; already
        // consumed by that sibling's binder pass.
        return false;
    }
    if name.starts_with(|c: char| c.is_ascii_lowercase()) {
        // Plain function call: neither styling nor component syntax.
        out.push(Stmt::Expr(expr.clone()));
        return false;
    }

    ctx.sink.error(
        DiagnosticCode::InvalidComponentStatement,
        format!("'{name}' does not meet UI component syntax"),
        root.span,
    );
    false
}

// =============================================================================
// Built-in elements
// =============================================================================

fn lower_element(
    ctx: &mut CompilationContext<'_>,
    name: &str,
    root: &CallExpr,
    links: &[ChainLink<'_>],
    parent: Option<&str>,
    out: &mut Vec<Stmt>,
) {
    if let Some(parent) = parent {
        if let Some(allowed) = ctx.registry.allowed_children(parent) {
            if !allowed.contains(&name) {
                ctx.sink.error(
                    DiagnosticCode::InvalidComponentStatement,
                    format!("'{parent}' permits only {allowed:?} children, found '{name}'"),
                    root.span,
                );
            }
        }
    }

    let children = root.body.as_deref().unwrap_or_default();
    if ctx.registry.is_atomic(name) && !children.is_empty() {
        ctx.sink.error(
            DiagnosticCode::InvalidComponentStatement,
            format!("'{name}' is atomic and may not have children"),
            root.span,
        );
    }
    let needs_pop = ctx.registry.needs_pop(name);

    if ctx.config.partial_update {
        let mut site = vec![make::expr_stmt(make::method_call(
            name,
            "create",
            root.args.clone(),
        ))];
        binder::bind_attributes(ctx, name, links, &mut site);
        if needs_pop {
            site.push(pop_unless_rerender(name));
        }
        out.push(observe_component_creation(site));

        if !ctx.registry.is_atomic(name) {
            lower_block(ctx, children, Some(name), out);
        }
        if needs_pop {
            out.push(make::expr_stmt(make::method_call(name, "pop", vec![])));
        }
    } else {
        out.push(make::expr_stmt(make::method_call(
            name,
            "create",
            root.args.clone(),
        )));
        if !ctx.registry.is_atomic(name) {
            lower_block(ctx, children, Some(name), out);
        }
        binder::bind_attributes(ctx, name, links, out);
        if needs_pop {
            out.push(make::expr_stmt(make::method_call(name, "pop", vec![])));
        }
    }
}

// =============================================================================
// Conditionals
// =============================================================================

fn lower_if(
    ctx: &mut CompilationContext<'_>,
    if_stmt: &IfStmt,
    parent: Option<&str>,
    out: &mut Vec<Stmt>,
) {
    if ctx.config.partial_update {
        let site = vec![
            make::expr_stmt(make::method_call("If", "create", vec![])),
            pop_unless_rerender("If"),
        ];
        out.push(observe_component_creation(site));

        let mut next_branch = 0u32;
        out.push(Stmt::If(rebuild_partial_if(
            ctx,
            if_stmt,
            parent,
            &mut next_branch,
        )));
        out.push(make::expr_stmt(make::method_call("If", "pop", vec![])));
    } else {
        out.push(make::expr_stmt(make::method_call("If", "create", vec![])));
        out.push(Stmt::If(rebuild_full_if(ctx, if_stmt, parent)));
        out.push(make::expr_stmt(make::method_call("If", "pop", vec![])));
    }
}

/// Rebuilds one conditional arm chain with each branch's block wrapped
/// in a branch-update closure carrying a sequential branch id.
///
/// Ids are assigned 0, 1, 2... in source order; when the source omits a
/// final `else`, an empty branch is synthesized so the site still has a
/// stable "no branch taken" id.
fn rebuild_partial_if(
    ctx: &mut CompilationContext<'_>,
    if_stmt: &IfStmt,
    parent: Option<&str>,
    next_branch: &mut u32,
) -> IfStmt {
    let branch_id = *next_branch;
    *next_branch += 1;

    let mut lowered = Vec::new();
    lower_block(ctx, &if_stmt.then_branch, parent, &mut lowered);
    let then_branch = vec![branch_update(branch_id, lowered)];

    let else_branch = match &if_stmt.else_branch {
        Some(ElseArm::ElseIf(inner)) => Some(ElseArm::ElseIf(Box::new(rebuild_partial_if(
            ctx,
            inner,
            parent,
            next_branch,
        )))),
        Some(ElseArm::Else(stmts, span)) => {
            let branch_id = *next_branch;
            *next_branch += 1;
            let mut lowered = Vec::new();
            lower_block(ctx, stmts, parent, &mut lowered);
            Some(ElseArm::Else(
                vec![branch_update(branch_id, lowered)],
                *span,
            ))
        }
        None => {
            let branch_id = *next_branch;
            *next_branch += 1;
            Some(ElseArm::Else(
                vec![branch_update(branch_id, Vec::new())],
                Span::default(),
            ))
        }
    };

    IfStmt {
        cond: if_stmt.cond.clone(),
        then_branch,
        else_branch,
        span: if_stmt.span,
    }
}

fn branch_update(branch_id: u32, body: Vec<Stmt>) -> Stmt {
    make::expr_stmt(make::this_call(
        "ifElseBranchUpdateFunction",
        vec![make::num(f64::from(branch_id)), make::arrow(vec![], body)],
    ))
}

fn rebuild_full_if(
    ctx: &mut CompilationContext<'_>,
    if_stmt: &IfStmt,
    parent: Option<&str>,
) -> IfStmt {
    let mut then_branch = Vec::new();
    lower_block(ctx, &if_stmt.then_branch, parent, &mut then_branch);

    let else_branch = match &if_stmt.else_branch {
        Some(ElseArm::ElseIf(inner)) => Some(ElseArm::ElseIf(Box::new(rebuild_full_if(
            ctx, inner, parent,
        )))),
        Some(ElseArm::Else(stmts, span)) => {
            let mut lowered = Vec::new();
            lower_block(ctx, stmts, parent, &mut lowered);
            Some(ElseArm::Else(lowered, *span))
        }
        None => None,
    };

    IfStmt {
        cond: if_stmt.cond.clone(),
        then_branch,
        else_branch,
        span: if_stmt.span,
    }
}

// =============================================================================
// Loops
// =============================================================================

const ITEM_GEN_NAME: &str = "forEachItemGenFunction";
const ITEM_ID_NAME: &str = "forEachItemIdFunc";
const LAZY_FLAG_NAME: &str = "isLazyCreate";

fn lower_foreach(
    ctx: &mut CompilationContext<'_>,
    lazy: bool,
    root: &CallExpr,
    parent: Option<&str>,
    out: &mut Vec<Stmt>,
) {
    let node = if lazy { "LazyForEach" } else { "ForEach" };
    let (Some(source), Some(generator)) = (root.args.first(), root.args.get(1)) else {
        ctx.sink.error(
            DiagnosticCode::MalformedForEach,
            format!("'{node}' requires a data source and an item generator"),
            root.span,
        );
        return;
    };
    let Some(generator) = generator.as_arrow() else {
        ctx.sink.error(
            DiagnosticCode::MalformedForEach,
            format!("'{node}' item generator must be a lambda"),
            root.span,
        );
        return;
    };

    // Hoist the item generator into a named helper in the enclosing
    // scope, with its body lowered as a UI-tree block.
    let mut gen_body = Vec::new();
    lower_block(ctx, &generator.body, parent, &mut gen_body);
    let gen_params: Vec<&str> = generator.params.iter().map(|p| p.name.as_str()).collect();
    let gen_decl = make::const_decl(ITEM_GEN_NAME, make::arrow(gen_params, gen_body));
    let key_decl = root
        .args
        .get(2)
        .map(|key| make::const_decl(ITEM_ID_NAME, key.clone()));

    if ctx.config.partial_update {
        let mut site = vec![make::expr_stmt(make::method_call(node, "create", vec![]))];
        site.push(gen_decl);
        let has_key = key_decl.is_some();
        if let Some(key_decl) = key_decl {
            site.push(key_decl);
        }
        if lazy {
            site.insert(
                0,
                make::const_decl(LAZY_FLAG_NAME, make::bool_lit(is_virtualizing(ctx, parent))),
            );
        }
        let mut update_args = vec![
            make::ident("elmtId"),
            source.clone(),
            make::ident(ITEM_GEN_NAME),
        ];
        if has_key {
            update_args.push(make::ident(ITEM_ID_NAME));
        }
        if lazy {
            update_args.push(make::ident(LAZY_FLAG_NAME));
        }
        let update = if lazy {
            "lazyForEachUpdateFunction"
        } else {
            "forEachUpdateFunction"
        };
        site.push(make::expr_stmt(make::this_call(update, update_args)));
        site.push(pop_unless_rerender(node));
        out.push(observe_component_creation(site));
        out.push(make::expr_stmt(make::method_call(node, "pop", vec![])));
    } else {
        // Suppress reentrant state invalidation while children build.
        out.push(rendering_guard(true));
        out.push(gen_decl);
        let has_key = key_decl.is_some();
        if let Some(key_decl) = key_decl {
            out.push(key_decl);
        }
        let site_id = make::str_lit(ctx.ids.next_id().to_string());
        let mut create_args = vec![site_id, make::this()];
        if lazy {
            out.push(make::const_decl(
                LAZY_FLAG_NAME,
                make::bool_lit(is_virtualizing(ctx, parent)),
            ));
            create_args.push(source.clone());
        } else {
            create_args.push(make::method_call(
                "ObservedObject",
                "GetRawObject",
                vec![source.clone()],
            ));
        }
        create_args.push(make::ident(ITEM_GEN_NAME));
        if has_key {
            create_args.push(make::ident(ITEM_ID_NAME));
        }
        if lazy {
            create_args.push(make::ident(LAZY_FLAG_NAME));
        }
        out.push(make::expr_stmt(make::method_call(node, "create", create_args)));
        out.push(make::expr_stmt(make::method_call(node, "pop", vec![])));
        out.push(rendering_guard(false));
    }
}

fn is_virtualizing(ctx: &CompilationContext<'_>, parent: Option<&str>) -> bool {
    parent.is_some_and(|p| ctx.registry.is_virtualizing(p))
}

fn rendering_guard(active: bool) -> Stmt {
    make::assign_stmt(
        make::this_member("isRenderingInProgress"),
        make::bool_lit(active),
    )
}

// =============================================================================
// Builder invocations
// =============================================================================

/// Lowers a builder-function or builder-param invocation: the implicit
/// parent context goes in as a trailing argument, and partial-update
/// mode additionally calls through a bound method reference.
fn lower_builder_invocation(
    ctx: &mut CompilationContext<'_>,
    callee: Expr,
    root: &CallExpr,
    out: &mut Vec<Stmt>,
) {
    let mut args = root.args.clone();
    args.push(make::this());

    let callee = if ctx.config.partial_update {
        make::call(make::member(callee, "bind"), vec![make::this()])
    } else {
        callee
    };
    out.push(make::expr_stmt(make::call(callee, args)));
}

// =============================================================================
// Partial-update plumbing
// =============================================================================

/// Wraps one creation site in the registration closure the runtime uses
/// to address the site by element id on re-render.
pub(crate) fn observe_component_creation(site: Vec<Stmt>) -> Stmt {
    let mut body = vec![make::expr_stmt(make::method_call(
        "ViewStackProcessor",
        "StartGetAccessRecordingFor",
        vec![make::ident("elmtId")],
    ))];
    body.extend(site);
    body.push(make::expr_stmt(make::method_call(
        "ViewStackProcessor",
        "StopGetAccessRecording",
        vec![],
    )));
    make::expr_stmt(make::this_call(
        "observeComponentCreation",
        vec![make::arrow(vec!["elmtId", "isInitialRender"], body)],
    ))
}

/// `if (!isInitialRender) { Name.pop(); }` inside a creation closure:
/// re-renders rebind attributes without re-pushing the node, so the
/// stack must be balanced locally.
pub(crate) fn pop_unless_rerender(name: &str) -> Stmt {
    Stmt::If(IfStmt {
        cond: make::unary(UnOp::Not, make::ident("isInitialRender")),
        then_branch: vec![make::expr_stmt(make::method_call(name, "pop", vec![]))],
        else_branch: None,
        span: Span::default(),
    })
}

// =============================================================================
// Tests
// =============================================================================
