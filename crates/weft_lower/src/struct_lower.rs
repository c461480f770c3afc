//! Class and member decorator lowering.
//!
//! Rewrites a component struct into a runtime class: each decorated
//! field becomes a private backing field holding a reactive wrapper plus
//! a get/set accessor pair, the constructor wires the wrappers up, and
//! the struct-level update/reset/purge/teardown methods are synthesized
//! from the per-field contributions. The `build` method body is lowered
//! through the statement processor into `render` (full rebuild) or
//! `initialRender` (partial update).

use weft_foundation::{DiagnosticCode, Span};
use weft_syntax::ast::{
    BinOp, ClassDecl, ClassField, ClassMember, Constructor, Decorator, Expr, FieldDecl, IfStmt,
    MethodDecl, Stmt, StructDecl,
};
use weft_syntax::make;

use crate::binder::{self, ChainSplit};
use crate::context::CompilationContext;
use crate::decorator::{DecoratorKind, DefaultRule};
use crate::statement;

/// Prefix of the lowered backing field holding the reactive wrapper.
const BACKING_PREFIX: &str = "__";

// =============================================================================
// Per-field accumulation
// =============================================================================

/// Pieces accumulated while lowering one field, assembled into the
/// class afterwards and discarded.
#[derive(Default)]
struct UpdateResult {
    /// Backing or plain field declarations.
    fields: Vec<ClassMember>,
    /// Accessor pair, where the kind gets one.
    accessors: Vec<ClassMember>,
    /// Constructor statements wiring the wrapper.
    ctor: Vec<Stmt>,
    /// Contribution to the parameter-update method.
    param_update: Vec<Stmt>,
    /// Contribution to the one-way state refresh on re-render.
    state_reset: Vec<Stmt>,
    /// Contribution to dependency purge on element removal.
    purge: Vec<Stmt>,
    /// Contribution to field teardown on delete.
    teardown: Vec<Stmt>,
}

// =============================================================================
// Struct lowering
// =============================================================================

/// Lowers one component struct into its runtime class.
pub fn lower_struct(ctx: &mut CompilationContext<'_>, decl: &StructDecl) -> ClassDecl {
    let name = decl.name.name.clone();
    ctx.components.enter_struct(&name);
    let partial = ctx.config.partial_update;

    let mut results = Vec::with_capacity(decl.fields.len());
    for field in &decl.fields {
        results.push(lower_field(ctx, decl, field));
    }

    let mut builds = decl.methods_named("build");
    let build = builds.next();
    if build.is_none() {
        ctx.sink.error(
            DiagnosticCode::MissingBuildMethod,
            format!("'{name}' declares no build method"),
            decl.span,
        );
    }
    for extra in builds {
        ctx.sink.error(
            DiagnosticCode::DuplicateBuildMethod,
            format!("'{name}' declares more than one build method"),
            extra.span,
        );
    }
    let build_body: &[Stmt] = build.map_or(&[], |m| m.body.as_slice());
    validate_root(ctx, decl, build_body);

    let mut render_body = Vec::new();
    statement::lower_block(ctx, build_body, None, &mut render_body);

    // Assembly: fields, constructor, synthesized methods, accessors,
    // carried-over methods, then the render entry point.
    let mut members = Vec::new();
    for result in &results {
        members.extend(result.fields.iter().cloned());
    }
    members.push(ClassMember::Constructor(constructor(partial, &results)));

    if partial {
        members.push(method(
            "setInitiallyProvidedValue",
            vec!["params"],
            collect(&results, |r| &r.param_update),
        ));
        members.push(method(
            "updateStateVars",
            vec!["params"],
            collect(&results, |r| &r.state_reset),
        ));
    } else {
        members.push(method(
            "updateWithValueParams",
            vec!["params"],
            collect(&results, |r| &r.param_update),
        ));
    }
    members.push(method(
        "purgeVariableDependenciesOnElmtId",
        vec!["rmElmtId"],
        collect(&results, |r| &r.purge),
    ));
    members.push(method(
        "aboutToBeDeleted",
        vec![],
        about_to_be_deleted(partial, &results),
    ));

    for result in &results {
        members.extend(result.accessors.iter().cloned());
    }

    for m in &decl.methods {
        if m.name.name == "build" {
            continue;
        }
        if m.decorators.iter().any(|d| d.name == "Styles") {
            // Spliced into attribute chains at compile time; nothing of
            // it survives into the class.
            continue;
        }
        if m.decorators.iter().any(|d| d.name == "Builder") {
            let mut body = Vec::new();
            statement::lower_block(ctx, &m.body, None, &mut body);
            members.push(ClassMember::Method(MethodDecl {
                name: m.name.clone(),
                decorators: vec![],
                params: m.params.clone(),
                body,
                span: m.span,
            }));
        } else {
            members.push(ClassMember::Method(m.clone()));
        }
    }

    if partial {
        members.push(method("initialRender", vec![], render_body));
        members.push(method(
            "rerender",
            vec![],
            vec![make::expr_stmt(make::this_call(
                "updateDirtyElements",
                vec![],
            ))],
        ));
    } else {
        members.push(method("render", vec![], render_body));
    }

    ctx.components.leave_struct();

    ClassDecl {
        name: decl.name.clone(),
        extends: Some(if partial { "ViewPU" } else { "View" }.to_string()),
        members,
        span: decl.span,
    }
}

/// The build method of an entry component must have a single container
/// root; other components simply may not have multiple roots.
fn validate_root(ctx: &mut CompilationContext<'_>, decl: &StructDecl, body: &[Stmt]) {
    if body.len() > 1 {
        ctx.sink.error(
            DiagnosticCode::MalformedRoot,
            "build method must have a single root component",
            body[1].span(),
        );
    }
    if !decl.has_decorator("Entry") {
        return;
    }
    match body.first() {
        None => ctx.sink.error(
            DiagnosticCode::MalformedRoot,
            "entry component requires a root container",
            decl.span,
        ),
        Some(Stmt::Expr(expr)) => {
            if let ChainSplit::Chain { root, .. } = binder::split_chain(expr) {
                if let Some(head) = root.callee.as_ident() {
                    if ctx.registry.is_atomic(head) {
                        ctx.sink.error(
                            DiagnosticCode::MalformedRoot,
                            format!("entry component root '{head}' must be a container"),
                            root.span,
                        );
                    }
                }
            }
        }
        Some(_) => {}
    }
}

// =============================================================================
// Field lowering
// =============================================================================

fn lower_field(
    ctx: &mut CompilationContext<'_>,
    decl: &StructDecl,
    field: &FieldDecl,
) -> UpdateResult {
    let partial = ctx.config.partial_update;
    let fname = field.name.name.clone();

    let kinds: Vec<DecoratorKind> = field
        .decorators
        .iter()
        .filter_map(|d| DecoratorKind::from_name(&d.name))
        .collect();
    if kinds.len() > 1 {
        ctx.sink.error(
            DiagnosticCode::MultipleReactiveDecorators,
            format!("'{fname}' carries more than one reactive decorator"),
            field.span,
        );
    }
    let kind = kinds.first().copied().unwrap_or(DecoratorKind::Regular);
    let has_require = field.has_decorator("Require");

    if let Some(watch) = field.decorator("Watch") {
        if kind == DecoratorKind::Regular {
            ctx.sink.error(
                DiagnosticCode::WatchWithoutDecorator,
                format!("'@Watch' on '{fname}' requires a reactive decorator"),
                watch.span,
            );
        }
        match watch.string_arg() {
            Some(handler) if decl.methods.iter().any(|m| m.name.name == handler) => {}
            Some(handler) => ctx.sink.error(
                DiagnosticCode::WatchUnknownMethod,
                format!("'@Watch' references unknown method '{handler}'"),
                watch.span,
            ),
            None => ctx.sink.error(
                DiagnosticCode::WatchUnknownMethod,
                "'@Watch' requires a method name argument",
                watch.span,
            ),
        }
    }

    match kind.default_rule() {
        DefaultRule::Required if field.init.is_none() => ctx.sink.error(
            DiagnosticCode::MissingDefaultValue,
            format!("'@{}' property '{fname}' requires a default value", kind.name()),
            field.span,
        ),
        DefaultRule::Forbidden if field.init.is_some() && !has_require => ctx.sink.error(
            DiagnosticCode::ForbiddenDefaultValue,
            format!("'@{}' property '{fname}' may not have a default value", kind.name()),
            field.span,
        ),
        _ => {}
    }

    if kind.is_reactive() && ctx.oracle.is_forbidden_reactive(&field.ty) {
        ctx.sink.error(
            DiagnosticCode::ForbiddenStateType,
            format!("type '{}' cannot carry '@{}'", field.ty.name, kind.name()),
            field.span,
        );
    }

    // Best-effort from here: the field is still lowered past violations.
    if !kind.is_reactive() {
        return lower_plain_field(field);
    }

    let class = ctx.oracle.classify(&field.ty);
    let wrapper = kind.wrapper(class, partial);
    let backing = format!("{BACKING_PREFIX}{fname}");
    let key = field
        .decorator(kind.name())
        .and_then(Decorator::string_arg)
        .unwrap_or(&fname)
        .to_string();

    let mut result = UpdateResult::default();
    result.fields.push(ClassMember::Field(ClassField {
        name: make::id(&backing),
        init: None,
        is_private: true,
        span: field.span,
    }));

    let default = field
        .init
        .clone()
        .unwrap_or_else(|| make::ident("undefined"));
    let param_ref = make::member(make::ident("params"), fname.clone());
    let name_lit = make::str_lit(fname.clone());

    let init_expr = match kind {
        DecoratorKind::State | DecoratorKind::Provide => {
            make::new_expr(wrapper, vec![default, make::this(), name_lit])
        }
        DecoratorKind::Consume => {
            make::this_call("initializeConsume", vec![make::str_lit(key.clone()), name_lit])
        }
        DecoratorKind::Link | DecoratorKind::Prop | DecoratorKind::ObjectLink => {
            make::new_expr(wrapper, vec![param_ref.clone(), make::this(), name_lit])
        }
        DecoratorKind::StorageLink => make::method_call(
            "AppStorage",
            "SetAndLink",
            vec![make::str_lit(key.clone()), default, make::this()],
        ),
        DecoratorKind::StorageProp => make::method_call(
            "AppStorage",
            "SetAndProp",
            vec![make::str_lit(key.clone()), default, make::this()],
        ),
        DecoratorKind::LocalStorageLink => make::call(
            make::member(make::this_member("localStorage_"), "setAndLink"),
            vec![make::str_lit(key.clone()), default, make::this()],
        ),
        DecoratorKind::LocalStorageProp => make::call(
            make::member(make::this_member("localStorage_"), "setAndProp"),
            vec![make::str_lit(key.clone()), default, make::this()],
        ),
        DecoratorKind::BuilderParam | DecoratorKind::Regular => unreachable!(),
    };
    result
        .ctor
        .push(make::assign_stmt(make::this_member(&backing), init_expr));
    if kind == DecoratorKind::Provide {
        result.ctor.push(make::expr_stmt(make::this_call(
            "addProvidedVar",
            vec![make::str_lit(key), make::this_member(&backing)],
        )));
    }
    if let Some(handler) = field.decorator("Watch").and_then(Decorator::string_arg) {
        result.ctor.push(make::expr_stmt(make::this_call(
            "declareWatch",
            vec![make::str_lit(fname.clone()), make::this_member(handler)],
        )));
    }

    result.accessors.push(ClassMember::Getter {
        name: make::id(&fname),
        body: vec![make::return_stmt(Some(make::call(
            make::member(make::this_member(&backing), "get"),
            vec![],
        )))],
        span: field.span,
    });
    if kind.writable() {
        result.accessors.push(ClassMember::Setter {
            name: make::id(&fname),
            param: make::id("newValue"),
            body: vec![make::expr_stmt(make::call(
                make::member(make::this_member(&backing), "set"),
                vec![make::ident("newValue")],
            ))],
            span: field.span,
        });
    }

    if matches!(
        kind,
        DecoratorKind::State | DecoratorKind::Prop | DecoratorKind::Provide
    ) {
        result.param_update.push(guarded_param_assign(&fname));
    }
    if matches!(
        kind,
        DecoratorKind::Prop | DecoratorKind::StorageProp | DecoratorKind::LocalStorageProp
    ) && partial
    {
        result.state_reset.push(make::expr_stmt(make::call(
            make::member(make::this_member(&backing), "reset"),
            vec![param_ref],
        )));
    }

    result.purge.push(make::expr_stmt(make::call(
        make::member(make::this_member(&backing), "purgeDependencyOnElmtId"),
        vec![make::ident("rmElmtId")],
    )));
    result.teardown.push(make::expr_stmt(make::call(
        make::member(make::this_member(&backing), "aboutToBeDeleted"),
        vec![],
    )));

    result
}

/// Regular and builder-param fields keep their name and default; the
/// parent's value lands through the parameter-update method.
fn lower_plain_field(field: &FieldDecl) -> UpdateResult {
    let mut result = UpdateResult::default();
    result.fields.push(ClassMember::Field(ClassField {
        name: field.name.clone(),
        init: field.init.clone(),
        is_private: field.is_private,
        span: field.span,
    }));
    result.param_update.push(guarded_param_assign(&field.name.name));
    result
}

/// `if (params.name != undefined) { this.name = params.name; }`
fn guarded_param_assign(fname: &str) -> Stmt {
    Stmt::If(IfStmt {
        cond: make::binary(
            BinOp::Ne,
            make::member(make::ident("params"), fname),
            make::ident("undefined"),
        ),
        then_branch: vec![make::assign_stmt(
            make::this_member(fname),
            make::member(make::ident("params"), fname),
        )],
        else_branch: None,
        span: Span::default(),
    })
}

// =============================================================================
// Class assembly
// =============================================================================

fn constructor(partial: bool, results: &[UpdateResult]) -> Constructor {
    let (params, super_args, finish): (Vec<&str>, Vec<Expr>, Stmt) = if partial {
        (
            vec!["parent", "params", "__localStorage", "elmtId"],
            vec![
                make::ident("parent"),
                make::ident("__localStorage"),
                make::ident("elmtId"),
            ],
            make::expr_stmt(make::this_call(
                "setInitiallyProvidedValue",
                vec![make::ident("params")],
            )),
        )
    } else {
        (
            vec!["compilerAssignedUniqueChildId", "parent", "params"],
            vec![
                make::ident("compilerAssignedUniqueChildId"),
                make::ident("parent"),
            ],
            make::expr_stmt(make::this_call(
                "updateWithValueParams",
                vec![make::ident("params")],
            )),
        )
    };

    let mut body = vec![make::expr_stmt(make::call(make::ident("super"), super_args))];
    for result in results {
        body.extend(result.ctor.iter().cloned());
    }
    body.push(finish);

    Constructor {
        params: params.into_iter().map(make::id).collect(),
        body,
        span: Span::default(),
    }
}

fn about_to_be_deleted(partial: bool, results: &[UpdateResult]) -> Vec<Stmt> {
    let mut body = collect(results, |r| &r.teardown);
    body.push(make::expr_stmt(make::call(
        make::member(
            make::method_call("SubscriberManager", "Get", vec![]),
            "delete",
        ),
        vec![make::this_call("id", vec![])],
    )));
    if partial {
        body.push(make::expr_stmt(make::this_call(
            "aboutToBeDeletedInternal",
            vec![],
        )));
    }
    body
}

fn method(name: &str, params: Vec<&str>, body: Vec<Stmt>) -> ClassMember {
    ClassMember::Method(MethodDecl {
        name: make::id(name),
        decorators: vec![],
        params: params.into_iter().map(make::id).collect(),
        body,
        span: Span::default(),
    })
}

fn collect<'a>(
    results: &'a [UpdateResult],
    pick: impl Fn(&'a UpdateResult) -> &'a Vec<Stmt>,
) -> Vec<Stmt> {
    results.iter().flat_map(|r| pick(r).iter().cloned()).collect()
}

// =============================================================================
// Tests
// =============================================================================
