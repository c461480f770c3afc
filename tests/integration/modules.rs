//! Components imported from other files, resolved through a module table.

use weft_foundation::{LowerConfig, Span};
use weft_lower::{lower_source_file, DefaultOracle, NoModules, TableResolver};
use weft_syntax::ast::{
    Decorator, FieldDecl, Ident, ImportDecl, Item, MethodDecl, SourceFile, Stmt, StructDecl,
    TypeAnnotation,
};
use weft_syntax::make;
use weft_syntax::pretty::pretty_print_file;

fn build_method(body: Vec<Stmt>) -> MethodDecl {
    MethodDecl {
        name: Ident::new("build", Span::default()),
        decorators: vec![],
        params: vec![],
        body,
        span: Span::default(),
    }
}

fn component(name: &str, decorators: Vec<&str>, fields: Vec<FieldDecl>, build: MethodDecl) -> Item {
    Item::Struct(StructDecl {
        name: Ident::new(name, Span::default()),
        decorators: decorators
            .into_iter()
            .map(|d| Decorator::new(d, Span::default()))
            .collect(),
        fields,
        methods: vec![build],
        span: Span::default(),
    })
}

fn import(names: Vec<&str>, specifier: &str) -> Item {
    Item::Import(ImportDecl {
        names: names
            .into_iter()
            .map(|n| Ident::new(n, Span::default()))
            .collect(),
        specifier: specifier.to_string(),
        span: Span::default(),
    })
}

fn empty_column() -> Stmt {
    make::expr_stmt(make::call_with_body(make::ident("Column"), vec![], vec![]))
}

/// `child.weft`: a plain component with one `@Prop label`.
fn child_module() -> SourceFile {
    let label = FieldDecl {
        name: Ident::new("label", Span::default()),
        decorators: vec![Decorator::new("Prop", Span::default())],
        ty: TypeAnnotation::new("string", Span::default()),
        init: None,
        is_private: false,
        span: Span::default(),
    };
    SourceFile::new(
        "child.weft",
        vec![component(
            "Child",
            vec!["Component"],
            vec![label],
            build_method(vec![empty_column()]),
        )],
    )
}

/// `app.weft`: the entry page importing and instantiating `Child`.
fn app_file() -> SourceFile {
    let instantiation = make::expr_stmt(make::call(
        make::ident("Child"),
        vec![make::object(vec![("label", make::str_lit("hi"))])],
    ));
    SourceFile::new(
        "app.weft",
        vec![
            import(vec!["Child"], "./child"),
            component(
                "Parent",
                vec!["Entry", "Component"],
                vec![],
                build_method(vec![make::expr_stmt(make::call_with_body(
                    make::ident("Column"),
                    vec![],
                    vec![instantiation],
                ))]),
            ),
        ],
    )
}

fn app_resolver() -> TableResolver {
    let mut resolver = TableResolver::new();
    resolver.insert("./child", child_module());
    resolver
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn imported_components_resolve_through_the_table() {
    let oracle = DefaultOracle;
    let lowered = lower_source_file(
        &app_file(),
        &app_resolver(),
        &oracle,
        LowerConfig::full_rebuild(),
    );
    assert!(!lowered.has_errors(), "{:?}", lowered.diagnostics);

    let text = pretty_print_file(&lowered.file);
    assert!(text.contains("let earlierCreatedChild_0 = this.findChildById('0');"));
    assert!(text.contains("View.create(new Child('0', this, { label: 'hi' }));"));
    assert!(text.contains("loadDocument(new Parent('1', undefined, {}));"));
}

#[test]
fn unresolved_imports_leave_the_component_unknown() {
    let oracle = DefaultOracle;
    let lowered =
        lower_source_file(&app_file(), &NoModules, &oracle, LowerConfig::full_rebuild());

    assert!(lowered.has_errors());
    assert!(lowered
        .diagnostics
        .iter()
        .any(|d| d.message.contains("'Child'")));
}

#[test]
fn partial_mode_constructs_imported_children_by_id() {
    let oracle = DefaultOracle;
    let lowered = lower_source_file(
        &app_file(),
        &app_resolver(),
        &oracle,
        LowerConfig::partial(),
    );
    assert!(!lowered.has_errors(), "{:?}", lowered.diagnostics);

    let text = pretty_print_file(&lowered.file);
    assert!(text.contains("ViewPU.create(new Child(this, { label: 'hi' }, undefined, elmtId));"));
    assert!(text.contains("this.updateStateVarsOfChildByElmtId(elmtId, { label: 'hi' });"));
    assert!(text.contains("loadDocument(new Parent(undefined, {}));"));
}

#[test]
fn cyclic_imports_terminate() {
    let oracle = DefaultOracle;
    let alpha = SourceFile::new(
        "a.weft",
        vec![
            import(vec!["Beta"], "./b"),
            component(
                "Alpha",
                vec!["Component"],
                vec![],
                build_method(vec![make::expr_stmt(make::call_with_body(
                    make::ident("Column"),
                    vec![],
                    vec![make::expr_stmt(make::call(
                        make::ident("Beta"),
                        vec![make::object(vec![])],
                    ))],
                ))]),
            ),
        ],
    );
    let beta = SourceFile::new(
        "b.weft",
        vec![
            import(vec!["Alpha"], "./a"),
            component(
                "Beta",
                vec!["Component"],
                vec![],
                build_method(vec![empty_column()]),
            ),
        ],
    );

    let mut resolver = TableResolver::new();
    resolver.insert("./a", alpha.clone());
    resolver.insert("./b", beta);

    let lowered = lower_source_file(&alpha, &resolver, &oracle, LowerConfig::full_rebuild());
    assert!(!lowered.has_errors(), "{:?}", lowered.diagnostics);
    assert!(pretty_print_file(&lowered.file).contains("findChildById"));
}
