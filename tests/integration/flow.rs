//! Property-flow validation across a parent/child pair in one file.

use weft_foundation::{DiagnosticCode, LowerConfig, Span};
use weft_lower::{lower_source_file, DefaultOracle, LoweredFile, NoModules};
use weft_syntax::ast::{
    Decorator, Expr, FieldDecl, Ident, Item, MethodDecl, SourceFile, StructDecl, TypeAnnotation,
};
use weft_syntax::make;
use weft_syntax::pretty::pretty_print_file;

fn field(name: &str, decorators: Vec<&str>, init: Option<Expr>) -> FieldDecl {
    FieldDecl {
        name: Ident::new(name, Span::default()),
        decorators: decorators
            .into_iter()
            .map(|d| Decorator::new(d, Span::default()))
            .collect(),
        ty: TypeAnnotation::new("number", Span::default()),
        init,
        is_private: false,
        span: Span::default(),
    }
}

fn build_method(body: Vec<weft_syntax::ast::Stmt>) -> MethodDecl {
    MethodDecl {
        name: Ident::new("build", Span::default()),
        decorators: vec![],
        params: vec![],
        body,
        span: Span::default(),
    }
}

fn component(name: &str, fields: Vec<FieldDecl>, build: MethodDecl) -> Item {
    Item::Struct(StructDecl {
        name: Ident::new(name, Span::default()),
        decorators: vec![Decorator::new("Component", Span::default())],
        fields,
        methods: vec![build],
        span: Span::default(),
    })
}

/// `Child` owns a mandatory `@Link x`; `Parent` instantiates it with the
/// given initializer properties.
fn family_file(props: Vec<(&str, Expr)>) -> SourceFile {
    let child = component(
        "Child",
        vec![field("x", vec!["Link"], None)],
        build_method(vec![make::expr_stmt(make::call_with_body(
            make::ident("Column"),
            vec![],
            vec![],
        ))]),
    );
    let instantiation = make::expr_stmt(make::call(
        make::ident("Child"),
        vec![make::object(props)],
    ));
    let parent = component(
        "Parent",
        vec![
            field("count", vec!["State"], Some(make::num(0.0))),
            field("note", vec![], Some(make::num(7.0))),
        ],
        build_method(vec![make::expr_stmt(make::call_with_body(
            make::ident("Column"),
            vec![],
            vec![instantiation],
        ))]),
    );
    SourceFile::new("family.weft", vec![child, parent])
}

fn lower(props: Vec<(&str, Expr)>) -> LoweredFile {
    let oracle = DefaultOracle;
    lower_source_file(
        &family_file(props),
        &NoModules,
        &oracle,
        LowerConfig::full_rebuild(),
    )
}

fn count_code(lowered: &LoweredFile, code: DiagnosticCode) -> usize {
    lowered
        .diagnostics
        .iter()
        .filter(|d| d.code == Some(code))
        .count()
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn missing_link_is_reported_exactly_once() {
    let lowered = lower(vec![]);
    assert!(lowered.has_errors());
    assert_eq!(
        count_code(&lowered, DiagnosticCode::MandatoryPropertyMissing),
        1
    );
}

#[test]
fn wired_link_lowers_clean() {
    let lowered = lower(vec![("x", make::this_member("$count"))]);
    assert!(!lowered.has_errors(), "{:?}", lowered.diagnostics);

    let text = pretty_print_file(&lowered.file);
    assert!(text.contains("class Child extends View {"));
    assert!(text.contains("class Parent extends View {"));
    assert!(text.contains("View.create(new Child('0', this, { x: this.__count }));"));
    assert!(text.contains("earlierCreatedChild_0.updateWithValueParams({});"));
}

#[test]
fn plain_value_into_link_is_rejected() {
    let lowered = lower(vec![("x", make::this_member("note"))]);
    assert_eq!(count_code(&lowered, DiagnosticCode::IllegalPropertyFlow), 1);
    assert_eq!(
        count_code(&lowered, DiagnosticCode::MandatoryPropertyMissing),
        0
    );
    let illegal = lowered
        .diagnostics
        .iter()
        .find(|d| d.code == Some(DiagnosticCode::IllegalPropertyFlow))
        .unwrap();
    assert!(illegal.message.contains("cannot be assigned"));
}

#[test]
fn state_value_without_sigil_only_warns() {
    let lowered = lower(vec![("x", make::this_member("count"))]);
    assert!(!lowered.has_errors(), "{:?}", lowered.diagnostics);
    assert_eq!(
        count_code(&lowered, DiagnosticCode::SuspiciousPropertyFlow),
        1
    );
}

#[test]
fn reruns_report_and_emit_identically() {
    let first = lower(vec![]);
    let second = lower(vec![]);
    assert_eq!(first.diagnostics.len(), second.diagnostics.len());
    for (a, b) in first.diagnostics.iter().zip(&second.diagnostics) {
        assert_eq!(a.code, b.code);
        assert_eq!(a.message, b.message);
    }
    assert_eq!(
        pretty_print_file(&first.file),
        pretty_print_file(&second.file)
    );
}
