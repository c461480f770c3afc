//! Integration tests for attribute-chain binding
//!
//! Tests chain splitting, source-order emission, argument rewriting, and
//! the special-cased attribute families.

use proptest::prelude::*;

use weft_foundation::{DiagnosticCode, LowerConfig, Span};
use weft_lower::{bind_attributes, split_chain, ChainSplit, CompilationContext, DefaultOracle};
use weft_syntax::ast::{Expr, FunctionDecl, Ident, MethodDecl, Stmt};
use weft_syntax::make;
use weft_syntax::pretty::pretty_print_stmts;

fn chain(component: &str, attrs: &[(&str, Expr)]) -> Expr {
    let mut expr = make::call(make::ident(component), vec![]);
    for (name, arg) in attrs {
        expr = make::call(make::member(expr, *name), vec![arg.clone()]);
    }
    expr
}

// =============================================================================
// Splitting
// =============================================================================

#[test]
fn split_finds_root_and_links() {
    let expr = chain(
        "Text",
        &[
            ("fontSize", make::num(20.0)),
            ("fontColor", make::str_lit("#000")),
            ("width", make::num(100.0)),
        ],
    );
    let ChainSplit::Chain { root, links } = split_chain(&expr) else {
        panic!("expected a chain");
    };
    assert_eq!(root.callee.as_ident(), Some("Text"));
    // Links are collected outermost-first.
    assert_eq!(links[0].name, "width");
    assert_eq!(links[1].name, "fontColor");
    assert_eq!(links[2].name, "fontSize");
}

#[test]
fn split_stops_at_this_rooted_root() {
    let expr = make::call(
        make::member(make::this_call("card", vec![]), "width"),
        vec![make::num(50.0)],
    );
    let ChainSplit::Chain { root, links } = split_chain(&expr) else {
        panic!("expected a chain");
    };
    assert_eq!(links.len(), 1);
    assert!(root.callee.as_member().is_some());
}

#[test]
fn split_rejects_bare_member_and_non_chains() {
    let bare = make::member(make::call(make::ident("Text"), vec![]), "fontSize");
    assert!(matches!(split_chain(&bare), ChainSplit::BareMember(_)));

    assert!(matches!(split_chain(&make::num(1.0)), ChainSplit::NotAChain));
    assert!(matches!(
        split_chain(&make::assign(make::ident("x"), make::num(1.0))),
        ChainSplit::NotAChain
    ));
}

// =============================================================================
// Binding
// =============================================================================

#[test]
fn binding_restores_source_order() {
    let oracle = DefaultOracle;
    let mut ctx = CompilationContext::new(LowerConfig::full_rebuild(), &oracle);
    let expr = chain(
        "Text",
        &[
            ("fontSize", make::num(20.0)),
            ("width", make::num(100.0)),
            ("opacity", make::num(0.5)),
        ],
    );
    let ChainSplit::Chain { links, .. } = split_chain(&expr) else {
        panic!("expected a chain");
    };

    let mut out = Vec::new();
    bind_attributes(&mut ctx, "Text", &links, &mut out);

    let text = pretty_print_stmts(&out);
    let a = text.find("Text.fontSize(20);").unwrap();
    let b = text.find("Text.width(100);").unwrap();
    let c = text.find("Text.opacity(0.5);").unwrap();
    assert!(a < b && b < c, "{text}");
}

#[test]
fn two_way_binding_argument_expands() {
    let oracle = DefaultOracle;
    let mut ctx = CompilationContext::new(LowerConfig::full_rebuild(), &oracle);
    let bind = Expr::TwoWayBind(Box::new(make::this_member("text")), Span::default());
    let expr = chain("TextInput", &[("text", bind)]);
    let ChainSplit::Chain { links, .. } = split_chain(&expr) else {
        panic!("expected a chain");
    };

    let mut out = Vec::new();
    bind_attributes(&mut ctx, "TextInput", &links, &mut out);

    let text = pretty_print_stmts(&out);
    assert!(text.contains("value: this.text"));
    assert!(text.contains("this.text = newValue"));
}

#[test]
fn second_animation_resets_the_first() {
    let oracle = DefaultOracle;
    let mut ctx = CompilationContext::new(LowerConfig::full_rebuild(), &oracle);
    let expr = chain(
        "Image",
        &[
            ("animation", make::ident("slow")),
            ("animation", make::ident("fast")),
        ],
    );
    let ChainSplit::Chain { links, .. } = split_chain(&expr) else {
        panic!("expected a chain");
    };

    let mut out = Vec::new();
    bind_attributes(&mut ctx, "Image", &links, &mut out);

    let text = pretty_print_stmts(&out);
    let slow = text.find("Image.animation(slow);").unwrap();
    let reset = text.find("Image.animation(null);").unwrap();
    let fast = text.find("Image.animation(fast);").unwrap();
    assert!(slow < reset && reset < fast, "{text}");
}

#[test]
fn gesture_priorities_map_to_runtime_modes() {
    let oracle = DefaultOracle;
    let cases = [
        ("gesture", "GesturePriority.Low"),
        ("priorityGesture", "GesturePriority.High"),
        ("parallelGesture", "GesturePriority.Parallel"),
    ];
    for (attr, expected) in cases {
        let mut ctx = CompilationContext::new(LowerConfig::full_rebuild(), &oracle);
        let tap = make::call(make::ident("TapGesture"), vec![]);
        let expr = chain("Stack", &[(attr, tap)]);
        let ChainSplit::Chain { links, .. } = split_chain(&expr) else {
            panic!("expected a chain");
        };

        let mut out = Vec::new();
        bind_attributes(&mut ctx, "Stack", &links, &mut out);

        let text = pretty_print_stmts(&out);
        assert!(
            text.contains(&format!("Gesture.create({expected});")),
            "{attr}: {text}"
        );
        assert!(text.contains("Gesture.pop();"));
    }
}

#[test]
fn state_styles_rejects_non_object() {
    let oracle = DefaultOracle;
    let mut ctx = CompilationContext::new(LowerConfig::full_rebuild(), &oracle);
    let expr = chain("Button", &[("stateStyles", make::str_lit("oops"))]);
    let ChainSplit::Chain { links, .. } = split_chain(&expr) else {
        panic!("expected a chain");
    };

    let mut out = Vec::new();
    bind_attributes(&mut ctx, "Button", &links, &mut out);

    assert_eq!(
        ctx.sink
            .with_code(DiagnosticCode::StateStylesNotObject)
            .count(),
        1
    );
    assert!(out.is_empty());
}

#[test]
fn state_styles_brackets_each_state_with_markers() {
    let oracle = DefaultOracle;
    let mut ctx = CompilationContext::new(LowerConfig::full_rebuild(), &oracle);
    let states = make::object(vec![(
        "pressed",
        make::object(vec![("opacity", make::num(0.4))]),
    )]);
    let expr = chain("Button", &[("stateStyles", states)]);
    let ChainSplit::Chain { links, .. } = split_chain(&expr) else {
        panic!("expected a chain");
    };

    let mut out = Vec::new();
    bind_attributes(&mut ctx, "Button", &links, &mut out);

    let text = pretty_print_stmts(&out);
    let marker = text.find("ViewStackProcessor.visualState('pressed');").unwrap();
    let attr = text.find("Button.opacity(0.4);").unwrap();
    let reset = text.find("ViewStackProcessor.visualState();").unwrap();
    assert!(marker < attr && attr < reset, "{text}");
}

// =============================================================================
// Style splicing
// =============================================================================

fn attr_stmt(name: &str, args: Vec<Expr>) -> Stmt {
    make::expr_stmt(make::call(make::ident(name), args))
}

fn style_fn(name: &str, body: Vec<Stmt>) -> FunctionDecl {
    FunctionDecl {
        name: Ident::new(name, Span::default()),
        decorators: vec![],
        params: vec![],
        body,
        span: Span::default(),
    }
}

/// A zero-argument attribute hop referencing a named style block.
fn style_chain(component: &str, style: &str) -> Expr {
    make::call(
        make::member(make::call(make::ident(component), vec![]), style),
        vec![],
    )
}

#[test]
fn global_style_blocks_splice_in_body_order() {
    let oracle = DefaultOracle;
    let mut ctx = CompilationContext::new(LowerConfig::full_rebuild(), &oracle);
    ctx.builders.record_style(style_fn(
        "fancy",
        vec![
            attr_stmt("width", vec![make::num(100.0)]),
            attr_stmt("opacity", vec![make::num(0.5)]),
        ],
    ));

    let expr = style_chain("Button", "fancy");
    let ChainSplit::Chain { links, .. } = split_chain(&expr) else {
        panic!("expected a chain");
    };

    let mut out = Vec::new();
    bind_attributes(&mut ctx, "Button", &links, &mut out);

    let text = pretty_print_stmts(&out);
    let width = text.find("Button.width(100);").unwrap();
    let opacity = text.find("Button.opacity(0.5);").unwrap();
    assert!(width < opacity, "{text}");
    assert!(!text.contains("fancy"));
}

#[test]
fn extend_blocks_apply_only_to_their_target() {
    let oracle = DefaultOracle;
    let mut ctx = CompilationContext::new(LowerConfig::full_rebuild(), &oracle);
    ctx.builders.record_extend(
        "Text",
        style_fn("titleText", vec![attr_stmt("fontSize", vec![make::num(18.0)])]),
    );

    let expr = style_chain("Text", "titleText");
    let ChainSplit::Chain { links, .. } = split_chain(&expr) else {
        panic!("expected a chain");
    };
    let mut out = Vec::new();
    bind_attributes(&mut ctx, "Text", &links, &mut out);
    let text = pretty_print_stmts(&out);
    assert!(text.contains("Text.fontSize(18);"));
    assert!(!text.contains("titleText"));

    // On any other element the name is a plain attribute, not a splice.
    let expr = style_chain("Button", "titleText");
    let ChainSplit::Chain { links, .. } = split_chain(&expr) else {
        panic!("expected a chain");
    };
    let mut out = Vec::new();
    bind_attributes(&mut ctx, "Button", &links, &mut out);
    let text = pretty_print_stmts(&out);
    assert!(text.contains("Button.titleText();"));
    assert!(!text.contains("fontSize"));
}

#[test]
fn struct_style_methods_splice_for_the_current_struct() {
    let oracle = DefaultOracle;
    let mut ctx = CompilationContext::new(LowerConfig::full_rebuild(), &oracle);
    ctx.components.enter_struct("Card");
    ctx.builders.record_style_method(
        "Card",
        MethodDecl {
            name: Ident::new("pressedLook", Span::default()),
            decorators: vec![],
            params: vec![],
            body: vec![attr_stmt("backgroundColor", vec![make::str_lit("#ccc")])],
            span: Span::default(),
        },
    );

    let expr = style_chain("Button", "pressedLook");
    let ChainSplit::Chain { links, .. } = split_chain(&expr) else {
        panic!("expected a chain");
    };

    let mut out = Vec::new();
    bind_attributes(&mut ctx, "Button", &links, &mut out);

    let text = pretty_print_stmts(&out);
    assert!(text.contains("Button.backgroundColor('#ccc');"));
    assert!(!text.contains("pressedLook"));
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// Splitting collects links in reverse and binding reverses again, so
    /// an arbitrary chain of plain attributes must come out in source
    /// order regardless of length or naming.
    #[test]
    fn arbitrary_plain_chains_preserve_source_order(
        names in prop::collection::vec("[a-z]{4,9}", 1..8)
            .prop_filter("special attribute families are bound differently", |names| {
                names.iter().all(|n| {
                    n != "animation"
                        && n != "gesture"
                        && n != "stateStyles"
                        && n != "parallelGesture"
                        && n != "priorityGesture"
                })
            })
    ) {
        let oracle = DefaultOracle;
        let mut ctx = CompilationContext::new(LowerConfig::full_rebuild(), &oracle);

        // Tag each link with a unique numeric argument so duplicates of
        // the same attribute name stay distinguishable.
        let attrs: Vec<(&str, Expr)> = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.as_str(), make::num(i as f64)))
            .collect();
        let expr = chain("Stack", &attrs);

        let ChainSplit::Chain { links, .. } = split_chain(&expr) else {
            panic!("expected a chain");
        };
        prop_assert_eq!(links.len(), names.len());

        let mut out = Vec::new();
        bind_attributes(&mut ctx, "Stack", &links, &mut out);
        prop_assert_eq!(out.len(), names.len());

        let text = pretty_print_stmts(&out);
        let mut last = 0;
        for (i, name) in names.iter().enumerate() {
            let needle = format!("Stack.{name}({i});");
            let pos = text.find(&needle);
            prop_assert!(pos.is_some(), "missing {} in {}", needle, text);
            let pos = pos.unwrap_or_default();
            prop_assert!(pos >= last, "out of order at {}: {}", needle, text);
            last = pos;
        }
    }
}
