//! Integration tests for decorator kinds and the property-flow matrix
//!
//! Tests kind parsing, wrapper selection across both emission modes,
//! per-kind rules, and the scan pass feeding the collection tables.

use weft_foundation::{LowerConfig, Span};
use weft_lower::{
    flow_verdict, scan_file, CompilationContext, DecoratorKind, DefaultOracle, DefaultRule,
    FlowVerdict, NoModules, TypeClass,
};
use weft_syntax::ast::{
    Decorator, FieldDecl, Ident, Item, SourceFile, StructDecl, TypeAnnotation,
};
use weft_syntax::make;

fn dec(name: &str) -> Decorator {
    Decorator::new(name, Span::default())
}

fn field(name: &str, decorators: Vec<Decorator>, private: bool) -> FieldDecl {
    FieldDecl {
        name: Ident::new(name, Span::default()),
        decorators,
        ty: TypeAnnotation::new("number", Span::default()),
        init: Some(make::num(0.0)),
        is_private: private,
        span: Span::default(),
    }
}

fn component(name: &str, fields: Vec<FieldDecl>) -> Item {
    Item::Struct(StructDecl {
        name: Ident::new(name, Span::default()),
        decorators: vec![dec("Component")],
        fields,
        methods: vec![],
        span: Span::default(),
    })
}

// =============================================================================
// Kinds
// =============================================================================

#[test]
fn every_kind_parses_from_its_name() {
    assert_eq!(DecoratorKind::from_name("State"), Some(DecoratorKind::State));
    assert_eq!(DecoratorKind::from_name("Prop"), Some(DecoratorKind::Prop));
    assert_eq!(DecoratorKind::from_name("Link"), Some(DecoratorKind::Link));
    assert_eq!(
        DecoratorKind::from_name("ObjectLink"),
        Some(DecoratorKind::ObjectLink)
    );
    assert_eq!(
        DecoratorKind::from_name("LocalStorageProp"),
        Some(DecoratorKind::LocalStorageProp)
    );
    // Secondary decorators are not kinds.
    assert_eq!(DecoratorKind::from_name("Watch"), None);
    assert_eq!(DecoratorKind::from_name("Builder"), None);
}

#[test]
fn builder_param_and_regular_are_not_reactive() {
    assert!(!DecoratorKind::BuilderParam.is_reactive());
    assert!(!DecoratorKind::Regular.is_reactive());
    assert!(DecoratorKind::State.is_reactive());
    assert!(DecoratorKind::LocalStorageLink.is_reactive());
}

#[test]
fn default_value_rules_per_kind() {
    assert_eq!(DecoratorKind::State.default_rule(), DefaultRule::Required);
    assert_eq!(DecoratorKind::Provide.default_rule(), DefaultRule::Required);
    assert_eq!(
        DecoratorKind::LocalStorageProp.default_rule(),
        DefaultRule::Required
    );
    assert_eq!(DecoratorKind::Link.default_rule(), DefaultRule::Forbidden);
    assert_eq!(
        DecoratorKind::ObjectLink.default_rule(),
        DefaultRule::Forbidden
    );
    assert_eq!(DecoratorKind::Consume.default_rule(), DefaultRule::Optional);
    assert_eq!(DecoratorKind::Regular.default_rule(), DefaultRule::Optional);
}

// =============================================================================
// Wrapper selection
// =============================================================================

#[test]
fn wrapper_families_split_on_type_class() {
    assert_eq!(
        DecoratorKind::State.wrapper(TypeClass::Simple, false),
        "ObservedPropertySimple"
    );
    assert_eq!(
        DecoratorKind::Provide.wrapper(TypeClass::Object, false),
        "ObservedPropertyObject"
    );
    assert_eq!(
        DecoratorKind::Link.wrapper(TypeClass::Object, false),
        "SynchedPropertyObjectTwoWay"
    );
    assert_eq!(
        DecoratorKind::Prop.wrapper(TypeClass::Simple, false),
        "SynchedPropertySimpleOneWay"
    );
    assert_eq!(
        DecoratorKind::ObjectLink.wrapper(TypeClass::Simple, false),
        "SynchedPropertyNestedObject"
    );
}

#[test]
fn partial_mode_selects_pu_wrappers() {
    assert_eq!(
        DecoratorKind::State.wrapper(TypeClass::Simple, true),
        "ObservedPropertySimplePU"
    );
    assert_eq!(
        DecoratorKind::StorageLink.wrapper(TypeClass::Object, true),
        "SynchedPropertyObjectTwoWayPU"
    );
    assert_eq!(
        DecoratorKind::ObjectLink.wrapper(TypeClass::Object, true),
        "SynchedPropertyNestedObjectPU"
    );
}

#[test]
fn non_reactive_kinds_have_no_wrapper() {
    assert_eq!(DecoratorKind::Regular.wrapper(TypeClass::Simple, false), "");
    assert_eq!(
        DecoratorKind::BuilderParam.wrapper(TypeClass::Object, true),
        ""
    );
}

// =============================================================================
// Flow matrix
// =============================================================================

#[test]
fn plain_value_into_link_is_illegal() {
    for parent in [None, Some(DecoratorKind::Regular)] {
        let verdict = flow_verdict(parent, DecoratorKind::Link, false);
        let FlowVerdict::Illegal(reason) = verdict else {
            panic!("expected illegal flow for {parent:?}");
        };
        assert!(reason.contains("cannot be assigned"));
    }
}

#[test]
fn reactive_reference_into_link_is_allowed() {
    for parent in [
        DecoratorKind::State,
        DecoratorKind::Link,
        DecoratorKind::Provide,
        DecoratorKind::StorageLink,
    ] {
        assert_eq!(
            flow_verdict(Some(parent), DecoratorKind::Link, true),
            FlowVerdict::Allowed,
            "{parent:?} reference should be allowed"
        );
    }
}

#[test]
fn state_or_prop_value_into_link_is_suspicious() {
    for parent in [DecoratorKind::State, DecoratorKind::Prop] {
        assert!(matches!(
            flow_verdict(Some(parent), DecoratorKind::Link, false),
            FlowVerdict::Suspicious(_)
        ));
    }
}

#[test]
fn plain_value_into_object_link_is_illegal() {
    assert!(matches!(
        flow_verdict(Some(DecoratorKind::Regular), DecoratorKind::ObjectLink, false),
        FlowVerdict::Illegal(_)
    ));
    assert!(matches!(
        flow_verdict(Some(DecoratorKind::Prop), DecoratorKind::ObjectLink, false),
        FlowVerdict::Suspicious(_)
    ));
    assert_eq!(
        flow_verdict(Some(DecoratorKind::State), DecoratorKind::ObjectLink, false),
        FlowVerdict::Allowed
    );
}

#[test]
fn value_copy_targets_accept_everything() {
    for child in [
        DecoratorKind::State,
        DecoratorKind::Prop,
        DecoratorKind::Regular,
        DecoratorKind::BuilderParam,
    ] {
        assert_eq!(
            flow_verdict(None, child, false),
            FlowVerdict::Allowed,
            "{child:?} should accept a literal"
        );
    }
}

// =============================================================================
// Scan pass
// =============================================================================

#[test]
fn scan_populates_kind_and_privacy_tables() {
    let oracle = DefaultOracle;
    let mut ctx = CompilationContext::new(LowerConfig::full_rebuild(), &oracle);
    let file = SourceFile::new(
        "app.weft",
        vec![component(
            "Card",
            vec![
                field("title", vec![dec("Prop")], false),
                field("secret", vec![dec("State")], true),
                field("plain", vec![], false),
            ],
        )],
    );

    scan_file(&mut ctx, &file, &NoModules);

    assert_eq!(
        ctx.collections.kind_of("Card", "title"),
        Some(DecoratorKind::Prop)
    );
    assert_eq!(
        ctx.collections.kind_of("Card", "plain"),
        Some(DecoratorKind::Regular)
    );
    assert!(ctx.collections.is_private("Card", "secret"));
    assert!(!ctx.collections.is_private("Card", "title"));
}

#[test]
fn provide_alias_resolves_for_consumers() {
    let oracle = DefaultOracle;
    let mut ctx = CompilationContext::new(LowerConfig::full_rebuild(), &oracle);
    let mut themed = field("theme", vec![], false);
    themed.decorators.push(Decorator {
        name: "Provide".to_string(),
        args: vec![make::str_lit("appTheme")],
        span: Span::default(),
    });
    let file = SourceFile::new("app.weft", vec![component("Root", vec![themed])]);

    scan_file(&mut ctx, &file, &NoModules);

    assert_eq!(
        ctx.collections.kind_of("Root", "appTheme"),
        Some(DecoratorKind::Provide)
    );
    assert_eq!(
        ctx.collections.kind_of("Root", "theme"),
        Some(DecoratorKind::Provide)
    );
}
