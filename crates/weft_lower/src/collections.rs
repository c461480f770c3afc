//! Mutable symbol tables populated by the scan pre-pass.
//!
//! These are the process-wide "collection tables" of the pipeline, made
//! explicit: they live in the compilation context, are populated during
//! the import scan, read during lowering, and cleared between runs by
//! resetting the context.

use std::collections::{HashMap, HashSet};

use weft_syntax::ast::{FunctionDecl, MethodDecl};

use crate::decorator::DecoratorKind;

// =============================================================================
// DecoratorCollections
// =============================================================================

/// Per-component property-name tables, one entry per decorator kind.
///
/// Keyed by custom-component name. Every parent-supplied property must
/// resolve to exactly one entry under the receiving component's name.
#[derive(Debug, Default)]
pub struct DecoratorCollections {
    by_component: HashMap<String, HashMap<String, DecoratorKind>>,
    privates: HashMap<String, HashSet<String>>,
}

impl DecoratorCollections {
    /// Creates empty collections.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a property's decorator kind under a component name.
    ///
    /// The first record for a property wins; subsequent records for the
    /// same name are ignored (alias entries are recorded before
    /// field-name fallbacks, so an alias takes precedence).
    pub fn record(&mut self, component: &str, property: &str, kind: DecoratorKind) {
        self.by_component
            .entry(component.to_string())
            .or_default()
            .entry(property.to_string())
            .or_insert(kind);
    }

    /// Marks a property as declared private.
    pub fn record_private(&mut self, component: &str, property: &str) {
        self.privates
            .entry(component.to_string())
            .or_default()
            .insert(property.to_string());
    }

    /// Returns true if the property was declared private.
    #[must_use]
    pub fn is_private(&self, component: &str, property: &str) -> bool {
        self.privates
            .get(component)
            .is_some_and(|set| set.contains(property))
    }

    /// Resolves a property's decorator kind for a component.
    #[must_use]
    pub fn kind_of(&self, component: &str, property: &str) -> Option<DecoratorKind> {
        self.by_component
            .get(component)?
            .get(property)
            .copied()
    }

    /// Returns all property names of a given kind for a component.
    #[must_use]
    pub fn props_of_kind(&self, component: &str, kind: DecoratorKind) -> Vec<&str> {
        let mut props: Vec<&str> = self
            .by_component
            .get(component)
            .map(|table| {
                table
                    .iter()
                    .filter(|(_, k)| **k == kind)
                    .map(|(name, _)| name.as_str())
                    .collect()
            })
            .unwrap_or_default();
        props.sort_unstable();
        props
    }

    /// Returns true if any properties are recorded for a component.
    #[must_use]
    pub fn has_component(&self, component: &str) -> bool {
        self.by_component.contains_key(component)
    }

    /// Clears all tables between compilation runs.
    pub fn clear(&mut self) {
        self.by_component.clear();
        self.privates.clear();
    }
}

// =============================================================================
// ComponentCollection
// =============================================================================

/// Tracks the custom components seen during the current pass.
#[derive(Debug, Default)]
pub struct ComponentCollection {
    /// All custom component names reachable from the entry file.
    pub custom_components: HashSet<String>,
    /// The `@Entry` component, if one was declared.
    pub entry_component: Option<String>,
    /// `@CustomDialog` component names.
    pub dialog_components: HashSet<String>,
    /// The struct currently being lowered. Non-empty exactly while one
    /// struct body is on the stack; "current component" lookups during
    /// that window resolve against it.
    current_struct: Option<String>,
}

impl ComponentCollection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the name is a declared custom component.
    #[must_use]
    pub fn is_custom(&self, name: &str) -> bool {
        self.custom_components.contains(name)
    }

    /// Enters a struct body, making it the current component.
    pub fn enter_struct(&mut self, name: &str) {
        self.current_struct = Some(name.to_string());
    }

    /// Leaves the current struct body.
    pub fn leave_struct(&mut self) {
        self.current_struct = None;
    }

    /// The struct currently being lowered, if any.
    #[must_use]
    pub fn current_struct(&self) -> Option<&str> {
        self.current_struct.as_deref()
    }

    /// Clears the collection between files.
    pub fn clear(&mut self) {
        self.custom_components.clear();
        self.entry_component = None;
        self.dialog_components.clear();
        self.current_struct = None;
    }
}

// =============================================================================
// BuilderTable
// =============================================================================

/// An `@Extend` function: a named attribute block for one element type.
#[derive(Clone, Debug)]
pub struct ExtendDecl {
    /// The element the block extends.
    pub target: String,
    /// The function declaration carrying the attribute chain.
    pub decl: FunctionDecl,
}

/// Pending builder, style, and extend function tables.
///
/// Populated during the scan; consulted when classifying statements and
/// when splicing named attribute blocks into chains.
#[derive(Debug, Default)]
pub struct BuilderTable {
    global_builders: HashMap<String, FunctionDecl>,
    styles: HashMap<String, FunctionDecl>,
    extends: HashMap<String, ExtendDecl>,
    /// Builder methods keyed by owning struct name.
    methods: HashMap<String, HashSet<String>>,
    /// Local `@Styles` methods keyed by owning struct name.
    style_methods: HashMap<String, HashMap<String, MethodDecl>>,
}

impl BuilderTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a global `@Builder` function.
    pub fn record_builder(&mut self, decl: FunctionDecl) {
        self.global_builders.insert(decl.name.name.clone(), decl);
    }

    /// Registers a global `@Styles` function.
    pub fn record_style(&mut self, decl: FunctionDecl) {
        self.styles.insert(decl.name.name.clone(), decl);
    }

    /// Registers an `@Extend(Target)` function.
    pub fn record_extend(&mut self, target: impl Into<String>, decl: FunctionDecl) {
        self.extends.insert(
            decl.name.name.clone(),
            ExtendDecl {
                target: target.into(),
                decl,
            },
        );
    }

    /// Registers a struct-local `@Builder` method.
    pub fn record_method(&mut self, component: &str, method: &str) {
        self.methods
            .entry(component.to_string())
            .or_default()
            .insert(method.to_string());
    }

    /// Registers a struct-local `@Styles` method.
    pub fn record_style_method(&mut self, component: &str, method: MethodDecl) {
        self.style_methods
            .entry(component.to_string())
            .or_default()
            .insert(method.name.name.clone(), method);
    }

    /// Looks up a global builder function.
    #[must_use]
    pub fn builder(&self, name: &str) -> Option<&FunctionDecl> {
        self.global_builders.get(name)
    }

    /// Returns true if the name is a global builder function.
    #[must_use]
    pub fn is_builder(&self, name: &str) -> bool {
        self.global_builders.contains_key(name)
    }

    /// Looks up a global style block.
    #[must_use]
    pub fn style(&self, name: &str) -> Option<&FunctionDecl> {
        self.styles.get(name)
    }

    /// Looks up an extend block.
    #[must_use]
    pub fn extend(&self, name: &str) -> Option<&ExtendDecl> {
        self.extends.get(name)
    }

    /// Returns true if `method` is a builder method of `component`.
    #[must_use]
    pub fn is_builder_method(&self, component: &str, method: &str) -> bool {
        self.methods
            .get(component)
            .is_some_and(|set| set.contains(method))
    }

    /// Returns true if `method` is a local style method of `component`.
    #[must_use]
    pub fn is_style_method(&self, component: &str, method: &str) -> bool {
        self.style_methods
            .get(component)
            .is_some_and(|table| table.contains_key(method))
    }

    /// Looks up a local style method of `component`.
    #[must_use]
    pub fn style_method(&self, component: &str, method: &str) -> Option<&MethodDecl> {
        self.style_methods
            .get(component)
            .and_then(|table| table.get(method))
    }

    /// Clears all tables between compilation runs.
    pub fn clear(&mut self) {
        self.global_builders.clear();
        self.styles.clear();
        self.extends.clear();
        self.methods.clear();
        self.style_methods.clear();
    }
}

// =============================================================================
// IdGenerator
// =============================================================================

/// Deterministic auto-increment ids for synthetic children and creation
/// sites.
///
/// Owned by the compilation context so identical input yields identical
/// ids run after run; never a process global.
#[derive(Debug, Default)]
pub struct IdGenerator {
    next: u32,
}

impl IdGenerator {
    /// Creates a generator starting at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next id and advances the counter.
    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Resets the counter between compilation runs.
    pub fn reset(&mut self) {
        self.next = 0;
    }
}

// =============================================================================
// Tests
// =============================================================================
