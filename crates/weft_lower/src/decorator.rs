//! Reactive-property decorator kinds and their per-kind rules.
//!
//! Decorator kind is a closed set of variant tags; per-kind behavior
//! (wrapper type selection, default-value rule, parent-flow verdicts)
//! lives in match expressions here rather than string comparisons spread
//! through the lowering pass.

use crate::oracle::TypeClass;

// =============================================================================
// DecoratorKind
// =============================================================================

/// The primary reactive decorator kinds a component field may carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DecoratorKind {
    /// `@State` - component-owned reactive value.
    State,
    /// `@Prop` - one-way copy from the parent.
    Prop,
    /// `@Link` - two-way reference to a parent field.
    Link,
    /// `@Provide` - published to descendants.
    Provide,
    /// `@Consume` - resolved from a providing ancestor.
    Consume,
    /// `@ObjectLink` - nested-object reference from the parent.
    ObjectLink,
    /// `@StorageLink` - two-way bound to app storage.
    StorageLink,
    /// `@StorageProp` - one-way copy from app storage.
    StorageProp,
    /// `@LocalStorageLink` - two-way bound to page-local storage.
    LocalStorageLink,
    /// `@LocalStorageProp` - one-way copy from page-local storage.
    LocalStorageProp,
    /// `@BuilderParam` - externally-supplied UI content.
    BuilderParam,
    /// No reactive decorator: a plain field.
    Regular,
}

/// What a decorator kind demands of a written default value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DefaultRule {
    /// The field must carry a default value.
    Required,
    /// The field must not carry a default value.
    Forbidden,
    /// A default value is allowed but not required.
    Optional,
}

/// Verdict for a parent-to-child property flow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlowVerdict {
    /// The flow is legal.
    Allowed,
    /// Suspicious but tolerated; reported as a warning.
    Suspicious(String),
    /// Illegal; reported as an error.
    Illegal(String),
}

impl DecoratorKind {
    /// Parses a decorator name into a kind, if it names one.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "State" => Some(Self::State),
            "Prop" => Some(Self::Prop),
            "Link" => Some(Self::Link),
            "Provide" => Some(Self::Provide),
            "Consume" => Some(Self::Consume),
            "ObjectLink" => Some(Self::ObjectLink),
            "StorageLink" => Some(Self::StorageLink),
            "StorageProp" => Some(Self::StorageProp),
            "LocalStorageLink" => Some(Self::LocalStorageLink),
            "LocalStorageProp" => Some(Self::LocalStorageProp),
            "BuilderParam" => Some(Self::BuilderParam),
            _ => None,
        }
    }

    /// The written decorator name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::State => "State",
            Self::Prop => "Prop",
            Self::Link => "Link",
            Self::Provide => "Provide",
            Self::Consume => "Consume",
            Self::ObjectLink => "ObjectLink",
            Self::StorageLink => "StorageLink",
            Self::StorageProp => "StorageProp",
            Self::LocalStorageLink => "LocalStorageLink",
            Self::LocalStorageProp => "LocalStorageProp",
            Self::BuilderParam => "BuilderParam",
            Self::Regular => "regular",
        }
    }

    /// Returns true for kinds wrapped in a reactive runtime type.
    #[must_use]
    pub const fn is_reactive(self) -> bool {
        !matches!(self, Self::BuilderParam | Self::Regular)
    }

    /// The default-value rule for this kind.
    ///
    /// State, Provide, and the storage kinds require a default because
    /// the wrapper must be constructible before any parent or store
    /// update arrives. Link and ObjectLink forbid one (the parent owns
    /// the value) unless the field is paired with `@Require`.
    #[must_use]
    pub const fn default_rule(self) -> DefaultRule {
        match self {
            Self::State
            | Self::Provide
            | Self::StorageLink
            | Self::StorageProp
            | Self::LocalStorageLink
            | Self::LocalStorageProp => DefaultRule::Required,
            Self::Link | Self::ObjectLink => DefaultRule::Forbidden,
            Self::Prop | Self::Consume | Self::BuilderParam | Self::Regular => DefaultRule::Optional,
        }
    }

    /// Returns true if a parent must supply this property.
    #[must_use]
    pub const fn mandatory_from_parent(self) -> bool {
        matches!(self, Self::Link | Self::ObjectLink)
    }

    /// Returns true if a parent must NOT supply this property directly
    /// (it resolves from a shared store or a providing ancestor).
    #[must_use]
    pub const fn forbidden_from_parent(self) -> bool {
        matches!(
            self,
            Self::Consume
                | Self::StorageLink
                | Self::StorageProp
                | Self::LocalStorageLink
                | Self::LocalStorageProp
        )
    }

    /// Returns true if the lowered property gets a setter.
    ///
    /// ObjectLink properties may only be mutated through their nested
    /// object, never reassigned, so they lower to a getter alone.
    #[must_use]
    pub const fn writable(self) -> bool {
        !matches!(self, Self::ObjectLink)
    }

    /// Selects the reactive wrapper type for this kind.
    ///
    /// The simple/object split follows the type oracle's classification;
    /// partial-update mode uses the `PU` wrapper family.
    #[must_use]
    pub const fn wrapper(self, class: TypeClass, partial_update: bool) -> &'static str {
        let base = match (self, class) {
            (Self::State | Self::Provide | Self::Consume, TypeClass::Simple) => {
                "ObservedPropertySimple"
            }
            (Self::State | Self::Provide | Self::Consume, TypeClass::Object) => {
                "ObservedPropertyObject"
            }
            (Self::Link | Self::StorageLink | Self::LocalStorageLink, TypeClass::Simple) => {
                "SynchedPropertySimpleTwoWay"
            }
            (Self::Link | Self::StorageLink | Self::LocalStorageLink, TypeClass::Object) => {
                "SynchedPropertyObjectTwoWay"
            }
            (Self::Prop | Self::StorageProp | Self::LocalStorageProp, TypeClass::Simple) => {
                "SynchedPropertySimpleOneWay"
            }
            (Self::Prop | Self::StorageProp | Self::LocalStorageProp, TypeClass::Object) => {
                "SynchedPropertyObjectOneWay"
            }
            (Self::ObjectLink, _) => "SynchedPropertyNestedObject",
            (Self::BuilderParam | Self::Regular, _) => "",
        };
        if partial_update {
            match (self, class) {
                (Self::State | Self::Provide | Self::Consume, TypeClass::Simple) => {
                    "ObservedPropertySimplePU"
                }
                (Self::State | Self::Provide | Self::Consume, TypeClass::Object) => {
                    "ObservedPropertyObjectPU"
                }
                (Self::Link | Self::StorageLink | Self::LocalStorageLink, TypeClass::Simple) => {
                    "SynchedPropertySimpleTwoWayPU"
                }
                (Self::Link | Self::StorageLink | Self::LocalStorageLink, TypeClass::Object) => {
                    "SynchedPropertyObjectTwoWayPU"
                }
                (Self::Prop | Self::StorageProp | Self::LocalStorageProp, TypeClass::Simple) => {
                    "SynchedPropertySimpleOneWayPU"
                }
                (Self::Prop | Self::StorageProp | Self::LocalStorageProp, TypeClass::Object) => {
                    "SynchedPropertyObjectOneWayPU"
                }
                (Self::ObjectLink, _) => "SynchedPropertyNestedObjectPU",
                (Self::BuilderParam | Self::Regular, _) => "",
            }
        } else {
            base
        }
    }
}

// =============================================================================
// Parent-to-child flow matrix
// =============================================================================

/// Checks the compatibility of a parent property kind flowing into a
/// child property kind.
///
/// `by_reference` is true when the parent wrote the `$`-prefixed
/// link-reference sugar. The special-cased allowances (Prop/State-origin
/// values into Link targets are a warning, not an error) reproduce the
/// observed policy rather than a first-principles derivation.
#[must_use]
pub fn flow_verdict(
    parent: Option<DecoratorKind>,
    child: DecoratorKind,
    by_reference: bool,
) -> FlowVerdict {
    match child {
        DecoratorKind::Link => match parent {
            None | Some(DecoratorKind::Regular | DecoratorKind::BuilderParam) => {
                FlowVerdict::Illegal(format!(
                    "a non-reactive value cannot be assigned to a {} property",
                    child.name()
                ))
            }
            Some(source) if by_reference => {
                if source.is_reactive() {
                    FlowVerdict::Allowed
                } else {
                    FlowVerdict::Illegal(format!(
                        "a {} value cannot be assigned to a {} property",
                        source.name(),
                        child.name()
                    ))
                }
            }
            Some(source @ (DecoratorKind::State | DecoratorKind::Prop)) => {
                FlowVerdict::Suspicious(format!(
                    "{} value flows into a {} property without a reference; \
                     writes in the child will not propagate back",
                    source.name(),
                    child.name()
                ))
            }
            Some(_) => FlowVerdict::Allowed,
        },
        DecoratorKind::ObjectLink => match parent {
            None | Some(DecoratorKind::Regular | DecoratorKind::BuilderParam) => {
                FlowVerdict::Illegal(format!(
                    "a non-reactive value cannot be assigned to an {} property",
                    child.name()
                ))
            }
            Some(DecoratorKind::Prop) => FlowVerdict::Suspicious(
                "Prop value flows into an ObjectLink property; the copy will \
                 not observe the original"
                    .to_string(),
            ),
            Some(_) => FlowVerdict::Allowed,
        },
        // Value-copy targets accept anything, including plain fields.
        _ => FlowVerdict::Allowed,
    }
}

// =============================================================================
// Tests
// =============================================================================
