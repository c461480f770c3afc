//! Static catalog of built-in UI elements.
//!
//! The registry answers, in O(1): is a name a known built-in element, is
//! it atomic (no children permitted), is it a container, does it restrict
//! children to one specific type, and is an attribute name legal globally
//! versus for one component. Unknown names simply test negative
//! everywhere; the registry has no failure modes.

use std::collections::{HashMap, HashSet};

/// Structural metadata for one built-in element.
#[derive(Clone, Debug)]
pub struct ComponentDescriptor {
    /// Element name.
    pub name: &'static str,
    /// Atomic elements permit no children.
    pub atomic: bool,
    /// For containers restricting children to specific element types.
    pub allowed_children: Option<&'static [&'static str]>,
    /// Containers that accept exactly one child.
    pub single_child_only: bool,
    /// Attribute names declared specifically for this element.
    pub declared_attrs: &'static [&'static str],
    /// Containers that virtualize their children (drive lazy rendering).
    pub virtualizing: bool,
}

/// One row of the static element table.
struct Row {
    name: &'static str,
    atomic: bool,
    allowed_children: Option<&'static [&'static str]>,
    single_child_only: bool,
    declared_attrs: &'static [&'static str],
    virtualizing: bool,
}

const fn container(name: &'static str, attrs: &'static [&'static str]) -> Row {
    Row {
        name,
        atomic: false,
        allowed_children: None,
        single_child_only: false,
        declared_attrs: attrs,
        virtualizing: false,
    }
}

const fn atomic(name: &'static str, attrs: &'static [&'static str]) -> Row {
    Row {
        name,
        atomic: true,
        allowed_children: None,
        single_child_only: false,
        declared_attrs: attrs,
        virtualizing: false,
    }
}

/// The fixed built-in element table. Iterated once per registry to derive
/// the membership sets.
static ELEMENT_TABLE: &[Row] = &[
    container("Column", &["alignItems", "justifyContent"]),
    container("Row", &["alignItems", "justifyContent"]),
    container("Stack", &["alignContent"]),
    container("Flex", &["direction", "wrap"]),
    Row {
        name: "List",
        atomic: false,
        allowed_children: Some(&["ListItem"]),
        single_child_only: false,
        declared_attrs: &["listDirection", "divider", "editMode"],
        virtualizing: true,
    },
    container("ListItem", &["sticky", "editable"]),
    Row {
        name: "Grid",
        atomic: false,
        allowed_children: Some(&["GridItem"]),
        single_child_only: false,
        declared_attrs: &["columnsTemplate", "rowsTemplate", "columnsGap", "rowsGap"],
        virtualizing: true,
    },
    container("GridItem", &["rowStart", "rowEnd", "columnStart", "columnEnd"]),
    Row {
        name: "Swiper",
        atomic: false,
        allowed_children: None,
        single_child_only: false,
        declared_attrs: &["index", "autoPlay", "interval", "loop", "vertical"],
        virtualizing: true,
    },
    Row {
        name: "Tabs",
        atomic: false,
        allowed_children: Some(&["TabContent"]),
        single_child_only: false,
        declared_attrs: &["barPosition", "vertical", "scrollable"],
        virtualizing: false,
    },
    container("TabContent", &["tabBar"]),
    Row {
        name: "Scroll",
        atomic: false,
        allowed_children: None,
        single_child_only: true,
        declared_attrs: &["scrollable", "scrollBar", "edgeEffect"],
        virtualizing: false,
    },
    Row {
        name: "Navigator",
        atomic: false,
        allowed_children: None,
        single_child_only: true,
        declared_attrs: &["target", "type", "active", "params"],
        virtualizing: false,
    },
    Row {
        name: "Button",
        atomic: false,
        allowed_children: None,
        single_child_only: true,
        declared_attrs: &["type", "stateEffect", "fontSize", "fontColor", "label"],
        virtualizing: false,
    },
    atomic("Text", &["fontSize", "fontColor", "fontWeight", "maxLines", "textAlign"]),
    atomic("Image", &["src", "alt", "objectFit", "interpolation"]),
    atomic("Toggle", &["isOn", "selectedColor", "switchPointColor"]),
    atomic("Slider", &["value", "min", "max", "step", "trackColor"]),
    atomic("TextInput", &["placeholder", "text", "caretColor", "maxLength"]),
    atomic("Divider", &["vertical", "color", "strokeWidth"]),
    atomic("Blank", &["color"]),
    atomic("LoadingProgress", &["color"]),
    atomic("Video", &["src", "autoPlay", "controls", "muted", "objectFit"]),
    atomic("Canvas", &["onReady"]),
    atomic("XComponent", &["id", "type", "libraryname", "onLoad", "onDestroy"]),
];

/// Attribute names legal on every component (global style/event set).
static UNIVERSAL_ATTRS: &[&str] = &[
    "width",
    "height",
    "size",
    "padding",
    "margin",
    "backgroundColor",
    "backgroundImage",
    "opacity",
    "border",
    "borderRadius",
    "borderWidth",
    "borderColor",
    "visibility",
    "enabled",
    "zIndex",
    "position",
    "offset",
    "layoutWeight",
    "align",
    "flexGrow",
    "flexShrink",
    "flexBasis",
    "animation",
    "transition",
    "rotate",
    "scale",
    "translate",
    "gesture",
    "parallelGesture",
    "priorityGesture",
    "stateStyles",
    "onClick",
    "onTouch",
    "onAppear",
    "onDisAppear",
    "onHover",
    "onKeyEvent",
    "onFocus",
    "onBlur",
    "onAreaChange",
];

/// Static catalog mapping built-in element names to structural metadata.
///
/// Populated once per compilation context; immutable afterwards.
#[derive(Debug)]
pub struct ComponentRegistry {
    descriptors: HashMap<&'static str, ComponentDescriptor>,
    atomics: HashSet<&'static str>,
    containers: HashSet<&'static str>,
    single_child: HashSet<&'static str>,
    virtualizing: HashSet<&'static str>,
    universal_attrs: HashSet<&'static str>,
}

impl ComponentRegistry {
    /// Builds the registry by iterating the fixed element table.
    #[must_use]
    pub fn new() -> Self {
        let mut descriptors = HashMap::new();
        let mut atomics = HashSet::new();
        let mut containers = HashSet::new();
        let mut single_child = HashSet::new();
        let mut virtualizing = HashSet::new();

        for row in ELEMENT_TABLE {
            descriptors.insert(
                row.name,
                ComponentDescriptor {
                    name: row.name,
                    atomic: row.atomic,
                    allowed_children: row.allowed_children,
                    single_child_only: row.single_child_only,
                    declared_attrs: row.declared_attrs,
                    virtualizing: row.virtualizing,
                },
            );
            if row.atomic {
                atomics.insert(row.name);
            } else {
                containers.insert(row.name);
            }
            if row.single_child_only {
                single_child.insert(row.name);
            }
            if row.virtualizing {
                virtualizing.insert(row.name);
            }
        }

        Self {
            descriptors,
            atomics,
            containers,
            single_child,
            virtualizing,
            universal_attrs: UNIVERSAL_ATTRS.iter().copied().collect(),
        }
    }

    /// Looks up the descriptor for a built-in element.
    #[must_use]
    pub fn descriptor(&self, name: &str) -> Option<&ComponentDescriptor> {
        self.descriptors.get(name)
    }

    /// Returns true if the name is any known built-in element.
    #[must_use]
    pub fn is_builtin(&self, name: &str) -> bool {
        self.descriptors.contains_key(name)
    }

    /// Returns true if the element permits no children.
    #[must_use]
    pub fn is_atomic(&self, name: &str) -> bool {
        self.atomics.contains(name)
    }

    /// Returns true if the element is a recognized container.
    #[must_use]
    pub fn is_container(&self, name: &str) -> bool {
        self.containers.contains(name)
    }

    /// Returns true if the container accepts exactly one child.
    #[must_use]
    pub fn is_single_child(&self, name: &str) -> bool {
        self.single_child.contains(name)
    }

    /// Returns true if the container virtualizes its children.
    #[must_use]
    pub fn is_virtualizing(&self, name: &str) -> bool {
        self.virtualizing.contains(name)
    }

    /// Returns true if a container needs a matching `pop` call.
    ///
    /// Every non-atomic built-in pops; atomic elements never do.
    #[must_use]
    pub fn needs_pop(&self, name: &str) -> bool {
        self.is_container(name)
    }

    /// Returns true if the attribute name is legal on every component.
    #[must_use]
    pub fn is_universal_attr(&self, attr: &str) -> bool {
        self.universal_attrs.contains(attr)
    }

    /// Returns true if the attribute is legal on the given element,
    /// either globally or via the element's declared set.
    #[must_use]
    pub fn is_legal_attr(&self, component: &str, attr: &str) -> bool {
        if self.is_universal_attr(attr) {
            return true;
        }
        self.descriptors
            .get(component)
            .is_some_and(|d| d.declared_attrs.contains(&attr))
    }

    /// Returns the allowed child types for a restricting container.
    #[must_use]
    pub fn allowed_children(&self, name: &str) -> Option<&'static [&'static str]> {
        self.descriptors.get(name).and_then(|d| d.allowed_children)
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
