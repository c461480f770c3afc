//! Lowering of declarative component trees into imperative runtime calls.
//!
//! The pass walks a parsed component file and rewrites struct/component
//! syntax into create/update/pop calls against the retained-mode UI
//! runtime, in one of two emission modes: full rebuild or partial
//! (element-id-addressed) update. Everything is driven through a
//! [`CompilationContext`] constructed per run; the single entry point is
//! [`lower_source_file`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod binder;
pub mod collections;
pub mod context;
pub mod decorator;
pub mod gesture;
pub mod instantiate;
pub mod oracle;
pub mod orchestrate;
pub mod registry;
pub mod scan;
pub mod statement;
pub mod struct_lower;

pub use binder::{bind_attributes, split_chain, ChainLink, ChainSplit};
pub use collections::{BuilderTable, ComponentCollection, DecoratorCollections, IdGenerator};
pub use context::CompilationContext;
pub use decorator::{flow_verdict, DecoratorKind, DefaultRule, FlowVerdict};
pub use gesture::GesturePriority;
pub use instantiate::lower_custom_component;
pub use oracle::{DefaultOracle, ModuleResolver, NoModules, TableResolver, TypeClass, TypeOracle};
pub use orchestrate::{lower_source_file, LoweredFile};
pub use registry::{ComponentDescriptor, ComponentRegistry};
pub use scan::scan_file;
pub use statement::lower_block;
pub use struct_lower::lower_struct;
