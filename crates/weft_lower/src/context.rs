//! The compilation context threaded through the lowering pass.
//!
//! One context owns every piece of cross-statement state for a pass: the
//! lowering configuration, the element registry, the collection tables,
//! the builder tables, the id generator, and the diagnostic sink.
//! Constructing a fresh context is the reset between independent runs;
//! watch-mode drivers may instead call [`CompilationContext::reset`] to
//! clear the mutable tables in place.

use weft_foundation::{DiagnosticSink, LowerConfig};

use crate::collections::{BuilderTable, ComponentCollection, DecoratorCollections, IdGenerator};
use crate::oracle::TypeOracle;
use crate::registry::ComponentRegistry;

/// All state for one lowering pass.
pub struct CompilationContext<'a> {
    /// The immutable lowering configuration.
    pub config: LowerConfig,
    /// Static built-in element catalog.
    pub registry: ComponentRegistry,
    /// Per-component decorator property tables.
    pub collections: DecoratorCollections,
    /// Custom components, entry component, and the current struct.
    pub components: ComponentCollection,
    /// Builder, style, and extend function tables.
    pub builders: BuilderTable,
    /// Deterministic synthetic-id generator.
    pub ids: IdGenerator,
    /// Append-only diagnostic accumulator.
    pub sink: DiagnosticSink,
    /// The type-check oracle supplied by the host compiler.
    pub oracle: &'a dyn TypeOracle,
}

impl<'a> CompilationContext<'a> {
    /// Creates a fresh context for one pass.
    #[must_use]
    pub fn new(config: LowerConfig, oracle: &'a dyn TypeOracle) -> Self {
        Self {
            config,
            registry: ComponentRegistry::new(),
            collections: DecoratorCollections::new(),
            components: ComponentCollection::new(),
            builders: BuilderTable::new(),
            ids: IdGenerator::new(),
            sink: DiagnosticSink::new(),
            oracle,
        }
    }

    /// Clears every mutable table for reuse between independent runs.
    ///
    /// The registry is static and survives; everything populated by a
    /// scan or accumulated during lowering is dropped.
    pub fn reset(&mut self) {
        self.collections.clear();
        self.components.clear();
        self.builders.clear();
        self.ids.reset();
        self.sink.clear();
    }
}
