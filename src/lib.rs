//! Weft - declarative UI lowering compiler
//!
//! This crate re-exports all layers of the Weft system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: weft_lower      — Registry, collections, binder, statement
//!                            processor, instantiator, class lowering
//! Layer 1: weft_syntax     — AST, node builders, pretty printer
//! Layer 0: weft_foundation — Spans, diagnostics, config, errors
//! ```

pub use weft_foundation as foundation;
pub use weft_lower as lower;
pub use weft_syntax as syntax;
