//! Integration tests for Layer 2: Lowering
//!
//! Tests for the element registry, decorator rules, attribute-chain
//! binding, statement processing, and custom-component instantiation.

mod chains;
mod decorators;
