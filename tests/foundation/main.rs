//! Integration tests for Layer 0: Foundation
//!
//! Tests for spans, diagnostics, lowering configuration, and errors.

mod diagnostics;
