//! Core types for the Weft UI lowering pipeline.
//!
//! This crate provides:
//! - `Span` - Source position tracking for diagnostics
//! - `Diagnostic` / `DiagnosticSink` - Accumulated user-facing problems
//! - `Error` - Infrastructure failures that abort a pass
//! - `LowerConfig` - The immutable lowering configuration

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod diagnostic;
pub mod error;
pub mod span;

pub use config::LowerConfig;
pub use diagnostic::{Diagnostic, DiagnosticCode, DiagnosticSink, Severity};
pub use error::{Error, ErrorKind, Result};
pub use span::Span;
