//! End-to-end lowering tests
//!
//! Each scenario builds a whole parsed file, drives it through
//! `lower_source_file`, and checks the printed output together with the
//! accumulated diagnostics.

mod flow;
mod modules;
