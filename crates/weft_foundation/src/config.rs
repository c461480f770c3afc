//! Lowering configuration.
//!
//! One immutable configuration value is built by the external driver and
//! threaded through the pass via the compilation context, replacing
//! per-function boolean flag parameters.

/// Configuration for one lowering pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LowerConfig {
    /// Emit element-id-addressed, idempotent re-render paths instead of
    /// full-rebuild create sequences.
    pub partial_update: bool,
    /// Preview/accelerated mode: suppresses debug-position notes and
    /// some non-essential diagnostics.
    pub preview: bool,
}

impl LowerConfig {
    /// Creates a full-rebuild configuration.
    #[must_use]
    pub fn full_rebuild() -> Self {
        Self {
            partial_update: false,
            preview: false,
        }
    }

    /// Creates a partial-update configuration.
    #[must_use]
    pub fn partial() -> Self {
        Self {
            partial_update: true,
            preview: false,
        }
    }

    /// Returns a copy with preview mode enabled.
    #[must_use]
    pub fn with_preview(mut self) -> Self {
        self.preview = true;
        self
    }
}
