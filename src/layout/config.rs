//! Configuration for the layout engine

use super::types::Insets;

/// Configuration options for a [`RuleLayout`](super::RuleLayout)
#[derive(Debug, Clone, Default)]
pub struct LayoutConfig {
    /// Margins between the container bounds and the laid-out area
    pub margin: Insets,

    /// Run the diagnostic pass on the first evaluation after the rules change
    /// and log every finding
    pub diagnostics: bool,
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the container margins
    pub fn with_margin(mut self, margin: Insets) -> Self {
        self.margin = margin;
        self
    }

    /// Enable or disable the diagnostic pass
    pub fn with_diagnostics(mut self, diagnostics: bool) -> Self {
        self.diagnostics = diagnostics;
        self
    }
}
