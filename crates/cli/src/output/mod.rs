//! Output formatting utilities
//!
//! This module provides formatters for CLI output in both human-readable
//! and JSON formats, plus the spinners shown while requests are in flight.

mod formatter;
mod progress;

pub use formatter::Formatter;
pub use progress::ProgressBar;

use dbx_core::config::{ColorMode, Defaults, OutputFormat};

/// Output configuration derived from CLI flags and config defaults
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Use JSON output format
    pub json: bool,
    /// Disable colored output
    pub no_color: bool,
    /// Color even when output is not a terminal
    pub force_color: bool,
    /// Disable progress spinners
    pub no_progress: bool,
    /// Suppress non-error output
    pub quiet: bool,
}

impl OutputConfig {
    /// Fold the configuration file's defaults into flags the user did not set
    pub fn with_defaults(mut self, defaults: &Defaults) -> Self {
        self.json |= defaults.output == OutputFormat::Json;
        match defaults.color {
            ColorMode::Never => self.no_color = true,
            ColorMode::Always => self.force_color = !self.no_color,
            ColorMode::Auto => {}
        }
        self.no_progress |= !defaults.progress;
        self
    }

    /// Override terminal detection for both streams when color is forced
    pub fn apply_color_mode(&self) {
        if self.force_color && !self.no_color {
            console::set_colors_enabled(true);
            console::set_colors_enabled_stderr(true);
        }
    }
}
