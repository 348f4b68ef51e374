//! Output formatting utilities
//!
//! This module provides the formatter for CLI output in both human-readable
//! and JSON formats.

mod formatter;

pub use formatter::Formatter;

/// Output configuration derived from CLI flags
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Use JSON output format
    pub json: bool,
    /// Disable colored output
    pub no_color: bool,
    /// Suppress non-error output
    pub quiet: bool,
    /// Print resolved settings before the call
    pub verbose: bool,
}

impl OutputConfig {
    /// Colors are used unless disabled or JSON output is requested
    pub fn colors_enabled(&self) -> bool {
        !self.no_color && !self.json
    }
}
