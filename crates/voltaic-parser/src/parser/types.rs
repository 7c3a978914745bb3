//! Public types for the netlist parser.

use std::fmt;

use voltaic_core::Circuit;

/// A line that was skipped because it is not a recognized element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    /// 1-based line number.
    pub line: usize,
    /// The line as written, without the trailing newline.
    pub content: String,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: unrecognized line skipped: '{}'", self.line, self.content)
    }
}

/// Result of parsing a netlist.
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// The parsed circuit.
    pub circuit: Circuit,
    /// Lines that were skipped, in file order.
    pub warnings: Vec<ParseWarning>,
}

impl ParseResult {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Parser options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Fail on unrecognized lines instead of skipping them with a warning.
    pub strict: bool,
}

impl ParseOptions {
    /// Options that reject unrecognized lines.
    pub fn strict() -> Self {
        Self { strict: true }
    }
}
