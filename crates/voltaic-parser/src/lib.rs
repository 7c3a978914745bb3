//! Netlist parser for Voltaic.
//!
//! Reads the line-oriented netlist format (one resistor, voltage source or
//! current source per line) into a [`Circuit`](voltaic_core::Circuit).
//!
//! # Example
//!
//! ```
//! use voltaic_parser::parse;
//!
//! let result = parse(r#"
//! * Voltage divider
//! V1 1 0 12
//! R1 1 2 1k
//! R2 2 0 2k
//! "#).unwrap();
//!
//! assert_eq!(result.circuit.num_elements(), 3);
//! assert!(result.warnings.is_empty());
//! ```

pub mod error;
pub mod parser;

pub use error::{Error, Result};
pub use parser::{
    ParseOptions, ParseResult, ParseWarning, load_netlist, load_netlist_with, parse, parse_lines,
    parse_lines_with, parse_with,
};
