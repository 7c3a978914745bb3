//! Line-oriented netlist parser.
//!
//! Each non-blank, non-comment line describes one element:
//!
//! ```text
//! <name> <node1> <node2> <value>
//! ```
//!
//! The first letter of the name selects the element kind. Tokens after the
//! value are ignored.

use std::fs;
use std::path::Path;

use voltaic_core::{Circuit, Element, ElementKind, parse_value};

use crate::error::{Error, Result};

pub mod types;

pub use types::{ParseOptions, ParseResult, ParseWarning};

/// Characters that start a comment line.
const COMMENT_CHARS: [char; 3] = ['#', '*', ';'];

/// Parse a netlist string, skipping unrecognized lines with a warning.
pub fn parse(input: &str) -> Result<ParseResult> {
    parse_with(input, &ParseOptions::default())
}

/// Parse a netlist string with explicit options.
pub fn parse_with(input: &str, options: &ParseOptions) -> Result<ParseResult> {
    parse_lines_with(input.lines(), options)
}

/// Parse a netlist given as a sequence of lines.
pub fn parse_lines<I, S>(lines: I) -> Result<ParseResult>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parse_lines_with(lines, &ParseOptions::default())
}

/// Parse a sequence of lines with explicit options.
///
/// Fails on the first value that cannot be parsed; no partial circuit is
/// returned.
pub fn parse_lines_with<I, S>(lines: I, options: &ParseOptions) -> Result<ParseResult>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut circuit = Circuit::new();
    let mut warnings = Vec::new();

    for (idx, raw) in lines.into_iter().enumerate() {
        let line_num = idx + 1;
        let line = raw.as_ref().trim();

        if line.is_empty() || line.starts_with(|c: char| COMMENT_CHARS.contains(&c)) {
            continue;
        }

        match parse_element(line, line_num)? {
            Some(element) => circuit.add_element(element),
            None if options.strict => {
                return Err(Error::UnrecognizedLine {
                    line: line_num,
                    content: line.to_string(),
                });
            }
            None => {
                log::warn!("line {line_num}: skipping unrecognized line '{line}'");
                warnings.push(ParseWarning {
                    line: line_num,
                    content: line.to_string(),
                });
            }
        }
    }

    log::debug!(
        "parsed netlist: {} elements, {} nodes, {} warnings",
        circuit.num_elements(),
        circuit.node_count(),
        warnings.len()
    );

    Ok(ParseResult { circuit, warnings })
}

/// Parse one element line. Returns `None` for a line that is not an element.
fn parse_element(line: &str, line_num: usize) -> Result<Option<Element>> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [name, n1, n2, value, ..] = tokens.as_slice() else {
        return Ok(None);
    };
    let Some(kind) = ElementKind::from_name(name) else {
        return Ok(None);
    };

    let value = parse_value(value).map_err(|source| Error::InvalidValue {
        line: line_num,
        content: line.to_string(),
        source,
    })?;

    Ok(Some(Element::new(kind, *name, *n1, *n2, value)))
}

/// Read and parse a netlist file.
pub fn load_netlist(path: impl AsRef<Path>) -> Result<ParseResult> {
    load_netlist_with(path, &ParseOptions::default())
}

/// Read and parse a netlist file with explicit options.
pub fn load_netlist_with(path: impl AsRef<Path>, options: &ParseOptions) -> Result<ParseResult> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("loaded netlist from {}", path.display());
    parse_with(&text, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use voltaic_core::Node;

    #[test]
    fn test_parse_divider() {
        let result = parse(
            "* divider\n\
             V1 1 0 12\n\
             R1 1 2 1k\n\
             R2 2 0 2k\n",
        )
        .unwrap();

        let circuit = &result.circuit;
        assert_eq!(circuit.num_elements(), 3);
        assert_eq!(circuit.vsources()[0].voltage, 12.0);
        assert_eq!(circuit.resistors()[0].resistance, 1000.0);
        assert_eq!(circuit.resistors()[1].n2, Node::ground());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let result = parse("# hash\n\n   \n* star\n  ; semicolon\nR1 1 0 1\n").unwrap();
        assert_eq!(result.circuit.num_elements(), 1);
        assert!(!result.has_warnings());
    }

    #[test]
    fn test_lowercase_names() {
        let result = parse("v1 a 0 5\nr1 a b 10\ni1 b 0 1m\n").unwrap();
        let circuit = &result.circuit;
        assert_eq!(circuit.vsources().len(), 1);
        assert_eq!(circuit.resistors().len(), 1);
        assert_eq!(circuit.isources().len(), 1);
        assert_eq!(circuit.isources()[0].current, 1e-3);
    }

    #[test]
    fn test_extra_tokens_ignored() {
        let result = parse("R1 1 0 100 tc=0.01 extra\n").unwrap();
        assert_eq!(result.circuit.resistors()[0].resistance, 100.0);
    }

    #[test]
    fn test_unknown_line_warns() {
        let result = parse("V1 1 0 5\nC1 1 0 1u\nR1 1 0 1k\nR2 1\n").unwrap();

        assert_eq!(result.circuit.num_elements(), 2);
        assert_eq!(
            result.warnings,
            vec![
                ParseWarning {
                    line: 2,
                    content: "C1 1 0 1u".into()
                },
                ParseWarning {
                    line: 4,
                    content: "R2 1".into()
                },
            ]
        );
    }

    #[test]
    fn test_strict_rejects_unknown_line() {
        let err = parse_with("R1 1 0 1k\n.op\n", &ParseOptions::strict()).unwrap_err();
        match err {
            Error::UnrecognizedLine { line, content } => {
                assert_eq!(line, 2);
                assert_eq!(content, ".op");
            }
            other => panic!("expected UnrecognizedLine, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_value_reports_line() {
        let err = parse("V1 1 0 5\nR1 1 0 abc\n").unwrap_err();
        assert_eq!(err.line(), Some(2));
        match err {
            Error::InvalidValue { content, source, .. } => {
                assert_eq!(content, "R1 1 0 abc");
                assert_eq!(source, voltaic_core::Error::InvalidValue("abc".into()));
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_lines() {
        let lines = vec!["V1 1 0 3.3".to_string(), "R1 1 0 330".to_string()];
        let result = parse_lines(&lines).unwrap();
        assert_eq!(result.circuit.num_elements(), 2);
    }

    #[test]
    fn test_gnd_alias() {
        let result = parse("V1 in GND 1\nR1 in gnd 1k\n").unwrap();
        assert_eq!(result.circuit.node_count(), 1);
        assert!(result.circuit.resistors()[0].n2.is_ground());
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_netlist("/nonexistent/voltaic/netlist.cir").unwrap_err();
        assert!(matches!(err, Error::Io { .. }), "got {err:?}");
        assert_eq!(err.line(), None);
    }
}
