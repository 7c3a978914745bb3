//! Output formatting for DC results.

use std::fmt::{self, Write};

use voltaic_core::{Circuit, format_value};
use voltaic_parser::ParseWarning;
use voltaic_solver::DcSolution;

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Render a DC solution as a human-readable report.
pub fn render_dc_solution(circuit: &Circuit, solution: &DcSolution) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_dc_solution(&mut out, circuit, solution);
    out
}

/// Write the DC report: node voltages sorted by label, then resistor and
/// source currents, then the power totals.
pub fn write_dc_solution(
    out: &mut impl Write,
    circuit: &Circuit,
    solution: &DcSolution,
) -> fmt::Result {
    writeln!(out, "DC Operating Point Analysis")?;
    writeln!(out, "===========================")?;
    writeln!(out)?;

    let mut voltages: Vec<_> = solution.voltages.iter().collect();
    voltages.sort_by(|a, b| a.0.cmp(b.0));

    writeln!(out, "Node Voltages:")?;
    for (node, v) in voltages {
        writeln!(out, "  V({node}) = {}V", format_value(*v))?;
    }

    if !solution.resistor_currents.is_empty() {
        writeln!(out)?;
        writeln!(out, "Resistor Currents (positive from n1 to n2):")?;
        for (name, rc) in &solution.resistor_currents {
            writeln!(
                out,
                "  I({name}) = {}A  ({} -> {}), P = {}W",
                format_value(rc.current),
                rc.n1,
                rc.n2,
                format_value(rc.power())
            )?;
        }
    }

    if !solution.vsource_currents.is_empty() {
        writeln!(out)?;
        writeln!(out, "Voltage Source Currents:")?;
        for (name, i) in &solution.vsource_currents {
            writeln!(out, "  I({name}) = {}A", format_value(*i))?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Total dissipated power: {}W", format_value(solution.total_power()))?;
    writeln!(
        out,
        "Total delivered power:  {}W",
        format_value(solution.delivered_power(circuit))
    )
}

/// Render a DC solution as pretty-printed JSON.
pub fn render_json(solution: &DcSolution) -> serde_json::Result<String> {
    serde_json::to_string_pretty(solution)
}

/// Print parse warnings to stderr.
pub fn print_warnings(warnings: &[ParseWarning]) {
    for warning in warnings {
        eprintln!("Warning: {warning}");
    }
}
