//! DC operating point: solve a circuit and extract per-element quantities.

use indexmap::IndexMap;
use nalgebra::DVector;
use serde::Serialize;
use voltaic_core::{Circuit, Node, NodeIndex, check_dc_paths};

use crate::dispatch::SolverConfig;
use crate::error::{Error, Result};
use crate::linear::{solve_dense, solve_sparse};

/// Current through a resistor, positive when it flows from `n1` to `n2`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResistorCurrent {
    /// Current in amperes.
    pub current: f64,
    pub n1: String,
    pub n2: String,
    /// Resistance in ohms.
    pub resistance: f64,
}

impl ResistorCurrent {
    /// Dissipated power, I²R.
    pub fn power(&self) -> f64 {
        self.current * self.current * self.resistance
    }
}

/// Result of a DC operating point analysis.
///
/// All maps are keyed by label or element name. Elements sharing a name
/// share one entry, holding the value of the last one solved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DcSolution {
    /// Node voltages, reference node first, then unknowns in label order.
    pub voltages: IndexMap<String, f64>,
    /// Resistor currents in insertion order.
    pub resistor_currents: IndexMap<String, ResistorCurrent>,
    /// Voltage source branch currents in insertion order.
    ///
    /// A negative value means current leaves the positive terminal into the
    /// circuit, i.e. the source delivers power.
    pub vsource_currents: IndexMap<String, f64>,
    #[serde(skip)]
    raw: DVector<f64>,
}

impl DcSolution {
    fn extract(circuit: &Circuit, index: &NodeIndex, x: DVector<f64>) -> Self {
        let num_nodes = index.len();

        let mut voltages = IndexMap::with_capacity(num_nodes + 1);
        voltages.insert(Node::GROUND_LABEL.to_string(), 0.0);
        for (i, node) in index.unknowns().iter().enumerate() {
            voltages.insert(node.to_string(), x[i]);
        }

        let mut resistor_currents = IndexMap::with_capacity(circuit.resistors().len());
        for r in circuit.resistors() {
            let v1 = voltages.get(r.n1.as_str()).copied().unwrap_or(0.0);
            let v2 = voltages.get(r.n2.as_str()).copied().unwrap_or(0.0);
            resistor_currents.insert(
                r.name.clone(),
                ResistorCurrent {
                    current: (v1 - v2) / r.resistance,
                    n1: r.n1.to_string(),
                    n2: r.n2.to_string(),
                    resistance: r.resistance,
                },
            );
        }

        let vsource_currents = circuit
            .vsources()
            .iter()
            .enumerate()
            .map(|(k, vs)| (vs.name.clone(), x[num_nodes + k]))
            .collect();

        Self {
            voltages,
            resistor_currents,
            vsource_currents,
            raw: x,
        }
    }

    /// Get the voltage at a node. `GND` is accepted for the reference node.
    pub fn voltage(&self, node: &str) -> Option<f64> {
        self.voltages.get(Node::new(node).as_str()).copied()
    }

    pub fn resistor_current(&self, name: &str) -> Option<&ResistorCurrent> {
        self.resistor_currents.get(name)
    }

    pub fn vsource_current(&self, name: &str) -> Option<f64> {
        self.vsource_currents.get(name).copied()
    }

    /// Total power dissipated in resistors.
    pub fn total_power(&self) -> f64 {
        self.resistor_currents.values().map(ResistorCurrent::power).sum()
    }

    /// Total power delivered by the sources of `circuit`.
    ///
    /// Equals [`total_power`](Self::total_power) up to rounding when
    /// `circuit` is the circuit this solution was computed from.
    pub fn delivered_power(&self, circuit: &Circuit) -> f64 {
        let v = |node: &Node| self.voltages.get(node.as_str()).copied().unwrap_or(0.0);

        let from_vsources: f64 = circuit
            .vsources()
            .iter()
            .map(|vs| -vs.voltage * self.vsource_current(&vs.name).unwrap_or(0.0))
            .sum();
        let from_isources: f64 = circuit
            .isources()
            .iter()
            .map(|src| src.current * (v(&src.n_minus) - v(&src.n_plus)))
            .sum();

        from_vsources + from_isources
    }

    /// The raw solution vector: node voltages then branch currents.
    pub fn raw(&self) -> &DVector<f64> {
        &self.raw
    }
}

/// Solve the DC operating point with the default solver configuration.
pub fn solve(circuit: &Circuit) -> Result<DcSolution> {
    solve_with(circuit, &SolverConfig::default())
}

/// Solve the DC operating point.
///
/// Floating nodes and voltage source loops are rejected before factoring, so
/// the dense and sparse paths fail on the same circuits. The circuit is only
/// read; on failure it can be edited and solved again.
pub fn solve_with(circuit: &Circuit, config: &SolverConfig) -> Result<DcSolution> {
    check_dc_paths(circuit).map_err(|e| Error::SingularMatrix(e.to_string()))?;

    let (mna, index) = circuit.assemble_mna();
    let size = mna.size();
    log::debug!("DC solve: {}", config.describe(size));

    let rhs = mna.rhs();
    let x = if config.use_sparse(size) {
        solve_sparse(size, &mna.triplets(), &rhs)
    } else {
        solve_dense(&mna.matrix(), &rhs)
    }
    .map_err(|e| match e {
        Error::SingularMatrix(reason) => Error::SingularMatrix(format!(
            "{reason} (check that every node has a DC path to ground)"
        )),
        other => other,
    })?;

    Ok(DcSolution::extract(circuit, &index, x))
}
