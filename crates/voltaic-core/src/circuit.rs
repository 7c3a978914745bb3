//! Circuit model: elements plus the node set they reference.

use std::collections::BTreeSet;

use crate::element::{CurrentSource, Element, Resistor, VoltageSource};
use crate::error::{Error, Result};
use crate::mna::{MnaSystem, NodeIndex};
use crate::node::Node;

/// A linear DC circuit.
///
/// Elements are kept in insertion order per kind. The order of the voltage
/// sources decides which auxiliary unknown each one owns in the MNA system.
///
/// Element names are used as keys in solve results, so two elements sharing
/// a name overwrite each other's result entries. Keeping names unique is the
/// caller's job.
#[derive(Debug, Clone)]
pub struct Circuit {
    resistors: Vec<Resistor>,
    vsources: Vec<VoltageSource>,
    isources: Vec<CurrentSource>,
    nodes: BTreeSet<Node>,
}

impl Default for Circuit {
    fn default() -> Self {
        Self::new()
    }
}

impl Circuit {
    /// Create a new empty circuit. The reference node is always present.
    pub fn new() -> Self {
        let mut nodes = BTreeSet::new();
        nodes.insert(Node::ground());
        Self {
            resistors: Vec::new(),
            vsources: Vec::new(),
            isources: Vec::new(),
            nodes,
        }
    }

    fn register_nodes(&mut self, a: &Node, b: &Node) {
        self.nodes.insert(a.clone());
        self.nodes.insert(b.clone());
    }

    /// Add a resistor between `n1` and `n2`.
    pub fn add_resistor(
        &mut self,
        name: impl Into<String>,
        n1: impl Into<Node>,
        n2: impl Into<Node>,
        resistance: f64,
    ) {
        self.add_element(Resistor::new(name, n1, n2, resistance));
    }

    /// Add a voltage source with `n_plus` held `voltage` volts above `n_minus`.
    pub fn add_vsource(
        &mut self,
        name: impl Into<String>,
        n_plus: impl Into<Node>,
        n_minus: impl Into<Node>,
        voltage: f64,
    ) {
        self.add_element(VoltageSource::new(name, n_plus, n_minus, voltage));
    }

    /// Add a current source drawing `current` from `n_plus` into `n_minus`.
    pub fn add_isource(
        &mut self,
        name: impl Into<String>,
        n_plus: impl Into<Node>,
        n_minus: impl Into<Node>,
        current: f64,
    ) {
        self.add_element(CurrentSource::new(name, n_plus, n_minus, current));
    }

    /// Add any element, registering both of its nodes.
    pub fn add_element(&mut self, element: impl Into<Element>) {
        match element.into() {
            Element::Resistor(r) => {
                self.register_nodes(&r.n1, &r.n2);
                self.resistors.push(r);
            }
            Element::VoltageSource(v) => {
                self.register_nodes(&v.n_plus, &v.n_minus);
                self.vsources.push(v);
            }
            Element::CurrentSource(i) => {
                self.register_nodes(&i.n_plus, &i.n_minus);
                self.isources.push(i);
            }
        }
    }

    /// Change the value of every element named `name`.
    ///
    /// Topology is untouched, so the circuit can be re-solved right away.
    pub fn set_value(&mut self, name: &str, value: f64) -> Result<()> {
        let mut found = false;
        for r in self.resistors.iter_mut().filter(|r| r.name == name) {
            r.resistance = value;
            found = true;
        }
        for v in self.vsources.iter_mut().filter(|v| v.name == name) {
            v.voltage = value;
            found = true;
        }
        for i in self.isources.iter_mut().filter(|i| i.name == name) {
            i.current = value;
            found = true;
        }

        if found {
            Ok(())
        } else {
            Err(Error::ElementNotFound(name.to_string()))
        }
    }

    pub fn resistors(&self) -> &[Resistor] {
        &self.resistors
    }

    pub fn vsources(&self) -> &[VoltageSource] {
        &self.vsources
    }

    pub fn isources(&self) -> &[CurrentSource] {
        &self.isources
    }

    /// All elements, resistors first, then voltage and current sources.
    pub fn elements(&self) -> impl Iterator<Item = Element> + '_ {
        self.resistors
            .iter()
            .cloned()
            .map(Element::from)
            .chain(self.vsources.iter().cloned().map(Element::from))
            .chain(self.isources.iter().cloned().map(Element::from))
    }

    /// The node set, in label order. Always contains the reference node.
    pub fn nodes(&self) -> &BTreeSet<Node> {
        &self.nodes
    }

    pub fn has_node(&self, label: &str) -> bool {
        self.nodes.contains(Node::new(label).as_str())
    }

    /// Number of nodes excluding ground.
    pub fn node_count(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn num_elements(&self) -> usize {
        self.resistors.len() + self.vsources.len() + self.isources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.num_elements() == 0
    }

    /// Index of the solve unknowns for the current node set.
    pub fn node_index(&self) -> NodeIndex {
        NodeIndex::new(&self.nodes)
    }

    /// Assemble the MNA system for this circuit.
    ///
    /// Returns the system together with the node index used to build it.
    pub fn assemble_mna(&self) -> (MnaSystem, NodeIndex) {
        let index = self.node_index();
        let mut mna = MnaSystem::new(index.len(), self.vsources.len());

        for r in &self.resistors {
            mna.stamp_conductance(index.get(&r.n1), index.get(&r.n2), r.conductance());
        }

        for src in &self.isources {
            mna.stamp_current_source(index.get(&src.n_plus), index.get(&src.n_minus), src.current);
        }

        for (k, vs) in self.vsources.iter().enumerate() {
            mna.stamp_voltage_source(index.get(&vs.n_plus), index.get(&vs.n_minus), k, vs.voltage);
        }

        log::trace!(
            "assembled MNA system: {} nodes, {} voltage sources",
            mna.num_nodes,
            mna.num_vsources
        );

        (mna, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_circuit_has_ground() {
        let circuit = Circuit::new();
        assert!(circuit.has_node("0"));
        assert_eq!(circuit.node_count(), 0);
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_add_registers_nodes() {
        let mut circuit = Circuit::new();
        circuit.add_resistor("R1", "1", "2", 100.0);
        circuit.add_vsource("V1", "1", "GND", 5.0);
        circuit.add_isource("I1", "3", "0", 1e-3);

        let labels: Vec<_> = circuit.nodes().iter().map(Node::as_str).collect();
        assert_eq!(labels, ["0", "1", "2", "3"]);
        assert_eq!(circuit.node_count(), 3);
        assert_eq!(circuit.num_elements(), 3);
        assert!(circuit.has_node("gnd"));
    }

    #[test]
    fn test_gnd_alias_in_elements() {
        let mut circuit = Circuit::new();
        circuit.add_vsource("V1", "1", "gnd", 5.0);
        assert!(circuit.vsources()[0].n_minus.is_ground());
        // "gnd" does not become a separate node
        assert_eq!(circuit.nodes().len(), 2);
        assert_eq!(circuit.node_count(), 1);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut circuit = Circuit::new();
        circuit.add_vsource("Vb", "2", "0", 1.0);
        circuit.add_vsource("Va", "1", "0", 2.0);

        let names: Vec<_> = circuit.vsources().iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["Vb", "Va"]);
    }

    #[test]
    fn test_set_value() {
        let mut circuit = Circuit::new();
        circuit.add_resistor("R1", "1", "0", 100.0);
        circuit.add_vsource("V1", "1", "0", 5.0);

        circuit.set_value("R1", 220.0).unwrap();
        circuit.set_value("V1", 3.3).unwrap();
        assert_eq!(circuit.resistors()[0].resistance, 220.0);
        assert_eq!(circuit.vsources()[0].voltage, 3.3);

        assert_eq!(
            circuit.set_value("R9", 1.0),
            Err(Error::ElementNotFound("R9".into()))
        );
    }

    #[test]
    fn test_assemble_divider() {
        // V1 1 0 12, R1 1 2 1k, R2 2 0 2k
        let mut circuit = Circuit::new();
        circuit.add_vsource("V1", "1", "0", 12.0);
        circuit.add_resistor("R1", "1", "2", 1000.0);
        circuit.add_resistor("R2", "2", "0", 2000.0);

        let (mna, index) = circuit.assemble_mna();
        assert_eq!(mna.size(), 3);
        assert_eq!(index.get(&Node::new("1")), Some(0));
        assert_eq!(index.get(&Node::new("2")), Some(1));

        let g1 = 1e-3;
        let g2 = 5e-4;
        assert!((mna.g[(0, 0)] - g1).abs() < 1e-15);
        assert!((mna.g[(1, 1)] - (g1 + g2)).abs() < 1e-15);
        assert!((mna.g[(0, 1)] + g1).abs() < 1e-15);
        assert_eq!(mna.b[(0, 0)], 1.0);
        assert_eq!(mna.e[0], 12.0);
    }

    #[test]
    fn test_assemble_current_source_sign() {
        let mut circuit = Circuit::new();
        circuit.add_isource("I1", "a", "b", 2.0);
        circuit.add_resistor("R1", "a", "0", 1.0);
        circuit.add_resistor("R2", "b", "0", 1.0);

        let (mna, _) = circuit.assemble_mna();
        assert_eq!(mna.i[0], -2.0);
        assert_eq!(mna.i[1], 2.0);
    }
}
