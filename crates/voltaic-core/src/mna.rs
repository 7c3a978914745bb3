//! Modified Nodal Analysis (MNA) matrix structures.

use std::collections::HashMap;

use nalgebra::{DMatrix, DVector};

use crate::node::Node;

/// Mapping from node labels to unknown indices.
///
/// Non-reference nodes are numbered `0..N` in label order; the reference node
/// has no index.
#[derive(Debug, Clone, Default)]
pub struct NodeIndex {
    unknowns: Vec<Node>,
    index: HashMap<Node, usize>,
}

impl NodeIndex {
    /// Build the index from a set of nodes. Ground and duplicates are dropped.
    pub fn new<'a>(nodes: impl IntoIterator<Item = &'a Node>) -> Self {
        let mut unknowns: Vec<Node> = nodes
            .into_iter()
            .filter(|n| !n.is_ground())
            .cloned()
            .collect();
        unknowns.sort();
        unknowns.dedup();

        let index = unknowns
            .iter()
            .enumerate()
            .map(|(i, n)| (n.clone(), i))
            .collect();

        Self { unknowns, index }
    }

    /// Matrix row of a node, or `None` for the reference node.
    pub fn get(&self, node: &Node) -> Option<usize> {
        if node.is_ground() {
            None
        } else {
            self.index.get(node.as_str()).copied()
        }
    }

    /// Non-reference nodes in unknown order.
    pub fn unknowns(&self) -> &[Node] {
        &self.unknowns
    }

    /// Number of non-reference nodes.
    pub fn len(&self) -> usize {
        self.unknowns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.unknowns.is_empty()
    }
}

/// MNA system in block form:
///
/// ```text
/// [ G   B ] [ v ]   [ I ]
/// [ Bᵗ  0 ] [ j ] = [ E ]
/// ```
///
/// `v` holds the node voltages and `j` the voltage source branch currents.
/// Without voltage sources the system reduces to `G v = I`.
#[derive(Debug, Clone)]
pub struct MnaSystem {
    /// Conductance matrix (N×N).
    pub g: DMatrix<f64>,
    /// Voltage source incidence matrix (N×M).
    pub b: DMatrix<f64>,
    /// Injected node currents (N).
    pub i: DVector<f64>,
    /// Voltage source values (M).
    pub e: DVector<f64>,
    /// Number of nodes (excluding ground).
    pub num_nodes: usize,
    /// Number of voltage sources.
    pub num_vsources: usize,
}

impl MnaSystem {
    /// Create a new MNA system with the given dimensions.
    ///
    /// # Arguments
    /// * `num_nodes` - Number of nodes excluding ground
    /// * `num_vsources` - Number of voltage sources (adds current variables)
    pub fn new(num_nodes: usize, num_vsources: usize) -> Self {
        Self {
            g: DMatrix::zeros(num_nodes, num_nodes),
            b: DMatrix::zeros(num_nodes, num_vsources),
            i: DVector::zeros(num_nodes),
            e: DVector::zeros(num_vsources),
            num_nodes,
            num_vsources,
        }
    }

    /// Get the total size of the system (nodes + current variables).
    pub fn size(&self) -> usize {
        self.num_nodes + self.num_vsources
    }

    /// Stamp a conductance between two nodes.
    ///
    /// For a conductance g between nodes i and j:
    /// - G[i,i] += g
    /// - G[j,j] += g
    /// - G[i,j] -= g
    /// - G[j,i] -= g
    ///
    /// `None` stands for the reference node, whose row and column are absent.
    pub fn stamp_conductance(&mut self, node_i: Option<usize>, node_j: Option<usize>, g: f64) {
        if let Some(i) = node_i {
            self.g[(i, i)] += g;
        }
        if let Some(j) = node_j {
            self.g[(j, j)] += g;
        }
        if let (Some(i), Some(j)) = (node_i, node_j) {
            self.g[(i, j)] -= g;
            self.g[(j, i)] -= g;
        }
    }

    /// Stamp a current source that draws `current` out of `node_plus` and
    /// injects it into `node_minus`.
    pub fn stamp_current_source(
        &mut self,
        node_plus: Option<usize>,
        node_minus: Option<usize>,
        current: f64,
    ) {
        if let Some(p) = node_plus {
            self.i[p] -= current;
        }
        if let Some(m) = node_minus {
            self.i[m] += current;
        }
    }

    /// Stamp voltage source `vsource_idx` between two nodes.
    pub fn stamp_voltage_source(
        &mut self,
        node_plus: Option<usize>,
        node_minus: Option<usize>,
        vsource_idx: usize,
        voltage: f64,
    ) {
        self.e[vsource_idx] = voltage;
        if let Some(p) = node_plus {
            self.b[(p, vsource_idx)] += 1.0;
        }
        if let Some(m) = node_minus {
            self.b[(m, vsource_idx)] -= 1.0;
        }
    }

    /// Build the dense coefficient matrix.
    pub fn matrix(&self) -> DMatrix<f64> {
        let n = self.num_nodes;
        let m = self.num_vsources;
        if m == 0 {
            return self.g.clone();
        }

        let mut a = DMatrix::zeros(n + m, n + m);
        a.view_mut((0, 0), (n, n)).copy_from(&self.g);
        a.view_mut((0, n), (n, m)).copy_from(&self.b);
        a.view_mut((n, 0), (m, n)).copy_from(&self.b.transpose());
        a
    }

    /// Build the stacked right-hand side `[I; E]`.
    pub fn rhs(&self) -> DVector<f64> {
        DVector::from_iterator(self.size(), self.i.iter().chain(self.e.iter()).copied())
    }

    /// Nonzero entries of the coefficient matrix as `(row, col, value)`.
    pub fn triplets(&self) -> Vec<(usize, usize, f64)> {
        let n = self.num_nodes;
        let mut triplets = Vec::new();

        for col in 0..n {
            for row in 0..n {
                let v = self.g[(row, col)];
                if v != 0.0 {
                    triplets.push((row, col, v));
                }
            }
        }

        for k in 0..self.num_vsources {
            for row in 0..n {
                let v = self.b[(row, k)];
                if v != 0.0 {
                    triplets.push((row, n + k, v));
                    triplets.push((n + k, row, v));
                }
            }
        }

        triplets
    }
}
