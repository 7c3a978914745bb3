//! Structural checks on circuit topology.
//!
//! With positive resistances the MNA matrix is singular exactly when a node
//! has no DC path to ground through resistors and voltage sources, or when
//! voltage sources form a loop. Both are detected here from the netlist
//! alone, so the answer does not depend on the pivoting of a factorization.

use std::collections::HashMap;

use crate::circuit::Circuit;
use crate::element::ElementKind;
use crate::error::{Error, Result};
use crate::node::Node;

/// Disjoint sets over node indices.
struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Merge the sets of `a` and `b`. Returns `false` if they were already one set.
    fn union(&mut self, a: usize, b: usize) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }
        self.parent[rb] = ra;
        true
    }
}

/// Check that the circuit has a unique DC operating point.
///
/// Fails with [`Error::VoltageSourceLoop`] for the first voltage source that
/// closes a loop of voltage sources, and with [`Error::NoDcPath`] for the
/// first node (in label order) that cannot reach ground through resistors or
/// voltage sources. Current sources do not provide a DC path.
pub fn check_dc_paths(circuit: &Circuit) -> Result<()> {
    let ids: HashMap<&Node, usize> = circuit.nodes().iter().zip(0..).collect();
    let id = |node: &Node| ids.get(node).copied().unwrap_or(0);

    let mut sources = UnionFind::new(ids.len());
    let mut paths = UnionFind::new(ids.len());

    for element in circuit.elements() {
        let [a, b] = element.nodes();
        let (a, b) = (id(a), id(b));
        match element.kind() {
            ElementKind::VoltageSource => {
                if !sources.union(a, b) {
                    return Err(Error::VoltageSourceLoop(element.name().to_string()));
                }
                paths.union(a, b);
            }
            ElementKind::Resistor => {
                paths.union(a, b);
            }
            ElementKind::CurrentSource => {}
        }
    }

    let ground = paths.find(id(&Node::ground()));
    for node in circuit.nodes().iter().filter(|n| !n.is_ground()) {
        if paths.find(id(node)) != ground {
            return Err(Error::NoDcPath(node.to_string()));
        }
    }

    Ok(())
}
