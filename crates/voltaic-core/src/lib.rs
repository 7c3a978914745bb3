//! Core circuit representation and MNA assembly for Voltaic.
//!
//! This crate provides the data model for linear DC networks (nodes,
//! resistors, independent voltage and current sources), the SI value parser
//! used by the netlist reader, and the Modified Nodal Analysis (MNA) system
//! that the solver factors.

pub mod circuit;
pub mod element;
pub mod error;
pub mod mna;
pub mod node;
pub mod topology;
pub mod units;

pub use circuit::Circuit;
pub use element::{CurrentSource, Element, ElementKind, Resistor, VoltageSource};
pub use error::{Error, Result};
pub use mna::{MnaSystem, NodeIndex};
pub use node::Node;
pub use topology::check_dc_paths;
pub use units::{format_value, parse_value};
