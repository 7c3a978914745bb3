//! Linear solvers and DC result extraction for Voltaic.
//!
//! This crate provides:
//! - Dense (nalgebra LU) and sparse (faer LU) linear solvers
//! - Size-based dispatch between the two
//! - The DC solve pipeline that turns a [`Circuit`](voltaic_core::Circuit)
//!   into node voltages, resistor currents and voltage source currents

pub mod dc;
pub mod dispatch;
pub mod error;
pub mod linear;

pub use dc::{DcSolution, ResistorCurrent, solve, solve_with};
pub use dispatch::{SolverConfig, SolverStrategy};
pub use error::{Error, Result};
