//! Solver dispatch configuration.
//!
//! Selects between the dense and sparse LU paths. Both produce the same
//! solution within rounding, so the choice only affects speed.

use crate::linear::SPARSE_THRESHOLD;

/// Solver dispatch configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    /// Solver strategy selection.
    pub strategy: SolverStrategy,
    /// System size at or above which `Auto` picks the sparse solver.
    pub sparse_threshold: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            strategy: SolverStrategy::Auto,
            sparse_threshold: SPARSE_THRESHOLD,
        }
    }
}

impl SolverConfig {
    /// Always use the dense LU solver.
    pub fn dense() -> Self {
        Self {
            strategy: SolverStrategy::Dense,
            ..Default::default()
        }
    }

    /// Always use the sparse LU solver.
    pub fn sparse() -> Self {
        Self {
            strategy: SolverStrategy::Sparse,
            ..Default::default()
        }
    }

    /// Set the solver strategy.
    pub fn with_strategy(mut self, strategy: SolverStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the sparse threshold.
    pub fn with_sparse_threshold(mut self, threshold: usize) -> Self {
        self.sparse_threshold = threshold;
        self
    }

    /// Decide whether to use the sparse solver for a given system size.
    pub fn use_sparse(&self, size: usize) -> bool {
        match self.strategy {
            SolverStrategy::Dense => false,
            SolverStrategy::Sparse => true,
            SolverStrategy::Auto => size >= self.sparse_threshold,
        }
    }

    /// Get a human-readable description of the dispatch decision for a size.
    pub fn describe(&self, size: usize) -> String {
        let solver = if self.use_sparse(size) {
            "Sparse LU"
        } else {
            "Dense LU"
        };
        format!("{} for {} unknowns", solver, size)
    }
}

/// Solver strategy for dispatch decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolverStrategy {
    /// Select by system size.
    #[default]
    Auto,
    /// Always use dense LU factorization.
    Dense,
    /// Always use sparse LU factorization.
    Sparse,
}

impl SolverStrategy {
    /// Parse from a string.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "dense" | "lu" | "direct" => Some(Self::Dense),
            "sparse" | "splu" => Some(Self::Sparse),
            _ => None,
        }
    }
}
