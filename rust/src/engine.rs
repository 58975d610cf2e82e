//! Interface to a flag-complex enumeration engine.
//!
//! The Betti scheduler and the pass-through statistics only talk to an engine
//! through [`FlagComplexEngine`], so any implementation (the built-in
//! [`crate::flagser::FlagserEngine`], a binding to an external library, or a
//! test double) can be injected.

use crate::error::EngineError;
use crate::matrix::{AdjacencyMatrix, Vertex};

/// Parameters of one homology computation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BettiRequest {
    pub min_dimension: usize,
    /// `None` computes up to the top dimension of the complex.
    pub max_dimension: Option<usize>,
    pub directed: bool,
    pub coefficient_field: u32,
    /// `None` computes exactly; `Some(n)` applies budget `n` to every dimension in range.
    pub approximation: Option<u64>,
    pub threads: usize,
}

/// Result of a homology computation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BettiOutput {
    /// Betti numbers for `min_dimension, min_dimension + 1, ...`.
    pub betti: Vec<u64>,
}

/// Parameters of one simplex enumeration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CountRequest {
    /// `None` enumerates every dimension.
    pub max_dimension: Option<usize>,
    pub directed: bool,
    /// Also count, per vertex, the simplices containing it.
    pub containment: bool,
    /// Also return the simplices themselves.
    pub return_simplices: bool,
    pub threads: usize,
}

/// Result of a simplex enumeration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CountOutput {
    /// `cell_counts[k]` is the number of k-simplices.
    pub cell_counts: Vec<u64>,
    /// `contain_counts[v][k]` is the number of k-simplices containing vertex `v`.
    pub contain_counts: Option<Vec<Vec<u64>>>,
    /// `simplices[k]` lists the k-simplices as vertex tuples.
    pub simplices: Option<Vec<Vec<Vec<Vertex>>>>,
}

/// A flag-complex engine.
///
/// Calls are blocking and independent; implementations hold no state between them.
pub trait FlagComplexEngine {
    /// Betti numbers of the flag complex of `adj` over the requested dimension range.
    fn betti_numbers(
        &self,
        adj: &AdjacencyMatrix,
        request: &BettiRequest,
    ) -> Result<BettiOutput, EngineError>;

    /// Simplex counts (and optionally containment counts and simplex lists).
    fn count(&self, adj: &AdjacencyMatrix, request: &CountRequest)
        -> Result<CountOutput, EngineError>;
}

impl<E: FlagComplexEngine + ?Sized> FlagComplexEngine for &E {
    fn betti_numbers(
        &self,
        adj: &AdjacencyMatrix,
        request: &BettiRequest,
    ) -> Result<BettiOutput, EngineError> {
        (**self).betti_numbers(adj, request)
    }

    fn count(
        &self,
        adj: &AdjacencyMatrix,
        request: &CountRequest,
    ) -> Result<CountOutput, EngineError> {
        (**self).count(adj, request)
    }
}
