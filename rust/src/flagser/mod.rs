//! Built-in flag-complex engine.
//!
//! Enumerates the (directed) flag complex of an adjacency matrix and computes
//! simplex counts, containment counts, simplex lists and Betti numbers over a
//! prime field, optionally with an approximation budget.

mod complex;
mod homology;

pub use complex::{FlagComplex, Simplex};
pub use homology::{betti_range, boundary_rank, is_prime};

use crate::engine::{BettiOutput, BettiRequest, CountOutput, CountRequest, FlagComplexEngine};
use crate::error::EngineError;
use crate::log_debug;
use crate::matrix::AdjacencyMatrix;

/// In-process flag-complex engine.
#[derive(Clone, Debug, Default)]
pub struct FlagserEngine {
    verbosity: u8,
}

impl FlagserEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine that reports complex sizes and ranks at DEBUG verbosity.
    pub fn with_verbosity(verbosity: u8) -> Self {
        Self { verbosity }
    }

    /// Reject matrices the flag complex is undefined for.
    fn validate(adj: &AdjacencyMatrix) -> Result<(), EngineError> {
        if !adj.is_square() {
            let (rows, cols) = adj.shape();
            return Err(EngineError::NotSquare { rows, cols });
        }
        if let Some(v) = adj.first_self_loop() {
            return Err(EngineError::SelfLoop(v));
        }
        Ok(())
    }
}

impl FlagComplexEngine for FlagserEngine {
    fn betti_numbers(
        &self,
        adj: &AdjacencyMatrix,
        request: &BettiRequest,
    ) -> Result<BettiOutput, EngineError> {
        Self::validate(adj)?;
        if let Some(max) = request.max_dimension {
            if request.min_dimension > max {
                return Err(EngineError::InvalidDimensionRange {
                    min: request.min_dimension,
                    max,
                });
            }
            if max.checked_add(1).is_none() {
                return Err(EngineError::InvalidDimensionRange {
                    min: request.min_dimension,
                    max,
                });
            }
        }
        let p = request.coefficient_field;
        if !is_prime(p) {
            return Err(EngineError::UnsupportedCoefficient(p));
        }

        // Betti numbers up to dimension d need the (d + 1)-simplices
        let enumerate_to = request.max_dimension.map(|d| d + 1);
        let complex = FlagComplex::build(adj, request.directed, enumerate_to, request.threads)?;
        log_debug!(
            self.verbosity,
            "Flag complex cell counts: {:?}",
            complex.cell_counts()
        );

        let top = match request.max_dimension {
            Some(max) => max,
            None => match complex.top_dimension() {
                Some(top) if top >= request.min_dimension => top,
                _ => return Ok(BettiOutput::default()),
            },
        };

        let betti = betti_range(
            &complex,
            request.min_dimension,
            top,
            p,
            request.approximation,
        );
        log_debug!(
            self.verbosity,
            "Betti numbers for dims {}-{}: {:?}",
            request.min_dimension,
            top,
            betti
        );

        Ok(BettiOutput { betti })
    }

    fn count(
        &self,
        adj: &AdjacencyMatrix,
        request: &CountRequest,
    ) -> Result<CountOutput, EngineError> {
        Self::validate(adj)?;
        let complex = FlagComplex::build(
            adj,
            request.directed,
            request.max_dimension,
            request.threads,
        )?;

        let cell_counts = complex.cell_counts();
        log_debug!(self.verbosity, "Flag complex cell counts: {:?}", cell_counts);

        let contain_counts = request
            .containment
            .then(|| complex.contain_counts(adj.n_vertices()));
        let simplices = request
            .return_simplices
            .then(|| complex.into_simplex_lists());

        Ok(CountOutput {
            cell_counts,
            contain_counts,
            simplices,
        })
    }
}
