//! Rust implementation of flag-complex statistics for directed networks.
//!
//! This module provides simplex counts, Betti numbers (exact or approximated per
//! dimension), per-vertex simplex participation and simplex lists, computed on
//! the directed flag complex of an adjacency matrix.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::prelude::*;
use pyo3::types::{PyFloat, PyInt};

pub mod approximation;
mod config;
pub mod engine;
mod error;
pub mod flagser;
pub mod logging;
mod matrix;
pub mod scheduler;
pub mod stats;

pub use approximation::{partition_runs, resize_budgets, validate_budgets, Budget, RawBudget, Run};
pub use config::FlagConfig;
pub use engine::{BettiOutput, BettiRequest, CountOutput, CountRequest, FlagComplexEngine};
pub use error::{EngineError, MatrixError, TopologyError};
pub use flagser::FlagserEngine;
pub use matrix::{AdjacencyMatrix, Vertex};
pub use scheduler::{BettiScheduler, PlannedCall};

/// Read one Python approximation entry; only `int` values are integers.
fn raw_budget(index: usize, item: &Bound<'_, PyAny>) -> PyResult<RawBudget> {
    if item.is_instance_of::<PyInt>() {
        Ok(RawBudget::Int(item.extract::<i64>()?))
    } else if item.is_instance_of::<PyFloat>() {
        Ok(RawBudget::Float(item.extract::<f64>()?))
    } else {
        Err(TopologyError::InvalidInput(format!(
            "approximation entry {} is not an integer: {}",
            index, item
        ))
        .into())
    }
}

fn engine_for(config: &FlagConfig) -> FlagserEngine {
    FlagserEngine::with_verbosity(config.verbosity)
}

/// Compute simplex counts of the directed flag complex.
///
/// # Returns
/// * List where entry k is the number of k-simplices
///
/// # Raises
/// * ValueError if the matrix is not square or has a nonzero diagonal
#[pyfunction]
#[pyo3(name = "simplex_counts", signature = (adj, config=None))]
fn py_simplex_counts(
    adj: PyRef<'_, AdjacencyMatrix>,
    config: Option<FlagConfig>,
) -> PyResult<Vec<u64>> {
    let config = config.unwrap_or_default();
    Ok(stats::simplex_counts(&engine_for(&config), &adj, &config)?)
}

/// Compute Betti numbers, optionally approximated per dimension.
///
/// # Arguments
/// * `adj` - Adjacency matrix of the network
/// * `min_dim` - Lowest homology dimension
/// * `max_dim` - Highest homology dimension (None = up to the top of the complex)
/// * `approximation` - List of ints, entry i the budget for dimension i (-1 = exact)
/// * `config` - Engine configuration
///
/// With `max_dim=None`, dimensions past the end of `approximation` are always
/// computed exactly.
///
/// # Raises
/// * ValueError if an approximation entry is not an int, min_dim > max_dim,
///   or the matrix is invalid
#[pyfunction]
#[pyo3(name = "betti_counts", signature = (adj, min_dim=0, max_dim=None, approximation=None, config=None))]
fn py_betti_counts<'py>(
    adj: PyRef<'py, AdjacencyMatrix>,
    min_dim: usize,
    max_dim: Option<usize>,
    approximation: Option<Vec<Bound<'py, PyAny>>>,
    config: Option<FlagConfig>,
) -> PyResult<Vec<u64>> {
    let config = config.unwrap_or_default();
    let budgets = match approximation {
        Some(items) => {
            let raw = items
                .iter()
                .enumerate()
                .map(|(i, item)| raw_budget(i, item))
                .collect::<PyResult<Vec<RawBudget>>>()?;
            Some(validate_budgets(&raw)?)
        }
        None => None,
    };

    Ok(stats::betti_counts(
        &engine_for(&config),
        &adj,
        min_dim,
        max_dim,
        budgets.as_deref(),
        &config,
    )?)
}

/// Compute the number of simplices of each dimension every vertex belongs to.
///
/// # Returns
/// * One row per vertex; column k counts the k-simplices containing it
#[pyfunction]
#[pyo3(name = "node_participation", signature = (adj, config=None))]
fn py_node_participation(
    adj: PyRef<'_, AdjacencyMatrix>,
    config: Option<FlagConfig>,
) -> PyResult<Vec<Vec<u64>>> {
    let config = config.unwrap_or_default();
    Ok(stats::node_participation(&engine_for(&config), &adj, &config)?)
}

/// List the simplices of the directed flag complex from dimension 1 upward.
///
/// # Returns
/// * List whose entry d-1 holds the d-simplices as rows of d+1 vertex indices
#[pyfunction]
#[pyo3(name = "simplex_lists", signature = (adj, config=None))]
fn py_simplex_lists(
    adj: PyRef<'_, AdjacencyMatrix>,
    config: Option<FlagConfig>,
) -> PyResult<Vec<Vec<Vec<Vertex>>>> {
    let config = config.unwrap_or_default();
    Ok(stats::simplex_lists(&engine_for(&config), &adj, &config)?)
}

/// The flagstats.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Data and config types
    m.add_class::<AdjacencyMatrix>()?;
    m.add_class::<FlagConfig>()?;

    // Statistics
    m.add_function(wrap_pyfunction!(py_simplex_counts, m)?)?;
    m.add_function(wrap_pyfunction!(py_betti_counts, m)?)?;
    m.add_function(wrap_pyfunction!(py_node_participation, m)?)?;
    m.add_function(wrap_pyfunction!(py_simplex_lists, m)?)?;

    Ok(())
}
