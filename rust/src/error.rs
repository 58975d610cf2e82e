//! Error types for flag-complex statistics.

use thiserror::Error;

/// Errors raised while building an adjacency matrix.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    #[error("Row {row} has {found} entries, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Entry ({row}, {col}) is outside a matrix of shape {shape:?}")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        shape: (usize, usize),
    },
    #[error("COO arrays differ in length: rows={rows}, cols={cols}, data={data}")]
    LengthMismatch { rows: usize, cols: usize, data: usize },
}

/// Errors raised by a flag-complex engine.
///
/// The scheduler never catches or translates these; they reach the caller unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Adjacency matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },
    #[error("Adjacency matrix has a nonzero diagonal entry at vertex {0}")]
    SelfLoop(usize),
    #[error("Invalid dimension range: {min}..={max}")]
    InvalidDimensionRange { min: usize, max: usize },
    #[error("Coefficient field must have prime order, got {0}")]
    UnsupportedCoefficient(u32),
    #[error("Failed to start worker pool: {0}")]
    ThreadPool(String),
}

/// Top-level error for statistics and Betti scheduling.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TopologyError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

impl From<TopologyError> for pyo3::PyErr {
    fn from(err: TopologyError) -> Self {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}

impl From<MatrixError> for pyo3::PyErr {
    fn from(err: MatrixError) -> Self {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}
