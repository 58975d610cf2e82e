//! Boolean adjacency matrices for directed networks.
//!
//! Any numeric input is coerced to presence/absence on construction: a nonzero
//! entry at (i, j) becomes the directed edge i -> j, zero entries are dropped.
//! The coercion is idempotent, so feeding `to_dense()` back into `from_dense()`
//! reproduces the same matrix.

use pyo3::prelude::*;

use crate::error::MatrixError;

/// Vertex index inside an adjacency matrix.
pub type Vertex = u32;

/// A square (or, before validation, rectangular) boolean matrix stored as
/// sorted out-neighbour lists.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdjacencyMatrix {
    n_rows: usize,
    n_cols: usize,
    rows: Vec<Vec<Vertex>>,
}

impl AdjacencyMatrix {
    /// Build from dense rows, treating every entry different from `T::default()` as an edge.
    pub fn from_dense<T>(rows: &[Vec<T>]) -> Result<Self, MatrixError>
    where
        T: Copy + PartialEq + Default,
    {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, |r| r.len());
        let zero = T::default();

        let mut out = Vec::with_capacity(n_rows);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n_cols {
                return Err(MatrixError::RaggedRow {
                    row: i,
                    expected: n_cols,
                    found: row.len(),
                });
            }
            let targets: Vec<Vertex> = row
                .iter()
                .enumerate()
                .filter(|(_, &v)| v != zero)
                .map(|(j, _)| j as Vertex)
                .collect();
            out.push(targets);
        }

        Ok(Self {
            n_rows,
            n_cols,
            rows: out,
        })
    }

    /// Build from coordinate triplets. Duplicate coordinates collapse to one edge.
    pub fn from_triplets<T, I>(shape: (usize, usize), entries: I) -> Result<Self, MatrixError>
    where
        T: Copy + PartialEq + Default,
        I: IntoIterator<Item = (usize, usize, T)>,
    {
        let (n_rows, n_cols) = shape;
        let zero = T::default();
        let mut rows: Vec<Vec<Vertex>> = vec![Vec::new(); n_rows];

        for (row, col, value) in entries {
            if row >= n_rows || col >= n_cols {
                return Err(MatrixError::IndexOutOfBounds { row, col, shape });
            }
            if value != zero {
                rows[row].push(col as Vertex);
            }
        }

        for targets in &mut rows {
            targets.sort_unstable();
            targets.dedup();
        }

        Ok(Self {
            n_rows,
            n_cols,
            rows,
        })
    }

    /// Build from an edge list on `n` vertices.
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Result<Self, MatrixError> {
        Self::from_triplets((n, n), edges.iter().map(|&(i, j)| (i, j, 1u8)))
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.n_rows == self.n_cols
    }

    /// Number of vertices (rows).
    #[inline]
    pub fn n_vertices(&self) -> usize {
        self.n_rows
    }

    /// Number of stored edges.
    pub fn nnz(&self) -> usize {
        self.rows.iter().map(|r| r.len()).sum()
    }

    /// Sorted targets of edges leaving `v`.
    #[inline]
    pub fn out_neighbors(&self, v: Vertex) -> &[Vertex] {
        &self.rows[v as usize]
    }

    #[inline]
    pub fn has_edge(&self, from: Vertex, to: Vertex) -> bool {
        self.rows
            .get(from as usize)
            .is_some_and(|r| r.binary_search(&to).is_ok())
    }

    /// Edges in row-major order.
    pub fn edges(&self) -> impl Iterator<Item = (Vertex, Vertex)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(i, r)| r.iter().map(move |&j| (i as Vertex, j)))
    }

    /// First vertex with a nonzero diagonal entry, if any.
    pub fn first_self_loop(&self) -> Option<usize> {
        (0..self.n_rows.min(self.n_cols)).find(|&v| self.has_edge(v as Vertex, v as Vertex))
    }

    /// The same graph with every edge made reciprocal.
    pub fn symmetrized(&self) -> Self {
        let mut rows = self.rows.clone();
        for (i, j) in self.edges() {
            if (j as usize) < self.n_rows {
                rows[j as usize].push(i);
            }
        }
        for targets in &mut rows {
            targets.sort_unstable();
            targets.dedup();
        }
        Self {
            n_rows: self.n_rows,
            n_cols: self.n_cols,
            rows,
        }
    }

    /// Dense 0/1 rendering.
    pub fn to_dense(&self) -> Vec<Vec<u8>> {
        self.rows
            .iter()
            .map(|targets| {
                let mut row = vec![0u8; self.n_cols];
                for &j in targets {
                    row[j as usize] = 1;
                }
                row
            })
            .collect()
    }
}

#[pymethods]
impl AdjacencyMatrix {
    /// Build from a dense matrix (list of rows, or a 2-D numpy array).
    #[staticmethod]
    #[pyo3(name = "from_dense")]
    fn py_from_dense(rows: Vec<Vec<f64>>) -> PyResult<Self> {
        Ok(Self::from_dense(&rows)?)
    }

    /// Build from COO arrays, e.g. `m.row`, `m.col`, `m.data` of a scipy sparse matrix.
    #[staticmethod]
    #[pyo3(name = "from_coo", signature = (shape, row, col, data=None))]
    fn py_from_coo(
        shape: (usize, usize),
        row: Vec<usize>,
        col: Vec<usize>,
        data: Option<Vec<f64>>,
    ) -> PyResult<Self> {
        let data = data.unwrap_or_else(|| vec![1.0; row.len()]);
        if row.len() != col.len() || row.len() != data.len() {
            return Err(MatrixError::LengthMismatch {
                rows: row.len(),
                cols: col.len(),
                data: data.len(),
            }
            .into());
        }
        let entries = row
            .into_iter()
            .zip(col)
            .zip(data)
            .map(|((r, c), v)| (r, c, v));
        Ok(Self::from_triplets(shape, entries)?)
    }

    #[getter(shape)]
    fn py_shape(&self) -> (usize, usize) {
        self.shape()
    }

    #[getter(nnz)]
    fn py_nnz(&self) -> usize {
        self.nnz()
    }

    #[pyo3(name = "to_dense")]
    fn py_to_dense(&self) -> Vec<Vec<u8>> {
        self.to_dense()
    }

    fn __repr__(&self) -> String {
        format!(
            "AdjacencyMatrix(shape=({}, {}), nnz={})",
            self.n_rows,
            self.n_cols,
            self.nnz()
        )
    }
}
