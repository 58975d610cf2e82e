//! Directed flag complex enumeration.
//!
//! A k-simplex is an ordered tuple (v0, ..., vk) of distinct vertices with an
//! edge vi -> vj for every i < j. Simplices are found depth-first from each
//! root vertex: the candidates for extending a tuple are the common
//! out-neighbours of all its vertices.

use rayon::prelude::*;

use crate::error::EngineError;
use crate::matrix::{AdjacencyMatrix, Vertex};

/// A simplex as its ordered vertex tuple.
pub type Simplex = Box<[Vertex]>;

/// Simplices grouped by dimension: `cells[k]` holds the k-simplices.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlagComplex {
    cells: Vec<Vec<Simplex>>,
}

impl FlagComplex {
    /// Enumerate the flag complex of `adj` up to `max_dim` (all dimensions if `None`).
    ///
    /// Undirected mode symmetrises the graph and lists every clique once, in
    /// ascending vertex order. With more than one thread, roots are processed
    /// on a dedicated pool and merged back in root order, so the output does not
    /// depend on the thread count.
    pub fn build(
        adj: &AdjacencyMatrix,
        directed: bool,
        max_dim: Option<usize>,
        threads: usize,
    ) -> Result<Self, EngineError> {
        let graph = neighbour_lists(adj, directed);
        let n = graph.len();

        let per_root: Vec<Vec<Vec<Simplex>>> = match threads {
            0 => {
                return Err(EngineError::ThreadPool(
                    "thread count must be at least 1".to_string(),
                ))
            }
            1 => (0..n)
                .map(|root| enumerate_from(&graph, root as Vertex, max_dim))
                .collect(),
            _ => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| EngineError::ThreadPool(e.to_string()))?;
                pool.install(|| {
                    (0..n)
                        .into_par_iter()
                        .map(|root| enumerate_from(&graph, root as Vertex, max_dim))
                        .collect()
                })
            }
        };

        let mut cells: Vec<Vec<Simplex>> = Vec::new();
        for root_cells in per_root {
            if root_cells.len() > cells.len() {
                cells.resize_with(root_cells.len(), Vec::new);
            }
            for (dim, simplices) in root_cells.into_iter().enumerate() {
                cells[dim].extend(simplices);
            }
        }

        Ok(Self { cells })
    }

    /// Highest dimension holding a simplex, `None` for the empty complex.
    pub fn top_dimension(&self) -> Option<usize> {
        self.cells.len().checked_sub(1)
    }

    /// The k-simplices (empty beyond the top dimension).
    pub fn cells(&self, dim: usize) -> &[Simplex] {
        self.cells.get(dim).map_or(&[], |c| c.as_slice())
    }

    /// Number of simplices per dimension.
    pub fn cell_counts(&self) -> Vec<u64> {
        self.cells.iter().map(|c| c.len() as u64).collect()
    }

    /// `counts[v][k]` = number of k-simplices containing vertex `v`.
    ///
    /// Every row has one column per dimension of the complex, zero-filled.
    pub fn contain_counts(&self, n_vertices: usize) -> Vec<Vec<u64>> {
        let width = self.cells.len();
        let mut counts = vec![vec![0u64; width]; n_vertices];
        for (dim, simplices) in self.cells.iter().enumerate() {
            for simplex in simplices {
                for &v in simplex.iter() {
                    counts[v as usize][dim] += 1;
                }
            }
        }
        counts
    }

    /// Consume the complex into plain vertex lists per dimension.
    pub fn into_simplex_lists(self) -> Vec<Vec<Vec<Vertex>>> {
        self.cells
            .into_iter()
            .map(|simplices| simplices.into_iter().map(|s| s.into_vec()).collect())
            .collect()
    }
}

/// Out-neighbour lists of the graph the complex is built on.
fn neighbour_lists(adj: &AdjacencyMatrix, directed: bool) -> Vec<Vec<Vertex>> {
    let n = adj.n_vertices() as Vertex;
    if directed {
        (0..n).map(|v| adj.out_neighbors(v).to_vec()).collect()
    } else {
        // Orient every undirected edge from lower to higher index
        let sym = adj.symmetrized();
        (0..n)
            .map(|v| {
                sym.out_neighbors(v)
                    .iter()
                    .copied()
                    .filter(|&w| w > v)
                    .collect()
            })
            .collect()
    }
}

/// All simplices whose first vertex is `root`, grouped by dimension.
fn enumerate_from(graph: &[Vec<Vertex>], root: Vertex, max_dim: Option<usize>) -> Vec<Vec<Simplex>> {
    let mut cells: Vec<Vec<Simplex>> = Vec::new();
    let mut prefix: Vec<Vertex> = vec![root];
    extend(graph, &mut prefix, &graph[root as usize], max_dim, &mut cells);
    cells
}

fn extend(
    graph: &[Vec<Vertex>],
    prefix: &mut Vec<Vertex>,
    candidates: &[Vertex],
    max_dim: Option<usize>,
    cells: &mut Vec<Vec<Simplex>>,
) {
    let dim = prefix.len() - 1;
    if cells.len() <= dim {
        cells.push(Vec::new());
    }
    cells[dim].push(prefix.clone().into_boxed_slice());

    if max_dim.is_some_and(|m| dim >= m) {
        return;
    }

    for &next in candidates {
        let narrowed = intersect_sorted(candidates, &graph[next as usize]);
        prefix.push(next);
        extend(graph, prefix, &narrowed, max_dim, cells);
        prefix.pop();
    }
}

/// Intersection of two ascending vertex lists.
fn intersect_sorted(a: &[Vertex], b: &[Vertex]) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out
}
