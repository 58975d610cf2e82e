//! Simplicial homology over a prime field.
//!
//! Betti numbers come from boundary ranks:
//! beta_k = |C_k| - rank(d_k) - rank(d_{k+1}),
//! each rank obtained by the standard column reduction with a pivot lookup.

use rustc_hash::FxHashMap;

use super::complex::{FlagComplex, Simplex};
use crate::matrix::Vertex;

/// Sparse column over F_p: (row, coefficient) pairs, rows ascending, coefficients nonzero.
#[derive(Debug, Clone, Default)]
struct SparseColumn {
    entries: Vec<(usize, u32)>,
}

impl SparseColumn {
    #[inline]
    fn len(&self) -> usize {
        self.entries.len()
    }

    /// Lowest (maximum-row) nonzero entry.
    #[inline]
    fn low(&self) -> Option<(usize, u32)> {
        self.entries.last().copied()
    }

    /// self += factor * other (mod p).
    fn add_scaled(&mut self, other: &SparseColumn, factor: u32, p: u32) {
        let mut merged = Vec::with_capacity(self.entries.len() + other.entries.len());
        let (mut i, mut j) = (0, 0);
        while i < self.entries.len() || j < other.entries.len() {
            let take_self = j >= other.entries.len()
                || (i < self.entries.len() && self.entries[i].0 < other.entries[j].0);
            let take_other = i >= self.entries.len()
                || (j < other.entries.len() && other.entries[j].0 < self.entries[i].0);

            if take_self {
                merged.push(self.entries[i]);
                i += 1;
            } else if take_other {
                let (row, c) = other.entries[j];
                merged.push((row, mul_mod(c, factor, p)));
                j += 1;
            } else {
                let (row, a) = self.entries[i];
                let b = mul_mod(other.entries[j].1, factor, p);
                let sum = ((a as u64 + b as u64) % p as u64) as u32;
                if sum != 0 {
                    merged.push((row, sum));
                }
                i += 1;
                j += 1;
            }
        }
        self.entries = merged;
    }
}

#[inline]
fn mul_mod(a: u32, b: u32, p: u32) -> u32 {
    ((a as u64 * b as u64) % p as u64) as u32
}

fn pow_mod(mut base: u32, mut exp: u32, p: u32) -> u32 {
    let mut acc = 1u32 % p;
    base %= p;
    while exp > 0 {
        if exp & 1 == 1 {
            acc = mul_mod(acc, base, p);
        }
        base = mul_mod(base, base, p);
        exp >>= 1;
    }
    acc
}

/// Multiplicative inverse in F_p (p prime, a != 0).
#[inline]
fn inv_mod(a: u32, p: u32) -> u32 {
    pow_mod(a, p - 2, p)
}

/// Whether `p` is a prime, i.e. a valid coefficient field order.
pub fn is_prime(p: u32) -> bool {
    if p < 2 {
        return false;
    }
    let mut d = 2u32;
    while (d as u64) * (d as u64) <= p as u64 {
        if p % d == 0 {
            return false;
        }
        d += 1;
    }
    true
}

/// Rank of the boundary map from `dim`-simplices to `(dim - 1)`-simplices.
///
/// With a budget, any column whose working length exceeds it is skipped and
/// contributes nothing to the rank, so Betti numbers can only come out larger
/// than the exact ones.
pub fn boundary_rank(complex: &FlagComplex, dim: usize, p: u32, budget: Option<u64>) -> usize {
    if dim == 0 {
        return 0;
    }
    let columns = complex.cells(dim);
    if columns.is_empty() {
        return 0;
    }

    let faces: FxHashMap<&[Vertex], usize> = complex
        .cells(dim - 1)
        .iter()
        .enumerate()
        .map(|(i, s)| (&s[..], i))
        .collect();
    let over_budget = |col: &SparseColumn| budget.is_some_and(|b| col.len() as u64 > b);

    let mut pivots: FxHashMap<usize, SparseColumn> = FxHashMap::default();
    let mut rank = 0usize;

    'columns: for simplex in columns {
        let mut column = boundary_column(simplex, &faces, p);
        if over_budget(&column) {
            continue;
        }

        // Reduce column using previously reduced columns
        while let Some((low, coeff)) = column.low() {
            let Some(pivot) = pivots.get(&low) else {
                break;
            };
            let pivot_coeff = pivot.low().map_or(1, |(_, c)| c);
            let factor = mul_mod(p - coeff, inv_mod(pivot_coeff, p), p);
            column.add_scaled(pivot, factor, p);
            if over_budget(&column) {
                continue 'columns;
            }
        }

        if let Some((low, _)) = column.low() {
            pivots.insert(low, column);
            rank += 1;
        }
    }

    rank
}

/// Alternating-sign boundary of an ordered simplex, rows sorted.
fn boundary_column(simplex: &Simplex, faces: &FxHashMap<&[Vertex], usize>, p: u32) -> SparseColumn {
    let mut face: Vec<Vertex> = Vec::with_capacity(simplex.len() - 1);
    let mut entries: Vec<(usize, u32)> = Vec::with_capacity(simplex.len());

    for i in 0..simplex.len() {
        face.clear();
        face.extend(simplex.iter().enumerate().filter(|&(j, _)| j != i).map(|(_, &v)| v));
        if let Some(&row) = faces.get(face.as_slice()) {
            let sign = if i % 2 == 0 { 1 % p } else { p - 1 };
            entries.push((row, sign));
        }
    }

    entries.sort_unstable_by_key(|&(row, _)| row);
    SparseColumn { entries }
}

/// Betti numbers for dimensions `min_dim..=max_dim` over F_p.
///
/// The complex must contain every simplex up to dimension `max_dim + 1`.
/// Dimensions above its top dimension report zero.
pub fn betti_range(
    complex: &FlagComplex,
    min_dim: usize,
    max_dim: usize,
    p: u32,
    budget: Option<u64>,
) -> Vec<u64> {
    let ranks: Vec<usize> = (min_dim..=max_dim + 1)
        .map(|dim| boundary_rank(complex, dim, p, budget))
        .collect();

    (min_dim..=max_dim)
        .enumerate()
        .map(|(i, dim)| {
            let cells = complex.cells(dim).len();
            cells.saturating_sub(ranks[i] + ranks[i + 1]) as u64
        })
        .collect()
}
