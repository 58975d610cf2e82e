//! Per-dimension approximation budgets and their partition into runs.
//!
//! An approximation vector assigns a budget to every homology dimension,
//! index i being dimension i. Consecutive dimensions sharing a budget are
//! grouped into a [`Run`], the unit of work handed to the engine.

use std::fmt;

use crate::error::TopologyError;

/// Raw value used by callers to request exact computation for a dimension.
const EXACT_SENTINEL: i64 = -1;

/// Approximation budget for one homology dimension.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Budget {
    /// No approximation.
    Exact,
    /// Engine effort limit for this dimension.
    Limit(u64),
}

impl Budget {
    /// The engine-level approximation value (`None` means exact).
    #[inline]
    pub fn as_engine_value(self) -> Option<u64> {
        match self {
            Budget::Exact => None,
            Budget::Limit(n) => Some(n),
        }
    }
}

impl TryFrom<i64> for Budget {
    type Error = TopologyError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            EXACT_SENTINEL => Ok(Budget::Exact),
            n if n >= 0 => Ok(Budget::Limit(n as u64)),
            n => Err(TopologyError::InvalidInput(format!(
                "approximation must be -1 (exact) or a non-negative integer, got {}",
                n
            ))),
        }
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Budget::Exact => write!(f, "None"),
            Budget::Limit(n) => write!(f, "{}", n),
        }
    }
}

/// An approximation entry as supplied by a caller, before validation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RawBudget {
    Int(i64),
    Float(f64),
}

impl From<i64> for RawBudget {
    fn from(value: i64) -> Self {
        RawBudget::Int(value)
    }
}

impl From<f64> for RawBudget {
    fn from(value: f64) -> Self {
        RawBudget::Float(value)
    }
}

/// Validate raw entries into budgets.
///
/// Every entry must be an integer; floats are rejected even when integral
/// (`5.0`). Integers below -1 are rejected as well.
pub fn validate_budgets(raw: &[RawBudget]) -> Result<Vec<Budget>, TopologyError> {
    raw.iter()
        .enumerate()
        .map(|(i, entry)| match *entry {
            RawBudget::Int(v) => Budget::try_from(v),
            RawBudget::Float(v) => Err(TopologyError::InvalidInput(format!(
                "approximation entry {} is not an integer: {}",
                i, v
            ))),
        })
        .collect()
}

/// Resize a budget vector to cover dimensions `0..=max_dim` exactly.
///
/// Shorter vectors are padded with [`Budget::Exact`]; longer ones are truncated.
/// `max_dim` must be below `usize::MAX`; [`BettiScheduler::plan`] rejects it otherwise.
///
/// [`BettiScheduler::plan`]: crate::scheduler::BettiScheduler::plan
pub fn resize_budgets(budgets: &[Budget], max_dim: usize) -> Vec<Budget> {
    let len = max_dim + 1;
    let mut resized: Vec<Budget> = budgets.iter().copied().take(len).collect();
    resized.resize(len, Budget::Exact);
    resized
}

/// A maximal span of dimensions sharing one budget (both ends inclusive).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Run {
    pub start: usize,
    pub end: usize,
    pub budget: Budget,
}

/// Split a budget vector into maximal runs of equal value, in ascending order.
///
/// A new run starts at every index whose budget differs from its predecessor.
pub fn partition_runs(budgets: &[Budget]) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();

    for (dim, &budget) in budgets.iter().enumerate() {
        match runs.last_mut() {
            Some(run) if run.budget == budget => run.end = dim,
            _ => runs.push(Run {
                start: dim,
                end: dim,
                budget,
            }),
        }
    }

    runs
}
