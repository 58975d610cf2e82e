//! Approximate Betti scheduler.
//!
//! Splits a per-dimension approximation vector into runs of equal budget and
//! issues one engine call per run, concatenating the Betti numbers in
//! ascending dimension order.
//!
//! When the maximum dimension is unbounded, every dimension past the end of
//! the supplied approximation vector is computed in one final call, and that
//! call is always exact. Callers expecting their last budget to carry on
//! upward should pass an explicit `max_dim` instead.
//!
//! Orientation, coefficient field and thread count come from [`FlagConfig`]
//! and are forwarded to every engine call. The defaults (directed, F_2, one
//! thread) reproduce the fixed engine parameters of the plain scheduler; other
//! values are an extension available to Rust and Python callers alike.

use crate::approximation::{partition_runs, resize_budgets, Budget};
use crate::config::FlagConfig;
use crate::engine::{BettiRequest, FlagComplexEngine};
use crate::error::TopologyError;
use crate::log_runs;
use crate::matrix::AdjacencyMatrix;

/// One engine call the scheduler will issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlannedCall {
    pub min_dimension: usize,
    /// `None` runs up to the top dimension of the complex.
    pub max_dimension: Option<usize>,
    pub approximation: Budget,
}

impl PlannedCall {
    fn describe_max(&self) -> String {
        self.max_dimension
            .map_or_else(|| "inf".to_string(), |d| d.to_string())
    }
}

/// Computes Betti sequences through an injected engine.
#[derive(Clone, Debug)]
pub struct BettiScheduler<E> {
    engine: E,
    config: FlagConfig,
}

impl<E: FlagComplexEngine> BettiScheduler<E> {
    pub fn new(engine: E, config: FlagConfig) -> Self {
        Self { engine, config }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn config(&self) -> &FlagConfig {
        &self.config
    }

    /// The ordered engine calls `compute_betti` would make, without making them.
    ///
    /// Without approximation this is a single exact call over the whole range.
    /// With approximation and a finite `max_dim`, the vector is first resized to
    /// `max_dim + 1` entries (padded with exact, or truncated). Runs lying below
    /// `min_dim` are dropped and a run straddling it is clipped to start there.
    pub fn plan(
        &self,
        min_dim: usize,
        max_dim: Option<usize>,
        approximation: Option<&[Budget]>,
    ) -> Result<Vec<PlannedCall>, TopologyError> {
        if let Some(max) = max_dim {
            if min_dim > max {
                return Err(TopologyError::InvalidInput(format!(
                    "min_dim {} is greater than max_dim {}",
                    min_dim, max
                )));
            }
            if max.checked_add(1).is_none() {
                return Err(TopologyError::InvalidInput(format!(
                    "max_dim {} is too large",
                    max
                )));
            }
        }

        let Some(approximation) = approximation else {
            return Ok(vec![PlannedCall {
                min_dimension: min_dim,
                max_dimension: max_dim,
                approximation: Budget::Exact,
            }]);
        };

        let budgets = match max_dim {
            Some(max) => {
                let resized = resize_budgets(approximation, max);
                log_runs!(
                    self.config.verbosity,
                    "Correct dimensions for approximation: {}",
                    resized.len() == max + 1
                );
                resized
            }
            None => approximation.to_vec(),
        };

        let mut calls: Vec<PlannedCall> = partition_runs(&budgets)
            .into_iter()
            .filter(|run| run.end >= min_dim)
            .map(|run| PlannedCall {
                min_dimension: run.start.max(min_dim),
                max_dimension: Some(run.end),
                approximation: run.budget,
            })
            .collect();

        if max_dim.is_none() {
            calls.push(PlannedCall {
                min_dimension: budgets.len().max(min_dim),
                max_dimension: None,
                approximation: Budget::Exact,
            });
        }

        Ok(calls)
    }

    /// Betti numbers of the flag complex of `adj` for `min_dim..=max_dim`
    /// (or from `min_dim` to the top dimension when `max_dim` is `None`).
    ///
    /// Engine calls run one at a time in ascending dimension order. The first
    /// engine failure aborts the computation and is returned unchanged; Betti
    /// numbers from earlier runs are discarded.
    pub fn compute_betti(
        &self,
        adj: &AdjacencyMatrix,
        min_dim: usize,
        max_dim: Option<usize>,
        approximation: Option<&[Budget]>,
    ) -> Result<Vec<u64>, TopologyError> {
        let calls = self.plan(min_dim, max_dim, approximation)?;
        if approximation.is_none() {
            log_runs!(self.config.verbosity, "Run without approximation");
        }

        let mut bettis: Vec<u64> = Vec::new();
        for call in &calls {
            if approximation.is_some() {
                log_runs!(
                    self.config.verbosity,
                    "Run betti for dim range {}-{} with approximation {}",
                    call.min_dimension,
                    call.describe_max(),
                    call.approximation
                );
            }
            let request = BettiRequest {
                min_dimension: call.min_dimension,
                max_dimension: call.max_dimension,
                directed: self.config.directed,
                coefficient_field: self.config.coefficient_field,
                approximation: call.approximation.as_engine_value(),
                threads: self.config.threads,
            };
            let output = self.engine.betti_numbers(adj, &request)?;
            bettis.extend(output.betti);
        }

        Ok(bettis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::approximation::{validate_budgets, RawBudget};
    use crate::engine::{BettiOutput, CountOutput, CountRequest};
    use crate::error::EngineError;
    use crate::flagser::FlagserEngine;
    use std::cell::RefCell;

    /// Engine double: records requests and answers `dim * 100 + budget`
    /// (budget 99 for exact) for every dimension, with top dimension 6.
    #[derive(Default)]
    struct RecordingEngine {
        requests: RefCell<Vec<BettiRequest>>,
        fail_on_call: Option<usize>,
    }

    const TOP: usize = 6;

    impl FlagComplexEngine for RecordingEngine {
        fn betti_numbers(
            &self,
            _adj: &AdjacencyMatrix,
            request: &BettiRequest,
        ) -> Result<BettiOutput, EngineError> {
            let index = self.requests.borrow().len();
            self.requests.borrow_mut().push(request.clone());
            if self.fail_on_call == Some(index) {
                return Err(EngineError::ThreadPool("out of memory".to_string()));
            }
            let max = request.max_dimension.unwrap_or(TOP);
            let marker = request.approximation.unwrap_or(99);
            let betti = (request.min_dimension..=max)
                .map(|d| d as u64 * 100 + marker)
                .collect();
            Ok(BettiOutput { betti })
        }

        fn count(
            &self,
            _adj: &AdjacencyMatrix,
            _request: &CountRequest,
        ) -> Result<CountOutput, EngineError> {
            Ok(CountOutput::default())
        }
    }

    fn budgets(values: &[i64]) -> Vec<Budget> {
        values.iter().map(|&v| Budget::try_from(v).unwrap()).collect()
    }

    fn spans(requests: &[BettiRequest]) -> Vec<(usize, Option<usize>, Option<u64>)> {
        requests
            .iter()
            .map(|r| (r.min_dimension, r.max_dimension, r.approximation))
            .collect()
    }

    fn adj() -> AdjacencyMatrix {
        AdjacencyMatrix::from_edges(3, &[(0, 1), (1, 2), (0, 2)]).unwrap()
    }

    #[test]
    fn test_without_approximation_single_call() {
        let scheduler = BettiScheduler::new(RecordingEngine::default(), FlagConfig::default());
        let bettis = scheduler.compute_betti(&adj(), 1, Some(3), None).unwrap();

        assert_eq!(bettis, vec![199, 299, 399]);
        let requests = scheduler.engine().requests.borrow();
        assert_eq!(spans(&requests), vec![(1, Some(3), None)]);
        assert!(requests[0].directed);
        assert_eq!(requests[0].coefficient_field, 2);
        assert_eq!(requests[0].threads, 1);
    }

    #[test]
    fn test_two_runs_concatenated() {
        let scheduler = BettiScheduler::new(RecordingEngine::default(), FlagConfig::default());
        let approx = budgets(&[5, 5, 5, 10, 10]);
        let bettis = scheduler
            .compute_betti(&adj(), 0, Some(4), Some(approx.as_slice()))
            .unwrap();

        assert_eq!(bettis, vec![5, 105, 205, 310, 410]);
        assert_eq!(
            spans(&scheduler.engine().requests.borrow()),
            vec![(0, Some(2), Some(5)), (3, Some(4), Some(10))]
        );
    }

    #[test]
    fn test_unbounded_appends_exact_tail() {
        let scheduler = BettiScheduler::new(RecordingEngine::default(), FlagConfig::default());
        let bettis = scheduler
            .compute_betti(&adj(), 0, None, Some(budgets(&[3]).as_slice()))
            .unwrap();

        assert_eq!(bettis, vec![3, 199, 299, 399, 499, 599, 699]);
        assert_eq!(
            spans(&scheduler.engine().requests.borrow()),
            vec![(0, Some(0), Some(3)), (1, None, None)]
        );
    }

    #[test]
    fn test_all_exact_is_one_exact_run() {
        let scheduler = BettiScheduler::new(RecordingEngine::default(), FlagConfig::default());
        let bettis = scheduler
            .compute_betti(&adj(), 0, Some(2), Some(budgets(&[-1, -1, -1]).as_slice()))
            .unwrap();

        assert_eq!(bettis, vec![99, 199, 299]);
        assert_eq!(
            spans(&scheduler.engine().requests.borrow()),
            vec![(0, Some(2), None)]
        );
    }

    #[test]
    fn test_short_vector_padded_with_exact() {
        let scheduler = BettiScheduler::new(RecordingEngine::default(), FlagConfig::default());
        let bettis = scheduler
            .compute_betti(&adj(), 0, Some(3), Some(budgets(&[7]).as_slice()))
            .unwrap();

        assert_eq!(bettis.len(), 4);
        assert_eq!(
            spans(&scheduler.engine().requests.borrow()),
            vec![(0, Some(0), Some(7)), (1, Some(3), None)]
        );
    }

    #[test]
    fn test_long_vector_truncated() {
        let scheduler = BettiScheduler::new(RecordingEngine::default(), FlagConfig::default());
        let bettis = scheduler
            .compute_betti(&adj(), 0, Some(1), Some(budgets(&[2, 4, 8, 8]).as_slice()))
            .unwrap();

        assert_eq!(bettis, vec![2, 104]);
    }

    #[test]
    fn test_min_dim_clips_runs() {
        let scheduler = BettiScheduler::new(RecordingEngine::default(), FlagConfig::default());
        let bettis = scheduler
            .compute_betti(&adj(), 2, Some(4), Some(budgets(&[1, 1, 1, 6, 6]).as_slice()))
            .unwrap();

        assert_eq!(bettis, vec![201, 306, 406]);
        assert_eq!(
            spans(&scheduler.engine().requests.borrow()),
            vec![(2, Some(2), Some(1)), (3, Some(4), Some(6))]
        );
    }

    #[test]
    fn test_min_dim_past_vector_when_unbounded() {
        let scheduler = BettiScheduler::new(RecordingEngine::default(), FlagConfig::default());
        let plan = scheduler
            .plan(4, None, Some(budgets(&[1, 2]).as_slice()))
            .unwrap();
        assert_eq!(
            plan,
            vec![PlannedCall {
                min_dimension: 4,
                max_dimension: None,
                approximation: Budget::Exact,
            }]
        );
    }

    #[test]
    fn test_empty_vector() {
        let scheduler = BettiScheduler::new(RecordingEngine::default(), FlagConfig::default());
        let bounded = scheduler.plan(0, Some(2), Some(&[][..])).unwrap();
        assert_eq!(bounded.len(), 1);
        assert_eq!(bounded[0].max_dimension, Some(2));
        assert_eq!(bounded[0].approximation, Budget::Exact);

        let unbounded = scheduler.plan(0, None, Some(&[][..])).unwrap();
        assert_eq!(unbounded.len(), 1);
        assert_eq!(unbounded[0].max_dimension, None);
    }

    #[test]
    fn test_min_greater_than_max_rejected_before_engine() {
        let scheduler = BettiScheduler::new(RecordingEngine::default(), FlagConfig::default());
        let result = scheduler.compute_betti(&adj(), 3, Some(1), Some(budgets(&[1]).as_slice()));
        assert!(matches!(result, Err(TopologyError::InvalidInput(_))));
        assert!(scheduler.engine().requests.borrow().is_empty());
    }

    #[test]
    fn test_max_dim_at_usize_max_rejected_before_engine() {
        let scheduler = BettiScheduler::new(RecordingEngine::default(), FlagConfig::default());
        let approx = budgets(&[3]);
        assert!(matches!(
            scheduler.plan(0, Some(usize::MAX), Some(approx.as_slice())),
            Err(TopologyError::InvalidInput(_))
        ));

        let result = scheduler.compute_betti(&adj(), usize::MAX, Some(usize::MAX), None);
        assert_eq!(
            result,
            Err(TopologyError::InvalidInput(format!(
                "max_dim {} is too large",
                usize::MAX
            )))
        );
        assert!(scheduler.engine().requests.borrow().is_empty());
    }

    #[test]
    fn test_float_entry_rejected_before_engine() {
        let scheduler = BettiScheduler::new(RecordingEngine::default(), FlagConfig::default());
        let raw = [RawBudget::Int(5), RawBudget::Float(2.5)];
        let result = validate_budgets(&raw)
            .and_then(|b| scheduler.compute_betti(&adj(), 0, Some(2), Some(b.as_slice())));

        assert!(matches!(result, Err(TopologyError::InvalidInput(_))));
        assert!(scheduler.engine().requests.borrow().is_empty());
    }

    #[test]
    fn test_engine_failure_aborts_remaining_runs() {
        let engine = RecordingEngine {
            fail_on_call: Some(1),
            ..Default::default()
        };
        let scheduler = BettiScheduler::new(engine, FlagConfig::default());
        let result = scheduler.compute_betti(&adj(), 0, Some(3), Some(budgets(&[1, 2, 3, 4]).as_slice()));

        assert_eq!(
            result,
            Err(TopologyError::Engine(EngineError::ThreadPool(
                "out of memory".to_string()
            )))
        );
        assert_eq!(scheduler.engine().requests.borrow().len(), 2);
    }

    #[test]
    fn test_config_is_forwarded() {
        let config = FlagConfig {
            directed: false,
            coefficient_field: 3,
            threads: 4,
            verbosity: 0,
        };
        let scheduler = BettiScheduler::new(RecordingEngine::default(), config);
        scheduler
            .compute_betti(&adj(), 0, Some(1), Some(budgets(&[2, 3]).as_slice()))
            .unwrap();

        for request in scheduler.engine().requests.borrow().iter() {
            assert!(!request.directed);
            assert_eq!(request.coefficient_field, 3);
            assert_eq!(request.threads, 4);
        }
    }

    #[test]
    fn test_exact_runs_match_direct_computation() {
        let graph = AdjacencyMatrix::from_edges(
            6,
            &[(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (2, 4), (4, 5), (5, 3)],
        )
        .unwrap();
        let scheduler = BettiScheduler::new(FlagserEngine::new(), FlagConfig::default());

        let direct = scheduler.compute_betti(&graph, 0, Some(3), None).unwrap();
        let runwise = scheduler
            .compute_betti(&graph, 0, Some(3), Some(budgets(&[-1, -1]).as_slice()))
            .unwrap();
        assert_eq!(direct, runwise);
        assert_eq!(direct.len(), 4);
    }

    #[test]
    fn test_generous_budgets_match_exact_on_real_engine() {
        let graph = AdjacencyMatrix::from_edges(
            5,
            &[(0, 1), (1, 2), (2, 3), (3, 0), (0, 2), (1, 3), (3, 4)],
        )
        .unwrap();
        let scheduler = BettiScheduler::new(FlagserEngine::new(), FlagConfig::default());

        let exact = scheduler.compute_betti(&graph, 0, None, None).unwrap();
        let approx = scheduler
            .compute_betti(&graph, 0, None, Some(budgets(&[1000, 500]).as_slice()))
            .unwrap();
        assert_eq!(exact, approx);
    }
}
