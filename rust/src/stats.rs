//! Topological statistics of a directed network.
//!
//! Each statistic is a thin layer over a [`FlagComplexEngine`]; only
//! [`betti_counts`] carries logic of its own, through [`BettiScheduler`].

use crate::approximation::Budget;
use crate::config::FlagConfig;
use crate::engine::{CountRequest, FlagComplexEngine};
use crate::error::TopologyError;
use crate::matrix::{AdjacencyMatrix, Vertex};
use crate::scheduler::BettiScheduler;

/// Number of simplices of the directed flag complex in every dimension.
pub fn simplex_counts<E: FlagComplexEngine>(
    engine: &E,
    adj: &AdjacencyMatrix,
    config: &FlagConfig,
) -> Result<Vec<u64>, TopologyError> {
    let request = CountRequest {
        max_dimension: None,
        directed: true,
        containment: false,
        return_simplices: false,
        threads: config.threads,
    };
    Ok(engine.count(adj, &request)?.cell_counts)
}

/// Betti numbers for `min_dim..=max_dim`, optionally approximated per dimension.
///
/// See [`BettiScheduler::compute_betti`].
pub fn betti_counts<E: FlagComplexEngine>(
    engine: &E,
    adj: &AdjacencyMatrix,
    min_dim: usize,
    max_dim: Option<usize>,
    approximation: Option<&[Budget]>,
    config: &FlagConfig,
) -> Result<Vec<u64>, TopologyError> {
    BettiScheduler::new(engine, config.clone()).compute_betti(adj, min_dim, max_dim, approximation)
}

/// Per-vertex participation: `result[v][k]` is the number of k-simplices containing `v`.
///
/// Rows share one width (the number of dimensions of the complex), zero-filled.
pub fn node_participation<E: FlagComplexEngine>(
    engine: &E,
    adj: &AdjacencyMatrix,
    config: &FlagConfig,
) -> Result<Vec<Vec<u64>>, TopologyError> {
    let request = CountRequest {
        max_dimension: None,
        directed: true,
        containment: true,
        return_simplices: false,
        threads: config.single_threaded().threads,
    };
    Ok(engine
        .count(adj, &request)?
        .contain_counts
        .unwrap_or_default())
}

/// Simplex lists from dimension 1 upward.
///
/// Entry `d - 1` holds the d-simplices, one row of `d + 1` vertices each.
/// Dimension 1 is the edge list of `adj` in row-major order.
pub fn simplex_lists<E: FlagComplexEngine>(
    engine: &E,
    adj: &AdjacencyMatrix,
    config: &FlagConfig,
) -> Result<Vec<Vec<Vec<Vertex>>>, TopologyError> {
    let request = CountRequest {
        max_dimension: None,
        directed: true,
        containment: false,
        return_simplices: true,
        threads: config.single_threaded().threads,
    };
    let mut lists = engine.count(adj, &request)?.simplices.unwrap_or_default();
    if lists.len() > 1 {
        lists[1] = adj.edges().map(|(i, j)| vec![i, j]).collect();
    }
    Ok(lists.into_iter().skip(1).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::flagser::FlagserEngine;

    fn two_triangles() -> AdjacencyMatrix {
        // 0->1->2 with 0->2 (a 2-simplex), and 2->3->4->2 (a hole)
        AdjacencyMatrix::from_edges(5, &[(0, 1), (1, 2), (0, 2), (2, 3), (3, 4), (4, 2)]).unwrap()
    }

    #[test]
    fn test_simplex_counts() {
        let counts =
            simplex_counts(&FlagserEngine::new(), &two_triangles(), &FlagConfig::default()).unwrap();
        assert_eq!(counts, vec![5, 6, 1]);
    }

    #[test]
    fn test_simplex_counts_are_directed_regardless_of_config() {
        let config = FlagConfig {
            directed: false,
            ..FlagConfig::default()
        };
        let counts = simplex_counts(&FlagserEngine::new(), &two_triangles(), &config).unwrap();
        assert_eq!(counts, vec![5, 6, 1]);
    }

    #[test]
    fn test_betti_counts() {
        let engine = FlagserEngine::new();
        let config = FlagConfig::default();
        let exact = betti_counts(&engine, &two_triangles(), 0, None, None, &config).unwrap();
        assert_eq!(exact, vec![1, 1, 0]);

        let approx = [Budget::Limit(0), Budget::Exact];
        let bounded =
            betti_counts(&engine, &two_triangles(), 0, Some(2), Some(&approx[..]), &config)
                .unwrap();
        // Budget 0 skips every column, so dimension 0 counts every vertex
        assert_eq!(bounded, vec![5, 1, 0]);
    }

    #[test]
    fn test_node_participation() {
        let participation =
            node_participation(&FlagserEngine::new(), &two_triangles(), &FlagConfig::default())
                .unwrap();
        assert_eq!(participation.len(), 5);
        assert_eq!(participation[0], vec![1, 2, 1]);
        assert_eq!(participation[2], vec![1, 4, 1]);
        assert_eq!(participation[4], vec![1, 2, 0]);
    }

    #[test]
    fn test_participation_sums_match_counts() {
        let engine = FlagserEngine::new();
        let config = FlagConfig::default();
        let counts = simplex_counts(&engine, &two_triangles(), &config).unwrap();
        let participation = node_participation(&engine, &two_triangles(), &config).unwrap();

        for (dim, &count) in counts.iter().enumerate() {
            let total: u64 = participation.iter().map(|row| row[dim]).sum();
            assert_eq!(total, (dim as u64 + 1) * count);
        }
    }

    #[test]
    fn test_simplex_lists() {
        let lists =
            simplex_lists(&FlagserEngine::new(), &two_triangles(), &FlagConfig::default()).unwrap();
        assert_eq!(lists.len(), 2);
        assert_eq!(
            lists[0],
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![1, 2],
                vec![2, 3],
                vec![3, 4],
                vec![4, 2]
            ]
        );
        assert_eq!(lists[1], vec![vec![0, 1, 2]]);
    }

    #[test]
    fn test_simplex_lists_without_edges() {
        let isolated = AdjacencyMatrix::from_edges(3, &[]).unwrap();
        let lists =
            simplex_lists(&FlagserEngine::new(), &isolated, &FlagConfig::default()).unwrap();
        assert!(lists.is_empty());
    }

    #[test]
    fn test_engine_errors_propagate() {
        let looped = AdjacencyMatrix::from_edges(2, &[(0, 0)]).unwrap();
        let err = simplex_counts(&FlagserEngine::new(), &looped, &FlagConfig::default())
            .unwrap_err();
        assert_eq!(err, TopologyError::Engine(EngineError::SelfLoop(0)));
    }
}
