//! Configuration types for flag-complex computations.

use pyo3::prelude::*;

/// Engine settings shared by every statistic.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlagConfig {
    /// Build the directed flag complex (false symmetrises the graph first)
    #[pyo3(get, set)]
    pub directed: bool,
    /// Order of the coefficient field for homology (must be prime)
    #[pyo3(get, set)]
    pub coefficient_field: u32,
    /// Worker threads handed to the engine
    #[pyo3(get, set)]
    pub threads: usize,
    /// Verbosity level: 0=silent, 1=runs, 2=debug
    #[pyo3(get, set)]
    pub verbosity: u8,
}

impl Default for FlagConfig {
    fn default() -> Self {
        Self {
            directed: true,
            coefficient_field: 2,
            threads: 1,
            verbosity: 1,
        }
    }
}

impl FlagConfig {
    /// Copy of this configuration pinned to one worker thread.
    pub fn single_threaded(&self) -> Self {
        Self {
            threads: 1,
            ..self.clone()
        }
    }
}

#[pymethods]
impl FlagConfig {
    #[new]
    #[pyo3(signature = (
        directed=None,
        coefficient_field=None,
        threads=None,
        verbosity=None
    ))]
    fn new(
        directed: Option<bool>,
        coefficient_field: Option<u32>,
        threads: Option<usize>,
        verbosity: Option<u8>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            directed: directed.unwrap_or(defaults.directed),
            coefficient_field: coefficient_field.unwrap_or(defaults.coefficient_field),
            threads: threads.unwrap_or(defaults.threads),
            verbosity: verbosity.unwrap_or(defaults.verbosity),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "FlagConfig(directed={}, coefficient_field={}, threads={}, verbosity={})",
            self.directed, self.coefficient_field, self.threads, self.verbosity
        )
    }
}
