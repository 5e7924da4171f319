use std::fmt;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::core::PError;

/// The set of non-dominated solutions returned by an optimisation run.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ParetoFront {
    /// The objective vectors, one per non-dominated solution. All vectors have the same
    /// length, equal to the configured objective count.
    pub objectives: Vec<Vec<f64>>,
    /// The decision-variable vectors matching the objective vectors, when the service
    /// exports them.
    #[serde(default)]
    pub variables: Vec<Vec<f64>>,
}

/// The snapshot the service collected at the end of one generation.
#[derive(Serialize, Deserialize, Copy, Clone, Debug)]
pub struct GenerationRecord {
    /// The generation index.
    #[serde(rename = "n_gen")]
    pub generation: usize,
    /// The number of non-dominated solutions in the population.
    #[serde(rename = "n_nds")]
    pub non_dominated_count: usize,
    /// The cumulative number of objective evaluations, when tracked.
    #[serde(rename = "n_eval", default)]
    pub evaluations: Option<usize>,
    /// The inverted generational distance, when a reference front was available.
    #[serde(default)]
    pub igd: Option<f64>,
    /// The generational distance, when a reference front was available.
    #[serde(default)]
    pub gd: Option<f64>,
    /// The hypervolume, when the service calculated it.
    #[serde(default)]
    pub hv: Option<f64>,
}

/// The parameter set the run actually used, echoed back by the service.
#[derive(Serialize, Deserialize, Copy, Clone, Debug)]
pub struct RunStatistics {
    #[serde(default)]
    pub n_var: Option<usize>,
    #[serde(default)]
    pub n_obj: Option<usize>,
    /// The population size used in each generation.
    pub pop_size: usize,
    #[serde(default)]
    pub n_gen: Option<usize>,
}

/// The ideal and nadir points of the problem, when the service knows them.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ConvergenceBounds {
    #[serde(default)]
    pub ideal_point: Option<Vec<f64>>,
    #[serde(default)]
    pub nadir_point: Option<Vec<f64>>,
}

/// The structured result of one optimisation run. Results are immutable once received;
/// the chart layer only reads them.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct OptimizationResult {
    /// The final Pareto front.
    pub pareto_front: ParetoFront,
    /// The per-generation history, ordered by generation index.
    #[serde(default)]
    pub history: Vec<GenerationRecord>,
    /// The run duration in seconds.
    pub execution_time: f64,
    /// The number of generations the run executed.
    #[serde(rename = "generation")]
    pub generations_run: usize,
    /// Whether the service judged the run converged.
    pub success: bool,
    /// The parameter set the run used.
    pub statistics: RunStatistics,
    /// The problem id the run solved.
    #[serde(default)]
    pub problem_name: Option<String>,
    /// The algorithm id the run used.
    #[serde(default)]
    pub algorithm_name: Option<String>,
    /// The problem's ideal/nadir points, when known.
    #[serde(default)]
    pub convergence: Option<ConvergenceBounds>,
}

impl OptimizationResult {
    /// Check the structural invariants of a result received from the service: the front
    /// must not be empty, every objective vector must have length `expected_n_obj`, and
    /// the history must be ordered by strictly increasing generation index. This returns
    /// a [`PError::Schema`] describing the first violation found.
    ///
    /// # Arguments
    ///
    /// * `expected_n_obj`: The objective count the run was configured with.
    ///
    /// returns: `Result<(), PError>`
    pub fn validate(&self, expected_n_obj: usize) -> Result<(), PError> {
        if self.pareto_front.objectives.is_empty() {
            return Err(PError::Schema(
                "the Pareto front contains no objective vectors".to_string(),
            ));
        }
        for (index, point) in self.pareto_front.objectives.iter().enumerate() {
            if point.len() != expected_n_obj {
                return Err(PError::Schema(format!(
                    "objective vector #{} has length {} instead of {}",
                    index,
                    point.len(),
                    expected_n_obj
                )));
            }
        }
        for pair in self.history.windows(2) {
            if pair[1].generation <= pair[0].generation {
                return Err(PError::Schema(format!(
                    "history is not ordered by generation (found #{} after #{})",
                    pair[1].generation, pair[0].generation
                )));
            }
        }
        Ok(())
    }

    /// Build the display values for the statistics panel.
    ///
    /// returns: `RunSummary`
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            execution_time: format!("{:.2}s", self.execution_time),
            generations_run: self.generations_run,
            pop_size: self.statistics.pop_size,
            convergence_status: if self.success {
                "Converged"
            } else {
                "Not Converged"
            },
        }
    }
}

/// The formatted statistics of a completed run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    /// The run duration, formatted as seconds with two decimals.
    pub execution_time: String,
    /// The number of generations the run executed.
    pub generations_run: usize,
    /// The population size used in each generation.
    pub pop_size: usize,
    /// Either `Converged` or `Not Converged`.
    pub convergence_status: &'static str,
}

impl Display for RunSummary {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "{} after {} generations with {} individuals, took {}",
            self.convergence_status, self.generations_run, self.pop_size, self.execution_time
        )
    }
}
