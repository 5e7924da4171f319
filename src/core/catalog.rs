use serde::{Deserialize, Serialize};

/// A problem family advertised by the optimisation service.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ProblemInfo {
    /// The problem identifier (for example `zdt1`).
    pub id: String,
    /// The display name.
    pub name: String,
    /// A short description of the problem.
    pub description: String,
}

/// An optimisation algorithm advertised by the optimisation service.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AlgorithmInfo {
    /// The algorithm identifier (for example `nsga2`).
    pub id: String,
    /// The display name.
    pub name: String,
    /// A short description of the algorithm.
    pub description: String,
}

/// The id prefix marking problems that only support two objectives.
const BI_OBJECTIVE_PREFIX: &str = "zdt";

/// The algorithms whose recommended population size grows with the objective count.
const HIGH_DIMENSION_SENSITIVE: [&str; 2] = ["moead", "nsga3"];

/// Whether a problem belongs to the bi-objective-only family. Problems in the ZDT suite
/// are defined for exactly two objectives and reject any other objective count.
///
/// # Arguments
///
/// * `problem_id`: The problem identifier.
///
/// returns: `bool`
pub fn is_bi_objective_only(problem_id: &str) -> bool {
    problem_id.starts_with(BI_OBJECTIVE_PREFIX)
}

/// Whether an algorithm is sensitive to the objective-space dimensionality. The MOEA/D
/// and NSGA-III families need larger populations when more than three objectives are
/// optimised.
///
/// # Arguments
///
/// * `algorithm_id`: The algorithm identifier.
///
/// returns: `bool`
pub fn is_high_dimension_sensitive(algorithm_id: &str) -> bool {
    HIGH_DIMENSION_SENSITIVE.contains(&algorithm_id)
}

/// The problems the reference optimisation service exposes. Shells can render this list
/// before the startup catalog fetch completes, or when the service is unreachable.
///
/// returns: `Vec<ProblemInfo>`
pub fn builtin_problems() -> Vec<ProblemInfo> {
    [
        ("zdt1", "ZDT1", "ZDT1 benchmark problem"),
        ("zdt2", "ZDT2", "ZDT2 benchmark problem"),
        ("dtlz1", "DTLZ1", "DTLZ1 benchmark problem"),
        ("dtlz2", "DTLZ2", "DTLZ2 benchmark problem"),
    ]
    .iter()
    .map(|(id, name, description)| ProblemInfo {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
    })
    .collect()
}

/// The algorithms the reference optimisation service exposes.
///
/// returns: `Vec<AlgorithmInfo>`
pub fn builtin_algorithms() -> Vec<AlgorithmInfo> {
    [
        (
            "nsga2",
            "NSGA-II",
            "Non-dominated Sorting Genetic Algorithm II",
        ),
        (
            "moead",
            "MOEA/D",
            "Multi-objective Evolutionary Algorithm based on Decomposition",
        ),
        (
            "nsga3",
            "NSGA-III",
            "Non-dominated Sorting Genetic Algorithm III",
        ),
    ]
    .iter()
    .map(|(id, name, description)| AlgorithmInfo {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
    })
    .collect()
}
