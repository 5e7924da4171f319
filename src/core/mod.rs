pub use catalog::{
    builtin_algorithms, builtin_problems, is_bi_objective_only, is_high_dimension_sensitive,
    AlgorithmInfo, ProblemInfo,
};
pub use error::PError;
pub use parameters::{
    parameter_domains, ParameterDomain, ParameterSet, ParameterUpdate,
    HIGH_DIMENSION_MIN_POPULATION, MAX_OBJECTIVES, MIN_OBJECTIVES, MIN_VARIABLES,
};
pub use result::{
    ConvergenceBounds, GenerationRecord, OptimizationResult, ParetoFront, RunStatistics,
    RunSummary,
};

mod catalog;
mod error;
mod parameters;
mod result;
