use serde::{Deserialize, Serialize};

use crate::core::{is_bi_objective_only, is_high_dimension_sensitive};

/// The smallest number of decision variables a problem accepts.
pub const MIN_VARIABLES: usize = 2;
/// The smallest allowed objective count.
pub const MIN_OBJECTIVES: usize = 2;
/// The largest allowed objective count.
pub const MAX_OBJECTIVES: usize = 5;
/// The population size high-dimension-sensitive algorithms need above three objectives.
pub const HIGH_DIMENSION_MIN_POPULATION: usize = 200;

/// The run parameters sent to the optimisation service. A set is only valid relative to
/// a problem and algorithm selection; use [`crate::config::normalise`] to correct it
/// before use. The serialised field names match the service wire format.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub struct ParameterSet {
    /// The number of decision variables.
    pub n_var: usize,
    /// The number of objective functions.
    pub n_obj: usize,
    /// The population size used in each generation.
    pub pop_size: usize,
    /// The number of generations to run.
    pub n_gen: usize,
}

impl Default for ParameterSet {
    fn default() -> Self {
        ParameterSet {
            n_var: 10,
            n_obj: 2,
            pop_size: 100,
            n_gen: 200,
        }
    }
}

/// A partial parameter change. Fields left to `None` keep their current value when the
/// update is merged onto a [`ParameterSet`].
#[derive(Deserialize, Copy, Clone, Debug, Default)]
pub struct ParameterUpdate {
    pub n_var: Option<usize>,
    pub n_obj: Option<usize>,
    pub pop_size: Option<usize>,
    pub n_gen: Option<usize>,
}

impl ParameterUpdate {
    /// Merge this update onto an existing parameter set.
    ///
    /// # Arguments
    ///
    /// * `current`: The parameters to start from.
    ///
    /// returns: `ParameterSet`
    pub fn apply_to(&self, current: &ParameterSet) -> ParameterSet {
        ParameterSet {
            n_var: self.n_var.unwrap_or(current.n_var),
            n_obj: self.n_obj.unwrap_or(current.n_obj),
            pop_size: self.pop_size.unwrap_or(current.pop_size),
            n_gen: self.n_gen.unwrap_or(current.n_gen),
        }
    }
}

/// The editing range and help text for one run parameter, for a shell to build its
/// controls from. Bounds are the recommended editing ranges; the constraint engine, not
/// the control bounds, is what keeps a configuration valid.
#[derive(Clone, Debug, PartialEq)]
pub struct ParameterDomain {
    /// The parameter field name (`n_var`, `n_obj`, `pop_size` or `n_gen`).
    pub name: &'static str,
    /// The display label.
    pub label: &'static str,
    /// The lowest recommended value.
    pub min: usize,
    /// The highest recommended value.
    pub max: usize,
    /// The control step.
    pub step: usize,
    /// The help text for the control.
    pub description: String,
    /// Whether the control must be disabled because a constraint pins the value.
    pub locked: bool,
}

/// Build the editing domains for the current selection. The objective-count control is
/// locked for bi-objective-only problems, and high-dimension-sensitive algorithms add a
/// computation-time note to its help text.
///
/// # Arguments
///
/// * `problem_id`: The selected problem id, or an empty string when none is selected.
/// * `algorithm_id`: The selected algorithm id, or an empty string when none is selected.
///
/// returns: `Vec<ParameterDomain>`
pub fn parameter_domains(problem_id: &str, algorithm_id: &str) -> Vec<ParameterDomain> {
    let fixed_objectives = is_bi_objective_only(problem_id);
    let mut n_obj_description = if fixed_objectives {
        "ZDT problems are fixed to 2 objectives".to_string()
    } else {
        "Number of objective functions to optimize (2-5)".to_string()
    };
    if is_high_dimension_sensitive(algorithm_id) {
        n_obj_description.push_str("\nNote: Higher dimensions (4-5) may increase computation time");
    }

    vec![
        ParameterDomain {
            name: "n_var",
            label: "Number of Variables",
            min: MIN_VARIABLES,
            max: 30,
            step: 1,
            description: "Number of decision variables in the optimization problem".to_string(),
            locked: false,
        },
        ParameterDomain {
            name: "n_obj",
            label: "Number of Objectives",
            min: MIN_OBJECTIVES,
            max: MAX_OBJECTIVES,
            step: 1,
            description: n_obj_description,
            locked: fixed_objectives,
        },
        ParameterDomain {
            name: "pop_size",
            label: "Population Size",
            min: 50,
            max: 500,
            step: 50,
            description: "Size of the population in each generation".to_string(),
            locked: false,
        },
        ParameterDomain {
            name: "n_gen",
            label: "Number of Generations",
            min: 50,
            max: 1000,
            step: 50,
            description: "Number of generations to run the optimization".to_string(),
            locked: false,
        },
    ]
}

#[cfg(test)]
mod test {
    use crate::core::{parameter_domains, ParameterSet, ParameterUpdate};

    #[test]
    fn test_default_parameters() {
        let parameters = ParameterSet::default();
        assert_eq!(
            parameters,
            ParameterSet {
                n_var: 10,
                n_obj: 2,
                pop_size: 100,
                n_gen: 200
            }
        );
    }

    #[test]
    fn test_partial_update_merge() {
        let current = ParameterSet::default();
        let update = ParameterUpdate {
            n_obj: Some(4),
            n_gen: Some(500),
            ..Default::default()
        };
        let merged = update.apply_to(&current);
        assert_eq!(merged.n_var, 10);
        assert_eq!(merged.n_obj, 4);
        assert_eq!(merged.pop_size, 100);
        assert_eq!(merged.n_gen, 500);
    }

    #[test]
    /// The wire field names must match the service request body.
    fn test_parameter_serialisation() {
        let data = serde_json::to_value(ParameterSet::default()).unwrap();
        assert_eq!(
            data,
            serde_json::json!({"n_var": 10, "n_obj": 2, "pop_size": 100, "n_gen": 200})
        );
    }

    #[test]
    fn test_objective_control_locked_for_zdt() {
        let domains = parameter_domains("zdt1", "nsga2");
        let n_obj = domains.iter().find(|d| d.name == "n_obj").unwrap();
        assert!(n_obj.locked);
        assert!(n_obj.description.contains("fixed to 2 objectives"));

        let domains = parameter_domains("dtlz2", "nsga3");
        let n_obj = domains.iter().find(|d| d.name == "n_obj").unwrap();
        assert!(!n_obj.locked);
        assert!(n_obj.description.contains("increase computation time"));
    }
}
