use std::collections::BTreeSet;
use std::fmt;
use std::fmt::{Debug, Formatter};

use log::debug;

use crate::config::{normalise, ConstraintId};
use crate::core::{ParameterSet, ParameterUpdate};

/// The active run configuration. Owned by [`ConfigurationStore`] and only mutated
/// through its change operations, so the parameters it holds are always normalised
/// against the current selection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Configuration {
    /// The selected problem id, if any.
    pub problem: Option<String>,
    /// The selected algorithm id, if any.
    pub algorithm: Option<String>,
    /// The run parameters, normalised for the selection above.
    pub parameters: ParameterSet,
    /// The explanation to show while a constraint pins the objective count, so a shell
    /// can disable the control. `None` when the count is freely editable.
    pub validation_message: Option<String>,
}

impl Configuration {
    /// Whether both a problem and an algorithm have been selected.
    pub fn is_complete(&self) -> bool {
        self.problem.is_some() && self.algorithm.is_some()
    }
}

type Subscriber = Box<dyn Fn(&Configuration) + Send>;

/// Holds the current configuration and keeps it valid. Every change operation merges
/// the edit, runs the constraint engine and commits the corrected state in one step;
/// subscribers only ever observe committed, normalised configurations.
#[derive(Default)]
pub struct ConfigurationStore {
    configuration: Configuration,
    active_constraints: BTreeSet<ConstraintId>,
    subscribers: Vec<Subscriber>,
}

impl ConfigurationStore {
    /// Create a store with no selection and the default parameters.
    ///
    /// returns: `ConfigurationStore`
    pub fn new() -> Self {
        ConfigurationStore::default()
    }

    /// The current configuration.
    ///
    /// returns: `&Configuration`
    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// The constraint rules active for the current configuration.
    ///
    /// returns: `&BTreeSet<ConstraintId>`
    pub fn active_constraints(&self) -> &BTreeSet<ConstraintId> {
        &self.active_constraints
    }

    /// Select a problem. The full rule chain re-runs against the existing parameters;
    /// selecting a ZDT problem, for example, snaps the objective count back to two.
    ///
    /// # Arguments
    ///
    /// * `id`: The problem id.
    pub fn set_problem(&mut self, id: &str) {
        let mut next = self.configuration.clone();
        next.problem = Some(id.to_string());
        self.commit(next);
    }

    /// Select an algorithm. The full rule chain re-runs, not just the population rule:
    /// the problem may have changed in the same logical update.
    ///
    /// # Arguments
    ///
    /// * `id`: The algorithm id.
    pub fn set_algorithm(&mut self, id: &str) {
        let mut next = self.configuration.clone();
        next.algorithm = Some(id.to_string());
        self.commit(next);
    }

    /// Merge a partial parameter edit onto the current parameters and normalise the
    /// result.
    ///
    /// # Arguments
    ///
    /// * `update`: The fields to change.
    pub fn set_parameters(&mut self, update: ParameterUpdate) {
        let mut next = self.configuration.clone();
        next.parameters = update.apply_to(&self.configuration.parameters);
        self.commit(next);
    }

    /// Clear the selection and restore the default parameters.
    pub fn reset(&mut self) {
        self.commit(Configuration::default());
    }

    /// Register a callback invoked with every committed configuration.
    ///
    /// # Arguments
    ///
    /// * `subscriber`: The callback.
    pub fn subscribe<F>(&mut self, subscriber: F)
    where
        F: Fn(&Configuration) + Send + 'static,
    {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Normalise and commit a new configuration, then notify subscribers. The committed
    /// state is assigned in one step; no reader or subscriber can observe the
    /// un-normalised intermediate.
    fn commit(&mut self, mut next: Configuration) {
        let (parameters, applied) = normalise(
            next.problem.as_deref().unwrap_or(""),
            next.algorithm.as_deref().unwrap_or(""),
            &next.parameters,
        );
        if parameters != next.parameters {
            debug!(
                "Corrected parameters {:?} to {:?} ({} rule(s) applied)",
                next.parameters,
                parameters,
                applied.len()
            );
        }
        next.parameters = parameters;
        next.validation_message = applied
            .contains(&ConstraintId::FixedObjectiveCount)
            .then(|| ConstraintId::FixedObjectiveCount.description().to_string());

        self.configuration = next;
        self.active_constraints = applied;
        for subscriber in &self.subscribers {
            subscriber(&self.configuration);
        }
    }
}

impl Debug for ConfigurationStore {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("ConfigurationStore")
            .field("configuration", &self.configuration)
            .field("active_constraints", &self.active_constraints)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
