use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::thread::JoinHandle;

use chrono::{DateTime, Utc};
use log::{debug, info};

use crate::config::{normalise, Configuration};
use crate::core::{OptimizationResult, PError};
use crate::runner::{OptimizationService, OptimizeRequest};

/// The lifecycle of the current optimisation run. Owned by [`RunCoordinator`];
/// transitions only happen through its operations.
#[derive(Clone, Debug, Default)]
pub enum RunState {
    /// No run has been submitted, or the last run was cancelled.
    #[default]
    Idle,
    /// A request is in flight.
    Running,
    /// The last run completed and its result passed validation.
    Succeeded(Arc<OptimizationResult>),
    /// The last run failed; the message explains why.
    Failed(String),
}

impl RunState {
    /// Whether a request is currently in flight.
    pub fn is_running(&self) -> bool {
        matches!(self, RunState::Running)
    }

    /// The result of the last run, when it succeeded.
    ///
    /// returns: `Option<Arc<OptimizationResult>>`
    pub fn result(&self) -> Option<Arc<OptimizationResult>> {
        match self {
            RunState::Succeeded(result) => Some(Arc::clone(result)),
            _ => None,
        }
    }

    /// The failure message of the last run, when it failed.
    ///
    /// returns: `Option<&str>`
    pub fn failure(&self) -> Option<&str> {
        match self {
            RunState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

struct Shared {
    state: Mutex<RunState>,
    /// The sequence number of the most recently issued request. A worker only commits
    /// its outcome when its own number still matches; responses that lost the race to a
    /// cancellation or a newer submission are discarded.
    latest_sequence: AtomicU64,
}

/// A handle to one submitted run.
#[derive(Debug)]
pub struct RunHandle {
    sequence: u64,
    submitted_at: DateTime<Utc>,
    worker: JoinHandle<()>,
}

impl RunHandle {
    /// The sequence number of the request.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// When the request was submitted.
    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    /// Block until the worker thread has delivered (or discarded) its response.
    ///
    /// returns: `Result<(), PError>`
    pub fn wait(self) -> Result<(), PError> {
        self.worker
            .join()
            .map_err(|_| PError::Generic("the optimisation worker panicked".to_string()))
    }
}

/// Turns a configuration into a single in-flight optimisation request and tracks its
/// lifecycle. At most one run is in flight at a time; a second submission is rejected
/// until the current run reaches a terminal state or is cancelled.
pub struct RunCoordinator {
    service: Arc<dyn OptimizationService>,
    shared: Arc<Shared>,
}

impl RunCoordinator {
    /// Create a coordinator submitting runs to the given service.
    ///
    /// # Arguments
    ///
    /// * `service`: The optimisation service to submit runs to.
    ///
    /// returns: `RunCoordinator`
    pub fn new(service: Arc<dyn OptimizationService>) -> Self {
        RunCoordinator {
            service,
            shared: Arc::new(Shared {
                state: Mutex::new(RunState::Idle),
                latest_sequence: AtomicU64::new(0),
            }),
        }
    }

    /// A snapshot of the current run state.
    ///
    /// returns: `RunState`
    pub fn state(&self) -> RunState {
        self.shared.state.lock().unwrap().clone()
    }

    /// Submit a run for the given configuration. The parameters pass through the
    /// constraint engine once more on the way out, so the request is normalised even if
    /// the caller assembled the configuration by hand. This returns
    /// [`PError::AlreadyRunning`] while a run is in flight and
    /// [`PError::IncompleteConfiguration`] when the problem or algorithm is missing.
    ///
    /// # Arguments
    ///
    /// * `configuration`: The configuration to run.
    ///
    /// returns: `Result<RunHandle, PError>`
    pub fn submit(&self, configuration: &Configuration) -> Result<RunHandle, PError> {
        let problem = configuration
            .problem
            .as_deref()
            .ok_or_else(|| PError::IncompleteConfiguration("problem".to_string()))?;
        let algorithm = configuration
            .algorithm
            .as_deref()
            .ok_or_else(|| PError::IncompleteConfiguration("algorithm".to_string()))?;

        let (parameters, _) = normalise(problem, algorithm, &configuration.parameters);
        if parameters != configuration.parameters {
            debug!(
                "Submitted parameters {:?} were corrected to {:?}",
                configuration.parameters, parameters
            );
        }

        let sequence = {
            let mut state = self.shared.state.lock().unwrap();
            if state.is_running() {
                return Err(PError::AlreadyRunning);
            }
            *state = RunState::Running;
            self.shared.latest_sequence.fetch_add(1, Ordering::SeqCst) + 1
        };

        let request = OptimizeRequest::new(problem, algorithm, parameters);
        info!(
            "Submitting run #{} ({} with {})",
            sequence, request.problem, request.algorithm
        );

        let service = Arc::clone(&self.service);
        let shared = Arc::clone(&self.shared);
        let expected_n_obj = parameters.n_obj;
        let worker = thread::spawn(move || {
            let outcome = match service.optimize(&request) {
                Ok(result) => match result.validate(expected_n_obj) {
                    Ok(()) => RunState::Succeeded(Arc::new(result)),
                    Err(error) => RunState::Failed(error.to_string()),
                },
                Err(error) => RunState::Failed(error.to_string()),
            };

            let mut state = shared.state.lock().unwrap();
            if shared.latest_sequence.load(Ordering::SeqCst) == sequence && state.is_running() {
                match &outcome {
                    RunState::Succeeded(_) => info!("Run #{sequence} succeeded"),
                    RunState::Failed(message) => info!("Run #{sequence} failed: {message}"),
                    _ => (),
                }
                *state = outcome;
            } else {
                debug!("Discarding stale response for run #{sequence}");
            }
        });

        Ok(RunHandle {
            sequence,
            submitted_at: Utc::now(),
            worker,
        })
    }

    /// Cancel the in-flight run, if any. The external service may keep computing;
    /// cancellation only stops this coordinator from waiting on the response, which is
    /// discarded when it eventually arrives.
    pub fn cancel(&self) {
        let mut state = self.shared.state.lock().unwrap();
        if state.is_running() {
            let stale = self.shared.latest_sequence.fetch_add(1, Ordering::SeqCst);
            info!("Cancelling run #{stale}");
            *state = RunState::Idle;
        }
    }
}

#[cfg(test)]
mod test {
    use std::collections::VecDeque;
    use std::sync::mpsc::{channel, Sender};
    use std::sync::{Arc, Mutex};

    use crate::config::ConfigurationStore;
    use crate::core::{
        OptimizationResult, PError, ParetoFront, RunStatistics,
    };
    use crate::runner::{OptimizationService, OptimizeRequest, RunCoordinator, RunState};

    type Scripted = Box<dyn FnOnce() -> Result<OptimizationResult, PError> + Send>;

    /// A service returning pre-scripted responses, one per `optimize` call.
    struct ScriptedService {
        responses: Mutex<VecDeque<Scripted>>,
    }

    impl ScriptedService {
        fn new(responses: Vec<Scripted>) -> Arc<Self> {
            Arc::new(ScriptedService {
                responses: Mutex::new(responses.into()),
            })
        }
    }

    impl OptimizationService for ScriptedService {
        fn problems(&self) -> Result<Vec<crate::core::ProblemInfo>, PError> {
            Ok(crate::core::builtin_problems())
        }

        fn algorithms(&self) -> Result<Vec<crate::core::AlgorithmInfo>, PError> {
            Ok(crate::core::builtin_algorithms())
        }

        fn optimize(&self, _request: &OptimizeRequest) -> Result<OptimizationResult, PError> {
            let next = self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("no scripted response left");
            next()
        }
    }

    /// A bi-objective result whose execution time doubles as a marker value.
    fn result_with_marker(marker: f64) -> OptimizationResult {
        OptimizationResult {
            pareto_front: ParetoFront {
                objectives: vec![vec![0.1, 0.9], vec![0.5, 0.5]],
                variables: vec![],
            },
            history: vec![],
            execution_time: marker,
            generations_run: 200,
            success: true,
            statistics: RunStatistics {
                n_var: Some(10),
                n_obj: Some(2),
                pop_size: 100,
                n_gen: Some(200),
            },
            problem_name: None,
            algorithm_name: None,
            convergence: None,
        }
    }

    fn configured_store() -> ConfigurationStore {
        let mut store = ConfigurationStore::new();
        store.set_problem("zdt1");
        store.set_algorithm("nsga2");
        store
    }

    /// A scripted response that blocks until the returned sender fires.
    fn gated_response(marker: f64) -> (Scripted, Sender<()>) {
        let (sender, receiver) = channel();
        let response: Scripted = Box::new(move || {
            receiver.recv().unwrap();
            Ok(result_with_marker(marker))
        });
        (response, sender)
    }

    #[test]
    fn test_successful_run() {
        let service = ScriptedService::new(vec![Box::new(|| Ok(result_with_marker(1.0)))]);
        let coordinator = RunCoordinator::new(service);
        let store = configured_store();

        let handle = coordinator.submit(store.configuration()).unwrap();
        assert_eq!(handle.sequence(), 1);
        handle.wait().unwrap();

        let result = coordinator.state().result().unwrap();
        assert_eq!(result.execution_time, 1.0);
        assert_eq!(result.pareto_front.objectives.len(), 2);
    }

    #[test]
    fn test_incomplete_configuration() {
        let service = ScriptedService::new(vec![]);
        let coordinator = RunCoordinator::new(service);
        let mut store = ConfigurationStore::new();

        let error = coordinator.submit(store.configuration()).unwrap_err();
        assert!(matches!(error, PError::IncompleteConfiguration(_)));

        store.set_problem("zdt1");
        let error = coordinator.submit(store.configuration()).unwrap_err();
        assert!(error.to_string().contains("algorithm"));
    }

    #[test]
    /// A second submission while a run is in flight is rejected and does not disturb
    /// the in-flight run.
    fn test_reject_submit_while_running() {
        let (response, release) = gated_response(1.0);
        let service = ScriptedService::new(vec![response]);
        let coordinator = RunCoordinator::new(service);
        let store = configured_store();

        let handle = coordinator.submit(store.configuration()).unwrap();
        assert!(coordinator.state().is_running());

        let error = coordinator.submit(store.configuration()).unwrap_err();
        assert!(matches!(error, PError::AlreadyRunning));

        release.send(()).unwrap();
        handle.wait().unwrap();
        assert_eq!(coordinator.state().result().unwrap().execution_time, 1.0);
    }

    #[test]
    /// After a cancellation the stale response must not overwrite the state, even when
    /// a newer run has completed in the meantime.
    fn test_stale_response_discarded() {
        let (first_response, release_first) = gated_response(1.0);
        let service = ScriptedService::new(vec![
            first_response,
            Box::new(|| Ok(result_with_marker(2.0))),
        ]);
        let coordinator = RunCoordinator::new(service);
        let store = configured_store();

        let first = coordinator.submit(store.configuration()).unwrap();
        coordinator.cancel();
        assert!(matches!(coordinator.state(), RunState::Idle));

        let second = coordinator.submit(store.configuration()).unwrap();
        second.wait().unwrap();
        assert_eq!(coordinator.state().result().unwrap().execution_time, 2.0);

        // Release the cancelled worker; its response is stale and must be dropped.
        release_first.send(()).unwrap();
        first.wait().unwrap();
        assert_eq!(coordinator.state().result().unwrap().execution_time, 2.0);
    }

    #[test]
    /// Cancelling with nothing in flight is a no-op.
    fn test_cancel_when_idle() {
        let service = ScriptedService::new(vec![]);
        let coordinator = RunCoordinator::new(service);
        coordinator.cancel();
        assert!(matches!(coordinator.state(), RunState::Idle));
    }

    #[test]
    /// A structurally invalid result is a run failure, not a crash.
    fn test_schema_error_becomes_failure() {
        let service = ScriptedService::new(vec![Box::new(|| {
            let mut result = result_with_marker(1.0);
            result.pareto_front.objectives = vec![vec![0.1, 0.9], vec![0.5, 0.5, 0.3]];
            Ok(result)
        })]);
        let coordinator = RunCoordinator::new(service);
        let store = configured_store();

        let handle = coordinator.submit(store.configuration()).unwrap();
        handle.wait().unwrap();

        let state = coordinator.state();
        let message = state.failure().unwrap();
        assert!(message.contains("length 3 instead of 2"));
    }

    #[test]
    /// The service-provided failure message is surfaced verbatim.
    fn test_service_failure_message() {
        let service = ScriptedService::new(vec![Box::new(|| {
            Err(PError::Service("Unknown algorithm: spea2".to_string()))
        })]);
        let coordinator = RunCoordinator::new(service);
        let store = configured_store();

        let handle = coordinator.submit(store.configuration()).unwrap();
        handle.wait().unwrap();

        let state = coordinator.state();
        assert!(state.failure().unwrap().contains("Unknown algorithm: spea2"));
    }

    #[test]
    /// A failed run is recoverable by a fresh submission.
    fn test_resubmit_after_failure() {
        let service = ScriptedService::new(vec![
            Box::new(|| Err(PError::Service("boom".to_string()))),
            Box::new(|| Ok(result_with_marker(3.0))),
        ]);
        let coordinator = RunCoordinator::new(service);
        let store = configured_store();

        coordinator
            .submit(store.configuration())
            .unwrap()
            .wait()
            .unwrap();
        assert!(coordinator.state().failure().is_some());

        coordinator
            .submit(store.configuration())
            .unwrap()
            .wait()
            .unwrap();
        assert_eq!(coordinator.state().result().unwrap().execution_time, 3.0);
    }
}
