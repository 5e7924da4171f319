use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::core::{AlgorithmInfo, OptimizationResult, PError, ParameterSet, ProblemInfo};

/// The body of an optimisation request. The parameters are flattened so the wire shape
/// is `{problem, algorithm, n_var, n_obj, pop_size, n_gen}`.
#[derive(Serialize, Clone, Debug)]
pub struct OptimizeRequest {
    /// The problem id to solve.
    pub problem: String,
    /// The algorithm id to run.
    pub algorithm: String,
    /// The run parameters.
    #[serde(flatten)]
    pub parameters: ParameterSet,
}

impl OptimizeRequest {
    /// Build a request for a problem/algorithm pair.
    ///
    /// # Arguments
    ///
    /// * `problem`: The problem id.
    /// * `algorithm`: The algorithm id.
    /// * `parameters`: The normalised run parameters.
    ///
    /// returns: `OptimizeRequest`
    pub fn new(problem: &str, algorithm: &str, parameters: ParameterSet) -> Self {
        OptimizeRequest {
            problem: problem.to_string(),
            algorithm: algorithm.to_string(),
            parameters,
        }
    }
}

/// The envelope the service wraps an optimisation response in.
#[derive(Deserialize, Debug)]
struct ServiceResponse {
    /// Either `success` or `error`.
    status: String,
    /// The result payload on success.
    #[serde(default)]
    data: Option<OptimizationResult>,
    /// The failure explanation on error.
    #[serde(default)]
    message: Option<String>,
}

/// The operations an optimisation service must provide. The run coordinator and the
/// application shell depend on this trait rather than on a concrete transport, so tests
/// and offline shells can substitute their own implementation.
pub trait OptimizationService: Send + Sync {
    /// List the problems the service can solve.
    ///
    /// returns: `Result<Vec<ProblemInfo>, PError>`
    fn problems(&self) -> Result<Vec<ProblemInfo>, PError>;

    /// List the algorithms the service can run.
    ///
    /// returns: `Result<Vec<AlgorithmInfo>, PError>`
    fn algorithms(&self) -> Result<Vec<AlgorithmInfo>, PError>;

    /// Run one optimisation to completion. This call may block for an unbounded time.
    ///
    /// # Arguments
    ///
    /// * `request`: The run request.
    ///
    /// returns: `Result<OptimizationResult, PError>`
    fn optimize(&self, request: &OptimizeRequest) -> Result<OptimizationResult, PError>;
}

/// An [`OptimizationService`] over HTTP. One client instance is reused across requests
/// to benefit from connection pooling.
pub struct HttpService {
    base_url: String,
    client: Client,
}

impl HttpService {
    /// Create a client for the service at `base_url` (for example
    /// `http://127.0.0.1:5000/api`). The request timeout is disabled because a run has
    /// no bounded duration; only the connection attempt is limited.
    ///
    /// # Arguments
    ///
    /// * `base_url`: The URL prefix the service endpoints live under.
    ///
    /// returns: `Result<HttpService, PError>`
    pub fn new(base_url: &str) -> Result<Self, PError> {
        let client = Client::builder()
            .timeout(None)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("paretoscope/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(HttpService {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

impl OptimizationService for HttpService {
    fn problems(&self) -> Result<Vec<ProblemInfo>, PError> {
        let response = self
            .client
            .get(self.endpoint("problems"))
            .send()?
            .error_for_status()?;
        Ok(response.json()?)
    }

    fn algorithms(&self) -> Result<Vec<AlgorithmInfo>, PError> {
        let response = self
            .client
            .get(self.endpoint("algorithms"))
            .send()?
            .error_for_status()?;
        Ok(response.json()?)
    }

    fn optimize(&self, request: &OptimizeRequest) -> Result<OptimizationResult, PError> {
        let response = self
            .client
            .post(self.endpoint("optimize"))
            .json(request)
            .send()?;

        let status = response.status();
        let envelope: ServiceResponse = match response.json() {
            Ok(envelope) => envelope,
            // The body was not the expected envelope. Surface the HTTP status for
            // failure codes; a malformed success body is a transport-level fault.
            Err(_) if !status.is_success() => {
                return Err(PError::Service(format!(
                    "the service returned HTTP {status}"
                )));
            }
            Err(error) => return Err(PError::Transport(error)),
        };

        if !status.is_success() || envelope.status != "success" {
            return Err(PError::Service(envelope.message.unwrap_or_else(|| {
                "the optimisation failed without an explanation".to_string()
            })));
        }
        envelope.data.ok_or_else(|| {
            PError::Schema("the success response carries no result data".to_string())
        })
    }
}
