pub use coordinator::{RunCoordinator, RunHandle, RunState};
pub use service::{HttpService, OptimizationService, OptimizeRequest};

mod coordinator;
mod service;
