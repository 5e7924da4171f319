//! `paretoscope` is the front-end core for multi-objective optimisation services: it
//! keeps a run configuration valid against the constraint rules of the selected
//! problem and algorithm, drives a single in-flight run against an external
//! optimisation service, and projects the returned Pareto front and per-generation
//! history into chart-ready views.
//!
//! The crate is organised around the data flow:
//! - [`config`]: the constraint engine ([`config::normalise`]) and the
//!   [`config::ConfigurationStore`] every edit funnels through;
//! - [`runner`]: the [`runner::OptimizationService`] seam, its HTTP implementation
//!   and the [`runner::RunCoordinator`] run-lifecycle state machine;
//! - [`charts`]: the dimensionality-driven chart strategy selector, the
//!   convergence/population projector, and (behind the default `plot` feature) SVG
//!   rendering with `plotters`;
//! - [`core`]: the shared types: catalog entries, parameters, results and errors.
//!
//! A minimal shell looks like this:
//! ```no_run
//! use std::sync::Arc;
//!
//! use paretoscope::charts::select_view;
//! use paretoscope::config::ConfigurationStore;
//! use paretoscope::core::{ParameterUpdate, PError};
//! use paretoscope::runner::{HttpService, RunCoordinator};
//!
//! fn main() -> Result<(), PError> {
//!     let service = Arc::new(HttpService::new("http://127.0.0.1:5000/api")?);
//!
//!     let mut store = ConfigurationStore::new();
//!     store.set_problem("zdt1");
//!     store.set_algorithm("nsga2");
//!     store.set_parameters(ParameterUpdate {
//!         n_gen: Some(100),
//!         ..Default::default()
//!     });
//!
//!     let coordinator = RunCoordinator::new(service);
//!     coordinator.submit(store.configuration())?.wait()?;
//!
//!     if let Some(result) = coordinator.state().result() {
//!         let view = select_view(&result.pareto_front.objectives)?;
//!         println!("{} ({})", result.summary(), view.name());
//!     }
//!     Ok(())
//! }
//! ```

pub mod charts;
pub mod config;
pub mod core;
pub mod runner;
pub mod utils;
