use std::env;
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use log::{warn, LevelFilter};

use paretoscope::charts::{
    indicator_series, non_dominated_series, render_convergence, render_pareto_front,
    render_population, select_view,
};
use paretoscope::config::ConfigurationStore;
use paretoscope::core::{builtin_algorithms, builtin_problems, ParameterUpdate};
use paretoscope::runner::{HttpService, OptimizationService, RunCoordinator};

/// Configure and run one optimisation against a local service, then render the result
/// charts next to the working directory.
///
/// Start the optimisation service first, then run:
///
/// `cargo run --example studio`
fn main() -> Result<(), Box<dyn Error>> {
    // Add log
    env_logger::builder().filter_level(LevelFilter::Info).init();

    let service = Arc::new(HttpService::new("http://127.0.0.1:5000/api")?);

    // Fetch the catalogs once at startup; fall back to the builtin lists when the
    // service cannot be reached yet.
    let problems = service.problems().unwrap_or_else(|error| {
        warn!("Cannot fetch the problem catalog ({error}), using the builtin list");
        builtin_problems()
    });
    let algorithms = service.algorithms().unwrap_or_else(|error| {
        warn!("Cannot fetch the algorithm catalog ({error}), using the builtin list");
        builtin_algorithms()
    });
    for problem in &problems {
        println!("Problem   {:<8} {}", problem.id, problem.description);
    }
    for algorithm in &algorithms {
        println!("Algorithm {:<8} {}", algorithm.id, algorithm.description);
    }

    // Build the configuration. The store corrects the 4-objective edit back to 2
    // because ZDT problems are bi-objective.
    let mut store = ConfigurationStore::new();
    store.set_problem("zdt1");
    store.set_algorithm("nsga2");
    store.set_parameters(ParameterUpdate {
        n_obj: Some(4),
        n_gen: Some(100),
        ..Default::default()
    });
    if let Some(message) = &store.configuration().validation_message {
        println!("Note: {message}");
    }

    // Run the optimisation and wait for the terminal state.
    let coordinator = RunCoordinator::new(service);
    coordinator.submit(store.configuration())?.wait()?;

    let state = coordinator.state();
    let result = match state.result() {
        Some(result) => result,
        None => {
            println!(
                "The run failed: {}",
                state.failure().unwrap_or("no failure message")
            );
            return Ok(());
        }
    };
    println!("{}", result.summary());

    // Project and render the charts.
    let out_path = PathBuf::from(&env::current_dir().unwrap()).join("demos");
    let view = select_view(&result.pareto_front.objectives)?;
    render_pareto_front(&view, out_path.join("pareto_front.svg"))?;

    let convergence = indicator_series(&result.history);
    if convergence.is_empty() {
        println!("The run history carries no convergence indicators");
    } else {
        render_convergence(&convergence, out_path.join("convergence.svg"))?;
    }
    match non_dominated_series(&result.history) {
        Some(series) => render_population(&series, out_path.join("population.svg"))?,
        None => println!("The run history is empty"),
    }

    Ok(())
}
