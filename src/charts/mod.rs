pub use convergence::{
    indicator_series, non_dominated_series, CountSeries, Indicator, IndicatorSeries,
};
#[cfg(feature = "plot")]
pub use plot::{render_convergence, render_pareto_front, render_population};
pub use strategy::{
    select_view, AxisProjection, ParallelAxes, ParetoView, ScatterPlane, ScatterVolume,
};

mod convergence;
#[cfg(feature = "plot")]
mod plot;
mod strategy;
