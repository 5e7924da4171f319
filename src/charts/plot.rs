use std::ops::Range;
use std::path::Path;

use log::info;
use plotters::coord::combinators::IntoLogRange;
use plotters::prelude::*;
use plotters::style::colors::colormaps::{ColorMap, ViridisRGB};

use crate::charts::{CountSeries, IndicatorSeries, ParallelAxes, ParetoView};
use crate::core::PError;
use crate::utils::{vector_max, vector_min};

const CHART_SIZE: (u32, u32) = (800, 600);
const CAPTION_FONT: (&str, u32) = ("sans-serif", 24);

/// The colour the reference front-end draws the population series with.
const POPULATION_COLOUR: RGBColor = RGBColor(33, 150, 243);

fn chart_error<E: std::fmt::Display>(name: &'static str) -> impl Fn(E) -> PError {
    move |error| PError::Chart(name.to_string(), error.to_string())
}

/// The axis range covering `values` with a small margin on both sides.
fn padded_range(values: &[f64]) -> Result<Range<f64>, PError> {
    let min = vector_min(values)?;
    let max = vector_max(values)?;
    let span = max - min;
    let pad = if span == 0.0 { 0.5 } else { span * 0.05 };
    Ok((min - pad)..(max + pad))
}

/// The ordinal colour of point `index` out of `count`, on the Viridis ramp.
fn ordinal_colour(index: usize, count: usize) -> RGBColor {
    let denominator = count.saturating_sub(1).max(1) as f32;
    ViridisRGB.get_color(index as f32 / denominator)
}

/// Render a projected Pareto front to an SVG file, using the chart strategy the view
/// was selected for.
///
/// # Arguments
///
/// * `view`: The projected front from [`crate::charts::select_view`].
/// * `destination`: The path of the SVG file to write.
///
/// returns: `Result<(), PError>`
pub fn render_pareto_front<P: AsRef<Path>>(view: &ParetoView, destination: P) -> Result<(), PError> {
    let to_chart_error = chart_error("pareto front");
    let root = SVGBackend::new(destination.as_ref(), CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(&to_chart_error)?;

    match view {
        ParetoView::TwoD(plane) => {
            let mut chart = ChartBuilder::on(&root)
                .caption(view.name(), CAPTION_FONT)
                .margin(10)
                .x_label_area_size(40)
                .y_label_area_size(50)
                .build_cartesian_2d(padded_range(&plane.x)?, padded_range(&plane.y)?)
                .map_err(&to_chart_error)?;
            chart
                .configure_mesh()
                .x_desc("Objective 1")
                .y_desc("Objective 2")
                .draw()
                .map_err(&to_chart_error)?;

            let count = plane.x.len();
            chart
                .draw_series(
                    plane
                        .x
                        .iter()
                        .zip(&plane.y)
                        .zip(&plane.colour_index)
                        .map(|((x, y), index)| {
                            Circle::new((*x, *y), 4, ordinal_colour(*index, count).filled())
                        }),
                )
                .map_err(&to_chart_error)?;
        }
        ParetoView::ThreeD(volume) => {
            let mut chart = ChartBuilder::on(&root)
                .caption(view.name(), CAPTION_FONT)
                .margin(20)
                .build_cartesian_3d(
                    padded_range(&volume.x)?,
                    padded_range(&volume.y)?,
                    padded_range(&volume.z)?,
                )
                .map_err(&to_chart_error)?;
            chart.with_projection(|mut projection| {
                projection.yaw = 0.8;
                projection.pitch = 0.25;
                projection.scale = 0.8;
                projection.into_matrix()
            });
            chart.configure_axes().draw().map_err(&to_chart_error)?;

            let count = volume.x.len();
            chart
                .draw_series(
                    volume
                        .x
                        .iter()
                        .zip(&volume.y)
                        .zip(&volume.z)
                        .zip(&volume.colour_index)
                        .map(|(((x, y), z), index)| {
                            Circle::new((*x, *y, *z), 3, ordinal_colour(*index, count).filled())
                        }),
                )
                .map_err(&to_chart_error)?;
        }
        ParetoView::ParallelCoordinates(parallel) => {
            draw_parallel_axes(&root, view.name(), parallel)?;
        }
    }

    root.present().map_err(&to_chart_error)?;
    info!("Saved chart {:?}", destination.as_ref());
    Ok(())
}

/// Draw one vertical axis per objective and one polyline per point, with values
/// normalised into each axis's own data range.
fn draw_parallel_axes(
    root: &DrawingArea<SVGBackend<'_>, plotters::coord::Shift>,
    caption: &str,
    parallel: &ParallelAxes,
) -> Result<(), PError> {
    let to_chart_error = chart_error("pareto front");
    let axis_count = parallel.axes.len();

    let mut chart = ChartBuilder::on(root)
        .caption(caption, CAPTION_FONT)
        .margin(10)
        .x_label_area_size(10)
        .build_cartesian_2d(-0.5f64..(axis_count as f64 - 0.5), -0.1f64..1.05f64)
        .map_err(&to_chart_error)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .disable_x_axis()
        .disable_y_axis()
        .draw()
        .map_err(&to_chart_error)?;

    // Axis verticals with their labels underneath.
    for (index, axis) in parallel.axes.iter().enumerate() {
        let x = index as f64;
        chart
            .draw_series(LineSeries::new(
                vec![(x, 0.0), (x, 1.0)],
                BLACK.stroke_width(1),
            ))
            .map_err(&to_chart_error)?;
        chart
            .draw_series(std::iter::once(Text::new(
                axis.label.clone(),
                (x, -0.05),
                ("sans-serif", 14),
            )))
            .map_err(&to_chart_error)?;
    }

    // One polyline per point across all axes.
    for point in 0..parallel.point_count {
        let colour = ordinal_colour(point, parallel.point_count);
        chart
            .draw_series(LineSeries::new(
                parallel.axes.iter().enumerate().map(|(index, axis)| {
                    let span = axis.max - axis.min;
                    let normalised = if span == 0.0 {
                        0.5
                    } else {
                        (axis.values[point] - axis.min) / span
                    };
                    (index as f64, normalised)
                }),
                colour.stroke_width(1),
            ))
            .map_err(&to_chart_error)?;
    }
    Ok(())
}

/// Render the convergence history to an SVG file, one line per indicator. The value
/// axis uses a log scale when every value is positive, matching how convergence
/// indicators are usually read.
///
/// # Arguments
///
/// * `series`: The indicator series from [`crate::charts::indicator_series`].
/// * `destination`: The path of the SVG file to write.
///
/// returns: `Result<(), PError>`
pub fn render_convergence<P: AsRef<Path>>(
    series: &[IndicatorSeries],
    destination: P,
) -> Result<(), PError> {
    if series.is_empty() {
        return Err(PError::InsufficientData(
            "the run history carries no convergence indicators".to_string(),
        ));
    }
    let to_chart_error = chart_error("convergence");

    let generations: Vec<f64> = series
        .iter()
        .flat_map(|s| s.generations.iter().map(|g| *g as f64))
        .collect();
    let values: Vec<f64> = series.iter().flat_map(|s| s.values.clone()).collect();
    let x_range = padded_range(&generations)?;
    let min_value = vector_min(&values)?;
    let max_value = vector_max(&values)?;

    let root = SVGBackend::new(destination.as_ref(), CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(&to_chart_error)?;
    let mut builder = ChartBuilder::on(&root);
    builder
        .caption("Convergence History", CAPTION_FONT)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60);

    if min_value > 0.0 {
        let mut chart = builder
            .build_cartesian_2d(x_range, ((min_value * 0.9)..(max_value * 1.1)).log_scale())
            .map_err(&to_chart_error)?;
        chart
            .configure_mesh()
            .x_desc("Generation")
            .y_desc("Metric Value")
            .draw()
            .map_err(&to_chart_error)?;
        for (index, indicator) in series.iter().enumerate() {
            let colour = Palette99::pick(index);
            chart
                .draw_series(
                    LineSeries::new(
                        indicator
                            .generations
                            .iter()
                            .zip(&indicator.values)
                            .map(|(generation, value)| (*generation as f64, *value)),
                        colour.stroke_width(2),
                    )
                    .point_size(3),
                )
                .map_err(&to_chart_error)?
                .label(indicator.label)
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 18, y)], colour.stroke_width(2))
                });
        }
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(&to_chart_error)?;
    } else {
        let mut chart = builder
            .build_cartesian_2d(x_range, padded_range(&values)?)
            .map_err(&to_chart_error)?;
        chart
            .configure_mesh()
            .x_desc("Generation")
            .y_desc("Metric Value")
            .draw()
            .map_err(&to_chart_error)?;
        for (index, indicator) in series.iter().enumerate() {
            let colour = Palette99::pick(index);
            chart
                .draw_series(
                    LineSeries::new(
                        indicator
                            .generations
                            .iter()
                            .zip(&indicator.values)
                            .map(|(generation, value)| (*generation as f64, *value)),
                        colour.stroke_width(2),
                    )
                    .point_size(3),
                )
                .map_err(&to_chart_error)?
                .label(indicator.label)
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 18, y)], colour.stroke_width(2))
                });
        }
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(&to_chart_error)?;
    }

    root.present().map_err(&to_chart_error)?;
    info!("Saved chart {:?}", destination.as_ref());
    Ok(())
}

/// Render the per-generation non-dominated solution count to an SVG file.
///
/// # Arguments
///
/// * `series`: The count series from [`crate::charts::non_dominated_series`].
/// * `destination`: The path of the SVG file to write.
///
/// returns: `Result<(), PError>`
pub fn render_population<P: AsRef<Path>>(
    series: &CountSeries,
    destination: P,
) -> Result<(), PError> {
    if series.generations.is_empty() {
        return Err(PError::InsufficientData(
            "the run history is empty".to_string(),
        ));
    }
    let to_chart_error = chart_error("population");

    let generations: Vec<f64> = series.generations.iter().map(|g| *g as f64).collect();
    let counts: Vec<f64> = series.counts.iter().map(|c| *c as f64).collect();

    let root = SVGBackend::new(destination.as_ref(), CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(&to_chart_error)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Non-dominated Solutions per Generation", CAPTION_FONT)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(padded_range(&generations)?, padded_range(&counts)?)
        .map_err(&to_chart_error)?;
    chart
        .configure_mesh()
        .x_desc("Generation")
        .y_desc("Number of Solutions")
        .draw()
        .map_err(&to_chart_error)?;

    chart
        .draw_series(
            LineSeries::new(
                generations.iter().zip(&counts).map(|(g, c)| (*g, *c)),
                POPULATION_COLOUR.stroke_width(2),
            )
            .point_size(3),
        )
        .map_err(&to_chart_error)?;

    root.present().map_err(&to_chart_error)?;
    info!("Saved chart {:?}", destination.as_ref());
    Ok(())
}
