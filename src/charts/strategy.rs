use crate::core::PError;
use crate::utils::{vector_max, vector_min};

/// A Pareto front projected onto a 2D scatter chart.
#[derive(Clone, Debug, PartialEq)]
pub struct ScatterPlane {
    /// The first objective of each point, in point order.
    pub x: Vec<f64>,
    /// The second objective of each point, in point order.
    pub y: Vec<f64>,
    /// The ordinal colour index of each point. This encodes the point order itself so a
    /// reader can see rank or insertion order in the colour ramp; it is not a data value.
    pub colour_index: Vec<usize>,
}

/// A Pareto front projected onto a 3D scatter chart.
#[derive(Clone, Debug, PartialEq)]
pub struct ScatterVolume {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    /// The ordinal colour index of each point, as in [`ScatterPlane`].
    pub colour_index: Vec<usize>,
}

/// One vertical axis of a parallel-coordinates chart.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisProjection {
    /// The axis label (`Objective 1`, `Objective 2`, ...).
    pub label: String,
    /// The smallest value along the axis, over the actual data.
    pub min: f64,
    /// The largest value along the axis, over the actual data.
    pub max: f64,
    /// The value of every point along this axis, in point order.
    pub values: Vec<f64>,
}

/// A Pareto front projected onto a parallel-coordinates chart, one axis per objective.
#[derive(Clone, Debug, PartialEq)]
pub struct ParallelAxes {
    pub axes: Vec<AxisProjection>,
    /// The number of points, each a polyline across all axes.
    pub point_count: usize,
}

/// The chart strategy selected for a Pareto front, with the front already projected
/// into the strategy's input shape.
#[derive(Clone, Debug, PartialEq)]
pub enum ParetoView {
    /// Two objectives: a 2D scatter chart.
    TwoD(ScatterPlane),
    /// Three objectives: a 3D scatter chart.
    ThreeD(ScatterVolume),
    /// Four or more objectives: a parallel-coordinates chart.
    ParallelCoordinates(ParallelAxes),
}

impl ParetoView {
    /// A short name for the selected strategy.
    pub fn name(&self) -> &'static str {
        match self {
            ParetoView::TwoD(_) => "Pareto Front",
            ParetoView::ThreeD(_) => "3D Pareto Front",
            ParetoView::ParallelCoordinates(_) => "Parallel Coordinates Plot",
        }
    }
}

/// Select the chart strategy for a set of objective vectors and project the vectors
/// into its input shape. The strategy is picked from the dimensionality alone: two
/// objectives chart as a 2D scatter, three as a 3D scatter, more as parallel
/// coordinates.
///
/// This returns [`PError::DimensionMismatch`] when the vectors do not share one length,
/// and [`PError::InsufficientData`] for an empty front or fewer than two objectives;
/// callers should degrade to a placeholder panel instead of propagating the latter.
///
/// # Arguments
///
/// * `objectives`: The objective vectors, one per point.
///
/// returns: `Result<ParetoView, PError>`
pub fn select_view(objectives: &[Vec<f64>]) -> Result<ParetoView, PError> {
    if objectives.is_empty() {
        return Err(PError::InsufficientData(
            "the front contains no points".to_string(),
        ));
    }
    let dimensions = objectives[0].len();
    for point in objectives {
        if point.len() != dimensions {
            return Err(PError::DimensionMismatch(dimensions, point.len()));
        }
    }
    if dimensions < 2 {
        return Err(PError::InsufficientData(format!(
            "at least two objectives are needed, found {dimensions}"
        )));
    }

    let colour_index = (0..objectives.len()).collect();
    let axis = |index: usize| -> Vec<f64> { objectives.iter().map(|point| point[index]).collect() };

    let view = match dimensions {
        2 => ParetoView::TwoD(ScatterPlane {
            x: axis(0),
            y: axis(1),
            colour_index,
        }),
        3 => ParetoView::ThreeD(ScatterVolume {
            x: axis(0),
            y: axis(1),
            z: axis(2),
            colour_index,
        }),
        _ => {
            let axes = (0..dimensions)
                .map(|index| {
                    let values = axis(index);
                    Ok(AxisProjection {
                        label: format!("Objective {}", index + 1),
                        min: vector_min(&values)?,
                        max: vector_max(&values)?,
                        values,
                    })
                })
                .collect::<Result<Vec<AxisProjection>, PError>>()?;
            ParetoView::ParallelCoordinates(ParallelAxes {
                axes,
                point_count: objectives.len(),
            })
        }
    };
    Ok(view)
}

#[cfg(test)]
mod test {
    use float_cmp::assert_approx_eq;

    use crate::charts::{select_view, ParetoView};
    use crate::core::PError;

    #[test]
    /// Two objectives project onto x/y arrays preserving point order.
    fn test_two_objectives() {
        let objectives = vec![vec![0.1, 0.9], vec![0.5, 0.5], vec![0.9, 0.1]];
        let view = select_view(&objectives).unwrap();
        assert_eq!(view.name(), "Pareto Front");

        match view {
            ParetoView::TwoD(plane) => {
                assert_eq!(plane.x, vec![0.1, 0.5, 0.9]);
                assert_eq!(plane.y, vec![0.9, 0.5, 0.1]);
                assert_eq!(plane.colour_index, vec![0, 1, 2]);
            }
            _ => panic!("expected the 2D strategy"),
        }
    }

    #[test]
    fn test_three_objectives() {
        let objectives = vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]];
        match select_view(&objectives).unwrap() {
            ParetoView::ThreeD(volume) => {
                assert_eq!(volume.x, vec![1.0, 4.0]);
                assert_eq!(volume.y, vec![2.0, 5.0]);
                assert_eq!(volume.z, vec![3.0, 6.0]);
                assert_eq!(volume.colour_index, vec![0, 1]);
            }
            _ => panic!("expected the 3D strategy"),
        }
    }

    #[test]
    /// Five objectives build five parallel axes with the actual data extremes.
    fn test_five_objectives() {
        let objectives = vec![
            vec![1.0, 9.0, 0.5, 3.0, 2.0],
            vec![2.0, 7.0, 0.1, 4.0, 8.0],
            vec![3.0, 8.0, 0.9, 5.0, 5.0],
        ];
        match select_view(&objectives).unwrap() {
            ParetoView::ParallelCoordinates(parallel) => {
                assert_eq!(parallel.axes.len(), 5);
                assert_eq!(parallel.point_count, 3);
                assert_eq!(parallel.axes[0].label, "Objective 1");
                assert_approx_eq!(f64, parallel.axes[0].min, 1.0);
                assert_approx_eq!(f64, parallel.axes[0].max, 3.0);
                assert_approx_eq!(f64, parallel.axes[2].min, 0.1);
                assert_approx_eq!(f64, parallel.axes[2].max, 0.9);
                assert_eq!(parallel.axes[4].values, vec![2.0, 8.0, 5.0]);
            }
            _ => panic!("expected the parallel-coordinates strategy"),
        }
    }

    #[test]
    fn test_dimension_mismatch() {
        let objectives = vec![vec![0.1, 0.9], vec![0.5, 0.5, 0.3]];
        match select_view(&objectives).unwrap_err() {
            PError::DimensionMismatch(expected, found) => {
                assert_eq!(expected, 2);
                assert_eq!(found, 3);
            }
            error => panic!("expected a dimension mismatch, got {error}"),
        }
    }

    #[test]
    fn test_insufficient_data() {
        assert!(matches!(
            select_view(&[]).unwrap_err(),
            PError::InsufficientData(_)
        ));
        assert!(matches!(
            select_view(&[vec![1.0], vec![2.0]]).unwrap_err(),
            PError::InsufficientData(_)
        ));
    }
}
