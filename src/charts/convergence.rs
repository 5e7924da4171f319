use crate::core::GenerationRecord;

/// The convergence indicators a service may track per generation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Indicator {
    /// Inverted generational distance.
    Igd,
    /// Generational distance.
    Gd,
    /// Hypervolume.
    Hv,
}

impl Indicator {
    const ALL: [Indicator; 3] = [Indicator::Igd, Indicator::Gd, Indicator::Hv];

    /// The series label for the indicator.
    pub fn label(&self) -> &'static str {
        match self {
            Indicator::Igd => "IGD",
            Indicator::Gd => "GD",
            Indicator::Hv => "HV",
        }
    }

    fn value(&self, record: &GenerationRecord) -> Option<f64> {
        match self {
            Indicator::Igd => record.igd,
            Indicator::Gd => record.gd,
            Indicator::Hv => record.hv,
        }
    }
}

/// One labelled convergence line: an indicator value per generation.
#[derive(Clone, Debug, PartialEq)]
pub struct IndicatorSeries {
    /// The indicator label (`IGD`, `GD` or `HV`).
    pub label: &'static str,
    /// The generation index of each point.
    pub generations: Vec<usize>,
    /// The indicator value of each point.
    pub values: Vec<f64>,
}

/// The per-generation non-dominated solution count.
#[derive(Clone, Debug, PartialEq)]
pub struct CountSeries {
    /// The generation index of each point.
    pub generations: Vec<usize>,
    /// The non-dominated count of each point.
    pub counts: Vec<usize>,
}

/// Build one convergence series per indicator tracked by the run. Which indicators are
/// drawn is governed by the *first* history record: an indicator absent there is
/// treated as never present, even if a later record carries it. A record missing a
/// value mid-series contributes no point to that series. An empty history yields no
/// series; the caller renders a placeholder instead of an empty chart.
///
/// # Arguments
///
/// * `history`: The per-generation records, ordered by generation index.
///
/// returns: `Vec<IndicatorSeries>`
pub fn indicator_series(history: &[GenerationRecord]) -> Vec<IndicatorSeries> {
    let Some(first) = history.first() else {
        return vec![];
    };

    Indicator::ALL
        .iter()
        .filter(|indicator| indicator.value(first).is_some())
        .map(|indicator| {
            let (generations, values) = history
                .iter()
                .filter_map(|record| indicator.value(record).map(|v| (record.generation, v)))
                .unzip();
            IndicatorSeries {
                label: indicator.label(),
                generations,
                values,
            }
        })
        .collect()
}

/// Build the non-dominated count series, or `None` for an empty history (the caller
/// renders a placeholder).
///
/// # Arguments
///
/// * `history`: The per-generation records, ordered by generation index.
///
/// returns: `Option<CountSeries>`
pub fn non_dominated_series(history: &[GenerationRecord]) -> Option<CountSeries> {
    if history.is_empty() {
        return None;
    }
    Some(CountSeries {
        generations: history.iter().map(|record| record.generation).collect(),
        counts: history
            .iter()
            .map(|record| record.non_dominated_count)
            .collect(),
    })
}

#[cfg(test)]
mod test {
    use crate::charts::{indicator_series, non_dominated_series};
    use crate::core::GenerationRecord;

    fn record(
        generation: usize,
        non_dominated_count: usize,
        igd: Option<f64>,
        gd: Option<f64>,
        hv: Option<f64>,
    ) -> GenerationRecord {
        GenerationRecord {
            generation,
            non_dominated_count,
            evaluations: None,
            igd,
            gd,
            hv,
        }
    }

    #[test]
    /// The scenario from the run history: one HV line of two points and a population
    /// series of two counts.
    fn test_hv_only_history() {
        let history = vec![
            record(1, 10, None, None, Some(0.5)),
            record(2, 12, None, None, Some(0.6)),
        ];

        let series = indicator_series(&history);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].label, "HV");
        assert_eq!(series[0].generations, vec![1, 2]);
        assert_eq!(series[0].values, vec![0.5, 0.6]);

        let population = non_dominated_series(&history).unwrap();
        assert_eq!(population.generations, vec![1, 2]);
        assert_eq!(population.counts, vec![10, 12]);
    }

    #[test]
    /// An indicator absent from the first record is never drawn, even if a later
    /// record carries it.
    fn test_first_record_governs() {
        let history = vec![
            record(1, 10, Some(0.9), None, None),
            record(2, 11, Some(0.8), Some(0.4), Some(0.5)),
        ];

        let series = indicator_series(&history);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].label, "IGD");
        assert_eq!(series[0].values, vec![0.9, 0.8]);
    }

    #[test]
    /// A value missing mid-series skips the point but keeps the series.
    fn test_mid_series_gap() {
        let history = vec![
            record(1, 10, Some(0.9), None, None),
            record(2, 11, None, None, None),
            record(3, 12, Some(0.7), None, None),
        ];

        let series = indicator_series(&history);
        assert_eq!(series[0].generations, vec![1, 3]);
        assert_eq!(series[0].values, vec![0.9, 0.7]);
    }

    #[test]
    fn test_all_indicators() {
        let history = vec![
            record(1, 10, Some(0.9), Some(0.5), Some(0.3)),
            record(2, 11, Some(0.8), Some(0.4), Some(0.4)),
        ];
        let labels: Vec<&str> = indicator_series(&history)
            .iter()
            .map(|series| series.label)
            .collect();
        assert_eq!(labels, vec!["IGD", "GD", "HV"]);
    }

    #[test]
    fn test_empty_history() {
        assert!(indicator_series(&[]).is_empty());
        assert!(non_dominated_series(&[]).is_none());
    }
}
