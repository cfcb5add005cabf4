use crate::core::data::record::Dataset;
use crate::core::data::schema;
use crate::core::data::value::FieldValue;
use std::sync::Arc;

/// How a series is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Line { dashed: bool },
    Bar,
}

/// One plotted column of a chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: SeriesKind,
}

/// A chart ready for the charting collaborator.
///
/// The dataset is handed over as-is: records stay in input order and no value is
/// transformed. `data` is `None` until the owning slot has been loaded, which the
/// chart renders as an empty plot.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub source: String,
    pub x_key: &'static str,
    pub series: Vec<SeriesSpec>,
    pub data: Option<Arc<Dataset>>,
}

/// A single `(x, y)` sample of a series; `y` is `None` for non-numeric cells.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint<'a> {
    pub x: &'a FieldValue,
    pub y: Option<f64>,
}

impl ChartSpec {
    pub fn is_empty(&self) -> bool {
        self.data.as_ref().is_none_or(|d| d.is_empty())
    }

    /// Samples of `series` in record order. Records lacking the x field are skipped.
    pub fn points<'a>(&'a self, series: &SeriesSpec) -> Vec<SeriesPoint<'a>> {
        let Some(data) = self.data.as_ref() else {
            return Vec::new();
        };
        data.iter()
            .filter_map(|record| {
                let x = record.get(self.x_key)?;
                Some(SeriesPoint {
                    x,
                    y: record.number(series.key),
                })
            })
            .collect()
    }
}

/// Line chart of a potential energy curve: VQE solid, exact reference dashed.
pub fn pec_chart(title: &str, source: &str, data: Option<Arc<Dataset>>) -> ChartSpec {
    ChartSpec {
        title: title.to_string(),
        source: source.to_string(),
        x_key: schema::BOND_LENGTH,
        series: vec![
            SeriesSpec {
                key: schema::VQE_ENERGY,
                label: "VQE",
                kind: SeriesKind::Line { dashed: false },
            },
            SeriesSpec {
                key: schema::EXACT_ENERGY,
                label: "Exact",
                kind: SeriesKind::Line { dashed: true },
            },
        ],
        data,
    }
}

/// Bar chart of the noisy-run energy error per restart.
pub fn noise_chart(title: &str, source: &str, data: Option<Arc<Dataset>>) -> ChartSpec {
    ChartSpec {
        title: title.to_string(),
        source: source.to_string(),
        x_key: schema::RESTART,
        series: vec![SeriesSpec {
            key: schema::DELTA,
            label: "Δ (Ha)",
            kind: SeriesKind::Bar,
        }],
        data,
    }
}
