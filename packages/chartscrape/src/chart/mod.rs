//! Chart building: map validated data to a renderable chart object.
//!
//! `ChartSpec` is the pipeline's output contract with whatever rendering
//! library the application uses: it is serializable and carries exactly
//! one series plus a title and optional annotation.

use serde::{Deserialize, Serialize};

use crate::types::chart::{ChartData, ChartKind};

/// The series payload of a renderable chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartSeries {
    /// Label/value pairs (bar, pie)
    Categorical {
        labels: Vec<String>,
        values: Vec<f64>,
    },
    /// Numeric x/y points (line, scatter)
    Numeric { x: Vec<f64>, y: Vec<f64> },
}

impl ChartSeries {
    /// Number of points in the series.
    pub fn len(&self) -> usize {
        match self {
            Self::Categorical { labels, .. } => labels.len(),
            Self::Numeric { x, .. } => x.len(),
        }
    }

    /// Whether the series is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A renderable chart object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    /// Which renderer to use
    pub kind: ChartKind,

    /// Chart title
    pub title: String,

    /// The single data series
    pub series: ChartSeries,

    /// Error annotation, set only on the minimal error chart
    pub annotation: Option<String>,
}

impl ChartSpec {
    /// Minimal error chart: empty bar series carrying the error message as
    /// its sole annotation. Returned instead of raising so presentation is
    /// never left without a plot.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ChartKind::Bar,
            title: "Chart Error".to_string(),
            series: ChartSeries::Categorical {
                labels: vec![],
                values: vec![],
            },
            annotation: Some(message.into()),
        }
    }

    /// Whether this is the error chart.
    pub fn is_error(&self) -> bool {
        self.annotation.is_some()
    }

    /// Series length.
    pub fn series_len(&self) -> usize {
        self.series.len()
    }
}

/// Build a renderable chart from validated data.
///
/// The data family must match the kind's family and pass the shape
/// invariant; both are re-checked here as defense in depth against a
/// parser bug, and any mismatch produces the error chart rather than a
/// panic.
pub fn build_chart(data: &ChartData, kind: ChartKind) -> ChartSpec {
    if data.family() != kind.family() {
        tracing::warn!(
            data_family = ?data.family(),
            kind = ?kind,
            "chart data family does not match chart kind"
        );
        return ChartSpec::error(format!(
            "cannot render {:?} data as a {}",
            data.family(),
            kind.name()
        ));
    }

    if !data.is_valid() {
        tracing::warn!(kind = ?kind, "chart data failed shape validation");
        return ChartSpec::error("chart data failed shape validation".to_string());
    }

    let series = match data {
        ChartData::Categorical { labels, values, .. } => ChartSeries::Categorical {
            labels: labels.clone(),
            values: values.clone(),
        },
        ChartData::Continuous { x, y, .. } => ChartSeries::Numeric {
            x: x.clone(),
            y: y.clone(),
        },
    };

    ChartSpec {
        kind,
        title: data.title().to_string(),
        series,
        annotation: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::chart::ChartFamily;

    #[test]
    fn test_series_length_matches_labels() {
        let data = ChartData::Categorical {
            labels: vec!["2000".to_string(), "2010".to_string()],
            values: vec![100.0, 200.0],
            title: "Population".to_string(),
        };

        let chart = build_chart(&data, ChartKind::Bar);
        assert!(!chart.is_error());
        assert_eq!(chart.series_len(), 2);
        assert_eq!(chart.title, "Population");
        assert_eq!(chart.kind, ChartKind::Bar);
    }

    #[test]
    fn test_continuous_chart() {
        let data = ChartData::Continuous {
            x: vec![1.0, 2.0, 3.0],
            y: vec![2.0, 4.0, 8.0],
            title: "Growth".to_string(),
        };

        let chart = build_chart(&data, ChartKind::Scatter);
        assert_eq!(chart.series_len(), 3);
        assert!(matches!(chart.series, ChartSeries::Numeric { .. }));
    }

    #[test]
    fn test_family_mismatch_yields_error_chart() {
        let data = ChartData::fallback(ChartFamily::Categorical);
        let chart = build_chart(&data, ChartKind::Line);

        assert!(chart.is_error());
        assert_eq!(chart.series_len(), 0);
        assert!(chart.annotation.as_deref().unwrap().contains("Line Chart"));
    }

    #[test]
    fn test_invalid_shape_yields_error_chart() {
        let data = ChartData::Categorical {
            labels: vec!["a".to_string()],
            values: vec![],
            title: "broken".to_string(),
        };

        let chart = build_chart(&data, ChartKind::Pie);
        assert!(chart.is_error());
    }

    #[test]
    fn test_fallback_data_renders() {
        let data = ChartData::fallback(ChartFamily::Categorical);
        let chart = build_chart(&data, ChartKind::Bar);

        assert!(!chart.is_error());
        assert_eq!(chart.series_len(), 3);
    }
}
