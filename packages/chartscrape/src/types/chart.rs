//! Chart kinds, families, and validated chart data.

use serde::{Deserialize, Serialize};

/// The chart types the pipeline can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
    Scatter,
}

impl Default for ChartKind {
    fn default() -> Self {
        Self::Bar
    }
}

impl ChartKind {
    /// Parse a user-facing chart type name. Unrecognized names fold to Bar
    /// so the builder stays total over the enum.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "line" | "line chart" => Self::Line,
            "pie" | "pie chart" => Self::Pie,
            "scatter" | "scatter plot" => Self::Scatter,
            _ => Self::Bar,
        }
    }

    /// The data family this kind renders.
    pub fn family(self) -> ChartFamily {
        match self {
            Self::Bar | Self::Pie => ChartFamily::Categorical,
            Self::Line | Self::Scatter => ChartFamily::Continuous,
        }
    }

    /// Display name matching the invocation surface.
    pub fn name(self) -> &'static str {
        match self {
            Self::Bar => "Bar Chart",
            Self::Line => "Line Chart",
            Self::Pie => "Pie Chart",
            Self::Scatter => "Scatter Plot",
        }
    }
}

/// Chart data family: label/value pairs or numeric x/y series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartFamily {
    /// Bar and pie charts: labels + values
    Categorical,
    /// Line and scatter charts: x + y
    Continuous,
}

/// Validated chart data, tagged by family.
///
/// Invariant: the paired sequences are equal-length and non-empty. The
/// parser treats anything else as a parse failure and substitutes the
/// deterministic fallback, so downstream rendering never sees a shape it
/// cannot plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum ChartData {
    Categorical {
        labels: Vec<String>,
        values: Vec<f64>,
        title: String,
    },
    Continuous {
        x: Vec<f64>,
        y: Vec<f64>,
        title: String,
    },
}

/// Title used by the canned fallback data.
pub const FALLBACK_TITLE: &str = "Fallback Chart (Data extraction failed)";

impl ChartData {
    /// The deterministic fallback for a family, returned whenever
    /// extraction or parsing fails. Always the same value, so downstream
    /// presentation is never left without a plot.
    pub fn fallback(family: ChartFamily) -> Self {
        match family {
            ChartFamily::Categorical => Self::Categorical {
                labels: vec![
                    "No Data".to_string(),
                    "Extracted".to_string(),
                    "From Sites".to_string(),
                ],
                values: vec![1.0, 2.0, 3.0],
                title: FALLBACK_TITLE.to_string(),
            },
            ChartFamily::Continuous => Self::Continuous {
                x: vec![1.0, 2.0, 3.0],
                y: vec![1.0, 2.0, 3.0],
                title: FALLBACK_TITLE.to_string(),
            },
        }
    }

    /// Which family this data belongs to.
    pub fn family(&self) -> ChartFamily {
        match self {
            Self::Categorical { .. } => ChartFamily::Categorical,
            Self::Continuous { .. } => ChartFamily::Continuous,
        }
    }

    /// Number of points in the series.
    pub fn len(&self) -> usize {
        match self {
            Self::Categorical { labels, .. } => labels.len(),
            Self::Continuous { x, .. } => x.len(),
        }
    }

    /// Whether the series is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Chart title.
    pub fn title(&self) -> &str {
        match self {
            Self::Categorical { title, .. } | Self::Continuous { title, .. } => title,
        }
    }

    /// Check the family's shape invariant: equal-length, non-empty pairs.
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Categorical { labels, values, .. } => {
                !labels.is_empty() && labels.len() == values.len()
            }
            Self::Continuous { x, y, .. } => !x.is_empty() && x.len() == y.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse_defaults_to_bar() {
        assert_eq!(ChartKind::parse("Pie Chart"), ChartKind::Pie);
        assert_eq!(ChartKind::parse("scatter"), ChartKind::Scatter);
        assert_eq!(ChartKind::parse("histogram"), ChartKind::Bar);
        assert_eq!(ChartKind::parse(""), ChartKind::Bar);
    }

    #[test]
    fn test_kind_family() {
        assert_eq!(ChartKind::Bar.family(), ChartFamily::Categorical);
        assert_eq!(ChartKind::Pie.family(), ChartFamily::Categorical);
        assert_eq!(ChartKind::Line.family(), ChartFamily::Continuous);
        assert_eq!(ChartKind::Scatter.family(), ChartFamily::Continuous);
    }

    #[test]
    fn test_fallback_is_deterministic() {
        let a = ChartData::fallback(ChartFamily::Categorical);
        let b = ChartData::fallback(ChartFamily::Categorical);
        assert_eq!(a, b);
        assert!(a.is_valid());
        assert_eq!(a.title(), FALLBACK_TITLE);

        let c = ChartData::fallback(ChartFamily::Continuous);
        assert!(c.is_valid());
        assert_eq!(c.len(), 3);
    }

    #[test]
    fn test_shape_invariant() {
        let mismatched = ChartData::Categorical {
            labels: vec!["a".to_string(), "b".to_string()],
            values: vec![1.0],
            title: "t".to_string(),
        };
        assert!(!mismatched.is_valid());

        let empty = ChartData::Continuous {
            x: vec![],
            y: vec![],
            title: "t".to_string(),
        };
        assert!(!empty.is_valid());
    }
}
