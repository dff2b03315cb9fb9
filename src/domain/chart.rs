// Chart domain model - what to draw for a metric and the rendered result
use super::metric::{FieldPath, MetricCategory};
use serde::Deserialize;

/// Number of bars drawn when a bar chart does not name its own limit.
pub const DEFAULT_BAR_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Duration,
    Percentage,
    Unitless,
}

impl ValueKind {
    pub fn format(&self, value: f64) -> String {
        match self {
            ValueKind::Duration => format!("{:.1}hrs", value),
            ValueKind::Percentage => format!("{:.0}%", value),
            ValueKind::Unitless => format!("{:.1}", value),
        }
    }

    /// Axis labels carry no unit suffix.
    pub fn format_axis(&self, value: f64) -> String {
        match self {
            ValueKind::Duration => format!("{:.1}", value),
            _ => format!("{:.0}", value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartVariant {
    Line,
    Terminal,
    Bar,
}

#[derive(Debug, Clone)]
pub struct ChartSpec {
    pub id: String,
    pub title: String,
    pub metric: MetricCategory,
    pub field: FieldPath,
    pub divide_by: f64,
    pub unit: ValueKind,
    pub color: String,
    pub ceiling: Option<f64>,
    pub limit: Option<usize>,
    pub variant: ChartVariant,
}

impl ChartSpec {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        metric: MetricCategory,
        field: &str,
        variant: ChartVariant,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            metric,
            field: FieldPath::parse(field),
            divide_by: 1.0,
            unit: ValueKind::Unitless,
            color: "#00D9FF".to_string(),
            ceiling: None,
            limit: None,
            variant,
        }
    }

    pub fn with_unit(mut self, unit: ValueKind) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_ceiling(mut self, ceiling: f64) -> Self {
        self.ceiling = Some(ceiling);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_divisor(mut self, divide_by: f64) -> Self {
        self.divide_by = divide_by;
        self
    }

    /// Limit actually applied when drawing.
    pub fn display_limit(&self) -> Option<usize> {
        match (self.variant, self.limit) {
            (ChartVariant::Bar, None) => Some(DEFAULT_BAR_LIMIT),
            (_, limit) => limit,
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.svg", self.id)
    }
}

/// A finished, self-contained SVG document.
#[derive(Debug, Clone)]
pub struct RenderedChart {
    pub name: String,
    pub markup: String,
}

impl RenderedChart {
    pub fn new(name: String, markup: String) -> Self {
        Self { name, markup }
    }
}
