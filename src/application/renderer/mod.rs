// Chart renderers - one interface, selected by chart variant
pub mod bar;
pub mod line;
pub mod svg;
pub mod terminal;

use crate::domain::chart::{ChartSpec, ChartVariant, RenderedChart, ValueKind};
use crate::domain::series::{Series, SeriesPoint, SeriesStats};

/// Everything a renderer needs for one document.
#[derive(Debug, Clone, Copy)]
pub struct RenderRequest<'a> {
    pub title: &'a str,
    pub series: &'a Series,
    pub unit: ValueKind,
    pub color: &'a str,
    pub ceiling: Option<f64>,
    pub limit: Option<usize>,
}

impl<'a> RenderRequest<'a> {
    pub fn for_spec(spec: &'a ChartSpec, series: &'a Series) -> Self {
        Self {
            title: &spec.title,
            series,
            unit: spec.unit,
            color: &spec.color,
            ceiling: spec.ceiling,
            limit: spec.display_limit(),
        }
    }

    /// The slice that is actually drawn and summarised.
    pub fn displayed(&self) -> &'a [SeriesPoint] {
        self.series.recent(self.limit)
    }

    pub fn stats(&self) -> Option<SeriesStats> {
        SeriesStats::of(self.displayed())
    }
}

pub trait ChartRenderer {
    /// Pure: builds the document without touching storage.
    fn render(&self, request: &RenderRequest<'_>) -> String;
}

pub fn renderer_for(variant: ChartVariant) -> Box<dyn ChartRenderer> {
    match variant {
        ChartVariant::Line => Box::new(line::LineAreaRenderer::default()),
        ChartVariant::Terminal => Box::new(terminal::TerminalRenderer::default()),
        ChartVariant::Bar => Box::new(bar::BarRenderer::default()),
    }
}

pub fn render_chart(spec: &ChartSpec, series: &Series) -> RenderedChart {
    let request = RenderRequest::for_spec(spec, series);
    let markup = renderer_for(spec.variant).render(&request);
    RenderedChart::new(spec.file_name(), markup)
}
