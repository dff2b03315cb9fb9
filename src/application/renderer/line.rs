// Line-area renderer - dashed grid, polyline, gradient fill and point markers
use super::svg::{self, px};
use super::{ChartRenderer, RenderRequest};
use crate::application::normalizer::{normalize, Normalization, PlotArea, Point};
use std::fmt::Write;

const GRID_LINES: usize = 4;

#[derive(Debug, Clone)]
pub struct LineAreaRenderer {
    area: PlotArea,
}

impl Default for LineAreaRenderer {
    fn default() -> Self {
        Self {
            area: PlotArea::new(800.0, 200.0, 40.0),
        }
    }
}

impl LineAreaRenderer {
    fn grid(&self, out: &mut String, request: &RenderRequest<'_>, normalization: &Normalization) {
        for i in 0..=GRID_LINES {
            let fraction = 1.0 - i as f64 / GRID_LINES as f64;
            let y = self.area.y_at(fraction);
            let _ = writeln!(
                out,
                r#"  <line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="1" stroke-dasharray="4,4"/>"#,
                px(self.area.left()),
                px(y),
                px(self.area.right()),
                px(y),
                svg::GRID
            );
            svg::text(
                out,
                self.area.left() - 5.0,
                y + 4.0,
                10,
                svg::TEXT_MUTED,
                r#" text-anchor="end""#,
                &request.unit.format_axis(normalization.value_at(fraction)),
            );
        }
    }

    fn line_and_area(&self, out: &mut String, points: &[Point], color: &str) {
        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            return;
        };

        let mut path = format!("M {},{}", px(first.x), px(first.y));
        for p in &points[1..] {
            let _ = write!(path, " L {},{}", px(p.x), px(p.y));
        }
        let baseline = px(self.area.baseline());

        let _ = writeln!(
            out,
            r#"  <path d="{} L {},{} L {},{} Z" fill="url(#area-fill)" stroke="none"/>"#,
            path,
            px(last.x),
            baseline,
            px(first.x),
            baseline
        );
        let _ = writeln!(
            out,
            r#"  <path d="{}" stroke="{}" stroke-width="2" fill="none" stroke-linecap="round" stroke-linejoin="round"/>"#,
            path,
            svg::escape_text(color)
        );
    }
}

impl ChartRenderer for LineAreaRenderer {
    fn render(&self, request: &RenderRequest<'_>) -> String {
        let area = &self.area;
        let color = svg::escape_text(request.color);
        let mut out = String::new();

        svg::open_document(&mut out, area.width, area.height);
        let _ = writeln!(
            out,
            r#"  <defs>
    <linearGradient id="area-fill" x1="0%" y1="0%" x2="0%" y2="100%">
      <stop offset="0%" stop-color="{color}" stop-opacity="0.3"/>
      <stop offset="100%" stop-color="{color}" stop-opacity="0.05"/>
    </linearGradient>
  </defs>"#
        );
        svg::background(&mut out, area.width, area.height, svg::BACKGROUND);
        svg::text(
            &mut out,
            area.left(),
            area.top() - 15.0,
            16,
            svg::TEXT_PRIMARY,
            r#" font-weight="bold""#,
            request.title,
        );

        let values: Vec<f64> = request.displayed().iter().map(|p| p.value).collect();
        if !values.is_empty() {
            let normalization = Normalization::for_values(&values, request.ceiling);
            let points = normalize(area, &values, &normalization);

            self.grid(&mut out, request, &normalization);
            self.line_and_area(&mut out, &points, request.color);
            for p in &points {
                let _ = writeln!(
                    out,
                    r#"  <circle cx="{}" cy="{}" r="3" fill="{}" opacity="0.8"/>"#,
                    px(p.x),
                    px(p.y),
                    color
                );
            }
        }

        svg::close_document(&mut out);
        out
    }
}
