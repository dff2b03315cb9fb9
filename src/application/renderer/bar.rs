// Bar renderer - compact horizontal bars for the most recent days
use super::svg::{self, px};
use super::{ChartRenderer, RenderRequest};
use crate::application::normalizer::fill_fraction;
use std::fmt::Write;

#[derive(Debug, Clone)]
pub struct BarRenderer {
    width: f64,
    padding: f64,
    row_height: f64,
    track_width: f64,
}

impl Default for BarRenderer {
    fn default() -> Self {
        Self {
            width: 260.0,
            padding: 20.0,
            row_height: 35.0,
            track_width: 130.0,
        }
    }
}

impl BarRenderer {
    /// Title block above the rows, summary block below them.
    pub fn document_height(&self, rows: usize) -> f64 {
        2.0 * self.padding + 30.0 + rows as f64 * self.row_height + 40.0
    }
}

impl ChartRenderer for BarRenderer {
    fn render(&self, request: &RenderRequest<'_>) -> String {
        let displayed = request.displayed();
        let height = self.document_height(displayed.len());
        let color = svg::escape_text(request.color);
        let mut out = String::new();

        svg::open_document(&mut out, self.width, height);
        svg::background(&mut out, self.width, height, "#0d1117");
        svg::text(
            &mut out,
            self.padding,
            self.padding + 20.0,
            18,
            "#c9d1d9",
            r#" font-weight="bold""#,
            request.title,
        );

        let Some(stats) = request.stats() else {
            svg::close_document(&mut out);
            return out;
        };

        // Without a ceiling, bars are sized against the largest displayed value
        let reference = request.ceiling.unwrap_or(stats.max);
        let track_x = self.padding + 110.0;
        let mut y = self.padding + 50.0;

        for point in displayed {
            let filled = fill_fraction(point.value, reference) * self.track_width;

            svg::text(&mut out, self.padding + 10.0, y, 14, "#8b949e", "", &point.label);
            svg::text(
                &mut out,
                self.padding + 100.0,
                y,
                14,
                request.color,
                r#" font-weight="bold" text-anchor="end""#,
                &request.unit.format(point.value),
            );
            let _ = writeln!(
                out,
                r##"  <rect x="{}" y="{}" width="{:.0}" height="16" fill="#1a1a1a" rx="2"/>"##,
                px(track_x),
                px(y - 12.0),
                self.track_width
            );
            let _ = writeln!(
                out,
                r#"  <rect x="{}" y="{}" width="{:.1}" height="16" fill="{}" rx="2"/>"#,
                px(track_x),
                px(y - 12.0),
                filled,
                color
            );

            y += self.row_height;
        }

        svg::text(
            &mut out,
            self.width - self.padding - 10.0,
            height - self.padding - 10.0,
            12,
            "#58a6ff",
            r#" text-anchor="end""#,
            &format!(
                "Avg: {} \u{2022} Last {} days",
                request.unit.format(stats.mean),
                stats.count
            ),
        );

        svg::close_document(&mut out);
        out
    }
}
