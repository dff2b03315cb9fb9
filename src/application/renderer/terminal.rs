// Terminal-style renderer - axes, square markers, rotated dates, stats corner
use super::svg::{self, px};
use super::{ChartRenderer, RenderRequest};
use crate::application::normalizer::{normalize, Normalization, PlotArea};
use std::fmt::Write;

const TARGET_LABELS: usize = 6;
const MARKER: f64 = 5.0;

#[derive(Debug, Clone)]
pub struct TerminalRenderer {
    area: PlotArea,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self {
            area: PlotArea::new(800.0, 240.0, 50.0),
        }
    }
}

/// Indices that get a date label: every `max(1, n / 6)`-th point plus the last.
pub fn label_indices(count: usize) -> Vec<usize> {
    if count == 0 {
        return Vec::new();
    }

    let step = (count / TARGET_LABELS).max(1);
    let mut indices: Vec<usize> = (0..count).step_by(step).collect();
    if indices.last() != Some(&(count - 1)) {
        indices.push(count - 1);
    }
    indices
}

impl ChartRenderer for TerminalRenderer {
    fn render(&self, request: &RenderRequest<'_>) -> String {
        let area = &self.area;
        let color = svg::escape_text(request.color);
        let mut out = String::new();

        svg::open_document(&mut out, area.width, area.height);
        svg::background(&mut out, area.width, area.height, "#010409");
        svg::text(
            &mut out,
            area.left(),
            area.top() - 20.0,
            14,
            request.color,
            r#" font-weight="bold""#,
            &format!("$ {}", request.title),
        );

        let displayed = request.displayed();
        let Some(stats) = request.stats() else {
            svg::close_document(&mut out);
            return out;
        };

        svg::text(
            &mut out,
            area.right(),
            area.top() - 20.0,
            11,
            svg::TEXT_MUTED,
            r#" text-anchor="end""#,
            &format!(
                "avg {} | max {} | min {}",
                request.unit.format(stats.mean),
                request.unit.format(stats.max),
                request.unit.format(stats.min)
            ),
        );

        // Axes
        let _ = writeln!(
            out,
            r#"  <line x1="{l}" y1="{t}" x2="{l}" y2="{b}" stroke="{c}" stroke-width="1"/>"#,
            l = px(area.left()),
            t = px(area.top()),
            b = px(area.baseline()),
            c = svg::TEXT_MUTED
        );
        let _ = writeln!(
            out,
            r#"  <line x1="{l}" y1="{b}" x2="{r}" y2="{b}" stroke="{c}" stroke-width="1"/>"#,
            l = px(area.left()),
            r = px(area.right()),
            b = px(area.baseline()),
            c = svg::TEXT_MUTED
        );

        let values: Vec<f64> = displayed.iter().map(|p| p.value).collect();
        let normalization = Normalization::for_values(&values, request.ceiling);
        let points = normalize(area, &values, &normalization);

        let coords: Vec<String> = points.iter().map(|p| format!("{},{}", px(p.x), px(p.y))).collect();
        let _ = writeln!(
            out,
            r#"  <polyline points="{}" fill="none" stroke="{}" stroke-width="1.5" stroke-linejoin="round"/>"#,
            coords.join(" "),
            color
        );

        for p in &points {
            let _ = writeln!(
                out,
                r#"  <rect x="{}" y="{}" width="{m}" height="{m}" fill="{}"/>"#,
                px(p.x - MARKER / 2.0),
                px(p.y - MARKER / 2.0),
                color,
                m = px(MARKER)
            );
        }

        let label_y = area.baseline() + 14.0;
        for i in label_indices(points.len()) {
            let x = points[i].x;
            svg::text(
                &mut out,
                x,
                label_y,
                10,
                svg::TEXT_MUTED,
                &format!(
                    r#" text-anchor="end" transform="rotate(-45 {} {})""#,
                    px(x),
                    px(label_y)
                ),
                &displayed[i].label,
            );
        }

        svg::close_document(&mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chart::ValueKind;
    use crate::domain::series::{Series, SeriesPoint};

    #[test]
    fn test_label_indices() {
        assert!(label_indices(0).is_empty());
        assert_eq!(label_indices(1), vec![0]);
        assert_eq!(label_indices(4), vec![0, 1, 2, 3]);
        assert_eq!(label_indices(13), vec![0, 2, 4, 6, 8, 10, 12]);
        assert_eq!(label_indices(25), vec![0, 4, 8, 12, 16, 20, 24]);
        assert_eq!(label_indices(14), vec![0, 2, 4, 6, 8, 10, 12, 13]);
    }

    #[test]
    fn test_renders_axes_markers_and_annotation() {
        let series = Series::new(
            (0..10)
                .map(|i| SeriesPoint::new(format!("02/{:02}", i + 1), 40.0 + i as f64 * 4.0))
                .collect(),
        );
        let request = RenderRequest {
            title: "recovery",
            series: &series,
            unit: ValueKind::Percentage,
            color: "#39FF14",
            ceiling: Some(100.0),
            limit: None,
        };
        let markup = TerminalRenderer::default().render(&request);

        svg::assert_well_formed(&markup);
        // Background plus one square per point
        assert_eq!(markup.matches("<rect").count(), 11);
        assert_eq!(markup.matches("<line").count(), 2);
        assert_eq!(markup.matches("rotate(-45").count(), label_indices(10).len());
        assert!(markup.contains("avg 58% | max 76% | min 40%"));
        assert!(markup.contains(">02/10</text>"));
    }
}
