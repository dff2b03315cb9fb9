// Coordinate normalizer - maps values onto pixel positions inside a plot area

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Document size plus the padding kept clear on every side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl PlotArea {
    pub fn new(width: f64, height: f64, padding: f64) -> Self {
        Self {
            width,
            height,
            padding,
        }
    }

    pub fn drawable_width(&self) -> f64 {
        self.width - 2.0 * self.padding
    }

    pub fn drawable_height(&self) -> f64 {
        self.height - 2.0 * self.padding
    }

    pub fn left(&self) -> f64 {
        self.padding
    }

    pub fn right(&self) -> f64 {
        self.width - self.padding
    }

    pub fn top(&self) -> f64 {
        self.padding
    }

    pub fn baseline(&self) -> f64 {
        self.height - self.padding
    }

    /// Uniform spacing; a lone point sits on the left edge.
    pub fn x_at(&self, index: usize, count: usize) -> f64 {
        let gaps = count.saturating_sub(1).max(1) as f64;
        self.padding + index as f64 * self.drawable_width() / gaps
    }

    /// Larger fractions sit higher on the page.
    pub fn y_at(&self, fraction: f64) -> f64 {
        self.baseline() - fraction * self.drawable_height()
    }
}

/// How values become a 0..=1 fraction of the drawable height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Normalization {
    /// Local range of the data being drawn.
    MinMax { min: f64, max: f64 },
    /// Fixed absolute ceiling, zero at the baseline.
    Ceiling(f64),
}

impl Normalization {
    pub fn for_values(values: &[f64], ceiling: Option<f64>) -> Self {
        if let Some(ceiling) = ceiling {
            return Normalization::Ceiling(ceiling);
        }

        let (min, max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(*v), hi.max(*v)));
        if values.is_empty() {
            Normalization::MinMax { min: 0.0, max: 0.0 }
        } else {
            Normalization::MinMax { min, max }
        }
    }

    pub fn fraction(&self, value: f64) -> f64 {
        match *self {
            Normalization::MinMax { min, max } if max != min => (value - min) / (max - min),
            Normalization::MinMax { .. } => 0.5,
            Normalization::Ceiling(ceiling) => fill_fraction(value, ceiling),
        }
    }

    /// Value sitting at `fraction` of the height, used for gridline labels.
    pub fn value_at(&self, fraction: f64) -> f64 {
        match *self {
            Normalization::MinMax { min, max } => min + (max - min) * fraction,
            Normalization::Ceiling(ceiling) => ceiling * fraction,
        }
    }
}

/// Share of `reference` covered by `value`, clamped to 0..=1. Zero when the
/// reference is not positive.
pub fn fill_fraction(value: f64, reference: f64) -> f64 {
    if reference > 0.0 {
        (value / reference).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

pub fn normalize(area: &PlotArea, values: &[f64], normalization: &Normalization) -> Vec<Point> {
    values
        .iter()
        .enumerate()
        .map(|(i, value)| Point {
            x: area.x_at(i, values.len()),
            y: area.y_at(normalization.fraction(*value)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn area() -> PlotArea {
        PlotArea::new(800.0, 200.0, 40.0)
    }

    #[test]
    fn test_single_point_sits_on_left_edge() {
        let values = [42.0];
        let points = normalize(&area(), &values, &Normalization::for_values(&values, None));
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].x, 40.0);
    }

    #[test]
    fn test_constant_series_sits_at_midpoint() {
        let values = [7.0, 7.0, 7.0, 7.0];
        let points = normalize(&area(), &values, &Normalization::for_values(&values, None));
        let midpoint = 200.0 - 40.0 - 0.5 * 120.0;
        assert!(points.iter().all(|p| p.y == midpoint));
    }

    #[test]
    fn test_min_max_spans_full_height() {
        let values = [10.0, 20.0, 30.0];
        let points = normalize(&area(), &values, &Normalization::for_values(&values, None));
        assert_eq!(points[0], Point { x: 40.0, y: 160.0 });
        assert_eq!(points[1], Point { x: 400.0, y: 100.0 });
        assert_eq!(points[2], Point { x: 760.0, y: 40.0 });
    }

    #[test]
    fn test_ceiling_fractions() {
        let norm = Normalization::for_values(&[50.0, 75.0, 100.0], Some(100.0));
        let fractions: Vec<f64> = [50.0, 75.0, 100.0].iter().map(|v| norm.fraction(*v)).collect();
        assert_eq!(fractions, vec![0.5, 0.75, 1.0]);
        assert_eq!(norm.value_at(0.25), 25.0);
    }

    #[test]
    fn test_fill_fraction_edges() {
        assert_eq!(fill_fraction(0.0, 21.0), 0.0);
        assert_eq!(fill_fraction(21.0, 21.0), 1.0);
        assert_eq!(fill_fraction(30.0, 21.0), 1.0);
        assert_eq!(fill_fraction(5.0, 0.0), 0.0);
    }

    #[test]
    fn test_empty_values() {
        let norm = Normalization::for_values(&[], None);
        assert!(normalize(&area(), &[], &norm).is_empty());
    }

    proptest! {
        #[test]
        fn fill_fraction_is_monotonic(a in 0.0f64..200.0, b in 0.0f64..200.0, ceiling in 1.0f64..150.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(fill_fraction(lo, ceiling) <= fill_fraction(hi, ceiling));
        }
    }
}
