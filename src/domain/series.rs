// Series domain model - chronologically ordered (label, value) pairs

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
}

impl SeriesPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    points: Vec<SeriesPoint>,
}

impl Series {
    /// Points must already be in chronological order.
    pub fn new(points: Vec<SeriesPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The most recent `limit` points, or everything when no limit is given.
    pub fn recent(&self, limit: Option<usize>) -> &[SeriesPoint] {
        let points = self.points();
        match limit {
            Some(n) if n < self.len() => &points[self.len() - n..],
            _ => points,
        }
    }
}

/// Summary statistics over a slice of points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

impl SeriesStats {
    pub fn of(points: &[SeriesPoint]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }

        let (sum, min, max) = points.iter().fold(
            (0.0, f64::INFINITY, f64::NEG_INFINITY),
            |(sum, min, max), p| (sum + p.value, min.min(p.value), max.max(p.value)),
        );

        Some(Self {
            mean: sum / points.len() as f64,
            min,
            max,
            count: points.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[f64]) -> Series {
        Series::new(
            values
                .iter()
                .enumerate()
                .map(|(i, v)| SeriesPoint::new(format!("01/{:02}", i + 1), *v))
                .collect(),
        )
    }

    #[test]
    fn test_recent_slice() {
        let s = series(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        let tail = s.recent(Some(5));
        assert_eq!(tail.len(), 5);
        assert_eq!(tail[0].value, 3.0);
        assert_eq!(tail[4].label, "01/07");

        assert_eq!(s.recent(Some(10)).len(), 7);
        assert_eq!(s.recent(None).len(), 7);
    }

    #[test]
    fn test_stats() {
        let s = series(&[50.0, 75.0, 100.0]);
        let stats = SeriesStats::of(s.points()).unwrap();
        assert_eq!(stats.mean, 75.0);
        assert_eq!(stats.min, 50.0);
        assert_eq!(stats.max, 100.0);
        assert_eq!(stats.count, 3);

        assert!(SeriesStats::of(&[]).is_none());
    }
}
