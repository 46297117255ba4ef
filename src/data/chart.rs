//! Chart projection.
//!
//! Pure transform from a metric series to render-ready label and value
//! vectors. No mutation, no side effects: two calls on the same series
//! return structurally equal output, which is what the rendering layer
//! relies on when it projects every frame.

use super::buffer::MetricSeries;

/// A chart-ready series: timestamps on the x axis, values on the y axis,
/// in series (arrival) order.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartSeries {
    /// Index/value pairs for line-chart datasets.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.values.iter().enumerate().map(|(i, &v)| (i as f64, v)).collect()
    }

    /// Smallest and largest value, for y-axis bounds.
    ///
    /// Returns `None` for an empty series.
    pub fn value_bounds(&self) -> Option<(f64, f64)> {
        if self.values.is_empty() {
            return None;
        }
        let min = self.values.iter().copied().fold(f64::MAX, f64::min);
        let max = self.values.iter().copied().fold(f64::MIN, f64::max);
        Some((min, max))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

/// Project a series into chart-ready form, preserving order.
pub fn project(series: &MetricSeries) -> ChartSeries {
    ChartSeries {
        labels: series.iter().map(|r| r.timestamp.clone()).collect(),
        values: series.iter().map(|r| r.value).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::buffer::Reading;

    fn sample_series() -> MetricSeries {
        [(40.0, "10:00:01"), (42.5, "10:00:02"), (41.0, "10:00:03")]
            .into_iter()
            .map(|(value, timestamp)| Reading {
                value,
                timestamp: timestamp.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_project_preserves_order() {
        let projected = project(&sample_series());
        assert_eq!(projected.values, vec![40.0, 42.5, 41.0]);
        assert_eq!(projected.labels, vec!["10:00:01", "10:00:02", "10:00:03"]);
    }

    #[test]
    fn test_project_is_pure() {
        let series = sample_series();
        let first = project(&series);
        let second = project(&series);
        assert_eq!(first, second);
        // The input is untouched.
        assert_eq!(series, sample_series());
    }

    #[test]
    fn test_project_empty_series() {
        let projected = project(&MetricSeries::new());
        assert!(projected.is_empty());
        assert!(projected.points().is_empty());
        assert!(projected.value_bounds().is_none());
    }

    #[test]
    fn test_points_are_indexed() {
        let projected = project(&sample_series());
        assert_eq!(
            projected.points(),
            vec![(0.0, 40.0), (1.0, 42.5), (2.0, 41.0)]
        );
    }

    #[test]
    fn test_value_bounds() {
        let projected = project(&sample_series());
        assert_eq!(projected.value_bounds(), Some((40.0, 42.5)));
    }
}
