//! Chart data models

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::config::BAND_FRACTION;

/// A single data point on a price chart
#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

/// Closing prices ordered by time, one point per timestamp, all finite
#[derive(Debug, Clone)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series from a timestamp index and an aligned column.
    /// Missing and NaN values are dropped; a repeated timestamp keeps its last value.
    pub fn from_column(index: &[DateTime<Utc>], values: &[Option<f64>]) -> Self {
        let mut points: Vec<PricePoint> = index
            .iter()
            .zip(values.iter())
            .filter_map(|(ts, value)| match value {
                Some(v) if v.is_finite() => Some(PricePoint {
                    timestamp: *ts,
                    price: *v,
                }),
                _ => None,
            })
            .collect();

        // Stable sort keeps arrival order among equal timestamps
        points.sort_by_key(|p| p.timestamp);

        let mut deduped: Vec<PricePoint> = Vec::with_capacity(points.len());
        for point in points {
            match deduped.last_mut() {
                Some(last) if last.timestamp == point.timestamp => *last = point,
                _ => deduped.push(point),
            }
        }

        Self { points: deduped }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.price)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }
}

/// Range statistics over the whole fetched span.
///
/// The "52W" wording on the chart refers to this span; with the default
/// one-year period of daily bars the two coincide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeStats {
    pub low: f64,
    pub high: f64,
    pub range: f64,
    pub lower_band: f64,
    pub upper_band: f64,
    pub current: f64,
}

impl RangeStats {
    /// Returns `None` for an empty series
    pub fn compute(series: &PriceSeries) -> Option<Self> {
        let current = series.last()?.price;
        let low = series.values().fold(f64::INFINITY, f64::min);
        let high = series.values().fold(f64::NEG_INFINITY, f64::max);
        let range = high - low;

        Some(Self {
            low,
            high,
            range,
            lower_band: low + BAND_FRACTION * range,
            upper_band: high - BAND_FRACTION * range,
            current,
        })
    }

    /// The four reference levels drawn on the chart, bottom to top
    pub fn levels(&self) -> [(&'static str, f64); 4] {
        [
            ("52W Low", self.low),
            ("Low+25%", self.lower_band),
            ("High-25%", self.upper_band),
            ("52W High", self.high),
        ]
    }
}

/// A rendered image written to disk
#[derive(Debug, Clone, PartialEq)]
pub struct OutputArtifact {
    pub path: PathBuf,
    pub dpi: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::days(n)
    }

    fn series(values: &[Option<f64>]) -> PriceSeries {
        let index: Vec<_> = (0..values.len() as i64).map(day).collect();
        PriceSeries::from_column(&index, values)
    }

    #[test]
    fn test_stats_for_simple_series() {
        let s = series(&[Some(100.0), Some(110.0), Some(90.0)]);
        let stats = RangeStats::compute(&s).unwrap();

        assert_eq!(stats.low, 90.0);
        assert_eq!(stats.high, 110.0);
        assert_eq!(stats.range, 20.0);
        assert_eq!(stats.lower_band, 95.0);
        assert_eq!(stats.upper_band, 105.0);
        assert_eq!(stats.current, 90.0);
    }

    #[test]
    fn test_band_ordering_holds() {
        let s = series(&[
            Some(31_000.5),
            Some(42_750.25),
            Some(27_100.0),
            Some(68_900.75),
            Some(55_000.0),
        ]);
        let stats = RangeStats::compute(&s).unwrap();

        assert!(stats.low <= stats.lower_band);
        assert!(stats.lower_band <= stats.upper_band);
        assert!(stats.upper_band <= stats.high);
        for v in s.values() {
            assert!(stats.low <= v && v <= stats.high);
        }
        assert!(stats.low <= stats.current && stats.current <= stats.high);
    }

    #[test]
    fn test_flat_series_collapses_bands() {
        let s = series(&[Some(42.0), Some(42.0), Some(42.0)]);
        let stats = RangeStats::compute(&s).unwrap();

        assert_eq!(stats.range, 0.0);
        assert_eq!(stats.low, stats.lower_band);
        assert_eq!(stats.lower_band, stats.upper_band);
        assert_eq!(stats.upper_band, stats.high);
    }

    #[test]
    fn test_missing_values_dropped() {
        let s = series(&[Some(100.0), None, Some(200.0)]);
        let values: Vec<f64> = s.values().collect();
        assert_eq!(values, vec![100.0, 200.0]);

        let stats = RangeStats::compute(&s).unwrap();
        assert_eq!(stats.low, 100.0);
        assert_eq!(stats.high, 200.0);
        assert_eq!(stats.current, 200.0);
    }

    #[test]
    fn test_nan_values_dropped() {
        let s = series(&[Some(f64::NAN), Some(5.0)]);
        assert_eq!(s.len(), 1);
        assert_eq!(s.first().unwrap().timestamp, day(1));
    }

    #[test]
    fn test_duplicate_timestamp_keeps_last() {
        let index = vec![day(0), day(1), day(1)];
        let s = PriceSeries::from_column(&index, &[Some(1.0), Some(2.0), Some(3.0)]);

        assert_eq!(s.len(), 2);
        assert_eq!(s.last().unwrap().price, 3.0);
    }

    #[test]
    fn test_empty_series_has_no_stats() {
        let s = series(&[None, None]);
        assert!(s.is_empty());
        assert!(RangeStats::compute(&s).is_none());
    }

    #[test]
    fn test_levels_bottom_to_top() {
        let s = series(&[Some(100.0), Some(110.0), Some(90.0)]);
        let stats = RangeStats::compute(&s).unwrap();
        let names: Vec<_> = stats.levels().iter().map(|(n, _)| *n).collect();

        assert_eq!(names, vec!["52W Low", "Low+25%", "High-25%", "52W High"]);
        assert_eq!(stats.levels()[1].1, 95.0);
    }
}
