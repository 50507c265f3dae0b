use tracing::debug;

use crate::models::{PriceFrame, PriceSeries, RangeStats};
use crate::utils::{format_price, ChartError, Table};

/// Pull the cleaned closing-price series for `instrument` out of a frame.
///
/// Works on both column layouts; rows without a close are dropped.
pub fn extract_close_series(frame: &PriceFrame, instrument: &str) -> Result<PriceSeries, ChartError> {
    let column = frame.columns.close_column(instrument).ok_or_else(|| {
        debug!("Columns available: {:?}", frame.columns.names());
        ChartError::close_column_missing(instrument)
    })?;

    let series = PriceSeries::from_column(&frame.index, column);
    debug!(
        "Extracted {} closes from {} rows (hierarchical: {})",
        series.len(),
        frame.len(),
        frame.columns.is_hierarchical()
    );

    Ok(series)
}

/// Range statistics over the whole series
pub fn compute_stats(series: &PriceSeries, instrument: &str) -> Result<RangeStats, ChartError> {
    if series.is_empty() {
        debug!("No usable closes left for {}", instrument);
        return Err(ChartError::data_unavailable(instrument));
    }
    RangeStats::compute(series).ok_or_else(|| ChartError::data_unavailable(instrument))
}

/// The five summary quantities as an aligned label/value table
pub fn stats_table(stats: &RangeStats) -> Table {
    let mut table = Table::new();
    table.add_row("52W Low:", &format_price(stats.low));
    table.add_row("Lower 25%:", &format_price(stats.lower_band));
    table.add_row("Upper 25%:", &format_price(stats.upper_band));
    table.add_row("52W High:", &format_price(stats.high));
    table.add_row("Current:", &format_price(stats.current));
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn index(n: usize) -> Vec<DateTime<Utc>> {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        (0..n as i64).map(|d| start + Duration::days(d)).collect()
    }

    fn closes() -> Vec<Option<f64>> {
        vec![Some(100.0), Some(110.0), Some(90.0)]
    }

    #[test]
    fn test_flat_and_hierarchical_agree() {
        let flat = PriceFrame::flat(
            index(3),
            vec![
                ("Open".to_string(), vec![Some(1.0); 3]),
                ("Close".to_string(), closes()),
            ],
        );
        let nested = PriceFrame::hierarchical(
            index(3),
            vec![(("Close".to_string(), "X".to_string()), closes())],
        );

        for frame in [flat, nested] {
            let series = extract_close_series(&frame, "X").unwrap();
            let stats = compute_stats(&series, "X").unwrap();
            assert_eq!(stats.low, 90.0);
            assert_eq!(stats.high, 110.0);
            assert_eq!(stats.lower_band, 95.0);
            assert_eq!(stats.upper_band, 105.0);
            assert_eq!(stats.current, 90.0);
        }
    }

    #[test]
    fn test_hierarchical_fallback_uses_other_symbol() {
        let frame = PriceFrame::hierarchical(
            index(3),
            vec![(("Close".to_string(), "BTC-USD".to_string()), closes())],
        );
        let series = extract_close_series(&frame, "ETH-USD").unwrap();
        assert_eq!(series.len(), 3);
    }

    #[test]
    fn test_missing_close_column() {
        let flat = PriceFrame::flat(index(3), vec![("Open".to_string(), closes())]);
        let nested = PriceFrame::hierarchical(
            index(3),
            vec![(("Adj Close".to_string(), "X".to_string()), closes())],
        );

        assert!(matches!(
            extract_close_series(&flat, "X"),
            Err(ChartError::CloseColumnMissing { .. })
        ));
        assert!(matches!(
            extract_close_series(&nested, "X"),
            Err(ChartError::CloseColumnMissing { .. })
        ));
    }

    #[test]
    fn test_missing_rows_excluded() {
        let frame = PriceFrame::flat(
            index(3),
            vec![("Close".to_string(), vec![Some(100.0), None, Some(200.0)])],
        );
        let series = extract_close_series(&frame, "X").unwrap();
        let values: Vec<f64> = series.values().collect();
        assert_eq!(values, vec![100.0, 200.0]);
    }

    #[test]
    fn test_all_missing_is_unavailable() {
        let frame = PriceFrame::flat(index(2), vec![("Close".to_string(), vec![None, None])]);
        let series = extract_close_series(&frame, "X").unwrap();
        assert!(matches!(
            compute_stats(&series, "X"),
            Err(ChartError::DataUnavailable { .. })
        ));
    }

    #[test]
    fn test_stats_table_lines() {
        let frame = PriceFrame::flat(index(3), vec![("Close".to_string(), closes())]);
        let series = extract_close_series(&frame, "X").unwrap();
        let stats = compute_stats(&series, "X").unwrap();

        let lines = stats_table(&stats).render_lines();
        assert_eq!(
            lines,
            vec![
                "52W Low:   $90.0000",
                "Lower 25%: $95.0000",
                "Upper 25%: $105.0000",
                "52W High:  $110.0000",
                "Current:   $90.0000",
            ]
        );
    }
}
