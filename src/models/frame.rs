//! Tabular price history as returned by a market-data provider

use chrono::{DateTime, Utc};

/// Field name of the closing-price column
pub const CLOSE_FIELD: &str = "Close";

/// Column layout of a price table.
///
/// Providers either return plain field columns (`"Close"`) or columns keyed
/// by `(field, instrument)`. Each column is aligned with the frame index and
/// holds `None` where the provider had no value.
#[derive(Debug, Clone)]
pub enum Columns {
    Flat(Vec<(String, Vec<Option<f64>>)>),
    Hierarchical(Vec<((String, String), Vec<Option<f64>>)>),
}

impl Columns {
    /// Locate the closing-price column for `instrument`.
    ///
    /// Hierarchical layouts prefer the exact `(Close, instrument)` key and fall
    /// back to the first column whose field is `Close`. Flat layouts need a
    /// column named `Close`.
    pub fn close_column(&self, instrument: &str) -> Option<&[Option<f64>]> {
        match self {
            Columns::Flat(cols) => cols
                .iter()
                .find(|(name, _)| name == CLOSE_FIELD)
                .map(|(_, values)| values.as_slice()),
            Columns::Hierarchical(cols) => cols
                .iter()
                .find(|((field, symbol), _)| field == CLOSE_FIELD && symbol == instrument)
                .or_else(|| cols.iter().find(|((field, _), _)| field == CLOSE_FIELD))
                .map(|(_, values)| values.as_slice()),
        }
    }

    /// Column labels, hierarchical keys rendered as `field/instrument`
    pub fn names(&self) -> Vec<String> {
        match self {
            Columns::Flat(cols) => cols.iter().map(|(name, _)| name.clone()).collect(),
            Columns::Hierarchical(cols) => cols
                .iter()
                .map(|((field, symbol), _)| format!("{}/{}", field, symbol))
                .collect(),
        }
    }

    pub fn is_hierarchical(&self) -> bool {
        matches!(self, Columns::Hierarchical(_))
    }
}

/// Date-indexed price table
#[derive(Debug, Clone)]
pub struct PriceFrame {
    pub index: Vec<DateTime<Utc>>,
    pub columns: Columns,
}

impl PriceFrame {
    pub fn flat(index: Vec<DateTime<Utc>>, columns: Vec<(String, Vec<Option<f64>>)>) -> Self {
        Self {
            index,
            columns: Columns::Flat(columns),
        }
    }

    pub fn hierarchical(
        index: Vec<DateTime<Utc>>,
        columns: Vec<((String, String), Vec<Option<f64>>)>,
    ) -> Self {
        Self {
            index,
            columns: Columns::Hierarchical(columns),
        }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(field: &str, symbol: &str) -> (String, String) {
        (field.to_string(), symbol.to_string())
    }

    #[test]
    fn test_flat_close_lookup() {
        let cols = Columns::Flat(vec![
            ("Open".to_string(), vec![Some(1.0)]),
            ("Close".to_string(), vec![Some(2.0)]),
        ]);
        assert_eq!(cols.close_column("X"), Some(&[Some(2.0)][..]));
    }

    #[test]
    fn test_flat_requires_exact_name() {
        let cols = Columns::Flat(vec![("close".to_string(), vec![Some(2.0)])]);
        assert!(cols.close_column("X").is_none());
    }

    #[test]
    fn test_hierarchical_prefers_exact_key() {
        let cols = Columns::Hierarchical(vec![
            (key("Close", "OTHER"), vec![Some(1.0)]),
            (key("Close", "X"), vec![Some(2.0)]),
        ]);
        assert_eq!(cols.close_column("X"), Some(&[Some(2.0)][..]));
    }

    #[test]
    fn test_hierarchical_falls_back_to_first_close() {
        let cols = Columns::Hierarchical(vec![
            (key("Open", "X"), vec![Some(0.5)]),
            (key("Close", "FIRST"), vec![Some(1.0)]),
            (key("Close", "SECOND"), vec![Some(2.0)]),
        ]);
        assert_eq!(cols.close_column("X"), Some(&[Some(1.0)][..]));
    }

    #[test]
    fn test_hierarchical_without_close() {
        let cols = Columns::Hierarchical(vec![(key("Volume", "X"), vec![Some(10.0)])]);
        assert!(cols.close_column("X").is_none());
        assert_eq!(cols.names(), vec!["Volume/X".to_string()]);
    }
}
