/// A two-column text table with the label column padded to a common width.
/// Used for the stats box drawn on the chart and for the console summary.
pub struct Table {
    rows: Vec<(String, String)>,
    label_width: usize,
}

impl Table {
    pub fn new() -> Self {
        Table {
            rows: Vec::new(),
            label_width: 0,
        }
    }

    /// Add a row to the table
    pub fn add_row(&mut self, label: &str, value: &str) {
        self.label_width = self.label_width.max(label.len());
        self.rows.push((label.to_string(), value.to_string()));
    }

    /// Render each row as one line, values starting in the same column
    pub fn render_lines(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|(label, value)| {
                format!("{:<width$} {}", label, value, width = self.label_width)
            })
            .collect()
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_aligned() {
        let mut table = Table::new();
        table.add_row("52W Low:", "$90.0000");
        table.add_row("Current:", "$100.0000");
        table.add_row("Lower 25%:", "$95.0000");

        let lines = table.render_lines();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "52W Low:   $90.0000");
        assert_eq!(lines[1], "Current:   $100.0000");
        assert_eq!(lines[2], "Lower 25%: $95.0000");
    }

    #[test]
    fn test_empty_table_renders_nothing() {
        assert!(Table::new().render_lines().is_empty());
    }
}
