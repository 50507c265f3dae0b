pub mod table;
pub mod errors;

pub use table::Table;
pub use errors::ChartError;

/// Format a price the way every chart annotation shows it
pub fn format_price(value: f64) -> String {
    format!("${:.4}", value)
}
