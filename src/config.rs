//! Compiled-in settings for the chart run

use std::path::PathBuf;

pub const INSTRUMENT: &str = "BTC-USD";
pub const PERIOD: &str = "1y";
pub const INTERVAL: &str = "1d";
pub const OUTPUT_DIR: &str = "outputs";

/// Resolution of the date-stamped file
pub const DATED_DPI: u32 = 200;
/// Resolution of the fixed-name "latest" file
pub const LATEST_DPI: u32 = 300;

pub const FIGURE_WIDTH_IN: u32 = 14;
pub const FIGURE_HEIGHT_IN: u32 = 7;

/// Share of the low/high range covered by each zone
pub const BAND_FRACTION: f64 = 0.25;

pub const YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Settings bundle handed to the generator
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub instrument: String,
    pub period: String,
    pub interval: String,
    pub output_dir: PathBuf,
    pub dated_dpi: u32,
    pub latest_dpi: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            instrument: INSTRUMENT.to_string(),
            period: PERIOD.to_string(),
            interval: INTERVAL.to_string(),
            output_dir: PathBuf::from(OUTPUT_DIR),
            dated_dpi: DATED_DPI,
            latest_dpi: LATEST_DPI,
        }
    }
}
