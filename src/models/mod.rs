//! Data models for the chart pipeline
//!
//! Provider tables, the cleaned closing series, the statistics derived
//! from it and the files rendered at the end of a run.

pub mod chart;
pub mod frame;
pub mod timeframe;
pub mod request;

// Re-export commonly used types for convenience
pub use chart::{OutputArtifact, PriceSeries, RangeStats};
pub use frame::{PriceFrame, CLOSE_FIELD};
pub use timeframe::{Interval, Period};
pub use request::HistoryRequest;
