//! History request models

use super::{Interval, Period};

/// Parameters for one price-history fetch
#[derive(Debug, Clone)]
pub struct HistoryRequest {
    pub symbol: String,
    pub period: Period,
    pub interval: Interval,
    /// Rescale prices by the provider's adjustment factor
    pub auto_adjust: bool,
    /// Log request progress at info level
    pub progress: bool,
}
