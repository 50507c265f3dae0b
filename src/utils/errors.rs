use thiserror::Error;

use crate::api::yahoo::ApiError;

/// Fatal conditions of a chart run
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("No data returned for {instrument}")]
    DataUnavailable { instrument: String },
    #[error("Could not find Close column for {instrument}")]
    CloseColumnMissing { instrument: String },
    #[error("Invalid timeframe: {0}")]
    InvalidTimeframe(String),
    #[error("Market data request failed: {0}")]
    Api(#[from] ApiError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Rendering failed: {0}")]
    Render(String),
}

impl ChartError {
    pub fn data_unavailable(instrument: &str) -> Self {
        ChartError::DataUnavailable {
            instrument: instrument.to_string(),
        }
    }

    pub fn close_column_missing(instrument: &str) -> Self {
        ChartError::CloseColumnMissing {
            instrument: instrument.to_string(),
        }
    }
}
