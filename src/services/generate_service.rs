use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use tracing::info;

use crate::api::MarketDataProvider;
use crate::config::ChartConfig;
use crate::models::{HistoryRequest, Interval, OutputArtifact, Period};
use crate::services::{chart_service, price_service};
use crate::utils::ChartError;

/// File locations for one run
#[derive(Debug, Clone, PartialEq)]
pub struct OutputPaths {
    /// `<instrument>_25pct_<YYYY-MM-DD>.png`
    pub dated: PathBuf,
    /// `<instrument>_TODAY.png`, replaced on every run
    pub latest: PathBuf,
}

impl OutputPaths {
    pub fn for_date(dir: &Path, instrument: &str, date: NaiveDate) -> Self {
        Self {
            dated: dir.join(format!("{}_25pct_{}.png", instrument, date.format("%Y-%m-%d"))),
            latest: dir.join(format!("{}_TODAY.png", instrument)),
        }
    }
}

/// Fetches one instrument's history and writes the annotated charts
pub struct ChartGenerator<P> {
    provider: P,
    config: ChartConfig,
}

impl<P: MarketDataProvider> ChartGenerator<P> {
    pub fn new(provider: P, config: ChartConfig) -> Self {
        Self { provider, config }
    }

    /// Run for the current UTC date
    pub async fn generate(&self) -> Result<OutputArtifact, ChartError> {
        self.generate_on(Utc::now().date_naive()).await
    }

    /// Fetch, validate, compute and render; returns the date-stamped artifact.
    /// Nothing touches the filesystem until the data has been validated.
    pub async fn generate_on(&self, date: NaiveDate) -> Result<OutputArtifact, ChartError> {
        let instrument = self.config.instrument.as_str();
        let request = HistoryRequest {
            symbol: instrument.to_string(),
            period: Period::parse(&self.config.period)?,
            interval: Interval::parse(&self.config.interval)?,
            auto_adjust: false,
            progress: false,
        };

        info!("Fetching {} history ({} / {})", instrument, request.period, request.interval);
        let frame = self
            .provider
            .download(&request)
            .await?
            .filter(|frame| !frame.is_empty())
            .ok_or_else(|| ChartError::data_unavailable(instrument))?;
        info!("Received {} rows for {}", frame.len(), instrument);

        let series = price_service::extract_close_series(&frame, instrument)?;
        let stats = price_service::compute_stats(&series, instrument)?;
        for line in price_service::stats_table(&stats).render_lines() {
            info!("{}", line);
        }

        std::fs::create_dir_all(&self.config.output_dir)?;
        let paths = OutputPaths::for_date(&self.config.output_dir, instrument, date);

        chart_service::render_chart(&paths.dated, &series, &stats, instrument, self.config.dated_dpi)?;
        info!("Wrote {}", paths.dated.display());
        chart_service::render_chart(&paths.latest, &series, &stats, instrument, self.config.latest_dpi)?;
        info!("Wrote {}", paths.latest.display());

        Ok(OutputArtifact {
            path: paths.dated,
            dpi: self.config.dated_dpi,
        })
    }
}
