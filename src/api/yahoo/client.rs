use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::Client as HttpClient;
use reqwest::StatusCode;
use tracing::{debug, info, warn};

use super::models::{ApiError, ChartResponse, ChartResult};
use crate::api::MarketDataProvider;
use crate::config::YAHOO_BASE_URL;
use crate::models::{HistoryRequest, PriceFrame, CLOSE_FIELD};

/// Yahoo Finance chart API client
pub struct YahooClient {
    http_client: HttpClient,
    base_url: String,
}

impl YahooClient {
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
    const BROWSER_USER_AGENT: &'static str =
        "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

    /// Create a new Yahoo Finance client
    pub fn new() -> Self {
        Self::with_base_url(YAHOO_BASE_URL.to_string())
    }

    /// Create a new client with custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        }
    }

    /// Yahoo rejects requests without a browser-like agent
    fn create_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(Self::BROWSER_USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    fn chart_url(&self, request: &HistoryRequest) -> String {
        format!(
            "{}/v8/finance/chart/{}?range={}&interval={}&includeAdjustedClose=true&events=div%2Csplits",
            self.base_url, request.symbol, request.period, request.interval
        )
    }

    /// Parse error response based on HTTP status code
    async fn handle_error_response(status: StatusCode, response: reqwest::Response) -> ApiError {
        let status_code = status.as_u16();
        let retry_after = response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok());
        let body_text = response.text().await.unwrap_or_default();

        match status_code {
            400 => {
                // Yahoo wraps the reason in the chart envelope
                let message = serde_json::from_str::<ChartResponse>(&body_text)
                    .ok()
                    .and_then(|r| r.chart.error)
                    .and_then(|e| e.description)
                    .unwrap_or(body_text);
                ApiError::BadRequest(message)
            }
            401 => ApiError::Unauthorized(body_text),
            403 => ApiError::Forbidden(body_text),
            429 => {
                warn!("Rate limited by Yahoo Finance, retry after {:?} s", retry_after);
                ApiError::RateLimited { retry_after }
            }
            500..=599 => {
                warn!("Server error {}: {}", status_code, body_text);
                ApiError::ServerError(status_code as i32, body_text)
            }
            _ => ApiError::HttpError(status_code as i32, body_text),
        }
    }

    /// GET /v8/finance/chart/{symbol}
    ///
    /// Retrieves daily (or other interval) bars for one symbol over a period.
    ///
    /// # Returns
    /// * `Ok(Some(ChartResult))` - Price history for the symbol
    /// * `Ok(None)` - Yahoo knows no data for the symbol or range
    /// * `Err(ApiError)` - Transport, HTTP or decoding failure
    pub async fn get_chart(&self, request: &HistoryRequest) -> Result<Option<ChartResult>, ApiError> {
        let url = self.chart_url(request);
        debug!("Requesting chart: {}", url);
        if request.progress {
            info!("Downloading {} ({} / {})...", request.symbol, request.period, request.interval);
        }

        let response = self
            .http_client
            .get(&url)
            .headers(Self::create_headers())
            .timeout(Self::REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            warn!("Yahoo Finance has no chart for {}", request.symbol);
            return Ok(None);
        }
        if !status.is_success() {
            return Err(Self::handle_error_response(status, response).await);
        }

        let body = response
            .json::<ChartResponse>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))?;

        if let Some(err) = &body.chart.error {
            warn!("Chart error for {}: {} {:?}", request.symbol, err.code, err.description);
        }

        if request.progress {
            info!("Download of {} complete", request.symbol);
        }

        Ok(body.chart.result.and_then(|results| results.into_iter().next()))
    }
}

impl Default for YahooClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketDataProvider for YahooClient {
    async fn download(&self, request: &HistoryRequest) -> Result<Option<PriceFrame>, ApiError> {
        let result = self.get_chart(request).await?;
        Ok(result.map(|r| build_frame(r, &request.symbol, request.auto_adjust)))
    }
}

/// Convert a chart result into a frame keyed by `(field, symbol)`.
///
/// Rows come out in timestamp order; Yahoo sometimes repeats the live bar,
/// so for a repeated timestamp only the last row is kept.
pub fn build_frame(result: ChartResult, symbol: &str, auto_adjust: bool) -> PriceFrame {
    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();
    let adjclose = result
        .indicators
        .adjclose
        .into_iter()
        .next()
        .map(|a| a.adjclose)
        .unwrap_or_default();

    let mut rows: Vec<(usize, DateTime<Utc>)> = result
        .timestamp
        .iter()
        .enumerate()
        .filter_map(|(i, secs)| DateTime::<Utc>::from_timestamp(*secs, 0).map(|ts| (i, ts)))
        .collect();
    rows.sort_by_key(|(_, ts)| *ts);

    let mut kept: Vec<(usize, DateTime<Utc>)> = Vec::with_capacity(rows.len());
    for row in rows {
        match kept.last_mut() {
            Some(last) if last.1 == row.1 => *last = row,
            _ => kept.push(row),
        }
    }

    let mut open = pick_rows(&kept, &quote.open);
    let mut high = pick_rows(&kept, &quote.high);
    let mut low = pick_rows(&kept, &quote.low);
    let mut close = pick_rows(&kept, &quote.close);
    let adj = pick_rows(&kept, &adjclose);
    let volume = pick_rows(&kept, &quote.volume);

    if auto_adjust {
        for row in 0..kept.len() {
            let ratio = match (adj[row], close[row]) {
                (Some(a), Some(c)) if c != 0.0 => Some(a / c),
                _ => None,
            };
            for column in [&mut open, &mut high, &mut low, &mut close] {
                column[row] = match (column[row], ratio) {
                    (Some(v), Some(r)) => Some(v * r),
                    _ => None,
                };
            }
        }
    }

    let key = |field: &str| (field.to_string(), symbol.to_string());
    let mut columns = vec![
        (key("Open"), open),
        (key("High"), high),
        (key("Low"), low),
        (key(CLOSE_FIELD), close),
    ];
    if !auto_adjust {
        columns.push((key("Adj Close"), adj));
    }
    columns.push((key("Volume"), volume));

    let index = kept.into_iter().map(|(_, ts)| ts).collect();
    PriceFrame::hierarchical(index, columns)
}

/// Values at the kept row positions; short arrays read as missing
fn pick_rows(rows: &[(usize, DateTime<Utc>)], values: &[Option<f64>]) -> Vec<Option<f64>> {
    rows.iter()
        .map(|(i, _)| values.get(*i).copied().flatten())
        .collect()
}
