use std::time::Duration;

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::Deserialize;
use tracing::debug;

use crate::domain::entities::dataset::{Scalar, StockRecord};
use crate::domain::entities::screen::ScreenRequest;
use crate::usecase::ports::screener::{ScreenerError, ScreenerGateway};

const SCREEN_PATH: &str = "/api/v1/screen";

#[derive(Debug, Deserialize)]
struct ScreenerResponse {
    status: String,
    #[serde(default)]
    results: Vec<StockResult>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StockResult {
    symbol: String,
    #[serde(default)]
    primary_timeframe: Option<String>,
    #[serde(default)]
    primary_datetime: Option<String>,
    #[serde(default)]
    close: Option<f64>,
    #[serde(default)]
    volume: Option<f64>,
    #[serde(default)]
    indicators: IndexMap<String, serde_json::Value>,
    #[serde(default)]
    fundamentals: Option<IndexMap<String, serde_json::Value>>,
}

fn optional_text(value: Option<String>) -> Scalar {
    value.map(Scalar::String).unwrap_or(Scalar::Null)
}

fn optional_number(value: Option<f64>) -> Scalar {
    value.map(Scalar::number).unwrap_or(Scalar::Null)
}

/// symbol, timeframe, datetime, close, volume, indicators, then non-null fundamentals.
fn flatten_result(result: StockResult) -> StockRecord {
    let mut record = StockRecord::new();
    record.insert("symbol".to_string(), Scalar::String(result.symbol));
    record.insert("timeframe".to_string(), optional_text(result.primary_timeframe));
    record.insert("datetime".to_string(), optional_text(result.primary_datetime));
    record.insert("close".to_string(), optional_number(result.close));
    record.insert("volume".to_string(), optional_number(result.volume));
    for (name, value) in result.indicators {
        record.insert(name, Scalar::from(value));
    }
    for (name, value) in result.fundamentals.into_iter().flatten() {
        if !value.is_null() {
            record.insert(name, Scalar::from(value));
        }
    }
    record
}

pub fn parse_screen_response(body: &str) -> Result<Vec<StockRecord>, ScreenerError> {
    let response: ScreenerResponse = serde_json::from_str(body)
        .map_err(|err| ScreenerError::InvalidResponse(err.to_string()))?;
    if response.status != "success" {
        return Err(ScreenerError::Remote(
            response
                .error
                .unwrap_or_else(|| format!("status {}", response.status)),
        ));
    }
    Ok(response.results.into_iter().map(flatten_result).collect())
}

/// Screening service reached over HTTP.
pub struct HttpScreenerGateway {
    base_url: String,
    client: reqwest::Client,
}

impl HttpScreenerGateway {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}{SCREEN_PATH}", self.base_url)
    }
}

#[async_trait]
impl ScreenerGateway for HttpScreenerGateway {
    async fn screen(&self, request: &ScreenRequest) -> Result<Vec<StockRecord>, ScreenerError> {
        let url = self.endpoint();
        debug!(url = %url, "posting screening request");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| ScreenerError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ScreenerError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(ScreenerError::Status {
                status: status.as_u16(),
                body,
            });
        }

        parse_screen_response(&body)
    }
}
