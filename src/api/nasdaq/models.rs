use serde::Deserialize;
use thiserror::Error;

/// One (timestamp, price) sample from the exchange's historical series.
/// Timestamps are epoch seconds; the API transmits milliseconds.
#[derive(Debug, Clone, PartialEq)]
pub struct QuotePoint {
    pub timestamp: i64,
    pub value: f64,
}

/// Top-level envelope returned by the quote chart endpoint.
#[derive(Debug, Deserialize)]
pub struct QuoteResponse {
    pub status: ResponseStatus,
    pub data: Option<ChartData>,
}

/// Application-level status embedded in the body, distinct from the
/// HTTP transport status. `r_code == 200` means success.
#[derive(Debug, Deserialize)]
pub struct ResponseStatus {
    #[serde(rename = "rCode")]
    pub r_code: i32,
    #[serde(rename = "bCodeMessage")]
    pub b_code_message: Option<Vec<BCodeMessage>>,
}

#[derive(Debug, Deserialize)]
pub struct BCodeMessage {
    #[serde(rename = "errorMessage")]
    pub error_message: String,
}

#[derive(Debug, Deserialize)]
pub struct ChartData {
    pub chart: Option<Vec<ChartEntry>>,
}

/// One raw chart record: `x` is epoch milliseconds, `y` is the price.
#[derive(Debug, Deserialize)]
pub struct ChartEntry {
    pub x: i64,
    pub y: f64,
}

/// Errors from fetching and decoding a quote series.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network or connection failure while reaching the quote API.
    #[error("request to quote service failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The body was not the JSON shape we expect.
    #[error("malformed quote response: {0}")]
    Parse(String),
    /// The quote API itself reported a failure; message relayed verbatim.
    #[error("{0}")]
    Upstream(String),
}
