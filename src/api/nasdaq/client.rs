use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::Client as HttpClient;
use tracing::debug;

use super::models::{FetchError, QuotePoint, QuoteResponse};

/// Nasdaq quote API client for historical chart data
#[derive(Clone)]
pub struct NasdaqClient {
    http_client: HttpClient,
    base_url: String,
}

impl NasdaqClient {
    const DEFAULT_BASE_URL: &'static str = "https://api.nasdaq.com/api/quote";

    pub fn new() -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create a client with a custom base URL (for testing or overrides)
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url,
        }
    }

    // The API rejects requests without a recognizable browser signature.
    fn create_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(
                "Mozilla/5.0 (X11; Linux x86_64; rv:85.0) Gecko/20100101 Firefox/85.0",
            ),
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/plain, */*"),
        );
        headers.insert("TE", HeaderValue::from_static("Trailers"));
        headers
    }

    /// GET /{symbol}/chart
    ///
    /// Fetches the historical price series for a symbol between two dates
    /// (inclusive, `YYYY-MM-DD`). Returns the points in the order the API
    /// sends them, with timestamps converted from milliseconds to seconds.
    pub async fn fetch_chart(
        &self,
        symbol: &str,
        from_date: &str,
        to_date: &str,
    ) -> Result<Vec<QuotePoint>, FetchError> {
        let url = format!("{}/{}/chart", self.base_url, symbol);
        debug!("Fetching quote chart: {} [{} .. {}]", url, from_date, to_date);

        let response = self
            .http_client
            .get(&url)
            .headers(Self::create_headers())
            .query(&[
                ("assetclass", "stocks"),
                ("fromdate", from_date),
                ("todate", to_date),
            ])
            .send()
            .await?;

        let body = response.text().await?;
        parse_chart_body(&body)
    }
}

impl Default for NasdaqClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode a chart response body into quote points.
///
/// The body carries its own status code (`status.rCode`), distinct from the
/// HTTP status: 200 means the `data.chart` array is present, anything else
/// means `status.bCodeMessage[0].errorMessage` explains the failure.
pub(crate) fn parse_chart_body(body: &str) -> Result<Vec<QuotePoint>, FetchError> {
    let envelope: QuoteResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))?;

    debug!("Quote service rCode: {}", envelope.status.r_code);

    if envelope.status.r_code != 200 {
        let message = envelope
            .status
            .b_code_message
            .as_ref()
            .and_then(|msgs| msgs.first())
            .map(|m| m.error_message.clone())
            .ok_or_else(|| {
                FetchError::Parse("missing field status.bCodeMessage[0].errorMessage".to_string())
            })?;
        return Err(FetchError::Upstream(message));
    }

    let entries = envelope
        .data
        .ok_or_else(|| FetchError::Parse("missing field data".to_string()))?
        .chart
        .ok_or_else(|| FetchError::Parse("missing field data.chart".to_string()))?;

    debug!("Quote chart entries: {}", entries.len());

    // Milliseconds to seconds, truncating.
    Ok(entries
        .into_iter()
        .map(|e| QuotePoint {
            timestamp: e.x / 1000,
            value: e.y,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_success_payload() {
        let body = r#"{
            "status": { "rCode": 200, "bCodeMessage": null },
            "data": { "chart": [
                { "x": 1325462400000, "y": 10.5 },
                { "x": 1325548800999, "y": 11.0 },
                { "x": 1325635200000, "y": 10.75 },
                { "x": 1325721600000, "y": 12.25 },
                { "x": 1325808000000, "y": 12.0 }
            ] }
        }"#;

        let points = parse_chart_body(body).unwrap();
        assert_eq!(points.len(), 5);
        assert_eq!(points[0].timestamp, 1325462400);
        assert_eq!(points[0].value, 10.5);
        // Millisecond remainders truncate, never round up.
        assert_eq!(points[1].timestamp, 1325548800);
    }

    #[test]
    fn test_parse_upstream_error() {
        let body = r#"{
            "status": {
                "rCode": 400,
                "bCodeMessage": [ { "errorMessage": "Symbol not found" } ]
            },
            "data": null
        }"#;

        match parse_chart_body(body) {
            Err(FetchError::Upstream(msg)) => assert_eq!(msg, "Symbol not found"),
            other => panic!("expected Upstream error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_error_without_message() {
        let body = r#"{ "status": { "rCode": 500, "bCodeMessage": [] }, "data": null }"#;
        assert!(matches!(parse_chart_body(body), Err(FetchError::Parse(_))));
    }

    #[test]
    fn test_parse_success_without_chart() {
        let body = r#"{ "status": { "rCode": 200, "bCodeMessage": null }, "data": null }"#;
        match parse_chart_body(body) {
            Err(FetchError::Parse(msg)) => assert!(msg.contains("data")),
            other => panic!("expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_malformed_json() {
        assert!(matches!(
            parse_chart_body("not json at all"),
            Err(FetchError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_empty_chart_is_not_an_error() {
        // An empty-but-successful payload decodes fine; the renderer is the
        // one that rejects series that are too short.
        let body = r#"{ "status": { "rCode": 200 }, "data": { "chart": [] } }"#;
        let points = parse_chart_body(body).unwrap();
        assert!(points.is_empty());
    }
}
