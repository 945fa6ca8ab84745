use std::path::{Path, PathBuf};

use chrono::Utc;
use thiserror::Error;
use tracing::info;

use crate::api::nasdaq::{FetchError, NasdaqClient};
use crate::services::chart_service::{self, RenderError};

const DEFAULT_FROM_DATE: &str = "2012-01-01";

/// A failed prediction. The Display text is what the user sees, except for
/// transport failures, which the command layer softens to a retry prompt.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Normalize the optional start-date argument.
///
/// Absent or empty → the default start date; a bare 4-digit year → January
/// 1st of that year; anything else passes through untouched and is left for
/// the quote API to accept or reject.
pub fn normalize_from_date(arg: Option<&str>) -> String {
    match arg {
        None | Some("") => DEFAULT_FROM_DATE.to_string(),
        Some(s) if s.len() == 4 && s.chars().all(|c| c.is_ascii_digit()) => {
            format!("{}-01-01", s)
        }
        Some(s) => s.to_string(),
    }
}

/// Run the full fetch → fit → render pipeline for one symbol.
///
/// On success returns the path of the generated chart, unique to this
/// invocation; the caller owns the file and deletes it once sent.
pub async fn run_prediction(
    client: &NasdaqClient,
    symbol: &str,
    from_date_arg: Option<&str>,
    chart_dir: &Path,
) -> Result<PathBuf, PredictError> {
    let from_date = normalize_from_date(from_date_arg);
    let to_date = Utc::now().format("%Y-%m-%d").to_string();
    info!("Predicting {} from {} to {}", symbol, from_date, to_date);

    let points = client.fetch_chart(symbol, &from_date, &to_date).await?;
    info!("Fetched {} quote points for {}", points.len(), symbol);

    let output_path = chart_dir.join(format!(
        "trend_{}_{}.png",
        symbol,
        Utc::now().timestamp_millis()
    ));
    chart_service::render_trend_chart(&points, symbol, &output_path)?;

    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_year_becomes_january_first() {
        assert_eq!(normalize_from_date(Some("2015")), "2015-01-01");
    }

    #[test]
    fn test_absent_argument_uses_default() {
        assert_eq!(normalize_from_date(None), "2012-01-01");
        assert_eq!(normalize_from_date(Some("")), "2012-01-01");
    }

    #[test]
    fn test_full_date_passes_through() {
        assert_eq!(normalize_from_date(Some("2015-06-01")), "2015-06-01");
    }

    #[test]
    fn test_non_numeric_token_passes_through() {
        // Only length and digits are checked locally; the quote API is the
        // authority on whether the value is a real date.
        assert_eq!(normalize_from_date(Some("abcd-ef")), "abcd-ef");
        assert_eq!(normalize_from_date(Some("20x5")), "20x5");
    }
}
