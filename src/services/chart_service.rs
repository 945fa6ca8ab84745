use std::fs;
use std::path::Path;

use plotters::prelude::*;
use thiserror::Error;
use tracing::debug;

use crate::api::nasdaq::QuotePoint;
use crate::services::regression_service::{self, LinearFit};

// Wide 3:1 aspect suits long daily series.
const CHART_WIDTH: u32 = 1440;
const CHART_HEIGHT: u32 = 480;

/// Errors from fitting and drawing the trend chart.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("not enough data points to fit a trend (need at least 2)")]
    InsufficientData,
    #[error("failed to draw chart: {0}")]
    Draw(String),
    #[error("failed to write chart file: {0}")]
    Io(#[from] std::io::Error),
}

/// Render the raw series plus its least-squares trend line to a PNG at
/// `output_path`, overwriting any existing file there.
///
/// The x axis is the sample index, matching the regression's independent
/// variable. Raw values are drawn in blue, the fitted line in red.
pub fn render_trend_chart(
    points: &[QuotePoint],
    symbol: &str,
    output_path: &Path,
) -> Result<(), RenderError> {
    let values: Vec<f64> = points.iter().map(|p| p.value).collect();
    let fit = regression_service::linear_fit(&values)?;
    debug!(
        "Fit for {}: slope={:.6} intercept={:.6} r2={:.4}",
        symbol, fit.slope, fit.intercept, fit.r_squared
    );

    draw(&values, &fit, symbol, output_path)?;

    // plotters reports some write failures lazily; make sure the file landed.
    let meta = fs::metadata(output_path)?;
    if meta.len() == 0 {
        return Err(RenderError::Draw("chart file is empty".to_string()));
    }

    debug!("Chart written: {} ({} bytes)", output_path.display(), meta.len());
    Ok(())
}

fn draw(
    values: &[f64],
    fit: &LinearFit,
    symbol: &str,
    output_path: &Path,
) -> Result<(), RenderError> {
    let root = BitMapBackend::new(output_path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| RenderError::Draw(format!("failed to fill canvas: {}", e)))?;

    let n = values.len();
    let fitted: Vec<f64> = (0..n).map(|i| fit.predict(i)).collect();

    // Y range covers both the raw series and the fitted endpoints.
    let min_y = values
        .iter()
        .chain(fitted.iter())
        .fold(f64::INFINITY, |a, &b| a.min(b));
    let max_y = values
        .iter()
        .chain(fitted.iter())
        .fold(f64::NEG_INFINITY, |a, &b| a.max(b));
    let padding = (max_y - min_y).max(1e-8) * 0.1;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("Value of {}", symbol), ("sans-serif", 30.0).into_font())
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..(n - 1) as f64, (min_y - padding)..(max_y + padding))
        .map_err(|e| RenderError::Draw(format!("failed to build chart: {}", e)))?;

    chart
        .configure_mesh()
        .x_desc("Timeline")
        .y_desc("Stock")
        .draw()
        .map_err(|e| RenderError::Draw(format!("failed to draw mesh: {}", e)))?;

    chart
        .draw_series(LineSeries::new(
            values.iter().enumerate().map(|(i, &y)| (i as f64, y)),
            &BLUE,
        ))
        .map_err(|e| RenderError::Draw(format!("failed to draw series: {}", e)))?
        .label("value")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart
        .draw_series(LineSeries::new(
            fitted.iter().enumerate().map(|(i, &y)| (i as f64, y)),
            &RED,
        ))
        .map_err(|e| RenderError::Draw(format!("failed to draw trend line: {}", e)))?
        .label("forecast")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(|e| RenderError::Draw(format!("failed to draw legend: {}", e)))?;

    root.present()
        .map_err(|e| RenderError::Draw(format!("failed to render chart: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_points(values: &[f64]) -> Vec<QuotePoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| QuotePoint {
                timestamp: 1_325_462_400 + i as i64 * 86_400,
                value: v,
            })
            .collect()
    }

    fn temp_chart_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("trendcast_test_{}_{}.png", name, std::process::id()))
    }

    #[test]
    fn test_render_writes_nonempty_file() {
        let points = sample_points(&[10.5, 11.0, 10.75, 12.25, 12.0]);
        let path = temp_chart_path("basic");

        render_trend_chart(&points, "SENS", &path).unwrap();

        let meta = fs::metadata(&path).unwrap();
        assert!(meta.len() > 0);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_render_overwrites_existing_file() {
        let points = sample_points(&[1.0, 2.0, 3.0]);
        let path = temp_chart_path("overwrite");
        fs::write(&path, b"stale").unwrap();

        render_trend_chart(&points, "AAPL", &path).unwrap();

        let meta = fs::metadata(&path).unwrap();
        assert!(meta.len() > 5);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_render_rejects_single_point() {
        let points = sample_points(&[42.0]);
        let path = temp_chart_path("single");

        let result = render_trend_chart(&points, "SENS", &path);
        assert!(matches!(result, Err(RenderError::InsufficientData)));
        assert!(!path.exists());
    }

    #[test]
    fn test_render_rejects_empty_series() {
        let path = temp_chart_path("empty");
        let result = render_trend_chart(&[], "SENS", &path);
        assert!(matches!(result, Err(RenderError::InsufficientData)));
        assert!(!path.exists());
    }
}
