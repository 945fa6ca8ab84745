use super::chart_service::RenderError;

/// Ordinary least squares fit of a straight line through the series.
///
/// The independent variable is the sample index `0..n-1`, not the sample
/// timestamp, so the fit assumes evenly spaced samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination. Diagnostic only, never shown to users.
    pub r_squared: f64,
}

impl LinearFit {
    /// Fitted value at index `i`.
    pub fn predict(&self, i: usize) -> f64 {
        self.intercept + self.slope * i as f64
    }
}

/// Fit `value = intercept + slope * index` by least squares.
///
/// Needs at least two points; a single point has no defined slope.
pub fn linear_fit(values: &[f64]) -> Result<LinearFit, RenderError> {
    let n = values.len();
    if n < 2 {
        return Err(RenderError::InsufficientData);
    }

    let n_f = n as f64;
    let mean_x = (n_f - 1.0) / 2.0;
    let mean_y = values.iter().sum::<f64>() / n_f;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    let mut syy = 0.0;
    for (i, &y) in values.iter().enumerate() {
        let dx = i as f64 - mean_x;
        let dy = y - mean_y;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    // A flat series fits itself exactly.
    let r_squared = if syy == 0.0 { 1.0 } else { (sxy * sxy) / (sxx * syy) };

    Ok(LinearFit {
        slope,
        intercept,
        r_squared,
    })
}
