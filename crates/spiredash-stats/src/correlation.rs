//! Pearson correlation coefficient.

/// Computes the Pearson correlation coefficient between two samples.
///
/// The coefficient is the covariance of the samples normalized by the
/// product of their standard deviations, in [-1, 1].
///
/// Degenerate inputs produce 0.0 rather than NaN: samples shorter than two
/// elements, samples of different lengths, and samples where either side has
/// zero variance.
///
/// # Examples
///
/// ```
/// use spiredash_stats::correlation::pearson;
///
/// let floors = [10.0, 25.0, 40.0, 57.0];
/// let scores = [150.0, 400.0, 900.0, 2100.0];
/// assert!(pearson(&floors, &scores) > 0.9);
/// assert_eq!(pearson(&[5.0, 5.0, 5.0], &scores[..3]), 0.0);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.len() < 2 {
        return 0.0;
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (xi, yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        covariance += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x > 0.0 && var_y > 0.0 {
        covariance / (var_x.sqrt() * var_y.sqrt())
    } else {
        0.0
    }
}
