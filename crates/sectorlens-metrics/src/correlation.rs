//! Pairwise Pearson correlation across sector return series.

use ndarray::Array2;

/// A labeled, symmetric correlation matrix with unit diagonal.
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    sectors: Vec<String>,
    values: Array2<f64>,
}

impl CorrelationMatrix {
    /// Build the correlation matrix from per-sector daily return series.
    ///
    /// Series are expected to be date-aligned and free of zero-variance
    /// entries; degenerate sectors are filtered out by the caller
    /// before correlation is computed.
    pub(crate) fn from_series(series: &[(String, Vec<f64>)]) -> Self {
        let n = series.len();
        let mut values = Array2::<f64>::zeros((n, n));

        for i in 0..n {
            values[[i, i]] = 1.0;
            for j in (i + 1)..n {
                let corr = pearson(&series[i].1, &series[j].1);
                values[[i, j]] = corr;
                values[[j, i]] = corr;
            }
        }

        Self {
            sectors: series.iter().map(|(name, _)| name.clone()).collect(),
            values,
        }
    }

    /// Sector labels, in matrix order.
    pub fn sectors(&self) -> &[String] {
        &self.sectors
    }

    /// The raw matrix.
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Number of sectors in the matrix.
    pub fn len(&self) -> usize {
        self.sectors.len()
    }

    /// Whether the matrix is empty.
    pub fn is_empty(&self) -> bool {
        self.sectors.is_empty()
    }

    /// Correlation between two sectors by name.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.sectors.iter().position(|s| s == a)?;
        let j = self.sectors.iter().position(|s| s == b)?;
        Some(self.values[[i, j]])
    }
}

/// Pearson correlation of two equally long samples.
///
/// Only the overlapping prefix is used when lengths differ.
pub(crate) fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n == 0 {
        return f64::NAN;
    }

    let nf = n as f64;
    let mean_x = x[..n].iter().sum::<f64>() / nf;
    let mean_y = y[..n].iter().sum::<f64>() / nf;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for k in 0..n {
        let dx = x[k] - mean_x;
        let dy = y[k] - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 {
        return f64::NAN;
    }

    cov / denom
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_pearson_perfect_positive() {
        let x = vec![0.01, 0.02, -0.01, 0.03];
        let y = vec![0.02, 0.04, -0.02, 0.06];
        assert_abs_diff_eq!(pearson(&x, &y), 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_pearson_perfect_negative() {
        let x = vec![0.01, 0.02, -0.01];
        let y = vec![-0.01, -0.02, 0.01];
        assert_abs_diff_eq!(pearson(&x, &y), -1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_pearson_constant_series_is_nan() {
        let x = vec![0.0, 0.0, 0.0];
        let y = vec![0.01, 0.02, 0.03];
        assert!(pearson(&x, &y).is_nan());
    }

    #[test]
    fn test_matrix_symmetry_and_diagonal() {
        let series = vec![
            ("Energy".to_string(), vec![0.01, -0.02, 0.03, 0.01]),
            ("Utilities".to_string(), vec![0.02, 0.01, -0.01, 0.00]),
            ("Financials".to_string(), vec![-0.01, 0.02, 0.02, -0.03]),
        ];

        let matrix = CorrelationMatrix::from_series(&series);
        assert_eq!(matrix.len(), 3);

        let values = matrix.values();
        for i in 0..3 {
            assert_abs_diff_eq!(values[[i, i]], 1.0, epsilon = 1e-12);
            for j in 0..3 {
                assert_abs_diff_eq!(values[[i, j]], values[[j, i]], epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_matrix_lookup_by_name() {
        let series = vec![
            ("Energy".to_string(), vec![0.01, -0.02, 0.03]),
            ("Utilities".to_string(), vec![0.01, -0.02, 0.03]),
        ];

        let matrix = CorrelationMatrix::from_series(&series);
        let corr = matrix.get("Energy", "Utilities").unwrap();
        assert_abs_diff_eq!(corr, 1.0, epsilon = 1e-10);
        assert!(matrix.get("Energy", "Materials").is_none());
    }
}
