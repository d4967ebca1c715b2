//! Risk/return scatter.

use super::{ChartError, chart_err};
use plotters::prelude::*;
use sectorlens_metrics::MetricsBundle;
use std::path::Path;

const WIDTH: u32 = 1400;
const HEIGHT: u32 = 800;

struct ScatterPoint {
    sector: String,
    volatility: f64,
    annual_return: f64,
    sharpe: f64,
}

/// Render the volatility-vs-annual-return scatter, one labeled point
/// per sector with its Sharpe ratio.
pub fn render_risk_return(bundle: &MetricsBundle, path: &Path) -> Result<(), ChartError> {
    let points: Vec<ScatterPoint> = bundle
        .sharpe_ratio
        .iter()
        .filter_map(|(sector, &sharpe)| {
            let (annual_return, volatility, _) = bundle.scalar_metrics(sector)?;
            Some(ScatterPoint {
                sector: sector.clone(),
                volatility,
                annual_return,
                sharpe,
            })
        })
        .collect();

    if points.is_empty() {
        return Err(ChartError::Empty(
            "no sector has a full set of scalar metrics".to_string(),
        ));
    }

    let (x_min, x_max) = padded_range(points.iter().map(|p| p.volatility));
    let (y_min, y_max) = padded_range(points.iter().map(|p| p.annual_return));

    let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Risk-Return Analysis by Sector", ("sans-serif", 24))
        .margin(12)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_desc("Volatility (Risk)")
        .y_desc("Annual Return")
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(points.iter().map(|p| {
            EmptyElement::at((p.volatility, p.annual_return))
                + Circle::new((0, 0), 6, BLUE.filled())
                + Text::new(p.sector.clone(), (10, -22), ("sans-serif", 14).into_font())
                + Text::new(
                    format!("Sharpe: {:.2}", p.sharpe),
                    (10, -6),
                    ("sans-serif", 12).into_font().color(&RGBColor(96, 96, 96)),
                )
        }))
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    Ok(())
}

/// Min/max of a sample with a 10% margin, widened when degenerate.
fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        min = min.min(v);
        max = max.max(v);
    }

    let pad = ((max - min) * 0.10).max(0.01);
    (min - pad, max + pad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::test_support::sample_bundle;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_padded_range_widens_single_point() {
        let (min, max) = padded_range([0.5].into_iter());
        assert!(min < 0.5);
        assert!(max > 0.5);
        assert_abs_diff_eq!(max - min, 0.02, epsilon = 1e-12);
    }

    #[test]
    fn test_render_risk_return_writes_png() {
        let bundle = sample_bundle();
        let path = std::env::temp_dir().join("sectorlens_risk_return_test.png");

        render_risk_return(&bundle, &path).unwrap();

        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);

        std::fs::remove_file(&path).ok();
    }
}
