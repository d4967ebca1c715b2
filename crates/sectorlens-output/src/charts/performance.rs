//! Cumulative-performance line chart.

use super::{ChartError, chart_err};
use chrono::{Duration, NaiveDate};
use plotters::prelude::*;
use polars::prelude::*;
use sectorlens_metrics::{MetricsBundle, sector_columns};
use std::path::Path;

const WIDTH: u32 = 1200;
const HEIGHT: u32 = 600;

/// Render the growth-of-one-dollar comparison across sectors.
pub fn render_performance(bundle: &MetricsBundle, path: &Path) -> Result<(), ChartError> {
    let table = &bundle.cumulative_returns;
    let sectors = sector_columns(table);
    if sectors.is_empty() {
        return Err(ChartError::Empty(
            "cumulative-return table has no sectors".to_string(),
        ));
    }

    let dates = date_values(table)?;
    if dates.len() < 2 {
        return Err(ChartError::Empty(
            "cumulative-return table has fewer than 2 dates".to_string(),
        ));
    }

    let mut series = Vec::with_capacity(sectors.len());
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for sector in &sectors {
        let values: Vec<f64> = table
            .column(sector)?
            .as_materialized_series()
            .f64()?
            .into_no_null_iter()
            .collect();
        for &v in &values {
            y_min = y_min.min(v);
            y_max = y_max.max(v);
        }
        series.push((sector.clone(), values));
    }

    let pad = ((y_max - y_min) * 0.05).max(1e-3);
    let (y_min, y_max) = (y_min - pad, y_max + pad);

    let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Sector Performance Comparison", ("sans-serif", 24))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(dates[0]..dates[dates.len() - 1], y_min..y_max)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Cumulative Return $")
        .draw()
        .map_err(chart_err)?;

    for (idx, (sector, values)) in series.iter().enumerate() {
        let color = Palette99::pick(idx).mix(0.9);
        chart
            .draw_series(LineSeries::new(
                dates.iter().copied().zip(values.iter().copied()),
                color.stroke_width(2),
            ))
            .map_err(chart_err)?
            .label(sector.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(2))
            });
    }

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    Ok(())
}

/// Extract the `date` column as chrono dates.
pub(crate) fn date_values(table: &DataFrame) -> Result<Vec<NaiveDate>, ChartError> {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).expect("valid epoch date");

    table
        .column("date")?
        .cast(&DataType::Int32)?
        .as_materialized_series()
        .i32()?
        .into_iter()
        .map(|days| {
            days.map(|d| epoch + Duration::days(i64::from(d)))
                .ok_or_else(|| {
                    ChartError::InvalidData("null date in cumulative-return table".to_string())
                })
        })
        .collect()
}
