//! Correlation heatmap.

use super::{ChartError, chart_err};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use sectorlens_metrics::MetricsBundle;
use std::path::Path;

const WIDTH: u32 = 1000;
const HEIGHT: u32 = 850;

/// Render the sector-correlation heatmap.
///
/// Cells run blue→white→red for correlations of −1→0→+1 and carry a
/// 2dp annotation.
pub fn render_correlation_heatmap(bundle: &MetricsBundle, path: &Path) -> Result<(), ChartError> {
    let corr = &bundle.correlation;
    if corr.is_empty() {
        return Err(ChartError::Empty(
            "correlation matrix has no sectors".to_string(),
        ));
    }

    let n = corr.len() as i32;
    let sectors = corr.sectors();
    let values = corr.values();

    let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Sector Correlations", ("sans-serif", 24))
        .margin(12)
        .x_label_area_size(140)
        .y_label_area_size(170)
        .build_cartesian_2d((0..n).into_segmented(), (0..n).into_segmented())
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(sectors.len())
        .y_labels(sectors.len())
        .x_label_formatter(&|seg| segment_label(sectors, seg))
        .y_label_formatter(&|seg| segment_label(sectors, seg))
        .label_style(("sans-serif", 13))
        .draw()
        .map_err(chart_err)?;

    let annotation = ("sans-serif", 14)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));

    for i in 0..n {
        for j in 0..n {
            let value = values[[j as usize, i as usize]];

            chart
                .draw_series(std::iter::once(Rectangle::new(
                    [
                        (SegmentValue::Exact(i), SegmentValue::Exact(j)),
                        (SegmentValue::Exact(i + 1), SegmentValue::Exact(j + 1)),
                    ],
                    diverging_color(value).filled(),
                )))
                .map_err(chart_err)?;

            chart
                .draw_series(std::iter::once(Text::new(
                    format!("{:.2}", value),
                    (SegmentValue::CenterOf(i), SegmentValue::CenterOf(j)),
                    annotation.clone(),
                )))
                .map_err(chart_err)?;
        }
    }

    root.present().map_err(chart_err)?;
    Ok(())
}

fn segment_label(sectors: &[String], seg: &SegmentValue<i32>) -> String {
    let idx = match seg {
        SegmentValue::Exact(i) | SegmentValue::CenterOf(i) => *i,
        SegmentValue::Last => return String::new(),
    };

    usize::try_from(idx)
        .ok()
        .and_then(|i| sectors.get(i))
        .cloned()
        .unwrap_or_default()
}

/// Map a correlation in [−1, 1] onto a blue→white→red gradient
/// centered at zero.
pub(crate) fn diverging_color(value: f64) -> RGBColor {
    let t = value.clamp(-1.0, 1.0);

    let blend = |from: u8, to: u8, amount: f64| -> u8 {
        (f64::from(from) + (f64::from(to) - f64::from(from)) * amount).round() as u8
    };

    if t >= 0.0 {
        // white → red
        RGBColor(
            blend(255, 178, t),
            blend(255, 24, t),
            blend(255, 43, t),
        )
    } else {
        // white → blue
        RGBColor(
            blend(255, 33, -t),
            blend(255, 102, -t),
            blend(255, 172, -t),
        )
    }
}
