#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/sectorlens/sectorlens/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod charts;
pub mod report;

pub use charts::{
    ChartError, render_all, render_correlation_heatmap, render_performance, render_risk_return,
};
pub use report::{ReportError, format_report, write_report};
