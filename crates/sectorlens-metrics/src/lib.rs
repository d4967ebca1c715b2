#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/sectorlens/sectorlens/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod correlation;
pub mod engine;
pub mod error;
pub mod returns;

// Re-export main types
pub use correlation::CorrelationMatrix;
pub use engine::{
    DegenerateReason, DegenerateSector, MetricsBundle, TRADING_DAYS_PER_YEAR, compute,
};
pub use error::{MetricsError, Result};
pub use returns::{daily_returns, sector_columns};
