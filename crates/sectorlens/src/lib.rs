#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/sectorlens/sectorlens/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod universe;

// Re-export main types from sub-crates
pub use sectorlens_data as data;
pub use sectorlens_metrics as metrics;
pub use sectorlens_output as output;

// Re-export common universe types
pub use universe::{Sector, SectorMapping, SectorUniverse, Universe};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
