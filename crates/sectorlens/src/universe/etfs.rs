//! Sector universe backed by proxy ETFs.

use crate::universe::sectors::Sector;
use std::collections::HashMap;

/// A single sector→ticker assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectorMapping {
    /// GICS sector.
    pub sector: Sector,
    /// Ticker of the ETF tracking the sector.
    pub symbol: String,
}

impl SectorMapping {
    /// Create a new mapping.
    pub fn new(sector: Sector, symbol: impl Into<String>) -> Self {
        Self {
            sector,
            symbol: symbol.into(),
        }
    }
}

/// The sector→ticker table driving data collection.
///
/// This is explicit configuration rather than process-wide state: a run
/// constructs one universe and passes it to the data pipeline. The
/// default universe maps all 11 GICS sectors to their SPDR ETFs.
#[derive(Debug, Clone)]
pub struct SectorUniverse {
    mappings: Vec<SectorMapping>,
    symbol_by_sector: HashMap<Sector, String>,
}

impl SectorUniverse {
    /// Create the default universe of 11 SPDR sector ETFs.
    pub fn new() -> Self {
        Self::with_mappings(
            Sector::all()
                .into_iter()
                .map(|s| SectorMapping::new(s, s.etf_symbol()))
                .collect(),
        )
    }

    /// Create a universe from an explicit mapping table.
    ///
    /// Useful for substituting alternative proxy funds or restricting a
    /// run to a subset of sectors.
    pub fn with_mappings(mappings: Vec<SectorMapping>) -> Self {
        let symbol_by_sector = mappings
            .iter()
            .map(|m| (m.sector, m.symbol.clone()))
            .collect();

        Self {
            mappings,
            symbol_by_sector,
        }
    }

    /// All mappings, in universe order.
    pub fn mappings(&self) -> &[SectorMapping] {
        &self.mappings
    }

    /// Ticker for a sector, if the sector is in the universe.
    pub fn symbol(&self, sector: Sector) -> Option<&str> {
        self.symbol_by_sector.get(&sector).map(String::as_str)
    }

    /// Sector names, in universe order.
    pub fn sector_names(&self) -> Vec<String> {
        self.mappings
            .iter()
            .map(|m| m.sector.name().to_string())
            .collect()
    }

    /// All tickers, in universe order.
    pub fn symbols(&self) -> Vec<String> {
        self.mappings.iter().map(|m| m.symbol.clone()).collect()
    }

    /// Number of sectors in the universe.
    pub fn size(&self) -> usize {
        self.mappings.len()
    }
}

impl Default for SectorUniverse {
    fn default() -> Self {
        Self::new()
    }
}
