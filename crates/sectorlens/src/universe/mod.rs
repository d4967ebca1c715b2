//! Universe management for sector analysis.
//!
//! This module defines the GICS sector classification and the
//! sector→ETF mapping that drives data collection.

pub mod etfs;
pub mod sectors;

pub use etfs::{SectorMapping, SectorUniverse};
pub use sectors::Sector;

/// Trait for fetchable universes.
pub trait Universe {
    /// Get all symbols in the universe.
    fn symbols(&self) -> Vec<String>;

    /// Check if a symbol is in the universe.
    fn contains(&self, symbol: &str) -> bool {
        self.symbols().contains(&symbol.to_string())
    }

    /// Get the number of constituents.
    fn size(&self) -> usize {
        self.symbols().len()
    }
}

impl Universe for SectorUniverse {
    fn symbols(&self) -> Vec<String> {
        self.symbols()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_universe_trait() {
        let universe = SectorUniverse::new();

        assert!(universe.contains("XLK"));
        assert!(!universe.contains("NOTREAL"));
        assert_eq!(Universe::size(&universe), 11);
    }
}
