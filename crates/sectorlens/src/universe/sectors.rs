//! GICS (Global Industry Classification Standard) sector definitions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// GICS Level 1 sectors (11 sectors).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sector {
    /// Information Technology
    InformationTechnology,

    /// Health Care
    HealthCare,

    /// Financials
    Financials,

    /// Consumer Discretionary
    ConsumerDiscretionary,

    /// Communication Services
    CommunicationServices,

    /// Industrials
    Industrials,

    /// Consumer Staples
    ConsumerStaples,

    /// Energy
    Energy,

    /// Utilities
    Utilities,

    /// Real Estate
    RealEstate,

    /// Materials
    Materials,
}

impl Sector {
    /// Returns all GICS sectors.
    pub fn all() -> Vec<Self> {
        vec![
            Self::InformationTechnology,
            Self::HealthCare,
            Self::Financials,
            Self::ConsumerDiscretionary,
            Self::CommunicationServices,
            Self::Industrials,
            Self::ConsumerStaples,
            Self::Energy,
            Self::Utilities,
            Self::RealEstate,
            Self::Materials,
        ]
    }

    /// Returns the full sector name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::InformationTechnology => "Information Technology",
            Self::HealthCare => "Health Care",
            Self::Financials => "Financials",
            Self::ConsumerDiscretionary => "Consumer Discretionary",
            Self::CommunicationServices => "Communication Services",
            Self::Industrials => "Industrials",
            Self::ConsumerStaples => "Consumer Staples",
            Self::Energy => "Energy",
            Self::Utilities => "Utilities",
            Self::RealEstate => "Real Estate",
            Self::Materials => "Materials",
        }
    }

    /// Returns the ticker of the SPDR ETF that proxies this sector.
    pub const fn etf_symbol(&self) -> &'static str {
        match self {
            Self::InformationTechnology => "XLK",
            Self::HealthCare => "XLV",
            Self::Financials => "XLF",
            Self::ConsumerDiscretionary => "XLY",
            Self::CommunicationServices => "XLC",
            Self::Industrials => "XLI",
            Self::ConsumerStaples => "XLP",
            Self::Energy => "XLE",
            Self::Utilities => "XLU",
            Self::RealEstate => "XLRE",
            Self::Materials => "XLB",
        }
    }

    /// Parse a sector from its proxy ETF ticker.
    pub fn from_etf_symbol(symbol: &str) -> Option<Self> {
        Self::all().into_iter().find(|s| s.etf_symbol() == symbol)
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_sectors() {
        let sectors = Sector::all();
        assert_eq!(sectors.len(), 11);
    }

    #[test]
    fn test_etf_symbols_unique() {
        let mut symbols: Vec<_> = Sector::all().iter().map(|s| s.etf_symbol()).collect();
        symbols.sort_unstable();
        symbols.dedup();
        assert_eq!(symbols.len(), 11);
    }

    #[test]
    fn test_from_etf_symbol() {
        assert_eq!(
            Sector::from_etf_symbol("XLK"),
            Some(Sector::InformationTechnology)
        );
        assert_eq!(Sector::from_etf_symbol("XLE"), Some(Sector::Energy));
        assert_eq!(Sector::from_etf_symbol("SPY"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            format!("{}", Sector::InformationTechnology),
            "Information Technology"
        );
        assert_eq!(format!("{}", Sector::Energy), "Energy");
    }
}
