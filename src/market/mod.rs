//! External-collaborator seams: the reference-rate fetch fallback and the
//! per-date market snapshot store consumed by curve builders and backtests.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::core::PricingError;

/// Fixed reference tenor labels and year fractions used by the discount
/// builder's fetch fallback.
pub const REFERENCE_TENORS: [(&str, f64); 11] = [
    ("1M", 1.0 / 12.0),
    ("3M", 0.25),
    ("6M", 0.5),
    ("1Y", 1.0),
    ("2Y", 2.0),
    ("3Y", 3.0),
    ("5Y", 5.0),
    ("7Y", 7.0),
    ("10Y", 10.0),
    ("20Y", 20.0),
    ("30Y", 30.0),
];

/// External time-series provider supplying the latest zero rate, in
/// decimal, for a reference tenor label such as `"10Y"`.
///
/// No staleness or caching contract is enforced here; disk caching of
/// fetched curves is the collaborator's concern.
pub trait ReferenceRateSource {
    /// Latest rate for `label`, or why it is unavailable.
    fn rate(&self, label: &str) -> Result<f64, PricingError>;
}

/// One date's market observations: treasury zero yields in decimal and CDS
/// par spreads in basis points, both keyed by tenor in years.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MarketSnapshot {
    pub date: NaiveDate,
    pub treasury_yields: Vec<(f64, f64)>,
    pub cds_spreads: Vec<(f64, f64)>,
}

/// In-memory per-date store of market snapshots.
#[derive(Debug, Clone, Default)]
pub struct MarketDataProvider {
    snapshots: BTreeMap<NaiveDate, MarketSnapshot>,
}

impl MarketDataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores (or replaces) the snapshot for `date`.
    pub fn set_market_data(
        &mut self,
        date: NaiveDate,
        treasury_yields: Vec<(f64, f64)>,
        cds_spreads: Vec<(f64, f64)>,
    ) {
        self.snapshots.insert(
            date,
            MarketSnapshot {
                date,
                treasury_yields,
                cds_spreads,
            },
        );
    }

    /// Full snapshot for `date`.
    pub fn snapshot(&self, date: NaiveDate) -> Result<&MarketSnapshot, PricingError> {
        self.snapshots
            .get(&date)
            .ok_or_else(|| PricingError::MarketDataMissing(format!("no snapshot for {date}")))
    }

    /// Treasury yields for `date` as `(tenor, decimal yield)`.
    pub fn treasury_yields(&self, date: NaiveDate) -> Result<&[(f64, f64)], PricingError> {
        Ok(&self.snapshot(date)?.treasury_yields)
    }

    /// CDS spreads for `date` as `(tenor, bps spread)`.
    pub fn cds_spreads(&self, date: NaiveDate) -> Result<&[(f64, f64)], PricingError> {
        Ok(&self.snapshot(date)?.cds_spreads)
    }

    /// All stored dates, ascending.
    pub fn available_dates(&self) -> Vec<NaiveDate> {
        self.snapshots.keys().copied().collect()
    }

    /// All stored snapshots, ascending by date.
    pub fn snapshots(&self) -> impl Iterator<Item = &MarketSnapshot> {
        self.snapshots.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    #[test]
    fn provider_round_trips_snapshots_in_date_order() {
        let mut provider = MarketDataProvider::new();
        provider.set_market_data(date(3), vec![(1.0, 0.045)], vec![(5.0, 120.0)]);
        provider.set_market_data(date(2), vec![(1.0, 0.044)], vec![(5.0, 118.0)]);

        assert_eq!(provider.available_dates(), vec![date(2), date(3)]);
        assert_eq!(provider.treasury_yields(date(3)).unwrap(), &[(1.0, 0.045)]);
        assert_eq!(provider.cds_spreads(date(2)).unwrap(), &[(5.0, 118.0)]);
    }

    #[test]
    fn missing_date_is_market_data_missing() {
        let provider = MarketDataProvider::new();
        assert!(matches!(
            provider.snapshot(date(1)),
            Err(PricingError::MarketDataMissing(_))
        ));
    }
}
