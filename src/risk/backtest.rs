//! Historical backtesting: rebuild curves per dated snapshot, hold one
//! position, and accumulate the attributed PnL series.

use crate::core::PricingError;
use crate::credit::{CreditInstrument, HazardCurveBuilder, Pricer};
use crate::market::MarketSnapshot;
use crate::rates::{Curve, DiscountCurveBuilder};

use super::pnl::{PnlRecord, PnlTracker};

/// Replays a position over a sequence of market snapshots.
///
/// Snapshots are processed strictly in the order supplied; attribution is
/// sequential, so no resorting happens here.
#[derive(Debug, Clone)]
pub struct Backtester {
    recovery_rate: f64,
}

impl Default for Backtester {
    fn default() -> Self {
        Self { recovery_rate: 0.4 }
    }
}

impl Backtester {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the recovery rate assumed by the hazard bootstrap.
    pub fn with_recovery_rate(mut self, recovery_rate: f64) -> Self {
        self.recovery_rate = recovery_rate;
        self
    }

    /// Runs the backtest, choosing the instrument from the first snapshot
    /// via `strategy`. Later snapshots only reprice the held position.
    pub fn run<F>(
        &self,
        snapshots: &[MarketSnapshot],
        strategy: F,
    ) -> Result<Vec<PnlRecord>, PricingError>
    where
        F: FnOnce(&MarketSnapshot) -> CreditInstrument,
    {
        let Some((first, rest)) = snapshots.split_first() else {
            return Err(PricingError::MarketDataMissing(
                "backtest requires at least one snapshot".into(),
            ));
        };

        let (discount, hazard) = self.build_curves(first)?;
        let pricer = Pricer::new(strategy(first), discount, hazard);
        let mut tracker = PnlTracker::new(pricer.clone());
        tracker.record_position(first.date, pricer)?;

        for snapshot in rest {
            let (discount, hazard) = self.build_curves(snapshot)?;
            tracker.record_day(snapshot.date, Some(discount), Some(hazard))?;
        }

        Ok(tracker.pnl_series().to_vec())
    }

    /// Runs the backtest holding fixed instrument terms.
    pub fn run_fixed(
        &self,
        snapshots: &[MarketSnapshot],
        instrument: &CreditInstrument,
    ) -> Result<Vec<PnlRecord>, PricingError> {
        self.run(snapshots, |_| instrument.clone())
    }

    fn build_curves(&self, snapshot: &MarketSnapshot) -> Result<(Curve, Curve), PricingError> {
        let discount = DiscountCurveBuilder::from_zero_rates(&snapshot.treasury_yields)?;
        let fit = HazardCurveBuilder::new(&snapshot.cds_spreads, discount.clone())?
            .with_recovery_rate(self.recovery_rate)
            .build()?;
        Ok((discount, fit.curve))
    }
}
