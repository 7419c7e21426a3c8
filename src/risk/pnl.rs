//! Daily PnL tracking with linear rate/credit attribution.
//!
//! The tracker is a small state machine: empty, then a base record, then
//! daily records. Its state is the pricer binding for the most recent day;
//! each `record_day` computes a transition `(state, curves) -> (state,
//! record)` so previous and current snapshots are explicit values. Daily
//! PnL splits into `IR_PnL + CS_PnL + Residual`, where the linear terms
//! are the previous day's 1bp Greeks times the average curve shift.

use chrono::NaiveDate;

use crate::core::PricingError;
use crate::credit::Pricer;
use crate::math::linspace;
use crate::rates::Curve;

use super::sensitivity::SensitivityEngine;

/// Grid over which curve shifts are averaged for attribution.
const SHIFT_GRID_START: f64 = 0.01;
const SHIFT_GRID_END: f64 = 30.0;
const SHIFT_GRID_POINTS: usize = 100;
/// Bump size used for the attribution Greeks.
const ATTRIBUTION_BUMP_BP: f64 = 1.0;

/// Linear decomposition of one day's PnL.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PnlAttribution {
    /// Rate-move contribution: IR01 times the average discount shift in bp.
    pub ir_pnl: f64,
    /// Credit-move contribution: CS01 times the average hazard shift in bp.
    pub cs_pnl: f64,
    /// Unexplained remainder; `ir_pnl + cs_pnl + residual` equals the
    /// daily PnL by construction.
    pub residual: f64,
}

/// One dated entry in the PnL history.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PnlRecord {
    pub date: NaiveDate,
    pub price: f64,
    /// Absent on the first record.
    pub daily_pnl: Option<f64>,
    /// Absent on the first record.
    pub attribution: Option<PnlAttribution>,
}

/// Tracks a position's daily prices and attributes the changes.
#[derive(Debug, Clone)]
pub struct PnlTracker {
    pricer: Pricer,
    history: Vec<PnlRecord>,
}

impl PnlTracker {
    pub fn new(pricer: Pricer) -> Self {
        Self {
            pricer,
            history: Vec::new(),
        }
    }

    /// Snapshots a new position as the tracking base, replacing the
    /// tracked pricer and its curves. Valid in any state.
    pub fn record_position(
        &mut self,
        date: NaiveDate,
        pricer: Pricer,
    ) -> Result<f64, PricingError> {
        let price = pricer.price()?;
        self.pricer = pricer;
        self.history.push(PnlRecord {
            date,
            price,
            daily_pnl: None,
            attribution: None,
        });
        Ok(price)
    }

    /// Reprices under the day's curves and appends an attributed record.
    ///
    /// Absent curves fall back to the tracked ones. With no history yet
    /// this behaves as an initial snapshot. The tracked state advances to
    /// today's binding, so the next call diffs day over day.
    pub fn record_day(
        &mut self,
        date: NaiveDate,
        discount: Option<Curve>,
        hazard: Option<Curve>,
    ) -> Result<f64, PricingError> {
        let discount = discount.unwrap_or_else(|| self.pricer.discount_curve().clone());
        let hazard = hazard.unwrap_or_else(|| self.pricer.hazard_curve().clone());

        let (state, record) = self.transition(date, discount, hazard)?;
        let price = record.price;
        self.pricer = state;
        self.history.push(record);
        Ok(price)
    }

    /// Transition function from the current state to today's: the new
    /// state is the pricer rebound to today's curves, the emitted record
    /// carries the attributed PnL against the previous state.
    fn transition(
        &self,
        date: NaiveDate,
        discount: Curve,
        hazard: Curve,
    ) -> Result<(Pricer, PnlRecord), PricingError> {
        let today = self.pricer.with_curves(discount, hazard);
        let price = today.price()?;

        let record = match self.history.last() {
            None => PnlRecord {
                date,
                price,
                daily_pnl: None,
                attribution: None,
            },
            Some(previous) => {
                let greeks = SensitivityEngine::new(self.pricer.clone())?
                    .compute_pv01(ATTRIBUTION_BUMP_BP)?;

                let ir_shift =
                    mean_curve_shift(self.pricer.discount_curve(), today.discount_curve());
                let cs_shift = mean_curve_shift(self.pricer.hazard_curve(), today.hazard_curve());

                let ir_pnl = greeks.ir01 * ir_shift * 10_000.0;
                let cs_pnl = greeks.cs01 * cs_shift * 10_000.0;
                let daily_pnl = price - previous.price;
                let residual = daily_pnl - ir_pnl - cs_pnl;

                PnlRecord {
                    date,
                    price,
                    daily_pnl: Some(daily_pnl),
                    attribution: Some(PnlAttribution {
                        ir_pnl,
                        cs_pnl,
                        residual,
                    }),
                }
            }
        };

        Ok((today, record))
    }

    /// Read-only ordered history.
    pub fn pnl_series(&self) -> &[PnlRecord] {
        &self.history
    }

    /// Latest recorded price, if any.
    pub fn last_price(&self) -> Option<f64> {
        self.history.last().map(|record| record.price)
    }
}

/// Average value difference between two curves over the attribution grid.
fn mean_curve_shift(previous: &Curve, current: &Curve) -> f64 {
    let grid = linspace(SHIFT_GRID_START, SHIFT_GRID_END, SHIFT_GRID_POINTS);
    let sum: f64 = grid
        .iter()
        .map(|&t| current.value(t) - previous.value(t))
        .sum();
    sum / SHIFT_GRID_POINTS as f64
}
