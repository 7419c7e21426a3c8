//! Credit analytics: hazard-curve bootstrapping, the four credit
//! instruments, and the pricer binding used by the risk engines.
//!
//! All pricers share one leg decomposition. Survival probabilities come
//! from trapezoidal integration of the hazard curve; premium-style legs
//! accumulate over the quarterly payment schedule; protection legs
//! accumulate midpoint-discounted default increments over a dense grid.

use crate::math::{linspace, trapezoid};
use crate::rates::Curve;

pub mod cds;
pub mod cds_index;
pub mod credit_option;
pub mod hazard;
pub mod pricer;
pub mod trs;

pub use cds::Cds;
pub use cds_index::IndexCds;
pub use credit_option::{CreditOption, OptionKind};
pub use hazard::{BootstrapResult, HazardCurveBuilder, PillarFit};
pub use pricer::{CreditInstrument, Pricer};
pub use trs::TotalReturnSwap;

/// Grid resolution for the survival-probability integral.
const SURVIVAL_GRID_POINTS: usize = 100;
/// Grid resolution for protection-leg default increments.
const PROTECTION_GRID_POINTS: usize = 100;

/// Survival probability `S(t) = exp(-integral of h over [0, t])`, with the
/// hazard integral taken by trapezoid over a 100-point grid.
///
/// Recomputed on every call; nothing is cached across calls.
pub fn survival_probability(hazard: &Curve, t: f64) -> f64 {
    if t <= 0.0 {
        return 1.0;
    }
    let ts = linspace(0.0, t, SURVIVAL_GRID_POINTS);
    let hs: Vec<f64> = ts.iter().map(|&s| hazard.value(s)).collect();
    (-trapezoid(&ts, &hs)).exp()
}

/// Payment schedule `dt, 2*dt, ...` ending exactly at `maturity`.
pub(crate) fn payment_times(maturity: f64, payment_freq: usize) -> Vec<f64> {
    if maturity <= 0.0 || payment_freq == 0 {
        return vec![];
    }

    let dt = 1.0 / payment_freq as f64;
    let mut t = 0.0;
    let mut times = Vec::new();
    while t + dt < maturity - 1.0e-12 {
        t += dt;
        times.push(t);
    }
    times.push(maturity);
    times
}

/// PV of a survival-contingent rate stream:
/// `notional * rate * sum of DF(t) * S(t) * dt` over the schedule.
pub(crate) fn premium_leg_value(
    notional: f64,
    annual_rate: f64,
    maturity: f64,
    payment_freq: usize,
    discount: &Curve,
    hazard: &Curve,
) -> f64 {
    let mut leg = 0.0;
    let mut t_prev = 0.0;
    for t in payment_times(maturity, payment_freq) {
        leg += discount.value(t) * survival_probability(hazard, t) * (t - t_prev);
        t_prev = t;
    }
    notional * annual_rate * leg
}

/// PV of default-contingent loss payments:
/// `notional * (1 - R) * sum of DF(mid) * (S(t0) - S(t1))` over the grid.
pub(crate) fn protection_leg_value(
    notional: f64,
    recovery_rate: f64,
    maturity: f64,
    discount: &Curve,
    hazard: &Curve,
) -> f64 {
    if maturity <= 0.0 {
        return 0.0;
    }

    let ts = linspace(0.0, maturity, PROTECTION_GRID_POINTS);
    let mut leg = 0.0;
    let mut survival_prev = 1.0;
    for pair in ts.windows(2) {
        let (t0, t1) = (pair[0], pair[1]);
        let survival = survival_probability(hazard, t1);
        leg += discount.value(0.5 * (t0 + t1)) * (survival_prev - survival);
        survival_prev = survival;
    }
    notional * (1.0 - recovery_rate) * leg
}

/// PV of a non-contingent rate stream:
/// `notional * rate * sum of DF(t) * dt` over the schedule.
pub(crate) fn annuity_leg_value(
    notional: f64,
    annual_rate: f64,
    maturity: f64,
    payment_freq: usize,
    discount: &Curve,
) -> f64 {
    let mut leg = 0.0;
    let mut t_prev = 0.0;
    for t in payment_times(maturity, payment_freq) {
        leg += discount.value(t) * (t - t_prev);
        t_prev = t;
    }
    notional * annual_rate * leg
}
