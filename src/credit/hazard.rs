//! Hazard-curve bootstrapping from par CDS spreads.
//!
//! Each pillar solves a flat hazard rate over `[0, tenor]` that zeroes the
//! par CDS value, via a bounded search minimizing `|PV|`. The per-pillar
//! rates are pieced into one interpolated curve. A pillar that misses the
//! fit tolerance keeps the best point found but is reported, never
//! silently accepted.

use crate::core::PricingError;
use crate::math::{linspace, minimize_scalar_bounded};
use crate::rates::Curve;

use super::payment_times;

/// Search bounds for the flat hazard rate.
const HAZARD_LOWER_BOUND: f64 = 1.0e-4;
const HAZARD_UPPER_BOUND: f64 = 0.5;
/// Interval tolerance and iteration cap for the bounded search.
const SEARCH_X_TOL: f64 = 1.0e-11;
const MAX_SEARCH_ITERATIONS: usize = 256;
/// Residual |PV| on unit notional above which a pillar is a fit failure.
const PV_TOLERANCE: f64 = 1.0e-8;
/// Grid resolution for the bootstrap protection leg.
const PROTECTION_GRID_POINTS: usize = 100;
/// Premium payments per year in the par CDS quotes.
const QUOTE_PAYMENT_FREQ: usize = 4;

/// Fit diagnostics for one bootstrap pillar.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PillarFit {
    /// Quote tenor in years.
    pub tenor: f64,
    /// Fitted flat hazard rate.
    pub hazard_rate: f64,
    /// Residual par CDS value on unit notional at the fitted rate.
    pub pv_error: f64,
    /// Whether the search met both the interval and residual tolerances.
    pub converged: bool,
}

/// Bootstrapped hazard curve plus per-pillar diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapResult {
    /// Hazard-rate curve over the quote tenors.
    pub curve: Curve,
    /// One fit record per quote, in tenor order.
    pub pillar_fits: Vec<PillarFit>,
}

impl BootstrapResult {
    /// True when any pillar missed the fit tolerance.
    pub fn has_failures(&self) -> bool {
        self.pillar_fits.iter().any(|fit| !fit.converged)
    }

    /// Pillars that missed the fit tolerance.
    pub fn failed_pillars(&self) -> Vec<&PillarFit> {
        self.pillar_fits.iter().filter(|fit| !fit.converged).collect()
    }
}

/// Bootstraps a hazard-rate curve from ascending par CDS spread quotes.
#[derive(Debug, Clone)]
pub struct HazardCurveBuilder {
    cds_spreads: Vec<(f64, f64)>,
    discount: Curve,
    recovery_rate: f64,
}

impl HazardCurveBuilder {
    /// Creates a builder from `(tenor, spread in bps)` quotes and a
    /// discount curve. Quotes must be non-empty with strictly ascending
    /// positive tenors and non-negative spreads. Recovery defaults to 0.4.
    pub fn new(cds_spreads: &[(f64, f64)], discount: Curve) -> Result<Self, PricingError> {
        if cds_spreads.is_empty() {
            return Err(PricingError::InvalidInput(
                "hazard bootstrap requires at least one spread quote".into(),
            ));
        }
        for &(tenor, spread) in cds_spreads {
            if tenor <= 0.0 || !tenor.is_finite() {
                return Err(PricingError::InvalidInput(format!(
                    "quote tenor {tenor} must be positive"
                )));
            }
            if spread < 0.0 || !spread.is_finite() {
                return Err(PricingError::InvalidInput(format!(
                    "quote spread {spread} must be non-negative"
                )));
            }
        }
        if cds_spreads.windows(2).any(|w| w[1].0 <= w[0].0) {
            return Err(PricingError::InvalidInput(
                "spread quotes must have strictly ascending tenors".into(),
            ));
        }

        Ok(Self {
            cds_spreads: cds_spreads.to_vec(),
            discount,
            recovery_rate: 0.4,
        })
    }

    /// Overrides the assumed recovery rate.
    pub fn with_recovery_rate(mut self, recovery_rate: f64) -> Self {
        self.recovery_rate = recovery_rate;
        self
    }

    /// Fits every pillar and assembles the hazard curve.
    ///
    /// Pillars that miss the residual tolerance are kept at the best point
    /// found, flagged in their [`PillarFit`], and logged.
    pub fn build(&self) -> Result<BootstrapResult, PricingError> {
        let mut pillars = Vec::with_capacity(self.cds_spreads.len());
        let mut pillar_fits = Vec::with_capacity(self.cds_spreads.len());

        for &(tenor, spread_bps) in &self.cds_spreads {
            let spread = spread_bps / 10_000.0;
            let objective = |h: f64| self.flat_hazard_cds_pv(h, tenor, spread).abs();

            let minimum = minimize_scalar_bounded(
                objective,
                HAZARD_LOWER_BOUND,
                HAZARD_UPPER_BOUND,
                SEARCH_X_TOL,
                MAX_SEARCH_ITERATIONS,
            );

            let pv_error = self.flat_hazard_cds_pv(minimum.x, tenor, spread);
            let converged = minimum.converged && pv_error.abs() <= PV_TOLERANCE;
            if !converged {
                log::warn!(
                    "hazard bootstrap missed tolerance at tenor {tenor}: |pv| = {:.3e}",
                    pv_error.abs()
                );
            }

            pillar_fits.push(PillarFit {
                tenor,
                hazard_rate: minimum.x,
                pv_error,
                converged,
            });
            pillars.push((tenor, minimum.x));
        }

        Ok(BootstrapResult {
            curve: Curve::new(pillars)?,
            pillar_fits,
        })
    }

    /// Like [`build`](Self::build), but a pillar that misses the fit
    /// tolerance fails the whole build with a `ConvergenceFailure`.
    pub fn build_strict(&self) -> Result<BootstrapResult, PricingError> {
        let result = self.build()?;
        if let Some(fit) = result.pillar_fits.iter().find(|fit| !fit.converged) {
            return Err(PricingError::ConvergenceFailure(format!(
                "hazard fit at tenor {} missed tolerance, |pv| = {:.3e}",
                fit.tenor,
                fit.pv_error.abs()
            )));
        }
        Ok(result)
    }

    /// Par CDS value on unit notional under a flat hazard rate, with
    /// closed-form survival `exp(-h * t)`.
    fn flat_hazard_cds_pv(&self, hazard: f64, maturity: f64, spread: f64) -> f64 {
        let mut premium = 0.0;
        let mut t_prev = 0.0;
        for t in payment_times(maturity, QUOTE_PAYMENT_FREQ) {
            premium += self.discount.value(t) * (-hazard * t).exp() * (t - t_prev);
            t_prev = t;
        }
        premium *= spread;

        let ts = linspace(0.0, maturity, PROTECTION_GRID_POINTS);
        let mut protection = 0.0;
        for pair in ts.windows(2) {
            let (t0, t1) = (pair[0], pair[1]);
            let default_prob = (-hazard * t0).exp() - (-hazard * t1).exp();
            protection += self.discount.value(0.5 * (t0 + t1)) * default_prob;
        }
        protection *= 1.0 - self.recovery_rate;

        protection - premium
    }
}
