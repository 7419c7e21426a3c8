//! Named scenario shocks applied to the discount and hazard curves of one
//! base pricer, with price deltas reported against the `"base"` scenario.

use std::collections::BTreeMap;

use crate::core::PricingError;
use crate::credit::Pricer;
use crate::math::linspace;
use crate::rates::Curve;

/// Grid used to materialize key-rate-shifted curves.
const KEY_RATE_GRID_POINTS: usize = 200;
/// Years added past the longest listed tenor when building the grid.
const KEY_RATE_GRID_MARGIN: f64 = 5.0;

/// One curve's shock in a scenario: a parallel shift or a per-tenor shift
/// set, never both.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum CurveShift {
    /// Scales every node value by `exp(-shift * tenor)`. `Parallel(0.0)`
    /// leaves the curve untouched.
    Parallel(f64),
    /// Ascending `(tenor, shift)` points; shift factors are interpolated
    /// across the grid and clamped beyond the listed range.
    KeyRate(Vec<(f64, f64)>),
}

impl Default for CurveShift {
    fn default() -> Self {
        Self::Parallel(0.0)
    }
}

/// Price and delta-versus-base for one scenario.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScenarioOutcome {
    pub price: f64,
    /// Price minus the `"base"` scenario's price; absent when no scenario
    /// named `"base"` has been run.
    pub delta: Option<f64>,
}

/// Runs independent, named curve-shock scenarios against one base pricer.
///
/// Scenarios are stored by name and overwritten on rerun; the base pricer
/// and its curves are never modified.
#[derive(Debug, Clone)]
pub struct ScenarioEngine {
    base: Pricer,
    results: BTreeMap<String, f64>,
}

impl ScenarioEngine {
    pub fn new(base: Pricer) -> Self {
        Self {
            base,
            results: BTreeMap::new(),
        }
    }

    /// Applies one shift per curve, reprices a value copy of the base
    /// pricer, and stores the price under `name`.
    pub fn run_scenario(
        &mut self,
        name: impl Into<String>,
        discount_shift: CurveShift,
        hazard_shift: CurveShift,
    ) -> Result<f64, PricingError> {
        let discount = shifted_curve(self.base.discount_curve(), &discount_shift)?;
        let hazard = shifted_curve(self.base.hazard_curve(), &hazard_shift)?;

        let price = self.base.with_curves(discount, hazard).price()?;
        self.results.insert(name.into(), price);
        Ok(price)
    }

    /// Raw scenario prices by name.
    pub fn results(&self) -> &BTreeMap<String, f64> {
        &self.results
    }

    /// Price and delta-versus-`"base"` per scenario.
    pub fn summarize(&self) -> BTreeMap<String, ScenarioOutcome> {
        let base_price = self.results.get("base").copied();
        self.results
            .iter()
            .map(|(name, &price)| {
                (
                    name.clone(),
                    ScenarioOutcome {
                        price,
                        delta: base_price.map(|base| price - base),
                    },
                )
            })
            .collect()
    }
}

fn shifted_curve(curve: &Curve, shift: &CurveShift) -> Result<Curve, PricingError> {
    match shift {
        CurveShift::Parallel(s) => Curve::new(
            curve
                .nodes()
                .iter()
                .map(|&(tenor, value)| (tenor, value * (-s * tenor).exp()))
                .collect(),
        ),
        CurveShift::KeyRate(points) => key_rate_shifted(curve, points),
    }
}

fn key_rate_shifted(curve: &Curve, shifts: &[(f64, f64)]) -> Result<Curve, PricingError> {
    if shifts.is_empty() {
        return Err(PricingError::InvalidInput(
            "key-rate shift requires at least one tenor".into(),
        ));
    }
    if shifts.windows(2).any(|w| w[1].0 <= w[0].0) {
        return Err(PricingError::InvalidInput(
            "key-rate shift tenors must be strictly ascending".into(),
        ));
    }

    let factors: Vec<(f64, f64)> = shifts
        .iter()
        .map(|&(tenor, shift)| (tenor, (-shift * tenor).exp()))
        .collect();
    let max_tenor = shifts[shifts.len() - 1].0;

    let grid = linspace(0.01, max_tenor + KEY_RATE_GRID_MARGIN, KEY_RATE_GRID_POINTS);
    let nodes = grid
        .into_iter()
        .map(|t| (t, curve.value(t) * interp_clamped(&factors, t)))
        .collect();
    Curve::new(nodes)
}

/// Linear interpolation clamped to the end values outside the point range.
fn interp_clamped(points: &[(f64, f64)], t: f64) -> f64 {
    let first = points[0];
    if t <= first.0 {
        return first.1;
    }
    let last = points[points.len() - 1];
    if t >= last.0 {
        return last.1;
    }

    for pair in points.windows(2) {
        let (t1, v1) = pair[0];
        let (t2, v2) = pair[1];
        if t <= t2 {
            return v1 + (v2 - v1) * (t - t1) / (t2 - t1);
        }
    }
    last.1
}
