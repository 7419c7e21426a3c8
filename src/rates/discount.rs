use crate::core::PricingError;
use crate::market::{REFERENCE_TENORS, ReferenceRateSource};

use super::curve::Curve;

/// Builds discount-factor curves from zero-rate quotes.
///
/// Two compounding conventions coexist at different call sites and are kept
/// as distinct named paths: [`from_zero_rates`](Self::from_zero_rates)
/// (continuous, the canonical path) and
/// [`from_deposit_rates`](Self::from_deposit_rates) (simple, the legacy
/// deposit-style path).
pub struct DiscountCurveBuilder;

impl DiscountCurveBuilder {
    /// Builds a curve from `(tenor, zero rate)` quotes under continuous
    /// compounding: `DF(t) = exp(-r * t)`.
    pub fn from_zero_rates(quotes: &[(f64, f64)]) -> Result<Curve, PricingError> {
        require_ascending(quotes)?;
        Curve::new(
            quotes
                .iter()
                .map(|&(tenor, rate)| (tenor, (-rate * tenor).exp()))
                .collect(),
        )
    }

    /// Builds a curve from `(tenor, rate)` quotes under simple compounding:
    /// `DF(t) = 1 / (1 + r * t)`.
    pub fn from_deposit_rates(quotes: &[(f64, f64)]) -> Result<Curve, PricingError> {
        require_ascending(quotes)?;
        Curve::new(
            quotes
                .iter()
                .map(|&(tenor, rate)| (tenor, 1.0 / (1.0 + rate * tenor)))
                .collect(),
        )
    }

    /// Builds a curve by pulling the fixed reference tenor set from an
    /// external rate source, under continuous compounding.
    ///
    /// A tenor whose fetch fails is skipped with a warning; the build only
    /// fails when no tenor resolves at all.
    pub fn from_reference_source(source: &dyn ReferenceRateSource) -> Result<Curve, PricingError> {
        let mut points = Vec::with_capacity(REFERENCE_TENORS.len());
        for (label, tenor) in REFERENCE_TENORS {
            match source.rate(label) {
                Ok(rate) => points.push((tenor, (-rate * tenor).exp())),
                Err(err) => log::warn!("could not fetch reference rate {label}: {err}"),
            }
        }

        if points.is_empty() {
            return Err(PricingError::MarketDataMissing(
                "no reference tenor could be fetched".into(),
            ));
        }
        Curve::new(points)
    }
}

fn require_ascending(quotes: &[(f64, f64)]) -> Result<(), PricingError> {
    if quotes.windows(2).any(|w| w[1].0 <= w[0].0) {
        return Err(PricingError::InvalidInput(
            "rate quotes must have strictly ascending tenors".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    struct FlatSource(f64);

    impl ReferenceRateSource for FlatSource {
        fn rate(&self, _label: &str) -> Result<f64, PricingError> {
            Ok(self.0)
        }
    }

    struct PatchySource;

    impl ReferenceRateSource for PatchySource {
        fn rate(&self, label: &str) -> Result<f64, PricingError> {
            if label == "20Y" {
                Err(PricingError::MarketDataMissing("series offline".into()))
            } else {
                Ok(0.04)
            }
        }
    }

    struct DeadSource;

    impl ReferenceRateSource for DeadSource {
        fn rate(&self, _label: &str) -> Result<f64, PricingError> {
            Err(PricingError::MarketDataMissing("no feed".into()))
        }
    }

    #[test]
    fn continuous_discounting_is_monotone_for_upward_yields() {
        let curve = DiscountCurveBuilder::from_zero_rates(&[
            (1.0, 0.04),
            (2.0, 0.042),
            (5.0, 0.045),
            (10.0, 0.047),
        ])
        .unwrap();

        let tenors = [0.5, 1.0, 2.0, 3.0, 5.0, 7.0, 10.0, 15.0];
        for pair in tenors.windows(2) {
            assert!(curve.value(pair[0]) >= curve.value(pair[1]));
        }
        assert_relative_eq!(curve.value(5.0), (-0.045f64 * 5.0).exp(), epsilon = 1e-12);
    }

    #[test]
    fn compounding_conventions_stay_distinct() {
        let quotes = [(1.0, 0.05), (5.0, 0.05)];
        let continuous = DiscountCurveBuilder::from_zero_rates(&quotes).unwrap();
        let simple = DiscountCurveBuilder::from_deposit_rates(&quotes).unwrap();

        assert_relative_eq!(continuous.value(1.0), (-0.05f64).exp(), epsilon = 1e-12);
        assert_relative_eq!(simple.value(1.0), 1.0 / 1.05, epsilon = 1e-12);
        assert!(continuous.value(1.0) != simple.value(1.0));
    }

    #[test]
    fn unsorted_quotes_are_rejected() {
        let err = DiscountCurveBuilder::from_zero_rates(&[(5.0, 0.05), (1.0, 0.04)]);
        assert!(matches!(err, Err(PricingError::InvalidInput(_))));
    }

    #[test]
    fn reference_fetch_covers_the_fixed_tenor_set() {
        let curve = DiscountCurveBuilder::from_reference_source(&FlatSource(0.05)).unwrap();
        assert_eq!(curve.nodes().len(), REFERENCE_TENORS.len());
        assert_relative_eq!(curve.value(10.0), (-0.05f64 * 10.0).exp(), epsilon = 1e-12);
    }

    #[test]
    fn single_failing_tenor_is_skipped_not_fatal() {
        let curve = DiscountCurveBuilder::from_reference_source(&PatchySource).unwrap();
        assert_eq!(curve.nodes().len(), REFERENCE_TENORS.len() - 1);
        assert!(curve.nodes().iter().all(|&(tenor, _)| tenor != 20.0));
    }

    #[test]
    fn fully_failed_fetch_is_market_data_missing() {
        let err = DiscountCurveBuilder::from_reference_source(&DeadSource);
        assert!(matches!(err, Err(PricingError::MarketDataMissing(_))));
    }
}
