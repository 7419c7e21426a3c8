//! Credit-spread options priced with Black's model on the forward CDS
//! spread, scaled by an approximate risky annuity.

use std::str::FromStr;

use crate::core::PricingError;
use crate::math::normal_cdf;
use crate::rates::Curve;

/// Option side: payer benefits from spread widening, receiver from
/// tightening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionKind {
    Payer,
    Receiver,
}

impl OptionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Payer => "payer",
            Self::Receiver => "receiver",
        }
    }
}

impl FromStr for OptionKind {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "payer" => Ok(Self::Payer),
            "receiver" => Ok(Self::Receiver),
            other => Err(PricingError::InvalidInput(format!(
                "unknown option kind `{other}`, expected `payer` or `receiver`"
            ))),
        }
    }
}

/// Option on a forward CDS spread.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CreditOption {
    /// Notional amount.
    pub notional: f64,
    /// Strike spread in decimal.
    pub strike: f64,
    /// Option expiry in years.
    pub expiry: f64,
    /// Maturity of the underlying CDS in years.
    pub cds_maturity: f64,
    /// Current forward CDS spread in decimal.
    pub spread: f64,
    /// Lognormal implied volatility of the spread.
    pub volatility: f64,
    /// Payer or receiver.
    pub kind: OptionKind,
}

impl CreditOption {
    /// Creates an option with strike and forward spread quoted in basis
    /// points.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        notional: f64,
        strike_bps: f64,
        expiry: f64,
        cds_maturity: f64,
        spread_bps: f64,
        volatility: f64,
        kind: OptionKind,
    ) -> Self {
        Self {
            notional,
            strike: strike_bps / 10_000.0,
            expiry,
            cds_maturity,
            spread: spread_bps / 10_000.0,
            volatility,
            kind,
        }
    }

    /// Black-model option value in currency.
    ///
    /// Non-positive volatility or forward spread prices to exactly zero;
    /// a non-positive strike or expiry outside that degenerate case is an
    /// input error.
    pub fn price(&self, discount: &Curve) -> Result<f64, PricingError> {
        if self.volatility <= 0.0 || self.spread <= 0.0 {
            return Ok(0.0);
        }
        if self.strike <= 0.0 {
            return Err(PricingError::InvalidInput(format!(
                "strike {} must be positive",
                self.strike
            )));
        }
        if self.expiry <= 0.0 {
            return Err(PricingError::InvalidInput(format!(
                "option expiry {} must be positive",
                self.expiry
            )));
        }

        let t = self.expiry;
        let vol_sqrt_t = self.volatility * t.sqrt();
        let d1 = ((self.spread / self.strike).ln() + 0.5 * self.volatility * self.volatility * t)
            / vol_sqrt_t;
        let d2 = d1 - vol_sqrt_t;

        let undiscounted = match self.kind {
            OptionKind::Payer => self.spread * normal_cdf(d1) - self.strike * normal_cdf(d2),
            OptionKind::Receiver => self.strike * normal_cdf(-d2) - self.spread * normal_cdf(-d1),
        };

        Ok(self.notional * discount.value(t) * undiscounted * self.risky_annuity(discount))
    }

    /// Approximate risky annuity: discount factors summed at annual points
    /// from expiry through the underlying CDS maturity.
    pub fn risky_annuity(&self, discount: &Curve) -> f64 {
        let steps = self.cds_maturity.max(0.0).floor() as usize;
        (1..=steps)
            .map(|k| discount.value(self.expiry + k as f64))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::rates::DiscountCurveBuilder;

    fn discount() -> Curve {
        let quotes: Vec<(f64, f64)> = (1..=12).map(|i| (i as f64, 0.05)).collect();
        DiscountCurveBuilder::from_zero_rates(&quotes).unwrap()
    }

    #[test]
    fn zero_volatility_and_zero_spread_price_to_exactly_zero() {
        let discount = discount();

        let no_vol = CreditOption::new(1.0e7, 100.0, 1.0, 5.0, 120.0, 0.0, OptionKind::Payer);
        assert_eq!(no_vol.price(&discount).unwrap(), 0.0);

        let no_spread = CreditOption::new(1.0e7, 100.0, 1.0, 5.0, 0.0, 0.3, OptionKind::Payer);
        assert_eq!(no_spread.price(&discount).unwrap(), 0.0);
    }

    #[test]
    fn payer_receiver_parity_holds() {
        let discount = discount();
        let payer = CreditOption::new(1.0e7, 100.0, 1.0, 5.0, 140.0, 0.35, OptionKind::Payer);
        let receiver = CreditOption {
            kind: OptionKind::Receiver,
            ..payer.clone()
        };

        let parity = discount.value(1.0)
            * (payer.spread - payer.strike)
            * payer.notional
            * payer.risky_annuity(&discount);

        assert_relative_eq!(
            payer.price(&discount).unwrap() - receiver.price(&discount).unwrap(),
            parity,
            epsilon = 1e-6
        );
    }

    #[test]
    fn in_the_money_payer_is_worth_more_than_intrinsic_discounting_aside() {
        let discount = discount();
        let payer = CreditOption::new(1.0e7, 100.0, 1.0, 5.0, 200.0, 0.35, OptionKind::Payer);
        let price = payer.price(&discount).unwrap();

        assert!(price > 0.0);
        let intrinsic = discount.value(1.0)
            * (payer.spread - payer.strike)
            * payer.notional
            * payer.risky_annuity(&discount);
        assert!(price >= intrinsic * 0.99);
    }

    #[test]
    fn invalid_strike_and_unknown_kind_are_input_errors() {
        let discount = discount();
        let bad = CreditOption::new(1.0e7, 0.0, 1.0, 5.0, 120.0, 0.3, OptionKind::Payer);
        assert!(matches!(
            bad.price(&discount),
            Err(PricingError::InvalidInput(_))
        ));

        assert_eq!("Payer".parse::<OptionKind>().unwrap(), OptionKind::Payer);
        assert!(matches!(
            "straddle".parse::<OptionKind>(),
            Err(PricingError::InvalidInput(_))
        ));
    }

    #[test]
    fn risky_annuity_sums_annual_discount_factors_past_expiry() {
        let discount = discount();
        let option = CreditOption::new(1.0e7, 100.0, 1.0, 5.0, 120.0, 0.3, OptionKind::Payer);

        let expected: f64 = (1..=5).map(|k| discount.value(1.0 + k as f64)).sum();
        assert_relative_eq!(option.risky_annuity(&discount), expected, epsilon = 1e-12);
    }
}
