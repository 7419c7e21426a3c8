use crate::rates::Curve;

use super::{annuity_leg_value, premium_leg_value, survival_probability};

/// Total-return swap on a corporate bond, held to maturity, with a flat
/// financing rate over the tenor.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TotalReturnSwap {
    /// Notional amount.
    pub notional: f64,
    /// Swap maturity in years.
    pub maturity: f64,
    /// TRS spread paid over the financing rate, in decimal per annum.
    pub spread: f64,
    /// Annualized bond coupon in decimal.
    pub coupon_rate: f64,
    /// Recovery rate in `[0, 1)`.
    pub recovery_rate: f64,
    /// Annualized financing rate in decimal.
    pub financing_rate: f64,
    /// Payment frequency per year for both legs.
    pub payment_freq: usize,
}

impl TotalReturnSwap {
    /// Creates a TRS with the spread quoted in basis points.
    pub fn new(
        notional: f64,
        maturity: f64,
        spread_bps: f64,
        coupon_rate: f64,
        recovery_rate: f64,
        financing_rate: f64,
        payment_freq: usize,
    ) -> Self {
        Self {
            notional,
            maturity,
            spread: spread_bps / 10_000.0,
            coupon_rate,
            recovery_rate,
            financing_rate,
            payment_freq,
        }
    }

    /// Expected bond price at time `t`: survival-weighted par plus
    /// default-weighted recovery.
    pub fn expected_bond_price(&self, hazard: &Curve, t: f64) -> f64 {
        let survival = survival_probability(hazard, t);
        survival + (1.0 - survival) * self.recovery_rate
    }

    /// PV of the total-return leg: survival-contingent coupons plus the
    /// discounted expected terminal bond value.
    pub fn total_return_leg_pv(&self, discount: &Curve, hazard: &Curve) -> f64 {
        if !self.is_valid() {
            return 0.0;
        }

        let coupons = premium_leg_value(
            self.notional,
            self.coupon_rate,
            self.maturity,
            self.payment_freq,
            discount,
            hazard,
        );
        let terminal = self.notional
            * discount.value(self.maturity)
            * self.expected_bond_price(hazard, self.maturity);

        coupons + terminal
    }

    /// PV of the financing leg: financing rate plus spread paid on the full
    /// schedule, not survival-contingent.
    pub fn financing_leg_pv(&self, discount: &Curve) -> f64 {
        if !self.is_valid() {
            return 0.0;
        }
        annuity_leg_value(
            self.notional,
            self.financing_rate + self.spread,
            self.maturity,
            self.payment_freq,
            discount,
        )
    }

    /// Swap value to the total-return receiver.
    pub fn price(&self, discount: &Curve, hazard: &Curve) -> f64 {
        self.total_return_leg_pv(discount, hazard) - self.financing_leg_pv(discount)
    }

    fn is_valid(&self) -> bool {
        self.notional > 0.0
            && self.maturity > 0.0
            && self.spread >= 0.0
            && (0.0..1.0).contains(&self.recovery_rate)
            && self.payment_freq > 0
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::rates::DiscountCurveBuilder;

    fn market() -> (Curve, Curve) {
        let quotes: Vec<(f64, f64)> = (1..=40).map(|i| (i as f64 * 0.25, 0.05)).collect();
        let discount = DiscountCurveBuilder::from_zero_rates(&quotes).unwrap();
        let hazard = Curve::new(vec![(1.0, 0.02), (10.0, 0.02)]).unwrap();
        (discount, hazard)
    }

    #[test]
    fn richer_coupon_raises_the_price() {
        let (discount, hazard) = market();
        let base = TotalReturnSwap::new(10_000_000.0, 5.0, 100.0, 0.05, 0.4, 0.03, 4);
        let rich = TotalReturnSwap {
            coupon_rate: 0.06,
            ..base.clone()
        };

        assert!(rich.price(&discount, &hazard) > base.price(&discount, &hazard));
    }

    #[test]
    fn financing_leg_ignores_default_risk() {
        let (discount, _) = market();
        let trs = TotalReturnSwap::new(10_000_000.0, 5.0, 100.0, 0.05, 0.4, 0.03, 4);

        let mut expected = 0.0;
        for i in 1..=20 {
            let t = i as f64 * 0.25;
            expected += discount.value(t) * 0.25;
        }
        expected *= 10_000_000.0 * (0.03 + 0.01);

        assert_relative_eq!(trs.financing_leg_pv(&discount), expected, epsilon = 1e-6);
    }

    #[test]
    fn riskless_bond_terminal_value_is_par() {
        let (discount, _) = market();
        let no_risk = Curve::new(vec![(1.0, 0.0), (10.0, 0.0)]).unwrap();
        let trs = TotalReturnSwap::new(10_000_000.0, 5.0, 100.0, 0.05, 0.4, 0.03, 4);

        assert_relative_eq!(
            trs.expected_bond_price(&no_risk, 5.0),
            1.0,
            epsilon = 1e-12
        );
    }
}
