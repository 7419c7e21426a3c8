use crate::rates::Curve;

use super::{premium_leg_value, protection_leg_value};

/// Index CDS over a homogeneous pool with zero default correlation.
///
/// All surviving names share one hazard curve and recovery rate; prior
/// defaults scale the live legs by the surviving-pool factor and contribute
/// an accrued-loss term.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct IndexCds {
    /// Total index notional.
    pub notional: f64,
    /// Contract maturity in years.
    pub maturity: f64,
    /// Fixed index spread in decimal per annum.
    pub spread: f64,
    /// Recovery rate in `[0, 1)`.
    pub recovery_rate: f64,
    /// Number of names in the index.
    pub num_names: usize,
    /// Number of names that have already defaulted.
    pub defaults: usize,
    /// Premium payment frequency per year.
    pub payment_freq: usize,
}

impl IndexCds {
    /// Creates an index CDS with the spread quoted in basis points.
    pub fn new(
        notional: f64,
        maturity: f64,
        index_spread_bps: f64,
        recovery_rate: f64,
        num_names: usize,
        defaults: usize,
        payment_freq: usize,
    ) -> Self {
        Self {
            notional,
            maturity,
            spread: index_spread_bps / 10_000.0,
            recovery_rate,
            num_names,
            defaults,
            payment_freq,
        }
    }

    /// Fraction of the pool still alive.
    pub fn surviving_factor(&self) -> f64 {
        (self.num_names - self.defaults) as f64 / self.num_names as f64
    }

    /// Losses already locked in by prior defaults.
    pub fn accrued_loss(&self) -> f64 {
        self.notional * self.defaults as f64 / self.num_names as f64 * (1.0 - self.recovery_rate)
    }

    /// Contract value: surviving-pool-scaled protection minus premium,
    /// minus accrued losses.
    pub fn price(&self, discount: &Curve, hazard: &Curve) -> f64 {
        if !self.is_valid() {
            return 0.0;
        }

        let factor = self.surviving_factor();
        let protection = protection_leg_value(
            self.notional,
            self.recovery_rate,
            self.maturity,
            discount,
            hazard,
        ) * factor;
        let premium = premium_leg_value(
            self.notional,
            self.spread,
            self.maturity,
            self.payment_freq,
            discount,
            hazard,
        ) * factor;

        protection - premium - self.accrued_loss()
    }

    fn is_valid(&self) -> bool {
        self.notional > 0.0
            && self.spread >= 0.0
            && self.maturity > 0.0
            && (0.0..1.0).contains(&self.recovery_rate)
            && self.num_names > 0
            && self.defaults <= self.num_names
            && self.payment_freq > 0
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::credit::Cds;
    use crate::rates::DiscountCurveBuilder;

    fn market() -> (Curve, Curve) {
        let quotes: Vec<(f64, f64)> = (1..=40).map(|i| (i as f64 * 0.25, 0.05)).collect();
        let discount = DiscountCurveBuilder::from_zero_rates(&quotes).unwrap();
        let hazard = Curve::new(vec![(1.0, 0.02), (10.0, 0.02)]).unwrap();
        (discount, hazard)
    }

    #[test]
    fn undefaulted_index_matches_single_name_cds() {
        let (discount, hazard) = market();

        let index = IndexCds::new(10_000_000.0, 5.0, 150.0, 0.4, 125, 0, 4);
        let single = Cds::new(10_000_000.0, 5.0, 150.0, 0.4, 4);

        assert_relative_eq!(
            index.price(&discount, &hazard),
            single.price(&discount, &hazard),
            epsilon = 1e-9
        );
    }

    #[test]
    fn defaults_scale_legs_and_charge_accrued_losses() {
        let (discount, hazard) = market();

        let clean = IndexCds::new(10_000_000.0, 5.0, 60.0, 0.4, 125, 0, 4);
        let hit = IndexCds {
            defaults: 3,
            ..clean.clone()
        };

        assert_relative_eq!(
            hit.accrued_loss(),
            10_000_000.0 * 3.0 / 125.0 * 0.6,
            epsilon = 1e-9
        );

        let factor = hit.surviving_factor();
        let expected = clean.price(&discount, &hazard) * factor - hit.accrued_loss();
        assert_relative_eq!(hit.price(&discount, &hazard), expected, epsilon = 1e-9);
    }
}
