use crate::rates::Curve;

use super::{premium_leg_value, protection_leg_value};

/// Single-name running-spread CDS from the protection buyer's perspective.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Cds {
    /// Notional amount.
    pub notional: f64,
    /// Contract maturity in years.
    pub maturity: f64,
    /// Running spread in decimal per annum (e.g. 0.01 for 100 bps).
    pub spread: f64,
    /// Recovery rate in `[0, 1)`.
    pub recovery_rate: f64,
    /// Premium payment frequency per year.
    pub payment_freq: usize,
}

impl Cds {
    /// Creates a CDS with the spread quoted in basis points.
    pub fn new(
        notional: f64,
        maturity: f64,
        spread_bps: f64,
        recovery_rate: f64,
        payment_freq: usize,
    ) -> Self {
        Self {
            notional,
            maturity,
            spread: spread_bps / 10_000.0,
            recovery_rate,
            payment_freq,
        }
    }

    /// Present value of the premium leg.
    pub fn premium_leg_pv(&self, discount: &Curve, hazard: &Curve) -> f64 {
        if !self.is_valid() {
            return 0.0;
        }
        premium_leg_value(
            self.notional,
            self.spread,
            self.maturity,
            self.payment_freq,
            discount,
            hazard,
        )
    }

    /// Present value of the protection leg.
    pub fn protection_leg_pv(&self, discount: &Curve, hazard: &Curve) -> f64 {
        if !self.is_valid() {
            return 0.0;
        }
        protection_leg_value(
            self.notional,
            self.recovery_rate,
            self.maturity,
            discount,
            hazard,
        )
    }

    /// Contract value, protection leg minus premium leg.
    pub fn price(&self, discount: &Curve, hazard: &Curve) -> f64 {
        self.protection_leg_pv(discount, hazard) - self.premium_leg_pv(discount, hazard)
    }

    /// Fair running spread that sets the contract value to zero.
    pub fn fair_spread(&self, discount: &Curve, hazard: &Curve) -> f64 {
        if !self.is_valid() {
            return 0.0;
        }

        let unit_annuity = premium_leg_value(
            self.notional,
            1.0,
            self.maturity,
            self.payment_freq,
            discount,
            hazard,
        );
        if unit_annuity <= 1.0e-14 {
            0.0
        } else {
            self.protection_leg_pv(discount, hazard) / unit_annuity
        }
    }

    fn is_valid(&self) -> bool {
        self.notional > 0.0
            && self.spread >= 0.0
            && self.maturity > 0.0
            && (0.0..1.0).contains(&self.recovery_rate)
            && self.payment_freq > 0
    }
}
