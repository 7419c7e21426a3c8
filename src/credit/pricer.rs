use crate::core::PricingError;
use crate::rates::Curve;

use super::{Cds, CreditOption, IndexCds, TotalReturnSwap};

/// Closed set of priceable credit instruments.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditInstrument {
    Cds(Cds),
    IndexCds(IndexCds),
    TotalReturnSwap(TotalReturnSwap),
    CreditOption(CreditOption),
}

impl CreditInstrument {
    /// Values the instrument under the given curves.
    ///
    /// The credit option only reads the discount curve.
    pub fn price(&self, discount: &Curve, hazard: &Curve) -> Result<f64, PricingError> {
        match self {
            Self::Cds(cds) => Ok(cds.price(discount, hazard)),
            Self::IndexCds(index) => Ok(index.price(discount, hazard)),
            Self::TotalReturnSwap(trs) => Ok(trs.price(discount, hazard)),
            Self::CreditOption(option) => option.price(discount),
        }
    }
}

/// An instrument bound to exactly one discount curve and one hazard curve.
///
/// The binding is immutable: bumped or shocked repricing goes through the
/// `with_*` constructors, which return a value copy with new curves and
/// leave the original untouched. `price` is pure; repeated calls on an
/// unchanged binding are bit-identical.
#[derive(Debug, Clone, PartialEq)]
pub struct Pricer {
    instrument: CreditInstrument,
    discount: Curve,
    hazard: Curve,
}

impl Pricer {
    pub fn new(instrument: CreditInstrument, discount: Curve, hazard: Curve) -> Self {
        Self {
            instrument,
            discount,
            hazard,
        }
    }

    pub fn instrument(&self) -> &CreditInstrument {
        &self.instrument
    }

    pub fn discount_curve(&self) -> &Curve {
        &self.discount
    }

    pub fn hazard_curve(&self) -> &Curve {
        &self.hazard
    }

    /// Values the bound instrument.
    pub fn price(&self) -> Result<f64, PricingError> {
        self.instrument.price(&self.discount, &self.hazard)
    }

    /// Value copy bound to new curves.
    pub fn with_curves(&self, discount: Curve, hazard: Curve) -> Self {
        Self {
            instrument: self.instrument.clone(),
            discount,
            hazard,
        }
    }

    /// Value copy with the discount curve replaced.
    pub fn with_discount_curve(&self, discount: Curve) -> Self {
        self.with_curves(discount, self.hazard.clone())
    }

    /// Value copy with the hazard curve replaced.
    pub fn with_hazard_curve(&self, hazard: Curve) -> Self {
        self.with_curves(self.discount.clone(), hazard)
    }
}
