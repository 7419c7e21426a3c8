//! OpenCredit is a credit-derivatives analytics library: it bootstraps
//! discount and hazard curves from market term structures, prices a small
//! family of credit instruments (single-name CDS, index CDS, total-return
//! swaps, credit-spread options), and derives sensitivities, scenario
//! shocks, and daily PnL attribution by repricing positions under
//! perturbed curves.
//!
//! The curve model is deliberately simple: piecewise-linear interpolation
//! with constant-slope extrapolation, quarterly accrual, a homogeneous
//! index pool with zero default correlation, and a flat financing rate.
//!
//! References used across modules:
//! - Hull, *Options, Futures, and Other Derivatives* (11th ed.), Ch. 24-25
//!   for CDS cashflow identities and hazard-rate bootstrapping.
//! - O'Kane, *Modelling Single-name and Multi-name Credit Derivatives*
//!   (2008) for premium/protection leg decompositions and risky annuities.
//!
//! Numerical considerations:
//! - Survival probabilities integrate the hazard curve by trapezoid on a
//!   100-point grid per query; protection legs use a 100-point default
//!   grid. Fidelity beyond that discretization is not pursued.
//! - The hazard bootstrap is a bounded scalar search with hard iteration
//!   and tolerance limits; pillars that miss tolerance are reported, not
//!   silently accepted.
//! - Curve queries outside the fitted tenor range extrapolate silently.
//!
//! # Quick Start
//! Build curves from quotes and price a CDS:
//! ```rust
//! use opencredit::credit::{Cds, HazardCurveBuilder};
//! use opencredit::rates::DiscountCurveBuilder;
//!
//! let discount =
//!     DiscountCurveBuilder::from_zero_rates(&[(1.0, 0.045), (3.0, 0.047), (5.0, 0.05)]).unwrap();
//! let fit = HazardCurveBuilder::new(&[(1.0, 100.0), (3.0, 150.0), (5.0, 200.0)], discount.clone())
//!     .unwrap()
//!     .build()
//!     .unwrap();
//! assert!(!fit.has_failures());
//!
//! let cds = Cds::new(10_000_000.0, 5.0, 150.0, 0.4, 4);
//! let price = cds.price(&discount, &fit.curve);
//! assert!(price.is_finite());
//! ```
//!
//! Compute parallel sensitivities:
//! ```rust
//! use opencredit::credit::{Cds, CreditInstrument, Pricer};
//! use opencredit::rates::{Curve, DiscountCurveBuilder};
//! use opencredit::risk::SensitivityEngine;
//!
//! let discount = DiscountCurveBuilder::from_zero_rates(&[(1.0, 0.05), (10.0, 0.05)]).unwrap();
//! let hazard = Curve::new(vec![(1.0, 0.02), (10.0, 0.03)]).unwrap();
//! let pricer = Pricer::new(
//!     CreditInstrument::Cds(Cds::new(10_000_000.0, 5.0, 150.0, 0.4, 4)),
//!     discount,
//!     hazard,
//! );
//!
//! let engine = SensitivityEngine::new(pricer).unwrap();
//! let pv01 = engine.compute_pv01(1.0).unwrap();
//! assert!(pv01.ir01 != 0.0 && pv01.cs01 != 0.0);
//! ```

pub mod core;
pub mod credit;
pub mod market;
pub mod math;
pub mod rates;
pub mod risk;

/// Common imports for ergonomic usage.
pub mod prelude {
    pub use crate::core::PricingError;
    pub use crate::credit::*;
    pub use crate::market::*;
    pub use crate::rates::*;
    pub use crate::risk::*;
}
