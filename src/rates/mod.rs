//! Rate-side primitives: the shared piecewise-linear curve type and the
//! discount-factor curve builder.

pub mod curve;
pub mod discount;

pub use curve::Curve;
pub use discount::DiscountCurveBuilder;
