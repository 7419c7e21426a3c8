use crate::core::PricingError;

/// Piecewise-linear term structure keyed by tenor in years.
///
/// One shared value type backs both curve flavors: discount factors (values
/// in `(0, 1]`) and hazard rates (values `>= 0`). Queries inside the node
/// range interpolate linearly; queries outside extend the first or last
/// segment at constant slope. A single-node curve is flat.
///
/// Curves are immutable: bumping or shifting always produces a new `Curve`.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    nodes: Vec<(f64, f64)>,
}

impl Curve {
    /// Creates a curve from `(tenor, value)` nodes.
    ///
    /// Nodes must be non-empty, finite, with positive and strictly
    /// ascending tenors.
    pub fn new(nodes: Vec<(f64, f64)>) -> Result<Self, PricingError> {
        if nodes.is_empty() {
            return Err(PricingError::InvalidInput(
                "curve requires at least one node".into(),
            ));
        }
        for (tenor, value) in &nodes {
            if !tenor.is_finite() || !value.is_finite() {
                return Err(PricingError::InvalidInput(format!(
                    "curve node ({tenor}, {value}) is not finite"
                )));
            }
            if *tenor <= 0.0 {
                return Err(PricingError::InvalidInput(format!(
                    "curve tenor {tenor} must be positive"
                )));
            }
        }
        if nodes.windows(2).any(|w| w[1].0 <= w[0].0) {
            return Err(PricingError::InvalidInput(
                "curve tenors must be strictly ascending".into(),
            ));
        }
        Ok(Self { nodes })
    }

    /// Curve nodes as `(tenor, value)`, ascending in tenor.
    pub fn nodes(&self) -> &[(f64, f64)] {
        &self.nodes
    }

    /// Shortest fitted tenor.
    pub fn first_tenor(&self) -> f64 {
        self.nodes[0].0
    }

    /// Longest fitted tenor.
    pub fn last_tenor(&self) -> f64 {
        self.nodes[self.nodes.len() - 1].0
    }

    /// Value at tenor `t`.
    ///
    /// Outside the fitted range this extrapolates silently; callers needing
    /// strict bounds must check `first_tenor`/`last_tenor` themselves.
    pub fn value(&self, t: f64) -> f64 {
        let nodes = &self.nodes;
        let n = nodes.len();
        if n == 1 {
            return nodes[0].1;
        }

        // Segment whose right node is the first tenor >= t, clamped so the
        // end segments also serve as extrapolation slopes.
        let right = nodes
            .partition_point(|(tenor, _)| *tenor < t)
            .clamp(1, n - 1);
        let (t1, v1) = nodes[right - 1];
        let (t2, v2) = nodes[right];
        v1 + (v2 - v1) * (t - t1) / (t2 - t1)
    }
}
