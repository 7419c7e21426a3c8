//! Scalar numeric kernels used by the curve builders and pricers:
//! normal-distribution helpers, uniform grids, trapezoidal integration, and
//! a bounded scalar minimizer.

/// Standard normal probability density.
pub fn normal_pdf(x: f64) -> f64 {
    const INV_SQRT_2PI: f64 = 0.398_942_280_401_432_7;
    INV_SQRT_2PI * (-0.5 * x * x).exp()
}

/// Standard normal cumulative distribution.
pub fn normal_cdf(x: f64) -> f64 {
    // Abramowitz & Stegun 7.1.26
    let z = x.abs();
    let t = 1.0 / (1.0 + 0.231_641_9 * z);
    let poly = t
        * (0.319_381_530
            + t * (-0.356_563_782
                + t * (1.781_477_937 + t * (-1.821_255_978 + t * 1.330_274_429))));
    let approx = 1.0 - normal_pdf(z) * poly;
    if x >= 0.0 { approx } else { 1.0 - approx }
}

/// Uniform grid of `points` values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (points - 1) as f64;
            (0..points)
                .map(|i| {
                    if i == points - 1 {
                        end
                    } else {
                        start + step * i as f64
                    }
                })
                .collect()
        }
    }
}

/// Trapezoidal integral of samples `ys` over abscissae `xs`.
///
/// `xs` and `ys` must have equal length; fewer than two samples integrate
/// to zero.
pub fn trapezoid(xs: &[f64], ys: &[f64]) -> f64 {
    debug_assert_eq!(xs.len(), ys.len());
    xs.windows(2)
        .zip(ys.windows(2))
        .map(|(x, y)| 0.5 * (y[0] + y[1]) * (x[1] - x[0]))
        .sum()
}

/// Outcome of a bounded scalar minimization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundedMinimum {
    /// Abscissa of the best point found.
    pub x: f64,
    /// Objective value at `x`.
    pub f_min: f64,
    /// Iterations consumed.
    pub iterations: usize,
    /// Whether the bracketing interval shrank below `x_tol`.
    pub converged: bool,
}

/// Minimizes a unimodal objective over `[lo, hi]` by golden-section search.
///
/// The search is hard-bounded by `max_iterations`; `converged` reports
/// whether the interval tolerance was actually reached.
pub fn minimize_scalar_bounded<F>(
    objective: F,
    lo: f64,
    hi: f64,
    x_tol: f64,
    max_iterations: usize,
) -> BoundedMinimum
where
    F: Fn(f64) -> f64,
{
    const INV_PHI: f64 = 0.618_033_988_749_894_8;

    let (mut a, mut b) = (lo, hi);
    let mut c = b - INV_PHI * (b - a);
    let mut d = a + INV_PHI * (b - a);
    let mut fc = objective(c);
    let mut fd = objective(d);

    let mut iterations = 0;
    while (b - a) > x_tol && iterations < max_iterations {
        if fc < fd {
            b = d;
            d = c;
            fd = fc;
            c = b - INV_PHI * (b - a);
            fc = objective(c);
        } else {
            a = c;
            c = d;
            fc = fd;
            d = a + INV_PHI * (b - a);
            fd = objective(d);
        }
        iterations += 1;
    }

    let (x, f_min) = if fc < fd { (c, fc) } else { (d, fd) };
    BoundedMinimum {
        x,
        f_min,
        iterations,
        converged: (b - a) <= x_tol,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn normal_cdf_matches_known_values() {
        assert_relative_eq!(normal_cdf(0.0), 0.5, epsilon = 1e-7);
        assert_relative_eq!(normal_cdf(1.96), 0.975, epsilon = 1e-4);
        assert_relative_eq!(normal_cdf(-1.96), 0.025, epsilon = 1e-4);
    }

    #[test]
    fn trapezoid_is_exact_for_linear_integrands() {
        let xs = linspace(0.0, 4.0, 9);
        let ys: Vec<f64> = xs.iter().map(|x| 2.0 * x + 1.0).collect();
        assert_relative_eq!(trapezoid(&xs, &ys), 20.0, epsilon = 1e-12);
    }

    #[test]
    fn linspace_hits_both_endpoints() {
        let grid = linspace(0.01, 30.0, 1000);
        assert_eq!(grid.len(), 1000);
        assert_eq!(grid[0], 0.01);
        assert_eq!(grid[999], 30.0);
    }

    #[test]
    fn golden_section_finds_parabola_minimum() {
        let result = minimize_scalar_bounded(|x| (x - 1.3).powi(2), 0.0, 5.0, 1e-10, 256);
        assert!(result.converged);
        assert_relative_eq!(result.x, 1.3, epsilon = 1e-8);
    }

    #[test]
    fn golden_section_reports_iteration_exhaustion() {
        let result = minimize_scalar_bounded(|x| x.abs(), -1.0, 1.0, 1e-12, 3);
        assert!(!result.converged);
        assert_eq!(result.iterations, 3);
    }
}
