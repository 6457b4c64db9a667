//! Spherical variogram model and its bounded least-squares fit.
//!
//! ## Purpose
//!
//! This module evaluates the spherical variogram model and fits its range and
//! sill to empirical semivariances with a projected Levenberg-Marquardt
//! iteration.
//!
//! ## Key concepts
//!
//! * **Model**: `gamma(h) = nugget + sill * (1.5 h/r - 0.5 (h/r)^3)` for `h <= r`,
//!   `nugget + sill` beyond the range `r`.
//! * **Bounds**: `0 <= r <= max(lags)` and `0 <= sill <= max(semivariance)`;
//!   the iteration starts from the upper bounds.
//! * **Nugget**: Held fixed (default zero), never fitted.
//!
//! ## Invariants
//!
//! * A returned model always lies inside the bounds.
//! * Non-convergence is an error, never a silently defaulted range.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::SpacvError;

/// Maximum number of accepted or rejected Levenberg-Marquardt steps.
const MAX_ITERATIONS: usize = 200;

/// Relative cost decrease below which the fit has converged.
const FTOL: f64 = 1e-12;

/// Relative parameter change below which the fit has converged.
const XTOL: f64 = 1e-12;

/// Damping beyond which no descent step exists inside the bounds.
const MAX_DAMPING: f64 = 1e16;

// ============================================================================
// Model
// ============================================================================

/// Fitted spherical variogram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalModel<T> {
    /// Effective range of spatial autocorrelation.
    pub range: T,
    /// Partial sill.
    pub sill: T,
    /// Nugget (fixed).
    pub nugget: T,
}

impl<T: Float> SphericalModel<T> {
    /// Semivariance predicted at lag `h`.
    pub fn evaluate(&self, h: T) -> T {
        spherical(h, self.range, self.sill, self.nugget)
    }
}

#[inline]
fn spherical<T: Float>(h: T, range: T, sill: T, nugget: T) -> T {
    if range > T::zero() && h <= range {
        let u = h / range;
        let a = T::from(1.5).unwrap_or_else(T::nan);
        let b = T::from(0.5).unwrap_or_else(T::nan);
        nugget + sill * (a * u - b * u * u * u)
    } else {
        nugget + sill
    }
}

/// Partial derivatives `(d/d range, d/d sill)` at lag `h`.
#[inline]
fn gradient<T: Float>(h: T, range: T, sill: T) -> (T, T) {
    if range > T::zero() && h <= range {
        let u = h / range;
        let a = T::from(1.5).unwrap_or_else(T::nan);
        let b = T::from(0.5).unwrap_or_else(T::nan);
        let d_sill = a * u - b * u * u * u;
        let d_range = sill * a / range * (u * u * u - u);
        (d_range, d_sill)
    } else {
        (T::zero(), T::one())
    }
}

// ============================================================================
// Fit
// ============================================================================

fn cost<T: Float>(lags: &[T], sv: &[T], range: T, sill: T, nugget: T) -> T {
    lags.iter().zip(sv.iter()).fold(T::zero(), |acc, (&h, &g)| {
        let r = spherical(h, range, sill, nugget) - g;
        acc + r * r
    })
}

/// Fit range and sill of a spherical model to `(lag, semivariance)` samples.
pub fn fit_spherical<T: Float>(
    lags: &[T],
    semivariances: &[T],
    nugget: T,
) -> Result<SphericalModel<T>, SpacvError> {
    if lags.len() != semivariances.len() {
        return Err(SpacvError::MismatchedInputs {
            expected: lags.len(),
            got: semivariances.len(),
        });
    }
    if lags.len() < 2 {
        return Err(SpacvError::TooFewInstances {
            got: lags.len(),
            min: 2,
        });
    }
    if lags
        .iter()
        .chain(semivariances.iter())
        .any(|v| !v.is_finite())
        || !nugget.is_finite()
    {
        return Err(SpacvError::InvalidNumericValue(
            "lags, semivariances and nugget must be finite".to_string(),
        ));
    }

    let max_lag = lags.iter().fold(T::neg_infinity(), |m, &v| m.max(v));
    let max_sv = semivariances
        .iter()
        .fold(T::neg_infinity(), |m, &v| m.max(v));
    if max_lag <= T::zero() || max_sv <= T::zero() {
        return Err(SpacvError::FitFailed {
            iterations: 0,
            reason: format!(
                "empty parameter bounds (max lag {}, max semivariance {})",
                max_lag.to_f64().unwrap_or(f64::NAN),
                max_sv.to_f64().unwrap_or(f64::NAN)
            ),
        });
    }

    let eps = T::from(1e-9).unwrap_or_else(T::epsilon);
    let lower = [max_lag * eps, T::zero()];
    let upper = [max_lag, max_sv];
    let clamp = |p: [T; 2]| [p[0].max(lower[0]).min(upper[0]), p[1].max(lower[1]).min(upper[1])];

    let ftol = T::from(FTOL).unwrap_or_else(T::epsilon);
    let xtol = T::from(XTOL).unwrap_or_else(T::epsilon);
    let max_damping = T::from(MAX_DAMPING).unwrap_or_else(T::max_value);
    let ten = T::from(10.0).unwrap_or_else(T::nan);

    let mut p = upper;
    let mut c = cost(lags, semivariances, p[0], p[1], nugget);
    let mut damping = T::from(1e-3).unwrap_or_else(T::epsilon);

    for iteration in 0..MAX_ITERATIONS {
        if !c.is_finite() {
            return Err(SpacvError::FitFailed {
                iterations: iteration,
                reason: "cost is not finite".to_string(),
            });
        }
        if c == T::zero() {
            return Ok(SphericalModel {
                range: p[0],
                sill: p[1],
                nugget,
            });
        }

        // Normal equations J^T J and J^T r
        let (mut a00, mut a01, mut a11) = (T::zero(), T::zero(), T::zero());
        let (mut g0, mut g1) = (T::zero(), T::zero());
        for (&h, &g) in lags.iter().zip(semivariances.iter()) {
            let r = spherical(h, p[0], p[1], nugget) - g;
            let (j0, j1) = gradient(h, p[0], p[1]);
            a00 = a00 + j0 * j0;
            a01 = a01 + j0 * j1;
            a11 = a11 + j1 * j1;
            g0 = g0 + j0 * r;
            g1 = g1 + j1 * r;
        }

        // A parameter on a bound whose descent direction leaves the box is frozen
        let pinned = |i: usize, g: T| {
            (p[i] <= lower[i] && g > T::zero()) || (p[i] >= upper[i] && g < T::zero())
        };
        let (fix_range, fix_sill) = (pinned(0, g0), pinned(1, g1));
        if fix_range && fix_sill {
            log::debug!("spherical fit pinned to a corner after {} iterations", iteration);
            return Ok(SphericalModel {
                range: p[0],
                sill: p[1],
                nugget,
            });
        }

        // Inner loop: raise damping until a step lowers the cost
        loop {
            let d00 = a00 + damping * a00.max(ftol);
            let d11 = a11 + damping * a11.max(ftol);
            let det = if fix_range {
                d11
            } else if fix_sill {
                d00
            } else {
                d00 * d11 - a01 * a01
            };
            if det == T::zero() || !det.is_finite() {
                damping = damping * ten;
            } else {
                let step = if fix_range {
                    [T::zero(), -g1 / d11]
                } else if fix_sill {
                    [-g0 / d00, T::zero()]
                } else {
                    [(-g0 * d11 + g1 * a01) / det, (-g1 * d00 + g0 * a01) / det]
                };
                let candidate = clamp([p[0] + step[0], p[1] + step[1]]);
                let c_new = cost(lags, semivariances, candidate[0], candidate[1], nugget);
                if c_new.is_finite() && c_new < c {
                    let moved = (candidate[0] - p[0]).hypot(candidate[1] - p[1]);
                    let scale = p[0].hypot(p[1]);
                    let decrease = c - c_new;
                    p = candidate;
                    c = c_new;
                    damping = damping / ten;
                    if decrease <= ftol * c || moved <= xtol * (scale + xtol) {
                        log::debug!("spherical fit converged after {} iterations", iteration + 1);
                        return Ok(SphericalModel {
                            range: p[0],
                            sill: p[1],
                            nugget,
                        });
                    }
                    break;
                }
                damping = damping * ten;
            }
            if damping > max_damping {
                // No descent direction inside the bounds: stationary point
                log::debug!("spherical fit stationary after {} iterations", iteration + 1);
                return Ok(SphericalModel {
                    range: p[0],
                    sill: p[1],
                    nugget,
                });
            }
        }
    }

    Err(SpacvError::FitFailed {
        iterations: MAX_ITERATIONS,
        reason: "maximum number of iterations reached".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_saturates_at_range() {
        let m = SphericalModel {
            range: 10.0,
            sill: 2.0,
            nugget: 0.5,
        };
        assert_eq!(m.evaluate(0.0), 0.5);
        assert!((m.evaluate(10.0) - 2.5).abs() < 1e-12);
        assert_eq!(m.evaluate(25.0), 2.5);
    }

    #[test]
    fn analytic_gradient_matches_finite_difference() {
        let (h, r, s) = (3.0, 8.0, 1.7);
        let (dr, ds) = gradient(h, r, s);
        let e = 1e-6;
        let fd_r = (spherical(h, r + e, s, 0.0) - spherical(h, r - e, s, 0.0)) / (2.0 * e);
        let fd_s = (spherical(h, r, s + e, 0.0) - spherical(h, r, s - e, 0.0)) / (2.0 * e);
        assert!((dr - fd_r).abs() < 1e-6);
        assert!((ds - fd_s).abs() < 1e-6);
    }

    #[test]
    fn zero_semivariances_cannot_be_fitted() {
        let err = fit_spherical(&[1.0, 2.0, 3.0], &[0.0, 0.0, 0.0], 0.0).unwrap_err();
        assert!(matches!(err, SpacvError::FitFailed { .. }));
    }
}
