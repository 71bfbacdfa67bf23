//! The true polar angle `Beta` that corresponds to a polar parameter
//! `Alpha`, and the closed-form angle estimates it is compared against.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use std::f64::consts::PI;

use glam::DVec2;

use crate::{geometry::check_axes, uell_point, EllipseError};

/// The true polar angle at `alpha`: `atan2(sin_uell, cos_uell)`, in `(−π, π]`.
///
/// # Example
/// ```
/// use orbital_ellipse::beta_at;
///
/// // On a circle the two angles coincide.
/// assert!((beta_at(1.2, 1.0).unwrap() - 1.2).abs() < 1e-15);
/// ```
pub fn beta_at(alpha: f64, ue: f64) -> Result<f64, EllipseError> {
    let point = uell_point(alpha, ue)?;
    Ok(point.y.atan2(point.x))
}

/// The closed-form guess `π − asin(b/a)` for the mean-velocity angle.
pub fn theoretical_alpha(a: f64, b: f64) -> Result<f64, EllipseError> {
    check_axes(a, b)?;
    Ok(PI - (b / a).asin())
}

/// The two closed-form Beta estimates of [`beta_fx`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BetaProjection {
    /// `π − asin(b/a)`.
    pub beta_calc: f64,
    /// The angle of the point `(cos(beta_calc), (b/a) sin(beta_calc))`,
    /// in `(−π, π]`.
    pub beta_calc1: f64,
}

/// Projects the angle `π − asin(b/a)` onto the ellipse.
///
/// The point at that angle on the unit circle is squashed vertically by
/// `b/a`, and its polar angle is read back with `atan2`.
///
/// # Errors
/// Fails unless `a >= b > 0`.
///
/// # Example
/// ```
/// use orbital_ellipse::beta_fx;
///
/// let circle = beta_fx(1.0, 1.0).unwrap();
/// let half_pi = std::f64::consts::FRAC_PI_2;
/// assert!((circle.beta_calc - half_pi).abs() < 1e-15);
/// assert!((circle.beta_calc1 - half_pi).abs() < 1e-15);
/// ```
pub fn beta_fx(a: f64, b: f64) -> Result<BetaProjection, EllipseError> {
    let beta_calc = theoretical_alpha(a, b)?;
    let ratio = b / a;
    let projected = DVec2::new(beta_calc.cos(), ratio * beta_calc.sin());

    Ok(BetaProjection {
        beta_calc,
        beta_calc1: projected.y.atan2(projected.x),
    })
}
