//! Orbital period and speed of a body on an ellipse, normalised so that a
//! circular orbit has unit speed.

use std::f64::consts::TAU;

use crate::{
    geometry::{check_axes, radius_at},
    perimeter::exact_integral_with,
    shape_parameter, EllipseError, GaussKronrod, Integrator,
};

/// The orbital period `2πb / √(2(1 − √(1 − b²/a²)) − b²/a²)`.
///
/// The radicand simplifies to `(1 − e)²`, with `e` the eccentricity, and is
/// evaluated in that form.
///
/// # Errors
/// Fails unless `a >= b > 0`, and when the radicand is not positive
/// (`b / a` so small that `e` rounds to 1).
///
/// # Example
/// ```
/// use orbital_ellipse::orbital_period;
///
/// // A circular orbit of radius 1 at unit speed takes 2π.
/// let period = orbital_period(1.0, 1.0).unwrap();
/// assert!((period - std::f64::consts::TAU).abs() < 1e-15);
/// ```
pub fn orbital_period(a: f64, b: f64) -> Result<f64, EllipseError> {
    check_axes(a, b)?;
    let ratio = b / a;
    let eccentricity = (1.0 - ratio * ratio).sqrt();
    let radicand = (1.0 - eccentricity).powi(2);

    if radicand <= 0.0 {
        return Err(EllipseError::NegativeRadicand {
            quantity: "orbital period",
            value: radicand,
        });
    }

    Ok(TAU * b / radicand.sqrt())
}

/// Speed at `alpha` on the orbit with shape parameter `ue`.
pub(crate) fn velocity_for_shape(alpha: f64, ue: f64) -> Result<f64, EllipseError> {
    let re = radius_at(alpha, ue)?;
    let radicand = 1.0 + 2.0 / ue * (1.0 / re - 1.0);

    // Also catches NaN from a non-finite alpha.
    if !(radicand >= 0.0) {
        return Err(EllipseError::NegativeRadicand {
            quantity: "velocity",
            value: radicand,
        });
    }

    Ok(radicand.sqrt())
}

/// The instantaneous speed at polar parameter `alpha`,
/// `√(1 + (2/Ue)(1/Re − 1))`.
///
/// `Ue` is derived from `a` and `b`, and `Re` is the normalised
/// radius at `alpha`. The speed is 1 at periapsis and falls towards
/// apoapsis.
///
/// # Errors
/// Fails unless `a >= b > 0`, or if `alpha` is not finite.
///
/// # Example
/// ```
/// use orbital_ellipse::velocity;
///
/// assert_eq!(velocity(0.0, 2.0, 1.0).unwrap(), 1.0);
/// assert!(velocity(3.0, 2.0, 1.0).unwrap() < 1.0);
/// ```
pub fn velocity(alpha: f64, a: f64, b: f64) -> Result<f64, EllipseError> {
    velocity_for_shape(alpha, shape_parameter(a, b)?)
}

/// The mean speed: the perimeter divided by the orbital period.
pub fn mean_velocity(a: f64, b: f64) -> Result<f64, EllipseError> {
    mean_velocity_with(a, b, &GaussKronrod::default())
}

/// Like [`mean_velocity`], with a caller-supplied integrator for the perimeter.
pub fn mean_velocity_with<I: Integrator>(
    a: f64,
    b: f64,
    integrator: &I,
) -> Result<f64, EllipseError> {
    let perimeter = exact_integral_with(a, b, integrator)?;
    Ok(perimeter / orbital_period(a, b)?)
}

/// The perimeter implied by treating the speed at `alpha` as the mean
/// speed: `velocity(alpha) · period`.
///
/// At the angle found by [`find_alpha`][crate::find_alpha] this
/// reproduces the integrated perimeter.
pub fn perimeter_from_velocity(a: f64, b: f64, alpha: f64) -> Result<f64, EllipseError> {
    Ok(velocity(alpha, a, b)? * orbital_period(a, b)?)
}
