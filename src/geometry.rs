//! Closed-form relations between the shape parameter `Ue`, the semi-axes
//! `a` and `b`, and the position on the orbit at a polar parameter `Alpha`.
//!
//! The orbit is normalised so that its periapsis sits at distance `r0`
//! (1 unless stated otherwise) from the focus. A point on the orbit is
//! described by the pair `(cos_uell, sin_uell)`, whose length is the
//! normalised radius and whose direction is the true polar angle.

use glam::DVec2;

use crate::EllipseError;

/// Checks that `Ue` lies in the open interval `(0, 2)`.
///
/// `Ue = 2` is a division by zero in [`cos_uell`], and `Ue <= 0`
/// makes the square root in [`sin_uell`] meaningless.
fn check_shape_parameter(ue: f64) -> Result<(), EllipseError> {
    if ue.is_finite() && ue > 0.0 && ue < 2.0 {
        Ok(())
    } else {
        Err(EllipseError::ShapeParameterOutOfRange(ue))
    }
}

/// Checks the ellipse invariant `a >= b > 0`.
pub(crate) fn check_axes(a: f64, b: f64) -> Result<(), EllipseError> {
    if !(a.is_finite() && b.is_finite() && a > 0.0 && b > 0.0) {
        return Err(EllipseError::NonPositiveAxis { a, b });
    }
    if b > a {
        return Err(EllipseError::MinorExceedsMajor { a, b });
    }
    Ok(())
}

/// The horizontal component of the normalised orbit point:
/// `(cos(Alpha) − 1) / (2 − Ue) + 1`.
///
/// # Example
/// ```
/// use orbital_ellipse::cos_uell;
///
/// // Periapsis is always at (1, 0).
/// assert_eq!(cos_uell(0.0, 1.5).unwrap(), 1.0);
/// ```
pub fn cos_uell(alpha: f64, ue: f64) -> Result<f64, EllipseError> {
    check_shape_parameter(ue)?;
    Ok((alpha.cos() - 1.0) / (2.0 - ue) + 1.0)
}

/// The vertical component of the normalised orbit point:
/// `sin(Alpha) / √(2/Ue − 1)`.
pub fn sin_uell(alpha: f64, ue: f64) -> Result<f64, EllipseError> {
    check_shape_parameter(ue)?;
    Ok(alpha.sin() / (2.0 / ue - 1.0).sqrt())
}

/// The normalised orbit point `(cos_uell, sin_uell)` at `alpha`.
pub fn uell_point(alpha: f64, ue: f64) -> Result<DVec2, EllipseError> {
    Ok(DVec2::new(cos_uell(alpha, ue)?, sin_uell(alpha, ue)?))
}

/// The normalised distance from the focus at `alpha`,
/// `Re = √(cos_uell² + sin_uell²)`.
pub fn radius_at(alpha: f64, ue: f64) -> Result<f64, EllipseError> {
    Ok(uell_point(alpha, ue)?.length())
}

/// Derives the shape parameter from the semi-axes.
///
/// This is `Ue = b² / (a² − √(a⁴ − a²b²))`, evaluated in the
/// cancellation-free form `1 + √(1 − b²/a²)` (one plus the eccentricity).
///
/// # Errors
/// Fails unless `a >= b > 0`. Fails with
/// [`DegenerateEccentricity`][EllipseError::DegenerateEccentricity] when
/// the ellipse is so flat (beyond about `a/b = 1e7`) that `Ue` rounds to 2.
///
/// # Example
/// ```
/// use orbital_ellipse::shape_parameter;
///
/// // A circle has Ue = 1.
/// assert_eq!(shape_parameter(3.0, 3.0).unwrap(), 1.0);
/// assert!(shape_parameter(1.0, 3.0).is_err());
/// ```
pub fn shape_parameter(a: f64, b: f64) -> Result<f64, EllipseError> {
    check_axes(a, b)?;
    let ratio = b / a;
    let ue = 1.0 + (1.0 - ratio * ratio).sqrt();

    if ue >= 2.0 {
        return Err(EllipseError::DegenerateEccentricity { a, b });
    }
    Ok(ue)
}

/// An ellipse given by its semi-axes, with `a >= b > 0` enforced on construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipse {
    a: f64,
    b: f64,
}

impl Ellipse {
    /// Creates an ellipse from its semi-major axis `a` and semi-minor axis `b`.
    ///
    /// # Errors
    /// Fails unless `a >= b > 0` and both are finite.
    pub fn new(a: f64, b: f64) -> Result<Self, EllipseError> {
        check_axes(a, b)?;
        Ok(Self { a, b })
    }

    /// Creates the ellipse with periapsis distance `r0` and shape parameter `ue`:
    /// `a = r0 / (2 − Ue)`, `b = r0 / √(2/Ue − 1)`.
    ///
    /// # Errors
    /// `ue` must lie in `[1, 2)`; below 1 the point at distance `r0` would be
    /// the apoapsis rather than the periapsis and the relation would not
    /// round-trip through [`shape_parameter`].
    ///
    /// # Example
    /// ```
    /// use orbital_ellipse::Ellipse;
    ///
    /// let ellipse = Ellipse::from_shape(1.0, 1.5).unwrap();
    /// assert!((ellipse.semi_major_axis() - 2.0).abs() < 1e-12);
    /// assert!((ellipse.shape_parameter() - 1.5).abs() < 1e-12);
    /// ```
    pub fn from_shape(r0: f64, ue: f64) -> Result<Self, EllipseError> {
        if !(r0.is_finite() && r0 > 0.0) {
            return Err(EllipseError::NonPositiveRadius(r0));
        }
        if !(ue.is_finite() && (1.0..2.0).contains(&ue)) {
            return Err(EllipseError::ShapeParameterOutOfRange(ue));
        }

        let a = r0 / (2.0 - ue);
        // At Ue = 1 rounding can leave b a hair above a.
        let b = (r0 / (2.0 / ue - 1.0).sqrt()).min(a);

        Self::new(a, b)
    }

    /// The semi-major axis `a`.
    pub fn semi_major_axis(&self) -> f64 {
        self.a
    }

    /// The semi-minor axis `b`.
    pub fn semi_minor_axis(&self) -> f64 {
        self.b
    }

    /// `a / b`, which is at least 1.
    pub fn axis_ratio(&self) -> f64 {
        self.a / self.b
    }

    /// The eccentricity `√(1 − b²/a²)`.
    pub fn eccentricity(&self) -> f64 {
        let ratio = self.b / self.a;
        (1.0 - ratio * ratio).sqrt()
    }

    /// The shape parameter `Ue`, in `[1, 2)`.
    ///
    /// Past about `a/b = 1e7` this rounds to 2; the free function
    /// [`shape_parameter`] reports that case as an error.
    pub fn shape_parameter(&self) -> f64 {
        1.0 + self.eccentricity()
    }

    /// The distance from the focus to the closest point, `a(1 − e)`.
    pub fn periapsis(&self) -> f64 {
        self.a * (1.0 - self.eccentricity())
    }
}
