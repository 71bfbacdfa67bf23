//! Ellipse perimeter estimators.
//!
//! [`exact_integral`] is the correctness oracle. [`ramanujan`] is the
//! approximation under test, and [`agm_perimeter`] is an independent
//! closed form used to cross-check the oracle.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::{
    geometry::check_axes, math::CompensatedSum, EllipseError, GaussKronrod, Integrator,
    QuadratureConfig,
};

/// The most halvings the AGM iteration is allowed; it converges
/// quadratically, so double precision is reached in about six.
const AGM_MAX_ITERS: u32 = 64;

/// Ramanujan's second approximation of the ellipse perimeter.
///
/// With `h = (a − b)² / (a + b)²`, this is
/// `π(a + b)(1 + 3h / (10 + √(4 − 3h)))`.
///
/// # Errors
/// Fails unless `a >= b > 0`. Since `h < 1`, the inner square root
/// always has a positive argument.
///
/// # Example
/// ```
/// use orbital_ellipse::ramanujan;
///
/// let circle = ramanujan(1.0, 1.0).unwrap();
/// assert!((circle - std::f64::consts::TAU).abs() < 1e-15);
/// ```
pub fn ramanujan(a: f64, b: f64) -> Result<f64, EllipseError> {
    check_axes(a, b)?;
    let h = (a - b).powi(2) / (a + b).powi(2);
    Ok(TAU * (a + b) * (1.0 + 3.0 * h / (10.0 + (4.0 - 3.0 * h).sqrt())) / 2.0)
}

/// The perimeter as four times the quarter-arc length,
/// `4 ∫₀^{π/2} √((a sin t)² + (b cos t)²) dt`, at full `f64` precision.
///
/// # Errors
/// Fails unless `a >= b > 0`, or if the quadrature cannot reach 15
/// significant digits.
///
/// # Example
/// ```
/// use orbital_ellipse::exact_integral;
///
/// let perimeter = exact_integral(2.0, 1.0).unwrap();
/// assert!((perimeter - 9.688_448_220_547_675).abs() < 1e-13);
/// ```
pub fn exact_integral(a: f64, b: f64) -> Result<f64, EllipseError> {
    exact_integral_with(a, b, &GaussKronrod::new(QuadratureConfig::default()))
}

/// Like [`exact_integral`], with a caller-supplied integrator.
pub fn exact_integral_with<I: Integrator>(
    a: f64,
    b: f64,
    integrator: &I,
) -> Result<f64, EllipseError> {
    check_axes(a, b)?;
    let arc = integrator.integrate(
        |t| {
            let dx = -a * t.sin();
            let dy = b * t.cos();
            dx.hypot(dy)
        },
        0.0,
        FRAC_PI_2,
    )?;
    Ok(4.0 * arc.value)
}

/// The perimeter through the arithmetic-geometric mean of the semi-axes.
///
/// `P = 2π / AGM(a, b) · (a² − Σ 2ⁿ⁻¹ cₙ²)`, with `c₀² = a² − b²` and
/// `cₙ₊₁ = (aₙ − bₙ) / 2`.
///
/// # Source
/// "The Arithmetic-Geometric Mean and Fast Computation of Elementary Functions"
/// by J. M. Borwein and P. B. Borwein
/// <https://doi.org/10.1137/1026073>
pub fn agm_perimeter(a: f64, b: f64) -> Result<f64, EllipseError> {
    check_axes(a, b)?;

    let mut correction = CompensatedSum::default();
    correction.add(0.5 * (a * a - b * b));

    let mut weight = 0.5;
    let (mut an, mut bn) = (a, b);

    for _ in 0..AGM_MAX_ITERS {
        if an - bn <= f64::EPSILON * an {
            break;
        }
        let cn = 0.5 * (an - bn);
        (an, bn) = (0.5 * (an + bn), (an * bn).sqrt());
        weight *= 2.0;
        correction.add(weight * cn * cn);
    }

    Ok(2.0 * TAU / (an + bn) * (a * a - correction.total()))
}

/// `(exact − approx) / exact · 100`.
pub fn relative_error_percent(exact: f64, approx: f64) -> f64 {
    (exact - approx) / exact * 100.0
}

/// Both perimeter estimates of one ellipse, side by side.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PerimeterComparison {
    /// The semi-major axis.
    pub a: f64,
    /// The semi-minor axis.
    pub b: f64,
    /// Ramanujan's estimate.
    pub ramanujan: f64,
    /// The integrated perimeter.
    pub exact: f64,
    /// How far Ramanujan's estimate falls short, in percent of the exact value.
    pub error_percent: f64,
}

impl PerimeterComparison {
    /// Computes both perimeters of the ellipse with semi-axes `a` and `b`.
    pub fn new(a: f64, b: f64) -> Result<Self, EllipseError> {
        Self::with_integrator(a, b, &GaussKronrod::default())
    }

    /// Like [`new`][Self::new], with a caller-supplied integrator.
    pub fn with_integrator<I: Integrator>(
        a: f64,
        b: f64,
        integrator: &I,
    ) -> Result<Self, EllipseError> {
        let ramanujan = ramanujan(a, b)?;
        let exact = exact_integral_with(a, b, integrator)?;
        Ok(Self {
            a,
            b,
            ramanujan,
            exact,
            error_percent: relative_error_percent(exact, ramanujan),
        })
    }

    /// `a / b`.
    pub fn axis_ratio(&self) -> f64 {
        self.a / self.b
    }
}
