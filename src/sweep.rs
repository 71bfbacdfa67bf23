//! Lazy parameter sweeps.
//!
//! A sweep maps every value of a [`SweepRange`] through a pure function.
//! Nothing is computed until the sweep is iterated, and a sweep can be
//! replayed by cloning it before iterating.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    beta_fx, find_alpha_with, AlphaSolution, BetaProjection, Ellipse, EllipseError, GaussKronrod,
    PerimeterComparison, QuadratureConfig, SolverConfig,
};

/// Evenly spaced values `start, start + step, ...` strictly below `end`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SweepRange {
    /// The first value.
    pub start: f64,
    /// The exclusive upper bound.
    pub end: f64,
    /// The spacing between values.
    pub step: f64,
}

impl SweepRange {
    /// Semi-major axes from 1 to 20 in steps of 0.1, for `b = 1`.
    pub const AXIS_RATIOS: Self = Self {
        start: 1.0,
        end: 20.0,
        step: 0.1,
    };

    /// Shape parameters from 1.01 to 1.99 in steps of 0.01.
    pub const SHAPE_PARAMETERS: Self = Self {
        start: 1.01,
        end: 1.99,
        step: 0.01,
    };

    /// Creates a range, checking that it is finite and that `step` is positive.
    pub fn new(start: f64, end: f64, step: f64) -> Result<Self, EllipseError> {
        let range = Self { start, end, step };
        range.validate()?;
        Ok(range)
    }

    fn validate(&self) -> Result<(), EllipseError> {
        if !(self.start.is_finite() && self.end.is_finite() && self.step.is_finite())
            || self.step <= 0.0
        {
            return Err(EllipseError::InvalidConfig(format!(
                "sweep range {}..{} step {} is not a finite, increasing range",
                self.start, self.end, self.step
            )));
        }
        Ok(())
    }

    /// The number of values in the range.
    pub fn len(&self) -> usize {
        if self.end <= self.start {
            return 0;
        }
        ((self.end - self.start) / self.step).ceil() as usize
    }

    /// Whether the range has no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `index`-th value. Computed directly rather than by repeated
    /// addition, so there is no drift along long ranges.
    pub fn value(&self, index: usize) -> f64 {
        self.start + index as f64 * self.step
    }
}

/// A lazy, replayable map of a function over a [`SweepRange`].
///
/// Created by [`sweep`], [`axis_ratio_sweep`] and [`shape_sweep`].
#[derive(Clone, Debug)]
pub struct Sweep<F> {
    range: SweepRange,
    index: usize,
    len: usize,
    f: F,
}

/// Maps `f` over every value of `range`.
///
/// # Example
/// ```
/// use orbital_ellipse::{sweep, SweepRange};
///
/// let range = SweepRange::new(0.0, 1.0, 0.25).unwrap();
/// let squares: Vec<f64> = sweep(range, |x| x * x).unwrap().collect();
/// assert_eq!(squares, vec![0.0, 0.0625, 0.25, 0.5625]);
/// ```
pub fn sweep<T, F>(range: SweepRange, f: F) -> Result<Sweep<F>, EllipseError>
where
    F: Fn(f64) -> T,
{
    range.validate()?;
    Ok(Sweep {
        range,
        index: 0,
        len: range.len(),
        f,
    })
}

impl<T, F> Iterator for Sweep<F>
where
    F: Fn(f64) -> T,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.index >= self.len {
            return None;
        }
        let x = self.range.value(self.index);
        self.index += 1;
        Some((self.f)(x))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.index;
        (remaining, Some(remaining))
    }
}

impl<T, F> ExactSizeIterator for Sweep<F> where F: Fn(f64) -> T {}

/// Compares Ramanujan's perimeter with the integrated one for every
/// semi-major axis in `range`, holding the semi-minor axis at `b`.
pub fn axis_ratio_sweep(
    range: SweepRange,
    b: f64,
    quadrature: QuadratureConfig,
) -> Result<
    Sweep<impl Fn(f64) -> Result<PerimeterComparison, EllipseError> + Clone>,
    EllipseError,
> {
    quadrature.validate()?;
    let integrator = GaussKronrod::new(quadrature);
    sweep(range, move |a| {
        PerimeterComparison::with_integrator(a, b, &integrator)
    })
}

/// Everything the angle analysis records for one shape parameter.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ShapeSample {
    /// The shape parameter.
    pub ue: f64,
    /// The semi-major axis derived from `ue`.
    pub a: f64,
    /// The semi-minor axis derived from `ue`.
    pub b: f64,
    /// The solved mean-velocity angle.
    pub solution: AlphaSolution,
    /// The closed-form Beta estimates.
    pub projection: BetaProjection,
    /// `solution.beta − projection.beta_calc1`.
    pub beta_error: f64,
}

impl ShapeSample {
    /// Builds the ellipse with periapsis `r0` and shape parameter `ue`,
    /// solves for its mean-velocity angle, and compares the resulting
    /// Beta with the closed-form projection.
    pub fn compute(ue: f64, r0: f64, config: &SolverConfig) -> Result<Self, EllipseError> {
        let ellipse = Ellipse::from_shape(r0, ue)?;
        let (a, b) = (ellipse.semi_major_axis(), ellipse.semi_minor_axis());

        let solution = find_alpha_with(a, b, config)?;
        let projection = beta_fx(a, b)?;

        Ok(Self {
            ue,
            a,
            b,
            solution,
            projection,
            beta_error: solution.beta - projection.beta_calc1,
        })
    }

    /// `a / b`.
    pub fn axis_ratio(&self) -> f64 {
        self.a / self.b
    }
}

/// Solves for the mean-velocity angle of the ellipse with periapsis `r0`
/// for every shape parameter in `range`.
pub fn shape_sweep(
    range: SweepRange,
    r0: f64,
    config: SolverConfig,
) -> Result<Sweep<impl Fn(f64) -> Result<ShapeSample, EllipseError> + Clone>, EllipseError> {
    config.validate()?;
    sweep(range, move |ue| ShapeSample::compute(ue, r0, &config))
}
