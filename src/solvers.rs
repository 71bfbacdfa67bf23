//! Root-finding for the mean-velocity angle.
//!
//! The speed of a body on the orbit varies with the polar parameter
//! `Alpha`; somewhere past the minor axis it equals the mean speed
//! (perimeter over period). [`find_alpha`] locates that angle by
//! false-position iteration on a fixed bracket.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use std::f64::consts::{FRAC_PI_2, TAU};

use log::{debug, trace, warn};

use crate::{
    beta_at, kinematics::velocity_for_shape, mean_velocity_with, shape_parameter, EllipseError,
    GaussKronrod, QuadratureConfig,
};

/// The default convergence tolerance on `|V(Alpha) − V_mean|`.
pub const DEFAULT_TOLERANCE: f64 = 1e-12;

/// The default iteration cap.
///
/// This is used to prevent infinite loops in case the method fails to converge.
pub const DEFAULT_MAX_ITERS: u32 = 500;

/// Settings for [`find_alpha_with`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolverConfig {
    /// The lower end of the search bracket, in radians. Defaults to 90°.
    pub alpha_min: f64,
    /// The upper end of the search bracket, in radians. Defaults to 120°.
    pub alpha_max: f64,
    /// Convergence tolerance on the speed residual.
    pub tolerance: f64,
    /// The iteration cap.
    pub max_iter: u32,
    /// Precision of the perimeter integral behind the mean speed.
    pub quadrature: QuadratureConfig,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            alpha_min: FRAC_PI_2,
            alpha_max: TAU / 3.0,
            tolerance: DEFAULT_TOLERANCE,
            max_iter: DEFAULT_MAX_ITERS,
            quadrature: QuadratureConfig::default(),
        }
    }
}

impl SolverConfig {
    /// Checks that the bracket is a proper interval and that the
    /// tolerance and iteration cap are positive.
    pub fn validate(&self) -> Result<(), EllipseError> {
        if !(self.alpha_min.is_finite() && self.alpha_max.is_finite())
            || self.alpha_min >= self.alpha_max
        {
            return Err(EllipseError::InvalidConfig(format!(
                "bracket [{}, {}] is not an increasing finite interval",
                self.alpha_min, self.alpha_max
            )));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(EllipseError::InvalidConfig(format!(
                "tolerance {} must be positive",
                self.tolerance
            )));
        }
        if self.max_iter == 0 {
            return Err(EllipseError::InvalidConfig(
                "max_iter must be at least 1".to_string(),
            ));
        }
        self.quadrature.validate()
    }
}

/// How the solver stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Termination {
    /// An interpolated candidate met the tolerance.
    Candidate,
    /// A bracket endpoint already met the tolerance, so no candidate
    /// was needed. This is what happens on a circle, where the speed
    /// is the same everywhere.
    BracketEndpoint,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Endpoint {
    Min,
    Max,
}

/// A converged mean-velocity angle.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AlphaSolution {
    /// The polar parameter at which the speed equals the mean speed.
    pub alpha: f64,
    /// The true polar angle at `alpha`.
    pub beta: f64,
    /// The number of completed bracket updates.
    pub iterations: u32,
    /// `V(alpha) − V_mean`.
    pub residual: f64,
    /// How the solver stopped.
    pub termination: Termination,
}

/// Finds the `Alpha` in `[90°, 120°]` where the orbital speed equals the
/// mean speed, using the default [`SolverConfig`].
///
/// # Example
/// ```
/// use orbital_ellipse::{find_alpha, mean_velocity, velocity};
///
/// let solution = find_alpha(2.0, 1.0).unwrap();
/// let v_mean = mean_velocity(2.0, 1.0).unwrap();
///
/// assert!(solution.alpha > std::f64::consts::FRAC_PI_2);
/// assert!((velocity(solution.alpha, 2.0, 1.0).unwrap() - v_mean).abs() < 1e-12);
/// ```
pub fn find_alpha(a: f64, b: f64) -> Result<AlphaSolution, EllipseError> {
    find_alpha_with(a, b, &SolverConfig::default())
}

/// Finds the `Alpha` inside `config`'s bracket where the orbital speed
/// equals the mean speed.
///
/// Each step interpolates linearly between the bracket endpoints
/// (false position), then replaces the endpoint whose speed residual has
/// the same sign as the candidate's, so the root stays bracketed whether
/// the speed rises or falls across the bracket.
///
/// When the same endpoint survives two steps in a row, the residual it
/// contributes to the interpolation is halved. The endpoint checks always
/// use the true residuals.
///
/// # Source
/// The halving is the Illinois modification of regula falsi:
/// "A modified regula falsi method for computing the root of an equation"
/// by M. Dowell and P. Jarratt
/// <https://doi.org/10.1007/BF01934364>
///
/// # Errors
/// - Any domain error of `a` and `b`, or an invalid `config`.
/// - [`RootNotBracketed`][EllipseError::RootNotBracketed] if the mean
///   speed is not between the speeds at the two ends of the bracket.
/// - [`NotConverged`][EllipseError::NotConverged] if `max_iter` bracket
///   updates were not enough.
pub fn find_alpha_with(
    a: f64,
    b: f64,
    config: &SolverConfig,
) -> Result<AlphaSolution, EllipseError> {
    config.validate()?;

    let ue = shape_parameter(a, b)?;
    let v_mean = mean_velocity_with(a, b, &GaussKronrod::new(config.quadrature))?;
    let tolerance = config.tolerance;

    let (mut alpha_min, mut alpha_max) = (config.alpha_min, config.alpha_max);
    let mut res_min = velocity_for_shape(alpha_min, ue)? - v_mean;
    let mut res_max = velocity_for_shape(alpha_max, ue)? - v_mean;

    // Interpolation weights; these are the residuals, halved on stale endpoints.
    let (mut weight_min, mut weight_max) = (res_min, res_max);
    let mut last_replaced = None;

    let mut alpha = alpha_min;
    let mut residual = res_min;

    for iteration in 0..config.max_iter {
        if res_min.abs() < tolerance || res_max.abs() < tolerance {
            let (alpha, residual) = if res_min.abs() < tolerance {
                (alpha_min, res_min)
            } else {
                (alpha_max, res_max)
            };
            debug!("a = {a}, b = {b}: bracket endpoint {alpha} already matches the mean speed");
            return Ok(AlphaSolution {
                alpha,
                beta: beta_at(alpha, ue)?,
                iterations: iteration,
                residual,
                termination: Termination::BracketEndpoint,
            });
        }

        if res_min.signum() == res_max.signum() {
            warn!(
                "a = {a}, b = {b}: mean speed {v_mean} lies outside the speeds \
                 on [{alpha_min}, {alpha_max}]"
            );
            return Err(EllipseError::RootNotBracketed {
                alpha_min,
                alpha_max,
                v_min: res_min + v_mean,
                v_max: res_max + v_mean,
                v_mean,
            });
        }

        alpha = alpha_min - weight_min * (alpha_max - alpha_min) / (weight_max - weight_min);
        residual = velocity_for_shape(alpha, ue)? - v_mean;

        trace!("iteration {iteration}: alpha = {alpha}, residual = {residual:e}");

        if residual.abs() < tolerance {
            debug!(
                "a = {a}, b = {b}: converged to alpha = {alpha} in {} iterations",
                iteration + 1
            );
            return Ok(AlphaSolution {
                alpha,
                beta: beta_at(alpha, ue)?,
                iterations: iteration + 1,
                residual,
                termination: Termination::Candidate,
            });
        }

        if residual.signum() == res_min.signum() {
            alpha_min = alpha;
            res_min = residual;
            weight_min = residual;
            if last_replaced == Some(Endpoint::Min) {
                weight_max *= 0.5;
            }
            last_replaced = Some(Endpoint::Min);
        } else {
            alpha_max = alpha;
            res_max = residual;
            weight_max = residual;
            if last_replaced == Some(Endpoint::Max) {
                weight_min *= 0.5;
            }
            last_replaced = Some(Endpoint::Max);
        }
    }

    warn!(
        "a = {a}, b = {b}: no convergence after {} iterations (alpha = {alpha}, residual = {residual:e})",
        config.max_iter
    );
    Err(EllipseError::NotConverged {
        iterations: config.max_iter,
        alpha,
        residual,
    })
}
