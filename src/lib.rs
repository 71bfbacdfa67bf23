//! # Ellipse Orbit Perimeter and Mean-Velocity Angle
//! This library crate computes geometric and kinematic quantities of an
//! ellipse modelled as an orbit, and solves for the polar angle at which
//! the orbiting body moves at exactly its mean speed.
//!
//! The orbit is described either by its semi-axes `a >= b > 0`, or by a
//! periapsis distance `r0` together with the dimensionless shape parameter
//! `Ue = 1 + e` (one plus the eccentricity), which lies in `[1, 2)`.
//! Speeds are normalised so that the body moves at unit speed at periapsis
//! when `r0 = 1`, and on a circle everywhere.
//!
//! ## Getting started
//! The crate is a set of pure functions grouped by concern:
//! - Geometry: [`cos_uell`], [`sin_uell`], [`radius_at`],
//!   [`shape_parameter`] and the validated [`Ellipse`] type.
//! - Perimeter: [`ramanujan`] (the approximation under test),
//!   [`exact_integral`] (the quadrature oracle), and [`agm_perimeter`].
//! - Kinematics: [`orbital_period`], [`velocity`] and [`mean_velocity`].
//! - The solver: [`find_alpha`] finds the `Alpha` in `[90°, 120°]` with
//!   `velocity(Alpha) = mean_velocity`.
//! - Beta: [`beta_at`] and the closed-form [`beta_fx`].
//! - Sweeps: [`axis_ratio_sweep`] and [`shape_sweep`] lazily map the above
//!   over ranges of `a` or `Ue`.
//!
//! Every fallible function returns a [`Result`] with an [`EllipseError`];
//! invalid input is reported rather than turned into NaN.
//!
//! ## Example
//!
//! ```rust
//! use orbital_ellipse::{exact_integral, find_alpha, ramanujan, Termination};
//!
//! # fn main() {
//! let exact = exact_integral(2.0, 1.0).unwrap();
//! let approx = ramanujan(2.0, 1.0).unwrap();
//! assert!((exact - approx).abs() / exact < 1e-6);
//!
//! let solution = find_alpha(2.0, 1.0).unwrap();
//! assert_eq!(solution.termination, Termination::Candidate);
//! assert!((solution.alpha - 1.868_925_439_168).abs() < 1e-9);
//! # }
//! ```

#![warn(missing_docs)]

mod beta;
mod errors;
mod geometry;
mod kinematics;
mod math;
mod perimeter;
pub mod quadrature;
mod solvers;
mod sweep;

pub use beta::{beta_at, beta_fx, theoretical_alpha, BetaProjection};
pub use errors::EllipseError;
pub use geometry::{cos_uell, radius_at, shape_parameter, sin_uell, uell_point, Ellipse};
pub use kinematics::{
    mean_velocity, mean_velocity_with, orbital_period, perimeter_from_velocity, velocity,
};
pub use perimeter::{
    agm_perimeter, exact_integral, exact_integral_with, ramanujan, relative_error_percent,
    PerimeterComparison,
};
pub use quadrature::{GaussKronrod, Integral, Integrator, QuadratureConfig};
pub use solvers::{
    find_alpha, find_alpha_with, AlphaSolution, SolverConfig, Termination, DEFAULT_MAX_ITERS,
    DEFAULT_TOLERANCE,
};
pub use sweep::{axis_ratio_sweep, shape_sweep, sweep, ShapeSample, Sweep, SweepRange};

#[cfg(test)]
mod tests;
