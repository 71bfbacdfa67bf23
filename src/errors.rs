use thiserror::Error;

/// Everything that can go wrong while computing ellipse quantities.
///
/// All of these are local to the function that returned them. Nothing in
/// this crate retries on behalf of the caller, apart from the quadrature
/// escalating its own subdivision budget before giving up with
/// [`PrecisionShortfall`][EllipseError::PrecisionShortfall].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EllipseError {
    /// ### An axis is zero, negative, or not a finite number.
    #[error("ellipse axes must be positive and finite (a = {a}, b = {b})")]
    NonPositiveAxis {
        /// The semi-major axis.
        a: f64,
        /// The semi-minor axis.
        b: f64,
    },

    /// ### The semi-minor axis is longer than the semi-major axis.
    /// The shape parameter formula divides by `a² − √(a⁴ − a²b²)`,
    /// which is undefined when `a < b`.
    #[error("semi-minor axis exceeds semi-major axis (a = {a}, b = {b})")]
    MinorExceedsMajor {
        /// The semi-major axis.
        a: f64,
        /// The semi-minor axis.
        b: f64,
    },

    /// ### The axes are valid but the ellipse is too flat for an `f64`.
    /// The eccentricity rounds to 1, so `Ue` rounds to 2 and the orbit
    /// formulas break down. This starts somewhere above `a/b = 1e7`.
    #[error("ellipse is degenerate in double precision, eccentricity rounds to 1 (a = {a}, b = {b})")]
    DegenerateEccentricity {
        /// The semi-major axis.
        a: f64,
        /// The semi-minor axis.
        b: f64,
    },

    /// ### The shape parameter `Ue` is outside of its valid range.
    #[error("shape parameter Ue = {0} is out of range")]
    ShapeParameterOutOfRange(f64),

    /// ### The reference radius `r0` is zero, negative, or not finite.
    #[error("reference radius r0 = {0} must be positive and finite")]
    NonPositiveRadius(f64),

    /// ### A square root would have received an invalid argument.
    #[error("radicand of {quantity} is {value}, expected a positive value")]
    NegativeRadicand {
        /// The formula the square root belongs to.
        quantity: &'static str,
        /// The offending argument.
        value: f64,
    },

    /// ### The quadrature did not reach the requested precision.
    /// This is only returned after every escalation of the
    /// subdivision budget has been used up.
    #[error(
        "quadrature stopped at {value} with error estimate {error_estimate} \
         (tolerance {tolerance}) after {subdivisions} subdivisions"
    )]
    PrecisionShortfall {
        /// The best value reached.
        value: f64,
        /// Its estimated absolute error.
        error_estimate: f64,
        /// The absolute error that was required.
        tolerance: f64,
        /// Bisections performed in the last attempt.
        subdivisions: usize,
    },

    /// ### More significant digits were requested than an `f64` can hold.
    #[error("{requested} significant digits requested, at most {max} are supported")]
    UnsupportedPrecision {
        /// The requested number of digits.
        requested: u32,
        /// The most that can be honoured.
        max: u32,
    },

    /// ### The integrand produced a NaN or infinity.
    #[error("integrand is not finite at t = {at}")]
    NonFiniteIntegrand {
        /// Where the integrand was evaluated.
        at: f64,
    },

    /// ### The integration interval is empty, reversed, or not finite.
    #[error("invalid integration interval [{lo}, {hi}]")]
    InvalidInterval {
        /// The lower limit.
        lo: f64,
        /// The upper limit.
        hi: f64,
    },

    /// ### A configuration value makes the computation meaningless.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// ### The mean velocity does not lie between the bracket's endpoint velocities.
    #[error(
        "mean velocity {v_mean} is not bracketed by [{alpha_min}, {alpha_max}] \
         (velocities {v_min} and {v_max})"
    )]
    RootNotBracketed {
        /// The lower end of the bracket.
        alpha_min: f64,
        /// The upper end of the bracket.
        alpha_max: f64,
        /// The speed at `alpha_min`.
        v_min: f64,
        /// The speed at `alpha_max`.
        v_max: f64,
        /// The mean speed that was looked for.
        v_mean: f64,
    },

    /// ### The solver ran out of iterations.
    #[error("no convergence after {iterations} iterations (alpha = {alpha}, residual = {residual})")]
    NotConverged {
        /// The iterations spent.
        iterations: u32,
        /// The last candidate.
        alpha: f64,
        /// `V(alpha) − V_mean` at the last candidate.
        residual: f64,
    },
}
