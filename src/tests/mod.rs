#![cfg(test)]

use crate::{
    agm_perimeter, axis_ratio_sweep, beta_at, exact_integral, exact_integral_with, find_alpha,
    find_alpha_with, mean_velocity, orbital_period, perimeter_from_velocity, radius_at,
    ramanujan, relative_error_percent, shape_parameter, shape_sweep, velocity, Ellipse,
    EllipseError, GaussKronrod, QuadratureConfig, SolverConfig, SweepRange, Termination,
};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

const POLL_ANGLES: usize = 4096;
const RANDOM_ITERS: usize = 64;


use assertions::*;
use polling::*;
use seeders::*;

fn bracket() -> (f64, f64) {
    let config = SolverConfig::default();
    (config.alpha_min, config.alpha_max)
}

#[test]
fn circle_perimeter_period_and_speed() {
    for r in [0.25, 1.0, 4.0, 1e3] {
        let expected = TAU * r;

        assert_relative_eq(exact_integral(r, r).unwrap(), expected, 1e-14, "circle perimeter");
        assert_relative_eq(orbital_period(r, r).unwrap(), expected, 1e-15, "circle period");

        for i in 0..16 {
            let alpha = i as f64 * TAU / 16.0;
            assert_almost_eq_within(
                velocity(alpha, r, r).unwrap(),
                1.0,
                1e-15,
                &format!("circle speed at {alpha}"),
            );
        }
    }
}

#[test]
fn two_to_one_reference_values() {
    let exact = exact_integral(2.0, 1.0).unwrap();
    let approx = ramanujan(2.0, 1.0).unwrap();
    let period = orbital_period(2.0, 1.0).unwrap();

    assert_almost_eq_within(exact, 9.688_448_220_547_675, 1e-13, "exact perimeter");
    assert_almost_eq_within(approx, 9.688_448_216_130_086, 1e-13, "Ramanujan perimeter");
    assert!(relative_error_percent(exact, approx) < 0.01);

    let textbook = TAU / (2.0 * (1.0 - 0.75f64.sqrt()) - 0.25).sqrt();
    assert_relative_eq(period, textbook, 1e-12, "2:1 period");

    let solution = find_alpha(2.0, 1.0).unwrap();
    let (lo, hi) = bracket();
    assert_in_bracket(solution.alpha, lo, hi, "2:1 solution");
    let v_mean = exact / period;
    let v = velocity(solution.alpha, 2.0, 1.0).unwrap();
    assert!((v - v_mean).abs() < 1e-12, "{v} vs {v_mean}");
}

#[test]
fn ramanujan_stays_below_exact_and_close_for_mild_ellipses() {
    for _ in 0..RANDOM_ITERS {
        let ellipse = random_mild_ellipse();
        let (a, b) = (ellipse.semi_major_axis(), ellipse.semi_minor_axis());
        let exact = exact_integral(a, b).unwrap();
        let approx = ramanujan(a, b).unwrap();

        assert!(
            approx <= exact * (1.0 + 1e-14),
            "Ramanujan {approx} exceeds exact {exact} for a = {a}, b = {b}"
        );
        assert!(
            relative_error_percent(exact, approx) <= 0.001,
            "error {} % too large for a/b = {}",
            relative_error_percent(exact, approx),
            a / b
        );
    }
}

#[test]
fn ramanujan_error_grows_with_eccentricity() {
    // Below a/b = 2 the error sinks into rounding noise.
    let range = SweepRange::new(2.0, 20.0, 0.1).unwrap();
    let errors: Vec<f64> = axis_ratio_sweep(range, 1.0, QuadratureConfig::default())
        .unwrap()
        .map(|c| c.unwrap().error_percent)
        .collect();

    assert_eq!(errors.len(), 180);
    for pair in errors.windows(2) {
        assert!(pair[1] > pair[0], "{} then {}", pair[0], pair[1]);
    }
    assert!(errors[errors.len() - 1] < 0.01);
}

#[test]
fn quadrature_agrees_with_agm() {
    for _ in 0..RANDOM_ITERS {
        let ellipse = random_ellipse();
        let (a, b) = (ellipse.semi_major_axis(), ellipse.semi_minor_axis());
        assert_relative_eq(
            exact_integral(a, b).unwrap(),
            agm_perimeter(a, b).unwrap(),
            1e-13,
            &format!("perimeter of a = {a}, b = {b}"),
        );
    }
}

#[test]
fn lower_precision_quadrature_is_still_close() {
    let quad = GaussKronrod::new(QuadratureConfig {
        digits: 8,
        ..Default::default()
    });
    let coarse = exact_integral_with(7.0, 2.0, &quad).unwrap();
    let fine = exact_integral(7.0, 2.0).unwrap();
    assert_relative_eq(coarse, fine, 1e-8, "coarse perimeter");
}

#[test]
fn shape_parameter_round_trip() {
    for _ in 0..RANDOM_ITERS {
        let (r0, ue, ellipse) = random_shaped_ellipse();
        let recovered =
            shape_parameter(ellipse.semi_major_axis(), ellipse.semi_minor_axis()).unwrap();
        assert_almost_eq_within(
            recovered,
            ue,
            1e-10,
            &format!("Ue round trip with r0 = {r0}"),
        );
        assert_almost_eq_within(ellipse.shape_parameter(), ue, 1e-10, "Ellipse::shape_parameter");
    }

    let sweep = SweepRange::SHAPE_PARAMETERS;
    for i in 0..sweep.len() {
        let ue = sweep.value(i);
        let ellipse = Ellipse::from_shape(1.0, ue).unwrap();
        assert_almost_eq_within(ellipse.shape_parameter(), ue, 1e-10, "Ue sweep round trip");
    }
}

#[test]
fn uell_points_have_focus_at_origin() {
    for _ in 0..8 {
        let (_, ue, _) = random_shaped_ellipse();
        let a = 1.0 / (2.0 - ue);
        let other_focus = glam::DVec2::new(2.0 * (1.0 - a), 0.0);

        for point in poll_uell(ue) {
            let sum = point.length() + point.distance(other_focus);
            assert_almost_eq_within(sum, 2.0 * a, 1e-9 * a, "sum of focal distances");
        }
    }
}

#[test]
fn uell_point_extremes() {
    let ue = 1.5;
    assert_almost_eq_vec2(
        crate::uell_point(0.0, ue).unwrap(),
        glam::DVec2::new(1.0, 0.0),
        "periapsis",
    );
    assert_almost_eq_vec2(
        crate::uell_point(PI, ue).unwrap(),
        glam::DVec2::new(-3.0, 0.0),
        "apoapsis",
    );
    assert_almost_eq(radius_at(PI, ue).unwrap(), 3.0, "apoapsis radius");
}

#[test]
fn speed_follows_vis_viva() {
    // v² = μ(2/R − 1/a) with μ = 1/Ue and a = 1/(2 − Ue) in periapsis units.
    for _ in 0..RANDOM_ITERS {
        let ellipse = random_ellipse();
        let (a, b) = (ellipse.semi_major_axis(), ellipse.semi_minor_axis());
        let ue = ellipse.shape_parameter();
        let alpha = rand::random_range(0.0..TAU);

        let r = radius_at(alpha, ue).unwrap();
        let expected = ((2.0 / r - (2.0 - ue)) / ue).max(0.0).sqrt();

        assert_almost_eq_within(
            velocity(alpha, a, b).unwrap(),
            expected,
            1e-9,
            &format!("speed at {alpha} for a = {a}, b = {b}"),
        );
    }
}

#[test]
fn period_follows_keplers_third_law() {
    for _ in 0..RANDOM_ITERS {
        let ellipse = random_ellipse();
        let (a, b) = (ellipse.semi_major_axis(), ellipse.semi_minor_axis());
        let ue = ellipse.shape_parameter();
        let r0 = ellipse.periapsis();
        let normalised_a = a / r0;

        let expected = TAU * (ue * normalised_a.powi(3)).sqrt() * r0;
        assert_relative_eq(
            orbital_period(a, b).unwrap(),
            expected,
            1e-9,
            &format!("period of a = {a}, b = {b}"),
        );
    }
}

#[test]
fn speed_decreases_across_the_bracket() {
    let (lo, hi) = bracket();
    for _ in 0..16 {
        let ellipse = random_ellipse();
        let speeds = poll_velocity(&ellipse, lo, hi);
        for pair in speeds.windows(2) {
            assert!(
                pair[1] <= pair[0],
                "speed rises from {} to {} for a/b = {}",
                pair[0],
                pair[1],
                ellipse.axis_ratio()
            );
        }
    }

    for ratio in [1.0 + 1e-6, 2.0, 10.0, 20.0] {
        let ellipse = Ellipse::new(ratio, 1.0).unwrap();
        let speeds = poll_velocity(&ellipse, lo, hi);
        assert!(speeds[0] > speeds[POLL_ANGLES], "a/b = {ratio}");
    }
}

#[test]
fn solver_hits_mean_speed_for_random_ellipses() {
    let (lo, hi) = bracket();
    for _ in 0..RANDOM_ITERS {
        let ellipse = random_ellipse();
        let (a, b) = (ellipse.semi_major_axis(), ellipse.semi_minor_axis());
        let what = format!("a = {a}, b = {b}");

        let solution = find_alpha(a, b).unwrap();
        let v_mean = mean_velocity(a, b).unwrap();

        assert_in_bracket(solution.alpha, lo, hi, &what);
        assert!(solution.iterations < SolverConfig::default().max_iter);
        assert!(
            (velocity(solution.alpha, a, b).unwrap() - v_mean).abs() < 1e-12,
            "{what}"
        );
        assert_eq!(
            solution.beta.to_bits(),
            beta_at(solution.alpha, ellipse.shape_parameter())
                .unwrap()
                .to_bits(),
            "{what}"
        );
    }
}

#[test]
fn solver_is_deterministic() {
    for (a, b) in [(2.0, 1.0), (3.7, 1.2), (19.5, 1.0)] {
        let first = find_alpha(a, b).unwrap();
        let second = find_alpha(a, b).unwrap();
        assert_eq_solution(&first, &second, &format!("a = {a}, b = {b}"));
    }
}

#[test]
fn solver_boundaries_converge() {
    let circle = find_alpha(1.0, 1.0).unwrap();
    assert_eq!(circle.termination, Termination::BracketEndpoint);
    assert_eq!(circle.alpha, FRAC_PI_2);
    assert_almost_eq_within(circle.beta, FRAC_PI_2, 1e-15, "beta on a circle");

    for ratio in [1.0 + 1e-4, 19.9, 20.0] {
        let solution = find_alpha(ratio, 1.0).unwrap();
        assert_eq!(solution.termination, Termination::Candidate, "a/b = {ratio}");
        assert!(solution.iterations < 50, "a/b = {ratio}: {solution:?}");
    }
}

#[test]
fn solved_alpha_reproduces_the_perimeter() {
    for (a, b) in [(2.0, 1.0), (6.0, 2.5), (15.0, 1.0)] {
        let solution = find_alpha(a, b).unwrap();
        let period = orbital_period(a, b).unwrap();
        let implied = perimeter_from_velocity(a, b, solution.alpha).unwrap();
        let exact = exact_integral(a, b).unwrap();

        assert!(
            (implied - exact).abs() <= 1e-12 * period + 1e-13 * exact,
            "a = {a}, b = {b}: {implied} vs {exact}"
        );
    }
}

#[test]
fn solver_rejects_domain_errors() {
    assert_eq!(
        find_alpha(1.0, 2.0),
        Err(EllipseError::MinorExceedsMajor { a: 1.0, b: 2.0 })
    );
    assert!(matches!(
        find_alpha(-1.0, -2.0),
        Err(EllipseError::NonPositiveAxis { .. })
    ));

    let greedy = SolverConfig {
        quadrature: QuadratureConfig {
            digits: 20,
            ..Default::default()
        },
        ..Default::default()
    };
    assert!(matches!(
        find_alpha_with(2.0, 1.0, &greedy),
        Err(EllipseError::UnsupportedPrecision { requested: 20, .. })
    ));
}

#[test]
fn shape_sweep_converges_everywhere() {
    let (lo, hi) = bracket();
    let samples = shape_sweep(SweepRange::SHAPE_PARAMETERS, 1.0, SolverConfig::default())
        .unwrap();
    assert_eq!(samples.len(), 98);

    for sample in samples {
        let sample = sample.unwrap();
        let what = format!("Ue = {}", sample.ue);

        assert_in_bracket(sample.solution.alpha, lo, hi, &what);
        assert!(sample.axis_ratio() >= 1.0, "{what}");
        assert!(sample.projection.beta_calc1 >= sample.projection.beta_calc, "{what}");
        assert_almost_eq(
            sample.beta_error,
            sample.solution.beta - sample.projection.beta_calc1,
            &what,
        );
    }
}

#[test]
fn sweeps_restart_from_a_clone() {
    let range = SweepRange::new(1.0, 4.0, 0.5).unwrap();
    let sweep = axis_ratio_sweep(range, 1.0, QuadratureConfig::default()).unwrap();

    let first: Vec<_> = sweep.clone().map(|c| c.unwrap()).collect();
    let second: Vec<_> = sweep.map(|c| c.unwrap()).collect();

    assert_eq!(first.len(), 6);
    assert_eq!(first, second);
    assert_eq!(first[0].axis_ratio(), 1.0);
    assert_almost_eq(first[0].error_percent, 0.0, "circle error");
}

#[test]
fn sweep_surfaces_per_item_errors() {
    // Semi-major axes below b = 1 are invalid, the rest are fine.
    let range = SweepRange::new(0.5, 1.5, 0.25).unwrap();
    let results: Vec<_> = axis_ratio_sweep(range, 1.0, QuadratureConfig::default())
        .unwrap()
        .collect();

    assert_eq!(results.len(), 4);
    assert!(results[0].is_err());
    assert!(results[1].is_err());
    assert!(results[2].is_ok());
    assert!(results[3].is_ok());
}
