//! Properties the calculus operations must satisfy for every variant:
//! the fundamental theorem, additivity of integrals and linearity.

use approx::assert_relative_eq;

use closedform::interpolation::interpolation::{create_linear_interpolation, Point2D};
use closedform::{ExtrapolationScheme, PiecewiseFunction, Term, UnivariateFunction};

use ExtrapolationScheme::{Curve, Flat};

fn functions() -> Vec<UnivariateFunction> {
    let points: Vec<Point2D> = vec![(-1.0, 0.5), (0.0, 1.5), (1.5, -0.5), (2.0, 2.0)]
        .into_iter()
        .map(Point2D::from)
        .collect();
    vec![
        Term::new(1.3, -0.6, 0.4, 3).into(),
        UnivariateFunction::sum(vec![
            Term::new(0.5, 0.2, 0.0, 2).into(),
            Term::new(-2.0, 0.0, 1.0, 1).into(),
            Term::new(1.0, -1.0, -0.5, 0).into(),
        ]),
        create_linear_interpolation(&points, (Flat, Flat)).unwrap(),
        PiecewiseFunction::new(
            vec![-0.5, 0.7, 1.9],
            vec![
                Term::new(1.0, 0.5, -0.5, 1).into(),
                Term::new(1.0, 0.5, -0.5, 1).into(),
                Term::new(2.0, 0.0, 0.0, 2).into(),
                Term::new(0.7, 0.1, 0.0, 1).into(),
            ],
            Curve,
            Flat,
        )
        .unwrap()
        .into(),
    ]
}

/// Points strictly inside segments, so one-sided limits never matter.
fn interior_points() -> Vec<f64> {
    vec![-2.3, -0.8, -0.2, 0.3, 1.1, 1.7, 2.4, 3.1]
}

#[test]
fn test_derivative_of_antiderivative_recovers_function() {
    for f in functions() {
        let round_trip = f.indefinite_integral().derivative();
        for x in interior_points() {
            assert_relative_eq!(
                round_trip.evaluate(x).unwrap(),
                f.evaluate(x).unwrap(),
                epsilon = 1e-9,
                max_relative = 1e-9
            );
        }
    }
}

#[test]
fn test_definite_integral_matches_antiderivative_difference() {
    for f in functions() {
        let antiderivative = f.indefinite_integral();
        for (left, right) in [(-2.3, 3.1), (-0.8, 0.3), (1.1, 1.7), (2.4, -0.2)] {
            assert_relative_eq!(
                f.evaluate_integral(left, right).unwrap(),
                antiderivative.evaluate(right).unwrap() - antiderivative.evaluate(left).unwrap(),
                epsilon = 1e-9,
                max_relative = 1e-9
            );
        }
    }
}

#[test]
fn test_integral_is_additive() {
    for f in functions() {
        for (a, b, c) in [(-0.5, 1.3, 2.7), (-2.0, 0.0, 1.5), (0.1, 0.2, 0.3)] {
            let whole = f.evaluate_integral(a, c).unwrap();
            let split = f.evaluate_integral(a, b).unwrap() + f.evaluate_integral(b, c).unwrap();
            assert_relative_eq!(whole, split, epsilon = 1e-9, max_relative = 1e-9);
        }
    }
}

#[test]
fn test_right_integral_derivative_recovers_function() {
    for f in functions() {
        let g = f.right_integral(0.3);
        assert_relative_eq!(g.evaluate(0.3).unwrap(), 0.0, epsilon = 1e-9);
        for x in interior_points() {
            assert_relative_eq!(
                g.evaluate(x).unwrap(),
                f.evaluate_integral(0.3, x).unwrap(),
                epsilon = 1e-9,
                max_relative = 1e-9
            );
        }
    }
}

#[test]
fn test_calculus_is_linear() {
    let all = functions();
    let (f, g) = (&all[1], &all[2]);
    let combination = 2.0 * f - 0.5 * g;
    let derivative = combination.derivative();
    let (df, dg) = (f.derivative(), g.derivative());
    for x in interior_points() {
        assert_relative_eq!(
            derivative.evaluate(x).unwrap(),
            2.0 * df.evaluate(x).unwrap() - 0.5 * dg.evaluate(x).unwrap(),
            epsilon = 1e-9,
            max_relative = 1e-9
        );
    }
    assert_relative_eq!(
        combination.evaluate_integral(-1.0, 2.5).unwrap(),
        2.0 * f.evaluate_integral(-1.0, 2.5).unwrap() - 0.5 * g.evaluate_integral(-1.0, 2.5).unwrap(),
        epsilon = 1e-9,
        max_relative = 1e-9
    );
}

/// (h·(f + g))² over [2.0, 2.8] against a midpoint-rule estimate.
#[test]
fn test_integral_of_composed_expression() {
    let f: UnivariateFunction = Term::new(1.0, 2.0, 4.0, 5).into();
    let g: UnivariateFunction = Term::new(1.3, 2.0, 4.3, 2).into();
    let h: UnivariateFunction = Term::new(5.0, 2.2, 1.0, 0).into();
    let expression = (&h * (&f + &g)).powi(2).unwrap();

    let pointwise = |x: f64| {
        let value = h.evaluate(x).unwrap() * (f.evaluate(x).unwrap() + g.evaluate(x).unwrap());
        value * value
    };
    let steps = 20_000;
    let width = 0.8 / steps as f64;
    let midpoint: f64 = (0..steps)
        .map(|i| pointwise(2.0 + (i as f64 + 0.5) * width) * width)
        .sum();

    assert_relative_eq!(
        expression.evaluate_integral(2.0, 2.8).unwrap(),
        midpoint,
        max_relative = 1e-6
    );
}
