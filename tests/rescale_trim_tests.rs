//! Tests for input rescaling `f(alpha·x + beta)` and domain trimming.

use approx::assert_relative_eq;

use closedform::interpolation::interpolation::{
    create_constant_interpolation_to_left, create_constant_interpolation_to_right,
    create_linear_interpolation, Point2D,
};
use closedform::{
    ExtrapolationScheme, FunctionError, PiecewiseFunction, Term, UnivariateFunction,
};

use ExtrapolationScheme::{Curve, Error, Flat};

fn zigzag() -> UnivariateFunction {
    let points: Vec<Point2D> = vec![(0.0, 0.0), (1.0, 2.0), (2.0, 1.0), (3.0, 3.0)]
        .into_iter()
        .map(Point2D::from)
        .collect();
    create_linear_interpolation(&points, (Curve, Curve)).unwrap()
}

/// 2 on [0, 1), 5 on [1, 2]
fn step() -> UnivariateFunction {
    let constant = UnivariateFunction::constant;
    PiecewiseFunction::new(
        vec![0.0, 1.0, 2.0],
        vec![constant(2.0), constant(2.0), constant(5.0), constant(5.0)],
        Error,
        Error,
    )
    .unwrap()
    .into()
}

fn step_points() -> Vec<Point2D> {
    vec![(0.0, 1.0), (1.0, 3.0), (2.0, 2.0)]
        .into_iter()
        .map(Point2D::from)
        .collect()
}

// ============================================================================
// rescale_input
// ============================================================================

#[test]
fn test_rescale_term() {
    let f: UnivariateFunction = Term::new(2.0, 0.3, 1.0, 2).into();
    let g = f.rescale_input(1.5, -0.4);
    for x in [-2.0, -0.3, 0.0, 0.9, 2.6] {
        assert_relative_eq!(
            g.evaluate(x).unwrap(),
            f.evaluate(1.5 * x - 0.4).unwrap(),
            epsilon = 1e-10,
            max_relative = 1e-10
        );
    }
}

#[test]
fn test_rescale_sum() {
    let f = UnivariateFunction::sum(vec![
        Term::new(1.0, -0.5, 0.0, 3).into(),
        Term::new(0.25, 0.0, 2.0, 1).into(),
        Term::new(4.0, 0.1, -1.0, 0).into(),
    ]);
    let g = f.rescale_input(-0.7, 1.2);
    for x in [-2.0, -0.3, 0.0, 0.9, 2.6] {
        assert_relative_eq!(
            g.evaluate(x).unwrap(),
            f.evaluate(-0.7 * x + 1.2).unwrap(),
            epsilon = 1e-10,
            max_relative = 1e-10
        );
    }
}

/// A negative scale reverses the segment order and swaps the extrapolation sides.
#[test]
fn test_rescale_piecewise_with_negative_alpha() {
    let f: UnivariateFunction = PiecewiseFunction::new(
        vec![0.0, 1.0, 2.0],
        vec![
            UnivariateFunction::constant(2.0),
            UnivariateFunction::constant(2.0),
            Term::new(1.0, 0.0, 0.0, 1).into(),
            Term::new(1.0, 0.0, 0.0, 1).into(),
        ],
        Flat,
        Curve,
    )
    .unwrap()
    .into();
    let g = f.rescale_input(-2.0, 1.0);

    match &g {
        UnivariateFunction::Piecewise(p) => {
            assert_eq!(p.breakpoints(), &[-0.5, 0.0, 0.5]);
            assert_eq!(p.left_extrapolation(), Curve);
            assert_eq!(p.right_extrapolation(), Flat);
        }
        other => panic!("expected a piecewise function, got {}", other),
    }
    for x in [-3.0, -1.7, -0.3, 0.2, 0.9, 2.4] {
        assert_relative_eq!(
            g.evaluate(x).unwrap(),
            f.evaluate(-2.0 * x + 1.0).unwrap(),
            epsilon = 1e-12
        );
    }
}

#[test]
fn test_negative_alpha_keeps_values_at_breakpoints() {
    let f = step();
    let g = f.rescale_input(-1.0, 0.0);
    match &g {
        UnivariateFunction::Piecewise(p) => assert!(p.is_right_closed()),
        other => panic!("expected a piecewise function, got {}", other),
    }
    for x in [-2.0, -1.5, -1.0, -0.5, 0.0] {
        assert_eq!(g.evaluate(x), f.evaluate(-x), "x = {}", x);
    }
    assert_eq!(g.evaluate(-1.0), Some(5.0));
    assert_eq!(g.evaluate(0.1), None);

    // a second reflection restores the original closed side
    let h = g.rescale_input(-1.0, 0.0);
    for x in [0.0, 0.5, 1.0, 1.5, 2.0] {
        assert_eq!(h.evaluate(x), f.evaluate(x), "x = {}", x);
    }
}

#[test]
fn test_rescale_with_zero_alpha_is_constant() {
    let f = zigzag();
    let g = f.rescale_input(0.0, 1.5);
    assert_relative_eq!(g.evaluate(-10.0).unwrap(), 1.5, epsilon = 1e-12);
    assert_relative_eq!(g.evaluate(42.0).unwrap(), 1.5, epsilon = 1e-12);
}

#[test]
fn test_rescale_undefined_stays_undefined() {
    assert!(UnivariateFunction::Undefined.rescale_input(2.0, 1.0).is_undefined());
}

// ============================================================================
// trim
// ============================================================================

#[test]
fn test_trim_inside_domain() {
    let f = zigzag();
    let trimmed = f.trim(0.5, 2.5).unwrap();

    match &trimmed {
        UnivariateFunction::Piecewise(p) => assert_eq!(p.breakpoints(), &[0.5, 1.0, 2.0, 2.5]),
        other => panic!("expected a piecewise function, got {}", other),
    }
    for x in [0.5, 0.6, 1.0, 1.5, 2.2, 2.5] {
        assert_relative_eq!(trimmed.evaluate(x).unwrap(), f.evaluate(x).unwrap(), epsilon = 1e-12);
    }
    assert_eq!(trimmed.evaluate(0.4), None);
    assert_eq!(trimmed.evaluate(2.6), None);
}

#[test]
fn test_trim_at_interior_breakpoint_keeps_right_segment_value() {
    let f = step();
    let trimmed = f.trim(0.0, 1.0).unwrap();
    assert_eq!(f.evaluate(1.0), Some(5.0));
    assert_eq!(trimmed.evaluate(1.0), Some(5.0));
    assert_eq!(trimmed.evaluate(0.5), Some(2.0));
    assert_eq!(trimmed.evaluate(0.0), Some(2.0));
    assert_eq!(trimmed.evaluate(1.01), None);
}

#[test]
fn test_trim_step_interpolations_at_breakpoints() {
    let forward = create_constant_interpolation_to_right(&step_points(), (Flat, Flat)).unwrap();
    let trimmed = forward.trim(0.0, 1.0).unwrap();
    for x in [0.0, 0.5, 1.0] {
        assert_eq!(trimmed.evaluate(x), forward.evaluate(x), "x = {}", x);
    }

    let backward = create_constant_interpolation_to_left(&step_points(), (Flat, Flat)).unwrap();
    let trimmed = backward.trim(1.0, 2.0).unwrap();
    for x in [1.0, 1.5, 2.0] {
        assert_eq!(trimmed.evaluate(x), backward.evaluate(x), "x = {}", x);
    }
    assert_eq!(trimmed.evaluate(1.0), Some(3.0));
    assert_eq!(trimmed.evaluate(0.9), None);
}

#[test]
fn test_trim_beyond_domain_uses_extrapolation() {
    let f = zigzag();
    let trimmed = f.trim(-1.0, 1.0).unwrap();
    assert_relative_eq!(trimmed.evaluate(-0.5).unwrap(), -1.0, epsilon = 1e-12);
    assert_relative_eq!(trimmed.evaluate(0.5).unwrap(), 1.0, epsilon = 1e-12);
    assert_eq!(trimmed.evaluate(1.1), None);
}

#[test]
fn test_trim_plain_function() {
    let f: UnivariateFunction = Term::new(1.0, 0.0, 0.0, 2).into();
    let trimmed = f.trim(0.0, 1.0).unwrap();
    assert_relative_eq!(trimmed.evaluate(0.5).unwrap(), 0.25, epsilon = 1e-12);
    assert_eq!(trimmed.evaluate(2.0), None);
    assert_relative_eq!(trimmed.evaluate_integral(0.0, 1.0).unwrap(), 1.0 / 3.0, epsilon = 1e-12);
}

#[test]
fn test_trim_rejects_empty_interval() {
    let f = zigzag();
    assert!(matches!(f.trim(1.0, 1.0), Err(FunctionError::InvalidConstruction(_))));
    assert!(matches!(f.trim(2.0, 1.0), Err(FunctionError::InvalidConstruction(_))));
    assert!(matches!(f.trim(f64::NAN, 1.0), Err(FunctionError::InvalidConstruction(_))));
}
