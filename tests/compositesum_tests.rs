//! Tests for `CompositeSum` normalization and the sum/product algebra.

use approx::assert_relative_eq;

use closedform::{CompositeSum, Term, UnivariateFunction};

fn x() -> UnivariateFunction {
    Term::new(1.0, 0.0, 0.0, 1).into()
}

fn sample_points() -> Vec<f64> {
    vec![-2.1, -0.6, 0.0, 0.45, 1.3, 2.75]
}

#[test]
fn test_nested_sums_are_flattened() {
    let inner = UnivariateFunction::sum(vec![
        Term::new(1.0, 0.5, 0.0, 1).into(),
        Term::new(2.0, 0.0, 1.0, 2).into(),
    ]);
    let outer = CompositeSum::new(vec![inner, Term::new(3.0, -1.0, 2.0, 0).into()]);

    assert_eq!(outer.len(), 3);
    assert!(
        outer
            .children()
            .iter()
            .all(|c| !matches!(c, UnivariateFunction::Sum(_)))
    );
}

#[test]
fn test_like_terms_merge_in_order() {
    let sum = CompositeSum::new(vec![
        Term::new(1.0, 0.0, 0.0, 1).into(),
        Term::new(2.0, 0.0, 0.0, 2).into(),
        Term::new(3.0, 0.0, 0.0, 1).into(),
    ]);
    assert_eq!(sum.len(), 2);
    assert_eq!(sum.children()[0], UnivariateFunction::from(Term::new(4.0, 0.0, 0.0, 1)));
    assert_eq!(sum.children()[1], UnivariateFunction::from(Term::new(2.0, 0.0, 0.0, 2)));
}

#[test]
fn test_constants_merge_regardless_of_base() {
    let sum = CompositeSum::new(vec![
        Term::new(1.5, 0.0, 3.0, 0).into(),
        Term::new(2.5, 0.0, -1.0, 0).into(),
    ]);
    assert_eq!(sum.len(), 1);
    assert_relative_eq!(sum.evaluate(10.0).unwrap(), 4.0);
}

#[test]
fn test_cancelled_terms_are_dropped() {
    let difference = &x() - &x();
    assert_eq!(difference.evaluate(3.7), Some(0.0));

    let sum = UnivariateFunction::sum(vec![
        Term::new(1.0, 0.2, 0.0, 1).into(),
        Term::new(-1.0, 0.2, 0.0, 1).into(),
    ]);
    assert_eq!(sum, UnivariateFunction::zero());
}

#[test]
fn test_undefined_child_is_absorbing() {
    let sum = UnivariateFunction::sum(vec![x(), UnivariateFunction::Undefined]);
    assert!(sum.is_undefined());

    let raw = CompositeSum::new(vec![x(), UnivariateFunction::Undefined]);
    assert_eq!(raw.evaluate(1.0), None);
    assert_eq!(raw.evaluate_integral(0.0, 1.0), None);

    assert!((x() + UnivariateFunction::Undefined).is_undefined());
    assert!((x() * UnivariateFunction::Undefined).is_undefined());
}

#[test]
fn test_sum_calculus_is_flat() {
    let f = UnivariateFunction::sum(vec![
        Term::new(1.0, 1.0, 0.0, 1).into(),
        Term::new(1.0, 0.0, 0.0, 2).into(),
    ]);
    for g in [f.derivative(), f.indefinite_integral()] {
        if let UnivariateFunction::Sum(sum) = &g {
            assert!(
                sum.children()
                    .iter()
                    .all(|c| !matches!(c, UnivariateFunction::Sum(_)))
            );
        }
    }
    // d/dx (x e^x + x²) = e^x + x e^x + 2x
    let e = std::f64::consts::E;
    assert_relative_eq!(f.derivative().evaluate(1.0).unwrap(), 2.0 * e + 2.0, epsilon = 1e-12);
}

#[test]
fn test_product_distributes_over_sums() {
    // (x + 1)(x - 1) = x² - 1
    let product = (x() + 1.0) * (x() - 1.0);
    for x_value in sample_points() {
        assert_relative_eq!(
            product.evaluate(x_value).unwrap(),
            x_value * x_value - 1.0,
            epsilon = 1e-12
        );
    }
}

#[test]
fn test_operations_agree_with_pointwise_values() {
    let f = UnivariateFunction::sum(vec![
        Term::new(1.2, 0.3, 0.5, 2).into(),
        Term::new(-0.4, 0.0, 0.0, 1).into(),
    ]);
    let g = UnivariateFunction::sum(vec![
        Term::new(0.7, -0.2, -1.0, 1).into(),
        Term::new(2.0, 0.0, 0.0, 0).into(),
    ]);
    let sum = &f + &g;
    let difference = &f - &g;
    let product = &f * &g;
    let negated = -&f;
    for x_value in sample_points() {
        let fx = f.evaluate(x_value).unwrap();
        let gx = g.evaluate(x_value).unwrap();
        assert_relative_eq!(sum.evaluate(x_value).unwrap(), fx + gx, epsilon = 1e-10);
        assert_relative_eq!(difference.evaluate(x_value).unwrap(), fx - gx, epsilon = 1e-10);
        assert_relative_eq!(
            product.evaluate(x_value).unwrap(),
            fx * gx,
            epsilon = 1e-9,
            max_relative = 1e-9
        );
        assert_relative_eq!(negated.evaluate(x_value).unwrap(), -fx, epsilon = 1e-12);
    }
}

#[test]
fn test_power_of_sum() {
    // (x + 1)^3
    let cube = (x() + 1.0).powi(3).unwrap();
    assert_relative_eq!(cube.evaluate(2.0).unwrap(), 27.0, epsilon = 1e-12);
    assert_relative_eq!(cube.evaluate(-0.5).unwrap(), 0.125, epsilon = 1e-12);
}
