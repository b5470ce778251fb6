use chrono::NaiveDate;

use closedform::function::piecewisefunction::ExtrapolationScheme;
use closedform::function::term::Term;
use closedform::function::univariatefunction::UnivariateFunction;
use closedform::interpolation::interpolation::create_linear_interpolation;
use closedform::time::dateconversion::DateConversion;

fn main() {
    let f = UnivariateFunction::from(Term::new(1.0, 2.0, 4.0, 5));
    let g = UnivariateFunction::from(Term::new(1.3, 2.0, 4.3, 2));
    let h = UnivariateFunction::from(Term::new(5.0, 2.2, 1.0, 0));
    let result_of_operations = match (&h * (&f + &g)).powi(2) {
        Ok(function) => function,
        Err(error) => {
            eprintln!("{}", error);
            return;
        }
    };
    match result_of_operations.evaluate_integral(2.0, 2.8) {
        Some(value) => println!("(h(f+g))^2 integrated over [2.0, 2.8]: {}", value),
        None => println!("(h(f+g))^2 is undefined over [2.0, 2.8]"),
    }

    let conversion = DateConversion::default();
    let start = NaiveDate::from_ymd_opt(2018, 7, 21).unwrap_or(conversion.global_base_date());
    let points: Vec<_> = (0..10)
        .filter_map(|i| start.checked_add_days(chrono::Days::new(30 * i)))
        .map(|d| {
            let t = conversion.years_from_global_base(d);
            conversion.point(d, t.ln() + t.sqrt())
        })
        .collect();
    let curve = match create_linear_interpolation(
        &points,
        (ExtrapolationScheme::Flat, ExtrapolationScheme::Curve),
    ) {
        Ok(curve) => curve,
        Err(error) => {
            eprintln!("{}", error);
            return;
        }
    };
    let d1 = NaiveDate::from_ymd_opt(2018, 9, 1).unwrap_or(start);
    let d2 = NaiveDate::from_ymd_opt(2019, 1, 2).unwrap_or(start);
    println!("value at {}: {:?}", d1, conversion.evaluate(&curve, d1));
    println!("slope at {}: {:?}", d2, conversion.evaluate(&curve.derivative(), d2));
    println!("integral {} to {}: {:?}", d1, d2, conversion.evaluate_integral(&curve, d1, d2));
}
