use nalgebra::{
    DMatrix,
    DVector
};

use crate::function::functionerror::FunctionError;
use crate::function::term::Term;
use crate::function::univariatefunction::UnivariateFunction;

/// 最小平方法近似：
///   y ≈ β_0 + Σ_{k=1}^{degree} β_k (x - base_x)^k
///
/// `intercept = false` 時不含 β_0。以 SVD 求解，避免正規方程的條件數問題。
/// 回傳 b = 0、以 `base_x` 為基準的 term 之和。
pub fn create_ols_approximation(
    y: &[f64],
    x: &[f64],
    base_x: f64,
    degree: u32,
    intercept: bool,
) -> Result<UnivariateFunction, FunctionError> {
    if x.len() != y.len() {
        return Err(FunctionError::invalid_construction(format!(
            "x has {} observations but y has {}",
            x.len(),
            y.len()
        )));
    }
    let powers: Vec<u32> = if intercept {
        (0..=degree).collect()
    } else {
        (1..=degree).collect()
    };
    if powers.is_empty() {
        return Err(FunctionError::invalid_construction(
            "regression needs an intercept or a positive degree",
        ));
    }
    if x.len() < powers.len() {
        return Err(FunctionError::invalid_construction(format!(
            "{} predictors need at least as many observations, got {}",
            powers.len(),
            x.len()
        )));
    }

    let design = DMatrix::from_fn(x.len(), powers.len(), |r, c| {
        (x[r] - base_x).powi(powers[c] as i32)
    });
    let response = DVector::from_column_slice(y);
    let coefficients = design
        .svd(true, true)
        .solve(&response, 1e-12)
        .map_err(|error| FunctionError::invalid_construction(error.to_string()))?;

    let terms = powers
        .iter()
        .zip(coefficients.iter())
        .map(|(&power, &coefficient)| Term::new(coefficient, 0.0, base_x, power).into())
        .collect();
    Ok(UnivariateFunction::sum(terms))
}
