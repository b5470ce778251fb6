use crate::function::functionerror::FunctionError;
use crate::function::piecewisefunction::{
    ExtrapolationScheme,
    PiecewiseFunction
};
use crate::function::term::Term;
use crate::function::univariatefunction::UnivariateFunction;
use crate::interpolation::interpolation::with_edge_segments;

/// 將已算好的二次樣條（例如 Schumaker 保形樣條）轉成 `PiecewiseFunction`。
///
/// 第 i 段係數 `[a, b, c]` 代表
///   a·(x - x_i)^2 + b·(x - x_i) + c,   x ∈ [x_i, x_{i+1})
///
/// 定義域外沿用第一段與最後一段的公式。節點與係數的求法不在此處理。
pub fn create_quadratic_spline(
    breakpoints: Vec<f64>,
    coefficients: &[[f64; 3]],
    extrapolation: (ExtrapolationScheme, ExtrapolationScheme),
) -> Result<UnivariateFunction, FunctionError> {
    if coefficients.is_empty() || breakpoints.len() != coefficients.len() + 1 {
        return Err(FunctionError::invalid_construction(format!(
            "{} coefficient triples need {} breakpoints, got {}",
            coefficients.len(),
            coefficients.len() + 1,
            breakpoints.len()
        )));
    }
    let interior = breakpoints
        .iter()
        .zip(coefficients.iter())
        .map(|(&lhs_x, &[a, b, c])| {
            UnivariateFunction::sum(vec![
                Term::new(a, 0.0, lhs_x, 2).into(),
                Term::new(b, 0.0, lhs_x, 1).into(),
                Term::new(c, 0.0, lhs_x, 0).into(),
            ])
        })
        .collect();
    let segments = with_edge_segments(interior);
    let piecewise = PiecewiseFunction::new(breakpoints, segments, extrapolation.0, extrapolation.1)?;
    Ok(UnivariateFunction::Piecewise(piecewise))
}
