use tracing::debug;

use crate::function::functionerror::FunctionError;
use crate::function::piecewisefunction::{
    ExtrapolationScheme,
    PiecewiseFunction
};
use crate::function::univariatefunction::UnivariateFunction;

impl UnivariateFunction {
    /// g(x) = f(alpha·x + beta)
    ///
    /// 分段函數的 breakpoints 以反變換 (bp - beta)/alpha 重新對應；
    /// alpha < 0 時區段順序與兩側延伸方式一併反轉，breakpoint 改歸屬左側區段。
    /// alpha = 0 時結果為常數 f(beta)。
    pub fn rescale_input(&self, alpha: f64, beta: f64) -> UnivariateFunction {
        if alpha == 0.0 {
            return self
                .evaluate(beta)
                .map(UnivariateFunction::constant)
                .unwrap_or(UnivariateFunction::Undefined);
        }
        match self {
            UnivariateFunction::Undefined => UnivariateFunction::Undefined,
            UnivariateFunction::Term(term) => {
                UnivariateFunction::Term(term.rescale_input(alpha, beta))
            }
            UnivariateFunction::Sum(sum) => UnivariateFunction::sum(
                sum.children()
                    .iter()
                    .map(|c| c.rescale_input(alpha, beta))
                    .collect(),
            ),
            UnivariateFunction::Piecewise(piecewise) => {
                UnivariateFunction::Piecewise(piecewise.rescale_input(alpha, beta))
            }
        }
    }

    /// 將函數限制在 [left, right]，兩側延伸改為 `Error`。
    ///
    /// 跨越端點的區段會被切開；原定義域外但仍在 [left, right] 內的部分
    /// 依原本的延伸方式補上。[left, right] 內每一點的值與原函數相同，
    /// 端點恰好落在 breakpoint 上時也是如此。非分段函數視為單一區段。
    pub fn trim(&self, left: f64, right: f64) -> Result<UnivariateFunction, FunctionError> {
        if left.is_nan() || right.is_nan() || left >= right {
            return Err(FunctionError::invalid_construction(format!(
                "trim limits must satisfy left < right, got [{}, {}]",
                left, right
            )));
        }
        debug!(left, right, "trimming function");
        let trimmed = match self {
            UnivariateFunction::Undefined => return Ok(UnivariateFunction::Undefined),
            UnivariateFunction::Piecewise(piecewise) => piecewise.trim(left, right),
            other => PiecewiseFunction::assemble(
                vec![left, right],
                vec![UnivariateFunction::Undefined, other.clone(), other.clone()],
                ExtrapolationScheme::Error,
                ExtrapolationScheme::Error,
                false,
            ),
        };
        Ok(UnivariateFunction::Piecewise(trimmed))
    }
}
