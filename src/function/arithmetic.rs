use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::function::functionerror::FunctionError;
use crate::function::univariatefunction::UnivariateFunction;

// ─────────────────────────────────────────────
// 代數引擎：+ - * ^
// ─────────────────────────────────────────────
//
// 分派順序：
//   1. Undefined 吸收一切
//   2. Piecewise 逐段處理（兩者皆 piecewise 時合併 breakpoints）
//   3. 乘法對 Sum 分配
//   4. Term 與 Term 套用封閉規則

pub(crate) fn add_functions(lhs: &UnivariateFunction, rhs: &UnivariateFunction) -> UnivariateFunction {
    use UnivariateFunction::*;
    match (lhs, rhs) {
        (Undefined, _) | (_, Undefined) => Undefined,
        (Piecewise(p), Piecewise(q)) => Piecewise(p.combine(q, add_functions)),
        (Piecewise(p), other) => Piecewise(p.materialize().map_segments(|s| add_functions(s, other))),
        (other, Piecewise(p)) => Piecewise(p.materialize().map_segments(|s| add_functions(other, s))),
        (Term(s), Term(t)) => s.add_term(t),
        _ => UnivariateFunction::sum(vec![lhs.clone(), rhs.clone()]),
    }
}

pub(crate) fn mul_functions(lhs: &UnivariateFunction, rhs: &UnivariateFunction) -> UnivariateFunction {
    use UnivariateFunction::*;
    match (lhs, rhs) {
        (Undefined, _) | (_, Undefined) => Undefined,
        (Piecewise(p), Piecewise(q)) => Piecewise(p.combine(q, mul_functions)),
        (Piecewise(p), other) => Piecewise(p.materialize().map_segments(|s| mul_functions(s, other))),
        (other, Piecewise(p)) => Piecewise(p.materialize().map_segments(|s| mul_functions(other, s))),
        (Sum(s), other) => UnivariateFunction::sum(
            s.children().iter().map(|c| mul_functions(c, other)).collect(),
        ),
        (other, Sum(s)) => UnivariateFunction::sum(
            s.children().iter().map(|c| mul_functions(other, c)).collect(),
        ),
        (Term(s), Term(t)) => s.mul_term(t),
    }
}

impl UnivariateFunction {
    /// 乘上純量。Piecewise 的 Flat 延伸在縮放後仍是 Flat，不需具體化。
    pub fn scale(&self, factor: f64) -> UnivariateFunction {
        match self {
            UnivariateFunction::Undefined => UnivariateFunction::Undefined,
            UnivariateFunction::Term(term) => UnivariateFunction::Term(term.scale(factor)),
            UnivariateFunction::Sum(sum) => {
                UnivariateFunction::sum(sum.children().iter().map(|c| c.scale(factor)).collect())
            }
            UnivariateFunction::Piecewise(piecewise) => {
                UnivariateFunction::Piecewise(piecewise.map_segments(|s| s.scale(factor)))
            }
        }
    }

    /// 非負整數次方。負次方無法維持封閉形式，回傳 `InvalidOperation`。
    pub fn powi(&self, n: i32) -> Result<UnivariateFunction, FunctionError> {
        if n < 0 {
            return Err(FunctionError::invalid_operation(format!(
                "negative power {} is not closed under integration",
                n
            )));
        }
        self.pow_natural(n as u32)
    }

    /// 只接受非負整數值的指數，例如 `2.0`；`0.5`、`-1.0` 等一律失敗。
    pub fn powf(&self, p: f64) -> Result<UnivariateFunction, FunctionError> {
        if !p.is_finite() || p < 0.0 || p.fract() != 0.0 || p > i32::MAX as f64 {
            return Err(FunctionError::invalid_operation(format!(
                "power {} is not a non-negative integer",
                p
            )));
        }
        self.powi(p as i32)
    }

    /// Piecewise 逐段取次方，n = 0 時仍保留 Undefined 區段與 Error 延伸。
    /// 次數溢位時回傳 `InvalidOperation`。
    pub(crate) fn pow_natural(&self, n: u32) -> Result<UnivariateFunction, FunctionError> {
        match self {
            UnivariateFunction::Undefined => Ok(UnivariateFunction::Undefined),
            UnivariateFunction::Piecewise(piecewise) => {
                Ok(UnivariateFunction::Piecewise(piecewise.powi(n)?))
            }
            _ if n == 0 => Ok(UnivariateFunction::constant(1.0)),
            UnivariateFunction::Term(term) => Ok(UnivariateFunction::Term(term.powi(n)?)),
            UnivariateFunction::Sum(sum) => {
                // 先檢查最高次數，避免展開到一半才溢位
                for child in sum.children() {
                    if let UnivariateFunction::Term(term) = child {
                        term.powi(n)?;
                    }
                }
                let mut result = self.clone();
                for _ in 1..n {
                    result = mul_functions(&result, self);
                }
                Ok(result)
            }
        }
    }

    /// 以函數為除數一律失敗：商不一定能以封閉形式微分、積分。
    /// 以純量為除數請用 `/` 運算子。
    pub fn try_div(&self, _divisor: &UnivariateFunction) -> Result<UnivariateFunction, FunctionError> {
        Err(FunctionError::invalid_operation(
            "division by a function is not supported, only by a scalar",
        ))
    }
}

// ─────────────────────────────────────────────
// 運算子
// ─────────────────────────────────────────────

impl Neg for UnivariateFunction {
    type Output = UnivariateFunction;

    fn neg(self) -> Self::Output {
        self.scale(-1.0)
    }
}

impl Neg for &UnivariateFunction {
    type Output = UnivariateFunction;

    fn neg(self) -> Self::Output {
        self.scale(-1.0)
    }
}

macro_rules! impl_function_operator {
    ($trait:ident, $method:ident, $body:expr) => {
        impl $trait<UnivariateFunction> for UnivariateFunction {
            type Output = UnivariateFunction;

            fn $method(self, rhs: UnivariateFunction) -> Self::Output {
                $body(&self, &rhs)
            }
        }

        impl $trait<&UnivariateFunction> for UnivariateFunction {
            type Output = UnivariateFunction;

            fn $method(self, rhs: &UnivariateFunction) -> Self::Output {
                $body(&self, rhs)
            }
        }

        impl $trait<UnivariateFunction> for &UnivariateFunction {
            type Output = UnivariateFunction;

            fn $method(self, rhs: UnivariateFunction) -> Self::Output {
                $body(self, &rhs)
            }
        }

        impl $trait<&UnivariateFunction> for &UnivariateFunction {
            type Output = UnivariateFunction;

            fn $method(self, rhs: &UnivariateFunction) -> Self::Output {
                $body(self, rhs)
            }
        }

        impl $trait<f64> for UnivariateFunction {
            type Output = UnivariateFunction;

            fn $method(self, rhs: f64) -> Self::Output {
                $body(&self, &UnivariateFunction::constant(rhs))
            }
        }

        impl $trait<f64> for &UnivariateFunction {
            type Output = UnivariateFunction;

            fn $method(self, rhs: f64) -> Self::Output {
                $body(self, &UnivariateFunction::constant(rhs))
            }
        }

        impl $trait<UnivariateFunction> for f64 {
            type Output = UnivariateFunction;

            fn $method(self, rhs: UnivariateFunction) -> Self::Output {
                $body(&UnivariateFunction::constant(self), &rhs)
            }
        }

        impl $trait<&UnivariateFunction> for f64 {
            type Output = UnivariateFunction;

            fn $method(self, rhs: &UnivariateFunction) -> Self::Output {
                $body(&UnivariateFunction::constant(self), rhs)
            }
        }
    };
}

fn sub_functions(lhs: &UnivariateFunction, rhs: &UnivariateFunction) -> UnivariateFunction {
    add_functions(lhs, &rhs.scale(-1.0))
}

fn mul_dispatch(lhs: &UnivariateFunction, rhs: &UnivariateFunction) -> UnivariateFunction {
    // 純量乘法走 scale，保留 Flat 延伸
    match (lhs, rhs) {
        (UnivariateFunction::Term(t), other) | (other, UnivariateFunction::Term(t))
            if t.is_constant() =>
        {
            other.scale(t.a())
        }
        _ => mul_functions(lhs, rhs),
    }
}

impl_function_operator!(Add, add, add_functions);
impl_function_operator!(Sub, sub, sub_functions);
impl_function_operator!(Mul, mul, mul_dispatch);

impl Div<f64> for UnivariateFunction {
    type Output = UnivariateFunction;

    fn div(self, rhs: f64) -> Self::Output {
        self.scale(1.0 / rhs)
    }
}

impl Div<f64> for &UnivariateFunction {
    type Output = UnivariateFunction;

    fn div(self, rhs: f64) -> Self::Output {
        self.scale(1.0 / rhs)
    }
}
