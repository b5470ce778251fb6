use std::fmt;

use crate::function::compositesum::CompositeSum;
use crate::function::piecewisefunction::PiecewiseFunction;
use crate::function::term::Term;

/// 封閉形式的單變數函數。
///
/// 四個變體構成封閉的 sum type，每個運算都必須明確處理全部四種情形：
/// - `Undefined`：吸收性的缺值標記，任何運算碰到它結果都是 `Undefined`
/// - `Term`：`a·exp(b·(x-base))·(x-base)^d`
/// - `Sum`：已攤平的子函數和
/// - `Piecewise`：分段函數
///
/// 所有值皆不可變，運算一律產生新的樹，因此同一個函數可以跨執行緒共用。
#[derive(Debug, Clone, PartialEq)]
pub enum UnivariateFunction {
    Undefined,
    Term(Term),
    Sum(CompositeSum),
    Piecewise(PiecewiseFunction),
}

impl UnivariateFunction {
    pub fn constant(c: f64) -> UnivariateFunction {
        UnivariateFunction::Term(Term::constant(c))
    }

    pub fn zero() -> UnivariateFunction {
        UnivariateFunction::constant(0.0)
    }

    /// 正規化的加總：攤平、合併同類項；任一子項為 `Undefined` 則整體為 `Undefined`。
    /// 空的和為常數 0，單一子項直接回傳該子項。
    pub fn sum(children: Vec<UnivariateFunction>) -> UnivariateFunction {
        let composite = CompositeSum::new(children);
        if composite.children().iter().any(|c| c.is_undefined()) {
            return UnivariateFunction::Undefined;
        }
        match composite.len() {
            0 => UnivariateFunction::zero(),
            1 => composite
                .into_children()
                .into_iter()
                .next()
                .unwrap_or_else(UnivariateFunction::zero),
            _ => UnivariateFunction::Sum(composite),
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, UnivariateFunction::Undefined)
    }

    /// `None` 代表 undefined（缺值），不是數值錯誤。
    pub fn evaluate(&self, x: f64) -> Option<f64> {
        match self {
            UnivariateFunction::Undefined => None,
            UnivariateFunction::Term(term) => Some(term.evaluate(x)),
            UnivariateFunction::Sum(sum) => sum.evaluate(x),
            UnivariateFunction::Piecewise(piecewise) => piecewise.evaluate(x),
        }
    }

    pub fn derivative(&self) -> UnivariateFunction {
        match self {
            UnivariateFunction::Undefined => UnivariateFunction::Undefined,
            UnivariateFunction::Term(term) => term.derivative(),
            UnivariateFunction::Sum(sum) => sum.derivative(),
            UnivariateFunction::Piecewise(piecewise) => {
                UnivariateFunction::Piecewise(piecewise.derivative())
            }
        }
    }

    pub fn indefinite_integral(&self) -> UnivariateFunction {
        match self {
            UnivariateFunction::Undefined => UnivariateFunction::Undefined,
            UnivariateFunction::Term(term) => term.indefinite_integral(),
            UnivariateFunction::Sum(sum) => sum.indefinite_integral(),
            UnivariateFunction::Piecewise(piecewise) => {
                UnivariateFunction::Piecewise(piecewise.indefinite_integral())
            }
        }
    }

    /// ∫_left^right f(x) dx，以解析反導數計算（非數值積分）。
    /// `left > right` 時結果變號。
    pub fn evaluate_integral(&self, left: f64, right: f64) -> Option<f64> {
        match self {
            UnivariateFunction::Undefined => None,
            UnivariateFunction::Term(term) => Some(term.evaluate_integral(left, right)),
            UnivariateFunction::Sum(sum) => sum.evaluate_integral(left, right),
            UnivariateFunction::Piecewise(piecewise) => piecewise.evaluate_integral(left, right),
        }
    }

    /// g(x) = ∫_left^x f，即 g(left) = 0。
    pub fn right_integral(&self, left: f64) -> UnivariateFunction {
        let antiderivative = self.indefinite_integral();
        match antiderivative.evaluate(left) {
            Some(anchor) => antiderivative - anchor,
            None => UnivariateFunction::Undefined,
        }
    }

    /// g(x) = ∫_x^right f = G(right) - G(x)。
    ///
    /// 方向與 `right_integral` 相反：被積函數非負時，x < right 的值非負，
    /// x > right 的值非正。
    pub fn left_integral(&self, right: f64) -> UnivariateFunction {
        let antiderivative = self.indefinite_integral();
        match antiderivative.evaluate(right) {
            Some(anchor) => anchor - antiderivative,
            None => UnivariateFunction::Undefined,
        }
    }
}

impl From<Term> for UnivariateFunction {
    fn from(term: Term) -> Self {
        UnivariateFunction::Term(term)
    }
}

impl From<CompositeSum> for UnivariateFunction {
    fn from(sum: CompositeSum) -> Self {
        UnivariateFunction::sum(sum.into_children())
    }
}

impl From<PiecewiseFunction> for UnivariateFunction {
    fn from(piecewise: PiecewiseFunction) -> Self {
        UnivariateFunction::Piecewise(piecewise)
    }
}

impl From<f64> for UnivariateFunction {
    fn from(c: f64) -> Self {
        UnivariateFunction::constant(c)
    }
}

impl fmt::Display for UnivariateFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnivariateFunction::Undefined => write!(f, "undefined"),
            UnivariateFunction::Term(term) => write!(f, "{}", term),
            UnivariateFunction::Sum(sum) => {
                for (i, child) in sum.children().iter().enumerate() {
                    if i > 0 {
                        write!(f, " + ")?;
                    }
                    write!(f, "{}", child)?;
                }
                Ok(())
            }
            UnivariateFunction::Piecewise(piecewise) => {
                write!(f, "piecewise[{:?}", piecewise.left_extrapolation())?;
                let breakpoints = piecewise.breakpoints();
                let (open, close) = if piecewise.is_right_closed() { ("(", "]") } else { ("[", ")") };
                for (i, segment) in piecewise.segments().iter().enumerate() {
                    let lower = if i == 0 { f64::NEG_INFINITY } else { breakpoints[i - 1] };
                    let upper = breakpoints.get(i).copied().unwrap_or(f64::INFINITY);
                    write!(f, "; {}{}, {}{}: {}", open, lower, upper, close, segment)?;
                }
                write!(f, "; {:?}]", piecewise.right_extrapolation())
            }
        }
    }
}
