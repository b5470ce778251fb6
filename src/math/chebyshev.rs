use std::f64::consts::PI;

use crate::function::functionerror::FunctionError;
use crate::function::term::Term;
use crate::function::univariatefunction::UnivariateFunction;

// ─────────────────────────────────────────────
// Chebyshev 多項式
// ─────────────────────────────────────────────
//
// 三項遞迴：
//   第一類 T_0 = 1, T_1 = x,  T_k = 2x·T_{k-1} - T_{k-2}
//   第二類 U_0 = 1, U_1 = 2x, U_k = 2x·U_{k-1} - U_{k-2}
//
// 每一步都透過 Term / Sum 的運算子完成，等於順便驗證代數引擎。

pub fn chebyshev_sequence(n: usize, first_kind: bool) -> Vec<UnivariateFunction> {
    let mut sequence = Vec::with_capacity(n);
    if n == 0 {
        return sequence;
    }
    sequence.push(UnivariateFunction::constant(1.0));
    if n == 1 {
        return sequence;
    }

    let x = UnivariateFunction::from(Term::new(1.0, 0.0, 0.0, 1));
    let two_x = &x * 2.0;
    sequence.push(if first_kind { x } else { two_x.clone() });
    for k in 2..n {
        let next = &two_x * &sequence[k - 1] - &sequence[k - 2];
        sequence.push(next);
    }
    sequence
}

/// 以 Chebyshev 基底近似 `func`，定義在 [left, right]。
///
/// 節點 z_k = -cos((2k-1)π / (2·nodes))，係數
///   c_i = Σ_k y_k T_i(z_k) / Σ_k T_i(z_k)^2
/// 再以 `rescale_input` 把 [left, right] 映到 [-1, 1]。
/// 結果可直接解析積分，即 Chebyshev–Gauss 求積。
pub fn create_chebyshev_approximation<F>(
    func: F,
    nodes: usize,
    degree: usize,
    left: f64,
    right: f64,
) -> Result<UnivariateFunction, FunctionError>
where
    F: Fn(f64) -> f64,
{
    if nodes == 0 || degree >= nodes {
        return Err(FunctionError::invalid_construction(format!(
            "degree {} needs more than {} approximation nodes",
            degree, nodes
        )));
    }
    if !(left < right) || !left.is_finite() || !right.is_finite() {
        return Err(FunctionError::invalid_construction(format!(
            "approximation interval [{}, {}] is not a finite interval",
            left, right
        )));
    }

    let half_width = (right - left) / 2.0;
    let z: Vec<f64> = (1..=nodes)
        .map(|k| -((2 * k - 1) as f64 * PI / (2 * nodes) as f64).cos())
        .collect();
    let y: Vec<f64> = z.iter().map(|zk| func((zk + 1.0) * half_width + left)).collect();

    let polynomials = chebyshev_sequence(degree + 1, true);
    let mut approximation = UnivariateFunction::zero();
    for (i, polynomial) in polynomials.iter().enumerate() {
        let t: Vec<f64> = z.iter().map(|zk| (i as f64 * zk.acos()).cos()).collect();
        let numerator: f64 = t.iter().zip(y.iter()).map(|(ti, yi)| ti * yi).sum();
        let denominator: f64 = t.iter().map(|ti| ti * ti).sum();
        approximation = approximation + polynomial * (numerator / denominator);
    }

    let alpha = 2.0 / (right - left);
    let beta = -(right + left) / (right - left);
    Ok(approximation.rescale_input(alpha, beta))
}
