use tracing::warn;

use crate::function::term::Term;
use crate::function::univariatefunction::UnivariateFunction;

// ─────────────────────────────────────────────
// 換底（base change）
// ─────────────────────────────────────────────
//
//   a e^{b(x-base)} (x-base)^d
//     = a e^{b·δ} e^{b(x-new)} ((x-new) + δ)^d,       δ = new - base
//     = Σ_k a e^{b·δ} C(d,k) δ^{d-k} · e^{b(x-new)} (x-new)^k
//
// 在實數下是精確的，但 |b·δ| 很大時 e^{b·δ} 會超出浮點範圍。
// 此時遵循 IEEE 語意（inf / 0），不轉成錯誤，只留下診斷訊息。

pub fn change_base(term: &Term, new_base: f64) -> UnivariateFunction {
    let terms = base_changed_terms(term, new_base)
        .into_iter()
        .map(UnivariateFunction::from)
        .collect();
    UnivariateFunction::sum(terms)
}

pub(crate) fn base_changed_terms(term: &Term, new_base: f64) -> Vec<Term> {
    if term.base() == new_base {
        return vec![*term];
    }
    let delta = new_base - term.base();
    let scale = term.a() * (term.b() * delta).exp();
    let d = term.d();

    let mut binomial = 1.0;
    let mut terms = Vec::with_capacity(d as usize + 1);
    for k in 0..=d {
        let coefficient = scale * binomial * delta.powi((d - k) as i32);
        terms.push(Term::new(coefficient, term.b(), new_base, k));
        binomial = binomial * (d - k) as f64 / (k + 1) as f64;
    }

    if terms.iter().any(|t| !t.a().is_finite()) {
        warn!(
            old_base = term.base(),
            new_base,
            exponent = term.b() * delta,
            "base change left the floating-point range"
        );
    }
    terms
}
