use std::fmt;

use crate::function::basechange::base_changed_terms;
use crate::function::functionerror::FunctionError;
use crate::function::univariatefunction::UnivariateFunction;

// ─────────────────────────────────────────────
// Term
// ─────────────────────────────────────────────
//
// 基本單元：
//   f(x) = a · exp(b·(x-base)) · (x-base)^d,  d ≥ 0
//
// 所有代數與微積分運算最終都化約成 Term 上的封閉形式規則。

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Term {
    a: f64,
    b: f64,
    base: f64,
    d: u32,
}

impl Term {
    pub fn new(a: f64, b: f64, base: f64, d: u32) -> Term {
        Term { a, b, base, d }
    }

    pub fn constant(c: f64) -> Term {
        Term::new(c, 0.0, 0.0, 0)
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    pub fn base(&self) -> f64 {
        self.base
    }

    pub fn d(&self) -> u32 {
        self.d
    }

    pub fn is_constant(&self) -> bool {
        self.b == 0.0 && self.d == 0
    }

    pub fn is_zero(&self) -> bool {
        self.a == 0.0
    }

    /// 兩個 term 的 `(b, base, d)` 相同時可直接合併係數。
    /// 常數項與 base 無關，因此只要 `b = 0, d = 0` 即視為同類。
    pub fn is_like(&self, other: &Term) -> bool {
        if self.is_constant() && other.is_constant() {
            return true;
        }
        self.b == other.b && self.base == other.base && self.d == other.d
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        if self.a == 0.0 {
            return 0.0;
        }
        let u = x - self.base;
        if u == 0.0 {
            return if self.d == 0 { self.a } else { 0.0 };
        }
        self.a * (self.b * u).exp() * powu(u, self.d)
    }

    /// 乘積法則：
    ///   d/dx [a e^{bu} u^d] = a·b e^{bu} u^d + a·d e^{bu} u^{d-1}
    pub fn derivative(&self) -> UnivariateFunction {
        if self.d == 0 {
            return Term::new(self.a * self.b, self.b, self.base, 0).into();
        }
        let power_part = Term::new(self.a * self.d as f64, self.b, self.base, self.d - 1);
        if self.b == 0.0 {
            return power_part.into();
        }
        UnivariateFunction::sum(vec![
            Term::new(self.a * self.b, self.b, self.base, self.d).into(),
            power_part.into(),
        ])
    }

    pub fn indefinite_integral(&self) -> UnivariateFunction {
        let terms = self
            .antiderivative_terms()
            .into_iter()
            .map(UnivariateFunction::from)
            .collect();
        UnivariateFunction::sum(terms)
    }

    /// 分部積分遞迴：
    ///   ∫ a e^{bu} u^d du = (a/b) e^{bu} u^d - (d/b) ∫ a e^{bu} u^{d-1} du
    /// 直到 d = 0 為止，最多 d+1 項，積分常數為 0。
    fn antiderivative_terms(&self) -> Vec<Term> {
        if self.b == 0.0 {
            return vec![Term::new(
                self.a / (self.d + 1) as f64,
                0.0,
                self.base,
                self.d + 1,
            )];
        }
        let mut terms = Vec::with_capacity(self.d as usize + 1);
        let mut coefficient = self.a / self.b;
        for power in (0..=self.d).rev() {
            terms.push(Term::new(coefficient, self.b, self.base, power));
            coefficient *= -(power as f64) / self.b;
        }
        terms
    }

    pub fn evaluate_integral(&self, left: f64, right: f64) -> f64 {
        self.antiderivative_terms()
            .iter()
            .map(|t| t.evaluate(right) - t.evaluate(left))
            .sum()
    }

    pub fn scale(&self, factor: f64) -> Term {
        Term::new(self.a * factor, self.b, self.base, self.d)
    }

    pub fn add_term(&self, other: &Term) -> UnivariateFunction {
        if self.is_like(other) {
            return Term::new(self.a + other.a, self.b, self.base, self.d).into();
        }
        UnivariateFunction::sum(vec![(*self).into(), (*other).into()])
    }

    /// base 相同時直接相乘；否則先把 `other` 換到 `self.base`。
    /// 換底可能造成極端的縮放係數（見 `basechange`）。
    pub fn mul_term(&self, other: &Term) -> UnivariateFunction {
        if other.is_constant() {
            return self.scale(other.a).into();
        }
        if self.is_constant() {
            return other.scale(self.a).into();
        }
        if self.base == other.base {
            return self.same_base_product(other).into();
        }
        let products = base_changed_terms(other, self.base)
            .iter()
            .map(|t| self.same_base_product(t).into())
            .collect();
        UnivariateFunction::sum(products)
    }

    fn same_base_product(&self, other: &Term) -> Term {
        Term::new(self.a * other.a, self.b + other.b, self.base, self.d + other.d)
    }

    /// 次數 d·n 超出 `u32` 時回傳 `InvalidOperation`。
    pub fn powi(&self, n: u32) -> Result<Term, FunctionError> {
        let d = self.d.checked_mul(n).ok_or_else(|| {
            FunctionError::invalid_operation(format!("degree of ({})^{} overflows", self, n))
        })?;
        Ok(Term::new(powu(self.a, n), self.b * n as f64, self.base, d))
    }

    /// g(x) = f(alpha·x + beta)
    ///
    /// alpha·x + beta - base = alpha·(x - (base - beta)/alpha)，
    /// 因此 b → b·alpha，base → (base - beta)/alpha，a → a·alpha^d。
    pub fn rescale_input(&self, alpha: f64, beta: f64) -> Term {
        Term::new(
            self.a * powu(alpha, self.d),
            self.b * alpha,
            (self.base - beta) / alpha,
            self.d,
        )
    }
}

/// `f64::powi` 只接受 `i32`，超出範圍的次方改用 `powf`。
fn powu(x: f64, n: u32) -> f64 {
    match i32::try_from(n) {
        Ok(n) => x.powi(n),
        Err(_) => x.powf(n as f64),
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.a)?;
        if self.b != 0.0 {
            write!(f, "·exp({}(x-{}))", self.b, self.base)?;
        }
        match self.d {
            0 => Ok(()),
            1 => write!(f, "·(x-{})", self.base),
            d => write!(f, "·(x-{})^{}", self.base, d),
        }
    }
}
