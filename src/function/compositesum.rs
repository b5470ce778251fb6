use crate::function::term::Term;
use crate::function::univariatefunction::UnivariateFunction;

/// 子函數的和。
///
/// 建構時即攤平：子函數本身若是 `CompositeSum`，其子項直接併入，
/// 因此任何 `CompositeSum` 的子項都不會再是 `CompositeSum`。
/// 同類 term（`Term::is_like`）由左至右合併，係數為 0 的 term 移除。
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeSum {
    children: Vec<UnivariateFunction>,
}

impl CompositeSum {
    pub fn new(children: Vec<UnivariateFunction>) -> CompositeSum {
        let mut flattened: Vec<UnivariateFunction> = Vec::with_capacity(children.len());
        for child in children {
            match child {
                UnivariateFunction::Sum(sum) => flattened.extend(sum.children),
                other => flattened.push(other),
            }
        }
        CompositeSum {
            children: merge_like_terms(flattened),
        }
    }

    pub fn children(&self) -> &[UnivariateFunction] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub(crate) fn into_children(self) -> Vec<UnivariateFunction> {
        self.children
    }

    pub fn evaluate(&self, x: f64) -> Option<f64> {
        self.children.iter().map(|c| c.evaluate(x)).sum()
    }

    pub fn derivative(&self) -> UnivariateFunction {
        UnivariateFunction::sum(self.children.iter().map(|c| c.derivative()).collect())
    }

    pub fn indefinite_integral(&self) -> UnivariateFunction {
        UnivariateFunction::sum(
            self.children
                .iter()
                .map(|c| c.indefinite_integral())
                .collect(),
        )
    }

    pub fn evaluate_integral(&self, left: f64, right: f64) -> Option<f64> {
        self.children
            .iter()
            .map(|c| c.evaluate_integral(left, right))
            .sum()
    }
}

fn merge_like_terms(children: Vec<UnivariateFunction>) -> Vec<UnivariateFunction> {
    let mut merged: Vec<UnivariateFunction> = Vec::with_capacity(children.len());
    for child in children {
        match child {
            UnivariateFunction::Term(term) => merge_term(&mut merged, term),
            other => merged.push(other),
        }
    }
    merged.retain(|c| !matches!(c, UnivariateFunction::Term(t) if t.is_zero()));
    merged
}

fn merge_term(merged: &mut Vec<UnivariateFunction>, term: Term) {
    for existing in merged.iter_mut() {
        if let UnivariateFunction::Term(like) = existing {
            if like.is_like(&term) {
                *like = Term::new(like.a() + term.a(), like.b(), like.base(), like.d());
                return;
            }
        }
    }
    merged.push(UnivariateFunction::Term(term));
}
