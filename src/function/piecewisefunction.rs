use serde::Deserialize;

use crate::function::functionerror::FunctionError;
use crate::function::univariatefunction::UnivariateFunction;

/// 定義域外的行為。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ExtrapolationScheme {
    /// 夾在端點值（常數延伸）
    Flat,
    /// 直接延伸端點區段的公式
    Curve,
    /// 定義域外為 undefined
    Error,
}

// ─────────────────────────────────────────────
// PiecewiseFunction
// ─────────────────────────────────────────────
//
// breakpoints: x_0 < x_1 < ... < x_{m-1}
// segments:    f_0, f_1, ..., f_m（比 breakpoints 多一個）
//
//   f_0 負責 (-inf, x_0)
//   f_i 負責 [x_{i-1}, x_i)
//   f_m 負責 [x_{m-1}, +inf)
//
// x < x_0 依 left_extrapolation 處理 f_0，x > x_{m-1} 依 right_extrapolation 處理 f_m，
// 定義域為 [x_0, x_{m-1}]。
//
// closed_right 時每個區間改為左開右閉：(-inf, x_0]、(x_{i-1}, x_i]、(x_{m-1}, +inf)。
// 負 alpha 的 rescale 與往左複製的常數插值會產生這種形式。

#[derive(Debug, Clone, PartialEq)]
pub struct PiecewiseFunction {
    breakpoints: Vec<f64>,
    segments: Vec<UnivariateFunction>,
    left_extrapolation: ExtrapolationScheme,
    right_extrapolation: ExtrapolationScheme,
    closed_right: bool,
}

impl PiecewiseFunction {
    /// `segments` 比 `breakpoints` 多一個時，`segments[0]` 是左側延伸段。
    ///
    /// 兩者一樣多時視為各段的起點：`segments[i]` 從 `breakpoints[i]` 開始，
    /// 左側延伸沿用第一段。其餘數量組合一律失敗。
    pub fn new(
        breakpoints: Vec<f64>,
        segments: Vec<UnivariateFunction>,
        left_extrapolation: ExtrapolationScheme,
        right_extrapolation: ExtrapolationScheme,
    ) -> Result<PiecewiseFunction, FunctionError> {
        Self::validated(breakpoints, segments, left_extrapolation, right_extrapolation, false)
    }

    /// 與 `new` 相同，但每個 breakpoint 歸屬左邊的區段。
    pub fn new_right_closed(
        breakpoints: Vec<f64>,
        segments: Vec<UnivariateFunction>,
        left_extrapolation: ExtrapolationScheme,
        right_extrapolation: ExtrapolationScheme,
    ) -> Result<PiecewiseFunction, FunctionError> {
        Self::validated(breakpoints, segments, left_extrapolation, right_extrapolation, true)
    }

    fn validated(
        breakpoints: Vec<f64>,
        mut segments: Vec<UnivariateFunction>,
        left_extrapolation: ExtrapolationScheme,
        right_extrapolation: ExtrapolationScheme,
        closed_right: bool,
    ) -> Result<PiecewiseFunction, FunctionError> {
        if breakpoints.is_empty() {
            return Err(FunctionError::invalid_construction(
                "a piecewise function needs at least one breakpoint",
            ));
        }
        if segments.len() == breakpoints.len() {
            let first = segments[0].clone();
            segments.insert(0, first);
        }
        if segments.len() != breakpoints.len() + 1 {
            return Err(FunctionError::invalid_construction(format!(
                "{} breakpoints need {} segments or {} segment starts, got {}",
                breakpoints.len(),
                breakpoints.len() + 1,
                breakpoints.len(),
                segments.len()
            )));
        }
        if breakpoints.iter().any(|bp| bp.is_nan()) {
            return Err(FunctionError::invalid_construction("breakpoint is NaN"));
        }
        if breakpoints.windows(2).any(|w| w[0] >= w[1]) {
            return Err(FunctionError::invalid_construction(
                "breakpoints must be strictly increasing",
            ));
        }
        Ok(Self::assemble(
            breakpoints,
            segments,
            left_extrapolation,
            right_extrapolation,
            closed_right,
        ))
    }

    /// 內部建構，呼叫方保證不變量成立。
    pub(crate) fn assemble(
        breakpoints: Vec<f64>,
        segments: Vec<UnivariateFunction>,
        left_extrapolation: ExtrapolationScheme,
        right_extrapolation: ExtrapolationScheme,
        closed_right: bool,
    ) -> PiecewiseFunction {
        debug_assert!(!breakpoints.is_empty());
        debug_assert_eq!(segments.len(), breakpoints.len() + 1);
        debug_assert!(breakpoints.windows(2).all(|w| w[0] < w[1]));
        PiecewiseFunction {
            breakpoints,
            segments,
            left_extrapolation,
            right_extrapolation,
            closed_right,
        }
    }

    pub fn breakpoints(&self) -> &[f64] {
        &self.breakpoints
    }

    pub fn segments(&self) -> &[UnivariateFunction] {
        &self.segments
    }

    pub fn left_extrapolation(&self) -> ExtrapolationScheme {
        self.left_extrapolation
    }

    pub fn right_extrapolation(&self) -> ExtrapolationScheme {
        self.right_extrapolation
    }

    pub fn is_right_closed(&self) -> bool {
        self.closed_right
    }

    pub fn min_x(&self) -> f64 {
        self.breakpoints[0]
    }

    pub fn max_x(&self) -> f64 {
        self.breakpoints[self.breakpoints.len() - 1]
    }

    fn first_segment(&self) -> &UnivariateFunction {
        &self.segments[0]
    }

    fn last_segment(&self) -> &UnivariateFunction {
        &self.segments[self.breakpoints.len()]
    }

    /// x 所屬區段的索引，breakpoint 依 closed_right 決定歸屬。
    fn segment_index(&self, x: f64) -> usize {
        if self.closed_right {
            self.breakpoints.partition_point(|&bp| bp < x)
        } else {
            self.breakpoints.partition_point(|&bp| bp <= x)
        }
    }

    pub fn evaluate(&self, x: f64) -> Option<f64> {
        if x.is_nan() {
            return None;
        }
        if x < self.min_x() {
            return match self.left_extrapolation {
                ExtrapolationScheme::Curve => self.first_segment().evaluate(x),
                ExtrapolationScheme::Flat => self.first_segment().evaluate(self.min_x()),
                ExtrapolationScheme::Error => None,
            };
        }
        if x > self.max_x() {
            return match self.right_extrapolation {
                ExtrapolationScheme::Curve => self.last_segment().evaluate(x),
                ExtrapolationScheme::Flat => self.last_segment().evaluate(self.max_x()),
                ExtrapolationScheme::Error => None,
            };
        }
        self.segments[self.segment_index(x)].evaluate(x)
    }

    // ─────────────────────────────────────────
    // Flat 具體化
    // ─────────────────────────────────────────
    //
    // Flat 側的端點區段換成端點值的常數並改用 Curve，breakpoints 不變。
    // 之後的積分與代數運算不必再特別處理 Flat：常數的導數為 0，積分為線性。

    pub(crate) fn materialize(&self) -> PiecewiseFunction {
        let mut segments = self.segments.clone();
        let mut left = self.left_extrapolation;
        let mut right = self.right_extrapolation;

        if left == ExtrapolationScheme::Flat {
            segments[0] = flat_edge(self.first_segment(), self.min_x());
            left = ExtrapolationScheme::Curve;
        }
        if right == ExtrapolationScheme::Flat {
            let last = self.breakpoints.len();
            segments[last] = flat_edge(self.last_segment(), self.max_x());
            right = ExtrapolationScheme::Curve;
        }
        Self::assemble(self.breakpoints.clone(), segments, left, right, self.closed_right)
    }

    /// 在 x 這一點生效的子函數（Error 側的定義域外為 Undefined）。
    /// 只用在已具體化的函數上。
    fn segment_at(&self, x: f64) -> UnivariateFunction {
        let outside = (x < self.min_x() && self.left_extrapolation == ExtrapolationScheme::Error)
            || (x > self.max_x() && self.right_extrapolation == ExtrapolationScheme::Error);
        if outside {
            UnivariateFunction::Undefined
        } else {
            self.segments[self.segment_index(x)].clone()
        }
    }

    /// 在開區間 (lower, upper) 上生效的子函數；呼叫方保證區間內沒有 breakpoint。
    /// 只用在已具體化的函數上。
    ///
    /// Error 側的端點區段只保留在恰好從定義域端點延伸到 ±inf 的區間上，
    /// 該段在端點本身仍然有值。
    fn segment_over(&self, lower: f64, upper: f64) -> UnivariateFunction {
        let index = self.breakpoints.partition_point(|&bp| bp <= lower);
        let last = self.breakpoints.len();
        let left_gap = index == 0
            && self.left_extrapolation == ExtrapolationScheme::Error
            && !(lower == f64::NEG_INFINITY && upper == self.min_x());
        let right_gap = index == last
            && self.right_extrapolation == ExtrapolationScheme::Error
            && !(lower == self.max_x() && upper == f64::INFINITY);
        if left_gap || right_gap {
            UnivariateFunction::Undefined
        } else {
            self.segments[index].clone()
        }
    }

    // ─────────────────────────────────────────
    // 微積分
    // ─────────────────────────────────────────

    /// breakpoints 與兩側 ExtrapolationScheme 原樣保留，各區段取導數。
    /// Flat 側的端點區段先換成常數，因此導數在該側為 0。
    pub fn derivative(&self) -> PiecewiseFunction {
        let segments = self
            .materialize()
            .segments
            .iter()
            .map(|s| s.derivative())
            .collect();
        Self::assemble(
            self.breakpoints.clone(),
            segments,
            self.left_extrapolation,
            self.right_extrapolation,
            self.closed_right,
        )
    }

    pub fn indefinite_integral(&self) -> PiecewiseFunction {
        self.indefinite_integral_from(0.0)
    }

    /// 各區段獨立積分後逐段平移，使結果在每個 breakpoint 連續。
    /// 錨定段的積分常數為 `initial`：左側 Error 時錨定在第一個定義域內的區段，否則為左側延伸段。
    ///
    /// 第 i 段需要的平移量為
    ///   F_{i-1}(x_{i-1}) - raw_i(x_{i-1})
    ///
    /// 積分在 Flat 側不再是常數，因此結果的 Flat 改為 Curve。
    pub fn indefinite_integral_from(&self, initial: f64) -> PiecewiseFunction {
        let materialized = self.materialize();
        let raws: Vec<UnivariateFunction> = materialized
            .segments
            .iter()
            .map(|s| s.indefinite_integral())
            .collect();

        let anchor = usize::from(materialized.left_extrapolation == ExtrapolationScheme::Error);
        let mut stitched: Vec<UnivariateFunction> = Vec::with_capacity(raws.len());
        for (i, raw) in raws.iter().enumerate().skip(anchor) {
            let next = match stitched.last() {
                None if initial == 0.0 => raw.clone(),
                None => raw + initial,
                Some(previous) => stitch(previous, raw.clone(), materialized.breakpoints[i - 1]),
            };
            stitched.push(next);
        }
        if anchor == 1 {
            let edge = stitch(&stitched[0], raws[0].clone(), materialized.min_x());
            stitched.insert(0, edge);
        }

        Self::assemble(
            materialized.breakpoints,
            stitched,
            materialized.left_extrapolation,
            materialized.right_extrapolation,
            materialized.closed_right,
        )
    }

    /// 依序累加每個區段與 [left, right] 重疊部分的積分。
    /// Curve 區域沿用端點區段的公式；Error 區域回傳 None。
    pub fn evaluate_integral(&self, left: f64, right: f64) -> Option<f64> {
        if left.is_nan() || right.is_nan() {
            return None;
        }
        if left > right {
            return self.evaluate_integral(right, left).map(|v| -v);
        }
        if left < self.min_x() && self.left_extrapolation == ExtrapolationScheme::Error {
            return None;
        }
        if right > self.max_x() && self.right_extrapolation == ExtrapolationScheme::Error {
            return None;
        }

        let materialized = self.materialize();
        let last = materialized.breakpoints.len();
        let mut total = 0.0;
        for (i, segment) in materialized.segments.iter().enumerate() {
            let lower = if i == 0 { f64::NEG_INFINITY } else { materialized.breakpoints[i - 1] };
            let upper = if i == last { f64::INFINITY } else { materialized.breakpoints[i] };
            let from = left.max(lower);
            let to = right.min(upper);
            if from < to {
                total += segment.evaluate_integral(from, to)?;
            }
        }
        Some(total)
    }

    // ─────────────────────────────────────────
    // 組合
    // ─────────────────────────────────────────

    pub(crate) fn map_segments<F>(&self, f: F) -> PiecewiseFunction
    where
        F: Fn(&UnivariateFunction) -> UnivariateFunction,
    {
        Self::assemble(
            self.breakpoints.clone(),
            self.segments.iter().map(f).collect(),
            self.left_extrapolation,
            self.right_extrapolation,
            self.closed_right,
        )
    }

    /// 合併兩組 breakpoints，對每個合併後的區間套用 `op`。
    /// 任一側為 Error 時結果為 Error，否則為 Curve。
    /// 兩者都是 closed_right 時結果才是 closed_right。
    pub(crate) fn combine<F>(&self, other: &PiecewiseFunction, op: F) -> PiecewiseFunction
    where
        F: Fn(&UnivariateFunction, &UnivariateFunction) -> UnivariateFunction,
    {
        let lhs = self.materialize();
        let rhs = other.materialize();

        let mut breakpoints: Vec<f64> = lhs
            .breakpoints
            .iter()
            .chain(rhs.breakpoints.iter())
            .copied()
            .collect();
        breakpoints.sort_by(|x, y| x.total_cmp(y));
        breakpoints.dedup();

        let bounds: Vec<f64> = std::iter::once(f64::NEG_INFINITY)
            .chain(breakpoints.iter().copied())
            .chain(std::iter::once(f64::INFINITY))
            .collect();
        let segments = bounds
            .windows(2)
            .map(|w| op(&lhs.segment_over(w[0], w[1]), &rhs.segment_over(w[0], w[1])))
            .collect();

        Self::assemble(
            breakpoints,
            segments,
            combined_scheme(lhs.left_extrapolation, rhs.left_extrapolation),
            combined_scheme(lhs.right_extrapolation, rhs.right_extrapolation),
            lhs.closed_right && rhs.closed_right,
        )
    }

    /// 逐段取次方並保留兩側 ExtrapolationScheme；Undefined 區段維持 Undefined。
    /// Flat 側在取次方後仍是常數，不需具體化。
    pub(crate) fn powi(&self, n: u32) -> Result<PiecewiseFunction, FunctionError> {
        let segments = self
            .segments
            .iter()
            .map(|s| s.pow_natural(n))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::assemble(
            self.breakpoints.clone(),
            segments,
            self.left_extrapolation,
            self.right_extrapolation,
            self.closed_right,
        ))
    }

    /// alpha < 0 時順序反轉，原本歸屬右側區段的 breakpoint 改歸屬左側，
    /// 因此 closed_right 跟著翻轉。
    pub(crate) fn rescale_input(&self, alpha: f64, beta: f64) -> PiecewiseFunction {
        let mut breakpoints: Vec<f64> = self.breakpoints.iter().map(|bp| (bp - beta) / alpha).collect();
        let mut segments: Vec<UnivariateFunction> =
            self.segments.iter().map(|s| s.rescale_input(alpha, beta)).collect();
        let (mut left, mut right) = (self.left_extrapolation, self.right_extrapolation);
        let mut closed_right = self.closed_right;
        if alpha < 0.0 {
            breakpoints.reverse();
            segments.reverse();
            std::mem::swap(&mut left, &mut right);
            closed_right = !closed_right;
        }
        Self::assemble(breakpoints, segments, left, right, closed_right)
    }

    /// 限制在 [left, right]，兩側皆為 Error。
    ///
    /// 封閉的端點（預設為右端，closed_right 時為左端）由端點區段負責，
    /// 取值與原函數在該點實際使用的區段相同，即使端點恰好是 breakpoint。
    pub(crate) fn trim(&self, left: f64, right: f64) -> PiecewiseFunction {
        let materialized = self.materialize();
        let mut breakpoints = vec![left];
        breakpoints.extend(
            materialized
                .breakpoints
                .iter()
                .copied()
                .filter(|&bp| left < bp && bp < right),
        );
        breakpoints.push(right);

        let mut segments = Vec::with_capacity(breakpoints.len() + 1);
        segments.push(if self.closed_right {
            materialized.segment_at(left)
        } else {
            UnivariateFunction::Undefined
        });
        segments.extend(
            breakpoints
                .windows(2)
                .map(|w| materialized.segment_over(w[0], w[1])),
        );
        segments.push(if self.closed_right {
            UnivariateFunction::Undefined
        } else {
            materialized.segment_at(right)
        });

        Self::assemble(
            breakpoints,
            segments,
            ExtrapolationScheme::Error,
            ExtrapolationScheme::Error,
            self.closed_right,
        )
    }
}

fn flat_edge(segment: &UnivariateFunction, at: f64) -> UnivariateFunction {
    segment
        .evaluate(at)
        .map(UnivariateFunction::constant)
        .unwrap_or(UnivariateFunction::Undefined)
}

fn stitch(previous: &UnivariateFunction, raw: UnivariateFunction, boundary: f64) -> UnivariateFunction {
    match (previous.evaluate(boundary), raw.evaluate(boundary)) {
        (Some(target), Some(current)) => {
            let shift = target - current;
            if shift == 0.0 { raw } else { raw + shift }
        }
        _ => UnivariateFunction::Undefined,
    }
}

fn combined_scheme(lhs: ExtrapolationScheme, rhs: ExtrapolationScheme) -> ExtrapolationScheme {
    match (lhs, rhs) {
        (ExtrapolationScheme::Error, _) | (_, ExtrapolationScheme::Error) => ExtrapolationScheme::Error,
        _ => ExtrapolationScheme::Curve,
    }
}
