use serde::Deserialize;

use crate::function::functionerror::FunctionError;
use crate::function::piecewisefunction::{
    ExtrapolationScheme,
    PiecewiseFunction
};
use crate::function::term::Term;
use crate::function::univariatefunction::UnivariateFunction;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Point2D {
    x: f64,
    y: f64
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Point2D {
        Point2D { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn slope(lhs_pt: &Point2D, rhs_pt: &Point2D) -> f64 {
        (rhs_pt.y - lhs_pt.y) / (rhs_pt.x - lhs_pt.x)
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Point2D::new(x, y)
    }
}

// ─────────────────────────────────────────────
// 各區段的子函數
// ─────────────────────────────────────────────
//
// n 個點產生 n 個 breakpoints 與 n + 1 個區段，頭尾兩段負責定義域外的延伸。
// 每一段都以該段左端點 x_i 為 base，避免換底。

fn constant_at(pt: &Point2D) -> UnivariateFunction {
    Term::new(pt.y(), 0.0, pt.x(), 0).into()
}

/// 頭尾各補一段，沿用第一段與最後一段的公式。
pub(crate) fn with_edge_segments(interior: Vec<UnivariateFunction>) -> Vec<UnivariateFunction> {
    let (Some(first), Some(last)) = (interior.first().cloned(), interior.last().cloned()) else {
        return interior;
    };
    std::iter::once(first)
        .chain(interior)
        .chain(std::iter::once(last))
        .collect()
}

/// 左值向右延伸：[x_i, x_{i+1}) 上為 y_i，x_0 左側為 y_0
fn generate_forward_flat_segments(points: &[Point2D]) -> Vec<UnivariateFunction> {
    std::iter::once(constant_at(&points[0]))
        .chain(points.iter().map(constant_at))
        .collect()
}

/// 右值向左延伸：(x_{i-1}, x_i] 上為 y_i，x_{n-1} 右側為 y_{n-1}
fn generate_backward_flat_segments(points: &[Point2D]) -> Vec<UnivariateFunction> {
    points
        .iter()
        .map(constant_at)
        .chain(std::iter::once(constant_at(&points[points.len() - 1])))
        .collect()
}

fn generate_linear_segments(points: &[Point2D]) -> Vec<UnivariateFunction> {
    with_edge_segments(
        points
            .windows(2)
            .map(|w| {
                UnivariateFunction::sum(vec![
                    Term::new(Point2D::slope(&w[0], &w[1]), 0.0, w[0].x(), 1).into(),
                    Term::new(w[0].y(), 0.0, w[0].x(), 0).into(),
                ])
            })
            .collect(),
    )
}

// ─────────────────────────────────────────────
// InterpolationType
// ─────────────────────────────────────────────

#[derive(Debug, PartialEq, Eq, Clone, Copy, Deserialize)]
pub enum InterpolationType {
    /// 常數插值，左值往右複製
    ForwardFlat,
    /// 常數插值，右值往左複製
    BackwardFlat,
    /// 連續的分段線性插值
    Linear,
}

/// 依 `interpolation_type` 建立分段插值函數。
///
/// x 座標必須嚴格遞增，至少兩個點。
pub fn create_interpolation(
    interpolation_type: InterpolationType,
    points: &[Point2D],
    extrapolation: (ExtrapolationScheme, ExtrapolationScheme),
) -> Result<UnivariateFunction, FunctionError> {
    if points.len() < 2 {
        return Err(FunctionError::invalid_construction(format!(
            "interpolation needs at least 2 points, got {}",
            points.len()
        )));
    }
    let segments = match interpolation_type {
        InterpolationType::ForwardFlat  => generate_forward_flat_segments(points),
        InterpolationType::BackwardFlat => generate_backward_flat_segments(points),
        InterpolationType::Linear       => generate_linear_segments(points),
    };
    let breakpoints = points.iter().map(|pt| pt.x()).collect();
    let piecewise = match interpolation_type {
        InterpolationType::BackwardFlat => {
            PiecewiseFunction::new_right_closed(breakpoints, segments, extrapolation.0, extrapolation.1)?
        }
        _ => PiecewiseFunction::new(breakpoints, segments, extrapolation.0, extrapolation.1)?,
    };
    Ok(UnivariateFunction::Piecewise(piecewise))
}

pub fn create_constant_interpolation_to_right(
    points: &[Point2D],
    extrapolation: (ExtrapolationScheme, ExtrapolationScheme),
) -> Result<UnivariateFunction, FunctionError> {
    create_interpolation(InterpolationType::ForwardFlat, points, extrapolation)
}

pub fn create_constant_interpolation_to_left(
    points: &[Point2D],
    extrapolation: (ExtrapolationScheme, ExtrapolationScheme),
) -> Result<UnivariateFunction, FunctionError> {
    create_interpolation(InterpolationType::BackwardFlat, points, extrapolation)
}

pub fn create_linear_interpolation(
    points: &[Point2D],
    extrapolation: (ExtrapolationScheme, ExtrapolationScheme),
) -> Result<UnivariateFunction, FunctionError> {
    create_interpolation(InterpolationType::Linear, points, extrapolation)
}
