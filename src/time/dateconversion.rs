use chrono::{
    NaiveDate,
    NaiveDateTime,
    NaiveTime
};
use serde::Deserialize;

use crate::function::univariatefunction::UnivariateFunction;
use crate::interpolation::interpolation::Point2D;
use crate::time::period::Period;

pub const DAYS_PER_YEAR: f64 = 365.2422;

/// 可換算成年分數的時間點。
pub trait TimePoint: Copy {
    fn to_datetime(self) -> NaiveDateTime;
}

impl TimePoint for NaiveDate {
    fn to_datetime(self) -> NaiveDateTime {
        self.and_time(NaiveTime::default())
    }
}

impl TimePoint for NaiveDateTime {
    fn to_datetime(self) -> NaiveDateTime {
        self
    }
}

fn default_global_base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or(NaiveDate::MIN)
}

fn default_days_per_year() -> f64 {
    DAYS_PER_YEAR
}

// ─────────────────────────────────────────────
// DateConversion
// ─────────────────────────────────────────────
//
// 日期一律換成「距 global_base_date 的年數」後才交給函數，
// 函數本身不保存任何日期。基準日只要前後一致，選哪一天都不影響結果。
// 基準日以參數顯式傳遞，不使用全域可變狀態。

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DateConversion {
    #[serde(default = "default_global_base_date")]
    global_base_date: NaiveDate,
    #[serde(default = "default_days_per_year")]
    days_per_year: f64
}

impl Default for DateConversion {
    fn default() -> Self {
        DateConversion {
            global_base_date: default_global_base_date(),
            days_per_year: DAYS_PER_YEAR
        }
    }
}

impl DateConversion {
    pub fn new(global_base_date: NaiveDate, days_per_year: f64) -> DateConversion {
        DateConversion { global_base_date, days_per_year }
    }

    pub fn global_base_date(&self) -> NaiveDate {
        self.global_base_date
    }

    pub fn days_per_year(&self) -> f64 {
        self.days_per_year
    }

    /// a - b，以年為單位。
    pub fn years_between<A: TimePoint, B: TimePoint>(&self, a: A, b: B) -> f64 {
        let elapsed = a.to_datetime() - b.to_datetime();
        elapsed.num_milliseconds() as f64 / 86_400_000.0 / self.days_per_year
    }

    pub fn years_from_global_base<T: TimePoint>(&self, date: T) -> f64 {
        self.years_between(date, self.global_base_date)
    }

    /// 期間長度。像 3M 這種期間的天數取決於起算日，因此從 `base`（預設為基準日）起量。
    pub fn period_length(&self, period: Period, base: Option<NaiveDate>) -> Option<f64> {
        let start = base.unwrap_or(self.global_base_date);
        period
            .advance(start)
            .map(|end| self.years_between(end, start))
    }

    pub fn point<T: TimePoint>(&self, date: T, y: f64) -> Point2D {
        Point2D::new(self.years_from_global_base(date), y)
    }

    pub fn evaluate<T: TimePoint>(&self, function: &UnivariateFunction, date: T) -> Option<f64> {
        function.evaluate(self.years_from_global_base(date))
    }

    pub fn evaluate_period(
        &self,
        function: &UnivariateFunction,
        period: Period,
        base: Option<NaiveDate>,
    ) -> Option<f64> {
        self.period_length(period, base)
            .and_then(|x| function.evaluate(x))
    }

    pub fn evaluate_integral<L: TimePoint, R: TimePoint>(
        &self,
        function: &UnivariateFunction,
        left: L,
        right: R,
    ) -> Option<f64> {
        function.evaluate_integral(
            self.years_from_global_base(left),
            self.years_from_global_base(right),
        )
    }

    pub fn right_integral<T: TimePoint>(&self, function: &UnivariateFunction, left: T) -> UnivariateFunction {
        function.right_integral(self.years_from_global_base(left))
    }

    pub fn left_integral<T: TimePoint>(&self, function: &UnivariateFunction, right: T) -> UnivariateFunction {
        function.left_integral(self.years_from_global_base(right))
    }
}
