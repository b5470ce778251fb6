use std::fmt;
use std::num::ParseIntError;

use chrono::{
    Days,
    Months,
    NaiveDate
};
use thiserror::Error;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TimeUnit {
    Days,
    Weeks,
    Months,
    Years
}

impl TimeUnit {
    pub fn to_char(&self) -> char {
        match self {
            TimeUnit::Days => 'D',
            TimeUnit::Weeks => 'W',
            TimeUnit::Months => 'M',
            TimeUnit::Years => 'Y'
        }
    }
}

#[derive(Debug, Error)]
pub enum ParsePeriodError {
    #[error("empty period string")]
    Empty,
    #[error("unknown time unit '{0}' found")]
    UnknownTimeUnit(char),
    #[error(transparent)]
    Parse(#[from] ParseIntError)
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Period {
    number: i32,
    unit: TimeUnit
}

impl Period {
    pub fn new(number: i32, unit: TimeUnit) -> Period {
        Period { number, unit }
    }

    pub fn days(number: i32) -> Period {
        Period::new(number, TimeUnit::Days)
    }

    pub fn weeks(number: i32) -> Period {
        Period::new(number, TimeUnit::Weeks)
    }

    pub fn months(number: i32) -> Period {
        Period::new(number, TimeUnit::Months)
    }

    pub fn years(number: i32) -> Period {
        Period::new(number, TimeUnit::Years)
    }

    /// 解析 "3M"、"10Y"、"-2W" 這類字串。
    pub fn parse(period_str: &str) -> Result<Period, ParsePeriodError> {
        let unit_chr = period_str.chars().last().ok_or(ParsePeriodError::Empty)?;
        let number = period_str[..period_str.len() - unit_chr.len_utf8()].parse::<i32>()?;
        match unit_chr {
            'D' => Ok(Period::days(number)),
            'W' => Ok(Period::weeks(number)),
            'M' => Ok(Period::months(number)),
            'Y' => Ok(Period::years(number)),
            _ => Err(ParsePeriodError::UnknownTimeUnit(unit_chr))
        }
    }

    pub fn number(&self) -> i32 {
        self.number
    }

    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// 從 `horizon` 往後推一個期間。月、年的平移遇到月底會夾在該月最後一天。
    /// 超出 chrono 可表示的日期範圍時回傳 None。
    pub fn advance(&self, horizon: NaiveDate) -> Option<NaiveDate> {
        match self.unit {
            TimeUnit::Days => shift_days(horizon, self.number as i64),
            TimeUnit::Weeks => shift_days(horizon, 7 * self.number as i64),
            TimeUnit::Months => shift_months(horizon, self.number),
            TimeUnit::Years => shift_months(horizon, 12 * self.number)
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.number, self.unit.to_char())
    }
}

fn shift_days(horizon: NaiveDate, number: i64) -> Option<NaiveDate> {
    let days = Days::new(number.unsigned_abs());
    if number >= 0 {
        horizon.checked_add_days(days)
    } else {
        horizon.checked_sub_days(days)
    }
}

fn shift_months(horizon: NaiveDate, number: i32) -> Option<NaiveDate> {
    let months = Months::new(number.unsigned_abs());
    if number >= 0 {
        horizon.checked_add_months(months)
    } else {
        horizon.checked_sub_months(months)
    }
}
