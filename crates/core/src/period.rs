//! Target period of a weekly forecast.

use serde::Serialize;

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// Week `week` of month `month` in `year`.
///
/// Addresses both the report title and the exported file name, so two
/// distinct periods never share an artifact name.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ForecastPeriod {
    year: u16,
    month: u8,
    week: u8,
}

impl ValueObject for ForecastPeriod {}

impl ForecastPeriod {
    pub const MAX_WEEK_OF_MONTH: u8 = 5;

    pub fn new(year: i64, month: i64, week: i64) -> DomainResult<Self> {
        if !(1..=9999).contains(&year) {
            return Err(DomainError::validation(
                "year",
                format!("must be between 1 and 9999, got {year}"),
            ));
        }
        if !(1..=12).contains(&month) {
            return Err(DomainError::validation(
                "month",
                format!("must be between 1 and 12, got {month}"),
            ));
        }
        if !(1..=i64::from(Self::MAX_WEEK_OF_MONTH)).contains(&week) {
            return Err(DomainError::validation(
                "week",
                format!(
                    "must be between 1 and {}, got {week}",
                    Self::MAX_WEEK_OF_MONTH
                ),
            ));
        }

        Ok(Self {
            year: year as u16,
            month: month as u8,
            week: week as u8,
        })
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn week(&self) -> u8 {
        self.week
    }
}

impl core::fmt::Display for ForecastPeriod {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "week {} of {}/{}", self.week, self.month, self.year)
    }
}
