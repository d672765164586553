use serde::Serialize;

use segcast_core::{DomainResult, ForecastPeriod};

/// One user submission: a target period plus the raw exogenous drivers.
///
/// The period is validated on construction; the drivers are validated by the
/// aggregator (through [`crate::ExogenousInputBuilder`]) so every request path
/// binds its input exactly once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastRequest {
    pub period: ForecastPeriod,
    pub business_days: i64,
    pub budget: f64,
}

impl ForecastRequest {
    pub fn new(
        year: i64,
        month: i64,
        week: i64,
        business_days: i64,
        budget: f64,
    ) -> DomainResult<Self> {
        Ok(Self {
            period: ForecastPeriod::new(year, month, week)?,
            business_days,
            budget,
        })
    }
}
