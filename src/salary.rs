use chrono::{Duration, NaiveDate, Utc};

use crate::error::SalaryError;
use crate::models::{AverageSalary, Vacancy};

/// Collapses a salary range into one point estimate. Zero bounds count as
/// absent; single-ended ranges are pulled toward a plausible midpoint.
pub fn estimate(salary_from: Option<u64>, salary_to: Option<u64>) -> Result<u64, SalaryError> {
    match (
        salary_from.filter(|value| *value > 0),
        salary_to.filter(|value| *value > 0),
    ) {
        (Some(from), Some(to)) => Ok(from / 2 + to / 2 + (from % 2 + to % 2) / 2),
        (Some(from), None) => scale(from, 6, 5).ok_or(SalaryError::OutOfRange),
        (None, Some(to)) => scale(to, 4, 5).ok_or(SalaryError::OutOfRange),
        (None, None) => Err(SalaryError::NoUsableData),
    }
}

/// `value * numerator / denominator`, truncated, without an overflowing
/// intermediate product.
fn scale(value: u64, numerator: u64, denominator: u64) -> Option<u64> {
    let whole = (value / denominator).checked_mul(numerator)?;
    whole.checked_add(value % denominator * numerator / denominator)
}

pub fn estimate_vacancy(vacancy: &Vacancy) -> Result<u64, SalaryError> {
    estimate(vacancy.salary_from, vacancy.salary_to)
}

/// Running mean over per-vacancy estimates.
#[derive(Debug, Clone, Default)]
pub struct SalaryAccumulator {
    total: u128,
    count: u64,
}

impl SalaryAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, estimate: u64) {
        self.total += u128::from(estimate);
        self.count += 1;
    }

    /// Estimates the vacancy and records it when it matches `currency`.
    /// Returns whether the vacancy was counted.
    pub fn record(&mut self, vacancy: &Vacancy, currency: &str) -> bool {
        if !vacancy.has_currency(currency) {
            return false;
        }

        match estimate_vacancy(vacancy) {
            Ok(value) => {
                self.push(value);
                true
            }
            Err(SalaryError::NoUsableData) => false,
            Err(SalaryError::OutOfRange) => {
                tracing::warn!(
                    from = ?vacancy.salary_from,
                    to = ?vacancy.salary_to,
                    "salary out of range, vacancy skipped"
                );
                false
            }
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn average(&self) -> AverageSalary {
        if self.count == 0 {
            AverageSalary::InsufficientData
        } else {
            let mean = self.total / u128::from(self.count);
            AverageSalary::Estimated(u64::try_from(mean).unwrap_or(u64::MAX))
        }
    }
}

pub fn cutoff_date(period_days: u32) -> NaiveDate {
    Utc::now().date_naive() - Duration::days(i64::from(period_days.max(1)))
}
