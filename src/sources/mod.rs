pub mod headhunter;
pub mod superjob;
pub mod transport;

use async_trait::async_trait;

use crate::error::FetchError;
use crate::models::{LanguageSummary, Platform};
use crate::salary::SalaryAccumulator;

pub use headhunter::HeadHunterSource;
pub use superjob::SuperJobSource;
pub use transport::{HttpTransport, JsonTransport};

#[async_trait]
pub trait VacancySource: Send + Sync {
    fn platform(&self) -> Platform;

    async fn summarize(&self, language: &str) -> Result<LanguageSummary, FetchError>;
}

/// Pages needed to cover `total` results, clamped to the API's search depth.
pub fn page_count(total: u64, per_page: u32, max_pages: u32) -> u32 {
    if total == 0 || per_page == 0 {
        return 0;
    }
    let needed = total.div_ceil(u64::from(per_page));
    u32::try_from(needed).unwrap_or(u32::MAX).min(max_pages)
}

/// Builds the row for one language. A platform total lower than the number
/// of vacancies actually processed is stale and is raised to that number, so
/// the processed count and the average always cover the same vacancies.
pub(crate) fn build_summary(
    language: &str,
    reported_total: u64,
    salaries: &SalaryAccumulator,
) -> LanguageSummary {
    let vacancies_processed = salaries.count();
    if vacancies_processed > reported_total {
        tracing::debug!(
            language,
            reported_total,
            vacancies_processed,
            "platform total is stale, using processed count"
        );
    }

    LanguageSummary {
        language: language.to_string(),
        vacancies_found: reported_total.max(vacancies_processed),
        vacancies_processed,
        average_salary: salaries.average(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AverageSalary;

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(250, 100, 5), 3);
        assert_eq!(page_count(200, 100, 5), 2);
        assert_eq!(page_count(1, 100, 5), 1);
    }

    #[test]
    fn page_count_is_clamped_to_depth() {
        assert_eq!(page_count(10_000, 100, 20), 20);
    }

    #[test]
    fn stale_total_is_raised_to_processed_count() {
        let mut salaries = SalaryAccumulator::new();
        salaries.push(100);
        salaries.push(300);

        let row = build_summary("Go", 1, &salaries);
        assert_eq!(row.vacancies_found, 2);
        assert_eq!(row.vacancies_processed, 2);
        assert_eq!(row.average_salary, AverageSalary::Estimated(200));

        let row = build_summary("Go", 0, &salaries);
        assert_eq!(row.vacancies_found, 2);
        assert_eq!(row.vacancies_processed, 2);
        assert_eq!(row.average_salary, AverageSalary::Estimated(200));
    }

    #[test]
    fn summary_without_salaries_keeps_reported_total() {
        let row = build_summary("Go", 50, &SalaryAccumulator::new());
        assert_eq!(row.vacancies_found, 50);
        assert_eq!(row.vacancies_processed, 0);
        assert_eq!(row.average_salary, AverageSalary::InsufficientData);
    }

    #[test]
    fn page_count_handles_empty_results() {
        assert_eq!(page_count(0, 100, 20), 0);
        assert_eq!(page_count(10, 0, 20), 0);
    }
}
