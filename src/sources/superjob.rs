use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::SuperJobConfig;
use crate::error::FetchError;
use crate::models::{LanguageSummary, Platform, SearchQuery, Vacancy};
use crate::salary::SalaryAccumulator;
use crate::sources::transport::{ApiRequest, JsonTransport};
use crate::sources::{build_summary, page_count, VacancySource};

const CURRENCY: &str = "rub";
const PER_PAGE: u32 = 100;
/// SuperJob serves at most 500 results per search.
const MAX_PAGES: u32 = 500 / PER_PAGE;

#[derive(Debug, Deserialize)]
struct VacanciesPage {
    #[serde(default)]
    objects: Vec<Object>,
    #[serde(default)]
    total: u64,
    /// Absent means "unknown"; paging then follows `total` alone.
    #[serde(default = "more_unknown")]
    more: bool,
}

fn more_unknown() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct Object {
    payment_from: Option<u64>,
    payment_to: Option<u64>,
    currency: Option<String>,
}

impl From<Object> for Vacancy {
    fn from(object: Object) -> Self {
        Vacancy::new(object.payment_from, object.payment_to, object.currency)
    }
}

pub struct SuperJobSource {
    config: SuperJobConfig,
    token: String,
    transport: Arc<dyn JsonTransport>,
}

impl SuperJobSource {
    pub fn new(
        config: SuperJobConfig,
        token: impl Into<String>,
        transport: Arc<dyn JsonTransport>,
    ) -> Self {
        Self {
            config,
            token: token.into(),
            transport,
        }
    }

    fn page_request(&self, query: &SearchQuery, page: u32) -> ApiRequest {
        ApiRequest::get(
            Platform::SuperJob,
            format!("{}/2.0/vacancies/", self.config.base_url),
        )
        .header("X-Api-App-Id", self.token.clone())
        .param("keyword", &query.keyword)
        .param("town", &query.location)
        .param("page", page)
        .param("count", PER_PAGE)
    }

    async fn fetch_page(
        &self,
        query: &SearchQuery,
        page: u32,
    ) -> Result<VacanciesPage, FetchError> {
        let body = self.transport.get_json(self.page_request(query, page)).await?;
        serde_json::from_value(body).map_err(|source| FetchError::Decode {
            platform: Platform::SuperJob,
            source,
        })
    }
}

#[async_trait]
impl VacancySource for SuperJobSource {
    fn platform(&self) -> Platform {
        Platform::SuperJob
    }

    async fn summarize(&self, language: &str) -> Result<LanguageSummary, FetchError> {
        // Searches are not limited by publication date on this platform.
        let query = SearchQuery::for_language(language, &self.config.town, 0);
        let mut salaries = SalaryAccumulator::new();

        let first = self.fetch_page(&query, 0).await?;
        let total = first.total;
        let pages = page_count(total, PER_PAGE, MAX_PAGES);
        let mut more = first.more;

        tracing::debug!(platform = "SuperJob", language, page = 0, pages, "page fetched");
        for object in first.objects {
            salaries.record(&Vacancy::from(object), CURRENCY);
        }

        let mut page = 1;
        while more && page < pages {
            let next = self.fetch_page(&query, page).await?;
            tracing::debug!(platform = "SuperJob", language, page, pages, "page fetched");
            for object in next.objects {
                salaries.record(&Vacancy::from(object), CURRENCY);
            }
            more = next.more;
            page += 1;
        }

        Ok(build_summary(language, total, &salaries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AverageSalary;
    use crate::sources::transport::fake::FakeTransport;
    use serde_json::json;

    fn config() -> SuperJobConfig {
        SuperJobConfig {
            base_url: "https://sj.test".to_string(),
            town: "Москва".to_string(),
            token: Some("secret".to_string()),
        }
    }

    fn source(transport: &Arc<FakeTransport>) -> SuperJobSource {
        SuperJobSource::new(config(), "secret", transport.clone())
    }

    #[tokio::test]
    async fn averages_truncated_estimates_per_vacancy() {
        let transport = Arc::new(FakeTransport::new().respond(json!({
            "total": 3,
            "more": false,
            "objects": [
                { "payment_from": 1000, "payment_to": 2000, "currency": "rub" },
                { "payment_from": 0, "payment_to": 3000, "currency": "rub" },
                { "payment_from": 4000, "payment_to": 0, "currency": "rub" }
            ]
        })));

        let row = source(&transport).summarize("Python").await.unwrap();

        assert_eq!(row.vacancies_found, 3);
        assert_eq!(row.vacancies_processed, 3);
        // (1500 + 2400 + 4800) / 3
        assert_eq!(row.average_salary, AverageSalary::Estimated(2900));

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, "https://sj.test/2.0/vacancies/");
        assert_eq!(requests[0].headers, vec![("X-Api-App-Id", "secret".to_string())]);
        assert_eq!(requests[0].query_value("keyword"), Some("программист Python"));
        assert_eq!(requests[0].query_value("town"), Some("Москва"));
        assert_eq!(requests[0].query_value("count"), Some("100"));
    }

    #[tokio::test]
    async fn skips_foreign_currency_and_missing_payment() {
        let transport = Arc::new(FakeTransport::new().respond(json!({
            "total": 4,
            "more": false,
            "objects": [
                { "payment_from": 1000, "payment_to": 2000, "currency": "usd" },
                { "payment_from": 0, "payment_to": 0, "currency": "rub" },
                { "payment_from": null, "payment_to": null, "currency": "rub" },
                { "payment_from": 5000, "payment_to": 0, "currency": "rub" }
            ]
        })));

        let row = source(&transport).summarize("Ruby").await.unwrap();

        assert_eq!(row.vacancies_found, 4);
        assert_eq!(row.vacancies_processed, 1);
        assert_eq!(row.average_salary, AverageSalary::Estimated(6000));
    }

    #[tokio::test]
    async fn empty_results_are_insufficient_data() {
        let transport = Arc::new(
            FakeTransport::new().respond(json!({ "total": 0, "more": false, "objects": [] })),
        );

        let row = source(&transport).summarize("Kotlin").await.unwrap();

        assert_eq!(row.vacancies_found, 0);
        assert_eq!(row.vacancies_processed, 0);
        assert_eq!(row.average_salary, AverageSalary::InsufficientData);
    }

    #[tokio::test]
    async fn follows_total_across_pages() {
        let page = |more: bool| {
            json!({
                "total": 250,
                "more": more,
                "objects": [
                    { "payment_from": 1000, "payment_to": 3000, "currency": "rub" }
                ]
            })
        };
        let transport = Arc::new(
            FakeTransport::new()
                .respond(page(true))
                .respond(page(true))
                .respond(page(false)),
        );

        let row = source(&transport).summarize("Java").await.unwrap();

        assert_eq!(row.vacancies_found, 250);
        assert_eq!(row.vacancies_processed, 3);
        assert_eq!(row.average_salary, AverageSalary::Estimated(2000));

        let pages: Vec<_> = transport
            .requests()
            .iter()
            .map(|request| request.query_value("page").map(str::to_string))
            .collect();
        assert_eq!(
            pages,
            vec![
                Some("0".to_string()),
                Some("1".to_string()),
                Some("2".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn pages_on_total_when_more_flag_is_absent() {
        let page = json!({
            "total": 250,
            "objects": [
                { "payment_from": 2000, "payment_to": 0, "currency": "rub" }
            ]
        });
        let transport = Arc::new(
            FakeTransport::new()
                .respond(page.clone())
                .respond(page.clone())
                .respond(page),
        );

        let row = source(&transport).summarize("Go").await.unwrap();

        assert_eq!(transport.requests().len(), 3);
        assert_eq!(row.vacancies_processed, 3);
        assert_eq!(row.average_salary, AverageSalary::Estimated(2400));
    }

    #[tokio::test]
    async fn stops_when_platform_reports_no_more() {
        let transport = Arc::new(FakeTransport::new().respond(json!({
            "total": 900,
            "more": false,
            "objects": []
        })));

        source(&transport).summarize("PHP").await.unwrap();

        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn unauthorized_response_aborts() {
        let transport = Arc::new(FakeTransport::new().fail_with(403));

        let err = source(&transport).summarize("C#").await.unwrap_err();

        assert!(matches!(
            err,
            FetchError::Status {
                platform: Platform::SuperJob,
                status: 403,
                ..
            }
        ));
    }
}
