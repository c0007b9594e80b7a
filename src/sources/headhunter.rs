use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::config::HeadHunterConfig;
use crate::error::FetchError;
use crate::models::{LanguageSummary, Platform, SearchQuery, Vacancy};
use crate::salary::SalaryAccumulator;
use crate::sources::transport::{ApiRequest, JsonTransport};
use crate::sources::{build_summary, page_count, VacancySource};

const CURRENCY: &str = "RUR";
const PER_PAGE: u32 = 100;
/// The search API refuses to page past the first 2000 results.
const MAX_PAGES: u32 = 2000 / PER_PAGE;

#[derive(Debug, Deserialize)]
struct VacanciesPage {
    #[serde(default)]
    items: Vec<Item>,
    #[serde(default)]
    found: u64,
    pages: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct Item {
    salary: Option<Salary>,
}

#[derive(Debug, Deserialize)]
struct Salary {
    from: Option<u64>,
    to: Option<u64>,
    currency: Option<String>,
}

impl From<Item> for Vacancy {
    fn from(item: Item) -> Self {
        match item.salary {
            Some(salary) => Vacancy::new(salary.from, salary.to, salary.currency),
            None => Vacancy::default(),
        }
    }
}

pub struct HeadHunterSource {
    config: HeadHunterConfig,
    period_days: u32,
    transport: Arc<dyn JsonTransport>,
}

impl HeadHunterSource {
    pub fn new(
        config: HeadHunterConfig,
        period_days: u32,
        transport: Arc<dyn JsonTransport>,
    ) -> Self {
        Self {
            config,
            period_days,
            transport,
        }
    }

    fn page_request(&self, query: &SearchQuery, page: u32) -> ApiRequest {
        ApiRequest::get(Platform::HeadHunter, format!("{}/vacancies", self.config.base_url))
            .header("User-Agent", self.config.user_agent.clone())
            .param("text", &query.keyword)
            .param("area", &query.location)
            .param("period", query.period_days)
            .param("page", page)
            .param("per_page", PER_PAGE)
    }

    async fn fetch_page(
        &self,
        query: &SearchQuery,
        page: u32,
    ) -> Result<VacanciesPage, FetchError> {
        let body: Value = self.transport.get_json(self.page_request(query, page)).await?;
        serde_json::from_value(body).map_err(|source| FetchError::Decode {
            platform: Platform::HeadHunter,
            source,
        })
    }
}

#[async_trait]
impl VacancySource for HeadHunterSource {
    fn platform(&self) -> Platform {
        Platform::HeadHunter
    }

    async fn summarize(&self, language: &str) -> Result<LanguageSummary, FetchError> {
        let query = SearchQuery::for_language(language, &self.config.area, self.period_days);
        let mut salaries = SalaryAccumulator::new();

        let first = self.fetch_page(&query, 0).await?;
        let found = first.found;
        let pages = match first.pages {
            Some(pages) => pages.min(MAX_PAGES),
            None => page_count(found, PER_PAGE, MAX_PAGES),
        };
        if page_count(found, PER_PAGE, u32::MAX) > MAX_PAGES {
            tracing::warn!(
                platform = "HeadHunter",
                language,
                found,
                max_pages = MAX_PAGES,
                "results exceed search depth, paging is truncated"
            );
        }

        tracing::debug!(platform = "HeadHunter", language, page = 0, pages, "page fetched");
        for item in first.items {
            salaries.record(&Vacancy::from(item), CURRENCY);
        }

        for page in 1..pages {
            let next = self.fetch_page(&query, page).await?;
            tracing::debug!(platform = "HeadHunter", language, page, pages, "page fetched");
            for item in next.items {
                salaries.record(&Vacancy::from(item), CURRENCY);
            }
        }

        Ok(build_summary(language, found, &salaries))
    }
}
