use std::fmt;

use clap::ValueEnum;

pub const LANGUAGES: [&str; 8] = [
    "Python",
    "Java",
    "Javascript",
    "C#",
    "C++",
    "PHP",
    "Ruby",
    "Kotlin",
];

const KEYWORD_PREFIX: &str = "программист";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Platform {
    #[value(name = "headhunter")]
    HeadHunter,
    #[value(name = "superjob")]
    SuperJob,
}

impl Platform {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::HeadHunter => "HeadHunter",
            Self::SuperJob => "SuperJob",
        }
    }

    pub fn file_stem(&self) -> &'static str {
        match self {
            Self::HeadHunter => "headhunter",
            Self::SuperJob => "superjob",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub keyword: String,
    pub location: String,
    pub period_days: u32,
}

impl SearchQuery {
    pub fn for_language(language: &str, location: &str, period_days: u32) -> Self {
        Self {
            keyword: format!("{KEYWORD_PREFIX} {language}"),
            location: location.to_string(),
            period_days,
        }
    }
}

/// Salary fields shared by both platforms after normalization. A zero bound
/// is stored as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vacancy {
    pub salary_from: Option<u64>,
    pub salary_to: Option<u64>,
    pub currency: Option<String>,
}

impl Vacancy {
    pub fn new(salary_from: Option<u64>, salary_to: Option<u64>, currency: Option<String>) -> Self {
        Self {
            salary_from: salary_from.filter(|value| *value > 0),
            salary_to: salary_to.filter(|value| *value > 0),
            currency,
        }
    }

    pub fn has_currency(&self, expected: &str) -> bool {
        self.currency
            .as_deref()
            .is_some_and(|currency| currency.eq_ignore_ascii_case(expected))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AverageSalary {
    Estimated(u64),
    InsufficientData,
}

impl AverageSalary {
    pub fn value(&self) -> Option<u64> {
        match self {
            Self::Estimated(value) => Some(*value),
            Self::InsufficientData => None,
        }
    }
}

impl fmt::Display for AverageSalary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Estimated(value) => write!(f, "{value}"),
            Self::InsufficientData => f.write_str("n/a"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageSummary {
    pub language: String,
    pub vacancies_found: u64,
    pub vacancies_processed: u64,
    pub average_salary: AverageSalary,
}
