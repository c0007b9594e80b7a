use crate::error::FetchError;
use crate::models::LanguageSummary;
use crate::sources::VacancySource;

/// Summarizes every language on one platform, in list order. The first
/// failed request aborts the whole platform.
pub async fn collect_statistics<S>(
    source: &S,
    languages: &[&str],
) -> Result<Vec<LanguageSummary>, FetchError>
where
    S: VacancySource + ?Sized,
{
    let platform = source.platform();
    tracing::info!(%platform, languages = languages.len(), "collecting vacancy statistics");

    let mut rows = Vec::with_capacity(languages.len());
    for &language in languages {
        let row = source.summarize(language).await.inspect_err(|err| {
            tracing::error!(%platform, language, error = %err, "platform aggregation aborted");
        })?;
        tracing::info!(
            %platform,
            language,
            found = row.vacancies_found,
            processed = row.vacancies_processed,
            "language summarized"
        );
        rows.push(row);
    }

    Ok(rows)
}
