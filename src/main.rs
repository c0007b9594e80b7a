use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

mod aggregate;
mod config;
mod error;
mod models;
mod report;
mod salary;
mod sources;
mod telemetry;

use config::AppConfig;
use models::{Platform, LANGUAGES};
use sources::{HeadHunterSource, HttpTransport, JsonTransport, SuperJobSource, VacancySource};

#[derive(Parser)]
#[command(name = "vacancy-salary-stats")]
#[command(about = "Average programmer salaries per language from HeadHunter and SuperJob", long_about = None)]
struct Cli {
    /// Query a single platform instead of both
    #[arg(long, value_enum)]
    platform: Option<Platform>,
    /// Also write one CSV file per platform into this directory
    #[arg(long)]
    csv_dir: Option<PathBuf>,
}

fn build_source(
    platform: Platform,
    config: &AppConfig,
    transport: &Arc<dyn JsonTransport>,
) -> anyhow::Result<Box<dyn VacancySource>> {
    let source: Box<dyn VacancySource> = match platform {
        Platform::HeadHunter => Box::new(HeadHunterSource::new(
            config.headhunter.clone(),
            config.period_days,
            transport.clone(),
        )),
        Platform::SuperJob => Box::new(SuperJobSource::new(
            config.superjob.clone(),
            config.require_superjob_token()?,
            transport.clone(),
        )),
    };
    Ok(source)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load().context("failed to load configuration")?;
    telemetry::init(&config.log_level)?;

    let platforms = match cli.platform {
        Some(platform) => vec![platform],
        None => vec![Platform::HeadHunter, Platform::SuperJob],
    };

    let transport: Arc<dyn JsonTransport> = Arc::new(
        HttpTransport::new(config.request_timeout).context("failed to build HTTP client")?,
    );

    // Every source is built before the first request so missing
    // credentials stop the run without touching the network.
    let sources = platforms
        .iter()
        .map(|platform| build_source(*platform, &config, &transport))
        .collect::<anyhow::Result<Vec<_>>>()?;

    if let Some(dir) = &cli.csv_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }

    for source in &sources {
        let platform = source.platform();
        let rows = aggregate::collect_statistics(source.as_ref(), &LANGUAGES)
            .await
            .with_context(|| format!("failed to collect {platform} statistics"))?;

        let window = match platform {
            Platform::HeadHunter => Some((
                config.period_days,
                salary::cutoff_date(config.period_days),
            )),
            Platform::SuperJob => None,
        };
        let title = format!("{} {}", platform, config.city_label);
        print!("{}", report::render_table(&title, &rows));
        println!("{}", report::render_caption(window));
        println!();

        if let Some(dir) = &cli.csv_dir {
            let path = dir.join(format!("{}.csv", platform.file_stem()));
            report::write_csv(&rows, &path)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(%platform, path = %path.display(), "csv written");
        }
    }

    Ok(())
}
