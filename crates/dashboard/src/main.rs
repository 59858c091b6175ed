use std::io::Write;

use anyhow::Context;
use mf_portfolio_core::models::settings::PortfolioSettings;
use mf_portfolio_core::render::{render_page, HtmlOptions};
use mf_portfolio_core::MfPortfolio;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Logs go to stderr; stdout carries only the page.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let settings = PortfolioSettings::default();
    let options = HtmlOptions::from_settings(&settings);
    let portfolio = MfPortfolio::new(settings).context("invalid portfolio configuration")?;
    info!(?portfolio, "loading portfolio");

    let outcome = portfolio.load_outcome().await;
    if let Some(snapshot) = outcome.snapshot() {
        info!(
            as_of = %snapshot.as_of,
            total_current = %snapshot.summary.total_current,
            "portfolio loaded"
        );
    } else {
        error!("portfolio failed to load; rendering holding statuses only");
    }

    let page = render_page(&outcome, &options);
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(page.as_bytes())
        .context("failed to write page to stdout")?;
    stdout.flush().context("failed to flush stdout")?;
    Ok(())
}
