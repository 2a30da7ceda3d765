use crate::app::{AppContext, FreshetError, Result};
use crate::cache::SeenCache;
use crate::cli::Cli;
use crate::config::Config;
use crate::mailer::compose;
use crate::runner::Runner;

/// Executes one polling pass: load, fetch, diff, then mail or print.
pub async fn run(cli: &Cli) -> Result<()> {
    let config = Config::load(&cli.config)?;
    let cache = SeenCache::load(&cli.cache)?;
    let ctx = AppContext::new(&config.smtp)?;

    let mut runner = Runner::new(
        config.feeds,
        cache,
        cli.cache.clone(),
        ctx.fetcher.clone(),
        ctx.normalizer.clone(),
    );

    let new_by_feed = runner.fetch_all(cli.dry_run).await?;

    let mut reports = Vec::new();
    let mut total_new = 0;

    for (feed_name, entries) in &new_by_feed {
        if entries.is_empty() {
            continue;
        }
        total_new += entries.len();

        let feed = runner
            .feed(feed_name)
            .ok_or_else(|| FreshetError::FeedNotFound(feed_name.clone()))?;
        let report = compose(&feed.title, &config.smtp, entries)?;

        if cli.dry_run {
            println!("New mail report for \"{}\":", feed_name);
            println!("{}", String::from_utf8_lossy(&report.formatted()));
        } else {
            reports.push(report);
        }
    }

    let report_count = reports.len();
    ctx.mailer.send_all(reports).await?;

    tracing::info!(
        "Run complete: {} new entries, {} mail reports",
        total_new,
        report_count
    );

    Ok(())
}
