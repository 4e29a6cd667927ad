use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use issues_rss::cli::Cli;
use issues_rss::server;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v; logs go to stderr so the feed on stdout stays clean
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let settings = cli.settings();
    tracing::debug!("Using cache directory {:?}", settings.cache_dir);
    let feeds = settings.feed_service()?;

    if cli.server {
        server::serve(feeds, cli.port)
            .await
            .context("Server stopped")?;
        return Ok(());
    }

    let repo = cli.repo_key()?;
    let rss = feeds
        .get_rss(&repo, &cli.filters(), &cli.modes())
        .await
        .with_context(|| format!("Unable to create feed for repo {}", repo))?;
    println!("{}", rss);

    Ok(())
}
