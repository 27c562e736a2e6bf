use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use milestone_overview::api;
use milestone_overview::cache::OverviewCache;
use milestone_overview::config::Config;
use milestone_overview::github::GithubClient;
use milestone_overview::overview::{Overview, Renderer};

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG")
            .unwrap_or_else(|_| "milestone_overview=info,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    init_tracing();

    let tracker = GithubClient::from_env(config.api_url.as_str());
    let renderer = match &config.templates {
        Some(dir) => Renderer::from_dir(dir.clone()),
        None => Renderer::builtin(),
    };
    let overview = Overview::new(tracker, config.repo.as_str(), config.filter(), renderer);
    let cache = Arc::new(OverviewCache::new(overview, config.cache));

    let app = api::create_router(cache);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        repo = %config.repo,
        cache = ?config.cache,
        "serving milestone overview on http://{}",
        addr
    );

    axum::serve(listener, app).await?;

    Ok(())
}
