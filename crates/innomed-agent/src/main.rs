//! InnoMed — Molecule Innovation Twin service
//! Entry point for the server binary.

mod config;

use std::sync::Arc;
use std::time::Duration;

use innomed_mit::{InMemoryProfileStore, Orchestrator, ProfileBuilder};
use innomed_report::PdfReportGenerator;
use innomed_sources::fixtures::FixtureStore;
use innomed_sources::SourceSet;
use innomed_web::{build_router, AppState, ResponseCache};

fn build_sources(config: &config::Config) -> SourceSet {
    let fixtures = match config.sources.data_dir {
        Some(ref dir) => {
            info!("Provider tables loaded from {}", dir.display());
            FixtureStore::from_dir(dir)
        }
        None => {
            info!("Provider tables: compiled-in defaults");
            FixtureStore::embedded()
        }
    };
    SourceSet::mock(fixtures)
}

fn build_cache(config: &config::Config) -> ResponseCache {
    if config.cache.enabled {
        ResponseCache::new(Duration::from_secs(config.cache.ttl_secs))
    } else {
        tracing::warn!("Response cache disabled; every /query runs the full pipeline");
        ResponseCache::disabled()
    }
}

use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("innomed=debug,info")),
        )
        .init();

    info!("💊 InnoMed starting up...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config = config::Config::load()?;
    info!(
        "Configuration loaded. Cache: {} (ttl {}s), reports: {}",
        config.cache.enabled,
        config.cache.ttl_secs,
        config.reports.dir.display()
    );

    let sources = build_sources(&config);
    let orchestrator = Orchestrator::new(
        sources,
        Arc::new(InMemoryProfileStore::new()),
        Arc::new(PdfReportGenerator::new(&config.reports.dir)),
    )
    .with_timeouts(config.sources.timeouts.to_source_timeouts())
    .with_builder(ProfileBuilder::new(config.scoring.clone()));
    info!("✅ Orchestrator ready: 6 providers registered.");

    let state = AppState::new(
        Arc::new(orchestrator),
        build_cache(&config),
        config.limits.to_query_limits(),
    );
    let router = build_router(state);

    let bind_addr = std::env::var("INNOMED_BIND")
        .unwrap_or_else(|_| config.server.bind.clone());

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("🌐 API listening on http://{}", bind_addr);
    info!("   Status:       GET    /");
    info!("   Query:        POST   /query");
    info!("   Stream:       GET    /stream-query");
    info!("   Profiles:     GET    /mit/{{molecule}}");
    info!("   Reports:      GET    /report/{{molecule}}");
    info!("   History:      GET    /history");
    info!("   Cache:        GET    /cache/stats");
    info!("");
    info!("💊 InnoMed ready. Press Ctrl+C to stop.");

    axum::serve(listener, router).await?;

    Ok(())
}
