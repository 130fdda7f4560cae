use advent_calendar::{
    AppState, CalendarService, Config,
    messages::{GeminiGenerator, MessageGenerator, PlaceholderGenerator},
    router,
    storage::JsonFileStore,
    unlock::UnlockRule,
};
use std::{net::SocketAddr, sync::Arc};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env()?;

    let generator: Arc<dyn MessageGenerator> = match &config.gemini_api_key {
        Some(key) => Arc::new(GeminiGenerator::new(key.clone(), config.gemini_model.clone())?),
        None => {
            warn!("no Gemini API key configured, using placeholder messages");
            Arc::new(PlaceholderGenerator)
        }
    };

    let rule = UnlockRule {
        season_year: config.season_year,
    };
    let store = Arc::new(JsonFileStore::new(config.data_path.clone()));
    let calendar = CalendarService::open(store, generator, rule).await?;
    info!(path = %config.data_path.display(), "calendar loaded");
    if let Some(today) = config.today {
        info!(%today, "date pinned by ADVENT_TODAY");
    }

    let app = router(AppState::new(calendar, config.today));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
