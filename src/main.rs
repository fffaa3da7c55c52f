use fitness_engines::autocomplete::index::ExerciseIndex;
use fitness_engines::autocomplete::refresher::IndexRefresher;
use fitness_engines::autocomplete::source::HttpVocabularySource;
use fitness_engines::config::EngineConfig;
use fitness_engines::ranking::shared::SharedRankedQueue;
use fitness_engines::ranking::types::FeedPost;

use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = EngineConfig::load()?;
    tracing::info!("Vocabulary catalog: {}", config.vocabulary.url);

    // 1. Exercise autocomplete index:
    let source = Arc::new(HttpVocabularySource::new(&config.vocabulary));
    let index = ExerciseIndex::new(source, config.vocabulary.clone(), config.index.clone());

    // 2. Shared ranking queue for feed posts:
    let feed_queue = SharedRankedQueue::<FeedPost>::new();
    tracing::info!("Feed queue ready ({} entries)", feed_queue.len().await);

    // 3. Scheduled refresh; the first tick builds the index:
    let refresher = IndexRefresher::start(index.clone(), config.index.refresh_interval);

    tracing::info!("Engines running. Press Ctrl+C to shutdown");
    shutdown_signal().await?;

    refresher.stop().await;
    tracing::info!(
        "Shutdown complete ({} exercise names indexed)",
        index.len().await
    );

    Ok(())
}

async fn shutdown_signal() -> anyhow::Result<()> {
    let ctrl_c = async {
        signal::ctrl_c().await?;
        tracing::info!("Received Ctrl+C, shutting down");
        anyhow::Ok(())
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())?
            .recv()
            .await;
        tracing::info!("Received terminate signal, shutting down");
        anyhow::Ok(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<anyhow::Result<()>>();

    tokio::select! {
        result = ctrl_c => result,
        result = terminate => result,
    }
}
