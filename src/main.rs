use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cinelist::api::{create_router, AppState};
use cinelist::config::Config;
use cinelist::services::{TmdbProvider, WikiClient};
use cinelist::storage::FileStorage;
use cinelist::store::AppStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cinelist=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // Local storage and the shared store
    let storage = FileStorage::open(&config.data_dir)?;
    let store = Arc::new(AppStore::new(Arc::new(storage), config.variant));

    let mut events = store.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    tracing::debug!(key = %event.key, change = ?event.change, "Store changed")
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Store event logger fell behind")
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    // External collaborators
    let catalog = Arc::new(TmdbProvider::new(
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
    ));
    let encyclopedia = Arc::new(WikiClient::new(config.wiki_api_url.clone()));

    let state = AppState::new(store, catalog, encyclopedia, config.image_base_url.clone());
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(
        addr = %config.bind_addr(),
        variant = ?config.variant,
        data_dir = %config.data_dir,
        "cinelist listening"
    );
    axum::serve(listener, app).await?;

    Ok(())
}
