use anyhow::Context;
use event_gateway::{AppState, GatewayConfig, create_router};
use event_store::{EventStore, SqliteEventStore};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    tracing::info!("Starting Event Gateway service");

    let config = GatewayConfig::from_env().context("Invalid gateway configuration")?;
    let allow_list = config.allow_list()?;

    let store = SqliteEventStore::open(&config.database_path).with_context(|| {
        format!(
            "Unable to open event database at {}",
            config.database_path.display()
        )
    })?;
    store
        .ensure_schema()
        .await
        .context("Error while creating table 'events'")?;

    tracing::info!(
        capacity = config.capacity,
        categories = ?config.categories,
        "Event store ready"
    );

    let state = AppState::new(allow_list, config.capacity, Arc::new(store));
    let app = create_router(state);

    let listener = TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("Unable to bind {}", config.listen_addr))?;

    tracing::info!("Listening on {}", config.listen_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
