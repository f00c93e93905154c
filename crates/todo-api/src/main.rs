use anyhow::{Context, Result};
use clap::{error::ErrorKind, Parser};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use todo_api::{create_router, AppState, Config};
use todo_db::Database;
use todo_events::{EventPublisher, KafkaPublisher, NoopPublisher};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    init_tracing();

    let config = match Config::try_parse() {
        Ok(config) => config,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            return Err(e.into());
        }
    };

    if let Err(e) = run(config).await {
        tracing::error!("Todo API terminated: {:#}", e);
        return Err(e);
    }

    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "todo_api=debug,todo_db=debug,todo_events=debug,tower_http=debug,axum::rejection=trace"
            .into()
    });

    let json = std::env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn run(config: Config) -> Result<()> {
    // Initialize database; the schema must be in place before serving
    let database = Database::new(&config.db_config())
        .await
        .context("connecting to database")?;

    let report = database
        .bootstrap()
        .await
        .context("bootstrapping todos schema")?;
    tracing::info!(seeded = report.seeded, "Database schema ready");

    // Initialize event publisher (optional)
    let publisher: Arc<dyn EventPublisher> = match config.kafka_config() {
        Some(kafka) => match KafkaPublisher::connect(kafka).await {
            Ok(publisher) => Arc::new(publisher),
            Err(e) => {
                tracing::warn!("Event bus unavailable, continuing without events: {}", e);
                Arc::new(NoopPublisher)
            }
        },
        None => {
            tracing::info!("No KAFKA_BROKERS provided, running without events");
            Arc::new(NoopPublisher)
        }
    };

    let state = AppState::new(Arc::new(database.clone()), publisher);
    let app = create_router(state);

    // Start server
    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    tracing::info!("Todo API running on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    database.close().await;
    tracing::info!("Todo API stopped");

    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
