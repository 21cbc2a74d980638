//! DreamQuest API server entry point.

use std::sync::Arc;

use dreamquest_analysis::application::analyzers::KeywordAnalyzer;
use dreamquest_api::config::AppConfig;
use dreamquest_api::error::AppError;
use dreamquest_api::state::AppState;
use dreamquest_api::{build_router, cors_layer, telemetry};
use dreamquest_core::clock::{Clock, SystemClock};
use dreamquest_core::store::JobStore;
use dreamquest_job_store::{InMemoryJobStore, RedisJobStore};
use dreamquest_pipeline::application::command_handlers::PipelineCollaborators;
use dreamquest_pipeline::infrastructure::{
    FilesystemWorldBuilder, ManifestAssetGenerator, PlaceholderMediaGenerator,
    UnconfiguredTranscriber,
};
use dreamquest_pipeline::worker::{ChannelDispatcher, Worker};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = AppConfig::from_env()?;
    let telemetry = telemetry::init(config.otlp_endpoint.as_deref())?;

    info!("Starting DreamQuest API server");

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let store: Arc<dyn JobStore> = if let Some(redis_url) = &config.redis_url {
        Arc::new(RedisJobStore::connect(redis_url).await.map_err(AppError::Store)?)
    } else {
        warn!("REDIS_URL not set; job records live in process memory only");
        Arc::new(InMemoryJobStore::new(Arc::clone(&clock)))
    };

    let collaborators = PipelineCollaborators {
        transcriber: Arc::new(UnconfiguredTranscriber),
        analyzer: Arc::new(KeywordAnalyzer),
        assets: Arc::new(ManifestAssetGenerator),
        world_builder: Arc::new(FilesystemWorldBuilder::new(
            config.webgl_output_dir.clone(),
            config.webgl_public_path.clone(),
        )),
        media: Arc::new(PlaceholderMediaGenerator),
    };

    let (dispatcher, receiver) = ChannelDispatcher::channel(config.queue_capacity);
    let worker = Worker::new(
        Arc::clone(&clock),
        Arc::clone(&store),
        collaborators,
        config.max_concurrent_jobs,
    );
    let worker_handle = tokio::spawn(worker.run(receiver));

    let app_state = AppState::new(clock, store, Arc::new(dispatcher));
    let app = build_router(app_state).layer(cors_layer(&config.cors_origins)?);

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router owned the last dispatcher handle, so the queue is closed now.
    info!("Server stopped accepting connections; draining worker");
    if let Err(e) = worker_handle.await {
        error!(error = %e, "worker task ended abnormally");
    }

    info!("Graceful shutdown complete");
    telemetry.shutdown();
    Ok(())
}

/// Waits for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received SIGINT (Ctrl-C), starting graceful shutdown"),
        () = terminate => info!("Received SIGTERM, starting graceful shutdown"),
    }
}
