use std::net::SocketAddr;

use anyhow::Result;
use inscription::{
    config::Config,
    middleware::RateLimiter,
    routes::{AppState, router},
};
use inscription_registration::{Command, EmailCipher, Query};
use inscription_shared::State;
use tower_http::trace::TraceLayer;

pub async fn serve(
    config: Config,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> Result<()> {
    tracing::info!("Starting inscription server...");

    // Use CLI overrides if provided, otherwise use config
    let host = host_override.unwrap_or(config.server.host.to_owned());
    let port = port_override.unwrap_or(config.server.port);

    let key = config.encryption_key().map_err(|e| anyhow::anyhow!(e))?;
    let cipher = EmailCipher::new(key)?;

    // Write pool first: it creates the database and switches it to WAL
    let write_pool = inscription::db::create_write_pool(&config.database.url).await?;
    inscription_db::migrate(&write_pool).await?;

    let read_pool =
        inscription::db::create_read_pool(&config.database.url, config.database.max_connections)
            .await?;

    let state = State {
        read_db: read_pool.clone(),
        write_db: write_pool.clone(),
    };

    let app_state = AppState {
        command: Command::new(state, cipher.clone()),
        query: Query::new(read_pool.clone(), cipher),
        limiter: RateLimiter::new(&config.rate_limit),
        pool: read_pool.clone(),
        config,
    };

    let app = router(app_state).layer(TraceLayer::new_for_http());

    // Start server
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    // Set up graceful shutdown signal handler
    let shutdown_signal = async {
        let ctrl_c = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("failed to install Ctrl+C handler: {e}");
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
                    tracing::error!("failed to install SIGTERM handler: {e}");
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {
                tracing::info!("Received Ctrl+C signal");
            },
            _ = terminate => {
                tracing::info!("Received SIGTERM signal");
            },
        }

        tracing::info!("Starting graceful shutdown...");
    };

    // Connect info feeds the per-IP rate limiter
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal)
    .await?;

    tracing::info!("Closing database pools...");
    read_pool.close().await;
    write_pool.close().await;
    tracing::info!("Graceful shutdown complete");

    Ok(())
}
