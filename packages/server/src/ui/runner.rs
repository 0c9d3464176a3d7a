//! Server runner.

use std::{future::Future, sync::Arc};

use axum::{Router, routing::get};
use tokio::{net::TcpListener, sync::mpsc};
use tower_http::trace::TraceLayer;

use crate::{
    config::ServerConfig,
    error::ServerError,
    ui::{
        console,
        handler::{get_room_detail, get_rooms, health_check, websocket_handler},
        signal::shutdown_signal,
        state::AppState,
    },
};

/// オペレーターキューの容量
const OPERATOR_QUEUE_CAPACITY: usize = 64;

/// Bind the configured host and port and serve until Ctrl-C / SIGTERM.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let listener = config.bind().await?;

    serve(listener, config, shutdown_signal()).await
}

/// Serve on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(
    listener: TcpListener,
    config: ServerConfig,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let operator_room = config.operator_room()?;
    tokio::fs::create_dir_all(&config.history_dir).await?;

    let state = Arc::new(AppState::new(config.history_dir.clone()));

    // Operator broadcast loop
    let (queue_tx, queue_rx) = mpsc::channel(OPERATOR_QUEUE_CAPACITY);
    tokio::spawn(state.router.operator_broadcast(operator_room).run(queue_rx));
    if config.no_console {
        drop(queue_tx);
    } else {
        console::spawn_stdin_console(queue_tx);
    }

    let app = build_router(state);

    tracing::info!("Listening on {}", listener.local_addr()?);
    tracing::info!("History directory: {}", config.history_dir.display());
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ws", get(websocket_handler))
        .route("/api/health", get(health_check))
        .route("/api/rooms", get(get_rooms))
        .route("/api/rooms/{name}", get(get_room_detail))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
