pub mod error;
pub mod routes;
pub mod state;

use axum::routing::get;
use axum::Router;
use planner_core::config::Config;
use std::path::PathBuf;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the axum Router with all API routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(root: PathBuf, config: Config) -> Router {
    let app_state = state::AppState::new(root, config);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(routes::health::health))
        // Tasks
        .route(
            "/api/tasks",
            get(routes::tasks::list_tasks).post(routes::tasks::create_task),
        )
        .route(
            "/api/tasks/{id}",
            get(routes::tasks::get_task)
                .put(routes::tasks::update_task)
                .delete(routes::tasks::delete_task),
        )
        // Weekly summary
        .route("/api/weekly-summary", get(routes::weekly::weekly_summary))
        .route("/api/weekly-summary/{week}", get(routes::weekly::week_tasks))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// Start the REST API on the address named in `config.server`.
pub async fn serve(root: PathBuf, config: Config) -> anyhow::Result<()> {
    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    serve_on(root, config, listener).await
}

/// Start the REST API on a pre-bound listener.
///
/// Accepts a `TcpListener` that was already bound so the caller can read the
/// actual port first (useful when port 0 lets the OS pick).
pub async fn serve_on(
    root: PathBuf,
    config: Config,
    listener: tokio::net::TcpListener,
) -> anyhow::Result<()> {
    let local = listener.local_addr()?;
    let app = build_router(root, config);

    tracing::info!("planner API listening on http://{local}");

    axum::serve(listener, app).await?;
    Ok(())
}
