//! HTTP surface for Notekeeper.
//!
//! # Responsibility
//! - Wire note use-cases and page views into an axum router.
//! - Own process startup: template loading, binding and serving.
//!
//! # Invariants
//! - Templates are loaded before the listener is bound; a load failure
//!   aborts startup.
//! - Handlers share one store through `AppState`.

pub mod config;
pub mod error;
pub mod handlers;
pub mod view;

pub use config::ServerConfig;
pub use error::{AppError, StartupError};
pub use view::{RenderError, TemplateLoadError, Views};

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use log::{debug, info, warn};
use notekeeper_core::{MemoryNoteStore, NoteService};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tower_http::services::ServeDir;

/// State cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<NoteService<MemoryNoteStore>>,
    pub views: Arc<Views>,
}

impl AppState {
    /// Creates state with an empty store.
    pub fn new(views: Views) -> Self {
        Self {
            service: Arc::new(NoteService::new(MemoryNoteStore::new())),
            views: Arc::new(views),
        }
    }
}

/// Builds the application router.
pub fn build_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(handlers::list_notes))
        .route("/notes/add", get(handlers::add_note))
        .route("/notes/save", post(handlers::save_note))
        .route("/notes/edit/{id}", get(handlers::edit_note))
        .route("/notes/update/{id}", post(handlers::update_note))
        .route("/notes/delete/{id}", post(handlers::delete_note))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .fallback(handlers::fallback)
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

/// Loads templates, binds the listener and serves until Ctrl-C.
pub async fn run(config: ServerConfig) -> Result<(), StartupError> {
    let views = Views::load(&config.templates_dir)?;
    let app = build_router(AppState::new(views), &config.static_dir);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr, source })?;
    info!("event=server_listen module=server status=ok addr={addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(StartupError::Serve)?;

    info!("event=server_shutdown module=server status=ok");
    Ok(())
}

async fn log_request(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let response = next.run(request).await;
    debug!(
        "event=http_request module=http method={} path={} status={} duration_ms={}",
        method,
        path,
        response.status().as_u16(),
        started_at.elapsed().as_millis()
    );
    response
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("event=server_shutdown module=server status=error error={err}");
        std::future::pending::<()>().await;
    }
    info!("event=server_shutdown module=server status=start");
}
