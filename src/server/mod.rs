//! # Server Module
//!
//! Axum router exposing the search facade, course listing, suggestions and a
//! health check. Searches are synchronous and run on the blocking pool.

pub mod error;
pub mod handlers;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tokio::signal;

use crate::catalog::TantivyCourseIndex;
use crate::config::ServerConfig;
use crate::search::{CourseIndex, CourseSearchService, SuggestionService};

pub use error::{ApiError, ApiResult};

/// State shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub search: CourseSearchService,
    pub suggestions: SuggestionService,
    pub catalog: Arc<TantivyCourseIndex>,
}

impl AppState {
    pub fn new(catalog: Arc<TantivyCourseIndex>) -> Self {
        let index: Arc<dyn CourseIndex> = catalog.clone();
        Self {
            search: CourseSearchService::new(index.clone()),
            suggestions: SuggestionService::new(index),
            catalog,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/search", get(handlers::search))
        .route("/api/allCourses", get(handlers::all_courses))
        .route("/api/search/suggest", get(handlers::suggest))
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .with_state(state)
}

/// Bind the configured address and serve until Ctrl+C or SIGTERM
pub async fn serve(config: &ServerConfig, state: AppState) -> Result<()> {
    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind to {address}"))?;

    tracing::info!("Course search listening on http://{}", address);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
