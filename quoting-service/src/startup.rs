use crate::catalog::Catalog;
use crate::config::QuotingConfig;
use crate::handlers;
use crate::services::metrics::{ERRORS_TOTAL, HTTP_REQUESTS_TOTAL};
use crate::services::Database;
use axum::{
    extract::{MatchedPath, Request},
    middleware::{self, Next},
    response::Response,
    routing::{get, patch, post},
    Router,
};
use service_core::error::AppError;
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: QuotingConfig,
    pub db: Database,
    pub catalog: Arc<Catalog>,
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
    state: AppState,
}

impl Application {
    pub async fn build(config: QuotingConfig) -> Result<Self, AppError> {
        let db = Database::new(
            &config.database.url,
            config.database.max_connections,
            config.database.min_connections,
        )
        .await
        .map_err(|e| {
            tracing::error!("Failed to connect to PostgreSQL: {}", e);
            e
        })?;
        db.run_migrations().await.map_err(|e| {
            tracing::error!("Failed to run migrations: {}", e);
            e
        })?;

        let state = AppState {
            config: config.clone(),
            db: db.clone(),
            catalog: Arc::new(Catalog::load()),
        };

        let app = router(state.clone());

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app);

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
            state,
        })
    }

    pub fn db(&self) -> &Database {
        &self.state.db
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}

async fn track_requests(request: Request, next: Next) -> Response {
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let response = next.run(request).await;

    let status = response.status();
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[&route, status.as_str()])
        .inc();
    if status.is_server_error() {
        ERRORS_TOTAL.with_label_values(&[&route]).inc();
    }

    response
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .route("/catalog/categories", get(handlers::list_categories))
        .route("/catalog/subcategories", get(handlers::list_subcategories))
        .route("/catalog/items", get(handlers::list_items))
        .route("/catalog/packs", get(handlers::list_packs))
        .route("/catalog/search", get(handlers::search_items))
        .route("/search/companies", get(handlers::search_companies))
        .route("/search/contacts", get(handlers::search_contacts))
        .route(
            "/quotes",
            get(handlers::list_quotes).post(handlers::create_quote),
        )
        .route(
            "/quotes/:quote_id",
            get(handlers::get_quote).delete(handlers::delete_quote),
        )
        .route(
            "/quotes/:quote_id/status",
            patch(handlers::update_quote_status),
        )
        .route("/quotes/:quote_id/duplicate", post(handlers::duplicate_quote))
        .route("/quotes/:quote_id/pdf", get(handlers::download_quote_pdf))
        .layer(middleware::from_fn(track_requests))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
