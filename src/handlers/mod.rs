//! HTTP handlers for the export server
//!
//! # Routes
//!
//! | Method | Path               | Handler                          |
//! |--------|--------------------|----------------------------------|
//! | GET    | `/health`          | [`status::health_handler`]       |
//! | GET    | `/status`          | [`export::status_handler`]       |
//! | POST   | `/scrape`          | [`export::scrape_handler`]       |
//! | GET    | `/download/:name`  | [`export::download_handler`]     |

pub mod export;
pub mod status;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::cors::cors_layer;
use crate::fetch::DocumentFetcher;

pub use export::{
    download_handler, scrape_handler, status_handler, ApiError, AppState, ErrorResponse,
    ScrapeRequest, ScrapeResponse, XLSX_CONTENT_TYPE,
};
pub use status::{health_handler, HealthResponse, ServerStats, StatusResponse};

/// Build the full application router over `state`.
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use websheet::fetch::HttpFetcher;
/// use websheet::handlers::{app_router, AppState};
/// use websheet::service::ExportService;
/// use websheet::store::ExportStore;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let service = ExportService::new(HttpFetcher::new()?);
/// let state = Arc::new(AppState::new(service, ExportStore::new("exports")));
/// let app = app_router(state);
/// # let _ = app;
/// # Ok(())
/// # }
/// ```
pub fn app_router<F: DocumentFetcher + 'static>(state: Arc<AppState<F>>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/status", get(status_handler::<F>))
        .route("/scrape", post(scrape_handler::<F>))
        .route("/download/:name", get(download_handler::<F>))
        .layer(cors_layer())
        .with_state(state)
}
