//! Scrape and download handlers.
//!
//! ```text
//! POST /scrape ──> ExportService ──> ExportStore::save ──> ScrapeResponse
//! GET /download/:name ──> ExportStore::retrieve ──> xlsx attachment
//! ```

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};

use super::status::{ServerStats, StatusResponse};
use crate::error::{Error, StorageError};
use crate::fetch::DocumentFetcher;
use crate::preview::Preview;
use crate::selection::SelectionSet;
use crate::service::ExportService;
use crate::store::ExportStore;

/// MIME type of xlsx workbooks
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Shared state behind the HTTP handlers
pub struct AppState<F> {
    /// Export pipeline
    pub service: ExportService<F>,
    /// Where workbooks are written and served from
    pub store: ExportStore,
    /// Status counters
    pub stats: ServerStats,
}

impl<F: DocumentFetcher> AppState<F> {
    /// Bundle a service and a store
    pub fn new(service: ExportService<F>, store: ExportStore) -> Self {
        Self {
            service,
            store,
            stats: ServerStats::new(),
        }
    }
}

/// Body of `POST /scrape`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeRequest {
    /// Page URL (scheme optional)
    pub url: String,
    /// Categories to export
    #[serde(default)]
    pub selection: SelectionSet,
}

/// Response of `POST /scrape`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeResponse {
    /// Stored export name
    pub file_name: String,
    /// Relative URL the workbook can be downloaded from
    pub download_url: String,
    /// Bounded preview of the selected categories
    pub preview: Preview,
}

/// JSON error body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message
    pub error: String,
}

/// An error on its way to the client
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Create an error with an explicit status
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// HTTP status this error maps to
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = match &err {
            Error::Fetch(_) => StatusCode::BAD_GATEWAY,
            Error::Storage(StorageError::InvalidName(_)) => StatusCode::BAD_REQUEST,
            Error::Storage(StorageError::NotFound(_)) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, format!("Error: {}", err))
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        Error::from(err).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

/// Run an export and store the workbook.
///
/// # Response
/// - `200 OK` - [`ScrapeResponse`]
/// - `400 Bad Request` - empty URL
/// - `502 Bad Gateway` - the page could not be fetched
/// - `500 Internal Server Error` - building or storing failed
#[instrument(skip_all, fields(url = %request.url))]
pub async fn scrape_handler<F: DocumentFetcher + 'static>(
    State(state): State<Arc<AppState<F>>>,
    Json(request): Json<ScrapeRequest>,
) -> Result<Json<ScrapeResponse>, ApiError> {
    if request.url.trim().is_empty() {
        return Err(ApiError::new(StatusCode::BAD_REQUEST, "Error: url is required"));
    }

    let result = async {
        let output = state
            .service
            .extract_and_build(&request.url, &request.selection)
            .await?;
        let stored = state.store.save(&output.workbook).await?;
        Ok::<_, Error>((output, stored))
    }
    .await;

    match result {
        Ok((output, stored)) => {
            state.stats.record_export();
            info!("Export {} ready ({} bytes)", stored.name, stored.size);
            Ok(Json(ScrapeResponse {
                download_url: format!("/download/{}", stored.name),
                file_name: stored.name,
                preview: output.preview(&request.selection),
            }))
        }
        Err(e) => {
            state.stats.record_failure();
            error!("Export failed: {}", e);
            Err(e.into())
        }
    }
}

/// Serve a stored workbook as an attachment.
///
/// # Response
/// - `200 OK` - workbook bytes
/// - `400 Bad Request` - name would leave the storage root
/// - `404 Not Found` - no such export
#[instrument(skip(state))]
pub async fn download_handler<F: DocumentFetcher + 'static>(
    State(state): State<Arc<AppState<F>>>,
    Path(name): Path<String>,
) -> Result<Response, ApiError> {
    let bytes = state.store.retrieve(&name).await.map_err(|e| {
        warn!("Download of {:?} refused: {}", name, e);
        ApiError::from(e)
    })?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", name),
            ),
        ],
        bytes,
    )
        .into_response())
}

/// Version, uptime and export counters.
#[instrument(skip_all)]
pub async fn status_handler<F: DocumentFetcher + 'static>(
    State(state): State<Arc<AppState<F>>>,
) -> Json<StatusResponse> {
    Json(state.stats.snapshot())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BuildError, FetchError};

    #[test]
    fn test_error_status_mapping() {
        let err: ApiError = Error::Fetch(FetchError::Network("down".into())).into();
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);

        let err: ApiError = StorageError::InvalidName("../x".into()).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err: ApiError = StorageError::NotFound("x.xlsx".into()).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let err: ApiError = Error::Build(BuildError::Xlsx("boom".into())).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.message,
            "Error: Build error: Workbook serialization failed: boom"
        );

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ApiError = StorageError::Io(io).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_scrape_request_default_selection() {
        let req: ScrapeRequest = serde_json::from_str(r#"{"url":"example.com"}"#).unwrap();
        assert!(req.selection.is_empty());

        let req: ScrapeRequest =
            serde_json::from_str(r#"{"url":"example.com","selection":["tables","title"]}"#)
                .unwrap();
        assert_eq!(req.selection.to_string(), "title,tables");
    }
}
