//! Status and health check handlers.
//!
//! - `/health` - Simple liveness check
//! - `/status` - Version, uptime and export counters

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Server version from Cargo.toml
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Server name from Cargo.toml
pub const SERVER_NAME: &str = env!("CARGO_PKG_NAME");

/// Health check response for simple liveness probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Health status (always "healthy" if responding)
    pub status: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

/// Server status response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Server version (from Cargo.toml)
    pub version: String,

    /// Server name
    pub name: String,

    /// Server uptime in seconds
    pub uptime_seconds: u64,

    /// Exports built successfully since start
    pub exports_completed: u64,

    /// Exports that failed since start
    pub exports_failed: u64,

    /// RFC 3339 timestamp of when status was generated
    pub timestamp: String,
}

/// Request counters for the status endpoint.
///
/// Observational only: nothing in the export pipeline reads these.
#[derive(Debug)]
pub struct ServerStats {
    start_time: Instant,
    exports_completed: AtomicU64,
    exports_failed: AtomicU64,
}

impl ServerStats {
    /// Create counters starting now
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            exports_completed: AtomicU64::new(0),
            exports_failed: AtomicU64::new(0),
        }
    }

    /// Get the server uptime in seconds.
    #[inline]
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Record a completed export and return the new count.
    #[inline]
    pub fn record_export(&self) -> u64 {
        self.exports_completed.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Record a failed export and return the new count.
    #[inline]
    pub fn record_failure(&self) -> u64 {
        self.exports_failed.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Get the number of completed exports.
    #[inline]
    pub fn exports_completed(&self) -> u64 {
        self.exports_completed.load(Ordering::Relaxed)
    }

    /// Get the number of failed exports.
    #[inline]
    pub fn exports_failed(&self) -> u64 {
        self.exports_failed.load(Ordering::Relaxed)
    }

    /// Snapshot the counters into a response body
    pub fn snapshot(&self) -> StatusResponse {
        StatusResponse {
            version: SERVER_VERSION.to_string(),
            name: SERVER_NAME.to_string(),
            uptime_seconds: self.uptime_seconds(),
            exports_completed: self.exports_completed(),
            exports_failed: self.exports_failed(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

impl Default for ServerStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Liveness probe handler.
///
/// # Response
/// - `200 OK` with `{"status":"healthy"}`
#[instrument(skip_all)]
pub async fn health_handler() -> impl IntoResponse {
    debug!("Health check requested");
    (StatusCode::OK, Json(HealthResponse::default()))
}
