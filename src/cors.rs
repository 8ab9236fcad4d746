//! CORS policy for the export server
//!
//! A browser front end served from a local dev server talks to `/scrape` and
//! `/download` cross-origin. Only loopback origins are allowed:
//!
//! - **Allowed Origins**: `localhost`, `127.0.0.1` and `[::1]` on any port
//! - **Allowed Methods**: GET, POST, OPTIONS
//! - **Allowed Headers**: Content-Type
//! - **Exposed Headers**: Content-Disposition (so the download name is visible)

use http::header::{HeaderName, HeaderValue};
use http::Method;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Methods the export API accepts cross-origin
pub const ALLOWED_METHODS: [Method; 3] = [Method::GET, Method::POST, Method::OPTIONS];

/// Request headers the export API accepts cross-origin
pub const ALLOWED_HEADERS: [HeaderName; 1] = [http::header::CONTENT_TYPE];

/// Response headers readable by the calling page
pub const EXPOSED_HEADERS: [HeaderName; 1] = [http::header::CONTENT_DISPOSITION];

/// Preflight cache lifetime
pub const DEFAULT_MAX_AGE_SECS: u64 = 3600;

/// Loopback-only CORS layer.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(|origin, _| {
            is_localhost_origin(origin)
        }))
        .allow_methods(ALLOWED_METHODS)
        .allow_headers(ALLOWED_HEADERS)
        .expose_headers(EXPOSED_HEADERS)
        .max_age(Duration::from_secs(DEFAULT_MAX_AGE_SECS))
}

/// Whether `origin` is an http(s) loopback origin, with or without a port.
pub fn is_localhost_origin(origin: &HeaderValue) -> bool {
    let Ok(origin) = origin.to_str() else {
        return false;
    };

    let Some(rest) = origin
        .strip_prefix("http://")
        .or_else(|| origin.strip_prefix("https://"))
    else {
        return false;
    };

    let host = if let Some(v6) = rest.strip_prefix('[') {
        match v6.split_once(']') {
            Some((addr, tail)) if addr == "::1" => return is_port_suffix(tail),
            _ => return false,
        }
    } else {
        rest
    };

    let (name, tail) = match host.find(':') {
        Some(i) => host.split_at(i),
        None => (host, ""),
    };

    matches!(name, "localhost" | "127.0.0.1") && is_port_suffix(tail)
}

// Empty, or ":" followed by digits only.
fn is_port_suffix(tail: &str) -> bool {
    match tail.strip_prefix(':') {
        None => tail.is_empty(),
        Some(port) => !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed(origin: &str) -> bool {
        is_localhost_origin(&HeaderValue::from_str(origin).unwrap())
    }

    #[test]
    fn test_loopback_origins_allowed() {
        assert!(allowed("http://localhost"));
        assert!(allowed("http://localhost:3000"));
        assert!(allowed("https://127.0.0.1:8051"));
        assert!(allowed("http://[::1]:5173"));
    }

    #[test]
    fn test_other_origins_rejected() {
        assert!(!allowed("http://example.com"));
        assert!(!allowed("http://localhost.evil.com"));
        assert!(!allowed("http://127.0.0.1.nip.io"));
        assert!(!allowed("http://localhost:abc"));
        assert!(!allowed("ftp://localhost"));
        assert!(!allowed("http://192.168.1.10:8051"));
        assert!(!allowed("http://[::2]:80"));
    }
}
