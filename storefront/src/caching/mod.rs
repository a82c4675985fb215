//! Caching utilities.
//!
//! Rendered views are pure functions of the request path and the current year, so successful
//! responses can be revalidated through their ETag.

use std::collections::BTreeSet;

use axum::response::IntoResponse;
use md5::{Digest, Md5};
use tracing::{error, warn};

/// The default caching duration.
pub const DEFAULT_CACHE_DURATION: std::time::Duration = std::time::Duration::from_secs(60);

/// A caching strategy.
#[derive(Debug, Clone)]
pub struct Cache {
    cache_duration: std::time::Duration,
}

impl Default for Cache {
    fn default() -> Self {
        Self {
            cache_duration: DEFAULT_CACHE_DURATION,
        }
    }
}

impl Cache {
    /// Set the cache duration.
    pub fn with_cache_duration(mut self, cache_duration: std::time::Duration) -> Self {
        self.cache_duration = cache_duration;
        self
    }

    /// Get the cache control for a request.
    pub fn get_cache_control(&self, headers: &http::HeaderMap) -> CacheControl {
        for cache_control_directive in headers
            .get(http::header::CACHE_CONTROL)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim())
        {
            // Only `no-cache` and `max-age=0` force a fresh response.
            if cache_control_directive == "no-cache" || cache_control_directive == "max-age=0" {
                return CacheControl::NoCache;
            }
        }

        let if_none_match = headers
            .get_all(http::header::IF_NONE_MATCH)
            .into_iter()
            .flat_map(|value| match value.to_str() {
                Ok(value) => value
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .collect::<Vec<_>>(),
                Err(err) => {
                    warn!("Failed to parse If-None-Match header: {err}");

                    Vec::new()
                }
            })
            .collect();

        CacheControl::IfNoneMatch(if_none_match)
    }

    /// Decorates a successful HTML response with caching headers, respecting the provided cache
    /// control directive.
    ///
    /// The ETag is computed from the body. If the client already holds it, the response is
    /// replaced by an empty `304 Not Modified`.
    pub fn check_cache_control(
        &self,
        cache_control: CacheControl,
        body: String,
    ) -> Result<axum::response::Response, axum::response::Response> {
        let etag = compute_etag(&body);

        let response = match cache_control {
            CacheControl::IfNoneMatch(if_none_match)
                if if_none_match.contains(&etag) || if_none_match.contains("*") =>
            {
                let mut response = axum::response::Response::default();
                *response.status_mut() = http::StatusCode::NOT_MODIFIED;

                response
            }
            _ => html_response(http::StatusCode::OK, body),
        };

        response
            .with_etag(&etag)
            .map(|response| response.with_caching(self.cache_duration))
    }
}

/// A cache control directive, read from a request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheControl {
    /// The request should be treated only if none of the provided ETags match.
    IfNoneMatch(BTreeSet<String>),

    /// The response should be treated as fresh.
    NoCache,
}

/// Compute the strong ETag of a body.
pub fn compute_etag(body: &str) -> String {
    format!("\"{}\"", hex::encode(Md5::digest(body.as_bytes())))
}

/// Build an HTML response.
pub fn html_response(status: http::StatusCode, body: String) -> axum::response::Response {
    let mut headers = http::HeaderMap::new();
    headers.insert(
        http::header::CONTENT_TYPE,
        http::HeaderValue::from_static("text/html; charset=utf-8"),
    );

    (status, headers, body).into_response()
}

/// An extension trait for caching directives.
pub trait CachingResponseExt {
    /// Decorate the response with caching headers.
    fn with_caching_disabled(self) -> axum::response::Response;

    /// Decorate the response with a cache control directive.
    fn with_caching(self, duration: std::time::Duration) -> axum::response::Response;

    /// Add an ETag to the response.
    ///
    /// The etag value must be convertible to a valid HTTP header value or an error will be
    /// returned.
    fn with_etag(self, etag: &str) -> Result<axum::response::Response, axum::response::Response>;
}

impl CachingResponseExt for axum::response::Response {
    fn with_caching_disabled(mut self) -> axum::response::Response {
        self.headers_mut().insert(
            http::header::CACHE_CONTROL,
            http::header::HeaderValue::from_static("no-store"),
        );

        self
    }

    fn with_caching(mut self, duration: std::time::Duration) -> axum::response::Response {
        match http::header::HeaderValue::from_str(&format!(
            "private, max-age={}, must-revalidate",
            duration.as_secs()
        )) {
            Ok(cache_control) => {
                self.headers_mut()
                    .insert(http::header::CACHE_CONTROL, cache_control);
            }
            Err(err) => error!("Failed to build Cache-Control header: {err}"),
        }

        self
    }

    fn with_etag(
        mut self,
        etag: &str,
    ) -> Result<axum::response::Response, axum::response::Response> {
        self.headers_mut().insert(
            http::header::ETAG,
            http::header::HeaderValue::from_str(etag).map_err(|err| {
                error!("Failed to parse ETag header: {err}");

                http::StatusCode::INTERNAL_SERVER_ERROR.into_response()
            })?,
        );

        Ok(self)
    }
}
