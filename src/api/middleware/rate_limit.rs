//! Rate limiting middleware backed by the Redis cache.

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;

use crate::api::AppState;
use crate::config::{
    RATE_LIMIT_AUTH_REQUESTS, RATE_LIMIT_AUTH_WINDOW_SECONDS, RATE_LIMIT_REQUESTS,
    RATE_LIMIT_WINDOW_SECONDS,
};

/// Rate limit error response
#[derive(Debug)]
pub struct RateLimitError {
    pub retry_after: u64,
}

impl IntoResponse for RateLimitError {
    fn into_response(self) -> Response {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(&self.retry_after.to_string()) {
            headers.insert("Retry-After", value);
        }
        headers.insert("X-RateLimit-Remaining", HeaderValue::from_static("0"));

        (
            StatusCode::TOO_MANY_REQUESTS,
            headers,
            "Too many requests. Please try again later.",
        )
            .into_response()
    }
}

/// Client identifier for rate limiting: forwarded header when behind a
/// proxy, otherwise the connection address.
fn get_client_identifier(request: &Request) -> String {
    if let Some(forwarded) = request
        .headers()
        .get("X-Forwarded-For")
        .and_then(|h| h.to_str().ok())
    {
        if let Some(ip) = forwarded.split(',').next() {
            return ip.trim().to_string();
        }
    }

    if let Some(real_ip) = request
        .headers()
        .get("X-Real-IP")
        .and_then(|h| h.to_str().ok())
    {
        return real_ip.to_string();
    }

    if let Some(connect_info) = request.extensions().get::<ConnectInfo<SocketAddr>>() {
        return connect_info.0.ip().to_string();
    }

    "unknown".to_string()
}

async fn check(
    state: &AppState,
    client_id: &str,
    prefix: &str,
    max_requests: u64,
    window_seconds: u64,
) -> Result<u64, RateLimitError> {
    let key = format!("{}:{}", prefix, client_id);

    let (count, allowed) = match state
        .cache
        .check_rate_limit(&key, max_requests, window_seconds)
        .await
    {
        Ok(result) => result,
        Err(e) => {
            // Fail closed so an unavailable cache cannot be used to bypass
            // the limit.
            tracing::error!(error = %e, "Rate limit check failed - denying request");
            return Err(RateLimitError {
                retry_after: window_seconds,
            });
        }
    };

    if !allowed {
        tracing::warn!(client = %client_id, count = count, "Rate limit exceeded");
        return Err(RateLimitError {
            retry_after: window_seconds,
        });
    }

    Ok(count)
}

fn with_headers(mut response: Response, max_requests: u64, count: u64) -> Response {
    let remaining = max_requests.saturating_sub(count);
    if let Ok(value) = HeaderValue::from_str(&max_requests.to_string()) {
        response.headers_mut().insert("X-RateLimit-Limit", value);
    }
    if let Ok(value) = HeaderValue::from_str(&remaining.to_string()) {
        response.headers_mut().insert("X-RateLimit-Remaining", value);
    }
    response
}

/// General rate limiting for authenticated routes.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, RateLimitError> {
    let client_id = get_client_identifier(&request);
    let count = check(
        &state,
        &client_id,
        "general",
        RATE_LIMIT_REQUESTS,
        RATE_LIMIT_WINDOW_SECONDS,
    )
    .await?;

    let response = next.run(request).await;
    Ok(with_headers(response, RATE_LIMIT_REQUESTS, count))
}

/// Stricter rate limiting for authentication endpoints.
pub async fn rate_limit_auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, RateLimitError> {
    let client_id = get_client_identifier(&request);
    let count = check(
        &state,
        &client_id,
        "auth",
        RATE_LIMIT_AUTH_REQUESTS,
        RATE_LIMIT_AUTH_WINDOW_SECONDS,
    )
    .await?;

    let response = next.run(request).await;
    Ok(with_headers(response, RATE_LIMIT_AUTH_REQUESTS, count))
}
