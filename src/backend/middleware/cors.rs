/**
 * CORS Enforcement Middleware
 *
 * Applies the origin resolver's decision to every request carrying an
 * `Origin` header.
 *
 * # Outcomes
 *
 * - No `Origin` header: passed through untouched (same-origin or non-browser client)
 * - Allowed: the request origin is echoed with credentials enabled; `OPTIONS`
 *   preflights are answered here with an empty 200
 * - Rejected: 403 with a fixed JSON body, downstream routing is not run
 * - Resolver failure: permissive headers without credentials, so a fault in
 *   the allowlist cannot take the site down
 *
 * All four outcomes add `Vary: Origin`.
 */

use axum::{
    extract::{Request, State},
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS,
            ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN, VARY,
        },
        HeaderMap, HeaderValue, Method, StatusCode,
    },
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use futures_util::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use crate::backend::origins::OriginResolver;

pub const ALLOWED_METHODS: &str = "GET, POST, PUT, PATCH, DELETE, OPTIONS";
pub const ALLOWED_HEADERS: &str = "Content-Type, Authorization, X-Requested-With, Accept, Origin";
pub const REJECTION_MESSAGE: &str = "Origin not allowed by CORS policy";

/// CORS middleware
///
/// Install with `middleware::from_fn_with_state(resolver, cors_middleware)`
/// as the outermost layer so rejected origins never reach routing.
///
/// Every response leaving this layer carries `Vary: Origin`, including
/// passthrough responses for requests without one, so shared caches never
/// hand a header-less copy to a cross-origin caller.
pub async fn cors_middleware(
    State(origins): State<Arc<OriginResolver>>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = decide(origins, request, next).await;
    vary_on_origin(response.headers_mut());
    response
}

async fn decide(origins: Arc<OriginResolver>, request: Request, next: Next) -> Response {
    let Some(origin) = request.headers().get(ORIGIN).cloned() else {
        return next.run(request).await;
    };

    let origin_str = match origin.to_str() {
        Ok("") => return next.run(request).await,
        Ok(value) => value.to_owned(),
        Err(e) => {
            tracing::error!(error = %e, "Unreadable Origin header, using permissive CORS headers");
            return degraded(request, next).await;
        }
    };

    let verdict = AssertUnwindSafe(origins.is_origin_allowed(&origin_str))
        .catch_unwind()
        .await;

    match verdict {
        Ok(true) => allowed(origin, request, next).await,
        Ok(false) => {
            tracing::warn!(origin = %origin_str, "Blocked cross-origin request");
            rejected()
        }
        Err(_) => {
            tracing::error!(origin = %origin_str, "Origin check failed, using permissive CORS headers");
            degraded(request, next).await
        }
    }
}

async fn allowed(origin: HeaderValue, request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        let mut response = StatusCode::OK.into_response();
        apply_credentialed_headers(response.headers_mut(), origin);
        return response;
    }

    let mut response = next.run(request).await;
    apply_credentialed_headers(response.headers_mut(), origin);
    response
}

async fn degraded(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        let mut response = StatusCode::OK.into_response();
        apply_permissive_headers(response.headers_mut());
        return response;
    }

    let mut response = next.run(request).await;
    apply_permissive_headers(response.headers_mut());
    response
}

fn rejected() -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(serde_json::json!({ "error": REJECTION_MESSAGE })),
    )
        .into_response()
}

/// Add `Origin` to `Vary` unless a handler already listed it.
pub fn vary_on_origin(headers: &mut HeaderMap) {
    let listed = headers
        .get_all(VARY)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .any(|name| {
            let name = name.trim();
            name == "*" || name.eq_ignore_ascii_case("origin")
        });
    if !listed {
        headers.append(VARY, HeaderValue::from_static("Origin"));
    }
}

/// Echo the request origin with credentials enabled. Never `*`.
pub fn apply_credentialed_headers(headers: &mut HeaderMap, origin: HeaderValue) {
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin);
    headers.insert(ACCESS_CONTROL_ALLOW_CREDENTIALS, HeaderValue::from_static("true"));
    headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(ALLOWED_METHODS));
    headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(ALLOWED_HEADERS));
    vary_on_origin(headers);
}

/// Last-resort header set: any origin, no credentials.
pub fn apply_permissive_headers(headers: &mut HeaderMap) {
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.remove(ACCESS_CONTROL_ALLOW_CREDENTIALS);
    headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(ALLOWED_METHODS));
    headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(ALLOWED_HEADERS));
}
