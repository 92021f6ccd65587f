//! Security-related response headers.
//!
//! Responses carry patient and staff data, so nothing is cacheable by
//! intermediaries and browsers get the usual clickjacking/sniffing protections.
//! HSTS is only sent in production (local development runs over plain HTTP).

use axum::Router;
use axum::http::header::{HeaderName, HeaderValue};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::AppEnv;

const BASELINE: &[(&str, &str)] = &[
    ("x-frame-options", "DENY"),
    ("content-security-policy", "frame-ancestors 'none'"),
    ("x-content-type-options", "nosniff"),
    ("referrer-policy", "no-referrer"),
    ("permissions-policy", "camera=(), microphone=(), geolocation=()"),
    ("cache-control", "no-store"),
];

const HSTS: (&str, &str) = ("strict-transport-security", "max-age=31536000");

fn headers_for(app_env: AppEnv) -> Vec<(&'static str, &'static str)> {
    let mut headers = BASELINE.to_vec();
    if app_env.is_production() {
        headers.push(HSTS);
    }
    headers
}

/// Apply security headers to all responses (handler-set values win).
pub fn apply(router: Router, app_env: AppEnv) -> Router {
    headers_for(app_env)
        .into_iter()
        .fold(router, |router, (name, value)| {
            router.layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static(name),
                HeaderValue::from_static(value),
            ))
        })
}
