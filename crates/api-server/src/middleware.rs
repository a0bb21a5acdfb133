//! HTTP layers wrapped around the API router

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderName, HeaderValue, Method},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;

const ALLOWED_METHODS: [Method; 6] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::PATCH,
    Method::DELETE,
    Method::OPTIONS,
];

/// CORS for the configured frontend origin; `*` allows any origin.
pub fn cors_layer(frontend_url: &str) -> CorsLayer {
    let permissive = || {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(ALLOWED_METHODS)
            .allow_headers([header::CONTENT_TYPE])
    };

    if frontend_url == "*" {
        return permissive();
    }

    match HeaderValue::from_str(frontend_url) {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(ALLOWED_METHODS)
            .allow_headers([header::CONTENT_TYPE])
            .allow_credentials(true),
        Err(_) => {
            tracing::warn!("Invalid FRONTEND_URL {:?}, allowing any origin", frontend_url);
            permissive()
        }
    }
}

fn static_header(name: HeaderName, value: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::if_not_present(name, HeaderValue::from_static(value))
}

/// Body limit, security headers, CORS and request tracing.
pub fn apply(router: Router, config: &ServerConfig) -> Router {
    let mut router = router.layer(DefaultBodyLimit::max(config.body_limit));

    if config.security_headers {
        router = router
            .layer(static_header(header::X_CONTENT_TYPE_OPTIONS, "nosniff"))
            .layer(static_header(header::X_FRAME_OPTIONS, "DENY"))
            .layer(static_header(header::REFERRER_POLICY, "no-referrer"));
    }

    router
        .layer(cors_layer(&config.frontend_url))
        .layer(TraceLayer::new_for_http())
}
