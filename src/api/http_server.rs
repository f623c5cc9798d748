// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::{ConnectInfo, Request, State},
    http::{
        header::{
            REFERRER_POLICY, X_CONTENT_TYPE_OPTIONS, X_DNS_PREFETCH_CONTROL, X_FRAME_OPTIONS,
        },
        HeaderMap, HeaderName, HeaderValue,
    },
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::{
    any::Any,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::Arc,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use super::errors::ApiError;
use super::handlers::{
    docs_handler, health_handler, lookup_path_handler, lookup_query_handler, not_found_handler,
};
use super::rate_limiter::ClientRateLimiter;
use super::server::ApiConfig;
use crate::dictionary::DictionarySource;

pub const RATE_LIMIT_LIMIT: &str = "ratelimit-limit";
const X_FORWARDED_FOR: &str = "x-forwarded-for";

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn DictionarySource>,
    pub rate_limiter: Arc<ClientRateLimiter>,
    pub config: Arc<ApiConfig>,
}

impl AppState {
    pub fn new(source: Arc<dyn DictionarySource>, config: ApiConfig) -> Self {
        let rate_limiter = Arc::new(ClientRateLimiter::new(
            config.rate_limit_max,
            config.rate_limit_window(),
        ));
        Self {
            source,
            rate_limiter,
            config: Arc::new(config),
        }
    }
}

/// Build the application router
///
/// Every route, including the fallback, sits behind the rate limiter. Requests
/// with an unsupported method get the same 404 envelope as unknown paths.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler).fallback(not_found_handler))
        .route("/api", get(lookup_query_handler).fallback(not_found_handler))
        .route("/api/", get(lookup_query_handler).fallback(not_found_handler))
        .route("/api/:word", get(lookup_path_handler).fallback(not_found_handler))
        .route("/", get(docs_handler).fallback(not_found_handler))
        .fallback(not_found_handler)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            X_DNS_PREFETCH_CONTROL,
            HeaderValue::from_static("off"),
        ))
        .layer(
            CorsLayer::new()
                .allow_origin(AnyOrigin)
                .allow_methods(AnyOrigin)
                .allow_headers(AnyOrigin),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn rate_limit_middleware(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request,
    next: Next,
) -> Response {
    let peer = connect_info.map(|ConnectInfo(addr)| addr.ip());
    let client = client_ip(
        request.headers(),
        peer,
        state.config.trust_forwarded_for,
    );

    let mut response = match state.rate_limiter.check(client) {
        Ok(()) => next.run(request).await,
        Err(e) => {
            tracing::warn!("Rate limit exceeded for {}", client);
            e.into_response()
        }
    };

    if let Ok(value) = HeaderValue::from_str(&state.rate_limiter.max_requests().to_string()) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(RATE_LIMIT_LIMIT), value);
    }
    response
}

/// Resolve the address used as the rate limit key
pub fn client_ip(headers: &HeaderMap, peer: Option<IpAddr>, trust_forwarded_for: bool) -> IpAddr {
    if trust_forwarded_for {
        let forwarded = headers
            .get(X_FORWARDED_FOR)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .and_then(|first| first.trim().parse::<IpAddr>().ok());
        if let Some(ip) = forwarded {
            return ip;
        }
    }

    peer.unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    ApiError::InternalError(format!("handler panicked: {}", detail)).into_response()
}
