// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chitanka_dictionary_api::api::{create_app, ApiConfig, AppState};
use std::sync::Arc;
use std::time::Duration;

use super::support::*;

fn counting_state(config: ApiConfig) -> AppState {
    AppState::new(Arc::new(CountingSource::default()), config)
}

#[tokio::test]
async fn test_151st_request_in_window_is_rejected() {
    let state = counting_state(ApiConfig::default());
    let app = app_for(state, peer(1));

    for i in 0..150 {
        let reply = get(&app, "/health").await;
        assert_eq!(reply.status, StatusCode::OK, "request {} was limited", i + 1);
    }

    let reply = get(&app, "/health").await;
    assert_eq!(reply.status, StatusCode::TOO_MANY_REQUESTS);

    let json = reply.json();
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], 429);
    assert_eq!(json["error"], "Too many requests. Please try again later.");
    assert!(reply.headers.contains_key("retry-after"));
    assert_eq!(reply.headers["ratelimit-limit"], "150");
}

#[tokio::test]
async fn test_151st_request_spread_over_window_is_rejected() {
    let state = counting_state(ApiConfig::default());
    let app = app_for(state, peer(1));

    let mut statuses = Vec::new();
    for _ in 0..151 {
        statuses.push(get(&app, "/health").await.status);
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    let limited = statuses
        .iter()
        .filter(|status| **status == StatusCode::TOO_MANY_REQUESTS)
        .count();
    assert_eq!(limited, 1);
    assert_eq!(statuses[150], StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_limit_applies_across_routes() {
    let config = ApiConfig {
        rate_limit_max: 3,
        ..ApiConfig::default()
    };
    let app = app_for(counting_state(config), peer(1));

    assert_eq!(get(&app, "/health").await.status, StatusCode::OK);
    assert_eq!(get(&app, "/api?word=abc").await.status, StatusCode::OK);
    assert_eq!(get(&app, "/nope").await.status, StatusCode::NOT_FOUND);
    assert_eq!(
        get(&app, "/api/abc").await.status,
        StatusCode::TOO_MANY_REQUESTS
    );
}

#[tokio::test]
async fn test_clients_are_limited_independently() {
    let config = ApiConfig {
        rate_limit_max: 2,
        ..ApiConfig::default()
    };
    let state = counting_state(config);
    let first = app_for(state.clone(), peer(1));
    let second = app_for(state.clone(), peer(2));

    get(&first, "/health").await;
    get(&first, "/health").await;
    assert_eq!(
        get(&first, "/health").await.status,
        StatusCode::TOO_MANY_REQUESTS
    );
    assert_eq!(get(&second, "/health").await.status, StatusCode::OK);
    assert_eq!(state.rate_limiter.tracked_clients(), 2);
}

#[tokio::test]
async fn test_reset_clears_counters() {
    let config = ApiConfig {
        rate_limit_max: 1,
        ..ApiConfig::default()
    };
    let state = counting_state(config);
    let app = app_for(state.clone(), peer(1));

    assert_eq!(get(&app, "/health").await.status, StatusCode::OK);
    assert_eq!(
        get(&app, "/health").await.status,
        StatusCode::TOO_MANY_REQUESTS
    );

    state.rate_limiter.reset();
    assert_eq!(get(&app, "/health").await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_forwarded_for_is_used_when_trusted() {
    let config = ApiConfig {
        rate_limit_max: 1,
        trust_forwarded_for: true,
        ..ApiConfig::default()
    };
    let app = app_for(counting_state(config), peer(1));

    let from = |client: &str| {
        Request::builder()
            .uri("/health")
            .header("x-forwarded-for", format!("{}, 10.0.0.1", client))
            .body(Body::empty())
            .unwrap()
    };

    assert_eq!(send_request(&app, from("203.0.113.1")).await.status, StatusCode::OK);
    assert_eq!(send_request(&app, from("203.0.113.2")).await.status, StatusCode::OK);
    assert_eq!(
        send_request(&app, from("203.0.113.1")).await.status,
        StatusCode::TOO_MANY_REQUESTS
    );
}

#[tokio::test]
async fn test_missing_peer_info_shares_one_bucket() {
    let config = ApiConfig {
        rate_limit_max: 1,
        ..ApiConfig::default()
    };
    let app = create_app(counting_state(config));

    assert_eq!(get(&app, "/health").await.status, StatusCode::OK);
    assert_eq!(
        get(&app, "/health").await.status,
        StatusCode::TOO_MANY_REQUESTS
    );
}
