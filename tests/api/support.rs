// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    extract::connect_info::MockConnectInfo,
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use chitanka_dictionary_api::{
    api::{create_app, ApiConfig, AppState},
    dictionary::{
        ChitankaClient, DictionaryConfig, DictionaryEntry, DictionarySource, LookupError,
    },
};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const WORD_PAGE: &str = include_str!("../fixtures/chitanka_word.html");
pub const MISSING_PAGE: &str = include_str!("../fixtures/chitanka_missing.html");

pub fn encode(word: &str) -> String {
    urlencoding::encode(word).into_owned()
}

/// Upstream serving `тест`; every other word gets the missing page with 404
pub async fn start_upstream() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/w/{}", encode("тест"))))
        .respond_with(ResponseTemplate::new(200).set_body_string(WORD_PAGE))
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex("^/w/"))
        .respond_with(ResponseTemplate::new(404).set_body_string(MISSING_PAGE))
        .mount(&server)
        .await;
    server
}

pub fn chitanka_source(upstream: &MockServer) -> Arc<dyn DictionarySource> {
    let config = DictionaryConfig {
        base_url: upstream.uri(),
        timeout_ms: 2_000,
        ..DictionaryConfig::default()
    };
    Arc::new(ChitankaClient::new(config).unwrap())
}

pub fn peer(last: u8) -> SocketAddr {
    SocketAddr::from(([192, 168, 0, last], 40_000))
}

/// Router with a fixed peer address, as if served with connect info
pub fn app_for(state: AppState, addr: SocketAddr) -> Router {
    create_app(state).layer(MockConnectInfo(addr))
}

pub async fn chitanka_app(upstream: &MockServer) -> (Router, AppState) {
    let state = AppState::new(chitanka_source(upstream), ApiConfig::default());
    (app_for(state.clone(), peer(1)), state)
}

pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl Reply {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).unwrap()
    }
}

pub async fn send(app: &Router, method: Method, uri: &str) -> Reply {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send_request(app, request).await
}

pub async fn get(app: &Router, uri: &str) -> Reply {
    send(app, Method::GET, uri).await
}

pub async fn send_request(app: &Router, request: Request<Body>) -> Reply {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();
    Reply {
        status,
        headers,
        body,
    }
}

/// Source that counts calls and answers from a fixed entry
#[derive(Default)]
pub struct CountingSource {
    pub calls: AtomicUsize,
}

impl CountingSource {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DictionarySource for CountingSource {
    async fn lookup(&self, word: &str) -> Result<DictionaryEntry, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(DictionaryEntry {
            word: word.trim().to_string(),
            dictionary_url: format!("https://rechnik.chitanka.info/w/{}", encode(word)),
            stressed_word: None,
            word_type: None,
            word_class: None,
            type_link: None,
            meaning: Some("counted".to_string()),
            synonyms: None,
            links: None,
        })
    }

    fn name(&self) -> &'static str {
        "counting"
    }
}

/// Source whose lookups always panic
pub struct PanickingSource;

#[async_trait]
impl DictionarySource for PanickingSource {
    async fn lookup(&self, _word: &str) -> Result<DictionaryEntry, LookupError> {
        panic!("parser exploded")
    }

    fn name(&self) -> &'static str {
        "panicking"
    }
}
