//! 集成测试公共工具: 内存存储 + oneshot 调用路由

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use order_server::api::build_app;
use order_server::store::MemoryStore;
use order_server::{Config, ServerState};
use serde_json::Value;
use tower::ServiceExt;

pub const ARCHIVE_SECRET: &str = "settle-1234";
pub const ADMIN_TOKEN: &str = "abcd1234";

pub fn test_state() -> ServerState {
    ServerState::with_store(Config::for_testing(), Arc::new(MemoryStore::new()))
}

pub fn app(state: &ServerState) -> Router {
    build_app(state).with_state(state.clone())
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is not JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("response body is not UTF-8")
    }
}

pub async fn send(
    state: &ServerState,
    method: &str,
    uri: &str,
    body: Option<Value>,
    headers: &[(&str, &str)],
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app(state).oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes().to_vec();
    TestResponse {
        status,
        headers,
        body,
    }
}

pub async fn get(state: &ServerState, uri: &str) -> TestResponse {
    send(state, "GET", uri, None, &[]).await
}

/// 创建订单并返回响应中的 order
pub async fn create_order(state: &ServerState, payload: Value) -> Value {
    let response = send(state, "POST", "/api/orders", Some(payload), &[]).await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.text());
    response.json()["order"].clone()
}
