// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode},
};
use epica_api::{NarrativeClient, NarrativeError};
use epica_persistence::Persistence;
use serde::de::DeserializeOwned;
use tower::ServiceExt;

use crate::routes::build_router;
use crate::state::AppState;

pub const STAFF_MEMBER: &str = "Giulia";

/// Narrative backend that always answers with the same text.
pub struct CannedNarrative(pub &'static str);

#[async_trait]
impl NarrativeClient for CannedNarrative {
    async fn complete(&self, _prompt: &str) -> Result<String, NarrativeError> {
        Ok(self.0.to_string())
    }
}

pub fn create_test_app_state() -> AppState {
    let persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    AppState::new(
        persistence,
        Arc::new(CannedNarrative("Andamento positivo.")),
        STAFF_MEMBER,
    )
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<serde_json::Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request: Request<Body> = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn send_text(app: &Router, uri: &str, text: &str) -> Response<Body> {
    let request: Request<Body> = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "text/plain")
        .body(Body::from(text.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn read_json<T: DeserializeOwned>(response: Response<Body>) -> T {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body_bytes).unwrap()
}

pub async fn read_text(response: Response<Body>) -> String {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body_bytes.to_vec()).unwrap()
}

/// Creates editions 2024 and 2025.
pub async fn create_editions(app: &Router) {
    for year in ["2024", "2025"] {
        let response = send(
            app,
            "POST",
            "/editions",
            Some(serde_json::json!({ "year": year, "name": format!("Epica {year}") })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
