// ShrinkWrap - Compression Advisor and Transform Simulator
// Copyright (C) 2025 ShrinkWrap Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published
// by the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.

// HTTP suggestion backend tests against a local axum server

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use shrinkwrap_advisor::{
    AdviceSource, AdvisorError, AlgorithmAdvisor, HttpSuggestionBackend, SuggestionBackend,
};
use shrinkwrap_core::{AlgorithmKey, CoarseType};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

// Start a router on a random port and return its suggestion URL
async fn start_server(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}/suggest", addr)
}

async fn echo_type(Json(body): Json<Value>) -> Json<Value> {
    let suggestion = match body["fileType"].as_str() {
        Some("text") => "LZ77",
        Some("image") => "Run-Length Encoding",
        _ => "Huffman Coding",
    };
    Json(json!({ "suggestedAlgorithm": suggestion, "reason": "test server" }))
}

fn backend(url: &str) -> HttpSuggestionBackend {
    HttpSuggestionBackend::new(url, Duration::from_secs(2)).unwrap()
}

#[tokio::test]
async fn remote_suggestion_is_parsed() {
    let url = start_server(Router::new().route("/suggest", post(echo_type))).await;

    let outcome = backend(&url).suggest(CoarseType::Text).await.unwrap();

    assert_eq!(outcome.suggested_algorithm_name, "LZ77");
    assert_eq!(outcome.rationale.as_deref(), Some("test server"));
}

#[tokio::test]
async fn advisor_maps_remote_suggestion() {
    let url = start_server(Router::new().route("/suggest", post(echo_type))).await;
    let advisor = AlgorithmAdvisor::new(Arc::new(backend(&url)));

    let advice = advisor.suggest(CoarseType::Image).await;

    assert_eq!(advice.source, AdviceSource::Remote);
    assert_eq!(advice.algorithm, Some(AlgorithmKey::Rle));
}

#[tokio::test]
async fn non_success_status_is_a_failure() {
    let app = Router::new().route(
        "/suggest",
        post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "busy") }),
    );
    let url = start_server(app).await;

    let err = backend(&url).suggest(CoarseType::Pdf).await.unwrap_err();
    assert!(matches!(AdvisorError::from_backend(err), AdvisorError::Status(503)));

    let advice = AlgorithmAdvisor::new(Arc::new(backend(&url))).suggest(CoarseType::Pdf).await;
    assert!(advice.is_fallback());
    assert_eq!(advice.outcome.suggested_algorithm_name, "PDF Optimization");
}

#[tokio::test]
async fn malformed_body_is_a_failure() {
    let app = Router::new().route(
        "/suggest",
        post(|| async { Json(json!({ "algorithm": "DEFLATE" })) }),
    );
    let url = start_server(app).await;

    let err = backend(&url).suggest(CoarseType::Text).await.unwrap_err();
    assert!(matches!(
        AdvisorError::from_backend(err),
        AdvisorError::MalformedResponse(_)
    ));
}

#[tokio::test]
async fn empty_suggestion_is_a_failure() {
    let app = Router::new().route(
        "/suggest",
        post(|| async { Json(json!({ "suggestedAlgorithm": "  " })) }),
    );
    let url = start_server(app).await;

    let advice = AlgorithmAdvisor::new(Arc::new(backend(&url))).suggest(CoarseType::Text).await;
    assert!(advice.is_fallback());
    assert_eq!(advice.algorithm, Some(AlgorithmKey::Deflate));
}

#[tokio::test]
async fn slow_backend_times_out_into_fallback() {
    let app = Router::new().route(
        "/suggest",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Json(json!({ "suggestedAlgorithm": "LZ77" }))
        }),
    );
    let url = start_server(app).await;
    let slow = HttpSuggestionBackend::new(&url, Duration::from_millis(100)).unwrap();

    let advice = AlgorithmAdvisor::new(Arc::new(slow)).suggest(CoarseType::Binary).await;

    assert!(advice.is_fallback());
    assert!(advice.failure.unwrap().is_transport());
    assert_eq!(advice.algorithm, Some(AlgorithmKey::Huffman));
}

#[tokio::test]
async fn unreachable_endpoint_falls_back() {
    // Bind then drop to get a port nothing listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/suggest", listener.local_addr().unwrap());
    drop(listener);

    let advice = AlgorithmAdvisor::new(Arc::new(backend(&url))).suggest(CoarseType::Image).await;

    assert!(advice.is_fallback());
    assert_eq!(advice.outcome.suggested_algorithm_name, "Run-Length Encoding");
}
