//! Integration tests for the HTTP endpoints.
//!
//! The router is driven in-process with the scripted `MockRunner`, so no
//! GPU, vendor tool or network socket is needed.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use gputel::domain::Platform;
use gputel::error::ProbeError;
use gputel::mock::MockRunner;
use gputel::server::create_router;
use gputel::services::apple_service::{
    brand_invocation, core_count_invocation, memsize_invocation, vm_stat_invocation,
};
use gputel::services::{Collector, NvidiaService};

const NVIDIA_ROW: &str =
    "0, Test GPU, 525.60, 45, 10, 5, 8192, 6000, 2192, 50.5, 150.0, 1500, 7000, 30\n";

// ── Helpers ───────────────────────────────────────────────────────────────────

fn nvidia_query() -> String {
    NvidiaService::default().query_invocation().command_line()
}

async fn get(runner: MockRunner, platform: Platform, uri: &str) -> (StatusCode, Value) {
    let app = create_router(Arc::new(Collector::new(runner, platform)));

    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get("content-type")
        .map(|v| v.to_str().unwrap_or("").to_string())
        .unwrap_or_default();
    assert!(
        content_type.starts_with("application/json"),
        "Expected application/json content-type, got: {content_type}"
    );

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&body)
        .unwrap_or_else(|e| panic!("Expected valid JSON body: {e}"));
    (status, value)
}

// ── GET /gpu ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn gpu_returns_nvidia_records() {
    let runner = MockRunner::new()
        .respond("which nvidia-smi", "/usr/bin/nvidia-smi\n")
        .respond(nvidia_query(), NVIDIA_ROW);

    let (status, body) = get(runner, Platform::Linux, "/gpu").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hasNvidiaSmi"], json!(true));
    assert_eq!(body["hasMps"], json!(false));
    assert_eq!(body["platform"], json!("linux"));
    assert!(body.get("error").is_none());

    let gpu = &body["gpus"][0];
    assert_eq!(gpu["index"], json!(0));
    assert_eq!(gpu["name"], json!("Test GPU"));
    assert_eq!(gpu["driverVersion"], json!("525.60"));
    assert_eq!(gpu["temperature"], json!(45));
    assert_eq!(gpu["utilization"], json!({"gpu": 10, "memory": 5}));
    assert_eq!(gpu["memory"], json!({"total": 8192, "free": 6000, "used": 2192}));
    assert_eq!(gpu["power"], json!({"draw": 50.5, "limit": 150.0}));
    assert_eq!(gpu["clocks"], json!({"graphics": 1500, "memory": 7000}));
    assert_eq!(gpu["fan"], json!({"speed": 30}));
    assert_eq!(gpu["type"], json!("cuda"));
}

#[tokio::test]
async fn gpu_without_hardware_is_ok() {
    let (status, body) = get(MockRunner::new(), Platform::Linux, "/gpu").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "hasNvidiaSmi": false,
            "hasMps": false,
            "platform": "linux",
            "gpus": []
        })
    );
}

#[tokio::test]
async fn gpu_reports_apple_silicon_with_unknown_markers() {
    let runner = MockRunner::new()
        .respond(brand_invocation().command_line(), "Apple M2 Pro\n")
        .respond(memsize_invocation().command_line(), "17179869184\n")
        .fail(
            vm_stat_invocation().command_line(),
            ProbeError::NotFound("vm_stat".to_string()),
        )
        .respond(
            core_count_invocation().command_line(),
            "      Total Number of Cores: 19\n",
        );

    let (status, body) = get(runner, Platform::MacOs, "/gpu").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hasMps"], json!(true));
    assert_eq!(body["platform"], json!("macos"));

    let gpu = &body["gpus"][0];
    assert_eq!(gpu["type"], json!("mps"));
    assert_eq!(gpu["name"], json!("Apple Silicon GPU"));
    assert_eq!(gpu["model"], json!("Apple M2 Pro"));
    assert_eq!(gpu["cores"], json!(19));
    assert_eq!(gpu["memory"]["total"], json!(16384));
    assert_eq!(gpu["memory"]["used"], json!("N/A"));
    assert_eq!(gpu["memory"]["free"], json!("N/A"));
    assert_eq!(gpu["utilization"]["memory"], json!("N/A"));
    assert_eq!(gpu["temperature"], json!("N/A"));
    assert_eq!(gpu["fan"]["speed"], json!("N/A"));
}

#[tokio::test]
async fn gpu_failure_returns_500_with_snapshot_body() {
    let runner = MockRunner::new()
        .respond("which nvidia-smi", "/usr/bin/nvidia-smi\n")
        .fail(
            nvidia_query(),
            ProbeError::Failed {
                program: "nvidia-smi".to_string(),
                code: Some(9),
                stderr: "NVIDIA-SMI has failed because it couldn't communicate with the NVIDIA driver"
                    .to_string(),
            },
        );

    let (status, body) = get(runner, Platform::Linux, "/gpu").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["hasNvidiaSmi"], json!(false));
    assert_eq!(body["hasMps"], json!(false));
    assert_eq!(body["gpus"], json!([]));
    let error = body["error"].as_str().unwrap();
    assert!(!error.is_empty());
    assert!(error.contains("nvidia-smi"));
}

#[tokio::test]
async fn gpu_on_linux_never_runs_apple_tools() {
    let collector = Arc::new(Collector::new(MockRunner::new(), Platform::Linux));

    let response = create_router(Arc::clone(&collector))
        .oneshot(Request::builder().uri("/gpu").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(collector.runner().calls(), vec!["which nvidia-smi".to_string()]);
    assert!(!collector.runner().was_called(&brand_invocation().command_line()));
}

#[tokio::test]
async fn gpu_is_also_mounted_under_api() {
    let (status, body) = get(MockRunner::new(), Platform::Linux, "/api/gpu").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["gpus"], json!([]));
}

// ── GET /health ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn health_returns_version() {
    let (status, body) = get(MockRunner::new(), Platform::Linux, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("ok"));
    assert_eq!(body["version"], json!(env!("CARGO_PKG_VERSION")));
}

#[tokio::test]
async fn unknown_route_is_404() {
    let app = create_router(Arc::new(Collector::new(MockRunner::new(), Platform::Linux)));

    let response = app
        .oneshot(Request::builder().uri("/gpus").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
