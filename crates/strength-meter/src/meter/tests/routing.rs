use super::common::*;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, Request, StatusCode};
use axum::response::IntoResponse;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::meter::router::{
    default_password_hash, latest_handler, strength_handler, strength_router, StrengthPayload,
};

fn json_request(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn payload(password: &str) -> StrengthPayload {
    StrengthPayload {
        password: password.to_string(),
        password_hash: None,
        username: String::new(),
        core_info: Vec::new(),
        all_info: Vec::new(),
    }
}

#[test]
fn default_hash_is_hex_sha256() {
    assert_eq!(
        default_password_hash("correct horse"),
        "4104d36f8da2c254349f85836793ebe029e0c957063a34c91c2e9203187b5631"
    );
}

#[tokio::test]
async fn strength_handler_hashes_password_when_no_hash_given() {
    let (engine, estimator) = engine_with_heuristic(60.0, meter_config());

    let response = strength_handler(State(engine), axum::Json(payload("correct horse")))
        .await
        .expect("password within bounds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(
        body["password_hash"],
        json!(default_password_hash("correct horse"))
    );
    assert_eq!(body["score"], json!(60.0));
    assert_eq!(body["state"], json!("heuristic_ready"));
    assert_eq!(body["problems"], json!([]));
    assert_eq!(body["feedback"]["public_tips"], json!([]));
    assert_eq!(estimator.queries().len(), 1);
}

#[tokio::test]
async fn strength_handler_rejects_oversized_passwords() {
    let (engine, estimator) = engine_with_heuristic(60.0, meter_config());
    let oversized = "a".repeat(meter_config().max_length + 1);

    let response = strength_handler(State(engine), axum::Json(payload(&oversized)))
        .await
        .into_response();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert_eq!(
        body["error"],
        json!("invalid input: password exceeds 256 characters")
    );
    assert!(estimator.queries().is_empty());
}

#[tokio::test]
async fn latest_handler_returns_not_found_for_unknown_hash() {
    let (engine, _) = engine_with_heuristic(60.0, meter_config());

    let response = latest_handler(State(engine), Path("unknown".to_string())).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json_body(response).await;
    assert_eq!(body["state"], json!("no_score"));
}

#[tokio::test]
async fn neural_score_route_fuses_into_latest_report() {
    let (engine, _) = engine_with_heuristic(60.0, meter_config());
    let router = strength_router(engine);

    let response = router
        .clone()
        .oneshot(json_request(
            "/api/v1/strength",
            json!({ "password": "correcthorse", "password_hash": "h1", "username": "sam" }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .clone()
        .oneshot(json_request(
            "/api/v1/neural-score",
            json!({ "password": "correcthorse", "score": 22.5 }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let body = read_json_body(response).await;
    assert_eq!(body["neural"], json!({ "state": "resolved", "score": 22.5 }));

    let response = router
        .oneshot(
            Request::get("/api/v1/strength/h1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["score"], json!(22.5));
    assert_eq!(body["state"], json!("fused"));
}

#[tokio::test]
async fn lookup_route_reports_pending_query() {
    let (engine, _) = engine_with_heuristic(60.0, meter_config());
    let router = strength_router(engine);

    router
        .clone()
        .oneshot(json_request(
            "/api/v1/strength",
            json!({ "password": "correcthorse" }),
        ))
        .await
        .expect("route executes");

    let response = router
        .clone()
        .oneshot(json_request(
            "/api/v1/neural-score/lookup",
            json!({ "password": "correcthorse" }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json_body(response).await, json!({ "state": "pending" }));

    let response = router
        .oneshot(json_request(
            "/api/v1/neural-score/lookup",
            json!({ "password": "never-seen" }),
        ))
        .await
        .expect("route executes");
    assert_eq!(read_json_body(response).await, json!({ "state": "absent" }));
}
