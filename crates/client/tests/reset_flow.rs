//! The password-reset flow end to end against a stubbed backend.

#![allow(clippy::unwrap_used)]

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::{patch, post};
use axum::{Json, Router};
use secrecy::SecretString;
use serde_json::json;
use url::Url;

use smartskills_client::api::ApiClient;
use smartskills_client::config::ApiConfig;
use smartskills_client::reset::{ResetFlow, ResetStage};

fn client_for(base: &str) -> ApiClient {
    ApiClient::new(&ApiConfig::for_base_url(Url::parse(base).unwrap()))
}

/// A backend that accepts the whole flow and reports user id 42 from the
/// verify step.
fn happy_backend() -> Router {
    Router::new()
        .route("/auth/send-reset-code/", post(|| async { Json(json!({})) }))
        .route(
            "/auth/verify-reset-code/",
            post(|| async { Json(json!({"user_id": "42"})) }),
        )
        .route(
            "/users/{id}/",
            patch(|Path(id): Path<String>| async move {
                if id == "42" {
                    StatusCode::OK
                } else {
                    StatusCode::NOT_FOUND
                }
            }),
        )
}

#[tokio::test]
async fn test_full_flow_completes_once() {
    let base = common::serve(happy_backend()).await;
    let completions = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&completions);

    let mut flow = ResetFlow::new(client_for(&base)).with_completion(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    flow.set_email("user@example.com");
    flow.submit_email().await;
    assert_eq!(flow.stage(), ResetStage::Verify);
    assert_eq!(
        flow.success_message(),
        Some("Verification code sent to your email.")
    );
    assert!(flow.error().is_none());
    assert!(!flow.is_loading());

    flow.set_code("12a3456xyz");
    assert_eq!(flow.code().as_str(), "123456");
    flow.submit_code().await;
    assert_eq!(flow.stage(), ResetStage::Reset);
    assert_eq!(
        flow.success_message(),
        Some("Code verified successfully! Now set a new password.")
    );
    assert!(!flow.is_loading());

    flow.submit_password(&SecretString::from("new-password"))
        .await;
    assert!(flow.is_complete());
    assert_eq!(flow.success_message(), Some("Password updated successfully!"));
    assert!(!flow.is_loading());
    assert_eq!(completions.load(Ordering::SeqCst), 1);

    // A second submission is ignored; the hook stays fired-once.
    flow.submit_password(&SecretString::from("another")).await;
    assert_eq!(completions.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_back_from_verify_clears_everything() {
    let base = common::serve(happy_backend()).await;
    let mut flow = ResetFlow::new(client_for(&base));

    flow.set_email("user@example.com");
    flow.submit_email().await;
    assert_eq!(flow.stage(), ResetStage::Verify);

    flow.set_code("123456");
    flow.back();

    assert_eq!(flow.stage(), ResetStage::Request);
    assert!(flow.email().is_empty());
    assert!(flow.code().is_empty());
    assert!(flow.error().is_none());
    assert!(flow.success_message().is_none());
}

#[tokio::test]
async fn test_send_failure_stays_in_request_stage() {
    let router = Router::new().route(
        "/auth/send-reset-code/",
        post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let base = common::serve(router).await;
    let mut flow = ResetFlow::new(client_for(&base));

    flow.set_email("user@example.com");
    flow.submit_email().await;

    assert_eq!(flow.stage(), ResetStage::Request);
    assert_eq!(flow.error(), Some("Failed to send code. Please try again."));
    assert!(!flow.is_loading());
}

#[tokio::test]
async fn test_verify_failure_shows_invalid_code_message() {
    let router = Router::new()
        .route("/auth/send-reset-code/", post(|| async { Json(json!({})) }))
        .route(
            "/auth/verify-reset-code/",
            post(|| async { StatusCode::BAD_REQUEST }),
        );
    let base = common::serve(router).await;
    let mut flow = ResetFlow::new(client_for(&base));

    flow.set_email("user@example.com");
    flow.submit_email().await;
    flow.set_code("000000");
    flow.submit_code().await;

    assert_eq!(flow.stage(), ResetStage::Verify);
    assert_eq!(flow.error(), Some("Invalid or expired verification code."));

    // Correcting the field clears the error immediately.
    flow.set_code("123456");
    assert!(flow.error().is_none());
}

#[tokio::test]
async fn test_missing_user_id_fails_the_final_step_without_a_call() {
    // Verify succeeds but never reports whose code it was.
    let router = Router::new()
        .route("/auth/send-reset-code/", post(|| async { Json(json!({})) }))
        .route("/auth/verify-reset-code/", post(|| async { Json(json!({})) }));
    let base = common::serve(router).await;
    let mut flow = ResetFlow::new(client_for(&base));

    flow.set_email("user@example.com");
    flow.submit_email().await;
    flow.set_code("123456");
    flow.submit_code().await;
    assert_eq!(flow.stage(), ResetStage::Reset);

    flow.submit_password(&SecretString::from("new-password"))
        .await;

    assert!(!flow.is_complete());
    assert_eq!(
        flow.error(),
        Some("Could not identify the account for this reset. Please start over.")
    );
}
