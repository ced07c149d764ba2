use actix_web::{http::StatusCode, web, web::ServiceConfig};
use checkout_engine::{events::EventProducers, helpers::compute_signature, SignatureVerifier, WebhookApi};
use rcg_common::Secret;
use serde_json::{json, Value};

use super::helpers::{post_request, WEBHOOK_SECRET};
use crate::{config::ProxyConfig, routes::webhook};

const CAPTURED: &str = r#"{"entity":"event","event":"payment.captured","payload":{"payment":{"entity":{"id":"pay_123","order_id":"order_abc","amount":49900,"currency":"INR","status":"captured"}}}}"#;
const CAPTURED_SIGNATURE: &str = "735b72a31d6c27ef5f2e23219ff2cab691bf8a8f63154a1bce52ece33db7f284";

fn configure(cfg: &mut ServiceConfig) {
    let verifier = SignatureVerifier::new(&Secret::from(WEBHOOK_SECRET)).unwrap();
    let api = WebhookApi::new(verifier, EventProducers::default());
    cfg.app_data(web::Data::new(api)).app_data(web::Data::new(ProxyConfig::default())).service(webhook);
}

fn sign(body: &str) -> String {
    compute_signature(body, WEBHOOK_SECRET).unwrap()
}

#[actix_web::test]
async fn payment_captured_webhook() {
    let _ = env_logger::try_init().ok();
    assert_eq!(sign(CAPTURED), CAPTURED_SIGNATURE);
    let (status, body) =
        post_request("/webhook", CAPTURED, &[("X-Razorpay-Signature", CAPTURED_SIGNATURE)], configure).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body, json!({"success": true, "message": "Webhook processed successfully"}));
}

#[actix_web::test]
async fn webhook_with_bad_signature() {
    let _ = env_logger::try_init().ok();
    let bad = sign("some other body");
    let (status, body) = post_request("/webhook", CAPTURED, &[("X-Razorpay-Signature", bad.as_str())], configure).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body, json!({"success": false, "error": "Invalid webhook signature"}));
}

#[actix_web::test]
async fn webhook_without_signature() {
    let _ = env_logger::try_init().ok();
    let (status, _) = post_request("/webhook", CAPTURED, &[], configure).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn webhook_signature_covers_exact_bytes() {
    let _ = env_logger::try_init().ok();
    // Same JSON, different whitespace. The signature no longer matches.
    let reformatted = serde_json::to_string_pretty(&serde_json::from_str::<Value>(CAPTURED).unwrap()).unwrap();
    let (status, _) =
        post_request("/webhook", &reformatted, &[("X-Razorpay-Signature", CAPTURED_SIGNATURE)], configure).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn unhandled_webhook_is_acknowledged() {
    let _ = env_logger::try_init().ok();
    let body = r#"{"entity":"event","event":"subscription.renewed","payload":{}}"#;
    let signature = sign(body);
    let (status, _) = post_request("/webhook", body, &[("X-Razorpay-Signature", signature.as_str())], configure).await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn malformed_webhook_is_rejected() {
    let _ = env_logger::try_init().ok();
    let body = r#"{"entity":"event","event":"payment.failed","payload":{}}"#;
    let signature = sign(body);
    let (status, body) =
        post_request("/webhook", body, &[("X-Razorpay-Signature", signature.as_str())], configure).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Invalid webhook event"));
}
