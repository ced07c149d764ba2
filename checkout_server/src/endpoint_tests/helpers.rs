use actix_web::{http::StatusCode, test, test::TestRequest, web::ServiceConfig, App};
use chrono::{TimeZone, Utc};
use checkout_engine::{
    db_types::{Order, OrderId, OrderStatusType, Payment, PaymentStatusType},
    helpers::{compute_signature, payment_signature_message},
};
use log::debug;

use crate::server::json_config;

pub const KEY_SECRET: &str = "test_key_secret";
pub const WEBHOOK_SECRET: &str = "test_webhook_secret";

pub async fn get_request<F>(path: &str, configure: F) -> (StatusCode, String)
where F: FnOnce(&mut ServiceConfig) {
    send(TestRequest::get().uri(path), configure).await
}

pub async fn post_request<F>(path: &str, body: &str, headers: &[(&str, &str)], configure: F) -> (StatusCode, String)
where F: FnOnce(&mut ServiceConfig) {
    let mut req =
        TestRequest::post().uri(path).insert_header(("Content-Type", "application/json")).set_payload(body.to_string());
    for header in headers {
        req = req.insert_header(*header);
    }
    send(req, configure).await
}

async fn send<F>(req: TestRequest, configure: F) -> (StatusCode, String)
where F: FnOnce(&mut ServiceConfig) {
    let app = App::new().app_data(json_config()).configure(configure);
    let service = test::init_service(app).await;
    debug!("Making request");
    let res = test::call_service(&service, req.to_request()).await;
    let status = res.status();
    let body = test::read_body(res).await;
    (status, String::from_utf8_lossy(&body).into_owned())
}

pub fn payment_signature(order_id: &str, payment_id: &str) -> String {
    compute_signature(payment_signature_message(order_id, payment_id), KEY_SECRET).unwrap()
}

pub fn order(order_id: &str, status: OrderStatusType) -> Order {
    let ts = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    Order {
        id: 1,
        order_id: OrderId::from(order_id),
        amount: 49_900.into(),
        currency: "INR".into(),
        receipt: None,
        status,
        created_at: ts,
        updated_at: ts,
    }
}

pub fn payment(order_id: &str, payment_id: &str) -> Payment {
    Payment {
        id: 1,
        order_id: OrderId::from(order_id),
        payment_id: payment_id.into(),
        signature: payment_signature(order_id, payment_id),
        status: PaymentStatusType::Verified,
        created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 5, 0).unwrap(),
    }
}
