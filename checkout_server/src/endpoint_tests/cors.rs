use actix_web::{http::StatusCode, test, test::TestRequest, web, App};

use super::mocks::{MockCheckoutDb, MockProvider};
use crate::{
    routes::{health, preflight, CreateOrderRoute},
    server::cors_headers,
};

fn api_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().service(health).service(
        web::scope("/api")
            .wrap(cors_headers("https://shop.example.com"))
            .service(CreateOrderRoute::<MockCheckoutDb, MockProvider>::new())
            .default_service(web::to(preflight)),
    )
}

#[actix_web::test]
async fn preflight_requests_are_answered() {
    let _ = env_logger::try_init().ok();
    let service = test::init_service(api_app()).await;
    let req = TestRequest::default().method(actix_web::http::Method::OPTIONS).uri("/api/create-order").to_request();
    let res = test::call_service(&service, req).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    let headers = res.headers();
    assert_eq!(headers.get("Access-Control-Allow-Origin").unwrap(), "https://shop.example.com");
    assert_eq!(headers.get("Access-Control-Allow-Methods").unwrap(), "GET, POST, OPTIONS");
    assert_eq!(headers.get("Access-Control-Allow-Headers").unwrap(), "Content-Type, X-Razorpay-Signature");
}

#[actix_web::test]
async fn unknown_api_routes_are_not_found() {
    let _ = env_logger::try_init().ok();
    let service = test::init_service(api_app()).await;
    let req = TestRequest::get().uri("/api/refunds").to_request();
    let res = test::call_service(&service, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(res.headers().contains_key("Access-Control-Allow-Origin"));
}

#[actix_web::test]
async fn health_check() {
    let service = test::init_service(api_app()).await;
    let req = TestRequest::get().uri("/health").to_request();
    let body = test::call_and_read_body(&service, req).await;
    assert_eq!(body, "👍️\n");
}
