use std::time::Duration;

use actix_web::{
    dev::Server,
    http::KeepAlive,
    middleware::{DefaultHeaders, Logger},
    web,
    App,
    HttpServer,
};
use checkout_engine::{
    events::{EventHandlers, EventHooks, EventProducers},
    OrderFlowApi,
    OrderQueryApi,
    PaymentVerificationApi,
    SignatureVerifier,
    SqliteDatabase,
    WebhookApi,
};
use log::*;

use crate::{
    config::{ProxyConfig, ServerConfig},
    errors::ServerError,
    integrations::razorpay::RazorpayProvider,
    routes::{health, preflight, webhook, CreateOrderRoute, OrderByIdRoute, VerifyPaymentRoute, SIGNATURE_HEADER},
};

const MAX_DB_CONNECTIONS: u32 = 25;
const EVENT_BUFFER_SIZE: usize = 25;

pub async fn run_server(config: ServerConfig, hooks: EventHooks) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_timeout(&config.database_url, MAX_DB_CONNECTIONS, config.db_timeout)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    db.migrate().await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let provider =
        RazorpayProvider::new(config.razorpay.clone()).map_err(|e| ServerError::ConfigurationError(e.to_string()))?;
    let handlers = EventHandlers::new(EVENT_BUFFER_SIZE, hooks);
    let producers = handlers.producers();
    handlers.start_handlers().await;
    let srv = create_server_instance(config, db, provider, producers)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(
    config: ServerConfig,
    db: SqliteDatabase,
    provider: RazorpayProvider,
    producers: EventProducers,
) -> Result<Server, ServerError> {
    // Key the verifiers up front, so that a bad secret stops the server before it binds
    let payment_verifier = SignatureVerifier::new(&config.razorpay.key_secret)
        .map_err(|e| ServerError::ConfigurationError(format!("RCG_RAZORPAY_KEY_SECRET: {e}")))?;
    let webhook_verifier = SignatureVerifier::new(&config.webhook_secret)
        .map_err(|e| ServerError::ConfigurationError(format!("RCG_RAZORPAY_WEBHOOK_SECRET: {e}")))?;
    let proxy_config = ProxyConfig::from_config(&config);
    let timeout = config.db_timeout;
    let cors_origin = config.cors_allow_origin.clone();
    info!("🚀️ CORS requests will be accepted from {cors_origin}");
    let srv = HttpServer::new(move || {
        let orders_api = OrderFlowApi::new(db.clone(), provider.clone()).with_timeout(timeout);
        let payments_api =
            PaymentVerificationApi::new(db.clone(), payment_verifier.clone(), producers.clone()).with_timeout(timeout);
        let query_api = OrderQueryApi::new(db.clone()).with_timeout(timeout);
        let webhook_api = WebhookApi::new(webhook_verifier.clone(), producers.clone());
        let api_scope = web::scope("/api")
            .wrap(cors_headers(&cors_origin))
            .service(CreateOrderRoute::<SqliteDatabase, RazorpayProvider>::new())
            .service(VerifyPaymentRoute::<SqliteDatabase>::new())
            .service(OrderByIdRoute::<SqliteDatabase>::new())
            .service(webhook)
            .default_service(web::to(preflight));
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("rcg::access_log"))
            .app_data(json_config())
            .app_data(web::Data::new(orders_api))
            .app_data(web::Data::new(payments_api))
            .app_data(web::Data::new(query_api))
            .app_data(web::Data::new(webhook_api))
            .app_data(web::Data::new(proxy_config))
            .service(health)
            .service(api_scope)
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}

/// Malformed JSON bodies are reported in the same `{success, error}` envelope as every other error.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| ServerError::InvalidRequestBody(err.to_string()).into())
}

/// The CORS headers added to every `/api` response.
pub fn cors_headers(origin: &str) -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", origin.to_string()))
        .add(("Access-Control-Allow-Methods", "GET, POST, OPTIONS"))
        .add(("Access-Control-Allow-Headers", format!("Content-Type, {SIGNATURE_HEADER}")))
        .add(("Access-Control-Max-Age", "86400"))
}
