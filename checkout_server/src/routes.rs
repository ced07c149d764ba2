//! Request handler definitions
//!
//! Define each route and it handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current thread will cause the
//! current worker to stop processing new requests. Every store and provider call is therefore expressed as a future,
//! so that worker threads can handle other requests while they wait.
//!
//! Routes under `/api`:
//! * `POST /create-order`: registers a new order with Razorpay.
//! * `POST /verify-payment`: verifies the signature of a completed payment and marks the order paid.
//! * `GET /orders/{order_id}`: the order, with its verified payments.
//! * `POST /webhook`: Razorpay webhook deliveries, authenticated with the `X-Razorpay-Signature` header.
use actix_web::{
    get,
    http::{header::HeaderMap, Method},
    post,
    web,
    HttpRequest,
    HttpResponse,
    Responder,
};
use checkout_engine::{
    db_types::OrderId,
    order_objects::PaymentConfirmation,
    traits::{CheckoutDatabase, PaymentProvider, VerificationOutcome},
    OrderFlowApi,
    OrderQueryApi,
    PaymentVerificationApi,
    WebhookApi,
};
use log::*;

use crate::{
    config::ProxyConfig,
    data_objects::{CreateOrderRequest, JsonResponse, VerifyPaymentRequest},
    errors::ServerError,
    helpers::{get_remote_ip, peer_label},
};

pub const SIGNATURE_HEADER: &str = "X-Razorpay-Signature";

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Orders  ----------------------------------------------------
route!(create_order => Post "/create-order" impl CheckoutDatabase, PaymentProvider);
/// Route handler for `POST /api/create-order`
///
/// Accepts a [`CreateOrderRequest`] with the amount in major units, registers the order with Razorpay and records it.
/// The response is the `{orderId, amount, currency}` triple the client hands to the Razorpay checkout widget. The
/// amount in the response is in minor units.
///
/// Validation failures return 400 and name the offending field. Any failure after validation returns 500 with the
/// generic message `Failed to create order`.
pub async fn create_order<B, P>(
    body: web::Json<CreateOrderRequest>,
    api: web::Data<OrderFlowApi<B, P>>,
) -> Result<HttpResponse, ServerError>
where
    B: CheckoutDatabase,
    P: PaymentProvider,
{
    let request = body.into_inner();
    debug!("💻️ POST create_order for {} {}", request.amount, request.currency);
    let order = api.create_order(request.into()).await?;
    Ok(HttpResponse::Ok().json(order))
}

route!(order_by_id => Get "/orders/{order_id}" impl CheckoutDatabase);
/// Route handler for `GET /api/orders/{order_id}`. Returns the order and its verified payments, or 404.
pub async fn order_by_id<B: CheckoutDatabase>(
    path: web::Path<OrderId>,
    api: web::Data<OrderQueryApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let order_id = path.into_inner();
    debug!("💻️ GET order_by_id({order_id})");
    let order = api.fetch_order(&order_id).await?;
    Ok(HttpResponse::Ok().json(order))
}

//----------------------------------------------   Payments  ----------------------------------------------------
route!(verify_payment => Post "/verify-payment" impl CheckoutDatabase);
/// Route handler for `POST /api/verify-payment`
///
/// The body carries the `orderId`, `paymentId` and `signature` that the Razorpay widget returned to the client.
/// On success the order is marked as paid. Presenting the same payment again succeeds without changing anything.
///
/// * 400: the signature does not match, or a field is missing.
/// * 404: the order does not exist.
/// * 500: the payment could not be recorded.
pub async fn verify_payment<B: CheckoutDatabase>(
    req: HttpRequest,
    body: web::Json<VerifyPaymentRequest>,
    api: web::Data<PaymentVerificationApi<B>>,
    proxy: web::Data<ProxyConfig>,
) -> Result<HttpResponse, ServerError> {
    let confirmation = PaymentConfirmation::from(body.into_inner());
    let peer = peer_label(get_remote_ip(&req, proxy.use_x_forwarded_for, proxy.use_forwarded));
    debug!("💻️ POST verify_payment for order {} from {peer}", confirmation.order_id);
    let verified = api.verify_payment(confirmation).await.map_err(|e| {
        info!("💻️ Payment verification request from {peer} failed. {e}");
        e
    })?;
    let message = match verified.outcome {
        VerificationOutcome::Verified => "Payment verified successfully",
        VerificationOutcome::AlreadyVerified => "Payment already verified",
    };
    Ok(HttpResponse::Ok().json(JsonResponse::success(message)))
}

//----------------------------------------------   Webhooks  ----------------------------------------------------
/// Route handler for `POST /api/webhook`
///
/// The body is taken as raw bytes, since the signature in the `X-Razorpay-Signature` header is computed over the exact
/// bytes that Razorpay sent. Reformatting the JSON before checking would invalidate it.
#[post("/webhook")]
pub async fn webhook(
    req: HttpRequest,
    body: web::Bytes,
    api: web::Data<WebhookApi>,
    proxy: web::Data<ProxyConfig>,
) -> Result<HttpResponse, ServerError> {
    let peer = peer_label(get_remote_ip(&req, proxy.use_x_forwarded_for, proxy.use_forwarded));
    trace!("💻️ Received webhook from {peer}");
    let signature = signature_header(req.headers());
    let outcome = api.handle_webhook(&body, signature).await.map_err(|e| {
        warn!("💻️ Webhook from {peer} was rejected. {e}");
        e
    })?;
    debug!("💻️ Webhook {} from {peer} processed", outcome.event.name());
    Ok(HttpResponse::Ok().json(JsonResponse::success("Webhook processed successfully")))
}

fn signature_header(headers: &HeaderMap) -> Option<&str> {
    headers.get(SIGNATURE_HEADER).and_then(|v| v.to_str().ok())
}

//----------------------------------------------   CORS  ----------------------------------------------------
/// The fallback for requests under `/api` that no route claimed. CORS preflight (`OPTIONS`) requests are answered with
/// 204. The `Access-Control-Allow-*` headers themselves are added to every `/api` response by the scope's
/// `DefaultHeaders` middleware. Anything else is a 404.
pub async fn preflight(req: HttpRequest) -> HttpResponse {
    if req.method() == Method::OPTIONS {
        trace!("💻️ CORS preflight for {}", req.path());
        HttpResponse::NoContent().finish()
    } else {
        debug!("💻️ No route for {} {}", req.method(), req.path());
        HttpResponse::NotFound().finish()
    }
}
