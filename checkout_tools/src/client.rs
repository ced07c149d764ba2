use anyhow::{anyhow, Result};
use checkout_engine::{db_types::OrderWithPayments, order_objects::CreatedOrder};
use checkout_server::data_objects::{CreateOrderRequest, JsonResponse, VerifyPaymentRequest};
use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
    Response,
};
use serde::{de::DeserializeOwned, Deserialize};
use url::Url;

use crate::checkout_flow::CheckoutBackend;

/// The error envelope returned by the checkout server
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

pub struct CheckoutClient {
    client: Client,
    server: Url,
}

impl CheckoutClient {
    pub fn new(server: Url) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert("Accept", HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .user_agent("Razorpay Checkout Gateway Client")
            .default_headers(headers)
            .build()
            .map_err(|e| anyhow!("Failed to create HTTP client. {e}"))?;
        Ok(Self { client, server })
    }

    pub fn url(&self, path: &str) -> Result<Url> {
        self.server.join(path).map_err(|e| anyhow!("Failed to join URL: {e}"))
    }

    pub async fn health(&self) -> Result<String> {
        let url = self.url("/health")?;
        let res = self.client.get(url).send().await?;
        let response = res.text().await?;
        Ok(response)
    }

    pub async fn create_order(&self, request: &CreateOrderRequest) -> Result<CreatedOrder> {
        let url = self.url("/api/create-order")?;
        debug!("Creating order for {} {} at {url}", request.amount, request.currency);
        let res = self.client.post(url).json(request).send().await?;
        parse_response(res).await
    }

    pub async fn verify_payment(&self, request: &VerifyPaymentRequest) -> Result<JsonResponse> {
        let url = self.url("/api/verify-payment")?;
        debug!("Verifying payment {} for order {}", request.payment_id, request.order_id);
        let res = self.client.post(url).json(request).send().await?;
        parse_response(res).await
    }

    pub async fn order(&self, order_id: &str) -> Result<OrderWithPayments> {
        let url = self.url(&format!("/api/orders/{order_id}"))?;
        let res = self.client.get(url).send().await?;
        parse_response(res).await
    }
}

impl CheckoutBackend for CheckoutClient {
    async fn create_order(&self, request: CreateOrderRequest) -> Result<CreatedOrder> {
        CheckoutClient::create_order(self, &request).await
    }

    async fn verify_payment(&self, request: VerifyPaymentRequest) -> Result<JsonResponse> {
        CheckoutClient::verify_payment(self, &request).await
    }
}

async fn parse_response<T: DeserializeOwned>(res: Response) -> Result<T> {
    let status = res.status();
    if status.is_success() {
        return Ok(res.json::<T>().await?);
    }
    let body = res.text().await?;
    let reason = serde_json::from_str::<ErrorBody>(&body).map(|b| b.error).unwrap_or(body);
    Err(anyhow!("The server returned {status}. {reason}"))
}
