use std::path::PathBuf;

use anyhow::Result;
use checkout_server::data_objects::{CreateOrderRequest, VerifyPaymentRequest};
use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;
use url::Url;

mod checkout_flow;
mod client;
mod signing;
mod widget;

use crate::{
    checkout_flow::{CheckoutFlow, MerchantDetails},
    client::CheckoutClient,
    signing::{secret_or_env, sign_payment, sign_webhook},
    widget::{SimulatedPayment, SimulatedWidget},
};

const KEY_SECRET_VAR: &str = "RCG_RAZORPAY_KEY_SECRET";
const WEBHOOK_SECRET_VAR: &str = "RCG_RAZORPAY_WEBHOOK_SECRET";

#[derive(Parser, Debug)]
#[command(version = "0.1.0", about = "Developer tools for the Razorpay checkout gateway")]
pub struct Arguments {
    /// The checkout server's base URL
    #[arg(short, long, default_value = "http://localhost:5000")]
    server: Url,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[clap(name = "health", about = "Check that the server is up")]
    Health,
    #[clap(name = "create-order", about = "Create a new order")]
    CreateOrder(CreateOrderParams),
    #[clap(name = "verify-payment", about = "Submit a completed payment for verification")]
    VerifyPayment(VerifyPaymentParams),
    #[clap(name = "order", about = "Show an order and its verified payments")]
    Order {
        /// The Razorpay order id, e.g. order_IluGWxBm9U8zJ8
        order_id: String,
    },
    #[clap(name = "sign-payment", about = "Compute the signature Razorpay returns for a completed payment")]
    SignPayment(SignPaymentParams),
    #[clap(name = "sign-webhook", about = "Compute the X-Razorpay-Signature header for a webhook body")]
    SignWebhook(SignWebhookParams),
    #[clap(name = "checkout", about = "Run a full checkout against a server, simulating the payment widget")]
    Checkout(CheckoutParams),
}

#[derive(Debug, Args)]
pub struct CreateOrderParams {
    /// The amount, in major units (e.g. rupees)
    #[arg(short = 'a', long = "amount")]
    amount: i64,
    #[arg(short = 'c', long = "currency", default_value = "INR")]
    currency: String,
    #[arg(short = 'r', long = "receipt")]
    receipt: Option<String>,
}

impl From<CreateOrderParams> for CreateOrderRequest {
    fn from(p: CreateOrderParams) -> Self {
        CreateOrderRequest { amount: p.amount, currency: p.currency, receipt: p.receipt, notes: None }
    }
}

#[derive(Debug, Args)]
pub struct VerifyPaymentParams {
    #[arg(short = 'o', long = "order")]
    order_id: String,
    #[arg(short = 'p', long = "payment")]
    payment_id: String,
    #[arg(short = 'x', long = "signature")]
    signature: String,
}

#[derive(Debug, Args)]
pub struct SignPaymentParams {
    /// The Razorpay key secret. Defaults to RCG_RAZORPAY_KEY_SECRET.
    #[arg(short = 's', long = "secret")]
    secret: Option<String>,
    #[arg(short = 'o', long = "order")]
    order_id: String,
    #[arg(short = 'p', long = "payment")]
    payment_id: String,
}

#[derive(Debug, Args)]
pub struct SignWebhookParams {
    /// The webhook secret. Defaults to RCG_RAZORPAY_WEBHOOK_SECRET.
    #[arg(short = 's', long = "secret")]
    secret: Option<String>,
    /// The exact webhook body
    #[arg(short = 'b', long = "body")]
    body: Option<String>,
    /// A file containing the exact webhook body
    #[arg(short = 'f', long = "file")]
    file: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct CheckoutParams {
    #[command(flatten)]
    order: CreateOrderParams,
    /// The Razorpay key secret the server is using. Defaults to RCG_RAZORPAY_KEY_SECRET.
    #[arg(short = 's', long = "secret")]
    secret: Option<String>,
    /// The Razorpay key id shown to the widget. Defaults to RCG_RAZORPAY_KEY_ID.
    #[arg(short = 'k', long = "key-id")]
    key_id: Option<String>,
    /// Simulate a failed payment with this description
    #[arg(long = "fail", conflicts_with = "dismiss")]
    fail: Option<String>,
    /// Simulate the customer closing the widget
    #[arg(long = "dismiss")]
    dismiss: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();
    let cli = Arguments::parse();
    match cli.command {
        Command::Health => {
            let client = CheckoutClient::new(cli.server)?;
            print!("{}", client.health().await?);
        },
        Command::CreateOrder(params) => {
            let client = CheckoutClient::new(cli.server)?;
            let order = client.create_order(&params.into()).await?;
            println!("{}", serde_json::to_string_pretty(&order)?);
        },
        Command::VerifyPayment(params) => {
            let client = CheckoutClient::new(cli.server)?;
            let request = VerifyPaymentRequest {
                order_id: params.order_id,
                payment_id: params.payment_id,
                signature: params.signature,
            };
            let response = client.verify_payment(&request).await?;
            println!("{}", response.message);
        },
        Command::Order { order_id } => {
            let client = CheckoutClient::new(cli.server)?;
            let order = client.order(&order_id).await?;
            println!("{}", serde_json::to_string_pretty(&order)?);
        },
        Command::SignPayment(params) => {
            let secret = secret_or_env(params.secret, KEY_SECRET_VAR)?;
            println!("{}", sign_payment(&secret, &params.order_id, &params.payment_id)?);
        },
        Command::SignWebhook(params) => {
            let secret = secret_or_env(params.secret, WEBHOOK_SECRET_VAR)?;
            println!("{}", sign_webhook(&secret, params.body, params.file)?);
        },
        Command::Checkout(params) => run_checkout(cli.server, params).await?,
    }
    Ok(())
}

async fn run_checkout(server: Url, params: CheckoutParams) -> Result<()> {
    let secret = secret_or_env(params.secret, KEY_SECRET_VAR)?;
    let key_id = params.key_id.or_else(|| std::env::var("RCG_RAZORPAY_KEY_ID").ok()).unwrap_or_default();
    let behaviour = match (params.fail, params.dismiss) {
        (Some(reason), _) => SimulatedPayment::Fail(reason),
        (None, true) => SimulatedPayment::Dismiss,
        (None, false) => SimulatedPayment::Succeed,
    };
    let merchant = MerchantDetails {
        key_id,
        name: "Checkout Gateway".into(),
        description: "Simulated checkout".into(),
        ..Default::default()
    };
    let client = CheckoutClient::new(server)?;
    let mut flow = CheckoutFlow::new(client, SimulatedWidget::new(secret, behaviour), merchant);
    let outcome = flow.pay(params.order.into()).await;
    println!("{outcome}");
    Ok(())
}
