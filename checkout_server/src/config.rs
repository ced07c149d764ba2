use std::{env, time::Duration};

use checkout_engine::DEFAULT_DB_TIMEOUT;
use log::*;
use razorpay_tools::{RazorpayConfig, DEFAULT_RAZORPAY_API_URL, DEFAULT_RAZORPAY_TIMEOUT};
use rcg_common::{parse_boolean_flag, Secret};

use crate::errors::ServerError;

const DEFAULT_RCG_HOST: &str = "127.0.0.1";
const DEFAULT_RCG_PORT: u16 = 5000;
const DEFAULT_DATABASE_URL: &str = "sqlite://data/checkout_store.db";
const DEFAULT_CORS_ALLOW_ORIGIN: &str = "*";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Upper bound on any single store call
    pub db_timeout: Duration,
    /// Razorpay API credentials. The key secret also keys checkout payment signatures.
    pub razorpay: RazorpayConfig,
    /// The secret configured for webhooks in the Razorpay dashboard. It is distinct from the API key secret.
    pub webhook_secret: Secret<String>,
    /// If true, the X-Forwarded-For header will be used to determine the client's IP address, rather than the
    /// connection's remote address.
    pub use_x_forwarded_for: bool,
    /// If true, the Forwarded header will be used to determine the client's IP address, rather than the
    /// connection's remote address.
    pub use_forwarded: bool,
    /// The value of the `Access-Control-Allow-Origin` header on `/api` responses
    pub cors_allow_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_RCG_HOST.to_string(),
            port: DEFAULT_RCG_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            db_timeout: DEFAULT_DB_TIMEOUT,
            razorpay: RazorpayConfig::default(),
            webhook_secret: Secret::default(),
            use_x_forwarded_for: false,
            use_forwarded: false,
            cors_allow_origin: DEFAULT_CORS_ALLOW_ORIGIN.to_string(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    /// Loads the configuration from `RCG_*` environment variables.
    ///
    /// The Razorpay key secret and webhook secret are required. Without them no signature can be verified, so their
    /// absence is a fatal [`ServerError::ConfigurationError`].
    pub fn from_env() -> Result<Self, ServerError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from any variable source. `lookup` returns `None` for unset variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServerError>
    where F: Fn(&str) -> Option<String> {
        let host = lookup("RCG_HOST").unwrap_or_else(|| DEFAULT_RCG_HOST.into());
        let port = lookup("RCG_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for RCG_PORT. {e} Using the default, {DEFAULT_RCG_PORT}, instead."
                    );
                    DEFAULT_RCG_PORT
                })
            })
            .unwrap_or(DEFAULT_RCG_PORT);
        let database_url = lookup("RCG_DATABASE_URL").unwrap_or_else(|| {
            info!("🪛️ RCG_DATABASE_URL is not set. Using {DEFAULT_DATABASE_URL}.");
            DEFAULT_DATABASE_URL.to_string()
        });
        let db_timeout = lookup("RCG_DB_TIMEOUT_MS")
            .and_then(|s| {
                s.parse::<u64>()
                    .map_err(|e| warn!("🪛️ Invalid configuration value for RCG_DB_TIMEOUT_MS. {e}"))
                    .ok()
            })
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_DB_TIMEOUT);
        let key_id = lookup("RCG_RAZORPAY_KEY_ID").unwrap_or_else(|| {
            warn!("🪛️ RCG_RAZORPAY_KEY_ID is not set. The Razorpay client cannot be started without it.");
            String::default()
        });
        let key_secret = required_secret(&lookup, "RCG_RAZORPAY_KEY_SECRET")?;
        let webhook_secret = required_secret(&lookup, "RCG_RAZORPAY_WEBHOOK_SECRET")?;
        let use_x_forwarded_for = parse_boolean_flag(lookup("RCG_USE_X_FORWARDED_FOR"), false);
        let use_forwarded = parse_boolean_flag(lookup("RCG_USE_FORWARDED"), false);
        let cors_allow_origin = lookup("RCG_CORS_ALLOW_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ALLOW_ORIGIN.into());
        let api_url = lookup("RCG_RAZORPAY_API_URL")
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_RAZORPAY_API_URL.to_string());
        let timeout = lookup("RCG_RAZORPAY_TIMEOUT_MS")
            .and_then(|s| {
                s.parse::<u64>()
                    .map_err(|e| warn!("🪛️ Invalid configuration value for RCG_RAZORPAY_TIMEOUT_MS. {e}"))
                    .ok()
            })
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_RAZORPAY_TIMEOUT);
        let razorpay = RazorpayConfig { key_id, key_secret, api_url, timeout };
        Ok(Self {
            host,
            port,
            database_url,
            db_timeout,
            razorpay,
            webhook_secret,
            use_x_forwarded_for,
            use_forwarded,
            cors_allow_origin,
        })
    }
}

fn required_secret<F>(lookup: &F, name: &str) -> Result<Secret<String>, ServerError>
where F: Fn(&str) -> Option<String> {
    let secret = Secret::new(lookup(name).unwrap_or_default());
    if secret.is_empty() {
        error!("🪛️ {name} is not set. Signatures cannot be verified without it.");
        return Err(ServerError::ConfigurationError(format!("{name} must be set")));
    }
    Ok(secret)
}

//-------------------------------------------------  ProxyConfig  ------------------------------------------------------
/// The subset of the configuration that request handlers need in order to identify the remote peer. It contains no
/// secrets.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProxyConfig {
    pub use_x_forwarded_for: bool,
    pub use_forwarded: bool,
}

impl ProxyConfig {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self { use_x_forwarded_for: config.use_x_forwarded_for, use_forwarded: config.use_forwarded }
    }
}
