//! PolicyEngine Client
//!
//! Executes a built payload against an ordered list of backend strategies:
//! the private authenticated API first, then the public API. Each strategy
//! is tried in order; the first to complete wins. A strategy failure is
//! non-fatal (logged, next strategy tried); only when every strategy fails
//! does the whole PE batch fail, which the orchestrator reports as missing
//! programs — never as ineligibility.

use std::time::Duration;

use serde_json::{json, Value};
use thiserror::Error;
use tracing::warn;

use crate::cache::ExpiringCache;

use super::response::PeResponse;

/// OAuth tokens are long-lived; refresh lazily just before the 30-day expiry
const TOKEN_TTL: Duration = Duration::from_secs(29 * 24 * 60 * 60);
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors raised by the client layer
#[derive(Debug, Error)]
pub enum PolicyEngineError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("token endpoint returned no access_token")]
    Token,

    #[error("api returned status {0}")]
    Api(u16),

    #[error("response missing 'result' key")]
    MissingResult,

    #[error("all PolicyEngine strategies failed")]
    AllStrategiesFailed,
}

/// Connection settings for the hosted PolicyEngine APIs
#[derive(Debug, Clone)]
pub struct PeApiConfig {
    /// Private (authenticated) calculate endpoint
    pub private_url: String,
    /// Public calculate endpoint, used as fallback
    pub public_url: String,
    /// OAuth token endpoint for the private API
    pub auth_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub audience: String,
    pub timeout: Duration,
}

impl PeApiConfig {
    pub fn new(
        private_url: &str,
        public_url: &str,
        auth_url: &str,
        client_id: &str,
        client_secret: &str,
        audience: &str,
    ) -> Self {
        Self {
            private_url: private_url.to_string(),
            public_url: public_url.to_string(),
            auth_url: auth_url.to_string(),
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            audience: audience.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// One way of reaching a PolicyEngine calculation backend
pub trait PeStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Run the calculation; any error means "try the next strategy"
    fn calculate(&self, payload: &Value) -> Result<Value, PolicyEngineError>;
}

/// Private API: bearer-token authenticated, higher rate limits
pub struct PrivateApi {
    config: PeApiConfig,
    http: reqwest::blocking::Client,
    token: ExpiringCache<String>,
}

impl PrivateApi {
    pub fn new(config: PeApiConfig) -> Result<Self, PolicyEngineError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            config,
            http,
            token: ExpiringCache::new(TOKEN_TTL),
        })
    }

    /// Client-credentials exchange, cached for the token TTL
    fn bearer_token(&self) -> Result<String, PolicyEngineError> {
        self.token.get_or_refresh(|| {
            let response = self
                .http
                .post(&self.config.auth_url)
                .json(&json!({
                    "grant_type": "client_credentials",
                    "client_id": self.config.client_id,
                    "client_secret": self.config.client_secret,
                    "audience": self.config.audience,
                }))
                .send()?;
            if !response.status().is_success() {
                return Err(PolicyEngineError::Api(response.status().as_u16()));
            }
            let body: Value = response.json()?;
            body.get("access_token")
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or(PolicyEngineError::Token)
        })
    }
}

impl PeStrategy for PrivateApi {
    fn name(&self) -> &'static str {
        "private"
    }

    fn calculate(&self, payload: &Value) -> Result<Value, PolicyEngineError> {
        let token = self.bearer_token()?;
        let response = self
            .http
            .post(&self.config.private_url)
            .bearer_auth(token)
            .json(payload)
            .send()?;
        if !response.status().is_success() {
            return Err(PolicyEngineError::Api(response.status().as_u16()));
        }
        Ok(response.json()?)
    }
}

/// Public API: unauthenticated fallback
pub struct PublicApi {
    url: String,
    http: reqwest::blocking::Client,
}

impl PublicApi {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, PolicyEngineError> {
        let http = reqwest::blocking::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url: url.to_string(),
            http,
        })
    }
}

impl PeStrategy for PublicApi {
    fn name(&self) -> &'static str {
        "public"
    }

    fn calculate(&self, payload: &Value) -> Result<Value, PolicyEngineError> {
        let response = self.http.post(&self.url).json(payload).send()?;
        if !response.status().is_success() {
            return Err(PolicyEngineError::Api(response.status().as_u16()));
        }
        Ok(response.json()?)
    }
}

/// Ordered-fallback client over the strategy list
pub struct PolicyEngineClient {
    strategies: Vec<Box<dyn PeStrategy>>,
}

impl PolicyEngineClient {
    /// Build a client with an explicit strategy list (tests inject mocks)
    pub fn new(strategies: Vec<Box<dyn PeStrategy>>) -> Self {
        Self { strategies }
    }

    /// Standard production order: private API, then public API
    pub fn with_default_strategies(config: PeApiConfig) -> Result<Self, PolicyEngineError> {
        let public = PublicApi::new(&config.public_url, config.timeout)?;
        let private = PrivateApi::new(config)?;
        Ok(Self::new(vec![Box::new(private), Box::new(public)]))
    }

    /// Try each strategy in order; first success wins
    pub fn calculate(&self, payload: &Value) -> Result<PeResponse, PolicyEngineError> {
        for strategy in &self.strategies {
            match strategy
                .calculate(payload)
                .and_then(PeResponse::new)
            {
                Ok(response) => return Ok(response),
                Err(e) => {
                    warn!(strategy = strategy.name(), error = %e, "PolicyEngine strategy failed");
                }
            }
        }
        Err(PolicyEngineError::AllStrategiesFailed)
    }
}
