use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::config::{Config, ConfigLocation, read_config};
use crate::errors::Error;
use crate::oauth::TokenExchanger;
use crate::request::{HttpMethod, RequestContext};
use crate::response::{self, ApiResponse};
use crate::store::{CredentialStore, FileCredentialStore, NoopCredentialStore};
use crate::telemetry::refresh::RefreshTelemetry;
use crate::token::{Credentials, TokenGuard};

pub(crate) const CLIENT_ID_HEADER: &str = "X-PartGrid-Client-Id";
pub(crate) const USER_AGENT: &str = "partgrid-rust-sdk/0.1.0";
pub(crate) const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub(crate) const TOKEN_ENDPOINT_PATH: &str = "/oauth2/token";

/// Body of a keyword search call.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordSearchRequest {
    pub keywords: String,
    pub record_count: u32,
}

/// Body of a batch part-number lookup. The marketplace flag travels as a
/// query parameter, not in the body.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchLookupRequest {
    pub part_numbers: Vec<String>,
    #[serde(skip)]
    pub exclude_marketplace: bool,
}

/// Authenticated client for the PartGrid search API. Cheap to clone; clones
/// share the same credential state, so a refresh performed through one is
/// visible to all.
#[derive(Clone)]
pub struct PartSearchClient {
    http: Client,
    api_base: String,
    client_id: String,
    request_timeout: Duration,
    exchanger: TokenExchanger,
    guard: Arc<TokenGuard>,
}

impl std::fmt::Debug for PartSearchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PartSearchClient")
            .field("api_base", &self.api_base)
            .field("client_id", &self.client_id)
            .field("request_timeout", &self.request_timeout)
            .finish_non_exhaustive()
    }
}

impl PartSearchClient {
    /// Create a PartSearchClient from a config location
    /// # Arguments
    /// * `location` - Where to read the client config from. Use `ConfigLocation::Env` to read from environment variables
    /// # ENV Vars (when using `ConfigLocation::Env`)
    /// * `PARTGRID_CLIENT_ID` - OAuth2 client id issued for the integration
    /// * `PARTGRID_CLIENT_SECRET` - OAuth2 client secret
    /// * `PARTGRID_API_URL` - Search API base URL
    /// * `PARTGRID_TOKEN_URL` - Optional token endpoint override
    /// * `PARTGRID_ACCESS_TOKEN` - Optional seed bearer token
    /// * `PARTGRID_REFRESH_TOKEN` - Optional seed refresh token
    /// * `PARTGRID_TOKEN_EXPIRES_AT` - Optional RFC 3339 expiry of the seed token
    ///
    /// File-based configs get rotated tokens written back to the same file;
    /// env-based configs keep rotations in memory only.
    pub async fn from_location(location: ConfigLocation) -> Result<Self, Error> {
        match location {
            ConfigLocation::File(path) => {
                let config = read_config(ConfigLocation::File(path.clone())).await?;
                Self::with_store(config, Arc::new(FileCredentialStore::new(path)))
            }
            ConfigLocation::Env => {
                let config = read_config(ConfigLocation::Env).await?;
                Self::new(config)
            }
        }
    }

    pub fn new(config: Config) -> Result<Self, Error> {
        Self::with_store(config, Arc::new(NoopCredentialStore))
    }

    pub fn with_store(config: Config, store: Arc<dyn CredentialStore>) -> Result<Self, Error> {
        if config.client_id.is_empty() {
            return Err(Error::Config("Missing client id".to_string()));
        }
        if config.client_secret.is_empty() {
            return Err(Error::Config("Missing client secret".to_string()));
        }
        let api_base = if config.api_url.starts_with("http") {
            config.api_url.clone()
        } else {
            format!("https://{}", config.api_url)
        };
        let api_base = api_base.trim_end_matches('/').to_string();
        // Validate the base URL before any network call goes out.
        let _ = reqwest::Url::parse(&api_base)
            .map_err(|e| Error::Config(format!("Invalid API base URL '{}': {}", api_base, e)))?;
        let token_url = match config.token_url.as_deref() {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => format!("{api_base}{TOKEN_ENDPOINT_PATH}"),
        };
        let request_timeout = config
            .request_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT);

        let http = Client::builder().user_agent(USER_AGENT).build()?;
        let exchanger = TokenExchanger::new(
            http.clone(),
            token_url,
            config.client_id.clone(),
            config.client_secret.clone(),
            request_timeout,
        );
        let guard = Arc::new(TokenGuard::new(Credentials::from_config(&config), store));
        Ok(Self {
            http,
            api_base,
            client_id: config.client_id,
            request_timeout,
            exchanger,
            guard,
        })
    }

    /// Snapshot of the credentials the client currently holds.
    pub async fn credentials(&self) -> Credentials {
        self.guard.current().await
    }

    /// Single-product lookup by exact part number. The part number is
    /// percent-encoded into the path.
    pub async fn product_details(&self, part_number: &str) -> Result<ApiResponse, Error> {
        let path = format!("/search/v1/products/{}", urlencoding::encode(part_number));
        self.execute(RequestContext::get(path)).await
    }

    pub async fn keyword_search(
        &self,
        request: &KeywordSearchRequest,
    ) -> Result<ApiResponse, Error> {
        let body = serde_json::to_string(request)?;
        self.execute(RequestContext::post("/search/v1/products/keyword", body))
            .await
    }

    pub async fn batch_product_details(
        &self,
        request: &BatchLookupRequest,
    ) -> Result<ApiResponse, Error> {
        let path = format!(
            "/search/v1/products/batch?excludeMarketplace={}",
            request.exclude_marketplace
        );
        let body = serde_json::to_string(request)?;
        self.execute(RequestContext::post(path, body)).await
    }

    /// Runs one logical API call end to end: proactive expiry check,
    /// dispatch, and at most one stale-token recovery retry.
    pub async fn execute(&self, context: RequestContext) -> Result<ApiResponse, Error> {
        let exchanger = &self.exchanger;
        let mut credentials = if context.is_retry_attempt() {
            self.guard.current().await
        } else {
            self.guard
                .ensure_fresh(
                    |refresh_token| async move { exchanger.refresh_grant(&refresh_token).await },
                    &RefreshTelemetry::new("request.proactive"),
                )
                .await?
        };

        let mut context = context;
        loop {
            info!(
                method = %context.method(),
                path = context.resource_path(),
                retry = context.is_retry_attempt(),
                "request.dispatch"
            );
            let response = match self.dispatch(&context, credentials.access_token()).await {
                Ok(response) => response,
                Err(err) => {
                    error!(error = %err, "request.transport_failure");
                    return Err(err);
                }
            };

            let status = response.status();
            let rate_limit_remaining = response::rate_limit_remaining(response.headers());
            let body = response.text().await?;
            info!(
                status = status.as_u16(),
                rate_limit_remaining, "request.response"
            );

            if status == StatusCode::UNAUTHORIZED && response::is_stale_token(&body) {
                if context.is_retry_attempt() {
                    error!("request.stale_token_exhausted");
                    return Err(Error::StaleTokenRetryExhausted);
                }
                warn!("request.stale_token");
                let stale = credentials.access_token().to_string();
                credentials = self
                    .guard
                    .force_refresh(
                        &stale,
                        |refresh_token| async move {
                            exchanger.refresh_grant(&refresh_token).await
                        },
                        &RefreshTelemetry::new("request.recovery"),
                    )
                    .await?;
                context = context.into_retry();
                continue;
            }

            let outcome = response::translate(status, rate_limit_remaining, body);
            if let Err(err) = &outcome {
                error!(error = %err, "request.failed");
            }
            return outcome;
        }
    }

    async fn dispatch(
        &self,
        context: &RequestContext,
        bearer: &str,
    ) -> Result<reqwest::Response, Error> {
        let url = format!("{}{}", self.api_base, context.resource_path());
        let request = match context.method() {
            HttpMethod::Get => self.http.get(&url),
            HttpMethod::Post => self.http.post(&url),
        };
        let mut request = request
            .header("Authorization", format!("Bearer {}", bearer))
            .header(CLIENT_ID_HEADER, &self.client_id)
            .header("Accept", "application/json")
            .timeout(self.request_timeout);
        if let Some(body) = context.body() {
            request = request
                .header("Content-Type", "application/json")
                .body(body.to_string());
        }
        Ok(request.send().await?)
    }
}
