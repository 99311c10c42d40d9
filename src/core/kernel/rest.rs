use crate::core::errors::ExchangeError;
use crate::core::kernel::response::RawResponse;
use crate::core::kernel::signer::Signer;
use crate::core::types::ParameterSet;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, Response};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, instrument, trace};

/// How much authentication an endpoint needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityType {
    /// Public endpoint
    None,
    /// API key header only
    ApiKey,
    /// API key header, timestamp and signature
    Signed,
}

impl SecurityType {
    pub const fn needs_api_key(&self) -> bool {
        matches!(self, Self::ApiKey | Self::Signed)
    }

    pub const fn needs_signature(&self) -> bool {
        matches!(self, Self::Signed)
    }
}

/// REST client trait for making HTTP requests
///
/// Implementations authenticate and send a parameter set and return the raw
/// response for any completed HTTP exchange, whatever its status. Only failing
/// to reach the server or to read the body is an error here.
#[async_trait]
pub trait RestClient: Send + Sync {
    /// Send a request
    ///
    /// # Arguments
    /// * `method` - HTTP method
    /// * `endpoint` - The API endpoint path
    /// * `params` - Request parameters (query string for GET, form body for POST)
    /// * `security` - Which credentials to attach
    async fn send(
        &self,
        method: Method,
        endpoint: &str,
        params: &ParameterSet,
        security: SecurityType,
    ) -> Result<RawResponse, ExchangeError>;
}

/// Configuration for the REST client
#[derive(Clone, Debug)]
pub struct RestClientConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Exchange name for logging and tracing
    pub exchange_name: String,
    /// Request timeout in seconds; bounds the whole exchange including the body read
    pub timeout_seconds: u64,
    /// User agent string to include in requests
    pub user_agent: String,
    /// `recvWindow` added to signed requests that don't carry one
    pub recv_window: Option<u64>,
}

impl RestClientConfig {
    /// Create a new configuration
    ///
    /// # Arguments
    /// * `base_url` - Base URL for the API
    /// * `exchange_name` - Name of the exchange
    pub fn new(base_url: String, exchange_name: String) -> Self {
        Self {
            base_url,
            exchange_name,
            timeout_seconds: 30,
            user_agent: "LotusX/1.0".to_string(),
            recv_window: None,
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    pub fn with_recv_window(mut self, recv_window: Option<u64>) -> Self {
        self.recv_window = recv_window;
        self
    }
}

/// Builder for creating REST client instances
pub struct RestClientBuilder {
    config: RestClientConfig,
    signer: Option<Arc<dyn Signer>>,
}

impl RestClientBuilder {
    /// Create a new builder with the given configuration
    pub fn new(config: RestClientConfig) -> Self {
        Self {
            config,
            signer: None,
        }
    }

    /// Set the signer for authenticated requests
    pub fn with_signer(mut self, signer: Arc<dyn Signer>) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Build the REST client
    pub fn build(self) -> Result<ReqwestRest, ExchangeError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(self.config.timeout_seconds))
            .user_agent(&self.config.user_agent)
            .build()
            .map_err(|e| {
                ExchangeError::TransportFailed(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(ReqwestRest {
            client,
            config: self.config,
            signer: self.signer,
        })
    }
}

/// Implementation of `RestClient` using reqwest
#[derive(Clone)]
pub struct ReqwestRest {
    client: Client,
    config: RestClientConfig,
    signer: Option<Arc<dyn Signer>>,
}

impl std::fmt::Debug for ReqwestRest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestRest")
            .field("config", &self.config)
            .field("has_signer", &self.signer.is_some())
            .finish_non_exhaustive()
    }
}

impl ReqwestRest {
    pub fn config(&self) -> &RestClientConfig {
        &self.config
    }

    /// Get the current timestamp in milliseconds
    fn get_timestamp() -> Result<u64, ExchangeError> {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .map_err(|e| ExchangeError::InvalidTimestamp(format!("System clock error: {}", e)))
    }

    /// Build the full URL for an endpoint
    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    fn signer(&self) -> Result<&Arc<dyn Signer>, ExchangeError> {
        self.signer.as_ref().ok_or_else(|| {
            ExchangeError::AuthError("Authentication required but no signer provided".to_string())
        })
    }

    /// Serialize `params` into the exact string that goes on the wire,
    /// adding timestamp, recvWindow and signature for signed requests.
    fn prepare_payload(
        &self,
        method: &Method,
        endpoint: &str,
        params: &ParameterSet,
        security: SecurityType,
    ) -> Result<(HashMap<String, String>, String), ExchangeError> {
        if !security.needs_api_key() {
            return Ok((HashMap::new(), params.to_query_string()));
        }

        let signer = self.signer()?;
        let headers = signer.auth_headers();

        if !security.needs_signature() {
            return Ok((headers, params.to_query_string()));
        }

        let mut params = params.clone();
        if !params.contains_key("timestamp") {
            params.insert("timestamp", Self::get_timestamp()?.to_string());
        }
        if let Some(recv_window) = self.config.recv_window {
            if recv_window != 0 && !params.contains_key("recvWindow") {
                params.insert("recvWindow", recv_window.to_string());
            }
        }

        let payload = params.to_query_string();
        let signed_params = signer.sign_request(method.as_str(), endpoint, &payload)?;

        // signature goes last, after the exact string it covers
        let mut serializer = url::form_urlencoded::Serializer::for_suffix(payload, 0);
        for (key, value) in &signed_params {
            serializer.append_pair(key, value);
        }

        Ok((headers, serializer.finish()))
    }

    /// Read the whole body; consuming `response` releases the connection exactly once
    async fn read_response(response: Response) -> Result<RawResponse, ExchangeError> {
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| {
            ExchangeError::TransportFailed(format!("Failed to read response body: {}", e))
        })?;

        let raw = RawResponse::new(status, body.to_vec());
        debug!(status, body_len = raw.body.len(), "response received");
        trace!("Response body: {}", raw.body_text());

        Ok(raw)
    }
}

/// A request that could not be built (bad header value, unparsable URL) never
/// left the process, so it is not a transport failure.
fn classify_send_error(err: reqwest::Error) -> ExchangeError {
    if err.is_builder() {
        ExchangeError::InvalidRequest(format!("Failed to build request: {}", err))
    } else {
        ExchangeError::TransportFailed(format!("Request failed: {}", err))
    }
}

#[async_trait]
impl RestClient for ReqwestRest {
    #[instrument(
        skip(self, params),
        fields(
            exchange = %self.config.exchange_name,
            method = %method,
            endpoint = %endpoint,
            param_count = params.len()
        )
    )]
    async fn send(
        &self,
        method: Method,
        endpoint: &str,
        params: &ParameterSet,
        security: SecurityType,
    ) -> Result<RawResponse, ExchangeError> {
        let (headers, payload) = self.prepare_payload(&method, endpoint, params, security)?;
        let url = self.build_url(endpoint);

        let mut request = if method == Method::GET {
            let url = if payload.is_empty() {
                url
            } else {
                format!("{}?{}", url, payload)
            };
            self.client.request(method, url)
        } else {
            self.client
                .request(method, url)
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(payload)
        };

        for (key, value) in headers {
            request = request.header(key, value);
        }

        let response = request.send().await.map_err(classify_send_error)?;

        Self::read_response(response).await
    }
}
