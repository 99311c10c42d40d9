use crate::core::config::{ConfigError, ExchangeConfig};
use crate::core::errors::ExchangeError;
use crate::core::kernel::{ReqwestRest, RestClientBuilder, RestClientConfig};
use crate::exchanges::binance_margin::{
    connector::BinanceMarginConnector, signer::BinanceMarginSigner,
};
use reqwest::header::HeaderValue;
use std::sync::Arc;
use tracing::debug;

pub const EXCHANGE_NAME: &str = "binance_margin";

/// Create a Binance cross-margin connector
///
/// Every margin endpoint is signed, so credentials are mandatory.
pub fn build_connector(
    config: ExchangeConfig,
) -> Result<BinanceMarginConnector<ReqwestRest>, ExchangeError> {
    if !config.has_credentials() {
        return Err(ExchangeError::AuthError(
            "API key and secret key are required for margin endpoints".to_string(),
        ));
    }

    // sent verbatim as the X-MBX-APIKEY header
    if HeaderValue::from_str(config.api_key()).is_err() {
        return Err(ExchangeError::AuthError(
            "API key is not a valid HTTP header value".to_string(),
        ));
    }

    let base_url = config.resolved_base_url();
    url::Url::parse(&base_url).map_err(|e| {
        ConfigError::InvalidConfiguration(format!("Invalid base URL '{}': {}", base_url, e))
    })?;

    let mut rest_config = RestClientConfig::new(base_url, EXCHANGE_NAME.to_string())
        .with_recv_window(config.recv_window);
    if let Some(timeout) = config.timeout_seconds {
        rest_config = rest_config.with_timeout(timeout);
    }

    let signer = Arc::new(BinanceMarginSigner::new(
        config.api_key().to_string(),
        config.secret_key().to_string(),
    ));
    let rest = RestClientBuilder::new(rest_config)
        .with_signer(signer)
        .build()?;
    debug!(
        base_url = %rest.config().base_url,
        timeout_seconds = rest.config().timeout_seconds,
        testnet = config.testnet,
        "built binance margin connector"
    );

    Ok(BinanceMarginConnector::new(rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_requires_credentials() {
        let config = ExchangeConfig::new(String::new(), String::new());
        assert!(matches!(
            build_connector(config),
            Err(ExchangeError::AuthError(_))
        ));
    }

    #[test]
    fn test_build_rejects_unusable_api_key() {
        let config = ExchangeConfig::new("bad\nkey".to_string(), "secret".to_string());
        assert!(matches!(
            build_connector(config),
            Err(ExchangeError::AuthError(_))
        ));
    }

    #[test]
    fn test_build_rejects_unparsable_base_url() {
        let config = ExchangeConfig::new("key".to_string(), "secret".to_string())
            .base_url("not a url".to_string());
        assert!(matches!(
            build_connector(config),
            Err(ExchangeError::ConfigError(ConfigError::InvalidConfiguration(_)))
        ));
    }

    #[test]
    fn test_build_with_credentials() {
        let config = ExchangeConfig::new("key".to_string(), "secret".to_string())
            .testnet(true)
            .recv_window(5000)
            .timeout_seconds(5);
        assert!(build_connector(config).is_ok());
    }
}
