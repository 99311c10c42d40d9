use crate::core::kernel::{hmac_sha256_hex, SignatureResult, Signer};
use secrecy::{ExposeSecret, Secret};
use std::collections::HashMap;

pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";

/// HMAC-SHA256 signer for Binance SAPI endpoints
pub struct BinanceMarginSigner {
    api_key: String,
    secret_key: Secret<String>,
}

impl BinanceMarginSigner {
    pub fn new(api_key: String, secret_key: String) -> Self {
        Self {
            api_key,
            secret_key: Secret::new(secret_key),
        }
    }
}

impl Signer for BinanceMarginSigner {
    fn auth_headers(&self) -> HashMap<String, String> {
        HashMap::from([(API_KEY_HEADER.to_string(), self.api_key.clone())])
    }

    fn sign_request(&self, _method: &str, _endpoint: &str, payload: &str) -> SignatureResult {
        // Binance signs the parameter string exactly as sent, whatever the method
        let signature = hmac_sha256_hex(self.secret_key.expose_secret(), payload)?;
        Ok(vec![("signature".to_string(), signature)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_header_carries_api_key() {
        let signer = BinanceMarginSigner::new("my-key".to_string(), "my-secret".to_string());
        let headers = signer.auth_headers();

        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get(API_KEY_HEADER).map(String::as_str), Some("my-key"));
    }

    #[test]
    fn test_signature_is_hmac_of_payload() {
        let signer = BinanceMarginSigner::new("key".to_string(), "secret".to_string());
        let payload = "amount=1.5&asset=BTC&timestamp=1499827319559";

        let params = signer.sign_request("POST", "/sapi/v1/margin/loan", payload).unwrap();

        assert_eq!(params.len(), 1);
        assert_eq!(params[0].0, "signature");
        assert_eq!(params[0].1, hmac_sha256_hex("secret", payload).unwrap());
        assert_eq!(params[0].1.len(), 64);
    }

    #[test]
    fn test_signature_ignores_method_and_endpoint() {
        let signer = BinanceMarginSigner::new("key".to_string(), "secret".to_string());
        let payload = "timestamp=1";

        let get = signer.sign_request("GET", "/sapi/v1/margin/account", payload).unwrap();
        let post = signer.sign_request("POST", "/sapi/v1/margin/order", payload).unwrap();
        assert_eq!(get, post);
    }
}
