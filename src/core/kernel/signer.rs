use crate::core::errors::ExchangeError;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::collections::HashMap;

type HmacSha256 = Hmac<Sha256>;

/// Extra query parameters produced by signing, e.g. `("signature", "ab12...")`
pub type SignatureResult = Result<Vec<(String, String)>, ExchangeError>;

/// Signer trait for request authentication
///
/// The transport hands the signer the exact serialized parameter string it is
/// about to send; the returned parameters are appended after it.
pub trait Signer: Send + Sync {
    /// Headers that identify the caller, sent with API-key and signed requests
    fn auth_headers(&self) -> HashMap<String, String>;

    /// Sign a serialized parameter string
    ///
    /// # Arguments
    /// * `method` - HTTP method (GET, POST, etc.)
    /// * `endpoint` - API endpoint path
    /// * `payload` - Canonical `application/x-www-form-urlencoded` parameter string
    fn sign_request(&self, method: &str, endpoint: &str, payload: &str) -> SignatureResult;
}

/// Lower-case hex HMAC-SHA256 of `payload` keyed with `secret`
pub fn hmac_sha256_hex(secret: &str, payload: &str) -> Result<String, ExchangeError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| ExchangeError::AuthError(format!("Failed to create HMAC: {}", e)))?;
    mac.update(payload.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hmac_matches_published_binance_vector() {
        // Example from the Binance API documentation ("SIGNED Endpoint Examples")
        let secret = "NhqPtmdSJYdKjVHjA7PZj4Mge3R5YNiP1e3UZjInClVN65XAbvqqM6A7H5fATj0j";
        let payload = "symbol=LTCBTC&side=BUY&type=LIMIT&timeInForce=GTC&quantity=1&price=0.1&recvWindow=5000&timestamp=1499827319559";

        assert_eq!(
            hmac_sha256_hex(secret, payload).unwrap(),
            "c8db56825ae71d6d79447849e617115f4a920fa2acdcab2b053c4b2838bd6b71"
        );
    }

    #[test]
    fn test_hmac_depends_on_key() {
        let a = hmac_sha256_hex("key-a", "asset=BTC").unwrap();
        let b = hmac_sha256_hex("key-b", "asset=BTC").unwrap();
        assert_ne!(a, b);
        assert_eq!(a.len(), 64);
    }
}
