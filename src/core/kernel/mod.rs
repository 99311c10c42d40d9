/// `LotusX` Kernel - transport layer shared by every endpoint
///
/// The kernel knows nothing about margin accounts or orders. It turns a
/// [`ParameterSet`](crate::core::types::ParameterSet) into a signed HTTP
/// request, hands back the raw response, and classifies it.
///
/// # Architecture
///
/// ## Transport
/// - `RestClient`: send a parameter set, get a `RawResponse`
/// - `ReqwestRest`: reqwest implementation, built by `RestClientBuilder`
///
/// ## Authentication
/// - `Signer`: pluggable authentication interface
/// - `hmac_sha256_hex`: HMAC-SHA256 helper for exchanges that sign query strings
///
/// ## Response handling
/// - `classify`: status 200 is success, anything else is an error body
/// - `decode_response`: decode the payload or delegate to an exchange error mapper
///
/// # Example
/// ```rust,no_run
/// use lotusx_margin::core::kernel::*;
/// use lotusx_margin::core::types::ParameterSet;
/// use reqwest::Method;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let rest_config =
///     RestClientConfig::new("https://api.binance.com".to_string(), "binance".to_string());
/// let rest = RestClientBuilder::new(rest_config).build()?;
///
/// let raw = rest
///     .send(Method::GET, "/api/v3/time", &ParameterSet::new(), SecurityType::None)
///     .await?;
/// println!("status {}", raw.status);
/// # Ok(())
/// # }
/// ```
pub mod response;
pub mod rest;
pub mod signer;

pub use response::{classify, decode_json, decode_response, RawResponse, ResponseClass};
pub use rest::{ReqwestRest, RestClient, RestClientBuilder, RestClientConfig, SecurityType};
pub use signer::{hmac_sha256_hex, SignatureResult, Signer};
