pub mod converters; // raw wire structs -> core types, error bodies
pub mod requests; // request -> endpoint, method, parameter set
pub mod rest; // thin typed wrapper around RestClient
pub mod signer; // HMAC-SHA256 authentication
pub mod types; // serde structs <- raw JSON

// Sub-trait implementations organized by responsibility
pub mod builder;
pub mod connector;

pub use builder::{build_connector, EXCHANGE_NAME};
pub use connector::BinanceMarginConnector;
pub use requests::MarginRequest;
pub use rest::BinanceMarginRestClient;
pub use signer::BinanceMarginSigner;
