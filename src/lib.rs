pub mod core;
pub mod exchanges;

pub use core::{
    config::ExchangeConfig,
    errors::ExchangeError,
    traits::{MarginAccountInfo, MarginConnector, MarginLending, MarginOrderPlacer},
    types::*,
};
pub use exchanges::binance_margin::{build_connector, BinanceMarginConnector};
