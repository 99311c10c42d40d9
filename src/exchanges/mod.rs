pub mod binance_margin;
