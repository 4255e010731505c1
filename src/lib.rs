pub mod analysis;
pub mod api;
pub mod error;
pub mod models;
pub mod screener;
pub mod utils;

pub use analysis::{ScreeningCriteria, StockAnalyzer};
pub use api::{StockDataProvider, YahooClient};
pub use error::{ProviderError, ScreenerError};
pub use screener::{DividendScreener, OutputMode, ScreeningReport, DEFAULT_TICKERS};
