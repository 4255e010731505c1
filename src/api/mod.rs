use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::error::ProviderError;
use crate::models::{BalanceSheetPeriod, DividendEvent, FundamentalInfo, IncomeStatementPeriod};

pub mod yahoo_client;
pub use yahoo_client::YahooClient;

/// Simple rate limiter for API requests
pub struct ApiRateLimiter {
    delay: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl ApiRateLimiter {
    pub fn new(requests_per_minute: u32) -> Self {
        let delay_ms = if requests_per_minute > 0 {
            60_000 / requests_per_minute as u64
        } else {
            1000 // Default 1 second delay
        };

        Self {
            delay: Duration::from_millis(delay_ms),
            last_request: Mutex::new(None),
        }
    }

    /// Sleep until at least one interval has passed since the previous call
    pub async fn wait(&self) {
        let mut last_request = self.last_request.lock().await;
        if let Some(previous) = *last_request {
            tokio::time::sleep_until(previous + self.delay).await;
        }
        *last_request = Some(Instant::now());
    }
}

/// Source of dividend history and fundamentals for a ticker.
///
/// Everything the analysis needs from the outside world goes through this
/// trait, so evaluators never see a vendor's response shapes.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait StockDataProvider: Send + Sync {
    /// Dividend payments ordered by date, oldest first
    async fn get_dividends(&self, symbol: &str) -> Result<Vec<DividendEvent>, ProviderError>;

    async fn get_balance_sheet(&self, symbol: &str) -> Result<Vec<BalanceSheetPeriod>, ProviderError>;

    async fn get_income_statement(
        &self,
        symbol: &str,
    ) -> Result<Vec<IncomeStatementPeriod>, ProviderError>;

    async fn get_info(&self, symbol: &str) -> Result<FundamentalInfo, ProviderError>;
}
