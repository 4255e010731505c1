use tracing::debug;

use super::dividends::{average_dividend_growth, build_series, evaluate_streaks};
use super::fundamentals::{price_earnings, require, return_on_equity};
use crate::api::StockDataProvider;
use crate::error::{ProviderError, Result, ScreenerError};
use crate::models::StockMetrics;
use crate::utils::round_to;

/// Derives [`StockMetrics`] for one ticker from a data provider
pub struct StockAnalyzer<'a, P: StockDataProvider + ?Sized> {
    provider: &'a P,
}

impl<'a, P: StockDataProvider + ?Sized> StockAnalyzer<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        Self { provider }
    }

    /// Fetch everything for `symbol` and compute its metrics
    pub async fn analyze(&self, symbol: &str) -> Result<StockMetrics> {
        let provider_error = |e: ProviderError| ScreenerError::provider(symbol, e);

        let raw_dividends = self.provider.get_dividends(symbol).await.map_err(provider_error)?;
        let series = build_series(raw_dividends);
        debug!("{}: {} dividends after noise filter", symbol, series.len());

        let streaks = evaluate_streaks(&series)?;
        let avg_dividend_growth = average_dividend_growth(&series)?;

        let balance_sheet = self
            .provider
            .get_balance_sheet(symbol)
            .await
            .map_err(provider_error)?;
        let income_statement = self
            .provider
            .get_income_statement(symbol)
            .await
            .map_err(provider_error)?;
        let roe = round_to(return_on_equity(&balance_sheet, &income_statement)? * 100.0, 2);

        let info = self.provider.get_info(symbol).await.map_err(provider_error)?;
        let dividend_yield = info.dividend_yield.unwrap_or(0.0);

        let metrics = StockMetrics {
            symbol: symbol.to_string(),
            dividend_stable_since: streaks.stable_since,
            dividend_increase_since: streaks.increase_since,
            avg_dividend_growth,
            roe,
            pe: price_earnings(info.trailing_pe, info.forward_pe),
            price: require(info.current_price, "currentPrice")?,
            sector: require(info.sector, "sector")?,
            industry: require(info.industry, "industry")?,
            dividend_yield,
            payout_ratio: info.payout_ratio.map(|ratio| round_to(ratio * 100.0, 2)),
            beta: require(info.beta, "beta")?,
            market_cap: require(info.market_cap, "marketCap")?,
            chowder: dividend_yield * 100.0 + avg_dividend_growth,
        };

        debug!("{}: {:?}", symbol, metrics);
        Ok(metrics)
    }
}
