use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::models::StockMetrics;

/// Thresholds a dividend-growth stock must meet to be flagged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningCriteria {
    #[serde(rename = "minDividendYield")]
    pub min_dividend_yield: f64,       // Default: 0.02 (fraction)
    #[serde(rename = "maxIncreaseSinceYear")]
    pub max_increase_since_year: i32,  // Default: 2007
    #[serde(rename = "minChowder")]
    pub min_chowder: f64,              // Default: 9
    #[serde(rename = "minRoe")]
    pub min_roe: f64,                  // Default: 15%
    #[serde(rename = "maxPayoutRatio")]
    pub max_payout_ratio: f64,         // Default: 60%
    #[serde(rename = "minMarketCap")]
    pub min_market_cap: f64,           // Default: $2B
    #[serde(rename = "maxBeta")]
    pub max_beta: f64,                 // Default: 1.0
    #[serde(rename = "maxPe")]
    pub max_pe: f64,                   // Default: 40
}

impl Default for ScreeningCriteria {
    fn default() -> Self {
        Self {
            min_dividend_yield: 0.02,
            max_increase_since_year: 2007,
            min_chowder: 9.0,
            min_roe: 15.0,
            max_payout_ratio: 60.0,
            min_market_cap: 2_000_000_000.0,
            max_beta: 1.0,
            max_pe: 40.0,
        }
    }
}

impl ScreeningCriteria {
    /// True when the stock passes every threshold.
    ///
    /// The increase streak is judged by the year it started in. A missing
    /// payout ratio fails the payout check; a P/E of 0 passes the P/E check.
    pub fn is_interesting(&self, metrics: &StockMetrics) -> bool {
        metrics.dividend_yield >= self.min_dividend_yield
            && metrics.dividend_increase_since.year() <= self.max_increase_since_year
            && metrics.chowder >= self.min_chowder
            && metrics.roe >= self.min_roe
            && metrics
                .payout_ratio
                .is_some_and(|payout| payout <= self.max_payout_ratio)
            && metrics.market_cap >= self.min_market_cap
            && metrics.beta <= self.max_beta
            && metrics.pe <= self.max_pe
    }
}
