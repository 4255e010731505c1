use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Single dividend payment as reported by the data provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DividendEvent {
    pub timestamp: NaiveDate,
    pub value: f64,
}

impl DividendEvent {
    pub fn new(timestamp: NaiveDate, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Time-ordered dividend payments for one ticker, noise already removed.
///
/// Built once per analysis run by [`crate::analysis::dividends::build_series`]
/// and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DividendSeries {
    events: Vec<DividendEvent>,
}

impl DividendSeries {
    pub(crate) fn from_events(events: Vec<DividendEvent>) -> Self {
        Self { events }
    }

    pub fn events(&self) -> &[DividendEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn first(&self) -> Option<&DividendEvent> {
        self.events.first()
    }
}

/// Info bag exposed by the provider. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FundamentalInfo {
    pub current_price: Option<f64>,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub dividend_yield: Option<f64>,
    pub payout_ratio: Option<f64>,
    pub beta: Option<f64>,
    pub market_cap: Option<f64>,
    pub trailing_pe: Option<f64>,
    pub forward_pe: Option<f64>,
}

/// One fiscal period of balance sheet data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheetPeriod {
    pub period_end: NaiveDate,
    pub total_stockholder_equity: Option<f64>,
}

/// One fiscal period of income statement data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeStatementPeriod {
    pub period_end: NaiveDate,
    pub net_income: Option<f64>,
}

/// Start dates of the currently active dividend runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DividendStreaks {
    /// Most recent cut, i.e. start of the current non-decreasing run
    pub stable_since: NaiveDate,
    /// Start of the current run without a stale (>400 day) repeat
    pub increase_since: NaiveDate,
}

/// Derived metrics for one ticker, computed once per run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockMetrics {
    pub symbol: String,
    pub dividend_stable_since: NaiveDate,
    pub dividend_increase_since: NaiveDate,
    pub avg_dividend_growth: f64,
    pub roe: f64,
    pub pe: f64,
    pub price: f64,
    pub sector: String,
    pub industry: String,
    pub dividend_yield: f64,
    pub payout_ratio: Option<f64>,
    pub beta: f64,
    pub market_cap: f64,
    pub chowder: f64,
}

/// Configuration for the application
#[derive(Debug, Clone)]
pub struct Config {
    pub yahoo_base_url: String,
    pub yahoo_cookie_url: String,
    pub user_agent: String,
    pub request_timeout_secs: u64,
    pub rate_limit_per_minute: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            yahoo_base_url: "https://query2.finance.yahoo.com".to_string(),
            yahoo_cookie_url: "https://fc.yahoo.com".to_string(),
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) dividend-screener/0.1".to_string(),
            request_timeout_secs: 30,
            rate_limit_per_minute: 120,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let defaults = Config::default();

        Ok(Config {
            yahoo_base_url: std::env::var("YAHOO_BASE_URL")
                .unwrap_or(defaults.yahoo_base_url),
            yahoo_cookie_url: std::env::var("YAHOO_COOKIE_URL")
                .unwrap_or(defaults.yahoo_cookie_url),
            user_agent: std::env::var("USER_AGENT").unwrap_or(defaults.user_agent),
            request_timeout_secs: parse_positive(
                "REQUEST_TIMEOUT_SECS",
                std::env::var("REQUEST_TIMEOUT_SECS").ok(),
                defaults.request_timeout_secs,
            )?,
            rate_limit_per_minute: parse_positive(
                "RATE_LIMIT_PER_MINUTE",
                std::env::var("RATE_LIMIT_PER_MINUTE").ok(),
                defaults.rate_limit_per_minute,
            )?,
        })
    }
}

/// Unset falls back to `default`; anything but a non-zero unsigned integer is an error
fn parse_positive<T>(name: &str, raw: Option<String>, default: T) -> anyhow::Result<T>
where
    T: FromStr + Default + PartialEq,
{
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().parse::<T>() {
        Ok(value) if value != T::default() => Ok(value),
        _ => Err(anyhow::anyhow!(
            "{name} must be a positive integer, got {raw:?}"
        )),
    }
}
