use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use url::Url;

use super::{ApiRateLimiter, StockDataProvider};
use crate::error::ProviderError;
use crate::models::{BalanceSheetPeriod, Config, DividendEvent, FundamentalInfo, IncomeStatementPeriod};

const INFO_MODULES: &str = "financialData,summaryDetail,assetProfile";
const STOCKHOLDERS_EQUITY_SERIES: &str = "annualStockholdersEquity";
const NET_INCOME_SERIES: &str = "annualNetIncome";

/// Error object Yahoo embeds in otherwise successful responses
#[derive(Debug, Deserialize)]
struct YahooApiError {
    code: Option<String>,
    description: Option<String>,
}

impl YahooApiError {
    fn into_provider_error(self) -> ProviderError {
        ProviderError::Api(format!(
            "{}: {}",
            self.code.unwrap_or_else(|| "unknown".to_string()),
            self.description.unwrap_or_default()
        ))
    }
}

/// `{"raw": 1.23, "fmt": "1.23"}` number wrapper; empty object when absent
#[derive(Debug, Default, Deserialize)]
struct RawValue {
    raw: Option<f64>,
}

fn raw(value: &Option<RawValue>) -> Option<f64> {
    value.as_ref().and_then(|v| v.raw)
}

fn epoch_to_date(seconds: i64) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp(seconds, 0).map(|dt| dt.date_naive())
}

// ---- chart endpoint ----

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartEnvelope,
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    result: Option<Vec<ChartResult>>,
    error: Option<YahooApiError>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    events: Option<ChartEvents>,
}

#[derive(Debug, Deserialize)]
struct ChartEvents {
    #[serde(default)]
    dividends: HashMap<String, ChartDividend>,
}

#[derive(Debug, Deserialize)]
struct ChartDividend {
    amount: f64,
    date: i64,
}

// ---- quoteSummary endpoint ----

#[derive(Debug, Deserialize)]
struct QuoteSummaryResponse {
    #[serde(rename = "quoteSummary")]
    quote_summary: QuoteSummaryEnvelope,
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryEnvelope {
    result: Option<Vec<QuoteSummaryResult>>,
    error: Option<YahooApiError>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteSummaryResult {
    financial_data: Option<FinancialData>,
    summary_detail: Option<SummaryDetail>,
    asset_profile: Option<AssetProfile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FinancialData {
    current_price: Option<RawValue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryDetail {
    dividend_yield: Option<RawValue>,
    payout_ratio: Option<RawValue>,
    beta: Option<RawValue>,
    market_cap: Option<RawValue>,
    #[serde(rename = "trailingPE")]
    trailing_pe: Option<RawValue>,
    #[serde(rename = "forwardPE")]
    forward_pe: Option<RawValue>,
}

#[derive(Debug, Deserialize)]
struct AssetProfile {
    sector: Option<String>,
    industry: Option<String>,
}

// ---- fundamentals-timeseries endpoint ----

#[derive(Debug, Deserialize)]
struct TimeseriesResponse {
    timeseries: TimeseriesEnvelope,
}

#[derive(Debug, Deserialize)]
struct TimeseriesEnvelope {
    result: Option<Vec<TimeseriesResult>>,
    error: Option<YahooApiError>,
}

/// One requested series; the data sits under a key named after its type
#[derive(Debug, Deserialize)]
struct TimeseriesResult {
    meta: TimeseriesMeta,
    #[serde(flatten)]
    series: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct TimeseriesMeta {
    #[serde(rename = "type", default)]
    series_type: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimeseriesPoint {
    as_of_date: NaiveDate,
    reported_value: Option<RawValue>,
}

impl TimeseriesResult {
    /// Points of `series_type`, skipping the nulls Yahoo pads missing years with
    fn points(mut self, series_type: &str) -> Result<Vec<TimeseriesPoint>, ProviderError> {
        if !self.meta.series_type.iter().any(|t| t == series_type) {
            return Ok(Vec::new());
        }
        let Some(values) = self.series.remove(series_type) else {
            return Ok(Vec::new());
        };
        let points: Vec<Option<TimeseriesPoint>> = serde_json::from_value(values)?;
        Ok(points.into_iter().flatten().collect())
    }
}

/// Yahoo Finance API client
pub struct YahooClient {
    client: Client,
    base_url: String,
    cookie_url: String,
    rate_limiter: ApiRateLimiter,
    crumb: Mutex<Option<String>>,
}

impl YahooClient {
    /// Create a new Yahoo Finance client
    pub fn new(config: &Config) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.as_str())
            .cookie_store(true)
            .build()?;

        Ok(Self {
            client,
            base_url: config.yahoo_base_url.trim_end_matches('/').to_string(),
            cookie_url: config.yahoo_cookie_url.clone(),
            rate_limiter: ApiRateLimiter::new(config.rate_limit_per_minute),
            crumb: Mutex::new(None),
        })
    }

    /// Session crumb required by quoteSummary, fetched once per client
    async fn get_crumb(&self) -> Result<String, ProviderError> {
        let mut crumb_guard = self.crumb.lock().await;
        if let Some(crumb) = &*crumb_guard {
            return Ok(crumb.clone());
        }

        // The cookie endpoint answers 404 but still sets the session cookie
        if let Err(e) = self.client.get(&self.cookie_url).send().await {
            warn!("Cookie request to {} failed: {}", self.cookie_url, e);
        }

        self.rate_limiter.wait().await;
        let url = format!("{}/v1/test/getcrumb", self.base_url);
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ProviderError::Crumb(format!(
                "status {} from {}",
                response.status(),
                url
            )));
        }

        let crumb = response.text().await?.trim().to_string();
        if crumb.is_empty() || crumb.contains('<') {
            return Err(ProviderError::Crumb("empty or malformed crumb".to_string()));
        }

        info!("Obtained Yahoo session crumb");
        *crumb_guard = Some(crumb.clone());
        Ok(crumb)
    }

    /// Rate-limited GET returning the decoded JSON body
    async fn make_request<T: DeserializeOwned>(&self, url: Url) -> Result<T, ProviderError> {
        self.rate_limiter.wait().await;

        debug!("Making request to: {}", url);

        let response = self.client.get(url.clone()).send().await?;

        if !response.status().is_success() {
            return Err(ProviderError::Status {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        debug!("API response received: {} bytes", body.len());

        Ok(serde_json::from_str(&body)?)
    }

    async fn fetch_quote_summary(
        &self,
        symbol: &str,
        modules: &str,
    ) -> Result<QuoteSummaryResult, ProviderError> {
        let crumb = self.get_crumb().await?;
        let url = Url::parse_with_params(
            &format!("{}/v10/finance/quoteSummary/{}", self.base_url, symbol),
            &[("modules", modules), ("crumb", crumb.as_str())],
        )?;

        let response: QuoteSummaryResponse = self.make_request(url).await?;
        if let Some(error) = response.quote_summary.error {
            return Err(error.into_provider_error());
        }

        response
            .quote_summary
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| ProviderError::NotFound(symbol.to_string()))
    }

    /// Annual statement line as `(period end, reported value)` pairs
    async fn fetch_timeseries(
        &self,
        symbol: &str,
        series_type: &str,
    ) -> Result<Vec<(NaiveDate, Option<f64>)>, ProviderError> {
        let now = Utc::now().timestamp().to_string();
        let url = Url::parse_with_params(
            &format!(
                "{}/ws/fundamentals-timeseries/v1/finance/timeseries/{}",
                self.base_url, symbol
            ),
            &[
                ("symbol", symbol),
                ("type", series_type),
                ("period1", "493590046"),
                ("period2", now.as_str()),
            ],
        )?;

        let response: TimeseriesResponse = self.make_request(url).await?;
        if let Some(error) = response.timeseries.error {
            return Err(error.into_provider_error());
        }

        let results = response
            .timeseries
            .result
            .filter(|results| !results.is_empty())
            .ok_or_else(|| ProviderError::NotFound(symbol.to_string()))?;

        let mut values = Vec::new();
        for result in results {
            values.extend(
                result
                    .points(series_type)?
                    .into_iter()
                    .map(|point| (point.as_of_date, raw(&point.reported_value))),
            );
        }

        debug!("{}: {} {} periods", symbol, values.len(), series_type);
        Ok(values)
    }
}

#[async_trait::async_trait]
impl StockDataProvider for YahooClient {
    async fn get_dividends(&self, symbol: &str) -> Result<Vec<DividendEvent>, ProviderError> {
        let now = Utc::now().timestamp().to_string();
        let url = Url::parse_with_params(
            &format!("{}/v8/finance/chart/{}", self.base_url, symbol),
            &[
                ("period1", "0"),
                ("period2", now.as_str()),
                ("interval", "1mo"),
                ("events", "div"),
            ],
        )?;

        let response: ChartResponse = self.make_request(url).await?;
        if let Some(error) = response.chart.error {
            return Err(error.into_provider_error());
        }

        let result = response
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| ProviderError::NotFound(symbol.to_string()))?;

        let mut dividends: Vec<DividendEvent> = result
            .events
            .map(|events| events.dividends)
            .unwrap_or_default()
            .into_values()
            .filter_map(|dividend| {
                epoch_to_date(dividend.date).map(|date| DividendEvent::new(date, dividend.amount))
            })
            .collect();
        dividends.sort_by_key(|dividend| dividend.timestamp);

        debug!("{}: {} dividend payments", symbol, dividends.len());
        Ok(dividends)
    }

    async fn get_balance_sheet(&self, symbol: &str) -> Result<Vec<BalanceSheetPeriod>, ProviderError> {
        let equity = self.fetch_timeseries(symbol, STOCKHOLDERS_EQUITY_SERIES).await?;

        Ok(equity
            .into_iter()
            .map(|(period_end, total_stockholder_equity)| BalanceSheetPeriod {
                period_end,
                total_stockholder_equity,
            })
            .collect())
    }

    async fn get_income_statement(
        &self,
        symbol: &str,
    ) -> Result<Vec<IncomeStatementPeriod>, ProviderError> {
        let net_income = self.fetch_timeseries(symbol, NET_INCOME_SERIES).await?;

        Ok(net_income
            .into_iter()
            .map(|(period_end, net_income)| IncomeStatementPeriod { period_end, net_income })
            .collect())
    }

    async fn get_info(&self, symbol: &str) -> Result<FundamentalInfo, ProviderError> {
        let result = self.fetch_quote_summary(symbol, INFO_MODULES).await?;

        let mut info = FundamentalInfo {
            current_price: result
                .financial_data
                .and_then(|data| raw(&data.current_price)),
            ..Default::default()
        };

        if let Some(profile) = result.asset_profile {
            info.sector = profile.sector;
            info.industry = profile.industry;
        }

        if let Some(detail) = result.summary_detail {
            info.dividend_yield = raw(&detail.dividend_yield);
            info.payout_ratio = raw(&detail.payout_ratio);
            info.beta = raw(&detail.beta);
            info.market_cap = raw(&detail.market_cap);
            info.trailing_pe = raw(&detail.trailing_pe);
            info.forward_pe = raw(&detail.forward_pe);
        }

        Ok(info)
    }
}
