//! Ticker loop for the dividend screener
//!
//! Tickers are analysed one at a time, in list order. Any failure is caught
//! here, reported, and the run moves on to the next ticker.

use serde::Serialize;
use tracing::{error, info, warn};

use crate::analysis::{ScreeningCriteria, StockAnalyzer};
use crate::api::StockDataProvider;
use crate::models::StockMetrics;
use crate::utils::normalize_symbol;

/// Dividend payers screened when no tickers are given on the command line
pub const DEFAULT_TICKERS: &[&str] = &[
    "ABBV", "ABT", "ADM", "ADP", "AFL", "APD", "BDX", "CAH", "CAT", "CB", "CINF", "CL",
    "CLX", "CTAS", "CVX", "DOV", "ECL", "ED", "EMR", "GD", "GPC", "HRL", "IBM", "ITW",
    "JNJ", "KMB", "KO", "LIN", "LOW", "MCD", "MDT", "MKC", "MMM", "NEE", "NUE", "O",
    "PEP", "PG", "PNR", "PPG", "SHW", "SPGI", "SWK", "SYY", "TGT", "TROW", "WMT", "XOM",
];

/// How per-ticker results are written to stdout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Only progress lines and interesting tickers
    #[default]
    Plain,
    /// Plain output plus a metrics summary per ticker
    Verbose,
    /// One JSON object per successfully analysed ticker, followed by the
    /// usual interesting line
    Json,
}

/// Outcome of a screening run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScreeningReport {
    pub processed: usize,
    pub interesting: Vec<String>,
    pub failed: Vec<(String, String)>,
}

#[derive(Serialize)]
struct JsonLine<'a> {
    #[serde(flatten)]
    metrics: &'a StockMetrics,
    interesting: bool,
}

/// Runs the screening rule over a list of tickers
pub struct DividendScreener<P: StockDataProvider> {
    provider: P,
    criteria: ScreeningCriteria,
    output: OutputMode,
}

impl<P: StockDataProvider> DividendScreener<P> {
    pub fn new(provider: P, criteria: ScreeningCriteria) -> Self {
        Self {
            provider,
            criteria,
            output: OutputMode::default(),
        }
    }

    pub fn with_output(mut self, output: OutputMode) -> Self {
        self.output = output;
        self
    }

    /// Analyse and screen one ticker. Errors are returned, not printed.
    pub async fn screen_ticker(&self, symbol: &str) -> crate::error::Result<(StockMetrics, bool)> {
        let metrics = StockAnalyzer::new(&self.provider).analyze(symbol).await?;
        let interesting = self.criteria.is_interesting(&metrics);
        Ok((metrics, interesting))
    }

    /// Screen every ticker in order, printing progress and results
    pub async fn run<S: AsRef<str>>(&self, tickers: &[S]) -> ScreeningReport {
        let total = tickers.len();
        let mut report = ScreeningReport::default();

        info!("🔍 Screening {} tickers", total);

        for (index, ticker) in tickers.iter().enumerate() {
            let symbol = normalize_symbol(ticker.as_ref());
            println!("Processing {} ({}/{})", symbol, index + 1, total);
            report.processed += 1;

            match self.screen_ticker(&symbol).await {
                Ok((metrics, interesting)) => {
                    self.print_result(&metrics, interesting);
                    if interesting {
                        report.interesting.push(symbol);
                    }
                }
                Err(e) => {
                    let detail = format!("{:?}", anyhow::Error::new(e));
                    error!("❌ {} failed", symbol);
                    eprintln!("{}", detail);
                    report.failed.push((symbol, detail));
                }
            }
        }

        info!(
            "✅ Screened {} tickers: {} interesting, {} failed",
            report.processed,
            report.interesting.len(),
            report.failed.len()
        );
        report
    }

    fn print_result(&self, metrics: &StockMetrics, interesting: bool) {
        for line in self.render_result(metrics, interesting) {
            println!("{}", line);
        }
    }

    /// Stdout lines for one analysed ticker in the configured mode
    fn render_result(&self, metrics: &StockMetrics, interesting: bool) -> Vec<String> {
        let mut lines = Vec::new();
        match self.output {
            OutputMode::Json => {
                let line = JsonLine { metrics, interesting };
                match serde_json::to_string(&line) {
                    Ok(json) => lines.push(json),
                    Err(e) => warn!("Could not serialize metrics for {}: {}", metrics.symbol, e),
                }
            }
            OutputMode::Verbose => lines.push(format!(
                "  stable since {}, increasing since {}, growth {:.2}%, yield {:.2}%, chowder {:.2}, ROE {:.2}%, P/E {:.2}, payout {}, beta {:.2}",
                metrics.dividend_stable_since,
                metrics.dividend_increase_since,
                metrics.avg_dividend_growth,
                metrics.dividend_yield * 100.0,
                metrics.chowder,
                metrics.roe,
                metrics.pe,
                metrics
                    .payout_ratio
                    .map(|ratio| format!("{ratio:.2}%"))
                    .unwrap_or_else(|| "n/a".to_string()),
                metrics.beta,
            )),
            OutputMode::Plain => {}
        }
        if interesting {
            lines.push(format!("{} is interesting!", metrics.symbol));
        }
        lines
    }
}
