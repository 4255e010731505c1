//! Realistic provider payloads used across tests

use chrono::NaiveDate;
use dividend_screener::models::{
    BalanceSheetPeriod, DividendEvent, FundamentalInfo, IncomeStatementPeriod,
};

use super::TickerData;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Quarterly dividends raised every March from 2004 to 2014
pub fn aristocrat_dividends() -> Vec<DividendEvent> {
    let mut dividends = Vec::new();
    let mut amount = 0.25;
    for year in 2004..=2014 {
        for month in [3, 6, 9, 12] {
            dividends.push(DividendEvent::new(date(year, month, 15), amount));
        }
        amount = (amount * 1.08_f64 * 1000.0).round() / 1000.0;
    }
    dividends
}

pub fn aristocrat_info() -> FundamentalInfo {
    FundamentalInfo {
        current_price: Some(58.2),
        sector: Some("Consumer Defensive".to_string()),
        industry: Some("Household & Personal Products".to_string()),
        dividend_yield: Some(0.032),
        payout_ratio: Some(0.52),
        beta: Some(0.45),
        market_cap: Some(140_000_000_000.0),
        trailing_pe: Some(22.0),
        forward_pe: Some(20.0),
    }
}

pub fn statements(equity: f64, net_income: f64) -> (Vec<BalanceSheetPeriod>, Vec<IncomeStatementPeriod>) {
    let years = [2021, 2022, 2023];
    let balance_sheet = years
        .iter()
        .map(|&y| BalanceSheetPeriod {
            period_end: date(y, 12, 31),
            total_stockholder_equity: Some(equity),
        })
        .collect();
    let income_statement = years
        .iter()
        .map(|&y| IncomeStatementPeriod {
            period_end: date(y, 12, 31),
            net_income: Some(net_income),
        })
        .collect();
    (balance_sheet, income_statement)
}

/// A ticker that passes every default threshold
pub fn aristocrat() -> TickerData {
    let (balance_sheet, income_statement) = statements(10_000.0, 2_500.0);
    TickerData {
        dividends: aristocrat_dividends(),
        balance_sheet,
        income_statement,
        info: aristocrat_info(),
    }
}

/// Cut its dividend in 2009, otherwise healthy
pub fn dividend_cutter() -> TickerData {
    let mut data = aristocrat();
    for dividend in data.dividends.iter_mut() {
        if dividend.timestamp >= date(2009, 6, 1) {
            dividend.value /= 2.0;
        }
    }
    data
}
