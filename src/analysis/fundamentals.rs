use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::warn;

use crate::error::{Result, ScreenerError};
use crate::models::{BalanceSheetPeriod, IncomeStatementPeriod};

/// Average return on equity across fiscal periods, as a fraction.
///
/// Periods are matched by their end date. A period is skipped when either
/// figure is missing or equity is zero.
pub fn return_on_equity(
    balance_sheet: &[BalanceSheetPeriod],
    income_statement: &[IncomeStatementPeriod],
) -> Result<f64> {
    let equity_by_period: HashMap<NaiveDate, f64> = balance_sheet
        .iter()
        .filter_map(|period| {
            period
                .total_stockholder_equity
                .filter(|equity| *equity != 0.0)
                .map(|equity| (period.period_end, equity))
        })
        .collect();

    let ratios: Vec<f64> = income_statement
        .iter()
        .filter_map(|period| {
            let net_income = period.net_income?;
            let equity = equity_by_period.get(&period.period_end)?;
            Some(net_income / equity)
        })
        .collect();

    if ratios.len() < balance_sheet.len() || ratios.len() < income_statement.len() {
        warn!(
            "ROE uses {} of {} balance sheet and {} income statement periods",
            ratios.len(),
            balance_sheet.len(),
            income_statement.len()
        );
    }

    if ratios.is_empty() {
        return Err(ScreenerError::insufficient(
            "no fiscal period with both net income and stockholder equity",
        ));
    }

    Ok(ratios.iter().sum::<f64>() / ratios.len() as f64)
}

/// Mean of whichever of trailing and forward P/E are present.
///
/// Returns 0.0 when both are absent; callers treat 0 as "no valid P/E".
pub fn price_earnings(trailing_pe: Option<f64>, forward_pe: Option<f64>) -> f64 {
    match (trailing_pe, forward_pe) {
        (Some(trailing), Some(forward)) => (trailing + forward) / 2.0,
        (Some(pe), None) | (None, Some(pe)) => pe,
        (None, None) => 0.0,
    }
}

/// Unwrap a required info field or fail the ticker
pub fn require<T>(value: Option<T>, field: &'static str) -> Result<T> {
    value.ok_or(ScreenerError::MissingFundamentalField { field })
}
