//! Fundamental metrics and screening rule through the public API

use pretty_assertions::assert_eq;
use test_log::test;

use dividend_screener::analysis::fundamentals::{price_earnings, return_on_equity};
use dividend_screener::models::StockMetrics;
use dividend_screener::ScreeningCriteria;

use crate::common::fixtures::{date, statements};

#[test]
fn test_pe_from_trailing_only() {
    assert_eq!(price_earnings(Some(20.0), None), 20.0);
}

#[test]
fn test_pe_sentinel_and_mean() {
    assert_eq!(price_earnings(None, None), 0.0);
    assert_eq!(price_earnings(Some(30.0), Some(10.0)), 20.0);
}

#[test]
fn test_roe_over_three_fiscal_years() {
    let (balance_sheet, income_statement) = statements(8_000.0, 1_600.0);
    let roe = return_on_equity(&balance_sheet, &income_statement).unwrap();
    assert!((roe - 0.2).abs() < 1e-12);
}

#[test]
fn test_roe_with_reversed_period_order() {
    let (balance_sheet, mut income_statement) = statements(8_000.0, 1_600.0);
    income_statement.reverse();
    let roe = return_on_equity(&balance_sheet, &income_statement).unwrap();
    assert!((roe - 0.2).abs() < 1e-12);
}

#[test]
fn test_screening_rule_uses_year_of_increase_streak() {
    let metrics = StockMetrics {
        symbol: "PG".to_string(),
        dividend_stable_since: date(1995, 1, 15),
        dividend_increase_since: date(2007, 12, 15),
        avg_dividend_growth: 6.1,
        roe: 31.0,
        pe: 25.0,
        price: 165.0,
        sector: "Consumer Defensive".to_string(),
        industry: "Household & Personal Products".to_string(),
        dividend_yield: 0.024,
        payout_ratio: Some(59.9),
        beta: 0.42,
        market_cap: 390_000_000_000.0,
        chowder: 8.5,
    };

    let criteria = ScreeningCriteria::default();
    assert!(!criteria.is_interesting(&metrics)); // chowder below 9

    let raised = StockMetrics {
        chowder: 9.0,
        ..metrics.clone()
    };
    assert!(criteria.is_interesting(&raised));

    let late = StockMetrics {
        dividend_increase_since: date(2008, 1, 1),
        ..raised
    };
    assert!(!criteria.is_interesting(&late));
}
