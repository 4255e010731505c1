use chrono::NaiveDate;

/// Round a value to the given number of decimal places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Whole days elapsed from `from` to `to` (negative if `to` is earlier)
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

/// Normalise a ticker symbol for provider lookups
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}
