pub mod dividends;
pub mod fundamentals;
pub mod screening;
pub mod stock_analyzer;

pub use screening::ScreeningCriteria;
pub use stock_analyzer::StockAnalyzer;
