use thiserror::Error;

/// Failures raised while talking to a market data provider
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("failed to decode provider response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("provider returned an error: {0}")]
    Api(String),

    #[error("no data returned for {0}")]
    NotFound(String),

    #[error("could not obtain session crumb: {0}")]
    Crumb(String),

    #[error("invalid request URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Failures that abort the analysis of a single ticker
#[derive(Debug, Error)]
pub enum ScreenerError {
    #[error("data provider failed for {symbol}")]
    Provider {
        symbol: String,
        #[source]
        source: ProviderError,
    },

    #[error("insufficient data: {reason}")]
    InsufficientData { reason: String },

    #[error("required fundamental field `{field}` is missing")]
    MissingFundamentalField { field: &'static str },
}

impl ScreenerError {
    pub fn insufficient(reason: impl Into<String>) -> Self {
        ScreenerError::InsufficientData {
            reason: reason.into(),
        }
    }

    pub fn provider(symbol: &str, source: ProviderError) -> Self {
        ScreenerError::Provider {
            symbol: symbol.to_string(),
            source,
        }
    }
}

pub type Result<T, E = ScreenerError> = std::result::Result<T, E>;
