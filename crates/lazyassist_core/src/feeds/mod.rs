//! External data feeds consumed by the command orchestrator.
//!
//! # Responsibility
//! - Define provider traits for weather and news lookups.
//! - Provide HTTP implementations and an offline headline table.
//!
//! # Invariants
//! - Every HTTP call carries connect/read/write timeouts; nothing retries.
//! - Response mapping tolerates missing optional fields; only a missing core
//!   section is a decode error.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

pub mod news;
pub mod weather;

pub use news::{CuratedNewsProvider, GNewsProvider, NewsArticle, NewsProvider};
pub use weather::{ForecastDay, WeatherProvider, WeatherReport, WttrWeatherProvider};

pub type FeedResult<T> = Result<T, FeedError>;

/// Failure talking to an external feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    /// Connection, DNS, TLS or timeout failure.
    Transport {
        provider: &'static str,
        message: String,
    },
    /// Non-success HTTP status.
    Status { provider: &'static str, code: u16 },
    /// Body was not the expected JSON shape.
    Decode {
        provider: &'static str,
        message: String,
    },
}

impl FeedError {
    pub fn provider(&self) -> &'static str {
        match self {
            Self::Transport { provider, .. }
            | Self::Status { provider, .. }
            | Self::Decode { provider, .. } => provider,
        }
    }
}

impl Display for FeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport { provider, message } => {
                write!(f, "{provider} transport error: {message}")
            }
            Self::Status { provider, code } => write!(f, "{provider} returned http status {code}"),
            Self::Decode { provider, message } => {
                write!(f, "{provider} response decode failed: {message}")
            }
        }
    }
}

impl Error for FeedError {}

pub(crate) fn http_agent(timeout: Duration) -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout_connect(timeout)
        .timeout_read(timeout)
        .timeout_write(timeout)
        .user_agent(concat!("lazyassist/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Performs a GET request and decodes the JSON body.
pub(crate) fn get_json(
    provider: &'static str,
    request: ureq::Request,
) -> FeedResult<serde_json::Value> {
    let response = request.call().map_err(|err| match err {
        ureq::Error::Status(code, _) => FeedError::Status { provider, code },
        ureq::Error::Transport(transport) => FeedError::Transport {
            provider,
            message: transport.to_string(),
        },
    })?;

    response
        .into_json::<serde_json::Value>()
        .map_err(|err| FeedError::Decode {
            provider,
            message: err.to_string(),
        })
}
