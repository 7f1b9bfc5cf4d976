//! Error kinds for each stage of a run.
//!
//! Input and lookup failures are recoverable and never end a run on their
//! own. Chart failures abort the run before any Spotify call is made.
//! Spotify failures other than a single missed search abort the run at the
//! stage they happened in.

use reqwest::StatusCode;
use thiserror::Error;

use crate::management::Stage;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing environment variables: {}", .0.join(", "))]
    MissingVariables(Vec<&'static str>),
}

/// Why a user supplied date was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    #[error("Invalid date format or period.")]
    Format,

    #[error("Date cannot be in the future.")]
    Future,
}

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("chart request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("chart request returned status {0}")]
    Status(StatusCode),

    #[error("chart response body was empty")]
    EmptyBody,

    #[error("invalid chart selector: {0}")]
    Selector(String),

    /// The page loaded but the expected list structure matched nothing.
    #[error("no track titles found on the chart page")]
    NoEntries,
}

impl ChartError {
    /// Whether the failure happened before a usable page was received.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            ChartError::Network(_) | ChartError::Status(_) | ChartError::EmptyBody
        )
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum SpotifyError {
    #[error("spotify request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("spotify authorization failed: {0}")]
    Auth(String),

    #[error("token cache error: {0}")]
    Store(#[from] StoreError),
}

/// Failure that ended a playlist run.
#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Chart(#[from] ChartError),

    #[error("{stage} failed: {source}")]
    Spotify {
        stage: Stage,
        #[source]
        source: SpotifyError,
    },
}

impl RunError {
    pub fn spotify(stage: Stage) -> impl FnOnce(SpotifyError) -> RunError {
        move |source| RunError::Spotify { stage, source }
    }

    /// The state the run was in when it stopped.
    pub fn stage(&self) -> Stage {
        match self {
            RunError::Chart(_) => Stage::Scraping,
            RunError::Spotify { stage, .. } => *stage,
        }
    }
}
