//! Error types for analysis and chat requests

use std::fmt;

use compliance_engine::FormatError;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentRole {
    Submittal,
    Specification,
}

impl fmt::Display for DocumentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentRole::Submittal => f.write_str("submittal"),
            DocumentRole::Specification => f.write_str("specification"),
        }
    }
}

/// A request was refused before anything was sent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Precondition {
    #[error("Message is empty")]
    EmptyMessage,

    #[error("An API key is required")]
    MissingApiKey,

    #[error("No analysis context available")]
    NoContext,

    #[error("Missing {0} document")]
    MissingDocument(DocumentRole),

    #[error("An analysis is already in progress")]
    AnalysisInProgress,
}

/// Failure reported by a [`crate::ReviewBackend`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// Network failure or a non-success response without an error body
    #[error("{0}")]
    Transport(String),

    /// The backend answered with an explicit `{error}`
    #[error("{0}")]
    Upstream(String),
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        BackendError::Transport(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
    #[error(transparent)]
    Precondition(#[from] Precondition),

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("{0}")]
    Upstream(String),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("Response discarded: the analysis context changed while the request was in flight")]
    Stale,
}

impl From<BackendError> for ReviewError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Transport(msg) => ReviewError::Transport(msg),
            BackendError::Upstream(msg) => ReviewError::Upstream(msg),
        }
    }
}

impl ReviewError {
    /// True when the request never left the client
    pub fn is_precondition(&self) -> bool {
        matches!(self, ReviewError::Precondition(_))
    }
}
