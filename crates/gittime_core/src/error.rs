use thiserror::Error;

/// Why a fetch produced no data, as far as the reducer is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    #[error("network error: {0}")]
    Network(String),
    #[error("parse error: {0}")]
    Parse(String),
}

/// An action that was rejected by a state guard. Rejections leave state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StateConflict {
    #[error("a page fetch is already in flight")]
    AlreadyLoading,
    #[error("a refresh is already running")]
    AlreadyRefreshing,
    #[error("no further pages to load")]
    NoMorePages,
    #[error("pagination is not stalled")]
    NotStalled,
}
