use std::fmt;

use gittime_core::{ActivityPage, ContributionInfo, FetchFailure, Ticket};

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    ContributionsFetched {
        ticket: Ticket,
        result: Result<ContributionInfo, FetchError>,
    },
    ActivitiesFetched {
        ticket: Ticket,
        result: Result<ActivityPage, FetchError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn is_parse_failure(&self) -> bool {
        matches!(self.kind, FailureKind::Decode | FailureKind::Markup)
    }
}

impl From<FetchError> for FetchFailure {
    fn from(err: FetchError) -> Self {
        if err.is_parse_failure() {
            FetchFailure::Parse(err.to_string())
        } else {
            FetchFailure::Network(err.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    /// Body could not be decoded as text or JSON.
    Decode,
    /// Markup could not be read, e.g. a parser selector is invalid.
    Markup,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Decode => write!(f, "decode error"),
            FailureKind::Markup => write!(f, "unexpected markup"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
