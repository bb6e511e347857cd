//! Error types for routing, stores and navigation.

use classroom_model::EntityKind;
use thiserror::Error;

use crate::router::RouteName;

/// Route table construction and path resolution failures.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("invalid route pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("invalid regex for param in {pattern:?}: {source}")]
    InvalidParamRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("route name {0} is declared more than once")]
    DuplicateName(RouteName),

    #[error("route {name} ({pattern}) does not capture guard param {param:?}")]
    GuardParamMissing {
        name: RouteName,
        pattern: String,
        param: &'static str,
    },

    #[error("catch-all route {0} must be the last top-level route")]
    CatchAllNotLast(RouteName),

    #[error("no route matches {0:?}")]
    NoMatch(String),

    #[error("route {name} needs param {param:?}")]
    MissingParam { name: RouteName, param: String },

    #[error("value {value:?} for param {param:?} cannot be placed in a path")]
    InvalidParam { param: String, value: String },

    #[error("route {0} is not in the table")]
    UnknownName(RouteName),
}

/// Entity store failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The API answered with a non-success status
    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    /// The request never got an answer (offline, DNS, timeout...)
    #[error("transport error: {0}")]
    Transport(String),

    #[error("could not decode response: {0}")]
    Decode(String),

    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl StoreError {
    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            return Self::Decode(e.to_string());
        }
        match e.status() {
            Some(status) => Self::Status {
                status: status.as_u16(),
                message: e.to_string(),
            },
            None => Self::Transport(e.to_string()),
        }
    }
}

/// A navigation that could not complete.
#[derive(Debug, Error)]
pub enum NavigationError {
    #[error(transparent)]
    Route(#[from] RouteError),

    #[error("warm-up of the {kind} store failed: {source}")]
    WarmUp {
        kind: EntityKind,
        #[source]
        source: StoreError,
    },

    #[error("navigation exceeded {0} consecutive redirects")]
    TooManyRedirects(usize),
}
